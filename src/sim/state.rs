//! Particle store and published snapshots
//!
//! The store is a fixed-capacity structure-of-arrays keyed by slot index.
//! Slot indices are stable for a particle's lifetime: there is no
//! compaction, and since this design has no removal condition, slots fill
//! monotonically until capacity. Only the step driver mutates the store
//! (single-writer); everything downstream reads published snapshots.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::vessel::ContactSide;
use crate::error::{Error, Result};

/// Fixed-capacity particle storage, one array per field.
#[derive(Debug, Clone)]
pub struct ParticleStore {
    pub(crate) pos: Vec<Vec2>,
    pub(crate) vel: Vec<Vec2>,
    pub(crate) active: Vec<bool>,
    /// Granted permission to cross the neck; meaningful only while the
    /// particle is above the midline, monotonic until it crosses.
    pub(crate) gate_ready: Vec<bool>,
    /// Last-step wall contact, retained one frame for observability
    pub(crate) contact: Vec<ContactSide>,
}

impl ParticleStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            pos: vec![Vec2::ZERO; capacity],
            vel: vec![Vec2::ZERO; capacity],
            active: vec![false; capacity],
            gate_ready: vec![false; capacity],
            contact: vec![ContactSide::None; capacity],
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.active.len()
    }

    pub fn active_count(&self) -> usize {
        self.active.iter().filter(|&&a| a).count()
    }

    /// Lowest-index free slot, if any.
    pub fn free_slot(&self) -> Option<usize> {
        self.active.iter().position(|&a| !a)
    }

    /// Bring a slot to life at the given position/velocity.
    ///
    /// Fails with `SlotOccupied` if the slot is already active. A reused
    /// slot starts with `gate_ready` and `contact` cleared.
    pub fn activate(&mut self, slot: usize, pos: Vec2, vel: Vec2) -> Result<()> {
        if self.active[slot] {
            return Err(Error::SlotOccupied { slot });
        }
        self.active[slot] = true;
        self.gate_ready[slot] = false;
        self.contact[slot] = ContactSide::None;
        self.pos[slot] = pos;
        self.vel[slot] = vel;
        Ok(())
    }

    /// Active slots in index order. Order matters: it makes replay
    /// deterministic, drives the pairwise loop over each unordered pair
    /// exactly once, and approximates FIFO for the admission scan.
    pub fn active_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.active
            .iter()
            .enumerate()
            .filter_map(|(i, &a)| a.then_some(i))
    }

    pub fn deactivate_all(&mut self) {
        self.active.fill(false);
        self.gate_ready.fill(false);
        self.contact.fill(ContactSide::None);
    }

    #[inline]
    pub fn is_active(&self, slot: usize) -> bool {
        self.active[slot]
    }

    #[inline]
    pub fn pos(&self, slot: usize) -> Vec2 {
        self.pos[slot]
    }

    #[inline]
    pub fn vel(&self, slot: usize) -> Vec2 {
        self.vel[slot]
    }

    #[inline]
    pub fn gate_ready(&self, slot: usize) -> bool {
        self.gate_ready[slot]
    }

    #[inline]
    pub fn contact(&self, slot: usize) -> ContactSide {
        self.contact[slot]
    }
}

/// One particle's entry in a published snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapshotParticle {
    pub slot: usize,
    pub pos: Vec2,
    pub vel: Vec2,
    pub contact: ContactSide,
}

/// Immutable per-step output, ordered by slot index.
///
/// A renderer only ever sees the most recently published snapshot, never
/// the live store, so a step can never tear mid-update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Step counter at publication time
    pub tick: u64,
    pub particles: Vec<SnapshotParticle>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activate_rejects_occupied_slot() {
        let mut store = ParticleStore::new(4);
        store
            .activate(1, Vec2::new(5.0, 5.0), Vec2::ZERO)
            .expect("first activation");
        assert!(matches!(
            store.activate(1, Vec2::ZERO, Vec2::ZERO),
            Err(Error::SlotOccupied { slot: 1 })
        ));
    }

    #[test]
    fn free_slot_scans_in_index_order() {
        let mut store = ParticleStore::new(3);
        assert_eq!(store.free_slot(), Some(0));
        store.activate(0, Vec2::ZERO, Vec2::ZERO).expect("slot 0");
        assert_eq!(store.free_slot(), Some(1));
        store.activate(1, Vec2::ZERO, Vec2::ZERO).expect("slot 1");
        store.activate(2, Vec2::ZERO, Vec2::ZERO).expect("slot 2");
        assert_eq!(store.free_slot(), None);
    }

    #[test]
    fn active_indices_in_order() {
        let mut store = ParticleStore::new(5);
        for slot in [3, 0, 4] {
            store.activate(slot, Vec2::ZERO, Vec2::ZERO).expect("activate");
        }
        let indices: Vec<usize> = store.active_indices().collect();
        assert_eq!(indices, vec![0, 3, 4]);
    }

    #[test]
    fn reused_slot_starts_clean() {
        let mut store = ParticleStore::new(2);
        store.activate(0, Vec2::ZERO, Vec2::ZERO).expect("activate");
        store.gate_ready[0] = true;
        store.contact[0] = ContactSide::Left;

        store.deactivate_all();
        store
            .activate(0, Vec2::new(1.0, 2.0), Vec2::ZERO)
            .expect("reactivate");
        assert!(!store.gate_ready(0));
        assert_eq!(store.contact(0), ContactSide::None);
        assert_eq!(store.pos(0), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn deactivate_all_frees_every_slot() {
        let mut store = ParticleStore::new(3);
        for slot in 0..3 {
            store.activate(slot, Vec2::ZERO, Vec2::ZERO).expect("activate");
        }
        assert_eq!(store.active_count(), 3);
        store.deactivate_all();
        assert_eq!(store.active_count(), 0);
        assert_eq!(store.free_slot(), Some(0));
    }
}
