//! Pairwise penalty-force collision resolution
//!
//! Soft-constraint scheme: overlapping particles push apart along the
//! separating normal with a force proportional to penetration depth.
//! Particles may briefly interpenetrate under high density, which is
//! acceptable for a stylized simulation.
//!
//! The pass is two-phase: impulses are accumulated from the immutable
//! position array first, then applied to velocities in a second sweep.
//! Results are therefore independent of pair visit order, and the
//! accumulation phase can be farmed out across workers that all read the
//! same position snapshot.

use glam::Vec2;

use super::state::ParticleStore;

/// O(n^2) pairwise resolver with a pre-allocated impulse buffer.
#[derive(Debug)]
pub struct CollisionResolver {
    impulses: Vec<Vec2>,
}

impl CollisionResolver {
    pub fn new(capacity: usize) -> Self {
        Self {
            impulses: vec![Vec2::ZERO; capacity],
        }
    }

    /// Accumulate and apply contact impulses for every unordered active
    /// pair closer than one particle diameter.
    ///
    /// Coincident pairs (distance exactly zero) have no separating normal
    /// and are skipped for the step rather than dividing by zero.
    pub fn resolve(&mut self, store: &mut ParticleStore, radius: f32, stiffness: f32, dt: f32) {
        let n = store.capacity();
        let min_dist = radius * 2.0;

        self.impulses.fill(Vec2::ZERO);

        // Phase 1: accumulate from read-only positions
        for i in 0..n {
            if !store.active[i] {
                continue;
            }
            for j in (i + 1)..n {
                if !store.active[j] {
                    continue;
                }
                let delta = store.pos[i] - store.pos[j];
                let dist = delta.length();
                if dist > 0.0 && dist < min_dist {
                    let normal = delta / dist;
                    let impulse = normal * (stiffness * (min_dist - dist) * dt);
                    self.impulses[i] += impulse;
                    self.impulses[j] -= impulse;
                }
            }
        }

        // Phase 2: apply
        for i in 0..n {
            if store.active[i] {
                store.vel[i] += self.impulses[i];
            }
        }
    }
}
