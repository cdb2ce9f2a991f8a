//! Fixed timestep simulation driver
//!
//! One step runs, in order: integrate -> pairwise contacts -> admission ->
//! midline hold -> boundary constraints -> publish snapshot. Steps are
//! strictly sequential; step k+1 only sees state as left by step k, and
//! consumers only ever see the published snapshot.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::CollisionResolver;
use super::gate::AdmissionGate;
use super::state::{ParticleStore, Snapshot, SnapshotParticle};
use super::vessel::Vessel;
use crate::config::{SimConfig, check_unit_range};
use crate::consts::SIM_DT;
use crate::error::Result;

/// The simulation engine: owns all mutable state and is the store's only
/// writer. Construction validates the configuration; after that, no
/// operation can fail.
#[derive(Debug)]
pub struct Simulation {
    config: SimConfig,
    vessel: Vessel,
    store: ParticleStore,
    gate: AdmissionGate,
    resolver: CollisionResolver,
    rng: Pcg32,
    snapshot: Snapshot,
    tick: u64,
}

impl Simulation {
    /// Create an engine from the given configuration.
    ///
    /// Fails with `InvalidGeometry`/`InvalidParam` on out-of-range
    /// configuration; this is the only fallible entry point.
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        let vessel = Vessel::new(&config.vessel)?;
        Ok(Self {
            vessel,
            store: ParticleStore::new(config.capacity),
            gate: AdmissionGate::new(config.admission_interval),
            resolver: CollisionResolver::new(config.capacity),
            rng: Pcg32::seed_from_u64(config.seed),
            snapshot: Snapshot::default(),
            tick: 0,
            config,
        })
    }

    /// Spawn up to `count` particles at the spawn point with jittered
    /// horizontal position and velocity. Returns the number actually
    /// spawned; running out of free slots caps the count silently.
    pub fn activate(&mut self, count: usize) -> usize {
        let mut spawned = 0;
        while spawned < count {
            let Some(slot) = self.store.free_slot() else {
                log::debug!("activation capped: all {} slots live", self.store.capacity());
                break;
            };
            let jx = self.config.spawn_jitter_x;
            let jvx = self.config.spawn_jitter_vx;
            let pos = Vec2::new(
                self.vessel.center_x() + self.rng.random_range(-jx..=jx),
                self.vessel.spawn_y(),
            );
            let vel = Vec2::new(self.rng.random_range(-jvx..=jvx), 0.0);
            if self.store.activate(slot, pos, vel).is_err() {
                break;
            }
            spawned += 1;
        }
        spawned
    }

    /// Advance the simulation by one fixed timestep and publish the
    /// resulting snapshot.
    pub fn step(&mut self) -> &Snapshot {
        let dt = SIM_DT;
        let radius = self.config.particle_radius;

        // 1. Integrate gravity into velocity, velocity into position
        for i in 0..self.store.capacity() {
            if !self.store.active[i] {
                continue;
            }
            self.store.vel[i].y += self.config.gravity * dt;
            let vel = self.store.vel[i];
            self.store.pos[i] += vel * dt;
        }

        // 2. Pairwise contacts over the integrated positions
        self.resolver
            .resolve(&mut self.store, radius, self.config.contact_stiffness, dt);

        // 3. Admission: at most one release per interval
        if let Some(slot) = self.gate.advance(dt, &mut self.store, self.vessel.midline_y()) {
            log::debug!("neck admission: slot {slot} released at tick {}", self.tick);
        }

        // 4. Hold the ungated queue above the midline
        self.gate
            .clamp_waiting(&mut self.store, self.vessel.midline_y(), radius);

        // 5. Boundary constraints get the last word within the step
        for i in 0..self.store.capacity() {
            if !self.store.active[i] {
                continue;
            }
            let (pos, vel, contact) = self.vessel.constrain(
                self.store.pos[i],
                self.store.vel[i],
                radius,
                self.config.wall_restitution,
                self.config.wall_tangent_damping,
            );
            self.store.pos[i] = pos;
            self.store.vel[i] = vel;
            self.store.contact[i] = contact;
        }

        // 6. Publish
        self.tick += 1;
        self.publish();
        &self.snapshot
    }

    /// Deactivate every particle, clear the admission accumulator and
    /// re-seed the RNG: the engine is back to its just-constructed state.
    pub fn reset(&mut self) {
        self.store.deactivate_all();
        self.gate.reset();
        self.rng = Pcg32::seed_from_u64(self.config.seed);
        self.tick = 0;
        self.snapshot = Snapshot::default();
    }

    /// Adjust the wall restitution at runtime. Bounds [0, 1]; anything
    /// else is rejected with `InvalidParam`.
    pub fn set_wall_restitution(&mut self, value: f32) -> Result<()> {
        check_unit_range("wall_restitution", value)?;
        self.config.wall_restitution = value;
        Ok(())
    }

    /// Most recently published snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn vessel(&self) -> &Vessel {
        &self.vessel
    }

    /// Read access to the live store (the engine stays its only writer).
    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    fn publish(&mut self) {
        self.snapshot.tick = self.tick;
        self.snapshot.particles.clear();
        for slot in self.store.active_indices() {
            self.snapshot.particles.push(SnapshotParticle {
                slot,
                pos: self.store.pos[slot],
                vel: self.store.vel[slot],
                contact: self.store.contact[slot],
            });
        }
    }
}
