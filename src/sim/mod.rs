//! Deterministic simulation module
//!
//! All engine logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by slot index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod gate;
pub mod state;
pub mod tick;
pub mod vessel;

pub use collision::CollisionResolver;
pub use gate::AdmissionGate;
pub use state::{ParticleStore, Snapshot, SnapshotParticle};
pub use tick::Simulation;
pub use vessel::{ContactSide, Vessel};
