//! Sandglass - an hourglass-vessel particle flow simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (particle store, collisions, vessel
//!   constraints, neck admission gate, fixed-timestep driver)
//! - `config`: Data-driven simulation parameters, validated at construction
//! - `error`: Crate-wide error type
//!
//! The crate is a pure computational engine: it consumes control events
//! (activate particles, advance one tick) and publishes per-step snapshots.
//! How a snapshot is painted to a screen is a renderer's problem, not ours.

pub mod config;
pub mod error;
pub mod sim;

pub use config::{SimConfig, VesselConfig};
pub use error::{Error, Result};
pub use sim::{ContactSide, Simulation, Snapshot};

/// Simulation defaults: a 400x600 vessel stepped at 60 Hz.
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Vessel dimensions (vessel-local coordinates, y grows downward)
    pub const VESSEL_WIDTH: f32 = 400.0;
    pub const VESSEL_HEIGHT: f32 = 600.0;
    /// Particles spawn on this row, centered with small jitter
    pub const SPAWN_Y: f32 = 50.0;
    /// The neck: narrowest cross-section, separating reservoir from collection zone
    pub const MIDLINE_Y: f32 = 300.0;
    /// Vessel floor; particles come to rest here
    pub const FLOOR_Y: f32 = 550.0;

    /// Half-widths of the two linear profiles
    pub const NECK_HALF_WIDTH: f32 = 8.0;
    pub const TOP_HALF_WIDTH: f32 = 100.0;
    pub const BOTTOM_HALF_WIDTH: f32 = 100.0;

    /// Particle defaults
    pub const PARTICLE_RADIUS: f32 = 3.0;
    pub const MAX_PARTICLES: usize = 1000;

    /// Downward gravity (px/s^2)
    pub const GRAVITY: f32 = 400.0;
    /// Penalty-force stiffness for particle-particle contacts
    pub const CONTACT_STIFFNESS: f32 = 50.0;

    /// Wall response: normal-axis restitution and tangential damping
    pub const WALL_RESTITUTION: f32 = 0.2;
    pub const WALL_TANGENT_DAMPING: f32 = 0.9;

    /// One waiting particle is admitted through the neck per this duration (seconds)
    pub const ADMISSION_INTERVAL: f32 = 1.0;

    /// Spawn jitter: horizontal offset and horizontal velocity ranges (+/-)
    pub const SPAWN_JITTER_X: f32 = 3.0;
    pub const SPAWN_JITTER_VX: f32 = 10.0;
}
