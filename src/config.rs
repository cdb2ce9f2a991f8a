//! Simulation configuration
//!
//! All tunables are set at construction and immutable thereafter, except
//! for the wall restitution which has a dedicated, validated setter on
//! `Simulation`. Defaults mirror the interactive build's constants.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Vessel geometry: two linear profiles meeting at the neck.
///
/// Coordinates are vessel-local with y growing downward. For any y the
/// vessel admits `|x - center_x| <= max_half_width(y)`, interpolated from
/// `top_half_width` at `spawn_y` down to `neck_half_width` at `midline_y`,
/// then back out to `bottom_half_width` at `floor_y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VesselConfig {
    /// Horizontal center of the vessel
    pub center_x: f32,
    /// Spawn row for newly activated particles
    pub spawn_y: f32,
    /// Narrowest cross-section (the neck)
    pub midline_y: f32,
    /// Vessel floor
    pub floor_y: f32,
    pub neck_half_width: f32,
    pub top_half_width: f32,
    pub bottom_half_width: f32,
}

impl Default for VesselConfig {
    fn default() -> Self {
        Self {
            center_x: VESSEL_WIDTH / 2.0,
            spawn_y: SPAWN_Y,
            midline_y: MIDLINE_Y,
            floor_y: FLOOR_Y,
            neck_half_width: NECK_HALF_WIDTH,
            top_half_width: TOP_HALF_WIDTH,
            bottom_half_width: BOTTOM_HALF_WIDTH,
        }
    }
}

impl VesselConfig {
    /// Validate the geometry. Rejection here is fatal at construction;
    /// nothing in this struct can fail later.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            self.center_x,
            self.spawn_y,
            self.midline_y,
            self.floor_y,
            self.neck_half_width,
            self.top_half_width,
            self.bottom_half_width,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(Error::InvalidGeometry("all fields must be finite".into()));
        }
        if self.neck_half_width <= 0.0 {
            return Err(Error::InvalidGeometry(
                "neck_half_width must be > 0".into(),
            ));
        }
        if self.neck_half_width >= self.top_half_width {
            return Err(Error::InvalidGeometry(
                "neck_half_width must be < top_half_width".into(),
            ));
        }
        if self.neck_half_width >= self.bottom_half_width {
            return Err(Error::InvalidGeometry(
                "neck_half_width must be < bottom_half_width".into(),
            ));
        }
        if self.spawn_y <= 0.0 || self.spawn_y >= self.midline_y || self.midline_y >= self.floor_y {
            return Err(Error::InvalidGeometry(
                "vessel requires 0 < spawn_y < midline_y < floor_y".into(),
            ));
        }
        Ok(())
    }
}

/// Complete simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Fixed particle slot count; activation silently caps here
    pub capacity: usize,
    /// Uniform particle radius
    pub particle_radius: f32,
    /// Downward gravity (px/s^2)
    pub gravity: f32,
    /// Penalty-force stiffness for particle contacts
    pub contact_stiffness: f32,
    /// Seconds between neck admissions
    pub admission_interval: f32,
    /// Normal-axis velocity kept after a wall hit (0..=1)
    pub wall_restitution: f32,
    /// Tangential velocity kept after a wall hit (0..=1)
    pub wall_tangent_damping: f32,
    /// Spawn jitter half-ranges: horizontal offset and horizontal velocity
    pub spawn_jitter_x: f32,
    pub spawn_jitter_vx: f32,
    /// RNG seed for reproducible runs
    pub seed: u64,
    pub vessel: VesselConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            capacity: MAX_PARTICLES,
            particle_radius: PARTICLE_RADIUS,
            gravity: GRAVITY,
            contact_stiffness: CONTACT_STIFFNESS,
            admission_interval: ADMISSION_INTERVAL,
            wall_restitution: WALL_RESTITUTION,
            wall_tangent_damping: WALL_TANGENT_DAMPING,
            spawn_jitter_x: SPAWN_JITTER_X,
            spawn_jitter_vx: SPAWN_JITTER_VX,
            seed: 0,
            vessel: VesselConfig::default(),
        }
    }
}

impl SimConfig {
    /// Validate every parameter, geometry included.
    pub fn validate(&self) -> Result<()> {
        self.vessel.validate()?;

        if self.capacity == 0 {
            return Err(Error::InvalidParam("capacity must be >= 1".into()));
        }
        if !self.particle_radius.is_finite() || self.particle_radius <= 0.0 {
            return Err(Error::InvalidParam(
                "particle_radius must be finite and > 0".into(),
            ));
        }
        // A particle wider than the neck could never pass it
        if self.particle_radius >= self.vessel.neck_half_width {
            return Err(Error::InvalidGeometry(
                "particle_radius must be < neck_half_width".into(),
            ));
        }
        if !self.gravity.is_finite() || self.gravity < 0.0 {
            return Err(Error::InvalidParam(
                "gravity must be finite and >= 0".into(),
            ));
        }
        if !self.contact_stiffness.is_finite() || self.contact_stiffness < 0.0 {
            return Err(Error::InvalidParam(
                "contact_stiffness must be finite and >= 0".into(),
            ));
        }
        if !self.admission_interval.is_finite() || self.admission_interval <= 0.0 {
            return Err(Error::InvalidParam(
                "admission_interval must be finite and > 0".into(),
            ));
        }
        check_unit_range("wall_restitution", self.wall_restitution)?;
        check_unit_range("wall_tangent_damping", self.wall_tangent_damping)?;
        if !self.spawn_jitter_x.is_finite() || self.spawn_jitter_x < 0.0 {
            return Err(Error::InvalidParam(
                "spawn_jitter_x must be finite and >= 0".into(),
            ));
        }
        if !self.spawn_jitter_vx.is_finite() || self.spawn_jitter_vx < 0.0 {
            return Err(Error::InvalidParam(
                "spawn_jitter_vx must be finite and >= 0".into(),
            ));
        }
        Ok(())
    }
}

/// Bounds check shared by the damping parameters and their setters.
pub(crate) fn check_unit_range(name: &str, value: f32) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(Error::InvalidParam(format!(
            "{name} must be within [0, 1], got {value}"
        )));
    }
    Ok(())
}
