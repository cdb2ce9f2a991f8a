//! Vessel geometry and the per-particle boundary constraint
//!
//! The vessel is two linear profiles meeting at the neck: a funnel
//! narrowing from the top half-width down to the neck, then widening back
//! out to the bottom base. Constraints are corrective, never advisory: a
//! particle's position always satisfies containment at the end of a step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::VesselConfig;
use crate::error::Result;

/// Which wall a particle touched last step, retained one frame for
/// observability (the renderer flashes the struck side).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContactSide {
    #[default]
    None,
    Left,
    Right,
}

/// Immutable vessel geometry. Freely shareable; nothing here is mutated
/// after construction.
#[derive(Debug, Clone, Copy)]
pub struct Vessel {
    center_x: f32,
    spawn_y: f32,
    midline_y: f32,
    floor_y: f32,
    neck_half_width: f32,
    top_half_width: f32,
    bottom_half_width: f32,
}

impl Vessel {
    /// Build a vessel from validated configuration.
    pub fn new(config: &VesselConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            center_x: config.center_x,
            spawn_y: config.spawn_y,
            midline_y: config.midline_y,
            floor_y: config.floor_y,
            neck_half_width: config.neck_half_width,
            top_half_width: config.top_half_width,
            bottom_half_width: config.bottom_half_width,
        })
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.center_x
    }

    #[inline]
    pub fn spawn_y(&self) -> f32 {
        self.spawn_y
    }

    #[inline]
    pub fn midline_y(&self) -> f32 {
        self.midline_y
    }

    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.floor_y
    }

    /// Maximum `|x - center_x|` the vessel admits at height `y`.
    ///
    /// Above the midline: lerp `top_half_width -> neck_half_width` over
    /// `[spawn_y, midline_y]`. At or below: lerp `neck_half_width ->
    /// bottom_half_width` over `[midline_y, floor_y]`. The interpolation
    /// parameter is clamped, so rows beyond the spawn row or the floor
    /// reuse the nearest profile width.
    pub fn max_half_width(&self, y: f32) -> f32 {
        if y < self.midline_y {
            let t = ((y - self.spawn_y) / (self.midline_y - self.spawn_y)).clamp(0.0, 1.0);
            self.top_half_width + t * (self.neck_half_width - self.top_half_width)
        } else {
            let t = ((y - self.midline_y) / (self.floor_y - self.midline_y)).clamp(0.0, 1.0);
            self.neck_half_width + t * (self.bottom_half_width - self.neck_half_width)
        }
    }

    /// Correct a proposed position/velocity against the vessel boundary.
    ///
    /// Runs after collision resolution so wall constraints win over
    /// inter-particle forces within the same step. The floor is inelastic
    /// on the vertical axis; walls reflect with `restitution` on the
    /// normal axis and keep `tangent_damping` of the tangential velocity.
    pub fn constrain(
        &self,
        pos: Vec2,
        vel: Vec2,
        radius: f32,
        restitution: f32,
        tangent_damping: f32,
    ) -> (Vec2, Vec2, ContactSide) {
        let mut pos = pos;
        let mut vel = vel;
        let mut contact = ContactSide::None;

        // Floor: rest height keeps the particle's extent inside the vessel
        if pos.y > self.floor_y - radius {
            pos.y = self.floor_y - radius;
            vel.y = 0.0;
        }

        let max_x = self.max_half_width(pos.y);
        let left = self.center_x - max_x + radius;
        let right = self.center_x + max_x - radius;
        if pos.x < left {
            pos.x = left;
            vel.x *= -restitution;
            vel.y *= tangent_damping;
            contact = ContactSide::Left;
        } else if pos.x > right {
            pos.x = right;
            vel.x *= -restitution;
            vel.y *= tangent_damping;
            contact = ContactSide::Right;
        }

        // Ceiling
        if pos.y < radius {
            pos.y = radius;
            vel.y = 0.0;
        }

        (pos, vel, contact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;

    fn vessel() -> Vessel {
        Vessel::new(&VesselConfig::default()).expect("default geometry")
    }

    #[test]
    fn half_width_hits_profile_anchors() {
        let v = vessel();
        assert!((v.max_half_width(SPAWN_Y) - TOP_HALF_WIDTH).abs() < 1e-4);
        assert!((v.max_half_width(MIDLINE_Y) - NECK_HALF_WIDTH).abs() < 1e-4);
        assert!((v.max_half_width(FLOOR_Y) - BOTTOM_HALF_WIDTH).abs() < 1e-4);
    }

    #[test]
    fn half_width_narrows_toward_neck_from_both_sides() {
        let v = vessel();
        let above = v.max_half_width((SPAWN_Y + MIDLINE_Y) / 2.0);
        let below = v.max_half_width((MIDLINE_Y + FLOOR_Y) / 2.0);
        assert!(above > NECK_HALF_WIDTH && above < TOP_HALF_WIDTH);
        assert!(below > NECK_HALF_WIDTH && below < BOTTOM_HALF_WIDTH);
    }

    #[test]
    fn half_width_clamps_outside_profile_rows() {
        let v = vessel();
        assert!((v.max_half_width(0.0) - TOP_HALF_WIDTH).abs() < 1e-4);
        assert!((v.max_half_width(FLOOR_Y + 100.0) - BOTTOM_HALF_WIDTH).abs() < 1e-4);
    }

    #[test]
    fn left_wall_reflects_and_damps() {
        let v = vessel();
        let y = 400.0;
        let pos = Vec2::new(0.0, y);
        let vel = Vec2::new(-100.0, 50.0);
        let (p, vl, contact) = v.constrain(pos, vel, PARTICLE_RADIUS, 0.2, 0.9);

        assert_eq!(contact, ContactSide::Left);
        let expected_x = v.center_x() - v.max_half_width(y) + PARTICLE_RADIUS;
        assert!((p.x - expected_x).abs() < 1e-4);
        assert!((vl.x - 20.0).abs() < 1e-4);
        assert!((vl.y - 45.0).abs() < 1e-4);
    }

    #[test]
    fn right_wall_recorded_as_right() {
        let v = vessel();
        let (_, _, contact) = v.constrain(
            Vec2::new(VESSEL_WIDTH, 400.0),
            Vec2::new(80.0, 0.0),
            PARTICLE_RADIUS,
            0.2,
            0.9,
        );
        assert_eq!(contact, ContactSide::Right);
    }

    #[test]
    fn floor_is_vertically_inelastic() {
        let v = vessel();
        let (p, vl, contact) = v.constrain(
            Vec2::new(v.center_x(), FLOOR_Y + 25.0),
            Vec2::new(3.0, 180.0),
            PARTICLE_RADIUS,
            0.2,
            0.9,
        );
        assert_eq!(contact, ContactSide::None);
        assert!((p.y - (FLOOR_Y - PARTICLE_RADIUS)).abs() < 1e-4);
        assert_eq!(vl.y, 0.0);
        assert_eq!(vl.x, 3.0);
    }

    #[test]
    fn ceiling_clamps_to_radius() {
        let v = vessel();
        let (p, vl, _) = v.constrain(
            Vec2::new(v.center_x(), -10.0),
            Vec2::new(0.0, -60.0),
            PARTICLE_RADIUS,
            0.2,
            0.9,
        );
        assert_eq!(p.y, PARTICLE_RADIUS);
        assert_eq!(vl.y, 0.0);
    }

    #[test]
    fn interior_point_untouched() {
        let v = vessel();
        let pos = Vec2::new(v.center_x() + 2.0, 100.0);
        let vel = Vec2::new(8.0, 40.0);
        let (p, vl, contact) = v.constrain(pos, vel, PARTICLE_RADIUS, 0.2, 0.9);
        assert_eq!(p, pos);
        assert_eq!(vl, vel);
        assert_eq!(contact, ContactSide::None);
    }

    proptest! {
        #[test]
        fn constrain_always_contains(
            x in -500.0f32..900.0,
            y in -200.0f32..800.0,
            vx in -500.0f32..500.0,
            vy in -500.0f32..500.0,
        ) {
            let v = vessel();
            let (p, _, _) =
                v.constrain(Vec2::new(x, y), Vec2::new(vx, vy), PARTICLE_RADIUS, 0.2, 0.9);

            prop_assert!(p.y >= PARTICLE_RADIUS - 1e-3);
            prop_assert!(p.y <= FLOOR_Y - PARTICLE_RADIUS + 1e-3);
            let max_x = v.max_half_width(p.y);
            prop_assert!((p.x - v.center_x()).abs() <= max_x - PARTICLE_RADIUS + 1e-3);
        }
    }
}
