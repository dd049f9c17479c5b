//! Ball entity: motion integration and wall bounces

use glam::Vec2;
use rand::Rng;

use crate::renderer::Rgb;
use crate::settings::Settings;

/// Per-tick motion constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    pub gravity: f32,
    pub damping: f32,
    pub restitution: f32,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for MotionParams {
    fn from(settings: &Settings) -> Self {
        Self {
            gravity: settings.gravity,
            damping: settings.damping,
            restitution: settings.restitution,
        }
    }
}

/// A prize ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    /// Velocity in px/tick
    pub vel: Vec2,
    pub radius: f32,
    pub color: Rgb,
    pub label: String,
}

impl Ball {
    /// Create a ball at `pos` with a random velocity in
    /// `[-initial_speed, initial_speed)` on each axis
    pub fn new<R: Rng + ?Sized>(
        id: u32,
        pos: Vec2,
        radius: f32,
        color: Rgb,
        label: String,
        initial_speed: f32,
        rng: &mut R,
    ) -> Self {
        debug_assert!(radius > 0.0);
        debug_assert!(!label.is_empty());
        let vel = if initial_speed > 0.0 && initial_speed.is_finite() {
            Vec2::new(
                rng.random_range(-initial_speed..initial_speed),
                rng.random_range(-initial_speed..initial_speed),
            )
        } else {
            Vec2::ZERO
        };
        Self {
            id,
            pos,
            vel,
            radius,
            color,
            label,
        }
    }

    /// Advance one tick inside a `width` x `height` box.
    ///
    /// Walls are resolved first, then gravity and damping are applied.
    pub fn integrate(&mut self, width: f32, height: f32, params: &MotionParams) {
        self.pos += self.vel;

        bounce_axis(&mut self.pos.x, &mut self.vel.x, self.radius, width, params.restitution);
        bounce_axis(&mut self.pos.y, &mut self.vel.y, self.radius, height, params.restitution);

        self.vel.y += params.gravity;
        self.vel *= params.damping;
    }

    /// Random kick of up to `strength / 2` per axis
    pub fn shake<R: Rng + ?Sized>(&mut self, strength: f32, rng: &mut R) {
        if !(strength > 0.0 && strength.is_finite()) {
            return;
        }
        let half = strength / 2.0;
        self.vel += Vec2::new(rng.random_range(-half..half), rng.random_range(-half..half));
    }
}

/// Reflect one axis off the walls at `0` and `bound`.
///
/// Returns true on a bounce. The velocity is negated and scaled by
/// `restitution`, the position clamped back inside. When the box is narrower
/// than the ball, the ball is pinned to the low wall.
pub fn bounce_axis(pos: &mut f32, vel: &mut f32, radius: f32, bound: f32, restitution: f32) -> bool {
    let low = *pos - radius < 0.0;
    let high = *pos + radius > bound;
    if !low && !high {
        return false;
    }
    *vel *= -restitution;
    *pos = if low { radius } else { bound - radius };
    true
}
