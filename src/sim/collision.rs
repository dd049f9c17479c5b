//! Ball-ball collision detection and response
//!
//! All balls are treated as equal unit masses, so an elastic collision reduces
//! to swapping the velocity components along the line between the centers.

use glam::Vec2;

use super::ball::Ball;
use crate::consts::COINCIDENT_EPSILON;

/// Result of a contact check between two balls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit vector from the first ball's center toward the second's
    pub normal: Vec2,
    /// How far the two discs interpenetrate
    pub overlap: f32,
}

/// Contact between two discs, if they overlap.
///
/// Coincident centers have no usable normal and report no contact; the pair
/// is simply skipped for this tick.
pub fn contact(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> Option<Contact> {
    let delta = b_pos - a_pos;
    let distance = delta.length();
    let reach = a_radius + b_radius;
    if distance >= reach || distance < COINCIDENT_EPSILON {
        return None;
    }
    Some(Contact {
        normal: delta / distance,
        overlap: reach - distance,
    })
}

/// Swap the normal components of two velocities, keeping the tangential parts
#[inline]
pub fn exchange_normal_velocity(v1: Vec2, v2: Vec2, normal: Vec2) -> (Vec2, Vec2) {
    let n1 = v1.dot(normal);
    let n2 = v2.dot(normal);
    (v1 + (n2 - n1) * normal, v2 + (n1 - n2) * normal)
}

/// Resolve a colliding pair in place.
///
/// Returns true if the balls were touching and got separated.
pub fn resolve_pair(a: &mut Ball, b: &mut Ball) -> bool {
    let Some(hit) = contact(a.pos, a.radius, b.pos, b.radius) else {
        return false;
    };

    let (va, vb) = exchange_normal_velocity(a.vel, b.vel, hit.normal);
    a.vel = va;
    b.vel = vb;

    // Half the overlap each, along the normal
    let push = hit.normal * (hit.overlap / 2.0);
    a.pos -= push;
    b.pos += push;
    true
}
