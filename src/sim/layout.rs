//! Initial ball placement
//!
//! Rejection sampling inside the padded bounds, with a bounded number of tries
//! per ball. When the tries run out the last candidate is kept, so placement
//! always terminates even when the box is too crowded.

use glam::Vec2;
use rand::Rng;

use super::ball::Ball;
use crate::renderer::palette_color;
use crate::settings::Settings;

/// Placement tunables
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub radius: f32,
    pub padding: f32,
    pub buffer: f32,
    pub max_attempts: u32,
    pub initial_speed: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for LayoutParams {
    fn from(settings: &Settings) -> Self {
        Self {
            radius: settings.ball_radius,
            padding: settings.padding,
            buffer: settings.placement_buffer,
            max_attempts: settings.max_placement_attempts,
            initial_speed: settings.initial_speed,
        }
    }
}

/// True when a surface of this size cannot hold any ball yet
#[inline]
pub fn is_degenerate(width: f32, height: f32) -> bool {
    !(width > 0.0 && height > 0.0)
}

/// Uniform sample in `[padding, bound - padding]`, or the midpoint when the
/// padded span is empty
fn sample_axis<R: Rng + ?Sized>(bound: f32, padding: f32, rng: &mut R) -> f32 {
    let span = bound - padding * 2.0;
    if span > 0.0 {
        padding + rng.random::<f32>() * span
    } else {
        bound / 2.0
    }
}

fn is_clear(candidate: Vec2, radius: f32, buffer: f32, placed: &[Ball]) -> bool {
    placed
        .iter()
        .all(|b| candidate.distance(b.pos) >= radius + b.radius + buffer)
}

/// Place one ball per label inside `width` x `height`.
///
/// Returns `None` without touching the RNG when the bounds are degenerate; the
/// caller retries once the surface has a size. Ball ids start at `first_id`.
pub fn scatter<R: Rng + ?Sized>(
    labels: &[String],
    width: f32,
    height: f32,
    params: &LayoutParams,
    first_id: u32,
    rng: &mut R,
) -> Option<Vec<Ball>> {
    if is_degenerate(width, height) {
        log::debug!("Layout deferred: surface is {}x{}", width, height);
        return None;
    }

    let mut placed: Vec<Ball> = Vec::with_capacity(labels.len());
    let mut crowded = 0usize;

    for (index, label) in labels.iter().enumerate() {
        let mut candidate = Vec2::ZERO;
        let mut found = false;
        for _ in 0..params.max_attempts.max(1) {
            candidate = Vec2::new(
                sample_axis(width, params.padding, rng),
                sample_axis(height, params.padding, rng),
            );
            if is_clear(candidate, params.radius, params.buffer, &placed) {
                found = true;
                break;
            }
        }
        if !found {
            crowded += 1;
        }

        placed.push(Ball::new(
            first_id + index as u32,
            candidate,
            params.radius,
            palette_color(index),
            label.clone(),
            params.initial_speed,
            rng,
        ));
    }

    if crowded > 0 {
        log::debug!("{} balls placed with overlap after {} tries", crowded, params.max_attempts);
    }
    log::info!("Balls created: {} in {}x{}", placed.len(), width, height);
    Some(placed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn labels(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("No. {}", i)).collect()
    }

    #[test]
    fn test_zero_bounds_defer() {
        let mut rng = Pcg32::seed_from_u64(1);
        let params = LayoutParams::default();
        assert!(scatter(&labels(5), 0.0, 0.0, &params, 1, &mut rng).is_none());
        assert!(scatter(&labels(5), 800.0, 0.0, &params, 1, &mut rng).is_none());
        assert!(scatter(&labels(5), 800.0, 600.0, &params, 1, &mut rng).is_some());
    }

    #[test]
    fn test_one_ball_per_label_in_order() {
        let mut rng = Pcg32::seed_from_u64(2);
        let names = labels(12);
        let balls = scatter(&names, 800.0, 600.0, &LayoutParams::default(), 10, &mut rng).unwrap();

        assert_eq!(balls.len(), 12);
        for (i, ball) in balls.iter().enumerate() {
            assert_eq!(ball.label, names[i]);
            assert_eq!(ball.id, 10 + i as u32);
            assert_eq!(ball.color, palette_color(i));
        }
    }

    #[test]
    fn test_sparse_layout_has_no_overlap() {
        let mut rng = Pcg32::seed_from_u64(3);
        let params = LayoutParams::default();
        let balls = scatter(&labels(10), 800.0, 600.0, &params, 1, &mut rng).unwrap();

        for ball in &balls {
            assert!(ball.pos.x >= params.padding && ball.pos.x <= 800.0 - params.padding);
            assert!(ball.pos.y >= params.padding && ball.pos.y <= 600.0 - params.padding);
        }
        for i in 0..balls.len() {
            for j in i + 1..balls.len() {
                let d = balls[i].pos.distance(balls[j].pos);
                assert!(d >= 2.0 * params.radius + params.buffer);
            }
        }
    }

    #[test]
    fn test_crowded_layout_still_places_everything() {
        let mut rng = Pcg32::seed_from_u64(4);
        let params = LayoutParams {
            max_attempts: 5,
            ..LayoutParams::default()
        };
        let balls = scatter(&labels(95), 200.0, 150.0, &params, 1, &mut rng).unwrap();
        assert_eq!(balls.len(), 95);
    }

    #[test]
    fn test_box_smaller_than_padding_uses_center() {
        let mut rng = Pcg32::seed_from_u64(5);
        let balls = scatter(&labels(2), 40.0, 800.0, &LayoutParams::default(), 1, &mut rng).unwrap();
        assert!(balls.iter().all(|b| b.pos.x == 20.0));
    }
}
