//! The drum: the active ball set and its per-tick step

use super::ball::{Ball, MotionParams};
use super::collision::resolve_pair;

/// Active balls inside the current surface bounds
#[derive(Debug, Clone, Default)]
pub struct World {
    /// Active balls, in layout order
    pub balls: Vec<Ball>,
    pub width: f32,
    pub height: f32,
}

impl World {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            balls: Vec::new(),
            width,
            height,
        }
    }

    /// Adopt the surface size for the next tick
    pub fn set_bounds(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    /// Take a ball out of the drum for good. Order of the rest is kept.
    pub fn remove(&mut self, id: u32) -> Option<Ball> {
        let index = self.balls.iter().position(|b| b.id == id)?;
        Some(self.balls.remove(index))
    }

    /// Advance one tick: integrate every ball (calling `on_moved` right after
    /// each), then resolve every unordered pair once.
    ///
    /// Returns the number of pairs that were in contact.
    pub fn step_with<F>(&mut self, params: &MotionParams, mut on_moved: F) -> usize
    where
        F: FnMut(&Ball),
    {
        let (width, height) = (self.width, self.height);
        for ball in &mut self.balls {
            ball.integrate(width, height, params);
            on_moved(ball);
        }

        let mut contacts = 0;
        let n = self.balls.len();
        for i in 0..n {
            let (head, tail) = self.balls.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                if resolve_pair(a, b) {
                    contacts += 1;
                }
            }
        }
        contacts
    }

    /// Advance one tick without observing the balls
    pub fn step(&mut self, params: &MotionParams) -> usize {
        self.step_with(params, |_| {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Rgb;
    use glam::Vec2;
    use proptest::prelude::*;

    fn ball(id: u32, pos: Vec2, vel: Vec2) -> Ball {
        Ball {
            id,
            pos,
            vel,
            radius: 18.0,
            color: Rgb::WHITE,
            label: id.to_string(),
        }
    }

    #[test]
    fn test_observer_sees_post_integration_positions() {
        let mut world = World::new(800.0, 600.0);
        // Will collide after moving: observer must still see pre-collision spots
        world.balls.push(ball(1, Vec2::new(100.0, 300.0), Vec2::new(5.0, 0.0)));
        world.balls.push(ball(2, Vec2::new(140.0, 300.0), Vec2::new(-5.0, 0.0)));

        let mut seen = Vec::new();
        let contacts = world.step_with(&MotionParams::default(), |b| seen.push((b.id, b.pos)));

        assert_eq!(contacts, 1);
        assert_eq!(seen[0], (1, Vec2::new(105.0, 300.0)));
        assert_eq!(seen[1], (2, Vec2::new(135.0, 300.0)));
        // After resolution they no longer overlap
        assert!(world.balls[0].pos.distance(world.balls[1].pos) >= 36.0 - 1e-3);
    }

    #[test]
    fn test_each_pair_resolved_once() {
        let params = MotionParams {
            gravity: 0.0,
            damping: 1.0,
            restitution: 0.9,
        };

        // Two separate touching pairs and a loner: exactly two contacts
        let mut world = World::new(800.0, 600.0);
        world.balls.push(ball(1, Vec2::new(100.0, 300.0), Vec2::ZERO));
        world.balls.push(ball(2, Vec2::new(500.0, 300.0), Vec2::ZERO));
        world.balls.push(ball(3, Vec2::new(120.0, 300.0), Vec2::ZERO));
        world.balls.push(ball(4, Vec2::new(300.0, 100.0), Vec2::ZERO));
        world.balls.push(ball(5, Vec2::new(520.0, 300.0), Vec2::ZERO));
        assert_eq!(world.step(&params), 2);
        assert_eq!(world.get(4).unwrap().pos, Vec2::new(300.0, 100.0));
        assert!((world.get(1).unwrap().pos.x - 92.0).abs() < 1e-4);
        assert!((world.get(3).unwrap().pos.x - 128.0).abs() < 1e-4);
        assert!((world.get(2).unwrap().pos.x - 492.0).abs() < 1e-4);
        assert!((world.get(5).unwrap().pos.x - 528.0).abs() < 1e-4);

        // Settled pairs report nothing on the next tick
        assert_eq!(world.step(&params), 0);

        // A tight cluster of three: all three pairs still touch in turn
        let mut world = World::new(800.0, 600.0);
        world.balls.push(ball(1, Vec2::new(400.0, 300.0), Vec2::ZERO));
        world.balls.push(ball(2, Vec2::new(410.0, 300.0), Vec2::ZERO));
        world.balls.push(ball(3, Vec2::new(405.0, 308.0), Vec2::ZERO));
        assert_eq!(world.step(&params), 3);
    }

    #[test]
    fn test_remove_is_permanent() {
        let mut world = World::new(800.0, 600.0);
        for id in 1..=4 {
            world.balls.push(ball(id, Vec2::new(100.0 * id as f32, 300.0), Vec2::ZERO));
        }
        let removed = world.remove(2).unwrap();
        assert_eq!(removed.id, 2);
        assert!(world.remove(2).is_none());

        for _ in 0..200 {
            world.step(&MotionParams::default());
            assert!(world.get(2).is_none());
            assert_eq!(world.len(), 3);
        }
        let ids: Vec<u32> = world.balls.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn test_resize_to_zero_and_back() {
        let mut world = World::new(800.0, 600.0);
        world.balls.push(ball(1, Vec2::new(400.0, 300.0), Vec2::new(2.0, 2.0)));
        world.set_bounds(0.0, 0.0);
        world.step(&MotionParams::default());
        world.set_bounds(800.0, 600.0);
        for _ in 0..10 {
            world.step(&MotionParams::default());
        }
        let b = &world.balls[0];
        assert!(b.pos.x >= 18.0 && b.pos.x <= 782.0);
        assert!(b.pos.y >= 18.0 && b.pos.y <= 582.0);
    }

    proptest! {
        #[test]
        fn prop_two_balls_never_left_overlapping(
            ax in 20.0f32..780.0, ay in 20.0f32..580.0,
            bx in 20.0f32..780.0, by in 20.0f32..580.0,
            avx in -8.0f32..8.0, avy in -8.0f32..8.0,
            bvx in -8.0f32..8.0, bvy in -8.0f32..8.0,
            ticks in 1usize..60,
        ) {
            let mut world = World::new(800.0, 600.0);
            world.balls.push(ball(1, Vec2::new(ax, ay), Vec2::new(avx, avy)));
            world.balls.push(ball(2, Vec2::new(bx, by), Vec2::new(bvx, bvy)));
            for _ in 0..ticks {
                world.step(&MotionParams::default());
                let d = world.balls[0].pos.distance(world.balls[1].pos);
                // Coincident centers are skipped by the resolver
                if d > 1e-3 {
                    prop_assert!(d >= 36.0 - 1e-3);
                }
            }
        }
    }
}
