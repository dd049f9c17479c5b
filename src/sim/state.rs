//! Lottery state
//!
//! One owned context per machine: the drum, the prize list it was built from,
//! the draw state machine, settings and RNG.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::ball::MotionParams;
use super::draw::{DrawOutcome, DrawPhase, DrawStats, DrawTicket, Selector, Settled, pick_winner};
use super::layout::{LayoutParams, scatter};
use super::world::World;
use crate::error::LotteryError;
use crate::prizes::PrizeList;
use crate::settings::Settings;

/// A lottery machine
#[derive(Debug, Clone)]
pub struct Lottery {
    settings: Settings,
    prizes: PrizeList,
    world: World,
    selector: Selector,
    rng: Pcg32,
    /// Balls still need placing (surface had no size yet)
    layout_pending: bool,
    /// Ball ids are never reused, even across resets
    next_id: u32,
}

impl Lottery {
    /// Create a machine with no surface size yet. Balls are placed on the
    /// first `resize` (or frame) that reports a non-zero size.
    pub fn new(prizes: PrizeList, settings: Settings, seed: u64) -> Self {
        Self {
            settings,
            prizes,
            world: World::default(),
            selector: Selector::default(),
            rng: Pcg32::seed_from_u64(seed),
            layout_pending: true,
            next_id: 1,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn prizes(&self) -> &PrizeList {
        &self.prizes
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn phase(&self) -> DrawPhase {
        self.selector.phase()
    }

    pub fn stats(&self) -> DrawStats {
        DrawStats {
            remaining: self.world.len(),
            draws: self.selector.draws(),
        }
    }

    pub fn is_layout_pending(&self) -> bool {
        self.layout_pending
    }

    /// A draw request would be accepted right now
    pub fn can_draw(&self) -> bool {
        !self.layout_pending && self.selector.can_start(self.world.len())
    }

    /// Every ball has been drawn
    pub fn is_exhausted(&self) -> bool {
        !self.layout_pending && self.world.is_empty()
    }

    pub(crate) fn motion_params(&self) -> MotionParams {
        MotionParams::from(&self.settings)
    }

    /// Adopt a new surface size, placing the balls if that was still pending
    pub fn resize(&mut self, width: f32, height: f32) {
        self.world.set_bounds(width, height);
        if self.layout_pending {
            self.try_layout();
        }
    }

    /// Place one ball per prize. Leaves the layout pending on a zero-sized
    /// surface.
    fn try_layout(&mut self) -> bool {
        let params = LayoutParams::from(&self.settings);
        let placed = scatter(
            self.prizes.labels(),
            self.world.width,
            self.world.height,
            &params,
            self.next_id,
            &mut self.rng,
        );
        match placed {
            Some(balls) => {
                self.next_id += balls.len() as u32;
                self.world.balls = balls;
                self.layout_pending = false;
                true
            }
            None => {
                self.world.balls.clear();
                self.layout_pending = true;
                false
            }
        }
    }

    /// Rebuild the drum from the prize list and return to Idle with zero
    /// draws. Any draw in flight is abandoned.
    pub fn reset(&mut self) {
        self.selector.reset();
        if !self.try_layout() {
            log::info!("Reset: layout waits for a sized surface");
        }
        log::info!("Lottery reset ({} prizes)", self.prizes.len());
    }

    /// Swap in an edited prize list and reset
    pub fn replace_prizes(&mut self, prizes: PrizeList) {
        self.prizes = prizes;
        self.reset();
    }

    /// Swap in new settings. Motion changes apply on the next tick, layout
    /// changes on the next reset.
    pub fn replace_settings(&mut self, settings: Settings) -> Result<(), LotteryError> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    /// Kick every ball
    pub fn shake(&mut self) {
        let strength = self.settings.shake_strength;
        for ball in &mut self.world.balls {
            ball.shake(strength, &mut self.rng);
        }
    }

    /// Idle -> Selecting. The winner is drawn uniformly here, before any
    /// transition plays. `None` when a draw is already running or the drum is
    /// empty.
    pub fn request_draw(&mut self) -> Option<DrawTicket> {
        if !self.can_draw() {
            log::debug!("Draw ignored in {:?} with {} balls", self.phase(), self.world.len());
            return None;
        }
        let index = pick_winner(self.world.len(), &mut self.rng)?;
        let winner = self.world.balls[index].id;
        let ticket = self.selector.start(winner);
        log::info!("Draw #{} selected ball {}", ticket.round, winner);
        Some(ticket)
    }

    /// Selecting -> RevealTransition
    pub fn begin_reveal(&mut self, ticket: &DrawTicket) -> bool {
        self.selector
            .advance(ticket, DrawPhase::Selecting, DrawPhase::RevealTransition)
    }

    /// RevealTransition -> RevealedResult: the winner leaves the drum.
    ///
    /// `None` for a stale ticket; nothing changes in that case.
    pub fn finish_reveal(&mut self, ticket: &DrawTicket) -> Option<DrawOutcome> {
        if !self.selector.is_current(ticket) || self.phase() != DrawPhase::RevealTransition {
            return None;
        }
        let Some(ball) = self.world.remove(ticket.winner) else {
            log::warn!("Winner {} vanished before reveal", ticket.winner);
            self.selector.advance(ticket, DrawPhase::RevealTransition, DrawPhase::Idle);
            return None;
        };
        self.selector
            .advance(ticket, DrawPhase::RevealTransition, DrawPhase::RevealedResult);
        self.selector.record_draw();

        let outcome = DrawOutcome {
            label: ball.label,
            color: ball.color,
            stats: self.stats(),
        };
        log::info!(
            "Winner: {} ({} left, {} drawn)",
            outcome.label,
            outcome.stats.remaining,
            outcome.stats.draws
        );
        Some(outcome)
    }

    /// RevealedResult -> Idle on user dismissal
    pub fn dismiss(&mut self) -> Option<Settled> {
        self.selector.settle().then(|| self.settled())
    }

    /// RevealedResult -> Idle when the auto-dismiss timer of `ticket` fires
    pub fn expire(&mut self, ticket: &DrawTicket) -> Option<Settled> {
        self.selector
            .advance(ticket, DrawPhase::RevealedResult, DrawPhase::Idle)
            .then(|| self.settled())
    }

    fn settled(&self) -> Settled {
        if self.world.is_empty() {
            log::info!("All prizes drawn");
            Settled::Exhausted
        } else {
            Settled::Ready
        }
    }
}
