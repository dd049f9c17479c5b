//! Draw state machine
//!
//! Idle -> Selecting -> RevealTransition -> RevealedResult -> Idle
//!
//! Every accepted draw opens a new round. Work that outlives its round (a
//! video that finishes after a reset, an auto-dismiss timer from an earlier
//! draw) carries a `DrawTicket` and is ignored once the round has moved on.

use rand::Rng;

use crate::renderer::Rgb;

/// Current phase of a draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawPhase {
    /// Waiting for a draw request
    #[default]
    Idle,
    /// Winner chosen, transition not started yet
    Selecting,
    /// Video / light effect playing
    RevealTransition,
    /// Winner removed and shown, waiting for dismissal
    RevealedResult,
}

/// Handle for one in-flight draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawTicket {
    pub round: u64,
    /// Id of the winning ball
    pub winner: u32,
}

/// Counters reported to the result display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawStats {
    /// Balls still in the drum
    pub remaining: usize,
    /// Completed draws since the last reset
    pub draws: u32,
}

/// A completed draw
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOutcome {
    pub label: String,
    pub color: Rgb,
    pub stats: DrawStats,
}

/// Where the machine ends up after a result is dismissed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    /// More balls left, draw enabled again
    Ready,
    /// Drum is empty, draw stays disabled until reset
    Exhausted,
}

/// Uniform index in `0..count`, or `None` for an empty set
pub fn pick_winner<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Option<usize> {
    (count > 0).then(|| rng.random_range(0..count))
}

/// Phase, round and draw counter of the machine
#[derive(Debug, Clone, Default)]
pub struct Selector {
    phase: DrawPhase,
    round: u64,
    draws: u32,
}

impl Selector {
    pub fn phase(&self) -> DrawPhase {
        self.phase
    }

    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// A draw may start only from Idle with something to draw
    pub fn can_start(&self, available: usize) -> bool {
        self.phase == DrawPhase::Idle && available > 0
    }

    /// Idle -> Selecting with `winner` already decided
    pub fn start(&mut self, winner: u32) -> DrawTicket {
        debug_assert_eq!(self.phase, DrawPhase::Idle);
        self.round += 1;
        self.phase = DrawPhase::Selecting;
        DrawTicket {
            round: self.round,
            winner,
        }
    }

    /// Whether `ticket` belongs to the current round
    pub fn is_current(&self, ticket: &DrawTicket) -> bool {
        ticket.round == self.round
    }

    /// Move `from` -> `to` for the current round only
    pub fn advance(&mut self, ticket: &DrawTicket, from: DrawPhase, to: DrawPhase) -> bool {
        if !self.is_current(ticket) || self.phase != from {
            return false;
        }
        self.phase = to;
        true
    }

    /// RevealedResult -> Idle from a user action, whichever round it is
    pub fn settle(&mut self) -> bool {
        if self.phase != DrawPhase::RevealedResult {
            return false;
        }
        self.phase = DrawPhase::Idle;
        true
    }

    /// Count a completed draw
    pub fn record_draw(&mut self) {
        self.draws += 1;
    }

    /// Back to Idle with zero draws. Outstanding tickets become stale.
    pub fn reset(&mut self) {
        self.round += 1;
        self.draws = 0;
        self.phase = DrawPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_full_cycle() {
        let mut sel = Selector::default();
        assert!(sel.can_start(3));
        assert!(!sel.can_start(0));

        let ticket = sel.start(7);
        assert_eq!(ticket.winner, 7);
        assert_eq!(sel.phase(), DrawPhase::Selecting);
        assert!(!sel.can_start(3));

        assert!(sel.advance(&ticket, DrawPhase::Selecting, DrawPhase::RevealTransition));
        // Wrong source phase is refused
        assert!(!sel.advance(&ticket, DrawPhase::Selecting, DrawPhase::RevealedResult));
        assert!(sel.advance(&ticket, DrawPhase::RevealTransition, DrawPhase::RevealedResult));
        sel.record_draw();
        assert!(sel.advance(&ticket, DrawPhase::RevealedResult, DrawPhase::Idle));
        assert_eq!(sel.draws(), 1);
        assert!(sel.can_start(2));
    }

    #[test]
    fn test_reset_makes_ticket_stale() {
        let mut sel = Selector::default();
        let ticket = sel.start(1);
        sel.reset();
        assert!(!sel.is_current(&ticket));
        assert!(!sel.advance(&ticket, DrawPhase::Idle, DrawPhase::RevealTransition));
        assert_eq!(sel.phase(), DrawPhase::Idle);
    }

    #[test]
    fn test_new_round_invalidates_old_ticket() {
        let mut sel = Selector::default();
        let first = sel.start(1);
        sel.advance(&first, DrawPhase::Selecting, DrawPhase::Idle);
        let second = sel.start(2);
        assert!(!sel.is_current(&first));
        assert!(sel.is_current(&second));
    }

    #[test]
    fn test_pick_winner_empty() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(pick_winner(0, &mut rng), None);
        assert_eq!(pick_winner(1, &mut rng), Some(0));
    }

    #[test]
    fn test_pick_winner_is_uniform() {
        let mut rng = Pcg32::seed_from_u64(0xC0FFEE);
        let k = 5;
        let trials = 50_000;
        let mut counts = vec![0u32; k];
        for _ in 0..trials {
            counts[pick_winner(k, &mut rng).unwrap()] += 1;
        }
        for count in counts {
            let freq = count as f64 / trials as f64;
            assert!((freq - 1.0 / k as f64).abs() < 0.01, "frequency {freq}");
        }
    }
}
