//! Per-frame step and command handling
//!
//! Input reaches the machine as `Command`s; the animation loop calls `frame`
//! once per display refresh whatever the draw phase is.

use super::draw::{DrawTicket, Settled};
use super::state::Lottery;
use crate::prizes::PrizeList;
use crate::renderer::Surface;

/// User-level requests
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Start a draw
    Draw,
    /// Close the revealed winner
    Dismiss,
    /// Rebuild from the prize list, zero draws
    Reset,
    /// Kick every ball
    Shake,
    /// Use an edited prize list (implies a reset)
    ReplacePrizes(PrizeList),
}

/// What a command did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Not valid in the current state; nothing changed
    Ignored,
    Applied,
    /// A draw was accepted; the reveal task should run with this ticket
    DrawStarted(DrawTicket),
    /// A revealed result was dismissed
    Settled(Settled),
}

impl Lottery {
    /// Deliver one command
    pub fn apply(&mut self, command: Command) -> CommandOutcome {
        match command {
            Command::Draw => self
                .request_draw()
                .map_or(CommandOutcome::Ignored, CommandOutcome::DrawStarted),
            Command::Dismiss => self
                .dismiss()
                .map_or(CommandOutcome::Ignored, CommandOutcome::Settled),
            Command::Reset => {
                self.reset();
                CommandOutcome::Applied
            }
            Command::Shake => {
                self.shake();
                CommandOutcome::Applied
            }
            Command::ReplacePrizes(prizes) => {
                self.replace_prizes(prizes);
                CommandOutcome::Applied
            }
        }
    }

    /// One animation frame: pick up the surface size, place balls if still
    /// pending, clear, then integrate and draw every ball and resolve
    /// collisions.
    ///
    /// Balls are drawn where integration left them, before collision response.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let (width, height) = surface.size();
        self.resize(width, height);

        surface.clear();
        let params = self.motion_params();
        self.world_mut().step_with(&params, |ball| ball.render(&mut *surface));
    }

    /// Advance the drum one tick without drawing
    pub fn tick(&mut self) -> usize {
        let params = self.motion_params();
        self.world_mut().step(&params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recording::{Call, RecordingSurface};
    use crate::settings::Settings;
    use crate::sim::DrawPhase;

    fn lottery(labels: &[&str]) -> Lottery {
        let prizes = PrizeList::from_entries(labels.iter().copied()).unwrap();
        Lottery::new(prizes, Settings::default(), 99)
    }

    #[test]
    fn test_frame_on_zero_surface_defers() {
        let mut lottery = lottery(&["A", "B", "C"]);
        let mut surface = RecordingSurface::new(0.0, 0.0);

        lottery.frame(&mut surface);
        assert!(lottery.is_layout_pending());
        assert_eq!(surface.discs(), 0);
        assert_eq!(lottery.apply(Command::Draw), CommandOutcome::Ignored);

        surface.width = 800.0;
        surface.height = 600.0;
        surface.calls.clear();
        lottery.frame(&mut surface);
        assert!(!lottery.is_layout_pending());
        assert_eq!(surface.calls[0], Call::Clear);
        assert_eq!(surface.discs(), 3);
    }

    #[test]
    fn test_frame_keeps_running_during_draw() {
        let mut lottery = lottery(&["A", "B", "C"]);
        let mut surface = RecordingSurface::new(800.0, 600.0);
        lottery.frame(&mut surface);

        let CommandOutcome::DrawStarted(ticket) = lottery.apply(Command::Draw) else {
            panic!("draw should start");
        };
        lottery.begin_reveal(&ticket);
        let before: Vec<_> = lottery.world().balls.iter().map(|b| b.pos).collect();
        surface.calls.clear();
        lottery.frame(&mut surface);
        let after: Vec<_> = lottery.world().balls.iter().map(|b| b.pos).collect();

        assert_eq!(lottery.phase(), DrawPhase::RevealTransition);
        assert_eq!(surface.discs(), 3);
        assert_ne!(before, after);
    }

    #[test]
    fn test_tick_without_surface() {
        let mut lottery = lottery(&["A", "B", "C"]);
        assert_eq!(lottery.tick(), 0);
        lottery.resize(800.0, 600.0);
        for _ in 0..500 {
            lottery.tick();
        }
        for ball in &lottery.world().balls {
            assert!(ball.pos.x >= ball.radius && ball.pos.x <= 800.0 - ball.radius);
            assert!(ball.pos.y <= 600.0 - ball.radius);
        }
    }

    #[test]
    fn test_command_flow() {
        let mut lottery = lottery(&["A", "B"]);
        lottery.resize(800.0, 600.0);

        assert_eq!(lottery.apply(Command::Dismiss), CommandOutcome::Ignored);
        let CommandOutcome::DrawStarted(ticket) = lottery.apply(Command::Draw) else {
            panic!("draw should start");
        };
        assert_eq!(lottery.apply(Command::Draw), CommandOutcome::Ignored);
        lottery.begin_reveal(&ticket);
        lottery.finish_reveal(&ticket).unwrap();
        assert_eq!(
            lottery.apply(Command::Dismiss),
            CommandOutcome::Settled(Settled::Ready)
        );

        assert_eq!(lottery.apply(Command::Shake), CommandOutcome::Applied);
        assert_eq!(lottery.apply(Command::Reset), CommandOutcome::Applied);
        assert_eq!(lottery.world().len(), 2);

        let edited = PrizeList::from_entries(["X", "Y", "Z"]).unwrap();
        assert_eq!(
            lottery.apply(Command::ReplacePrizes(edited)),
            CommandOutcome::Applied
        );
        assert_eq!(lottery.world().len(), 3);
    }

    #[test]
    fn test_edited_prizes_replace_drum() {
        let mut lottery = lottery(&["A", "B", "C"]);
        lottery.resize(800.0, 600.0);
        let CommandOutcome::DrawStarted(ticket) = lottery.apply(Command::Draw) else {
            panic!("draw should start");
        };
        lottery.begin_reveal(&ticket);
        lottery.finish_reveal(&ticket).unwrap();

        let mut draft = lottery.prizes().clone();
        let added = draft.add("");
        draft.rename(0, "Grand prize").unwrap();
        draft.remove(1).unwrap();
        draft.save().unwrap();
        assert_eq!(
            lottery.apply(Command::ReplacePrizes(draft)),
            CommandOutcome::Applied
        );

        let labels: Vec<&str> = lottery.world().balls.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Grand prize", "C", crate::prizes::NEW_PRIZE_LABEL]);
        assert_eq!(added, 3);
        assert_eq!(lottery.phase(), DrawPhase::Idle);
        assert_eq!(lottery.stats().draws, 0);
        assert_eq!(lottery.prizes().len(), 3);
    }

    #[test]
    fn test_count_never_grows_between_resets() {
        let mut lottery = lottery(&["A", "B", "C", "D", "E"]);
        let mut surface = RecordingSurface::new(640.0, 480.0);
        lottery.frame(&mut surface);

        let mut last = lottery.world().len();
        let mut drawn: Vec<String> = Vec::new();
        for frame in 0..400 {
            if frame % 40 == 0 {
                if let CommandOutcome::DrawStarted(ticket) = lottery.apply(Command::Draw) {
                    lottery.begin_reveal(&ticket);
                    drawn.push(lottery.finish_reveal(&ticket).unwrap().label);
                    lottery.apply(Command::Dismiss);
                }
            }
            lottery.frame(&mut surface);
            let now = lottery.world().len();
            assert!(now <= last);
            last = now;
            for ball in &lottery.world().balls {
                assert!(!drawn.contains(&ball.label));
            }
        }
        assert!(lottery.is_exhausted());
    }
}
