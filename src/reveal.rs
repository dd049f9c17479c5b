//! Reveal sequence
//!
//! A draw plays out over several seconds: video, a short pause, an optional
//! light effect, then the winner is shown and possibly dismissed on a timer.
//! `run_draw` walks those steps as one async task. The animation loop keeps
//! ticking the same `Lottery` in between, so the machine is only borrowed for
//! the instant each step touches it, never across an await.

use std::cell::RefCell;

use crate::error::MediaError;
use crate::settings::{Dismissal, Settings, TransitionStyle};
use crate::sim::{DrawOutcome, DrawStats, DrawTicket, Lottery, Settled};

/// The transition media shown while a draw is pending
#[allow(async_fn_in_trait)]
pub trait TransitionMedia {
    /// Play the draw video to its end
    async fn play_video(&mut self) -> Result<(), MediaError>;

    /// Toggle the light overlay. Media without one ignore this.
    fn set_light(&mut self, _on: bool) {}
}

/// Wall-clock delays
#[allow(async_fn_in_trait)]
pub trait Timer {
    async fn sleep(&self, ms: u32);
}

/// Receives the visible results of a draw
pub trait ResultSink {
    /// A draw was accepted and its transition is starting
    fn on_draw_started(&mut self);

    /// The winner left the drum
    fn on_winner(&mut self, outcome: &DrawOutcome);

    /// The revealed result was dismissed
    fn on_settled(&mut self, settled: Settled, stats: DrawStats);

    /// Counters changed outside a draw (reset, prize edit)
    fn on_stats(&mut self, stats: DrawStats);
}

/// Reveal timings and style, copied out of the settings when a draw starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealPlan {
    pub transition: TransitionStyle,
    pub dismissal: Dismissal,
    pub video_fallback_ms: u32,
    pub post_video_delay_ms: u32,
    pub light_effect_ms: u32,
    pub auto_dismiss_ms: u32,
}

impl From<&Settings> for RevealPlan {
    fn from(settings: &Settings) -> Self {
        Self {
            transition: settings.transition,
            dismissal: settings.dismissal,
            video_fallback_ms: settings.video_fallback_ms,
            post_video_delay_ms: settings.post_video_delay_ms,
            light_effect_ms: settings.light_effect_ms,
            auto_dismiss_ms: settings.auto_dismiss_ms,
        }
    }
}

/// Play the transition: video (or the fallback delay), the settle pause, then
/// the light effect for the light-show style.
pub async fn play_transition<M, T>(plan: &RevealPlan, media: &mut M, timer: &T)
where
    M: TransitionMedia,
    T: Timer,
{
    if let Err(err) = media.play_video().await {
        log::warn!("Draw video failed ({}), waiting {} ms instead", err, plan.video_fallback_ms);
        timer.sleep(plan.video_fallback_ms).await;
    }
    timer.sleep(plan.post_video_delay_ms).await;

    if plan.transition == TransitionStyle::VideoWithLight {
        media.set_light(true);
        timer.sleep(plan.light_effect_ms).await;
        media.set_light(false);
    }
}

/// Drive one draw from Selecting to the revealed result.
///
/// Returns the outcome, or `None` when the ticket went stale (the machine was
/// reset during the transition). With auto dismissal the result is also
/// settled here once its timer runs out, unless the user got there first.
pub async fn run_draw<M, T, K>(
    lottery: &RefCell<Lottery>,
    ticket: DrawTicket,
    media: &mut M,
    timer: &T,
    sink: &mut K,
) -> Option<DrawOutcome>
where
    M: TransitionMedia,
    T: Timer,
    K: ResultSink,
{
    let plan = {
        let mut machine = lottery.borrow_mut();
        if !machine.begin_reveal(&ticket) {
            log::debug!("Draw #{} is stale before its transition", ticket.round);
            return None;
        }
        RevealPlan::from(machine.settings())
    };
    sink.on_draw_started();

    play_transition(&plan, media, timer).await;

    let outcome = lottery.borrow_mut().finish_reveal(&ticket);
    let Some(outcome) = outcome else {
        log::debug!("Draw #{} abandoned during its transition", ticket.round);
        return None;
    };
    sink.on_winner(&outcome);

    if plan.dismissal == Dismissal::Auto {
        timer.sleep(plan.auto_dismiss_ms).await;
        let settled = {
            let mut machine = lottery.borrow_mut();
            machine.expire(&ticket).map(|settled| (settled, machine.stats()))
        };
        if let Some((settled, stats)) = settled {
            sink.on_settled(settled, stats);
        }
    }
    Some(outcome)
}
