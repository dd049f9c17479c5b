//! Lottery Machine - a bouncing-ball raffle drum
//!
//! Core modules:
//! - `sim`: Ball physics, layout and the draw state machine
//! - `reveal`: Async reveal sequence (video, light effect, result)
//! - `renderer`: Surface abstraction, labels, colors, canvas backend
//! - `platform`: Browser storage helpers
//! - `settings`: Tunables and presets
//! - `prizes`: Editable prize list

pub mod error;
pub mod platform;
pub mod prizes;
pub mod renderer;
pub mod reveal;
pub mod settings;
pub mod sim;

pub use error::{LotteryError, MediaError};
pub use prizes::PrizeList;
pub use settings::{Dismissal, Preset, Settings, TransitionStyle};
pub use sim::{Command, CommandOutcome, DrawOutcome, DrawPhase, DrawStats, DrawTicket, Lottery};

/// Default tunables, mirrored by `Settings::default()`
pub mod consts {
    /// Downward acceleration added to vy every tick (px/tick²)
    pub const GRAVITY: f32 = 0.2;
    /// Velocity multiplier applied every tick
    pub const DAMPING: f32 = 0.99;
    /// Fraction of velocity kept after a wall bounce
    pub const RESTITUTION: f32 = 0.9;
    /// Initial velocity range per axis is [-INITIAL_SPEED, INITIAL_SPEED)
    pub const INITIAL_SPEED: f32 = 4.0;
    /// Total width of the random impulse range applied by a shake
    pub const SHAKE_STRENGTH: f32 = 15.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 18.0;
    /// Margin kept free along every edge when scattering balls
    pub const LAYOUT_PADDING: f32 = 30.0;
    /// Extra clearance required between two scattered balls
    pub const PLACEMENT_BUFFER: f32 = 10.0;
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100;

    /// Reveal timings (milliseconds)
    pub const VIDEO_FALLBACK_MS: u32 = 3000;
    pub const POST_VIDEO_DELAY_MS: u32 = 500;
    pub const LIGHT_EFFECT_MS: u32 = 2500;
    pub const AUTO_DISMISS_MS: u32 = 3000;

    /// Label text layout
    pub const LABEL_WIDTH_FACTOR: f32 = 1.6;
    pub const LABEL_LINE_HEIGHT: f32 = 11.0;
    pub const LABEL_MAX_LINES: usize = 2;

    /// Below this center distance two balls are treated as coincident
    pub const COINCIDENT_EPSILON: f32 = 1e-4;
}
