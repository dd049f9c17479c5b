//! Lottery simulation
//!
//! Ball physics, placement and the draw state machine. Nothing in here
//! touches the DOM: randomness comes from a seeded RNG and drawing goes
//! through the `Surface` trait.

pub mod ball;
pub mod collision;
pub mod draw;
pub mod layout;
pub mod state;
pub mod tick;
pub mod world;

pub use ball::{Ball, MotionParams, bounce_axis};
pub use collision::{Contact, contact, exchange_normal_velocity, resolve_pair};
pub use draw::{DrawOutcome, DrawPhase, DrawStats, DrawTicket, Selector, Settled, pick_winner};
pub use layout::{LayoutParams, is_degenerate, scatter};
pub use state::Lottery;
pub use tick::{Command, CommandOutcome};
pub use world::World;
