//! Race rules: phases, selection, zones, movement, checkpoints and timers.
//!
//! Nothing in here draws. The session mutates cart and widget shapes through
//! layout handles and reports what happened as [`RaceEvent`]s.

mod button;
mod clock;
mod countdown;
mod laps;
mod movement;
mod phase;
mod selection;
mod session;
mod zones;

#[cfg(test)]
pub(crate) use clock::ManualClock;
pub(crate) use clock::{Clock, SystemClock};
pub(crate) use laps::CHECKPOINT_COUNT;
pub(crate) use movement::Steering;
pub(crate) use phase::GamePhase;
pub(crate) use selection::Player;
pub(crate) use session::{FrameInput, RaceEvent, RaceSession};
