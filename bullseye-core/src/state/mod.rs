//! Face state
//!
//! The lifecycle is an explicit, finite state machine driven by host
//! events. Clock state holds what the renderers read between events.

pub mod clock;
pub mod events;
pub mod machine;

pub use clock::{ClockState, DayText, WallClock, DAY_TEXT_CAPACITY};
pub use events::Event;
pub use machine::Phase;
