//! Face lifecycle state machine
//!
//! `Uninitialized -> Active -> TornDown`. Service events are only
//! meaningful while active; anything else leaves the phase unchanged.

use super::events::Event;

/// Lifecycle phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Created, no host resources held
    #[default]
    Uninitialized,
    /// Window shown, subscribed to ticks and connectivity
    Active,
    /// Resources released; terminal
    TornDown,
}

impl Phase {
    /// Check if the face is showing and handling service events
    pub fn is_active(&self) -> bool {
        matches!(self, Phase::Active)
    }

    /// Check if this is the terminal phase
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::TornDown)
    }

    /// Check if `event` has an effect in this phase
    pub fn accepts(&self, event: Event) -> bool {
        matches!(
            (self, event),
            (Phase::Uninitialized, Event::Startup)
                | (Phase::Active, Event::Tick(_))
                | (Phase::Active, Event::ConnectivityChanged(_))
                | (Phase::Active, Event::Shutdown)
        )
    }

    /// Process an event and return the next phase
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use Phase::*;

        match (self, event) {
            (Uninitialized, Startup) => Active,
            (Active, Shutdown) => TornDown,

            // Ticks and connectivity changes keep the face active
            (Active, Tick(_)) | (Active, ConnectivityChanged(_)) => Active,

            // Default: stay in current phase
            _ => self,
        }
    }
}
