//! Events delivered by the display host

use crate::config::TickUnit;

/// Events consumed by the controller's `handle` entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Lifecycle events
    /// Host is ready; acquire resources and show the face
    Startup,
    /// Host is shutting down; release everything
    Shutdown,

    // Service events
    /// Periodic time tick at the subscribed granularity
    Tick(TickUnit),
    /// Connectivity to the companion device changed
    ConnectivityChanged(bool),
}

impl Event {
    /// Check if this event drives the lifecycle
    pub fn is_lifecycle_event(&self) -> bool {
        matches!(self, Event::Startup | Event::Shutdown)
    }

    /// Check if this event comes from a subscribed host service
    pub fn is_service_event(&self) -> bool {
        matches!(self, Event::Tick(_) | Event::ConnectivityChanged(_))
    }
}
