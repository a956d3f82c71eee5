//! Clock state shared between the event handlers and the renderers

use core::fmt::Write;

use heapless::String;

/// Visible capacity of the day label
pub const DAY_TEXT_CAPACITY: usize = 5;

/// Wall-clock sample decomposed into the fields the face uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallClock {
    /// Hour of the day (0-23)
    pub hour: u8,
    /// Minute of the hour (0-59)
    pub minute: u8,
    /// Second of the minute (0-59)
    pub second: u8,
    /// Day of the month (1-31)
    pub day: u8,
}

impl WallClock {
    pub const fn new(hour: u8, minute: u8, second: u8, day: u8) -> Self {
        Self {
            hour,
            minute,
            second,
            day,
        }
    }

    /// Hour within the 12-hour dial (0-11)
    pub const fn dial_hour(&self) -> u8 {
        self.hour % 12
    }
}

/// Day-of-month label text
///
/// Formatted as two digits with a single leading `'0'` stripped, so days
/// 1-9 show one digit and 10-31 show both. Starts out empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DayText {
    text: String<DAY_TEXT_CAPACITY>,
}

impl DayText {
    /// Create an empty label
    pub const fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Replace the text with the formatted day of month
    pub fn set_day(&mut self, day: u8) {
        let mut formatted: String<DAY_TEXT_CAPACITY> = String::new();
        // At most three digits for a u8
        let _ = write!(formatted, "{:02}", day);

        let visible = formatted.strip_prefix('0').unwrap_or(formatted.as_str());
        self.text.clear();
        let _ = self.text.push_str(visible);
    }

    /// Current label text
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// Check if nothing has been formatted yet
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Mutable face state
///
/// `connected` is written only by the connectivity handler; `day` only by
/// the hands pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockState {
    /// Last known connectivity to the companion device
    pub connected: bool,
    /// Day-of-month label text
    pub day: DayText,
}

impl ClockState {
    /// Create state with an initial connectivity status
    pub const fn new(connected: bool) -> Self {
        Self {
            connected,
            day: DayText::new(),
        }
    }

    /// Record a connectivity update
    ///
    /// Returns `true` if this update is a connected -> disconnected
    /// transition.
    pub fn set_connected(&mut self, connected: bool) -> bool {
        let lost = self.connected && !connected;
        self.connected = connected;
        lost
    }
}
