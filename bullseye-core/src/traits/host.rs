//! Display host traits
//!
//! The host owns windows, the layer compositor, text labels, fonts, the
//! wall clock and event subscriptions. The face only holds opaque handles.

use embedded_graphics_core::pixelcolor::Rgb565;
use embedded_graphics_core::primitives::Rectangle;

use crate::config::{FontResource, TickUnit};
use crate::state::WallClock;

/// Top-level window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WindowHandle(pub u16);

/// Drawing surface in the compositor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayerHandle(pub u16);

/// Text label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LabelHandle(pub u16);

/// Loaded font
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FontHandle(pub u16);

/// Errors reported by the host when acquiring resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostError {
    /// No memory or slots left for the resource
    #[error("host is out of resources")]
    OutOfResources,
    /// Handle does not refer to a live resource
    #[error("handle does not refer to a live resource")]
    UnknownHandle,
    /// Requested resource is not bundled with the face
    #[error("resource is not bundled")]
    ResourceMissing,
}

/// Horizontal text alignment within a label frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextAlignment {
    Left,
    #[default]
    Center,
    Right,
}

/// Window lifecycle
pub trait WindowHost {
    /// Create a top-level window
    fn create_window(&mut self) -> Result<WindowHandle, HostError>;

    /// Root layer of a window; it spans the full display
    fn root_layer(&self, window: WindowHandle) -> Result<LayerHandle, HostError>;

    /// Push the window onto the window stack, making it visible
    fn push_window(&mut self, window: WindowHandle, animated: bool) -> Result<(), HostError>;

    /// Destroy a window and its root layer
    fn destroy_window(&mut self, window: WindowHandle);
}

/// Layer compositor
///
/// Children are composited in insertion order, so later children draw on
/// top of earlier ones.
pub trait LayerHost {
    /// Create a layer covering `frame`
    fn create_layer(&mut self, frame: Rectangle) -> Result<LayerHandle, HostError>;

    /// Bounds of a layer in its own coordinates
    fn layer_bounds(&self, layer: LayerHandle) -> Result<Rectangle, HostError>;

    /// Append `child` to `parent`'s children
    fn add_child(&mut self, parent: LayerHandle, child: LayerHandle) -> Result<(), HostError>;

    /// Request a redraw of `layer` on the next compositor pass
    ///
    /// Idempotent: several requests before a pass cause one redraw.
    fn mark_dirty(&mut self, layer: LayerHandle);

    /// Destroy a layer
    fn destroy_layer(&mut self, layer: LayerHandle);
}

/// Text labels
pub trait TextHost {
    /// Create a label covering `frame`
    fn create_label(&mut self, frame: Rectangle) -> Result<LabelHandle, HostError>;

    /// Attach a label to a parent layer
    fn attach_label(&mut self, parent: LayerHandle, label: LabelHandle) -> Result<(), HostError>;

    /// Replace the label's text
    fn set_label_text(&mut self, label: LabelHandle, text: &str);

    /// Set the label's font
    fn set_label_font(&mut self, label: LabelHandle, font: FontHandle);

    /// Set text colour and background (`None` is transparent)
    fn set_label_colors(&mut self, label: LabelHandle, text: Rgb565, background: Option<Rgb565>);

    /// Set horizontal alignment
    fn set_label_alignment(&mut self, label: LabelHandle, alignment: TextAlignment);

    /// Destroy a label
    fn destroy_label(&mut self, label: LabelHandle);
}

/// Bundled resources
pub trait ResourceHost {
    /// Load a bundled font
    fn load_font(&mut self, resource: FontResource) -> Result<FontHandle, HostError>;

    /// Release a loaded font
    fn unload_font(&mut self, font: FontHandle);
}

/// Wall-clock source
pub trait TimeSource {
    /// Current local wall-clock time
    fn now(&self) -> WallClock;
}

/// Tick and connectivity subscriptions
///
/// Subscribed events are delivered back to the face as `Event`s through
/// `Controller::handle`.
pub trait EventSource {
    /// Start delivering ticks at `unit` granularity
    fn subscribe_ticks(&mut self, unit: TickUnit);

    /// Stop delivering ticks
    fn unsubscribe_ticks(&mut self);

    /// Start delivering connectivity changes
    fn subscribe_connectivity(&mut self);

    /// Stop delivering connectivity changes
    fn unsubscribe_connectivity(&mut self);

    /// Current connectivity, queried synchronously
    fn peek_connectivity(&self) -> bool;
}

/// Haptic feedback
pub trait Haptics {
    /// Two short vibration pulses
    fn double_pulse(&mut self);
}

/// Everything the face needs from its host
pub trait DisplayHost:
    WindowHost + LayerHost + TextHost + ResourceHost + TimeSource + EventSource + Haptics
{
}

// Blanket implementation for any type providing all host services
impl<T> DisplayHost for T where
    T: WindowHost + LayerHost + TextHost + ResourceHost + TimeSource + EventSource + Haptics
{
}
