//! Host collaborator traits
//!
//! These traits define the interface between the face logic and the
//! display host that owns windows, layers, fonts and event delivery.

pub mod canvas;
pub mod host;

pub use canvas::{Canvas, CanvasError};
pub use host::{
    DisplayHost, EventSource, FontHandle, Haptics, HostError, LabelHandle, LayerHandle,
    LayerHost, ResourceHost, TextAlignment, TextHost, TimeSource, WindowHandle, WindowHost,
};
