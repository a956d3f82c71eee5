//! Scripted host for unit tests

use std::collections::HashMap;
use std::string::String;
use std::vec::Vec;

use embedded_graphics_core::geometry::{Point, Size};
use embedded_graphics_core::pixelcolor::Rgb565;
use embedded_graphics_core::primitives::Rectangle;

use crate::config::{FontResource, TickUnit};
use crate::state::WallClock;
use crate::traits::*;

/// Host call, in the order it was made
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateWindow(WindowHandle),
    PushWindow(WindowHandle),
    DestroyWindow(WindowHandle),
    CreateLayer(LayerHandle),
    AddChild(LayerHandle, LayerHandle),
    MarkDirty(LayerHandle),
    DestroyLayer(LayerHandle),
    CreateLabel(LabelHandle),
    AttachLabel(LayerHandle, LabelHandle),
    DestroyLabel(LabelHandle),
    LoadFont(FontHandle),
    UnloadFont(FontHandle),
    SubscribeTicks(TickUnit),
    UnsubscribeTicks,
    SubscribeConnectivity,
    UnsubscribeConnectivity,
    DoublePulse,
}

#[derive(Debug)]
pub struct MockHost {
    pub bounds: Rectangle,
    pub clock: WallClock,
    pub connected: bool,
    pub calls: Vec<Call>,
    pub texts: HashMap<LabelHandle, String>,
    /// Fail the n-th allocation (0-based)
    pub fail_at: Option<usize>,
    allocations: usize,
    next_handle: u16,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            bounds: Rectangle::new(Point::zero(), Size::new(144, 168)),
            clock: WallClock::new(3, 30, 45, 7),
            connected: true,
            calls: Vec::new(),
            texts: HashMap::new(),
            fail_at: None,
            allocations: 0,
            next_handle: 1,
        }
    }

    fn allocate(&mut self) -> Result<u16, HostError> {
        let index = self.allocations;
        self.allocations += 1;
        if self.fail_at == Some(index) {
            return Err(HostError::OutOfResources);
        }
        let handle = self.next_handle;
        self.next_handle += 1;
        Ok(handle)
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub fn pulses(&self) -> usize {
        self.count(&Call::DoublePulse)
    }

    /// Resources created and not yet released
    pub fn live(&self) -> isize {
        self.calls
            .iter()
            .map(|call| match call {
                Call::CreateWindow(_)
                | Call::CreateLayer(_)
                | Call::CreateLabel(_)
                | Call::LoadFont(_)
                | Call::SubscribeTicks(_)
                | Call::SubscribeConnectivity => 1,
                Call::DestroyWindow(_)
                | Call::DestroyLayer(_)
                | Call::DestroyLabel(_)
                | Call::UnloadFont(_)
                | Call::UnsubscribeTicks
                | Call::UnsubscribeConnectivity => -1,
                _ => 0,
            })
            .sum()
    }

    pub fn text(&self, label: LabelHandle) -> &str {
        self.texts.get(&label).map(String::as_str).unwrap_or("")
    }
}

impl WindowHost for MockHost {
    fn create_window(&mut self) -> Result<WindowHandle, HostError> {
        let window = WindowHandle(self.allocate()?);
        self.calls.push(Call::CreateWindow(window));
        Ok(window)
    }

    fn root_layer(&self, _window: WindowHandle) -> Result<LayerHandle, HostError> {
        Ok(LayerHandle(0))
    }

    fn push_window(&mut self, window: WindowHandle, _animated: bool) -> Result<(), HostError> {
        self.calls.push(Call::PushWindow(window));
        Ok(())
    }

    fn destroy_window(&mut self, window: WindowHandle) {
        self.calls.push(Call::DestroyWindow(window));
    }
}

impl LayerHost for MockHost {
    fn create_layer(&mut self, _frame: Rectangle) -> Result<LayerHandle, HostError> {
        let layer = LayerHandle(self.allocate()?);
        self.calls.push(Call::CreateLayer(layer));
        Ok(layer)
    }

    fn layer_bounds(&self, _layer: LayerHandle) -> Result<Rectangle, HostError> {
        Ok(self.bounds)
    }

    fn add_child(&mut self, parent: LayerHandle, child: LayerHandle) -> Result<(), HostError> {
        self.calls.push(Call::AddChild(parent, child));
        Ok(())
    }

    fn mark_dirty(&mut self, layer: LayerHandle) {
        self.calls.push(Call::MarkDirty(layer));
    }

    fn destroy_layer(&mut self, layer: LayerHandle) {
        self.calls.push(Call::DestroyLayer(layer));
    }
}

impl TextHost for MockHost {
    fn create_label(&mut self, _frame: Rectangle) -> Result<LabelHandle, HostError> {
        let label = LabelHandle(self.allocate()?);
        self.calls.push(Call::CreateLabel(label));
        Ok(label)
    }

    fn attach_label(&mut self, parent: LayerHandle, label: LabelHandle) -> Result<(), HostError> {
        self.calls.push(Call::AttachLabel(parent, label));
        Ok(())
    }

    fn set_label_text(&mut self, label: LabelHandle, text: &str) {
        self.texts.insert(label, String::from(text));
    }

    fn set_label_font(&mut self, _label: LabelHandle, _font: FontHandle) {}

    fn set_label_colors(&mut self, _label: LabelHandle, _text: Rgb565, _background: Option<Rgb565>) {}

    fn set_label_alignment(&mut self, _label: LabelHandle, _alignment: TextAlignment) {}

    fn destroy_label(&mut self, label: LabelHandle) {
        self.calls.push(Call::DestroyLabel(label));
    }
}

impl ResourceHost for MockHost {
    fn load_font(&mut self, _resource: FontResource) -> Result<FontHandle, HostError> {
        let font = FontHandle(self.allocate()?);
        self.calls.push(Call::LoadFont(font));
        Ok(font)
    }

    fn unload_font(&mut self, font: FontHandle) {
        self.calls.push(Call::UnloadFont(font));
    }
}

impl TimeSource for MockHost {
    fn now(&self) -> WallClock {
        self.clock
    }
}

impl EventSource for MockHost {
    fn subscribe_ticks(&mut self, unit: TickUnit) {
        self.calls.push(Call::SubscribeTicks(unit));
    }

    fn unsubscribe_ticks(&mut self) {
        self.calls.push(Call::UnsubscribeTicks);
    }

    fn subscribe_connectivity(&mut self) {
        self.calls.push(Call::SubscribeConnectivity);
    }

    fn unsubscribe_connectivity(&mut self) {
        self.calls.push(Call::UnsubscribeConnectivity);
    }

    fn peek_connectivity(&self) -> bool {
        self.connected
    }
}

impl Haptics for MockHost {
    fn double_pulse(&mut self) {
        self.calls.push(Call::DoublePulse);
    }
}
