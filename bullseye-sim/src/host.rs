//! Simulated display host
//!
//! Emulates the host services the face runs against: a window stack with
//! a layer tree, text labels, bundled fonts, a wall clock, tick and
//! connectivity subscriptions and a vibration motor. Dirty flags model the
//! compositor's redraw coalescing: any number of `mark_dirty` calls before
//! a frame cause one redraw of that layer.

use std::collections::HashMap;

use bullseye_core::config::{FontResource, TickUnit};
use bullseye_core::state::WallClock;
use bullseye_core::traits::{
    CanvasError, EventSource, FontHandle, Haptics, HostError, LabelHandle, LayerHandle,
    LayerHost, ResourceHost, TextAlignment, TextHost, TimeSource, WindowHandle, WindowHost,
};
use bullseye_display::{draw_label, GraphicsCanvas, LabelStyle};
use embedded_graphics::draw_target::DrawTargetExt;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::{debug, trace, warn};

use crate::draw_list::DrawList;

/// Where the host's wall clock comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSource {
    /// Always reports the same time
    Fixed(WallClock),
    /// Local system time
    System,
}

impl ClockSource {
    fn sample(&self) -> WallClock {
        match self {
            ClockSource::Fixed(time) => *time,
            ClockSource::System => {
                let now = jiff::Zoned::now();
                WallClock::new(
                    now.hour() as u8,
                    now.minute() as u8,
                    now.second() as u8,
                    now.day() as u8,
                )
            }
        }
    }
}

#[derive(Debug)]
struct WindowState {
    root: LayerHandle,
    pushed: bool,
}

#[derive(Debug)]
struct LayerState {
    frame: Rectangle,
    children: Vec<LayerHandle>,
    labels: Vec<LabelHandle>,
    dirty: bool,
    content: DrawList,
}

impl LayerState {
    fn new(frame: Rectangle) -> Self {
        Self {
            frame,
            children: Vec::new(),
            labels: Vec::new(),
            // Never drawn yet
            dirty: true,
            content: DrawList::new(),
        }
    }
}

/// Label as last configured by the face
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelState {
    pub frame: Rectangle,
    pub text: String,
    pub font: Option<FontHandle>,
    pub color: Rgb565,
    pub background: Option<Rgb565>,
    pub alignment: TextAlignment,
}

/// In-process display host
#[derive(Debug)]
pub struct SimHost {
    bounds: Rectangle,
    clock: ClockSource,
    connected: bool,
    next_handle: u16,
    /// Allocations left before `OutOfResources`; `None` is unlimited
    allocation_budget: Option<usize>,
    windows: HashMap<WindowHandle, WindowState>,
    /// Window stack, top last
    stack: Vec<WindowHandle>,
    layers: HashMap<LayerHandle, LayerState>,
    labels: HashMap<LabelHandle, LabelState>,
    fonts: HashMap<FontHandle, FontResource>,
    ticks: Option<TickUnit>,
    connectivity: bool,
    pulses: usize,
}

impl SimHost {
    /// Create a host for a display of `bounds`
    pub fn new(bounds: Rectangle, clock: ClockSource) -> Self {
        Self {
            bounds,
            clock,
            connected: true,
            next_handle: 1,
            allocation_budget: None,
            windows: HashMap::new(),
            stack: Vec::new(),
            layers: HashMap::new(),
            labels: HashMap::new(),
            fonts: HashMap::new(),
            ticks: None,
            connectivity: false,
            pulses: 0,
        }
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    pub fn set_clock(&mut self, clock: ClockSource) {
        self.clock = clock;
    }

    /// Set the companion link state reported by `peek_connectivity`
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// Let `count` more allocations succeed, then fail every one after
    pub fn fail_allocation_after(&mut self, count: usize) {
        self.allocation_budget = Some(count);
    }

    /// Remove any allocation limit
    pub fn clear_allocation_limit(&mut self) {
        self.allocation_budget = None;
    }

    /// Granularity of the current tick subscription
    pub fn tick_subscription(&self) -> Option<TickUnit> {
        self.ticks
    }

    pub fn connectivity_subscribed(&self) -> bool {
        self.connectivity
    }

    /// Double pulses fired so far
    pub fn pulses(&self) -> usize {
        self.pulses
    }

    /// Windows, layers, labels, fonts and subscriptions still held
    ///
    /// Root layers belong to their window and are not counted separately.
    pub fn live_resources(&self) -> usize {
        let roots = self.windows.len();
        self.windows.len()
            + self.layers.len().saturating_sub(roots)
            + self.labels.len()
            + self.fonts.len()
            + usize::from(self.ticks.is_some())
            + usize::from(self.connectivity)
    }

    pub fn label(&self, label: LabelHandle) -> Option<&LabelState> {
        self.labels.get(&label)
    }

    pub fn label_text(&self, label: LabelHandle) -> Option<&str> {
        self.labels.get(&label).map(|state| state.text.as_str())
    }

    pub fn is_pushed(&self, window: WindowHandle) -> bool {
        self.windows.get(&window).is_some_and(|state| state.pushed)
    }

    pub fn is_dirty(&self, layer: LayerHandle) -> bool {
        self.layers.get(&layer).is_some_and(|state| state.dirty)
    }

    /// Retained drawing of a layer
    pub fn layer_content(&self, layer: LayerHandle) -> Option<&DrawList> {
        self.layers.get(&layer).map(|state| &state.content)
    }

    /// Layers of the top window, bottom to top
    pub fn z_order(&self) -> Vec<LayerHandle> {
        let mut order = Vec::new();
        if let Some(root) = self.top_root() {
            self.collect_children(root, &mut order);
        }
        order
    }

    /// Visible dirty layers in z-order
    pub fn dirty_layers(&self) -> Vec<LayerHandle> {
        self.z_order()
            .into_iter()
            .filter(|&layer| self.is_dirty(layer))
            .collect()
    }

    /// Keep `content` as the layer's drawing until its next redraw and
    /// clear its dirty flag
    pub fn store_draw_list(&mut self, layer: LayerHandle, content: DrawList) {
        match self.layers.get_mut(&layer) {
            Some(state) => {
                state.content = content;
                state.dirty = false;
            }
            None => warn!("Draw list for unknown layer {:?}", layer),
        }
    }

    /// Compose the top window onto `target`
    pub fn composite<D>(&self, target: &mut D) -> Result<(), CanvasError>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        target
            .clear(Rgb565::BLACK)
            .map_err(|_| CanvasError::Surface)?;

        for layer in self.z_order() {
            let Some(state) = self.layers.get(&layer) else {
                continue;
            };
            let mut translated = target.translated(state.frame.top_left);
            state.content.replay(&mut GraphicsCanvas::new(&mut translated))?;

            for label in &state.labels {
                let Some(label) = self.labels.get(label) else {
                    continue;
                };
                let style = LabelStyle {
                    font: label
                        .font
                        .and_then(|font| self.fonts.get(&font).copied())
                        .unwrap_or(FontResource::Day24),
                    color: label.color,
                    background: label.background,
                    alignment: label.alignment,
                };
                draw_label(&mut translated, label.frame, &label.text, &style)
                    .map_err(|_| CanvasError::Surface)?;
            }
        }
        Ok(())
    }

    fn top_root(&self) -> Option<LayerHandle> {
        self.stack
            .last()
            .and_then(|window| self.windows.get(window))
            .filter(|state| state.pushed)
            .map(|state| state.root)
    }

    fn collect_children(&self, parent: LayerHandle, order: &mut Vec<LayerHandle>) {
        let Some(state) = self.layers.get(&parent) else {
            return;
        };
        for &child in &state.children {
            order.push(child);
            self.collect_children(child, order);
        }
    }

    fn next_id(&mut self) -> u16 {
        let id = self.next_handle;
        self.next_handle = self.next_handle.wrapping_add(1);
        id
    }

    fn allocate(&mut self) -> Result<u16, HostError> {
        match self.allocation_budget {
            Some(0) => {
                debug!("Allocation refused");
                Err(HostError::OutOfResources)
            }
            Some(ref mut left) => {
                *left -= 1;
                Ok(self.next_id())
            }
            None => Ok(self.next_id()),
        }
    }
}

impl WindowHost for SimHost {
    fn create_window(&mut self) -> Result<WindowHandle, HostError> {
        let window = WindowHandle(self.allocate()?);
        let root = LayerHandle(self.next_id());
        self.layers.insert(root, LayerState::new(self.bounds));
        self.windows.insert(window, WindowState { root, pushed: false });
        trace!("Created window {:?} with root {:?}", window, root);
        Ok(window)
    }

    fn root_layer(&self, window: WindowHandle) -> Result<LayerHandle, HostError> {
        self.windows
            .get(&window)
            .map(|state| state.root)
            .ok_or(HostError::UnknownHandle)
    }

    fn push_window(&mut self, window: WindowHandle, _animated: bool) -> Result<(), HostError> {
        let state = self
            .windows
            .get_mut(&window)
            .ok_or(HostError::UnknownHandle)?;
        state.pushed = true;
        self.stack.retain(|&w| w != window);
        self.stack.push(window);
        Ok(())
    }

    fn destroy_window(&mut self, window: WindowHandle) {
        let Some(state) = self.windows.remove(&window) else {
            warn!("Destroying unknown window {:?}", window);
            return;
        };
        self.layers.remove(&state.root);
        self.stack.retain(|&w| w != window);
    }
}

impl LayerHost for SimHost {
    fn create_layer(&mut self, frame: Rectangle) -> Result<LayerHandle, HostError> {
        let layer = LayerHandle(self.allocate()?);
        self.layers.insert(layer, LayerState::new(frame));
        Ok(layer)
    }

    fn layer_bounds(&self, layer: LayerHandle) -> Result<Rectangle, HostError> {
        self.layers
            .get(&layer)
            .map(|state| Rectangle::new(Point::zero(), state.frame.size))
            .ok_or(HostError::UnknownHandle)
    }

    fn add_child(&mut self, parent: LayerHandle, child: LayerHandle) -> Result<(), HostError> {
        if !self.layers.contains_key(&child) {
            return Err(HostError::UnknownHandle);
        }
        let state = self
            .layers
            .get_mut(&parent)
            .ok_or(HostError::UnknownHandle)?;
        state.children.push(child);
        Ok(())
    }

    fn mark_dirty(&mut self, layer: LayerHandle) {
        match self.layers.get_mut(&layer) {
            Some(state) => state.dirty = true,
            None => warn!("Marking unknown layer {:?} dirty", layer),
        }
    }

    fn destroy_layer(&mut self, layer: LayerHandle) {
        if self.layers.remove(&layer).is_none() {
            warn!("Destroying unknown layer {:?}", layer);
            return;
        }
        for state in self.layers.values_mut() {
            state.children.retain(|&child| child != layer);
        }
    }
}

impl TextHost for SimHost {
    fn create_label(&mut self, frame: Rectangle) -> Result<LabelHandle, HostError> {
        let label = LabelHandle(self.allocate()?);
        self.labels.insert(
            label,
            LabelState {
                frame,
                text: String::new(),
                font: None,
                color: Rgb565::BLACK,
                background: Some(Rgb565::WHITE),
                alignment: TextAlignment::Left,
            },
        );
        Ok(label)
    }

    fn attach_label(&mut self, parent: LayerHandle, label: LabelHandle) -> Result<(), HostError> {
        if !self.labels.contains_key(&label) {
            return Err(HostError::UnknownHandle);
        }
        let state = self
            .layers
            .get_mut(&parent)
            .ok_or(HostError::UnknownHandle)?;
        state.labels.push(label);
        Ok(())
    }

    fn set_label_text(&mut self, label: LabelHandle, text: &str) {
        match self.labels.get_mut(&label) {
            Some(state) => {
                state.text.clear();
                state.text.push_str(text);
            }
            None => warn!("Setting text on unknown label {:?}", label),
        }
    }

    fn set_label_font(&mut self, label: LabelHandle, font: FontHandle) {
        if let Some(state) = self.labels.get_mut(&label) {
            state.font = Some(font);
        }
    }

    fn set_label_colors(&mut self, label: LabelHandle, text: Rgb565, background: Option<Rgb565>) {
        if let Some(state) = self.labels.get_mut(&label) {
            state.color = text;
            state.background = background;
        }
    }

    fn set_label_alignment(&mut self, label: LabelHandle, alignment: TextAlignment) {
        if let Some(state) = self.labels.get_mut(&label) {
            state.alignment = alignment;
        }
    }

    fn destroy_label(&mut self, label: LabelHandle) {
        if self.labels.remove(&label).is_none() {
            warn!("Destroying unknown label {:?}", label);
            return;
        }
        for state in self.layers.values_mut() {
            state.labels.retain(|&l| l != label);
        }
    }
}

impl ResourceHost for SimHost {
    fn load_font(&mut self, resource: FontResource) -> Result<FontHandle, HostError> {
        let font = FontHandle(self.allocate()?);
        self.fonts.insert(font, resource);
        Ok(font)
    }

    fn unload_font(&mut self, font: FontHandle) {
        if self.fonts.remove(&font).is_none() {
            warn!("Unloading unknown font {:?}", font);
        }
    }
}

impl TimeSource for SimHost {
    fn now(&self) -> WallClock {
        self.clock.sample()
    }
}

impl EventSource for SimHost {
    fn subscribe_ticks(&mut self, unit: TickUnit) {
        self.ticks = Some(unit);
    }

    fn unsubscribe_ticks(&mut self) {
        self.ticks = None;
    }

    fn subscribe_connectivity(&mut self) {
        self.connectivity = true;
    }

    fn unsubscribe_connectivity(&mut self) {
        self.connectivity = false;
    }

    fn peek_connectivity(&self) -> bool {
        self.connected
    }
}

impl Haptics for SimHost {
    fn double_pulse(&mut self) {
        self.pulses += 1;
        debug!("Vibe: double pulse");
    }
}
