//! Host resource ledger
//!
//! Records every handle and subscription the face acquires so that
//! shutdown, and a failed startup, release exactly what was taken in
//! reverse order.

use embedded_graphics_core::primitives::Rectangle;

use crate::config::{FontResource, TickUnit};
use crate::render::LayerRole;
use crate::traits::{
    DisplayHost, EventSource, FontHandle, HostError, LabelHandle, LayerHandle, LayerHost,
    ResourceHost, TextHost, WindowHandle, WindowHost,
};

/// Text label owned by the face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LabelSlot {
    /// Day-of-month
    Day,
    /// Connectivity glyph
    Glyph,
}

impl LabelSlot {
    pub const ALL: [LabelSlot; 2] = [LabelSlot::Day, LabelSlot::Glyph];

    const fn index(self) -> usize {
        match self {
            LabelSlot::Day => 0,
            LabelSlot::Glyph => 1,
        }
    }
}

/// Handles and subscriptions held by the face
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaceResources {
    window: Option<WindowHandle>,
    layers: [Option<LayerHandle>; 3],
    labels: [Option<LabelHandle>; 2],
    fonts: [Option<FontHandle>; 2],
    ticks: bool,
    connectivity: bool,
}

impl FaceResources {
    pub const fn new() -> Self {
        Self {
            window: None,
            layers: [None; 3],
            labels: [None; 2],
            fonts: [None; 2],
            ticks: false,
            connectivity: false,
        }
    }

    /// Create the face window
    pub fn acquire_window<H: WindowHost>(&mut self, host: &mut H) -> Result<WindowHandle, HostError> {
        let window = host.create_window()?;
        self.window = Some(window);
        Ok(window)
    }

    /// Create the layer for `role` and stack it on `parent`
    ///
    /// Layers must be acquired bottom to top.
    pub fn acquire_layer<H: LayerHost>(
        &mut self,
        host: &mut H,
        role: LayerRole,
        parent: LayerHandle,
        frame: Rectangle,
    ) -> Result<LayerHandle, HostError> {
        let layer = host.create_layer(frame)?;
        self.layers[role.z_index()] = Some(layer);
        host.add_child(parent, layer)?;
        Ok(layer)
    }

    /// Load the font used by `slot`
    pub fn acquire_font<H: ResourceHost>(
        &mut self,
        host: &mut H,
        slot: LabelSlot,
        resource: FontResource,
    ) -> Result<FontHandle, HostError> {
        let font = host.load_font(resource)?;
        self.fonts[slot.index()] = Some(font);
        Ok(font)
    }

    /// Create the label for `slot` and attach it to `parent`
    pub fn acquire_label<H: TextHost>(
        &mut self,
        host: &mut H,
        slot: LabelSlot,
        parent: LayerHandle,
        frame: Rectangle,
    ) -> Result<LabelHandle, HostError> {
        let label = host.create_label(frame)?;
        self.labels[slot.index()] = Some(label);
        host.attach_label(parent, label)?;
        Ok(label)
    }

    /// Subscribe to ticks at `unit` granularity
    pub fn subscribe_ticks<H: EventSource>(&mut self, host: &mut H, unit: TickUnit) {
        host.subscribe_ticks(unit);
        self.ticks = true;
    }

    /// Subscribe to connectivity changes
    pub fn subscribe_connectivity<H: EventSource>(&mut self, host: &mut H) {
        host.subscribe_connectivity();
        self.connectivity = true;
    }

    pub fn window(&self) -> Option<WindowHandle> {
        self.window
    }

    pub fn layer(&self, role: LayerRole) -> Option<LayerHandle> {
        self.layers[role.z_index()]
    }

    pub fn label(&self, slot: LabelSlot) -> Option<LabelHandle> {
        self.labels[slot.index()]
    }

    pub fn font(&self, slot: LabelSlot) -> Option<FontHandle> {
        self.fonts[slot.index()]
    }

    /// Role of an owned layer
    pub fn role_of(&self, layer: LayerHandle) -> Option<LayerRole> {
        LayerRole::ALL
            .into_iter()
            .find(|role| self.layers[role.z_index()] == Some(layer))
    }

    /// Number of handles and subscriptions currently held
    pub fn held(&self) -> usize {
        let handles = usize::from(self.window.is_some())
            + self.layers.iter().flatten().count()
            + self.labels.iter().flatten().count()
            + self.fonts.iter().flatten().count();
        handles + usize::from(self.ticks) + usize::from(self.connectivity)
    }

    /// Check if nothing is held
    pub fn is_empty(&self) -> bool {
        self.held() == 0
    }

    /// Release everything held, in reverse acquisition order
    pub fn release<H: DisplayHost>(&mut self, host: &mut H) {
        debug!("Releasing {} face resources", self.held());

        if core::mem::take(&mut self.connectivity) {
            host.unsubscribe_connectivity();
        }
        if core::mem::take(&mut self.ticks) {
            host.unsubscribe_ticks();
        }

        for slot in LabelSlot::ALL.into_iter().rev() {
            if let Some(label) = self.labels[slot.index()].take() {
                host.destroy_label(label);
            }
        }
        for slot in LabelSlot::ALL.into_iter().rev() {
            if let Some(font) = self.fonts[slot.index()].take() {
                host.unload_font(font);
            }
        }
        for role in LayerRole::ALL.into_iter().rev() {
            if let Some(layer) = self.layers[role.z_index()].take() {
                host.destroy_layer(layer);
            }
        }
        if let Some(window) = self.window.take() {
            host.destroy_window(window);
        }
    }
}
