//! Clock face controller
//!
//! Owns the face state and the host resource ledger. Host events go in
//! through [`Controller::handle`]; compositor redraw requests come back in
//! through [`Controller::draw_layer`]. Event handlers only mark layers
//! dirty, all drawing happens lazily in the redraw callback so the host
//! can coalesce repeated requests.

use crate::config::{FaceConfig, PaletteColor};
use crate::error::FaceError;
use crate::geometry::DisplayGeometry;
use crate::render::{self, HandAngles, LayerRole};
use crate::resources::{FaceResources, LabelSlot};
use crate::state::{ClockState, Event, Phase};
use crate::traits::{
    Canvas, DisplayHost, FontHandle, LabelHandle, LayerHandle, TextAlignment, TextHost,
};

/// Number of redraw passes executed per layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RenderStats {
    pub background: u32,
    pub hands: u32,
    pub foreground: u32,
}

impl RenderStats {
    /// Passes executed for `role`
    pub fn passes(&self, role: LayerRole) -> u32 {
        match role {
            LayerRole::Background => self.background,
            LayerRole::Hands => self.hands,
            LayerRole::Foreground => self.foreground,
        }
    }

    fn record(&mut self, role: LayerRole) {
        let counter = match role {
            LayerRole::Background => &mut self.background,
            LayerRole::Hands => &mut self.hands,
            LayerRole::Foreground => &mut self.foreground,
        };
        *counter = counter.saturating_add(1);
    }
}

/// Watch face controller
#[derive(Debug)]
pub struct Controller {
    /// Lifecycle phase
    phase: Phase,
    /// Resolved face configuration
    config: FaceConfig,
    /// Display geometry, known once started
    geometry: Option<DisplayGeometry>,
    /// Connectivity and day label
    state: ClockState,
    /// Everything acquired from the host
    resources: FaceResources,
    /// Redraw pass counters
    stats: RenderStats,
    /// Angles drawn by the most recent hands pass
    last_hands: Option<HandAngles>,
}

impl Controller {
    /// Create a controller; nothing is acquired until `Event::Startup`
    pub fn new(config: FaceConfig) -> Self {
        Self {
            phase: Phase::Uninitialized,
            config,
            geometry: None,
            state: ClockState::new(false),
            resources: FaceResources::new(),
            stats: RenderStats::default(),
            last_hands: None,
        }
    }

    /// Get current lifecycle phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &FaceConfig {
        &self.config
    }

    pub fn state(&self) -> &ClockState {
        &self.state
    }

    /// Display geometry, `None` until started
    pub fn geometry(&self) -> Option<DisplayGeometry> {
        self.geometry
    }

    pub fn resources(&self) -> &FaceResources {
        &self.resources
    }

    /// Layer handle for `role`, if acquired
    pub fn layer(&self, role: LayerRole) -> Option<LayerHandle> {
        self.resources.layer(role)
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Hand angles drawn by the most recent hands pass
    pub fn last_hands(&self) -> Option<HandAngles> {
        self.last_hands
    }

    /// Process a host event
    ///
    /// Events with no meaning in the current phase are ignored. A failed
    /// startup releases everything it acquired and leaves the face
    /// uninitialized.
    pub fn handle<H: DisplayHost>(&mut self, host: &mut H, event: Event) -> Result<(), FaceError> {
        if !self.phase.accepts(event) {
            warn!("Ignoring {:?} in phase {:?}", event, self.phase);
            return Ok(());
        }

        match event {
            Event::Startup => self.start(host)?,
            Event::Shutdown => self.stop(host),
            Event::Tick(_) => self.on_tick(host),
            Event::ConnectivityChanged(connected) => self.on_connectivity(host, connected),
        }

        let next = self.phase.transition(event);
        if next != self.phase {
            info!("Face phase {:?} -> {:?}", self.phase, next);
            self.phase = next;
        }
        Ok(())
    }

    /// Redraw callback for one of the face layers
    pub fn draw_layer<H: DisplayHost, C: Canvas>(
        &mut self,
        host: &mut H,
        layer: LayerHandle,
        canvas: &mut C,
    ) -> Result<(), FaceError> {
        let geometry = match (self.phase, self.geometry) {
            (Phase::Active, Some(geometry)) => geometry,
            _ => return Err(FaceError::NotActive),
        };
        let role = self
            .resources
            .role_of(layer)
            .ok_or(FaceError::UnknownLayer(layer))?;

        match role {
            LayerRole::Background => {
                let bounds = host.layer_bounds(layer)?;
                render::draw_background(canvas, bounds, &geometry, &self.config)?;
            }
            LayerRole::Hands => {
                // One sample for every hand in this pass
                let now = host.now();
                let angles = render::draw_hands(canvas, &geometry, &self.config, &now)?;
                self.last_hands = Some(angles);

                self.publish_glyph(host);
                self.state.day.set_day(now.day);
                if let Some(label) = self.resources.label(LabelSlot::Day) {
                    host.set_label_text(label, self.state.day.as_str());
                }
            }
            LayerRole::Foreground => {
                render::draw_foreground(canvas, &geometry, &self.config)?;
                self.publish_glyph(host);
            }
        }

        self.stats.record(role);
        trace!("Drew {:?} layer", role);
        Ok(())
    }

    fn start<H: DisplayHost>(&mut self, host: &mut H) -> Result<(), FaceError> {
        if let Err(err) = self.acquire(host) {
            warn!("Face startup failed: {:?}", err);
            self.resources.release(host);
            self.geometry = None;
            return Err(err);
        }
        Ok(())
    }

    fn acquire<H: DisplayHost>(&mut self, host: &mut H) -> Result<(), FaceError> {
        let window = self.resources.acquire_window(host)?;
        let root = host.root_layer(window)?;
        let bounds = host.layer_bounds(root)?;
        let geometry = DisplayGeometry::from_bounds(bounds);
        debug!(
            "Display {}x{}, center ({}, {})",
            bounds.size.width,
            bounds.size.height,
            geometry.center().x,
            geometry.center().y
        );

        self.resources
            .acquire_layer(host, LayerRole::Background, root, bounds)?;
        self.resources
            .acquire_layer(host, LayerRole::Hands, root, bounds)?;
        let foreground = self
            .resources
            .acquire_layer(host, LayerRole::Foreground, root, bounds)?;

        let day_font = self
            .resources
            .acquire_font(host, LabelSlot::Day, self.config.day_font)?;
        let glyph_font = self
            .resources
            .acquire_font(host, LabelSlot::Glyph, self.config.glyph_font)?;

        let day = self.resources.acquire_label(
            host,
            LabelSlot::Day,
            foreground,
            self.config.labels.day.to_rectangle(),
        )?;
        style_label(host, day, day_font, self.config.palette.day_text);
        host.set_label_text(day, self.state.day.as_str());

        let glyph = self.resources.acquire_label(
            host,
            LabelSlot::Glyph,
            foreground,
            self.config.labels.glyph.to_rectangle(),
        )?;
        style_label(host, glyph, glyph_font, self.config.palette.glyph_text);

        host.push_window(window, true)?;

        self.resources.subscribe_ticks(host, self.config.tick_unit);
        self.resources.subscribe_connectivity(host);

        // Initial status is not a transition: no pulse
        self.state.connected = host.peek_connectivity();
        self.publish_glyph(host);
        self.geometry = Some(geometry);

        info!("Face started, connected: {}", self.state.connected);
        Ok(())
    }

    fn stop<H: DisplayHost>(&mut self, host: &mut H) {
        self.resources.release(host);
        self.geometry = None;
        info!("Face torn down");
    }

    fn on_tick<H: DisplayHost>(&mut self, host: &mut H) {
        if let Some(hands) = self.resources.layer(LayerRole::Hands) {
            host.mark_dirty(hands);
        }
    }

    fn on_connectivity<H: DisplayHost>(&mut self, host: &mut H, connected: bool) {
        if self.state.set_connected(connected) {
            info!("Companion disconnected");
            host.double_pulse();
        } else {
            debug!("Connectivity: {}", connected);
        }

        if let Some(foreground) = self.resources.layer(LayerRole::Foreground) {
            host.mark_dirty(foreground);
        }
    }

    fn publish_glyph<H: TextHost>(&self, host: &mut H) {
        if let Some(label) = self.resources.label(LabelSlot::Glyph) {
            host.set_label_text(label, render::glyph_text(self.state.connected, &self.config));
        }
    }
}

fn style_label<H: TextHost>(host: &mut H, label: LabelHandle, font: FontHandle, color: PaletteColor) {
    host.set_label_font(label, font);
    host.set_label_colors(label, color.to_rgb565(), None);
    host.set_label_alignment(label, TextAlignment::Center);
}
