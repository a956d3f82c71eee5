//! Event loop driver
//!
//! Pairs a `Controller` with a `SimHost` and plays the host's role: it
//! delivers events, runs the compositor's redraw pass over dirty layers
//! and composites the result into a frame buffer.

use bullseye_core::config::FaceConfig;
use bullseye_core::render::LayerRole;
use bullseye_core::state::{Event, WallClock};
use bullseye_core::traits::LayerHandle;
use bullseye_core::{Controller, FaceError};
use bullseye_display::{FrameBuffer, FrameBufferError};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::Point;
use log::{debug, info};

use crate::draw_list::DrawList;
use crate::host::{ClockSource, SimHost};

/// Simulator errors
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("face error: {0}")]
    Face(#[from] FaceError),
    #[error("frame buffer error: {0:?}")]
    FrameBuffer(FrameBufferError),
    #[error("compositing failed: {0}")]
    Composite(bullseye_core::traits::CanvasError),
}

/// Outcome of one compositor pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Layers whose redraw callback ran, bottom to top
    pub redrawn: Vec<LayerHandle>,
}

/// Face running on a simulated host
#[derive(Debug)]
pub struct Simulator {
    face: Controller,
    host: SimHost,
    pixels: Vec<u16>,
    frames: u64,
}

impl Simulator {
    /// Create a simulator for `config`'s platform
    pub fn new(config: FaceConfig, clock: ClockSource) -> Self {
        let bounds = config.platform.bounds();
        let len = (bounds.size.width * bounds.size.height) as usize;
        Self {
            face: Controller::new(config),
            host: SimHost::new(bounds, clock),
            pixels: vec![0; len],
            frames: 0,
        }
    }

    pub fn face(&self) -> &Controller {
        &self.face
    }

    pub fn host(&self) -> &SimHost {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut SimHost {
        &mut self.host
    }

    /// Frames composited so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Deliver `Event::Startup`
    pub fn start(&mut self) -> Result<(), SimError> {
        self.face.handle(&mut self.host, Event::Startup)?;
        Ok(())
    }

    /// Deliver `Event::Shutdown`
    pub fn shutdown(&mut self) -> Result<(), SimError> {
        self.face.handle(&mut self.host, Event::Shutdown)?;
        Ok(())
    }

    /// Deliver one tick, if the face is subscribed to ticks
    pub fn tick(&mut self) -> Result<(), SimError> {
        if let Some(unit) = self.host.tick_subscription() {
            self.face.handle(&mut self.host, Event::Tick(unit))?;
        }
        Ok(())
    }

    /// Change the companion link state and notify a subscribed face
    pub fn set_connected(&mut self, connected: bool) -> Result<(), SimError> {
        self.host.set_connected(connected);
        if self.host.connectivity_subscribed() {
            self.face
                .handle(&mut self.host, Event::ConnectivityChanged(connected))?;
        }
        Ok(())
    }

    /// Pin the host clock to `time`
    pub fn set_time(&mut self, time: WallClock) {
        self.host.set_clock(ClockSource::Fixed(time));
    }

    /// Run the redraw callbacks of dirty layers, then composite a frame
    ///
    /// A layer stays dirty until its callback succeeds, so a failed pass
    /// leaves the remaining layers queued for the next frame.
    pub fn render_frame(&mut self) -> Result<FrameReport, SimError> {
        let redrawn = self.host.dirty_layers();
        for &layer in &redrawn {
            let mut list = DrawList::new();
            self.face.draw_layer(&mut self.host, layer, &mut list)?;
            self.host.store_draw_list(layer, list);
        }

        let size = self.host.bounds().size;
        let mut fb = FrameBuffer::new(&mut self.pixels, size.width, size.height)
            .map_err(SimError::FrameBuffer)?;
        self.host.composite(&mut fb).map_err(SimError::Composite)?;

        self.frames += 1;
        debug!("Frame {}: redrew {} layer(s)", self.frames, redrawn.len());
        Ok(FrameReport { redrawn })
    }

    /// Colour of the last composited frame at `point`
    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        let size = self.host.bounds().size;
        if point.x < 0 || point.y < 0 {
            return None;
        }
        let (x, y) = (point.x as u32, point.y as u32);
        if x >= size.width || y >= size.height {
            return None;
        }
        let raw = self.pixels[(y * size.width + x) as usize];
        Some(Rgb565::from(embedded_graphics::pixelcolor::raw::RawU16::new(raw)))
    }

    /// Raw RGB565 pixels of the last composited frame
    pub fn raw_pixels(&self) -> &[u16] {
        &self.pixels
    }

    /// Role of a face layer handle
    pub fn role_of(&self, layer: LayerHandle) -> Option<LayerRole> {
        self.face.resources().role_of(layer)
    }

    /// Log a one-line summary of the face state
    pub fn log_summary(&self) {
        let stats = self.face.stats();
        info!(
            "phase {:?}, connected {}, day '{}', passes bg/hands/fg {}/{}/{}",
            self.face.phase(),
            self.face.state().connected,
            self.face.state().day.as_str(),
            stats.background,
            stats.hands,
            stats.foreground
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bullseye_core::config::{PaletteColor, Platform, TickUnit, DISCONNECT_GLYPH};
    use bullseye_core::resources::LabelSlot;
    use bullseye_core::state::Phase;
    use bullseye_core::traits::{HostError, LayerHost};

    use crate::draw_list::DrawCommand;

    fn simulator() -> Simulator {
        Simulator::new(
            FaceConfig::for_platform(&Platform::RECTANGULAR),
            ClockSource::Fixed(WallClock::new(3, 30, 45, 7)),
        )
    }

    fn layer(sim: &Simulator, role: LayerRole) -> LayerHandle {
        sim.face().layer(role).unwrap()
    }

    fn label_text(sim: &Simulator, slot: LabelSlot) -> String {
        let label = sim.face().resources().label(slot).unwrap();
        sim.host().label_text(label).unwrap().to_string()
    }

    #[test]
    fn test_first_frame_draws_every_layer() {
        let mut sim = simulator();
        sim.start().unwrap();

        let report = sim.render_frame().unwrap();
        let expected: Vec<_> = LayerRole::ALL.iter().map(|&role| layer(&sim, role)).collect();
        assert_eq!(report.redrawn, expected);

        // Nothing changed since
        assert!(sim.render_frame().unwrap().redrawn.is_empty());
        assert_eq!(sim.frames(), 2);
    }

    #[test]
    fn test_end_to_end_half_past_three() {
        let mut sim = simulator();
        sim.start().unwrap();
        sim.render_frame().unwrap();

        let angles = sim.face().last_hands().unwrap();
        assert_eq!(angles.hour.degrees(), 90.0);
        assert_eq!(angles.minute.degrees(), 180.0);
        assert_eq!(angles.second.degrees(), 270.0);
        assert_eq!(label_text(&sim, LabelSlot::Day), "7");
        assert_eq!(label_text(&sim, LabelSlot::Glyph), "");

        assert_eq!(
            sim.pixel(Point::new(2, 2)),
            Some(PaletteColor::VIVID_CERULEAN.to_rgb565())
        );
        assert_eq!(
            sim.pixel(Point::new(72, 34)),
            Some(PaletteColor::RED.to_rgb565())
        );
        // Hour hand pointing at 3 o'clock
        assert_eq!(
            sim.pixel(Point::new(100, 84)),
            Some(PaletteColor::WHITE.to_rgb565())
        );
    }

    #[test]
    fn test_failed_redraw_keeps_later_layers_dirty() {
        let mut sim = simulator();
        sim.start().unwrap();

        // A layer the face does not own, stacked between background and hands
        let background = layer(&sim, LayerRole::Background);
        let bounds = sim.host.bounds();
        let stray = sim.host.create_layer(bounds).unwrap();
        sim.host.add_child(background, stray).unwrap();

        let err = sim.render_frame().unwrap_err();
        assert!(matches!(
            err,
            SimError::Face(FaceError::UnknownLayer(handle)) if handle == stray
        ));
        assert!(!sim.host().is_dirty(background));
        assert!(sim.host().is_dirty(stray));
        assert!(sim.host().is_dirty(layer(&sim, LayerRole::Hands)));
        assert!(sim.host().is_dirty(layer(&sim, LayerRole::Foreground)));

        sim.host.destroy_layer(stray);
        let report = sim.render_frame().unwrap();
        assert_eq!(
            report.redrawn,
            [layer(&sim, LayerRole::Hands), layer(&sim, LayerRole::Foreground)]
        );
    }

    #[test]
    fn test_ticks_coalesce_into_one_hands_pass() {
        let mut sim = simulator();
        sim.start().unwrap();
        sim.render_frame().unwrap();
        assert_eq!(sim.face().stats().hands, 1);

        for second in 0..5 {
            sim.set_time(WallClock::new(9, 0, second, 7));
            sim.tick().unwrap();
        }
        sim.set_time(WallClock::new(9, 0, 45, 7));

        let report = sim.render_frame().unwrap();

        assert_eq!(report.redrawn, [layer(&sim, LayerRole::Hands)]);
        assert_eq!(sim.face().stats().hands, 2);
        assert_eq!(sim.face().stats().background, 1);
        assert_eq!(sim.face().stats().foreground, 1);
        // Time sampled at redraw, not at any of the ticks
        assert_eq!(sim.face().last_hands().unwrap().second.degrees(), 270.0);
    }

    #[test]
    fn test_disconnect_alerts_once() {
        let mut sim = simulator();
        sim.start().unwrap();
        sim.render_frame().unwrap();

        sim.set_connected(false).unwrap();
        assert_eq!(sim.host().pulses(), 1);

        let report = sim.render_frame().unwrap();
        assert_eq!(report.redrawn, [layer(&sim, LayerRole::Foreground)]);
        assert_eq!(label_text(&sim, LabelSlot::Glyph), DISCONNECT_GLYPH);

        // Still disconnected on later ticks and repeated reports
        for _ in 0..3 {
            sim.tick().unwrap();
            sim.render_frame().unwrap();
        }
        sim.set_connected(false).unwrap();
        assert_eq!(sim.host().pulses(), 1);
        assert_eq!(label_text(&sim, LabelSlot::Glyph), DISCONNECT_GLYPH);

        sim.set_connected(true).unwrap();
        sim.render_frame().unwrap();
        assert_eq!(sim.host().pulses(), 1);
        assert_eq!(label_text(&sim, LabelSlot::Glyph), "");
    }

    #[test]
    fn test_start_disconnected_shows_glyph_without_alert() {
        let mut sim = simulator();
        sim.host_mut().set_connected(false);
        sim.start().unwrap();
        sim.render_frame().unwrap();

        assert_eq!(label_text(&sim, LabelSlot::Glyph), DISCONNECT_GLYPH);
        assert_eq!(sim.host().pulses(), 0);
    }

    #[test]
    fn test_teardown_releases_everything() {
        let mut sim = simulator();
        sim.start().unwrap();
        sim.render_frame().unwrap();
        assert!(sim.host().live_resources() > 0);

        sim.shutdown().unwrap();

        assert_eq!(sim.face().phase(), Phase::TornDown);
        assert_eq!(sim.host().live_resources(), 0);
        assert_eq!(sim.host().tick_subscription(), None);
        assert!(!sim.host().connectivity_subscribed());

        sim.tick().unwrap();
        assert!(sim.render_frame().unwrap().redrawn.is_empty());
    }

    #[test]
    fn test_failed_startup_leaks_nothing() {
        // window, three layers, two fonts, two labels
        for budget in 0..8 {
            let mut sim = simulator();
            sim.host_mut().fail_allocation_after(budget);

            let result = sim.start();

            assert!(matches!(
                result,
                Err(SimError::Face(FaceError::Host(HostError::OutOfResources)))
            ));
            assert_eq!(sim.face().phase(), Phase::Uninitialized);
            assert_eq!(sim.host().live_resources(), 0, "budget {}", budget);
        }
    }

    #[test]
    fn test_minute_ticks_keep_second_dot() {
        let config = FaceConfig {
            tick_unit: TickUnit::Minute,
            ..FaceConfig::for_platform(&Platform::ROUND)
        };
        let mut sim = Simulator::new(config, ClockSource::Fixed(WallClock::new(10, 8, 30, 15)));
        sim.start().unwrap();
        sim.render_frame().unwrap();

        assert_eq!(sim.host().tick_subscription(), Some(TickUnit::Minute));
        let hands = sim.host().layer_content(layer(&sim, LayerRole::Hands)).unwrap();
        assert_eq!(hands.primitives(), 3);
        assert!(matches!(
            hands.commands().last(),
            Some(DrawCommand::FillCircle { .. })
        ));
        assert_eq!(label_text(&sim, LabelSlot::Day), "15");
    }
}
