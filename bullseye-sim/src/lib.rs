//! Desktop host for the Bullseye watch face
//!
//! Runs the face controller against an in-process display host so the
//! whole lifecycle can be exercised and inspected without a watch:
//!
//! - `host`: window stack, layer tree, labels, fonts, clock, subscriptions
//! - `draw_list`: retained per-layer drawing
//! - `simulator`: event delivery and the compositor loop
//! - `config`: TOML overrides for the face configuration

pub mod config;
pub mod draw_list;
pub mod host;
pub mod simulator;

pub use config::{dump_face_config, load_face_config, parse_face_config, ConfigError};
pub use draw_list::{DrawCommand, DrawList};
pub use host::{ClockSource, SimHost};
pub use simulator::{FrameReport, SimError, Simulator};
