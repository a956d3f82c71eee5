//! Board-agnostic core logic for the Bullseye watch face
//!
//! This crate contains everything that does not depend on a specific
//! display host:
//!
//! - Polar geometry (angle + radius to display coordinates)
//! - Per-platform face configuration
//! - Clock state and the face lifecycle state machine
//! - Host collaborator traits (canvas, layers, labels, events, haptics)
//! - Background, foreground and hands renderers
//! - The clock face controller that ties them together

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

#[cfg(test)]
mod mock;

pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod render;
pub mod resources;
pub mod state;
pub mod traits;

pub use controller::{Controller, RenderStats};
pub use error::FaceError;
pub use geometry::{DisplayGeometry, TrigAngle};
