//! Shared types, errors and configuration for pixglyph.
//!
//! This crate contains the pixel buffer, the character grid, the luminance
//! ramp and the configuration records used across the workspace.

pub mod charset;
pub mod config;
pub mod error;
pub mod frame;
pub mod traits;

pub use charset::Ramp;
pub use config::{ConvertConfig, Hinting, PixglyphConfig, RasterConfig};
pub use error::CoreError;
pub use frame::{AsciiGrid, Dimensions, FrameBuffer};
