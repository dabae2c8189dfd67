//! Export side of pixglyph: embedded typeface, ASCII rasterization, PNG output.

pub mod assets;
pub mod encode;
pub mod rasterizer;

pub use encode::{encode_png, save_image};
pub use rasterizer::{Rasterizer, split_rows, text_to_image};
