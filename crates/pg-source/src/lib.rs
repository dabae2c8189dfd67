//! Image sources for pixglyph: decoding and aspect-corrected scaling.

pub mod image;
pub mod resize;
