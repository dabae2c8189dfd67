/// ASCII conversion engine for pixglyph.
///
/// Converts scaled pixel frames to character grids.
pub mod luminance;

pub use luminance::{LuminanceQuantizer, quantize};
