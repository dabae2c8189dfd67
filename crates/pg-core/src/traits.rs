use crate::error::CoreError;
use crate::frame::{AsciiGrid, Dimensions, FrameBuffer};

/// Transforme une frame pixel déjà mise à l'échelle en une grille ASCII.
///
/// # Example
/// ```
/// use pg_core::traits::Quantizer;
/// use pg_core::frame::{AsciiGrid, Dimensions, FrameBuffer};
/// use pg_core::CoreError;
///
/// struct Blank;
/// impl Quantizer for Blank {
///     fn quantize(&self, _input: &FrameBuffer, dims: Dimensions) -> Result<AsciiGrid, CoreError> {
///         Ok(AsciiGrid::new(dims.width))
///     }
///     fn name(&self) -> &'static str { "blank" }
/// }
/// ```
pub trait Quantizer: Send + Sync {
    /// Map every pixel of `input` to exactly one glyph.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if `dims` does not describe `input`.
    fn quantize(&self, input: &FrameBuffer, dims: Dimensions) -> Result<AsciiGrid, CoreError>;

    /// Nom lisible pour le debug.
    fn name(&self) -> &'static str;
}
