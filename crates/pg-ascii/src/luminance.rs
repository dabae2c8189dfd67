use pg_core::charset::Ramp;
use pg_core::error::CoreError;
use pg_core::frame::{AsciiGrid, Dimensions, FrameBuffer};
use pg_core::traits::Quantizer;

/// Luminance quantizer over the fixed 16-glyph ramp.
///
/// # Example
/// ```
/// use pg_core::frame::{Dimensions, FrameBuffer};
/// use pg_core::traits::Quantizer;
/// use pg_ascii::luminance::LuminanceQuantizer;
///
/// let frame = FrameBuffer::filled(4, 2, (0, 0, 0));
/// let dims = Dimensions::new(4, 2).unwrap();
/// let grid = LuminanceQuantizer::default().quantize(&frame, dims).unwrap();
/// assert_eq!(grid.to_text(), "MMMM\nMMMM\n");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct LuminanceQuantizer {
    ramp: &'static Ramp,
}

impl LuminanceQuantizer {
    /// Quantizer over `ramp`.
    #[must_use]
    pub fn new(ramp: &'static Ramp) -> Self {
        Self { ramp }
    }
}

impl Default for LuminanceQuantizer {
    fn default() -> Self {
        Self::new(Ramp::standard())
    }
}

impl Quantizer for LuminanceQuantizer {
    fn quantize(&self, input: &FrameBuffer, dims: Dimensions) -> Result<AsciiGrid, CoreError> {
        if input.width != dims.width || input.height != dims.height {
            return Err(CoreError::dimensions(input.width, input.height));
        }

        let mut grid = AsciiGrid::with_capacity(dims);
        let mut row = String::with_capacity(dims.width as usize);
        for y in 0..dims.height {
            row.clear();
            for x in 0..dims.width {
                row.push(self.ramp.glyph(input.luminance(x, y)));
            }
            grid.push_row(row.clone())?;
        }

        log::debug!("Quantification : {} lignes × {} colonnes", grid.height(), grid.width());
        Ok(grid)
    }

    fn name(&self) -> &'static str {
        "luminance"
    }
}

/// Map each pixel of a scaled frame to one ramp glyph, row-major.
///
/// # Errors
/// Returns [`CoreError::InvalidDimensions`] if `dims` does not match `frame`.
///
/// # Example
/// ```
/// use pg_core::frame::{Dimensions, FrameBuffer};
/// use pg_ascii::luminance::quantize;
///
/// let frame = FrameBuffer::filled(3, 1, (255, 255, 255));
/// let grid = quantize(&frame, Dimensions::new(3, 1).unwrap()).unwrap();
/// assert_eq!(grid.to_text(), "...\n");
/// ```
pub fn quantize(frame: &FrameBuffer, dims: Dimensions) -> Result<AsciiGrid, CoreError> {
    LuminanceQuantizer::default().quantize(frame, dims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32) -> FrameBuffer {
        let mut fb = FrameBuffer::new(width, 1);
        for x in 0..width {
            let v = (x * 255 / (width - 1)) as u8;
            let idx = (x * 4) as usize;
            fb.data[idx..idx + 4].copy_from_slice(&[v, v, v, 255]);
        }
        fb
    }

    #[test]
    fn grid_shape_matches_dimensions() {
        let frame = FrameBuffer::filled(23, 10, (90, 120, 40));
        let grid = quantize(&frame, Dimensions::new(23, 10).unwrap()).unwrap();
        assert_eq!(grid.height(), 10);
        assert!(grid.rows().iter().all(|r| r.chars().count() == 23));
        assert_eq!(grid.to_text().lines().count(), 10);
    }

    #[test]
    fn uniform_mid_gray_is_one_glyph() {
        let frame = FrameBuffer::filled(16, 8, (128, 128, 128));
        let grid = quantize(&frame, Dimensions::new(16, 8).unwrap()).unwrap();
        let expected = Ramp::standard().glyph(128);
        assert_eq!(expected, 'I');
        assert!(grid.rows().iter().all(|r| r.chars().all(|c| c == expected)));
    }

    #[test]
    fn gradient_uses_only_ramp_glyphs_in_order() {
        let frame = gradient(256);
        let grid = quantize(&frame, Dimensions::new(256, 1).unwrap()).unwrap();
        let row: Vec<char> = grid.rows()[0].chars().collect();
        assert_eq!(row[0], 'M');
        assert_eq!(row[255], '.');
        let ramp = Ramp::standard();
        let mut prev = 0;
        for ch in row {
            assert!(ramp.contains(ch));
            let idx = ramp.glyphs().iter().position(|&g| g == ch).unwrap();
            assert!(idx >= prev);
            prev = idx;
        }
    }

    #[test]
    fn mismatched_dimensions_rejected() {
        let frame = FrameBuffer::filled(4, 4, (0, 0, 0));
        let err = quantize(&frame, Dimensions::new(5, 4).unwrap()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidDimensions { .. }));
    }

    #[test]
    fn text_has_one_line_break_per_row() {
        let frame = FrameBuffer::filled(2, 3, (255, 255, 255));
        let grid = quantize(&frame, Dimensions::new(2, 3).unwrap()).unwrap();
        assert_eq!(grid.to_text(), "..\n..\n..\n");
    }
}
