use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgba};
use pg_core::error::CoreError;
use pg_core::frame::{Dimensions, FrameBuffer};

/// Numerator of the character-cell aspect correction.
pub const CELL_ASPECT_NUM: u64 = 10;
/// Denominator of the character-cell aspect correction.
///
/// A monospace cell is about 2.3 times taller than wide, so rows are
/// scaled by 10/23 to keep the source proportions.
pub const CELL_ASPECT_DEN: u64 = 23;

/// Grid dimensions for a source image at a target width.
///
/// `height = floor(src_h × width × 10 / (src_w × 23))`.
///
/// # Errors
/// Returns [`CoreError::InvalidDimensions`] if any input is zero or the
/// derived height is zero. Nothing is clamped.
///
/// # Example
/// ```
/// use pg_source::resize::scaled_dimensions;
/// let dims = scaled_dimensions(230, 100, 23).unwrap();
/// assert_eq!((dims.width, dims.height), (23, 10));
/// assert!(scaled_dimensions(230, 100, 0).is_err());
/// ```
pub fn scaled_dimensions(src_w: u32, src_h: u32, width: u32) -> Result<Dimensions, CoreError> {
    if src_w == 0 || src_h == 0 || width == 0 {
        return Err(CoreError::dimensions(width, 0));
    }
    let height = u64::from(src_h) * u64::from(width) * CELL_ASPECT_NUM
        / (u64::from(src_w) * CELL_ASPECT_DEN);
    let height = u32::try_from(height).map_err(|_| CoreError::dimensions(width, u32::MAX))?;
    Dimensions::new(width, height)
}

/// Resizer réutilisable wrappant `image::imageops`.
///
/// # Example
/// ```
/// use pg_source::resize::Resizer;
/// let r = Resizer::new();
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Resizer {
    filter: FilterType,
}

impl Resizer {
    /// Resizer using a Lanczos3 kernel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            filter: FilterType::Lanczos3,
        }
    }

    /// Resize `src` into `dst`. Dimensions of `dst` determine output size.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if either buffer is empty or
    /// its data length does not match its dimensions.
    ///
    /// # Example
    /// ```
    /// use pg_source::resize::Resizer;
    /// use pg_core::frame::FrameBuffer;
    /// let r = Resizer::new();
    /// let src = FrameBuffer::new(100, 100);
    /// let mut dst = FrameBuffer::new(50, 50);
    /// r.resize_into(&src, &mut dst).unwrap();
    /// ```
    pub fn resize_into(&self, src: &FrameBuffer, dst: &mut FrameBuffer) -> Result<(), CoreError> {
        if dst.width == 0 || dst.height == 0 {
            return Err(CoreError::dimensions(dst.width, dst.height));
        }
        if src.width == 0 || src.height == 0 {
            return Err(CoreError::dimensions(src.width, src.height));
        }

        let view: ImageBuffer<Rgba<u8>, &[u8]> =
            ImageBuffer::from_raw(src.width, src.height, src.data.as_slice())
                .ok_or_else(|| CoreError::dimensions(src.width, src.height))?;
        if src.width == dst.width && src.height == dst.height {
            dst.data.clone_from(&src.data);
            return Ok(());
        }

        let resized = imageops::resize(&view, dst.width, dst.height, self.filter);
        dst.data = resized.into_raw();
        Ok(())
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Scale `src` to `width` columns with aspect correction.
///
/// Returns the resized frame and the dimensions actually used.
///
/// # Errors
/// Returns [`CoreError::InvalidDimensions`] for a zero width, an empty source,
/// or a derived height of zero.
///
/// # Example
/// ```
/// use pg_source::resize::scale_image;
/// use pg_core::frame::FrameBuffer;
/// let src = FrameBuffer::filled(230, 100, (128, 128, 128));
/// let (scaled, dims) = scale_image(&src, 23).unwrap();
/// assert_eq!(scaled.dimensions(), (23, 10));
/// assert_eq!(dims.height, 10);
/// ```
pub fn scale_image(src: &FrameBuffer, width: u32) -> Result<(FrameBuffer, Dimensions), CoreError> {
    let dims = scaled_dimensions(src.width, src.height, width)?;
    let mut dst = FrameBuffer::new(dims.width, dims.height);
    Resizer::new().resize_into(src, &mut dst)?;
    log::debug!(
        "Mise à l'échelle {}×{} → {dims}",
        src.width,
        src.height
    );
    Ok((dst, dims))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_formula_matches_integer_floor() {
        let cases = [
            (230, 100, 23),
            (640, 480, 120),
            (1920, 1080, 120),
            (100, 1000, 7),
            (3, 7, 5),
        ];
        for (w0, h0, w) in cases {
            let dims = scaled_dimensions(w0, h0, w).unwrap();
            let expected = (u64::from(h0) * u64::from(w) * 10 / (u64::from(w0) * 23)) as u32;
            assert_eq!(dims.height, expected, "{w0}×{h0} @ {w}");
            assert_eq!(dims.width, w);
        }
    }

    #[test]
    fn reference_scenario() {
        let dims = scaled_dimensions(230, 100, 23).unwrap();
        assert_eq!(dims, Dimensions { width: 23, height: 10 });
    }

    #[test]
    fn zero_target_width_fails() {
        assert!(matches!(
            scaled_dimensions(230, 100, 0),
            Err(CoreError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn zero_source_width_fails() {
        assert!(matches!(
            scaled_dimensions(0, 100, 23),
            Err(CoreError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn zero_derived_height_fails() {
        // 1000×1 at width 10: 1×10×10 / (1000×23) = 0
        assert!(matches!(
            scaled_dimensions(1000, 1, 10),
            Err(CoreError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn large_inputs_do_not_overflow() {
        let dims = scaled_dimensions(u32::MAX, u32::MAX, 1000).unwrap();
        assert_eq!(dims.height, 434);
    }

    #[test]
    fn scaled_frame_reports_requested_dimensions() {
        let src = FrameBuffer::filled(640, 480, (10, 20, 30));
        let (scaled, dims) = scale_image(&src, 120).unwrap();
        assert_eq!(scaled.dimensions(), (dims.width, dims.height));
        assert_eq!(scaled.data.len(), (dims.width * dims.height * 4) as usize);
    }

    #[test]
    fn uniform_source_stays_uniform() {
        let src = FrameBuffer::filled(200, 200, (128, 128, 128));
        let (scaled, _) = scale_image(&src, 40).unwrap();
        for y in 0..scaled.height {
            for x in 0..scaled.width {
                assert_eq!(scaled.luminance(x, y), 128);
            }
        }
    }

    #[test]
    fn scale_zero_width_produces_nothing() {
        let src = FrameBuffer::filled(10, 10, (0, 0, 0));
        assert!(scale_image(&src, 0).is_err());
    }
}
