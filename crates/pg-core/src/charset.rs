/// Ramp as historically published: 17 glyphs, the trailing `.` doubled.
///
/// Only kept to document the discrepancy; conversions use [`RAMP`].
pub const RAMP_LITERAL: &str = "MND8OZ$7I?+=~:,..";

/// 16 glyphs, darkest representation first.
pub const RAMP: &str = "MND8OZ$7I?+=~:,.";

/// Number of luminance buckets.
pub const BUCKETS: usize = 16;

/// Fixed 16-glyph luminance ramp.
///
/// Maps a luminance value [0..255] to one of 16 equal-width buckets, then to
/// the glyph at that index.
///
/// # Example
/// ```
/// use pg_core::charset::Ramp;
/// let ramp = Ramp::standard();
/// assert_eq!(ramp.glyph(0), 'M');
/// assert_eq!(ramp.glyph(255), '.');
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Ramp {
    glyphs: [char; BUCKETS],
}

static STANDARD: Ramp = Ramp {
    glyphs: [
        'M', 'N', 'D', '8', 'O', 'Z', '$', '7', 'I', '?', '+', '=', '~', ':', ',', '.',
    ],
};

impl Ramp {
    /// The process-wide ramp, `MND8OZ$7I?+=~:,.`.
    #[must_use]
    pub fn standard() -> &'static Ramp {
        &STANDARD
    }

    /// Bucket index for a luminance value: `min(15, floor(L × 16 / 255))`.
    ///
    /// `L = 255` computes to 16 and is clamped to the last bucket.
    ///
    /// # Example
    /// ```
    /// use pg_core::charset::Ramp;
    /// assert_eq!(Ramp::bucket(0), 0);
    /// assert_eq!(Ramp::bucket(16), 1);
    /// assert_eq!(Ramp::bucket(255), 15);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn bucket(luminance: u8) -> usize {
        let idx = usize::from(luminance) * BUCKETS / 255;
        idx.min(BUCKETS - 1)
    }

    /// Glyph for a luminance value.
    #[inline(always)]
    #[must_use]
    pub fn glyph(&self, luminance: u8) -> char {
        self.glyphs[Self::bucket(luminance)]
    }

    /// Glyphs in bucket order.
    #[must_use]
    pub fn glyphs(&self) -> &[char; BUCKETS] {
        &self.glyphs
    }

    /// True if `ch` belongs to the ramp.
    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        self.glyphs.contains(&ch)
    }
}
