use std::fmt;

use crate::error::CoreError;

/// Buffer de pixels RGBA, row-major, 4 bytes par pixel.
///
/// # Example
/// ```
/// use pg_core::frame::FrameBuffer;
/// let fb = FrameBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 400);
/// ```
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Crée un buffer noir transparent aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use pg_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(100, 50);
    /// assert_eq!(fb.width, 100);
    /// assert_eq!(fb.height, 50);
    /// assert_eq!(fb.data.len(), 100 * 50 * 4);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Crée un buffer rempli d'une couleur opaque.
    ///
    /// # Example
    /// ```
    /// use pg_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::filled(2, 2, (0, 0, 0));
    /// assert_eq!(fb.pixel(1, 1), (0, 0, 0, 255));
    /// ```
    #[must_use]
    pub fn filled(width: u32, height: u32, rgb: (u8, u8, u8)) -> Self {
        let mut fb = Self::new(width, height);
        for px in fb.data.chunks_exact_mut(4) {
            px.copy_from_slice(&[rgb.0, rgb.1, rgb.2, 255]);
        }
        fb
    }

    /// Dimensions of the buffer.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Accès au pixel (x, y) → (r, g, b, a).
    ///
    /// # Example
    /// ```
    /// use pg_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(10, 10);
    /// assert_eq!(fb.pixel(0, 0), (0, 0, 0, 0));
    /// ```
    ///
    /// # Panics
    /// Panics if (x, y) lies outside the buffer or `data` is shorter than
    /// `width × height × 4`.
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.data[idx..idx + 4];
        (px[0], px[1], px[2], px[3])
    }

    /// Luminance perceptuelle BT.601 sur canaux 16 bits, couleur prémultipliée par l'alpha.
    ///
    /// Always in [0, 255]: the weights sum to 65536 and the result is shifted
    /// back from 32 to 8 bits.
    ///
    /// # Example
    /// ```
    /// use pg_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::filled(1, 1, (255, 255, 255));
    /// assert_eq!(fb.luminance(0, 0), 255);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn luminance(&self, x: u32, y: u32) -> u8 {
        let (r, g, b, a) = self.pixel(x, y);
        let a = u32::from(a);
        let expand = |c: u8| u32::from(c) * 257 * a / 255;
        let y = (19595 * expand(r) + 38470 * expand(g) + 7471 * expand(b) + (1 << 15)) >> 24;
        y as u8
    }
}

/// Dimensions (largeur, hauteur) en pixels ou en cellules. Toujours > 0.
///
/// # Example
/// ```
/// use pg_core::frame::Dimensions;
/// assert!(Dimensions::new(23, 10).is_ok());
/// assert!(Dimensions::new(0, 10).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

impl Dimensions {
    /// Validate and build a dimension pair.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if either value is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::dimensions(width, height));
        }
        Ok(Self { width, height })
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.width, self.height)
    }
}

/// Grille de sortie ASCII : `height` lignes de `width` caractères.
///
/// # Example
/// ```
/// use pg_core::frame::AsciiGrid;
/// let mut grid = AsciiGrid::new(3);
/// grid.push_row("MN.".into()).unwrap();
/// grid.push_row("...".into()).unwrap();
/// assert_eq!(grid.to_text(), "MN.\n...\n");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsciiGrid {
    rows: Vec<String>,
    width: u32,
}

impl AsciiGrid {
    /// Empty grid whose rows will all be `width` characters long.
    #[must_use]
    pub fn new(width: u32) -> Self {
        Self {
            rows: Vec::new(),
            width,
        }
    }

    /// Empty grid with room for `height` rows.
    #[must_use]
    pub fn with_capacity(dims: Dimensions) -> Self {
        Self {
            rows: Vec::with_capacity(dims.height as usize),
            width: dims.width,
        }
    }

    /// Append a row.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if the row length differs
    /// from the grid width.
    pub fn push_row(&mut self, row: String) -> Result<(), CoreError> {
        let len = row.chars().count() as u32;
        if len != self.width {
            return Err(CoreError::dimensions(len, self.rows.len() as u32 + 1));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Width in characters.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Rows, top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Text form: each row followed by `'\n'`.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AsciiGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            f.write_str(row)?;
            f.write_str("\n")?;
        }
        Ok(())
    }
}
