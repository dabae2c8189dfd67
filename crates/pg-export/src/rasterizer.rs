use std::collections::HashMap;

use ab_glyph::{Font, FontRef, GlyphId, PxScale, ScaleFont, point};
use pg_core::config::{Hinting, RasterConfig};
use pg_core::error::CoreError;
use pg_core::frame::{AsciiGrid, FrameBuffer};

use crate::assets;

/// Coverage bitmap of one glyph rendered at an integer origin.
struct GlyphBitmap {
    /// Offset of the bitmap's top-left corner from the pen position on the baseline.
    left: i64,
    top: i64,
    width: u32,
    height: u32,
    /// Alpha row-major, `width × height`.
    alpha: Vec<u8>,
}

/// Split ASCII text into layout rows.
///
/// With `skip_header`, the first row is a filler row and is dropped.
/// A trailing line break does not produce an extra row.
///
/// # Example
/// ```
/// use pg_export::rasterizer::split_rows;
/// assert_eq!(split_rows("hdr\nMN\n..\n", true), vec!["MN", ".."]);
/// assert_eq!(split_rows("hdr\nMN\n..\n", false).len(), 3);
/// ```
#[must_use]
pub fn split_rows(text: &str, skip_header: bool) -> Vec<&str> {
    text.lines().skip(usize::from(skip_header)).collect()
}

/// Pose des lignes de texte monospace sur un canevas RGBA.
///
/// Canvas width is fixed by the config (770), height is `rows × row_height`.
/// Row 0 sits on baseline `margin + ceil(size × dpi / 72)`, each following row
/// `ceil(size × spacing × dpi / 72)` lower, every row starting at `margin`.
///
/// With [`Hinting::Full`] printable ASCII is pre-rendered into an atlas and
/// every glyph lands on whole pixels.
pub struct Rasterizer<F: Font = &'static FontRef<'static>> {
    font: F,
    scale: PxScale,
    config: RasterConfig,
    /// Pixel-aligned glyph atlas, filled only for [`Hinting::Full`].
    glyph_cache: HashMap<char, GlyphBitmap>,
}

impl Rasterizer {
    /// Rasterizer over the embedded monospace face.
    ///
    /// # Errors
    /// Returns [`CoreError::FontLoad`] / [`CoreError::FontParse`] if the face
    /// is unavailable, or [`CoreError::Config`] for an invalid config.
    ///
    /// # Example
    /// ```
    /// use pg_core::config::RasterConfig;
    /// use pg_export::rasterizer::Rasterizer;
    /// let r = Rasterizer::new(RasterConfig::default()).unwrap();
    /// assert_eq!(r.target_dimensions(9), (770, 144));
    /// ```
    pub fn new(config: RasterConfig) -> Result<Self, CoreError> {
        Self::with_font(assets::embedded_font()?, config)
    }
}

impl<F: Font> Rasterizer<F> {
    /// Rasterizer over any `ab_glyph` face.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] for an invalid config, or
    /// [`CoreError::FontParse`] if the face has no usable units-per-em.
    pub fn with_font(font: F, config: RasterConfig) -> Result<Self, CoreError> {
        config.validate()?;
        let units_per_em = font
            .units_per_em()
            .ok_or_else(|| CoreError::FontParse("units_per_em hors limites".into()))?;
        let px_per_em = config.px_per_em() as f32;
        let scale = PxScale::from(px_per_em * font.height_unscaled() / units_per_em);

        let mut rasterizer = Self {
            font,
            scale,
            config,
            glyph_cache: HashMap::new(),
        };
        if rasterizer.config.hinting == Hinting::Full {
            rasterizer.cache_charset(32..=126);
        }
        Ok(rasterizer)
    }

    fn cache_charset(&mut self, range: std::ops::RangeInclusive<u32>) {
        for codepoint in range {
            if let Some(ch) = char::from_u32(codepoint) {
                let gid = self.font.glyph_id(ch);
                if let Some(bitmap) = self.rasterize_glyph(gid) {
                    self.glyph_cache.insert(ch, bitmap);
                }
            }
        }
    }

    fn rasterize_glyph(&self, gid: GlyphId) -> Option<GlyphBitmap> {
        let glyph = gid.with_scale_and_position(self.scale, point(0.0, 0.0));
        let outline = self.font.outline_glyph(glyph)?;
        let bounds = outline.px_bounds();
        let width = bounds.width() as u32;
        let height = bounds.height() as u32;
        let mut alpha = vec![0u8; width as usize * height as usize];
        outline.draw(|x, y, v| {
            if x < width && y < height {
                alpha[(y * width + x) as usize] = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
            }
        });
        Some(GlyphBitmap {
            left: bounds.min.x as i64,
            top: bounds.min.y as i64,
            width,
            height,
            alpha,
        })
    }

    /// Layout config in use.
    #[must_use]
    pub fn config(&self) -> &RasterConfig {
        &self.config
    }

    /// Canvas size for `rows` text rows.
    #[must_use]
    pub fn target_dimensions(&self, rows: usize) -> (u32, u32) {
        (self.config.canvas_width, self.config.canvas_height(rows))
    }

    /// Split `text` (honouring `skip_header`) and rasterize the rows.
    ///
    /// # Example
    /// ```
    /// use pg_core::config::RasterConfig;
    /// use pg_export::rasterizer::Rasterizer;
    /// let r = Rasterizer::new(RasterConfig::default()).unwrap();
    /// let fb = r.render_text("header\nMND8\nOZ$7\n").unwrap();
    /// assert_eq!(fb.dimensions(), (770, 32));
    /// assert!(r.render_text("header only\n").is_err());
    /// ```
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if no row is left to draw.
    pub fn render_text(&self, text: &str) -> Result<FrameBuffer, CoreError> {
        let rows = split_rows(text, self.config.skip_header);
        self.render_rows(&rows)
    }

    /// Rasterize every row of a grid. Grids carry no header row.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] for an empty grid.
    pub fn render_grid(&self, grid: &AsciiGrid) -> Result<FrameBuffer, CoreError> {
        self.render_rows(grid.rows())
    }

    /// Rasterize rows onto a fresh canvas, one baseline per row.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if `rows` is empty: a
    /// zero-height canvas is never produced.
    pub fn render_rows<S: AsRef<str>>(&self, rows: &[S]) -> Result<FrameBuffer, CoreError> {
        let (width, height) = self.target_dimensions(rows.len());
        if height == 0 {
            return Err(CoreError::dimensions(width, height));
        }
        let [br, bg, bb] = self.config.background;
        let mut fb = FrameBuffer::filled(width, height, (br, bg, bb));

        let scaled = self.font.as_scaled(self.scale);
        let ascent = scaled.ascent().ceil() as i64;
        let mut baseline = self.config.first_baseline();
        let advance = self.config.line_advance();

        for row in rows {
            // Rows starting below the canvas contribute no pixels.
            if baseline - ascent >= i64::from(height) {
                break;
            }
            self.draw_row(&mut fb, row.as_ref(), baseline);
            baseline += advance;
        }

        log::debug!("Rasterisation : {} lignes → {width}×{height}", rows.len());
        Ok(fb)
    }

    fn draw_row(&self, fb: &mut FrameBuffer, row: &str, baseline: i64) {
        let scaled = self.font.as_scaled(self.scale);
        let hinted = self.config.hinting == Hinting::Full;
        let mut pen_x = self.config.margin as f32;
        let mut prev: Option<GlyphId> = None;

        let right_edge = fb.width as f32;

        for ch in row.chars() {
            if pen_x >= right_edge {
                break;
            }
            let gid = scaled.glyph_id(ch);
            if let Some(p) = prev {
                let kern = scaled.kern(p, gid);
                pen_x += if hinted { kern.round() } else { kern };
            }

            if hinted {
                let origin_x = pen_x.round() as i64;
                match self.glyph_cache.get(&ch) {
                    Some(bitmap) => self.blit(fb, bitmap, origin_x, baseline),
                    None => {
                        if let Some(bitmap) = self.rasterize_glyph(gid) {
                            self.blit(fb, &bitmap, origin_x, baseline);
                        }
                    }
                }
            } else {
                self.draw_outline(fb, gid, pen_x, baseline as f32);
            }

            let h_advance = scaled.h_advance(gid);
            pen_x += if hinted { h_advance.round() } else { h_advance };
            prev = Some(gid);
        }
    }

    fn draw_outline(&self, fb: &mut FrameBuffer, gid: GlyphId, x: f32, baseline: f32) {
        let glyph = gid.with_scale_and_position(self.scale, point(x, baseline));
        let Some(outline) = self.font.outline_glyph(glyph) else {
            return;
        };
        let bounds = outline.px_bounds();
        let left = bounds.min.x as i64;
        let top = bounds.min.y as i64;
        outline.draw(|gx, gy, v| {
            self.blend(fb, left + i64::from(gx), top + i64::from(gy), v);
        });
    }

    fn blit(&self, fb: &mut FrameBuffer, bitmap: &GlyphBitmap, origin_x: i64, baseline: i64) {
        for gy in 0..bitmap.height {
            for gx in 0..bitmap.width {
                let a = bitmap.alpha[(gy * bitmap.width + gx) as usize];
                if a == 0 {
                    continue;
                }
                self.blend(
                    fb,
                    origin_x + bitmap.left + i64::from(gx),
                    baseline + bitmap.top + i64::from(gy),
                    f32::from(a) / 255.0,
                );
            }
        }
    }

    /// Composite the foreground over the canvas pixel with coverage `v`; clipped.
    #[inline(always)]
    fn blend(&self, fb: &mut FrameBuffer, x: i64, y: i64, v: f32) {
        if x < 0 || y < 0 || x >= i64::from(fb.width) || y >= i64::from(fb.height) {
            return;
        }
        let v = v.clamp(0.0, 1.0);
        let idx = (y as usize * fb.width as usize + x as usize) * 4;
        for (c, &fg) in self.config.foreground.iter().enumerate() {
            let dst = f32::from(fb.data[idx + c]);
            fb.data[idx + c] = (dst + (f32::from(fg) - dst) * v).round() as u8;
        }
        fb.data[idx + 3] = 255;
    }
}

/// One-shot: rasterize ASCII text with the embedded face.
///
/// # Errors
/// Returns [`CoreError::FontLoad`] / [`CoreError::FontParse`] if the face
/// cannot be loaded, [`CoreError::Config`] for an invalid config, or
/// [`CoreError::InvalidDimensions`] if no row is left once the header is
/// skipped. No image is produced on error.
///
/// # Example
/// ```
/// use pg_core::config::RasterConfig;
/// use pg_export::rasterizer::text_to_image;
/// let fb = text_to_image("hdr\nMN..\n", &RasterConfig::default()).unwrap();
/// assert_eq!(fb.dimensions(), (770, 16));
/// ```
pub fn text_to_image(text: &str, config: &RasterConfig) -> Result<FrameBuffer, CoreError> {
    let rasterizer = Rasterizer::new(config.clone())?;
    rasterizer.render_text(text)
}
