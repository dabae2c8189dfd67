use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Largeur cible par défaut, en caractères.
pub const DEFAULT_WIDTH: u32 = 120;

/// Glyph placement mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum Hinting {
    /// Fractional pen positions, no grid fitting.
    #[default]
    None,
    /// Pen position and baseline snapped to whole pixels.
    Full,
}

impl std::str::FromStr for Hinting {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "full" => Ok(Self::Full),
            other => Err(CoreError::Config(format!("hinting inconnu '{other}'"))),
        }
    }
}

/// Forward conversion settings.
///
/// # Example
/// ```
/// use pg_core::config::ConvertConfig;
/// assert_eq!(ConvertConfig::default().width, 120);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ConvertConfig {
    /// Target width in characters.
    pub width: u32,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
        }
    }
}

/// Text-to-image layout and typeface settings. Immutable per call.
///
/// # Example
/// ```
/// use pg_core::config::{Hinting, RasterConfig};
/// let config = RasterConfig::default();
/// assert_eq!(config.hinting, Hinting::None);
/// assert_eq!(config.first_baseline(), 21);
/// assert_eq!(config.line_advance(), 16);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RasterConfig {
    /// Device resolution, dots per inch.
    pub dpi: f64,
    /// Glyph placement mode.
    pub hinting: Hinting,
    /// Font size in points.
    pub font_size: f64,
    /// Line spacing multiplier.
    pub line_spacing: f64,
    /// Canvas width in pixels.
    pub canvas_width: u32,
    /// Canvas height allotted per text row.
    pub row_height: u32,
    /// Left margin, also the offset added above the first baseline.
    pub margin: u32,
    /// Drop the first text row before layout.
    pub skip_header: bool,
    /// Couleur du texte (RGB).
    pub foreground: [u8; 3],
    /// Couleur du fond (RGB).
    pub background: [u8; 3],
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            dpi: 150.0,
            hinting: Hinting::None,
            font_size: 5.0,
            line_spacing: 1.5,
            canvas_width: 770,
            row_height: 16,
            margin: 10,
            skip_header: true,
            foreground: [255, 255, 255],
            background: [0, 0, 0],
        }
    }
}

impl RasterConfig {
    /// Pixels per em: `font_size × dpi / 72`.
    #[must_use]
    pub fn px_per_em(&self) -> f64 {
        self.font_size * self.dpi / 72.0
    }

    /// Baseline of the first row: `margin + ceil(font_size × dpi / 72)`.
    #[must_use]
    pub fn first_baseline(&self) -> i64 {
        i64::from(self.margin) + self.px_per_em().ceil() as i64
    }

    /// Baseline advance between rows: `ceil(font_size × line_spacing × dpi / 72)`.
    #[must_use]
    pub fn line_advance(&self) -> i64 {
        (self.font_size * self.line_spacing * self.dpi / 72.0).ceil() as i64
    }

    /// Canvas height for `rows` text rows.
    #[must_use]
    pub fn canvas_height(&self, rows: usize) -> u32 {
        rows as u32 * self.row_height
    }

    /// Reject values the rasterizer cannot work with.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] for non-positive or non-finite metrics.
    pub fn validate(&self) -> Result<(), CoreError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.dpi) {
            return Err(CoreError::Config(format!("dpi doit être > 0, reçu {}", self.dpi)));
        }
        if !positive(self.font_size) {
            return Err(CoreError::Config(format!(
                "font_size doit être > 0, reçu {}",
                self.font_size
            )));
        }
        if !positive(self.line_spacing) {
            return Err(CoreError::Config(format!(
                "line_spacing doit être > 0, reçu {}",
                self.line_spacing
            )));
        }
        if self.canvas_width == 0 || self.row_height == 0 {
            return Err(CoreError::InvalidDimensions {
                width: self.canvas_width,
                height: self.row_height,
            });
        }
        Ok(())
    }
}

/// Configuration complète, chargée depuis TOML.
///
/// # Example
/// ```
/// use pg_core::config::PixglyphConfig;
/// let config = PixglyphConfig::default();
/// assert_eq!(config.convert.width, 120);
/// assert_eq!(config.raster.canvas_width, 770);
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PixglyphConfig {
    /// Image → ASCII.
    pub convert: ConvertConfig,
    /// ASCII → image.
    pub raster: RasterConfig,
}

impl PixglyphConfig {
    /// Check both sections.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] or [`CoreError::InvalidDimensions`].
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.convert.width == 0 {
            return Err(CoreError::dimensions(0, 0));
        }
        self.raster.validate()
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    convert: Option<ConvertSection>,
    raster: Option<RasterSection>,
}

#[derive(Deserialize)]
struct ConvertSection {
    width: Option<u32>,
}

/// Raster section, all fields optional for partial override.
#[derive(Deserialize)]
struct RasterSection {
    dpi: Option<f64>,
    hinting: Option<Hinting>,
    font_size: Option<f64>,
    line_spacing: Option<f64>,
    canvas_width: Option<u32>,
    row_height: Option<u32>,
    margin: Option<u32>,
    skip_header: Option<bool>,
    foreground: Option<[u8; 3]>,
    background: Option<[u8; 3]>,
}

/// Parse TOML text and merge it over the defaults.
///
/// # Errors
/// Returns an error if the text is not valid TOML or a value is rejected by
/// [`PixglyphConfig::validate`].
///
/// # Example
/// ```
/// use pg_core::config::parse_config;
/// let config = parse_config("[convert]\nwidth = 80\n").unwrap();
/// assert_eq!(config.convert.width, 80);
/// assert_eq!(config.raster.dpi, 150.0);
/// ```
pub fn parse_config(content: &str) -> Result<PixglyphConfig> {
    let file: ConfigFile = toml::from_str(content).context("TOML invalide")?;
    let mut config = PixglyphConfig::default();

    if let Some(c) = file.convert {
        if let Some(v) = c.width {
            config.convert.width = v;
        }
    }

    if let Some(r) = file.raster {
        let raster = &mut config.raster;
        if let Some(v) = r.dpi {
            raster.dpi = v;
        }
        if let Some(v) = r.hinting {
            raster.hinting = v;
        }
        if let Some(v) = r.font_size {
            raster.font_size = v;
        }
        if let Some(v) = r.line_spacing {
            raster.line_spacing = v;
        }
        if let Some(v) = r.canvas_width {
            raster.canvas_width = v;
        }
        if let Some(v) = r.row_height {
            raster.row_height = v;
        }
        if let Some(v) = r.margin {
            raster.margin = v;
        }
        if let Some(v) = r.skip_header {
            raster.skip_header = v;
        }
        if let Some(v) = r.foreground {
            raster.foreground = v;
        }
        if let Some(v) = r.background {
            raster.background = v;
        }
    }

    config.validate()?;
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use pg_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<PixglyphConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let config =
        parse_config(&content).with_context(|| format!("Config invalide : {}", path.display()))?;
    log::debug!("Config chargée depuis {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(PixglyphConfig::default().validate().is_ok());
    }

    #[test]
    fn default_layout_metrics() {
        let raster = RasterConfig::default();
        assert!((raster.px_per_em() - 10.416_666).abs() < 1e-3);
        assert_eq!(raster.first_baseline(), 21);
        assert_eq!(raster.line_advance(), 16);
        assert_eq!(raster.canvas_height(9), 144);
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let config = parse_config("[raster]\nhinting = \"Full\"\ndpi = 72.0\n").unwrap();
        assert_eq!(config.raster.hinting, Hinting::Full);
        assert_eq!(config.raster.dpi, 72.0);
        assert_eq!(config.raster.font_size, 5.0);
        assert_eq!(config.convert.width, DEFAULT_WIDTH);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.convert.width, DEFAULT_WIDTH);
        assert!(config.raster.skip_header);
    }

    #[test]
    fn zero_width_rejected() {
        assert!(parse_config("[convert]\nwidth = 0\n").is_err());
    }

    #[test]
    fn negative_dpi_rejected() {
        let mut raster = RasterConfig::default();
        raster.dpi = -1.0;
        assert!(matches!(raster.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn hinting_from_str() {
        assert_eq!("none".parse::<Hinting>().unwrap(), Hinting::None);
        assert_eq!("FULL".parse::<Hinting>().unwrap(), Hinting::Full);
        assert!("slight".parse::<Hinting>().is_err());
    }

    #[test]
    fn load_config_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixglyph.toml");
        std::fs::write(&path, "[convert]\nwidth = 40\n").unwrap();
        assert_eq!(load_config(&path).unwrap().convert.width, 40);
    }

    #[test]
    fn load_config_missing_file_errors() {
        assert!(load_config(Path::new("/nonexistent/pixglyph.toml")).is_err());
    }
}
