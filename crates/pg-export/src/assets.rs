use std::sync::OnceLock;

use ab_glyph::FontRef;
use pg_core::error::CoreError;

/// Name of the monospace face used for rasterization.
pub const DEFAULT_FONT: &str = "DejaVuSansMono.ttf";

/// Blobs compiled into the binary, keyed by file name.
static ASSETS: &[(&str, &[u8])] = &[(
    DEFAULT_FONT,
    include_bytes!("../assets/DejaVuSansMono.ttf"),
)];

static FONT: OnceLock<FontRef<'static>> = OnceLock::new();

/// Look up an embedded asset by name.
///
/// # Errors
/// Returns [`CoreError::FontLoad`] if no asset has that name.
///
/// # Example
/// ```
/// use pg_export::assets::{load_asset, DEFAULT_FONT};
/// assert!(!load_asset(DEFAULT_FONT).unwrap().is_empty());
/// assert!(load_asset("missing.ttf").is_err());
/// ```
pub fn load_asset(name: &str) -> Result<&'static [u8], CoreError> {
    ASSETS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, bytes)| *bytes)
        .ok_or_else(|| CoreError::FontLoad {
            name: name.to_string(),
        })
}

/// Parse TrueType/OpenType bytes.
///
/// # Errors
/// Returns [`CoreError::FontParse`] if the bytes are not a valid font.
pub fn parse_font(bytes: &'static [u8]) -> Result<FontRef<'static>, CoreError> {
    FontRef::try_from_slice(bytes).map_err(|e| CoreError::FontParse(e.to_string()))
}

/// The default face, parsed on first use and shared read-only afterwards.
///
/// # Errors
/// Returns [`CoreError::FontLoad`] or [`CoreError::FontParse`] if the
/// embedded face is missing or corrupt.
pub fn embedded_font() -> Result<&'static FontRef<'static>, CoreError> {
    if let Some(font) = FONT.get() {
        return Ok(font);
    }
    let font = parse_font(load_asset(DEFAULT_FONT)?)?;
    log::debug!("Police {DEFAULT_FONT} chargée");
    Ok(FONT.get_or_init(|| font))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_font_is_embedded() {
        assert!(load_asset(DEFAULT_FONT).unwrap().starts_with(&[0, 1, 0, 0]));
    }

    #[test]
    fn unknown_asset_is_font_load_error() {
        match load_asset("luximr.ttf") {
            Err(CoreError::FontLoad { name }) => assert_eq!(name, "luximr.ttf"),
            other => panic!("attendu FontLoad, reçu {other:?}"),
        }
    }

    #[test]
    fn garbage_bytes_are_font_parse_error() {
        static GARBAGE: [u8; 8] = [0xde, 0xad, 0xbe, 0xef, 0, 1, 2, 3];
        assert!(matches!(parse_font(&GARBAGE), Err(CoreError::FontParse(_))));
    }

    #[test]
    fn embedded_font_is_parsed_once() {
        let a = embedded_font().unwrap();
        let b = embedded_font().unwrap();
        assert!(std::ptr::eq(a, b));
    }
}
