use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pg_core::config::RasterConfig;
use pg_core::error::CoreError;
use pg_core::frame::{AsciiGrid, FrameBuffer};
use pg_export::{encode_png, save_image, text_to_image};

/// Scale then quantize: image → ASCII grid of `width` columns.
///
/// # Errors
/// Returns [`CoreError::InvalidDimensions`] for a zero width or a source too
/// flat to yield at least one row.
pub fn image_to_ascii(frame: &FrameBuffer, width: u32) -> Result<AsciiGrid, CoreError> {
    let (scaled, dims) = pg_source::resize::scale_image(frame, width)?;
    pg_ascii::quantize(&scaled, dims)
}

/// Load an image from disk and convert it.
///
/// # Errors
/// Returns an error if the image cannot be decoded or converted.
pub fn convert_file(path: &Path, width: u32) -> Result<AsciiGrid> {
    let frame = pg_source::image::load_image(path)?;
    let grid = image_to_ascii(&frame, width)
        .with_context(|| format!("Conversion impossible de {}", path.display()))?;
    Ok(grid)
}

/// Rasterize ASCII text and encode it as PNG.
///
/// # Errors
/// Returns the rasterizer's font/config errors, [`CoreError::InvalidDimensions`]
/// when no row is left to draw, or [`CoreError::Encode`].
pub fn ascii_to_png(text: &str, config: &RasterConfig) -> Result<Vec<u8>, CoreError> {
    let canvas = text_to_image(text, config)?;
    encode_png(&canvas)
}

/// Rasterize, encode, then write. The file is only created once the PNG is
/// fully encoded.
///
/// # Errors
/// Returns an error if any stage fails.
pub fn save_ascii_as_png(text: &str, config: &RasterConfig, path: &Path) -> Result<()> {
    let png = ascii_to_png(text, config)?;
    save_image(path, &png)?;
    Ok(())
}

/// Ask whether to save, then for a file name.
///
/// Returns `None` unless the answer is `y` or `yes` (any case) and a
/// non-empty name follows.
///
/// # Errors
/// Returns an I/O error if reading or writing the prompt fails.
pub fn prompt_save<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<Option<PathBuf>> {
    write!(out, "Would you like to save this as an image? (Y or N): ")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    if answer != "y" && answer != "yes" {
        return Ok(None);
    }

    write!(out, "What would you like to name it?: ")?;
    out.flush()?;
    let mut name = String::new();
    input.read_line(&mut name)?;
    let name = name.trim_end_matches(['\n', '\r']);
    if name.is_empty() {
        return Ok(None);
    }
    Ok(Some(PathBuf::from(name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reference_round_trip_geometry() {
        let src = FrameBuffer::filled(230, 100, (128, 128, 128));
        let grid = image_to_ascii(&src, 23).unwrap();
        assert_eq!(grid.height(), 10);
        assert!(grid.rows().iter().all(|r| r.chars().count() == 23));

        let canvas = text_to_image(&grid.to_text(), &RasterConfig::default()).unwrap();
        assert_eq!(canvas.dimensions(), (770, 144));
    }

    #[test]
    fn uniform_gray_gives_single_glyph() {
        let src = FrameBuffer::filled(300, 300, (128, 128, 128));
        let text = image_to_ascii(&src, 40).unwrap().to_text();
        let mut glyphs: Vec<char> = text.chars().filter(|&c| c != '\n').collect();
        glyphs.dedup();
        assert_eq!(glyphs, vec!['I']);
    }

    #[test]
    fn zero_width_produces_no_output() {
        let src = FrameBuffer::filled(230, 100, (0, 0, 0));
        assert!(matches!(
            image_to_ascii(&src, 0),
            Err(CoreError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn ascii_to_png_is_decodable() {
        let png = ascii_to_png("hdr\nMND8\nOZ$7\n", &RasterConfig::default()).unwrap();
        let img = image::load_from_memory(&png).unwrap();
        assert_eq!((img.width(), img.height()), (770, 32));
    }

    #[test]
    fn header_only_text_writes_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        let err = save_ascii_as_png("hdr\n", &RasterConfig::default(), &path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::InvalidDimensions { .. })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn save_ascii_as_png_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("art.png");
        save_ascii_as_png("hdr\nMMMM\n", &RasterConfig::default(), &path).unwrap();
        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (770, 16));
    }

    #[test]
    fn prompt_accepts_yes() {
        let mut input = Cursor::new("Yes\nart.png\n");
        let mut out = Vec::new();
        let path = prompt_save(&mut input, &mut out).unwrap();
        assert_eq!(path, Some(PathBuf::from("art.png")));
        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("(Y or N)"));
        assert!(shown.contains("name it"));
    }

    #[test]
    fn prompt_declines_anything_else() {
        for answer in ["n\n", "nope\n", "\n", ""] {
            let mut input = Cursor::new(answer);
            assert_eq!(prompt_save(&mut input, &mut Vec::new()).unwrap(), None);
        }
    }
}
