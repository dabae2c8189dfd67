use std::path::Path;

use pg_core::error::CoreError;
use pg_core::frame::FrameBuffer;

/// Decode an image from disk (PNG, JPEG, BMP, GIF) into an RGBA frame.
///
/// # Errors
/// Returns [`CoreError::Decode`] if the file cannot be opened or decoded.
///
/// # Example
/// ```no_run
/// use pg_source::image::load_image;
/// use std::path::Path;
/// let frame = load_image(Path::new("test.jpg")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<FrameBuffer, CoreError> {
    let img = image::open(path)
        .map_err(|e| CoreError::Decode(format!("Impossible de charger {} : {e}", path.display())))?;
    let frame = into_frame(img);
    log::debug!(
        "Image chargée {} ({}×{})",
        path.display(),
        frame.width,
        frame.height
    );
    Ok(frame)
}

/// Decode an in-memory encoded image; the format is guessed from its header.
///
/// # Errors
/// Returns [`CoreError::Decode`] if the bytes are not a supported image.
///
/// # Example
/// ```
/// use pg_source::image::decode_image;
/// assert!(decode_image(b"not an image").is_err());
/// ```
pub fn decode_image(bytes: &[u8]) -> Result<FrameBuffer, CoreError> {
    let img = image::load_from_memory(bytes).map_err(|e| CoreError::Decode(e.to_string()))?;
    Ok(into_frame(img))
}

fn into_frame(img: image::DynamicImage) -> FrameBuffer {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    FrameBuffer {
        data: rgba.into_raw(),
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32, value: u8) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([value, value, value, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn decode_png_keeps_dimensions() {
        let frame = decode_image(&png_bytes(7, 3, 200)).unwrap();
        assert_eq!(frame.dimensions(), (7, 3));
        assert_eq!(frame.pixel(6, 2), (200, 200, 200, 255));
    }

    #[test]
    fn decode_garbage_is_decode_error() {
        assert!(matches!(decode_image(&[0, 1, 2, 3]), Err(CoreError::Decode(_))));
    }

    #[test]
    fn load_image_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        std::fs::write(&path, png_bytes(4, 4, 10)).unwrap();
        let frame = load_image(&path).unwrap();
        assert_eq!(frame.luminance(0, 0), 10);
    }

    #[test]
    fn load_missing_file_is_decode_error() {
        let err = load_image(Path::new("/nonexistent/img.png")).unwrap_err();
        assert!(matches!(err, CoreError::Decode(_)));
    }
}
