use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

use image::{ImageFormat, RgbaImage};
use pg_core::error::CoreError;
use pg_core::frame::FrameBuffer;

/// Encode a frame as PNG, entirely in memory.
///
/// # Errors
/// Returns [`CoreError::Encode`] if the buffer does not match its dimensions
/// or the PNG encoder rejects it (e.g. a zero-sized canvas).
///
/// # Example
/// ```
/// use pg_core::frame::FrameBuffer;
/// use pg_export::encode::encode_png;
/// let png = encode_png(&FrameBuffer::filled(4, 4, (0, 0, 0))).unwrap();
/// assert_eq!(&png[1..4], b"PNG");
/// ```
pub fn encode_png(frame: &FrameBuffer) -> Result<Vec<u8>, CoreError> {
    let img = RgbaImage::from_raw(frame.width, frame.height, frame.data.clone()).ok_or_else(|| {
        CoreError::Encode(format!(
            "buffer de {} octets pour {}×{}",
            frame.data.len(),
            frame.width,
            frame.height
        ))
    })?;
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .map_err(|e| CoreError::Encode(e.to_string()))?;
    log::info!("Image convertie au format PNG ({}×{}).", frame.width, frame.height);
    Ok(out.into_inner())
}

/// Write encoded bytes to `path`. The parent directory must exist.
///
/// # Errors
/// Returns [`CoreError::Write`] if the file cannot be created or written.
///
/// # Example
/// ```no_run
/// use pg_export::encode::save_image;
/// use std::path::Path;
/// save_image(Path::new("out.png"), &[0x89, b'P', b'N', b'G']).unwrap();
/// ```
pub fn save_image(path: &Path, bytes: &[u8]) -> Result<(), CoreError> {
    let write_err = |source: std::io::Error| CoreError::Write {
        path: path.display().to_string(),
        source,
    };
    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes).map_err(write_err)?;
    writer.flush().map_err(write_err)?;
    log::info!("Fichier '{}' écrit.", path.display());
    Ok(())
}
