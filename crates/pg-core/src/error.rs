use thiserror::Error;

/// Errors raised by the conversion pipeline.
///
/// Every stage surfaces its error immediately; nothing is retried.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Zero width, zero source dimensions, or a derived height of zero.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Input bytes are not a decodable image.
    #[error("Décodage de l'image impossible : {0}")]
    Decode(String),

    /// Embedded asset missing from the asset table.
    #[error("Ressource introuvable : {name}")]
    FontLoad {
        /// Name that was looked up.
        name: String,
    },

    /// Embedded typeface is not a valid TrueType/OpenType font.
    #[error("Police invalide : {0}")]
    FontParse(String),

    /// PNG serialisation failed.
    #[error("Encodage PNG impossible : {0}")]
    Encode(String),

    /// Destination file could not be created or written.
    #[error("Écriture impossible ({path}) : {source}")]
    Write {
        /// Destination path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::InvalidDimensions`].
    #[must_use]
    pub fn dimensions(width: u32, height: u32) -> Self {
        Self::InvalidDimensions { width, height }
    }
}
