use std::collections::{BTreeMap, HashMap};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use pg_core::config::PixglyphConfig;
use pg_core::error::CoreError;
use serde::{Deserialize, Serialize};

use crate::pipeline;

/// Content types the handler accepts.
pub const ACCEPTED_CONTENT_TYPES: [&str; 2] = ["image/png", "image/jpeg"];

/// Gateway-style request event. The body is a base64-encoded image.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRequest {
    /// Request headers.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Base64 image payload.
    #[serde(default)]
    pub body: String,
}

/// Gateway-style response event.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    /// HTTP status.
    pub status_code: u16,
    /// Response headers.
    pub headers: BTreeMap<String, String>,
    /// Base64 PNG on success, error message otherwise.
    pub body: String,
    /// True when `body` is base64.
    pub is_base64_encoded: bool,
}

impl GatewayResponse {
    fn client_error(status_code: u16, message: &str) -> Self {
        log::error!("Requête rejetée ({status_code}) : {message}");
        Self {
            status_code,
            headers: cors_headers(),
            body: message.to_string(),
            is_base64_encoded: false,
        }
    }

    fn png(bytes: &[u8]) -> Self {
        let mut headers = cors_headers();
        headers.insert("Content-Type".into(), "image/png".into());
        Self {
            status_code: 200,
            headers,
            body: STANDARD.encode(bytes),
            is_base64_encoded: true,
        }
    }
}

fn cors_headers() -> BTreeMap<String, String> {
    BTreeMap::from([("Access-Control-Allow-Origin".to_string(), "*".to_string())])
}

/// Header lookup, case-insensitive on the name.
fn header<'a>(req: &'a GatewayRequest, name: &str) -> Option<&'a str> {
    req.headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

fn acceptable_image_type(req: &GatewayRequest) -> bool {
    header(req, "Content-Type")
        .map(|v| v.split(';').next().unwrap_or_default().trim().to_ascii_lowercase())
        .is_some_and(|media| ACCEPTED_CONTENT_TYPES.contains(&media.as_str()))
}

/// Decode the base64 body; line breaks and other whitespace are ignored.
fn base64_decode_body(body: &str) -> Result<Vec<u8>, CoreError> {
    let compact: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD
        .decode(compact)
        .map_err(|e| CoreError::Decode(format!("base64 : {e}")))
}

/// Image in, rasterized ASCII art out, both base64.
///
/// | Condition                         | Status |
/// |-----------------------------------|--------|
/// | Content-Type not png/jpeg         | 400    |
/// | Body not base64 or not an image   | 422    |
/// | Image too small for the width     | 422    |
/// | Rasterization failed, no row left | 422    |
/// | PNG encoding failed               | 500    |
#[must_use]
pub fn handle(req: &GatewayRequest, config: &PixglyphConfig) -> GatewayResponse {
    if !acceptable_image_type(req) {
        return GatewayResponse::client_error(400, "Content-Type was not image/png or image/jpeg.");
    }

    let frame = match base64_decode_body(&req.body).and_then(|b| pg_source::image::decode_image(&b)) {
        Ok(frame) => frame,
        Err(_) => return GatewayResponse::client_error(422, "Could not base64 decode image."),
    };

    let grid = match pipeline::image_to_ascii(&frame, config.convert.width) {
        Ok(grid) => grid,
        Err(_) => {
            return GatewayResponse::client_error(422, "Image dimensions are invalid for conversion.");
        }
    };

    let canvas = match pg_export::text_to_image(&grid.to_text(), &config.raster) {
        Ok(canvas) => canvas,
        Err(_) => return GatewayResponse::client_error(422, "Unable to convert ascii text to image."),
    };

    match pg_export::encode_png(&canvas) {
        Ok(png) => GatewayResponse::png(&png),
        Err(_) => GatewayResponse::client_error(500, "Unable to encode image."),
    }
}
