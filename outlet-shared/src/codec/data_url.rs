/// Base64 data URLs
///
/// Binary artifacts travel as `data:<mime>;base64,<payload>` strings so a UI
/// client can drop them straight into `src` attributes.

use super::CodecError;
use base64::Engine;
use std::fs;
use std::path::Path;

const STANDARD: base64::engine::general_purpose::GeneralPurpose =
    base64::engine::general_purpose::STANDARD;

/// MIME type used when the extension is unknown
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Encodes bytes as a data URL with the given MIME type
pub fn encode_bytes_to_base64(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Reads a file and encodes it as a data URL
///
/// When `mime` is `None` the type is guessed from the file extension.
///
/// # Errors
///
/// Returns `CodecError::ReadFile` if the file cannot be read.
pub fn encode_file_to_base64(path: &Path, mime: Option<&str>) -> Result<String, CodecError> {
    let bytes = fs::read(path).map_err(|source| CodecError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let mime = mime.unwrap_or_else(|| guess_mime_type(path));
    tracing::debug!(path = %path.display(), bytes = bytes.len(), mime, "Encoding file");

    Ok(encode_bytes_to_base64(&bytes, mime))
}

/// Decodes a base64 payload, with or without a `data:...;base64,` header
pub fn decode_base64_payload(data: &str) -> Result<Vec<u8>, CodecError> {
    let payload = match data.trim().split_once(";base64,") {
        Some((header, payload)) if header.starts_with("data:") => payload,
        _ => data.trim(),
    };

    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(STANDARD.decode(compact)?)
}

/// Guesses a MIME type from the file extension
pub fn guess_mime_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "wav" => "audio/wav",
        "mp3" => "audio/mpeg",
        "ogg" => "audio/ogg",
        "flac" => "audio/flac",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "csv" => "text/csv",
        "txt" => "text/plain",
        "html" | "htm" => "text/html",
        _ => DEFAULT_MIME_TYPE,
    }
}
