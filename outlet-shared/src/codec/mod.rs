/// Encoding helpers for wire values
///
/// This module provides the low-level primitives that output adapters use to
/// turn binary artifacts into wire-safe strings and back:
/// - Base64 data URLs (`data:<mime>;base64,<payload>`)
/// - PNG encoding of `PixelImage`, and PNG/JPEG/GIF decoding
/// - WAV writing of `AudioClip`
/// - MIME type guessing from file extensions
///
/// # Example
///
/// ```
/// use outlet_shared::codec::{decode_base64_to_image, encode_array_to_base64};
/// use outlet_shared::models::NdArray;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pixels = NdArray::new(vec![2, 2, 3], vec![255.0; 12])?;
/// let data_url = encode_array_to_base64(&pixels)?;
/// assert!(data_url.starts_with("data:image/png;base64,"));
///
/// let image = decode_base64_to_image(&data_url)?;
/// assert_eq!((image.width, image.height), (2, 2));
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```

pub mod audio;
pub mod data_url;
pub mod image;

use crate::models::ModelError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub use audio::write_wav;
pub use data_url::{
    decode_base64_payload, encode_bytes_to_base64, encode_file_to_base64, guess_mime_type,
};
pub use image::{
    decode_base64_to_image, decode_gif, decode_image, decode_jpeg, decode_png,
    encode_array_to_base64, encode_plot_to_base64, encode_png, ImageFormat,
};

/// Codec errors
#[derive(Error, Debug)]
pub enum CodecError {
    /// File could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Payload is not valid base64
    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// PNG encoding or decoding failed
    #[error("PNG error: {0}")]
    Png(String),

    /// JPEG decoding failed
    #[error("JPEG error: {0}")]
    Jpeg(String),

    /// GIF decoding failed
    #[error("GIF error: {0}")]
    Gif(String),

    /// Bytes are not a PNG, JPEG or GIF
    #[error("Unrecognized image format (expected PNG, JPEG or GIF)")]
    UnknownImageFormat,

    /// WAV encoding failed
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// Plot could not render itself
    #[error("Plot rendering failed: {0}")]
    Plot(String),

    /// Value does not have the shape the codec needs
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Other IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
