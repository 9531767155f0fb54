/// Image codec (pure Rust)
///
/// Encodes `PixelImage`s to PNG with the png crate. Decoding sniffs the
/// container from its leading bytes and accepts PNG (png), JPEG (zune-jpeg)
/// and GIF (gif, first frame only). Palette, low-bit-depth and 16-bit PNGs are
/// normalized to 8-bit channels on decode.

use super::data_url::{decode_base64_payload, encode_bytes_to_base64};
use super::CodecError;
use crate::models::{ColorType, NdArray, PixelImage, Plot};
use std::io::Cursor;

const PNG_MIME: &str = "image/png";

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF];

/// Image containers `decode_image` understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
}

impl ImageFormat {
    /// Identifies the container from its magic bytes
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(PNG_SIGNATURE) {
            Some(ImageFormat::Png)
        } else if bytes.starts_with(JPEG_SIGNATURE) {
            Some(ImageFormat::Jpeg)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(ImageFormat::Gif)
        } else {
            None
        }
    }
}

fn to_png_color_type(color_type: ColorType) -> png::ColorType {
    match color_type {
        ColorType::Gray => png::ColorType::Grayscale,
        ColorType::GrayAlpha => png::ColorType::GrayscaleAlpha,
        ColorType::Rgb => png::ColorType::Rgb,
        ColorType::Rgba => png::ColorType::Rgba,
    }
}

/// Encodes an image as PNG bytes
pub fn encode_png(image: &PixelImage) -> Result<Vec<u8>, CodecError> {
    let mut output = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut output, image.width, image.height);
        encoder.set_color(to_png_color_type(image.color_type));
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| CodecError::Png(format!("header write failed: {}", e)))?;

        writer
            .write_image_data(&image.data)
            .map_err(|e| CodecError::Png(format!("encode failed: {}", e)))?;

        writer
            .finish()
            .map_err(|e| CodecError::Png(format!("finish failed: {}", e)))?;
    }

    Ok(output)
}

/// Decodes PNG bytes into an 8-bit image
pub fn decode_png(bytes: &[u8]) -> Result<PixelImage, CodecError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

    let mut reader = decoder
        .read_info()
        .map_err(|e| CodecError::Png(format!("header decode failed: {}", e)))?;

    let mut pixels = vec![0u8; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut pixels)
        .map_err(|e| CodecError::Png(format!("decode failed: {}", e)))?;
    pixels.truncate(info.buffer_size());

    if info.bit_depth != png::BitDepth::Eight {
        return Err(CodecError::Png(format!(
            "unsupported output bit depth {:?}",
            info.bit_depth
        )));
    }

    let color_type = match info.color_type {
        png::ColorType::Grayscale => ColorType::Gray,
        png::ColorType::GrayscaleAlpha => ColorType::GrayAlpha,
        png::ColorType::Rgb => ColorType::Rgb,
        png::ColorType::Rgba => ColorType::Rgba,
        png::ColorType::Indexed => {
            return Err(CodecError::Png("indexed color was not expanded".to_string()))
        }
    };

    Ok(PixelImage::new(info.width, info.height, color_type, pixels)?)
}

/// Decodes baseline or progressive JPEG bytes
pub fn decode_jpeg(bytes: &[u8]) -> Result<PixelImage, CodecError> {
    let mut decoder = zune_jpeg::JpegDecoder::new(bytes);
    decoder
        .decode_headers()
        .map_err(|e| CodecError::Jpeg(format!("header decode failed: {:?}", e)))?;

    let info = decoder
        .info()
        .ok_or_else(|| CodecError::Jpeg("missing image info".to_string()))?;

    let pixels = decoder
        .decode()
        .map_err(|e| CodecError::Jpeg(format!("decode failed: {:?}", e)))?;

    let width = u32::from(info.width);
    let height = u32::from(info.height);
    let area = width as usize * height as usize;

    // the decoder picks the output colorspace, so infer it from the buffer
    let color_type = match pixels.len().checked_div(area) {
        Some(1) => ColorType::Gray,
        Some(3) => ColorType::Rgb,
        Some(4) => ColorType::Rgba,
        _ => {
            return Err(CodecError::Jpeg(format!(
                "unexpected {} byte buffer for {}x{}",
                pixels.len(),
                width,
                height
            )))
        }
    };

    Ok(PixelImage::new(width, height, color_type, pixels)?)
}

/// Decodes the first frame of a GIF as RGBA
pub fn decode_gif(bytes: &[u8]) -> Result<PixelImage, CodecError> {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::RGBA);

    let mut decoder = options
        .read_info(Cursor::new(bytes))
        .map_err(|e| CodecError::Gif(format!("header decode failed: {}", e)))?;

    let frame = decoder
        .read_next_frame()
        .map_err(|e| CodecError::Gif(format!("decode failed: {}", e)))?
        .ok_or_else(|| CodecError::Gif("no frames".to_string()))?;

    Ok(PixelImage::new(
        u32::from(frame.width),
        u32::from(frame.height),
        ColorType::Rgba,
        frame.buffer.to_vec(),
    )?)
}

/// Decodes PNG, JPEG or GIF bytes, picked by magic number
pub fn decode_image(bytes: &[u8]) -> Result<PixelImage, CodecError> {
    let format = ImageFormat::sniff(bytes).ok_or(CodecError::UnknownImageFormat)?;
    tracing::trace!(?format, bytes = bytes.len(), "Decoding image");

    match format {
        ImageFormat::Png => decode_png(bytes),
        ImageFormat::Jpeg => decode_jpeg(bytes),
        ImageFormat::Gif => decode_gif(bytes),
    }
}

/// Encodes a pixel array as a PNG data URL
///
/// The array must be `[height, width]` or `[height, width, 1-4]`.
pub fn encode_array_to_base64(array: &NdArray) -> Result<String, CodecError> {
    let image = PixelImage::from_array(array)?;
    let png = encode_png(&image)?;
    Ok(encode_bytes_to_base64(&png, PNG_MIME))
}

/// Renders a plot and encodes it as a PNG data URL
pub fn encode_plot_to_base64(plot: &dyn Plot) -> Result<String, CodecError> {
    let png = plot
        .render_png()
        .map_err(|e| CodecError::Plot(e.to_string()))?;
    Ok(encode_bytes_to_base64(&png, PNG_MIME))
}

/// Decodes a base64 image payload (data URL or bare) into an image
///
/// The data-URL MIME tag is ignored; the format comes from the bytes.
pub fn decode_base64_to_image(data: &str) -> Result<PixelImage, CodecError> {
    let bytes = decode_base64_payload(data)?;
    decode_image(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPlot;

    impl Plot for BrokenPlot {
        fn render_png(&self) -> anyhow::Result<Vec<u8>> {
            anyhow::bail!("no backend")
        }
    }

    #[test]
    fn test_png_preserves_pixels() {
        let image = PixelImage::new(2, 1, ColorType::Rgba, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        let decoded = decode_png(&encode_png(&image).unwrap()).unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_encode_array_to_base64_header() {
        let array = NdArray::new(vec![1, 1, 3], vec![255.0, 0.0, 0.0]).unwrap();
        let encoded = encode_array_to_base64(&array).unwrap();
        assert!(encoded.starts_with("data:image/png;base64,iVBORw0KGgo"));
    }

    #[test]
    fn test_encode_array_rejects_flat_array() {
        let array = NdArray::from_vec(vec![0.0, 1.0, 2.0]);
        assert!(matches!(
            encode_array_to_base64(&array),
            Err(CodecError::Model(_))
        ));
    }

    #[test]
    fn test_encode_plot_failure() {
        let result = encode_plot_to_base64(&BrokenPlot);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("no backend"));
    }

    fn gif_bytes() -> Vec<u8> {
        let palette = [255, 0, 0, 0, 0, 255];
        let mut output = Vec::new();
        {
            let mut encoder = gif::Encoder::new(&mut output, 2, 1, &palette).unwrap();
            let frame = gif::Frame {
                width: 2,
                height: 1,
                buffer: std::borrow::Cow::Borrowed(&[0, 1]),
                ..gif::Frame::default()
            };
            encoder.write_frame(&frame).unwrap();
        }
        output
    }

    fn jpeg_bytes(width: u16, height: u16, rgb: [u8; 3]) -> Vec<u8> {
        let pixels: Vec<u8> = rgb
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 3)
            .collect();
        let mut output = Vec::new();
        jpeg_encoder::Encoder::new(&mut output, 100)
            .encode(&pixels, width, height, jpeg_encoder::ColorType::Rgb)
            .unwrap();
        output
    }

    #[test]
    fn test_sniff_formats() {
        let png = encode_png(&PixelImage::new(1, 1, ColorType::Gray, vec![0]).unwrap()).unwrap();
        assert_eq!(ImageFormat::sniff(&png), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::sniff(&jpeg_bytes(8, 8, [0, 0, 0])), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::sniff(b"GIF89a...."), Some(ImageFormat::Gif));
        assert_eq!(ImageFormat::sniff(b"hello"), None);
        assert_eq!(ImageFormat::sniff(&[]), None);
    }

    #[test]
    fn test_decode_jpeg() {
        let image = decode_image(&jpeg_bytes(16, 8, [200, 40, 90])).unwrap();
        assert_eq!((image.width, image.height), (16, 8));
        assert_eq!(image.color_type, ColorType::Rgb);

        // lossy, but a flat color stays within a few levels
        for pixel in image.data.chunks(3) {
            for (got, want) in pixel.iter().zip([200u8, 40, 90]) {
                assert!(got.abs_diff(want) <= 4, "{:?}", pixel);
            }
        }
    }

    #[test]
    fn test_decode_gif_first_frame() {
        let image = decode_image(&gif_bytes()).unwrap();
        assert_eq!(image.color_type, ColorType::Rgba);
        assert_eq!(image.data, vec![255, 0, 0, 255, 0, 0, 255, 255]);
    }

    #[test]
    fn test_decode_truncated_jpeg() {
        let result = decode_image(&[0xFF, 0xD8, 0xFF, 0xE0]);
        assert!(matches!(result, Err(CodecError::Jpeg(_))));
    }

    #[test]
    fn test_decode_rejects_unknown_format() {
        let result = decode_base64_to_image("data:image/png;base64,aGVsbG8=");
        assert!(matches!(result, Err(CodecError::UnknownImageFormat)));
    }
}
