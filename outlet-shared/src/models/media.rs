/// Media values: images, audio clips and plots
///
/// # Images
///
/// `PixelImage` is a decoded 8-bit image (the PIL side of an image output).
/// It converts to and from `NdArray` using numpy's layout: `[height, width]`
/// for grayscale and `[height, width, channels]` otherwise.
///
/// # Audio
///
/// `AudioClip` pairs a sample rate with an `NdArray` of shape `[samples]`
/// (mono) or `[samples, channels]` (interleaved).
///
/// # Plots
///
/// A `Plot` is any figure that can render itself to PNG bytes.

use super::{ModelError, NdArray};
use serde::{Deserialize, Serialize};

/// Pixel layout of an 8-bit image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorType {
    /// Grayscale (1 channel)
    Gray,
    /// Grayscale with alpha (2 channels)
    GrayAlpha,
    /// RGB (3 channels)
    Rgb,
    /// RGBA (4 channels)
    Rgba,
}

impl ColorType {
    /// Number of channels
    pub fn channels(&self) -> usize {
        match self {
            ColorType::Gray => 1,
            ColorType::GrayAlpha => 2,
            ColorType::Rgb => 3,
            ColorType::Rgba => 4,
        }
    }

    /// Picks the color type for a channel count
    pub fn from_channels(channels: usize) -> Option<Self> {
        match channels {
            1 => Some(ColorType::Gray),
            2 => Some(ColorType::GrayAlpha),
            3 => Some(ColorType::Rgb),
            4 => Some(ColorType::Rgba),
            _ => None,
        }
    }
}

/// Decoded 8-bit image
#[derive(Debug, Clone, PartialEq)]
pub struct PixelImage {
    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,

    /// Pixel layout
    pub color_type: ColorType,

    /// Row-major pixel bytes, top to bottom
    pub data: Vec<u8>,
}

impl PixelImage {
    /// Creates an image, checking the buffer size against the dimensions
    pub fn new(
        width: u32,
        height: u32,
        color_type: ColorType,
        data: Vec<u8>,
    ) -> Result<Self, ModelError> {
        let expected = width as usize * height as usize * color_type.channels();
        if data.len() != expected {
            return Err(ModelError::ShapeMismatch {
                shape: vec![height as usize, width as usize, color_type.channels()],
                expected,
                actual: data.len(),
            });
        }

        Ok(PixelImage {
            width,
            height,
            color_type,
            data,
        })
    }

    /// Row stride in bytes
    pub fn stride(&self) -> usize {
        self.width as usize * self.color_type.channels()
    }

    /// Converts the image to a pixel array
    ///
    /// Grayscale images become `[height, width]`; everything else
    /// `[height, width, channels]`.
    pub fn to_array(&self) -> Result<NdArray, ModelError> {
        let mut shape = vec![self.height as usize, self.width as usize];
        if self.color_type != ColorType::Gray {
            shape.push(self.color_type.channels());
        }

        let data = self.data.iter().map(|&b| f64::from(b)).collect();
        NdArray::new(shape, data)
    }

    /// Interprets a pixel array as an image
    ///
    /// Values are rounded and clamped into `0..=255`.
    pub fn from_array(array: &NdArray) -> Result<Self, ModelError> {
        let (height, width, color_type) = match *array.shape() {
            [h, w] => (h, w, ColorType::Gray),
            [h, w, c] => match ColorType::from_channels(c) {
                Some(color_type) => (h, w, color_type),
                None => return Err(ModelError::UnsupportedImageShape(array.shape().to_vec())),
            },
            _ => return Err(ModelError::UnsupportedImageShape(array.shape().to_vec())),
        };

        let height = u32::try_from(height)
            .map_err(|_| ModelError::UnsupportedImageShape(array.shape().to_vec()))?;
        let width = u32::try_from(width)
            .map_err(|_| ModelError::UnsupportedImageShape(array.shape().to_vec()))?;

        let data = array.data().iter().map(|&x| to_u8(x)).collect();
        PixelImage::new(width, height, color_type, data)
    }
}

fn to_u8(x: f64) -> u8 {
    x.round().clamp(0.0, 255.0) as u8
}

/// Sampled audio
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    /// Samples per second
    pub sample_rate: u32,

    /// `[samples]` or `[samples, channels]`
    pub samples: NdArray,
}

impl AudioClip {
    pub fn new(sample_rate: u32, samples: NdArray) -> Self {
        AudioClip {
            sample_rate,
            samples,
        }
    }

    /// Channel count implied by the sample shape
    pub fn channels(&self) -> Result<u16, ModelError> {
        let unsupported = || ModelError::UnsupportedAudioShape(self.samples.shape().to_vec());
        match *self.samples.shape() {
            [_] => Ok(1),
            [_, channels] if channels > 0 => u16::try_from(channels).map_err(|_| unsupported()),
            _ => Err(unsupported()),
        }
    }
}

/// A figure that can render itself to PNG
pub trait Plot: Send + Sync {
    /// Renders the figure as encoded PNG bytes
    fn render_png(&self) -> anyhow::Result<Vec<u8>>;
}

/// A decoded image is already a rendered figure
impl Plot for PixelImage {
    fn render_png(&self) -> anyhow::Result<Vec<u8>> {
        Ok(crate::codec::encode_png(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_type_channels() {
        assert_eq!(ColorType::Gray.channels(), 1);
        assert_eq!(ColorType::GrayAlpha.channels(), 2);
        assert_eq!(ColorType::Rgb.channels(), 3);
        assert_eq!(ColorType::Rgba.channels(), 4);
        assert_eq!(ColorType::from_channels(5), None);
    }

    #[test]
    fn test_pixel_image_size_check() {
        let result = PixelImage::new(2, 2, ColorType::Rgb, vec![0; 11]);
        assert!(result.is_err());
    }

    #[test]
    fn test_image_to_array_shapes() {
        let rgb = PixelImage::new(3, 2, ColorType::Rgb, vec![10; 18]).unwrap();
        assert_eq!(rgb.to_array().unwrap().shape(), &[2, 3, 3]);
        assert_eq!(rgb.stride(), 9);

        let gray = PixelImage::new(3, 2, ColorType::Gray, vec![10; 6]).unwrap();
        assert_eq!(gray.to_array().unwrap().shape(), &[2, 3]);
    }

    #[test]
    fn test_image_from_array_clamps() {
        let array = NdArray::new(vec![1, 3], vec![-5.0, 127.6, 300.0]).unwrap();
        let image = PixelImage::from_array(&array).unwrap();
        assert_eq!(image.color_type, ColorType::Gray);
        assert_eq!(image.width, 3);
        assert_eq!(image.height, 1);
        assert_eq!(image.data, vec![0, 128, 255]);
    }

    #[test]
    fn test_image_from_array_rejects_bad_shape() {
        let flat = NdArray::from_vec(vec![1.0, 2.0]);
        assert!(matches!(
            PixelImage::from_array(&flat),
            Err(ModelError::UnsupportedImageShape(_))
        ));

        let five = NdArray::new(vec![1, 1, 5], vec![0.0; 5]).unwrap();
        assert!(PixelImage::from_array(&five).is_err());
    }

    #[test]
    fn test_audio_channels() {
        let mono = AudioClip::new(8000, NdArray::from_vec(vec![0.0; 4]));
        assert_eq!(mono.channels().unwrap(), 1);

        let stereo = AudioClip::new(8000, NdArray::new(vec![4, 2], vec![0.0; 8]).unwrap());
        assert_eq!(stereo.channels().unwrap(), 2);

        let cube = AudioClip::new(8000, NdArray::new(vec![1, 1, 1], vec![0.0]).unwrap());
        assert!(cube.channels().is_err());
    }
}
