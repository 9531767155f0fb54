/// Image adapter
///
/// Encodes an image-like output as a data URL and rebuilds transmitted
/// images into PNG files.
///
/// # Value Types
///
/// - **numpy** (default): pixel array `[h, w]` or `[h, w, c]`, encoded as PNG
/// - **pil**: decoded `PixelImage`, converted to an array then encoded as PNG
/// - **file**: path to an image on disk, MIME type guessed from the extension
/// - **plot**: a figure that renders itself to PNG
///
/// The boolean `plot` option is deprecated; `"plot": true` forces
/// `type = "plot"` and logs a warning once, at construction.
///
/// # Rebuild
///
/// `rebuild(dir, data)` decodes a base64 PNG, JPEG or GIF payload (with or
/// without a data-URL header), re-encodes it as PNG and saves it as
/// `output_<YYYY-MM-DD-HH-MM-SS>.png` in `dir`. Two rebuilds within the same second write the same file name.

use super::registry::Shortcut;
use super::{AdapterError, AdapterKind, AdapterResult, OutputAdapter, WireValue};
use outlet_shared::codec::{
    decode_base64_to_image, encode_array_to_base64, encode_file_to_base64, encode_plot_to_base64,
    encode_png,
};
use outlet_shared::models::{NdArray, RawValue};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::fs;
use std::path::Path;

/// Aliases resolving to an Image
pub const SHORTCUTS: &[Shortcut] = &[
    Shortcut::new("image", &[]),
    Shortcut::new("plot", &[("type", "plot")]),
    Shortcut::new("pil", &[("type", "pil")]),
];

value_type! {
    /// Image value types
    ImageType for "Image" {
        Numpy => "numpy",
        Pil => "pil",
        File => "file",
        Plot => "plot",
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ImageOptions {
    #[serde(rename = "type", default)]
    value_type: Option<String>,

    /// Deprecated, use `type = "plot"`
    #[serde(default)]
    plot: bool,

    #[serde(default)]
    label: Option<String>,
}

/// Image output adapter
#[derive(Debug, Clone)]
pub struct ImageAdapter {
    value_type: ImageType,
    label: Option<String>,
}

impl ImageAdapter {
    pub fn new(value_type: ImageType) -> Self {
        ImageAdapter {
            value_type,
            label: None,
        }
    }

    /// Builds the adapter from a JSON options object
    pub fn from_options(options: &JsonValue) -> AdapterResult<Self> {
        let options: ImageOptions = super::options::parse_options("Image", options)?;
        let mut value_type = match options.value_type.as_deref() {
            Some(value) => ImageType::parse(value)?,
            None => ImageType::Numpy,
        };

        if options.plot {
            tracing::warn!(
                adapter = "Image",
                "The 'plot' option is deprecated, use type=\"plot\" instead"
            );
            value_type = ImageType::Plot;
        }

        Ok(ImageAdapter {
            value_type,
            label: options.label,
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn value_type(&self) -> ImageType {
        self.value_type
    }

    fn encode_array(&self, value: RawValue) -> AdapterResult<String> {
        let array = match value {
            RawValue::Array(array) => array,
            RawValue::Json(nested @ JsonValue::Array(_)) => NdArray::from_nested(&nested)?,
            other => {
                return Err(AdapterError::invalid_shape(
                    self.name(),
                    "a pixel array",
                    &other,
                ))
            }
        };
        Ok(encode_array_to_base64(&array)?)
    }
}

impl Default for ImageAdapter {
    fn default() -> Self {
        Self::new(ImageType::Numpy)
    }
}

impl OutputAdapter for ImageAdapter {
    fn kind(&self) -> AdapterKind {
        AdapterKind::Image
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn postprocess(&self, value: RawValue) -> AdapterResult<WireValue> {
        tracing::debug!(adapter = self.name(), value_type = %self.value_type, shape = value.shape_name(), "Postprocessing");

        let encoded = match self.value_type {
            ImageType::Numpy => self.encode_array(value)?,
            ImageType::Pil => match value {
                RawValue::Image(image) => encode_array_to_base64(&image.to_array()?)?,
                other => return Err(AdapterError::invalid_shape(self.name(), "an image", &other)),
            },
            ImageType::File => match value.as_path() {
                Some(path) => encode_file_to_base64(path, None)?,
                None => return Err(AdapterError::invalid_shape(self.name(), "a file path", &value)),
            },
            ImageType::Plot => match value {
                RawValue::Plot(plot) => encode_plot_to_base64(plot.as_ref())?,
                other => return Err(AdapterError::invalid_shape(self.name(), "a plot", &other)),
            },
        };

        Ok(WireValue::String(encoded))
    }

    /// Saves the transmitted image under `dir` and returns its file name
    fn rebuild(&self, dir: &Path, data: &str) -> AdapterResult<WireValue> {
        let image = decode_base64_to_image(data)?;
        let png = encode_png(&image)?;

        let filename = chrono::Local::now()
            .format("output_%Y-%m-%d-%H-%M-%S.png")
            .to_string();
        fs::write(dir.join(&filename), png)?;

        tracing::info!(
            adapter = self.name(),
            dir = %dir.display(),
            filename = %filename,
            width = image.width,
            height = image.height,
            "Rebuilt image"
        );

        Ok(WireValue::String(filename))
    }

    fn supports_rebuild(&self) -> bool {
        true
    }
}
