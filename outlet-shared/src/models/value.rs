/// Raw function output
///
/// `RawValue` is what a wrapped function hands to an output adapter. It is a
/// closed set of shapes; each adapter documents which shapes it accepts and
/// rejects the rest at run time.
///
/// Plain data (strings, numbers, booleans, null, lists, insertion-ordered
/// maps) travels as `RawValue::Json`. Everything that needs encoding before it
/// can go over the wire has its own variant.
///
/// # Example
///
/// ```
/// use outlet_shared::models::RawValue;
/// use serde_json::json;
///
/// let value = RawValue::from(json!({"cat": 0.2, "dog": 0.9}));
/// assert_eq!(value.shape_name(), "mapping");
///
/// let path = RawValue::from("/tmp/photo.png");
/// assert!(path.as_path().is_some());
/// ```

use super::{AudioClip, DataTable, NdArray, PixelImage, Plot};
use serde_json::Value as JsonValue;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Value returned by a wrapped function
#[derive(Clone)]
pub enum RawValue {
    /// Plain JSON data
    Json(JsonValue),

    /// Numeric array (numpy-style)
    Array(NdArray),

    /// Decoded image (PIL-style)
    Image(PixelImage),

    /// Figure that renders itself to PNG
    Plot(Arc<dyn Plot>),

    /// Column-labelled table (pandas-style)
    Table(DataTable),

    /// Sample rate plus samples
    Audio(AudioClip),

    /// Path to a file on disk
    Path(PathBuf),

    /// Binary content
    Bytes(Vec<u8>),
}

impl RawValue {
    /// Wraps a plot
    pub fn plot(plot: impl Plot + 'static) -> Self {
        RawValue::Plot(Arc::new(plot))
    }

    /// Short name of the value's shape, used in error messages and logs
    pub fn shape_name(&self) -> &'static str {
        match self {
            RawValue::Json(JsonValue::Null) => "null",
            RawValue::Json(JsonValue::Bool(_)) => "bool",
            RawValue::Json(JsonValue::Number(_)) => "number",
            RawValue::Json(JsonValue::String(_)) => "string",
            RawValue::Json(JsonValue::Array(_)) => "list",
            RawValue::Json(JsonValue::Object(_)) => "mapping",
            RawValue::Array(_) => "array",
            RawValue::Image(_) => "image",
            RawValue::Plot(_) => "plot",
            RawValue::Table(_) => "table",
            RawValue::Audio(_) => "audio",
            RawValue::Path(_) => "path",
            RawValue::Bytes(_) => "bytes",
        }
    }

    pub fn as_json(&self) -> Option<&JsonValue> {
        match self {
            RawValue::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the value as a filesystem path
    ///
    /// Accepts both `RawValue::Path` and a JSON string.
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            RawValue::Path(path) => Some(path.as_path()),
            RawValue::Json(JsonValue::String(s)) => Some(Path::new(s)),
            _ => None,
        }
    }

    /// Converts the value into JSON if it has a direct JSON form
    ///
    /// Paths become strings and bytes become a list of numbers. Arrays,
    /// images, plots, tables and audio need an adapter-specific encoding and
    /// return `None`.
    pub fn into_json(self) -> Option<JsonValue> {
        match self {
            RawValue::Json(value) => Some(value),
            RawValue::Path(path) => Some(JsonValue::String(path.to_string_lossy().into_owned())),
            RawValue::Bytes(bytes) => Some(JsonValue::Array(
                bytes.into_iter().map(JsonValue::from).collect(),
            )),
            RawValue::Array(_)
            | RawValue::Image(_)
            | RawValue::Plot(_)
            | RawValue::Table(_)
            | RawValue::Audio(_) => None,
        }
    }
}

impl fmt::Debug for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Json(value) => f.debug_tuple("Json").field(value).finish(),
            RawValue::Array(array) => f.debug_tuple("Array").field(&array.shape()).finish(),
            RawValue::Image(image) => f
                .debug_struct("Image")
                .field("width", &image.width)
                .field("height", &image.height)
                .field("color_type", &image.color_type)
                .finish(),
            RawValue::Plot(_) => f.write_str("Plot(..)"),
            RawValue::Table(table) => f.debug_tuple("Table").field(&table.columns()).finish(),
            RawValue::Audio(clip) => f
                .debug_struct("Audio")
                .field("sample_rate", &clip.sample_rate)
                .field("shape", &clip.samples.shape())
                .finish(),
            RawValue::Path(path) => f.debug_tuple("Path").field(path).finish(),
            RawValue::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
        }
    }
}

impl From<JsonValue> for RawValue {
    fn from(value: JsonValue) -> Self {
        RawValue::Json(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Json(JsonValue::String(value.to_string()))
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Json(JsonValue::String(value))
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Json(JsonValue::from(value))
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Json(JsonValue::from(value))
    }
}

impl From<NdArray> for RawValue {
    fn from(value: NdArray) -> Self {
        RawValue::Array(value)
    }
}

impl From<PixelImage> for RawValue {
    fn from(value: PixelImage) -> Self {
        RawValue::Image(value)
    }
}

impl From<DataTable> for RawValue {
    fn from(value: DataTable) -> Self {
        RawValue::Table(value)
    }
}

impl From<AudioClip> for RawValue {
    fn from(value: AudioClip) -> Self {
        RawValue::Audio(value)
    }
}

impl From<PathBuf> for RawValue {
    fn from(value: PathBuf) -> Self {
        RawValue::Path(value)
    }
}

impl From<Vec<u8>> for RawValue {
    fn from(value: Vec<u8>) -> Self {
        RawValue::Bytes(value)
    }
}
