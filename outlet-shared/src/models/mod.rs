/// Value model for adapter inputs
///
/// This module contains the in-process value types that a wrapped function can
/// return, and which output adapters convert into wire values.
///
/// # Models
///
/// - `value`: `RawValue`, the closed set of shapes an adapter may receive
/// - `array`: `NdArray`, a row-major numeric array (numpy-style `tolist`)
/// - `media`: `PixelImage`, `AudioClip` and the `Plot` trait
/// - `table`: `DataTable`, a column-labelled table
///
/// # Example
///
/// ```
/// use outlet_shared::models::{NdArray, RawValue};
///
/// let array = NdArray::new(vec![2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let value = RawValue::from(array);
/// assert_eq!(value.shape_name(), "array");
/// ```

pub mod array;
pub mod media;
pub mod table;
pub mod value;

use thiserror::Error;

pub use array::NdArray;
pub use media::{AudioClip, ColorType, PixelImage, Plot};
pub use table::DataTable;
pub use value::RawValue;

/// Errors raised while constructing or converting model values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Element count does not match the declared shape
    #[error("Shape {shape:?} requires {expected} elements, got {actual}")]
    ShapeMismatch {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    /// Nested list has rows of different lengths
    #[error("Ragged nested list at depth {0}")]
    Ragged(usize),

    /// Nested list contains something other than a number
    #[error("Non-numeric array element: {0}")]
    NonNumeric(String),

    /// Array cannot be interpreted as an image
    #[error("Unsupported image array shape {0:?}; expected [height, width] or [height, width, 1-4]")]
    UnsupportedImageShape(Vec<usize>),

    /// Array cannot be interpreted as audio samples
    #[error("Unsupported audio sample shape {0:?}; expected [samples] or [samples, channels]")]
    UnsupportedAudioShape(Vec<usize>),

    /// Table row width differs from the header count
    #[error("Table row {row} has {actual} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Table JSON is missing or has a malformed field
    #[error("Invalid table field '{field}': {message}")]
    InvalidTable { field: String, message: String },
}
