/// Row-major numeric array
///
/// `NdArray` is the stand-in for the numpy arrays a wrapped function may
/// return: image pixels, audio samples, numeric matrices. Elements are stored
/// as `f64` in a flat buffer together with the shape.
///
/// # Nested lists
///
/// `to_nested` mirrors numpy's `tolist()`: a `[2, 3]` array becomes a list of
/// two lists of three numbers. `from_nested` is the inverse and rejects
/// ragged or non-numeric input.
///
/// ```
/// use outlet_shared::models::NdArray;
/// use serde_json::json;
///
/// let array = NdArray::from_nested(&json!([[1, 2], [3, 4]])).unwrap();
/// assert_eq!(array.shape(), &[2, 2]);
/// assert_eq!(array.to_nested(), json!([[1.0, 2.0], [3.0, 4.0]]));
/// ```

use super::ModelError;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// N-dimensional array of `f64` values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NdArray {
    shape: Vec<usize>,
    data: Vec<f64>,
}

impl NdArray {
    /// Creates an array from a shape and a row-major buffer
    ///
    /// # Errors
    ///
    /// Returns `ModelError::ShapeMismatch` if `data.len()` is not the product
    /// of the shape dimensions.
    pub fn new(shape: Vec<usize>, data: Vec<f64>) -> Result<Self, ModelError> {
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(ModelError::ShapeMismatch {
                shape,
                expected,
                actual: data.len(),
            });
        }

        Ok(NdArray { shape, data })
    }

    /// Creates a one-dimensional array
    pub fn from_vec(data: Vec<f64>) -> Self {
        NdArray {
            shape: vec![data.len()],
            data,
        }
    }

    /// Builds an array from a nested JSON list
    ///
    /// The shape is taken from the first element at each depth; every other
    /// branch must match it.
    pub fn from_nested(value: &JsonValue) -> Result<Self, ModelError> {
        let mut shape = Vec::new();
        let mut cursor = value;
        while let JsonValue::Array(items) = cursor {
            shape.push(items.len());
            match items.first() {
                Some(first) => cursor = first,
                None => break,
            }
        }

        let mut data = Vec::with_capacity(shape.iter().product());
        flatten(value, &shape, 0, &mut data)?;

        Ok(NdArray { shape, data })
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Number of dimensions
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Converts the array to nested JSON lists (numpy `tolist()`)
    ///
    /// Non-finite elements become `null`.
    pub fn to_nested(&self) -> JsonValue {
        nest(&self.shape, &self.data)
    }
}

fn nest(shape: &[usize], data: &[f64]) -> JsonValue {
    match shape.split_first() {
        None => number(data[0]),
        Some((&len, rest)) => {
            let stride: usize = rest.iter().product();
            JsonValue::Array(
                (0..len)
                    .map(|i| nest(rest, &data[i * stride..(i + 1) * stride]))
                    .collect(),
            )
        }
    }
}

fn flatten(
    value: &JsonValue,
    shape: &[usize],
    depth: usize,
    out: &mut Vec<f64>,
) -> Result<(), ModelError> {
    if depth == shape.len() {
        let x = value
            .as_f64()
            .ok_or_else(|| ModelError::NonNumeric(value.to_string()))?;
        out.push(x);
        return Ok(());
    }

    match value {
        JsonValue::Array(items) if items.len() == shape[depth] => {
            for item in items {
                flatten(item, shape, depth + 1, out)?;
            }
            Ok(())
        }
        _ => Err(ModelError::Ragged(depth)),
    }
}

fn number(x: f64) -> JsonValue {
    serde_json::Number::from_f64(x)
        .map(JsonValue::Number)
        .unwrap_or(JsonValue::Null)
}
