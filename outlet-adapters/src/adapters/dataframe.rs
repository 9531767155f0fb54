/// Dataframe adapter
///
/// Renders tabular output as `{"headers": [...], "data": [[...], ...]}`.
///
/// # Value Types
///
/// - **pandas** (default): a `DataTable` (or its `{"headers", "data"}` JSON
///   form); headers come from the table's columns.
/// - **numpy**: a numeric array, converted to nested rows.
/// - **array**: a list of rows.
///
/// For numpy and array a flat sequence is wrapped as a single row and an
/// empty sequence becomes `[[]]`. Only pandas output carries `headers`; the
/// configured `headers` option is display configuration exposed through
/// `template_context()`.

use super::registry::Shortcut;
use super::{AdapterError, AdapterKind, AdapterResult, OutputAdapter, WireValue};
use outlet_shared::models::{DataTable, RawValue};
use serde::Deserialize;
use serde_json::{json, Map, Value as JsonValue};

/// Aliases resolving to a Dataframe
pub const SHORTCUTS: &[Shortcut] = &[
    Shortcut::new("dataframe", &[("type", "pandas")]),
    Shortcut::new("numpy", &[("type", "numpy")]),
    Shortcut::new("matrix", &[("type", "array")]),
    Shortcut::new("list", &[("type", "array")]),
];

value_type! {
    /// Dataframe value types
    DataframeType for "Dataframe" {
        Pandas => "pandas",
        Numpy => "numpy",
        Array => "array",
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DataframeOptions {
    #[serde(rename = "type", default)]
    value_type: Option<String>,

    #[serde(default)]
    headers: Option<Vec<String>>,

    #[serde(default)]
    label: Option<String>,
}

/// Dataframe output adapter
#[derive(Debug, Clone)]
pub struct DataframeAdapter {
    value_type: DataframeType,
    headers: Option<Vec<String>>,
    label: Option<String>,
}

impl DataframeAdapter {
    pub fn new(value_type: DataframeType) -> Self {
        DataframeAdapter {
            value_type,
            headers: None,
            label: None,
        }
    }

    pub fn from_options(options: &JsonValue) -> AdapterResult<Self> {
        let options: DataframeOptions = super::options::parse_options("Dataframe", options)?;
        let value_type = match options.value_type.as_deref() {
            Some(value) => DataframeType::parse(value)?,
            None => DataframeType::Pandas,
        };

        Ok(DataframeAdapter {
            value_type,
            headers: options.headers,
            label: options.label,
        })
    }

    pub fn with_headers<S: Into<String>>(mut self, headers: impl IntoIterator<Item = S>) -> Self {
        self.headers = Some(headers.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn value_type(&self) -> DataframeType {
        self.value_type
    }

    pub fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
    }

    fn table_to_wire(table: &DataTable) -> WireValue {
        json!({"headers": table.columns(), "data": table.rows()})
    }

    /// Wraps a flat sequence as a single row
    fn to_rows(&self, value: JsonValue, original: &'static str) -> AdapterResult<WireValue> {
        let rows = match value {
            JsonValue::Array(items) if items.is_empty() => vec![JsonValue::Array(Vec::new())],
            JsonValue::Array(items) if items[0].is_array() => items,
            JsonValue::Array(items) => vec![JsonValue::Array(items)],
            _ => {
                return Err(AdapterError::InvalidShape {
                    adapter: "Dataframe",
                    expected: "a list of rows",
                    actual: original,
                })
            }
        };

        Ok(json!({ "data": rows }))
    }
}

impl Default for DataframeAdapter {
    fn default() -> Self {
        Self::new(DataframeType::Pandas)
    }
}

impl OutputAdapter for DataframeAdapter {
    fn kind(&self) -> AdapterKind {
        AdapterKind::Dataframe
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn postprocess(&self, value: RawValue) -> AdapterResult<WireValue> {
        tracing::debug!(adapter = self.name(), value_type = %self.value_type, shape = value.shape_name(), "Postprocessing");

        let shape = value.shape_name();
        match (self.value_type, value) {
            (DataframeType::Pandas, RawValue::Table(table)) => Ok(Self::table_to_wire(&table)),
            (DataframeType::Pandas, RawValue::Json(object @ JsonValue::Object(_))) => {
                let table = DataTable::from_json(&object)?;
                Ok(Self::table_to_wire(&table))
            }
            (DataframeType::Pandas, other) => {
                Err(AdapterError::invalid_shape(self.name(), "a table", &other))
            }
            (_, RawValue::Array(array)) => self.to_rows(array.to_nested(), shape),
            (_, RawValue::Json(value)) => self.to_rows(value, shape),
            (_, other) => Err(AdapterError::invalid_shape(
                self.name(),
                "an array or a list of rows",
                &other,
            )),
        }
    }

    fn template_context(&self) -> JsonValue {
        let mut context = Map::new();
        context.insert("label".to_string(), self.label().map_or(JsonValue::Null, JsonValue::from));
        context.insert(
            "headers".to_string(),
            self.headers
                .as_ref()
                .map_or(JsonValue::Null, |headers| json!(headers)),
        );
        JsonValue::Object(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outlet_shared::models::NdArray;

    #[test]
    fn test_flat_list_becomes_one_row() {
        let adapter = DataframeAdapter::new(DataframeType::Array);
        assert_eq!(
            adapter.postprocess(RawValue::from(json!([1, 2, 3]))).unwrap(),
            json!({"data": [[1, 2, 3]]})
        );
    }

    #[test]
    fn test_rows_unchanged() {
        let adapter = DataframeAdapter::new(DataframeType::Array);
        assert_eq!(
            adapter.postprocess(RawValue::from(json!([[1, 2], [3, 4]]))).unwrap(),
            json!({"data": [[1, 2], [3, 4]]})
        );
    }

    #[test]
    fn test_empty_list() {
        let adapter = DataframeAdapter::new(DataframeType::Array);
        assert_eq!(
            adapter.postprocess(RawValue::from(json!([]))).unwrap(),
            json!({"data": [[]]})
        );
    }

    #[test]
    fn test_numpy_array() {
        let adapter = DataframeAdapter::new(DataframeType::Numpy);
        let matrix = NdArray::new(vec![2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(
            adapter.postprocess(RawValue::from(matrix)).unwrap(),
            json!({"data": [[1.0, 2.0], [3.0, 4.0]]})
        );

        let vector = NdArray::from_vec(vec![5.0, 6.0]);
        assert_eq!(
            adapter.postprocess(RawValue::from(vector)).unwrap(),
            json!({"data": [[5.0, 6.0]]})
        );
    }

    #[test]
    fn test_pandas_table() {
        let adapter = DataframeAdapter::default();
        let table = DataTable::new(
            vec!["name".to_string(), "score".to_string()],
            vec![vec![json!("a"), json!(1)], vec![json!("b"), json!(2)]],
        )
        .unwrap();

        assert_eq!(
            adapter.postprocess(RawValue::from(table)).unwrap(),
            json!({"headers": ["name", "score"], "data": [["a", 1], ["b", 2]]})
        );
    }

    #[test]
    fn test_pandas_from_json_form() {
        let adapter = DataframeAdapter::default();
        let wire = adapter
            .postprocess(RawValue::from(json!({"headers": ["x"], "data": [[1], [2]]})))
            .unwrap();
        assert_eq!(wire, json!({"headers": ["x"], "data": [[1], [2]]}));

        let err = adapter
            .postprocess(RawValue::from(json!({"headers": ["x"], "data": [[1, 2]]})))
            .unwrap_err();
        assert!(matches!(err, AdapterError::Model(_)));
    }

    #[test]
    fn test_array_rejects_scalar() {
        let adapter = DataframeAdapter::new(DataframeType::Array);
        let err = adapter.postprocess(RawValue::from(4i64)).unwrap_err();
        assert!(matches!(err, AdapterError::InvalidShape { actual: "number", .. }));
    }

    #[test]
    fn test_headers_in_template_context() {
        let adapter = DataframeAdapter::from_options(&json!({
            "type": "array",
            "headers": ["a", "b"]
        }))
        .unwrap();
        assert_eq!(adapter.headers(), Some(&["a".to_string(), "b".to_string()][..]));
        assert_eq!(
            adapter.template_context(),
            json!({"label": null, "headers": ["a", "b"]})
        );

        let adapter = DataframeAdapter::new(DataframeType::Numpy).with_headers(["x"]);
        assert_eq!(adapter.template_context()["headers"], json!(["x"]));
    }
}
