/// JSON adapter
///
/// Passes JSON data through. A bare string or path is sent in its JSON-quoted
/// form (`hi` becomes `"\"hi\""`) so the client can parse every value the same
/// way.

use super::registry::Shortcut;
use super::{AdapterError, AdapterKind, AdapterResult, OutputAdapter, WireValue};
use outlet_shared::models::RawValue;
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Aliases resolving to JSON
pub const SHORTCUTS: &[Shortcut] = &[Shortcut::new("json", &[])];

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct JsonOptions {
    #[serde(default)]
    label: Option<String>,
}

/// JSON output adapter
#[derive(Debug, Clone, Default)]
pub struct JsonAdapter {
    label: Option<String>,
}

impl JsonAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options(options: &JsonValue) -> AdapterResult<Self> {
        let options: JsonOptions = super::options::parse_options("JSON", options)?;
        Ok(JsonAdapter {
            label: options.label,
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl OutputAdapter for JsonAdapter {
    fn kind(&self) -> AdapterKind {
        AdapterKind::Json
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn postprocess(&self, value: RawValue) -> AdapterResult<WireValue> {
        tracing::debug!(adapter = self.name(), shape = value.shape_name(), "Postprocessing");

        match value {
            RawValue::Json(JsonValue::String(s)) => {
                Ok(WireValue::String(serde_json::to_string(&s)?))
            }
            RawValue::Path(path) => Ok(WireValue::String(serde_json::to_string(
                &path.to_string_lossy(),
            )?)),
            RawValue::Json(value) => Ok(value),
            RawValue::Array(array) => Ok(array.to_nested()),
            RawValue::Table(table) => Ok(serde_json::to_value(&table)?),
            other => {
                let shape = other.shape_name();
                other.into_json().ok_or(AdapterError::InvalidShape {
                    adapter: "JSON",
                    expected: "JSON-representable data",
                    actual: shape,
                })
            }
        }
    }
}
