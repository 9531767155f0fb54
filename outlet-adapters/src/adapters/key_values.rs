/// KeyValues adapter
///
/// Renders a mapping as an ordered list of `[key, value]` rows, keeping the
/// mapping's insertion order. A list is assumed to already be rows and is
/// passed through.

use super::registry::Shortcut;
use super::{AdapterError, AdapterKind, AdapterResult, OutputAdapter, WireValue};
use outlet_shared::models::RawValue;
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Aliases resolving to KeyValues
pub const SHORTCUTS: &[Shortcut] = &[Shortcut::new("key_values", &[])];

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeyValuesOptions {
    #[serde(default)]
    label: Option<String>,
}

/// KeyValues output adapter
#[derive(Debug, Clone, Default)]
pub struct KeyValuesAdapter {
    label: Option<String>,
}

impl KeyValuesAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options(options: &JsonValue) -> AdapterResult<Self> {
        let options: KeyValuesOptions = super::options::parse_options("KeyValues", options)?;
        Ok(KeyValuesAdapter {
            label: options.label,
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl OutputAdapter for KeyValuesAdapter {
    fn kind(&self) -> AdapterKind {
        AdapterKind::KeyValues
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn postprocess(&self, value: RawValue) -> AdapterResult<WireValue> {
        tracing::debug!(adapter = self.name(), shape = value.shape_name(), "Postprocessing");

        match value {
            RawValue::Json(JsonValue::Object(map)) => Ok(JsonValue::Array(
                map.into_iter()
                    .map(|(key, value)| JsonValue::Array(vec![JsonValue::String(key), value]))
                    .collect(),
            )),
            RawValue::Json(rows @ JsonValue::Array(_)) => Ok(rows),
            other => Err(AdapterError::invalid_shape(
                self.name(),
                "a mapping or a list of pairs",
                &other,
            )),
        }
    }
}
