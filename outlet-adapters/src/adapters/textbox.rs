/// Textbox adapter
///
/// Renders a function output as text. With `type = "str"` the value is
/// passed through unchanged; with `type = "number"` numbers are rendered in
/// their canonical text form (`3.5` becomes `"3.5"`).
///
/// # Configuration
///
/// ```json
/// {
///   "type": "str",       // "str" (default) or "number"
///   "label": "Answer"    // optional display label
/// }
/// ```

use super::registry::Shortcut;
use super::{AdapterError, AdapterKind, AdapterResult, OutputAdapter, WireValue};
use outlet_shared::models::RawValue;
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Aliases resolving to a Textbox
pub const SHORTCUTS: &[Shortcut] = &[
    Shortcut::new("text", &[("type", "str")]),
    Shortcut::new("textbox", &[("type", "str")]),
    Shortcut::new("number", &[("type", "number")]),
];

value_type! {
    /// Textbox value types
    TextboxType for "Textbox" {
        Str => "str",
        Number => "number",
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TextboxOptions {
    #[serde(rename = "type", default)]
    value_type: Option<String>,

    #[serde(default)]
    label: Option<String>,
}

/// Textbox output adapter
#[derive(Debug, Clone)]
pub struct TextboxAdapter {
    value_type: TextboxType,
    label: Option<String>,
}

impl TextboxAdapter {
    pub fn new(value_type: TextboxType) -> Self {
        TextboxAdapter {
            value_type,
            label: None,
        }
    }

    /// Builds the adapter from a JSON options object
    pub fn from_options(options: &JsonValue) -> AdapterResult<Self> {
        let options: TextboxOptions = super::options::parse_options("Textbox", options)?;
        let value_type = match options.value_type.as_deref() {
            Some(value) => TextboxType::parse(value)?,
            None => TextboxType::Str,
        };

        Ok(TextboxAdapter {
            value_type,
            label: options.label,
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn value_type(&self) -> TextboxType {
        self.value_type
    }
}

impl Default for TextboxAdapter {
    fn default() -> Self {
        Self::new(TextboxType::Str)
    }
}

impl OutputAdapter for TextboxAdapter {
    fn kind(&self) -> AdapterKind {
        AdapterKind::Textbox
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn postprocess(&self, value: RawValue) -> AdapterResult<WireValue> {
        tracing::debug!(adapter = self.name(), value_type = %self.value_type, shape = value.shape_name(), "Postprocessing");

        match self.value_type {
            TextboxType::Str => match value {
                RawValue::Json(value) => Ok(value),
                other => Err(AdapterError::invalid_shape(self.name(), "a string", &other)),
            },
            TextboxType::Number => match value {
                RawValue::Json(JsonValue::Number(n)) => Ok(WireValue::String(n.to_string())),
                RawValue::Json(JsonValue::String(s)) => Ok(WireValue::String(s)),
                other => Err(AdapterError::invalid_shape(self.name(), "a number", &other)),
            },
        }
    }
}
