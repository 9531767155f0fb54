/// HighlightedText adapter
///
/// Passes highlighted spans through unchanged. The optional `color_map`
/// (category to CSS color) is display configuration only; it is handed to
/// the UI through `template_context()` and never applied to values.
///
/// # Configuration
///
/// ```json
/// {
///   "color_map": {"noun": "#ff0000", "verb": "blue"},
///   "label": "Tagged"
/// }
/// ```

use super::registry::Shortcut;
use super::{AdapterError, AdapterKind, AdapterResult, OutputAdapter, WireValue};
use outlet_shared::models::RawValue;
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

/// Aliases resolving to HighlightedText
pub const SHORTCUTS: &[Shortcut] = &[Shortcut::new("highlight", &[])];

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct HighlightedTextOptions {
    #[serde(default)]
    color_map: Option<Map<String, JsonValue>>,

    #[serde(default)]
    label: Option<String>,
}

/// HighlightedText output adapter
#[derive(Debug, Clone, Default)]
pub struct HighlightedTextAdapter {
    color_map: Option<Map<String, JsonValue>>,
    label: Option<String>,
}

impl HighlightedTextAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the adapter from a JSON options object
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::InvalidOptions` if a `color_map` color is not a
    /// string.
    pub fn from_options(options: &JsonValue) -> AdapterResult<Self> {
        let options: HighlightedTextOptions =
            super::options::parse_options("HighlightedText", options)?;

        if let Some(color_map) = &options.color_map {
            if let Some((category, _)) = color_map.iter().find(|(_, color)| !color.is_string()) {
                return Err(AdapterError::InvalidOptions {
                    adapter: "HighlightedText",
                    message: format!("color for category '{}' must be a string", category),
                });
            }
        }

        Ok(HighlightedTextAdapter {
            color_map: options.color_map,
            label: options.label,
        })
    }

    /// Sets the category to color mapping
    pub fn with_color_map<K, V>(mut self, color_map: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.color_map = Some(
            color_map
                .into_iter()
                .map(|(category, color)| (category.into(), JsonValue::String(color.into())))
                .collect(),
        );
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn color_map(&self) -> Option<&Map<String, JsonValue>> {
        self.color_map.as_ref()
    }
}

impl OutputAdapter for HighlightedTextAdapter {
    fn kind(&self) -> AdapterKind {
        AdapterKind::HighlightedText
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn postprocess(&self, value: RawValue) -> AdapterResult<WireValue> {
        tracing::debug!(adapter = self.name(), shape = value.shape_name(), "Postprocessing");

        let shape = value.shape_name();
        value.into_json().ok_or(AdapterError::InvalidShape {
            adapter: "HighlightedText",
            expected: "JSON-representable spans",
            actual: shape,
        })
    }

    fn template_context(&self) -> JsonValue {
        let mut context = Map::new();
        context.insert("label".to_string(), self.label().map_or(JsonValue::Null, JsonValue::from));
        context.insert(
            "color_map".to_string(),
            self.color_map.clone().map_or(JsonValue::Null, JsonValue::Object),
        );
        JsonValue::Object(context)
    }
}
