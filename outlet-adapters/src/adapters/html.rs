/// HTML adapter
///
/// Raw markup passed through as-is. Nothing is escaped or validated.

use super::registry::Shortcut;
use super::{AdapterError, AdapterKind, AdapterResult, OutputAdapter, WireValue};
use outlet_shared::models::RawValue;
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Aliases resolving to HTML
pub const SHORTCUTS: &[Shortcut] = &[Shortcut::new("html", &[])];

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct HtmlOptions {
    #[serde(default)]
    label: Option<String>,
}

/// HTML output adapter
#[derive(Debug, Clone, Default)]
pub struct HtmlAdapter {
    label: Option<String>,
}

impl HtmlAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options(options: &JsonValue) -> AdapterResult<Self> {
        let options: HtmlOptions = super::options::parse_options("HTML", options)?;
        Ok(HtmlAdapter {
            label: options.label,
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl OutputAdapter for HtmlAdapter {
    fn kind(&self) -> AdapterKind {
        AdapterKind::Html
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn postprocess(&self, value: RawValue) -> AdapterResult<WireValue> {
        tracing::debug!(adapter = self.name(), shape = value.shape_name(), "Postprocessing");

        let shape = value.shape_name();
        value.into_json().ok_or(AdapterError::InvalidShape {
            adapter: "HTML",
            expected: "markup",
            actual: shape,
        })
    }
}
