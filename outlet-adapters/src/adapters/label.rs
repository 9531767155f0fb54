/// Label adapter
///
/// Renders a classification result. A plain string or number becomes the
/// label itself (booleans as `"True"`/`"False"`); a mapping of label to
/// confidence is ranked by confidence (highest first, ties keep their original
/// order) and optionally truncated to the top `num_top_classes` entries.
///
/// # Wire Format
///
/// ```json
/// {
///   "label": "dog",
///   "confidences": [
///     {"label": "dog", "confidence": 0.9},
///     {"label": "bird", "confidence": 0.5}
///   ]
/// }
/// ```
///
/// # Configuration
///
/// ```json
/// {
///   "num_top_classes": 3,   // optional, must be > 0 (alias: "top_k")
///   "label": "Prediction"   // optional display label
/// }
/// ```

use super::registry::Shortcut;
use super::{AdapterError, AdapterKind, AdapterResult, OutputAdapter, WireValue};
use outlet_shared::models::RawValue;
use serde::Deserialize;
use serde_json::{json, Map, Number, Value as JsonValue};
use std::path::Path;

/// Aliases resolving to a Label
pub const SHORTCUTS: &[Shortcut] = &[Shortcut::new("label", &[])];

const EXPECTED: &str =
    "a string, a number, a boolean, or a mapping of labels to numeric confidences";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LabelOptions {
    #[serde(default, alias = "top_k")]
    num_top_classes: Option<usize>,

    #[serde(default)]
    label: Option<String>,
}

/// Label output adapter
#[derive(Debug, Clone, Default)]
pub struct LabelAdapter {
    num_top_classes: Option<usize>,
    label: Option<String>,
}

impl LabelAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the adapter from a JSON options object
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::InvalidOptions` if `num_top_classes` is 0.
    pub fn from_options(options: &JsonValue) -> AdapterResult<Self> {
        let options: LabelOptions = super::options::parse_options("Label", options)?;
        let mut adapter = LabelAdapter {
            num_top_classes: None,
            label: options.label,
        };
        if let Some(top) = options.num_top_classes {
            adapter = adapter.with_top_classes(top)?;
        }
        Ok(adapter)
    }

    /// Keeps only the `top` highest-confidence entries
    pub fn with_top_classes(mut self, top: usize) -> AdapterResult<Self> {
        if top == 0 {
            return Err(AdapterError::InvalidOptions {
                adapter: "Label",
                message: "num_top_classes must be > 0".to_string(),
            });
        }
        self.num_top_classes = Some(top);
        Ok(self)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn num_top_classes(&self) -> Option<usize> {
        self.num_top_classes
    }

    fn rank(&self, scores: Map<String, JsonValue>) -> AdapterResult<WireValue> {
        let mut ranked: Vec<(String, Number, f64)> = Vec::with_capacity(scores.len());
        for (label, confidence) in scores {
            let number = match confidence {
                JsonValue::Number(number) => number,
                other => {
                    return Err(AdapterError::invalid_shape(
                        self.name(),
                        EXPECTED,
                        &RawValue::from(other),
                    ))
                }
            };
            let score = number.as_f64().unwrap_or(f64::NAN);
            ranked.push((label, number, score));
        }

        // stable: equal confidences keep insertion order
        ranked.sort_by(|a, b| b.2.total_cmp(&a.2));
        if let Some(top) = self.num_top_classes {
            ranked.truncate(top);
        }

        let top_label = ranked
            .first()
            .map(|(label, _, _)| label.clone())
            .unwrap_or_default();
        let confidences: Vec<JsonValue> = ranked
            .into_iter()
            .map(|(label, confidence, _)| json!({"label": label, "confidence": confidence}))
            .collect();

        Ok(json!({"label": top_label, "confidences": confidences}))
    }
}

impl OutputAdapter for LabelAdapter {
    fn kind(&self) -> AdapterKind {
        AdapterKind::Label
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn postprocess(&self, value: RawValue) -> AdapterResult<WireValue> {
        tracing::debug!(adapter = self.name(), shape = value.shape_name(), "Postprocessing");

        match value {
            RawValue::Json(JsonValue::String(s)) => Ok(json!({ "label": s })),
            RawValue::Json(JsonValue::Number(n)) => Ok(json!({ "label": n.to_string() })),
            RawValue::Json(JsonValue::Bool(b)) => {
                let label = if b { "True" } else { "False" };
                Ok(json!({ "label": label }))
            }
            RawValue::Json(JsonValue::Object(scores)) if !scores.is_empty() => self.rank(scores),
            other => Err(AdapterError::invalid_shape(self.name(), EXPECTED, &other)),
        }
    }

    /// Parses the transmitted JSON back into a value; no file is written
    fn rebuild(&self, _dir: &Path, data: &str) -> AdapterResult<WireValue> {
        tracing::debug!(adapter = self.name(), bytes = data.len(), "Rebuilding");
        Ok(serde_json::from_str(data)?)
    }

    fn supports_rebuild(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidences_sorted_descending() {
        let adapter = LabelAdapter::new();
        let wire = adapter
            .postprocess(RawValue::from(json!({"cat": 0.2, "dog": 0.9, "bird": 0.5})))
            .unwrap();

        assert_eq!(
            wire,
            json!({
                "label": "dog",
                "confidences": [
                    {"label": "dog", "confidence": 0.9},
                    {"label": "bird", "confidence": 0.5},
                    {"label": "cat", "confidence": 0.2}
                ]
            })
        );
    }

    #[test]
    fn test_top_classes_truncates() {
        let adapter = LabelAdapter::new().with_top_classes(1).unwrap();
        let wire = adapter
            .postprocess(RawValue::from(json!({"cat": 0.2, "dog": 0.9, "bird": 0.5})))
            .unwrap();

        assert_eq!(wire["label"], "dog");
        assert_eq!(wire["confidences"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let adapter = LabelAdapter::new();
        let wire = adapter
            .postprocess(RawValue::from(json!({"b": 0.5, "a": 0.5, "c": 0.7})))
            .unwrap();
        let order: Vec<_> = wire["confidences"]
            .as_array()
            .unwrap()
            .iter()
            .map(|entry| entry["label"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(order, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_scalar_labels() {
        let adapter = LabelAdapter::new();
        assert_eq!(adapter.postprocess(RawValue::from(7i64)).unwrap(), json!({"label": "7"}));
        assert_eq!(
            adapter.postprocess(RawValue::from("spam")).unwrap(),
            json!({"label": "spam"})
        );
    }

    #[test]
    fn test_bool_labels() {
        let adapter = LabelAdapter::new();
        assert_eq!(
            adapter.postprocess(RawValue::from(json!(true))).unwrap(),
            json!({"label": "True"})
        );
        assert_eq!(
            adapter.postprocess(RawValue::from(json!(false))).unwrap(),
            json!({"label": "False"})
        );
    }

    #[test]
    fn test_rejects_other_shapes() {
        let adapter = LabelAdapter::new();
        for value in [json!([1, 2]), json!({}), json!({"cat": "high"}), json!(null)] {
            let err = adapter.postprocess(RawValue::from(value.clone())).unwrap_err();
            assert!(
                matches!(err, AdapterError::InvalidShape { adapter: "Label", .. }),
                "accepted {}",
                value
            );
        }
    }

    #[test]
    fn test_options() {
        let adapter = LabelAdapter::from_options(&json!({"top_k": 2})).unwrap();
        assert_eq!(adapter.num_top_classes(), Some(2));

        let adapter = LabelAdapter::from_options(&json!({"num_top_classes": 3})).unwrap();
        assert_eq!(adapter.num_top_classes(), Some(3));

        let err = LabelAdapter::from_options(&json!({"num_top_classes": 0})).unwrap_err();
        assert!(matches!(err, AdapterError::InvalidOptions { .. }));
    }

    #[test]
    fn test_rebuild_parses_json() {
        let adapter = LabelAdapter::new();
        let rebuilt = adapter
            .rebuild(Path::new("/nonexistent"), r#"{"label": "dog"}"#)
            .unwrap();
        assert_eq!(rebuilt, json!({"label": "dog"}));
        assert!(adapter.supports_rebuild());

        let err = adapter.rebuild(Path::new("."), "not json").unwrap_err();
        assert!(matches!(err, AdapterError::Json(_)));
    }
}
