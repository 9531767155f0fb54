/// Alias registry
///
/// Maps short aliases ("text", "plot", "numpy", ...) to an adapter kind plus
/// preset options. The lookup table is the union of every kind's static
/// `SHORTCUTS` table, built once on first use. Adding a kind means adding it
/// to `AdapterKind::ALL` and giving its module a `SHORTCUTS` table.
///
/// # Example
///
/// ```
/// use outlet_adapters::adapters::registry::{create_adapter, resolve_alias};
/// use outlet_adapters::adapters::AdapterKind;
///
/// let entry = resolve_alias("plot").unwrap();
/// assert_eq!(entry.kind, AdapterKind::Image);
///
/// let adapter = create_adapter("number").unwrap();
/// assert_eq!(adapter.name(), "Textbox");
/// ```

use super::{
    AdapterError, AdapterKind, AdapterResult, AudioAdapter, DataframeAdapter, FileAdapter,
    HighlightedTextAdapter, HtmlAdapter, ImageAdapter, JsonAdapter, KeyValuesAdapter,
    LabelAdapter, OutputAdapter, TextboxAdapter,
};
use once_cell::sync::Lazy;
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;

/// One alias declared by a kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    /// Alias a caller may use instead of explicit options
    pub alias: &'static str,

    /// Options applied when the alias is used (`type` presets)
    pub preset: &'static [(&'static str, &'static str)],
}

impl Shortcut {
    pub const fn new(alias: &'static str, preset: &'static [(&'static str, &'static str)]) -> Self {
        Shortcut { alias, preset }
    }
}

/// Registry entry: alias resolved to a kind and preset options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcutEntry {
    pub alias: &'static str,
    pub kind: AdapterKind,
    pub preset: &'static [(&'static str, &'static str)],
}

impl ShortcutEntry {
    /// Preset options as a JSON object
    pub fn preset_options(&self) -> JsonValue {
        let map: Map<String, JsonValue> = self
            .preset
            .iter()
            .map(|(key, value)| (key.to_string(), JsonValue::from(*value)))
            .collect();
        JsonValue::Object(map)
    }
}

static REGISTRY: Lazy<HashMap<&'static str, ShortcutEntry>> = Lazy::new(|| {
    let mut registry = HashMap::new();
    for kind in AdapterKind::ALL {
        for shortcut in kind.shortcuts() {
            let previous = registry.insert(
                shortcut.alias,
                ShortcutEntry {
                    alias: shortcut.alias,
                    kind,
                    preset: shortcut.preset,
                },
            );
            debug_assert!(
                previous.is_none(),
                "alias '{}' claimed by more than one kind",
                shortcut.alias
            );
        }
    }
    registry
});

/// Resolves an alias to its kind and preset options
///
/// # Errors
///
/// Returns `AdapterError::AliasNotFound` for an unregistered alias.
pub fn resolve_alias(alias: &str) -> AdapterResult<&'static ShortcutEntry> {
    REGISTRY
        .get(alias)
        .ok_or_else(|| AdapterError::AliasNotFound(alias.to_string()))
}

/// All registered aliases, sorted by alias
pub fn aliases() -> Vec<&'static ShortcutEntry> {
    let mut entries: Vec<_> = REGISTRY.values().collect();
    entries.sort_by_key(|entry| entry.alias);
    entries
}

/// Builds an adapter of `kind` from an options object
pub fn build_adapter(kind: AdapterKind, options: &JsonValue) -> AdapterResult<Box<dyn OutputAdapter>> {
    let adapter: Box<dyn OutputAdapter> = match kind {
        AdapterKind::Textbox => Box::new(TextboxAdapter::from_options(options)?),
        AdapterKind::Label => Box::new(LabelAdapter::from_options(options)?),
        AdapterKind::Image => Box::new(ImageAdapter::from_options(options)?),
        AdapterKind::KeyValues => Box::new(KeyValuesAdapter::from_options(options)?),
        AdapterKind::HighlightedText => Box::new(HighlightedTextAdapter::from_options(options)?),
        AdapterKind::Audio => Box::new(AudioAdapter::from_options(options)?),
        AdapterKind::Json => Box::new(JsonAdapter::from_options(options)?),
        AdapterKind::Html => Box::new(HtmlAdapter::from_options(options)?),
        AdapterKind::File => Box::new(FileAdapter::from_options(options)?),
        AdapterKind::Dataframe => Box::new(DataframeAdapter::from_options(options)?),
    };

    Ok(adapter)
}

/// Creates an adapter from an alias with its preset options
pub fn create_adapter(alias: &str) -> AdapterResult<Box<dyn OutputAdapter>> {
    create_adapter_with(alias, &JsonValue::Null)
}

/// Creates an adapter from an alias, applying `overrides` over the preset
pub fn create_adapter_with(
    alias: &str,
    overrides: &JsonValue,
) -> AdapterResult<Box<dyn OutputAdapter>> {
    let entry = resolve_alias(alias)?;
    let options = super::options::merge_options(entry.kind.name(), entry.preset_options(), overrides)?;

    tracing::debug!(alias = %alias, kind = %entry.kind, options = %options, "Creating adapter");
    build_adapter(entry.kind, &options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_no_alias_collisions() {
        let mut seen = HashSet::new();
        for kind in AdapterKind::ALL {
            for shortcut in kind.shortcuts() {
                assert!(
                    seen.insert(shortcut.alias),
                    "alias '{}' declared twice",
                    shortcut.alias
                );
            }
        }
        assert_eq!(seen.len(), aliases().len());
    }

    #[test]
    fn test_alias_table() {
        let expected = [
            ("text", AdapterKind::Textbox, json!({"type": "str"})),
            ("textbox", AdapterKind::Textbox, json!({"type": "str"})),
            ("number", AdapterKind::Textbox, json!({"type": "number"})),
            ("label", AdapterKind::Label, json!({})),
            ("image", AdapterKind::Image, json!({})),
            ("plot", AdapterKind::Image, json!({"type": "plot"})),
            ("pil", AdapterKind::Image, json!({"type": "pil"})),
            ("key_values", AdapterKind::KeyValues, json!({})),
            ("highlight", AdapterKind::HighlightedText, json!({})),
            ("audio", AdapterKind::Audio, json!({})),
            ("json", AdapterKind::Json, json!({})),
            ("html", AdapterKind::Html, json!({})),
            ("file", AdapterKind::File, json!({})),
            ("dataframe", AdapterKind::Dataframe, json!({"type": "pandas"})),
            ("numpy", AdapterKind::Dataframe, json!({"type": "numpy"})),
            ("matrix", AdapterKind::Dataframe, json!({"type": "array"})),
            ("list", AdapterKind::Dataframe, json!({"type": "array"})),
        ];

        for (alias, kind, preset) in expected.iter() {
            let entry = resolve_alias(alias).unwrap();
            assert_eq!(entry.kind, *kind, "alias {}", alias);
            assert_eq!(&entry.preset_options(), preset, "alias {}", alias);
        }
        assert_eq!(aliases().len(), expected.len());
    }

    #[test]
    fn test_unknown_alias() {
        let err = resolve_alias("video").unwrap_err();
        assert!(matches!(err, AdapterError::AliasNotFound(ref a) if a == "video"));
        assert!(create_adapter("video").is_err());
    }

    #[test]
    fn test_aliases_sorted() {
        let names: Vec<_> = aliases().iter().map(|e| e.alias).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_create_adapter_with_overrides() {
        let adapter = create_adapter_with("label", &json!({"label": "Prediction"})).unwrap();
        assert_eq!(adapter.label(), Some("Prediction"));

        let err = create_adapter_with("image", &json!({"type": "bogus"}))
            .err()
            .expect("unknown image type accepted");
        assert!(err.to_string().contains("'numpy', 'pil', 'file', 'plot'"));
    }

    #[test]
    fn test_build_adapter_for_every_kind() {
        for kind in AdapterKind::ALL {
            let adapter = build_adapter(kind, &JsonValue::Null).unwrap();
            assert_eq!(adapter.kind(), kind);
        }
    }
}
