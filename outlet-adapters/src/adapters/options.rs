/// Construction options shared by all adapters
///
/// Adapters are configured from a JSON object with named, optional fields,
/// e.g. `{"type": "plot", "label": "Figure"}`. Unknown fields are rejected.
/// The `type` field of each adapter is parsed into a closed enum generated
/// by `value_type!`, so an unsupported value fails at construction with the
/// list of valid choices.

use super::{AdapterError, AdapterResult};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value as JsonValue};

/// Declares the closed set of `type` values an adapter accepts
macro_rules! value_type {
    (
        $(#[$meta:meta])*
        $name:ident for $adapter:literal {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Accepted `type` strings
            pub const CHOICES: &'static [&'static str] = &[$($text),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            /// Parses a `type` option value
            pub fn parse(value: &str) -> $crate::adapters::AdapterResult<Self> {
                match value {
                    $($text => Ok($name::$variant),)+
                    other => Err($crate::adapters::AdapterError::UnsupportedType {
                        adapter: $adapter,
                        value: other.to_string(),
                        choices: Self::CHOICES,
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Deserializes an options object; `null` means "all defaults"
pub(crate) fn parse_options<T: DeserializeOwned>(
    adapter: &'static str,
    options: &JsonValue,
) -> AdapterResult<T> {
    let options = match options {
        JsonValue::Null => JsonValue::Object(Map::new()),
        JsonValue::Object(_) => options.clone(),
        other => {
            return Err(AdapterError::InvalidOptions {
                adapter,
                message: format!("expected an options object, got {}", other),
            })
        }
    };

    serde_json::from_value(options).map_err(|e| AdapterError::InvalidOptions {
        adapter,
        message: e.to_string(),
    })
}

/// Overlays `overrides` on top of `base`, key by key
pub(crate) fn merge_options(
    adapter: &'static str,
    base: JsonValue,
    overrides: &JsonValue,
) -> AdapterResult<JsonValue> {
    let mut merged = match base {
        JsonValue::Object(map) => map,
        _ => Map::new(),
    };

    match overrides {
        JsonValue::Null => {}
        JsonValue::Object(map) => {
            for (key, value) in map {
                merged.insert(key.clone(), value.clone());
            }
        }
        other => {
            return Err(AdapterError::InvalidOptions {
                adapter,
                message: format!("expected an options object, got {}", other),
            })
        }
    }

    Ok(JsonValue::Object(merged))
}
