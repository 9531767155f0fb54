/// Core OutputAdapter trait and types
///
/// This module defines the contract that all output adapters must implement.
/// Adapters convert the raw value returned by a wrapped function into a wire
/// value the transport can serialize, and optionally rebuild a native
/// artifact from a wire value.
///
/// # Adapter Contract
///
/// All adapters must:
/// 1. Implement the `OutputAdapter` trait
/// 2. Fix their configuration at construction (no interior mutability)
/// 3. Return only JSON-representable wire values from `postprocess`
/// 4. Reject unexpected value shapes with `AdapterError::InvalidShape`
/// 5. Keep `rebuild` free of side effects other than its explicit file write
///
/// # Data Flow
///
/// ```text
/// wrapped function
///   └─> RawValue
///         └─> OutputAdapter::postprocess()
///               └─> WireValue (serde_json::Value) ──> transport
///
/// WireValue ──> OutputAdapter::rebuild(dir) ──> artifact reference
/// ```
///
/// # Example
///
/// ```
/// use outlet_adapters::adapters::{AdapterKind, AdapterResult, OutputAdapter, WireValue};
/// use outlet_shared::models::RawValue;
///
/// struct Shout;
///
/// impl OutputAdapter for Shout {
///     fn kind(&self) -> AdapterKind {
///         AdapterKind::Textbox
///     }
///
///     fn label(&self) -> Option<&str> {
///         None
///     }
///
///     fn postprocess(&self, value: RawValue) -> AdapterResult<WireValue> {
///         let text = value.as_json().and_then(|v| v.as_str()).unwrap_or_default();
///         Ok(WireValue::String(text.to_uppercase()))
///     }
/// }
///
/// let wire = Shout.postprocess(RawValue::from("hi")).unwrap();
/// assert_eq!(wire, "HI");
/// ```

use super::AdapterKind;
use outlet_shared::codec::CodecError;
use outlet_shared::models::{ModelError, RawValue};
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use std::path::Path;

/// JSON value handed to the transport
pub type WireValue = JsonValue;

/// Adapter error types
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// Unsupported `type` option value
    #[error("Unknown type: {value}. Please choose from: {}.", quote_choices(.choices))]
    UnsupportedType {
        adapter: &'static str,
        value: String,
        choices: &'static [&'static str],
    },

    /// Options object could not be applied
    #[error("Invalid options for {adapter}: {message}")]
    InvalidOptions {
        adapter: &'static str,
        message: String,
    },

    /// Value passed to postprocess has an unexpected shape
    #[error("The `{adapter}` output interface expects {expected}; got {}", with_article(.actual))]
    InvalidShape {
        adapter: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    /// Alias is not registered
    #[error("No output kind found for alias '{0}'")]
    AliasNotFound(String),

    /// Adapter has no rebuild path
    #[error("The `{0}` output interface does not support rebuild")]
    RebuildUnsupported(&'static str),

    /// Value could not be interpreted (array, image or audio shape)
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Encoding or decoding failed
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Adapter result type alias
pub type AdapterResult<T> = Result<T, AdapterError>;

fn with_article(noun: &str) -> String {
    let article = match noun.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    };
    format!("{} {}", article, noun)
}

fn quote_choices(choices: &[&str]) -> String {
    choices
        .iter()
        .map(|choice| format!("'{}'", choice))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Broad class of an adapter error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad construction options
    Configuration,

    /// Runtime value has the wrong shape
    Shape,

    /// Unknown alias
    AliasNotFound,

    /// Operation not offered by this adapter
    Unsupported,

    /// Encoding or decoding failure
    Codec,

    /// Filesystem failure
    Io,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Configuration => write!(f, "configuration"),
            ErrorCategory::Shape => write!(f, "shape"),
            ErrorCategory::AliasNotFound => write!(f, "alias_not_found"),
            ErrorCategory::Unsupported => write!(f, "unsupported"),
            ErrorCategory::Codec => write!(f, "codec"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

impl AdapterError {
    /// Builds an `InvalidShape` error for `value`
    pub fn invalid_shape(adapter: &'static str, expected: &'static str, value: &RawValue) -> Self {
        AdapterError::InvalidShape {
            adapter,
            expected,
            actual: value.shape_name(),
        }
    }

    /// Classifies the error
    pub fn category(&self) -> ErrorCategory {
        match self {
            AdapterError::UnsupportedType { .. } | AdapterError::InvalidOptions { .. } => {
                ErrorCategory::Configuration
            }
            AdapterError::InvalidShape { .. } | AdapterError::Model(_) => ErrorCategory::Shape,
            AdapterError::Codec(CodecError::Model(_)) => ErrorCategory::Shape,
            AdapterError::AliasNotFound(_) => ErrorCategory::AliasNotFound,
            AdapterError::RebuildUnsupported(_) => ErrorCategory::Unsupported,
            AdapterError::Codec(_) | AdapterError::Json(_) => ErrorCategory::Codec,
            AdapterError::Io(_) => ErrorCategory::Io,
        }
    }
}

/// Core output adapter trait
///
/// All output adapters must implement this trait. Implementations hold only
/// immutable configuration, so one instance can serve concurrent callers.
pub trait OutputAdapter: Send + Sync {
    /// Returns the adapter kind
    fn kind(&self) -> AdapterKind;

    /// Returns the adapter name
    ///
    /// Used in error messages and logging.
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Display label for the output slot
    fn label(&self) -> Option<&str>;

    /// Converts a raw function output into a wire value
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::InvalidShape` if the value does not match the
    /// shapes accepted by the adapter's configuration, or a codec/IO error if
    /// encoding fails.
    fn postprocess(&self, value: RawValue) -> AdapterResult<WireValue>;

    /// Reconstructs an artifact from a wire value
    ///
    /// Default implementation reports that rebuild is unsupported.
    ///
    /// # Arguments
    ///
    /// * `dir` - Directory that may receive a persisted artifact
    /// * `data` - Wire value in its transmitted string form
    fn rebuild(&self, _dir: &Path, _data: &str) -> AdapterResult<WireValue> {
        Err(AdapterError::RebuildUnsupported(self.name()))
    }

    /// Whether `rebuild` is implemented
    fn supports_rebuild(&self) -> bool {
        false
    }

    /// Returns the context handed to the UI template renderer
    ///
    /// Adapters with extra display configuration extend this map.
    fn template_context(&self) -> JsonValue {
        let mut context = Map::new();
        context.insert(
            "label".to_string(),
            self.label().map_or(JsonValue::Null, JsonValue::from),
        );
        JsonValue::Object(context)
    }
}
