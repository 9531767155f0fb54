/// File adapter
///
/// Hands a file reference (or its content) to the transport without
/// validation. The `type` option only records what the caller returns:
///
/// - **file** (default): a path on disk, sent as a string
/// - **str**: text content
/// - **binary**: raw bytes, sent as a list of byte values
///
/// Values are not checked against the configured type.

use super::registry::Shortcut;
use super::{AdapterError, AdapterKind, AdapterResult, OutputAdapter, WireValue};
use outlet_shared::models::RawValue;
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Aliases resolving to File
pub const SHORTCUTS: &[Shortcut] = &[Shortcut::new("file", &[])];

value_type! {
    /// File value types
    FileType for "File" {
        File => "file",
        Str => "str",
        Binary => "binary",
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileOptions {
    #[serde(rename = "type", default)]
    value_type: Option<String>,

    #[serde(default)]
    label: Option<String>,
}

/// File output adapter
#[derive(Debug, Clone)]
pub struct FileAdapter {
    value_type: FileType,
    label: Option<String>,
}

impl FileAdapter {
    pub fn new(value_type: FileType) -> Self {
        FileAdapter {
            value_type,
            label: None,
        }
    }

    pub fn from_options(options: &JsonValue) -> AdapterResult<Self> {
        let options: FileOptions = super::options::parse_options("File", options)?;
        let value_type = match options.value_type.as_deref() {
            Some(value) => FileType::parse(value)?,
            None => FileType::File,
        };

        Ok(FileAdapter {
            value_type,
            label: options.label,
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn value_type(&self) -> FileType {
        self.value_type
    }
}

impl Default for FileAdapter {
    fn default() -> Self {
        Self::new(FileType::File)
    }
}

impl OutputAdapter for FileAdapter {
    fn kind(&self) -> AdapterKind {
        AdapterKind::File
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn postprocess(&self, value: RawValue) -> AdapterResult<WireValue> {
        tracing::debug!(adapter = self.name(), value_type = %self.value_type, shape = value.shape_name(), "Postprocessing");

        let shape = value.shape_name();
        value.into_json().ok_or(AdapterError::InvalidShape {
            adapter: "File",
            expected: "a path, text or bytes",
            actual: shape,
        })
    }
}
