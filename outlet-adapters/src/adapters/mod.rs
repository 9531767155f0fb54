/// Output adapters
///
/// This module defines the adapter trait and one implementation per output
/// kind. An adapter turns the raw value returned by a wrapped function into
/// a wire value (a base64 data URL or plain JSON) a UI client can display.
///
/// # Architecture
///
/// Each adapter:
/// - Implements the `OutputAdapter` trait
/// - Is configured once, from a JSON options object
/// - Validates the shape of every value it is given
/// - Declares its own aliases in a static `SHORTCUTS` table
///
/// # Adapter Kinds
///
/// - **Textbox**: text or numbers
/// - **Label**: classification labels with ranked confidences (rebuildable)
/// - **Image**: arrays, images, files and plots as PNG data URLs (rebuildable)
/// - **KeyValues**: mappings as ordered key/value rows
/// - **HighlightedText**: highlighted spans, with an optional color map
/// - **Audio**: clips and files as WAV data URLs
/// - **JSON**, **HTML**, **File**: pass-through
/// - **Dataframe**: tables, arrays and row lists
///
/// # Example
///
/// ```
/// use outlet_adapters::adapters::{create_adapter, OutputAdapter};
/// use outlet_shared::models::RawValue;
/// use serde_json::json;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let adapter = create_adapter("label")?;
/// let wire = adapter.postprocess(RawValue::from(json!({"cat": 0.2, "dog": 0.9})))?;
/// assert_eq!(wire["label"], "dog");
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```

#[macro_use]
mod options;

pub mod adapter_trait;
pub mod audio;
pub mod dataframe;
pub mod file;
pub mod highlighted_text;
pub mod html;
pub mod image;
pub mod json;
pub mod key_values;
pub mod kind;
pub mod label;
pub mod registry;
pub mod textbox;

// Re-export main types
pub use adapter_trait::{AdapterError, AdapterResult, ErrorCategory, OutputAdapter, WireValue};
pub use audio::{AudioAdapter, AudioType};
pub use dataframe::{DataframeAdapter, DataframeType};
pub use file::{FileAdapter, FileType};
pub use highlighted_text::HighlightedTextAdapter;
pub use html::HtmlAdapter;
pub use image::{ImageAdapter, ImageType};
pub use json::JsonAdapter;
pub use key_values::KeyValuesAdapter;
pub use kind::AdapterKind;
pub use label::LabelAdapter;
pub use registry::{
    aliases, build_adapter, create_adapter, create_adapter_with, resolve_alias, Shortcut,
    ShortcutEntry,
};
pub use textbox::{TextboxAdapter, TextboxType};
