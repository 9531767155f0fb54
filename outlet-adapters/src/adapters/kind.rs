/// Output adapter kinds
///
/// `AdapterKind` is the closed set of output kinds. Each kind's module
/// declares its own static alias table (`SHORTCUTS`); the registry is the
/// union of those tables.

use super::registry::Shortcut;
use super::{
    audio, dataframe, file, highlighted_text, html, image, json, key_values, label, textbox,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Output adapter kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdapterKind {
    /// Text or number rendered in a textbox
    Textbox,

    /// Classification label with optional confidences
    Label,

    /// Image rendered from an array, image, file or plot
    Image,

    /// Table of key/value pairs
    KeyValues,

    /// Text spans highlighted by category or score
    HighlightedText,

    /// Playable audio
    Audio,

    /// Arbitrary JSON
    Json,

    /// Raw HTML
    Html,

    /// Downloadable file
    File,

    /// Spreadsheet-style table
    Dataframe,
}

impl AdapterKind {
    /// Every kind, in declaration order
    pub const ALL: [AdapterKind; 10] = [
        AdapterKind::Textbox,
        AdapterKind::Label,
        AdapterKind::Image,
        AdapterKind::KeyValues,
        AdapterKind::HighlightedText,
        AdapterKind::Audio,
        AdapterKind::Json,
        AdapterKind::Html,
        AdapterKind::File,
        AdapterKind::Dataframe,
    ];

    /// Display name used in messages
    pub fn name(&self) -> &'static str {
        match self {
            AdapterKind::Textbox => "Textbox",
            AdapterKind::Label => "Label",
            AdapterKind::Image => "Image",
            AdapterKind::KeyValues => "KeyValues",
            AdapterKind::HighlightedText => "HighlightedText",
            AdapterKind::Audio => "Audio",
            AdapterKind::Json => "JSON",
            AdapterKind::Html => "HTML",
            AdapterKind::File => "File",
            AdapterKind::Dataframe => "Dataframe",
        }
    }

    /// Parses a kind name, ignoring ASCII case
    pub fn from_name(name: &str) -> Option<Self> {
        AdapterKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    /// Alias table declared by this kind
    pub fn shortcuts(&self) -> &'static [Shortcut] {
        match self {
            AdapterKind::Textbox => textbox::SHORTCUTS,
            AdapterKind::Label => label::SHORTCUTS,
            AdapterKind::Image => image::SHORTCUTS,
            AdapterKind::KeyValues => key_values::SHORTCUTS,
            AdapterKind::HighlightedText => highlighted_text::SHORTCUTS,
            AdapterKind::Audio => audio::SHORTCUTS,
            AdapterKind::Json => json::SHORTCUTS,
            AdapterKind::Html => html::SHORTCUTS,
            AdapterKind::File => file::SHORTCUTS,
            AdapterKind::Dataframe => dataframe::SHORTCUTS,
        }
    }
}

impl fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
