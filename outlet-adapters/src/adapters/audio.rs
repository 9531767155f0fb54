/// Audio adapter
///
/// Encodes audio as a `data:audio/wav;base64,...` URL.
///
/// # Value Types
///
/// - **numpy** (default): an `AudioClip`. The clip is written to a uniquely
///   named temporary WAV file (PCM for whole-number samples, 32-bit float
///   otherwise), which is encoded and then removed
///   whether or not encoding succeeds.
/// - **file**: path to an existing audio file, encoded with the `audio/wav` tag.

use super::registry::Shortcut;
use super::{AdapterError, AdapterKind, AdapterResult, OutputAdapter, WireValue};
use outlet_shared::codec::{encode_file_to_base64, write_wav};
use outlet_shared::models::{AudioClip, RawValue};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::path::PathBuf;

/// Aliases resolving to Audio
pub const SHORTCUTS: &[Shortcut] = &[Shortcut::new("audio", &[])];

const WAV_MIME: &str = "audio/wav";

value_type! {
    /// Audio value types
    AudioType for "Audio" {
        Numpy => "numpy",
        File => "file",
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct AudioOptions {
    #[serde(rename = "type", default)]
    value_type: Option<String>,

    #[serde(default)]
    label: Option<String>,
}

/// Audio output adapter
#[derive(Debug, Clone)]
pub struct AudioAdapter {
    value_type: AudioType,
    label: Option<String>,

    /// Where temporary WAV files go (system temp dir when unset)
    scratch_dir: Option<PathBuf>,
}

impl AudioAdapter {
    pub fn new(value_type: AudioType) -> Self {
        AudioAdapter {
            value_type,
            label: None,
            scratch_dir: None,
        }
    }

    pub fn from_options(options: &JsonValue) -> AdapterResult<Self> {
        let options: AudioOptions = super::options::parse_options("Audio", options)?;
        let value_type = match options.value_type.as_deref() {
            Some(value) => AudioType::parse(value)?,
            None => AudioType::Numpy,
        };

        Ok(AudioAdapter {
            value_type,
            label: options.label,
            scratch_dir: None,
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Writes temporary WAV files under `dir` instead of the system temp dir
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    pub fn value_type(&self) -> AudioType {
        self.value_type
    }

    fn encode_clip(&self, clip: &AudioClip) -> AdapterResult<String> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("outlet-audio-").suffix(".wav");
        let mut file = match &self.scratch_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };

        // removed when `file` drops, on every return path
        write_wav(clip, file.as_file_mut())?;
        let encoded = encode_file_to_base64(file.path(), Some(WAV_MIME))?;

        tracing::debug!(
            adapter = self.name(),
            sample_rate = clip.sample_rate,
            samples = clip.samples.len(),
            "Encoded audio clip"
        );

        Ok(encoded)
    }
}

impl Default for AudioAdapter {
    fn default() -> Self {
        Self::new(AudioType::Numpy)
    }
}

impl OutputAdapter for AudioAdapter {
    fn kind(&self) -> AdapterKind {
        AdapterKind::Audio
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn postprocess(&self, value: RawValue) -> AdapterResult<WireValue> {
        tracing::debug!(adapter = self.name(), value_type = %self.value_type, shape = value.shape_name(), "Postprocessing");

        let encoded = match self.value_type {
            AudioType::Numpy => match &value {
                RawValue::Audio(clip) => self.encode_clip(clip)?,
                other => {
                    return Err(AdapterError::invalid_shape(
                        self.name(),
                        "a (sample rate, samples) clip",
                        other,
                    ))
                }
            },
            AudioType::File => match value.as_path() {
                Some(path) => encode_file_to_base64(path, Some(WAV_MIME))?,
                None => return Err(AdapterError::invalid_shape(self.name(), "a file path", &value)),
            },
        };

        Ok(WireValue::String(encoded))
    }
}
