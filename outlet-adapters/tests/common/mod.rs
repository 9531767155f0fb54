/// Common test utilities for integration tests
///
/// This module provides shared fixtures:
/// - Sample raw values for every adapter kind
/// - A scratch directory for rebuilt artifacts

use outlet_adapters::adapters::AdapterKind;
use outlet_shared::models::{AudioClip, ColorType, DataTable, NdArray, PixelImage, RawValue};
use serde_json::json;
use std::path::PathBuf;
use tempfile::TempDir;

/// Scratch directory removed when dropped
#[allow(dead_code)]
pub struct Scratch {
    dir: TempDir,
}

#[allow(dead_code)]
impl Scratch {
    pub fn new() -> Self {
        Scratch {
            dir: tempfile::tempdir().expect("failed to create scratch dir"),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Names of the files currently in the directory
    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.dir.path())
            .expect("failed to list scratch dir")
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Writes a file and returns its path
    pub fn write(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("failed to write scratch file");
        path
    }
}

/// 3x2 RGB gradient
pub fn sample_image() -> PixelImage {
    let data: Vec<u8> = (0..18).map(|i| (i * 14) as u8).collect();
    PixelImage::new(3, 2, ColorType::Rgb, data).expect("valid image")
}

/// 16x8 flat-color JPEG
#[allow(dead_code)]
pub fn sample_jpeg() -> Vec<u8> {
    let pixels: Vec<u8> = [30u8, 140, 220]
        .iter()
        .copied()
        .cycle()
        .take(16 * 8 * 3)
        .collect();
    let mut bytes = Vec::new();
    jpeg_encoder::Encoder::new(&mut bytes, 100)
        .encode(&pixels, 16, 8, jpeg_encoder::ColorType::Rgb)
        .expect("valid jpeg");
    bytes
}

#[allow(dead_code)]
pub fn sample_clip() -> AudioClip {
    let samples: Vec<f64> = (0..64).map(|i| ((i as f64) * 0.3).sin() * 8000.0).collect();
    AudioClip::new(8000, NdArray::from_vec(samples))
}

#[allow(dead_code)]
pub fn sample_table() -> DataTable {
    DataTable::new(
        vec!["city".to_string(), "population".to_string()],
        vec![
            vec![json!("Lisbon"), json!(545_000)],
            vec![json!("Porto"), json!(232_000)],
        ],
    )
    .expect("valid table")
}

/// A value each kind accepts with its default options
#[allow(dead_code)]
pub fn accepted_value(kind: AdapterKind) -> RawValue {
    match kind {
        AdapterKind::Textbox => RawValue::from("hello"),
        AdapterKind::Label => RawValue::from(json!({"cat": 0.2, "dog": 0.9})),
        AdapterKind::Image => RawValue::from(sample_image().to_array().expect("valid array")),
        AdapterKind::KeyValues => RawValue::from(json!({"a": 1, "b": [2, 3]})),
        AdapterKind::HighlightedText => RawValue::from(json!([["hi", "greeting"]])),
        AdapterKind::Audio => RawValue::from(sample_clip()),
        AdapterKind::Json => RawValue::from(json!({"nested": {"ok": true}})),
        AdapterKind::Html => RawValue::from("<b>bold</b>"),
        AdapterKind::File => RawValue::from(PathBuf::from("/tmp/report.pdf")),
        AdapterKind::Dataframe => RawValue::from(sample_table()),
    }
}
