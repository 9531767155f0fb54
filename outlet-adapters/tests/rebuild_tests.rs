/// Integration tests for rebuilding artifacts from wire values

mod common;

use common::{sample_image, sample_jpeg, Scratch};
use outlet_adapters::adapters::{
    create_adapter, create_adapter_with, AdapterError, AdapterKind, ErrorCategory,
};
use outlet_shared::codec::{decode_png, encode_array_to_base64};
use outlet_shared::models::{ColorType, RawValue};
use serde_json::json;

#[test]
fn test_image_rebuild_writes_timestamped_png() {
    let scratch = Scratch::new();
    let adapter = create_adapter("pil").unwrap();
    let wire = adapter.postprocess(RawValue::from(sample_image())).unwrap();

    let reference = adapter.rebuild(&scratch.path(), wire.as_str().unwrap()).unwrap();
    let filename = reference.as_str().unwrap().to_string();

    assert_eq!(scratch.file_names(), vec![filename.clone()]);
    let stamp = filename
        .strip_prefix("output_")
        .and_then(|rest| rest.strip_suffix(".png"))
        .unwrap();
    assert!(chrono::NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d-%H-%M-%S").is_ok());

    let bytes = std::fs::read(scratch.path().join(&filename)).unwrap();
    assert_eq!(decode_png(&bytes).unwrap(), sample_image());
}

#[test]
fn test_image_rebuild_accepts_bare_base64() {
    let scratch = Scratch::new();
    let adapter = create_adapter("image").unwrap();
    let data_url = encode_array_to_base64(&sample_image().to_array().unwrap()).unwrap();
    let bare = data_url.split_once(',').unwrap().1;

    let reference = adapter.rebuild(&scratch.path(), bare).unwrap();
    assert!(reference.as_str().unwrap().starts_with("output_"));
}

#[test]
fn test_image_rebuild_from_jpeg_file() {
    let inputs = Scratch::new();
    let photo = inputs.write("photo.jpg", &sample_jpeg());

    let adapter = create_adapter_with("image", &json!({"type": "file"})).unwrap();
    let wire = adapter.postprocess(RawValue::from(photo)).unwrap();
    assert!(wire.as_str().unwrap().starts_with("data:image/jpeg;base64,/9j/"));

    let outputs = Scratch::new();
    let reference = adapter.rebuild(&outputs.path(), wire.as_str().unwrap()).unwrap();
    let filename = reference.as_str().unwrap();
    assert!(filename.ends_with(".png"));

    let bytes = std::fs::read(outputs.path().join(filename)).unwrap();
    let image = decode_png(&bytes).unwrap();
    assert_eq!((image.width, image.height), (16, 8));
    assert_eq!(image.color_type, ColorType::Rgb);
}

#[test]
fn test_label_rebuild_writes_nothing() {
    let scratch = Scratch::new();
    let adapter = create_adapter("label").unwrap();
    let wire = adapter.postprocess(RawValue::from(json!({"x": 0.1, "y": 0.3}))).unwrap();

    let rebuilt = adapter.rebuild(&scratch.path(), &wire.to_string()).unwrap();
    assert_eq!(rebuilt, wire);
    assert!(scratch.file_names().is_empty());
}

#[test]
fn test_rebuild_unsupported_elsewhere() {
    let scratch = Scratch::new();
    for kind in AdapterKind::ALL {
        let adapter = outlet_adapters::adapters::build_adapter(kind, &json!({})).unwrap();
        let expected = matches!(kind, AdapterKind::Label | AdapterKind::Image);
        assert_eq!(adapter.supports_rebuild(), expected, "{}", kind);

        if !expected {
            let err = adapter.rebuild(&scratch.path(), "{}").unwrap_err();
            assert!(matches!(err, AdapterError::RebuildUnsupported(_)));
            assert_eq!(err.category(), ErrorCategory::Unsupported);
        }
    }
}

#[test]
fn test_image_rebuild_missing_dir() {
    let scratch = Scratch::new();
    let adapter = create_adapter("pil").unwrap();
    let wire = adapter.postprocess(RawValue::from(sample_image())).unwrap();

    let err = adapter
        .rebuild(&scratch.path().join("missing"), wire.as_str().unwrap())
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Io);
}
