//! Pipeline Asset Tests
//!
//! Tests for:
//! - Canonical defaults
//! - JSON parsing with partial documents
//! - Validation of names and clear colour
//! - Load / save through the filesystem
//! - Pipeline creation from an asset

use toy_rp::headless::{HeadlessContext, HostCall};
use toy_rp::{Extent, PipelineAsset, PipelineError};

// ============================================================================
// Defaults
// ============================================================================

#[test]
fn default_asset_uses_canonical_names() {
    let asset = PipelineAsset::default();
    assert_eq!(asset.lighting_shader, "ToyRP/LightPass");
    assert_eq!(asset.geometry_pass_tag, "gbuffer");
    assert_eq!(asset.sample_name, "Render Camera");
    assert_eq!(asset.lighting_buffer_name, "LightPass");
    assert!(asset.validate().is_ok());
}

#[test]
fn default_clear_color_is_gray() {
    let color = PipelineAsset::default().clear_color();
    assert_eq!(color, wgpu::Color { r: 0.5, g: 0.5, b: 0.5, a: 1.0 });
}

// ============================================================================
// JSON
// ============================================================================

#[test]
fn partial_json_falls_back_to_defaults() {
    let asset = PipelineAsset::from_json(r#"{ "clear_color": [0.0, 0.0, 0.0, 1.0] }"#).unwrap();
    assert_eq!(asset.clear_color, [0.0, 0.0, 0.0, 1.0]);
    assert_eq!(asset.lighting_shader, "ToyRP/LightPass");
    assert_eq!(asset.geometry_pass_tag, "gbuffer");
}

#[test]
fn empty_json_object_is_default() {
    assert_eq!(PipelineAsset::from_json("{}").unwrap(), PipelineAsset::default());
}

#[test]
fn json_keeps_custom_fields() {
    let asset = PipelineAsset {
        lighting_shader: "Custom/Deferred".into(),
        clear_color: [0.1, 0.2, 0.3, 1.0],
        ..PipelineAsset::default()
    };
    let json = asset.to_json().unwrap();
    assert!(json.contains("Custom/Deferred"));
    assert_eq!(PipelineAsset::from_json(&json).unwrap(), asset);
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = PipelineAsset::from_json("{ clear_color: ").unwrap_err();
    assert!(matches!(err, PipelineError::Json(_)));
}

#[test]
fn wrong_field_type_is_a_parse_error() {
    let err = PipelineAsset::from_json(r#"{ "clear_color": "gray" }"#).unwrap_err();
    assert!(matches!(err, PipelineError::Json(_)));
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn empty_lighting_shader_is_rejected() {
    let asset = PipelineAsset {
        lighting_shader: "".into(),
        ..PipelineAsset::default()
    };
    let err = asset.validate().unwrap_err();
    assert!(
        matches!(&err, PipelineError::InvalidAsset(msg) if msg.contains("lighting_shader")),
        "unexpected error: {err}"
    );
}

#[test]
fn whitespace_pass_tag_is_rejected() {
    let asset = PipelineAsset {
        geometry_pass_tag: "   ".into(),
        ..PipelineAsset::default()
    };
    assert!(matches!(
        asset.validate(),
        Err(PipelineError::InvalidAsset(msg)) if msg.contains("geometry_pass_tag")
    ));
}

#[test]
fn non_finite_clear_color_is_rejected() {
    let asset = PipelineAsset {
        clear_color: [0.5, f64::NAN, 0.5, 1.0],
        ..PipelineAsset::default()
    };
    assert!(matches!(asset.validate(), Err(PipelineError::InvalidAsset(_))));
}

#[test]
fn invalid_asset_creates_no_pipeline() {
    let mut host = HeadlessContext::new();
    let asset = PipelineAsset {
        sample_name: "".into(),
        ..PipelineAsset::default()
    };

    assert!(asset.create_pipeline(&mut host, Extent::new(64, 64)).is_err());
    assert!(host.calls().is_empty());
}

// ============================================================================
// Filesystem
// ============================================================================

#[test]
fn save_then_load() {
    let path = std::env::temp_dir().join(format!("toy_rp_asset_{}.json", std::process::id()));
    let asset = PipelineAsset {
        clear_color: [0.0, 0.0, 0.0, 0.0],
        lighting_buffer_name: "Lighting".into(),
        ..PipelineAsset::default()
    };

    asset.save(&path).unwrap();
    let loaded = PipelineAsset::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, asset);
}

#[test]
fn missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join("toy_rp_definitely_missing_asset.json");
    let err = PipelineAsset::load(&path).unwrap_err();
    assert!(matches!(err, PipelineError::Io(_)));
}

// ============================================================================
// Pipeline Creation
// ============================================================================

#[test]
fn create_pipeline_allocates_gbuffer_at_screen_size() {
    let mut host = HeadlessContext::new();
    let pipeline = PipelineAsset::default()
        .create_pipeline(&mut host, Extent::new(1280, 720))
        .unwrap();

    assert_eq!(pipeline.frame_count(), 0);
    assert_eq!(pipeline.camera_renderer().gbuffer().extent(), Extent::new(1280, 720));
    assert_eq!(host.count(|c| matches!(c, HostCall::CreateRenderTexture { .. })), 5);
    assert_eq!(pipeline.asset(), &PipelineAsset::default());
}

#[test]
fn create_pipeline_rejects_zero_screen() {
    let mut host = HeadlessContext::new();
    let err = PipelineAsset::default()
        .create_pipeline(&mut host, Extent::new(0, 0))
        .unwrap_err();
    assert!(matches!(err, PipelineError::InvalidExtent { .. }));
}
