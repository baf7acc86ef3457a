use super::*;

#[test]
fn defaults_are_valid() {
    let opts = ShaderNodeOpts::default();
    assert!(opts.validate().is_ok());
    assert_eq!(opts.parser.marker, "//OVE");
    assert_eq!(opts.handle_size_px, 8.0);
    assert!(opts.clamp_drag);
    assert_eq!(opts.default_label, "unnamed");
}

#[test]
fn partial_json_fills_defaults() {
    let opts = ShaderNodeOpts::from_json_str(r#"{ "clamp_drag": false, "parser": {} }"#).unwrap();
    assert!(!opts.clamp_drag);
    assert_eq!(opts.parser.marker, "//OVE");
    assert_eq!(opts.handle_size_px, 8.0);
}

#[test]
fn invalid_values_are_rejected() {
    let mut opts = ShaderNodeOpts::default();
    opts.handle_size_px = 0.0;
    assert!(opts.validate().is_err());

    let mut opts = ShaderNodeOpts::default();
    opts.parser.marker = "  ".to_string();
    assert!(opts.validate().is_err());

    let mut opts = ShaderNodeOpts::default();
    opts.parser.marker = "// OVE".to_string();
    assert!(opts.validate().is_err());

    let mut opts = ShaderNodeOpts::default();
    opts.default_label = String::new();
    assert!(opts.validate().is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = ShaderNodeOpts::from_json_str("{ not json").unwrap_err();
    assert!(err.to_string().starts_with("serialization error:"));

    let err = ShaderNodeOpts::from_json_str(r#"{ "handle_size_px": -1.0 }"#).unwrap_err();
    assert!(err.to_string().starts_with("validation error:"));
}
