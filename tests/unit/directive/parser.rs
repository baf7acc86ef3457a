use super::*;

fn parse(src: &str) -> ParseOutput {
    parse_directives(src, &ParserOpts::default())
}

fn issues(out: &ParseOutput) -> Vec<(usize, String)> {
    out.errors.iter().map(|e| (e.line, e.issue.clone())).collect()
}

const FULL: &str = "\
//OVE shader_name: Ripple
//OVE shader_description: concentric
//OVE shader_description: waves
//OVE shader_version: 1.2

//OVE name: Input
//OVE type: TEXTURE
//OVE flag: NOT_KEYFRAMABLE
uniform sampler2D tex_in;

//OVE name: Center
//OVE type: VEC2
//OVE default: 0.5, 0.5
uniform vec2 center;

//OVE name: Strength
//OVE type: FLOAT
//OVE min: 0
//OVE max: 2
//OVE default: 1.5
//OVE description: how far pixels move
uniform float strength;

//OVE name: Mode
//OVE type: COMBO
//OVE option: Sine
//OVE option: Square
//OVE default: Square
uniform int mode;

//OVE end
//OVE name: ignored
//OVE type: BOGUS
";

#[test]
fn full_block_parses_in_order() {
    let out = parse(FULL);
    assert!(out.errors.is_empty(), "{:?}", out.errors);

    assert_eq!(out.metadata.name.as_deref(), Some("Ripple"));
    assert_eq!(
        out.metadata.description.as_deref(),
        Some("concentric waves")
    );
    assert_eq!(out.metadata.version.as_deref(), Some("1.2"));

    let names: Vec<&str> = out
        .directives
        .iter()
        .map(|d| d.uniform_name.as_str())
        .collect();
    assert_eq!(names, vec!["tex_in", "center", "strength", "mode"]);

    let input = &out.directives[0];
    assert_eq!(input.human_name, "Input");
    assert_eq!(input.param_type, ParamType::Texture);
    assert!(input.flags.not_keyframable);
    assert_eq!(input.line, 6);

    assert_eq!(
        out.directives[1].param_type,
        ParamType::Vec2 {
            default: [0.5, 0.5],
            range: NumericRange::default(),
        }
    );

    let strength = &out.directives[2];
    assert_eq!(strength.description, "how far pixels move");
    assert_eq!(
        strength.param_type,
        ParamType::Float {
            default: 1.5,
            range: NumericRange {
                min: Some(0.0),
                max: Some(2.0),
            },
        }
    );

    assert_eq!(
        out.directives[3].param_type,
        ParamType::Combo {
            options: vec!["Sine".to_string(), "Square".to_string()],
            default: 1,
        }
    );
}

#[test]
fn source_without_directives_is_empty() {
    let out = parse("void main(void) {\n  gl_FragColor = vec4(1.0);\n}\n");
    assert_eq!(out, ParseOutput::default());
    assert_eq!(parse(""), ParseOutput::default());
    assert_eq!(parse("//OVE end\n"), ParseOutput::default());
}

#[test]
fn parse_is_deterministic() {
    let src = format!("{FULL}\n//OVE name: dup\n//OVE type: WHAT\n");
    assert_eq!(parse(&src), parse(&src));
}

#[test]
fn bad_type_reports_its_line_only() {
    let src = "\
// header
// more

void f();

//OVE name: warp
//OVE type: BOGUS
uniform float warp;
";
    let out = parse(src);
    assert_eq!(issues(&out), vec![(7, "unknown type 'BOGUS'".to_string())]);
    assert!(out.directives.is_empty());
}

#[test]
fn name_alone_acts_as_uniform_identifier() {
    let src = "\
//OVE name: gain
//OVE type: FLOAT
//OVE name: offset
//OVE type: VEC3
//OVE default: 1 2 3
//OVE end
";
    let out = parse(src);
    assert!(out.errors.is_empty(), "{:?}", out.errors);
    assert_eq!(out.directives.len(), 2);
    assert_eq!(out.directives[0].uniform_name, "gain");
    assert_eq!(out.directives[0].human_name, "gain");
    assert_eq!(
        out.directives[1].param_type,
        ParamType::Vec3 {
            default: [1.0, 2.0, 3.0],
            range: NumericRange::default(),
        }
    );
}

#[test]
fn display_name_without_uniform_is_rejected() {
    let out = parse("//OVE name: Blur Amount\n//OVE type: FLOAT\n");
    assert_eq!(out.errors.len(), 1);
    assert_eq!(out.errors[0].line, 1);
    assert!(out.errors[0].issue.contains("not a valid uniform identifier"));
    assert!(out.directives.is_empty());
}

#[test]
fn missing_type_is_reported_on_name_line() {
    let out = parse("//OVE name: Gain\n//OVE min: 0\nuniform float gain;\n");
    assert_eq!(
        issues(&out),
        vec![(1, "parameter 'Gain' has no 'type' directive".to_string())]
    );
}

#[test]
fn directive_outside_declaration_needs_name() {
    let out = parse("//OVE type: FLOAT\nuniform float gain;\n");
    assert_eq!(
        issues(&out),
        vec![(1, "'type' must follow a 'name' directive".to_string())]
    );
    assert!(out.directives.is_empty());
}

#[test]
fn unknown_keys_and_malformed_lines_continue_parsing() {
    let src = "\
//OVE colour: red
//OVE whatever
//OVE name: Gain
//OVE type: FLOAT
uniform float gain;
";
    let out = parse(src);
    let lines: Vec<usize> = out.errors.iter().map(|e| e.line).collect();
    assert_eq!(lines, vec![1, 2]);
    assert!(out.errors[0].issue.contains("unknown directive 'colour'"));
    assert!(out.errors[1].issue.contains("malformed directive"));
    assert_eq!(out.directives.len(), 1);
}

#[test]
fn duplicate_uniform_keeps_first() {
    let src = "\
//OVE name: First
//OVE type: FLOAT
uniform float gain;
//OVE name: Second
//OVE type: VEC2
uniform vec2 gain;
";
    let out = parse(src);
    assert_eq!(out.directives.len(), 1);
    assert_eq!(out.directives[0].human_name, "First");
    assert_eq!(out.errors.len(), 1);
    assert_eq!(out.errors[0].line, 6);
    assert!(out.errors[0].issue.contains("duplicate parameter 'gain'"));
}

#[test]
fn reserved_names_are_rejected() {
    let out = parse("//OVE name: source\n//OVE type: TEXT\n");
    assert_eq!(out.errors.len(), 1);
    assert!(out.errors[0].issue.contains("reserved"));
    assert!(out.directives.is_empty());
}

#[test]
fn range_on_non_numeric_type_is_an_error_but_keeps_parameter() {
    let src = "\
//OVE name: tint
//OVE type: COLOR
//OVE min: 0
//OVE default: 1 0 0
";
    let out = parse(src);
    assert_eq!(out.errors.len(), 1);
    assert_eq!(out.errors[0].line, 3);
    assert!(out.errors[0].issue.contains("only valid for numeric"));
    assert_eq!(
        out.directives[0].param_type,
        ParamType::Color {
            default: Rgba {
                r: 1.0,
                g: 0.0,
                b: 0.0,
                a: 1.0
            }
        }
    );
}

#[test]
fn malformed_numbers_are_reported() {
    let src = "\
//OVE name: gain
//OVE type: FLOAT
//OVE min: zero
//OVE max: 1e400
//OVE default: 2
";
    let out = parse(src);
    let lines: Vec<usize> = out.errors.iter().map(|e| e.line).collect();
    assert_eq!(lines, vec![3, 4]);
    assert_eq!(
        out.directives[0].param_type,
        ParamType::Float {
            default: 2.0,
            range: NumericRange::default(),
        }
    );
}

#[test]
fn inverted_range_is_dropped() {
    let out = parse("//OVE name: n\n//OVE type: INTEGER\n//OVE min: 5\n//OVE max: 1\n");
    assert_eq!(issues(&out), vec![(4, "min 5 is greater than max 1".to_string())]);
    assert_eq!(
        out.directives[0].param_type,
        ParamType::Integer {
            default: 0,
            range: NumericRange::default(),
        }
    );
}

#[test]
fn defaults_are_clamped_into_range() {
    let src = "\
//OVE name: pos
//OVE type: VEC2
//OVE min: 0
//OVE max: 1
//OVE default: -1, 3
";
    let out = parse(src);
    assert!(out.errors.is_empty());
    assert_eq!(
        out.directives[0].param_type.default_value(),
        crate::params::value::ParamValue::Vec2([0.0, 1.0])
    );
}

#[test]
fn wrong_component_count_falls_back_to_zero() {
    let out = parse("//OVE name: pos\n//OVE type: VEC2\n//OVE default: 1\n");
    assert_eq!(out.errors.len(), 1);
    assert!(out.errors[0].issue.contains("expected 2 numbers"));
    assert_eq!(
        out.directives[0].param_type.default_value(),
        crate::params::value::ParamValue::Vec2([0.0, 0.0])
    );
}

#[test]
fn combo_defaults_and_option_rules() {
    let by_index = parse("//OVE name: m\n//OVE type: COMBO\n//OVE option: a\n//OVE option: b\n//OVE default: 1\n");
    assert!(by_index.errors.is_empty());
    assert_eq!(
        by_index.directives[0].param_type.options(),
        Some(&["a".to_string(), "b".to_string()][..])
    );
    assert_eq!(
        by_index.directives[0].param_type.default_value(),
        crate::params::value::ParamValue::Combo(1)
    );

    let first = parse("//OVE name: m\n//OVE type: COMBO\n//OVE option: a\n//OVE option: b\n");
    assert_eq!(
        first.directives[0].param_type.default_value(),
        crate::params::value::ParamValue::Combo(0)
    );

    let empty = parse("//OVE name: m\n//OVE type: COMBO\n");
    assert_eq!(issues(&empty), vec![(1, "COMBO parameter 'm' declares no options".to_string())]);
    assert!(empty.directives.is_empty());

    let misplaced = parse("//OVE name: m\n//OVE option: a\n//OVE type: FLOAT\n");
    assert_eq!(misplaced.errors.len(), 1);
    assert_eq!(misplaced.errors[0].line, 2);
    assert_eq!(misplaced.directives.len(), 1);
}

#[test]
fn flags_accept_lists_and_report_unknown() {
    let out = parse("//OVE name: t\n//OVE type: TEXT\n//OVE flag: NOT_CONNECTABLE | HIDDEN\n//OVE flag: SHOUTY\n");
    let flags = out.directives[0].flags;
    assert!(flags.not_connectable);
    assert!(flags.hidden);
    assert!(!flags.not_keyframable);
    assert_eq!(issues(&out), vec![(4, "unknown flag 'SHOUTY'".to_string())]);
}

#[test]
fn directive_order_inside_declaration_is_free() {
    let a = parse("//OVE name: g\n//OVE min: 0\n//OVE default: 4\n//OVE max: 2\n//OVE type: FLOAT\n");
    let b = parse("//OVE name: g\n//OVE type: FLOAT\n//OVE max: 2\n//OVE min: 0\n//OVE default: 4\n");
    assert_eq!(a.directives[0].param_type, b.directives[0].param_type);
    assert!(a.errors.is_empty());
}

#[test]
fn plain_uniforms_outside_declarations_are_ignored() {
    let src = "\
uniform vec2 resolution_in;
//OVE name: Gain
//OVE type: FLOAT
uniform float gain;
uniform float time;
";
    let out = parse(src);
    assert!(out.errors.is_empty());
    assert_eq!(out.directives.len(), 1);
    assert_eq!(out.directives[0].uniform_name, "gain");
}

#[test]
fn crlf_line_endings_keep_line_numbers() {
    let out = parse("//OVE name: g\r\n//OVE type: NOPE\r\n");
    assert_eq!(out.errors[0].line, 2);
}

#[test]
fn empty_name_drops_declaration_quietly() {
    let out = parse("//OVE name:\n//OVE type: FLOAT\n//OVE min: x\nuniform float g;\n");
    assert_eq!(issues(&out), vec![(1, "parameter 'name' is empty".to_string())]);
    assert!(out.directives.is_empty());
}

#[test]
fn custom_marker_is_honoured() {
    let opts = ParserOpts {
        marker: "// @param".to_string(),
    };
    let out = parse_directives("// @param name: g\n// @param type: FLOAT\n", &opts);
    assert!(out.errors.is_empty());
    assert_eq!(out.directives[0].uniform_name, "g");
}

#[test]
fn errors_are_reported_in_source_order() {
    // `min` is checked once the type is known, `flag` as soon as it is read
    let src = "\
//OVE name: a
//OVE type: TEXT
//OVE min: 0
//OVE flag: BOGUS
uniform vec2 a;
";
    let out = parse(src);
    let lines: Vec<_> = out.errors.iter().map(|e| e.line).collect();
    assert_eq!(lines, vec![3, 4]);
    assert!(out.errors[0].issue.contains("only valid for numeric"));
    assert_eq!(out.errors[1].issue, "unknown flag 'BOGUS'");
}

#[test]
fn comments_sharing_the_marker_prefix_are_ignored() {
    let src = "\
//OVERLAY: blend inputs
//OVE name: g
//OVE type: FLOAT
//OVERRIDE the default below
uniform float g;
";
    let out = parse(src);
    assert!(out.errors.is_empty());
    assert_eq!(out.directives.len(), 1);
    assert_eq!(out.directives[0].uniform_name, "g");
}

#[test]
fn color_default_is_clamped_to_unit_range() {
    let out = parse("//OVE name: tint\n//OVE type: COLOR\n//OVE default: 3 -1 0 2\n");
    assert!(out.errors.is_empty());
    assert_eq!(
        out.directives[0].param_type,
        ParamType::Color {
            default: Rgba {
                r: 1.0,
                g: 0.0,
                b: 0.0,
                a: 1.0
            }
        }
    );
}
