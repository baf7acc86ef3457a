use super::*;

const M: &str = "//OVE";

#[test]
fn directives_split_on_first_colon() {
    assert_eq!(
        classify("//OVE name: Center", M),
        Line::Directive {
            key: "name",
            value: "Center"
        }
    );
    assert_eq!(
        classify("   //OVE   description: a: b  ", M),
        Line::Directive {
            key: "description",
            value: "a: b"
        }
    );
    assert_eq!(
        classify("//OVEtype:FLOAT", M),
        Line::Directive {
            key: "type",
            value: "FLOAT"
        }
    );
    assert_eq!(
        classify("//OVE shader_name:", M),
        Line::Directive {
            key: "shader_name",
            value: ""
        }
    );
}

#[test]
fn end_and_malformed_markers() {
    assert_eq!(classify("//OVE end", M), Line::End);
    assert_eq!(classify("  //OVE   end  ", M), Line::End);
    assert_eq!(classify("//OVE just words", M), Line::Malformed("just words"));
    assert_eq!(classify("//OVE bad key: x", M), Line::Malformed("bad key: x"));
    assert_eq!(classify("//OVE", M), Line::Other);
}

#[test]
fn marker_must_end_at_a_word_boundary() {
    assert_eq!(classify("//OVERLAY: blend inputs", M), Line::Other);
    assert_eq!(classify("//OVERRIDE this", M), Line::Other);
    assert_eq!(classify("//OVEend", M), Line::End);
    assert_eq!(
        classify("//OVEname: gain", M),
        Line::Directive {
            key: "name",
            value: "gain"
        }
    );
    // separated by whitespace, unknown keys still reach the parser
    assert_eq!(
        classify("//OVE RLAY: x", M),
        Line::Directive {
            key: "RLAY",
            value: "x"
        }
    );
}

#[test]
fn uniform_declarations() {
    assert_eq!(
        classify("uniform sampler2D tex_in;", M),
        Line::Uniform { name: "tex_in" }
    );
    assert_eq!(
        classify("uniform highp vec2 pts[4];", M),
        Line::Uniform { name: "pts" }
    );
    assert_eq!(
        classify("uniform float gain ; // trailing", M),
        Line::Uniform { name: "gain" }
    );
    assert_eq!(classify("uniform float gain", M), Line::Other);
    assert_eq!(classify("uniform gain;", M), Line::Other);
    assert_eq!(classify("uniformity x y;", M), Line::Other);
}

#[test]
fn plain_code_is_other() {
    assert_eq!(classify("void main(void) {", M), Line::Other);
    assert_eq!(classify("// regular comment", M), Line::Other);
    assert_eq!(classify("", M), Line::Other);
}

#[test]
fn custom_marker() {
    assert_eq!(
        classify("#@ name: x", "#@"),
        Line::Directive {
            key: "name",
            value: "x"
        }
    );
    assert_eq!(classify("//OVE name: x", "#@"), Line::Other);
}

#[test]
fn identifiers() {
    assert!(is_identifier("center_2"));
    assert!(is_identifier("_x"));
    assert!(!is_identifier("2x"));
    assert!(!is_identifier("Center Point"));
    assert!(!is_identifier(""));
}
