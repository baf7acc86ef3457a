use super::*;

#[test]
fn empty_error_list_yields_sentinel() {
    assert_eq!(issues_report("Ripple", &[]), NO_ISSUES);
}

#[test]
fn one_line_per_error() {
    let errors = vec![
        ParseError::new(3, "unknown type 'X'"),
        ParseError::new(9, "duplicate parameter 'gain'; the first declaration is kept"),
    ];
    let report = issues_report("Ripple", &errors);
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(
        lines,
        vec![
            "\"Ripple\" line 3: unknown type 'X'",
            "\"Ripple\" line 9: duplicate parameter 'gain'; the first declaration is kept",
        ]
    );
}
