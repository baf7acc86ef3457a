/// How a single trimmed source line participates in directive parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    /// `<marker> key: value`
    Directive { key: &'a str, value: &'a str },
    /// `<marker> end`
    End,
    /// Marker line that is not `key: value`.
    Malformed(&'a str),
    /// `uniform <type> <name>;`
    Uniform { name: &'a str },
    /// Anything else, including a bare marker.
    Other,
}

/// Keys the parser understands.
pub(crate) const DIRECTIVE_KEYS: [&str; 11] = [
    "shader_name",
    "shader_description",
    "shader_version",
    "name",
    "type",
    "flag",
    "description",
    "min",
    "max",
    "default",
    "option",
];

pub(crate) fn classify<'a>(line: &'a str, marker: &str) -> Line<'a> {
    let line = line.trim();

    if let Some(rest) = line.strip_prefix(marker) {
        // `//OVEtype: X` is a directive, `//OVERLAY: x` is an ordinary comment.
        let glued = !rest.is_empty() && !rest.starts_with(char::is_whitespace);
        let rest = rest.trim();
        if rest.is_empty() {
            return Line::Other;
        }
        if rest == "end" {
            return Line::End;
        }
        return match rest.split_once(':') {
            Some((key, value))
                if is_key(key.trim()) && (!glued || DIRECTIVE_KEYS.contains(&key.trim())) =>
            {
                Line::Directive {
                    key: key.trim(),
                    value: value.trim(),
                }
            }
            _ if glued => Line::Other,
            _ => Line::Malformed(rest),
        };
    }

    match uniform_name(line) {
        Some(name) => Line::Uniform { name },
        None => Line::Other,
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_key(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Variable name of a GLSL uniform declaration.
///
/// Accepts qualifiers and array suffixes: `uniform highp vec2 pts[4];` yields `pts`.
fn uniform_name(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("uniform")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let decl = rest[..rest.find(';')?].trim();
    let mut words = decl.split_whitespace();
    // at least a type and a name
    let last = words.next_back()?;
    words.next_back()?;
    let name = last.split('[').next().unwrap_or(last);
    is_identifier(name).then_some(name)
}

#[cfg(test)]
#[path = "../../tests/unit/directive/line.rs"]
mod tests;
