//! Directive parser.
//!
//! A parameter declaration opens at a `name` directive and collects the directives that follow
//! it. It completes at the next GLSL `uniform` declaration, which supplies the uniform name, or
//! at the next `name`, the `end` marker or the end of the text, in which case the `name` value
//! doubles as the uniform name. Checks that depend on the declared type run at completion, so
//! directive order inside a declaration does not matter.

use std::collections::BTreeSet;

use crate::{
    directive::{
        line::{Line, classify, is_identifier},
        model::{ParamType, ParseError, ParseOutput, ParsedDirective, ShaderMetadata},
    },
    foundation::core::Rgba,
    params::value::{DataType, NumericRange, ParamFlags},
};

/// Default comment marker introducing a directive.
pub const DEFAULT_MARKER: &str = "//OVE";

/// Uniform names taken by the node's built-in inputs.
pub const RESERVED_NAMES: [&str; 2] = ["source", "issues"];

/// Parser configuration.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ParserOpts {
    /// Comment prefix that marks a directive line.
    pub marker: String,
}

impl Default for ParserOpts {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_owned(),
        }
    }
}

/// Parse the directives embedded in `source`.
///
/// Never fails: problems are collected as [`ParseError`]s and the returned parameter list holds
/// every declaration that survived them. The output is a pure function of `source` and `opts`.
#[tracing::instrument(skip_all, fields(bytes = source.len()))]
pub fn parse_directives(source: &str, opts: &ParserOpts) -> ParseOutput {
    let mut p = Parser::default();

    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        match classify(raw, &opts.marker) {
            Line::End => {
                tracing::trace!(line, "end marker");
                p.finish(None);
                return p.into_output();
            }
            Line::Uniform { name } => {
                if p.current.is_some() {
                    p.finish(Some((line, name)));
                }
            }
            Line::Directive { key, value } => p.directive(line, key, value),
            Line::Malformed(text) => p.error(
                line,
                format!("malformed directive '{text}': expected 'key: value' or 'end'"),
            ),
            Line::Other => {}
        }
    }

    p.finish(None);
    p.into_output()
}

/// Declaration being collected.
#[derive(Default)]
struct Pending {
    name_line: usize,
    human_name: String,
    // set when the declaration can no longer produce a parameter
    dropped: bool,
    ty: Option<DataType>,
    flags: ParamFlags,
    description: Vec<String>,
    min: Option<(usize, String)>,
    max: Option<(usize, String)>,
    default: Option<(usize, String)>,
    options: Vec<(usize, String)>,
}

#[derive(Default)]
struct Parser {
    metadata: ShaderMetadata,
    directives: Vec<ParsedDirective>,
    errors: Vec<ParseError>,
    seen: BTreeSet<String>,
    current: Option<Pending>,
}

impl Parser {
    fn into_output(mut self) -> ParseOutput {
        // Type-dependent checks run when a declaration completes; restore source order.
        self.errors.sort_by_key(|e| e.line);
        tracing::debug!(
            directives = self.directives.len(),
            errors = self.errors.len(),
            "parsed shader directives"
        );
        ParseOutput {
            metadata: self.metadata,
            directives: self.directives,
            errors: self.errors,
        }
    }

    fn error(&mut self, line: usize, issue: impl Into<String>) {
        let err = ParseError::new(line, issue);
        tracing::trace!(%err, "directive issue");
        self.errors.push(err);
    }

    fn directive(&mut self, line: usize, key: &str, value: &str) {
        match key {
            "shader_name" => self.metadata.name = non_empty(value),
            "shader_description" => {
                if let Some(text) = non_empty(value) {
                    match &mut self.metadata.description {
                        Some(desc) => {
                            desc.push(' ');
                            desc.push_str(&text);
                        }
                        None => self.metadata.description = Some(text),
                    }
                }
            }
            "shader_version" => self.metadata.version = non_empty(value),
            "name" => {
                self.finish(None);
                let dropped = value.is_empty();
                if dropped {
                    self.error(line, "parameter 'name' is empty");
                }
                self.current = Some(Pending {
                    name_line: line,
                    human_name: value.to_owned(),
                    dropped,
                    ..Pending::default()
                });
            }
            "type" | "flag" | "description" | "min" | "max" | "default" | "option" => {
                self.entry_directive(line, key, value)
            }
            _ => self.error(line, format!("unknown directive '{key}'")),
        }
    }

    fn entry_directive(&mut self, line: usize, key: &str, value: &str) {
        let Some(entry) = self.current.as_mut() else {
            self.error(line, format!("'{key}' must follow a 'name' directive"));
            return;
        };

        let mut issues = Vec::new();
        match key {
            "type" => {
                if entry.ty.is_some() {
                    issues.push(format!("type of '{}' is declared twice", entry.human_name));
                } else {
                    match DataType::from_token(value) {
                        Some(ty) => entry.ty = Some(ty),
                        None => {
                            entry.dropped = true;
                            issues.push(format!("unknown type '{value}'"));
                        }
                    }
                }
            }
            "flag" => {
                for token in value
                    .split(|c: char| c == '|' || c == ',' || c.is_whitespace())
                    .filter(|t| !t.is_empty())
                {
                    if !entry.flags.set_token(token) {
                        issues.push(format!("unknown flag '{token}'"));
                    }
                }
            }
            "description" => {
                if !value.is_empty() {
                    entry.description.push(value.to_owned());
                }
            }
            "min" => entry.min = Some((line, value.to_owned())),
            "max" => entry.max = Some((line, value.to_owned())),
            "default" => entry.default = Some((line, value.to_owned())),
            "option" => {
                if value.is_empty() {
                    issues.push("combo option is empty".to_owned());
                } else {
                    entry.options.push((line, value.to_owned()));
                }
            }
            _ => unreachable!("caller only forwards declaration keys"),
        }

        for issue in issues {
            self.error(line, issue);
        }
    }

    fn finish(&mut self, uniform: Option<(usize, &str)>) {
        let Some(entry) = self.current.take() else {
            return;
        };
        if entry.dropped {
            return;
        }

        let (uniform_line, uniform_name) = match uniform {
            Some((line, name)) => (line, name.to_owned()),
            None => {
                if !is_identifier(&entry.human_name) {
                    self.error(
                        entry.name_line,
                        format!(
                            "'{}' is not a valid uniform identifier and no uniform declaration follows it",
                            entry.human_name
                        ),
                    );
                    return;
                }
                (entry.name_line, entry.human_name.clone())
            }
        };

        let Some(ty) = entry.ty else {
            self.error(
                entry.name_line,
                format!("parameter '{}' has no 'type' directive", entry.human_name),
            );
            return;
        };

        if RESERVED_NAMES.contains(&uniform_name.as_str()) {
            self.error(
                uniform_line,
                format!("uniform name '{uniform_name}' is reserved by the node"),
            );
            return;
        }

        if self.seen.contains(&uniform_name) {
            self.error(
                uniform_line,
                format!("duplicate parameter '{uniform_name}'; the first declaration is kept"),
            );
            return;
        }

        let Some(param_type) = self.build_type(&entry, ty) else {
            return;
        };

        tracing::trace!(uniform = %uniform_name, %ty, "parameter declared");
        self.seen.insert(uniform_name.clone());
        self.directives.push(ParsedDirective {
            uniform_name,
            human_name: entry.human_name,
            description: entry.description.join(" "),
            flags: entry.flags,
            param_type,
            line: entry.name_line,
        });
    }

    fn build_type(&mut self, entry: &Pending, ty: DataType) -> Option<ParamType> {
        let range = self.range(entry, ty);

        if ty != DataType::Combo {
            if let Some((line, _)) = entry.options.first() {
                self.error(*line, format!("'option' is only valid for COMBO, not {ty}"));
            }
        }

        let default = entry.default.as_ref();
        let param_type = match ty {
            DataType::Texture => {
                if let Some((line, _)) = default {
                    self.error(*line, "TEXTURE parameters do not take a default");
                }
                ParamType::Texture
            }
            DataType::Float => ParamType::Float {
                default: range.clamp(self.default_numbers::<1>(default, ty)[0]),
                range,
            },
            DataType::Integer => {
                let value = match default {
                    Some((line, text)) => parse_int(text).unwrap_or_else(|| {
                        self.error(*line, format!("invalid INTEGER default '{text}'"));
                        0
                    }),
                    None => 0,
                };
                ParamType::Integer {
                    default: range.clamp(value as f64).round() as i64,
                    range,
                }
            }
            DataType::Vec2 => ParamType::Vec2 {
                default: self.default_numbers(default, ty).map(|c| range.clamp(c)),
                range,
            },
            DataType::Vec3 => ParamType::Vec3 {
                default: self.default_numbers(default, ty).map(|c| range.clamp(c)),
                range,
            },
            DataType::Vec4 => ParamType::Vec4 {
                default: self.default_numbers(default, ty).map(|c| range.clamp(c)),
                range,
            },
            DataType::Color => {
                let color = match default {
                    Some((line, text)) => parse_numbers(text)
                        .and_then(|c| Rgba::from_components(&c))
                        .map(Rgba::clamped)
                        .unwrap_or_else(|| {
                            self.error(
                                *line,
                                format!("invalid COLOR default '{text}': expected 3 or 4 numbers"),
                            );
                            Rgba::WHITE
                        }),
                    None => Rgba::WHITE,
                };
                ParamType::Color { default: color }
            }
            DataType::Boolean => {
                let value = match default {
                    Some((line, text)) => parse_bool(text).unwrap_or_else(|| {
                        self.error(
                            *line,
                            format!("invalid BOOLEAN default '{text}': expected true or false"),
                        );
                        false
                    }),
                    None => false,
                };
                ParamType::Boolean { default: value }
            }
            DataType::Combo => {
                if entry.options.is_empty() {
                    self.error(
                        entry.name_line,
                        format!("COMBO parameter '{}' declares no options", entry.human_name),
                    );
                    return None;
                }
                let options: Vec<String> = entry.options.iter().map(|(_, o)| o.clone()).collect();
                let index = match default {
                    Some((line, text)) => options
                        .iter()
                        .position(|o| o == text)
                        .or_else(|| text.parse::<usize>().ok().filter(|i| *i < options.len()))
                        .unwrap_or_else(|| {
                            self.error(
                                *line,
                                format!("default '{text}' is not one of the declared options"),
                            );
                            0
                        }),
                    None => 0,
                };
                ParamType::Combo {
                    options,
                    default: index,
                }
            }
            DataType::Text => ParamType::Text {
                default: default.map(|(_, t)| t.clone()).unwrap_or_default(),
            },
        };
        Some(param_type)
    }

    /// Validated `min`/`max` of a declaration. Invalid bounds are reported and dropped.
    fn range(&mut self, entry: &Pending, ty: DataType) -> NumericRange {
        let mut range = NumericRange::default();
        for (key, slot) in [("min", &entry.min), ("max", &entry.max)] {
            let Some((line, text)) = slot else {
                continue;
            };
            if !ty.is_numeric() {
                self.error(
                    *line,
                    format!("'{key}' is only valid for numeric and vector types, not {ty}"),
                );
                continue;
            }
            let parsed = if ty == DataType::Integer {
                parse_int(text).map(|v| v as f64)
            } else {
                parse_number(text)
            };
            match parsed {
                Some(v) if key == "min" => range.min = Some(v),
                Some(v) => range.max = Some(v),
                None => self.error(*line, format!("invalid number '{text}' for '{key}'")),
            }
        }

        if let (Some(min), Some(max)) = (range.min, range.max) {
            if min > max {
                let line = entry.max.as_ref().map_or(entry.name_line, |(l, _)| *l);
                self.error(line, format!("min {min} is greater than max {max}"));
                return NumericRange::default();
            }
        }
        range
    }

    /// `N` numbers from a default directive; zeros when absent or invalid.
    fn default_numbers<const N: usize>(
        &mut self,
        default: Option<&(usize, String)>,
        ty: DataType,
    ) -> [f64; N] {
        let Some((line, text)) = default else {
            return [0.0; N];
        };
        match parse_numbers(text).and_then(|v| <[f64; N]>::try_from(v).ok()) {
            Some(values) => values,
            None => {
                let noun = if N == 1 { "number" } else { "numbers" };
                self.error(
                    *line,
                    format!("invalid {ty} default '{text}': expected {N} {noun}"),
                );
                [0.0; N]
            }
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_int(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Numbers separated by commas and/or whitespace.
fn parse_numbers(text: &str) -> Option<Vec<f64>> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(parse_number)
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/directive/parser.rs"]
mod tests;
