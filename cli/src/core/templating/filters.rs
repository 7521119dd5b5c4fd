//! # Template Filters
//!
//! File: cli/src/core/templating/filters.rs
//!
//! ## Overview
//!
//! Custom minijinja filters available to every documentation template:
//!
//! - `to_nice_yaml(indent=4)`: renders any value as human-formatted block YAML.
//!   Nested mappings are indented by `indent` columns; a sequence's dashes sit
//!   `indent` columns in and its items start `2 * indent` columns in.
//! - `deep_get("a.b.c")`: follows a dotted key path through nested mappings
//!   and yields `none` instead of failing when the path breaks.
//!
//! ## Examples
//!
//! ```jinja
//! {{ role.defaults | to_nice_yaml }}
//! {{ role.defaults | to_nice_yaml(indent=2) }}
//! {% set port = role.var | deep_get("http.port.value") %}
//! ```
//!
//! Layout is written here; whether a scalar may stay plain is also checked
//! against `serde_yaml`'s emitter.
//!
use minijinja::value::{Kwargs, Value as TemplateValue};
use minijinja::{Error, ErrorKind};
use serde_json::{Map, Value};

/// Default indentation of `to_nice_yaml`.
pub const DEFAULT_YAML_INDENT: usize = 4;

/// `to_nice_yaml` filter, see [`nice_yaml`].
pub fn to_nice_yaml(value: TemplateValue, kwargs: Kwargs) -> Result<String, Error> {
    let indent = match kwargs.get::<Option<i64>>("indent")? {
        None => DEFAULT_YAML_INDENT,
        Some(raw) => usize::try_from(raw)
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::InvalidOperation,
                    format!("to_nice_yaml expects a positive integer indent, got: {}", raw),
                )
            })?,
    };
    kwargs.assert_all_used()?;
    Ok(nice_yaml(&to_data(&value, "to_nice_yaml")?, indent))
}

/// `deep_get` filter, see [`deep_get_path`].
pub fn deep_get(value: TemplateValue, key: String) -> Result<TemplateValue, Error> {
    let data = to_data(&value, "deep_get")?;
    Ok(deep_get_path(&data, &key)
        .map(TemplateValue::from_serialize)
        .unwrap_or_else(|| TemplateValue::from(())))
}

/// Converts a template value into the role data model.
fn to_data(value: &TemplateValue, filter: &str) -> Result<Value, Error> {
    if value.is_undefined() {
        return Err(Error::new(
            ErrorKind::UndefinedError,
            format!("{} applied to an undefined value", filter),
        ));
    }
    serde_json::to_value(value).map_err(|e| {
        Error::new(ErrorKind::BadSerialization, format!("{} cannot read value", filter))
            .with_source(e)
    })
}

/// Walks `value` along the dot-separated `path`.
///
/// Returns `None` as soon as a segment is missing or the current value is not a mapping.
pub fn deep_get_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, segment| current.as_object()?.get(segment))
}

/// Serializes `value` as block-style YAML with trailing whitespace trimmed.
pub fn nice_yaml(value: &Value, indent: usize) -> String {
    let indent = indent.max(1);
    let mut out = String::new();
    match value {
        Value::Object(map) if !map.is_empty() => write_mapping(&mut out, map, 0, indent, false),
        Value::Array(items) if !items.is_empty() => write_sequence(&mut out, items, indent, indent),
        scalar => write_scalar_line(&mut out, scalar, indent),
    }
    out.truncate(out.trim_end().len());
    out
}

fn write_mapping(out: &mut String, map: &Map<String, Value>, col: usize, indent: usize, inline_first: bool) {
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 || !inline_first {
            pad(out, col);
        }
        out.push_str(&inline_scalar(key));
        out.push(':');
        match value {
            Value::Object(child) if !child.is_empty() => {
                out.push('\n');
                write_mapping(out, child, col + indent, indent, false);
            }
            Value::Array(items) if !items.is_empty() => {
                out.push('\n');
                write_sequence(out, items, col + indent, indent);
            }
            scalar => {
                out.push(' ');
                write_scalar_line(out, scalar, col + indent);
            }
        }
    }
}

fn write_sequence(out: &mut String, items: &[Value], dash_col: usize, indent: usize) {
    let gap = indent.max(2);
    let content_col = dash_col + gap;
    for item in items {
        pad(out, dash_col);
        out.push('-');
        match item {
            Value::Object(map) if !map.is_empty() => {
                pad(out, gap - 1);
                write_mapping(out, map, content_col, indent, true);
            }
            Value::Array(nested) if !nested.is_empty() => {
                out.push('\n');
                write_sequence(out, nested, content_col, indent);
            }
            scalar => {
                pad(out, gap - 1);
                write_scalar_line(out, scalar, content_col);
            }
        }
    }
}

/// Writes a scalar (or empty collection) and the terminating newline.
///
/// `block_col` is the column used for the lines of a literal block scalar.
fn write_scalar_line(out: &mut String, value: &Value, block_col: usize) {
    match value {
        Value::String(s) if is_block_candidate(s) => {
            out.push_str("|-\n");
            for line in s.split('\n') {
                if !line.is_empty() {
                    pad(out, block_col);
                    out.push_str(line);
                }
                out.push('\n');
            }
        }
        Value::String(s) => {
            out.push_str(&inline_scalar(s));
            out.push('\n');
        }
        Value::Null => out.push_str("null\n"),
        Value::Bool(b) => {
            out.push_str(if *b { "true" } else { "false" });
            out.push('\n');
        }
        Value::Number(n) => {
            out.push_str(&n.to_string());
            out.push('\n');
        }
        Value::Array(_) => out.push_str("[]\n"),
        Value::Object(_) => out.push_str("{}\n"),
    }
}

/// Multi-line strings that a `|-` literal block reproduces exactly.
fn is_block_candidate(s: &str) -> bool {
    s.contains('\n')
        && !s.ends_with('\n')
        && !s.chars().any(|c| c != '\n' && c != '\t' && is_unprintable(c))
        && s
            .split('\n')
            .find(|line| !line.trim().is_empty())
            .is_some_and(|line| !line.starts_with([' ', '\t']))
        && !s.split('\n').any(|line| !line.is_empty() && line.trim().is_empty())
}

/// Single-line representation of a string: plain when unambiguous, quoted otherwise.
fn inline_scalar(s: &str) -> String {
    if s.chars().any(is_unprintable) {
        return double_quoted(s);
    }
    if needs_quotes(s) {
        return format!("'{}'", s.replace('\'', "''"));
    }
    match serde_yaml::to_string(s) {
        Ok(emitted) => {
            let emitted = emitted.strip_suffix('\n').unwrap_or(&emitted);
            if emitted.contains('\n') {
                double_quoted(s)
            } else {
                emitted.to_string()
            }
        }
        Err(_) => double_quoted(s),
    }
}

/// Characters that must not appear raw in a plain or single-quoted scalar.
fn is_unprintable(c: char) -> bool {
    c.is_control() || matches!(c, '\u{2028}' | '\u{2029}' | '\u{feff}' | '\u{fffe}' | '\u{ffff}')
}

/// YAML double-quoted scalar with every unprintable character escaped.
fn double_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\u{85}' => out.push_str("\\N"),
            '\u{2028}' => out.push_str("\\L"),
            '\u{2029}' => out.push_str("\\P"),
            c if is_unprintable(c) => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn needs_quotes(s: &str) -> bool {
    const INDICATORS: &[char] = &[
        '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%',
        '@', '`',
    ];
    const RESERVED: &[&str] = &[
        "null", "~", "true", "false", "yes", "no", "on", "off", "y", "n",
    ];

    let Some(first) = s.chars().next() else {
        return true;
    };
    first.is_whitespace()
        || s.ends_with(char::is_whitespace)
        || INDICATORS.contains(&first)
        || first.is_ascii_digit()
        || first == '.'
        || first == '+'
        || s.contains(": ")
        || s.contains(" #")
        || s.ends_with(':')
        || RESERVED.contains(&s.to_ascii_lowercase().as_str())
        || s.parse::<f64>().is_ok()
}

fn pad(out: &mut String, width: usize) {
    out.extend(std::iter::repeat(' ').take(width));
}
