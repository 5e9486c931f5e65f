use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::sync::LazyLock;

use crate::error::{BuildError, Result};

static YAML_BLOCK: LazyLock<Regex> = LazyLock::new(|| block_regex("---"));
static TOML_BLOCK: LazyLock<Regex> = LazyLock::new(|| block_regex(r"\+\+\+"));

/// Opening delimiter on the first line, closing delimiter alone on a later line.
fn block_regex(delimiter: &str) -> Regex {
    let pattern = format!(r"(?ms)\A{delimiter}[ \t]*\r?\n(.*?)^{delimiter}[ \t]*(?:\r?\n|\z)");
    Regex::new(&pattern).expect("front matter pattern is valid")
}

/// Page metadata read from the front matter block.
///
/// The recognized keys are typed leniently: a value of the wrong shape is
/// treated as absent instead of failing the page. Every other key, string or
/// not, lands in `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub tags: Vec<String>,
    // everything the template does not know about
    pub extra: Mapping,
}

impl Metadata {
    pub fn is_empty(&self) -> bool {
        *self == Metadata::default()
    }

    fn from_mapping(mut map: Mapping) -> Self {
        Metadata {
            title: map.remove("title").and_then(string_only),
            date: map.remove("date").as_ref().and_then(scalar_to_string),
            description: map.remove("description").and_then(string_only),
            author: map.remove("author").and_then(string_only),
            tags: map.remove("tags").map(tag_list).unwrap_or_default(),
            extra: map,
        }
    }
}

/// Splits `raw` into its metadata and the Markdown body that follows it.
///
/// Documents without a complete `---` (YAML) or `+++` (TOML) block come back
/// with empty metadata and the whole text as body. A block that is present
/// but does not parse to a mapping is an error.
pub fn parse_frontmatter(raw: &str) -> Result<(Metadata, &str)> {
    if let Some(caps) = YAML_BLOCK.captures(raw) {
        let block = caps.get(1).map_or("", |m| m.as_str());
        let body = &raw[caps.get(0).map_or(0, |m| m.end())..];
        if block.trim().is_empty() {
            return Ok((Metadata::default(), body));
        }
        let value: Value = serde_yaml::from_str(block).map_err(|e| malformed("YAML", e))?;
        return Ok((metadata_from_value(value, "YAML")?, body));
    }

    if let Some(caps) = TOML_BLOCK.captures(raw) {
        let block = caps.get(1).map_or("", |m| m.as_str());
        let body = &raw[caps.get(0).map_or(0, |m| m.end())..];
        let table: toml::Table = toml::from_str(block).map_err(|e| malformed("TOML", e))?;
        let value = toml_to_yaml(toml::Value::Table(table));
        return Ok((metadata_from_value(value, "TOML")?, body));
    }

    Ok((Metadata::default(), raw))
}

fn metadata_from_value(value: Value, format: &'static str) -> Result<Metadata> {
    match value {
        // an empty block
        Value::Null => Ok(Metadata::default()),
        Value::Mapping(map) => Ok(Metadata::from_mapping(map)),
        other => Err(BuildError::FrontMatter {
            format,
            message: format!("expected a mapping of keys, found {}", kind_of(&other)),
        }),
    }
}

fn malformed(format: &'static str, err: impl std::fmt::Display) -> BuildError {
    BuildError::FrontMatter {
        format,
        message: err.to_string(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// TOML dates have no YAML counterpart, so they are carried as their text.
fn toml_to_yaml(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => Value::Number(f.into()),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Sequence(items.into_iter().map(toml_to_yaml).collect()),
        toml::Value::Table(table) => Value::Mapping(
            table
                .into_iter()
                .map(|(k, v)| (Value::String(k), toml_to_yaml(v)))
                .collect(),
        ),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn string_only(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        _ => None,
    }
}

fn tag_list(value: Value) -> Vec<String> {
    match value {
        Value::Sequence(items) => items.iter().filter_map(scalar_to_string).collect(),
        other => scalar_to_string(&other).into_iter().collect(),
    }
}
