//! Frontmatter parsing.
//!
//! A document may open with a YAML metadata block fenced by `---` lines;
//! everything after the closing fence is the free-form body.

use anyhow::{anyhow, Result};
use serde_yaml::{Mapping, Value};

/// A parsed document: metadata mapping plus body text.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub metadata: Mapping,
    pub body: String,
}

/// Split raw text into frontmatter metadata and body.
///
/// Input without a leading `---` fence yields an empty mapping and the
/// whole input as body. A fence that never closes, or metadata that is
/// not a YAML mapping, is an error.
pub fn parse(content: &str) -> Result<Document> {
    let Some(rest) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return Ok(Document {
            metadata: Mapping::new(),
            body: content.to_string(),
        });
    };

    // Scan for the closing fence line so the YAML block and the body can
    // be sliced without copying.
    let mut yaml_end = None;
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            yaml_end = Some(offset);
            offset += line.len();
            break;
        }
        offset += line.len();
    }
    let yaml_end = yaml_end.ok_or_else(|| anyhow!("missing closing --- for frontmatter"))?;

    let metadata = parse_mapping(&rest[..yaml_end])?;
    Ok(Document {
        metadata,
        body: rest[offset..].to_string(),
    })
}

fn parse_mapping(yaml: &str) -> Result<Mapping> {
    if yaml.trim().is_empty() {
        return Ok(Mapping::new());
    }
    match serde_yaml::from_str::<Value>(yaml)? {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        _ => Err(anyhow!("frontmatter must be a YAML mapping")),
    }
}

/// Render a scalar metadata value as a string.
///
/// Sequences and nested mappings have no scalar form and yield `None`.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Look up a metadata key.
pub fn get<'a>(metadata: &'a Mapping, key: &str) -> Option<&'a Value> {
    metadata.get(&Value::String(key.to_string()))
}

/// Look up a metadata key and render it as a string if scalar.
pub fn get_str(metadata: &Mapping, key: &str) -> Option<String> {
    get(metadata, key).and_then(scalar_to_string)
}
