//! SKILL.md manifest model.

use crate::frontmatter::{self, Document};
use anyhow::Result;
use serde_yaml::{Mapping, Value};

/// Manifest file name expected in every skill folder.
pub const MANIFEST_FILE: &str = "SKILL.md";
/// Generated artifact file name; never re-aggregated.
pub const ARTIFACT_FILE: &str = "AGENTS.md";

/// Tags can be a single string or a YAML list of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tags {
    One(String),
    Many(Vec<String>),
}

impl Tags {
    /// Render for display: lists joined with `", "`, strings verbatim.
    pub fn join(&self) -> String {
        match self {
            Tags::One(s) => s.clone(),
            Tags::Many(v) => v.join(", "),
        }
    }

    /// Read a tags value from frontmatter; other shapes are ignored.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Tags::One(s.clone())),
            Value::Sequence(items) => Some(Tags::Many(
                items.iter().filter_map(frontmatter::scalar_to_string).collect(),
            )),
            _ => None,
        }
    }
}

/// Parsed SKILL.md: frontmatter fields plus markdown body.
///
/// The required fields surface as options so the validator can report
/// which one is missing instead of failing at parse time.
#[derive(Debug, Clone)]
pub struct SkillManifest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Tags>,
    /// Full frontmatter mapping, open to arbitrary extra keys.
    pub metadata: Mapping,
    /// Markdown body, trimmed.
    pub body: String,
}

impl SkillManifest {
    /// Parse manifest text. Fails only on structurally invalid frontmatter.
    pub fn parse(content: &str) -> Result<Self> {
        let Document { metadata, body } = frontmatter::parse(content)?;
        let name = frontmatter::get_str(&metadata, "name").filter(|s| !s.trim().is_empty());
        let description =
            frontmatter::get_str(&metadata, "description").filter(|s| !s.trim().is_empty());
        let tags = frontmatter::get(&metadata, "tags").and_then(Tags::from_value);

        Ok(SkillManifest {
            name,
            description,
            tags,
            metadata,
            body: body.trim().to_string(),
        })
    }
}
