//! Read-only web view over the skills root.
//!
//! Serves the same SKILL.md sources the builder aggregates, never the
//! generated artifacts. Bodies are rendered to HTML for the frontend.

use crate::manifest::{SkillManifest, MANIFEST_FILE};
use pulldown_cmark::{html, Options, Parser};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// A skill as presented to the frontend.
#[derive(Debug, Clone, Serialize)]
pub struct SkillView {
    pub name: String,
    pub description: String,
    /// Markdown body rendered to HTML.
    pub content: String,
    /// Full frontmatter mapping.
    pub metadata: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<BTreeMap<String, String>>,
}

/// List every skill folder under `root` that has a parseable manifest.
///
/// A missing root yields an empty list, matching the frontend's
/// degrade-gracefully behavior.
pub fn list_skills(root: &Path) -> Vec<SkillView> {
    let Ok(entries) = std::fs::read_dir(root) else {
        return Vec::new();
    };

    let mut skills = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let folder = entry.file_name().to_string_lossy().into_owned();
        if let Some(view) = load_view(&path, &folder, false) {
            skills.push(view);
        }
    }
    skills.sort_by(|a, b| a.name.cmp(&b.name));
    skills
}

/// Look up one skill by folder name, including its assets and references.
pub fn skill_by_name(root: &Path, name: &str) -> Option<SkillView> {
    // folder names only; no path traversal
    if name.is_empty() || name.contains(['/', '\\']) || name == ".." {
        return None;
    }
    let dir = root.join(name);
    load_view(&dir, name, true)
}

fn load_view(dir: &Path, folder: &str, with_files: bool) -> Option<SkillView> {
    let content = std::fs::read_to_string(dir.join(MANIFEST_FILE)).ok()?;
    let manifest = SkillManifest::parse(&content).ok()?;

    let mut view = SkillView {
        name: manifest.name.clone().unwrap_or_else(|| folder.to_string()),
        description: manifest.description.clone().unwrap_or_default(),
        content: render_markdown(&manifest.body),
        metadata: serde_json::to_value(&manifest.metadata).unwrap_or(serde_json::Value::Null),
        assets: None,
        references: None,
    };
    if with_files {
        view.assets = Some(directory_files(&dir.join("assets")));
        view.references = Some(directory_files(&dir.join("references")));
    }
    Some(view)
}

fn render_markdown(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(text, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Immediate files of a directory as name -> text content.
fn directory_files(dir: &Path) -> BTreeMap<String, String> {
    let mut files = BTreeMap::new();
    let Ok(entries) = std::fs::read_dir(dir) else {
        return files;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                files.insert(entry.file_name().to_string_lossy().into_owned(), text);
            }
            Err(e) => eprintln!("[web] Failed to read {} as text: {}", path.display(), e),
        }
    }
    files
}
