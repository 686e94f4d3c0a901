//! AGENTS.md assembly.
//!
//! One aggregator covers both output shapes: plain `# File:` sections
//! everywhere, or enriched sections for `rules/**/*.md` files derived
//! from their own frontmatter.

use crate::collect::{self, ExcludeSet};
use crate::frontmatter;
use crate::manifest::{SkillManifest, Tags, ARTIFACT_FILE, MANIFEST_FILE};
use crate::validate::folder_name;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// How each collected file becomes a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionStyle {
    /// `---` fence, `# File:` heading, raw content.
    Plain,
    /// Like `Plain`, except `rules/**/*.md` files get a title line built
    /// from their frontmatter plus optional description, tags, and body.
    EnrichedRules,
}

/// Where the artifact lands.
#[derive(Debug, Clone)]
pub enum OutputTarget {
    /// `<dist>/<skill>/AGENTS.md`, directory created on demand.
    Dist(PathBuf),
    /// `<skill_dir>/AGENTS.md`, next to the manifest.
    InPlace,
}

impl OutputTarget {
    fn resolve(&self, skill_dir: &Path, skill: &str) -> Result<PathBuf> {
        match self {
            OutputTarget::Dist(dist) => {
                let out_dir = dist.join(skill);
                std::fs::create_dir_all(&out_dir)
                    .with_context(|| format!("failed to create {}", out_dir.display()))?;
                Ok(out_dir.join(ARTIFACT_FILE))
            }
            OutputTarget::InPlace => Ok(skill_dir.join(ARTIFACT_FILE)),
        }
    }
}

/// Aggregate one validated skill folder and write its artifact.
///
/// Overwrites any existing artifact. Returns the output path.
pub fn aggregate_skill(
    skill_dir: &Path,
    exclude: &ExcludeSet,
    style: SectionStyle,
    target: &OutputTarget,
) -> Result<PathBuf> {
    let skill = folder_name(skill_dir);
    let document = render_skill(skill_dir, &skill, exclude, style)?;
    let output = target.resolve(skill_dir, &skill)?;
    std::fs::write(&output, document)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(output)
}

/// Build the aggregated document text without writing it.
pub fn render_skill(
    skill_dir: &Path,
    skill: &str,
    exclude: &ExcludeSet,
    style: SectionStyle,
) -> Result<String> {
    let manifest_path = skill_dir.join(MANIFEST_FILE);
    let manifest_text = std::fs::read_to_string(&manifest_path)
        .with_context(|| format!("failed to read {}", manifest_path.display()))?;
    let manifest = SkillManifest::parse(&manifest_text)?;

    let mut out = String::from(manifest.body.trim_end());
    out.push_str("\n\n");

    for rel in collect::collect_files(skill_dir, exclude) {
        let path = skill_dir.join(&rel);
        // An unreadable file is skipped rather than aborting the folder;
        // non-UTF-8 content is decoded lossily so every collected file
        // still gets its section.
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!("[{}] Skipping unreadable file {}: {}", skill, rel.display(), e);
                continue;
            }
        };
        let content = String::from_utf8_lossy(&bytes);

        let section = if style == SectionStyle::EnrichedRules && is_rules_markdown(&rel) {
            match enriched_section(&rel, &content) {
                Ok(section) => section,
                Err(e) => {
                    eprintln!(
                        "[{}] Bad frontmatter in {}, using plain section: {}",
                        skill,
                        rel.display(),
                        e
                    );
                    plain_section(&rel, &content)
                }
            }
        } else {
            plain_section(&rel, &content)
        };
        out.push_str(&section);
    }

    Ok(out)
}

fn is_rules_markdown(rel: &Path) -> bool {
    rel.starts_with("rules") && rel.extension().is_some_and(|ext| ext == "md")
}

fn plain_section(rel: &Path, content: &str) -> String {
    format!("---\n# File: {}\n{}\n", display_path(rel), content)
}

/// Enriched section for a rules file: heading from `name`/`title`/file
/// stem, then description, joined tags, and trimmed body. Present parts
/// are separated by exactly one blank line; absent parts leave nothing
/// behind.
fn enriched_section(rel: &Path, content: &str) -> Result<String> {
    let document = frontmatter::parse(content)?;

    let title = frontmatter::get_str(&document.metadata, "name")
        .or_else(|| frontmatter::get_str(&document.metadata, "title"))
        .or_else(|| {
            rel.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| display_path(rel));

    let mut parts = vec![format!("# {} | File: {}", title, display_path(rel))];
    if let Some(description) =
        frontmatter::get_str(&document.metadata, "description").filter(|s| !s.is_empty())
    {
        parts.push(String::new());
        parts.push(description);
    }
    if let Some(tags) = frontmatter::get(&document.metadata, "tags").and_then(Tags::from_value) {
        let joined = tags.join();
        if !joined.is_empty() {
            parts.push(String::new());
            parts.push(joined);
        }
    }
    let body = document.body.trim();
    if !body.is_empty() {
        parts.push(String::new());
        parts.push(body.to_string());
    }

    Ok(format!("---\n{}\n", parts.join("\n")))
}

/// Relative path with forward slashes regardless of platform.
fn display_path(rel: &Path) -> String {
    rel.iter()
        .map(|component| component.to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
