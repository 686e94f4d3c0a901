//! Per-folder skill validation.

use crate::manifest::{SkillManifest, MANIFEST_FILE};
use std::fmt;
use std::path::Path;

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// SKILL.md is absent.
    MissingManifest,
    /// SKILL.md exists but could not be read or parsed.
    Parse(String),
    /// A required frontmatter field is absent or empty.
    MissingField(&'static str),
    /// Declared name differs from the folder name. Warning only.
    NameMismatch { declared: String },
}

impl Diagnostic {
    /// Warnings let the folder proceed; everything else blocks it.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Diagnostic::NameMismatch { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingManifest => write!(f, "Missing {}", MANIFEST_FILE),
            Diagnostic::Parse(e) => write!(f, "Failed to parse {}: {}", MANIFEST_FILE, e),
            Diagnostic::MissingField(field) => {
                write!(f, "{} missing '{}' in frontmatter", MANIFEST_FILE, field)
            }
            Diagnostic::NameMismatch { declared } => write!(
                f,
                "name in {} ({}) does not match directory name",
                MANIFEST_FILE, declared
            ),
        }
    }
}

/// Outcome of validating one skill folder.
#[derive(Debug)]
pub struct ValidationReport {
    /// Folder base name the findings are attributed to.
    pub skill: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        !self.diagnostics.iter().any(Diagnostic::is_fatal)
    }

    /// Print one line per finding, each prefixed with the skill name.
    pub fn emit(&self) {
        for diagnostic in &self.diagnostics {
            if diagnostic.is_fatal() {
                eprintln!("[{}] {}", self.skill, diagnostic);
            } else {
                eprintln!("[{}] Warning: {}", self.skill, diagnostic);
            }
        }
        if self.passed() {
            println!("[{}] Validated successfully", self.skill);
        }
    }
}

/// Validate a skill folder on disk.
pub fn validate_skill(dir: &Path) -> ValidationReport {
    let skill = folder_name(dir);

    let manifest_path = dir.join(MANIFEST_FILE);
    if !manifest_path.exists() {
        return ValidationReport {
            skill,
            diagnostics: vec![Diagnostic::MissingManifest],
        };
    }

    let diagnostics = match std::fs::read_to_string(&manifest_path) {
        Ok(content) => check_manifest(&content, &skill),
        Err(e) => vec![Diagnostic::Parse(e.to_string())],
    };

    ValidationReport { skill, diagnostics }
}

/// Check manifest text against a folder name. Order matters: missing
/// fields are reported before the name-mismatch warning.
pub fn check_manifest(content: &str, folder_name: &str) -> Vec<Diagnostic> {
    let manifest = match SkillManifest::parse(content) {
        Ok(manifest) => manifest,
        Err(e) => return vec![Diagnostic::Parse(e.to_string())],
    };

    let mut diagnostics = Vec::new();
    if manifest.name.is_none() {
        diagnostics.push(Diagnostic::MissingField("name"));
    }
    if manifest.description.is_none() {
        diagnostics.push(Diagnostic::MissingField("description"));
    }
    if let Some(name) = &manifest.name {
        if name != folder_name {
            diagnostics.push(Diagnostic::NameMismatch {
                declared: name.clone(),
            });
        }
    }
    diagnostics
}

pub(crate) fn folder_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_valid_manifest_passes() {
        let content = "---\nname: my-skill\ndescription: Does things\n---\nBody\n";
        let diagnostics = check_manifest(content, "my-skill");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_missing_name_is_fatal() {
        let content = "---\ndescription: Does things\n---\n";
        let diagnostics = check_manifest(content, "my-skill");
        assert_eq!(diagnostics, vec![Diagnostic::MissingField("name")]);
        assert!(diagnostics[0].is_fatal());
    }

    #[test]
    fn test_missing_description_is_fatal() {
        let content = "---\nname: my-skill\n---\n";
        let diagnostics = check_manifest(content, "my-skill");
        assert_eq!(diagnostics, vec![Diagnostic::MissingField("description")]);
    }

    #[test]
    fn test_field_order_name_before_description() {
        let diagnostics = check_manifest("No frontmatter at all.\n", "my-skill");
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::MissingField("name"),
                Diagnostic::MissingField("description"),
            ]
        );
    }

    #[test]
    fn test_name_mismatch_is_warning_only() {
        let content = "---\nname: other-name\ndescription: Does things\n---\n";
        let diagnostics = check_manifest(content, "my-skill");
        assert_eq!(
            diagnostics,
            vec![Diagnostic::NameMismatch {
                declared: "other-name".to_string()
            }]
        );
        let report = ValidationReport {
            skill: "my-skill".to_string(),
            diagnostics,
        };
        assert!(report.passed());
    }

    #[test]
    fn test_broken_frontmatter_is_parse_error() {
        let content = "---\nname: [unclosed\n---\n";
        let diagnostics = check_manifest(content, "my-skill");
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(diagnostics[0], Diagnostic::Parse(_)));
    }

    #[test]
    fn test_missing_manifest_on_disk() {
        let dir = tempdir().unwrap();
        let skill_dir = dir.path().join("empty-skill");
        fs::create_dir(&skill_dir).unwrap();

        let report = validate_skill(&skill_dir);
        assert_eq!(report.skill, "empty-skill");
        assert_eq!(report.diagnostics, vec![Diagnostic::MissingManifest]);
        assert!(!report.passed());
    }

    #[test]
    fn test_validate_skill_on_disk_passes() {
        let dir = tempdir().unwrap();
        let skill_dir = dir.path().join("good-skill");
        fs::create_dir(&skill_dir).unwrap();
        fs::write(
            skill_dir.join(MANIFEST_FILE),
            "---\nname: good-skill\ndescription: ok\n---\nBody\n",
        )
        .unwrap();

        let report = validate_skill(&skill_dir);
        assert!(report.passed());
        assert!(report.diagnostics.is_empty());
    }
}
