//! Pipeline driver: validate and aggregate every skill folder.
//!
//! Folders are processed strictly sequentially; one bad skill never
//! aborts the run. Only a missing skills root is fatal.

use crate::aggregate::{self, OutputTarget, SectionStyle};
use crate::config::Config;
use crate::manifest::ARTIFACT_FILE;
use crate::validate;
use anyhow::{bail, Context, Result};
use std::path::PathBuf;

/// Outcome of one driver run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Skills that validated (and, for build/compile, aggregated).
    pub succeeded: Vec<String>,
    /// Skills skipped or failed, in processing order.
    pub failed: Vec<String>,
}

impl RunSummary {
    pub fn all_passed(&self) -> bool {
        self.failed.is_empty()
    }

    /// Final summary line, with the consolidated failure list when any
    /// folder was skipped.
    fn emit(&self, label: &str) {
        if self.failed.is_empty() {
            println!("{} complete: {} skills", label, self.succeeded.len());
        } else {
            eprintln!(
                "{} finished with failures: {} ok, {} failed ({})",
                label,
                self.succeeded.len(),
                self.failed.len(),
                self.failed.join(", ")
            );
        }
    }
}

pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Pipeline { config }
    }

    /// Immediate subdirectories of the skills root; non-directories are
    /// ignored. Sorted so runs are reproducible.
    fn skill_dirs(&self) -> Result<Vec<PathBuf>> {
        let root = &self.config.skills_dir;
        if !root.is_dir() {
            bail!("skills directory not found: {}", root.display());
        }

        let entries = std::fs::read_dir(root)
            .with_context(|| format!("failed to read {}", root.display()))?;
        let mut dirs = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                dirs.push(entry.path());
            }
        }
        dirs.sort();
        Ok(dirs)
    }

    /// Validate every folder without writing anything.
    pub fn validate(&self) -> Result<RunSummary> {
        println!("Validating skills in {}...", self.config.skills_dir.display());

        let mut summary = RunSummary::default();
        for dir in self.skill_dirs()? {
            let report = validate::validate_skill(&dir);
            report.emit();
            if report.passed() {
                summary.succeeded.push(report.skill);
            } else {
                summary.failed.push(report.skill);
            }
        }
        summary.emit("Validation");
        Ok(summary)
    }

    /// Aggregate every valid folder into the distribution directory.
    pub fn build(&self) -> Result<RunSummary> {
        println!("Building skills from {}...", self.config.skills_dir.display());
        self.run_aggregation(
            SectionStyle::Plain,
            OutputTarget::Dist(self.config.dist_dir.clone()),
            "Build",
        )
    }

    /// Aggregate every valid folder in place, next to its manifest.
    pub fn compile(&self) -> Result<RunSummary> {
        println!("Compiling skills in {}...", self.config.skills_dir.display());
        self.run_aggregation(SectionStyle::EnrichedRules, OutputTarget::InPlace, "Compile")
    }

    fn run_aggregation(
        &self,
        style: SectionStyle,
        target: OutputTarget,
        label: &str,
    ) -> Result<RunSummary> {
        let exclude = self.config.exclude_set();
        let mut summary = RunSummary::default();

        for dir in self.skill_dirs()? {
            let report = validate::validate_skill(&dir);
            report.emit();
            let passed = report.passed();
            let skill = report.skill;
            if !passed {
                eprintln!("[{}] Skipping due to validation errors", skill);
                summary.failed.push(skill);
                continue;
            }

            match aggregate::aggregate_skill(&dir, &exclude, style, &target) {
                Ok(output) => {
                    println!("[{}] Generated {}", skill, output.display());
                    summary.succeeded.push(skill);
                }
                Err(e) => {
                    eprintln!("[{}] Aggregation failed: {:#}", skill, e);
                    summary.failed.push(skill);
                }
            }
        }
        summary.emit(label);
        Ok(summary)
    }

    /// Remove generated artifacts from the dist tree and the skills root.
    /// Nothing else is touched; a second run finds nothing to do.
    pub fn clean(&self) -> Result<usize> {
        let mut removed = 0;
        for root in [&self.config.dist_dir, &self.config.skills_dir] {
            let pattern = format!("{}/*/{}", root.display(), ARTIFACT_FILE);
            let matches =
                glob::glob(&pattern).with_context(|| format!("bad glob pattern {}", pattern))?;
            for path in matches.flatten() {
                match std::fs::remove_file(&path) {
                    Ok(()) => {
                        println!("Removed {}", path.display());
                        removed += 1;
                    }
                    Err(e) => eprintln!("Failed to remove {}: {}", path.display(), e),
                }
            }
        }

        if removed == 0 {
            println!("No {} artifacts found.", ARTIFACT_FILE);
        } else {
            println!("Clean complete: removed {} files", removed);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// Two good skills, one missing its description.
    fn sample_config(root: &Path) -> Config {
        let skills = root.join("skills");
        write(
            &skills.join("alpha/SKILL.md"),
            "---\nname: alpha\ndescription: First\n---\nAlpha body.\n",
        );
        write(&skills.join("alpha/references/a.txt"), "ref a\n");
        write(
            &skills.join("beta/SKILL.md"),
            "---\nname: beta\ndescription: Second\n---\nBeta body.\n",
        );
        write(&skills.join("broken/SKILL.md"), "---\nname: broken\n---\n");

        Config {
            skills_dir: skills,
            dist_dir: root.join("dist/skills"),
            ..Config::default()
        }
    }

    #[test]
    fn test_validate_reports_partial_failure() {
        let tmp = tempdir().unwrap();
        let pipeline = Pipeline::new(sample_config(tmp.path()));

        let summary = pipeline.validate().unwrap();
        assert_eq!(summary.succeeded, vec!["alpha", "beta"]);
        assert_eq!(summary.failed, vec!["broken"]);
        assert!(!summary.all_passed());
    }

    #[test]
    fn test_validate_writes_nothing() {
        let tmp = tempdir().unwrap();
        let config = sample_config(tmp.path());
        let pipeline = Pipeline::new(config.clone());
        pipeline.validate().unwrap();

        assert!(!config.dist_dir.exists());
        assert!(!config.skills_dir.join("alpha/AGENTS.md").exists());
    }

    #[test]
    fn test_build_skips_invalid_and_continues() {
        let tmp = tempdir().unwrap();
        let config = sample_config(tmp.path());
        let pipeline = Pipeline::new(config.clone());

        let summary = pipeline.build().unwrap();
        assert_eq!(summary.succeeded, vec!["alpha", "beta"]);
        assert_eq!(summary.failed, vec!["broken"]);

        let alpha = config.dist_dir.join("alpha/AGENTS.md");
        let content = fs::read_to_string(&alpha).unwrap();
        assert!(content.starts_with("Alpha body.\n\n"));
        assert!(content.contains("---\n# File: references/a.txt\nref a\n"));
        assert!(config.dist_dir.join("beta/AGENTS.md").exists());
        assert!(!config.dist_dir.join("broken").exists());
    }

    #[test]
    fn test_compile_writes_in_place() {
        let tmp = tempdir().unwrap();
        let config = sample_config(tmp.path());
        let pipeline = Pipeline::new(config.clone());

        pipeline.compile().unwrap();
        assert!(config.skills_dir.join("alpha/AGENTS.md").exists());
        assert!(config.skills_dir.join("beta/AGENTS.md").exists());
        assert!(!config.skills_dir.join("broken/AGENTS.md").exists());
        assert!(!config.dist_dir.exists());
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let tmp = tempdir().unwrap();
        let config = Config {
            skills_dir: tmp.path().join("nowhere"),
            dist_dir: tmp.path().join("dist/skills"),
            ..Config::default()
        };
        let pipeline = Pipeline::new(config.clone());

        assert!(pipeline.validate().is_err());
        assert!(pipeline.build().is_err());
        assert!(!config.dist_dir.exists());
    }

    #[test]
    fn test_clean_removes_only_artifacts_and_is_idempotent() {
        let tmp = tempdir().unwrap();
        let config = sample_config(tmp.path());
        let pipeline = Pipeline::new(config.clone());

        pipeline.build().unwrap();
        pipeline.compile().unwrap();
        assert!(config.dist_dir.join("alpha/AGENTS.md").exists());
        assert!(config.skills_dir.join("alpha/AGENTS.md").exists());

        let removed = pipeline.clean().unwrap();
        assert_eq!(removed, 4); // alpha+beta in dist, alpha+beta in place
        assert!(!config.dist_dir.join("alpha/AGENTS.md").exists());
        assert!(!config.skills_dir.join("alpha/AGENTS.md").exists());
        // sources untouched
        assert!(config.skills_dir.join("alpha/SKILL.md").exists());
        assert!(config.skills_dir.join("alpha/references/a.txt").exists());

        assert_eq!(pipeline.clean().unwrap(), 0);
    }
}
