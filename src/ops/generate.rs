//! Implementation of `umbrella generate`.

use std::path::PathBuf;

use anyhow::Result;

use crate::builder::fingerprint::Freshness;
use crate::builder::plan::GenerationPlan;
use crate::core::workspace::{SettingsOverride, Workspace};
use crate::util::fs;

/// Options for a generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Modules to generate (all when empty)
    pub modules: Vec<String>,

    /// Command-line settings overrides
    pub overrides: SettingsOverride,

    /// Plan only, write nothing
    pub dry_run: bool,
}

/// Outcome of a generation run.
#[derive(Debug)]
pub struct GenerateResult {
    /// The plan that was executed
    pub plan: GenerationPlan,

    /// Files written (new or changed)
    pub written: Vec<PathBuf>,

    /// Files already up to date
    pub unchanged: Vec<PathBuf>,
}

/// Generate every planned file for the workspace.
///
/// Header existence is not checked; a missing header surfaces when the
/// generated umbrella is compiled. Files whose contents did not change
/// are left untouched.
pub fn generate(ws: &Workspace, opts: &GenerateOptions) -> Result<GenerateResult> {
    let plan = GenerationPlan::new(ws, &opts.modules, &opts.overrides)?;

    let mut written = Vec::new();
    let mut unchanged = Vec::new();

    if opts.dry_run {
        return Ok(GenerateResult {
            plan,
            written,
            unchanged,
        });
    }

    for file in plan.files() {
        match file.fingerprint().freshness()? {
            Freshness::Fresh => {
                tracing::debug!("{} is up to date", file.path.display());
                unchanged.push(file.path.clone());
            }
            state => {
                tracing::debug!("writing {} ({:?})", file.path.display(), state);
                fs::write_string(&file.path, &file.contents)?;
                written.push(file.path.clone());
            }
        }
    }

    tracing::info!(
        "generated {} module(s): {} written, {} unchanged (plan {})",
        plan.modules.len(),
        written.len(),
        unchanged.len(),
        plan.fingerprint()
    );

    Ok(GenerateResult {
        plan,
        written,
        unchanged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::consumer::Consumer;
    use crate::core::manifest::MANIFEST_NAME;
    use crate::util::GlobalContext;
    use std::path::Path;
    use tempfile::TempDir;

    fn create_workspace(dir: &Path) -> Workspace {
        let manifest_path = dir.join(MANIFEST_NAME);
        std::fs::write(
            &manifest_path,
            r#"
[settings]
output_dir = "Generated"

[[module]]
name = "Sample"
headers = ["A.h", "B/C.h"]
version_source = true
"#,
        )
        .unwrap();
        let ctx = GlobalContext::with_cwd(dir.to_path_buf()).with_global_config(None);
        Workspace::new(&manifest_path, &ctx).unwrap()
    }

    #[test]
    fn test_generate_writes_files() {
        let tmp = TempDir::new().unwrap();
        let ws = create_workspace(tmp.path());

        let result = generate(&ws, &GenerateOptions::default()).unwrap();
        assert_eq!(result.written.len(), 3);
        assert!(result.unchanged.is_empty());

        let module_dir = tmp.path().join("Generated/Sample");
        let umbrella = std::fs::read_to_string(module_dir.join("Sample-umbrella.h")).unwrap();
        assert!(umbrella.starts_with("#import <UIKit/UIKit.h>\n"));
        assert!(umbrella.contains("#import \"A.h\"\n#import \"B/C.h\"\n"));
        assert!(module_dir.join("Sample.modulemap").exists());
        assert!(module_dir.join("Sample_vers.c").exists());
    }

    #[test]
    fn test_second_run_is_unchanged() {
        let tmp = TempDir::new().unwrap();
        let ws = create_workspace(tmp.path());
        let path = tmp.path().join("Generated/Sample/Sample-umbrella.h");

        generate(&ws, &GenerateOptions::default()).unwrap();
        let first = std::fs::read(&path).unwrap();

        let again = generate(&ws, &GenerateOptions::default()).unwrap();
        assert!(again.written.is_empty());
        assert_eq!(again.unchanged.len(), 3);
        assert_eq!(std::fs::read(&path).unwrap(), first);
    }

    #[test]
    fn test_consumer_override_rewrites_umbrella_only() {
        let tmp = TempDir::new().unwrap();
        let ws = create_workspace(tmp.path());
        generate(&ws, &GenerateOptions::default()).unwrap();

        let opts = GenerateOptions {
            overrides: SettingsOverride {
                consumer: Some(Consumer::Plain),
                ..Default::default()
            },
            ..Default::default()
        };
        let result = generate(&ws, &opts).unwrap();
        assert_eq!(
            result.written,
            [tmp.path().join("Generated/Sample/Sample-umbrella.h")]
        );
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let ws = create_workspace(tmp.path());
        let opts = GenerateOptions {
            dry_run: true,
            ..Default::default()
        };

        let result = generate(&ws, &opts).unwrap();
        assert_eq!(result.plan.files().count(), 3);
        assert!(!tmp.path().join("Generated").exists());
    }

    #[test]
    fn test_missing_headers_do_not_fail_generation() {
        let tmp = TempDir::new().unwrap();
        let ws = create_workspace(tmp.path());
        // Neither A.h nor B/C.h exists.
        assert!(generate(&ws, &GenerateOptions::default()).is_ok());
    }
}
