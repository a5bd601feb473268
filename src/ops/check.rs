//! Implementation of `umbrella check`.
//!
//! Generation never looks at the listed headers. `check` is the opt-in
//! early validation: it reports headers that do not exist under the
//! module's header root before the compiler gets to them.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use walkdir::WalkDir;

use crate::core::error::GenerateError;
use crate::core::manifest::ModuleManifest;
use crate::core::workspace::Workspace;
use crate::util::diagnostic::{suggestions, Diagnostic};
use crate::util::fs;

/// Maximum number of "did you mean" candidates per missing header.
const MAX_CANDIDATES: usize = 3;

/// Result of checking a workspace.
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Number of header entries looked at
    pub checked: usize,

    /// Missing headers
    pub errors: Vec<GenerateError>,

    /// Duplicates and other suspicious entries
    pub warnings: Vec<Diagnostic>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check that every header of the selected modules exists.
pub fn check(ws: &Workspace, selected: &[String]) -> Result<CheckReport> {
    let manifest = ws.manifest();
    let mut report = CheckReport::default();

    for name in selected {
        if manifest.module(name).is_none() {
            bail!(
                "module `{}` is not declared in {}\n{}",
                name,
                ws.manifest_path().display(),
                suggestions::MODULE_NOT_FOUND
            );
        }
    }

    for module in &manifest.modules {
        if !selected.is_empty() && !selected.iter().any(|s| s == module.name().as_str()) {
            continue;
        }
        check_module(ws, module, &mut report)?;
    }

    tracing::info!(
        "checked {} header(s): {} missing, {} warning(s)",
        report.checked,
        report.errors.len(),
        report.warnings.len()
    );

    Ok(report)
}

fn check_module(ws: &Workspace, module: &ModuleManifest, report: &mut CheckReport) -> Result<()> {
    let root = module.header_root();
    let headers = module.resolve_headers()?;

    if headers.is_empty() {
        report.warnings.push(
            Diagnostic::warning(format!("module `{}` re-exports no headers", module.name()))
                .with_location(ws.manifest_path()),
        );
    }

    let mut seen = HashSet::new();
    for header in &headers {
        report.checked += 1;

        if !seen.insert(header.as_str()) {
            report.warnings.push(
                Diagnostic::warning(format!(
                    "module `{}` lists `{}` more than once",
                    module.name(),
                    header
                ))
                .with_location(ws.manifest_path()),
            );
            continue;
        }

        if root.join(header).is_file() {
            continue;
        }

        tracing::debug!("{}: {} not found under {}", module.name(), header, root.display());
        report.errors.push(GenerateError::MissingHeader {
            module: module.name().as_str().to_string(),
            path: PathBuf::from(header),
            searched: root.to_path_buf(),
            candidates: find_candidates(root, header),
        });
    }

    Ok(())
}

/// Headers under `root` with the same file name as `header`.
fn find_candidates(root: &Path, header: &str) -> Vec<PathBuf> {
    let Some(file_name) = Path::new(header).file_name() else {
        return Vec::new();
    };

    let mut candidates: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.file_name().eq_ignore_ascii_case(file_name))
        .map(|entry| PathBuf::from(fs::to_import_path(&fs::relative_path(root, entry.path()))))
        .collect();

    candidates.sort();
    candidates.truncate(MAX_CANDIDATES);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manifest::MANIFEST_NAME;
    use crate::util::GlobalContext;
    use tempfile::TempDir;

    fn workspace(dir: &Path, toml: &str) -> Workspace {
        let manifest_path = dir.join(MANIFEST_NAME);
        std::fs::write(&manifest_path, toml).unwrap();
        let ctx = GlobalContext::with_cwd(dir.to_path_buf()).with_global_config(None);
        Workspace::new(&manifest_path, &ctx).unwrap()
    }

    #[test]
    fn test_all_headers_present() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("include/B")).unwrap();
        std::fs::write(tmp.path().join("include/A.h"), "").unwrap();
        std::fs::write(tmp.path().join("include/B/C.h"), "").unwrap();

        let ws = workspace(
            tmp.path(),
            "[[module]]\nname = \"Sample\"\nheader_root = \"include\"\nheaders = [\"A.h\", \"B/C.h\"]\n",
        );

        let report = check(&ws, &[]).unwrap();
        assert!(report.is_ok());
        assert_eq!(report.checked, 2);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_missing_header_with_candidate() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("include/Tools")).unwrap();
        std::fs::write(tmp.path().join("include/Tools/Defs.h"), "").unwrap();

        let ws = workspace(
            tmp.path(),
            "[[module]]\nname = \"RNWorklets\"\nheader_root = \"include\"\nheaders = [\"Defs.h\"]\n",
        );

        let report = check(&ws, &[]).unwrap();
        assert!(!report.is_ok());
        match &report.errors[0] {
            GenerateError::MissingHeader {
                module,
                path,
                candidates,
                ..
            } => {
                assert_eq!(module, "RNWorklets");
                assert_eq!(path, &PathBuf::from("Defs.h"));
                assert_eq!(candidates, &[PathBuf::from("Tools/Defs.h")]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicates_and_empty_modules_warn() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("A.h"), "").unwrap();

        let ws = workspace(
            tmp.path(),
            "[[module]]\nname = \"Dup\"\nheaders = [\"A.h\", \"A.h\"]\n\n[[module]]\nname = \"Empty\"\n",
        );

        let report = check(&ws, &[]).unwrap();
        assert!(report.is_ok());
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings[0].message.contains("more than once"));
        assert!(report.warnings[1].message.contains("re-exports no headers"));
    }

    #[test]
    fn test_check_selected_module_only() {
        let tmp = TempDir::new().unwrap();
        let ws = workspace(
            tmp.path(),
            "[[module]]\nname = \"A\"\nheaders = [\"missing.h\"]\n\n[[module]]\nname = \"B\"\n",
        );

        let report = check(&ws, &["B".to_string()]).unwrap();
        assert!(report.is_ok());
        assert!(check(&ws, &["C".to_string()]).is_err());
    }
}
