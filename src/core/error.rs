//! Generation error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::util::diagnostic::Diagnostic;

/// Error produced while turning a manifest into generated files.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GenerateError {
    /// Malformed module name, unsafe header path, or an empty manifest.
    #[error("invalid manifest: {reason}")]
    InvalidManifest { reason: String },

    /// A listed header does not exist under the module's header root.
    ///
    /// Generation itself never checks the filesystem; this is only
    /// reported by `umbrella check`.
    #[error("header `{}` of module `{module}` not found", path.display())]
    MissingHeader {
        module: String,
        path: PathBuf,
        searched: PathBuf,
        candidates: Vec<PathBuf>,
    },
}

impl GenerateError {
    pub fn invalid_manifest(reason: impl Into<String>) -> Self {
        GenerateError::InvalidManifest {
            reason: reason.into(),
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            GenerateError::InvalidManifest { reason } => Diagnostic::error(reason.clone())
                .with_suggestion(
                    "Module names may only contain ASCII letters, digits, `_`, `-`, `.` and `+`",
                )
                .with_suggestion("Header paths must be relative and must not contain quotes"),

            GenerateError::MissingHeader {
                module,
                path,
                searched,
                candidates,
            } => {
                let mut diag = Diagnostic::error(format!(
                    "module `{}` lists `{}`, which does not exist",
                    module,
                    path.display()
                ))
                .with_context(format!("searched in {}", searched.display()));

                for candidate in candidates {
                    diag = diag.with_suggestion(format!(
                        "Did you mean `{}`?",
                        candidate.display()
                    ));
                }

                diag.with_suggestion(format!(
                    "Fix `header_root` or the `headers` list of `{}` in Umbrella.toml",
                    module
                ))
            }
        }
    }
}
