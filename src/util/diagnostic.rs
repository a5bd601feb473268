//! User-friendly diagnostic messages.
//!
//! Every error shown to the user names the root cause and, where one
//! exists, a concrete fix.

use std::fmt::Write;
use std::path::PathBuf;

use miette::{Diagnostic as MietteDiagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Help lines appended to common errors.
pub mod suggestions {
    pub const NO_MANIFEST: &str = "help: Run `umbrella init` to create an Umbrella.toml";

    pub const MODULE_NOT_FOUND: &str =
        "help: Run `umbrella add <module> <header>` to declare it";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn label(self, color: bool) -> &'static str {
        match (self, color) {
            (Severity::Error, true) => "\x1b[1;31merror\x1b[0m",
            (Severity::Error, false) => "error",
            (Severity::Warning, true) => "\x1b[1;33mwarning\x1b[0m",
            (Severity::Warning, false) => "warning",
        }
    }
}

/// A problem found in a manifest, with optional fixes.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub message: String,
    pub severity: Severity,
    /// Extra lines shown as `= ...`
    pub context: Vec<String>,
    /// Numbered fixes
    pub suggestions: Vec<String>,
    /// File the problem is in
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic::with_severity(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic::with_severity(Severity::Warning, message)
    }

    fn with_severity(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Render for the terminal, rustc style.
    pub fn format(&self, color: bool) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "{}: {}", self.severity.label(color), self.message);
        if let Some(ref path) = self.location {
            let _ = writeln!(out, "  --> {}", path.display());
        }
        for line in &self.context {
            let _ = writeln!(out, "  = {}", line);
        }

        if !self.suggestions.is_empty() {
            let help = if color { "\x1b[1;32mhelp\x1b[0m" } else { "help" };
            let _ = writeln!(out, "{}: consider:", help);
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                let _ = writeln!(out, "  {}. {}", i + 1, suggestion);
            }
        }

        out
    }
}

/// TOML syntax or schema error in a manifest, pointing at the offending span.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("failed to parse manifest: {message}")]
#[diagnostic(code(umbrella::manifest::parse))]
pub struct ManifestParseError {
    pub message: String,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("here")]
    pub span: Option<SourceSpan>,
}

impl ManifestParseError {
    /// Build from a `toml` deserialization error and the text it came from.
    pub fn from_toml(name: &str, contents: &str, err: &toml::de::Error) -> Self {
        ManifestParseError {
            message: err.message().to_string(),
            src: NamedSource::new(name, contents.to_string()),
            span: err.span().map(SourceSpan::from),
        }
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic::error("module `RNWorklets` lists `Tools/Def.h`, which does not exist")
            .with_context("searched in Common/cpp/worklets")
            .with_suggestion("Did you mean `Tools/Defs.h`?");

        let output = diag.format(false);
        assert!(output.contains("error: module `RNWorklets`"));
        assert!(output.contains("  = searched in Common/cpp/worklets"));
        assert!(output.contains("help: consider:"));
        assert!(output.contains("1. Did you mean"));
    }

    #[test]
    fn test_warning_with_location() {
        let diag = Diagnostic::warning("duplicate header").with_location("Umbrella.toml");
        let output = diag.format(false);
        assert!(output.starts_with("warning: duplicate header"));
        assert!(output.contains("--> Umbrella.toml"));
    }

    #[test]
    fn test_manifest_parse_error_keeps_span() {
        let contents = "[module.Sample\nheaders = []\n";
        let err = toml::from_str::<toml::Table>(contents).unwrap_err();
        let parse = ManifestParseError::from_toml("Umbrella.toml", contents, &err);
        assert!(parse.span.is_some());
        assert!(parse.to_string().starts_with("failed to parse manifest"));
    }
}
