//! Version record exported by every generated module.
//!
//! A record is built once from the manifest and never changes afterwards.
//! It backs the two symbols declared in the umbrella header
//! (`<Ident>VersionNumber` and `<Ident>VersionString`) and defined in the
//! version source.

use semver::Version;
use serde::Serialize;

use crate::core::error::GenerateError;
use crate::core::module_name::ModuleName;

/// Version string used when a module does not declare one.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Project version number used when a module does not declare one.
pub const DEFAULT_VERSION_NUMBER: f64 = 1.0;

/// Immutable (number, string) version pair for a module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionRecord {
    number: f64,
    string: String,
}

impl VersionRecord {
    /// Create a version record.
    ///
    /// `version` must be a semantic version; missing minor/patch
    /// components are accepted (`"1.2"` reads as `1.2.0`) but the string
    /// is kept exactly as written.
    pub fn new(number: f64, version: impl Into<String>) -> Result<Self, GenerateError> {
        let string = version.into();

        if !number.is_finite() || number < 0.0 {
            return Err(GenerateError::invalid_manifest(format!(
                "version number `{}` must be a finite, non-negative number",
                number
            )));
        }

        if string.chars().any(|c| c == '"' || c == '\\' || c.is_control()) {
            return Err(GenerateError::invalid_manifest(format!(
                "version `{}` contains characters that cannot appear in a C string",
                string.escape_debug()
            )));
        }

        if parse_lenient(&string).is_none() {
            return Err(GenerateError::invalid_manifest(format!(
                "invalid version `{}`",
                string
            )));
        }

        Ok(VersionRecord { number, string })
    }

    /// The floating-point project version number.
    pub fn number(&self) -> f64 {
        self.number
    }

    /// The version as written in the manifest.
    pub fn as_str(&self) -> &str {
        &self.string
    }

    /// Contents of the `<Ident>VersionString` byte array, without the
    /// trailing NUL the C compiler appends.
    pub fn version_string_bytes(&self, module: &ModuleName) -> String {
        format!(
            "@(#)PROGRAM:{name}  PROJECT:{name}-{version}\n",
            name = module.as_str(),
            version = self.string
        )
    }

    /// `number` as a C floating literal (`1.0`, `1.5`, `1e20`).
    pub fn number_literal(&self) -> String {
        format!("{:?}", self.number)
    }
}

impl Default for VersionRecord {
    fn default() -> Self {
        VersionRecord {
            number: DEFAULT_VERSION_NUMBER,
            string: DEFAULT_VERSION.to_string(),
        }
    }
}

fn parse_lenient(version: &str) -> Option<Version> {
    if let Ok(v) = Version::parse(version) {
        return Some(v);
    }

    // Pod versions frequently omit components ("1.2").
    let (core, rest) = match version.find(['-', '+']) {
        Some(idx) => version.split_at(idx),
        None => (version, ""),
    };
    let parts = core.split('.').count();
    if parts == 0 || parts > 2 {
        return None;
    }
    let padded = format!("{}{}{}", core, ".0".repeat(3 - parts), rest);
    Version::parse(&padded).ok()
}
