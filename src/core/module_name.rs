//! Module names and the C identifiers derived from them.
//!
//! Pod-style module names may contain `-`, `.` and `+` (for example
//! `React-RCTFBReactNativeSpec`). Those characters are not valid in a C
//! symbol, so every generated symbol uses [`ModuleName::c_identifier`]
//! instead of the raw name.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::error::GenerateError;

/// Characters accepted in a module name.
static MODULE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.+-]+$").unwrap());

/// A validated module name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleName {
    name: String,
    ident: String,
}

impl ModuleName {
    /// Validate a module name.
    ///
    /// Fails with [`GenerateError::InvalidManifest`] when the name is empty
    /// or contains characters that cannot be mapped onto a C identifier.
    pub fn new(name: impl Into<String>) -> Result<Self, GenerateError> {
        let name = name.into();

        if name.is_empty() {
            return Err(GenerateError::invalid_manifest("module name is empty"));
        }

        if !MODULE_NAME.is_match(&name) {
            return Err(GenerateError::invalid_manifest(format!(
                "module name `{}` contains characters that are not allowed in a symbol name",
                name.escape_debug()
            )));
        }

        if !name.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(GenerateError::invalid_manifest(format!(
                "module name `{}` needs at least one letter or digit",
                name
            )));
        }

        let ident = to_c_identifier(&name);
        if is_reserved_identifier(&ident) {
            return Err(GenerateError::invalid_manifest(format!(
                "module name `{}` maps to `{}`, an identifier reserved by C",
                name, ident
            )));
        }

        Ok(ModuleName { name, ident })
    }

    /// The name as written in the manifest.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// The C identifier used as the prefix of generated symbols.
    pub fn c_identifier(&self) -> &str {
        &self.ident
    }

    /// `<Ident>VersionNumber`
    pub fn version_number_symbol(&self) -> String {
        format!("{}VersionNumber", self.ident)
    }

    /// `<Ident>VersionString`
    pub fn version_string_symbol(&self) -> String {
        format!("{}VersionString", self.ident)
    }

    /// File name of the umbrella header (`<Name>-umbrella.h`).
    pub fn umbrella_file_name(&self) -> String {
        format!("{}-umbrella.h", self.name)
    }

    /// File name of the module map (`<Name>.modulemap`).
    pub fn modulemap_file_name(&self) -> String {
        format!("{}.modulemap", self.name)
    }

    /// File name of the version source (`<Name>_vers.c`).
    pub fn version_source_file_name(&self) -> String {
        format!("{}_vers.c", self.name)
    }
}

fn to_c_identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }

    ident
}

/// `__x` and `_X` belong to the C implementation.
fn is_reserved_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();
    match (chars.next(), chars.next()) {
        (Some('_'), Some(c)) => c == '_' || c.is_ascii_uppercase(),
        _ => false,
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Serialize for ModuleName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}

impl<'de> Deserialize<'de> for ModuleName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ModuleName::new(s).map_err(serde::de::Error::custom)
    }
}
