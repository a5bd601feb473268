//! Consumer toolchain, platform and language selection.
//!
//! The consumer decides which export block the umbrella header opens
//! with. It is chosen once per generation, never at runtime.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which kind of toolchain consumes the generated umbrella header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Consumer {
    /// Objective-C/Swift consumer: imports the platform UI umbrella.
    #[default]
    #[serde(alias = "ui", alias = "objc")]
    UiFramework,

    /// Plain C or C++ consumer: needs an explicit linkage keyword.
    #[serde(alias = "c")]
    Plain,
}

impl Consumer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Consumer::UiFramework => "ui-framework",
            Consumer::Plain => "plain",
        }
    }
}

impl std::fmt::Display for Consumer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Consumer {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ui-framework" | "ui" | "objc" => Ok(Consumer::UiFramework),
            "plain" | "c" => Ok(Consumer::Plain),
            _ => Err(ParseError::new("consumer", s, "ui-framework, plain")),
        }
    }
}

/// Apple platform the module is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Ios,
    Tvos,
    Visionos,
    Watchos,
    #[serde(alias = "osx")]
    Macos,
}

impl Platform {
    /// The framework umbrella header imported by UI-framework consumers.
    pub fn ui_umbrella(&self) -> &'static str {
        match self {
            Platform::Ios | Platform::Tvos | Platform::Visionos => "UIKit/UIKit.h",
            Platform::Watchos => "Foundation/Foundation.h",
            Platform::Macos => "Cocoa/Cocoa.h",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Tvos => "tvos",
            Platform::Visionos => "visionos",
            Platform::Watchos => "watchos",
            Platform::Macos => "macos",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "tvos" => Ok(Platform::Tvos),
            "visionos" => Ok(Platform::Visionos),
            "watchos" => Ok(Platform::Watchos),
            "macos" | "osx" => Ok(Platform::Macos),
            _ => Err(ParseError::new(
                "platform",
                s,
                "ios, tvos, visionos, watchos, macos",
            )),
        }
    }
}

/// Source language of a translation unit that includes the umbrella.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "c")]
    C,
    #[serde(rename = "c++")]
    Cxx,
    #[serde(rename = "objc")]
    ObjC,
    #[serde(rename = "objc++")]
    ObjCxx,
}

impl Language {
    /// Whether `__cplusplus` is defined for this language.
    pub fn is_cplusplus(&self) -> bool {
        matches!(self, Language::Cxx | Language::ObjCxx)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::C => write!(f, "c"),
            Language::Cxx => write!(f, "c++"),
            Language::ObjC => write!(f, "objc"),
            Language::ObjCxx => write!(f, "objc++"),
        }
    }
}

impl std::str::FromStr for Language {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "c" => Ok(Language::C),
            "c++" | "cxx" | "cpp" => Ok(Language::Cxx),
            "objc" | "objective-c" => Ok(Language::ObjC),
            "objc++" | "objcxx" | "objective-c++" => Ok(Language::ObjCxx),
            _ => Err(ParseError::new("language", s, "c, c++, objc, objc++")),
        }
    }
}

/// Error returned when parsing an invalid consumer, platform or language.
#[derive(Debug, Clone, Error)]
#[error("invalid {kind} '{value}', valid values: {expected}")]
pub struct ParseError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

impl ParseError {
    fn new(kind: &'static str, value: &str, expected: &'static str) -> Self {
        ParseError {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}
