//! Core data structures for Umbrella.
//!
//! This module contains the foundational types used throughout Umbrella:
//! - Validated module names and version records
//! - Consumer toolchain selection
//! - Manifests and workspaces

pub mod consumer;
pub mod error;
pub mod manifest;
pub mod module_name;
pub mod version;
pub mod workspace;

pub use consumer::{Consumer, Language, Platform};
pub use error::GenerateError;
pub use manifest::{Manifest, ModuleManifest, MANIFEST_NAME};
pub use module_name::ModuleName;
pub use version::VersionRecord;
pub use workspace::{find_manifest, ManifestError, SettingsOverride, Workspace};
