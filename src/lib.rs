//! Umbrella - umbrella header generator for native modules
//!
//! This crate reads an `Umbrella.toml` manifest listing modules and their
//! public headers, and generates for each module an umbrella header that
//! re-exports every header and declares the module's version symbols,
//! plus an optional module map and version source.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

pub use crate::builder::{ExportBlock, GenerationPlan, UmbrellaHeader};
pub use crate::core::{
    Consumer, GenerateError, Language, Manifest, ModuleManifest, ModuleName, Platform,
    VersionRecord, Workspace,
};
pub use crate::util::context::GlobalContext;
