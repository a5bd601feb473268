//! High-level operations.
//!
//! This module contains the implementation of Umbrella commands.

pub mod check;
pub mod generate;
pub mod show;
pub mod umbrella_add;
pub mod umbrella_new;

pub use check::{check, CheckReport};
pub use generate::{generate, GenerateOptions, GenerateResult};
pub use show::{show_module, ModuleReport, ShowOptions};
pub use umbrella_add::{add_headers, AddOptions, AddResult};
pub use umbrella_new::init_manifest;
