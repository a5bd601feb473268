//! File generation.
//!
//! Renders umbrella headers, module maps and version sources, and plans
//! which of them a generation writes.

pub mod export;
pub mod fingerprint;
pub mod modulemap;
pub mod plan;
pub mod umbrella;
pub mod version_source;

pub use export::{ExportBlock, EXPORT_MACRO};
pub use fingerprint::{FileFingerprint, Freshness};
pub use modulemap::ModuleMap;
pub use plan::{FileKind, GenerationPlan, ModulePlan, PlannedFile};
pub use umbrella::UmbrellaHeader;
pub use version_source::VersionSource;
