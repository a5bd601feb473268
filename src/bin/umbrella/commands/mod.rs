//! Command implementations

pub mod add;
pub mod check;
pub mod completions;
pub mod generate;
pub mod init;
pub mod show;
