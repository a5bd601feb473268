//! Export-declaration macro block.
//!
//! Every umbrella header opens with a block that makes `FOUNDATION_EXPORT`
//! available. Which block is emitted depends on the [`Consumer`] selected
//! for the generation; the choice is baked into the output.

use crate::core::consumer::{Consumer, Language, Platform};

/// Name of the export-declaration macro used by the version declarations.
pub const EXPORT_MACRO: &str = "FOUNDATION_EXPORT";

/// The opening block of an umbrella header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportBlock {
    consumer: Consumer,
    platform: Platform,
}

impl ExportBlock {
    pub fn new(consumer: Consumer, platform: Platform) -> Self {
        ExportBlock { consumer, platform }
    }

    /// Render the block, newline-terminated.
    pub fn render(&self) -> String {
        match self.consumer {
            Consumer::UiFramework => format!(
                "#import <{umbrella}>\n\
                 #ifndef {m}\n\
                 #define {m} extern\n\
                 #endif\n",
                umbrella = self.platform.ui_umbrella(),
                m = EXPORT_MACRO,
            ),
            Consumer::Plain => format!(
                "#ifndef {m}\n\
                 #if defined(__cplusplus)\n\
                 #define {m} extern \"C\"\n\
                 #else\n\
                 #define {m} extern\n\
                 #endif\n\
                 #endif\n",
                m = EXPORT_MACRO,
            ),
        }
    }

    /// What `FOUNDATION_EXPORT` expands to for a translation unit in
    /// `language`.
    pub fn expand(&self, language: Language) -> &'static str {
        match self.consumer {
            Consumer::UiFramework => "extern",
            Consumer::Plain if language.is_cplusplus() => "extern \"C\"",
            Consumer::Plain => "extern",
        }
    }
}
