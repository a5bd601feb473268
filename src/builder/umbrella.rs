//! Umbrella header rendering.
//!
//! The umbrella header re-exports every public header of a module and
//! declares the module's version symbols:
//!
//! ```text
//! <export block>
//!
//! #import "A.h"
//! #import "B/C.h"
//!
//! FOUNDATION_EXPORT double SampleVersionNumber;
//! FOUNDATION_EXPORT const unsigned char SampleVersionString[];
//! ```
//!
//! Rendering is pure: identical inputs give byte-identical output and no
//! header is looked up on disk.

use anyhow::Result;

use crate::builder::export::{ExportBlock, EXPORT_MACRO};
use crate::core::consumer::Language;
use crate::core::error::GenerateError;
use crate::core::manifest::{validate_header_path, ModuleManifest};
use crate::core::module_name::ModuleName;

/// A renderable umbrella header.
#[derive(Debug, Clone)]
pub struct UmbrellaHeader {
    module: ModuleName,
    headers: Vec<String>,
    block: ExportBlock,
}

impl UmbrellaHeader {
    /// Build an umbrella header from a module name and ordered headers.
    pub fn new<I, S>(module: &str, headers: I, block: ExportBlock) -> Result<Self, GenerateError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let module = ModuleName::new(module)?;
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        for header in &headers {
            validate_header_path(&module, header)?;
        }

        Ok(UmbrellaHeader {
            module,
            headers,
            block,
        })
    }

    /// Build the umbrella header for a manifest module, expanding its
    /// header globs.
    pub fn for_module(module: &ModuleManifest, block: ExportBlock) -> Result<Self> {
        let headers = module.resolve_headers()?;
        Ok(UmbrellaHeader {
            module: module.name().clone(),
            headers,
            block,
        })
    }

    pub fn module(&self) -> &ModuleName {
        &self.module
    }

    /// Re-exported headers, in output order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// One `#import "..."` line per header.
    pub fn imports(&self) -> impl Iterator<Item = String> + '_ {
        self.headers.iter().map(|h| format!("#import \"{}\"", h))
    }

    /// The two version declarations, using the export macro.
    pub fn version_declarations(&self) -> [String; 2] {
        self.declarations_with(EXPORT_MACRO)
    }

    /// The two version declarations as a compiler for `language` sees
    /// them after macro expansion.
    pub fn expanded_declarations(&self, language: Language) -> [String; 2] {
        self.declarations_with(self.block.expand(language))
    }

    fn declarations_with(&self, keyword: &str) -> [String; 2] {
        [
            format!("{} double {};", keyword, self.module.version_number_symbol()),
            format!(
                "{} const unsigned char {}[];",
                keyword,
                self.module.version_string_symbol()
            ),
        ]
    }

    /// Render the complete file.
    pub fn render(&self) -> String {
        let mut out = self.block.render();
        out.push('\n');

        if !self.headers.is_empty() {
            for import in self.imports() {
                out.push_str(&import);
                out.push('\n');
            }
            out.push('\n');
        }

        for decl in self.version_declarations() {
            out.push_str(&decl);
            out.push('\n');
        }
        out.push('\n');

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::consumer::{Consumer, Platform};

    fn plain() -> ExportBlock {
        ExportBlock::new(Consumer::Plain, Platform::Ios)
    }

    fn ui() -> ExportBlock {
        ExportBlock::new(Consumer::UiFramework, Platform::Ios)
    }

    #[test]
    fn test_sample_scenario() {
        let header = UmbrellaHeader::new("Sample", ["A.h", "B/C.h"], plain()).unwrap();
        let out = header.render();

        let block = out.find("#define FOUNDATION_EXPORT").unwrap();
        let a = out.find("#import \"A.h\"").unwrap();
        let c = out.find("#import \"B/C.h\"").unwrap();
        let number = out.find("double SampleVersionNumber;").unwrap();
        let string = out.find("const unsigned char SampleVersionString[];").unwrap();
        assert!(block < a && a < c && c < number && number < string);

        assert_eq!(
            header.expanded_declarations(Language::C),
            [
                "extern double SampleVersionNumber;".to_string(),
                "extern const unsigned char SampleVersionString[];".to_string(),
            ]
        );
    }

    #[test]
    fn test_exact_layout() {
        let out = UmbrellaHeader::new("Sample", ["A.h"], plain())
            .unwrap()
            .render();
        let expected = format!(
            "{}\n#import \"A.h\"\n\n\
             FOUNDATION_EXPORT double SampleVersionNumber;\n\
             FOUNDATION_EXPORT const unsigned char SampleVersionString[];\n\n",
            plain().render()
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_empty_header_list() {
        let out = UmbrellaHeader::new("Sample", Vec::<String>::new(), plain())
            .unwrap()
            .render();
        assert!(!out.contains("#import \""));
        assert!(out.contains("#define FOUNDATION_EXPORT"));
        assert!(out.contains("FOUNDATION_EXPORT double SampleVersionNumber;"));
        assert!(out.contains("FOUNDATION_EXPORT const unsigned char SampleVersionString[];"));
    }

    #[test]
    fn test_empty_name_fails() {
        let err = UmbrellaHeader::new("", ["A.h"], plain()).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidManifest { .. }));
    }

    #[test]
    fn test_render_is_idempotent() {
        let headers = ["Tools/Defs.h", "Public/AsyncQueue.h", "Tools/Defs.h"];
        let first = UmbrellaHeader::new("RNWorklets", headers, ui()).unwrap().render();
        let second = UmbrellaHeader::new("RNWorklets", headers, ui()).unwrap().render();
        assert_eq!(first, second);
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let headers = ["z.h", "a.h", "m/n.h", "a.h"];
        let header = UmbrellaHeader::new("Sample", headers, ui()).unwrap();
        let out = header.render();
        let imports: Vec<&str> = out.lines().filter(|l| l.starts_with("#import \"")).collect();
        assert_eq!(
            imports,
            [
                "#import \"z.h\"",
                "#import \"a.h\"",
                "#import \"m/n.h\"",
                "#import \"a.h\""
            ]
        );
    }

    #[test]
    fn test_consumer_toggle_only_changes_block() {
        let headers = ["A.h", "B/C.h"];
        let with_ui = UmbrellaHeader::new("Sample", headers, ui()).unwrap().render();
        let with_plain = UmbrellaHeader::new("Sample", headers, plain()).unwrap().render();

        let ui_rest = with_ui.strip_prefix(&ui().render()).unwrap();
        let plain_rest = with_plain.strip_prefix(&plain().render()).unwrap();
        assert_eq!(ui_rest, plain_rest);
        assert_ne!(with_ui, with_plain);
    }

    #[test]
    fn test_dashed_module_symbols() {
        let header = UmbrellaHeader::new(
            "React-RCTFBReactNativeSpec",
            ["FBReactNativeSpec/FBReactNativeSpec.h"],
            ui(),
        )
        .unwrap();
        let out = header.render();
        assert!(out.contains("FOUNDATION_EXPORT double React_RCTFBReactNativeSpecVersionNumber;"));
        assert!(out.ends_with(
            "FOUNDATION_EXPORT const unsigned char React_RCTFBReactNativeSpecVersionString[];\n\n"
        ));
    }

    #[test]
    fn test_for_module_uses_manifest_headers() {
        let module = ModuleManifest::new("Sample", ["A.h", "B/C.h"]).unwrap();
        let header = UmbrellaHeader::for_module(&module, plain()).unwrap();
        assert_eq!(header.headers(), ["A.h", "B/C.h"]);
        assert_eq!(header.module().as_str(), "Sample");
    }

    #[test]
    fn test_for_module_never_imports_unsafe_glob_matches() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join("we\"ird.h"), "").unwrap();

        let module = ModuleManifest::new("Sample", Vec::<String>::new())
            .unwrap()
            .with_header_root(tmp.path())
            .with_header_globs(vec!["*.h".to_string()]);

        assert!(UmbrellaHeader::for_module(&module, plain()).is_err());
    }
}
