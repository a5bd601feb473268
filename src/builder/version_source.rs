//! C source defining a module's version symbols.
//!
//! The umbrella header only declares `<Ident>VersionNumber` and
//! `<Ident>VersionString`; this file gives them their values so the
//! module links without an Xcode-generated `_vers.c`.

use crate::core::module_name::ModuleName;
use crate::core::version::VersionRecord;

#[derive(Debug, Clone)]
pub struct VersionSource {
    module: ModuleName,
    version: VersionRecord,
}

impl VersionSource {
    pub fn new(module: ModuleName, version: VersionRecord) -> Self {
        VersionSource { module, version }
    }

    pub fn render(&self) -> String {
        let number = self.module.version_number_symbol();
        let string = self.module.version_string_symbol();
        let bytes = self.version.version_string_bytes(&self.module);
        let text = bytes.trim_end_matches('\n');

        format!(
            " extern const unsigned char {string}[];\n \
             extern const double {number};\n\
             \n \
             const unsigned char {string}[] __attribute__ ((used)) = \"{text}\" \"\\n\";\n \
             const double {number} __attribute__ ((used)) = (double){literal};\n",
            string = string,
            number = number,
            text = text,
            literal = self.version.number_literal(),
        )
    }
}
