//! Clang module map rendering.

use crate::core::module_name::ModuleName;

/// Module map pointing at a module's umbrella header.
#[derive(Debug, Clone)]
pub struct ModuleMap {
    module: ModuleName,
    framework: bool,
}

impl ModuleMap {
    pub fn new(module: ModuleName, framework: bool) -> Self {
        ModuleMap { module, framework }
    }

    pub fn render(&self) -> String {
        let prefix = if self.framework { "framework " } else { "" };
        format!(
            "{prefix}module {ident} {{\n  umbrella header \"{umbrella}\"\n\n  export *\n  module * {{ export * }}\n}}\n",
            prefix = prefix,
            ident = self.module.c_identifier(),
            umbrella = self.module.umbrella_file_name(),
        )
    }
}
