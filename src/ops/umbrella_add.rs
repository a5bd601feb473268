//! Implementation of `umbrella add`.
//!
//! Edits Umbrella.toml in place with `toml_edit` so comments and layout
//! survive.

use std::path::Path;

use anyhow::{Context, Result};
use toml_edit::{value, Array, ArrayOfTables, DocumentMut, Item, Table};

use crate::core::manifest::validate_header_path;
use crate::core::module_name::ModuleName;
use crate::util::fs;

/// Options for adding headers to a module.
#[derive(Debug, Clone)]
pub struct AddOptions {
    /// Module name; created when absent
    pub module: String,

    /// Headers to append, in order
    pub headers: Vec<String>,

    /// Version for a newly created module
    pub version: Option<String>,
}

/// What `add_headers` changed.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AddResult {
    /// Whether the module table was created
    pub created_module: bool,

    /// Headers appended
    pub added: Vec<String>,

    /// Headers already listed, left alone
    pub skipped: Vec<String>,
}

/// Append headers to a module in Umbrella.toml.
pub fn add_headers(manifest_path: &Path, opts: &AddOptions) -> Result<AddResult> {
    let name = ModuleName::new(opts.module.as_str())?;
    for header in &opts.headers {
        validate_header_path(&name, header)?;
    }

    let content = fs::read_to_string(manifest_path)?;
    let mut doc: DocumentMut = content
        .parse()
        .with_context(|| format!("failed to parse {}", manifest_path.display()))?;

    if !doc.contains_key("module") {
        doc["module"] = Item::ArrayOfTables(ArrayOfTables::new());
    }
    let modules = doc["module"]
        .as_array_of_tables_mut()
        .context("`module` must be an array of tables (`[[module]]`)")?;

    let mut result = AddResult::default();

    let existing = modules
        .iter()
        .position(|t| t.get("name").and_then(|n| n.as_str()) == Some(name.as_str()));
    let index = match existing {
        Some(index) => index,
        None => {
            let mut table = Table::new();
            table["name"] = value(name.as_str());
            if let Some(ref version) = opts.version {
                table["version"] = value(version.as_str());
            }
            table["headers"] = value(Array::new());
            modules.push(table);
            result.created_module = true;
            modules.len() - 1
        }
    };

    let table = modules
        .get_mut(index)
        .context("module table disappeared while editing")?;
    if !table.contains_key("headers") {
        table["headers"] = value(Array::new());
    }
    let headers = table["headers"]
        .as_array_mut()
        .with_context(|| format!("`headers` of module `{}` must be an array", name))?;

    for header in &opts.headers {
        let listed = headers.iter().any(|v| v.as_str() == Some(header.as_str()));
        if listed {
            result.skipped.push(header.clone());
        } else {
            headers.push(header.as_str());
            result.added.push(header.clone());
        }
    }

    fs::write_string(manifest_path, &doc.to_string())?;

    Ok(result)
}
