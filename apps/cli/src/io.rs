//! Reading and writing StructureDefinition documents

use anyhow::{Context, Result};
use heck::ToUpperCamelCase;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a JSON document from `path`.
pub fn read_document(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON in {}", path.display()))
}

/// Write `document` as pretty JSON with a trailing newline, creating parent
/// directories as needed.
pub fn write_document(path: &Path, document: &Value) -> Result<()> {
    let mut content =
        serde_json::to_string_pretty(document).context("Failed to serialize document")?;
    content.push('\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write output file: {}", path.display()))
}

/// `StructureDefinition-<Name>.json`, named after the document's `name` or,
/// failing that, the input file stem.
pub fn output_file_name(document: &Value, input: &Path) -> String {
    let name = document
        .get("name")
        .and_then(Value::as_str)
        .filter(|n| !n.trim().is_empty())
        .map(str::to_string)
        .or_else(|| {
            input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "snapshot".to_string());

    format!("StructureDefinition-{}.json", name.to_upper_camel_case())
}

/// Where a snapshot goes when no explicit output file is given.
pub fn default_output_path(document: &Value, input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let dir = out_dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(output_file_name(document, input))
}
