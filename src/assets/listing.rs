use std::path::Path;

use anyhow::Context;

use crate::foundation::error::TraitmintResult;

/// File names in `dir` ending with `.<extension>`, sorted.
///
/// Only the top level of `dir` is listed; the comparison ignores ASCII case.
pub fn list_assets(dir: &Path, extension: &str) -> TraitmintResult<Vec<String>> {
    let wanted = extension.trim_start_matches('.');
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("list asset dir '{}'", dir.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("read entry in '{}'", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(wanted));
        if !matches {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Write `names` to `out`, one per line.
pub fn write_asset_list(names: &[String], out: &Path) -> TraitmintResult<()> {
    let mut text = String::new();
    for name in names {
        text.push_str(name);
        text.push('\n');
    }
    std::fs::write(out, text).with_context(|| format!("write asset list '{}'", out.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/listing.rs"]
mod tests;
