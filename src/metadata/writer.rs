use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;

use crate::{
    foundation::error::{TraitmintError, TraitmintResult},
    metadata::record::MetadataRecord,
};

/// Serialize `record` as indented JSON (4 spaces).
pub fn to_pretty_json(record: &MetadataRecord) -> TraitmintResult<String> {
    let mut buf = Vec::new();
    let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
    record
        .serialize(&mut ser)
        .map_err(|e| TraitmintError::serde(format!("serialize metadata: {e}")))?;
    String::from_utf8(buf).map_err(|e| TraitmintError::serde(format!("metadata utf-8: {e}")))
}

/// Path of the metadata file for `record` inside `dir`.
pub fn metadata_path(dir: &Path, record: &MetadataRecord) -> PathBuf {
    dir.join(format!("{}.json", record.token_id))
}

/// Write `<tokenId>.json` into `dir`, replacing any existing file.
pub fn write_metadata(record: &MetadataRecord, dir: &Path) -> TraitmintResult<PathBuf> {
    let path = metadata_path(dir, record);
    let json = to_pretty_json(record)?;
    std::fs::write(&path, json)
        .with_context(|| format!("write metadata '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), "wrote metadata");
    Ok(path)
}

#[cfg(test)]
#[path = "../../tests/unit/metadata/writer.rs"]
mod tests;
