use std::io::Read;

use anyhow::Context;

use crate::foundation::error::{TraitmintError, TraitmintResult};

/// One parsed data line of the trait table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraitRow {
    /// Layer name; also the asset file name relative to the asset root.
    pub layer_name: String,
    /// Trait category the layer belongs to.
    pub group: String,
    /// Compositing z-order. Lower values draw first.
    pub order: i64,
    /// Relative selection weight within the group.
    pub weight: u32,
    /// Attribute name, empty for structural layers.
    pub metadata_key: String,
    /// Attribute value, empty when `metadata_key` is empty.
    pub metadata_value: String,
}

impl TraitRow {
    /// Parse one row of already trimmed fields.
    ///
    /// `line` is only used in error messages.
    pub fn from_fields(fields: &[&str], line: u64) -> TraitmintResult<Self> {
        if fields.len() != 4 && fields.len() != 6 {
            return Err(TraitmintError::validation(format!(
                "trait table line {line}: expected 4 or 6 fields, got {}",
                fields.len()
            )));
        }

        let layer_name = fields[0].trim();
        if layer_name.is_empty() {
            return Err(TraitmintError::validation(format!(
                "trait table line {line}: layer name must be non-empty"
            )));
        }

        let order = fields[2].trim().parse::<i64>().map_err(|_| {
            TraitmintError::validation(format!(
                "trait table line {line}: order '{}' is not an integer",
                fields[2].trim()
            ))
        })?;
        let weight = fields[3].trim().parse::<u32>().map_err(|_| {
            TraitmintError::validation(format!(
                "trait table line {line}: weight '{}' is not a non-negative integer",
                fields[3].trim()
            ))
        })?;

        let (metadata_key, metadata_value) = if fields.len() == 6 {
            (fields[4].trim().to_string(), fields[5].trim().to_string())
        } else {
            (String::new(), String::new())
        };

        Ok(Self {
            layer_name: layer_name.to_string(),
            group: fields[1].trim().to_string(),
            order,
            weight,
            metadata_key,
            metadata_value,
        })
    }

    /// Whether this layer contributes a visible attribute to metadata.
    pub fn has_attribute(&self) -> bool {
        !self.metadata_key.is_empty()
    }
}

/// Read tab-delimited trait rows, skipping one header row when `has_header` is set.
pub fn read_rows<R: Read>(reader: R, has_header: bool) -> TraitmintResult<Vec<TraitRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(has_header)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("read trait table record {}", idx + 1))?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(idx as u64 + 1);
        let fields = record.iter().collect::<Vec<_>>();
        rows.push(TraitRow::from_fields(&fields, line)?);
    }
    Ok(rows)
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/row.rs"]
mod tests;
