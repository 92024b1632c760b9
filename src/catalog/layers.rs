use std::{
    collections::{BTreeSet, HashMap},
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use anyhow::Context;

use crate::{
    catalog::row::{TraitRow, read_rows},
    foundation::error::{TraitmintError, TraitmintResult},
    sampling::weighted::WeightedSampler,
};

/// Attributes stored per layer name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerAttrs {
    /// Trait category.
    pub group: String,
    /// Compositing z-order.
    pub order: i64,
    /// Selection weight within the group.
    pub weight: u32,
    /// Attribute name, empty for structural layers.
    pub metadata_key: String,
    /// Attribute value.
    pub metadata_value: String,
}

/// One weighted candidate of a trait group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupEntry {
    /// Layer name.
    pub layer_name: String,
    /// Selection weight.
    pub weight: u32,
}

/// A category of mutually exclusive traits, in trait table order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraitGroup {
    /// Group name.
    pub name: String,
    /// Candidates in trait table order.
    pub entries: Vec<GroupEntry>,
}

impl TraitGroup {
    /// Weighted sampler over this group's layer names.
    pub fn sampler(&self) -> TraitmintResult<WeightedSampler<&str>> {
        WeightedSampler::new(
            self.entries
                .iter()
                .map(|e| (e.layer_name.as_str(), e.weight)),
        )
        .map_err(|e| TraitmintError::validation(format!("group '{}': {e}", self.name)))
    }

    /// Number of distinct layer names this group can actually yield.
    pub fn drawable_count(&self) -> usize {
        if self.entries.len() == 1 {
            return 1;
        }
        self.entries
            .iter()
            .filter(|e| e.weight > 0)
            .map(|e| e.layer_name.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }
}

/// Build the layer-name lookup.
///
/// Repeated layer names do not error: each later row overwrites every field of the
/// existing entry, and a 4-field row clears the metadata fields.
pub fn build_by_name(rows: &[TraitRow]) -> HashMap<String, LayerAttrs> {
    let mut by_name = HashMap::<String, LayerAttrs>::with_capacity(rows.len());
    for row in rows {
        by_name.insert(
            row.layer_name.clone(),
            LayerAttrs {
                group: row.group.clone(),
                order: row.order,
                weight: row.weight,
                metadata_key: row.metadata_key.clone(),
                metadata_value: row.metadata_value.clone(),
            },
        );
    }
    by_name
}

/// Build the per-group candidate lists, keeping first-appearance order of groups.
pub fn build_by_group(rows: &[TraitRow]) -> Vec<TraitGroup> {
    let mut groups = Vec::<TraitGroup>::new();
    let mut index = HashMap::<&str, usize>::new();
    for row in rows {
        let slot = *index.entry(row.group.as_str()).or_insert_with(|| {
            groups.push(TraitGroup {
                name: row.group.clone(),
                entries: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].entries.push(GroupEntry {
            layer_name: row.layer_name.clone(),
            weight: row.weight,
        });
    }
    groups
}

/// Immutable lookup structures derived from the trait table.
#[derive(Clone, Debug)]
pub struct LayerCatalog {
    by_name: HashMap<String, LayerAttrs>,
    groups: Vec<TraitGroup>,
}

impl LayerCatalog {
    /// Build both lookups from parsed rows. Call [`LayerCatalog::validate`] before sampling.
    pub fn from_rows(rows: &[TraitRow]) -> Self {
        Self {
            by_name: build_by_name(rows),
            groups: build_by_group(rows),
        }
    }

    /// Parse a tab-delimited trait table from `reader`.
    pub fn from_reader<R: Read>(reader: R, has_header: bool) -> TraitmintResult<Self> {
        let rows = read_rows(reader, has_header)?;
        Ok(Self::from_rows(&rows))
    }

    /// Parse the trait table at `path`.
    pub fn from_tsv_path(path: impl AsRef<Path>, has_header: bool) -> TraitmintResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open trait table '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f), has_header)
    }

    /// Check that every group can be sampled and references consistent layers.
    pub fn validate(&self) -> TraitmintResult<()> {
        if self.groups.is_empty() {
            return Err(TraitmintError::validation("trait table defines no layers"));
        }
        for group in &self.groups {
            group.sampler()?;
            for entry in &group.entries {
                let attrs = self.layer(&entry.layer_name)?;
                if attrs.group != group.name {
                    return Err(TraitmintError::validation(format!(
                        "layer '{}' is listed in group '{}' but its last row assigns it to '{}'",
                        entry.layer_name, group.name, attrs.group
                    )));
                }
            }
        }
        Ok(())
    }

    /// Attributes of `name`. A missing name is a configuration error.
    pub fn layer(&self, name: &str) -> TraitmintResult<&LayerAttrs> {
        self.by_name.get(name).ok_or_else(|| {
            TraitmintError::validation(format!("layer '{name}' is not in the trait table"))
        })
    }

    /// Attributes of `name`, if present.
    pub fn get(&self, name: &str) -> Option<&LayerAttrs> {
        self.by_name.get(name)
    }

    /// Groups in trait table order.
    pub fn groups(&self) -> &[TraitGroup] {
        &self.groups
    }

    /// Look up a group by name.
    pub fn group(&self, name: &str) -> Option<&TraitGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Sorted, de-duplicated layer names referenced by any group.
    pub fn layer_names(&self) -> Vec<&str> {
        self.groups
            .iter()
            .flat_map(|g| g.entries.iter().map(|e| e.layer_name.as_str()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of distinct layer names.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// `true` when the trait table had no data rows.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Number of distinct combinations the catalog can produce.
    ///
    /// Saturates at `u128::MAX`.
    pub fn combination_space(&self) -> u128 {
        self.groups.iter().fold(1u128, |acc, g| {
            acc.saturating_mul(g.drawable_count() as u128)
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/layers.rs"]
mod tests;
