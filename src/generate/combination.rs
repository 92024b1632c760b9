use std::collections::HashSet;

use rand::Rng;

use crate::{
    catalog::layers::LayerCatalog,
    foundation::error::{TraitmintError, TraitmintResult},
};

/// A chosen layer together with its compositing z-order.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SelectedLayer {
    /// Layer name.
    pub layer_name: String,
    /// Compositing z-order.
    pub order: i64,
}

/// One layer per group, sorted ascending by `order`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Combination {
    layers: Vec<SelectedLayer>,
}

impl Combination {
    /// Build a combination from unsorted selections. Ties keep their input order.
    pub fn from_selection(mut layers: Vec<SelectedLayer>) -> Self {
        layers.sort_by_key(|l| l.order);
        Self { layers }
    }

    /// Layers in compositing order.
    pub fn layers(&self) -> &[SelectedLayer] {
        &self.layers
    }

    /// Layer names in compositing order.
    pub fn layer_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.layers.iter().map(|l| l.layer_name.as_str())
    }

    /// Whether `name` is one of the chosen layers.
    pub fn contains(&self, name: &str) -> bool {
        self.layers.iter().any(|l| l.layer_name == name)
    }

    /// Number of layers (equals the number of groups).
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// `true` for a catalog without groups.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Order-independent identity of the chosen layer set.
    pub fn key(&self) -> CombinationKey {
        CombinationKey::from_names(self.layer_names())
    }
}

/// Canonical key used to detect duplicate combinations: the sorted layer names.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CombinationKey(Vec<String>);

impl CombinationKey {
    /// Build the key from layer names in any order.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut names = names.into_iter().map(str::to_string).collect::<Vec<_>>();
        names.sort_unstable();
        Self(names)
    }

    /// Sorted layer names.
    pub fn names(&self) -> &[String] {
        &self.0
    }
}

/// Produce `count` pairwise distinct combinations.
///
/// Each attempt draws one layer per group independently (groups in catalog order). A
/// candidate whose key was already produced is discarded and redrawn. Requests larger
/// than [`LayerCatalog::combination_space`] fail before any draw.
#[tracing::instrument(skip(catalog, rng))]
pub fn generate<R: Rng>(
    catalog: &LayerCatalog,
    count: usize,
    rng: &mut R,
) -> TraitmintResult<Vec<Combination>> {
    let space = catalog.combination_space();
    if count as u128 > space {
        return Err(TraitmintError::generation(format!(
            "requested {count} unique combinations but the trait table only allows {space}"
        )));
    }

    let samplers = catalog
        .groups()
        .iter()
        .map(|g| g.sampler())
        .collect::<TraitmintResult<Vec<_>>>()?;

    let mut seen = HashSet::<CombinationKey>::with_capacity(count);
    let mut out = Vec::with_capacity(count);
    let mut rejected = 0u64;

    while out.len() < count {
        let mut layers = Vec::with_capacity(samplers.len());
        for sampler in &samplers {
            let name = *sampler.sample(rng);
            let attrs = catalog.layer(name)?;
            layers.push(SelectedLayer {
                layer_name: name.to_string(),
                order: attrs.order,
            });
        }

        let key = CombinationKey::from_names(layers.iter().map(|l| l.layer_name.as_str()));
        if !seen.insert(key) {
            rejected += 1;
            tracing::trace!(accepted = out.len(), rejected, "duplicate combination redrawn");
            continue;
        }
        out.push(Combination::from_selection(layers));
    }

    tracing::debug!(count, rejected, "generated unique combinations");
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/generate/combination.rs"]
mod tests;
