use rand::Rng;

use crate::foundation::error::{TraitmintError, TraitmintResult};

/// Discrete weighted sampler over a fixed candidate list.
///
/// Selection uses the inverse-CDF technique: the cumulative weight array is built once,
/// each draw picks `x` uniformly in `[0, total)` and returns the first candidate whose
/// cumulative boundary is strictly greater than `x`.
#[derive(Clone, Debug)]
pub struct WeightedSampler<T> {
    values: Vec<T>,
    cumulative: Vec<u64>,
    total: u64,
}

impl<T> WeightedSampler<T> {
    /// Build a sampler from `(value, weight)` pairs.
    ///
    /// Fails on an empty list, or when more than one candidate is given and all weights
    /// are zero. A single candidate is always accepted regardless of its weight.
    pub fn new(choices: impl IntoIterator<Item = (T, u32)>) -> TraitmintResult<Self> {
        let mut values = Vec::new();
        let mut cumulative = Vec::new();
        let mut total = 0u64;
        for (value, weight) in choices {
            total += u64::from(weight);
            values.push(value);
            cumulative.push(total);
        }

        if values.is_empty() {
            return Err(TraitmintError::validation(
                "weighted choice requires at least one candidate",
            ));
        }
        if values.len() > 1 && total == 0 {
            return Err(TraitmintError::validation(format!(
                "weighted choice over {} candidates has total weight 0",
                values.len()
            )));
        }

        Ok(Self {
            values,
            cumulative,
            total,
        })
    }

    /// Draw one candidate.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> &T {
        if self.values.len() == 1 {
            return &self.values[0];
        }
        let x = rng.gen_range(0..self.total);
        let idx = self.cumulative.partition_point(|&boundary| boundary <= x);
        &self.values[idx]
    }

    /// Number of candidates, including zero-weight ones.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; construction rejects empty lists.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sum of all candidate weights.
    pub fn total_weight(&self) -> u64 {
        self.total
    }

    /// Candidates in their original order.
    pub fn values(&self) -> &[T] {
        &self.values
    }
}

/// One-shot weighted choice over `(value, weight)` pairs.
pub fn weighted_choice<'a, T, R: Rng>(
    choices: &'a [(T, u32)],
    rng: &mut R,
) -> TraitmintResult<&'a T> {
    let sampler = WeightedSampler::new(choices.iter().map(|(v, w)| (v, *w)))?;
    Ok(*sampler.sample(rng))
}

#[cfg(test)]
#[path = "../../tests/unit/sampling/weighted.rs"]
mod tests;
