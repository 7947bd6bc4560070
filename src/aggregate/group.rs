//! Grouped mean accumulation.

use std::collections::HashMap;
use std::hash::Hash;

/// Running `(sum, count)` for one group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeanAccumulator {
    sum: u64,
    count: usize,
}

impl MeanAccumulator {
    pub fn push(&mut self, value: u32) {
        self.sum += u64::from(value);
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// `None` for an empty group.
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        Some(self.sum as f64 / self.count as f64)
    }
}

/// Fold `items` into one accumulator per key in a single pass.
pub fn fold_means<'a, T, K, FK, FV>(items: &'a [T], key: FK, value: FV) -> HashMap<K, MeanAccumulator>
where
    K: Eq + Hash,
    FK: Fn(&'a T) -> K,
    FV: Fn(&'a T) -> u32,
{
    let mut groups: HashMap<K, MeanAccumulator> = HashMap::new();
    for item in items {
        groups.entry(key(item)).or_default().push(value(item));
    }
    groups
}
