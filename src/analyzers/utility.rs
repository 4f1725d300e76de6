use std::hash::Hash;

use indexmap::IndexMap;

/// Counts occurrences while remembering the order keys were first seen.
///
/// Rankings are stable: equal counts keep first-seen order, independent of
/// hash iteration order.
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    counts: IndexMap<K, u64>,
}

impl<K: Eq + Hash + Clone> FrequencyTable<K> {
    pub fn new() -> Self {
        Self {
            counts: IndexMap::new(),
        }
    }

    pub fn add(&mut self, key: K) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    pub fn count(&self, key: &K) -> Option<u64> {
        self.counts.get(key).copied()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.counts.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Keys by descending count, ties in first-seen order.
    pub fn ranked(&self) -> Vec<(K, u64)> {
        let mut ranked: Vec<(K, u64)> = self
            .counts
            .iter()
            .map(|(k, &count)| (k.clone(), count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// First key to reach the highest count in [`FrequencyTable::ranked`] order.
    pub fn first_mode(&self) -> Option<(K, u64)> {
        let mut best: Option<(&K, u64)> = None;
        for (key, &count) in &self.counts {
            if best.is_none_or(|(_, b)| count > b) {
                best = Some((key, count));
            }
        }
        best.map(|(k, count)| (k.clone(), count))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.counts.keys()
    }
}

impl<K: Eq + Hash + Clone + Ord> FrequencyTable<K> {
    /// Most frequent key; the smallest one when several tie.
    pub fn smallest_mode(&self) -> Option<(K, u64)> {
        let mut best: Option<(&K, u64)> = None;
        for (key, &count) in &self.counts {
            let better = match best {
                None => true,
                Some((b_key, b_count)) => count > b_count || (count == b_count && key < b_key),
            };
            if better {
                best = Some((key, count));
            }
        }
        best.map(|(k, count)| (k.clone(), count))
    }
}

impl<K: Eq + Hash + Clone> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone> FromIterator<K> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = Self::new();
        for key in iter {
            table.add(key);
        }
        table
    }
}

/// Computes the arithmetic mean of a slice of values. Returns `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
