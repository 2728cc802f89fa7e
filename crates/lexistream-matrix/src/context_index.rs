//! Global map from context-feature name to dimension index

use crate::config::Sketching;
use crate::hashing::{bin_for, bin_name};
use lexistream_core::{Error, Result};
use std::collections::HashMap;
use tracing::debug;

/// Name of the unknown context feature in literal mode
pub const UNKNOWN_FEATURE: &str = "<unk>";

/// Dimension reserved for the unknown feature in literal mode
pub const UNKNOWN_DIMENSION: usize = 0;

/// Capacity-bounded context index
///
/// In literal mode names receive dimensions in order of first appearance,
/// with dimension 0 reserved for [`UNKNOWN_FEATURE`]. Once full, new names
/// resolve to dimension 0. In hashing mode the index is fixed at
/// construction: bin `i` is named `bin_i` and owns dimension `i`.
///
/// Occurrence counts are kept apart from assignment: a token seen outside
/// any window is counted but holds no dimension until it appears as a
/// context feature.
#[derive(Debug, Clone)]
pub struct ContextIndex {
    sketching: Sketching,
    capacity: usize,
    dimensions: HashMap<String, usize>,
    names: Vec<String>,
    feature_counts: Vec<u64>,
    pending: HashMap<String, u64>,
}

impl ContextIndex {
    /// Create an index for the given sketching mode
    pub fn new(sketching: Sketching, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::config("context index capacity must be at least 1"));
        }

        let mut index = Self {
            sketching,
            capacity,
            dimensions: HashMap::new(),
            names: Vec::new(),
            feature_counts: Vec::new(),
            pending: HashMap::new(),
        };

        if sketching == Sketching::Hashing {
            for bin in 0..capacity {
                index.insert(bin_name(bin));
            }
            debug!(bins = capacity, "Pre-populated hashing context index");
        }

        Ok(index)
    }

    /// Dimension for a raw context token, assigning one if needed
    pub fn assign(&mut self, token: &str) -> Result<usize> {
        match self.sketching {
            Sketching::None => Ok(self.assign_literal(token)),
            Sketching::Hashing => self.assign_hashed(token),
        }
    }

    /// Count one occurrence of `token` without assigning it a dimension
    ///
    /// Returns the dimension the occurrence was counted against, or `None`
    /// while a literal name is still waiting for one.
    pub fn observe(&mut self, token: &str) -> Result<Option<usize>> {
        let dimension = match self.sketching {
            Sketching::Hashing => Some(self.assign_hashed(token)?),
            Sketching::None => match self.dimensions.get(token) {
                Some(&dimension) => Some(dimension),
                None if self.is_full() => Some(UNKNOWN_DIMENSION),
                None => {
                    *self.pending.entry(token.to_string()).or_insert(0) += 1;
                    None
                }
            },
        };

        if let Some(dimension) = dimension {
            self.feature_counts[dimension] += 1;
        }
        Ok(dimension)
    }

    /// Dimension of an already-known feature name
    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.dimensions.get(name).copied()
    }

    /// Feature name owning a dimension
    pub fn name_of(&self, dimension: usize) -> Option<&str> {
        self.names.get(dimension).map(String::as_str)
    }

    /// Occurrences counted against a dimension (the `g` term of PPMI)
    pub fn feature_count(&self, dimension: usize) -> u64 {
        self.feature_counts.get(dimension).copied().unwrap_or(0)
    }

    /// Number of assigned dimensions
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.names.len() >= self.capacity
    }

    pub fn sketching(&self) -> Sketching {
        self.sketching
    }

    /// Assigned (name, dimension, count) triples in dimension order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize, u64)> + '_ {
        self.names
            .iter()
            .zip(&self.feature_counts)
            .enumerate()
            .map(|(dimension, (name, count))| (name.as_str(), dimension, *count))
    }

    fn assign_literal(&mut self, token: &str) -> usize {
        if self.names.is_empty() {
            self.insert(UNKNOWN_FEATURE.to_string());
        }

        if let Some(&dimension) = self.dimensions.get(token) {
            return dimension;
        }

        if self.is_full() {
            return UNKNOWN_DIMENSION;
        }

        let dimension = self.insert(token.to_string());
        if let Some(count) = self.pending.remove(token) {
            self.feature_counts[dimension] += count;
        }
        if self.is_full() {
            // names that never got a dimension now count as unknown
            let folded: u64 = self.pending.drain().map(|(_, count)| count).sum();
            self.feature_counts[UNKNOWN_DIMENSION] += folded;
            debug!(capacity = self.capacity, folded, "Context index reached capacity");
        }
        dimension
    }

    fn assign_hashed(&self, token: &str) -> Result<usize> {
        let bin = bin_for(token, self.capacity);
        self.lookup(&bin_name(bin)).ok_or_else(|| {
            Error::invariant(format!(
                "hash bin {bin} for `{token}` is missing from the context index"
            ))
        })
    }

    fn insert(&mut self, name: String) -> usize {
        let dimension = self.names.len();
        self.dimensions.insert(name.clone(), dimension);
        self.names.push(name);
        self.feature_counts.push(0);
        dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_reserves_unknown_first() {
        let mut index = ContextIndex::new(Sketching::None, 3).unwrap();
        assert!(index.is_empty());

        assert_eq!(index.assign("good").unwrap(), 1);
        assert_eq!(index.lookup(UNKNOWN_FEATURE), Some(UNKNOWN_DIMENSION));
        assert_eq!(index.assign("morning").unwrap(), 2);
        assert_eq!(index.assign("good").unwrap(), 1);
        assert!(index.is_full());
    }

    #[test]
    fn test_literal_overflow_maps_to_unknown() {
        let mut index = ContextIndex::new(Sketching::None, 2).unwrap();
        assert_eq!(index.assign("a").unwrap(), 1);
        assert_eq!(index.assign("b").unwrap(), UNKNOWN_DIMENSION);
        assert_eq!(index.assign("c").unwrap(), UNKNOWN_DIMENSION);
        assert_eq!(index.len(), 2);
        assert_eq!(index.lookup("b"), None);
    }

    #[test]
    fn test_capacity_one_only_holds_unknown() {
        let mut index = ContextIndex::new(Sketching::None, 1).unwrap();
        assert_eq!(index.assign("anything").unwrap(), UNKNOWN_DIMENSION);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_hashing_is_prepopulated() {
        let mut index = ContextIndex::new(Sketching::Hashing, 8).unwrap();
        assert_eq!(index.len(), 8);
        assert_eq!(index.lookup("bin_0"), Some(0));
        assert_eq!(index.lookup("bin_7"), Some(7));
        assert_eq!(index.lookup(UNKNOWN_FEATURE), None);

        assert_eq!(index.assign("good").unwrap(), 7);
        assert_eq!(index.assign("morning").unwrap(), 0);
        assert_eq!(index.assign("day").unwrap(), 4);
        assert_eq!(index.len(), 8);
    }

    #[test]
    fn test_observe_counts_per_dimension() {
        let mut index = ContextIndex::new(Sketching::Hashing, 8).unwrap();
        index.observe("good").unwrap();
        index.observe("bad").unwrap();
        index.observe("morning").unwrap();

        // "good" and "bad" share bin 7
        assert_eq!(index.feature_count(7), 2);
        assert_eq!(index.feature_count(0), 1);
        assert_eq!(index.feature_count(3), 0);
        assert_eq!(index.feature_count(99), 0);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(ContextIndex::new(Sketching::None, 0).unwrap_err().is_config());
    }

    #[test]
    fn test_iter_in_dimension_order() {
        let mut index = ContextIndex::new(Sketching::None, 4).unwrap();
        index.assign("b").unwrap();
        index.assign("a").unwrap();
        index.observe("b").unwrap();
        index.observe("a").unwrap();
        index.observe("b").unwrap();

        let entries: Vec<_> = index.iter().collect();
        assert_eq!(entries, vec![("<unk>", 0, 0), ("b", 1, 2), ("a", 2, 1)]);
    }

    #[test]
    fn test_observe_does_not_assign_literal_names() {
        let mut index = ContextIndex::new(Sketching::None, 3).unwrap();
        assert_eq!(index.observe("lonely").unwrap(), None);
        assert_eq!(index.observe("good").unwrap(), None);
        assert_eq!(index.observe("good").unwrap(), None);
        assert!(index.is_empty());
        assert_eq!(index.lookup("lonely"), None);

        // pending occurrences move onto the dimension once assigned
        assert_eq!(index.assign("good").unwrap(), 1);
        assert_eq!(index.feature_count(1), 2);
        assert_eq!(index.observe("good").unwrap(), Some(1));
        assert_eq!(index.feature_count(1), 3);
    }

    #[test]
    fn test_pending_counts_fold_into_unknown_when_full() {
        let mut index = ContextIndex::new(Sketching::None, 2).unwrap();
        index.observe("a").unwrap();
        index.observe("b").unwrap();
        index.observe("b").unwrap();

        assert_eq!(index.assign("a").unwrap(), 1);
        assert!(index.is_full());
        assert_eq!(index.feature_count(1), 1);
        assert_eq!(index.feature_count(UNKNOWN_DIMENSION), 2);

        assert_eq!(index.observe("c").unwrap(), Some(UNKNOWN_DIMENSION));
        assert_eq!(index.feature_count(UNKNOWN_DIMENSION), 3);
    }
}
