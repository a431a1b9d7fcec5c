//! Pattern Set
//!
//! Input normalization for the greedy syndrome constructor: deduplicate the
//! error patterns, fix the shared vector length and sort lexicographically so
//! that every later phase iterates in a deterministic order. Also the
//! available-syndrome pool: the eagerly materialized set of all non-zero bit
//! sequences of the shared length, shrinking as labels are committed.
//!

use crate::bit_vector::*;
use crate::util::*;
use itertools::Itertools;
use std::collections::BTreeSet;

/// the deduplicated, lexicographically ascending working set of error patterns
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternSet {
    length: VectorLength,
    patterns: Vec<BitVector>,
}

impl PatternSet {
    pub fn new(patterns: Vec<BitVector>) -> Result<Self, MapperError> {
        if patterns.is_empty() {
            return Err(MapperError::InvalidInput("error patterns cannot be an empty set".to_string()));
        }
        let length = patterns[0].len();
        if length == 0 {
            return Err(MapperError::InvalidInput("error patterns cannot be zero-length vectors".to_string()));
        }
        if let Some(mismatch) = patterns.iter().find(|pattern| pattern.len() != length) {
            return Err(MapperError::InvalidInput(format!(
                "all error patterns must have the same length, got {} and {}",
                length,
                mismatch.len()
            )));
        }
        let patterns: Vec<BitVector> = patterns.into_iter().sorted().dedup().collect();
        Ok(Self { length, patterns })
    }

    /// the checked boundary constructor from raw 0/1 entries
    pub fn from_binary(patterns: &[Vec<u8>]) -> Result<Self, MapperError> {
        let patterns: Vec<BitVector> = patterns
            .iter()
            .map(|entries| BitVector::try_from_binary(entries))
            .collect::<Result<_, _>>()?;
        Self::new(patterns)
    }

    pub fn length(&self) -> VectorLength {
        self.length
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BitVector> {
        self.patterns.iter()
    }

    pub fn patterns(&self) -> &[BitVector] {
        &self.patterns
    }
}

/// all `2^n - 1` non-zero syndrome labels of length `n`, in ascending order;
/// the pool only ever shrinks, one removal per committed label
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyndromePool {
    length: VectorLength,
    available: BTreeSet<BitVector>,
}

impl SyndromePool {
    pub fn new_full(length: VectorLength) -> Result<Self, MapperError> {
        let count = 1usize
            .checked_shl(length as u32)
            .ok_or_else(|| MapperError::InvalidInput(format!("cannot materialize the 2^{length} - 1 syndrome labels")))?;
        let available: BTreeSet<BitVector> = (1..count).map(|value| BitVector::from_integer(value, length)).collect();
        Ok(Self { length, available })
    }

    pub fn length(&self) -> VectorLength {
        self.length
    }

    pub fn len(&self) -> usize {
        self.available.len()
    }

    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }

    pub fn contains(&self, syndrome: &BitVector) -> bool {
        self.available.contains(syndrome)
    }

    pub fn remove(&mut self, syndrome: &BitVector) -> bool {
        self.available.remove(syndrome)
    }

    /// candidates in ascending order, the greedy trial order
    pub fn candidates(&self) -> impl Iterator<Item = &BitVector> + '_ {
        self.available.iter()
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    fn binary_set(patterns: &[&[u8]]) -> Result<PatternSet, MapperError> {
        PatternSet::from_binary(&patterns.iter().map(|entries| entries.to_vec()).collect::<Vec<_>>())
    }

    #[test]
    fn pattern_set_rejects_empty() {
        // cargo test pattern_set_rejects_empty -- --nocapture
        assert_eq!(
            PatternSet::new(vec![]),
            Err(MapperError::InvalidInput("error patterns cannot be an empty set".to_string()))
        );
    }

    #[test]
    fn pattern_set_rejects_zero_length() {
        // cargo test pattern_set_rejects_zero_length -- --nocapture
        assert_eq!(
            binary_set(&[&[]]),
            Err(MapperError::InvalidInput("error patterns cannot be zero-length vectors".to_string()))
        );
    }

    #[test]
    fn pattern_set_rejects_inconsistent_length() {
        // cargo test pattern_set_rejects_inconsistent_length -- --nocapture
        assert_eq!(
            binary_set(&[&[1, 0, 0], &[0, 1], &[0, 0, 1]]),
            Err(MapperError::InvalidInput(
                "all error patterns must have the same length, got 3 and 2".to_string()
            ))
        );
    }

    #[test]
    fn pattern_set_deduplicates_and_sorts() {
        // cargo test pattern_set_deduplicates_and_sorts -- --nocapture
        let set = binary_set(&[&[1, 0, 1], &[0, 1, 0], &[1, 0, 1]]).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.length(), 3);
        let rendered: Vec<String> = set.iter().map(|pattern| pattern.to_string()).collect();
        assert_eq!(rendered, vec!["010", "101"]);
        // supplying the duplicate is the same as supplying it once
        assert_eq!(set, binary_set(&[&[0, 1, 0], &[1, 0, 1]]).unwrap());
    }

    #[test]
    fn syndrome_pool_full_enumeration() {
        // cargo test syndrome_pool_full_enumeration -- --nocapture
        let pool = SyndromePool::new_full(3).unwrap();
        assert_eq!(pool.len(), 7);
        let rendered: Vec<String> = pool.candidates().map(|syndrome| syndrome.to_string()).collect();
        assert_eq!(rendered, vec!["001", "010", "011", "100", "101", "110", "111"]);
    }

    #[test]
    fn syndrome_pool_only_shrinks() {
        // cargo test syndrome_pool_only_shrinks -- --nocapture
        let mut pool = SyndromePool::new_full(4).unwrap();
        assert_eq!(pool.len(), 15);
        let smallest = pool.candidates().next().unwrap().clone();
        assert_eq!(smallest.to_string(), "0001");
        assert!(pool.remove(&smallest));
        assert!(!pool.contains(&smallest));
        assert!(!pool.remove(&smallest));
        assert_eq!(pool.len(), 14);
        assert_eq!(pool.candidates().next().unwrap().to_string(), "0010");
    }
}
