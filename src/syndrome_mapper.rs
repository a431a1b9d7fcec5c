//! Greedy Syndrome Mapper
//!
//! Assigns a unique non-zero syndrome label to every error pattern in a set,
//! such that labels respect the XOR structure of the patterns: inside each
//! leading-bit group, a member's label is the XOR of the basis label and the
//! label of the member's residual against the basis.
//!
//! Dimension indices are processed smallest-first so that every residual
//! `xor(v, basis)` points at a strictly smaller dimension index, which is
//! already resolved when reachable. The greedy choice takes the smallest
//! available label that causes no collision; there is no backtracking across
//! basis vectors.
//!

use crate::bit_vector::*;
use crate::parity_matrix::*;
use crate::pattern_set::*;
use crate::util::*;
use std::collections::{BTreeMap, BTreeSet};

/// the normalized pattern set partitioned by dimension index: one group per
/// index that occurs, the basis being the lexicographically smallest member
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasisPartition {
    basis_vectors: BTreeMap<DimensionIndex, BitVector>,
    groups: BTreeMap<DimensionIndex, Vec<BitVector>>,
}

impl BasisPartition {
    /// the all-zero vector has no leading one and is left out entirely: it is
    /// never grouped and never receives a syndrome
    pub fn partition(set: &PatternSet) -> Self {
        let mut groups: BTreeMap<DimensionIndex, Vec<BitVector>> = BTreeMap::new();
        for pattern in set.iter() {
            if let Some(dimension_index) = pattern.dimension_index() {
                groups.entry(dimension_index).or_default().push(pattern.clone());
            }
        }
        let basis_vectors: BTreeMap<DimensionIndex, BitVector> = groups
            .iter()
            .map(|(&dimension_index, group)| (dimension_index, group[0].clone()))
            .collect();
        Self { basis_vectors, groups }
    }

    pub fn basis_vectors(&self) -> &BTreeMap<DimensionIndex, BitVector> {
        &self.basis_vectors
    }

    pub fn groups(&self) -> &BTreeMap<DimensionIndex, Vec<BitVector>> {
        &self.groups
    }

    pub fn group(&self, dimension_index: DimensionIndex) -> Option<&[BitVector]> {
        self.groups.get(&dimension_index).map(|group| group.as_slice())
    }
}

/// the constructed total mapping; read-only once `new` returns
#[derive(Clone, Debug)]
pub struct SyndromeMapper {
    length: VectorLength,
    partition: BasisPartition,
    syndrome_map: BTreeMap<BitVector, BitVector>,
    /// the labels never committed, kept for inspection
    available_syndromes: SyndromePool,
}

impl SyndromeMapper {
    pub fn new(patterns: Vec<BitVector>) -> Result<Self, MapperError> {
        Self::from_pattern_set(PatternSet::new(patterns)?)
    }

    /// the checked boundary constructor from raw 0/1 entries
    pub fn from_binary(patterns: &[Vec<u8>]) -> Result<Self, MapperError> {
        Self::from_pattern_set(PatternSet::from_binary(patterns)?)
    }

    pub fn from_pattern_set(set: PatternSet) -> Result<Self, MapperError> {
        let length = set.length();
        let partition = BasisPartition::partition(&set);
        let mut available_syndromes = SyndromePool::new_full(length)?;
        let mut syndrome_map = BTreeMap::new();
        for (&dimension_index, basis) in partition.basis_vectors() {
            let group = partition.group(dimension_index).expect("every basis has a group");
            Self::assign_basis(basis, group, &mut syndrome_map, &mut available_syndromes)?;
        }
        Ok(Self {
            length,
            partition,
            syndrome_map,
            available_syndromes,
        })
    }

    /// try candidate labels in ascending order and commit the first batch that
    /// resolves the whole group without a collision
    fn assign_basis(
        basis: &BitVector,
        group: &[BitVector],
        syndrome_map: &mut BTreeMap<BitVector, BitVector>,
        available_syndromes: &mut SyndromePool,
    ) -> Result<(), MapperError> {
        // snapshot the trial order: the pool is only mutated on commit
        let candidates: Vec<BitVector> = available_syndromes.candidates().cloned().collect();
        'candidate: for candidate in candidates {
            let mut batch: BTreeMap<BitVector, BitVector> = BTreeMap::new();
            batch.insert(basis.clone(), candidate.clone());
            for member in group.iter().filter(|member| *member != basis) {
                let residual = member.xor(basis);
                // the residual has a strictly smaller dimension index, so it
                // is already resolved whenever it was an input
                let residual_syndrome = match syndrome_map.get(&residual) {
                    Some(residual_syndrome) => residual_syndrome,
                    None => continue 'candidate,
                };
                batch.insert(member.clone(), candidate.xor(residual_syndrome));
            }
            let needed: BTreeSet<&BitVector> = batch.values().collect();
            if needed.len() != batch.len() {
                continue; // duplicate label within the batch
            }
            if !needed.iter().all(|syndrome| available_syndromes.contains(syndrome)) {
                continue; // some derived label is already taken
            }
            for (pattern, syndrome) in batch {
                available_syndromes.remove(&syndrome);
                syndrome_map.insert(pattern, syndrome);
            }
            return Ok(());
        }
        Err(MapperError::UnsatisfiableAssignment { basis: basis.clone() })
    }

    /// the shared vector length `n`
    pub fn length(&self) -> VectorLength {
        self.length
    }

    /// every pattern that was grouped and assigned, in ascending order; the
    /// all-zero vector, if it was supplied, is absent
    pub fn syndrome_map(&self) -> &BTreeMap<BitVector, BitVector> {
        &self.syndrome_map
    }

    pub fn syndrome_of(&self, pattern: &BitVector) -> Option<&BitVector> {
        self.syndrome_map.get(pattern)
    }

    pub fn partition(&self) -> &BasisPartition {
        &self.partition
    }

    pub fn available_syndromes(&self) -> &SyndromePool {
        &self.available_syndromes
    }

    /// one `(basis, syndrome)` pair per dimension index, ascending
    pub fn basis_map_list(&self) -> Vec<(BitVector, BitVector)> {
        self.partition
            .basis_vectors()
            .values()
            .filter_map(|basis| self.syndrome_map.get(basis).map(|syndrome| (basis.clone(), syndrome.clone())))
            .collect()
    }

    /// the derived parity-check view over the committed basis syndromes
    pub fn parity_check_matrix(&self) -> ParityCheckMatrix {
        ParityCheckMatrix::from_basis_map(self.length, &self.basis_map_list())
    }
}
