//! Example Patterns
//!
//! Generators and loaders of error pattern sets, for tests, the benchmark
//! and the command line: the standard basis, the full non-zero enumeration,
//! seeded random sets and pattern files with one JSON vector per line.
//!

use crate::bit_vector::*;
use crate::util::*;
use more_asserts::assert_le;
use rand::SeedableRng;
use rand_xoshiro::rand_core::RngCore;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};

/// the `n` unit vectors of length `n`, each spanning its own dimension
pub fn standard_basis_patterns(n: usize) -> Vec<BitVector> {
    (0..n)
        .map(|position| {
            let mut pattern = BitVector::new_zeros(n);
            pattern.set(position, true);
            pattern
        })
        .collect()
}

/// every non-zero vector of length `n`, ascending
pub fn all_nonzero_patterns(n: usize) -> Vec<BitVector> {
    let count = 1usize
        .checked_shl(n as u32)
        .expect("cannot enumerate patterns beyond one machine word");
    (1..count).map(|value| BitVector::from_integer(value, n)).collect()
}

/// the non-zero span of up to `generator_count` random generators; the same
/// seed always yields the same set
///
/// a span is closed under XOR, so every group residual is itself a member and
/// the greedy constructor always finds an assignment; arbitrary random sets
/// do not have this property and routinely hit `UnsatisfiableAssignment`
pub fn random_span_patterns(length: usize, generator_count: usize, seed: u64) -> Vec<BitVector> {
    assert_le!(generator_count, length, "the span rank cannot exceed the vector length");
    let mut rng = DeterministicRng::seed_from_u64(seed);
    let mut span: BTreeSet<BitVector> = BTreeSet::new();
    for _ in 0..generator_count {
        let mut generator = BitVector::new_zeros(length);
        for position in 0..length {
            if rng.next_u64() & 0x01 != 0 {
                generator.set(position, true);
            }
        }
        if generator.is_zero() || span.contains(&generator) {
            continue; // dependent generator, the span is unchanged
        }
        let mut additions: Vec<BitVector> = span.iter().map(|member| member.xor(&generator)).collect();
        additions.push(generator);
        span.extend(additions);
    }
    span.into_iter().collect()
}

/// one JSON array of 0/1 integers per line, blank lines ignored
pub fn load_pattern_file(path: &str) -> Result<Vec<BitVector>, MapperError> {
    let file =
        File::open(path).map_err(|error| MapperError::InvalidInput(format!("cannot open pattern file {path}: {error}")))?;
    let mut patterns = vec![];
    for (line_index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|error| MapperError::InvalidInput(format!("cannot read pattern file {path}: {error}")))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let pattern: BitVector = serde_json::from_str(line)
            .map_err(|error| MapperError::InvalidInput(format!("pattern file {path} line {}: {error}", line_index + 1)))?;
        patterns.push(pattern);
    }
    Ok(patterns)
}

/// the `--error-patterns` argument: a JSON array of 0/1 arrays
pub fn parse_patterns_json(value: &serde_json::Value) -> Result<Vec<BitVector>, MapperError> {
    serde_json::from_value(value.clone())
        .map_err(|error| MapperError::InvalidInput(format!("error patterns must be an array of 0/1 arrays: {error}")))
}
