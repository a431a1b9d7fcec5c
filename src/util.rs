use crate::bit_vector::BitVector;
use thiserror::Error;

/// the bit position of a vector's leading one, counted from the right:
/// a leading one at textual position `p` (from the left) of a length-`n`
/// vector has dimension index `n - 1 - p`
pub type DimensionIndex = usize;
pub type VectorLength = usize;

/// use Xoshiro256StarStar for deterministic random number generator
pub type DeterministicRng = rand_xoshiro::Xoshiro256StarStar;

/// fatal construction failures; no partial mapper is ever returned
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapperError {
    /// empty collection, zero-length vectors, inconsistent lengths or
    /// entries outside {0,1}
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// the candidate pool was exhausted for some basis vector; there is no
    /// backtracking across basis vectors, so this aborts the construction
    #[error("no conflict-free syndrome assignment for basis vector {basis}")]
    UnsatisfiableAssignment { basis: BitVector },
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn util_error_display() {
        // cargo test util_error_display -- --nocapture
        let error = MapperError::InvalidInput("patterns cannot be an empty set".to_string());
        assert_eq!(format!("{error}"), "invalid input: patterns cannot be an empty set");
        let error = MapperError::UnsatisfiableAssignment {
            basis: BitVector::try_from_binary(&[1, 0]).unwrap(),
        };
        assert_eq!(format!("{error}"), "no conflict-free syndrome assignment for basis vector 10");
    }
}
