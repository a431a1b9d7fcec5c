//! Bit Vector
//!
//! The shared value type for error patterns and syndrome labels: an ordered
//! sequence of bits with structural equality and total lexicographic order,
//! packed into machine words so that XOR and comparisons work word-at-a-time.
//!

use crate::util::*;
use serde::de::{SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

pub type BitArrayUnit = usize;
pub const BIT_UNIT_LENGTH: usize = std::mem::size_of::<BitArrayUnit>() * 8;

/// bits are stored most significant first: textual position `p` (0-indexed
/// from the left) lives at bit `BIT_UNIT_LENGTH - 1 - p % BIT_UNIT_LENGTH`
/// of word `p / BIT_UNIT_LENGTH`, and unused trailing bits stay zero, so
/// comparing the word arrays is exactly lexicographic bit-string order
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitVector {
    length: usize,
    words: Vec<BitArrayUnit>,
}

impl BitVector {
    pub fn new_zeros(length: usize) -> Self {
        let words_len = (length + BIT_UNIT_LENGTH - 1) / BIT_UNIT_LENGTH;
        Self {
            length,
            words: vec![0; words_len],
        }
    }

    pub fn from_bools(bits: &[bool]) -> Self {
        let mut vector = Self::new_zeros(bits.len());
        for (position, &bit) in bits.iter().enumerate() {
            if bit {
                vector.set(position, true);
            }
        }
        vector
    }

    /// the checked boundary constructor: entries other than 0 or 1 are rejected
    pub fn try_from_binary(entries: &[u8]) -> Result<Self, MapperError> {
        let mut vector = Self::new_zeros(entries.len());
        for (position, &entry) in entries.iter().enumerate() {
            match entry {
                0 => {}
                1 => vector.set(position, true),
                _ => {
                    return Err(MapperError::InvalidInput(format!(
                        "entry {entry} at position {position} is not a bit, expecting 0 or 1"
                    )))
                }
            }
        }
        Ok(vector)
    }

    /// the `length`-bit binary representation of `value`, most significant bit first
    pub fn from_integer(value: usize, length: usize) -> Self {
        debug_assert!(length <= BIT_UNIT_LENGTH, "integer construction is limited to one machine word");
        let mut vector = Self::new_zeros(length);
        for position in 0..length {
            if (value >> (length - 1 - position)) & 0x01 != 0 {
                vector.set(position, true);
            }
        }
        vector
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn get(&self, position: usize) -> bool {
        debug_assert!(position < self.length, "position out of range");
        let word_idx = position / BIT_UNIT_LENGTH;
        let bit_idx = BIT_UNIT_LENGTH - 1 - position % BIT_UNIT_LENGTH;
        self.words[word_idx] & (0x01 << bit_idx) != 0
    }

    pub fn set(&mut self, position: usize, value: bool) {
        debug_assert!(position < self.length, "position out of range");
        let word_idx = position / BIT_UNIT_LENGTH;
        let bit_idx = BIT_UNIT_LENGTH - 1 - position % BIT_UNIT_LENGTH;
        if value {
            self.words[word_idx] |= 0x01 << bit_idx;
        } else {
            self.words[word_idx] &= !(0x01 << bit_idx);
        }
    }

    pub fn xor_assign(&mut self, other: &Self) {
        debug_assert_eq!(self.length, other.length, "length must be the same");
        for i in 0..self.words.len() {
            self.words[i] ^= other.words[i];
        }
    }

    pub fn xor(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.xor_assign(other);
        result
    }

    pub fn is_zero(&self) -> bool {
        self.words.iter().all(|&word| word == 0)
    }

    /// textual index (from the left) of the first set bit
    pub fn first_set_bit(&self) -> Option<usize> {
        for (word_idx, &word) in self.words.iter().enumerate() {
            if word != 0 {
                return Some(word_idx * BIT_UNIT_LENGTH + word.leading_zeros() as usize);
            }
        }
        None
    }

    /// the position of the leading one counted from the right; the all-zero
    /// vector has no dimension index and is excluded from basis grouping
    pub fn dimension_index(&self) -> Option<DimensionIndex> {
        self.first_set_bit().map(|position| self.length - 1 - position)
    }

    pub fn iter_bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.length).map(|position| self.get(position))
    }

    pub fn to_binary(&self) -> Vec<u8> {
        self.iter_bits().map(u8::from).collect()
    }
}

impl PartialOrd for BitVector {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BitVector {
    fn cmp(&self, other: &Self) -> Ordering {
        self.length.cmp(&other.length).then_with(|| self.words.cmp(&other.words))
    }
}

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter_bits() {
            write!(f, "{}", if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitVector({self})")
    }
}

impl Serialize for BitVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.length))?;
        for bit in self.iter_bits() {
            seq.serialize_element(&u8::from(bit))?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for BitVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BitVectorVisitor;
        impl<'de> Visitor<'de> for BitVectorVisitor {
            type Value = BitVector;
            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a sequence of 0/1 integers")
            }
            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut entries: Vec<u8> = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(entry) = seq.next_element::<u8>()? {
                    entries.push(entry);
                }
                BitVector::try_from_binary(&entries).map_err(serde::de::Error::custom)
            }
        }
        deserializer.deserialize_seq(BitVectorVisitor)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use rand::prelude::*;
    use std::collections::BTreeSet;
    use test_case::test_case;

    struct VectorTester {
        verbose: bool,
        length: usize,
        bits: Vec<bool>,
        // the object to be tested
        vector: BitVector,
    }

    impl VectorTester {
        fn set(&mut self, position: usize, value: bool) {
            self.vector.set(position, value);
            self.bits[position] = value;
            self.assert_equal();
        }
        fn xor_assign(&mut self, other: &BitVector) {
            self.vector.xor_assign(other);
            for position in 0..self.length {
                self.bits[position] ^= other.get(position);
            }
            self.assert_equal();
        }
        fn first_set_bit(&self) -> Option<usize> {
            self.bits.iter().position(|bit| *bit)
        }
    }

    impl VectorTester {
        fn new_zeros(length: usize) -> Self {
            let vector = BitVector::new_zeros(length);
            assert!(vector.is_zero());
            Self {
                verbose: false,
                length,
                bits: vec![false; length],
                vector,
            }
        }
        fn assert_equal(&self) {
            if self.verbose {
                self.print();
            }
            for position in 0..self.length {
                assert_eq!(self.bits[position], self.vector.get(position));
            }
            assert_eq!(self.first_set_bit(), self.vector.first_set_bit());
            assert_eq!(self.first_set_bit().is_none(), self.vector.is_zero());
        }
        fn print(&self) {
            println!("{}", self.vector);
        }
        fn c2b(c: char) -> bool {
            c == '1'
        }
        fn load_from_str(bits: &str) -> Self {
            let mut tester = Self::new_zeros(bits.len());
            for (position, c) in bits.chars().enumerate() {
                tester.set(position, Self::c2b(c));
            }
            tester
        }
        fn randomize(&mut self) -> &mut Self {
            let mut rng = rand::thread_rng();
            for position in 0..self.length {
                let value = rng.gen();
                self.bits[position] = value;
                self.vector.set(position, value);
            }
            self
        }
    }

    #[test]
    fn bit_vector_simple_case() {
        // cargo test bit_vector_simple_case -- --nocapture
        let mut tester = VectorTester::new_zeros(8);
        tester.verbose = true;
        tester.set(0, true);
        assert!(!tester.vector.is_zero());
        tester.set(4, true);
        tester.set(0, false);
        assert_eq!(tester.vector.first_set_bit(), Some(4));
        assert_eq!(tester.vector.dimension_index(), Some(3));
        tester.set(4, false);
        assert!(tester.vector.is_zero());
        assert_eq!(tester.vector.dimension_index(), None);
    }

    #[test]
    fn bit_vector_random_operations() {
        // cargo test bit_vector_random_operations -- --nocapture
        let mut rng = rand::thread_rng();
        for length in 1..200 {
            let mut tester = VectorTester::new_zeros(length);
            for _ in 0..500 {
                let value = rng.gen();
                let position = rng.gen::<usize>() % length;
                tester.set(position, value);
            }
        }
    }

    #[test]
    fn bit_vector_random_xor() {
        // cargo test bit_vector_random_xor -- --nocapture
        for length in 1..200 {
            let mut tester = VectorTester::new_zeros(length);
            tester.randomize();
            for _ in 0..20 {
                tester.xor_assign(&VectorTester::new_zeros(length).randomize().vector.clone());
            }
        }
    }

    #[test]
    fn bit_vector_xor_is_involutive() {
        // cargo test bit_vector_xor_is_involutive -- --nocapture
        let mut tester = VectorTester::load_from_str("0111001101000110100000111");
        tester.verbose = true;
        let other = VectorTester::load_from_str("1010101010101010101010101").vector;
        let original = tester.vector.clone();
        tester.xor_assign(&other);
        tester.xor_assign(&other);
        assert_eq!(tester.vector, original);
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "length must be the same"))]
    fn bit_vector_xor_different_length() {
        // cargo test bit_vector_xor_different_length -- --nocapture
        let mut vector_1 = BitVector::new_zeros(10);
        let vector_2 = BitVector::new_zeros(BIT_UNIT_LENGTH + 10);
        vector_1.xor_assign(&vector_2);
    }

    #[test]
    fn bit_vector_ordering_is_lexicographic() {
        // cargo test bit_vector_ordering_is_lexicographic -- --nocapture
        // integer enumeration order, lexicographic order and BTreeSet iteration
        // order must all agree, up to a full machine word
        for length in [1, 2, 6, BIT_UNIT_LENGTH] {
            let count = 1usize << std::cmp::min(length, 10);
            let vectors: Vec<BitVector> = (0..count).map(|value| BitVector::from_integer(value, length)).collect();
            for window in vectors.windows(2) {
                assert!(window[0] < window[1]);
            }
            let set: BTreeSet<BitVector> = vectors.iter().cloned().collect();
            let iterated: Vec<BitVector> = set.into_iter().collect();
            assert_eq!(iterated, vectors);
        }
    }

    #[test_case(&[1, 0, 0], Some(2) ; "leading one at the left")]
    #[test_case(&[0, 1, 1], Some(1) ; "leading one in the middle")]
    #[test_case(&[0, 0, 1], Some(0) ; "leading one at the right")]
    #[test_case(&[0, 0, 0], None ; "all zero")]
    fn bit_vector_dimension_index(entries: &[u8], expected: Option<usize>) {
        // cargo test bit_vector_dimension_index -- --nocapture
        let vector = BitVector::try_from_binary(entries).unwrap();
        assert_eq!(vector.dimension_index(), expected);
    }

    #[test]
    fn bit_vector_rejects_non_binary_entries() {
        // cargo test bit_vector_rejects_non_binary_entries -- --nocapture
        let result = BitVector::try_from_binary(&[0, 2, 1]);
        assert_eq!(
            result,
            Err(MapperError::InvalidInput(
                "entry 2 at position 1 is not a bit, expecting 0 or 1".to_string()
            ))
        );
    }

    #[test]
    fn bit_vector_display_and_round_trip() {
        // cargo test bit_vector_display_and_round_trip -- --nocapture
        let vector = BitVector::try_from_binary(&[1, 0, 1, 1, 0]).unwrap();
        assert_eq!(format!("{vector}"), "10110");
        assert_eq!(format!("{vector:?}"), "BitVector(10110)");
        assert_eq!(vector.to_binary(), vec![1, 0, 1, 1, 0]);
        let serialized = serde_json::to_string(&vector).unwrap();
        assert_eq!(serialized, "[1,0,1,1,0]");
        let deserialized: BitVector = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, vector);
        assert!(serde_json::from_str::<BitVector>("[1,0,3]").is_err());
    }

    #[test]
    fn bit_vector_from_integer_examples() {
        // cargo test bit_vector_from_integer_examples -- --nocapture
        assert_eq!(format!("{}", BitVector::from_integer(1, 7)), "0000001");
        assert_eq!(format!("{}", BitVector::from_integer(0b1011, 4)), "1011");
        assert_eq!(format!("{}", BitVector::from_integer(64, 7)), "1000000");
    }
}
