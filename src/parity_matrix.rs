//! Parity Check Matrix
//!
//! A derived, output-only view over the committed basis syndromes: collect
//! them in ascending dimension-index order, reverse, trim the common leading
//! all-zero prefix and transpose, so that each column is one trimmed basis
//! syndrome. No algorithmic logic lives here beyond reorder, trim, transpose.
//!

use crate::bit_vector::*;
use crate::util::*;
use crate::visualize::*;
use derivative::Derivative;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Derivative, PartialEq, Eq, Serialize, Deserialize)]
#[derivative(Default(new = "true"))]
pub struct ParityCheckMatrix {
    rows: usize,
    columns: usize,
    /// the dimension index that contributed each column, descending
    column_dimensions: Vec<DimensionIndex>,
    /// row-major 0/1 entries
    entries: Vec<Vec<u8>>,
}

impl ParityCheckMatrix {
    /// `basis_map` is the ascending basis list of the mapper; the columns end
    /// up in descending dimension-index order
    pub fn from_basis_map(length: VectorLength, basis_map: &[(BitVector, BitVector)]) -> Self {
        let mut columns: Vec<(DimensionIndex, &BitVector)> = basis_map
            .iter()
            .map(|(basis, syndrome)| {
                let dimension_index = basis.dimension_index().expect("basis vectors are never all-zero");
                (dimension_index, syndrome)
            })
            .collect();
        columns.reverse();
        // syndromes are non-zero labels, so only an empty basis list degenerates
        let min_idx = match columns.iter().filter_map(|(_, syndrome)| syndrome.first_set_bit()).min() {
            Some(min_idx) => min_idx,
            None => return Self::new(),
        };
        let rows = length - min_idx;
        let entries: Vec<Vec<u8>> = (0..rows)
            .map(|row| {
                columns
                    .iter()
                    .map(|(_, syndrome)| u8::from(syndrome.get(min_idx + row)))
                    .collect()
            })
            .collect();
        Self {
            rows,
            columns: columns.len(),
            column_dimensions: columns.into_iter().map(|(dimension_index, _)| dimension_index).collect(),
            entries,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 && self.columns == 0
    }

    pub fn get(&self, row: usize, column: usize) -> u8 {
        self.entries[row][column]
    }

    pub fn column_dimensions(&self) -> &[DimensionIndex] {
        &self.column_dimensions
    }

    /// row-major entries, for callers that want the raw integer matrix
    pub fn entries(&self) -> &[Vec<u8>] {
        &self.entries
    }

    /// column `j` as a vector, the trimmed basis syndrome it came from
    pub fn column(&self, column: usize) -> Vec<u8> {
        (0..self.rows).map(|row| self.entries[row][column]).collect()
    }
}

impl VizTrait for ParityCheckMatrix {
    fn viz_table(&self) -> VizTable {
        VizTable::from(self)
    }
}
