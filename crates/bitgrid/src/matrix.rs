//! The immutable N-dimensional boolean matrix value.

use crate::addressing;
use crate::codec;
use crate::error::GridError;
use crate::expansion;
use crate::iter::{CellBits, Cells};
use crate::Indices;
use bitgrid_core::BitBuf;
use std::fmt;

/// A dense boolean grid of fixed dimensionality backed by a packed bit
/// buffer.
///
/// `BitMatrix` is an immutable value: every mutating operation clones the
/// buffer and returns a new matrix, so a published value is safe to read
/// from any number of observers. Writes outside the current extents do not
/// fail; [`set`](Self::set) grows the matrix to the smallest bounding box
/// containing both the old content and the requested cell.
///
/// Axis 0 is the fastest-varying axis of the underlying storage order.
///
/// # Examples
///
/// ```
/// use bitgrid::BitMatrix;
///
/// let m = BitMatrix::from_rows(&["01", "10"]).unwrap();
/// assert!(m.get(&[1, 0]).unwrap());
///
/// // Out-of-range writes grow the bounding box.
/// let grown = m.set(&[3, 0], true).unwrap();
/// assert_eq!(grown.size(), &[4, 2]);
/// assert!(grown.get(&[3, 0]).unwrap());
///
/// // The original value is untouched.
/// assert_eq!(m.size(), &[2, 2]);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct BitMatrix {
    size: Vec<usize>,
    bits: BitBuf,
}

impl fmt::Debug for BitMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitMatrix")
            .field("size", &self.size)
            .field("ones", &self.bits.count(true))
            .finish()
    }
}

impl BitMatrix {
    /// An all-false hypercube of extent 1 along each of `ndim` axes.
    pub fn unit(ndim: usize) -> Result<Self, GridError> {
        Self::from_size(&vec![1; ndim])
    }

    /// An all-false matrix with the given extents.
    ///
    /// Rejects empty extents, zero extents, and cell counts that overflow
    /// `usize`.
    pub fn from_size(size: &[usize]) -> Result<Self, GridError> {
        let total = addressing::total_bits(size)?;
        Ok(Self {
            size: size.to_vec(),
            bits: BitBuf::with_len(total),
        })
    }

    /// A 2-dimensional matrix from equal-length textual rows.
    ///
    /// `'0'` is false, any other character is true. The result has
    /// `size() == [row length, row count]`; `rows[y]` holds the cells with
    /// second index `y`.
    pub fn from_rows(rows: &[&str]) -> Result<Self, GridError> {
        if rows.is_empty() {
            return Err(GridError::ZeroExtent { axis: 1 });
        }
        let width = rows[0].chars().count();
        for (row, text) in rows.iter().enumerate().skip(1) {
            let got = text.chars().count();
            if got != width {
                return Err(GridError::UnevenRow {
                    row,
                    expected: width,
                    got,
                });
            }
        }
        let mut matrix = Self::from_size(&[width, rows.len()])?;
        for (y, text) in rows.iter().enumerate() {
            for (x, ch) in text.chars().enumerate() {
                if ch != '0' {
                    matrix.bits.set(y * width + x, true);
                }
            }
        }
        Ok(matrix)
    }

    /// Rebuild a matrix from its wire encoding. See [`encode`](Self::encode).
    pub fn decode(bytes: &[u8]) -> Result<Self, GridError> {
        codec::decode(bytes)
    }

    pub(crate) fn from_parts(size: Vec<usize>, bits: BitBuf) -> Self {
        debug_assert_eq!(addressing::total_bits(&size), Ok(bits.len()));
        Self { size, bits }
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.size.len()
    }

    /// Extents, one per axis.
    pub fn size(&self) -> &[usize] {
        &self.size
    }

    /// Total cell count, `Π size[d]`.
    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    pub(crate) fn bits(&self) -> &BitBuf {
        &self.bits
    }

    /// Read one cell.
    ///
    /// Out-of-range reads are an error; only [`set`](Self::set) treats
    /// out-of-range indices as a growth request.
    pub fn get(&self, indices: &[i64]) -> Result<bool, GridError> {
        addressing::check_indices(&self.size, indices)?;
        Ok(self.bits.get(addressing::linear_offset(&self.size, indices)))
    }

    /// Write one cell, returning the new matrix value.
    ///
    /// In range this clones the buffer and flips a single bit. Out of
    /// range it grows to the minimal bounding box covering the old extents
    /// and the requested cell, re-embeds the old content translated by the
    /// origin shift, and applies the write at the translated indices.
    /// Growth requests whose bounding box cannot be addressed error with
    /// [`GridError::SizeOverflow`].
    pub fn set(&self, indices: &[i64], value: bool) -> Result<Self, GridError> {
        if indices.len() != self.size.len() {
            return Err(GridError::DimensionMismatch {
                expected: self.size.len(),
                got: indices.len(),
            });
        }
        match expansion::plan(&self.size, indices)? {
            None => {
                let mut next = self.clone();
                next.bits
                    .set(addressing::linear_offset(&self.size, indices), value);
                Ok(next)
            }
            Some(exp) => {
                let grown = Self::from_size(&exp.new_size)?;
                let grown = grown.paste(self, &exp.origin_shift)?;
                // The requested cell must be addressed in the grown
                // coordinate space, not with the original indices.
                let translated: Indices = indices
                    .iter()
                    .zip(&exp.origin_shift)
                    .map(|(idx, shift)| idx + shift)
                    .collect();
                grown.set(&translated, value)
            }
        }
    }

    /// Write every cell of `patch` into a clone of this matrix, placing
    /// the patch origin at `pos`.
    ///
    /// Every translated cell must lie within this matrix's extents; cells
    /// outside the patch are left unchanged. Writes whose value already
    /// matches are skipped.
    pub fn paste(&self, patch: &Self, pos: &[i64]) -> Result<Self, GridError> {
        if pos.len() != self.size.len() || patch.ndim() != self.ndim() {
            return Err(GridError::DimensionMismatch {
                expected: self.size.len(),
                got: pos.len().max(patch.ndim()),
            });
        }
        // Checking the two extreme corners covers the whole patch box.
        addressing::check_indices(&self.size, pos)?;
        let mut far = Indices::with_capacity(pos.len());
        for (p, &extent) in pos.iter().zip(patch.size()) {
            let end = p.checked_add(extent as i64 - 1).ok_or_else(|| {
                GridError::IndicesOutOfRange {
                    indices: Indices::from_slice(pos),
                    bounds: addressing::bounds_text(&self.size),
                }
            })?;
            far.push(end);
        }
        addressing::check_indices(&self.size, &far)?;

        let mut next = self.clone();
        for (bit, indices) in patch.list_bits() {
            let target: Indices = indices.iter().zip(pos).map(|(idx, p)| idx + p).collect();
            let offset = addressing::linear_offset(&self.size, &target);
            if next.bits.get(offset) != bit {
                next.bits.set(offset, bit);
            }
        }
        Ok(next)
    }

    /// Lazily iterate the indices of every cell whose bit equals `state`,
    /// in increasing offset order.
    pub fn list(&self, state: bool) -> Cells<'_> {
        Cells::new(self, state)
    }

    /// Lazily iterate `(bit, indices)` for every cell exactly once, in
    /// increasing offset order.
    pub fn list_bits(&self) -> CellBits<'_> {
        CellBits::new(self)
    }

    /// Wire encoding: varints for the dimension count, the extents, and
    /// alternating run lengths starting with a (possibly empty) 0-run.
    ///
    /// Deterministic; [`decode`](Self::decode) reproduces the matrix
    /// bit-for-bit.
    pub fn encode(&self) -> Vec<u8> {
        codec::encode(self)
    }

    /// Render a 2-dimensional matrix as `size[1]` lines of `size[0]`
    /// `'1'`/`'0'` characters.
    ///
    /// Errors with [`GridError::DimensionMismatch`] for any other
    /// dimensionality.
    pub fn to_text(&self) -> Result<String, GridError> {
        if self.ndim() != 2 {
            return Err(GridError::DimensionMismatch {
                expected: 2,
                got: self.ndim(),
            });
        }
        let (width, height) = (self.size[0], self.size[1]);
        let mut out = String::with_capacity(height * (width + 1));
        for y in 0..height {
            if y > 0 {
                out.push('\n');
            }
            for x in 0..width {
                out.push(if self.bits.get(y * width + x) { '1' } else { '0' });
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks;
    use proptest::prelude::*;

    #[test]
    fn set_then_get_reads_back_both_values() {
        let m = BitMatrix::from_size(&[3, 3]).unwrap();
        assert!(m.set(&[1, 2], true).unwrap().get(&[1, 2]).unwrap());
        assert!(!m.set(&[1, 2], false).unwrap().get(&[1, 2]).unwrap());
    }

    #[test]
    fn set_leaves_the_original_value_untouched() {
        let m = BitMatrix::from_size(&[2, 2]).unwrap();
        let _changed = m.set(&[0, 0], true).unwrap();
        assert!(!m.get(&[0, 0]).unwrap());
    }

    #[test]
    fn repeated_set_at_the_same_cell_is_a_no_op() {
        let m = BitMatrix::from_size(&[2, 2]).unwrap();
        // In bounds and upward growth keep the coordinate frame, so the
        // literal write repeats as-is.
        let once = m.set(&[1, 1], true).unwrap();
        assert_eq!(once, once.set(&[1, 1], true).unwrap());
        let grown = m.set(&[4, 0], true).unwrap();
        assert_eq!(grown, grown.set(&[4, 0], true).unwrap());
        // Growth below the origin shifts the frame: the cell written by
        // set([-1]) lives at [0] afterwards, and size has become [2].
        let line = BitMatrix::from_size(&[1]).unwrap();
        let shifted = line.set(&[-1], false).unwrap();
        assert_eq!(shifted.size(), &[2]);
        assert_eq!(shifted, shifted.set(&[0], false).unwrap());
    }

    #[test]
    fn extreme_growth_request_is_an_error_not_a_wrap() {
        let m = BitMatrix::from_size(&[2, 2]).unwrap();
        assert_eq!(m.set(&[i64::MIN, 0], true), Err(GridError::SizeOverflow));
        assert_eq!(m.set(&[1, i64::MAX], true), Err(GridError::SizeOverflow));
    }

    #[test]
    fn out_of_range_read_is_an_error() {
        let m = BitMatrix::from_size(&[2, 2]).unwrap();
        assert!(matches!(
            m.get(&[2, 0]),
            Err(GridError::IndicesOutOfRange { .. })
        ));
        assert!(matches!(
            m.get(&[0, -1]),
            Err(GridError::IndicesOutOfRange { .. })
        ));
        assert_eq!(
            m.get(&[0]),
            Err(GridError::DimensionMismatch {
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn growth_above_preserves_content_in_place() {
        let m = BitMatrix::from_rows(&["01", "10"]).unwrap();
        let grown = m.set(&[3, 0], true).unwrap();
        assert_eq!(grown.size(), &[4, 2]);
        assert!(grown.get(&[3, 0]).unwrap());
        // No negative index: the origin does not move.
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(grown.get(&[x, y]).unwrap(), m.get(&[x, y]).unwrap());
            }
        }
    }

    #[test]
    fn growth_below_translates_old_content() {
        let m = BitMatrix::from_rows(&["10"]).unwrap();
        let grown = m.set(&[-2, 0], true).unwrap();
        assert_eq!(grown.size(), &[4, 1]);
        // Requested cell lands at the new origin.
        assert!(grown.get(&[0, 0]).unwrap());
        // Old cell [0, 0] shifted to [2, 0].
        assert!(grown.get(&[2, 0]).unwrap());
        assert!(!grown.get(&[1, 0]).unwrap());
        assert!(!grown.get(&[3, 0]).unwrap());
    }

    #[test]
    fn growth_along_several_axes_at_once() {
        let m = BitMatrix::from_rows(&["1"]).unwrap();
        let grown = m.set(&[-1, 2], true).unwrap();
        assert_eq!(grown.size(), &[2, 3]);
        assert!(grown.get(&[1, 0]).unwrap()); // old [0, 0]
        assert!(grown.get(&[0, 2]).unwrap()); // requested cell
        assert_eq!(grown.list(true).count(), 2);
    }

    #[test]
    fn paste_writes_the_patch_and_nothing_else() {
        let base = BitMatrix::from_rows(&["1111", "1111", "1111"]).unwrap();
        let patch = BitMatrix::from_rows(&["00", "01"]).unwrap();
        let pasted = base.paste(&patch, &[1, 1]).unwrap();
        assert_eq!(
            pasted.to_text().unwrap(),
            "1111\n1001\n1011"
        );
    }

    #[test]
    fn paste_outside_the_target_is_an_error() {
        let base = BitMatrix::from_size(&[3, 3]).unwrap();
        let patch = BitMatrix::from_size(&[2, 2]).unwrap();
        assert!(matches!(
            base.paste(&patch, &[2, 0]),
            Err(GridError::IndicesOutOfRange { .. })
        ));
        assert!(matches!(
            base.paste(&patch, &[-1, 0]),
            Err(GridError::IndicesOutOfRange { .. })
        ));
        assert!(base.paste(&patch, &[1, 1]).is_ok());
    }

    #[test]
    fn from_rows_rejects_uneven_rows() {
        assert_eq!(
            BitMatrix::from_rows(&["01", "0"]),
            Err(GridError::UnevenRow {
                row: 1,
                expected: 2,
                got: 1
            })
        );
        assert_eq!(
            BitMatrix::from_rows(&[]),
            Err(GridError::ZeroExtent { axis: 1 })
        );
        assert_eq!(
            BitMatrix::from_rows(&["", ""]),
            Err(GridError::ZeroExtent { axis: 0 })
        );
    }

    #[test]
    fn to_text_requires_two_dimensions() {
        let cube = BitMatrix::from_size(&[2, 2, 2]).unwrap();
        assert_eq!(
            cube.to_text(),
            Err(GridError::DimensionMismatch {
                expected: 2,
                got: 3
            })
        );
    }

    #[test]
    fn to_text_inverts_from_rows() {
        let rows = ["0110", "1001"];
        let m = BitMatrix::from_rows(&rows).unwrap();
        assert_eq!(m.to_text().unwrap(), rows.join("\n"));
    }

    #[test]
    fn unit_cube_has_one_false_cell() {
        let m = BitMatrix::unit(4).unwrap();
        assert_eq!(m.size(), &[1, 1, 1, 1]);
        assert_eq!(m.bit_len(), 1);
        assert!(!m.get(&[0, 0, 0, 0]).unwrap());
        assert_eq!(BitMatrix::unit(0), Err(GridError::ZeroDimensions));
    }

    #[test]
    fn equality_is_size_plus_content() {
        let a = BitMatrix::from_rows(&["01"]).unwrap();
        let b = BitMatrix::from_rows(&["01"]).unwrap();
        let c = BitMatrix::from_rows(&["0", "1"]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c); // same cells, different extents
        assert_ne!(a, BitMatrix::from_rows(&["00"]).unwrap());
    }

    proptest! {
        #[test]
        fn set_is_idempotent(
            size in proptest::collection::vec(1usize..6, 1..4),
            raw in proptest::collection::vec(-4i64..10, 3),
            value in any::<bool>(),
        ) {
            let indices = &raw[..size.len()];
            let m = BitMatrix::from_size(&size).unwrap();
            let once = m.set(indices, value).unwrap();
            // Growth below the origin moves the coordinate frame, so the
            // repeated write addresses the cell in the grown frame.
            let shift: Vec<i64> = match crate::expansion::plan(&size, indices).unwrap() {
                Some(exp) => exp.origin_shift.to_vec(),
                None => vec![0; size.len()],
            };
            let translated: Vec<i64> = indices
                .iter()
                .zip(&shift)
                .map(|(idx, s)| idx + s)
                .collect();
            let twice = once.set(&translated, value).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn expansion_preserves_every_old_cell(
            size in proptest::collection::vec(1usize..5, 1..4),
            raw in proptest::collection::vec(-6i64..12, 3),
            seeds in proptest::collection::vec(any::<usize>(), 8),
        ) {
            let indices = &raw[..size.len()];
            let mut m = BitMatrix::from_size(&size).unwrap();
            for &seed in &seeds {
                let offset = seed % m.bit_len();
                let cell = crate::addressing::indices_from_offset(&size, offset);
                m = m.set(&cell, true).unwrap();
            }

            let grown = m.set(indices, true).unwrap();
            let shift: Vec<i64> = match crate::expansion::plan(&size, indices).unwrap() {
                Some(exp) => exp.origin_shift.to_vec(),
                None => vec![0; size.len()],
            };
            // The requested logical cell reads back true.
            let translated: Vec<i64> = indices
                .iter()
                .zip(&shift)
                .map(|(idx, s)| idx + s)
                .collect();
            prop_assert!(grown.get(&translated).unwrap());
            // Every originally in-range cell is preserved at its shifted
            // location.
            for (bit, old) in m.list_bits() {
                let moved: Vec<i64> = old.iter().zip(&shift).map(|(idx, s)| idx + s).collect();
                if moved == translated {
                    continue; // overwritten by the requested write
                }
                prop_assert_eq!(grown.get(&moved).unwrap(), bit);
            }
        }

        #[test]
        fn paste_result_contains_the_patch(
            base_size in proptest::collection::vec(2usize..6, 2..4),
        ) {
            let patch_size: Vec<usize> = base_size.iter().map(|&s| s - 1).collect();
            let base = BitMatrix::from_size(&base_size).unwrap();
            let mut patch = BitMatrix::from_size(&patch_size).unwrap();
            let origin = vec![0i64; patch_size.len()];
            patch = patch.set(&origin, true).unwrap();

            let pos = vec![1i64; base_size.len()];
            let pasted = base.paste(&patch, &pos).unwrap();
            for (bit, indices) in patch.list_bits() {
                let target: Vec<i64> =
                    indices.iter().zip(&pos).map(|(idx, p)| idx + p).collect();
                prop_assert_eq!(pasted.get(&target).unwrap(), bit);
            }
            checks::assert_lists_partition_cells(&pasted);
        }
    }
}
