//! Lazy cell iteration over a matrix.
//!
//! Both iterators borrow the matrix, compute the next cell on demand, and
//! are bounded by the matrix bit length; byte-level padding in the backing
//! buffer is never visible. Each call to [`BitMatrix::list`] or
//! [`BitMatrix::list_bits`] builds a fresh iterator, so sequences are
//! restartable with no shared state.

use crate::addressing;
use crate::matrix::BitMatrix;
use crate::Indices;
use bitgrid_core::bitbuf::{Bits, Matching};

/// Iterator over the indices of cells whose bit equals a fixed state, in
/// increasing offset order. Created by [`BitMatrix::list`].
#[derive(Debug)]
pub struct Cells<'a> {
    size: &'a [usize],
    inner: Matching<'a>,
}

impl<'a> Cells<'a> {
    pub(crate) fn new(matrix: &'a BitMatrix, state: bool) -> Self {
        Self {
            size: matrix.size(),
            inner: matrix.bits().matching(state),
        }
    }
}

impl Iterator for Cells<'_> {
    type Item = Indices;

    fn next(&mut self) -> Option<Indices> {
        let offset = self.inner.next()?;
        Some(addressing::indices_from_offset(self.size, offset))
    }
}

/// Iterator over `(bit, indices)` for every cell exactly once, in
/// increasing offset order. Created by [`BitMatrix::list_bits`].
#[derive(Debug)]
pub struct CellBits<'a> {
    size: &'a [usize],
    inner: Bits<'a>,
    offset: usize,
}

impl<'a> CellBits<'a> {
    pub(crate) fn new(matrix: &'a BitMatrix) -> Self {
        Self {
            size: matrix.size(),
            inner: matrix.bits().iter(),
            offset: 0,
        }
    }
}

impl Iterator for CellBits<'_> {
    type Item = (bool, Indices);

    fn next(&mut self) -> Option<(bool, Indices)> {
        let bit = self.inner.next()?;
        let indices = addressing::indices_from_offset(self.size, self.offset);
        self.offset += 1;
        Some((bit, indices))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for CellBits<'_> {}
