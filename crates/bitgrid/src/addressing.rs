//! Mixed-radix conversion between N-dimensional indices and linear bit
//! offsets.
//!
//! Axis 0 is the fastest-varying: the offset of `indices` under extents
//! `size` is `Σ_d indices[d] · Π_{k<d} size[k]`.

use crate::error::GridError;
use crate::Indices;

/// Validate extents and compute the total cell count `Π size[d]`.
///
/// Rejects zero dimensions, zero extents, and products that overflow
/// `usize`.
pub(crate) fn total_bits(size: &[usize]) -> Result<usize, GridError> {
    if size.is_empty() {
        return Err(GridError::ZeroDimensions);
    }
    let mut total: usize = 1;
    for (axis, &extent) in size.iter().enumerate() {
        if extent == 0 {
            return Err(GridError::ZeroExtent { axis });
        }
        total = total.checked_mul(extent).ok_or(GridError::SizeOverflow)?;
    }
    Ok(total)
}

/// Check that `indices` has the right dimension count and addresses a cell
/// inside `size`.
pub(crate) fn check_indices(size: &[usize], indices: &[i64]) -> Result<(), GridError> {
    if indices.len() != size.len() {
        return Err(GridError::DimensionMismatch {
            expected: size.len(),
            got: indices.len(),
        });
    }
    for (&idx, &extent) in indices.iter().zip(size) {
        if idx < 0 || idx as u64 >= extent as u64 {
            return Err(GridError::IndicesOutOfRange {
                indices: Indices::from_slice(indices),
                bounds: bounds_text(size),
            });
        }
    }
    Ok(())
}

/// Human-readable extent description, e.g. `[0, 2) x [0, 3)`.
pub(crate) fn bounds_text(size: &[usize]) -> String {
    size.iter()
        .map(|extent| format!("[0, {extent})"))
        .collect::<Vec<_>>()
        .join(" x ")
}

/// Linear bit offset of `indices` under `size`.
///
/// Precondition: `check_indices(size, indices)` has passed. Enforced with
/// a debug assertion only; this sits on the per-cell hot path.
pub(crate) fn linear_offset(size: &[usize], indices: &[i64]) -> usize {
    debug_assert!(check_indices(size, indices).is_ok());
    let mut offset = 0usize;
    let mut stride = 1usize;
    for (&idx, &extent) in indices.iter().zip(size) {
        offset += idx as usize * stride;
        stride *= extent;
    }
    offset
}

/// Inverse of [`linear_offset`]: successive modulo/divide by each extent
/// in axis order.
pub(crate) fn indices_from_offset(size: &[usize], mut offset: usize) -> Indices {
    let mut indices = Indices::with_capacity(size.len());
    for &extent in size {
        indices.push((offset % extent) as i64);
        offset /= extent;
    }
    indices
}
