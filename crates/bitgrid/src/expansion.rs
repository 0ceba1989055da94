//! Bounding-box growth planning for out-of-range writes.

use crate::error::GridError;
use crate::Indices;

/// A planned growth step: the smallest axis-aligned box covering both the
/// current extents and a requested out-of-range cell.
///
/// `origin_shift[d]` is the translation applied to existing content when
/// re-embedding it in the larger box; it is positive exactly when the
/// requested index was negative along axis `d`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expansion {
    /// Extents of the grown matrix. Never smaller than the current extents.
    pub new_size: Vec<usize>,
    /// Per-axis translation of existing content; always `>= 0`.
    pub origin_shift: Indices,
}

/// Decide whether `indices` falls outside `size` and, if so, plan the
/// minimal growth that brings it in range.
///
/// Returns `Ok(None)` when every axis is already in range (the fast
/// path), and `Err(GridError::SizeOverflow)` when the spanned box does
/// not fit `i64` along some axis (e.g. an index near `i64::MIN`).
/// Precondition: `indices.len() == size.len()`.
pub(crate) fn plan(size: &[usize], indices: &[i64]) -> Result<Option<Expansion>, GridError> {
    debug_assert_eq!(indices.len(), size.len());
    let grows = indices
        .iter()
        .zip(size)
        .any(|(&idx, &extent)| idx < 0 || idx as u64 >= extent as u64);
    if !grows {
        return Ok(None);
    }
    let mut new_size = Vec::with_capacity(size.len());
    let mut origin_shift = Indices::with_capacity(size.len());
    for (&idx, &extent) in indices.iter().zip(size) {
        let low = idx.min(0);
        let high = idx.max(extent as i64 - 1);
        let span = high
            .checked_sub(low)
            .and_then(|s| s.checked_add(1))
            .ok_or(GridError::SizeOverflow)?;
        let shift = low.checked_neg().ok_or(GridError::SizeOverflow)?;
        new_size.push(span as usize);
        origin_shift.push(shift);
    }
    Ok(Some(Expansion {
        new_size,
        origin_shift,
    }))
}
