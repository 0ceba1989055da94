//! Error types for matrix construction, addressing, and decoding.

use crate::Indices;
use bitgrid_core::VarintError;
use std::error::Error;
use std::fmt;

/// Errors arising from matrix construction or cell addressing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// An indices tuple has the wrong number of dimensions.
    DimensionMismatch {
        /// Dimension count of the matrix (or required by the operation).
        expected: usize,
        /// Dimension count supplied by the caller.
        got: usize,
    },
    /// A cell address is outside the matrix extents.
    IndicesOutOfRange {
        /// The offending indices.
        indices: Indices,
        /// Human-readable description of the valid range.
        bounds: String,
    },
    /// A textual row differs in length from the first row.
    UnevenRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        got: usize,
    },
    /// Attempted to construct a matrix with zero dimensions.
    ZeroDimensions,
    /// An extent along one axis is zero.
    ZeroExtent {
        /// The axis with the zero extent.
        axis: usize,
    },
    /// The total cell count overflows `usize`.
    SizeOverflow,
    /// A decoded run-length stream exceeds the declared total bit count.
    RunOverflow {
        /// Bit count declared by the header.
        total_bits: usize,
        /// Cumulative run length at the point of failure.
        reached: usize,
    },
    /// Decode input continues past the final run.
    TrailingBytes {
        /// Number of unconsumed bytes.
        remaining: usize,
    },
    /// A malformed variable-length integer in decode input.
    Varint(VarintError),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { expected, got } => {
                write!(f, "expected {expected} indices, got {got}")
            }
            Self::IndicesOutOfRange { indices, bounds } => {
                write!(f, "indices {indices:?} out of range: {bounds}")
            }
            Self::UnevenRow { row, expected, got } => {
                write!(
                    f,
                    "row {row} has length {got}, expected {expected} to match row 0"
                )
            }
            Self::ZeroDimensions => write!(f, "matrix must have at least one dimension"),
            Self::ZeroExtent { axis } => {
                write!(f, "extent along axis {axis} must be positive")
            }
            Self::SizeOverflow => write!(f, "total cell count overflows usize"),
            Self::RunOverflow {
                total_bits,
                reached,
            } => {
                write!(
                    f,
                    "run lengths reach {reached} bits, exceeding the declared {total_bits}"
                )
            }
            Self::TrailingBytes { remaining } => {
                write!(f, "{remaining} trailing bytes after the final run")
            }
            Self::Varint(err) => write!(f, "malformed varint: {err}"),
        }
    }
}

impl Error for GridError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Varint(err) => Some(err),
            _ => None,
        }
    }
}

impl From<VarintError> for GridError {
    fn from(err: VarintError) -> Self {
        Self::Varint(err)
    }
}
