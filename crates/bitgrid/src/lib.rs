//! Immutable N-dimensional boolean matrix with bounding-box growth and a
//! compact run-length wire format.
//!
//! The central type is [`BitMatrix`]: a dense boolean grid of arbitrary
//! dimensionality stored in a packed bit buffer. Matrices are values —
//! every mutation clones the buffer and returns a new matrix — and writes
//! outside the current extents grow the matrix to the smallest bounding
//! box containing both the old content and the requested cell.
//!
//! # Modules
//!
//! - [`matrix`]: the [`BitMatrix`] value type and its factories.
//! - [`expansion`]: bounding-box growth planning ([`Expansion`]).
//! - [`iter`]: lazy cell iteration ([`Cells`], [`CellBits`]).
//! - [`error`]: the [`GridError`] taxonomy.
//!
//! # Wire format
//!
//! [`BitMatrix::encode`] emits a varint stream: dimension count, one
//! extent per axis, then alternating run lengths starting with a possibly
//! empty 0-run. [`BitMatrix::decode`] is its exact inverse.
//!
//! ```
//! use bitgrid::BitMatrix;
//!
//! let m = BitMatrix::from_rows(&["01", "10"]).unwrap();
//! let copy = BitMatrix::decode(&m.encode()).unwrap();
//! assert_eq!(copy, m);
//! assert_eq!(copy.to_text().unwrap(), "01\n10");
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod expansion;
pub mod iter;
pub mod matrix;

mod addressing;
mod codec;

#[cfg(test)]
pub(crate) mod checks;

pub use error::GridError;
pub use expansion::Expansion;
pub use iter::{CellBits, Cells};
pub use matrix::BitMatrix;

use smallvec::SmallVec;

/// A cell address, one signed value per axis.
///
/// Uses `SmallVec<[i64; 4]>` to avoid heap allocation for matrices up to
/// four dimensions; higher dimensionalities spill to the heap
/// transparently. Values are signed because growth requests may address
/// cells below the current origin.
pub type Indices = SmallVec<[i64; 4]>;
