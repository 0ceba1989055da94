//! Benchmark fixtures for the bitgrid matrix engine.
//!
//! Provides pre-built matrices at the sizes the benches exercise so
//! construction cost stays out of the measured sections.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use bitgrid::BitMatrix;

/// A 256x256 matrix with a diagonal stripe of set cells.
///
/// Runs are short near the diagonal and long elsewhere, giving the codec
/// a mixed workload rather than a single degenerate run.
pub fn striped_256() -> BitMatrix {
    let mut m = BitMatrix::from_size(&[256, 256]).unwrap();
    for i in 0..256i64 {
        m = m.set(&[i, i], true).unwrap();
        m = m.set(&[i, (i + 1) % 256], true).unwrap();
    }
    m
}

/// A 64x64 all-false matrix.
pub fn blank_64() -> BitMatrix {
    BitMatrix::from_size(&[64, 64]).unwrap()
}

/// A 16x16 checkerboard patch.
pub fn checker_16() -> BitMatrix {
    let mut m = BitMatrix::from_size(&[16, 16]).unwrap();
    for y in 0..16i64 {
        for x in 0..16i64 {
            if (x + y) % 2 == 0 {
                m = m.set(&[x, y], true).unwrap();
            }
        }
    }
    m
}
