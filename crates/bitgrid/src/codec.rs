//! Binary wire format: varint framing around run-length encoded content.
//!
//! A matrix is a varint stream, in order: the dimension count, one extent
//! per axis, then alternating run lengths covering exactly `Π size[d]`
//! bits. The run stream always starts with a 0-bit run, which is empty
//! when the first stored bit is 1.

use crate::addressing;
use crate::error::GridError;
use crate::matrix::BitMatrix;
use bitgrid_core::{varint, BitWriter, VarintReader};

pub(crate) fn encode(matrix: &BitMatrix) -> Vec<u8> {
    let mut out = Vec::new();
    varint::write_u64(&mut out, matrix.ndim() as u64);
    for &extent in matrix.size() {
        varint::write_u64(&mut out, extent as u64);
    }
    // Maximal runs already alternate; only the leading state can disagree
    // with the 0-first framing.
    let mut runs = matrix.bits().runs().peekable();
    if let Some(&(true, _)) = runs.peek() {
        varint::write_u64(&mut out, 0);
    }
    for (_, run) in runs {
        varint::write_u64(&mut out, run as u64);
    }
    out
}

pub(crate) fn decode(bytes: &[u8]) -> Result<BitMatrix, GridError> {
    let mut reader = VarintReader::new(bytes);

    let ndim = usize::try_from(reader.next_u64()?).map_err(|_| GridError::SizeOverflow)?;
    if ndim == 0 {
        return Err(GridError::ZeroDimensions);
    }
    // `ndim` is untrusted input; let the vector grow instead of
    // preallocating a hostile capacity.
    let mut size = Vec::new();
    for axis in 0..ndim {
        let extent = usize::try_from(reader.next_u64()?).map_err(|_| GridError::SizeOverflow)?;
        if extent == 0 {
            return Err(GridError::ZeroExtent { axis });
        }
        size.push(extent);
    }
    let total = addressing::total_bits(&size)?;

    let mut writer = BitWriter::with_len(total);
    let mut state = false;
    while writer.position() < total {
        let run = reader.next_u64()?;
        if run > writer.remaining() as u64 {
            return Err(GridError::RunOverflow {
                total_bits: total,
                reached: writer.position().saturating_add(run as usize),
            });
        }
        writer.append_run(state, run as usize);
        state = !state;
    }
    if !reader.is_empty() {
        return Err(GridError::TrailingBytes {
            remaining: reader.remaining(),
        });
    }
    Ok(BitMatrix::from_parts(size, writer.finish()))
}
