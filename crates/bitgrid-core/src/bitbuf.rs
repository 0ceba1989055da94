//! Fixed-length packed bit buffer.
//!
//! [`BitBuf`] stores exactly `len` bits in `ceil(len / 8)` bytes, bit 0 in
//! the least significant position of byte 0. Bits past `len` in the final
//! byte are always zero, so two buffers with equal `len` compare equal iff
//! every addressable bit is equal.

use std::fmt;

/// A fixed-length, bit-addressable buffer.
///
/// Allocated zero-filled by bit count. The length never changes after
/// construction; content changes only through [`set`](Self::set).
///
/// # Examples
///
/// ```
/// use bitgrid_core::BitBuf;
///
/// let mut buf = BitBuf::with_len(10);
/// buf.set(3, true);
/// assert!(buf.get(3));
/// assert_eq!(buf.count(true), 1);
/// assert_eq!(buf.matching(true).collect::<Vec<_>>(), vec![3]);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct BitBuf {
    len: usize,
    data: Vec<u8>,
}

impl fmt::Debug for BitBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitBuf")
            .field("len", &self.len)
            .field("ones", &self.count(true))
            .finish()
    }
}

impl BitBuf {
    /// Allocate a zero-filled buffer of `len` bits.
    pub fn with_len(len: usize) -> Self {
        Self {
            len,
            data: vec![0; len.div_ceil(8)],
        }
    }

    /// Length in bits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` if the buffer holds zero bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read the bit at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset >= len`. Range checking against caller-supplied
    /// coordinates belongs to the layer above; by the time an offset
    /// reaches the buffer it must be valid.
    pub fn get(&self, offset: usize) -> bool {
        assert!(offset < self.len, "bit offset {offset} >= len {}", self.len);
        (self.data[offset / 8] >> (offset % 8)) & 1 == 1
    }

    /// Write the bit at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset >= len`.
    pub fn set(&mut self, offset: usize, value: bool) {
        assert!(offset < self.len, "bit offset {offset} >= len {}", self.len);
        let mask = 1u8 << (offset % 8);
        if value {
            self.data[offset / 8] |= mask;
        } else {
            self.data[offset / 8] &= !mask;
        }
    }

    /// Number of bits equal to `state`.
    pub fn count(&self, state: bool) -> usize {
        // Padding bits are zero, so count_ones over raw bytes is exact.
        let ones: usize = self.data.iter().map(|b| b.count_ones() as usize).sum();
        if state {
            ones
        } else {
            self.len - ones
        }
    }

    /// Iterate every bit in offset order.
    pub fn iter(&self) -> Bits<'_> {
        Bits {
            buf: self,
            offset: 0,
        }
    }

    /// Iterate the offsets whose bit equals `state`, in increasing order.
    pub fn matching(&self, state: bool) -> Matching<'_> {
        Matching {
            buf: self,
            state,
            offset: 0,
        }
    }

    /// Iterate maximal runs of identical bits as `(state, length)` pairs,
    /// in offset order. Run lengths sum to `len`.
    pub fn runs(&self) -> Runs<'_> {
        Runs {
            buf: self,
            offset: 0,
        }
    }
}

/// Iterator over every bit of a [`BitBuf`]. Created by [`BitBuf::iter`].
#[derive(Debug)]
pub struct Bits<'a> {
    buf: &'a BitBuf,
    offset: usize,
}

impl Iterator for Bits<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.offset >= self.buf.len {
            return None;
        }
        let bit = self.buf.get(self.offset);
        self.offset += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.buf.len - self.offset;
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for Bits<'_> {}

/// Iterator over offsets matching a fixed state. Created by
/// [`BitBuf::matching`].
#[derive(Debug)]
pub struct Matching<'a> {
    buf: &'a BitBuf,
    state: bool,
    offset: usize,
}

impl Iterator for Matching<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.offset < self.buf.len {
            let offset = self.offset;
            self.offset += 1;
            if self.buf.get(offset) == self.state {
                return Some(offset);
            }
        }
        None
    }
}

/// Iterator over maximal `(state, length)` runs. Created by
/// [`BitBuf::runs`].
#[derive(Debug)]
pub struct Runs<'a> {
    buf: &'a BitBuf,
    offset: usize,
}

impl Iterator for Runs<'_> {
    type Item = (bool, usize);

    fn next(&mut self) -> Option<(bool, usize)> {
        if self.offset >= self.buf.len {
            return None;
        }
        let state = self.buf.get(self.offset);
        let start = self.offset;
        self.offset += 1;
        while self.offset < self.buf.len && self.buf.get(self.offset) == state {
            self.offset += 1;
        }
        Some((state, self.offset - start))
    }
}

/// Sequential writer that fills a [`BitBuf`] with constant-value runs.
///
/// The buffer starts zero-filled; appending a `false` run only advances
/// the cursor. [`finish`](Self::finish) returns the buffer as-is, with any
/// unwritten tail still zero.
///
/// # Examples
///
/// ```
/// use bitgrid_core::BitWriter;
///
/// let mut w = BitWriter::with_len(8);
/// w.append_run(false, 3);
/// w.append_run(true, 5);
/// let buf = w.finish();
/// assert_eq!(buf.matching(true).collect::<Vec<_>>(), vec![3, 4, 5, 6, 7]);
/// ```
#[derive(Debug)]
pub struct BitWriter {
    buf: BitBuf,
    cursor: usize,
}

impl BitWriter {
    /// Start a writer for a buffer of `len` bits.
    pub fn with_len(len: usize) -> Self {
        Self {
            buf: BitBuf::with_len(len),
            cursor: 0,
        }
    }

    /// Current write position in bits.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Bits left before the buffer is full.
    pub fn remaining(&self) -> usize {
        self.buf.len - self.cursor
    }

    /// Append `run` bits of `value`.
    ///
    /// # Panics
    ///
    /// Panics if the run would exceed the buffer length.
    pub fn append_run(&mut self, value: bool, run: usize) {
        assert!(
            run <= self.remaining(),
            "run of {run} bits exceeds remaining capacity {}",
            self.remaining()
        );
        if value {
            let end = self.cursor + run;
            let mut offset = self.cursor;
            while offset < end && offset % 8 != 0 {
                self.buf.set(offset, true);
                offset += 1;
            }
            while offset + 8 <= end {
                self.buf.data[offset / 8] = 0xFF;
                offset += 8;
            }
            while offset < end {
                self.buf.set(offset, true);
                offset += 1;
            }
        }
        self.cursor += run;
    }

    /// Consume the writer and return the buffer.
    pub fn finish(self) -> BitBuf {
        self.buf
    }
}
