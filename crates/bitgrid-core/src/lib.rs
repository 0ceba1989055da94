//! Packed bit storage and varint framing for the bitgrid matrix engine.
//!
//! This is the leaf crate with zero internal dependencies. It provides the
//! two primitives the engine is built on:
//!
//! - [`BitBuf`] / [`BitWriter`]: a fixed-length packed bit buffer with
//!   offset addressing, bit/offset/run iteration, and a sequential writer
//!   for constant-value runs.
//! - [`varint`]: an unsigned LEB128 codec for framing non-negative
//!   integers in the wire format.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bitbuf;
pub mod varint;

pub use bitbuf::{BitBuf, BitWriter};
pub use varint::{VarintError, VarintReader};
