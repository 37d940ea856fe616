//! The compression module holds the block transform itself.
//!
//! Compression happens in the following steps:
//! - Burrows Wheeler Transform: Sort the rotations of the block so that bytes with similar
//!   contexts end up next to each other, making runs of identical bytes far more likely.
//! - Move To Front transform: Turn those runs into runs of zero, and in general favour
//!   small byte values, which an entropy coder can then squeeze.
//!
//! Decompression follows the inverse of the compression process.
//! - MTF transform: Convert from the Move-To-Front indecies to the symbols represented by the indecies.
//! - BWT reversal: Restore the original data from the BWT transform.
//!
//! The entropy coder that would follow the MTF stage is not part of this crate.
//!

pub mod block;
pub mod bwt;
