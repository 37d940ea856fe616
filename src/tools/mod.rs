//! The tools module provides the recoding stage and the helper functions around the block transform.
//!
//! The tools are:
//! - cli: Command line interface and the options it produces.
//! - files: Reads inputs, runs the requested stage and writes the outputs.
//! - freq_count: Frequency count of byte values.
//! - mtf: Move-To-Front transform and its inverse.
//!
pub mod cli;
pub mod files;
pub mod freq_count;
pub mod mtf;
