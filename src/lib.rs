//! Burrows-Wheeler block-sorting front end, in Rust.
//!
//! Turns a block of bytes into a heavily skewed stream of small values that an order-0
//! entropy coder compresses well, and inverts that process exactly:
//!
//! `text -> circular suffix sort -> BWT -> Move-To-Front -> [entropy coder]`
//!
//! Every call works on one in-memory block and owns all of its working memory, so
//! independent blocks can be processed on separate threads by the caller.
//!
//! Basic usage to transform a file is as follows:
//!
//! `$> bwmtf -z test.txt`
//!
//! This will transform the file and create the file test.txt.bwm.
//! The original file will be deleted.
//!
pub mod bwt_algorithms;
pub mod compression;
pub mod error;
pub mod tools;

pub use bwt_algorithms::suffix_sort::{CircularSuffixArray, SortAlgorithm};
pub use compression::block::{decode_block, encode_block, Stage};
pub use compression::bwt::{inverse_transform, transform, transform_with, BwtBlock};
pub use error::{BwtError, Result};
pub use tools::mtf::{mtf_decode, mtf_encode};
