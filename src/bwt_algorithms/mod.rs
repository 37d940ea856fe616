//! The bwt_algorithms module forms the critical sorting subsystem of the block-sorting transform.
//!
//! The Burrows-Wheeler Transform needs every cyclic rotation of a block in sorted order. That
//! sorting is "computationally expensive", and different algorithms suit different data, so
//! this module carries two:
//! - suffix_sort: the circular suffix array and direct rotation comparison, with automatic choice.
//! - sais: linear time SA-IS suffix array construction, used on the doubled block.
//!
pub mod sais;
pub mod suffix_sort;
