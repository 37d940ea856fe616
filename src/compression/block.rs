use std::{fmt::Display, fmt::Formatter};

use log::{debug, info};

use super::bwt::{inverse_transform, split_index, transform_with, BwtBlock};
use crate::bwt_algorithms::suffix_sort::SortAlgorithm;
use crate::error::Result;
use crate::tools::mtf::{mtf_decode, mtf_encode};

/// Which part of the transform chain to run over a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Burrows-Wheeler Transform only: index followed by the last column.
    Bwt,
    /// Move To Front only: one rank per input byte.
    Mtf,
    /// BWT then MTF: index followed by the MTF ranks of the last column.
    Pipeline,
}

impl Stage {
    /// File extension used for output of this stage.
    pub fn extension(&self) -> &'static str {
        match self {
            Stage::Bwt => "bwt",
            Stage::Mtf => "mtf",
            Stage::Pipeline => "bwm",
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Run the forward direction of `stage` over one in-memory block.
pub fn encode_block(stage: Stage, data: &[u8], algorithm: SortAlgorithm) -> Result<Vec<u8>> {
    info!("Encoding {} bytes with stage {}.", data.len(), stage);
    let out = match stage {
        Stage::Bwt => transform_with(data, algorithm)?.to_bytes(),
        Stage::Mtf => mtf_encode(data),
        Stage::Pipeline => {
            let block = transform_with(data, algorithm)?;
            let ranks = mtf_encode(&block.last_column);
            debug!(
                "Pipeline: {} zero ranks out of {}.",
                ranks.iter().filter(|&&r| r == 0).count(),
                ranks.len()
            );
            BwtBlock {
                first_index: block.first_index,
                last_column: ranks,
            }
            .to_bytes()
        }
    };
    debug!("Encoded block is {} bytes.", out.len());
    Ok(out)
}

/// Run the inverse direction of `stage`, reproducing the block given to `encode_block`.
pub fn decode_block(stage: Stage, data: &[u8]) -> Result<Vec<u8>> {
    info!("Decoding {} bytes with stage {}.", data.len(), stage);
    let out = match stage {
        Stage::Bwt => {
            let block = BwtBlock::from_bytes(data)?;
            inverse_transform(block.first_index, &block.last_column)?
        }
        Stage::Mtf => mtf_decode(data)?,
        Stage::Pipeline => {
            let (first_index, ranks) = split_index(data)?;
            let block = BwtBlock::new(first_index, mtf_decode(ranks)?)?;
            inverse_transform(block.first_index, &block.last_column)?
        }
    };
    debug!("Decoded block is {} bytes.", out.len());
    Ok(out)
}
