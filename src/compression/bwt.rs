use log::{debug, trace};

use crate::bwt_algorithms::suffix_sort::{CircularSuffixArray, SortAlgorithm};
use crate::error::{BwtError, Result};
use crate::tools::freq_count::{bucket_starts, freqs};

/// Bytes used by the big-endian first index in front of the last column.
pub const INDEX_BYTES: usize = 4;

/// Output of the forward transform: the rank of the original rotation and the last
/// column of the sorted rotation matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BwtBlock {
    pub first_index: u32,
    pub last_column: Vec<u8>,
}

impl BwtBlock {
    /// Frame the block as a 4 byte big-endian index followed by the last column.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(INDEX_BYTES + self.last_column.len());
        out.extend_from_slice(&self.first_index.to_be_bytes());
        out.extend_from_slice(&self.last_column);
        out
    }

    /// Assemble a block read from a stream. The index of an empty block is not checked.
    pub fn new(first_index: u32, last_column: Vec<u8>) -> Result<Self> {
        if !last_column.is_empty() && first_index as usize >= last_column.len() {
            return Err(BwtError::MalformedStream(format!(
                "first index {} outside a block of {} bytes",
                first_index,
                last_column.len()
            )));
        }
        Ok(Self {
            first_index,
            last_column,
        })
    }

    /// Parse a framed block.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (first_index, last_column) = split_index(bytes)?;
        Self::new(first_index, last_column.to_vec())
    }
}

/// Split the leading big-endian index off a framed block.
pub fn split_index(bytes: &[u8]) -> Result<(u32, &[u8])> {
    if bytes.len() < INDEX_BYTES {
        return Err(BwtError::MalformedStream(format!(
            "expected a {} byte index, found {} bytes",
            INDEX_BYTES,
            bytes.len()
        )));
    }
    let (head, body) = bytes.split_at(INDEX_BYTES);
    let mut index = [0_u8; INDEX_BYTES];
    index.copy_from_slice(head);
    Ok((u32::from_be_bytes(index), body))
}

/// Burrows-Wheeler Transform, letting the sorter pick its algorithm.
pub fn transform(text: &[u8]) -> Result<BwtBlock> {
    transform_with(text, SortAlgorithm::Auto)
}

/// Burrows-Wheeler Transform with a chosen sorting algorithm. Returns the key (rank of
/// the unrotated block) and the byte preceding each sorted rotation.
pub fn transform_with(text: &[u8], algorithm: SortAlgorithm) -> Result<BwtBlock> {
    let csa = CircularSuffixArray::with_algorithm(text, algorithm)?;
    let n = text.len();

    let mut first_index = 0_u32;
    let mut last_column = vec![0_u8; n];
    for (rank, &offset) in csa.order().iter().enumerate() {
        if offset == 0 {
            first_index = rank as u32;
            last_column[rank] = text[n - 1];
        } else {
            last_column[rank] = text[offset as usize - 1];
        }
    }
    debug!("BWT of {} bytes, first index is {}.", n, first_index);
    Ok(BwtBlock {
        first_index,
        last_column,
    })
}

/// Invert the transform in linear time.
///
/// The first column is the last column counting-sorted by symbol. The k-th occurrence of a
/// symbol in the first column is the same text position as its k-th occurrence in the last
/// column, so pairing them in order gives `next`, the link from each row to the row of the
/// following rotation. Walking `next` from `first_index` spells out the block.
pub fn inverse_transform(first_index: u32, last_column: &[u8]) -> Result<Vec<u8>> {
    let n = last_column.len();
    if n == 0 {
        return Ok(vec![]);
    }
    if first_index as usize >= n {
        return Err(BwtError::IndexOutOfRange {
            index: first_index as usize,
            len: n,
        });
    }

    // Bucket starts double as the heads of per-symbol queues of last column positions,
    // filled in ascending position order, which keeps equal symbols stable.
    let counts = freqs(last_column);
    let mut heads = bucket_starts(&counts);

    let mut first_column = vec![0_u8; n];
    let mut next = vec![0_u32; n];
    for (pos, &sym) in last_column.iter().enumerate() {
        let row = heads[sym as usize] as usize;
        first_column[row] = sym;
        next[row] = pos as u32;
        heads[sym as usize] += 1;
    }
    trace!("Built first column and next links for {} rows.", n);

    let mut text = Vec::with_capacity(n);
    let mut row = first_index as usize;
    for _ in 0..n {
        text.push(first_column[row]);
        row = next[row] as usize;
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABRA: &[u8] = b"ABRACADABRA!";
    const ABRA_LAST: &[u8] = b"ARD!RCAAAABB";

    #[test]
    fn abracadabra_golden() {
        for algorithm in [SortAlgorithm::Auto, SortAlgorithm::Native, SortAlgorithm::Sais] {
            let block = transform_with(ABRA, algorithm).unwrap();
            assert_eq!(block.first_index, 3);
            assert_eq!(block.last_column, ABRA_LAST);
        }
        assert_eq!(inverse_transform(3, ABRA_LAST).unwrap(), ABRA);
    }

    #[test]
    fn banana() {
        let block = transform(b"banana").unwrap();
        assert_eq!(block.first_index, 3);
        assert_eq!(block.last_column, b"nnbaaa");
        assert_eq!(inverse_transform(3, b"nnbaaa").unwrap(), b"banana");
    }

    #[test]
    fn empty_block() {
        let block = transform(&[]).unwrap();
        assert_eq!(block.first_index, 0);
        assert!(block.last_column.is_empty());
        // No index is consumed for an empty block.
        assert!(inverse_transform(7, &[]).unwrap().is_empty());
    }

    #[test]
    fn single_byte() {
        let block = transform(&[0xff]).unwrap();
        assert_eq!(block.first_index, 0);
        assert_eq!(block.last_column, vec![0xff]);
        assert_eq!(inverse_transform(0, &[0xff]).unwrap(), vec![0xff]);
    }

    #[test]
    fn repeated_byte() {
        let text = [b'x'; 10];
        let block = transform(&text).unwrap();
        assert_eq!(block.last_column, text);
        assert!(block.first_index < 10);
        assert_eq!(
            inverse_transform(block.first_index, &block.last_column).unwrap(),
            text
        );
    }

    #[test]
    fn every_byte_value() {
        let text = (0..=255_u8).collect::<Vec<u8>>();
        let block = transform(&text).unwrap();
        // Rotation k starts with byte k, so the order is the identity
        assert_eq!(block.first_index, 0);
        assert_eq!(block.last_column[0], 255);
        assert_eq!(&block.last_column[1..], &text[..255]);
        assert_eq!(
            inverse_transform(block.first_index, &block.last_column).unwrap(),
            text
        );
    }

    #[test]
    fn periodic_round_trip() {
        for text in ["abababab", "abcabcabcabc", "mississippi", "aab"] {
            for algorithm in [SortAlgorithm::Native, SortAlgorithm::Sais] {
                let block = transform_with(text.as_bytes(), algorithm).unwrap();
                let back = inverse_transform(block.first_index, &block.last_column).unwrap();
                assert_eq!(back, text.as_bytes());
            }
        }
    }

    #[test]
    fn bad_first_index() {
        match inverse_transform(12, ABRA_LAST) {
            Err(BwtError::IndexOutOfRange { index, len }) => {
                assert_eq!(index, 12);
                assert_eq!(len, 12);
            }
            other => panic!("Expected IndexOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn framing() {
        let block = transform(ABRA).unwrap();
        let bytes = block.to_bytes();
        assert_eq!(bytes.len(), 4 + ABRA.len());
        assert_eq!(&bytes[..4], &[0, 0, 0, 3]);
        assert_eq!(&bytes[4..], ABRA_LAST);
        assert_eq!(BwtBlock::from_bytes(&bytes).unwrap(), block);
    }

    #[test]
    fn framing_errors() {
        assert!(matches!(
            BwtBlock::from_bytes(&[0, 0, 3]),
            Err(BwtError::MalformedStream(_))
        ));
        assert!(matches!(
            BwtBlock::from_bytes(&[0, 0, 0, 5, b'a', b'b']),
            Err(BwtError::MalformedStream(_))
        ));
        let empty = BwtBlock::from_bytes(&[0, 0, 0, 0]).unwrap();
        assert!(empty.last_column.is_empty());
    }
}
