use crate::error::{BwtError, Result};
use log::debug;

/// Alphabet size.
pub const RADIX: usize = 256;

/// Recency list reset to identity order.
fn identity_index() -> [u8; RADIX] {
    let mut index = [0_u8; RADIX];
    index
        .iter_mut()
        .enumerate()
        .for_each(|(i, slot)| *slot = i as u8);
    index
}

/// Move the symbol at `idx` to the front, shifting everything ahead of it back one.
#[inline]
fn move_to_front(index: &mut [u8; RADIX], mut idx: usize) {
    let temp_sym = index[idx];

    // Shift in blocks for speed...
    while idx > 7 {
        index[idx] = index[idx - 1];
        index[idx - 1] = index[idx - 2];
        index[idx - 2] = index[idx - 3];
        index[idx - 3] = index[idx - 4];
        index[idx - 4] = index[idx - 5];
        index[idx - 5] = index[idx - 6];
        index[idx - 6] = index[idx - 7];
        index[idx - 7] = index[idx - 8];
        idx -= 8;
    }
    while idx > 3 {
        index[idx] = index[idx - 1];
        index[idx - 1] = index[idx - 2];
        index[idx - 2] = index[idx - 3];
        index[idx - 3] = index[idx - 4];
        idx -= 4;
    }
    // ...then clean up any odd ones
    while idx > 0 {
        index[idx] = index[idx - 1];
        idx -= 1;
    }
    index[0] = temp_sym;
}

/// Encode data using the Move To Front transform. Each byte becomes its current rank in
/// the recency list, and then moves to the front of that list.
pub fn mtf_encode(data: &[u8]) -> Vec<u8> {
    let mut index = identity_index();
    let mut out = Vec::with_capacity(data.len());

    for &byte in data {
        // Every byte value is in the list, so the search always succeeds.
        let idx = index.iter().position(|&c| c == byte).unwrap_or_default();
        out.push(idx as u8);
        move_to_front(&mut index, idx);
    }
    debug!("MTF encoded {} bytes.", data.len());
    out
}

/// Decode Move To Front ranks back into bytes. Ranks may come in any width; a rank
/// beyond the alphabet rejects the whole input.
pub fn mtf_decode<T>(ranks: &[T]) -> Result<Vec<u8>>
where
    T: Copy + Into<u32>,
{
    let mut index = identity_index();
    let mut out = Vec::with_capacity(ranks.len());

    for (pos, &rank) in ranks.iter().enumerate() {
        let idx = rank.into() as usize;
        if idx >= RADIX {
            return Err(BwtError::MalformedStream(format!(
                "MTF rank {} at position {} exceeds the alphabet",
                idx, pos
            )));
        }
        out.push(index[idx]);
        move_to_front(&mut index, idx);
    }
    debug!("MTF decoded {} bytes.", ranks.len());
    Ok(out)
}
