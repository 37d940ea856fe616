// SA-IS suffix array construction with a virtual sentinel.
//
// Every suffix is typed S (smaller than the suffix to its right) or L (larger). The
// leftmost S of each S run is an LMS position. Sorting the LMS suffixes is enough to
// induce the order of all the others, and the LMS suffixes are sorted by recursing on
// a reduced string made of the names of their LMS substrings.
use std::cmp::Ordering;

use log::trace;

use crate::tools::freq_count::{bucket_starts, symbol_counts};

/// Marks an unfilled slot in the suffix array under construction.
const EMPTY: u32 = u32::MAX;

/// Bit packed S/L types, one bit per position. A set bit is an S type. Position
/// `last` is the virtual sentinel, which is always S.
struct SuffixTypes {
    bits: Vec<u32>,
    last: usize,
}

impl SuffixTypes {
    /// Classify every suffix of `data`, walking right to left.
    fn new<T: Copy + Ord>(data: &[T]) -> Self {
        let last = data.len();
        let mut types = Self {
            bits: vec![0; last / 32 + 1],
            last,
        };
        types.set_s(last);

        // The sentinel is smaller than anything, so the final symbol is always L.
        let mut current_s = false;
        for idx in (0..last.saturating_sub(1)).rev() {
            current_s = match data[idx].cmp(&data[idx + 1]) {
                Ordering::Less => true,
                Ordering::Equal => current_s,
                Ordering::Greater => false,
            };
            if current_s {
                types.set_s(idx);
            }
        }
        types
    }

    fn set_s(&mut self, idx: usize) {
        self.bits[idx >> 5] |= 1 << (idx % 32);
    }

    fn is_s(&self, idx: usize) -> bool {
        self.bits[idx >> 5] & (1 << (idx % 32)) != 0
    }

    fn is_lms(&self, idx: usize) -> bool {
        idx > 0 && idx <= self.last && self.is_s(idx) && !self.is_s(idx - 1)
    }
}

/// One past the last slot of every bucket.
fn bucket_tails(buckets: &[u32]) -> Vec<u32> {
    buckets
        .iter()
        .scan(0_u32, |idx, &count| {
            *idx += count;
            Some(*idx)
        })
        .collect()
}

#[inline]
fn symbol<T: Copy + Into<u32>>(data: &[T], idx: usize) -> usize {
    data[idx].into() as usize
}

/// Seed `lms` at the bucket tails (keeping their relative order), then induce the L
/// types left to right and the S types right to left.
fn induced_sort<T>(data: &[T], sa: &mut [u32], bkt_sizes: &[u32], types: &SuffixTypes, lms: &[u32])
where
    T: Copy + Into<u32>,
{
    let n = data.len();
    sa.iter_mut().for_each(|slot| *slot = EMPTY);

    let mut tails = bucket_tails(bkt_sizes);
    for &pos in lms.iter().rev() {
        let bkt = symbol(data, pos as usize);
        tails[bkt] -= 1;
        sa[tails[bkt] as usize] = pos;
    }

    // The suffix just ahead of the sentinel is the smallest L type of its bucket.
    let mut heads = bucket_starts(bkt_sizes);
    let bkt = symbol(data, n - 1);
    sa[heads[bkt] as usize] = (n - 1) as u32;
    heads[bkt] += 1;

    for idx in 0..n {
        let pos = sa[idx];
        if pos == EMPTY || pos == 0 {
            continue;
        }
        let prev = pos as usize - 1;
        if !types.is_s(prev) {
            let bkt = symbol(data, prev);
            sa[heads[bkt] as usize] = prev as u32;
            heads[bkt] += 1;
        }
    }

    let mut tails = bucket_tails(bkt_sizes);
    for idx in (0..n).rev() {
        let pos = sa[idx];
        if pos == EMPTY || pos == 0 {
            continue;
        }
        let prev = pos as usize - 1;
        if types.is_s(prev) {
            let bkt = symbol(data, prev);
            tails[bkt] -= 1;
            sa[tails[bkt] as usize] = prev as u32;
        }
    }
}

/// True when the LMS substrings starting at `a` and `b` differ. A substring that runs
/// into the sentinel is unique.
fn lms_substrings_differ<T: Copy + Ord>(data: &[T], types: &SuffixTypes, a: usize, b: usize) -> bool {
    let n = data.len();
    let mut i = 0;
    loop {
        let (x, y) = (a + i, b + i);
        if x == n || y == n {
            return true;
        }
        if data[x] != data[y] || types.is_s(x) != types.is_s(y) {
            return true;
        }
        if i > 0 && types.is_lms(x) {
            return false;
        }
        i += 1;
    }
}

/// Build the suffix array of `data`, whose symbols must all be below `alphabet_size`.
/// The end of the data sorts before every symbol.
pub fn sa_is<T>(data: &[T], alphabet_size: usize) -> Vec<u32>
where
    T: Copy + Ord + Into<u32> + Sync,
{
    let n = data.len();
    match n {
        0 => return vec![],
        1 => return vec![0],
        _ => {}
    }

    let types = SuffixTypes::new(data);
    let bkt_sizes = symbol_counts(data, alphabet_size);
    let lms_positions = (1..n)
        .filter(|&idx| types.is_lms(idx))
        .map(|idx| idx as u32)
        .collect::<Vec<u32>>();

    // First pass orders the LMS substrings, not yet the LMS suffixes.
    let mut sa = vec![EMPTY; n];
    induced_sort(data, &mut sa, &bkt_sizes, &types, &lms_positions);

    let mut names = vec![EMPTY; n];
    let mut current_name = 0_u32;
    let mut prev_lms: Option<usize> = None;
    for &pos in sa.iter() {
        let pos = pos as usize;
        if !types.is_lms(pos) {
            continue;
        }
        if let Some(prev) = prev_lms {
            if lms_substrings_differ(data, &types, prev, pos) {
                current_name += 1;
            }
        }
        names[pos] = current_name;
        prev_lms = Some(pos);
    }

    let reduced = lms_positions
        .iter()
        .map(|&pos| names[pos as usize])
        .collect::<Vec<u32>>();
    let name_count = current_name as usize + 1;
    trace!(
        "SA-IS level: {} symbols, {} LMS positions, {} names",
        n,
        reduced.len(),
        name_count
    );

    // Unique names already give the order; otherwise recurse on the reduced string.
    let reduced_sa = if reduced.is_empty() || name_count == reduced.len() {
        let mut order = vec![0_u32; reduced.len()];
        reduced
            .iter()
            .enumerate()
            .for_each(|(idx, &name)| order[name as usize] = idx as u32);
        order
    } else {
        sa_is(&reduced, name_count)
    };

    let sorted_lms = reduced_sa
        .iter()
        .map(|&idx| lms_positions[idx as usize])
        .collect::<Vec<u32>>();
    induced_sort(data, &mut sa, &bkt_sizes, &types, &sorted_lms);
    sa
}

#[cfg(test)]
mod test_types {
    use super::*;

    #[test]
    fn types_test() {
        let data = "caabage".as_bytes();
        let types = SuffixTypes::new(data);
        // caabage$ - LSSLSLLS
        assert!(!types.is_s(0));
        assert!(types.is_s(1));
        assert!(types.is_s(2));
        assert!(!types.is_s(3));
        assert!(types.is_s(4));
        assert!(!types.is_s(5));
        assert!(!types.is_s(6));
        assert!(types.is_s(7));

        assert!(!types.is_lms(0));
        assert!(types.is_lms(1));
        assert!(!types.is_lms(2));
        assert!(!types.is_lms(3));
        assert!(types.is_lms(4));
        assert!(!types.is_lms(5));
        assert!(!types.is_lms(6));
        assert!(types.is_lms(7));
    }
}
