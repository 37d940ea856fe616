use super::sais::sa_is;
use crate::error::{BwtError, Result};
use crate::tools::freq_count::freqs;
use log::{debug, info};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::cmp::Ordering;

/// Blocks shorter than this always go to SA-IS under `SortAlgorithm::Auto`.
const SMALL_BLOCK: usize = 3_000;
/// Size of the sample used to judge how repetitive a block is.
const SAMPLE_SIZE: usize = 5_000;
/// Native sorts above this size run on the rayon thread pool.
const PARALLEL_THRESHOLD: usize = 40_000;
/// Window length used to spot long repeated substrings.
const REPEAT_WINDOW: usize = 32;
/// Most samples taken from one block. They are spread evenly from head to tail.
const MAX_SAMPLES: usize = 16;

/// Choice of rotation sorting algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortAlgorithm {
    /// Pick per block: SA-IS for small or repetitive data, native otherwise.
    Auto,
    /// Compare rotations directly. Fast on varied text, quadratic on long repeats.
    Native,
    /// Linear time SA-IS over the doubled block.
    Sais,
}

impl Default for SortAlgorithm {
    fn default() -> Self {
        SortAlgorithm::Auto
    }
}

/// Sorted order of the cyclic rotations of a block. `order[k]` is the start offset
/// of the k-th smallest rotation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CircularSuffixArray {
    order: Vec<u32>,
}

impl CircularSuffixArray {
    /// Sort the rotations of `text`, letting the block choose its algorithm.
    pub fn new(text: &[u8]) -> Result<Self> {
        Self::with_algorithm(text, SortAlgorithm::Auto)
    }

    /// Sort the rotations of `text` with a specific algorithm.
    pub fn with_algorithm(text: &[u8], algorithm: SortAlgorithm) -> Result<Self> {
        if text.len() > u32::MAX as usize {
            return Err(BwtError::InvalidArgument(format!(
                "block of {} bytes does not fit a 32 bit index",
                text.len()
            )));
        }
        let order = match resolve(text, algorithm)? {
            SortAlgorithm::Sais => {
                info!("Using SA-IS algorithm.");
                sais_rotations(text)
            }
            _ => {
                info!("Using native algorithm.");
                native_rotations(text)
            }
        };
        debug!("Sorted {} rotations.", order.len());
        Ok(Self { order })
    }

    /// Number of rotations, which is the length of the block.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Start offset of the rotation at `rank` in sorted order.
    pub fn index(&self, rank: usize) -> Result<usize> {
        self.order
            .get(rank)
            .map(|&offset| offset as usize)
            .ok_or(BwtError::IndexOutOfRange {
                index: rank,
                len: self.order.len(),
            })
    }

    /// The full rank to offset permutation.
    pub fn order(&self) -> &[u32] {
        &self.order
    }
}

/// Settle `Auto` into a concrete algorithm and check that the choice can address the block.
fn resolve(text: &[u8], algorithm: SortAlgorithm) -> Result<SortAlgorithm> {
    let fits_doubled = text.len() <= (u32::MAX / 2) as usize;
    match algorithm {
        SortAlgorithm::Native => Ok(SortAlgorithm::Native),
        SortAlgorithm::Sais if fits_doubled => Ok(SortAlgorithm::Sais),
        SortAlgorithm::Sais => Err(BwtError::InvalidArgument(format!(
            "block of {} bytes is too large for SA-IS",
            text.len()
        ))),
        SortAlgorithm::Auto => {
            if fits_doubled && (text.len() < SMALL_BLOCK || repetitive(text)) {
                Ok(SortAlgorithm::Sais)
            } else {
                Ok(SortAlgorithm::Native)
            }
        }
    }
}

/// Sort the block index with direct rotation comparisons.
fn native_rotations(text: &[u8]) -> Vec<u32> {
    let mut index = (0_u32..text.len() as u32).collect::<Vec<u32>>();
    if text.len() > PARALLEL_THRESHOLD {
        index.par_sort_unstable_by(|a, b| block_compare(*a as usize, *b as usize, text));
    } else {
        index.sort_unstable_by(|a, b| block_compare(*a as usize, *b as usize, text));
    }
    index
}

/// Suffixes of the doubled block that start in the first copy are at least n+1 long,
/// so their order is the rotation order.
fn sais_rotations(text: &[u8]) -> Vec<u32> {
    let n = text.len() as u32;
    let doubled = text.repeat(2);
    sa_is(&doubled, 256)
        .into_iter()
        .filter(|&pos| pos < n)
        .collect()
}

/// Compare the rotations starting at `a` and `b`, wrapping around the end of the block.
fn block_compare(a: usize, b: usize, block: &[u8]) -> Ordering {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    let len = block.len();
    let gap = second - first;

    // Until `second` hits the end, both read straight through the block.
    let head = len - second;
    let mut result = block[first..first + head].cmp(&block[second..]);
    if result == Ordering::Equal {
        // `second` has wrapped to the front, `first` is still reading its tail.
        result = block[first + head..].cmp(&block[..gap]);
    }
    if result == Ordering::Equal {
        // Both have wrapped.
        result = block[..first].cmp(&block[gap..gap + first]);
    }
    if a <= b {
        result
    } else {
        result.reverse()
    }
}

/// True when some part of the block is repetitive enough to make direct rotation
/// comparisons crawl. Runs are checked over the whole block, everything else on samples.
fn repetitive(text: &[u8]) -> bool {
    let longest = longest_run(text);
    if longest >= SAMPLE_SIZE {
        debug!("Found a run of {} bytes.", longest);
        return true;
    }
    samples(text).any(use_sais)
}

/// Evenly spaced windows of `SAMPLE_SIZE` bytes, the first at the head of the block
/// and the last at its tail.
fn samples(text: &[u8]) -> impl Iterator<Item = &[u8]> {
    let count = ((text.len() + SAMPLE_SIZE - 1) / SAMPLE_SIZE).clamp(1, MAX_SAMPLES);
    let span = text.len().saturating_sub(SAMPLE_SIZE);
    (0..count).map(move |i| {
        let start = if count > 1 { i * span / (count - 1) } else { 0 };
        &text[start..(start + SAMPLE_SIZE).min(text.len())]
    })
}

/// Length of the longest run of one repeated byte.
fn longest_run(data: &[u8]) -> usize {
    let mut longest = data.len().min(1);
    let mut run = 1;
    for pair in data.windows(2) {
        if pair[0] == pair[1] {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 1;
        }
    }
    longest
}

/// Decide from a sample whether the block is repetitive enough to favour SA-IS.
fn use_sais(sample: &[u8]) -> bool {
    if sample.is_empty() {
        return true;
    }
    // Use sais if the most frequent char is at least 30% of all chars found
    //   or if the symbol count is less than 20 unique symbols
    let mut freq_array = freqs(sample);
    freq_array.retain(|&x| x != 0);
    let max = freq_array.iter().copied().max().unwrap_or(0) as usize;
    debug!(
        "Max frequency is {}%, symbol set size is {}.",
        max * 100 / sample.len(),
        freq_array.len()
    );
    if max * 10 >= sample.len() * 3 || freq_array.len() < 20 {
        return true;
    }

    // Use sais if the longest run is over 20% of the length
    let longest = longest_run(sample);
    debug!("Longest run is {}.", longest);
    if longest * 5 > sample.len() {
        return true;
    }

    // Long repeated substrings make direct comparisons walk deep into the block.
    let windows = sample.len().saturating_sub(REPEAT_WINDOW - 1);
    if windows == 0 {
        return false;
    }
    let mut seen = FxHashSet::default();
    let repeats = sample
        .windows(REPEAT_WINDOW)
        .filter(|window| !seen.insert(*window))
        .count();
    debug!("{} of {} windows repeat.", repeats, windows);
    repeats * 4 > windows
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABRA: &[u8] = b"ABRACADABRA!";
    const ABRA_ORDER: [u32; 12] = [11, 10, 7, 0, 3, 5, 8, 1, 4, 6, 9, 2];

    /// Check that `order` is a permutation whose rotations are non-decreasing.
    fn assert_sorted(text: &[u8], order: &[u32]) {
        let n = text.len();
        let mut seen = vec![false; n];
        order.iter().for_each(|&p| seen[p as usize] = true);
        assert!(seen.iter().all(|&s| s));
        let rotation = |p: u32| {
            let p = p as usize;
            [&text[p..], &text[..p]].concat()
        };
        for pair in order.windows(2) {
            assert!(rotation(pair[0]) <= rotation(pair[1]));
        }
    }

    #[test]
    fn abracadabra_native() {
        let csa = CircularSuffixArray::with_algorithm(ABRA, SortAlgorithm::Native).unwrap();
        assert_eq!(csa.len(), 12);
        assert_eq!(csa.order(), &ABRA_ORDER);
    }

    #[test]
    fn abracadabra_sais() {
        let csa = CircularSuffixArray::with_algorithm(ABRA, SortAlgorithm::Sais).unwrap();
        assert_eq!(csa.order(), &ABRA_ORDER);
        assert_eq!(csa.index(3).unwrap(), 0);
        assert_eq!(csa.index(11).unwrap(), 2);
    }

    #[test]
    fn empty_block() {
        for algorithm in [SortAlgorithm::Auto, SortAlgorithm::Native, SortAlgorithm::Sais] {
            let csa = CircularSuffixArray::with_algorithm(&[], algorithm).unwrap();
            assert!(csa.is_empty());
            assert_eq!(csa.len(), 0);
        }
    }

    #[test]
    fn index_out_of_range() {
        let csa = CircularSuffixArray::new(ABRA).unwrap();
        match csa.index(12) {
            Err(BwtError::IndexOutOfRange { index, len }) => {
                assert_eq!(index, 12);
                assert_eq!(len, 12);
            }
            other => panic!("Expected IndexOutOfRange, got {:?}", other),
        }
        let empty = CircularSuffixArray::new(&[]).unwrap();
        assert!(empty.index(0).is_err());
    }

    #[test]
    fn compare_wraps() {
        // "ba" rotations: 0 -> "ba", 1 -> "ab"
        let block = b"ba";
        assert_eq!(block_compare(0, 1, block), Ordering::Greater);
        assert_eq!(block_compare(1, 0, block), Ordering::Less);
        assert_eq!(block_compare(1, 1, block), Ordering::Equal);
        // Periodic blocks have equal rotations
        let block = b"abab";
        assert_eq!(block_compare(0, 2, block), Ordering::Equal);
        assert_eq!(block_compare(1, 3, block), Ordering::Equal);
        assert_eq!(block_compare(0, 1, block), Ordering::Less);
    }

    #[test]
    fn periodic_blocks() {
        let texts: [&[u8]; 4] = [b"aaaaaaaaaa", b"abababab", b"abcabcabcabc", b"z"];
        for text in texts {
            for algorithm in [SortAlgorithm::Native, SortAlgorithm::Sais] {
                let csa = CircularSuffixArray::with_algorithm(text, algorithm).unwrap();
                assert_sorted(text, csa.order());
            }
        }
    }

    #[test]
    fn algorithms_agree() {
        let text = "the quick brown fox jumps over the lazy dog, then naps in the sun"
            .repeat(20)
            .into_bytes();
        let native = CircularSuffixArray::with_algorithm(&text, SortAlgorithm::Native).unwrap();
        let sais = CircularSuffixArray::with_algorithm(&text, SortAlgorithm::Sais).unwrap();
        assert_sorted(&text, native.order());
        assert_sorted(&text, sais.order());
    }

    /// Xorshift bytes, free of repeated windows.
    fn varied_bytes(len: usize) -> Vec<u8> {
        let mut state = 0x2545_f491_4f6c_dd1d_u64;
        (0..len)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                (state >> 24) as u8
            })
            .collect()
    }

    #[test]
    fn repetitive_sample_prefers_sais() {
        assert!(use_sais(&[b'a'; 4_000]));
        assert!(use_sais(b"ACGTACGTTTGACCA".repeat(300).as_slice()));
        assert!(!use_sais(&varied_bytes(4_000)));
        // Many symbols, but one long phrase over and over
        let phrase = b"Pack my box with five dozen liquor jugs! 0123456789".repeat(100);
        assert!(use_sais(&phrase));
    }

    #[test]
    fn varied_block_stays_native() {
        let text = varied_bytes(120_000);
        assert_eq!(resolve(&text, SortAlgorithm::Auto).unwrap(), SortAlgorithm::Native);
    }

    #[test]
    fn repetitive_tail_prefers_sais() {
        // Only the head looks varied
        let mut text = varied_bytes(5_000);
        text.extend(std::iter::repeat(0_u8).take(200_000));
        assert_eq!(resolve(&text, SortAlgorithm::Auto).unwrap(), SortAlgorithm::Sais);

        let mut text = varied_bytes(20_000);
        text.extend(b"ACGT".repeat(10_000));
        assert_eq!(resolve(&text, SortAlgorithm::Auto).unwrap(), SortAlgorithm::Sais);
    }

    #[test]
    fn run_between_samples_prefers_sais() {
        let mut text = varied_bytes(300_000);
        // Falls in the gap between the 9th and 10th samples
        text[165_000..171_000].fill(b'x');
        assert!(samples(&text).all(|sample| !use_sais(sample)));
        assert_eq!(resolve(&text, SortAlgorithm::Auto).unwrap(), SortAlgorithm::Sais);
    }

    #[test]
    fn samples_cover_block() {
        let text = varied_bytes(9_000);
        let windows = samples(&text).collect::<Vec<_>>();
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0], &text[..5_000]);
        assert_eq!(windows[1], &text[4_000..]);

        let text = varied_bytes(1_000_000);
        let windows = samples(&text).collect::<Vec<_>>();
        assert_eq!(windows.len(), MAX_SAMPLES);
        assert!(windows.iter().all(|w| w.len() == SAMPLE_SIZE));
        assert_eq!(*windows.last().unwrap(), &text[1_000_000 - SAMPLE_SIZE..]);

        assert_eq!(longest_run(b""), 0);
        assert_eq!(longest_run(b"a"), 1);
        assert_eq!(longest_run(b"abbbcc"), 3);
    }
}
