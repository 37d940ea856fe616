use rayon::prelude::*;

/// Byte frequencies of `data`, indexed by byte value.
pub fn freqs(data: &[u8]) -> Vec<u32> {
    symbol_counts(data, 256)
}

/// Count of each symbol in `data` over an alphabet of `size` symbols. Uses
/// parallelism when the data set is over 64k.
pub fn symbol_counts<T>(data: &[T], size: usize) -> Vec<u32>
where
    T: Copy + Into<u32> + Sync,
{
    if data.len() > 64_000 {
        // 16k is pretty much the sweet spot for chunk size.
        data.par_chunks(16_000)
            .fold(
                || vec![0_u32; size],
                |mut counts, chunk| {
                    chunk.iter().for_each(|&el| counts[el.into() as usize] += 1);
                    counts
                },
            )
            .reduce(
                || vec![0_u32; size],
                |s, f| s.iter().zip(&f).map(|(a, b)| a + b).collect::<Vec<u32>>(),
            )
    } else {
        let mut counts = vec![0_u32; size];
        data.iter().for_each(|&el| counts[el.into() as usize] += 1);
        counts
    }
}

/// Converts a frequency count into the starting offset of each symbol in sorted order.
pub fn bucket_starts(freqs: &[u32]) -> Vec<u32> {
    freqs
        .iter()
        .scan(0_u32, |sum, &count| {
            let start = *sum;
            *sum += count;
            Some(start)
        })
        .collect()
}
