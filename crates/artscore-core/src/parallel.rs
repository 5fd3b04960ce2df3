//! Row-band partitioning with threshold-based rayon dispatch.
//!
//! Work is always split into the same fixed bands of rows, whether it runs
//! on the rayon pool or on the calling thread. Partials come back in band
//! order and are merged left to right, so a reduction produces the same
//! bits no matter how many worker threads exist.

use rayon::prelude::*;

/// Rows per work unit.
pub const ROWS_PER_BAND: usize = 32;

/// Minimum number of samples before dispatching to the rayon pool.
pub const PARALLEL_THRESHOLD: usize = 1 << 16;

/// Map each band of rows to a partial result, preserving band order.
///
/// `row_len` is the number of elements per row (for interleaved pixel data,
/// `width * channels`).
pub fn map_bands<T, A, F>(data: &[T], row_len: usize, band_fn: F) -> Vec<A>
where
    T: Sync,
    A: Send,
    F: Fn(&[T]) -> A + Sync + Send,
{
    if data.is_empty() || row_len == 0 {
        return Vec::new();
    }
    let band_len = row_len * ROWS_PER_BAND;

    if data.len() >= PARALLEL_THRESHOLD {
        data.par_chunks(band_len).map(&band_fn).collect()
    } else {
        data.chunks(band_len).map(&band_fn).collect()
    }
}

/// Fold each band into an accumulator, then merge the partials in order.
pub fn fold_bands<T, A, I, F, R>(data: &[T], row_len: usize, init: I, fold_fn: F, merge_fn: R) -> A
where
    T: Sync,
    A: Send,
    I: Fn() -> A + Sync + Send,
    F: Fn(A, &[T]) -> A + Sync + Send,
    R: Fn(A, A) -> A,
{
    map_bands(data, row_len, |band| fold_fn(init(), band))
        .into_iter()
        .fold(init(), merge_fn)
}

/// Fill an output plane row by row. `row_fn` receives the row index and the
/// row's output slice.
pub fn fill_rows<T, F>(out: &mut [T], width: usize, row_fn: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    if out.is_empty() || width == 0 {
        return;
    }

    if out.len() >= PARALLEL_THRESHOLD {
        out.par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| row_fn(y, row));
    } else {
        out.chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| row_fn(y, row));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_bands_preserves_order() {
        let data: Vec<u32> = (0..(ROWS_PER_BAND as u32 * 3 + 5)).collect();
        let firsts = map_bands(&data, 1, |band| band[0]);
        assert_eq!(firsts, vec![0, 32, 64, 96]);
    }

    #[test]
    fn test_fold_bands_sequential_and_parallel_agree() {
        // Large enough to cross the threshold.
        let data: Vec<f64> = (0..PARALLEL_THRESHOLD * 2).map(|i| (i % 251) as f64 * 0.1).collect();
        let total = fold_bands(
            &data,
            512,
            || 0.0_f64,
            |acc, band| acc + band.iter().sum::<f64>(),
            |a, b| a + b,
        );
        let expected: f64 = data
            .chunks(512 * ROWS_PER_BAND)
            .map(|band| band.iter().sum::<f64>())
            .fold(0.0, |a, b| a + b);
        assert_eq!(total, expected);
    }

    #[test]
    fn test_fill_rows_visits_every_row() {
        let mut out = vec![0usize; 12];
        fill_rows(&mut out, 4, |y, row| row.fill(y + 1));
        assert_eq!(out, vec![1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3]);
    }

    #[test]
    fn test_empty_input_yields_no_bands() {
        let data: Vec<u8> = Vec::new();
        assert!(map_bands(&data, 3, |band| band.len()).is_empty());
    }
}
