use facemorph_image::Image;
use rayon::prelude::*;

/// Controls how independent units of work are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread, in input order.
    ///
    /// Useful for small workloads, debugging, or when the overhead of
    /// parallelization outweighs the benefits.
    #[default]
    Serial,

    /// Use the global Rayon thread pool.
    ///
    /// Results are still returned in input order.
    Parallel,
}

/// Apply a function to each pixel of the image in parallel, row by row.
///
/// The closure receives the column, the row and the channels of the pixel.
pub fn par_iter_rows_indexed<T, const C: usize>(
    dst: &mut Image<T, C>,
    f: impl Fn(usize, usize, &mut [T]) + Send + Sync,
) where
    T: Send + Sync,
{
    if dst.size().is_empty() {
        return;
    }

    let cols = dst.cols();

    dst.as_slice_mut()
        .par_chunks_exact_mut(C * cols)
        .enumerate()
        .for_each(|(y, dst_row)| {
            dst_row
                .chunks_exact_mut(C)
                .enumerate()
                .for_each(|(x, dst_pixel)| f(x, y, dst_pixel));
        });
}

/// Map every item through `f` following the given strategy.
///
/// The output keeps the order of `items` regardless of the strategy.
pub fn map_with_strategy<I, O>(
    items: &[I],
    strategy: ExecutionStrategy,
    f: impl Fn(&I) -> O + Send + Sync,
) -> Vec<O>
where
    I: Sync,
    O: Send,
{
    match strategy {
        ExecutionStrategy::Serial => items.iter().map(f).collect(),
        ExecutionStrategy::Parallel => items.par_iter().map(f).collect(),
    }
}
