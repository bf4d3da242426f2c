//! Instrumented sorting algorithms and the dispatch entry points.

mod bubble;
mod insertion;
mod merge;
mod quick;
mod selection;

pub use bubble::bubble_sort;
pub use insertion::insertion_sort;
pub use merge::merge_sort;
pub use quick::quick_sort;
pub use selection::selection_sort;

use crate::algorithm::AlgorithmId;
use crate::step::Step;

/// Compute the full run of `algorithm` over `input`.
///
/// The input is copied; the caller's slice is never modified. The returned
/// run is never empty: its last step is always the completion step.
pub fn generate_steps(algorithm: AlgorithmId, input: &[i32]) -> Vec<Step> {
    match algorithm {
        AlgorithmId::Bubble => bubble_sort(input),
        AlgorithmId::Selection => selection_sort(input),
        AlgorithmId::Insertion => insertion_sort(input),
        AlgorithmId::Quick => quick_sort(input),
        AlgorithmId::Merge => merge_sort(input),
    }
}

/// String-keyed variant of [`generate_steps`].
///
/// An unrecognised identifier yields an empty run, which callers treat as
/// "nothing to visualise".
///
/// # Examples
///
/// ```
/// use sortvis_engine::get_sorting_steps;
///
/// assert!(get_sorting_steps("bogo", &[2, 1]).is_empty());
/// assert_eq!(get_sorting_steps("merge", &[2, 1]).last().unwrap().array, vec![1, 2]);
/// ```
pub fn get_sorting_steps(algorithm: &str, input: &[i32]) -> Vec<Step> {
    match algorithm.parse::<AlgorithmId>() {
        Ok(id) => generate_steps(id, input),
        Err(_) => Vec::new(),
    }
}
