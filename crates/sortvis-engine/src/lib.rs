//! Sortvis Step Engine
//!
//! Classic comparison sorts re-implemented as step recorders. Instead of
//! sorting in place and returning, each algorithm sorts a private copy of its
//! input and records a [`Step`] at every comparison and every write that
//! changes the array.
//!
//! # Steps
//!
//! A step carries a full snapshot of the working array, the indices being
//! compared, the indices just written, and the set of indices already known
//! to hold their final value. Runs are computed eagerly and are fully
//! deterministic: the same algorithm over the same input always yields the
//! same sequence.
//!
//! # Usage
//!
//! ```
//! use sortvis_engine::{generate_steps, AlgorithmId};
//!
//! let steps = generate_steps(AlgorithmId::Bubble, &[5, 3, 8, 1]);
//! let last = steps.last().unwrap();
//! assert_eq!(last.array, vec![1, 3, 5, 8]);
//! ```

mod algorithm;
mod error;
mod random;
mod sorts;
mod step;

pub use algorithm::{registry, AlgorithmId, AlgorithmInfo, ALGORITHMS};
pub use error::{EngineError, Result};
pub use random::{generate_random_array, generate_random_array_with, random_values};
pub use sorts::{
    bubble_sort, generate_steps, get_sorting_steps, insertion_sort, merge_sort, quick_sort,
    selection_sort,
};
pub use step::{Step, StepKind};

/// Smallest array the generator will produce.
pub const MIN_ARRAY_SIZE: usize = 10;

/// Largest array the generator will produce.
pub const MAX_ARRAY_SIZE: usize = 100;

/// Smallest value the generator will draw (inclusive).
pub const MIN_VALUE: i32 = 10;

/// Largest value the generator will draw (inclusive).
pub const MAX_VALUE: i32 = 309;

/// Narrative text of the terminal step of every run.
pub const COMPLETE_ACTION: &str = "Sorting complete!";

const _: () = assert!(MIN_ARRAY_SIZE <= MAX_ARRAY_SIZE);
const _: () = assert!(MIN_VALUE <= MAX_VALUE);
