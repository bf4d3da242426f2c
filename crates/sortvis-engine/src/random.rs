//! Random input generation.

use rand::Rng;

use crate::error::{EngineError, Result};
use crate::{MAX_ARRAY_SIZE, MAX_VALUE, MIN_ARRAY_SIZE, MIN_VALUE};

/// Draw `size` values uniformly from `MIN_VALUE..=MAX_VALUE` using the
/// thread-local RNG.
///
/// # Examples
///
/// ```
/// use sortvis_engine::{generate_random_array, MAX_VALUE, MIN_VALUE};
///
/// let array = generate_random_array(30).unwrap();
/// assert_eq!(array.len(), 30);
/// assert!(array.iter().all(|v| (MIN_VALUE..=MAX_VALUE).contains(v)));
/// ```
pub fn generate_random_array(size: usize) -> Result<Vec<i32>> {
    generate_random_array_with(&mut rand::thread_rng(), size)
}

/// Same as [`generate_random_array`] with a caller-supplied RNG.
pub fn generate_random_array_with<R: Rng + ?Sized>(rng: &mut R, size: usize) -> Result<Vec<i32>> {
    if !(MIN_ARRAY_SIZE..=MAX_ARRAY_SIZE).contains(&size) {
        return Err(EngineError::ArraySize {
            size,
            min: MIN_ARRAY_SIZE,
            max: MAX_ARRAY_SIZE,
        });
    }
    Ok(random_values(rng, size))
}

/// Draw `len` values from `MIN_VALUE..=MAX_VALUE` without checking `len`
/// against the supported array sizes.
pub fn random_values<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<i32> {
    (0..len).map(|_| rng.gen_range(MIN_VALUE..=MAX_VALUE)).collect()
}
