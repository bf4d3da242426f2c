//! Selection sort.

use crate::step::{Recorder, Step};

/// Record a selection sort of `input`.
///
/// Tracking a new minimum does not produce a step of its own; only the scan
/// comparisons and the final swap into position do.
pub fn selection_sort(input: &[i32]) -> Vec<Step> {
    let mut arr = input.to_vec();
    let n = arr.len();
    let mut rec = Recorder::new();

    for i in 0..n.saturating_sub(1) {
        let mut min_idx = i;

        for j in i + 1..n {
            rec.compare(
                &arr,
                min_idx,
                j,
                format!(
                    "Comparing elements at positions {} and {}, finding minimum",
                    min_idx, j
                ),
            );
            if arr[j] < arr[min_idx] {
                min_idx = j;
            }
        }

        if min_idx != i {
            arr.swap(i, min_idx);
            rec.swap(
                &arr,
                i,
                min_idx,
                format!("Swapping minimum element {} to position {}", arr[i], i),
            );
        }

        rec.mark_sorted(i);
    }
    if n > 0 {
        rec.mark_sorted(n - 1);
    }

    rec.finish(&arr)
}
