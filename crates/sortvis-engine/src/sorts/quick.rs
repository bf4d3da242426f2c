//! Quick sort (Lomuto partition, last element as pivot).

use std::cmp::Ordering;

use crate::step::{Recorder, Step};

/// Record a quick sort of `input`.
///
/// Each partition fixes its pivot in place, so the pivot's final index joins
/// the sorted set immediately. Single-element ranges are marked when the
/// recursion reaches them; empty ranges are skipped.
pub fn quick_sort(input: &[i32]) -> Vec<Step> {
    let mut arr = input.to_vec();
    let mut rec = Recorder::new();

    if !arr.is_empty() {
        let high = arr.len() - 1;
        sort_range(&mut arr, &mut rec, 0, high);
    }

    rec.finish(&arr)
}

fn sort_range(arr: &mut [i32], rec: &mut Recorder, low: usize, high: usize) {
    match low.cmp(&high) {
        Ordering::Less => {
            let pivot_idx = partition(arr, rec, low, high);
            if pivot_idx > low {
                sort_range(arr, rec, low, pivot_idx - 1);
            }
            sort_range(arr, rec, pivot_idx + 1, high);
        }
        Ordering::Equal => rec.mark_sorted(low),
        Ordering::Greater => {}
    }
}

/// Partition `arr[low..=high]` around `arr[high]` and return the pivot's
/// final index.
fn partition(arr: &mut [i32], rec: &mut Recorder, low: usize, high: usize) -> usize {
    let pivot = arr[high];
    rec.note(
        arr,
        vec![high],
        format!("Choosing pivot {} at position {}", pivot, high),
    );

    // Next slot for a value smaller than the pivot
    let mut boundary = low;
    for j in low..high {
        rec.compare(
            arr,
            j,
            high,
            format!("Comparing {} with pivot {}", arr[j], pivot),
        );

        if arr[j] < pivot {
            if boundary != j {
                arr.swap(boundary, j);
                rec.swap(
                    arr,
                    boundary,
                    j,
                    format!("Swapping {} and {}", arr[boundary], arr[j]),
                );
            }
            boundary += 1;
        }
    }

    arr.swap(boundary, high);
    rec.swap(
        arr,
        boundary,
        high,
        format!("Placing pivot {} at correct position {}", pivot, boundary),
    );
    rec.mark_sorted(boundary);

    boundary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepKind;

    #[test]
    fn partition_starts_by_highlighting_pivot() {
        let steps = quick_sort(&[3, 1, 2]);
        assert_eq!(steps[0].kind, StepKind::Note);
        assert_eq!(steps[0].comparing, vec![2]);
        assert_eq!(steps[0].action, "Choosing pivot 2 at position 2");
        assert_eq!(steps[1].comparing, vec![0, 2]);
    }

    #[test]
    fn pivot_placement_is_always_recorded() {
        // Pivot 3 is already the maximum: the placement swap is (2, 2)
        let steps = quick_sort(&[1, 2, 3]);
        let placement = steps
            .iter()
            .find(|s| s.action.starts_with("Placing pivot 3"))
            .unwrap();
        assert_eq!(placement.swapping, vec![2, 2]);
    }

    #[test]
    fn pivot_and_singletons_marked_sorted() {
        let steps = quick_sort(&[3, 1, 2]);
        // Partition of [3,1,2] around 2: 1 moves to slot 0, pivot lands at 1
        let placement = steps
            .iter()
            .position(|s| s.action == "Placing pivot 2 at correct position 1")
            .unwrap();
        assert_eq!(steps[placement].array, vec![1, 2, 3]);
        // The pivot counts as sorted from the following step on
        assert!(steps[placement].sorted.is_empty());

        // Both sides are singletons: marked without emitting steps
        assert_eq!(steps.len(), placement + 2);
        assert_eq!(steps.last().unwrap().array, vec![1, 2, 3]);
    }

    #[test]
    fn skips_self_swaps_during_scan() {
        let steps = quick_sort(&[1, 2, 5, 3]);
        assert!(steps
            .iter()
            .filter(|s| s.action.starts_with("Swapping"))
            .all(|s| s.swapping[0] != s.swapping[1]));
    }
}
