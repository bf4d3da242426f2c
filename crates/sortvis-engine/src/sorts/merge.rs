//! Top-down merge sort.

use crate::step::{Recorder, Step};

/// Record a merge sort of `input`.
///
/// Every write that follows a comparison is recorded as a single-index
/// [`StepKind::Place`](crate::StepKind::Place). Tails left over once one half
/// is exhausted are copied without steps; the whole merged range joins the
/// sorted set when the merge finishes.
pub fn merge_sort(input: &[i32]) -> Vec<Step> {
    let mut arr = input.to_vec();
    let mut rec = Recorder::new();

    if arr.len() > 1 {
        let right = arr.len() - 1;
        sort_range(&mut arr, &mut rec, 0, right);
    }

    rec.finish(&arr)
}

fn sort_range(arr: &mut [i32], rec: &mut Recorder, left: usize, right: usize) {
    if left < right {
        let mid = left + (right - left) / 2;
        sort_range(arr, rec, left, mid);
        sort_range(arr, rec, mid + 1, right);
        merge(arr, rec, left, mid, right);
    }
}

fn merge(arr: &mut [i32], rec: &mut Recorder, left: usize, mid: usize, right: usize) {
    let left_half = arr[left..=mid].to_vec();
    let right_half = arr[mid + 1..=right].to_vec();

    rec.note(
        arr,
        (left..=right).collect(),
        format!(
            "Merging subarrays from {} to {} and {} to {}",
            left,
            mid,
            mid + 1,
            right
        ),
    );

    let (mut i, mut j, mut k) = (0, 0, left);
    while i < left_half.len() && j < right_half.len() {
        rec.compare(
            arr,
            left + i,
            mid + 1 + j,
            format!("Comparing {} and {}", left_half[i], right_half[j]),
        );

        // `<=` keeps equal values in input order
        if left_half[i] <= right_half[j] {
            arr[k] = left_half[i];
            i += 1;
        } else {
            arr[k] = right_half[j];
            j += 1;
        }
        rec.place(arr, k, format!("Placed {} at position {}", arr[k], k));
        k += 1;
    }

    for &value in left_half[i..].iter().chain(&right_half[j..]) {
        arr[k] = value;
        k += 1;
    }

    for idx in left..=right {
        rec.mark_sorted(idx);
    }
}
