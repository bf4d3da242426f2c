//! Bubble sort.

use crate::step::{Recorder, Step};

/// Record a bubble sort of `input`.
///
/// Each pass settles the largest remaining value at the top of the unsorted
/// range, so that index joins the sorted set when the pass ends.
pub fn bubble_sort(input: &[i32]) -> Vec<Step> {
    let mut arr = input.to_vec();
    let n = arr.len();
    let mut rec = Recorder::new();

    for i in 0..n.saturating_sub(1) {
        for j in 0..n - 1 - i {
            rec.compare(
                &arr,
                j,
                j + 1,
                format!("Comparing elements at positions {} and {}", j, j + 1),
            );

            if arr[j] > arr[j + 1] {
                arr.swap(j, j + 1);
                rec.swap(
                    &arr,
                    j,
                    j + 1,
                    format!(
                        "Swapping elements {} and {} at positions {} and {}",
                        arr[j + 1],
                        arr[j],
                        j,
                        j + 1
                    ),
                );
            }
        }
        rec.mark_sorted(n - 1 - i);
    }
    if n > 0 {
        rec.mark_sorted(0);
    }

    rec.finish(&arr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepKind;

    #[test]
    fn sorts_small_example() {
        let steps = bubble_sort(&[5, 3, 8, 1]);

        assert_eq!(steps.first().unwrap().comparing, vec![0, 1]);
        assert_eq!(steps.last().unwrap().array, vec![1, 3, 5, 8]);

        // 5 > 3, so the very next step swaps them
        assert_eq!(steps[1].kind, StepKind::Swap);
        assert_eq!(steps[1].swapping, vec![0, 1]);
        assert_eq!(steps[1].array, vec![3, 5, 8, 1]);
    }

    #[test]
    fn comparison_count_is_triangular() {
        let steps = bubble_sort(&[1, 2, 3, 4, 5]);
        let compares = steps.iter().filter(|s| s.kind == StepKind::Compare).count();
        assert_eq!(compares, 4 + 3 + 2 + 1);
        assert!(steps.iter().all(|s| s.kind != StepKind::Swap));
    }

    #[test]
    fn top_index_sorted_after_first_pass() {
        let steps = bubble_sort(&[3, 2, 1]);
        // First pass: 2 compares + 2 swaps, then the second pass begins
        let second_pass = &steps[4];
        assert_eq!(second_pass.comparing, vec![0, 1]);
        assert!(second_pass.sorted.contains(&2));
    }

    #[test]
    fn single_element() {
        let steps = bubble_sort(&[42]);
        assert_eq!(steps.len(), 1);
        assert!(steps[0].sorted.contains(&0));
    }
}
