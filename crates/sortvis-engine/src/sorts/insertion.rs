//! Insertion sort.

use crate::step::{Recorder, Step};

/// Record an insertion sort of `input`.
///
/// Shifts are recorded as two-index swaps of the hole and its predecessor.
/// The comparison step is only emitted when the predecessor is larger, so a
/// run over equal values records no comparisons at all.
pub fn insertion_sort(input: &[i32]) -> Vec<Step> {
    let mut arr = input.to_vec();
    let n = arr.len();
    let mut rec = Recorder::new();
    if n > 0 {
        rec.mark_sorted(0);
    }

    for i in 1..n {
        let key = arr[i];
        rec.note(
            &arr,
            vec![i],
            format!("Inserting element {} into sorted portion", key),
        );

        // `hole` is where the key would land if the scan stopped now
        let mut hole = i;
        while hole > 0 && arr[hole - 1] > key {
            rec.compare(
                &arr,
                hole - 1,
                hole,
                format!("Comparing {} with {}", arr[hole - 1], key),
            );

            arr[hole] = arr[hole - 1];
            rec.swap(
                &arr,
                hole - 1,
                hole,
                format!("Moving {} one position right", arr[hole]),
            );
            hole -= 1;
        }

        arr[hole] = key;
        rec.mark_sorted(i);
        rec.note(&arr, Vec::new(), format!("Placed {} at position {}", key, hole));
    }

    rec.finish(&arr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepKind;

    #[test]
    fn equal_values_never_shift() {
        let steps = insertion_sort(&[4, 4, 4]);
        assert!(steps.iter().all(|s| s.kind != StepKind::Swap));
        assert!(steps.iter().all(|s| s.swapping.is_empty()));
        assert_eq!(steps.last().unwrap().array, vec![4, 4, 4]);
    }

    #[test]
    fn key_announcement_highlights_key_index() {
        let steps = insertion_sort(&[2, 1]);
        assert_eq!(steps[0].kind, StepKind::Note);
        assert_eq!(steps[0].comparing, vec![1]);
        assert_eq!(steps[0].action, "Inserting element 1 into sorted portion");
    }

    #[test]
    fn shift_then_place() {
        let steps = insertion_sort(&[2, 1]);
        let kinds: Vec<_> = steps.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                StepKind::Note,
                StepKind::Compare,
                StepKind::Swap,
                StepKind::Note,
                StepKind::Complete,
            ]
        );
        // The shift duplicates 2 before the key is written back
        assert_eq!(steps[2].array, vec![2, 2]);
        assert_eq!(steps[3].array, vec![1, 2]);
        assert_eq!(steps[3].action, "Placed 1 at position 0");
    }

    #[test]
    fn first_index_starts_sorted() {
        let steps = insertion_sort(&[3, 2, 1]);
        assert!(steps[0].sorted.contains(&0));
    }
}
