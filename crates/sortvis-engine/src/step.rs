//! Step records and the recorder the algorithms write them through.

use std::collections::BTreeSet;

use crate::COMPLETE_ACTION;

/// What kind of event a step records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StepKind {
    /// Two indices are being compared
    Compare,
    /// Two indices were exchanged, or a value was shifted one slot right
    Swap,
    /// A single value was written into its merge destination
    Place,
    /// Bookkeeping: choosing a pivot, announcing a key or a merge range
    Note,
    /// Terminal step of a run
    Complete,
}

/// One atomic, replayable unit of sorting progress.
///
/// Merge placements are reported through `swapping` with a single index so
/// that viewers highlight them like swaps; `kind` tells them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    /// Snapshot of the working array after this event
    pub array: Vec<i32>,
    /// Indices under comparison
    pub comparing: Vec<usize>,
    /// Indices just written
    pub swapping: Vec<usize>,
    /// Indices holding their final value
    pub sorted: BTreeSet<usize>,
    /// Narrative description
    pub action: String,
    /// Event classification
    pub kind: StepKind,
}

impl Step {
    /// Whether this step highlights a comparison.
    pub fn is_comparison(&self) -> bool {
        !self.comparing.is_empty()
    }

    /// Array reads/writes this step accounts for.
    pub fn array_accesses(&self) -> usize {
        self.comparing.len() + self.swapping.len()
    }

    /// Whether this is the terminal step of a run.
    pub fn is_complete(&self) -> bool {
        self.kind == StepKind::Complete
    }
}

/// Accumulates steps and the running sorted-index set for one run.
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    steps: Vec<Step>,
    sorted: BTreeSet<usize>,
}

impl Recorder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record that `index` holds its final value from the next step on.
    pub(crate) fn mark_sorted(&mut self, index: usize) {
        self.sorted.insert(index);
    }

    pub(crate) fn compare(&mut self, array: &[i32], a: usize, b: usize, action: String) {
        self.push(StepKind::Compare, array, vec![a, b], Vec::new(), action);
    }

    pub(crate) fn swap(&mut self, array: &[i32], a: usize, b: usize, action: String) {
        self.push(StepKind::Swap, array, Vec::new(), vec![a, b], action);
    }

    pub(crate) fn place(&mut self, array: &[i32], index: usize, action: String) {
        self.push(StepKind::Place, array, Vec::new(), vec![index], action);
    }

    /// Bookkeeping step; `highlight` is shown as the comparing set.
    pub(crate) fn note(&mut self, array: &[i32], highlight: Vec<usize>, action: String) {
        self.push(StepKind::Note, array, highlight, Vec::new(), action);
    }

    /// Append the terminal step and hand back the run.
    pub(crate) fn finish(mut self, array: &[i32]) -> Vec<Step> {
        self.steps.push(Step {
            array: array.to_vec(),
            comparing: Vec::new(),
            swapping: Vec::new(),
            sorted: (0..array.len()).collect(),
            action: COMPLETE_ACTION.to_string(),
            kind: StepKind::Complete,
        });
        self.steps
    }

    fn push(
        &mut self,
        kind: StepKind,
        array: &[i32],
        comparing: Vec<usize>,
        swapping: Vec<usize>,
        action: String,
    ) {
        self.steps.push(Step {
            array: array.to_vec(),
            comparing,
            swapping,
            sorted: self.sorted.clone(),
            action,
            kind,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshots_are_detached_from_the_working_array() {
        let mut working = vec![2, 1];
        let mut rec = Recorder::new();
        rec.compare(&working, 0, 1, "cmp".into());
        working.swap(0, 1);
        rec.swap(&working, 0, 1, "swap".into());
        working[0] = 99;

        let steps = rec.finish(&working);
        assert_eq!(steps[0].array, vec![2, 1]);
        assert_eq!(steps[1].array, vec![1, 2]);
        assert_eq!(steps[2].array, vec![99, 2]);
    }

    #[test]
    fn sorted_set_is_captured_per_step() {
        let array = [1, 2, 3];
        let mut rec = Recorder::new();
        rec.note(&array, vec![], "before".into());
        rec.mark_sorted(2);
        rec.note(&array, vec![], "after".into());

        let steps = rec.finish(&array);
        assert!(steps[0].sorted.is_empty());
        assert_eq!(steps[1].sorted, BTreeSet::from([2]));
        assert_eq!(steps[2].sorted, BTreeSet::from([0, 1, 2]));
    }

    #[test]
    fn terminal_step_shape() {
        let steps = Recorder::new().finish(&[]);
        assert_eq!(steps.len(), 1);
        let last = &steps[0];
        assert!(last.is_complete());
        assert!(last.comparing.is_empty());
        assert!(last.swapping.is_empty());
        assert!(last.sorted.is_empty());
        assert_eq!(last.action, COMPLETE_ACTION);
    }

    #[test]
    fn access_accounting() {
        let array = [4, 5];
        let mut rec = Recorder::new();
        rec.compare(&array, 0, 1, String::new());
        rec.place(&array, 1, String::new());
        let steps = rec.finish(&array);

        assert!(steps[0].is_comparison());
        assert_eq!(steps[0].array_accesses(), 2);
        assert!(!steps[1].is_comparison());
        assert_eq!(steps[1].array_accesses(), 1);
        assert_eq!(steps[1].kind, StepKind::Place);
    }
}
