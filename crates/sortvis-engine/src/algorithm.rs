//! Algorithm identifiers and their static metadata.

use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// The sorting algorithms the engine can instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AlgorithmId {
    #[default]
    Bubble,
    Selection,
    Insertion,
    Quick,
    Merge,
}

impl AlgorithmId {
    /// Every algorithm, in registry order.
    pub const ALL: [Self; 5] = [
        Self::Bubble,
        Self::Selection,
        Self::Insertion,
        Self::Quick,
        Self::Merge,
    ];

    /// Stable lowercase identifier.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bubble => "bubble",
            Self::Selection => "selection",
            Self::Insertion => "insertion",
            Self::Quick => "quick",
            Self::Merge => "merge",
        }
    }

    /// Registry entry for this algorithm.
    pub fn info(&self) -> &'static AlgorithmInfo {
        &ALGORITHMS[*self as usize]
    }

    /// Whether equal values keep their input order.
    pub const fn is_stable(&self) -> bool {
        matches!(self, Self::Bubble | Self::Insertion | Self::Merge)
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| EngineError::UnknownAlgorithm(s.to_string()))
    }
}

/// Presentation metadata for one algorithm.
///
/// Static text for labelling; nothing here is derived from a run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlgorithmInfo {
    pub id: AlgorithmId,
    pub display_name: &'static str,
    pub description: &'static str,
    pub time_complexity: &'static str,
    pub space_complexity: &'static str,
}

/// Metadata for every algorithm, indexed by `AlgorithmId as usize`.
pub static ALGORITHMS: [AlgorithmInfo; 5] = [
    AlgorithmInfo {
        id: AlgorithmId::Bubble,
        display_name: "Bubble Sort",
        description: "Compares adjacent elements and swaps them if they're in wrong order.",
        time_complexity: "O(n²)",
        space_complexity: "O(1)",
    },
    AlgorithmInfo {
        id: AlgorithmId::Selection,
        display_name: "Selection Sort",
        description: "Finds the minimum element and places it at the beginning.",
        time_complexity: "O(n²)",
        space_complexity: "O(1)",
    },
    AlgorithmInfo {
        id: AlgorithmId::Insertion,
        display_name: "Insertion Sort",
        description: "Builds the final sorted array one item at a time.",
        time_complexity: "O(n²)",
        space_complexity: "O(1)",
    },
    AlgorithmInfo {
        id: AlgorithmId::Quick,
        display_name: "Quick Sort",
        description: "Divides array into partitions and sorts them recursively.",
        time_complexity: "O(n log n)",
        space_complexity: "O(log n)",
    },
    AlgorithmInfo {
        id: AlgorithmId::Merge,
        display_name: "Merge Sort",
        description: "Divides array into halves and merges them in sorted order.",
        time_complexity: "O(n log n)",
        space_complexity: "O(n)",
    },
];

/// Read-only view of the algorithm registry.
pub fn registry() -> &'static [AlgorithmInfo] {
    &ALGORITHMS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_indexed_by_id() {
        for id in AlgorithmId::ALL {
            assert_eq!(id.info().id, id);
        }
        assert_eq!(registry().len(), AlgorithmId::ALL.len());
    }

    #[test]
    fn parse_round_trips_names() {
        for id in AlgorithmId::ALL {
            assert_eq!(id.as_str().parse::<AlgorithmId>(), Ok(id));
            assert_eq!(id.to_string(), id.as_str());
        }
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert_eq!(
            "heap".parse::<AlgorithmId>(),
            Err(EngineError::UnknownAlgorithm("heap".into()))
        );
        // Identifiers are case-sensitive
        assert!("Bubble".parse::<AlgorithmId>().is_err());
    }

    #[test]
    fn complexities_match_textbook() {
        assert_eq!(AlgorithmId::Bubble.info().time_complexity, "O(n²)");
        assert_eq!(AlgorithmId::Quick.info().space_complexity, "O(log n)");
        assert_eq!(AlgorithmId::Merge.info().space_complexity, "O(n)");
        assert_eq!(AlgorithmId::Insertion.info().display_name, "Insertion Sort");
    }

    #[test]
    fn stability_flags() {
        assert!(AlgorithmId::Bubble.is_stable());
        assert!(AlgorithmId::Insertion.is_stable());
        assert!(AlgorithmId::Merge.is_stable());
        assert!(!AlgorithmId::Selection.is_stable());
        assert!(!AlgorithmId::Quick.is_stable());
    }
}
