//! Export of the current session as JSON, CSV or a text report.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sortvis_engine::AlgorithmId;

use crate::error::{Error, Result};
use crate::playback::Playback;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
    Report,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Report => "txt",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
            ExportFormat::Report => "text/plain; charset=utf-8",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "report" | "txt" => Ok(ExportFormat::Report),
            other => Err(Error::InvalidInput(format!("unknown export format: {}", other))),
        }
    }
}

/// Everything an export needs, captured at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub array: Vec<i32>,
    pub algorithm: AlgorithmId,
    pub array_size: usize,
    pub current_step: usize,
    pub total_steps: usize,
    pub timestamp: DateTime<Utc>,
    /// Not part of the JSON document; used by the report
    #[serde(skip)]
    pub running: bool,
}

impl ExportData {
    /// Capture the exportable state of `playback` at `timestamp`.
    ///
    /// The array is the snapshot currently on display, so mid-run exports
    /// show the partially sorted values.
    pub fn capture(playback: &Playback, timestamp: DateTime<Utc>) -> Self {
        let array = playback.view().array;
        Self {
            array_size: array.len(),
            array,
            algorithm: playback.algorithm(),
            current_step: playback.current_index(),
            total_steps: playback.total_steps(),
            timestamp,
            running: playback.is_playing(),
        }
    }

    /// Suggested download name, e.g. `sorting-array-bubble-1700000000000.json`
    /// or `sorting-report-bubble-1700000000000.txt`.
    pub fn file_name(&self, format: ExportFormat) -> String {
        let prefix = match format {
            ExportFormat::Report => "sorting-report",
            ExportFormat::Json | ExportFormat::Csv => "sorting-array",
        };
        format!(
            "{}-{}-{}.{}",
            prefix,
            self.algorithm,
            self.timestamp.timestamp_millis(),
            format.extension()
        )
    }

    /// Render in the requested format.
    pub fn render(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Json => self.to_json(),
            ExportFormat::Csv => array_to_csv(&self.array),
            ExportFormat::Report => Ok(self.report()),
        }
    }

    /// Pretty-printed JSON document.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Human-readable summary of the session and the algorithm.
    pub fn report(&self) -> String {
        let info = self.algorithm.info();
        let values: Vec<String> = self.array.iter().map(i32::to_string).collect();
        let time_complexity = match self.algorithm {
            AlgorithmId::Quick => format!("{} average, O(n²) worst case", info.time_complexity),
            _ => info.time_complexity.to_string(),
        };

        format!(
            "Sorting Algorithm Visualization Report
========================================

Algorithm: {name}
Generated: {generated}

Array Information:
- Size: {size} elements
- Current Array: [{values}]
- Current Step: {current} of {total}
- Status: {status}

Algorithm Complexity:
- Time Complexity: {time}
- Space Complexity: {space}

Algorithm Description:
{description}

Export Details:
- Exported from: Sorting Algorithm Visualizer
- File Format: Text Report
- Data Integrity: Complete
",
            name = info.display_name,
            generated = self.timestamp.to_rfc3339(),
            size = self.array_size,
            values = values.join(", "),
            current = self.current_step,
            total = self.total_steps,
            status = if self.running { "Running" } else { "Stopped" },
            time = time_complexity,
            space = info.space_complexity,
            description = info.description,
        )
    }
}

/// Render the array as a single comma-separated record.
pub fn array_to_csv(array: &[i32]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(array.iter().map(i32::to_string))?;
    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| Error::Export(e.to_string()))
}
