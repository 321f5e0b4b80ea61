//! Column configuration for the read-only students performance table.

use std::path::Path;

use crate::data::loader::{load_table, LoadError};
use crate::data::model::{CellValue, Table};

pub const PREPARATION_COLUMN: &str = "test preparation course";

/// How a column's cells are rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnKind {
    Text,
    /// Boolean shown as a disabled checkbox.
    Checkbox,
    /// Number shown as a bar filled between `min` and `max`.
    Progress { min: f64, max: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpec {
    pub column: &'static str,
    pub label: &'static str,
    pub kind: ColumnKind,
    pub help: Option<&'static str>,
}

const SCORE: ColumnKind = ColumnKind::Progress {
    min: 0.0,
    max: 100.0,
};

pub const STUDENT_COLUMNS: [ColumnSpec; 8] = [
    ColumnSpec {
        column: "gender",
        label: "Gender",
        kind: ColumnKind::Text,
        help: None,
    },
    ColumnSpec {
        column: "race/ethnicity",
        label: "Ethnicity Group",
        kind: ColumnKind::Text,
        help: None,
    },
    ColumnSpec {
        column: "parental level of education",
        label: "Parental level of education",
        kind: ColumnKind::Text,
        help: None,
    },
    ColumnSpec {
        column: "lunch",
        label: "Lunch",
        kind: ColumnKind::Text,
        help: None,
    },
    ColumnSpec {
        column: PREPARATION_COLUMN,
        label: "Test preparation course",
        kind: ColumnKind::Checkbox,
        help: Some("Indication if the student completed the preparation course or not"),
    },
    ColumnSpec {
        column: "math score",
        label: "Math Score",
        kind: SCORE,
        help: Some("The score in the math part"),
    },
    ColumnSpec {
        column: "reading score",
        label: "Reading Score",
        kind: SCORE,
        help: Some("The score in the reading part"),
    },
    ColumnSpec {
        column: "writing score",
        label: "Writing Score",
        kind: SCORE,
        help: Some("The score in the writing part"),
    },
];

/// A table column resolved against [`STUDENT_COLUMNS`].
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayColumn {
    pub index: usize,
    pub label: String,
    pub kind: ColumnKind,
    pub help: Option<&'static str>,
}

/// Load the students table and turn the preparation course into booleans.
pub fn load_students(path: &Path) -> Result<Table, LoadError> {
    let mut table = load_table(path)?;
    prepare(&mut table);
    Ok(table)
}

/// `none` → `false`, `completed` → `true` in the preparation course column.
pub fn prepare(table: &mut Table) {
    table.replace_values(
        PREPARATION_COLUMN,
        &[
            (CellValue::Text("none".into()), CellValue::Bool(false)),
            (CellValue::Text("completed".into()), CellValue::Bool(true)),
        ],
    );
}

/// Columns in table order with their configured label and renderer.
/// Columns without a configuration are plain text under their raw header.
pub fn display_columns(table: &Table) -> Vec<DisplayColumn> {
    table
        .columns
        .iter()
        .enumerate()
        .map(|(index, name)| match STUDENT_COLUMNS.iter().find(|s| s.column == name.as_str()) {
            Some(spec) => DisplayColumn {
                index,
                label: spec.label.to_string(),
                kind: spec.kind,
                help: spec.help,
            },
            None => DisplayColumn {
                index,
                label: name.clone(),
                kind: ColumnKind::Text,
                help: None,
            },
        })
        .collect()
}

/// Fill fraction of a progress cell, clamped to `0.0..=1.0`.
/// Non-numeric cells and a degenerate range give `None`.
pub fn progress_fraction(value: &CellValue, min: f64, max: f64) -> Option<f32> {
    let v = value.as_f64()?;
    let range = max - min;
    if range.abs() < f64::EPSILON {
        return None;
    }
    Some(((v - min) / range).clamp(0.0, 1.0) as f32)
}
