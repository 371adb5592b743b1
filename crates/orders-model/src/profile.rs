//! Dataset shape and completeness reports.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Schema, row count, and missing values of a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetProfile {
    pub total_rows: usize,
    pub total_columns: usize,
    /// Column names in table order.
    pub columns: Vec<String>,
    /// Null or blank cells per column.
    pub missing_values: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnQuality {
    pub name: String,
    pub missing: usize,
    /// Share of non-missing cells, in percent.
    pub completeness_percentage: f64,
}

/// Per-column completeness.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataQualityReport {
    pub total_rows: usize,
    pub total_columns: usize,
    pub total_missing: usize,
    pub overall_completeness_percentage: f64,
    pub columns: Vec<ColumnQuality>,
}

impl DataQualityReport {
    /// Columns with at least one missing cell, most incomplete first.
    pub fn incomplete_columns(&self) -> Vec<&ColumnQuality> {
        let mut incomplete: Vec<&ColumnQuality> =
            self.columns.iter().filter(|column| column.missing > 0).collect();
        incomplete.sort_by(|a, b| b.missing.cmp(&a.missing).then_with(|| a.name.cmp(&b.name)));
        incomplete
    }
}
