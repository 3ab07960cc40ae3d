//! The persisted travel-time matrix.
//!
//! The raw matrix holds one row per origin with integer minute values, one
//! column per destination. The derived columns (scores and averages) exist
//! only in the extended, persisted form; the loader strips them so they are
//! recomputed on every run and never trusted as cached truth.

use crate::error::{RaterError, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Label of the first header cell, above the origin column.
pub const HEADER_LABEL: &str = "Apartment";

/// Derived column labels, appended after the raw travel times in this order.
pub const DERIVED_COLUMNS: [&str; 4] = ["Walk", "Transit", "Average", "Wt. Average"];

/// One origin's raw travel times, aligned with [`Matrix::destinations`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRow {
    pub origin: String,
    pub minutes: Vec<i64>,
}

/// Raw travel-time matrix: destination names in canonical column order plus
/// one row per origin. Invariant: every row has exactly
/// `destinations.len()` minute values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    pub destinations: Vec<String>,
    pub rows: Vec<MatrixRow>,
}

impl Matrix {
    pub fn new(destinations: Vec<String>, rows: Vec<MatrixRow>) -> Self {
        Self { destinations, rows }
    }

    /// Origin keys present in the matrix (column 0 of every data row).
    pub fn origin_set(&self) -> HashSet<&str> {
        self.rows.iter().map(|r| r.origin.as_str()).collect()
    }

    /// Destination keys present in the matrix header.
    pub fn destination_set(&self) -> HashSet<&str> {
        self.destinations.iter().map(String::as_str).collect()
    }

    /// Loads the matrix from a CSV file, stripping the trailing derived
    /// columns from every record.
    ///
    /// Returns `Ok(None)` when the file does not exist or is empty. A
    /// malformed file (short records, row length mismatch, non-numeric
    /// minutes) is a [`RaterError::DataIntegrity`] error; callers on the
    /// summary path downgrade that to "absent" to force a refresh.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            debug!(path = %path.display(), "No stored matrix");
            return Ok(None);
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        let mut records: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| RaterError::DataIntegrity(e.to_string()))?;
            records.push(record.iter().map(str::to_string).collect());
        }

        if records.is_empty() {
            return Ok(None);
        }
        Self::from_records(records).map(Some)
    }

    fn from_records(records: Vec<Vec<String>>) -> Result<Self> {
        let header = &records[0];

        // Header is [label, destinations.., derived..]; anything shorter
        // cannot have been written by us.
        if header.len() < DERIVED_COLUMNS.len() + 1 {
            return Err(RaterError::DataIntegrity(format!(
                "header has {} fields, expected at least {}",
                header.len(),
                DERIVED_COLUMNS.len() + 1
            )));
        }
        if header[0] != HEADER_LABEL {
            return Err(RaterError::DataIntegrity(format!(
                "unexpected header label: {}",
                header[0]
            )));
        }

        let raw_width = header.len() - DERIVED_COLUMNS.len();
        let destinations: Vec<String> = header[1..raw_width].to_vec();

        let mut rows = Vec::with_capacity(records.len() - 1);
        for (i, record) in records.iter().enumerate().skip(1) {
            if record.len() != header.len() {
                return Err(RaterError::DataIntegrity(format!(
                    "row {} has {} fields, header has {}",
                    i,
                    record.len(),
                    header.len()
                )));
            }

            let minutes = record[1..raw_width]
                .iter()
                .map(|cell| {
                    cell.parse::<i64>().map_err(|_| {
                        RaterError::DataIntegrity(format!(
                            "row {i}: non-numeric minute value: {cell}"
                        ))
                    })
                })
                .collect::<Result<Vec<i64>>>()?;

            rows.push(MatrixRow {
                origin: record[0].clone(),
                minutes,
            });
        }

        debug!(
            origins = rows.len(),
            destinations = destinations.len(),
            "Loaded stored matrix"
        );
        Ok(Self { destinations, rows })
    }
}

/// The fully extended matrix: raw travel times plus the derived columns,
/// ready to render and persist. All cells are strings at this point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SummaryTable {
    /// Overwrites the stored matrix with this table. Full-file replace, no
    /// append; this is the commit point of a summary run.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&self.header)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        debug!(path = %path.display(), rows = self.rows.len(), "Matrix persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_table() -> SummaryTable {
        SummaryTable {
            header: vec![
                "Apartment".into(),
                "Work".into(),
                "Gym".into(),
                "Walk".into(),
                "Transit".into(),
                "Average".into(),
                "Wt. Average".into(),
            ],
            rows: vec![
                vec![
                    "12 Oak St".into(),
                    "30".into(),
                    "15".into(),
                    "88".into(),
                    "72".into(),
                    "22.5".into(),
                    "25.0".into(),
                ],
                vec![
                    "9 Elm Ave".into(),
                    "45".into(),
                    "10".into(),
                    "NA".into(),
                    "NA".into(),
                    "27.5".into(),
                    "33.3".into(),
                ],
            ],
        }
    }

    #[test]
    fn test_load_missing_file_is_absent() {
        let dir = tempdir().unwrap();
        let loaded = Matrix::load(&dir.path().join("matrix.csv")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_round_trip_strips_derived_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("matrix.csv");
        sample_table().save(&path).unwrap();

        let matrix = Matrix::load(&path).unwrap().unwrap();
        assert_eq!(matrix.destinations, vec!["Work", "Gym"]);
        assert_eq!(matrix.rows.len(), 2);
        assert_eq!(matrix.rows[0].origin, "12 Oak St");
        assert_eq!(matrix.rows[0].minutes, vec![30, 15]);
        assert_eq!(matrix.rows[1].minutes, vec![45, 10]);
    }

    #[test]
    fn test_save_overwrites_previous_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("matrix.csv");
        sample_table().save(&path).unwrap();

        let mut smaller = sample_table();
        smaller.rows.truncate(1);
        smaller.save(&path).unwrap();

        let matrix = Matrix::load(&path).unwrap().unwrap();
        assert_eq!(matrix.rows.len(), 1);
    }

    #[test]
    fn test_row_length_mismatch_is_data_integrity() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("matrix.csv");
        std::fs::write(
            &path,
            "Apartment,Work,Walk,Transit,Average,Wt. Average\n12 Oak St,30,88,72,30.0\n",
        )
        .unwrap();

        assert!(matches!(
            Matrix::load(&path),
            Err(RaterError::DataIntegrity(_))
        ));
    }

    #[test]
    fn test_non_numeric_minutes_is_data_integrity() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("matrix.csv");
        std::fs::write(
            &path,
            "Apartment,Work,Walk,Transit,Average,Wt. Average\n12 Oak St,soon,88,72,30.0,30.0\n",
        )
        .unwrap();

        assert!(matches!(
            Matrix::load(&path),
            Err(RaterError::DataIntegrity(_))
        ));
    }

    #[test]
    fn test_unexpected_header_label_is_data_integrity() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("matrix.csv");
        std::fs::write(
            &path,
            "House,Work,Walk,Transit,Average,Wt. Average\n12 Oak St,30,88,72,30.0,30.0\n",
        )
        .unwrap();

        assert!(matches!(
            Matrix::load(&path),
            Err(RaterError::DataIntegrity(_))
        ));
    }

    #[test]
    fn test_empty_file_is_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("matrix.csv");
        std::fs::write(&path, "").unwrap();
        assert!(Matrix::load(&path).unwrap().is_none());
    }

    #[test]
    fn test_key_sets() {
        let matrix = Matrix::new(
            vec!["Work".into(), "Gym".into()],
            vec![
                MatrixRow {
                    origin: "12 Oak St".into(),
                    minutes: vec![30, 15],
                },
                MatrixRow {
                    origin: "9 Elm Ave".into(),
                    minutes: vec![45, 10],
                },
            ],
        );

        assert_eq!(matrix.origin_set(), ["12 Oak St", "9 Elm Ave"].into());
        assert_eq!(matrix.destination_set(), ["Work", "Gym"].into());
    }
}
