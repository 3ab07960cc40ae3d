//! The summary run: load, staleness check, refresh or reuse, extend,
//! persist.
//!
//! A run moves through fixed stages. The stored matrix is read first; the
//! staleness check decides between reusing its raw travel times and
//! refetching them; the derived columns are then recomputed either way;
//! and only a fully extended matrix is written back. Any fetch failure
//! aborts before the write, so the previous file is never partially
//! overwritten.

use crate::aggregate::{mean, weighted_mean};
use crate::distance::{fetch_distances, next_monday_nine_am};
use crate::error::{RaterError, Result};
use crate::location::Location;
use crate::matrix::{DERIVED_COLUMNS, HEADER_LABEL, Matrix, SummaryTable};
use crate::scores::fetch_scores;
use crate::services::api::{DistanceApi, GeocodeApi, ScoreApi};
use crate::staleness::is_dirty;
use chrono::Local;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{info, warn};

/// Runs one full summary pass and returns the extended matrix that was
/// persisted to `matrix_path`.
///
/// `force` skips the staleness check and always refetches travel times.
pub fn summary<D, G, S>(
    distance_api: &D,
    geocoder: &G,
    scorer: &S,
    origins: &[Location],
    destinations: &[Location],
    matrix_path: &Path,
    force: bool,
) -> Result<SummaryTable>
where
    D: DistanceApi,
    G: GeocodeApi,
    S: ScoreApi,
{
    // LOADED. A malformed file forces a refresh instead of failing the run.
    let stored = match Matrix::load(matrix_path) {
        Ok(matrix) => matrix,
        Err(RaterError::DataIntegrity(msg)) => {
            warn!(error = %msg, "Stored matrix unreadable, treating as absent");
            None
        }
        Err(e) => return Err(e),
    };

    // CHECK. Origins are keyed by address, destinations by display name.
    let origin_addresses: Vec<String> = origins.iter().map(|o| o.address.clone()).collect();
    let origin_keys: HashSet<&str> = origin_addresses.iter().map(String::as_str).collect();
    let destination_keys: HashSet<&str> = destinations.iter().map(|d| d.name.as_str()).collect();

    let refresh = force || is_dirty(&origin_keys, &destination_keys, stored.as_ref());

    // REUSE or REFRESH.
    let raw = match (refresh, stored) {
        (false, Some(matrix)) => {
            info!("Stored matrix is current, reusing raw travel times");
            matrix
        }
        _ => {
            let departure = next_monday_nine_am(Local::now());
            info!(force, departure = %departure, "Fetching fresh travel times");
            fetch_distances(distance_api, &origin_addresses, destinations, departure)?
        }
    };

    // EXTEND. Weights are matched to durations by header destination name,
    // not by position, so a reordered destination list cannot shift a
    // weight onto the wrong column.
    let weight_by_name: HashMap<&str, f64> = destinations
        .iter()
        .map(|d| (d.name.as_str(), d.weight))
        .collect();
    let ordered_weights: Vec<f64> = raw
        .destinations
        .iter()
        .map(|name| {
            weight_by_name.get(name.as_str()).copied().ok_or_else(|| {
                RaterError::Precondition(format!("no weight for destination {name}"))
            })
        })
        .collect::<Result<_>>()?;

    info!(origins = raw.rows.len(), "Computing derived columns");
    let mut header = Vec::with_capacity(raw.destinations.len() + DERIVED_COLUMNS.len() + 1);
    header.push(HEADER_LABEL.to_string());
    header.extend(raw.destinations.iter().cloned());
    header.extend(DERIVED_COLUMNS.iter().map(|c| c.to_string()));

    let mut rows = Vec::with_capacity(raw.rows.len());
    for row in &raw.rows {
        let scores = fetch_scores(geocoder, scorer, &row.origin)?;
        let average = mean(&row.minutes)?;
        let weighted = weighted_mean(&row.minutes, &ordered_weights)?;

        let mut cells = Vec::with_capacity(header.len());
        cells.push(row.origin.clone());
        cells.extend(row.minutes.iter().map(i64::to_string));
        cells.push(score_cell(scores.walk));
        cells.push(score_cell(scores.transit));
        cells.push(format!("{average:.1}"));
        cells.push(format!("{weighted:.1}"));
        rows.push(cells);
    }

    // PERSISTED. Full-file replace; this is the commit point.
    let table = SummaryTable { header, rows };
    table.save(matrix_path)?;
    Ok(table)
}

/// Renders a score cell. Whole scores print without a decimal point; a
/// missing score is the `NA` sentinel, never zero.
fn score_cell(score: Option<f64>) -> String {
    match score {
        Some(value) if value.fract() == 0.0 => format!("{value:.0}"),
        Some(value) => value.to_string(),
        None => "NA".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_cell_whole_number() {
        assert_eq!(score_cell(Some(88.0)), "88");
    }

    #[test]
    fn test_score_cell_zero_is_not_na() {
        assert_eq!(score_cell(Some(0.0)), "0");
    }

    #[test]
    fn test_score_cell_missing_is_na() {
        assert_eq!(score_cell(None), "NA");
    }
}
