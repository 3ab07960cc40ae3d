//! Mode-grouped distance fetching.
//!
//! Destinations are partitioned by travel mode, one distance matrix query
//! is issued per mode group, and the per-group results are reassembled
//! into the canonical column order of the current destination list. The
//! grouping and reassembly stages are independent of the HTTP layer so
//! each can be tested on its own.

use crate::error::{RaterError, Result};
use crate::location::{Location, TravelMode};
use crate::matrix::{Matrix, MatrixRow};
use crate::services::api::DistanceApi;
use chrono::{DateTime, Datelike, Days, Local, LocalResult, NaiveTime, TimeZone, Weekday};
use std::collections::HashMap;
use tracing::info;

/// The fixed reference departure time: next upcoming Monday at 09:00 local.
///
/// A stable weekday-morning instant keeps transit schedules comparable
/// between runs and between mode groups. If today is a Monday the
/// following one is used, so the instant is always in the future.
pub fn next_monday_nine_am(now: DateTime<Local>) -> DateTime<Local> {
    let today = now.weekday().num_days_from_monday();
    let days_ahead = (Weekday::Mon.num_days_from_monday() + 7 - today) % 7;
    let days_ahead = if days_ahead == 0 { 7 } else { days_ahead };

    let date = now.date_naive() + Days::new(days_ahead as u64);
    let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default();
    match Local.from_local_datetime(&date.and_time(nine)) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
        // 09:00 skipped by a DST transition; fall back to the raw offset of now
        LocalResult::None => now + Days::new(days_ahead as u64),
    }
}

/// Partitions destinations into disjoint mode groups. No order is
/// guaranteed across groups; within a group, input order is preserved.
pub(crate) fn group_by_mode(destinations: &[Location]) -> HashMap<TravelMode, Vec<&Location>> {
    let mut by_mode: HashMap<TravelMode, Vec<&Location>> = HashMap::new();
    for destination in destinations {
        by_mode.entry(destination.mode).or_default().push(destination);
    }
    by_mode
}

/// Fetches the dense origin × destination minute matrix.
///
/// Any mode group whose query reports a non-`"OK"` status fails the whole
/// fetch; partial results are never returned.
pub fn fetch_distances<D: DistanceApi>(
    api: &D,
    origins: &[String],
    destinations: &[Location],
    departure: DateTime<Local>,
) -> Result<Matrix> {
    let mut minutes_by_cell: HashMap<(String, String), i64> = HashMap::new();

    for (mode, group) in group_by_mode(destinations) {
        let addresses: Vec<String> = group.iter().map(|d| d.address.clone()).collect();
        info!(
            mode = %mode,
            origins = origins.len(),
            destinations = addresses.len(),
            departure = %departure,
            "Querying distance matrix"
        );

        let response = api.distance_matrix(origins, &addresses, mode, departure)?;
        if response.status != "OK" {
            return Err(RaterError::ServiceStatus {
                service: "distance matrix",
                status: response.status,
            });
        }

        for (i, row) in response.rows.iter().enumerate() {
            let origin = origins.get(i).ok_or_else(|| {
                RaterError::DataIntegrity(format!(
                    "distance response has more rows than origins ({})",
                    origins.len()
                ))
            })?;

            for (j, element) in row.elements.iter().enumerate() {
                let destination = group.get(j).ok_or_else(|| {
                    RaterError::DataIntegrity(format!(
                        "distance row has more elements than destinations ({})",
                        group.len()
                    ))
                })?;

                let duration = element.duration.as_ref().ok_or_else(|| {
                    RaterError::ServiceStatus {
                        service: "distance matrix",
                        status: element
                            .status
                            .clone()
                            .unwrap_or_else(|| "MISSING_DURATION".to_string()),
                    }
                })?;

                minutes_by_cell.insert(
                    (origin.clone(), destination.name.clone()),
                    duration.value / 60,
                );
            }
        }
    }

    let names: Vec<String> = destinations.iter().map(|d| d.name.clone()).collect();
    assemble(origins, &names, &minutes_by_cell)
}

/// Reassembles per-group results into the canonical column order: header
/// destinations in input-list order, rows in origin input order.
pub(crate) fn assemble(
    origins: &[String],
    destination_names: &[String],
    minutes_by_cell: &HashMap<(String, String), i64>,
) -> Result<Matrix> {
    let mut rows = Vec::with_capacity(origins.len());
    for origin in origins {
        let minutes = destination_names
            .iter()
            .map(|name| {
                minutes_by_cell
                    .get(&(origin.clone(), name.clone()))
                    .copied()
                    .ok_or_else(|| {
                        RaterError::DataIntegrity(format!(
                            "no duration for origin {origin} to destination {name}"
                        ))
                    })
            })
            .collect::<Result<Vec<i64>>>()?;

        rows.push(MatrixRow {
            origin: origin.clone(),
            minutes,
        });
    }

    Ok(Matrix::new(destination_names.to_vec(), rows))
}
