//! Loaders for the origin and destination input files.

use crate::error::{RaterError, Result};
use crate::location::{Location, TravelMode};
use std::collections::HashSet;
use std::path::Path;

/// Reads origin addresses, one per line. Blank lines are skipped.
pub fn load_origins(path: &Path) -> Result<Vec<Location>> {
    let content = std::fs::read_to_string(path)?;
    let origins: Vec<Location> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Location::origin)
        .collect();

    if origins.is_empty() {
        return Err(RaterError::InvalidInput(format!(
            "no origins in {}",
            path.display()
        )));
    }
    Ok(origins)
}

/// Reads destinations from a headerless CSV: name, address, comment,
/// weight, optional mode (defaults to transit).
///
/// Destination names must be unique; the weighted average matches weights
/// to durations by name, so a duplicate would be ambiguous.
pub fn load_destinations(path: &Path) -> Result<Vec<Location>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut destinations = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() < 4 {
            return Err(RaterError::InvalidInput(format!(
                "destination record {} has {} fields, expected at least 4",
                i,
                record.len()
            )));
        }

        let name = record[0].trim();
        let address = record[1].trim();
        let comment = match record[2].trim() {
            "" => None,
            c => Some(c.to_string()),
        };
        let weight: f64 = record[3].trim().parse().map_err(|_| {
            RaterError::InvalidInput(format!("destination {name}: bad weight: {}", &record[3]))
        })?;
        if weight <= 0.0 {
            return Err(RaterError::InvalidInput(format!(
                "destination {name}: weight must be positive, got {weight}"
            )));
        }

        let mode = match record.get(4).map(str::trim) {
            Some(m) if !m.is_empty() => m.parse::<TravelMode>()?,
            _ => TravelMode::default(),
        };

        destinations.push(Location::destination(name, address, comment, weight, mode));
    }

    if destinations.is_empty() {
        return Err(RaterError::InvalidInput(format!(
            "no destinations in {}",
            path.display()
        )));
    }

    let mut seen = HashSet::new();
    for destination in &destinations {
        if !seen.insert(destination.name.as_str()) {
            return Err(RaterError::InvalidInput(format!(
                "duplicate destination name: {}",
                destination.name
            )));
        }
    }

    Ok(destinations)
}
