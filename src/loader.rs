// 📂 Loader - CSV ingestion with row-level validation
// Reads an Inside Airbnb export into memory; one pass, read-only

use crate::model::{Listing, RawListing, RowIssue};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Columns the header must carry for a file to count as a listings export.
const REQUIRED_COLUMNS: [&str; 4] = ["id", "host_id", "room_type", "price"];

// ============================================================================
// ERRORS
// ============================================================================

/// Errors surfaced by the loader. None of these are retried; the caller
/// reports the message and exits non-zero.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input path does not exist on disk.
    #[error("input file not found: {path}")]
    FileNotFound { path: String },

    /// The file exists but cannot be parsed into listing records.
    #[error("could not parse {path}: {reason}")]
    DataFormat { path: String, reason: String },

    /// The file parsed but yielded zero valid records.
    #[error("{path} contains no valid listing rows")]
    EmptyDataset { path: String },
}

// ============================================================================
// ROW POLICY
// ============================================================================

/// What to do with a row that cannot become a record.
///
/// `SkipInvalid` (the default) records a warning per malformed or
/// duplicate-id row and keeps going; the load only fails if nothing valid
/// remains. `Strict` fails the whole load on the first such row. Field-level
/// degradations (an unparseable price becoming "no price") are warnings
/// under both policies, never load failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowPolicy {
    #[default]
    SkipInvalid,
    Strict,
}

// ============================================================================
// LOADED DATASET
// ============================================================================

/// The result of a successful load: the records plus everything the loader
/// had to complain about along the way. The loader itself never prints;
/// where the warnings go is the caller's call.
#[derive(Debug)]
pub struct LoadedDataset {
    pub listings: Vec<Listing>,
    pub warnings: Vec<RowIssue>,
    pub skipped_rows: usize,
}

// ============================================================================
// LOADING
// ============================================================================

/// Load a listings CSV from `path`.
///
/// The file is opened read-only and released when this returns. Rows
/// deserialize into [`RawListing`] and normalize via [`Listing::from_raw`];
/// a later row reusing an already-seen listing id is dropped as a duplicate.
pub fn load_listings(path: &Path, policy: RowPolicy) -> Result<LoadedDataset, LoadError> {
    let display_path = path.display().to_string();

    if !path.exists() {
        return Err(LoadError::FileNotFound { path: display_path });
    }

    let mut rdr = csv::Reader::from_path(path).map_err(|e| LoadError::DataFormat {
        path: display_path.clone(),
        reason: e.to_string(),
    })?;

    // Header check first: a file without the expected columns is a format
    // error, not an empty dataset.
    let headers = rdr.headers().map_err(|e| LoadError::DataFormat {
        path: display_path.clone(),
        reason: format!("no parsable header: {}", e),
    })?;

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h.trim() == **col))
        .copied()
        .collect();

    if !missing.is_empty() {
        return Err(LoadError::DataFormat {
            path: display_path,
            reason: format!("missing required column(s): {}", missing.join(", ")),
        });
    }

    let mut listings = Vec::new();
    let mut warnings = Vec::new();
    let mut skipped_rows = 0usize;
    let mut seen_ids = HashSet::new();

    for (idx, result) in rdr.deserialize::<RawListing>().enumerate() {
        // +2 because rows are 1-indexed and the header occupies line 1
        let line = (idx + 2) as u64;

        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                let issue = RowIssue::new(line, "row", format!("unreadable row: {}", e));
                skip_or_fail(issue, policy, &display_path, &mut warnings, &mut skipped_rows)?;
                continue;
            }
        };

        let (listing, issues) = match Listing::from_raw(&raw, line) {
            Ok(ok) => ok,
            Err(issue) => {
                skip_or_fail(issue, policy, &display_path, &mut warnings, &mut skipped_rows)?;
                continue;
            }
        };

        if !seen_ids.insert(listing.id) {
            let issue = RowIssue::new(
                line,
                "id",
                format!("duplicate listing id {}", listing.id),
            );
            skip_or_fail(issue, policy, &display_path, &mut warnings, &mut skipped_rows)?;
            continue;
        }

        warnings.extend(issues);
        listings.push(listing);
    }

    if listings.is_empty() {
        return Err(LoadError::EmptyDataset { path: display_path });
    }

    Ok(LoadedDataset {
        listings,
        warnings,
        skipped_rows,
    })
}

/// Under `SkipInvalid` the issue becomes a warning; under `Strict` it sinks
/// the whole load.
fn skip_or_fail(
    issue: RowIssue,
    policy: RowPolicy,
    path: &str,
    warnings: &mut Vec<RowIssue>,
    skipped_rows: &mut usize,
) -> Result<(), LoadError> {
    match policy {
        RowPolicy::SkipInvalid => {
            warnings.push(issue);
            *skipped_rows += 1;
            Ok(())
        }
        RowPolicy::Strict => Err(LoadError::DataFormat {
            path: path.to_string(),
            reason: issue.to_string(),
        }),
    }
}

// ============================================================================
// TESTS
// ============================================================================
