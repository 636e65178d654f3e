// 🏠 Listing Model - Inside Airbnb row types
// Raw CSV rows and the validated listing record they normalize into

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum-nights threshold separating short-term from longer-term rentals.
/// Chicago's shared-housing rules treat stays under 30 nights as short-term.
pub const SHORT_TERM_NIGHTS: u32 = 30;

// ============================================================================
// RAW ROW
// ============================================================================

/// RawListing - one CSV row exactly as exported by Inside Airbnb.
///
/// Everything stays a string here; normalization and validation happen in
/// [`Listing::from_raw`]. Columns not listed (latitude, review counts, ...)
/// are ignored during deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListing {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub host_id: String,

    #[serde(default)]
    pub host_name: String,

    #[serde(default)]
    pub neighbourhood: String,

    #[serde(default)]
    pub room_type: String,

    #[serde(default)]
    pub price: String,

    #[serde(default)]
    pub minimum_nights: String,

    #[serde(default)]
    pub last_review: String,

    #[serde(default)]
    pub license: String,
}

// ============================================================================
// ROW ISSUES
// ============================================================================

/// A problem found while normalizing a single row.
///
/// Fatal issues (returned as `Err` from [`Listing::from_raw`]) mean the row
/// cannot become a record. Non-fatal issues degrade one field (e.g. an
/// unparseable price becomes "no price") while the record itself is kept.
#[derive(Debug, Clone)]
pub struct RowIssue {
    pub line: u64,
    pub field: &'static str,
    pub message: String,
}

impl RowIssue {
    pub fn new(line: u64, field: &'static str, message: String) -> Self {
        RowIssue {
            line,
            field,
            message,
        }
    }
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: [{}] {}", self.line, self.field, self.message)
    }
}

// ============================================================================
// LICENSE STATUS
// ============================================================================

/// License classification for a listing, per the city registration rules:
/// an empty entry is unlicensed, anything mentioning "pending" is pending,
/// the 32+/32- markers are exempt, and the rest count as licensed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LicenseStatus {
    Unlicensed,
    Pending,
    Exempt,
    Licensed,
}

impl LicenseStatus {
    /// Human-readable name for display
    pub fn name(&self) -> &str {
        match self {
            LicenseStatus::Unlicensed => "unlicensed",
            LicenseStatus::Pending => "pending",
            LicenseStatus::Exempt => "exempt",
            LicenseStatus::Licensed => "licensed",
        }
    }

    /// Classify a raw license entry. Rules are checked in order and the
    /// first match wins.
    pub fn classify(license: &str) -> Self {
        let entry = license.trim();

        if entry.is_empty() {
            return LicenseStatus::Unlicensed;
        }

        if entry.to_lowercase().contains("pending") {
            return LicenseStatus::Pending;
        }

        const EXEMPT_MARKERS: [&str; 4] = ["32+", "32-", "32 +", "32 -"];
        if EXEMPT_MARKERS.iter().any(|m| entry.contains(m)) {
            return LicenseStatus::Exempt;
        }

        LicenseStatus::Licensed
    }
}

// ============================================================================
// LISTING RECORD
// ============================================================================

/// Listing - one validated row of the dataset.
///
/// Immutable after load. `id` is unique across the loaded dataset (the
/// loader drops later duplicates), `price` is `None` or non-negative, and
/// `room_type` is non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: u64,
    pub name: String,
    pub host_id: u64,
    pub host_name: String,
    pub neighbourhood: String,
    pub room_type: String,
    pub price: Option<f64>,
    pub minimum_nights: Option<u32>,
    pub last_review: Option<NaiveDate>,
    pub license: String,
}

impl Listing {
    /// Normalize a raw CSV row into a record.
    ///
    /// Returns the record plus any non-fatal field issues, or a single fatal
    /// issue when a required field (`id`, `host_id`, `room_type`) is missing
    /// or garbled.
    pub fn from_raw(raw: &RawListing, line: u64) -> Result<(Listing, Vec<RowIssue>), RowIssue> {
        let mut issues = Vec::new();

        let id = raw.id.trim().parse::<u64>().map_err(|_| {
            RowIssue::new(line, "id", format!("invalid listing id {:?}", raw.id))
        })?;

        let host_id = raw.host_id.trim().parse::<u64>().map_err(|_| {
            RowIssue::new(line, "host_id", format!("invalid host id {:?}", raw.host_id))
        })?;

        let room_type = raw.room_type.trim();
        if room_type.is_empty() {
            return Err(RowIssue::new(
                line,
                "room_type",
                "missing room type".to_string(),
            ));
        }

        let price = match parse_price(&raw.price) {
            Ok(price) => price,
            Err(message) => {
                issues.push(RowIssue::new(line, "price", message));
                None
            }
        };

        let minimum_nights = match parse_minimum_nights(&raw.minimum_nights) {
            Ok(nights) => nights,
            Err(message) => {
                issues.push(RowIssue::new(line, "minimum_nights", message));
                None
            }
        };

        let last_review = match parse_review_date(&raw.last_review) {
            Ok(date) => date,
            Err(message) => {
                issues.push(RowIssue::new(line, "last_review", message));
                None
            }
        };

        let listing = Listing {
            id,
            name: raw.name.trim().to_string(),
            host_id,
            host_name: raw.host_name.trim().to_string(),
            neighbourhood: raw.neighbourhood.trim().to_string(),
            room_type: room_type.to_string(),
            price,
            minimum_nights,
            last_review,
            license: raw.license.trim().to_string(),
        };

        Ok((listing, issues))
    }

    /// A short-term rental requires strictly fewer than 30 nights. Records
    /// without a usable minimum-nights value count as longer-term.
    pub fn is_short_term(&self) -> bool {
        matches!(self.minimum_nights, Some(n) if n < SHORT_TERM_NIGHTS)
    }

    pub fn license_status(&self) -> LicenseStatus {
        LicenseStatus::classify(&self.license)
    }
}

// ============================================================================
// FIELD NORMALIZATION
// ============================================================================

/// Parse a price cell. Empty means "no price listed". A leading `$` and
/// thousands commas are tolerated. Negative or non-finite values are
/// rejected so price statistics stay meaningful.
fn parse_price(raw: &str) -> Result<Option<f64>, String> {
    let cell = raw.trim();
    if cell.is_empty() {
        return Ok(None);
    }

    let cleaned = cell.strip_prefix('$').unwrap_or(cell).replace(',', "");
    match cleaned.parse::<f64>() {
        Ok(value) if value < 0.0 => Err(format!("negative price {:?}", raw)),
        Ok(value) if !value.is_finite() => Err(format!("non-finite price {:?}", raw)),
        Ok(value) => Ok(Some(value)),
        Err(_) => Err(format!("unparseable price {:?}", raw)),
    }
}

fn parse_minimum_nights(raw: &str) -> Result<Option<u32>, String> {
    let cell = raw.trim();
    if cell.is_empty() {
        return Ok(None);
    }

    cell.parse::<u32>()
        .map(Some)
        .map_err(|_| format!("unparseable minimum nights {:?}", raw))
}

/// Review dates are YYYY-MM-DD in the export; MM/DD/YYYY is accepted too
/// since older extracts used it.
fn parse_review_date(raw: &str) -> Result<Option<NaiveDate>, String> {
    let cell = raw.trim();
    if cell.is_empty() {
        return Ok(None);
    }

    if let Ok(date) = NaiveDate::parse_from_str(cell, "%Y-%m-%d") {
        return Ok(Some(date));
    }

    if let Ok(date) = NaiveDate::parse_from_str(cell, "%m/%d/%Y") {
        return Ok(Some(date));
    }

    Err(format!("unparseable review date {:?}", raw))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_row() -> RawListing {
        RawListing {
            id: "101".to_string(),
            name: "Cozy loft".to_string(),
            host_id: "7".to_string(),
            host_name: "Dana".to_string(),
            neighbourhood: "Lincoln Park".to_string(),
            room_type: "Private room".to_string(),
            price: "75".to_string(),
            minimum_nights: "2".to_string(),
            last_review: "2024-11-03".to_string(),
            license: "R17-000123".to_string(),
        }
    }

    #[test]
    fn test_from_raw_valid_row() {
        let (listing, issues) = Listing::from_raw(&raw_row(), 2).unwrap();

        assert!(issues.is_empty());
        assert_eq!(listing.id, 101);
        assert_eq!(listing.host_id, 7);
        assert_eq!(listing.room_type, "Private room");
        assert_eq!(listing.price, Some(75.0));
        assert_eq!(listing.minimum_nights, Some(2));
        assert_eq!(
            listing.last_review,
            NaiveDate::from_ymd_opt(2024, 11, 3)
        );
    }

    #[test]
    fn test_from_raw_rejects_bad_id() {
        let mut raw = raw_row();
        raw.id = "not-a-number".to_string();

        let err = Listing::from_raw(&raw, 5).unwrap_err();
        assert_eq!(err.field, "id");
        assert_eq!(err.line, 5);
    }

    #[test]
    fn test_from_raw_rejects_missing_room_type() {
        let mut raw = raw_row();
        raw.room_type = "  ".to_string();

        let err = Listing::from_raw(&raw, 9).unwrap_err();
        assert_eq!(err.field, "room_type");
    }

    #[test]
    fn test_from_raw_keeps_row_with_bad_price() {
        let mut raw = raw_row();
        raw.price = "cheap".to_string();

        let (listing, issues) = Listing::from_raw(&raw, 3).unwrap();
        assert_eq!(listing.price, None);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "price");
    }

    #[test]
    fn test_parse_price_variants() {
        assert_eq!(parse_price(""), Ok(None));
        assert_eq!(parse_price("  "), Ok(None));
        assert_eq!(parse_price("120"), Ok(Some(120.0)));
        assert_eq!(parse_price("$1,250.50"), Ok(Some(1250.5)));
        assert!(parse_price("-45").is_err());
        assert!(parse_price("free").is_err());
    }

    #[test]
    fn test_parse_review_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 12, 18);
        assert_eq!(parse_review_date("2024-12-18"), Ok(expected));
        assert_eq!(parse_review_date("12/18/2024"), Ok(expected));
        assert_eq!(parse_review_date(""), Ok(None));
        assert!(parse_review_date("yesterday").is_err());
    }

    #[test]
    fn test_short_term_threshold() {
        let (mut listing, _) = Listing::from_raw(&raw_row(), 2).unwrap();

        listing.minimum_nights = Some(29);
        assert!(listing.is_short_term());

        listing.minimum_nights = Some(30);
        assert!(!listing.is_short_term());

        listing.minimum_nights = None;
        assert!(!listing.is_short_term());
    }

    #[test]
    fn test_license_classification() {
        assert_eq!(LicenseStatus::classify(""), LicenseStatus::Unlicensed);
        assert_eq!(LicenseStatus::classify("   "), LicenseStatus::Unlicensed);
        assert_eq!(
            LicenseStatus::classify("Pending approval"),
            LicenseStatus::Pending
        );
        assert_eq!(
            LicenseStatus::classify("City registration PENDING"),
            LicenseStatus::Pending
        );
        assert_eq!(LicenseStatus::classify("32+0001234"), LicenseStatus::Exempt);
        assert_eq!(
            LicenseStatus::classify("Exempt: 32 - hotel"),
            LicenseStatus::Exempt
        );
        assert_eq!(
            LicenseStatus::classify("R17-000123"),
            LicenseStatus::Licensed
        );
    }

    #[test]
    fn test_license_status_names() {
        assert_eq!(LicenseStatus::Unlicensed.name(), "unlicensed");
        assert_eq!(LicenseStatus::Pending.name(), "pending");
        assert_eq!(LicenseStatus::Exempt.name(), "exempt");
        assert_eq!(LicenseStatus::Licensed.name(), "licensed");
    }
}
