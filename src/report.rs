// 📝 Reporter - render a Summary as readable text
// Formatting only; every number here was computed by the aggregator

use crate::aggregate::{HostListings, PriceStats, Summary};
use std::fmt;

/// Display adapter pairing a [`Summary`] with the name of its source file.
///
/// Section order is fixed: banner, Listing Types, License Status, Hosts With
/// Multiple Listings, Price Summary. Money renders with two decimals,
/// shares with one.
pub struct ReportText<'a> {
    summary: &'a Summary,
    source: &'a str,
}

impl<'a> ReportText<'a> {
    pub fn new(summary: &'a Summary, source: &'a str) -> Self {
        ReportText { summary, source }
    }
}

/// Render the full report to a string, written out in one piece by the
/// caller.
pub fn render(summary: &Summary, source: &str) -> String {
    ReportText::new(summary, source).to_string()
}

fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

impl fmt::Display for ReportText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.summary;
        let total = s.total_listings;

        // Banner
        writeln!(f, "{}", "*".repeat(31))?;
        writeln!(f, "REPORT FOR {}", self.source)?;
        if let Some(date) = s.data_as_of {
            writeln!(f, "(Data as of {})", date)?;
        }
        writeln!(f, "{}", "*".repeat(31))?;
        writeln!(f)?;
        writeln!(f, "Total listings: {}", total)?;
        writeln!(f)?;

        self.fmt_listing_types(f)?;
        self.fmt_license_status(f)?;
        self.fmt_multi_listing_hosts(f)?;
        self.fmt_price_summary(f)?;

        Ok(())
    }
}

impl ReportText<'_> {
    fn fmt_listing_types(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.summary;
        let total = s.total_listings;

        writeln!(f, "----- Listing Types -----")?;

        // Count descending, ties alphabetical
        let mut types: Vec<(&String, &usize)> = s.room_type_counts.iter().collect();
        types.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
        for (room_type, count) in types {
            writeln!(
                f,
                "{:<15}: {} ({:.1}%)",
                room_type,
                count,
                pct(*count, total)
            )?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "Short-term rentals : {} ({:.1}%)",
            s.short_term,
            pct(s.short_term, total)
        )?;
        writeln!(
            f,
            "Longer-term rentals: {} ({:.1}%)",
            s.long_term,
            pct(s.long_term, total)
        )?;
        writeln!(f)
    }

    fn fmt_license_status(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.summary;
        let total = s.total_listings;
        let counts = &s.license_counts;

        writeln!(f, "----- License Status -----")?;

        let missing_or_pending = counts.unlicensed + counts.pending;
        writeln!(
            f,
            "At least {} current listings are unlicensed ({:.1}%); {} with no license, {} pending",
            missing_or_pending,
            pct(missing_or_pending, total),
            counts.unlicensed,
            counts.pending
        )?;

        let mut buckets = counts.as_pairs();
        buckets.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        for (name, count) in buckets {
            writeln!(f, "{:<10}: {}", name, count)?;
        }
        writeln!(f)
    }

    fn fmt_multi_listing_hosts(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.summary;
        let total = s.total_listings;

        writeln!(f, "----- Hosts With Multiple Listings -----")?;

        if s.multi_listing_hosts.is_empty() {
            writeln!(f, "No host has more than one listing.")?;
        } else {
            for host in &s.multi_listing_hosts {
                writeln!(f, "{}", host_line(host))?;
            }
        }

        writeln!(
            f,
            "Listings by multi-listing hosts: {} out of {} total listings ({:.1}%)",
            s.multi_listing_total,
            total,
            pct(s.multi_listing_total, total)
        )?;
        writeln!(f)?;

        for (i, count) in s.listings_by_host_size.iter().enumerate().take(9) {
            writeln!(f, "Listings by hosts with {} listings  : {}", i + 1, count)?;
        }
        writeln!(
            f,
            "Listings by hosts with 10+ listings: {}",
            s.listings_by_host_size[9]
        )?;
        writeln!(f)?;

        writeln!(f, "Top {} hosts by listing count:", s.top_hosts.len())?;
        for host in &s.top_hosts {
            writeln!(f, "{:<17} has {}", host.host_name, host.listing_count)?;
        }
        writeln!(f)
    }

    fn fmt_price_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.summary;

        writeln!(f, "----- Price Summary -----")?;

        let stats = match &s.price_stats {
            Some(stats) => stats,
            None => {
                return writeln!(
                    f,
                    "No listings have a usable price; price statistics unavailable."
                );
            }
        };

        writeln!(
            f,
            "{} of {} listings have a listed price",
            stats.count, s.total_listings
        )?;
        writeln!(f, "Minimum listing price ${:.2}", stats.min)?;
        writeln!(f, "Maximum listing price ${:.2}", stats.max)?;
        writeln!(f, "Average listing price ${:.2}", stats.mean)?;
        writeln!(f, "Median listing price  ${:.2}", stats.median)?;

        if !s.price_stats_by_type.is_empty() {
            writeln!(f)?;
            writeln!(f, "By room type:")?;
            for (room_type, stats) in &s.price_stats_by_type {
                writeln!(f, "{:<15}: {}", room_type, type_price_line(stats))?;
            }
        }

        Ok(())
    }
}

fn host_line(host: &HostListings) -> String {
    format!(
        "{:<17} (host {}): {} listings",
        host.host_name, host.host_id, host.listing_count
    )
}

fn type_price_line(stats: &PriceStats) -> String {
    format!(
        "{} priced, min ${:.2}, max ${:.2}, avg ${:.2}, median ${:.2}",
        stats.count, stats.min, stats.max, stats.mean, stats.median
    )
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::summarize;
    use crate::model::Listing;
    use chrono::NaiveDate;

    fn listing(id: u64, host_id: u64, room_type: &str, price: Option<f64>) -> Listing {
        Listing {
            id,
            name: format!("Listing {}", id),
            host_id,
            host_name: format!("Host {}", host_id),
            neighbourhood: "Lakeview".to_string(),
            room_type: room_type.to_string(),
            price,
            minimum_nights: Some(2),
            last_review: None,
            license: String::new(),
        }
    }

    fn sample_report() -> String {
        let mut listings = vec![
            listing(1, 1, "Private room", Some(50.0)),
            listing(2, 1, "Private room", Some(70.0)),
            listing(3, 2, "Entire home/apt", Some(120.0)),
        ];
        listings[0].last_review = NaiveDate::from_ymd_opt(2024, 12, 18);

        render(&summarize(&listings), "chicago_listings.csv")
    }

    #[test]
    fn test_sections_appear_in_order() {
        let report = sample_report();
        println!("{}", report);

        let types = report.find("----- Listing Types -----").unwrap();
        let license = report.find("----- License Status -----").unwrap();
        let hosts = report
            .find("----- Hosts With Multiple Listings -----")
            .unwrap();
        let prices = report.find("----- Price Summary -----").unwrap();

        assert!(types < license);
        assert!(license < hosts);
        assert!(hosts < prices);
    }

    #[test]
    fn test_banner_carries_source_and_date() {
        let report = sample_report();

        assert!(report.contains("REPORT FOR chicago_listings.csv"));
        assert!(report.contains("(Data as of 2024-12-18)"));
        assert!(report.contains("Total listings: 3"));
    }

    #[test]
    fn test_prices_round_to_two_decimals() {
        let report = sample_report();

        assert!(report.contains("Minimum listing price $50.00"));
        assert!(report.contains("Maximum listing price $120.00"));
        assert!(report.contains("Average listing price $80.00"));
        assert!(report.contains("Median listing price  $70.00"));
    }

    #[test]
    fn test_multi_listing_table_rows() {
        let report = sample_report();

        assert!(report.contains("(host 1): 2 listings"));
        assert!(report.contains("Listings by multi-listing hosts: 2 out of 3"));
    }

    #[test]
    fn test_type_shares() {
        let report = sample_report();

        assert!(report.contains("Private room   : 2 (66.7%)"));
        assert!(report.contains("Entire home/apt: 1 (33.3%)"));
    }

    #[test]
    fn test_no_prices_message() {
        let listings = vec![
            listing(1, 1, "Private room", None),
            listing(2, 2, "Private room", None),
        ];

        let report = render(&summarize(&listings), "listings.csv");

        assert!(report.contains("No listings have a usable price"));
        assert!(!report.contains("Average listing price"));
    }

    #[test]
    fn test_no_multi_hosts_message() {
        let listings = vec![
            listing(1, 1, "Private room", Some(40.0)),
            listing(2, 2, "Private room", Some(60.0)),
        ];

        let report = render(&summarize(&listings), "listings.csv");
        assert!(report.contains("No host has more than one listing."));
    }

    #[test]
    fn test_per_type_price_lines() {
        let report = sample_report();

        assert!(report.contains("By room type:"));
        assert!(report
            .contains("Private room   : 2 priced, min $50.00, max $70.00, avg $60.00, median $60.00"));
    }

    #[test]
    fn test_banner_without_reviews_omits_date_line() {
        let listings = vec![listing(1, 1, "Private room", Some(40.0))];

        let report = render(&summarize(&listings), "listings.csv");
        assert!(!report.contains("(Data as of"));
    }
}
