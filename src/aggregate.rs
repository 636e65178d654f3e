// 📊 Aggregator - Summary statistics over loaded listings
// Pure transformation from records to a Summary; no I/O, no state

use crate::model::{LicenseStatus, Listing};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// How many hosts the "top hosts" table keeps.
const TOP_HOSTS: usize = 10;

/// Host-size histogram slots: exactly 1..=9 listings, last slot is 10+.
const HOST_SIZE_SLOTS: usize = 10;

// ============================================================================
// PRICE STATISTICS
// ============================================================================

/// Price statistics over listings with a usable price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

impl PriceStats {
    /// `None` when no prices exist; statistics over an empty set are
    /// undefined, not an error.
    pub fn from_prices(prices: &[f64]) -> Option<PriceStats> {
        if prices.is_empty() {
            return None;
        }

        let mut sorted = prices.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let sum: f64 = sorted.iter().sum();
        let median = if count % 2 == 1 {
            sorted[count / 2]
        } else {
            (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
        };

        Some(PriceStats {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean: sum / count as f64,
            median,
        })
    }
}

// ============================================================================
// HOST GROUPS
// ============================================================================

/// One host and how many listings they operate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostListings {
    pub host_id: u64,
    pub host_name: String,
    pub listing_count: usize,
}

// ============================================================================
// LICENSE BUCKETS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LicenseCounts {
    pub unlicensed: usize,
    pub pending: usize,
    pub exempt: usize,
    pub licensed: usize,
}

impl LicenseCounts {
    pub fn total(&self) -> usize {
        self.unlicensed + self.pending + self.exempt + self.licensed
    }

    /// Bucket name/count pairs, in declaration order.
    pub fn as_pairs(&self) -> [(&'static str, usize); 4] {
        [
            ("unlicensed", self.unlicensed),
            ("pending", self.pending),
            ("exempt", self.exempt),
            ("licensed", self.licensed),
        ]
    }
}

// ============================================================================
// SUMMARY
// ============================================================================

/// Everything the report needs, computed fresh each run. Serializable so the
/// CLI can dump it as JSON instead of text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub total_listings: usize,

    /// Room type → listing count. Every record counts toward its type,
    /// including types that appear once.
    pub room_type_counts: BTreeMap<String, usize>,

    /// Minimum-nights split: short-term is strictly under 30 nights.
    pub short_term: usize,
    pub long_term: usize,

    pub license_counts: LicenseCounts,

    /// Hosts operating two or more listings, sorted by listing count
    /// descending, ties by ascending host id.
    pub multi_listing_hosts: Vec<HostListings>,

    /// Total listings operated by multi-listing hosts (the Inside Airbnb
    /// "multi-listings" figure).
    pub multi_listing_total: usize,

    /// Slot i holds the number of listings operated by hosts with exactly
    /// i+1 listings; the last slot covers hosts with 10 or more.
    pub listings_by_host_size: [usize; HOST_SIZE_SLOTS],

    /// The largest hosts overall, same ordering rule as
    /// `multi_listing_hosts`, capped at ten entries.
    pub top_hosts: Vec<HostListings>,

    /// `None` when no listing carries a usable price.
    pub price_stats: Option<PriceStats>,

    /// Per-room-type price statistics; types without any priced listing are
    /// absent.
    pub price_stats_by_type: BTreeMap<String, PriceStats>,

    /// Newest `last_review` date in the dataset, if any reviews exist.
    pub data_as_of: Option<NaiveDate>,
}

impl Summary {
    /// One-line digest for progress output and logs.
    pub fn headline(&self) -> String {
        format!(
            "{} listings across {} room types, {} multi-listing hosts, {} priced",
            self.total_listings,
            self.room_type_counts.len(),
            self.multi_listing_hosts.len(),
            self.price_stats.as_ref().map_or(0, |s| s.count),
        )
    }
}

// ============================================================================
// AGGREGATION
// ============================================================================

struct HostGroup {
    host_name: String,
    listing_count: usize,
}

/// Derive a [`Summary`] from loaded records.
///
/// Deterministic and independent of input order except where a sort rule is
/// documented on the output field.
pub fn summarize(listings: &[Listing]) -> Summary {
    let total_listings = listings.len();

    let mut room_type_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut prices_by_type: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    let mut all_prices: Vec<f64> = Vec::new();
    let mut hosts: HashMap<u64, HostGroup> = HashMap::new();
    let mut license_counts = LicenseCounts::default();
    let mut short_term = 0usize;
    let mut data_as_of: Option<NaiveDate> = None;

    for listing in listings {
        *room_type_counts
            .entry(listing.room_type.clone())
            .or_insert(0) += 1;

        if let Some(price) = listing.price {
            all_prices.push(price);
            prices_by_type
                .entry(listing.room_type.clone())
                .or_default()
                .push(price);
        }

        let group = hosts.entry(listing.host_id).or_insert_with(|| HostGroup {
            host_name: listing.host_name.clone(),
            listing_count: 0,
        });
        group.listing_count += 1;
        if group.host_name.is_empty() && !listing.host_name.is_empty() {
            group.host_name = listing.host_name.clone();
        }

        match listing.license_status() {
            LicenseStatus::Unlicensed => license_counts.unlicensed += 1,
            LicenseStatus::Pending => license_counts.pending += 1,
            LicenseStatus::Exempt => license_counts.exempt += 1,
            LicenseStatus::Licensed => license_counts.licensed += 1,
        }

        if listing.is_short_term() {
            short_term += 1;
        }

        if let Some(date) = listing.last_review {
            data_as_of = Some(data_as_of.map_or(date, |d| d.max(date)));
        }
    }

    let mut all_hosts: Vec<HostListings> = hosts
        .into_iter()
        .map(|(host_id, group)| HostListings {
            host_id,
            host_name: if group.host_name.is_empty() {
                "Name not found".to_string()
            } else {
                group.host_name
            },
            listing_count: group.listing_count,
        })
        .collect();
    all_hosts.sort_by(|a, b| {
        b.listing_count
            .cmp(&a.listing_count)
            .then(a.host_id.cmp(&b.host_id))
    });

    let mut listings_by_host_size = [0usize; HOST_SIZE_SLOTS];
    for host in &all_hosts {
        let slot = host.listing_count.min(HOST_SIZE_SLOTS) - 1;
        listings_by_host_size[slot] += host.listing_count;
    }

    let multi_listing_hosts: Vec<HostListings> = all_hosts
        .iter()
        .filter(|h| h.listing_count >= 2)
        .cloned()
        .collect();
    let multi_listing_total = multi_listing_hosts.iter().map(|h| h.listing_count).sum();

    let mut top_hosts = all_hosts;
    top_hosts.truncate(TOP_HOSTS);

    let price_stats = PriceStats::from_prices(&all_prices);
    let price_stats_by_type: BTreeMap<String, PriceStats> = prices_by_type
        .into_iter()
        .filter_map(|(room_type, prices)| {
            PriceStats::from_prices(&prices).map(|stats| (room_type, stats))
        })
        .collect();

    Summary {
        total_listings,
        room_type_counts,
        short_term,
        long_term: total_listings - short_term,
        license_counts,
        multi_listing_hosts,
        multi_listing_total,
        listings_by_host_size,
        top_hosts,
        price_stats,
        price_stats_by_type,
        data_as_of,
    }
}

// ============================================================================
// TESTS
// ============================================================================
