// Listing Report - Core Library
// Exposes the load → aggregate → render pipeline for the CLI and tests

pub mod aggregate;
pub mod loader;
pub mod model;
pub mod report;

// Re-export commonly used types
pub use aggregate::{summarize, HostListings, LicenseCounts, PriceStats, Summary};
pub use loader::{load_listings, LoadError, LoadedDataset, RowPolicy};
pub use model::{LicenseStatus, Listing, RawListing, RowIssue, SHORT_TERM_NIGHTS};
pub use report::{render, ReportText};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
