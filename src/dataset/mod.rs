//! Sales Dataset
//!
//! - **types**: `SalesRecord` and the immutable `SalesDataset`
//! - **loader**: JSON-lines / CSV file reader
//! - **summary**: startup totals and filter domains
//! - **error**: `LoadError`
//!
//! # Example
//!
//! ```rust,no_run
//! use salesboard::dataset::{load_dataset, DatasetSummary};
//! use std::path::Path;
//!
//! let dataset = load_dataset(Path::new("assets/Amazon dataset.json"))?;
//! let summary = DatasetSummary::from_dataset(&dataset);
//! println!("{} records, {} customers", summary.record_count, summary.total_customers);
//! # Ok::<(), salesboard::dataset::LoadError>(())
//! ```

pub mod error;
pub mod loader;
pub mod summary;
pub mod types;

pub use error::{LoadError, LoadResult};
pub use loader::{load_dataset, parse_csv, parse_json_lines, parse_order_date, DatasetFormat};
pub use summary::DatasetSummary;
pub use types::{SalesDataset, SalesRecord};
