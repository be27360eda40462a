//! Polars integration for groupwise pipelines
//!
//! This crate loads the input table, cleans it, and partitions it into the
//! [`GroupedDataset`](groupwise_core::GroupedDataset) every analysis and plot
//! reads, all through a single extension trait on `DataFrame`.
//!
//! # Example
//!
//! ```rust
//! use groupwise_polars::{read_csv_from_reader, GroupingColumns, GroupwiseFrameExt, OutlierMethod};
//!
//! let csv = "Group,Value\nA,1\nA,2\nA,3\nA,2\nA,50\nB,10\nB,11\nB,12\n";
//! let df = read_csv_from_reader(csv.as_bytes()).unwrap();
//!
//! let cleaned = df.filter_outliers("Group", "Value", OutlierMethod::Mad, 3.0).unwrap();
//! let data = cleaned.grouped(&GroupingColumns::new("Group", "Value")).unwrap();
//! assert_eq!(data.get("A").unwrap().values, vec![1.0, 2.0, 3.0, 2.0]);
//! ```

mod config;
mod error;
mod loader;
mod methods;
mod traits;

pub use config::*;
pub use error::{Error, Result};
pub use loader::{read_csv, read_csv_from_reader};
pub use methods::outliers::outlier_bounds;
pub use traits::*;
