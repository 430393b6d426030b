//! COVID-19 area API
//!
//! Serves a hierarchical COVID-19 dataset, narrowed by a chain of region
//! names and optionally ordered by distance from a coordinate.

pub mod config;
pub mod distance;
pub mod error;
pub mod filter;
pub mod handler;
pub mod models;
pub mod source;

pub use error::{ApiError, FetchError};
pub use handler::{get_data, router, AppState, GetDataQuery};
pub use models::Area;
pub use source::{DatasetSource, StaticDatasetSource};
