pub mod catalog;
pub mod config;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod types;

pub use catalog::{Catalog, DEFAULT_TOP_LIMIT};
pub use config::OpportunaiConfig;
pub use dataset::Dataset;
pub use error::{CoreError, Result};
pub use filter::{CompanyFilter, CompatibilityBand, TenderFilter, ValueBand};
pub use types::*;
