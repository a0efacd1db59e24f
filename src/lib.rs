pub mod aggregate;
pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod insight;
pub mod loader;
pub mod options;
pub mod pagination;
pub mod service;
pub mod stats;

pub use aggregate::{ChartData, ChartDataset, ChartKind};
pub use error::{DashboardError, Result};
pub use filter::{FilterCriteria, FilterField};
pub use insight::Insight;
pub use loader::DatasetLoader;
pub use service::InsightService;
pub use stats::StatsSummary;
