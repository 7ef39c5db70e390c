//! Player CSV ingestion, normalization and youth-development metrics.

pub mod config;
pub mod country;
pub mod dashboard;
pub mod development;
pub mod error;
pub mod export;
pub mod flags;
pub mod geographic;
pub mod http_client;
pub mod ingest;
pub mod metrics;
pub mod performance;
pub mod player;
pub mod players;
pub mod predictive;
pub mod repository;
pub mod state;

pub use config::Config;
pub use country::{CountryNormalizer, normalize_country};
pub use dashboard::{DashboardReport, Metric, MetricTable, Page, build_report};
pub use error::{ErrorKind, LoadError};
pub use flags::flag_for_country;
pub use metrics::{AggregationRow, RowDetail};
pub use player::{PlayerRecord, parse_market_value};
pub use repository::{PlayerRepository, Summary};
pub use state::{DataSource, DataState, LoadOutcome, load_from};
