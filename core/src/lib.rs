pub mod numeric;
pub mod error;
pub mod models;
pub mod types;
pub mod aggregate;
pub mod ces;
pub mod se;
pub mod tse;
pub mod distribution;
pub mod report;
pub mod storage;
pub mod export;
pub mod api;
pub mod cli;

#[cfg(feature = "python")]
mod py;

pub use api::{analyze_json, ces_json, distribution_json, parse_cfg, se_json, tse_json};
pub use aggregate::{aggregate, aggregate_segment, DateWindow};
pub use ces::compute_ces;
pub use distribution::compute_distribution;
pub use error::{ConfigError, Error, ExportError, RecordError, StoreError};
pub use models::{
    format_score, ActionCounts, AggregatedTotals, BoutKind, BoutResult, Category, LessonRecord,
    Segment, SessionRecord,
};
pub use numeric::{clamp_unit, finite_or_zero, safe_divide, RoundTo};
pub use report::build_report;
pub use se::compute_se;
pub use storage::{parse_store, JsonFileStore, MemoryStore, RecordSet, RecordStore};
pub use tse::compute_tse;
pub use types::{
    Caps, Cfg, CesBand, CesResult, DistributionRow, MetricsReport, SeConfig, SeResult, Targets,
    TseResult, Weights,
};
