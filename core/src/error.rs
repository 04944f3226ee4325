// core/src/error.rs
use thiserror::Error;

/// Feil ved tolking av en rå økt-/leksjonsrad.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

/// Ugyldig SE-konfigurasjon. Sjekkes én gang ved grensesnittet, aldri i motoren.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("target '{name}' must be a positive finite number, got {value}")]
    InvalidTarget { name: &'static str, value: f64 },
    #[error("caps must satisfy 0 <= min <= max (finite), got min={min} max={max}")]
    InvalidCaps { min: f64, max: f64 },
    #[error("weight '{name}' must be a non-negative finite number, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },
    #[error("weights must sum to 1, got {0}")]
    WeightSum(f64),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store JSON error at {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("export I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Samlefeil for JSON-inngangen (`analyze_json`) og Python-bindingene.
#[derive(Debug, Error)]
pub enum Error {
    #[error("parse error ({what}) at {path}: {msg}")]
    Parse {
        what: &'static str,
        path: String,
        msg: String,
    },
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
