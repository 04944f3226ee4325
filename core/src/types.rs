use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::{Category, Segment};

// ──────────────────────────────────────────────────────────────────────────────
// Konfigurasjon
// ──────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Targets {
    pub bouts: f64,   // typ 150
    pub lessons: f64, // typ 30
    pub touches: f64, // typ 800
}

impl Default for Targets {
    fn default() -> Self {
        Self { bouts: 150.0, lessons: 30.0, touches: 800.0 }
    }
}

/// Tillatt spenn for arbeidsmengde-faktorene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Caps {
    pub min: f64,
    pub max: f64,
}

impl Default for Caps {
    fn default() -> Self {
        Self { min: 0.6, max: 1.2 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub bouts: f64,   // typ 0.4
    pub lessons: f64, // typ 0.3
    pub touches: f64, // typ 0.3
}

impl Default for Weights {
    fn default() -> Self {
        Self { bouts: 0.4, lessons: 0.3, touches: 0.3 }
    }
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.bouts + self.lessons + self.touches
    }
}

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Parametre for Season Efficiency.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeConfig {
    pub targets: Targets,
    pub caps: Caps,
    pub weights: Weights,
}

impl SeConfig {
    /// Valideres én gang ved grensesnittet; `compute_se` selv er total.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.targets;
        for (name, value) in [("bouts", t.bouts), ("lessons", t.lessons), ("touches", t.touches)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidTarget { name, value });
            }
        }

        let c = &self.caps;
        if !c.min.is_finite() || !c.max.is_finite() || c.min < 0.0 || c.min > c.max {
            return Err(ConfigError::InvalidCaps { min: c.min, max: c.max });
        }

        let w = &self.weights;
        for (name, value) in [("bouts", w.bouts), ("lessons", w.lessons), ("touches", w.touches)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }
        if (w.sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum(w.sum()));
        }
        Ok(())
    }
}

fn default_trailing_days() -> u32 {
    7
}

/// Konfigurasjonsdokumentet som JSON-inngangen, CLI og Python tar imot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cfg {
    #[serde(default)]
    pub season: SeConfig,
    #[serde(default = "default_trailing_days", alias = "trailingDays")]
    pub trailing_days: u32,
}

impl Default for Cfg {
    fn default() -> Self {
        Self { season: SeConfig::default(), trailing_days: default_trailing_days() }
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Resultater
// ──────────────────────────────────────────────────────────────────────────────

/// Terskler brukt av visningslaget; endrer ikke tallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CesBand {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CesResult {
    #[serde(rename = "CES")]
    pub ces: u32,
    pub attempts: u64,
    pub points: u64,
}

impl CesResult {
    pub fn band(&self) -> CesBand {
        if self.ces >= 70 {
            CesBand::High
        } else if self.ces >= 50 {
            CesBand::Medium
        } else {
            CesBand::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeFactors {
    pub bouts_factor: f64,
    pub lessons_factor: f64,
    pub touches_factor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeTotals {
    pub victories: u64,
    pub total_bouts: u64,
    pub touches_total: u64,
    pub lessons_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeResult {
    #[serde(rename = "SE")]
    pub se: u32,
    pub base_success_pct: u32,
    /// Avrundet til 2 desimaler.
    pub workload_index: f64,
    /// Hver faktor avrundet til 2 desimaler.
    pub factors: SeFactors,
    pub totals: SeTotals,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentEfficiency {
    pub segment: Segment,
    pub attempts: u64,
    pub points: u64,
    /// Poeng/forsøk, klemt til [0, 1]; 0 når forsøk = 0.
    pub efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TseResult {
    #[serde(rename = "TSE")]
    pub tse: u32,
    pub segments: Vec<SegmentEfficiency>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionRow {
    pub category: Category,
    pub training_share_pct: u32,
    pub competition_share_pct: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsReport {
    pub reference_date: NaiveDate,
    pub trailing_days: u32,
    pub ces_today: CesResult,
    pub ces_window: CesResult,
    pub se: SeResult,
    pub tse: TseResult,
    pub distribution: Vec<DistributionRow>,
}
