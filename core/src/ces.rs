use crate::models::AggregatedTotals;
use crate::numeric::{clamp_unit, round_half_up, safe_divide};
use crate::types::CesResult;

/// Composite Efficiency Score – poeng per forsøk, skalert til 0–100.
/// Gir alltid 0 når det ikke finnes forsøk, uansett antall poeng.
pub fn compute_ces(totals: &AggregatedTotals) -> CesResult {
    let attempts = totals.total_attempts();
    let points = totals.total_points();

    let ratio = safe_divide(points as f64, attempts as f64);
    let ces = round_half_up(clamp_unit(ratio) * 100.0) as u32;

    log::debug!("CES: {}/{} → {}", points, attempts, ces);
    CesResult { ces, attempts, points }
}
