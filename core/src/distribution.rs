use crate::aggregate::aggregate;
use crate::models::{AggregatedTotals, Category, SessionRecord};
use crate::numeric::{round_half_up, safe_divide};
use crate::types::DistributionRow;

fn share_pct(totals: &AggregatedTotals, cat: Category) -> u32 {
    let total = totals.total_points();
    if total == 0 {
        return 0;
    }
    round_half_up(safe_divide(totals.points(cat) as f64, total as f64) * 100.0) as u32
}

/// Poengandel per kategori, normalisert separat for trening og konkurranse.
/// Hver andel avrundes for seg, så en serie summerer ikke nødvendigvis til 100.
pub fn compute_distribution(
    training: &[SessionRecord],
    competition: &[SessionRecord],
) -> Vec<DistributionRow> {
    let t = aggregate(training);
    let c = aggregate(competition);

    Category::ALL
        .iter()
        .map(|&category| DistributionRow {
            category,
            training_share_pct: share_pct(&t, category),
            competition_share_pct: share_pct(&c, category),
        })
        .collect()
}
