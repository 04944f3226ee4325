use crate::aggregate::aggregate_segment;
use crate::models::{SessionRecord, Segment};
use crate::numeric::{clamp_unit, safe_divide, to_percent};
use crate::types::{SegmentEfficiency, TseResult};

/// Time-segment Efficiency – uvektet snitt av effektiviteten i tidlig,
/// midtre og sen tredjedel over alle konkurransekamper.
/// Et segment uten forsøk teller som 0, så nevneren er alltid 3.
pub fn compute_tse(competition: &[SessionRecord]) -> TseResult {
    let segments: Vec<SegmentEfficiency> = Segment::ALL
        .iter()
        .map(|&segment| {
            let totals = aggregate_segment(competition, segment);
            let attempts = totals.total_attempts();
            let points = totals.total_points();
            SegmentEfficiency {
                segment,
                attempts,
                points,
                // Avviker bevisst fra rent safe_divide-snitt: rader med flere poeng
                // enn forsøk skal ikke løfte TSE over 100.
                efficiency: clamp_unit(safe_divide(points as f64, attempts as f64)),
            }
        })
        .collect();

    let avg = segments.iter().map(|s| s.efficiency).sum::<f64>() / Segment::ALL.len() as f64;
    let tse = to_percent(avg);

    log::debug!("TSE: {} kamper → {}", competition.len(), tse);
    TseResult { tse, segments }
}
