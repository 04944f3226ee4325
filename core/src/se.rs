use crate::models::{LessonRecord, SessionRecord};
use crate::numeric::{clamp_unit, safe_divide, to_percent, RoundTo};
use crate::types::{SeConfig, SeFactors, SeResult, SeTotals};

/// Lineær faktor mellom `min_cap` og `max_cap`: forholdet klemmes til [0, 1]
/// og avbildes lineært, så lav aktivitet gulves på `min_cap` i stedet for 0.
pub fn capped_linear_factor(ratio: f64, min_cap: f64, max_cap: f64) -> f64 {
    let r = clamp_unit(ratio);
    min_cap + (max_cap - min_cap) * r
}

pub fn count_victories<'a, I>(rows: I) -> u64
where
    I: IntoIterator<Item = &'a SessionRecord>,
{
    rows.into_iter().filter(|r| r.is_win()).count() as u64
}

/// Sum av scorede poeng (forsøk telles ikke).
pub fn sum_points_scored<'a, I>(rows: I) -> u64
where
    I: IntoIterator<Item = &'a SessionRecord>,
{
    rows.into_iter()
        .fold(0u64, |acc, r| acc.saturating_add(r.actions.total_points()))
}

/// Season Efficiency:
///   SE = min(1, BaseSuccess × WorkloadIndex) → 0–100
///
/// BaseSuccess = seire / kamper (trening + konkurranse).
/// WorkloadIndex = vektet sum av tre kappede faktorer (kamper, timer, poeng).
pub fn compute_se(
    training: &[SessionRecord],
    competition: &[SessionRecord],
    lessons: &[LessonRecord],
    cfg: &SeConfig,
) -> SeResult {
    let all = || training.iter().chain(competition.iter());

    let total_bouts = (training.len() + competition.len()) as u64;
    let victories = count_victories(all());
    let base_success = safe_divide(victories as f64, total_bouts as f64);

    let touches_total = sum_points_scored(all());
    let lessons_count = lessons.len() as u64;

    let (t, c, w) = (&cfg.targets, &cfg.caps, &cfg.weights);
    let bouts_factor = capped_linear_factor(safe_divide(total_bouts as f64, t.bouts), c.min, c.max);
    let lessons_factor = capped_linear_factor(safe_divide(lessons_count as f64, t.lessons), c.min, c.max);
    let touches_factor = capped_linear_factor(safe_divide(touches_total as f64, t.touches), c.min, c.max);

    let workload_index =
        w.bouts * bouts_factor + w.lessons * lessons_factor + w.touches * touches_factor;

    // Klem etter multiplikasjon: høy arbeidsmengde kan ikke løfte SE over 100.
    let se = to_percent((base_success * workload_index).min(1.0));

    log::debug!(
        "SE: {}/{} seire, {} poeng, {} timer → workload {:.3}, SE {}",
        victories, total_bouts, touches_total, lessons_count, workload_index, se
    );

    SeResult {
        se,
        base_success_pct: to_percent(base_success),
        workload_index: workload_index.round_to(2),
        factors: SeFactors {
            bouts_factor: bouts_factor.round_to(2),
            lessons_factor: lessons_factor.round_to(2),
            touches_factor: touches_factor.round_to(2),
        },
        totals: SeTotals { victories, total_bouts, touches_total, lessons_count },
    }
}
