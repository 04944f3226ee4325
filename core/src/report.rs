// core/src/report.rs
use chrono::NaiveDate;

use crate::aggregate::{aggregate, DateWindow};
use crate::ces::compute_ces;
use crate::distribution::compute_distribution;
use crate::models::{LessonRecord, SessionRecord};
use crate::se::compute_se;
use crate::tse::compute_tse;
use crate::types::{Cfg, MetricsReport};

/// Dashbord-sammendrag for en gitt referansedato:
/// CES i dag og for de siste `cfg.trailing_days` dagene (trening + konkurranse),
/// SE og fordeling over hele samlingene, TSE over alle konkurranser.
pub fn build_report(
    training: &[SessionRecord],
    competition: &[SessionRecord],
    lessons: &[LessonRecord],
    reference_date: NaiveDate,
    cfg: &Cfg,
) -> MetricsReport {
    let today = DateWindow::day(reference_date);
    let window = DateWindow::trailing_days(reference_date, cfg.trailing_days);

    let ces_today = compute_ces(&aggregate(today.filter(training).chain(today.filter(competition))));
    let ces_window = compute_ces(&aggregate(window.filter(training).chain(window.filter(competition))));

    let report = MetricsReport {
        reference_date,
        trailing_days: cfg.trailing_days.max(1),
        ces_today,
        ces_window,
        se: compute_se(training, competition, lessons, &cfg.season),
        tse: compute_tse(competition),
        distribution: compute_distribution(training, competition),
    };

    log::info!(
        "rapport {}: CES i dag {} / {}d {}, SE {}, TSE {}",
        reference_date,
        report.ces_today.ces,
        report.trailing_days,
        report.ces_window.ces,
        report.se.se,
        report.tse.tse
    );
    report
}
