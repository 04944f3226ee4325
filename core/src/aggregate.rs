// core/src/aggregate.rs
use chrono::{Duration, NaiveDate};

use crate::models::{AggregatedTotals, SessionRecord, Segment};

/// Summerer forsøk og poeng per kategori over alle rader.
/// Rekkefølgen spiller ingen rolle; tom input gir bare nuller.
pub fn aggregate<'a, I>(records: I) -> AggregatedTotals
where
    I: IntoIterator<Item = &'a SessionRecord>,
{
    let mut totals = AggregatedTotals::default();
    let mut n = 0usize;
    for r in records {
        totals.add(&r.actions);
        n += 1;
    }
    log::trace!(
        "aggregate: {} rader → {} forsøk / {} poeng",
        n,
        totals.total_attempts(),
        totals.total_points()
    );
    totals
}

/// Som `aggregate`, men for én tredjedel av kampene. Rader uten
/// segmentdata (trening) bidrar med 0.
pub fn aggregate_segment<'a, I>(records: I, seg: Segment) -> AggregatedTotals
where
    I: IntoIterator<Item = &'a SessionRecord>,
{
    let mut totals = AggregatedTotals::default();
    for r in records {
        if let Some(s) = r.segment(seg) {
            totals.add(s);
        }
    }
    totals
}

/// Lukket datointervall [start, end]. Motoren har ingen "nå"; kalleren
/// bestemmer referansedatoen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn day(date: NaiveDate) -> Self {
        Self { start: date, end: date }
    }

    /// De `n` siste dagene t.o.m. `end` (n = 0 behandles som 1).
    pub fn trailing_days(end: NaiveDate, n: u32) -> Self {
        let back = i64::from(n.max(1) - 1);
        let start = end.checked_sub_signed(Duration::days(back)).unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn filter<'a>(&self, records: &'a [SessionRecord]) -> impl Iterator<Item = &'a SessionRecord> + 'a {
        let w = *self;
        records.iter().filter(move |r| r.date.is_some_and(|d| w.contains(d)))
    }
}
