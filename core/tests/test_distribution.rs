// core/tests/test_distribution.rs
use chrono::NaiveDate;
use fencemetrics_core::{compute_distribution, ActionCounts, BoutResult, Category, SessionRecord};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 20).unwrap()
}

fn rec(points: [u64; 4]) -> SessionRecord {
    let mut a = ActionCounts::default();
    for (cat, p) in Category::ALL.iter().zip(points) {
        a.set(*cat, p, p);
    }
    SessionRecord::training(day(), BoutResult::Win, a)
}

#[test]
fn single_attack_only_record_is_100_percent_attack() {
    let rows = compute_distribution(&[rec([10, 0, 0, 0])], &[]);
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].category, Category::Attack);
    assert_eq!(rows[0].training_share_pct, 100);
    for r in &rows[1..] {
        assert_eq!(r.training_share_pct, 0);
    }
    assert!(rows.iter().all(|r| r.competition_share_pct == 0));
}

#[test]
fn series_are_normalized_independently() {
    let training = vec![rec([1, 1, 1, 1])];
    let competition = vec![rec([0, 0, 3, 1])];
    let rows = compute_distribution(&training, &competition);
    assert!(rows.iter().all(|r| r.training_share_pct == 25));
    assert_eq!(rows[2].competition_share_pct, 75);
    assert_eq!(rows[3].competition_share_pct, 25);
}

#[test]
fn independent_rounding_may_not_sum_to_100() {
    // 1/3 hver → 33 + 33 + 33 = 99
    let rows = compute_distribution(&[rec([1, 1, 1, 0])], &[]);
    let sum: u32 = rows.iter().map(|r| r.training_share_pct).sum();
    assert_eq!(sum, 99);
}

#[test]
fn row_order_and_labels() {
    let rows = compute_distribution(&[], &[]);
    let labels: Vec<_> = rows.iter().map(|r| r.category.label()).collect();
    assert_eq!(labels, ["Attack", "Parry-Riposte", "Counter", "Second-Intention"]);
    let v = serde_json::to_value(&rows).unwrap();
    assert_eq!(v[1]["category"], "Parry-Riposte");
    assert!(v[1]["trainingSharePct"].is_u64());
    assert!(v[1]["competitionSharePct"].is_u64());
}
