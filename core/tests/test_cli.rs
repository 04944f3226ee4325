// core/tests/test_cli.rs
use std::fs;

use clap::Parser;
use fencemetrics_core::cli::{run_with, Cli};
use fencemetrics_core::{BoutKind, JsonFileStore, RecordStore};

fn tmp(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("fencemetrics_cli_{}_{}", name, std::process::id()))
}

#[test]
fn log_bout_lesson_then_export() {
    let store = tmp("store.json");
    let out = tmp("training.csv");
    let _ = fs::remove_file(&store);
    let _ = fs::remove_file(&out);
    let s = store.to_str().unwrap();

    let cli = Cli::parse_from([
        "fencemetrics", "--store", s, "log-bout", "--kind", "training",
        r#"{"date":"2025-03-10","result":"W","A_ATT":4,"P_ATT":3}"#,
    ]);
    run_with(cli).expect("log-bout");

    let cli = Cli::parse_from([
        "fencemetrics", "--store", s, "log-lesson", "--date", "2025-03-09", "--minutes", "40",
    ]);
    run_with(cli).expect("log-lesson");

    let loaded = JsonFileStore::open(&store).unwrap();
    let rows = loaded.sessions(BoutKind::Training).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].ces, Some(75));
    assert!(rows[0].created_at.is_some());
    assert_eq!(loaded.lessons().unwrap()[0].duration_minutes, 40);

    let cli = Cli::parse_from([
        "fencemetrics", "--store", s, "export", "--kind", "training", "--out", out.to_str().unwrap(),
    ]);
    run_with(cli).expect("export");
    let csv_text = fs::read_to_string(&out).unwrap();
    assert!(csv_text.starts_with("date,opponent,result,score,"));
    assert!(csv_text.contains("2025-03-10,,W,,4,3,"));

    let cli = Cli::parse_from(["fencemetrics", "--store", s, "report", "--date", "2025-03-10"]);
    run_with(cli).expect("report");

    fs::remove_file(&store).ok();
    fs::remove_file(&out).ok();
}

#[test]
fn report_rejects_bad_date() {
    let store = tmp("empty.json");
    let _ = fs::remove_file(&store);
    let cli = Cli::parse_from([
        "fencemetrics", "--store", store.to_str().unwrap(), "report", "--date", "yesterday",
    ]);
    assert!(run_with(cli).is_err());
}

#[test]
fn log_competition_bout_from_segments_only() {
    let store = tmp("comp.json");
    let _ = fs::remove_file(&store);
    let s = store.to_str().unwrap();

    let cli = Cli::parse_from([
        "fencemetrics", "--store", s, "log-bout", "--kind", "competition",
        "--score-me", "15", "--score-opp", "9",
        r#"{"date":"2025-03-11","result":"W","A_ATT_E":4,"P_ATT_E":2,"A_ATT_M":4,"P_ATT_M":2,"A_ATT_L":2,"P_ATT_L":2}"#,
    ]);
    run_with(cli).expect("log-bout competition");

    let loaded = JsonFileStore::open(&store).unwrap();
    let rows = loaded.sessions(BoutKind::Competition).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].actions.a_att, 10);
    assert_eq!(rows[0].actions.p_att, 6);
    assert_eq!(rows[0].ces, Some(60));
    assert_eq!(rows[0].score.as_deref(), Some("15-9"));

    let v: serde_json::Value =
        serde_json::from_str(&fencemetrics_core::distribution_json("[]", &serde_json::to_string(&rows).unwrap()).unwrap())
            .unwrap();
    assert_eq!(v[0]["competitionSharePct"], 100);

    fs::remove_file(&store).ok();
}

#[test]
fn log_bout_without_date_is_rejected() {
    let store = tmp("nodate.json");
    let _ = fs::remove_file(&store);
    let cli = Cli::parse_from([
        "fencemetrics", "--store", store.to_str().unwrap(), "log-bout", "--kind", "training",
        r#"{"result":"W","A_ATT":1}"#,
    ]);
    assert!(run_with(cli).is_err());
    assert!(!store.exists());
}
