// core/tests/test_export.rs
use chrono::{NaiveDate, TimeZone, Utc};
use fencemetrics_core::export::{competition_columns, to_csv_string, TRAINING_COLUMNS};
use fencemetrics_core::{ActionCounts, BoutKind, BoutResult, SessionRecord};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
}

#[test]
fn training_export_has_fixed_columns_and_ces() {
    let mut c = ActionCounts::default();
    c.a_att = 4;
    c.p_att = 2;
    let mut r = SessionRecord::training(day(), BoutResult::Win, c).with_computed_ces();
    r.opponent = Some("Doe, Jane".into());
    r.score = Some("5-3".into());
    r.created_at = Some(Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap());

    let out = to_csv_string(&[r], BoutKind::Training).unwrap();
    let mut rdr = csv::Reader::from_reader(out.as_bytes());

    let headers: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, TRAINING_COLUMNS);

    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(&row[0], "2025-07-01");
    assert_eq!(&row[1], "Doe, Jane");
    assert_eq!(&row[2], "W");
    assert_eq!(&row[3], "5-3");
    assert_eq!(&row[4], "4");
    assert_eq!(&row[5], "2");
    assert_eq!(&row[12], "50");
    assert!(row[13].starts_with("2025-07-01T12:00:00"));

    // komma i motstandernavnet gir sitering
    assert!(out.contains("\"Doe, Jane\""));
}

#[test]
fn competition_export_column_order() {
    let cols = competition_columns();
    assert_eq!(cols.len(), 7 + 8 + 24 + 2);
    assert_eq!(&cols[..7], ["date", "event", "opponent", "nation", "round", "result", "score"]);
    assert_eq!(cols[7], "A_ATT");
    assert_eq!(cols[14], "P_SI");
    assert_eq!(&cols[15..21], ["A_ATT_E", "P_ATT_E", "A_ATT_M", "P_ATT_M", "A_ATT_L", "P_ATT_L"]);
    assert_eq!(cols[21], "A_PR_E");
    assert_eq!(cols[38], "P_SI_L");
    assert_eq!(cols[39], "CES");
    assert_eq!(cols[40], "createdAt");
}

#[test]
fn missing_values_are_empty_cells() {
    let r = SessionRecord::competition(day(), BoutResult::Loss, [ActionCounts::default(); 3]);
    let out = to_csv_string(&[r], BoutKind::Competition).unwrap();
    let mut rdr = csv::Reader::from_reader(out.as_bytes());
    let row = rdr.records().next().unwrap().unwrap();
    assert_eq!(&row[1], ""); // event
    assert_eq!(&row[5], "L");
    assert_eq!(&row[15], "0");
    assert_eq!(&row[39], ""); // CES ikke beregnet
}

#[test]
fn empty_export_is_header_only() {
    let out = to_csv_string(&[], BoutKind::Training).unwrap();
    assert_eq!(out.trim_end(), TRAINING_COLUMNS.join(","));
}
