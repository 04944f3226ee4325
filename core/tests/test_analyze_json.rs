// core/tests/test_analyze_json.rs
use fencemetrics_core::{analyze_json, ces_json, distribution_json, se_json, tse_json, Error};
use serde_json::{json, Value};

fn store() -> Value {
    json!({
        "trainingBouts": [
            { "date": "2025-03-10", "result": "W", "A_ATT": 10, "P_ATT": 5, "A_PR": 10, "P_PR": 5 },
            { "date": "2025-03-05", "result": "L", "A_CNT": 4, "P_CNT": 1 },
            { "date": "2025-02-01", "result": "W", "A_SI": 8, "P_SI": 8 }
        ],
        "competitionBouts": [
            {
                "date": "2025-03-10", "result": "W",
                "A_ATT": 6, "P_ATT": 3,
                "A_ATT_E": 2, "P_ATT_E": 1, "A_ATT_M": 2, "P_ATT_M": 1, "A_ATT_L": 2, "P_ATT_L": 1
            }
        ],
        "lessons": [
            { "date": "2025-03-01", "durationMin": 60 },
            { "date": "2025-03-08", "durationMin": 30 }
        ]
    })
}

#[test]
fn analyze_builds_full_report() {
    let out = analyze_json(&store().to_string(), "2025-03-10", None).expect("analyze_json");
    let v: Value = serde_json::from_str(&out).unwrap();

    assert_eq!(v["referenceDate"], "2025-03-10");
    assert_eq!(v["trailingDays"], 7);
    // i dag: trening 20 forsøk/10 poeng + konkurranse 6/3 → 13/26 = 50
    assert_eq!(v["cesToday"]["CES"], 50);
    assert_eq!(v["cesToday"]["attempts"], 26);
    // 7 dager: + 4 forsøk / 1 poeng → 14/30 = 46.7 → 47
    assert_eq!(v["cesWindow"]["CES"], 47);
    assert_eq!(v["se"]["totals"]["totalBouts"], 4);
    assert_eq!(v["se"]["totals"]["victories"], 3);
    assert_eq!(v["se"]["totals"]["lessonsCount"], 2);
    assert_eq!(v["tse"]["TSE"], 50);
    assert_eq!(v["distribution"].as_array().unwrap().len(), 4);
}

#[test]
fn analyze_honours_config() {
    let cfg = json!({ "trailing_days": 40, "season": { "targets": { "bouts": 4 } } }).to_string();
    let out = analyze_json(&store().to_string(), "2025-03-10", Some(&cfg)).unwrap();
    let v: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["trailingDays"], 40);
    // 4/4 kamper → bouts-faktor på taket
    assert_eq!(v["se"]["factors"]["boutsFactor"], 1.2);
    // 40 dager tar med februar-raden: 22/38 → 58
    assert_eq!(v["cesWindow"]["CES"], 58);
}

#[test]
fn analyze_rejects_invalid_config_and_date() {
    let bad = json!({ "season": { "weights": { "bouts": 0.9 } } }).to_string();
    assert!(matches!(
        analyze_json(&store().to_string(), "2025-03-10", Some(&bad)),
        Err(Error::Config(_))
    ));
    assert!(matches!(
        analyze_json(&store().to_string(), "10.03.2025", None),
        Err(Error::Record(_))
    ));
    assert!(matches!(
        analyze_json("[1, 2]", "2025-03-10", None),
        Err(Error::Store(_))
    ));
}

#[test]
fn ces_json_matches_scenario() {
    let t = json!({"A_ATT":10,"P_ATT":5,"A_PR":10,"P_PR":5,"A_CNT":10,"P_CNT":5,"A_SI":10,"P_SI":5});
    let v: Value = serde_json::from_str(&ces_json(&t.to_string()).unwrap()).unwrap();
    assert_eq!(v["CES"], 50);

    // ikke-numeriske felt → 0
    let v: Value = serde_json::from_str(&ces_json(r#"{"A_ATT":"x","P_ATT":null}"#).unwrap()).unwrap();
    assert_eq!(v["CES"], 0);
}

#[test]
fn se_json_accepts_spec_shape() {
    let rows: Vec<Value> = (0..100).map(|_| json!({ "date": "2025-01-01", "result": "W" })).collect();
    let input = json!({
        "trainingRecords": rows,
        "competitionRecords": [],
        "lessonRecords": [],
        "targets": { "bouts": 150, "lessons": 30, "touches": 800 },
        "caps": { "min": 0.6, "max": 1.2 },
        "weights": { "bouts": 0.4, "lessons": 0.3, "touches": 0.3 }
    });
    let v: Value = serde_json::from_str(&se_json(&input.to_string()).unwrap()).unwrap();
    assert_eq!(v["SE"], 76);
    assert_eq!(v["baseSuccessPct"], 100);
    assert_eq!(v["factors"]["boutsFactor"], 1.0);

    let empty: Value = serde_json::from_str(&se_json("{}").unwrap()).unwrap();
    assert_eq!(empty["SE"], 0);
}

#[test]
fn se_json_reports_parse_path() {
    let err = se_json(r#"{ "caps": { "min": "low" } }"#).unwrap_err();
    match err {
        Error::Parse { path, .. } => assert_eq!(path, "caps.min"),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn tse_and_distribution_json() {
    let comp = json!([{ "date": "2025-01-01", "A_SI_E": 0, "P_SI_E": 0 }]).to_string();
    let v: Value = serde_json::from_str(&tse_json(&comp).unwrap()).unwrap();
    assert_eq!(v["TSE"], 0);

    let training = json!([{ "date": "2025-01-01", "P_ATT": 10 }]).to_string();
    let out = distribution_json(&training, "[]").unwrap();
    let v: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v[0]["category"], "Attack");
    assert_eq!(v[0]["trainingSharePct"], 100);
    assert_eq!(v[1]["trainingSharePct"], 0);
    assert_eq!(v[0]["competitionSharePct"], 0);
}

#[test]
fn undated_row_counts_for_season_but_not_for_windows() {
    let store = json!({
        "trainingBouts": [
            { "date": "2025-03-10", "result": "L", "A_ATT": 4, "P_ATT": 2 },
            { "result": "W", "A_ATT": 4, "P_ATT": 4 }
        ]
    });
    let out = analyze_json(&store.to_string(), "2025-03-10", None).expect("undated row is tolerated");
    let v: Value = serde_json::from_str(&out).unwrap();

    assert_eq!(v["cesToday"]["attempts"], 4);
    assert_eq!(v["cesToday"]["CES"], 50);
    assert_eq!(v["cesWindow"]["attempts"], 4);
    assert_eq!(v["se"]["totals"]["totalBouts"], 2);
    assert_eq!(v["se"]["totals"]["victories"], 1);
    assert_eq!(v["distribution"][0]["trainingSharePct"], 100);
}
