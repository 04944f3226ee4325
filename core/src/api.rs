// core/src/api.rs
//! JSON inn / JSON ut rundt motoren. Brukes av Python-bindingene og av
//! kallere som bare har rå rader (samme flate feltnavn som CSV-eksporten).

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::Error;
use crate::models::{parse_date, AggregatedTotals, BoutKind, LessonRecord, SessionRecord};
use crate::storage::parse_store;
use crate::types::{Caps, Cfg, SeConfig, Targets, Weights};

fn parse_json<T: DeserializeOwned>(what: &'static str, json_in: &str) -> Result<T, Error> {
    let mut de = serde_json::Deserializer::from_str(json_in);
    serde_path_to_error::deserialize(&mut de).map_err(|e| Error::Parse {
        what,
        path: e.path().to_string(),
        msg: e.inner().to_string(),
    })
}

fn to_records(rows: &[Map<String, Value>], kind: BoutKind) -> Vec<SessionRecord> {
    rows.iter().map(|m| SessionRecord::from_wire(m, Some(kind))).collect()
}

/// Tolker et valgfritt konfigurasjonsdokument og validerer det.
pub fn parse_cfg(cfg_json: Option<&str>) -> Result<Cfg, Error> {
    let cfg = match cfg_json {
        Some(s) if !s.trim().is_empty() => parse_json::<Cfg>("Cfg", s)?,
        _ => Cfg::default(),
    };
    cfg.season.validate()?;
    Ok(cfg)
}

/// Lagerdokument + referansedato (+ valgfri konfig) → rapport som JSON.
pub fn analyze_json(store_json: &str, reference_date: &str, cfg_json: Option<&str>) -> Result<String, Error> {
    let cfg = parse_cfg(cfg_json)?;
    let date = parse_date(reference_date)?;
    let records = parse_store(store_json)?;

    let report = crate::report::build_report(
        &records.training,
        &records.competition,
        &records.lessons,
        date,
        &cfg,
    );
    Ok(serde_json::to_string(&report)?)
}

/// `{A_ATT, P_ATT, ...}` → `{CES, attempts, points}`.
pub fn ces_json(totals_json: &str) -> Result<String, Error> {
    let totals: AggregatedTotals = parse_json("AggregatedTotals", totals_json)?;
    Ok(serde_json::to_string(&crate::ces::compute_ces(&totals))?)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeIn {
    #[serde(default, alias = "trainingBouts")]
    training_records: Vec<Map<String, Value>>,
    #[serde(default, alias = "compRecords", alias = "compBouts")]
    competition_records: Vec<Map<String, Value>>,
    #[serde(default, alias = "lessons")]
    lesson_records: Vec<LessonRecord>,
    #[serde(default)]
    targets: Targets,
    #[serde(default)]
    caps: Caps,
    #[serde(default)]
    weights: Weights,
}

/// `{trainingRecords, competitionRecords, lessonRecords, targets, caps, weights}` → SE.
pub fn se_json(json_in: &str) -> Result<String, Error> {
    let input: SeIn = parse_json("SeIn", json_in)?;
    let cfg = SeConfig { targets: input.targets, caps: input.caps, weights: input.weights };
    cfg.validate()?;

    let training = to_records(&input.training_records, BoutKind::Training);
    let competition = to_records(&input.competition_records, BoutKind::Competition);
    let out = crate::se::compute_se(&training, &competition, &input.lesson_records, &cfg);
    Ok(serde_json::to_string(&out)?)
}

/// Liste med konkurranserader → TSE.
pub fn tse_json(competition_json: &str) -> Result<String, Error> {
    let rows: Vec<Map<String, Value>> = parse_json("competitionRecords", competition_json)?;
    let competition = to_records(&rows, BoutKind::Competition);
    Ok(serde_json::to_string(&crate::tse::compute_tse(&competition))?)
}

/// To lister (trening, konkurranse) → fordelingsrader.
pub fn distribution_json(training_json: &str, competition_json: &str) -> Result<String, Error> {
    let t: Vec<Map<String, Value>> = parse_json("trainingRecords", training_json)?;
    let c: Vec<Map<String, Value>> = parse_json("competitionRecords", competition_json)?;
    let rows = crate::distribution::compute_distribution(
        &to_records(&t, BoutKind::Training),
        &to_records(&c, BoutKind::Competition),
    );
    Ok(serde_json::to_string(&rows)?)
}
