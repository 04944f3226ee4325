// core/src/export.rs
use std::io::Write;

use serde_json::Value;

use crate::error::ExportError;
use crate::models::{wire_key, BoutKind, Category, Segment, SessionRecord};

/// Kolonnerekkefølge for treningseksport.
pub const TRAINING_COLUMNS: [&str; 14] = [
    "date", "opponent", "result", "score",
    "A_ATT", "P_ATT", "A_PR", "P_PR", "A_CNT", "P_CNT", "A_SI", "P_SI",
    "CES", "createdAt",
];

const COMPETITION_META: [&str; 7] = ["date", "event", "opponent", "nation", "round", "result", "score"];

/// Kolonnerekkefølge for konkurranseeksport: meta, summerte felt,
/// segmentfelt per kategori (E/M/L), deretter CES og createdAt.
pub fn competition_columns() -> Vec<String> {
    let mut cols: Vec<String> = COMPETITION_META.iter().map(|s| s.to_string()).collect();
    for cat in Category::ALL {
        cols.push(wire_key("A", cat, ""));
        cols.push(wire_key("P", cat, ""));
    }
    for cat in Category::ALL {
        for seg in Segment::ALL {
            cols.push(wire_key("A", cat, seg.suffix()));
            cols.push(wire_key("P", cat, seg.suffix()));
        }
    }
    cols.push("CES".into());
    cols.push("createdAt".into());
    cols
}

pub fn columns_for(kind: BoutKind) -> Vec<String> {
    match kind {
        BoutKind::Training => TRAINING_COLUMNS.iter().map(|s| s.to_string()).collect(),
        BoutKind::Competition => competition_columns(),
    }
}

fn cell(v: Option<&Value>) -> String {
    match v {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Skriver header + én linje per rad. Manglende felt blir tomme celler;
/// sitering skjer kun når en verdi inneholder `"`, `,` eller linjeskift.
pub fn write_csv<W: Write>(writer: W, records: &[SessionRecord], kind: BoutKind) -> Result<(), ExportError> {
    let cols = columns_for(kind);
    let mut w = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    w.write_record(&cols)?;
    for r in records {
        let row = r.to_wire();
        w.write_record(cols.iter().map(|c| cell(row.get(c.as_str()))))?;
    }
    w.flush()?;

    log::info!("eksporterte {} rader ({:?})", records.len(), kind);
    Ok(())
}

pub fn to_csv_string(records: &[SessionRecord], kind: BoutKind) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_csv(&mut buf, records, kind)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Standard filnavn for eksporten.
pub fn default_file_name(kind: BoutKind) -> &'static str {
    match kind {
        BoutKind::Training => "training.csv",
        BoutKind::Competition => "competition.csv",
    }
}
