// core/src/storage.rs
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::StoreError;
use crate::models::{BoutKind, LessonRecord, SessionRecord};

/// Eksplisitt postlager. Motoren refererer aldri til et lager; kalleren
/// henter samlingene herfra og sender dem inn som argumenter.
pub trait RecordStore {
    fn sessions(&self, kind: BoutKind) -> Result<Vec<SessionRecord>, StoreError>;
    fn lessons(&self) -> Result<Vec<LessonRecord>, StoreError>;
    fn append_session(&mut self, record: SessionRecord) -> Result<(), StoreError>;
    fn append_lesson(&mut self, lesson: LessonRecord) -> Result<(), StoreError>;
}

/// Hele lageret som ett JSON-dokument (`trainingBouts` / `competitionBouts` / `lessons`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(rename = "trainingBouts", default)]
    pub training: Vec<Map<String, Value>>,
    #[serde(rename = "competitionBouts", alias = "compBouts", default)]
    pub competition: Vec<Map<String, Value>>,
    #[serde(default)]
    pub lessons: Vec<LessonRecord>,
}

/// Tolkede samlinger, klare for motoren.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    pub training: Vec<SessionRecord>,
    pub competition: Vec<SessionRecord>,
    pub lessons: Vec<LessonRecord>,
}

impl RecordSet {
    pub fn to_document(&self) -> StoreDocument {
        StoreDocument {
            training: self.training.iter().map(SessionRecord::to_wire).collect(),
            competition: self.competition.iter().map(SessionRecord::to_wire).collect(),
            lessons: self.lessons.clone(),
        }
    }

    /// Nyeste rad først. CES festes hvis den mangler.
    fn push_session(&mut self, record: SessionRecord) {
        let record = if record.ces.is_none() { record.with_computed_ces() } else { record };
        let rows = match record.kind {
            BoutKind::Training => &mut self.training,
            BoutKind::Competition => &mut self.competition,
        };
        rows.insert(0, record);
    }

    fn push_lesson(&mut self, lesson: LessonRecord) {
        self.lessons.insert(0, lesson);
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RecordSet,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: RecordSet) -> Self {
        Self { records }
    }
}

impl RecordStore for MemoryStore {
    fn sessions(&self, kind: BoutKind) -> Result<Vec<SessionRecord>, StoreError> {
        Ok(match kind {
            BoutKind::Training => self.records.training.clone(),
            BoutKind::Competition => self.records.competition.clone(),
        })
    }

    fn lessons(&self) -> Result<Vec<LessonRecord>, StoreError> {
        Ok(self.records.lessons.clone())
    }

    fn append_session(&mut self, record: SessionRecord) -> Result<(), StoreError> {
        self.records.push_session(record);
        Ok(())
    }

    fn append_lesson(&mut self, lesson: LessonRecord) -> Result<(), StoreError> {
        self.records.push_lesson(lesson);
        Ok(())
    }
}

/// JSON-fil på disk. Filen leses ved `open` og skrives helt på nytt ved hver append.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    records: RecordSet,
}

impl JsonFileStore {
    /// Åpner lageret. Mangler filen, startes et tomt lager.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let records = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            let records = parse_store(&contents)?;
            log::info!(
                "📂 Lager lastet fra {} ({} trening, {} konkurranse, {} timer)",
                path.display(),
                records.training.len(),
                records.competition.len(),
                records.lessons.len()
            );
            records
        } else {
            log::warn!("⚠️ Fant ikke lager på {}, starter tomt", path.display());
            RecordSet::default()
        };
        Ok(Self { path, records })
    }

    fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.records.to_document()).map_err(|source| {
            StoreError::Json { path: "<root>".into(), source }
        })?;
        std::fs::write(&self.path, json)?;
        log::info!("✅ Lager lagret til {}", self.path.display());
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn sessions(&self, kind: BoutKind) -> Result<Vec<SessionRecord>, StoreError> {
        Ok(match kind {
            BoutKind::Training => self.records.training.clone(),
            BoutKind::Competition => self.records.competition.clone(),
        })
    }

    fn lessons(&self) -> Result<Vec<LessonRecord>, StoreError> {
        Ok(self.records.lessons.clone())
    }

    fn append_session(&mut self, record: SessionRecord) -> Result<(), StoreError> {
        self.records.push_session(record);
        self.save()
    }

    fn append_lesson(&mut self, lesson: LessonRecord) -> Result<(), StoreError> {
        self.records.push_lesson(lesson);
        self.save()
    }
}

/// Tolker et lagerdokument. Bare et dokument med feil form (f.eks. en
/// samling som ikke er en liste) feiler, med feilstien i feilen. Enkeltrader
/// med ugyldige felt beholdes (0 / uten dato).
pub fn parse_store(json_in: &str) -> Result<RecordSet, StoreError> {
    let mut de = serde_json::Deserializer::from_str(json_in);
    let doc: StoreDocument = serde_path_to_error::deserialize(&mut de).map_err(|e| {
        let path = e.path().to_string();
        StoreError::Json { path, source: e.into_inner() }
    })?;

    let parse = |rows: &[Map<String, Value>], kind: BoutKind, key: &str| {
        rows.iter()
            .enumerate()
            .map(|(i, m)| {
                let record = SessionRecord::from_wire(m, Some(kind));
                if record.date.is_none() {
                    log::warn!("⚠️ {}[{}].date mangler eller er ugyldig", key, i);
                }
                record
            })
            .collect::<Vec<_>>()
    };

    let undated_lessons = doc.lessons.iter().filter(|l| l.date.is_none()).count();
    if undated_lessons > 0 {
        log::warn!("⚠️ {} timer uten gyldig dato", undated_lessons);
    }

    Ok(RecordSet {
        training: parse(&doc.training, BoutKind::Training, "trainingBouts"),
        competition: parse(&doc.competition, BoutKind::Competition, "competitionBouts"),
        lessons: doc.lessons,
    })
}
