// core/src/models.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::RecordError;

// ──────────────────────────────────────────────────────────────────────────────
// Kategorier og segmenter
// ──────────────────────────────────────────────────────────────────────────────

/// Taktisk kategori. Rekkefølgen i `ALL` er også rekkefølgen i all output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Attack,
    ParryRiposte,
    Counter,
    SecondIntention,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Attack,
        Category::ParryRiposte,
        Category::Counter,
        Category::SecondIntention,
    ];

    /// Nøkkelfragment i de flate feltnavnene (`A_ATT`, `P_PR_E`, ...).
    pub fn key(self) -> &'static str {
        match self {
            Category::Attack => "ATT",
            Category::ParryRiposte => "PR",
            Category::Counter => "CNT",
            Category::SecondIntention => "SI",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Attack => "Attack",
            Category::ParryRiposte => "Parry-Riposte",
            Category::Counter => "Counter",
            Category::SecondIntention => "Second-Intention",
        }
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.label())
    }
}

/// Tredjedel av en konkurransekamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    Early,
    Mid,
    Late,
}

impl Segment {
    pub const ALL: [Segment; 3] = [Segment::Early, Segment::Mid, Segment::Late];

    /// Suffiks i de flate feltnavnene (`A_ATT_E` osv.).
    pub fn suffix(self) -> &'static str {
        match self {
            Segment::Early => "E",
            Segment::Mid => "M",
            Segment::Late => "L",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Segment::Early => 0,
            Segment::Mid => 1,
            Segment::Late => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoutKind {
    #[default]
    Training,
    Competition,
}

impl BoutKind {
    fn parse(s: &str) -> Option<BoutKind> {
        match s.trim().to_ascii_lowercase().as_str() {
            "training" | "train" => Some(BoutKind::Training),
            "competition" | "comp" => Some(BoutKind::Competition),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoutResult {
    Win,
    #[default]
    Loss,
}

impl BoutResult {
    /// Kun eksplisitt seier ("W"/"win") teller; alt annet er tap.
    pub fn parse_lenient(s: &str) -> BoutResult {
        match s.trim().to_ascii_uppercase().as_str() {
            "W" | "WIN" => BoutResult::Win,
            _ => BoutResult::Loss,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            BoutResult::Win => "W",
            BoutResult::Loss => "L",
        }
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Tellere
// ──────────────────────────────────────────────────────────────────────────────

/// Forsøk og poeng per taktisk kategori. Brukes både per økt og som
/// summerte totaler (`AggregatedTotals`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionCounts {
    #[serde(rename = "A_ATT", default, deserialize_with = "lenient_count")]
    pub a_att: u64,
    #[serde(rename = "P_ATT", default, deserialize_with = "lenient_count")]
    pub p_att: u64,
    #[serde(rename = "A_PR", default, deserialize_with = "lenient_count")]
    pub a_pr: u64,
    #[serde(rename = "P_PR", default, deserialize_with = "lenient_count")]
    pub p_pr: u64,
    #[serde(rename = "A_CNT", default, deserialize_with = "lenient_count")]
    pub a_cnt: u64,
    #[serde(rename = "P_CNT", default, deserialize_with = "lenient_count")]
    pub p_cnt: u64,
    #[serde(rename = "A_SI", default, deserialize_with = "lenient_count")]
    pub a_si: u64,
    #[serde(rename = "P_SI", default, deserialize_with = "lenient_count")]
    pub p_si: u64,
}

/// Summerte totaler over et utvalg økter.
pub type AggregatedTotals = ActionCounts;

impl ActionCounts {
    pub fn attempts(&self, cat: Category) -> u64 {
        match cat {
            Category::Attack => self.a_att,
            Category::ParryRiposte => self.a_pr,
            Category::Counter => self.a_cnt,
            Category::SecondIntention => self.a_si,
        }
    }

    pub fn points(&self, cat: Category) -> u64 {
        match cat {
            Category::Attack => self.p_att,
            Category::ParryRiposte => self.p_pr,
            Category::Counter => self.p_cnt,
            Category::SecondIntention => self.p_si,
        }
    }

    pub fn set(&mut self, cat: Category, attempts: u64, points: u64) {
        let (a, p) = match cat {
            Category::Attack => (&mut self.a_att, &mut self.p_att),
            Category::ParryRiposte => (&mut self.a_pr, &mut self.p_pr),
            Category::Counter => (&mut self.a_cnt, &mut self.p_cnt),
            Category::SecondIntention => (&mut self.a_si, &mut self.p_si),
        };
        *a = attempts;
        *p = points;
    }

    pub fn total_attempts(&self) -> u64 {
        Category::ALL
            .iter()
            .fold(0u64, |acc, c| acc.saturating_add(self.attempts(*c)))
    }

    pub fn total_points(&self) -> u64 {
        Category::ALL
            .iter()
            .fold(0u64, |acc, c| acc.saturating_add(self.points(*c)))
    }

    /// Feltvis (mettende) sum.
    pub fn add(&mut self, other: &ActionCounts) {
        for cat in Category::ALL {
            let a = self.attempts(cat).saturating_add(other.attempts(cat));
            let p = self.points(cat).saturating_add(other.points(cat));
            self.set(cat, a, p);
        }
    }

    fn from_wire(m: &Map<String, Value>, suffix: &str) -> ActionCounts {
        let mut out = ActionCounts::default();
        for cat in Category::ALL {
            let a = m.get(&wire_key("A", cat, suffix)).map(count_value).unwrap_or(0);
            let p = m.get(&wire_key("P", cat, suffix)).map(count_value).unwrap_or(0);
            out.set(cat, a, p);
        }
        out
    }

    fn write_wire(&self, m: &mut Map<String, Value>, suffix: &str) {
        for cat in Category::ALL {
            m.insert(wire_key("A", cat, suffix), Value::from(self.attempts(cat)));
            m.insert(wire_key("P", cat, suffix), Value::from(self.points(cat)));
        }
    }
}

/// `A_ATT`, `P_PR_E`, ... (tom suffiks gir summerte felt).
pub fn wire_key(prefix: &str, cat: Category, suffix: &str) -> String {
    if suffix.is_empty() {
        format!("{}_{}", prefix, cat.key())
    } else {
        format!("{}_{}_{}", prefix, cat.key(), suffix)
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Tolerant tallkonvertering
// ──────────────────────────────────────────────────────────────────────────────

/// Tall → ikke-negativt heltall (avkortet). Numeriske strenger tolkes;
/// negative, ikke-endelige, ikke-numeriske og null blir 0.
pub fn count_value(v: &Value) -> u64 {
    match v {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u
            } else {
                n.as_f64().map(float_to_count).unwrap_or(0)
            }
        }
        Value::String(s) => s.trim().parse::<f64>().map(float_to_count).unwrap_or(0),
        _ => 0,
    }
}

fn float_to_count(x: f64) -> u64 {
    if x.is_finite() && x > 0.0 { x.trunc() as u64 } else { 0 }
}

fn lenient_count<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(count_value(&v))
}

fn lenient_minutes<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(count_value(&v).min(u32::MAX as u64) as u32)
}

/// `YYYY-MM-DD`; et eventuelt tidssuffiks (`T...`) ignoreres.
pub fn parse_date(s: &str) -> Result<NaiveDate, RecordError> {
    let t = s.trim();
    let head = t.get(..10).unwrap_or(t);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").map_err(|_| RecordError::InvalidDate(s.to_string()))
}

fn parse_timestamp(v: &Value) -> Option<DateTime<Utc>> {
    let s = v.as_str()?;
    match DateTime::parse_from_rfc3339(s.trim()) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            log::debug!("ignorerer ugyldig createdAt '{}': {}", s, e);
            None
        }
    }
}

fn text_value(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Ugyldig eller manglende dato gir `None`; raden beholdes.
fn lenient_date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(date_value(&v))
}

fn date_value(v: &Value) -> Option<NaiveDate> {
    let s = v.as_str()?;
    match parse_date(s) {
        Ok(d) => Some(d),
        Err(e) => {
            log::warn!("⚠️ {}; raden beholdes uten dato", e);
            None
        }
    }
}

fn lenient_timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(parse_timestamp(&v))
}

// ──────────────────────────────────────────────────────────────────────────────
// SessionRecord
// ──────────────────────────────────────────────────────────────────────────────

/// Én loggført trenings- eller konkurransekamp.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct SessionRecord {
    /// `None` når datoen mangler eller ikke kan tolkes. Raden teller da i
    /// SE/TSE/fordeling, men havner aldri i et datovindu.
    pub date: Option<NaiveDate>,
    pub kind: BoutKind,
    pub result: BoutResult,
    pub actions: ActionCounts,
    /// Tidlig/midt/sen – kun for konkurranser.
    pub segments: Option<[ActionCounts; 3]>,
    pub opponent: Option<String>,
    pub event: Option<String>,
    pub nation: Option<String>,
    pub round: Option<String>,
    pub score: Option<String>,
    pub ces: Option<u32>,
    pub created_at: Option<DateTime<Utc>>,
}

impl SessionRecord {
    pub fn training(date: NaiveDate, result: BoutResult, actions: ActionCounts) -> Self {
        SessionRecord {
            date: Some(date),
            kind: BoutKind::Training,
            result,
            actions,
            segments: None,
            opponent: None,
            event: None,
            nation: None,
            round: None,
            score: None,
            ces: None,
            created_at: None,
        }
    }

    /// Konkurransekamp der de summerte tellerne utledes fra segmentene.
    pub fn competition(date: NaiveDate, result: BoutResult, segments: [ActionCounts; 3]) -> Self {
        let actions = sum_segments(&segments);
        SessionRecord {
            kind: BoutKind::Competition,
            segments: Some(segments),
            ..SessionRecord::training(date, result, actions)
        }
    }

    pub fn is_win(&self) -> bool {
        self.result == BoutResult::Win
    }

    pub fn segment(&self, seg: Segment) -> Option<&ActionCounts> {
        self.segments.as_ref().map(|s| &s[seg.index()])
    }

    /// Summen av de tre segmentene, eller `None` for trening.
    pub fn segment_totals(&self) -> Option<ActionCounts> {
        self.segments.as_ref().map(sum_segments)
    }

    /// Fester CES for øktens egne tellere (brukes når raden lagres).
    /// Samme klemte 0–100-verdi som `compute_ces`, også når poeng > forsøk.
    pub fn with_computed_ces(mut self) -> Self {
        self.ces = Some(crate::ces::compute_ces(&self.actions).ces);
        self
    }

    /// Tolker en flat rad. `kind_hint` (fra samlingen raden ligger i) vinner
    /// over et eventuelt `type`-felt. Feiler aldri; ugyldige felt blir 0/`None`.
    pub fn from_wire(m: &Map<String, Value>, kind_hint: Option<BoutKind>) -> Self {
        let date = match m.get("date") {
            Some(v) => date_value(v),
            None => {
                log::warn!("⚠️ rad uten dato; raden beholdes uten dato");
                None
            }
        };

        let kind = kind_hint
            .or_else(|| m.get("type").and_then(Value::as_str).and_then(BoutKind::parse))
            .unwrap_or_default();

        let result = m
            .get("result")
            .and_then(Value::as_str)
            .map(BoutResult::parse_lenient)
            .unwrap_or_default();

        let segments = match kind {
            BoutKind::Competition => Some(Segment::ALL.map(|s| ActionCounts::from_wire(m, s.suffix()))),
            BoutKind::Training => None,
        };

        // Konkurranserader uten summerte felt får totalene fra segmentene.
        let has_totals = Category::ALL
            .iter()
            .any(|c| m.contains_key(&wire_key("A", *c, "")) || m.contains_key(&wire_key("P", *c, "")));
        let actions = match &segments {
            Some(segs) if !has_totals => sum_segments(segs),
            _ => ActionCounts::from_wire(m, ""),
        };

        let text = |k: &str| m.get(k).and_then(text_value);

        SessionRecord {
            date,
            kind,
            result,
            actions,
            segments,
            opponent: text("opponent"),
            event: text("event"),
            nation: text("nation"),
            round: text("round"),
            score: text("score"),
            ces: m
                .get("CES")
                .filter(|v| !v.is_null())
                .map(|v| count_value(v).min(u32::MAX as u64) as u32),
            created_at: m.get("createdAt").and_then(parse_timestamp),
        }
    }

    /// Flat rad (`A_ATT`, `P_ATT_E`, `CES`, `createdAt`, ...).
    pub fn to_wire(&self) -> Map<String, Value> {
        let mut m = Map::new();
        let date = self.date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();
        m.insert("date".into(), Value::from(date));
        let kind = match self.kind {
            BoutKind::Training => "training",
            BoutKind::Competition => "competition",
        };
        m.insert("type".into(), Value::from(kind));
        m.insert("result".into(), Value::from(self.result.code()));

        let meta = [
            ("opponent", &self.opponent),
            ("event", &self.event),
            ("nation", &self.nation),
            ("round", &self.round),
            ("score", &self.score),
        ];
        for (k, v) in meta {
            if let Some(s) = v {
                m.insert(k.into(), Value::from(s.as_str()));
            }
        }

        self.actions.write_wire(&mut m, "");
        if let Some(segs) = &self.segments {
            for seg in Segment::ALL {
                segs[seg.index()].write_wire(&mut m, seg.suffix());
            }
        }
        if let Some(c) = self.ces {
            m.insert("CES".into(), Value::from(c));
        }
        if let Some(ts) = self.created_at {
            m.insert("createdAt".into(), Value::from(ts.to_rfc3339()));
        }
        m
    }
}

impl From<Map<String, Value>> for SessionRecord {
    fn from(m: Map<String, Value>) -> Self {
        SessionRecord::from_wire(&m, None)
    }
}

fn sum_segments(segments: &[ActionCounts; 3]) -> ActionCounts {
    let mut total = ActionCounts::default();
    for seg in segments {
        total.add(seg);
    }
    total
}

impl Serialize for SessionRecord {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        self.to_wire().serialize(s)
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// LessonRecord
// ──────────────────────────────────────────────────────────────────────────────

fn default_lesson_minutes() -> u32 {
    60
}

/// Én trenertime. Kun antallet brukes (arbeidsmengde i SE).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonRecord {
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    #[serde(
        rename = "durationMin",
        alias = "durationMinutes",
        default = "default_lesson_minutes",
        deserialize_with = "lenient_minutes"
    )]
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub athlete: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(
        rename = "createdAt",
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl LessonRecord {
    pub fn new(date: NaiveDate, duration_minutes: u32) -> Self {
        LessonRecord {
            date: Some(date),
            duration_minutes,
            athlete: None,
            notes: None,
            created_at: None,
        }
    }
}

/// Kampresultat som tekst: "" når begge mangler, ellers "meg-motstander"
/// der en tom side skrives som 0.
pub fn format_score(me: Option<u32>, opp: Option<u32>) -> String {
    match (me, opp) {
        (None, None) => String::new(),
        (a, b) => format!("{}-{}", a.unwrap_or(0), b.unwrap_or(0)),
    }
}
