//models.rs
use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkoutEntry {
    #[serde(deserialize_with = "id_from_text_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<DateTime<Utc>>,
}

/// Insert payload for a backend that assigns the id itself.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewWorkout {
    pub name: String,
    pub date: DateTime<Utc>,
}

impl NewWorkout {
    pub fn now(name: &str) -> Self {
        NewWorkout {
            name: name.to_string(),
            date: Utc::now(),
        }
    }
}

impl WorkoutEntry {
    pub fn display_date(&self) -> String {
        match self.date {
            Some(date) => format_local(DateTime::<Local>::from(date)),
            None => "No date provided".to_string(),
        }
    }
}

fn format_local(date: DateTime<Local>) -> String {
    date.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Accepts RFC 3339, or a timestamp without offset taken as UTC.
fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

// An unreadable date only loses the date, never the entry.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(|v| v.as_str()).and_then(parse_date))
}

// Hosted tables commonly hand out bigint keys.
fn id_from_text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
