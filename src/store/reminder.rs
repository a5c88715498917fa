use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A single dated, timed, categorized task record.
///
/// `date` carries calendar-day granularity; `time` is shown next to the
/// title but never takes part in ordering or filtering. `created` is kept
/// for display and default ordering only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub category: Category,
    pub priority: Priority,
    pub completed: bool,
    pub created: DateTime<Utc>,
}

/// What the new-reminder form submits. `date` and `time` hold parse
/// results so the store can reject a draft that is missing either.
#[derive(Debug, Clone, Default)]
pub struct ReminderDraft {
    pub title: String,
    pub description: String,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub category: Category,
    pub priority: Priority,
}

/// Open set of reminder categories. The four well-known ones get their
/// own variants; anything else round-trips through `Other` untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Work,
    Personal,
    Health,
    Shopping,
    Other(String),
}

impl Category {
    /// The well-known categories, in the order the filter cycles them.
    pub const KNOWN: [Category; 4] = [
        Category::Work,
        Category::Personal,
        Category::Health,
        Category::Shopping,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Category::Work => "work",
            Category::Personal => "personal",
            Category::Health => "health",
            Category::Shopping => "shopping",
            Category::Other(name) => name,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Work
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "work" => Category::Work,
            "personal" => Category::Personal,
            "health" => Category::Health,
            "shopping" => Category::Shopping,
            _ => Category::Other(raw),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_owned()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed priority scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn cycled(self) -> Self {
        match self {
            Priority::High => Priority::Medium,
            Priority::Medium => Priority::Low,
            Priority::Low => Priority::High,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Times are stored as `HH:MM`, matching the stored payload format.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        // Accept a trailing seconds component from older payloads.
        NaiveTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_unknown_names() {
        let parsed = Category::from("gardening".to_string());
        assert_eq!(parsed, Category::Other("gardening".to_string()));
        assert_eq!(String::from(parsed), "gardening");
    }

    #[test]
    fn reminder_serializes_dates_as_plain_strings() {
        let reminder = Reminder {
            id: 1,
            title: "Team Meeting".to_string(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2025, 11, 11).unwrap(),
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            category: Category::Work,
            priority: Priority::High,
            completed: false,
            created: "2025-11-10T00:00:00Z".parse().unwrap(),
        };

        let json = serde_json::to_string(&reminder).unwrap();
        assert!(json.contains("\"date\":\"2025-11-11\""));
        assert!(json.contains("\"time\":\"10:00\""));
        assert!(json.contains("\"category\":\"work\""));
        assert!(json.contains("\"priority\":\"high\""));

        let back: Reminder = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reminder);
    }
}
