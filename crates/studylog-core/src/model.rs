//! Core data model types for studylog.
//!
//! These are the types the store persists and the statistics read:
//! modules with their semester assignment, and grade records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::grade::GradeInput;

/// Where a module sits in the study plan.
///
/// Stored as a plain integer: `0` unplanned, `1..=8` a regular term,
/// `9` credits recognized from elsewhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Semester {
    #[default]
    Unplanned,
    Term(u8),
    Recognized,
}

impl Semester {
    /// Last regular term number.
    pub const LAST_TERM: u8 = 8;

    /// Normalize a raw number. Anything outside `1..=9` is unplanned.
    pub fn from_number(n: i64) -> Self {
        match n {
            1..=8 => Semester::Term(n as u8),
            9 => Semester::Recognized,
            _ => Semester::Unplanned,
        }
    }

    /// The stored integer.
    pub fn number(self) -> u8 {
        match self {
            Semester::Unplanned => 0,
            Semester::Term(n) => n,
            Semester::Recognized => 9,
        }
    }

    pub fn is_planned(self) -> bool {
        !matches!(self, Semester::Unplanned)
    }

    /// All planned slots in display order.
    pub fn planned() -> impl Iterator<Item = Semester> {
        (1..=9).map(Semester::from_number)
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Semester::Unplanned => write!(f, "---"),
            Semester::Term(n) => write!(f, "{n}"),
            Semester::Recognized => write!(f, "recognized"),
        }
    }
}

impl FromStr for Semester {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "" | "-" | "---" | "none" | "unplanned" => Ok(Semester::Unplanned),
            "recognized" | "anrechnung" => Ok(Semester::Recognized),
            other => other
                .parse::<i64>()
                .map(Semester::from_number)
                .map_err(|_| format!("invalid semester: {s}")),
        }
    }
}

impl Serialize for Semester {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

impl<'de> Deserialize<'de> for Semester {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let n = i64::deserialize(deserializer)?;
        Ok(Semester::from_number(n))
    }
}

/// A university module in the study plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// Unique short name (e.g. "linalg").
    pub name: String,
    /// Catalog identifier; dependencies refer to it.
    #[serde(default)]
    pub mod_id: Option<u32>,
    /// Human-readable title.
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Part of the assessment stage.
    #[serde(default)]
    pub assessment: bool,
    /// Ends with a final exam (MSP).
    #[serde(default)]
    pub has_final_exam: bool,
    #[serde(default)]
    pub ects: u32,
    /// Catalog ids of modules that must be scheduled first.
    #[serde(default)]
    pub dependencies: Vec<u32>,
    #[serde(default)]
    pub semester: Semester,
}

impl Module {
    /// Create an unplanned module with just a name and title.
    pub fn new(name: impl Into<String>, title: impl Into<String>, ects: u32) -> Self {
        Self {
            name: name.into(),
            mod_id: None,
            title: title.into(),
            description: String::new(),
            assessment: false,
            has_final_exam: false,
            ects,
            dependencies: Vec::new(),
            semester: Semester::Unplanned,
        }
    }

    /// Project modules are booked separately in ECTS statistics.
    pub fn is_project(&self) -> bool {
        let title = self.title.to_lowercase();
        ["projekt", "project"].iter().any(|kw| title.contains(kw))
    }
}

/// One saved grade entry for a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    /// Increasing id; the highest id per module is its current grade.
    pub id: u64,
    /// Name of the module this grade belongs to.
    pub module: String,
    pub recorded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub input: GradeInput,
}

/// The persisted study log document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyLog {
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(default)]
    pub grades: Vec<GradeRecord>,
    #[serde(default = "default_next_id")]
    pub next_grade_id: u64,
}

fn default_next_id() -> u64 {
    1
}
