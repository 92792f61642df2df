use std::fmt;
use std::str::FromStr;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;

const ROW_ID_LEN: usize = 12;

// Render-only identifier of a row. Positions are what the model addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowId(pub String);

impl RowId {
    pub fn generate() -> Self {
        let id = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(ROW_ID_LEN)
            .map(char::from)
            .collect();
        RowId(id)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// One row of the form. Credits and grade hold the raw text the user entered.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CourseEntry {
    #[serde(skip)]
    pub id: RowId,
    pub name: String,
    pub credits: String,
    pub grade: String,
}

impl CourseEntry {
    pub fn new(name: &str, credits: &str, grade: &str) -> Self {
        CourseEntry {
            id: RowId::generate(),
            name: name.to_string(),
            credits: credits.to_string(),
            grade: grade.to_string(),
        }
    }

    /// Numeric coercion of the credits field. Blank or unparsable text is `NaN`.
    pub fn credit_value(&self) -> f64 {
        let trimmed = self.credits.trim();
        if trimmed.is_empty() {
            return f64::NAN;
        }
        trimmed.parse::<f64>().unwrap_or(f64::NAN)
    }
}

impl Default for CourseEntry {
    fn default() -> Self {
        CourseEntry::new("", "1", "A")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Letter {
    A,
    B,
    C,
    D,
    F,
}

impl Letter {
    pub const ALL: [Letter; 5] = [Letter::A, Letter::B, Letter::C, Letter::D, Letter::F];

    pub fn points(self) -> f64 {
        match self {
            Letter::A => 4.0,
            Letter::B => 3.0,
            Letter::C => 2.0,
            Letter::D => 1.0,
            Letter::F => 0.0,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Letter::A => "A",
            Letter::B => "B",
            Letter::C => "C",
            Letter::D => "D",
            Letter::F => "F",
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown grade symbol '{0}'")]
pub struct UnknownLetter(pub String);

impl FromStr for Letter {
    type Err = UnknownLetter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Letter::ALL
            .iter()
            .copied()
            .find(|letter| letter.symbol() == s)
            .ok_or_else(|| UnknownLetter(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Credits,
    Grade,
}

impl FromStr for Field {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(Field::Name),
            "credits" => Ok(Field::Credits),
            "grade" => Ok(Field::Grade),
            other => Err(anyhow::anyhow!("unknown field '{}'", other)),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Name => "name",
            Field::Credits => "credits",
            Field::Grade => "grade",
        };
        f.write_str(name)
    }
}

pub const NO_RESULT_PLACEHOLDER: &str = "___";

// Derived from the course list on every change, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GpaResult {
    Value(f64),
    NoResult,
}

impl fmt::Display for GpaResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpaResult::Value(v) => write!(f, "{:.2}", v),
            GpaResult::NoResult => f.write_str(NO_RESULT_PLACEHOLDER),
        }
    }
}
