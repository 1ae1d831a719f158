use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    #[default]
    Month,
    Year,
    All,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Year => "year",
            Self::All => "all",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "month" | "m" => Some(Self::Month),
            "year" | "y" => Some(Self::Year),
            "all" | "a" => Some(Self::All),
            _ => None,
        }
    }

    pub fn all() -> &'static [TimeRange] {
        &[Self::Month, Self::Year, Self::All]
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Month => Self::Year,
            Self::Year => Self::All,
            Self::All => Self::Month,
        }
    }

    /// Date prefix a transaction must start with to fall in this range.
    /// `None` means every transaction matches.
    pub fn prefix(&self, reference: NaiveDate) -> Option<String> {
        match self {
            Self::Month => Some(month_key(reference)),
            Self::Year => Some(reference.format("%Y").to_string()),
            Self::All => None,
        }
    }

    /// Human label for headers, e.g. "2024-06", "2024" or "All Time".
    pub fn label(&self, reference: NaiveDate) -> String {
        self.prefix(reference).unwrap_or_else(|| "All Time".to_string())
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reference date truncated to "YYYY-MM".
pub fn month_key(reference: NaiveDate) -> String {
    reference.format("%Y-%m").to_string()
}
