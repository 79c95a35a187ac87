use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A scoring week and its inclusive `YYYY-MM-DD` date range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Week {
    pub week: i64,
    pub start: String,
    pub end: String,
}

impl Week {
    /// Dates compare as ISO strings, so a malformed row simply never matches.
    pub fn contains(&self, date: NaiveDate) -> bool {
        let day = date.format("%Y-%m-%d").to_string();
        day.as_str() >= self.start.as_str() && day.as_str() <= self.end.as_str()
    }
}
