use serde::Serialize;

/// Identifier used for rows that arrive without a policy number.
pub const SENTINEL_ID: &str = "999999999";

/// One unit of work: a policy number plus the cancellation-effective date split into parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputRecord {
    pub id: String,
    pub month: String,
    pub day: String,
    pub year: String,
}

impl InputRecord {
    pub fn new(
        id: impl Into<String>,
        month: impl Into<String>,
        day: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            month: month.into(),
            day: day.into(),
            year: year.into(),
        }
    }

    /// Builds a record from an id and a slash-delimited `MM/DD/YYYY` date.
    ///
    /// Missing date parts become empty strings and anything past the third part is ignored.
    pub fn from_period_start(id: impl Into<String>, period_start: &str) -> Self {
        let mut parts = period_start.split('/').map(str::trim);
        let month = parts.next().unwrap_or_default();
        let day = parts.next().unwrap_or_default();
        let year = parts.next().unwrap_or_default();
        Self::new(id, month, day, year)
    }

    pub fn has_id(&self) -> bool {
        !self.id.trim().is_empty()
    }

    /// Returns the record with [`SENTINEL_ID`] in place of a blank id.
    pub fn with_sentinel_id(mut self) -> Self {
        if !self.has_id() {
            self.id = SENTINEL_ID.to_string();
        }
        self
    }
}
