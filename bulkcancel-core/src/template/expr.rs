use crate::types::InputRecord;

/// A `$record.<field>` reference inside a body template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Id,
    Month,
    Day,
    Year,
}

impl RecordField {
    pub fn value<'a>(&self, record: &'a InputRecord) -> &'a str {
        match self {
            RecordField::Id => &record.id,
            RecordField::Month => &record.month,
            RecordField::Day => &record.day,
            RecordField::Year => &record.year,
        }
    }
}

pub fn parse_record_expr(input: &str) -> Result<RecordField, RecordExprError> {
    let s = input.trim();
    let Some(head) = s.strip_prefix('$') else {
        return Err(RecordExprError::MissingDollarPrefix);
    };
    let Some(field) = head.strip_prefix("record.") else {
        return Err(RecordExprError::UnknownRoot(head.to_string()));
    };
    match field {
        "id" => Ok(RecordField::Id),
        "month" => Ok(RecordField::Month),
        "day" => Ok(RecordField::Day),
        "year" => Ok(RecordField::Year),
        "" => Err(RecordExprError::EmptyField),
        other => Err(RecordExprError::UnknownField(other.to_string())),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordExprError {
    #[error("expression must start with '$'")]
    MissingDollarPrefix,
    #[error("unknown expression root: ${0} (expected $record.<field>)")]
    UnknownRoot(String),
    #[error("empty record field")]
    EmptyField,
    #[error("unknown record field: {0} (expected id, month, day or year)")]
    UnknownField(String),
}
