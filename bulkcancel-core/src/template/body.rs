use std::borrow::Cow;

use serde::Deserialize;

use super::expr::{parse_record_expr, RecordExprError, RecordField};
use crate::types::InputRecord;

/// How record values are written into the rendered body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyEscape {
    /// Values are inserted verbatim.
    #[default]
    None,
    /// Values are escaped as JSON string content; the template supplies the quotes.
    Json,
}

impl BodyEscape {
    fn apply<'a>(&self, value: &'a str) -> Cow<'a, str> {
        match self {
            BodyEscape::None => Cow::Borrowed(value),
            BodyEscape::Json => escape_json_str(value),
        }
    }
}

fn escape_json_str(value: &str) -> Cow<'_, str> {
    if !value.chars().any(|c| c == '"' || c == '\\' || c.is_control()) {
        return Cow::Borrowed(value);
    }
    match serde_json::to_string(value) {
        Ok(quoted) => Cow::Owned(quoted[1..quoted.len() - 1].to_string()),
        Err(_) => Cow::Borrowed(value),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Field(RecordField),
}

/// Request body text with embedded `{$record.<field>}` expressions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BodyTemplate {
    pub segments: Vec<Segment>,
    pub escape: BodyEscape,
}

impl BodyTemplate {
    pub fn parse(input: &str) -> Result<Self, TemplateError> {
        parse_template(input)
    }

    pub fn with_escape(mut self, escape: BodyEscape) -> Self {
        self.escape = escape;
        self
    }

    pub fn render(&self, record: &InputRecord) -> String {
        let mut out = String::new();
        for seg in &self.segments {
            match seg {
                Segment::Literal(s) => out.push_str(s),
                Segment::Field(f) => out.push_str(&self.escape.apply(f.value(record))),
            }
        }
        out
    }

    pub fn fields(&self) -> impl Iterator<Item = RecordField> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Field(f) => Some(*f),
            Segment::Literal(_) => None,
        })
    }
}

pub fn parse_template(input: &str) -> Result<BodyTemplate, TemplateError> {
    let mut segments = Vec::new();
    let mut buf = String::new();
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '{' {
            buf.push(ch);
            continue;
        }

        // `{` is only an expression opener when followed by `$`; JSON objects pass through.
        let mut lookahead = chars.clone();
        while let Some(ws) = lookahead.peek() {
            if ws.is_whitespace() {
                lookahead.next();
            } else {
                break;
            }
        }
        if !matches!(lookahead.peek(), Some('$')) {
            buf.push('{');
            continue;
        }

        // No nesting.
        let mut inner = String::new();
        let mut found = false;
        for n in chars.by_ref() {
            if n == '}' {
                found = true;
                break;
            }
            inner.push(n);
        }
        if !found {
            return Err(TemplateError::UnclosedExpression);
        }

        let field = parse_record_expr(&inner).map_err(TemplateError::InvalidExpression)?;
        if !buf.is_empty() {
            segments.push(Segment::Literal(std::mem::take(&mut buf)));
        }
        segments.push(Segment::Field(field));
    }

    if !buf.is_empty() {
        segments.push(Segment::Literal(buf));
    }

    Ok(BodyTemplate {
        segments,
        escape: BodyEscape::None,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("invalid record expression: {0}")]
    InvalidExpression(#[from] RecordExprError),
    #[error("unclosed embedded expression (missing '}}')")]
    UnclosedExpression,
}
