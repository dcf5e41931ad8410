mod body;
mod expr;

pub use body::{parse_template, BodyEscape, BodyTemplate, Segment, TemplateError};
pub use expr::{parse_record_expr, RecordExprError, RecordField};
