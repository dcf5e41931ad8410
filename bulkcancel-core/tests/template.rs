use bulkcancel_core::template::{
    parse_template, BodyEscape, RecordExprError, RecordField, TemplateError,
};
use bulkcancel_core::InputRecord;

fn record() -> InputRecord {
    InputRecord::new("P-100", "03", "15", "2024")
}

#[test]
fn renders_record_fields_inside_json() {
    let tpl = parse_template(
        r#"{"policyNumber":"{$record.id}","effectiveDate":"{$record.year}-{$record.month}-{ $record.day }"}"#,
    )
    .unwrap();
    assert_eq!(
        tpl.render(&record()),
        r#"{"policyNumber":"P-100","effectiveDate":"2024-03-15"}"#
    );
    let fields: Vec<RecordField> = tpl.fields().collect();
    assert_eq!(
        fields,
        vec![
            RecordField::Id,
            RecordField::Year,
            RecordField::Month,
            RecordField::Day
        ]
    );
}

#[test]
fn plain_text_has_no_fields() {
    let tpl = parse_template("cancel all the things").unwrap();
    assert_eq!(tpl.fields().count(), 0);
    assert_eq!(tpl.render(&record()), "cancel all the things");
}

#[test]
fn rejects_unclosed_expression() {
    let err = parse_template(r#"{"id":"{$record.id"#).unwrap_err();
    assert_eq!(err, TemplateError::UnclosedExpression);
}

#[test]
fn rejects_unknown_field_and_root() {
    let err = parse_template("{$record.policy}").unwrap_err();
    assert_eq!(
        err,
        TemplateError::InvalidExpression(RecordExprError::UnknownField("policy".to_string()))
    );

    let err = parse_template("{$inputs.id}").unwrap_err();
    assert!(matches!(
        err,
        TemplateError::InvalidExpression(RecordExprError::UnknownRoot(_))
    ));
}

#[test]
fn empty_template_renders_empty_body() {
    let tpl = parse_template("").unwrap();
    assert!(tpl.segments.is_empty());
    assert_eq!(tpl.render(&record()), "");
}

#[test]
fn json_escape_keeps_body_valid_for_awkward_ids() {
    let awkward = InputRecord::new("P\"1\\x\n", "03", "15", "2024");
    let tpl = parse_template(r#"{"policy":"{$record.id}","year":"{$record.year}"}"#).unwrap();

    assert_eq!(tpl.render(&awkward), "{\"policy\":\"P\"1\\x\n\",\"year\":\"2024\"}");

    let tpl = tpl.with_escape(BodyEscape::Json);
    assert_eq!(
        tpl.render(&awkward),
        r#"{"policy":"P\"1\\x\n","year":"2024"}"#
    );
    assert_eq!(
        tpl.render(&record()),
        r#"{"policy":"P-100","year":"2024"}"#
    );
}
