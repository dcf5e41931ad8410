use bulkcancel_core::{InputRecord, SENTINEL_ID};

#[test]
fn splits_period_start() {
    let r = InputRecord::from_period_start("P-1", "04/01/2025");
    assert_eq!(r, InputRecord::new("P-1", "04", "01", "2025"));
}

#[test]
fn short_period_start_leaves_parts_empty() {
    let r = InputRecord::from_period_start("P-1", "04/01");
    assert_eq!(r.month, "04");
    assert_eq!(r.day, "01");
    assert_eq!(r.year, "");

    let r = InputRecord::from_period_start("P-1", "");
    assert_eq!((r.month.as_str(), r.day.as_str(), r.year.as_str()), ("", "", ""));
}

#[test]
fn blank_id_gets_sentinel() {
    let r = InputRecord::new("  ", "1", "2", "2024").with_sentinel_id();
    assert_eq!(r.id, SENTINEL_ID);
    assert_eq!(SENTINEL_ID, "999999999");
}

#[test]
fn present_id_is_kept() {
    let r = InputRecord::new("P-9", "1", "2", "2024").with_sentinel_id();
    assert_eq!(r.id, "P-9");
}
