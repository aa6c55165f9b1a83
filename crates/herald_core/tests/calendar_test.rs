//! Tests for calendar loading and entry selection.

use chrono::NaiveDate;
use herald_core::{ContentCalendar, PostCategory};
use herald_error::FailureKind;
use std::io::Write;
use tempfile::NamedTempFile;

const CALENDAR: &str = r#"[
    {"date": "2024-06-02", "week": 1, "post_type": "gene", "title": "COMT",
     "content_data": {"gene": "COMT"}, "image_file": "week1_sun_comt.jpg"},
    {"date": "2024-06-04", "week": 1, "post_type": "intervention", "title": "Creatine",
     "content_data": {"name": "Creatine"}, "image_file": "week1_tue_creatine.jpg"},
    {"id": "dup-first", "date": "2024-06-06", "category": "topic",
     "fields": {"topic": "Sleep"}, "image": "a.jpg"},
    {"id": "dup-second", "date": "2024-06-06", "category": "topic",
     "fields": {"topic": "Stress"}, "image": "b.jpg"}
]"#;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_selects_entry_by_date() {
    let calendar = ContentCalendar::from_json(CALENDAR).unwrap();

    let entry = calendar.entry_for(date(2024, 6, 4)).unwrap();
    assert_eq!(*entry.category(), PostCategory::Intervention);
    assert_eq!(entry.display_title(), "Creatine");
}

#[test]
fn test_missing_date_is_not_found() {
    let calendar = ContentCalendar::from_json(CALENDAR).unwrap();

    let err = calendar.entry_for(date(2024, 6, 3)).unwrap_err();
    assert_eq!(err.failure_kind(), Some(FailureKind::NotFound));
}

#[test]
fn test_duplicate_date_first_listed_wins() {
    let calendar = ContentCalendar::from_json(CALENDAR).unwrap();

    for _ in 0..3 {
        let entry = calendar.entry_for(date(2024, 6, 6)).unwrap();
        assert_eq!(entry.identifier(), "dup-first");
    }
}

#[test]
fn test_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(CALENDAR.as_bytes()).unwrap();

    let calendar = ContentCalendar::from_file(file.path()).unwrap();
    assert_eq!(calendar.len(), 4);
}

#[test]
fn test_unreadable_calendar() {
    let err = ContentCalendar::from_file("/nonexistent/calendar.json").unwrap_err();
    assert_eq!(err.failure_kind(), Some(FailureKind::CalendarUnavailable));
}

#[test]
fn test_malformed_calendar() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"[{"date": "June 2nd", "category": "gene"}]"#)
        .unwrap();

    let err = ContentCalendar::from_file(file.path()).unwrap_err();
    assert_eq!(err.failure_kind(), Some(FailureKind::CalendarUnavailable));
}
