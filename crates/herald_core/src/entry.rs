//! Calendar entries.

use crate::PostCategory;
use chrono::NaiveDate;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One scheduled post in the content calendar.
///
/// Entries are authored externally and never modified by Herald. The JSON
/// form accepts both the short keys (`category`, `fields`, `image`) and the
/// long keys used by older calendars (`post_type`, `content_data`,
/// `image_file`).
///
/// # Examples
///
/// ```
/// use herald_core::{CalendarEntry, PostCategory};
///
/// let entry: CalendarEntry = serde_json::from_str(
///     r#"{"date": "2024-06-02", "category": "gene",
///         "fields": {"gene": "COMT"}, "image": "week1_sun_comt.jpg"}"#,
/// ).unwrap();
///
/// assert_eq!(*entry.category(), PostCategory::Gene);
/// assert_eq!(entry.identifier(), "2024-06-02-gene");
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct CalendarEntry {
    /// Explicit identifier, when the calendar provides one.
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,

    /// Date the entry is scheduled for.
    date: NaiveDate,

    /// Post category.
    #[serde(alias = "post_type")]
    category: PostCategory,

    /// Campaign week number.
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    week: Option<u32>,

    /// Human-readable title.
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,

    /// Structured content handed to the text generator.
    #[builder(default)]
    #[serde(default, alias = "content_data")]
    fields: BTreeMap<String, serde_json::Value>,

    /// Image file name, relative to the images directory.
    #[builder(default)]
    #[serde(default, alias = "image_file", skip_serializing_if = "Option::is_none")]
    image: Option<String>,
}

impl CalendarEntry {
    /// Create a builder for a calendar entry.
    pub fn builder() -> CalendarEntryBuilder {
        CalendarEntryBuilder::default()
    }

    /// Stable identifier: the explicit `id`, or `<date>-<category>`.
    pub fn identifier(&self) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!("{}-{}", self.date, self.category),
        }
    }

    /// Title, falling back to "Untitled".
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }
}
