//! Weekly posting schedule.

use crate::PostCategory;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which weekdays carry which category.
///
/// Weekday keys are lowercase English names (`"sunday"`). When `enforce` is
/// off the schedule is informational only and every date may post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingSchedule {
    /// Skip runs on days without a category.
    #[serde(default)]
    pub enforce: bool,
    /// Weekday name to category.
    #[serde(default = "default_days")]
    pub days: BTreeMap<String, PostCategory>,
}

fn default_days() -> BTreeMap<String, PostCategory> {
    BTreeMap::from([
        ("sunday".to_string(), PostCategory::Gene),
        ("tuesday".to_string(), PostCategory::Intervention),
        ("thursday".to_string(), PostCategory::Topic),
    ])
}

impl Default for PostingSchedule {
    fn default() -> Self {
        Self {
            enforce: false,
            days: default_days(),
        }
    }
}

impl PostingSchedule {
    /// Category scheduled for the weekday of `date`, if any.
    pub fn category_for(&self, date: NaiveDate) -> Option<PostCategory> {
        self.days.get(weekday_name(date.weekday())).copied()
    }

    /// Whether a run on `date` may post.
    pub fn allows(&self, date: NaiveDate) -> bool {
        !self.enforce || self.category_for(date).is_some()
    }
}

/// Lowercase English weekday name.
pub(crate) fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_matches_weekly_rotation() {
        let schedule = PostingSchedule::default();
        // 2024-06-02 is a Sunday
        let sunday = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        let monday = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let thursday = NaiveDate::from_ymd_opt(2024, 6, 6).unwrap();

        assert_eq!(schedule.category_for(sunday), Some(PostCategory::Gene));
        assert_eq!(schedule.category_for(monday), None);
        assert_eq!(schedule.category_for(thursday), Some(PostCategory::Topic));
        assert!(schedule.allows(monday));
    }

    #[test]
    fn enforced_schedule_blocks_off_days() {
        let schedule = PostingSchedule {
            enforce: true,
            ..PostingSchedule::default()
        };
        let monday = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert!(!schedule.allows(monday));
    }
}
