//! Content calendar loading and entry selection.

use crate::CalendarEntry;
use chrono::NaiveDate;
use herald_error::{CalendarError, CalendarErrorKind, HeraldResult};
use std::path::Path;
use tracing::{debug, instrument, warn};

/// The full content calendar, in file order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContentCalendar {
    entries: Vec<CalendarEntry>,
}

impl ContentCalendar {
    /// Create a calendar from entries. Order is significant for duplicate dates.
    pub fn new(entries: Vec<CalendarEntry>) -> Self {
        Self { entries }
    }

    /// Load a calendar from a JSON file holding an array of entries.
    ///
    /// # Errors
    ///
    /// Returns a `CalendarUnavailable` error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> HeraldResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CalendarError::new(CalendarErrorKind::Read {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        })?;

        let calendar = Self::from_json(&content).map_err(|e| {
            CalendarError::new(CalendarErrorKind::Parse {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        })?;

        debug!(entries = calendar.len(), "Loaded content calendar");
        Ok(calendar)
    }

    /// Parse a calendar from a JSON array.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<CalendarEntry> = serde_json::from_str(json)?;
        Ok(Self::new(entries))
    }

    /// All entries in file order.
    pub fn entries(&self) -> &[CalendarEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the calendar has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Select the entry scheduled for `date`.
    ///
    /// If several entries share the date, the first one listed wins and the
    /// others are reported as a warning.
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` calendar error when nothing is scheduled.
    #[instrument(skip(self), fields(entries = self.entries.len()))]
    pub fn entry_for(&self, date: NaiveDate) -> HeraldResult<&CalendarEntry> {
        let mut matching = self.entries.iter().filter(|e| *e.date() == date);

        let Some(selected) = matching.next() else {
            return Err(CalendarError::new(CalendarErrorKind::NotFound(date.to_string())).into());
        };

        let ignored: Vec<String> = matching.map(CalendarEntry::identifier).collect();
        if !ignored.is_empty() {
            warn!(
                selected = %selected.identifier(),
                ignored = ?ignored,
                "Calendar lists several entries for the same date; using the first"
            );
        }

        Ok(selected)
    }
}
