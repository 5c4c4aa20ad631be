//! Transactions Data

use jiff::{Timestamp, civil::Date, tz::TimeZone};

/// One calendar day in the store's time zone, as a half-open range of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl DayWindow {
    /// From local midnight on `date` up to (excluding) local midnight the next day.
    ///
    /// # Errors
    ///
    /// Returns an error if either midnight falls outside the supported range.
    pub fn for_date(date: Date, time_zone: &TimeZone) -> Result<Self, jiff::Error> {
        let start = date.to_zoned(time_zone.clone())?.timestamp();
        let end = date.tomorrow()?.to_zoned(time_zone.clone())?.timestamp();

        Ok(Self { start, end })
    }

    #[must_use]
    pub fn contains(&self, instant: Timestamp) -> bool {
        self.start <= instant && instant < self.end
    }
}
