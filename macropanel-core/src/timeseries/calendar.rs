use chrono::NaiveDate;

use crate::PanelError;
use crate::types::CanonicalSeries;

/// A contiguous run of calendar days `[start, end]` with a one-day step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DailyCalendar {
    start: NaiveDate,
    end: NaiveDate,
}

impl DailyCalendar {
    /// Build a calendar between two inclusive bounds.
    ///
    /// # Errors
    /// Returns `PanelError::Alignment` if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PanelError> {
        if start > end {
            return Err(PanelError::alignment(format!(
                "calendar start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Calendar spanning the earliest to the latest date of `dates`.
    pub fn from_dates<I>(dates: I) -> Option<Self>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let mut bounds: Option<(NaiveDate, NaiveDate)> = None;
        for d in dates {
            bounds = Some(match bounds {
                None => (d, d),
                Some((lo, hi)) => (lo.min(d), hi.max(d)),
            });
        }
        bounds.map(|(start, end)| Self { start, end })
    }

    /// Calendar spanning the global min/max indexed date across `series`.
    ///
    /// Returns `None` when every series is empty.
    pub fn spanning<'a, I>(series: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a CanonicalSeries>,
    {
        Self::from_dates(
            series
                .into_iter()
                .flat_map(|s| s.first_date().into_iter().chain(s.last_date())),
        )
    }

    /// First day.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days, both bounds included.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::try_from((self.end - self.start).num_days()).unwrap_or(0) + 1
    }

    /// Always false; a calendar holds at least one day.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// True if `date` falls inside the calendar.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Zero-based position of `date`.
    #[must_use]
    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        if self.contains(date) {
            usize::try_from((date - self.start).num_days()).ok()
        } else {
            None
        }
    }

    /// True if every indexed date of `series` falls inside the calendar.
    #[must_use]
    pub fn covers(&self, series: &CanonicalSeries) -> bool {
        match (series.first_date(), series.last_date()) {
            (Some(first), Some(last)) => self.contains(first) && self.contains(last),
            _ => true,
        }
    }

    /// Every day in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take(self.len())
    }
}
