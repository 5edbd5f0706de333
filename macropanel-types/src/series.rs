//! Canonical date-keyed series and the class tags that drive fill policy.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::PanelError;

/// Post-merge fill policy for a panel column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FillPolicy {
    /// Linear interpolation strictly between two observed values; no extrapolation.
    InterpolateInterior,
    /// Carry the last observed value forward until the next observation.
    ForwardFill,
    /// Leave the column untouched.
    None,
}

/// Class tag attached to a series when it is created.
///
/// The class, not the column name, decides how the merged panel fills gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SeriesClass {
    /// Price level and derived metrics; missingness is intentional.
    Protected,
    /// Administrative rate or level that holds between announcements.
    StepChange,
    /// Any other macro series sampled at its native frequency.
    #[default]
    Continuous,
}

impl SeriesClass {
    /// The fixed fill policy for this class.
    #[must_use]
    pub const fn fill_policy(self) -> FillPolicy {
        match self {
            Self::Protected => FillPolicy::None,
            Self::StepChange => FillPolicy::ForwardFill,
            Self::Continuous => FillPolicy::InterpolateInterior,
        }
    }
}

/// Native sampling frequency of a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    /// One observation per (trading) day.
    Daily,
    /// One observation per month.
    Monthly,
    /// One observation per quarter.
    Quarterly,
    /// One observation per year.
    Yearly,
}

/// A single dated observation. `None` means missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Calendar day of the observation.
    pub date: NaiveDate,
    /// Observed value, if any.
    pub value: Option<f64>,
}

/// A named, class-tagged series with strictly increasing, unique dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalSeries {
    name: String,
    class: SeriesClass,
    points: Vec<SeriesPoint>,
}

impl CanonicalSeries {
    /// Build a series from points that must already be strictly increasing by date.
    ///
    /// # Errors
    /// Returns `PanelError::Alignment` if two points share a date or appear out of order.
    pub fn try_new(
        name: impl Into<String>,
        class: SeriesClass,
        points: Vec<SeriesPoint>,
    ) -> Result<Self, PanelError> {
        let name = name.into();
        if let Some(w) = points.windows(2).find(|w| w[0].date >= w[1].date) {
            return Err(PanelError::alignment(format!(
                "series '{name}' index is not strictly increasing at {} -> {}",
                w[0].date, w[1].date
            )));
        }
        Ok(Self {
            name,
            class,
            points,
        })
    }

    /// Build a series from a date-keyed map; ordering is guaranteed by the map.
    #[must_use]
    pub fn from_map(
        name: impl Into<String>,
        class: SeriesClass,
        map: BTreeMap<NaiveDate, Option<f64>>,
    ) -> Self {
        Self {
            name: name.into(),
            class,
            points: map
                .into_iter()
                .map(|(date, value)| SeriesPoint { date, value })
                .collect(),
        }
    }

    /// Series name (the panel column it becomes).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class tag.
    #[must_use]
    pub const fn class(&self) -> SeriesClass {
        self.class
    }

    /// Points in ascending date order.
    #[must_use]
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    /// Dates in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|p| p.date)
    }

    /// Values in date order.
    pub fn values(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.points.iter().map(|p| p.value)
    }

    /// Number of points.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the series has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First indexed date.
    #[must_use]
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    /// Last indexed date.
    #[must_use]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Value at `date`; `None` if the date is not indexed or the value is missing.
    #[must_use]
    pub fn value_at(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .and_then(|i| self.points[i].value)
    }

    /// Number of points carrying a value.
    #[must_use]
    pub fn observed_count(&self) -> usize {
        self.points.iter().filter(|p| p.value.is_some()).count()
    }

    /// Copy without leading and trailing missing points.
    #[must_use]
    pub fn trim_missing(&self) -> Self {
        let start = self.points.iter().position(|p| p.value.is_some());
        let end = self.points.iter().rposition(|p| p.value.is_some());
        let points = match (start, end) {
            (Some(s), Some(e)) => self.points[s..=e].to_vec(),
            _ => Vec::new(),
        };
        Self {
            name: self.name.clone(),
            class: self.class,
            points,
        }
    }

    /// Copy published under a different name.
    #[must_use]
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class: self.class,
            points: self.points.clone(),
        }
    }

    /// Copy re-tagged with another class.
    #[must_use]
    pub fn with_class(&self, class: SeriesClass) -> Self {
        Self {
            name: self.name.clone(),
            class,
            points: self.points.clone(),
        }
    }
}
