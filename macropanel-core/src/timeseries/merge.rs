use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::PanelError;
use crate::timeseries::calendar::DailyCalendar;
use crate::types::{CanonicalSeries, Panel, PanelColumn};

/// Outer-join series into one panel keyed by date.
///
/// - The index is the union of every series' dates, ascending.
/// - Each series becomes one column, in input order, keeping its class tag.
/// - A date a series does not index is missing in that column.
///
/// # Errors
/// Returns `PanelError::Alignment` if two series share a name.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(name = "macropanel::merge_outer", skip(series))
)]
pub fn merge_outer<'a, I>(series: I) -> Result<Panel, PanelError>
where
    I: IntoIterator<Item = &'a CanonicalSeries>,
{
    let series: Vec<&CanonicalSeries> = series.into_iter().collect();
    let index: Vec<NaiveDate> = series
        .iter()
        .flat_map(|s| s.dates())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let columns = series
        .iter()
        .map(|s| {
            let mut values = vec![None; index.len()];
            for p in s.points() {
                if let Ok(row) = index.binary_search(&p.date) {
                    values[row] = p.value;
                }
            }
            PanelColumn::new(s.name(), s.class(), values)
        })
        .collect();

    #[cfg(feature = "tracing")]
    tracing::debug!(rows = index.len(), columns = series.len(), "merged series");

    Panel::try_new(index, columns)
}

/// Expand a panel onto the daily calendar spanning its index.
///
/// Inserted days are missing in every column; no fill is applied.
///
/// # Errors
/// Returns `PanelError::Alignment` if the panel's shape is inconsistent.
pub fn expand_to_daily(panel: &Panel) -> Result<Panel, PanelError> {
    let Some(calendar) = DailyCalendar::from_dates(panel.index().iter().copied()) else {
        return Ok(panel.clone());
    };
    let index: Vec<NaiveDate> = calendar.days().collect();
    let columns = panel
        .columns()
        .iter()
        .map(|c| {
            let mut values = vec![None; index.len()];
            for (date, value) in panel.index().iter().zip(c.values()) {
                if let Some(row) = calendar.position(*date) {
                    values[row] = *value;
                }
            }
            c.with_values(values)
        })
        .collect();
    Panel::try_new(index, columns)
}
