use crate::PanelError;
use crate::timeseries::calendar::DailyCalendar;
use crate::types::{CanonicalSeries, SeriesPoint};

fn ensure_covered(series: &CanonicalSeries, calendar: &DailyCalendar) -> Result<(), PanelError> {
    if calendar.covers(series) {
        Ok(())
    } else {
        Err(PanelError::alignment(format!(
            "calendar {}..={} does not cover series '{}'",
            calendar.start(),
            calendar.end(),
            series.name()
        )))
    }
}

/// Place `series` on every day of `calendar`, carrying the last known value forward.
///
/// - Days before the first observed value stay missing; nothing is back-filled.
/// - Inserted days and observed-missing values take the most recent earlier value.
/// - The last value persists through the end of the calendar.
///
/// # Errors
/// Returns `PanelError::Alignment` if the calendar does not cover the series' span.
pub fn reindex_forward_fill(
    series: &CanonicalSeries,
    calendar: &DailyCalendar,
) -> Result<CanonicalSeries, PanelError> {
    ensure_covered(series, calendar)?;
    let src = series.points();
    let mut i = 0;
    let mut last: Option<f64> = None;
    let mut points = Vec::with_capacity(calendar.len());
    for date in calendar.days() {
        if i < src.len() && src[i].date == date {
            if let Some(v) = src[i].value {
                last = Some(v);
            }
            i += 1;
        }
        points.push(SeriesPoint { date, value: last });
    }
    CanonicalSeries::try_new(series.name(), series.class(), points)
}

/// Place `series` on every day of `calendar`, leaving inserted days missing.
///
/// # Errors
/// Returns `PanelError::Alignment` if the calendar does not cover the series' span.
pub fn reindex_sparse(
    series: &CanonicalSeries,
    calendar: &DailyCalendar,
) -> Result<CanonicalSeries, PanelError> {
    ensure_covered(series, calendar)?;
    let points = calendar
        .days()
        .map(|date| SeriesPoint {
            date,
            value: series.value_at(date),
        })
        .collect();
    CanonicalSeries::try_new(series.name(), series.class(), points)
}
