use crate::PanelError;
use crate::types::{CanonicalSeries, MetricsConfig, SeriesClass, SeriesPoint, columns};

/// Trailing-window outputs for one window length.
#[derive(Debug, Clone, PartialEq)]
pub struct TrailingWindow {
    /// Window length in years.
    pub years: u32,
    /// Window length in calendar days.
    pub offset_days: u32,
    /// Normalized level `offset_days` earlier.
    pub trailing: CanonicalSeries,
    /// Compound annual growth rate over the window.
    pub cagr: CanonicalSeries,
}

/// Series derived from a daily price series, all on the price's calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedMetrics {
    /// Price divided by the first price of the calendar.
    pub level: CanonicalSeries,
    /// Day-over-day percent change.
    pub delta: CanonicalSeries,
    /// One entry per configured window, longest first.
    pub windows: Vec<TrailingWindow>,
}

impl DerivedMetrics {
    /// Flatten into panel column order: level, delta, then trailing value and
    /// CAGR for each window.
    #[must_use]
    pub fn into_series(self) -> Vec<CanonicalSeries> {
        let mut out = vec![self.level, self.delta];
        for w in self.windows {
            out.push(w.trailing);
            out.push(w.cagr);
        }
        out
    }
}

fn finite(x: f64) -> Option<f64> {
    x.is_finite().then_some(x)
}

fn build(
    name: impl Into<String>,
    price: &CanonicalSeries,
    values: Vec<Option<f64>>,
) -> Result<CanonicalSeries, PanelError> {
    let points = price
        .dates()
        .zip(values)
        .map(|(date, value)| SeriesPoint { date, value })
        .collect();
    CanonicalSeries::try_new(name, SeriesClass::Protected, points)
}

/// Compute normalized level, daily delta and trailing-window CAGR.
///
/// `price` must be daily and gap-free (the output of `reindex_forward_fill`).
///
/// - `level[t] = price[t] / price[t0]`
/// - `delta[t] = 100 * (price[t] / price[t-1] - 1)`, missing at `t0`
/// - `trailing_K[t] = level[t - offset_K]`, missing before the calendar start
/// - `cagr_K[t] = (level[t] / trailing_K[t])^(1/K) - 1`
///
/// Non-finite results (division by a zero price) are reported as missing.
///
/// # Errors
/// - `PanelError::Alignment` if consecutive dates are not exactly one day apart.
/// - `PanelError::Data` if the series is empty or its first price is missing or zero.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "macropanel::metrics",
        skip(price, cfg),
        fields(days = price.len()),
    )
)]
pub fn compute_metrics(
    price: &CanonicalSeries,
    cfg: &MetricsConfig,
) -> Result<DerivedMetrics, PanelError> {
    if let Some(w) = price
        .points()
        .windows(2)
        .find(|w| w[0].date.succ_opt() != Some(w[1].date))
    {
        return Err(PanelError::alignment(format!(
            "price series '{}' is not gap-free daily between {} and {}",
            price.name(),
            w[0].date,
            w[1].date
        )));
    }
    let Some(first) = price.points().first() else {
        return Err(PanelError::Data(format!(
            "price series '{}' is empty",
            price.name()
        )));
    };
    let base = match first.value {
        Some(b) if b != 0.0 && b.is_finite() => b,
        _ => {
            return Err(PanelError::Data(format!(
                "price series '{}' has no usable base value on {}",
                price.name(),
                first.date
            )));
        }
    };

    let prices: Vec<Option<f64>> = price.values().collect();
    let level: Vec<Option<f64>> = prices
        .iter()
        .map(|p| p.and_then(|p| finite(p / base)))
        .collect();

    let delta: Vec<Option<f64>> = prices
        .iter()
        .enumerate()
        .map(|(t, p)| {
            let prev = t.checked_sub(1).and_then(|s| prices[s])?;
            finite(100.0 * (p.as_ref()? / prev - 1.0))
        })
        .collect();

    let mut windows = Vec::with_capacity(2);
    for (years, offset_days) in cfg.windows() {
        let offset = offset_days as usize;
        let trailing: Vec<Option<f64>> = (0..level.len())
            .map(|t| t.checked_sub(offset).and_then(|s| level[s]))
            .collect();
        let exponent = 1.0 / f64::from(years);
        let cagr: Vec<Option<f64>> = level
            .iter()
            .zip(&trailing)
            .map(|(now, then)| finite((now.as_ref()? / then.as_ref()?).powf(exponent) - 1.0))
            .collect();
        windows.push(TrailingWindow {
            years,
            offset_days,
            trailing: build(columns::trailing(years), price, trailing)?,
            cagr: build(columns::cagr(years), price, cagr)?,
        });
    }

    Ok(DerivedMetrics {
        level: build(columns::CLOSE_NORM, price, level)?,
        delta: build(columns::DAILY_DELTA, price, delta)?,
        windows,
    })
}
