use macropanel_core::RawRecord;

use super::{cell, month_starts};

/// `(months between observations, first value, increment per observation)`.
fn profile(series_id: &str) -> Option<(u32, f64, f64)> {
    Some(match series_id {
        "GDP" => (3, 11_900.0, 120.0),
        "UNRATE" => (1, 5.7, 0.01),
        "FEDFUNDS" => (1, 1.0, 0.02),
        "AAA" => (1, 5.5, -0.01),
        "B230RC0Q173SBEA" => (3, 292_000.0, 600.0),
        "CPIAUCNS" => (1, 185.0, 0.3),
        "FYFR" => (12, 1_880_000.0, 90_000.0),
        "FYGFD" => (12, 7_350_000.0, 800_000.0),
        "M2NS" => (1, 6_050.0, 25.0),
        _ => return None,
    })
}

pub fn by_series(series_id: &str) -> Option<Vec<RawRecord>> {
    let (step, first, increment) = profile(series_id)?;
    let dates = month_starts((2004, 1), (2015, 12), step);
    Some(
        dates
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let date = d.format("%Y-%m-%d").to_string();
                // The statistical service marks unpublished values with ".".
                let value = if series_id == "GDP" && date == "2010-01-01" {
                    ".".to_string()
                } else {
                    cell(first + increment * i as f64)
                };
                RawRecord::new()
                    .with("realtime_start", "2016-01-01")
                    .with("realtime_end", "2016-01-01")
                    .with("date", date)
                    .with("value", value)
            })
            .collect(),
    )
}
