use chrono::{Datelike, NaiveDate, Weekday};
use macropanel_core::RawRecord;

pub fn by_symbol(s: &str) -> Option<Vec<RawRecord>> {
    match s {
        // Twelve years of trading days, long enough for both trailing windows.
        "^GSPC" => Some(trading_days(
            NaiveDate::from_ymd_opt(2004, 1, 2)?,
            NaiveDate::from_ymd_opt(2015, 12, 31)?,
            1100.0,
            1.0002,
        )),
        "^TEST" => Some(vec![
            row("2020-01-01 00:00:00-05:00", Some(100.0)),
            row("2020-01-02 00:00:00-05:00", Some(110.0)),
            row("2020-01-03 00:00:00-05:00", Some(121.0)),
        ]),
        // Thursday, Friday, then Monday with a missing close and Tuesday.
        "^WEEK" => Some(vec![
            row("2023-01-05", Some(3800.0)),
            row("2023-01-06", Some(3900.0)),
            row("2023-01-09", None),
            row("2023-01-10", Some(3920.0)),
        ]),
        _ => None,
    }
}

fn row(date: &str, close: Option<f64>) -> RawRecord {
    RawRecord::new()
        .with("Date", date)
        .with("Open", close)
        .with("High", close)
        .with("Low", close)
        .with("Close", close)
        .with("Volume", 1_000_000.0)
}

fn trading_days(start: NaiveDate, end: NaiveDate, base: f64, growth: f64) -> Vec<RawRecord> {
    let mut out = Vec::new();
    let mut price = base;
    for d in start.iter_days().take_while(|d| *d <= end) {
        if matches!(d.weekday(), Weekday::Sat | Weekday::Sun) {
            continue;
        }
        out.push(row(&d.format("%Y-%m-%d").to_string(), Some(price)));
        price *= growth;
    }
    out
}
