pub mod observations;
pub mod prices;
pub mod tables;

use chrono::NaiveDate;

/// First day of each month from `(y0, m0)` through `(y1, m1)`, stepping `step` months.
pub fn month_starts(start: (i32, u32), end: (i32, u32), step: u32) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let (mut y, mut m) = start;
    while (y, m) <= end {
        if let Some(d) = NaiveDate::from_ymd_opt(y, m, 1) {
            out.push(d);
        }
        m += step;
        while m > 12 {
            m -= 12;
            y += 1;
        }
    }
    out
}

/// Render a number the way a text export would.
pub fn cell(v: f64) -> String {
    format!("{v:.2}")
}
