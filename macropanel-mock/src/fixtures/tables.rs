use macropanel_core::{RawRecord, RawValue};

use super::{cell, month_starts};

pub const GOLD_LONDON: &str = "London Market Price (British &pound; [1718-1949] or U.S. $ [1950-2011] per fine ounce)";
pub const GOLD_SILVER_RATIO: &str = "Gold/Silver Price Ratio (ounces of silver per ounce of gold)";
pub const GOLD_NY: &str = "New York Market Price (U.S. dollars per fine ounce)";

pub fn by_file_name(name: &str) -> Option<Vec<RawRecord>> {
    match name {
        "house.csv" => Some(
            month_starts((2004, 1), (2015, 12), 1)
                .iter()
                .enumerate()
                .map(|(i, d)| {
                    RawRecord::new()
                        .with("Composite Date", d.format("%Y-%m-%d").to_string())
                        .with("Composite Index", cell(140.0 + 0.4 * i as f64))
                        .with("Region", "US")
                })
                .collect(),
        ),
        "global-energy.csv" => Some(yearly("DATE", "ENERGY (TWh)", 130_000.0, 2_500.0)),
        "population.csv" => Some(yearly("DATE", "POPULATION", 6.46e9, 8.0e7)),
        "gold.csv" => Some(
            (2004..=2015)
                .map(|y| {
                    let i = f64::from(y - 2004);
                    // The New York series was not published for 2011.
                    let ny = if y == 2011 {
                        RawValue::from("n/a*")
                    } else {
                        RawValue::from(cell(410.0 + 110.0 * i))
                    };
                    RawRecord::new()
                        .with("Year", y.to_string())
                        .with(GOLD_LONDON, cell(409.0 + 110.0 * i))
                        .with(GOLD_SILVER_RATIO, cell(62.0 - i))
                        .with(GOLD_NY, ny)
                })
                .collect(),
        ),
        _ => None,
    }
}

fn yearly(date_field: &str, value_field: &str, first: f64, increment: f64) -> Vec<RawRecord> {
    month_starts((2004, 1), (2015, 1), 12)
        .iter()
        .enumerate()
        .map(|(i, d)| {
            RawRecord::new()
                .with(date_field, d.format("%Y-%m-%d").to_string())
                .with(value_field, cell(first + increment * i as f64))
        })
        .collect()
}
