//! The standard source set: the S&P 500 index, four local feature files and
//! nine FRED series.

use std::path::Path;

use macropanel_core::{
    ColumnRename, DateField, Frequency, SeriesClass, SourceSpec, ValueField,
};

/// Price symbol of the S&P 500 index.
pub const SP500_SYMBOL: &str = "^GSPC";

/// Gold file header for the London market price.
pub const GOLD_LONDON_HEADER: &str =
    "London Market Price (British &pound; [1718-1949] or U.S. $ [1950-2011] per fine ounce)";
/// Gold file header for the gold/silver ratio.
pub const GOLD_SILVER_RATIO_HEADER: &str =
    "Gold/Silver Price Ratio (ounces of silver per ounce of gold)";
/// Gold file header for the New York market price.
pub const GOLD_NY_HEADER: &str = "New York Market Price (U.S. dollars per fine ounce)";
/// Energy file value header.
pub const ENERGY_HEADER: &str = "ENERGY (TWh)";
/// Population file value header.
pub const POPULATION_HEADER: &str = "POPULATION";

/// `(series id, column, class, frequency)` of each statistical series.
const STATISTICAL: &[(&str, &str, SeriesClass, Frequency)] = &[
    ("GDP", "US_GDP", SeriesClass::Continuous, Frequency::Quarterly),
    ("UNRATE", "US_Uemp", SeriesClass::Continuous, Frequency::Monthly),
    ("FEDFUNDS", "FF_Rate", SeriesClass::StepChange, Frequency::Monthly),
    ("AAA", "AAA_Rate", SeriesClass::StepChange, Frequency::Monthly),
    ("B230RC0Q173SBEA", "US_Pop", SeriesClass::Continuous, Frequency::Quarterly),
    ("CPIAUCNS", "US_CPI", SeriesClass::Continuous, Frequency::Monthly),
    ("FYFR", "Fed_Receipts", SeriesClass::StepChange, Frequency::Yearly),
    ("FYGFD", "Fed_Debt", SeriesClass::Continuous, Frequency::Yearly),
    ("M2NS", "US_M2", SeriesClass::Continuous, Frequency::Monthly),
];

/// The default sources, with local files resolved under `data_dir`.
///
/// Order: price, `house.csv`, `global-energy.csv`, `gold.csv`,
/// `population.csv`, then the statistical series.
pub fn default_sources(data_dir: impl AsRef<Path>) -> Vec<SourceSpec> {
    let dir = data_dir.as_ref();
    let mut out = vec![
        SourceSpec::price(SP500_SYMBOL),
        SourceSpec::table(
            "house",
            dir.join("house.csv"),
            DateField::Text("Composite Date".into()),
            vec![ValueField::new("Composite Index", "House")],
            Frequency::Monthly,
        ),
        SourceSpec::table(
            "global-energy",
            dir.join("global-energy.csv"),
            DateField::Text("DATE".into()),
            vec![ValueField::same(ENERGY_HEADER)],
            Frequency::Yearly,
        ),
        SourceSpec::table(
            "gold",
            dir.join("gold.csv"),
            DateField::Year("Year".into()),
            vec![
                ValueField::same(GOLD_LONDON_HEADER),
                ValueField::same(GOLD_SILVER_RATIO_HEADER),
                ValueField::same(GOLD_NY_HEADER),
            ],
            Frequency::Yearly,
        ),
        SourceSpec::table(
            "population",
            dir.join("population.csv"),
            DateField::Text("DATE".into()),
            vec![ValueField::same(POPULATION_HEADER)],
            Frequency::Yearly,
        ),
    ];
    out.extend(
        STATISTICAL
            .iter()
            .map(|&(id, column, class, freq)| SourceSpec::statistical(id, column, class, freq)),
    );
    out
}

/// Renames from raw file headers to panel column names.
#[must_use]
pub fn default_column_renames() -> Vec<ColumnRename> {
    vec![
        ColumnRename::new(GOLD_LONDON_HEADER, "Gold_London"),
        ColumnRename::new(GOLD_SILVER_RATIO_HEADER, "GS_Ratio"),
        ColumnRename::new(GOLD_NY_HEADER, "Gold_NY"),
        ColumnRename::new(ENERGY_HEADER, "W_Energy"),
        ColumnRename::new(POPULATION_HEADER, "W_Pop"),
    ]
}
