use macropanel::SourceSpec;

use crate::helpers::{assert_close, d, mock_builder};

#[tokio::test]
async fn default_catalog_builds_a_gap_free_daily_panel() {
    let report = mock_builder()
        .with_default_catalog("data_features")
        .build()
        .expect("valid assembler")
        .assemble()
        .await
        .expect("panel");

    assert!(report.is_complete(), "omitted: {:?}", report.omitted);
    let p = &report.panel;
    let names: Vec<&str> = p.column_names().collect();
    assert_eq!(
        names,
        vec![
            "Close",
            "Close Norm",
            "Daily Delta",
            "10 yr",
            "CAGR 10 yr",
            "5 yr",
            "CAGR 5 yr",
            "House",
            "W_Energy",
            "Gold_London",
            "GS_Ratio",
            "Gold_NY",
            "W_Pop",
            "US_GDP",
            "US_Uemp",
            "FF_Rate",
            "AAA_Rate",
            "US_Pop",
            "US_CPI",
            "Fed_Receipts",
            "Fed_Debt",
            "US_M2",
        ]
    );
    assert!(p.is_gap_free());
    assert_eq!(p.index().first(), Some(&d(2004, 1, 1)));
    assert_eq!(p.index().last(), Some(&d(2015, 12, 31)));
    assert_eq!(p.n_rows(), 4383);

    // Price block: protected, starts on the first trading day.
    assert_eq!(p.value(d(2004, 1, 1), "Close"), None);
    assert_eq!(p.value(d(2004, 1, 2), "Close Norm"), Some(1.0));
    assert_eq!(p.value(d(2004, 1, 2), "Daily Delta"), None);
    // Saturday carries Friday's close.
    assert_eq!(
        p.value(d(2004, 1, 3), "Close"),
        p.value(d(2004, 1, 2), "Close")
    );
    assert_eq!(p.value(d(2013, 12, 31), "CAGR 10 yr"), None);
    assert!(p.value(d(2014, 1, 1), "CAGR 10 yr").is_some());
    assert_eq!(p.value(d(2008, 12, 31), "CAGR 5 yr"), None);
    let cagr = p.value(d(2015, 12, 31), "CAGR 10 yr").expect("cagr");
    assert!((0.04..0.07).contains(&cagr), "cagr {cagr}");

    // Step-change series hold their last announcement to the end.
    assert!(p.value(d(2015, 12, 31), "FF_Rate").is_some());
    assert_eq!(
        p.value(d(2015, 12, 31), "Fed_Receipts"),
        p.value(d(2015, 1, 1), "Fed_Receipts")
    );
    // Continuous series interpolate inside and stop at their last observation.
    assert!(p.value(d(2010, 1, 1), "US_GDP").is_some());
    assert_eq!(p.value(d(2015, 12, 31), "US_GDP"), None);
    assert_close(p.value(d(2011, 1, 1), "Gold_NY"), 1180.0);

    assert_eq!(report.coercions.get("Gold_NY"), Some(&1));
    assert_eq!(report.total_coercions(), 1);
    assert_eq!(report.skipped_records, 0);
}

#[tokio::test]
async fn price_only_panel_matches_hand_computed_metrics() {
    let report = mock_builder()
        .source(SourceSpec::price("^TEST"))
        .build()
        .expect("valid assembler")
        .assemble()
        .await
        .expect("panel");

    let p = &report.panel;
    assert_eq!(p.n_rows(), 3);
    assert_eq!(p.value(d(2020, 1, 1), "Close Norm"), Some(1.0));
    assert_close(p.value(d(2020, 1, 2), "Close Norm"), 1.1);
    assert_close(p.value(d(2020, 1, 3), "Close Norm"), 1.21);
    assert_eq!(p.value(d(2020, 1, 1), "Daily Delta"), None);
    assert_close(p.value(d(2020, 1, 2), "Daily Delta"), 10.0);
    assert_close(p.value(d(2020, 1, 3), "Daily Delta"), 10.0);
    for col in ["10 yr", "CAGR 10 yr", "5 yr", "CAGR 5 yr"] {
        assert_eq!(p.column(col).expect(col).observed_count(), 0);
    }
}

#[tokio::test]
async fn missing_close_is_carried_from_previous_trading_day() {
    let report = mock_builder()
        .source(SourceSpec::price("^WEEK"))
        .build()
        .expect("valid assembler")
        .assemble()
        .await
        .expect("panel");

    let p = &report.panel;
    assert_eq!(p.index().first(), Some(&d(2023, 1, 5)));
    for day in [7, 8, 9] {
        assert_eq!(p.value(d(2023, 1, day), "Close"), Some(3900.0));
    }
    assert_eq!(p.value(d(2023, 1, 8), "Daily Delta"), Some(0.0));
    assert_close(
        p.value(d(2023, 1, 10), "Daily Delta"),
        100.0 * (3920.0 / 3900.0 - 1.0),
    );
}
