use macropanel::{Frequency, PanelError, PanelIndex, SeriesClass, SourceSpec};

use crate::helpers::{d, mock_builder, monthly};

#[tokio::test]
async fn union_index_keeps_only_observed_dates() {
    let report = mock_builder()
        .source(SourceSpec::price("^TEST"))
        .source(monthly("UNRATE"))
        .index(PanelIndex::Union)
        .build()
        .expect("valid assembler")
        .assemble()
        .await
        .expect("panel");

    let p = &report.panel;
    // 144 monthly observations plus three price days.
    assert_eq!(p.n_rows(), 147);
    assert!(!p.is_gap_free());
    assert_eq!(p.value(d(2015, 12, 1), "Close"), None);
    assert_eq!(p.value(d(2020, 1, 2), "UNRATE"), None);
    assert!(p.value(d(2015, 12, 1), "UNRATE").is_some());
    assert_eq!(p.value(d(2020, 1, 1), "Close Norm"), Some(1.0));
}

#[tokio::test]
async fn renames_apply_in_order_to_final_columns() {
    let report = mock_builder()
        .source(monthly("UNRATE"))
        .rename("UNRATE", "Unemployment")
        .rename("Unemployment", "US_Uemp")
        .build()
        .expect("valid assembler")
        .assemble()
        .await
        .expect("panel");

    let names: Vec<&str> = report.panel.column_names().collect();
    assert_eq!(names, vec!["US_Uemp"]);
    assert_eq!(report.panel.n_rows(), 4353);
}

#[tokio::test]
async fn duplicate_columns_across_sources_are_an_alignment_error() {
    let err = mock_builder()
        .source(SourceSpec::statistical(
            "UNRATE",
            "X",
            SeriesClass::Continuous,
            Frequency::Monthly,
        ))
        .source(SourceSpec::statistical(
            "CPIAUCNS",
            "X",
            SeriesClass::Continuous,
            Frequency::Monthly,
        ))
        .build()
        .expect("valid assembler")
        .assemble()
        .await
        .expect_err("duplicate column");
    assert!(matches!(err, PanelError::Alignment(_)), "got {err:?}");
}

#[tokio::test]
async fn rename_onto_an_existing_column_is_an_alignment_error() {
    let err = mock_builder()
        .source(SourceSpec::price("^TEST"))
        .source(monthly("UNRATE"))
        .rename("UNRATE", "Close")
        .build()
        .expect("valid assembler")
        .assemble()
        .await
        .expect_err("rename collision");
    assert!(matches!(err, PanelError::Alignment(_)), "got {err:?}");
}
