mod helpers;

use std::sync::Arc;

use macropanel::catalog::{GOLD_NY_HEADER, default_sources};
use macropanel::{
    CsvExporter, CsvTableLoader, DateField, Frequency, PanelAssembler, PanelError, RawValue,
    SourceSpec, TableLoader, ValueField,
};

use helpers::{assert_close, d};

const HOUSE_CSV: &str = "\
Composite Date,Composite Index,Region
2020-01-01,100.0,US
2020-02-01,,US
2020-03-01,102.0,US
";

#[test]
fn loader_reads_headers_and_empty_cells() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("house.csv");
    std::fs::write(&path, HOUSE_CSV).expect("write fixture");

    let records = tokio_test::block_on(CsvTableLoader::new().load(&path)).expect("records");
    assert_eq!(records.len(), 3);
    assert_eq!(
        records[0].get("Composite Index"),
        Some(&RawValue::from("100.0"))
    );
    assert_eq!(records[1].get("Composite Index"), Some(&RawValue::Null));
    assert_eq!(records[2].get("Region"), Some(&RawValue::from("US")));
}

#[tokio::test]
async fn missing_file_is_a_connector_error_naming_the_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.csv");
    let err = CsvTableLoader::new()
        .load(&path)
        .await
        .expect_err("missing file");
    match err {
        PanelError::Connector { connector, msg } => {
            assert_eq!(connector, CsvTableLoader::NAME);
            assert!(msg.contains("absent.csv"), "{msg}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn table_sources_assemble_and_export() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("house.csv"), HOUSE_CSV).expect("write fixture");
    std::fs::write(
        dir.path().join("gold.csv"),
        format!("Year,{GOLD_NY_HEADER}\n2020,1000\n2021,N/A\n2022,1200\n"),
    )
    .expect("write fixture");

    let house = default_sources(dir.path())
        .into_iter()
        .find(|s| s.label == "house")
        .expect("house source");
    let gold = SourceSpec::table(
        "gold",
        dir.path().join("gold.csv"),
        DateField::Year("Year".into()),
        vec![ValueField::new(GOLD_NY_HEADER, "Gold_NY")],
        Frequency::Yearly,
    );

    let report = PanelAssembler::builder()
        .with_table_loader(Arc::new(CsvTableLoader::new()))
        .source(house)
        .source(gold)
        .build()
        .expect("valid assembler")
        .assemble()
        .await
        .expect("panel");

    let p = &report.panel;
    assert!(report.is_complete());
    assert_eq!(p.index().first(), Some(&d(2020, 1, 1)));
    assert_eq!(p.index().last(), Some(&d(2022, 1, 1)));
    // "N/A" is a silent sentinel, so the gap is interpolated without a warning.
    assert_eq!(report.total_coercions(), 0);
    assert_close(p.value(d(2021, 1, 1), "Gold_NY"), 1000.0 + 200.0 * (366.0 / 731.0));
    assert_close(p.value(d(2020, 2, 1), "House"), 100.0 + 2.0 * (31.0 / 60.0));
    assert_eq!(p.value(d(2020, 3, 2), "House"), None);

    let out = dir.path().join("panel.csv");
    CsvExporter::new().write(p, &out).expect("export");
    let bytes = std::fs::read(&out).expect("read back");
    let rows = CsvTableLoader::new().parse(&bytes).expect("parse back");
    assert_eq!(rows.len(), p.n_rows());
    assert_eq!(rows[0].get("Date"), Some(&RawValue::from("2020-01-01")));
    assert_eq!(rows[0].get("House"), Some(&RawValue::from("100")));
    assert_eq!(rows[0].get("Gold_NY"), Some(&RawValue::from("1000")));
    let last = rows.last().expect("rows");
    assert_eq!(last.get("Date"), Some(&RawValue::from("2022-01-01")));
    assert_eq!(last.get("House"), Some(&RawValue::Null));
    assert_eq!(last.get("Gold_NY"), Some(&RawValue::from("1200")));
}

proptest::proptest! {
    #[test]
    fn exported_cells_parse_back_to_the_same_values(
        values in proptest::collection::vec(
            proptest::option::of(-1.0e12f64..1.0e12),
            1..40,
        )
    ) {
        use macropanel::{Panel, PanelColumn, SeriesClass};

        let index: Vec<_> = (0..values.len())
            .map(|i| d(2020, 1, 1) + chrono::Duration::days(i as i64))
            .collect();
        let panel = Panel::try_new(
            index,
            vec![PanelColumn::new("X", SeriesClass::Continuous, values.clone())],
        )
        .expect("panel");

        let mut buf = Vec::new();
        CsvExporter::new().write_to(&panel, &mut buf).expect("export");
        let rows = CsvTableLoader::new().parse(&buf).expect("parse");
        proptest::prop_assert_eq!(rows.len(), values.len());
        for (row, expected) in rows.iter().zip(&values) {
            let parsed = match row.get("X") {
                Some(RawValue::Text(s)) => Some(s.parse::<f64>().expect("number")),
                _ => None,
            };
            proptest::prop_assert_eq!(parsed, *expected);
        }
    }
}
