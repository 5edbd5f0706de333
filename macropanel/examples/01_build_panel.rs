mod common;

use macropanel::CsvExporter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();

    // 1. Collaborators plus the standard sources, with local files under data_features/.
    let assembler = common::builder()?
        .with_default_catalog("data_features")
        .build()?;

    // 2. Fetch, align and fill.
    let report = assembler.assemble().await?;
    let panel = &report.panel;
    println!(
        "panel: {} rows x {} columns, {} .. {}",
        panel.n_rows(),
        panel.n_cols(),
        panel.index().first().map_or_else(String::new, ToString::to_string),
        panel.index().last().map_or_else(String::new, ToString::to_string),
    );

    // 3. Diagnostics: omitted sources and non-numeric cells.
    for omitted in &report.omitted {
        println!("omitted: {omitted}");
    }
    for (column, count) in &report.coercions {
        println!("coerced {count} cell(s) to missing in {column}");
    }

    // 4. Persist.
    let out = std::env::temp_dir().join("macropanel.csv");
    CsvExporter::new().write(panel, &out)?;
    println!("wrote {}", out.display());

    Ok(())
}
