mod common;

use std::time::Duration;

use macropanel::{Frequency, MetricsConfig, PanelIndex, SeriesClass, SourceSpec, catalog};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();

    // A smaller panel: the index, the policy rate held between decisions,
    // and CPI interpolated between monthly prints.
    let assembler = common::builder()?
        .source(SourceSpec::price(catalog::SP500_SYMBOL))
        .source(SourceSpec::statistical(
            "FEDFUNDS",
            "FF_Rate",
            SeriesClass::StepChange,
            Frequency::Monthly,
        ))
        .source(SourceSpec::statistical(
            "CPIAUCNS",
            "US_CPI",
            SeriesClass::Continuous,
            Frequency::Monthly,
        ))
        .metrics(MetricsConfig::default())
        .index(PanelIndex::DailyCalendar)
        .provider_timeout(Duration::from_secs(20))
        .request_timeout(Duration::from_secs(60))
        .build()?;

    let report = assembler.assemble().await?;
    let panel = &report.panel;
    for name in panel.column_names() {
        let observed = panel.column(name).map_or(0, |c| c.observed_count());
        println!("{name:>12}: {observed} of {} days", panel.n_rows());
    }
    if let Some(last) = panel.index().last() {
        println!(
            "{last}: close {:?}, 10 yr CAGR {:?}",
            panel.value(*last, "Close"),
            panel.value(*last, "CAGR 10 yr"),
        );
    }
    for omitted in &report.omitted {
        println!("omitted: {omitted}");
    }
    Ok(())
}
