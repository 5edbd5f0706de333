use std::sync::Arc;

use macropanel::{CsvTableLoader, PanelAssembler, PanelAssemblerBuilder};

/// Builder with collaborators for every source role.
///
/// Uses the static mock when `MACROPANEL_EXAMPLES_USE_MOCK` is set, otherwise
/// Yahoo for prices, FRED for statistical series (key from `FRED_API_KEY`)
/// and CSV files for local tables.
pub fn builder() -> Result<PanelAssemblerBuilder, Box<dyn std::error::Error>> {
    if std::env::var("MACROPANEL_EXAMPLES_USE_MOCK").is_ok() {
        println!("--- (Using Mock Sources for CI) ---");
        let mock = Arc::new(macropanel_mock::MockSource::new());
        return Ok(PanelAssembler::builder()
            .with_price_provider(mock.clone())
            .with_observation_provider(mock.clone())
            .with_table_loader(mock)
            .statistical_api_key("demo"));
    }
    let mut b = PanelAssembler::builder()
        .with_price_provider(Arc::new(macropanel_remote::YahooConnector::new_default()?))
        .with_observation_provider(Arc::new(macropanel_remote::FredConnector::new_default()?))
        .with_table_loader(Arc::new(CsvTableLoader::new()));
    // Without a key the statistical series are omitted, not fatal.
    if let Ok(key) = std::env::var("FRED_API_KEY") {
        b = b.statistical_api_key(key);
    }
    Ok(b)
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,macropanel=debug")),
        )
        .try_init();
}
