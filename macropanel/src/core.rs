use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use macropanel_core::connector::{ObservationProvider, PriceProvider, TableLoader};
use macropanel_core::{
    ColumnRename, MetricsConfig, PanelConfig, PanelError, PanelIndex, SourceKind, SourceSpec,
};

use crate::catalog;

/// Assembles one daily panel from a price source and any number of macro sources.
pub struct PanelAssembler {
    pub(crate) price: Option<Arc<dyn PriceProvider>>,
    pub(crate) statistical: Option<Arc<dyn ObservationProvider>>,
    pub(crate) tables: Option<Arc<dyn TableLoader>>,
    pub(crate) sources: Vec<SourceSpec>,
    pub(crate) cfg: PanelConfig,
}

/// Builder for constructing a `PanelAssembler` with custom configuration.
pub struct PanelAssemblerBuilder {
    price: Option<Arc<dyn PriceProvider>>,
    statistical: Option<Arc<dyn ObservationProvider>>,
    tables: Option<Arc<dyn TableLoader>>,
    sources: Vec<SourceSpec>,
    cfg: PanelConfig,
}

impl Default for PanelAssemblerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelAssemblerBuilder {
    /// Create a builder with no collaborators, no sources and `PanelConfig::default()`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            price: None,
            statistical: None,
            tables: None,
            sources: Vec::new(),
            cfg: PanelConfig::default(),
        }
    }

    /// Register the collaborator that serves `SourceKind::Price` sources.
    #[must_use]
    pub fn with_price_provider(mut self, p: Arc<dyn PriceProvider>) -> Self {
        self.price = Some(p);
        self
    }

    /// Register the collaborator that serves `SourceKind::Statistical` sources.
    #[must_use]
    pub fn with_observation_provider(mut self, p: Arc<dyn ObservationProvider>) -> Self {
        self.statistical = Some(p);
        self
    }

    /// Register the collaborator that serves `SourceKind::Table` sources.
    #[must_use]
    pub fn with_table_loader(mut self, l: Arc<dyn TableLoader>) -> Self {
        self.tables = Some(l);
        self
    }

    /// Declare one source. Declaration order is the column order of the panel.
    #[must_use]
    pub fn source(mut self, spec: SourceSpec) -> Self {
        self.sources.push(spec);
        self
    }

    /// Declare several sources at once.
    #[must_use]
    pub fn sources(mut self, specs: impl IntoIterator<Item = SourceSpec>) -> Self {
        self.sources.extend(specs);
        self
    }

    /// Declare the default source set rooted at `data_dir` and install its header renames.
    ///
    /// Renames already configured are kept and run first.
    #[must_use]
    pub fn with_default_catalog(mut self, data_dir: impl AsRef<Path>) -> Self {
        self.sources.extend(catalog::default_sources(data_dir));
        self.cfg
            .column_renames
            .extend(catalog::default_column_renames());
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: PanelConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set the trailing-window offsets for the derived price metrics.
    #[must_use]
    pub const fn metrics(mut self, metrics: MetricsConfig) -> Self {
        self.cfg.metrics = metrics;
        self
    }

    /// Select the shape of the final index.
    ///
    /// `PanelIndex::DailyCalendar` (default) covers every day between the first and
    /// last observation of any source; `PanelIndex::Union` keeps only observed dates.
    #[must_use]
    pub const fn index(mut self, index: PanelIndex) -> Self {
        self.cfg.index = index;
        self
    }

    /// Append a final column rename.
    #[must_use]
    pub fn rename(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.cfg.column_renames.push(ColumnRename::new(from, to));
        self
    }

    /// Replace the list of final column renames.
    #[must_use]
    pub fn column_renames(mut self, renames: Vec<ColumnRename>) -> Self {
        self.cfg.column_renames = renames;
        self
    }

    /// API key handed to the statistical collaborator with every request.
    #[must_use]
    pub fn statistical_api_key(mut self, key: impl Into<String>) -> Self {
        self.cfg.statistical_api_key = Some(key.into());
        self
    }

    /// Set the per-source fetch timeout.
    ///
    /// A source that does not answer in time is omitted from the panel.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Set an overall deadline for the concurrent fetch of all sources.
    ///
    /// When exceeded, `assemble` fails with `RequestTimeout`.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Build the `PanelAssembler`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no source is declared, more than one price source
    /// is declared, two sources share a label, or a source needs a collaborator
    /// that was not registered.
    pub fn build(self) -> Result<PanelAssembler, PanelError> {
        if self.sources.is_empty() {
            return Err(PanelError::InvalidArg(
                "no sources declared; add at least one via source(...)".to_string(),
            ));
        }
        if self.sources.iter().filter(|s| s.is_price()).count() > 1 {
            return Err(PanelError::InvalidArg(
                "at most one price source may be declared".to_string(),
            ));
        }
        let mut seen: HashSet<&str> = HashSet::new();
        for spec in &self.sources {
            if !seen.insert(spec.label.as_str()) {
                return Err(PanelError::InvalidArg(format!(
                    "duplicate source label '{}'",
                    spec.label
                )));
            }
            let (registered, role) = match spec.kind {
                SourceKind::Price { .. } => (self.price.is_some(), "price provider"),
                SourceKind::Statistical { .. } => {
                    (self.statistical.is_some(), "observation provider")
                }
                SourceKind::Table { .. } => (self.tables.is_some(), "table loader"),
                _ => (false, "collaborator"),
            };
            if !registered {
                return Err(PanelError::InvalidArg(format!(
                    "source '{}' needs a {role}; none registered",
                    spec.label
                )));
            }
        }

        Ok(PanelAssembler {
            price: self.price,
            statistical: self.statistical,
            tables: self.tables,
            sources: self.sources,
            cfg: self.cfg,
        })
    }
}

/// Map a collaborator failure onto the source it was serving.
///
/// Errors that already name a source pass through; anything else becomes
/// `SourceUnavailable` carrying the original message.
pub fn tag_err(label: &str, e: PanelError) -> PanelError {
    if e.is_source_failure() {
        e
    } else {
        PanelError::source_unavailable(label, e.to_string())
    }
}

/// Await `fut`, failing with `RequestTimeout("request")` once `deadline` elapses.
pub(crate) async fn with_request_deadline<T, Fut>(
    deadline: Option<Duration>,
    fut: Fut,
) -> Result<T, PanelError>
where
    Fut: core::future::Future<Output = T>,
{
    match deadline {
        Some(d) => tokio::time::timeout(d, fut)
            .await
            .map_err(|_| PanelError::request_timeout("request")),
        None => Ok(fut.await),
    }
}

impl PanelAssembler {
    /// Wrap a source fetch with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "macropanel::core::source_call_with_timeout",
            skip(fut),
            fields(timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX)),
        )
    )]
    pub(crate) async fn source_call_with_timeout<T, Fut>(
        label: &str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, PanelError>
    where
        Fut: core::future::Future<Output = Result<T, PanelError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(PanelError::source_timeout(label)))
    }

    /// Start building a new `PanelAssembler`.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use macropanel::PanelAssembler;
    /// use macropanel_remote::{FredConnector, YahooConnector};
    ///
    /// let assembler = PanelAssembler::builder()
    ///     .with_price_provider(Arc::new(YahooConnector::new_default()?))
    ///     .with_observation_provider(Arc::new(FredConnector::new_default()?))
    ///     .with_table_loader(Arc::new(macropanel::CsvTableLoader::new()))
    ///     .with_default_catalog("data_features")
    ///     .statistical_api_key(std::env::var("FRED_API_KEY")?)
    ///     .build()?;
    /// let report = assembler.assemble().await?;
    /// ```
    #[must_use]
    pub fn builder() -> PanelAssemblerBuilder {
        PanelAssemblerBuilder::new()
    }

    /// Declared sources, in declaration order.
    #[must_use]
    pub fn sources(&self) -> &[SourceSpec] {
        &self.sources
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &PanelConfig {
        &self.cfg
    }
}
