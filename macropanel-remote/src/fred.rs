use std::sync::Arc;

use async_trait::async_trait;
use macropanel_core::connector::{ObservationProvider, ObservationRequest};
use macropanel_core::{PanelError, RawRecord, RawValue};
use serde_json::Value;

use crate::adapter::{JsonAdapter, ReqwestAdapter};
use crate::retag;

/// Statistical series observations from the FRED API.
///
/// Requests without an API key fail immediately with a connector error and
/// never touch the network.
pub struct FredConnector {
    adapter: Arc<dyn JsonAdapter>,
    base_url: String,
}

impl FredConnector {
    /// Connector name used in error tagging and logs.
    pub const NAME: &'static str = "fred";
    /// Default API host.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.stlouisfed.org";

    /// Build with a fresh `ReqwestAdapter`.
    ///
    /// # Errors
    /// Returns `PanelError::Connector` if the HTTP client cannot be built.
    pub fn new_default() -> Result<Self, PanelError> {
        Ok(Self::from_adapter(Arc::new(ReqwestAdapter::new_default()?)))
    }

    /// Build on top of any `JsonAdapter` (tests inject fakes here).
    #[must_use]
    pub fn from_adapter(adapter: Arc<dyn JsonAdapter>) -> Self {
        Self {
            adapter,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the connector at another host.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

fn cell(v: &Value) -> RawValue {
    match v {
        Value::Null => RawValue::Null,
        Value::String(s) => RawValue::Text(s.clone()),
        Value::Number(n) => n.as_f64().map_or(RawValue::Null, RawValue::Number),
        other => RawValue::Text(other.to_string()),
    }
}

/// Convert an observations payload into one record per observation, keeping
/// every field the service returns.
fn observation_records(series_id: &str, body: &Value) -> Result<Vec<RawRecord>, PanelError> {
    if let Some(msg) = body.get("error_message").and_then(Value::as_str) {
        return Err(PanelError::connector(
            FredConnector::NAME,
            format!("observations for {series_id}: {msg}"),
        ));
    }
    let observations = body
        .get("observations")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            PanelError::connector(
                FredConnector::NAME,
                format!("observations for {series_id}: missing 'observations'"),
            )
        })?;
    Ok(observations
        .iter()
        .filter_map(Value::as_object)
        .map(|obj| obj.iter().map(|(k, v)| (k.clone(), cell(v))).collect::<RawRecord>())
        .collect())
}

#[async_trait]
impl ObservationProvider for FredConnector {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "macropanel_remote::fred::observations",
            skip(self, req),
            fields(series_id = %req.series_id),
        )
    )]
    async fn observations(&self, req: &ObservationRequest) -> Result<Vec<RawRecord>, PanelError> {
        let Some(key) = req.api_key.as_deref().filter(|k| !k.is_empty()) else {
            return Err(PanelError::connector(
                Self::NAME,
                format!("no API key configured for series {}", req.series_id),
            ));
        };
        let url = format!("{}/fred/series/observations", self.base_url);
        let body = self
            .adapter
            .get_json(
                &url,
                &[
                    ("series_id", req.series_id.as_str()),
                    ("api_key", key),
                    ("file_type", "json"),
                ],
            )
            .await
            .map_err(|e| retag(e, Self::NAME))?;
        observation_records(&req.series_id, &body)
    }
}
