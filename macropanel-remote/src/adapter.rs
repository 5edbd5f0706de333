use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use macropanel_core::PanelError;
use serde_json::Value;

/// Connector name used for transport-level errors before a connector re-tags them.
pub const TRANSPORT: &str = "macropanel-remote";

/// JSON-over-HTTP abstraction (so we can inject fakes in tests).
#[async_trait]
pub trait JsonAdapter: Send + Sync {
    /// `GET url?query` and decode the body as JSON.
    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, PanelError>;
}

/// Production adapter backed by a shared `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestAdapter {
    client: reqwest::Client,
}

impl ReqwestAdapter {
    /// Browser-like user agent; the chart API rejects the default one.
    pub const USER_AGENT: &'static str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

    /// Build a client with the recommended user agent and a request timeout.
    ///
    /// # Errors
    /// Returns `PanelError::Connector` if the TLS backend cannot be initialized.
    pub fn new_default() -> Result<Self, PanelError> {
        let client = reqwest::Client::builder()
            .user_agent(Self::USER_AGENT)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| PanelError::connector(TRANSPORT, e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an existing `reqwest::Client`.
    #[must_use]
    pub const fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JsonAdapter for ReqwestAdapter {
    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, PanelError> {
        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| PanelError::connector(TRANSPORT, e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(PanelError::connector(
                TRANSPORT,
                format!("HTTP {status} from {url}"),
            ));
        }
        resp.json::<Value>()
            .await
            .map_err(|e| PanelError::connector(TRANSPORT, format!("invalid JSON from {url}: {e}")))
    }
}

impl dyn JsonAdapter {
    /// Build a `JsonAdapter` from a closure over the URL and query pairs.
    pub fn from_fn<F>(f: F) -> Arc<dyn JsonAdapter>
    where
        F: Send + Sync + 'static + Fn(&str, Vec<(String, String)>) -> Result<Value, PanelError>,
    {
        struct FnAdapter<F>(F);

        #[async_trait]
        impl<F> JsonAdapter for FnAdapter<F>
        where
            F: Send
                + Sync
                + 'static
                + Fn(&str, Vec<(String, String)>) -> Result<Value, PanelError>,
        {
            async fn get_json(
                &self,
                url: &str,
                query: &[(&str, &str)],
            ) -> Result<Value, PanelError> {
                let owned = query
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                    .collect();
                (self.0)(url, owned)
            }
        }

        Arc::new(FnAdapter(f))
    }
}
