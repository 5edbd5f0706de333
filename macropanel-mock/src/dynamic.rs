use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use macropanel_core::connector::{
    ObservationProvider, ObservationRequest, PriceProvider, TableLoader,
};
use macropanel_core::{PanelError, RawRecord};

/// Instruction for how a call should behave for a given key.
#[derive(Clone)]
pub enum MockBehavior {
    /// Return the provided records immediately.
    Return(Vec<RawRecord>),
    /// Fail immediately with the provided error.
    Fail(PanelError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

#[derive(Default)]
struct InternalState {
    price_rules: HashMap<String, MockBehavior>,
    observation_rules: HashMap<String, MockBehavior>,
    table_rules: HashMap<PathBuf, MockBehavior>,
    observation_requests: Vec<ObservationRequest>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `daily_history` calls for a symbol.
    pub async fn set_price_behavior(&self, symbol: impl Into<String>, behavior: MockBehavior) {
        let mut guard = self.state.lock().await;
        guard.price_rules.insert(symbol.into(), behavior);
    }

    /// Set the behavior for `observations` calls for a series id.
    pub async fn set_observation_behavior(
        &self,
        series_id: impl Into<String>,
        behavior: MockBehavior,
    ) {
        let mut guard = self.state.lock().await;
        guard.observation_rules.insert(series_id.into(), behavior);
    }

    /// Set the behavior for `load` calls for a path.
    pub async fn set_table_behavior(&self, path: impl Into<PathBuf>, behavior: MockBehavior) {
        let mut guard = self.state.lock().await;
        guard.table_rules.insert(path.into(), behavior);
    }

    /// Return a copy of every observation request received so far.
    pub async fn observation_requests(&self) -> Vec<ObservationRequest> {
        let guard = self.state.lock().await;
        guard.observation_requests.clone()
    }

    /// Clear all configured behaviors and request logs.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.price_rules.clear();
        guard.observation_rules.clear();
        guard.table_rules.clear();
        guard.observation_requests.clear();
    }
}

/// A source that defers all behavior to an external controller.
pub struct DynamicMockSource {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockSource {
    /// Create a new dynamic mock source and its controller.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<Self>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        (Arc::new(Self { name, state }), controller)
    }

    async fn run(
        &self,
        behavior: Option<MockBehavior>,
        what: &str,
    ) -> Result<Vec<RawRecord>, PanelError> {
        match behavior {
            Some(MockBehavior::Return(records)) => Ok(records),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => std::future::pending().await,
            None => Err(PanelError::connector(
                self.name,
                format!("no behavior configured for {what}"),
            )),
        }
    }
}

#[async_trait]
impl PriceProvider for DynamicMockSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn daily_history(&self, symbol: &str) -> Result<Vec<RawRecord>, PanelError> {
        // Snapshot the rule without holding the lock across the await below
        let behavior = {
            let guard = self.state.lock().await;
            guard.price_rules.get(symbol).cloned()
        };
        self.run(behavior, symbol).await
    }
}

#[async_trait]
impl ObservationProvider for DynamicMockSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn observations(&self, req: &ObservationRequest) -> Result<Vec<RawRecord>, PanelError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.observation_requests.push(req.clone());
            guard.observation_rules.get(&req.series_id).cloned()
        };
        self.run(behavior, &req.series_id).await
    }
}

#[async_trait]
impl TableLoader for DynamicMockSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn load(&self, path: &Path) -> Result<Vec<RawRecord>, PanelError> {
        let behavior = {
            let guard = self.state.lock().await;
            guard.table_rules.get(path).cloned()
        };
        self.run(behavior, &path.display().to_string()).await
    }
}
