use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the macropanel workspace.
///
/// Covers structural schema problems in a source, calendar alignment failures,
/// unavailable or slow sources, collaborator-tagged failures, and an aggregate
/// for the case where no source could be used at all.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PanelError {
    /// A declared date or value field is absent from every record of a source.
    #[error("schema error in {label}: field '{field}' is absent from every record")]
    Schema {
        /// Source label the records came from.
        label: String,
        /// Name of the missing field.
        field: String,
    },

    /// Series indices cannot be reconciled onto a single day-granular calendar.
    #[error("alignment error: {0}")]
    Alignment(String),

    /// A fetch collaborator failed for one source.
    #[error("source {label} unavailable: {reason}")]
    SourceUnavailable {
        /// Source label that was omitted.
        label: String,
        /// Human-readable failure reason.
        reason: String,
    },

    /// A fetch collaborator exceeded the configured per-source timeout.
    #[error("source {label} timed out")]
    SourceTimeout {
        /// Source label that timed out.
        label: String,
    },

    /// Every declared source failed; contains the individual failures.
    #[error("all sources unavailable: {0:?}")]
    AllSourcesUnavailable(Vec<PanelError>),

    /// The overall request exceeded the configured deadline.
    #[error("request timed out: {capability}")]
    RequestTimeout {
        /// Stage label for which the request timed out.
        capability: String,
    },

    /// A collaborator (HTTP connector, file loader, mock) returned an error.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Collaborator name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Issues with the numeric content of a series (no usable base value, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Writing the final panel failed.
    #[error("export to {path} failed: {msg}")]
    Export {
        /// Destination path.
        path: String,
        /// Human-readable error message.
        msg: String,
    },
}

impl PanelError {
    /// Helper: build a `Schema` error for a source label and field name.
    pub fn schema(label: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Schema {
            label: label.into(),
            field: field.into(),
        }
    }

    /// Helper: build an `Alignment` error.
    pub fn alignment(msg: impl Into<String>) -> Self {
        Self::Alignment(msg.into())
    }

    /// Helper: build a `SourceUnavailable` error.
    pub fn source_unavailable(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            label: label.into(),
            reason: reason.into(),
        }
    }

    /// Helper: build a `SourceTimeout` error.
    pub fn source_timeout(label: impl Into<String>) -> Self {
        Self::SourceTimeout {
            label: label.into(),
        }
    }

    /// Helper: build a `RequestTimeout` error.
    #[must_use]
    pub fn request_timeout(capability: impl Into<String>) -> Self {
        Self::RequestTimeout {
            capability: capability.into(),
        }
    }

    /// Helper: build a `Connector` error with the collaborator name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Returns true if this error means a single source was dropped from the
    /// panel rather than the whole run failing.
    #[must_use]
    pub const fn is_source_failure(&self) -> bool {
        matches!(
            self,
            Self::SourceUnavailable { .. } | Self::SourceTimeout { .. } | Self::Schema { .. }
        )
    }

    /// Flatten nested `AllSourcesUnavailable` structures into a plain vector.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllSourcesUnavailable(list) => {
                list.into_iter().flat_map(Self::flatten).collect()
            }
            other => vec![other],
        }
    }
}
