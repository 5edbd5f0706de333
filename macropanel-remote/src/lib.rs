//! macropanel-remote
//!
//! HTTP collaborators for the panel assembler: [`YahooConnector`] serves daily
//! index prices and [`FredConnector`] serves statistical series. Both sit on
//! top of the injectable [`adapter::JsonAdapter`] so tests run without a network.
#![warn(missing_docs)]

/// Transport abstraction and the production adapter backed by `reqwest`.
pub mod adapter;
mod fred;
mod yahoo;

use macropanel_core::PanelError;

pub use adapter::{JsonAdapter, ReqwestAdapter};
pub use fred::FredConnector;
pub use yahoo::YahooConnector;

/// Attribute transport-level connector errors to the connector that issued the request.
fn retag(e: PanelError, connector: &'static str) -> PanelError {
    match e {
        PanelError::Connector { msg, .. } => PanelError::connector(connector, msg),
        other => other,
    }
}
