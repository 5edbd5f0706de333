use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, SecondsFormat};
use macropanel_core::connector::PriceProvider;
use macropanel_core::{PanelError, RawRecord, RawValue};
use serde_json::Value;

use crate::adapter::{JsonAdapter, ReqwestAdapter};
use crate::retag;

/// Daily price history from the Yahoo chart API.
///
/// Each bar's timestamp is shifted into the exchange's UTC offset and emitted
/// as RFC 3339 text, so the normalizer keeps the exchange-local trading date.
/// `Close` carries the split and dividend adjusted close when the response
/// includes it, the raw close otherwise.
pub struct YahooConnector {
    adapter: Arc<dyn JsonAdapter>,
    base_url: String,
}

impl YahooConnector {
    /// Connector name used in error tagging and logs.
    pub const NAME: &'static str = "yahoo";
    /// Default API host.
    pub const DEFAULT_BASE_URL: &'static str = "https://query1.finance.yahoo.com";

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

    fn bad_payload(symbol: &str, what: &str) -> PanelError {
        PanelError::connector(Self::NAME, format!("chart for {symbol}: {what}"))
    }
}

fn number_at(series: Option<&Value>, i: usize) -> RawValue {
    series
        .and_then(|s| s.get(i))
        .and_then(Value::as_f64)
        .map_or(RawValue::Null, RawValue::Number)
}

/// Convert a chart payload into one record per bar.
///
/// Every bar is shifted by the payload's single current `gmtoffset`. Daily bars
/// are stamped at the session open, so a historical daylight-saving shift of an
/// hour never moves a bar to another calendar date.
fn chart_records(symbol: &str, body: &Value) -> Result<Vec<RawRecord>, PanelError> {
    let chart = body
        .get("chart")
        .ok_or_else(|| YahooConnector::bad_payload(symbol, "missing 'chart'"))?;
    if let Some(err) = chart.get("error").filter(|e| !e.is_null()) {
        let msg = err
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(YahooConnector::bad_payload(symbol, msg));
    }
    let result = chart
        .get("result")
        .and_then(|r| r.get(0))
        .ok_or_else(|| YahooConnector::bad_payload(symbol, "empty result"))?;

    let gmtoffset = result
        .pointer("/meta/gmtoffset")
        .and_then(Value::as_i64)
        .unwrap_or(0);
    let offset = i32::try_from(gmtoffset)
        .ok()
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| YahooConnector::bad_payload(symbol, "invalid gmtoffset"))?;

    // A symbol with no trading history comes back without a timestamp array.
    let Some(timestamps) = result.get("timestamp").and_then(Value::as_array) else {
        return Ok(Vec::new());
    };
    let quote = result.pointer("/indicators/quote/0");
    let adjclose = result.pointer("/indicators/adjclose/0/adjclose");
    let field = |name: &str| quote.and_then(|q| q.get(name));

    let mut out = Vec::with_capacity(timestamps.len());
    for (i, ts) in timestamps.iter().enumerate() {
        let Some(ts) = ts.as_i64() else { continue };
        let Some(utc) = DateTime::from_timestamp(ts, 0) else {
            continue;
        };
        let local = utc.with_timezone(&offset);
        let close = match number_at(adjclose, i) {
            RawValue::Null => number_at(field("close"), i),
            adjusted => adjusted,
        };
        out.push(
            RawRecord::new()
                .with("Date", local.to_rfc3339_opts(SecondsFormat::Secs, false))
                .with("Open", number_at(field("open"), i))
                .with("High", number_at(field("high"), i))
                .with("Low", number_at(field("low"), i))
                .with("Close", close)
                .with("Volume", number_at(field("volume"), i)),
        );
    }
    Ok(out)
}

#[async_trait]
impl PriceProvider for YahooConnector {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "macropanel_remote::yahoo::daily_history", skip(self))
    )]
    async fn daily_history(&self, symbol: &str) -> Result<Vec<RawRecord>, PanelError> {
        let url = format!("{}/v8/finance/chart/{symbol}", self.base_url);
        let body = self
            .adapter
            .get_json(&url, &[("range", "max"), ("interval", "1d")])
            .await
            .map_err(|e| retag(e, Self::NAME))?;
        let records = chart_records(symbol, &body)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(symbol, bars = records.len(), "fetched chart");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn shifts_timestamps_into_exchange_offset() {
        // 2020-01-02 14:30 UTC is 09:30 in New York.
        let body = json!({
            "chart": {
                "result": [{
                    "meta": { "gmtoffset": -18000 },
                    "timestamp": [1_577_975_400],
                    "indicators": {
                        "quote": [{ "open": [1.0], "high": [2.0], "low": [0.5], "close": [1.5], "volume": [10] }],
                        "adjclose": [{ "adjclose": [1.4] }]
                    }
                }],
                "error": null
            }
        });
        let recs = chart_records("^GSPC", &body).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(
            recs[0].get("Date"),
            Some(&RawValue::from("2020-01-02T09:30:00-05:00"))
        );
        assert_eq!(recs[0].get("Close"), Some(&RawValue::Number(1.4)));
        assert_eq!(recs[0].get("Volume"), Some(&RawValue::Number(10.0)));
    }

    #[test]
    fn api_error_becomes_connector_error() {
        let body = json!({
            "chart": { "result": null, "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" } }
        });
        let err = chart_records("NOPE", &body).unwrap_err();
        assert!(matches!(err, PanelError::Connector { connector, .. } if connector == "yahoo"));
    }
}
