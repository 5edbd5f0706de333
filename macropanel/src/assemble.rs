use std::collections::BTreeMap;

use macropanel_core::connector::ObservationRequest;
use macropanel_core::{
    CanonicalSeries, CoercionKind, ColumnRename, DailyCalendar, MetricsConfig, Panel, PanelError,
    PanelIndex, PanelReport, RawRecord, SourceKind, SourceSpec, apply_fill_policies, compute_metrics,
    expand_to_daily, merge_outer, normalize_records, reindex_forward_fill,
};

use crate::core::{PanelAssembler, tag_err};
use crate::util::{collapse_failures, join_with_deadline};

/// Apply `renames` in order to a column name.
fn rename_target(name: &str, renames: &[ColumnRename]) -> String {
    renames.iter().fold(name.to_string(), |current, r| {
        if current == r.from {
            r.to.clone()
        } else {
            current
        }
    })
}

/// Rename panel columns.
///
/// # Errors
/// Returns `PanelError::Alignment` if two columns end up with the same name.
fn apply_renames(panel: Panel, renames: &[ColumnRename]) -> Result<Panel, PanelError> {
    if renames.is_empty() {
        return Ok(panel);
    }
    let (index, columns) = panel.into_parts();
    let columns = columns
        .into_iter()
        .map(|c| {
            let target = rename_target(c.name(), renames);
            if target == c.name() {
                c
            } else {
                c.renamed(target)
            }
        })
        .collect();
    Panel::try_new(index, columns)
}

/// Expand the price series into `Close` plus its derived metrics on the
/// price's own daily calendar.
///
/// Leading and trailing missing closes are trimmed first so that the
/// normalized level starts at exactly 1.0. An empty series yields no columns.
fn price_block(
    close: &CanonicalSeries,
    metrics: &MetricsConfig,
) -> Result<Vec<CanonicalSeries>, PanelError> {
    let trimmed = close.trim_missing();
    let Some(calendar) = DailyCalendar::spanning([&trimmed]) else {
        return Ok(Vec::new());
    };
    let daily = reindex_forward_fill(&trimmed, &calendar)?;
    let derived = compute_metrics(&daily, metrics)?;
    let mut out = Vec::with_capacity(7);
    out.push(daily);
    out.extend(derived.into_series());
    Ok(out)
}

impl PanelAssembler {
    async fn fetch_records(&self, spec: &SourceSpec) -> Result<Vec<RawRecord>, PanelError> {
        let missing = || {
            PanelError::InvalidArg(format!("no collaborator registered for '{}'", spec.label))
        };
        match &spec.kind {
            SourceKind::Price { symbol } => {
                let p = self.price.as_ref().ok_or_else(missing)?;
                p.daily_history(symbol).await
            }
            SourceKind::Statistical { series_id } => {
                let p = self.statistical.as_ref().ok_or_else(missing)?;
                let req = ObservationRequest::new(series_id.clone())
                    .with_api_key(self.cfg.statistical_api_key.clone());
                p.observations(&req).await
            }
            SourceKind::Table { path } => {
                let l = self.tables.as_ref().ok_or_else(missing)?;
                l.load(path).await
            }
            _ => Err(missing()),
        }
    }

    async fn fetch_source(&self, spec: &SourceSpec) -> Result<Vec<RawRecord>, PanelError> {
        Self::source_call_with_timeout(
            &spec.label,
            self.cfg.provider_timeout,
            self.fetch_records(spec),
        )
        .await
        .map_err(|e| tag_err(&spec.label, e))
    }

    /// Fetch every source, normalize, align and fill into one daily panel.
    ///
    /// Behavior:
    /// - Sources are fetched concurrently, each bounded by the provider timeout;
    ///   results are processed in declaration order regardless of arrival order.
    /// - A source that fails, times out, lacks a declared field, or yields no
    ///   usable value is omitted and recorded in `PanelReport::omitted`;
    ///   assembly continues without it.
    /// - The price source becomes `Close` plus the derived metric columns, placed
    ///   first; macro columns follow in declaration order.
    /// - Non-numeric cells become missing and are counted per column in
    ///   `PanelReport::coercions`.
    ///
    /// # Errors
    /// - `AllSourcesUnavailable` if every source is omitted.
    /// - `RequestTimeout` if the overall request deadline elapses during the fetch.
    /// - `Alignment` if two sources produce the same column name, before or after renames.
    /// - `Data` if the price series has no usable base value.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "macropanel::assemble",
            skip(self),
            fields(sources = self.sources.len()),
        )
    )]
    pub async fn assemble(&self) -> Result<PanelReport, PanelError> {
        let tasks = self.sources.iter().map(|spec| self.fetch_source(spec));
        let fetched = join_with_deadline(tasks, self.cfg.request_timeout)
            .await
            .map_err(|e| match e {
                PanelError::RequestTimeout { .. } => PanelError::request_timeout("assemble:fetch"),
                other => other,
            })?;

        let mut price_columns: Vec<CanonicalSeries> = Vec::new();
        let mut macro_columns: Vec<CanonicalSeries> = Vec::new();
        let mut omitted: Vec<PanelError> = Vec::new();
        let mut coercions: BTreeMap<String, usize> = BTreeMap::new();
        let mut skipped_records = 0usize;

        for (spec, result) in self.sources.iter().zip(fetched) {
            let records = match result {
                Ok(records) => records,
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(label = %spec.label, error = %e, "source omitted");
                    omitted.push(e);
                    continue;
                }
            };
            let normalized = match normalize_records(&spec.label, &records, &spec.schema, spec.class)
            {
                Ok(n) => n,
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(label = %spec.label, error = %e, "source omitted");
                    omitted.push(tag_err(&spec.label, e));
                    continue;
                }
            };

            skipped_records += normalized.skipped_records();
            if normalized.series.iter().all(|s| s.observed_count() == 0) {
                let e = PanelError::source_unavailable(&spec.label, "no usable values");
                #[cfg(feature = "tracing")]
                tracing::warn!(label = %spec.label, error = %e, "source omitted");
                omitted.push(e);
                continue;
            }
            for w in normalized
                .warnings
                .iter()
                .filter(|w| w.kind == CoercionKind::Value)
            {
                let column = rename_target(&w.column, &self.cfg.column_renames);
                *coercions.entry(column).or_default() += 1;
            }

            if spec.is_price() {
                let Some(close) = normalized.series.first() else {
                    continue;
                };
                price_columns = price_block(close, &self.cfg.metrics)?;
            } else {
                macro_columns.extend(normalized.series);
            }
        }

        if omitted.len() == self.sources.len() {
            return Err(collapse_failures(omitted));
        }

        #[cfg(feature = "tracing")]
        if !coercions.is_empty() {
            tracing::warn!(
                columns = coercions.len(),
                cells = coercions.values().sum::<usize>(),
                "non-numeric cells coerced to missing"
            );
        }

        let merged = merge_outer(price_columns.iter().chain(&macro_columns))?;
        let indexed = if matches!(self.cfg.index, PanelIndex::Union) {
            merged
        } else {
            expand_to_daily(&merged)?
        };
        let filled = apply_fill_policies(&indexed)?;
        let panel = apply_renames(filled, &self.cfg.column_renames)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            rows = panel.n_rows(),
            columns = panel.n_cols(),
            omitted = omitted.len(),
            "assembled panel"
        );

        Ok(PanelReport {
            panel,
            omitted,
            coercions,
            skipped_records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renames_apply_in_order() {
        let renames = vec![ColumnRename::new("a", "b"), ColumnRename::new("b", "c")];
        assert_eq!(rename_target("a", &renames), "c");
        assert_eq!(rename_target("x", &renames), "x");
    }
}
