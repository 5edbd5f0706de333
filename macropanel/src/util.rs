use macropanel_core::PanelError;

/// Await every source fetch, bounded by an optional overall deadline.
///
/// Results come back in the order of `tasks`, whatever order they finish in.
/// An elapsed deadline yields `RequestTimeout("request")`; `assemble` relabels
/// it with the stage that was running.
///
/// # Errors
/// Returns `PanelError::RequestTimeout` if `deadline` elapses before every task completes.
pub async fn join_with_deadline<I, F, T>(
    tasks: I,
    deadline: Option<std::time::Duration>,
) -> Result<Vec<T>, PanelError>
where
    I: IntoIterator<Item = F>,
    F: core::future::Future<Output = T>,
{
    crate::core::with_request_deadline(deadline, futures::future::join_all(tasks)).await
}

/// Collapse the per-source failures of a run in which nothing succeeded.
///
/// Nested `AllSourcesUnavailable` values are flattened so callers see one
/// error per source.
#[must_use]
pub fn collapse_failures(errors: Vec<PanelError>) -> PanelError {
    PanelError::AllSourcesUnavailable(errors.into_iter().flat_map(PanelError::flatten).collect())
}
