use crate::PanelError;
use crate::types::{FillPolicy, Panel};

/// Carry each observed value forward until the next observation.
///
/// Cells before the first observation stay missing.
#[must_use]
pub fn forward_fill(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut last = None;
    values
        .iter()
        .map(|v| {
            if v.is_some() {
                last = *v;
            }
            last
        })
        .collect()
}

/// Linearly interpolate missing runs bounded by observed values on both sides.
///
/// Weights use row position, which equals calendar-day distance on a gap-free
/// daily index. Leading and trailing runs are kept missing.
#[must_use]
pub fn interpolate_interior(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut out = values.to_vec();
    let observed: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .collect();
    for pair in observed.windows(2) {
        let (i0, v0) = pair[0];
        let (i1, v1) = pair[1];
        if i1 <= i0 + 1 {
            continue;
        }
        let span = (i1 - i0) as f64;
        for (k, cell) in out.iter_mut().enumerate().take(i1).skip(i0 + 1) {
            let w = (k - i0) as f64 / span;
            *cell = Some(v0 + (v1 - v0) * w);
        }
    }
    out
}

/// Apply each column's class-driven fill policy and return a new panel.
///
/// # Errors
/// Returns `PanelError::Alignment` if the panel's shape is inconsistent.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "macropanel::fill",
        skip(panel),
        fields(rows = panel.n_rows(), columns = panel.n_cols()),
    )
)]
pub fn apply_fill_policies(panel: &Panel) -> Result<Panel, PanelError> {
    let columns = panel
        .columns()
        .iter()
        .map(|c| match c.class().fill_policy() {
            FillPolicy::None => c.clone(),
            FillPolicy::ForwardFill => c.with_values(forward_fill(c.values())),
            FillPolicy::InterpolateInterior => {
                c.with_values(interpolate_interior(c.values()))
            }
        })
        .collect();
    Panel::try_new(panel.index().to_vec(), columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_fill_never_backfills() {
        let v = [None, Some(1.0), None, Some(2.0), None];
        assert_eq!(
            forward_fill(&v),
            vec![None, Some(1.0), Some(1.0), Some(2.0), Some(2.0)]
        );
    }

    #[test]
    fn interpolation_weights_by_row_position() {
        let v = [None, Some(0.0), None, None, Some(3.0), None];
        assert_eq!(
            interpolate_interior(&v),
            vec![None, Some(0.0), Some(1.0), Some(2.0), Some(3.0), None]
        );
    }
}
