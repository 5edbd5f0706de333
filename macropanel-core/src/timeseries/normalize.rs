use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::PanelError;
use crate::types::{
    CanonicalSeries, CoercionKind, DateField, RawRecord, RawValue, RecordSchema, SeriesClass,
    ValueCoercionWarning,
};

/// Text cells that mean "no value" and are not reported as coercion failures.
const MISSING_SENTINELS: &[&str] = &[".", "NA", "N/A", "NaN", "nan", "null"];

static NULL_CELL: RawValue = RawValue::Null;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%:z", "%Y-%m-%d %H:%M:%S%.f%:z"];

/// Output of normalizing one source.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// One series per declared value field, in schema order.
    pub series: Vec<CanonicalSeries>,
    /// Non-fatal coercion failures, in record order.
    pub warnings: Vec<ValueCoercionWarning>,
}

impl Normalized {
    /// Number of records skipped because their date could not be parsed.
    #[must_use]
    pub fn skipped_records(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| w.kind == CoercionKind::Date)
            .count()
    }
}

/// Parse a textual date or timestamp to a calendar day.
///
/// Time-of-day is dropped. Timestamps with an offset keep their own local date.
#[must_use]
pub fn parse_date_text(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.date_naive());
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

fn whole_number(v: &RawValue) -> Option<i64> {
    let n = match v {
        RawValue::Number(n) => *n,
        RawValue::Text(s) => s.trim().parse::<f64>().ok()?,
        RawValue::Null => return None,
    };
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        Some(n as i64)
    } else {
        None
    }
}

fn parse_date(v: &RawValue, field: &DateField) -> Option<NaiveDate> {
    match field {
        DateField::Text(_) => match v {
            RawValue::Text(s) => parse_date_text(s),
            RawValue::Number(_) | RawValue::Null => None,
        },
        DateField::Year(_) => {
            let year = i32::try_from(whole_number(v)?).ok()?;
            NaiveDate::from_ymd_opt(year, 1, 1)
        }
        DateField::EpochSeconds(_) => {
            DateTime::from_timestamp(whole_number(v)?, 0).map(|dt| dt.date_naive())
        }
        _ => None,
    }
}

/// Coerce a raw cell to a number. `Err(())` means the cell is present but not numeric.
fn coerce_value(v: &RawValue) -> Result<Option<f64>, ()> {
    match v {
        RawValue::Null => Ok(None),
        RawValue::Number(n) => Ok((!n.is_nan()).then_some(*n)),
        RawValue::Text(s) => {
            let t = s.trim();
            if t.is_empty() || MISSING_SENTINELS.contains(&t) {
                return Ok(None);
            }
            t.parse::<f64>()
                .map(|n| (!n.is_nan()).then_some(n))
                .map_err(|_| ())
        }
    }
}

/// Normalize the raw records of one source into canonical series.
///
/// - Produces one series per `ValueField`, named after its output column and
///   tagged with `class`.
/// - Dates are parsed to day granularity; records with unparseable dates are
///   skipped and reported as `CoercionKind::Date` warnings.
/// - Non-numeric values become missing and are reported as
///   `CoercionKind::Value` warnings; sentinels such as `"."` become missing silently.
/// - When two records share a date the later one wins, even if its value is missing.
///
/// # Errors
/// Returns `PanelError::Schema` if the date field or any value field is absent
/// from every record. An empty record list has no date field either and is
/// rejected the same way.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "macropanel::normalize",
        skip(records, schema),
        fields(records = records.len(), columns = schema.values.len()),
    )
)]
pub fn normalize_records(
    label: &str,
    records: &[RawRecord],
    schema: &RecordSchema,
    class: SeriesClass,
) -> Result<Normalized, PanelError> {
    let date_field = schema.date.field();
    if !records.iter().any(|r| r.contains(date_field)) {
        return Err(PanelError::schema(label, date_field));
    }
    for vf in &schema.values {
        if !records.iter().any(|r| r.contains(&vf.field)) {
            return Err(PanelError::schema(label, vf.field.clone()));
        }
    }

    let mut maps: Vec<BTreeMap<NaiveDate, Option<f64>>> =
        vec![BTreeMap::new(); schema.values.len()];
    let mut warnings: Vec<ValueCoercionWarning> = Vec::new();

    for rec in records {
        let raw_date = rec.get(date_field).unwrap_or(&NULL_CELL);
        let Some(date) = parse_date(raw_date, &schema.date) else {
            warnings.push(ValueCoercionWarning {
                label: label.to_string(),
                column: date_field.to_string(),
                date: None,
                raw: raw_date.display(),
                kind: CoercionKind::Date,
            });
            continue;
        };

        for (vf, map) in schema.values.iter().zip(maps.iter_mut()) {
            let raw = rec.get(&vf.field).unwrap_or(&NULL_CELL);
            let value = coerce_value(raw).unwrap_or_else(|()| {
                warnings.push(ValueCoercionWarning {
                    label: label.to_string(),
                    column: vf.column.clone(),
                    date: Some(date),
                    raw: raw.display(),
                    kind: CoercionKind::Value,
                });
                None
            });
            map.insert(date, value);
        }
    }

    #[cfg(feature = "tracing")]
    if !warnings.is_empty() {
        tracing::debug!(label, warnings = warnings.len(), "coerced cells to missing");
    }

    let series = schema
        .values
        .iter()
        .zip(maps)
        .map(|(vf, map)| CanonicalSeries::from_map(vf.column.clone(), class, map))
        .collect();

    Ok(Normalized { series, warnings })
}
