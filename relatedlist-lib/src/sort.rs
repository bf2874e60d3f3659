//! Client-side sort engine
//!
//! Sorting re-orders the already-fetched record set without touching the
//! remote source. The sort key for every record is extracted and normalized
//! exactly once into a parallel array, then a stable comparator runs over the
//! pre-extracted keys only. Re-extracting per comparison would multiply
//! field-lookup cost by O(log n) and is deliberately not expressible here.

use std::cmp::Ordering;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;

use crate::model::Record;
use crate::model::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9). Nulls sort first.
    Asc,
    /// Descending order (Z-A, 9-0). Nulls sort last.
    Desc,
}

/// A normalized sort key extracted from one record.
///
/// Non-primitive values are coerced to text during extraction, never during
/// comparison. Keys of different kinds order by kind rank.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    /// Boolean key (false before true).
    Bool(bool),
    /// Numeric key (int, float and currency all normalize here).
    Number(f64),
    /// Date key.
    Date(DateTime<Utc>),
    /// Text key (strings and coerced non-primitives), compared
    /// case-insensitively.
    Text(String),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Number(_) => 1,
            Self::Date(_) => 2,
            Self::Text(_) => 3,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Int(n) => Some(Self::Number(*n as f64)),
            Value::Float(n) => Some(Self::Number(*n)),
            Value::Currency(d) => match d.to_f64() {
                Some(n) => Some(Self::Number(n)),
                // Out-of-range amounts fall back to their text form.
                None => Some(Self::Text(d.to_string())),
            },
            Value::Date(dt) => Some(Self::Date(*dt)),
            Value::String(s) => Some(Self::Text(s.to_lowercase())),
            Value::Record(r) => Some(Self::Text(
                r.display_name().unwrap_or_default().to_lowercase(),
            )),
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

/// Extracts the normalized sort key for one record.
///
/// Supports direct field names and one dotted relationship level. Extraction
/// failures never abort a sort: the anomaly is logged and the record gets a
/// null key, which the null-ordering rules then place.
pub fn extract_key(record: &Record, field_path: &str) -> Option<SortKey> {
    match record.get_path(field_path) {
        Ok(Some(value)) => SortKey::from_value(value),
        Ok(None) => None,
        Err(err) => {
            log::warn!(
                "Sort key extraction failed for record '{}': {err}",
                record.id()
            );
            None
        }
    }
}

/// Sorts records by the given field path and direction.
///
/// Null keys are "less than" any value; the direction flips only the final
/// comparison sign, so nulls come first ascending and last descending. The
/// sort is stable: records with equal keys keep their fetched order.
pub fn sort_records(records: Vec<Record>, field_path: &str, direction: Direction) -> Vec<Record> {
    sort_records_by_key(records, direction, |record| {
        extract_key(record, field_path)
    })
}

/// Sorts records by a caller-supplied key extractor.
///
/// The extractor runs exactly once per record, before the comparator ever
/// runs; the comparator sees pre-extracted keys only.
pub fn sort_records_by_key(
    records: Vec<Record>,
    direction: Direction,
    mut extract: impl FnMut(&Record) -> Option<SortKey>,
) -> Vec<Record> {
    let mut keyed: Vec<(Option<SortKey>, Record)> = records
        .into_iter()
        .map(|record| (extract(&record), record))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = compare_keys(a, b);
        match direction {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    });

    keyed.into_iter().map(|(_, record)| record).collect()
}

fn compare_keys(a: &Option<SortKey>, b: &Option<SortKey>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.compare(b),
    }
}
