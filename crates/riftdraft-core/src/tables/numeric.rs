// Numeric field extraction from externally-authored JSON records.
//
// Every number read from a table goes through `finite_or_none`: non-finite,
// non-numeric or missing values all become `None` before any arithmetic.

use serde_json::{Map, Value};

use crate::draft::role::Role;

/// Suffix marking a sample-weighted variant of a field; preferred when present.
pub const WEIGHTED_SUFFIX: &str = "_weighted";

/// A finite number, or `None`. Numeric strings ("51.2") are accepted.
pub fn finite_or_none(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// First usable value among `names`, checking `<name>_weighted` before
/// `<name>` for each candidate in turn.
pub fn number_field(record: &Map<String, Value>, names: &[&str]) -> Option<f64> {
    names.iter().find_map(|name| {
        record
            .get(&format!("{name}{WEIGHTED_SUFFIX}"))
            .and_then(finite_or_none)
            .or_else(|| record.get(*name).and_then(finite_or_none))
    })
}

/// Rates may be authored as fractions (0.52) or percentages (52.0).
pub fn as_percent(rate: f64) -> f64 {
    if rate.abs() <= 1.0 {
        rate * 100.0
    } else {
        rate
    }
}

/// Percentage-valued field, normalized to 0–100.
pub fn percent_field(record: &Map<String, Value>, names: &[&str]) -> Option<f64> {
    number_field(record, names).map(as_percent)
}

/// Sample size field; negative counts are treated as missing.
pub fn games_field(record: &Map<String, Value>) -> Option<f64> {
    number_field(record, &["games", "occurrences", "sample_size"]).filter(|g| *g >= 0.0)
}

/// Optional role annotation such as `"self_role": "MID"`.
pub fn role_field(record: &Map<String, Value>, names: &[&str]) -> Option<Role> {
    names
        .iter()
        .find_map(|name| record.get(*name).and_then(Value::as_str))
        .and_then(|s| Role::parse(s).ok())
}
