// 統計フィールドのスキーマ: ラベル付き数値を正規表現で抽出する
//
// Each field is looked up independently so that one missing field does not
// hide problems with the others.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// A statistics field reported by the analysis program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Patients,
    Genes,
    Runtime,
    DcsSize,
}

impl Field {
    /// Row label used in the consolidated table.
    pub fn label(self) -> &'static str {
        match self {
            Field::Patients => "Patients",
            Field::Genes => "Genes",
            Field::Runtime => "Runtime (s)",
            Field::DcsSize => "Size of DCS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Count,
    /// Floating-point seconds, rounded to `decimals` digits.
    Seconds { decimals: i32 },
}

#[derive(Debug)]
pub struct FieldSpec {
    pub field: Field,
    /// Regex with exactly one capture group holding the value.
    pub pattern: &'static str,
    pub kind: FieldKind,
}

/// Fields in table row order. A record needs every one of them.
pub static STATISTICS_FIELDS: [FieldSpec; 4] = [
    FieldSpec {
        field: Field::Patients,
        pattern: r"Patients:\s+(\d+)",
        kind: FieldKind::Count,
    },
    FieldSpec {
        field: Field::Genes,
        pattern: r"Genes:\s+(\d+)",
        kind: FieldKind::Count,
    },
    FieldSpec {
        field: Field::Runtime,
        pattern: r"Time \(seconds\):\s+([0-9.]+)",
        kind: FieldKind::Seconds { decimals: 2 },
    },
    FieldSpec {
        field: Field::DcsSize,
        pattern: r"Size of DCS:\s+(\d+)",
        kind: FieldKind::Count,
    },
];

static COMPILED_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    STATISTICS_FIELDS
        .iter()
        .map(|spec| Regex::new(spec.pattern).expect("statistics field pattern must compile"))
        .collect()
});

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Count(u64),
    Seconds(f64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("missing")]
    Missing,

    #[error("unparsable value '{0}'")]
    Unparsable(String),
}

/// Outcome of looking up one field.
#[derive(Debug, Clone)]
pub struct FieldOutcome {
    pub spec: &'static FieldSpec,
    pub value: Result<FieldValue, FieldError>,
}

/// Look up every schema field in `text`. The first match of each pattern wins.
pub fn extract_fields(text: &str) -> Vec<FieldOutcome> {
    STATISTICS_FIELDS
        .iter()
        .zip(COMPILED_PATTERNS.iter())
        .map(|(spec, regex)| FieldOutcome {
            spec,
            value: extract_field(spec, regex, text),
        })
        .collect()
}

fn extract_field(spec: &FieldSpec, regex: &Regex, text: &str) -> Result<FieldValue, FieldError> {
    let raw = regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or(FieldError::Missing)?;

    match spec.kind {
        FieldKind::Count => raw
            .parse::<u64>()
            .map(FieldValue::Count)
            .map_err(|_| FieldError::Unparsable(raw.to_string())),
        FieldKind::Seconds { decimals } => raw
            .parse::<f64>()
            .map(|secs| FieldValue::Seconds(round_to(secs, decimals)))
            .map_err(|_| FieldError::Unparsable(raw.to_string())),
    }
}

/// Round half to even at `decimals` digits.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_of(outcomes: &[FieldOutcome], field: Field) -> Result<FieldValue, FieldError> {
        outcomes
            .iter()
            .find(|o| o.spec.field == field)
            .map(|o| o.value.clone())
            .expect("field present in schema")
    }

    #[test]
    fn test_patterns_compile() {
        assert_eq!(COMPILED_PATTERNS.len(), STATISTICS_FIELDS.len());
    }

    #[test]
    fn test_extract_fields_reports_each_field() {
        let outcomes = extract_fields("Patients: 12\nTime (seconds): 1.005\nSize of DCS: x\n");
        assert_eq!(value_of(&outcomes, Field::Patients), Ok(FieldValue::Count(12)));
        assert_eq!(value_of(&outcomes, Field::Genes), Err(FieldError::Missing));
        assert!(matches!(
            value_of(&outcomes, Field::Runtime),
            Ok(FieldValue::Seconds(_))
        ));
        // `\d+` never matches "x", so the field is missing rather than unparsable.
        assert_eq!(value_of(&outcomes, Field::DcsSize), Err(FieldError::Missing));
    }

    #[test]
    fn test_malformed_float_is_unparsable() {
        let outcomes = extract_fields("Time (seconds): 1.2.3\n");
        assert_eq!(
            value_of(&outcomes, Field::Runtime),
            Err(FieldError::Unparsable("1.2.3".to_string()))
        );
    }

    #[test]
    fn test_round_to_two_decimals() {
        assert_eq!(round_to(3.456, 2), 3.46);
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(7.0, 2), 7.0);
    }
}
