//! Required-field validation.
//!
//! Run against the caller-supplied field map before any store write. Text
//! fields must be present and non-empty after trimming; amounts must parse
//! as exact decimals (string or JSON number, never floats taken at face
//! value); timestamps must parse as RFC 3339.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::ValidationError;
use crate::types::{FieldKind, FieldSpec};

/// Validate `fields` against a record type's required-field list.
///
/// Returns the first violation found, in declaration order.
pub fn validate_fields(
    specs: &[FieldSpec],
    fields: &Map<String, Value>,
) -> Result<(), ValidationError> {
    for spec in specs {
        let value = fields.get(spec.name);
        match spec.kind {
            FieldKind::Text => validate_text(spec.name, value)?,
            FieldKind::Amount => validate_amount(spec.name, value)?,
            FieldKind::DateTime => validate_timestamp(spec.name, value)?,
        }
    }
    Ok(())
}

/// True if a value counts as "empty" for required-field purposes.
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn validate_text(field: &str, value: Option<&Value>) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(ValidationError::MissingField {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn validate_amount(field: &str, value: Option<&Value>) -> Result<(), ValidationError> {
    let value = match value {
        Some(v) if !is_blank(Some(v)) => v,
        _ => {
            return Err(ValidationError::MissingField {
                field: field.to_string(),
            })
        }
    };
    let parsed = match value {
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    };
    match parsed {
        Some(_) => Ok(()),
        None => Err(ValidationError::InvalidAmount {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

fn validate_timestamp(field: &str, value: Option<&Value>) -> Result<(), ValidationError> {
    let raw = match value {
        Some(Value::String(s)) if !s.trim().is_empty() => s,
        _ => {
            return Err(ValidationError::MissingField {
                field: field.to_string(),
            })
        }
    };
    if OffsetDateTime::parse(raw, &Rfc3339).is_err() {
        return Err(ValidationError::InvalidTimestamp {
            field: field.to_string(),
            value: raw.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    const SPECS: &[FieldSpec] = &[
        FieldSpec {
            name: "payee",
            kind: FieldKind::Text,
        },
        FieldSpec {
            name: "amount",
            kind: FieldKind::Amount,
        },
    ];

    #[test]
    fn accepts_complete_fields() {
        let f = fields(&[("payee", json!("Jane Doe")), ("amount", json!("500"))]);
        assert!(validate_fields(SPECS, &f).is_ok());
    }

    #[test]
    fn missing_field_is_reported_by_name() {
        let f = fields(&[("amount", json!("500"))]);
        let err = validate_fields(SPECS, &f).unwrap_err();
        assert_eq!(err.field(), "payee");
        assert!(matches!(err, ValidationError::MissingField { .. }));
    }

    #[test]
    fn whitespace_only_text_counts_as_missing() {
        let f = fields(&[("payee", json!("   ")), ("amount", json!("500"))]);
        let err = validate_fields(SPECS, &f).unwrap_err();
        assert_eq!(err.field(), "payee");
    }

    #[test]
    fn amount_accepts_string_and_number_forms() {
        for amount in [json!("500"), json!("1234.56"), json!(500), json!(12.5)] {
            let f = fields(&[("payee", json!("Jane")), ("amount", amount)]);
            assert!(validate_fields(SPECS, &f).is_ok());
        }
    }

    #[test]
    fn malformed_amount_is_rejected() {
        let f = fields(&[("payee", json!("Jane")), ("amount", json!("five hundred"))]);
        let err = validate_fields(SPECS, &f).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidAmount { .. }));
    }

    #[test]
    fn timestamp_fields_must_be_rfc3339() {
        let specs = &[FieldSpec {
            name: "due",
            kind: FieldKind::DateTime,
        }];
        let ok = fields(&[("due", json!("2024-01-15T08:00:00Z"))]);
        assert!(validate_fields(specs, &ok).is_ok());

        let bad = fields(&[("due", json!("15/01/2024"))]);
        let err = validate_fields(specs, &bad).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidTimestamp { .. }));
    }
}
