//! Conversion of raw form input into typed record fields.
//!
//! Coercion never fails. Empty, unparsable or negative numbers become `0`, unknown
//! select values fall back to the enum default. `Credit_History` is the one
//! numeric field where an empty value means "unknown" rather than zero.

use super::fields::{Field, SelectOption};
use super::record::FeatureRecord;

/// Return a copy of `record` with `field` replaced by the coerced `raw` value.
pub fn coerce_field(record: &FeatureRecord, field: Field, raw: &str) -> FeatureRecord {
    let previous = record.clone();
    match field {
        Field::LoanId => FeatureRecord {
            loan_id: raw.to_string(),
            ..previous
        },
        Field::Gender => FeatureRecord {
            gender: select_or_default(raw),
            ..previous
        },
        Field::Married => FeatureRecord {
            married: select_or_default(raw),
            ..previous
        },
        Field::Dependents => FeatureRecord {
            dependents: optional_select(raw),
            ..previous
        },
        Field::Education => FeatureRecord {
            education: select_or_default(raw),
            ..previous
        },
        Field::SelfEmployed => FeatureRecord {
            self_employed: select_or_default(raw),
            ..previous
        },
        Field::ApplicantIncome => FeatureRecord {
            applicant_income: coerce_number(raw),
            ..previous
        },
        Field::CoapplicantIncome => FeatureRecord {
            coapplicant_income: coerce_number(raw),
            ..previous
        },
        Field::LoanAmount => FeatureRecord {
            loan_amount: coerce_number(raw),
            ..previous
        },
        Field::LoanAmountTerm => FeatureRecord {
            loan_amount_term: coerce_number(raw),
            ..previous
        },
        Field::CreditHistory => FeatureRecord {
            credit_history: coerce_credit_history(raw),
            ..previous
        },
        Field::PropertyArea => FeatureRecord {
            property_area: select_or_default(raw),
            ..previous
        },
    }
}

/// Parse a numeric input, degrading empty, unparsable, non-finite and
/// negative input to `0`.
pub fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}

/// Empty selects "unknown"; anything other than an exact `1` is treated as `0`.
pub fn coerce_credit_history(raw: &str) -> Option<f64> {
    if raw.trim().is_empty() {
        return None;
    }
    if coerce_number(raw) == 1.0 {
        Some(1.0)
    } else {
        Some(0.0)
    }
}

fn select_or_default<T: SelectOption>(raw: &str) -> T {
    T::from_wire(raw.trim()).unwrap_or_default()
}

fn optional_select<T: SelectOption>(raw: &str) -> Option<T> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(select_or_default(raw))
    }
}
