//! Applicant feature record, field identifiers and input coercion.

mod coercion;
mod fields;
mod record;

pub use coercion::{coerce_credit_history, coerce_field, coerce_number};
pub use fields::{CREDIT_HISTORY_CHOICES, Field, SelectOption, UnknownField};
pub use record::{Dependents, Education, FeatureRecord, Gender, PropertyArea, YesNo};
