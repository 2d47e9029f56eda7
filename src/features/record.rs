//! Typed applicant record sent to the prediction service.
//!
//! Field names on the wire match the service schema exactly (`Loan_ID`,
//! `ApplicantIncome`, ...). Optional fields serialize as `null` when absent so
//! the service sees every key on every request.

use serde::{Deserialize, Serialize};

/// Applicant gender.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

/// Binary answer used by `Married` and `Self_Employed`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    #[default]
    No,
}

/// Number of dependents. `3+` is a literal bucket, not a number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dependents {
    #[default]
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3+")]
    ThreeOrMore,
}

/// Highest education level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Education {
    #[default]
    Graduate,
    #[serde(rename = "Not Graduate")]
    NotGraduate,
}

/// Location class of the mortgaged property.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyArea {
    #[default]
    Urban,
    Semiurban,
    Rural,
}

/// The request payload for one prediction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Opaque application identifier; never validated.
    #[serde(rename = "Loan_ID")]
    pub loan_id: String,
    #[serde(rename = "Gender")]
    pub gender: Gender,
    #[serde(rename = "Married")]
    pub married: YesNo,
    #[serde(rename = "Dependents")]
    pub dependents: Option<Dependents>,
    #[serde(rename = "Education")]
    pub education: Education,
    #[serde(rename = "Self_Employed")]
    pub self_employed: YesNo,
    #[serde(rename = "ApplicantIncome")]
    pub applicant_income: f64,
    #[serde(rename = "CoapplicantIncome")]
    pub coapplicant_income: f64,
    /// Requested amount, in thousands.
    #[serde(rename = "LoanAmount")]
    pub loan_amount: f64,
    /// Repayment term, in months.
    #[serde(rename = "Loan_Amount_Term")]
    pub loan_amount_term: f64,
    /// `Some(1.0)` meets guidelines, `Some(0.0)` does not, `None` is unknown.
    #[serde(rename = "Credit_History")]
    pub credit_history: Option<f64>,
    #[serde(rename = "Property_Area")]
    pub property_area: PropertyArea,
}

impl Default for FeatureRecord {
    fn default() -> Self {
        Self {
            loan_id: "LP001002".to_string(),
            gender: Gender::Male,
            married: YesNo::No,
            dependents: Some(Dependents::Zero),
            education: Education::Graduate,
            self_employed: YesNo::No,
            applicant_income: 5849.0,
            coapplicant_income: 0.0,
            loan_amount: 128.0,
            loan_amount_term: 360.0,
            credit_history: Some(1.0),
            property_area: PropertyArea::Urban,
        }
    }
}
