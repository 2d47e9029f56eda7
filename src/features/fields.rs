//! Field identifiers and select option lists for the applicant form.

use std::fmt;
use std::str::FromStr;

use super::record::{Dependents, Education, Gender, PropertyArea, YesNo};

/// One editable field of the [`FeatureRecord`](super::FeatureRecord).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    LoanId,
    Gender,
    Married,
    Dependents,
    Education,
    SelfEmployed,
    ApplicantIncome,
    CoapplicantIncome,
    LoanAmount,
    LoanAmountTerm,
    CreditHistory,
    PropertyArea,
}

impl Field {
    /// Every field in form order.
    pub const ALL: [Field; 12] = [
        Field::LoanId,
        Field::Gender,
        Field::Married,
        Field::Dependents,
        Field::Education,
        Field::SelfEmployed,
        Field::ApplicantIncome,
        Field::CoapplicantIncome,
        Field::LoanAmount,
        Field::LoanAmountTerm,
        Field::CreditHistory,
        Field::PropertyArea,
    ];

    /// Key used for this field in the JSON payload.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::LoanId => "Loan_ID",
            Self::Gender => "Gender",
            Self::Married => "Married",
            Self::Dependents => "Dependents",
            Self::Education => "Education",
            Self::SelfEmployed => "Self_Employed",
            Self::ApplicantIncome => "ApplicantIncome",
            Self::CoapplicantIncome => "CoapplicantIncome",
            Self::LoanAmount => "LoanAmount",
            Self::LoanAmountTerm => "Loan_Amount_Term",
            Self::CreditHistory => "Credit_History",
            Self::PropertyArea => "Property_Area",
        }
    }

    /// True for fields that go through numeric coercion.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::ApplicantIncome
                | Self::CoapplicantIncome
                | Self::LoanAmount
                | Self::LoanAmountTerm
                | Self::CreditHistory
        )
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Returned when a field name does not match any wire name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unknown field `{0}`")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let name = name.trim();
        Field::ALL
            .into_iter()
            .find(|field| field.wire_name() == name)
            .ok_or_else(|| UnknownField(name.to_string()))
    }
}

/// A closed set of values offered by a select control.
pub trait SelectOption: Copy + Default + PartialEq + 'static {
    /// Every selectable value in display order.
    const ALL: &'static [Self];

    /// Literal sent to the service and used as the select value.
    fn wire_value(self) -> &'static str;

    /// Text shown to the user.
    fn label(self) -> &'static str {
        self.wire_value()
    }

    /// Look up a value by its wire literal.
    fn from_wire(raw: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|option| option.wire_value() == raw)
    }
}

impl SelectOption for Gender {
    const ALL: &'static [Self] = &[Gender::Male, Gender::Female];

    fn wire_value(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

impl SelectOption for YesNo {
    const ALL: &'static [Self] = &[YesNo::Yes, YesNo::No];

    fn wire_value(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

impl SelectOption for Dependents {
    const ALL: &'static [Self] = &[
        Dependents::Zero,
        Dependents::One,
        Dependents::Two,
        Dependents::ThreeOrMore,
    ];

    fn wire_value(self) -> &'static str {
        match self {
            Self::Zero => "0",
            Self::One => "1",
            Self::Two => "2",
            Self::ThreeOrMore => "3+",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::ThreeOrMore => "3 or more",
            other => other.wire_value(),
        }
    }
}

impl SelectOption for Education {
    const ALL: &'static [Self] = &[Education::Graduate, Education::NotGraduate];

    fn wire_value(self) -> &'static str {
        match self {
            Self::Graduate => "Graduate",
            Self::NotGraduate => "Not Graduate",
        }
    }
}

impl SelectOption for PropertyArea {
    const ALL: &'static [Self] = &[
        PropertyArea::Urban,
        PropertyArea::Semiurban,
        PropertyArea::Rural,
    ];

    fn wire_value(self) -> &'static str {
        match self {
            Self::Urban => "Urban",
            Self::Semiurban => "Semiurban",
            Self::Rural => "Rural",
        }
    }
}

/// Tri-state credit history select: `(select value, label)`.
pub const CREDIT_HISTORY_CHOICES: [(&str, &str); 3] = [
    ("", "Unknown"),
    ("1", "Meets guidelines"),
    ("0", "Does not meet guidelines"),
];
