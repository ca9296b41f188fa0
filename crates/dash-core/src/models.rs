use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Calendar-month bucket derived from an admission date.
///
/// Orders chronologically (year first, then month) and displays as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Bucket containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// One row of the healthcare dataset.
///
/// Fields that failed to parse at load time are `None`; the row itself is
/// always kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub gender: String,
    pub age: Option<u32>,
    pub medical_condition: String,
    pub insurance_provider: String,
    pub billing_amount: Option<f64>,
    pub admission_date: Option<NaiveDate>,
    /// Derived from `admission_date`; `None` exactly when the date is missing.
    pub year_month: Option<YearMonth>,
}

impl Record {
    /// Value of a categorical column.
    pub fn category(&self, field: CategoricalField) -> &str {
        match field {
            CategoricalField::Gender => &self.gender,
            CategoricalField::MedicalCondition => &self.medical_condition,
            CategoricalField::InsuranceProvider => &self.insurance_provider,
        }
    }
}

/// Categorical columns that selectors and group-bys operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalField {
    Gender,
    MedicalCondition,
    InsuranceProvider,
}

impl CategoricalField {
    /// Column header used in the source file and in chart axis labels.
    pub fn column_name(self) -> &'static str {
        match self {
            CategoricalField::Gender => "Gender",
            CategoricalField::MedicalCondition => "Medical Condition",
            CategoricalField::InsuranceProvider => "Insurance Provider",
        }
    }
}
