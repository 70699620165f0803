//! Budget expenses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::fields::null_as_default;
use crate::error::ValidationError;
use crate::ids::new_id;

/// Fixed set of spending categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum ExpenseCategory {
    Equipment,
    Crew,
    Talent,
    Location,
    Catering,
    Transport,
    PostProduction,
    #[default]
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 8] = [
        ExpenseCategory::Equipment,
        ExpenseCategory::Crew,
        ExpenseCategory::Talent,
        ExpenseCategory::Location,
        ExpenseCategory::Catering,
        ExpenseCategory::Transport,
        ExpenseCategory::PostProduction,
        ExpenseCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Equipment => "equipment",
            ExpenseCategory::Crew => "crew",
            ExpenseCategory::Talent => "talent",
            ExpenseCategory::Location => "location",
            ExpenseCategory::Catering => "catering",
            ExpenseCategory::Transport => "transport",
            ExpenseCategory::PostProduction => "post_production",
            ExpenseCategory::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .unwrap_or_default()
    }
}

impl From<String> for ExpenseCategory {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}

/// One line of the budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    #[serde(default)]
    pub category: ExpenseCategory,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
}

/// User input for a new expense; the id is assigned on creation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub category: ExpenseCategory,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
}

impl Expense {
    pub fn create(input: NewExpense) -> Result<Self, ValidationError> {
        let expense = Self {
            id: new_id(),
            category: input.category,
            description: input.description,
            amount: input.amount,
            date: input.date,
        };
        expense.validate()?;
        Ok(expense)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_amount(self.amount)
    }
}

/// Amounts are finite and non-negative.
pub fn validate_amount(amount: f64) -> Result<(), ValidationError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidAmount(amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(amount: f64) -> NewExpense {
        NewExpense {
            category: ExpenseCategory::Equipment,
            description: "Gimbal rental".to_string(),
            amount,
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        }
    }

    #[test]
    fn rejects_negative_and_nan_amounts() {
        assert!(Expense::create(input(120.5)).is_ok());
        assert!(Expense::create(input(0.0)).is_ok());
        assert_eq!(
            Expense::create(input(-1.0)),
            Err(ValidationError::InvalidAmount(-1.0))
        );
        assert!(Expense::create(input(f64::NAN)).is_err());
    }

    #[test]
    fn category_wire_names() {
        let value = serde_json::to_value(ExpenseCategory::PostProduction).unwrap();
        assert_eq!(value, "post_production");
        let parsed: ExpenseCategory = serde_json::from_str("\"catering\"").unwrap();
        assert_eq!(parsed, ExpenseCategory::Catering);
        let unknown: ExpenseCategory = serde_json::from_str("\"misc\"").unwrap();
        assert_eq!(unknown, ExpenseCategory::Other);
    }
}
