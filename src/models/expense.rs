//! Fixed expense model
//!
//! An expense belongs to one month label, may reference a category by name
//! and carries a whole-unit amount with a paid flag. Field names on disk are
//! the Spanish column names of the expense table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::wire;

/// A single fixed expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Stable identifier (backfilled for rows written before ids existed)
    #[serde(rename = "Id", default, deserialize_with = "wire::null_as_default")]
    pub id: ExpenseId,

    /// Month label; `None` only for legacy rows
    #[serde(rename = "Mes", default)]
    pub month: Option<String>,

    /// What the expense is for
    #[serde(rename = "Concepto", default, deserialize_with = "wire::null_as_default")]
    pub concept: String,

    /// Amount in whole currency units
    #[serde(rename = "Cantidad", default, deserialize_with = "wire::amount")]
    pub amount: u64,

    #[serde(rename = "Pagado", default, deserialize_with = "wire::null_as_default")]
    pub paid: bool,

    /// Category name, if any
    #[serde(rename = "Categoría", default)]
    pub category: Option<String>,

    #[serde(rename = "Fecha", default, deserialize_with = "wire::optional_date")]
    pub date: Option<NaiveDate>,
}

impl Expense {
    /// Create a new unpaid expense for a month
    pub fn new(month: impl Into<String>, concept: impl Into<String>, amount: u64) -> Self {
        Self {
            id: ExpenseId::new(),
            month: Some(month.into()),
            concept: concept.into(),
            amount,
            paid: false,
            category: None,
            date: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_paid(mut self, paid: bool) -> Self {
        self.paid = paid;
        self
    }

    /// Flip the paid flag
    pub fn toggle_paid(&mut self) {
        self.paid = !self.paid;
    }

    /// Check whether the expense belongs to the given month
    pub fn is_in_month(&self, month: &str) -> bool {
        self.month.as_deref() == Some(month)
    }

    /// Apply an edit in place
    pub fn apply(&mut self, patch: &ExpensePatch) {
        if let Some(concept) = &patch.concept {
            self.concept = concept.trim().to_string();
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(date) = patch.date {
            self.date = Some(date);
        }
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.concept.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyConcept);
        }

        if let Some(month) = &self.month {
            if month.trim().is_empty() {
                return Err(ExpenseValidationError::EmptyMonth);
            }
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.concept, self.amount)
    }
}

/// The slice of the expense table a session works on
///
/// A month, optionally narrowed to one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseScope {
    pub month: String,
    pub category: Option<String>,
}

impl ExpenseScope {
    pub fn month(month: impl Into<String>) -> Self {
        Self {
            month: month.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn contains(&self, expense: &Expense) -> bool {
        expense.is_in_month(&self.month)
            && match &self.category {
                Some(category) => expense.category.as_deref() == Some(category.as_str()),
                None => true,
            }
    }
}

impl fmt::Display for ExpenseScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.category {
            Some(category) => write!(f, "{} / {}", self.month, category),
            None => write!(f, "{}", self.month),
        }
    }
}

/// Replacement values for an edit; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpensePatch {
    pub concept: Option<String>,
    pub amount: Option<u64>,
    pub date: Option<NaiveDate>,
}

impl ExpensePatch {
    pub fn is_empty(&self) -> bool {
        self.concept.is_none() && self.amount.is_none() && self.date.is_none()
    }

    /// Capture the editable fields of an expense as a draft
    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            concept: Some(expense.concept.clone()),
            amount: Some(expense.amount),
            date: expense.date,
        }
    }
}

/// Paid, pending and grand totals of a set of expenses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Balance {
    pub paid: u64,
    pub pending: u64,
    pub total: u64,
}

impl Balance {
    /// Sum a set of expenses
    ///
    /// Totals saturate at `u64::MAX`.
    pub fn of<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> Self {
        expenses.into_iter().fold(Self::default(), |mut acc, e| {
            if e.paid {
                acc.paid = acc.paid.saturating_add(e.amount);
            } else {
                acc.pending = acc.pending.saturating_add(e.amount);
            }
            acc.total = acc.total.saturating_add(e.amount);
            acc
        })
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyConcept,
    EmptyMonth,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyConcept => write!(f, "Expense concept cannot be empty"),
            Self::EmptyMonth => write!(f, "Expense month cannot be empty"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_expense() {
        let expense = Expense::new("Octubre 2024", "Alquiler", 750);
        assert_eq!(expense.month.as_deref(), Some("Octubre 2024"));
        assert!(!expense.paid);
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_empty_concept_invalid() {
        let expense = Expense::new("Octubre 2024", "   ", 10);
        assert_eq!(expense.validate(), Err(ExpenseValidationError::EmptyConcept));
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut expense = Expense::new("Octubre 2024", "Luz", 60).with_paid(true);
        expense.toggle_paid();
        assert!(!expense.paid);
        expense.toggle_paid();
        assert!(expense.paid);
    }

    #[test]
    fn test_apply_patch() {
        let mut expense = Expense::new("Octubre 2024", "Gym", 30);
        let date = NaiveDate::from_ymd_opt(2024, 10, 3).unwrap();
        expense.apply(&ExpensePatch {
            concept: Some(" Gimnasio ".into()),
            amount: None,
            date: Some(date),
        });
        assert_eq!(expense.concept, "Gimnasio");
        assert_eq!(expense.amount, 30);
        assert_eq!(expense.date, Some(date));
    }

    #[test]
    fn test_serializes_spanish_columns() {
        let expense = Expense::new("Octubre 2024", "Agua", 25)
            .with_category("Casa")
            .with_date(NaiveDate::from_ymd_opt(2024, 10, 1).unwrap());
        let value = serde_json::to_value(&expense).unwrap();

        assert_eq!(value["Mes"], "Octubre 2024");
        assert_eq!(value["Concepto"], "Agua");
        assert_eq!(value["Cantidad"], 25);
        assert_eq!(value["Pagado"], false);
        assert_eq!(value["Categoría"], "Casa");
        assert_eq!(value["Fecha"], "2024-10-01");
    }

    #[test]
    fn test_legacy_row_deserializes() {
        let expense: Expense = serde_json::from_value(json!({
            "Concepto": "Internet",
            "Cantidad": 35.0,
            "Pagado": true
        }))
        .unwrap();

        assert_eq!(expense.month, None);
        assert_eq!(expense.amount, 35);
        assert!(expense.paid);
        assert_eq!(expense.category, None);
    }

    #[test]
    fn test_scope_contains() {
        let casa = Expense::new("Octubre 2024", "Alquiler", 700).with_category("Casa");
        let gym = Expense::new("Octubre 2024", "Gym", 30).with_category("Deporte");
        let other = Expense::new("Noviembre 2024", "Alquiler", 700).with_category("Casa");

        let month = ExpenseScope::month("Octubre 2024");
        assert!(month.contains(&casa) && month.contains(&gym) && !month.contains(&other));

        let narrowed = month.with_category("Casa");
        assert!(narrowed.contains(&casa));
        assert!(!narrowed.contains(&gym));
    }

    #[test]
    fn test_balance() {
        let expenses = vec![
            Expense::new("Octubre 2024", "Alquiler", 700).with_paid(true),
            Expense::new("Octubre 2024", "Luz", 60),
            Expense::new("Octubre 2024", "Agua", 25),
        ];
        let balance = Balance::of(&expenses);
        assert_eq!(balance.paid, 700);
        assert_eq!(balance.pending, 85);
        assert_eq!(balance.total, 785);
    }

    #[test]
    fn test_balance_saturates() {
        let expenses = vec![
            Expense::new("Octubre 2024", "Hipoteca", u64::MAX),
            Expense::new("Octubre 2024", "Luz", 1),
            Expense::new("Octubre 2024", "Agua", 5).with_paid(true),
        ];
        let balance = Balance::of(&expenses);
        assert_eq!(balance.pending, u64::MAX);
        assert_eq!(balance.paid, 5);
        assert_eq!(balance.total, u64::MAX);
    }
}
