//! Expense service
//!
//! Loads a month's expenses into a [`MonthSheet`], applies mutations and
//! reconciles the sheet back into the full table on save.

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::audit::EntityType;
use crate::config::settings::Settings;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Balance, Expense, ExpensePatch, ExpenseScope};
use crate::storage::Storage;

use super::sheet::MonthSheet;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

/// Input for creating a new expense
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    pub month: String,
    pub concept: String,
    pub amount: u64,
    pub category: Option<String>,
    /// Defaults to today
    pub date: Option<NaiveDate>,
    pub paid: bool,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Build a scope from user input
    ///
    /// The month must be one of the configured months and the category, if
    /// given, one of the stored categories.
    pub fn scope(&self, month: &str, category: Option<&str>) -> TrackerResult<ExpenseScope> {
        let scope = ExpenseScope::month(self.settings.resolve_month(month)?);
        match category {
            Some(category) => Ok(scope.with_category(self.resolve_category(category)?)),
            None => Ok(scope),
        }
    }

    /// Load the rows of a scope into a sheet
    pub fn open(&self, scope: ExpenseScope) -> MonthSheet {
        let rows = self.storage.expenses.load_scope(&scope);
        debug!("Opened {} with {} expenses", scope, rows.len());
        MonthSheet::new(scope, rows)
    }

    /// Reconcile a sheet into the on-disk table
    pub fn save(&self, sheet: &MonthSheet) -> TrackerResult<()> {
        self.storage
            .expenses
            .save_scope(sheet.scope(), sheet.rows())?;
        Ok(())
    }

    /// List the expenses of a scope
    pub fn list(&self, scope: ExpenseScope) -> MonthSheet {
        self.open(scope)
    }

    /// Totals of a scope
    pub fn balance(&self, scope: ExpenseScope) -> Balance {
        self.open(scope).balance()
    }

    /// Add a new expense
    pub fn add(&self, input: CreateExpenseInput) -> TrackerResult<Expense> {
        let month = self.settings.resolve_month(&input.month)?;
        let category = input
            .category
            .as_deref()
            .map(|c| self.resolve_category(c))
            .transpose()?;

        let mut expense = Expense::new(month.clone(), input.concept.trim(), input.amount)
            .with_date(input.date.unwrap_or_else(|| Local::now().date_naive()))
            .with_paid(input.paid);
        if let Some(category) = category {
            expense = expense.with_category(category);
        }

        let mut sheet = self.open(ExpenseScope::month(month));
        let created = sheet.push(expense)?.clone();
        self.save(&sheet)?;

        self.storage.log_create(
            EntityType::Expense,
            created.id.to_string(),
            Some(created.concept.clone()),
            &created,
        )?;

        Ok(created)
    }

    /// Flip the paid flag of the expense `reference` names within `scope`
    pub fn toggle_paid(&self, scope: ExpenseScope, reference: &str) -> TrackerResult<Expense> {
        let mut sheet = self.open(scope);
        let id = sheet.resolve(reference)?;
        let before = sheet.row(id)?.clone();

        let after = sheet.toggle_paid(id)?.clone();
        self.save(&sheet)?;

        self.storage.log_update(
            EntityType::Expense,
            id.to_string(),
            Some(after.concept.clone()),
            &before,
            &after,
        )?;

        Ok(after)
    }

    /// Replace concept, amount or date of an expense
    pub fn edit(
        &self,
        scope: ExpenseScope,
        reference: &str,
        patch: &ExpensePatch,
    ) -> TrackerResult<Expense> {
        if patch.is_empty() {
            return Err(TrackerError::Validation(
                "No changes specified. Use --concept, --amount or --date.".into(),
            ));
        }

        let mut sheet = self.open(scope);
        let id = sheet.resolve(reference)?;
        let before = sheet.row(id)?.clone();

        let after = sheet.edit(id, patch)?.clone();
        self.save(&sheet)?;

        self.storage.log_update(
            EntityType::Expense,
            id.to_string(),
            Some(after.concept.clone()),
            &before,
            &after,
        )?;

        Ok(after)
    }

    /// Delete one expense
    pub fn delete(&self, scope: ExpenseScope, reference: &str) -> TrackerResult<Expense> {
        let mut sheet = self.open(scope);
        let id = sheet.resolve(reference)?;

        let removed = sheet.remove(id)?;
        self.save(&sheet)?;

        self.storage.log_delete(
            EntityType::Expense,
            id.to_string(),
            Some(removed.concept.clone()),
            &removed,
        )?;

        Ok(removed)
    }

    fn resolve_category(&self, name: &str) -> TrackerResult<String> {
        let categories = self.storage.categories.load();
        categories.find(name).map(str::to_string).ok_or_else(|| {
            TrackerError::Validation(format!(
                "Unknown category '{}'. Expected one of: {}",
                name.trim(),
                categories.names().join(", ")
            ))
        })
    }
}
