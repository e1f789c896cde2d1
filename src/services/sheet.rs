//! In-session view of one month's expenses
//!
//! A `MonthSheet` holds the rows of an [`ExpenseScope`] between load and
//! save. Rows are addressed by [`ExpenseId`]; positions are only a display
//! concern and are resolved to ids on the way in.

use std::collections::HashMap;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Balance, Expense, ExpenseId, ExpensePatch, ExpenseScope};

/// The rows of one scope plus any in-progress edits
#[derive(Debug, Clone)]
pub struct MonthSheet {
    scope: ExpenseScope,
    rows: Vec<Expense>,
    drafts: HashMap<ExpenseId, ExpensePatch>,
}

impl MonthSheet {
    pub fn new(scope: ExpenseScope, rows: Vec<Expense>) -> Self {
        Self {
            scope,
            rows,
            drafts: HashMap::new(),
        }
    }

    pub fn scope(&self) -> &ExpenseScope {
        &self.scope
    }

    pub fn rows(&self) -> &[Expense] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Id of the row displayed at `position`
    pub fn id_at(&self, position: usize) -> Option<ExpenseId> {
        self.rows.get(position).map(|e| e.id)
    }

    pub fn position_of(&self, id: ExpenseId) -> Option<usize> {
        self.rows.iter().position(|e| e.id == id)
    }

    pub fn get(&self, id: ExpenseId) -> Option<&Expense> {
        self.rows.iter().find(|e| e.id == id)
    }

    /// Resolve a user reference: a 0-based position or an id
    pub fn resolve(&self, reference: &str) -> TrackerResult<ExpenseId> {
        let reference = reference.trim();

        if let Ok(position) = reference.parse::<usize>() {
            if let Some(id) = self.id_at(position) {
                return Ok(id);
            }
        }

        self.rows
            .iter()
            .find(|e| e.id.matches(reference))
            .map(|e| e.id)
            .ok_or_else(|| TrackerError::expense_not_found(reference))
    }

    /// Append a row
    pub fn push(&mut self, expense: Expense) -> TrackerResult<&Expense> {
        expense
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;
        self.rows.push(expense);
        Ok(&self.rows[self.rows.len() - 1])
    }

    /// Flip the paid flag of a row
    pub fn toggle_paid(&mut self, id: ExpenseId) -> TrackerResult<&Expense> {
        let expense = self.row_mut(id)?;
        expense.toggle_paid();
        Ok(&*expense)
    }

    /// Replace concept, amount or date of a row
    ///
    /// The row is left untouched when the result would be invalid.
    pub fn edit(&mut self, id: ExpenseId, patch: &ExpensePatch) -> TrackerResult<&Expense> {
        let expense = self.row_mut(id)?;

        let mut edited = expense.clone();
        edited.apply(patch);
        edited
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        *expense = edited;
        Ok(&*expense)
    }

    /// Remove a row; later rows shift down one position
    pub fn remove(&mut self, id: ExpenseId) -> TrackerResult<Expense> {
        let position = self
            .position_of(id)
            .ok_or_else(|| TrackerError::expense_not_found(id.to_string()))?;
        self.drafts.remove(&id);
        Ok(self.rows.remove(position))
    }

    pub fn balance(&self) -> Balance {
        Balance::of(&self.rows)
    }

    /// Start editing a row, seeding the draft with its current values
    ///
    /// Calling this on a row already being edited returns the existing draft.
    pub fn begin_edit(&mut self, id: ExpenseId) -> TrackerResult<&mut ExpensePatch> {
        let seed = self
            .get(id)
            .map(ExpensePatch::from_expense)
            .ok_or_else(|| TrackerError::expense_not_found(id.to_string()))?;
        Ok(self.drafts.entry(id).or_insert(seed))
    }

    pub fn is_editing(&self, id: ExpenseId) -> bool {
        self.drafts.contains_key(&id)
    }

    pub fn edit_draft_mut(&mut self, id: ExpenseId) -> Option<&mut ExpensePatch> {
        self.drafts.get_mut(&id)
    }

    /// Apply a row's draft and leave edit mode
    ///
    /// An invalid draft stays in place so it can be corrected.
    pub fn commit_edit(&mut self, id: ExpenseId) -> TrackerResult<&Expense> {
        let draft = self
            .drafts
            .get(&id)
            .cloned()
            .ok_or_else(|| {
                TrackerError::Validation(format!("Expense {} is not being edited", id))
            })?;

        self.edit(id, &draft)?;
        self.drafts.remove(&id);
        self.row(id)
    }

    /// Drop a row's draft; returns whether there was one
    pub fn cancel_edit(&mut self, id: ExpenseId) -> bool {
        self.drafts.remove(&id).is_some()
    }

    pub fn into_rows(self) -> Vec<Expense> {
        self.rows
    }

    /// The row with `id`, or a not-found error
    pub fn row(&self, id: ExpenseId) -> TrackerResult<&Expense> {
        self.get(id)
            .ok_or_else(|| TrackerError::expense_not_found(id.to_string()))
    }

    fn row_mut(&mut self, id: ExpenseId) -> TrackerResult<&mut Expense> {
        self.rows
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| TrackerError::expense_not_found(id.to_string()))
    }
}
