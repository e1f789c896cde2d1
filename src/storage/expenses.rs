//! Expense table schema
//!
//! Expenses are stored in `gastos_fijos.json` and scoped by month (and
//! optionally category) for reconciliation.

use crate::models::{Expense, ExpenseId, ExpenseScope};

use super::table::{Record, TableStore};

/// Store for the expense table
pub type ExpenseStore = TableStore<Expense>;

impl Record for Expense {
    type Id = ExpenseId;
    type Scope = ExpenseScope;

    const ENTITY: &'static str = "Expense";
    const COLUMNS: &'static [&'static str] = &[
        "Id",
        "Mes",
        "Concepto",
        "Cantidad",
        "Pagado",
        "Categoría",
        "Fecha",
    ];
    const ID_COLUMN: &'static str = "Id";

    fn id(&self) -> ExpenseId {
        self.id
    }

    fn in_scope(&self, scope: &ExpenseScope) -> bool {
        scope.contains(self)
    }
}
