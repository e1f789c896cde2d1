//! Expense display formatting

use crate::models::{Balance, Expense};
use crate::services::MonthSheet;

use super::fit;

/// Format a whole-unit amount with the currency symbol
pub fn format_amount(amount: u64, currency_symbol: &str) -> String {
    format!("{} {}", amount, currency_symbol)
}

/// Format one expense as a table row
pub fn format_expense_row(position: usize, expense: &Expense, currency_symbol: &str) -> String {
    let paid = if expense.paid { "✓" } else { " " };
    let date = expense
        .date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();

    format!(
        "{:>3}  [{}] {} {:>10}  {} {:10}  {}",
        position,
        paid,
        fit(&expense.concept, 24),
        format_amount(expense.amount, currency_symbol),
        fit(expense.category.as_deref().unwrap_or(""), 20),
        date,
        expense.id
    )
}

/// Format a month sheet with its totals
pub fn format_expense_sheet(sheet: &MonthSheet, currency_symbol: &str) -> String {
    let mut output = format!("Expenses: {}\n\n", sheet.scope());

    if sheet.is_empty() {
        output.push_str("No expenses found.\n");
        return output;
    }

    output.push_str(&format!(
        "{:>3}  {:3} {:24} {:>10}  {:20} {:10}  {}\n",
        "#", "Pag", "Concepto", "Cantidad", "Categoría", "Fecha", "ID"
    ));
    output.push_str(&"-".repeat(92));
    output.push('\n');

    for (position, expense) in sheet.rows().iter().enumerate() {
        output.push_str(&format_expense_row(position, expense, currency_symbol));
        output.push('\n');
    }

    output.push('\n');
    output.push_str(&format_balance(&sheet.balance(), currency_symbol));
    output
}

/// Format paid, pending and total amounts
pub fn format_balance(balance: &Balance, currency_symbol: &str) -> String {
    format!(
        "Pagado:    {:>10}\nPendiente: {:>10}\nTotal:     {:>10}\n",
        format_amount(balance.paid, currency_symbol),
        format_amount(balance.pending, currency_symbol),
        format_amount(balance.total, currency_symbol)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseScope;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(750, "€"), "750 €");
    }

    #[test]
    fn test_format_sheet() {
        let sheet = MonthSheet::new(
            ExpenseScope::month("Octubre 2024"),
            vec![
                Expense::new("Octubre 2024", "Alquiler", 700).with_paid(true),
                Expense::new("Octubre 2024", "Luz", 60).with_category("Casa"),
            ],
        );

        let output = format_expense_sheet(&sheet, "€");
        assert!(output.starts_with("Expenses: Octubre 2024"));
        assert!(output.contains("  0  [✓] Alquiler"));
        assert!(output.contains("  1  [ ] Luz"));
        assert!(output.contains("Pendiente:       60 €"));
        assert!(output.contains("Total:          760 €"));
    }

    #[test]
    fn test_format_empty_sheet() {
        let sheet = MonthSheet::new(ExpenseScope::month("Octubre 2024"), Vec::new());
        assert!(format_expense_sheet(&sheet, "€").contains("No expenses found."));
    }
}
