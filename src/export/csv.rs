//! CSV export of expenses

use std::io::Write;

use crate::error::TrackerResult;
use crate::models::Expense;

const HEADER: [&str; 7] = ["Id", "Mes", "Concepto", "Cantidad", "Pagado", "Categoría", "Fecha"];

/// Write expenses as CSV with the same column names as the data file
pub fn export_expenses_csv<W: Write>(expenses: &[Expense], writer: W) -> TrackerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;

    for expense in expenses {
        csv_writer.write_record([
            expense.id.as_uuid().to_string(),
            expense.month.clone().unwrap_or_default(),
            expense.concept.clone(),
            expense.amount.to_string(),
            expense.paid.to_string(),
            expense.category.clone().unwrap_or_default(),
            expense
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_export_expenses_csv() {
        let expenses = vec![
            Expense::new("Octubre 2024", "Alquiler, piso", 700)
                .with_category("Casa")
                .with_date(NaiveDate::from_ymd_opt(2024, 10, 1).unwrap())
                .with_paid(true),
            Expense::new("Octubre 2024", "Luz", 60),
        ];

        let mut output = Vec::new();
        export_expenses_csv(&expenses, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "Id,Mes,Concepto,Cantidad,Pagado,Categoría,Fecha");
        assert!(lines[1].ends_with(",Octubre 2024,\"Alquiler, piso\",700,true,Casa,2024-10-01"));
        assert!(lines[2].ends_with(",Octubre 2024,Luz,60,false,,"));
    }

    #[test]
    fn test_export_empty() {
        let mut output = Vec::new();
        export_expenses_csv(&[], &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap().lines().count(), 1);
    }
}
