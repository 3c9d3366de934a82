use anyhow::{Context, Result};
use bankscan_core::StatementReport;

/// Transaction rows as CSV, one row per transaction, amounts as plain
/// decimals.
pub fn to_csv(report: &StatementReport) -> Result<String> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record(["date", "description", "amount", "type", "category"])?;
        for tx in &report.transactions {
            writer.write_record([
                tx.date.as_str(),
                tx.description.as_str(),
                &format!("{:.2}", tx.amount.to_decimal()),
                &tx.kind.to_string(),
                tx.category.as_str(),
            ])?;
        }
        writer.flush()?;
    }
    String::from_utf8(buf).context("CSV output was not UTF-8")
}

/// Human-readable summary: totals first, then debit spending by category.
pub fn to_text(report: &StatementReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("Bank:           {}\n", report.bank_identifier));
    out.push_str(&format!(
        "Processed:      {}\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M")
    ));
    out.push_str(&format!(
        "Transactions:   {}\n",
        report.summary.total_transactions
    ));
    out.push_str(&format!("Total debits:   {}\n", report.summary.total_debits));
    out.push_str(&format!("Total credits:  {}\n", report.summary.total_credits));
    out.push_str(&format!("Net change:     {}\n", report.summary.net_change));

    if !report.category_breakdown.is_empty() {
        out.push_str("\nSpending by category\n");
        for (category, total) in &report.category_breakdown {
            out.push_str(&format!("  {category:<28} {total}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use bankscan_core::{Money, Transaction, TransactionKind};

    fn sample_report() -> StatementReport {
        StatementReport::from_transactions(
            vec![
                Transaction {
                    date: "03/15".to_string(),
                    description: "STARBUCKS STORE #123".to_string(),
                    amount: Money::from_cents(475),
                    kind: TransactionKind::Debit,
                    category: "Restaurants & Fast Food".to_string(),
                },
                Transaction {
                    date: "03/16".to_string(),
                    description: "DIRECT DEPOSIT PAYROLL".to_string(),
                    amount: Money::from_cents(150000),
                    kind: TransactionKind::Credit,
                    category: "Other".to_string(),
                },
            ],
            "Chase",
        )
    }

    #[test]
    fn csv_has_header_and_one_row_per_transaction() {
        let csv = to_csv(&sample_report()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "date,description,amount,type,category");
        assert_eq!(
            lines[1],
            "03/15,STARBUCKS STORE #123,4.75,debit,Restaurants & Fast Food"
        );
        assert_eq!(lines[2], "03/16,DIRECT DEPOSIT PAYROLL,1500.00,credit,Other");
    }

    #[test]
    fn csv_quotes_fields_with_commas() {
        let report = StatementReport::from_transactions(
            vec![Transaction {
                date: "03/15".to_string(),
                description: "SMITH, JONES & CO".to_string(),
                amount: Money::from_cents(100),
                kind: TransactionKind::Debit,
                category: "Other".to_string(),
            }],
            "Chase",
        );
        let csv = to_csv(&report).unwrap();
        assert!(csv.contains("\"SMITH, JONES & CO\""));
    }

    #[test]
    fn text_summary_carries_totals_and_breakdown() {
        let text = to_text(&sample_report());
        assert!(text.contains("Bank:           Chase"));
        assert!(text.contains("Transactions:   2"));
        assert!(text.contains("Total debits:   $4.75"));
        assert!(text.contains("Total credits:  $1500.00"));
        assert!(text.contains("Net change:     $1495.25"));
        assert!(text.contains("Restaurants & Fast Food"));
        // Credits stay out of the category section.
        assert!(!text.contains("Other            "));
    }
}
