use thiserror::Error;

use bankscan_core::{CategoryTaxonomy, StatementReport, Transaction};

use crate::classify;
use crate::extractor;
use crate::filter;
use crate::format::CompiledFormat;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// Text extraction produced nothing usable; the document cannot be
    /// processed at all.
    #[error("no readable text in '{source_id}'")]
    InputUnreadable { source_id: String },
    /// No layout is registered for the identified bank; surfaced before any
    /// extraction is attempted.
    #[error("no statement format registered for bank '{bank}'")]
    UnknownFormat { bank: String },
}

/// Run one document's text through extraction, filtering, classification,
/// categorization, and aggregation.
///
/// Zero matched rows is a degenerate success, not an error: the report comes
/// back empty (`StatementReport::is_empty`) with a warning logged, which is a
/// different outcome than unreadable input. A row whose amount token fails to
/// parse is dropped alone; the rest of the document still goes through.
pub fn process_statement(
    source_id: &str,
    text: &str,
    format: &CompiledFormat,
    taxonomy: &CategoryTaxonomy,
) -> Result<StatementReport, ExtractError> {
    if text.trim().is_empty() {
        return Err(ExtractError::InputUnreadable {
            source_id: source_id.to_string(),
        });
    }

    let candidates = extractor::extract_candidates(text, format);
    let kept = filter::drop_noise(format.rules(), candidates);

    let mut transactions = Vec::with_capacity(kept.len());
    for candidate in kept {
        match classify::classify(format.rules(), &candidate) {
            Ok((amount, kind)) => {
                let category = taxonomy.categorize(&candidate.description).to_string();
                transactions.push(Transaction {
                    date: candidate.date,
                    description: candidate.description,
                    amount,
                    kind,
                    category,
                });
            }
            Err(err) => {
                tracing::warn!(
                    source = source_id,
                    line = candidate.line,
                    %err,
                    "dropping unparseable row"
                );
            }
        }
    }

    if transactions.is_empty() {
        tracing::warn!(
            source = source_id,
            bank = format.bank(),
            "no transactions found in statement text"
        );
    }

    Ok(StatementReport::from_transactions(transactions, format.bank()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{chase, td_bank, wells_fargo};
    use bankscan_core::{Money, TransactionKind};

    fn taxonomy() -> CategoryTaxonomy {
        CategoryTaxonomy::builtin()
    }

    #[test]
    fn single_amount_row_becomes_a_debit() {
        let format = chase().compile().unwrap();
        let report =
            process_statement("test", "03/15 STARBUCKS STORE #123 4.75\n", &format, &taxonomy())
                .unwrap();
        assert_eq!(report.transactions.len(), 1);
        let tx = &report.transactions[0];
        assert_eq!(tx.date, "03/15");
        assert_eq!(tx.description, "STARBUCKS STORE #123");
        assert_eq!(tx.amount, Money::from_cents(475));
        assert_eq!(tx.kind, TransactionKind::Debit);
        assert_eq!(tx.category, "Restaurants & Fast Food");
        assert_eq!(report.bank_identifier, "Chase");
    }

    #[test]
    fn credit_keyword_row_becomes_a_credit() {
        let format = chase().compile().unwrap();
        let report = process_statement(
            "test",
            "03/16 DIRECT DEPOSIT PAYROLL 1500.00\n",
            &format,
            &taxonomy(),
        )
        .unwrap();
        let tx = &report.transactions[0];
        assert_eq!(tx.kind, TransactionKind::Credit);
        assert_eq!(tx.amount, Money::from_cents(150000));
        assert_eq!(report.summary.total_credits, Money::from_cents(150000));
        assert_eq!(report.summary.total_debits, Money::zero());
    }

    #[test]
    fn signed_amount_row_becomes_a_credit() {
        let format = td_bank().compile().unwrap();
        let report = process_statement(
            "test",
            "03/16/2024 VENDOR ADJUSTMENT -$45.00\n",
            &format,
            &taxonomy(),
        )
        .unwrap();
        let tx = &report.transactions[0];
        assert_eq!(tx.amount, Money::from_cents(4500));
        assert_eq!(tx.kind, TransactionKind::Credit);
    }

    #[test]
    fn noise_rows_never_surface() {
        let format = chase().compile().unwrap();
        let text = "03/01 BEGINNING BALANCE 1,000.00\n\
                    03/15 STARBUCKS STORE #123 4.75\n\
                    03/20 Payment Thank You - Web 200.00\n\
                    03/31 ENDING BALANCE 795.25\n";
        let report = process_statement("test", text, &format, &taxonomy()).unwrap();
        assert_eq!(report.transactions.len(), 1);
        assert_eq!(report.transactions[0].description, "STARBUCKS STORE #123");
    }

    #[test]
    fn empty_input_is_unreadable() {
        let format = chase().compile().unwrap();
        for text in ["", "   \n\t  \n"] {
            let err = process_statement("stmt.txt", text, &format, &taxonomy()).unwrap_err();
            match err {
                ExtractError::InputUnreadable { source_id } => assert_eq!(source_id, "stmt.txt"),
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn zero_matches_is_an_empty_report_not_an_error() {
        let format = chase().compile().unwrap();
        let report = process_statement(
            "test",
            "Thank you for banking with us.\nNo activity this period.\n",
            &format,
            &taxonomy(),
        )
        .unwrap();
        assert!(report.is_empty());
        assert_eq!(report.summary.total_transactions, 0);
        assert_eq!(report.summary.net_change, Money::zero());
    }

    #[test]
    fn spending_only_layout_drops_inflows() {
        let format = wells_fargo().compile().unwrap();
        let text = "3/15 ZELLE FROM JOHN DOE 500.00 1,500.00\n\
                    3/16 ACME CORP PAYROLL 240316 2,000.00 3,500.00\n\
                    3/17 SHOPRITE OF HOBOKEN 120.00 3,380.00\n";
        let report = process_statement("test", text, &format, &taxonomy()).unwrap();
        assert_eq!(report.transactions.len(), 1);
        assert_eq!(report.transactions[0].description, "SHOPRITE OF HOBOKEN");
        assert_eq!(report.transactions[0].amount, Money::from_cents(12000));
    }

    #[test]
    fn malformed_amount_drops_only_that_row() {
        // A token can satisfy the line pattern yet still fail decimal
        // parsing, e.g. by overflowing the 96-bit mantissa.
        let format = wells_fargo().compile().unwrap();
        let text = "3/15 GOOD MERCHANT 4.75\n\
                    3/16 BAD TOKEN MERCHANT 99999999999999999999999999999999.00\n\
                    3/17 ANOTHER MERCHANT 10.00\n";
        let report = process_statement("test", text, &format, &taxonomy()).unwrap();
        assert_eq!(report.transactions.len(), 2);
        assert_eq!(report.summary.total_debits, Money::from_cents(1475));
    }

    #[test]
    fn pipeline_is_deterministic() {
        let format = chase().compile().unwrap();
        let text = "03/15 STARBUCKS STORE #123 4.75\n\
                    03/16 DIRECT DEPOSIT PAYROLL 1500.00\n\
                    03/17 SHOPRITE OF HOBOKEN 120.00\n\
                    03/18 NETFLIX.COM 15.49\n";
        let tax = taxonomy();
        let a = process_statement("test", text, &format, &tax).unwrap();
        let b = process_statement("test", text, &format, &tax).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
    }

    #[test]
    fn report_json_matches_output_contract() {
        let format = chase().compile().unwrap();
        let report =
            process_statement("test", "03/15 STARBUCKS STORE #123 4.75\n", &format, &taxonomy())
                .unwrap();
        let v: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(v["transactions"][0]["type"], "debit");
        assert_eq!(v["transactions"][0]["amount"], serde_json::json!(4.75));
        assert_eq!(v["summary"]["totalTransactions"], 1);
        assert_eq!(
            v["categoryBreakdown"]["Restaurants & Fast Food"],
            serde_json::json!(4.75)
        );
        assert_eq!(v["bankIdentifier"], "Chase");
    }

    #[test]
    fn breakdown_matches_totals_on_a_mixed_statement() {
        let format = td_bank().compile().unwrap();
        let text = "03/01/2024 BEGINNING BALANCE $1,000.00\n\
                    03/02/2024 SHOPRITE OF HOBOKEN $120.00\n\
                    03/05/2024 STARBUCKS STORE #123 $4.75\n\
                    03/07/2024 DIRECT DEPOSIT ACME $2,000.00\n\
                    03/09/2024 VENDOR ADJUSTMENT -$45.00\n\
                    03/31/2024 ENDING BALANCE $2,920.25\n";
        let report = process_statement("test", text, &format, &taxonomy()).unwrap();
        assert_eq!(report.transactions.len(), 4);
        assert_eq!(report.summary.total_debits, Money::from_cents(12475));
        assert_eq!(report.summary.total_credits, Money::from_cents(204500));
        assert_eq!(report.summary.net_change, Money::from_cents(192025));
        let breakdown_total = report
            .category_breakdown
            .values()
            .fold(Money::zero(), |a, b| a + *b);
        assert_eq!(breakdown_total, report.summary.total_debits);
    }
}
