use bankscan_core::{MalformedAmount, Money, TransactionKind};

use crate::extractor::RawCandidate;
use crate::format::StatementFormat;

/// Resolve a candidate's amount and direction. First applicable rule wins:
///
/// 1. negative parsed amount means a credit, stored as its absolute value;
/// 2. a configured credit keyword in the description means a credit;
/// 3. everything else is a debit.
///
/// Statements rarely label direction outright, and expenses dominate row
/// volume, so the fallback is debit.
pub fn classify(
    format: &StatementFormat,
    candidate: &RawCandidate,
) -> Result<(Money, TransactionKind), MalformedAmount> {
    let parsed = Money::parse(&candidate.amount_token)?;
    if parsed.is_negative() {
        return Ok((parsed.abs(), TransactionKind::Credit));
    }
    let desc = candidate.description.to_uppercase();
    if format
        .credit_keywords
        .iter()
        .any(|k| desc.contains(&k.to_uppercase()))
    {
        return Ok((parsed, TransactionKind::Credit));
    }
    Ok((parsed, TransactionKind::Debit))
}
