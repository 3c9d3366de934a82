use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::money::Money;
use super::transaction::{Transaction, TransactionKind};

/// Statement-level totals, all derived from the transaction list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_transactions: usize,
    pub total_debits: Money,
    pub total_credits: Money,
    /// Credits minus debits; positive means net inflow.
    pub net_change: Money,
}

/// Final output of a statement run: the categorized transactions plus the
/// aggregates downstream reporting consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementReport {
    pub transactions: Vec<Transaction>,
    pub summary: Summary,
    /// Debit spending per category. Credits never appear here: the breakdown
    /// answers "where did money go".
    pub category_breakdown: BTreeMap<String, Money>,
    pub bank_identifier: String,
}

impl StatementReport {
    /// Aggregate a transaction list into a report.
    pub fn from_transactions(
        transactions: Vec<Transaction>,
        bank_identifier: impl Into<String>,
    ) -> Self {
        let total_debits = transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Debit)
            .map(|t| t.amount)
            .fold(Money::zero(), |a, b| a + b);
        let total_credits = transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Credit)
            .map(|t| t.amount)
            .fold(Money::zero(), |a, b| a + b);

        let mut category_breakdown: BTreeMap<String, Money> = BTreeMap::new();
        for tx in transactions.iter().filter(|t| t.kind == TransactionKind::Debit) {
            *category_breakdown
                .entry(tx.category.clone())
                .or_insert_with(Money::zero) += tx.amount;
        }

        StatementReport {
            summary: Summary {
                total_transactions: transactions.len(),
                total_debits,
                total_credits,
                net_change: total_credits - total_debits,
            },
            category_breakdown,
            transactions,
            bank_identifier: bank_identifier.into(),
        }
    }

    /// True when extraction matched no records at all.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
