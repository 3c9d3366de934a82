use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Direction of a statement entry. The amount itself is always non-negative;
/// sign lives here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Debit,
    Credit,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Debit => write!(f, "debit"),
            TransactionKind::Credit => write!(f, "credit"),
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debit" => Ok(TransactionKind::Debit),
            "credit" => Ok(TransactionKind::Credit),
            other => Err(format!("Unknown transaction kind: '{other}'")),
        }
    }
}

/// One categorized statement entry.
///
/// `date` keeps the raw statement token ("03/15" or "03/15/2024"); layouts
/// without a year column have no year to attach, so the token round-trips
/// verbatim into the output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: String,
    pub description: String,
    pub amount: Money,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn kind_display_round_trip() {
        assert_eq!(
            TransactionKind::from_str(&TransactionKind::Debit.to_string()).unwrap(),
            TransactionKind::Debit
        );
        assert_eq!(
            TransactionKind::from_str(&TransactionKind::Credit.to_string()).unwrap(),
            TransactionKind::Credit
        );
        assert!(TransactionKind::from_str("transfer").is_err());
    }

    #[test]
    fn kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TransactionKind::Credit).unwrap(),
            "\"credit\""
        );
    }

    #[test]
    fn transaction_json_shape() {
        let tx = Transaction {
            date: "03/15".to_string(),
            description: "STARBUCKS STORE #123".to_string(),
            amount: Money::from_cents(475),
            kind: TransactionKind::Debit,
            category: "Restaurants & Fast Food".to_string(),
        };
        let v = serde_json::to_value(&tx).unwrap();
        assert_eq!(v["date"], "03/15");
        assert_eq!(v["description"], "STARBUCKS STORE #123");
        assert_eq!(v["amount"], serde_json::json!(4.75));
        assert_eq!(v["type"], "debit");
        assert_eq!(v["category"], "Restaurants & Fast Food");
    }
}
