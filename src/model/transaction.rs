//! Stock transactions: the immutable facts the ledger is made of.

use crate::model::ProductId;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Ledger-assigned identifier, strictly increasing in commit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransactionId(pub u64);

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "txn_{}", self.0)
    }
}

/// The kind of stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Restock: adds `quantity`.
    In,
    /// Sale, loss or damage: subtracts `quantity`.
    Out,
    /// Stock-take correction: `quantity` is the new absolute stock.
    Adjust,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::In => "IN",
            TransactionType::Out => "OUT",
            TransactionType::Adjust => "ADJUST",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown transaction type: {0:?}")]
pub struct UnknownTransactionType(pub String);

impl FromStr for TransactionType {
    type Err = UnknownTransactionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN" => Ok(TransactionType::In),
            "OUT" => Ok(TransactionType::Out),
            "ADJUST" => Ok(TransactionType::Adjust),
            other => Err(UnknownTransactionType(other.to_string())),
        }
    }
}

/// A committed ledger row. Never updated; removed only by a reversal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockTransaction {
    pub id: TransactionId,
    pub product_id: ProductId,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Delta for IN/OUT, absolute target for ADJUST.
    pub quantity: f64,
    /// Product unit at the time of the transaction.
    pub unit: String,
    pub notes: Option<String>,
    pub reference_no: Option<String>,
    /// Product stock right after this transaction was applied.
    pub balance_after: f64,
    pub batch_number: Option<String>,
    pub batch_expiry_date: Option<NaiveDate>,
    pub transaction_date: NaiveDateTime,
}

impl StockTransaction {
    /// An OUT whose notes start with `marker`.
    pub fn is_sale(&self, marker: &str) -> bool {
        self.kind == TransactionType::Out
            && self
                .notes
                .as_deref()
                .is_some_and(|notes| notes.starts_with(marker))
    }

    pub fn date(&self) -> NaiveDate {
        self.transaction_date.date()
    }
}

/// A stock-changing event to record against one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockMovement {
    pub kind: TransactionType,
    pub quantity: f64,
    pub notes: Option<String>,
    pub reference_no: Option<String>,
    pub batch_number: Option<String>,
    pub batch_expiry_date: Option<NaiveDate>,
}

impl StockMovement {
    pub fn new(kind: TransactionType, quantity: f64) -> Self {
        Self {
            kind,
            quantity,
            notes: None,
            reference_no: None,
            batch_number: None,
            batch_expiry_date: None,
        }
    }

    pub fn stock_in(quantity: f64) -> Self {
        Self::new(TransactionType::In, quantity)
    }

    pub fn stock_out(quantity: f64) -> Self {
        Self::new(TransactionType::Out, quantity)
    }

    pub fn adjust_to(quantity: f64) -> Self {
        Self::new(TransactionType::Adjust, quantity)
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_reference(mut self, reference_no: impl Into<String>) -> Self {
        self.reference_no = Some(reference_no.into());
        self
    }

    pub fn with_batch(mut self, batch_number: impl Into<String>, expiry: Option<NaiveDate>) -> Self {
        self.batch_number = Some(batch_number.into());
        self.batch_expiry_date = expiry;
        self
    }
}

/// What `record` hands back for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordOutcome {
    pub old_stock: f64,
    pub new_stock: f64,
    pub transaction: StockTransaction,
}

/// What `revert` hands back: the removed row and the stock change it caused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevertOutcome {
    pub old_stock: f64,
    pub new_stock: f64,
    pub transaction: StockTransaction,
}

/// Filter for the global transaction feed. Dates are inclusive local calendar days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub kind: Option<TransactionType>,
}

impl TransactionFilter {
    pub fn matches(&self, txn: &StockTransaction) -> bool {
        let date = txn.date();
        self.date_from.map_or(true, |from| date >= from)
            && self.date_to.map_or(true, |to| date <= to)
            && self.kind.map_or(true, |kind| txn.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(kind: TransactionType, notes: Option<&str>) -> StockTransaction {
        StockTransaction {
            id: TransactionId(1),
            product_id: ProductId(1),
            kind,
            quantity: 1.0,
            unit: "pcs".into(),
            notes: notes.map(str::to_string),
            reference_no: None,
            balance_after: 0.0,
            batch_number: None,
            batch_expiry_date: None,
            transaction_date: NaiveDate::from_ymd_opt(2024, 5, 10)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_transaction_type_rejects_unknown_strings() {
        assert_eq!("OUT".parse::<TransactionType>(), Ok(TransactionType::Out));
        assert_eq!(
            "out".parse::<TransactionType>(),
            Err(UnknownTransactionType("out".into()))
        );
        assert!("TRANSFER".parse::<TransactionType>().is_err());
    }

    #[test]
    fn test_sale_marker_is_a_prefix_on_out_only() {
        assert!(txn(TransactionType::Out, Some("Sale #12")).is_sale("Sale"));
        assert!(!txn(TransactionType::Out, Some("Damaged - not a Sale")).is_sale("Sale"));
        assert!(!txn(TransactionType::Out, None).is_sale("Sale"));
        assert!(!txn(TransactionType::In, Some("Sale return")).is_sale("Sale"));
    }

    #[test]
    fn test_filter_dates_are_inclusive() {
        let row = txn(TransactionType::In, None);
        let day = row.date();
        let filter = TransactionFilter {
            date_from: Some(day),
            date_to: Some(day),
            kind: Some(TransactionType::In),
        };
        assert!(filter.matches(&row));

        let wrong_kind = TransactionFilter {
            kind: Some(TransactionType::Out),
            ..filter
        };
        assert!(!wrong_kind.matches(&row));
    }
}
