//! Error types for the ledger actor.

use crate::framework::FrameworkError;
use crate::model::{ProductId, TransactionId, UnknownTransactionType};
use thiserror::Error;

/// Errors that can occur during catalog and ledger operations.
///
/// Every failure is returned to the immediate caller and leaves the catalog and ledger untouched.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LedgerError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The requested transaction was not found.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    /// An OUT would take the product's stock below zero.
    #[error("Insufficient stock for {product_id}: requested {requested} {unit}, available {current} {unit}")]
    InsufficientStock {
        product_id: ProductId,
        current: f64,
        requested: f64,
        unit: String,
    },

    /// Undoing the transaction would take the live stock below zero.
    #[error("Cannot revert {transaction_id}: stock {current_stock} cannot absorb {quantity}")]
    InvalidReversal {
        transaction_id: TransactionId,
        current_stock: f64,
        quantity: f64,
    },

    /// ADJUST rows do not record the stock they replaced, so they cannot be undone.
    #[error("Cannot revert {0}: ADJUST transactions are not reversible")]
    AdjustNotReversible(TransactionId),

    /// Quantity is negative or not a finite number.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(f64),

    #[error("Invalid transaction type: {0}")]
    InvalidTransactionType(#[from] UnknownTransactionType),

    /// Catalog data failed validation.
    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    /// The store actor could not be reached or answered unexpectedly.
    #[error("Storage failure: {0}")]
    StorageFailure(String),
}

impl From<String> for LedgerError {
    fn from(msg: String) -> Self {
        LedgerError::StorageFailure(msg)
    }
}

impl From<FrameworkError> for LedgerError {
    fn from(e: FrameworkError) -> Self {
        match e.into_entity_error::<LedgerError>() {
            Ok(err) => err,
            Err(other) => LedgerError::StorageFailure(other.to_string()),
        }
    }
}
