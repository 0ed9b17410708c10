//! Transaction writer: validates a stock movement and commits it together with the new stock.

use super::{LedgerContext, LedgerError, ProductLedger};
use crate::model::{RecordOutcome, StockMovement, StockTransaction, TransactionType};
use tracing::debug;

/// Absolute tolerance when comparing two stock balances.
pub const STOCK_EPSILON: f64 = 1e-9;

/// Drift tolerance relative to the magnitude of the operands that produced a stock value.
pub const DRIFT_TOLERANCE: f64 = 1e-12;

/// Settles a stock value computed from operands no larger than `magnitude`: drift around zero
/// becomes exactly `0.0`, a real overdraw yields `None`.
///
/// The tolerance scales with `magnitude`, so `0.3 - 0.1 - 0.2` settles to zero while
/// `1.0 - 1.0000000009` is an overdraw.
pub(crate) fn settle(stock: f64, magnitude: f64) -> Option<f64> {
    let tolerance = DRIFT_TOLERANCE * magnitude.abs();
    if stock < -tolerance {
        None
    } else if stock.abs() <= tolerance {
        Some(0.0)
    } else {
        Some(stock)
    }
}

/// Largest operand of a stock computation, the scale for [`settle`].
pub(crate) fn magnitude(current: f64, quantity: f64) -> f64 {
    current.abs().max(quantity.abs())
}

/// Two stock values equal within [`STOCK_EPSILON`].
pub fn same_quantity(a: f64, b: f64) -> bool {
    (a - b).abs() <= STOCK_EPSILON
}

/// Stock after applying a movement of `kind` to `current`, before settling.
pub(crate) fn apply(kind: TransactionType, current: f64, quantity: f64) -> f64 {
    match kind {
        TransactionType::In => current + quantity,
        TransactionType::Out => current - quantity,
        TransactionType::Adjust => quantity,
    }
}

impl ProductLedger {
    /// Appends `movement` to the ledger and moves the product's stock.
    ///
    /// Nothing changes unless the whole movement is valid; the transaction id is only allocated
    /// once it is.
    pub(crate) fn record(
        &mut self,
        movement: StockMovement,
        ctx: &LedgerContext,
    ) -> Result<RecordOutcome, LedgerError> {
        let quantity = movement.quantity;
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(LedgerError::InvalidQuantity(quantity));
        }

        let old_stock = self.product.current_stock;
        let raw = apply(movement.kind, old_stock, quantity);
        if !raw.is_finite() {
            return Err(LedgerError::InvalidQuantity(quantity));
        }
        let new_stock = settle(raw, magnitude(old_stock, quantity)).ok_or_else(|| LedgerError::InsufficientStock {
            product_id: self.product.id,
            current: old_stock,
            requested: quantity,
            unit: self.product.unit.clone(),
        })?;

        let transaction = StockTransaction {
            id: ctx.next_transaction_id(),
            product_id: self.product.id,
            kind: movement.kind,
            quantity,
            unit: self.product.unit.clone(),
            notes: movement.notes,
            reference_no: movement.reference_no,
            balance_after: new_stock,
            batch_number: movement.batch_number,
            batch_expiry_date: movement.batch_expiry_date,
            transaction_date: ctx.now(),
        };

        self.entries.push(transaction.clone());
        self.product.current_stock = new_stock;
        debug!(
            product_id = %self.product.id,
            transaction_id = %transaction.id,
            kind = %transaction.kind,
            old_stock,
            new_stock,
            "Recorded"
        );

        Ok(RecordOutcome {
            old_stock,
            new_stock,
            transaction,
        })
    }
}
