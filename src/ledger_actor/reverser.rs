//! Transaction reverser: compensating deletion of a ledger row.
//!
//! The inverse is applied to the *live* stock. Rows recorded after the reverted one keep their
//! `balance_after` snapshots, which are then stale; [`ProductLedger::audit`] reports them.

use super::writer::{magnitude, settle};
use super::{LedgerError, ProductLedger};
use crate::model::{RevertOutcome, TransactionId, TransactionType};
use tracing::debug;

impl ProductLedger {
    /// Removes `transaction_id` from the ledger and undoes its effect on the stock.
    pub(crate) fn revert(
        &mut self,
        transaction_id: TransactionId,
    ) -> Result<RevertOutcome, LedgerError> {
        let position = self
            .entries
            .iter()
            .position(|t| t.id == transaction_id)
            .ok_or(LedgerError::TransactionNotFound(transaction_id))?;
        let entry = &self.entries[position];

        let old_stock = self.product.current_stock;
        let raw = match entry.kind {
            TransactionType::In => old_stock - entry.quantity,
            TransactionType::Out => old_stock + entry.quantity,
            TransactionType::Adjust => {
                return Err(LedgerError::AdjustNotReversible(transaction_id));
            }
        };
        let new_stock = settle(raw, magnitude(old_stock, entry.quantity)).ok_or(
            LedgerError::InvalidReversal {
                transaction_id,
                current_stock: old_stock,
                quantity: entry.quantity,
            },
        )?;

        let transaction = self.entries.remove(position);
        self.product.current_stock = new_stock;
        debug!(
            product_id = %self.product.id,
            %transaction_id,
            old_stock,
            new_stock,
            "Reverted"
        );

        Ok(RevertOutcome {
            old_stock,
            new_stock,
            transaction,
        })
    }
}
