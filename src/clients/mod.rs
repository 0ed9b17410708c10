//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).
//!
//! Both clients talk to the same ledger actor: [`CatalogClient`] manages products,
//! [`LedgerClient`] records, reverts and reports on stock transactions.

pub mod actor_client;
pub mod catalog_client;
pub mod ledger_client;

pub use actor_client::*;
pub use catalog_client::*;
pub use ledger_client::*;

use crate::ledger_actor::{LedgerError, LedgerQueryResult};

/// A reply variant that does not answer the query that was sent.
pub(crate) fn unexpected(reply: LedgerQueryResult) -> LedgerError {
    LedgerError::StorageFailure(format!("unexpected reply: {reply:?}"))
}
