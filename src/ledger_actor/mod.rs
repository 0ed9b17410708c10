//! The product ledger actor: catalog, stock transactions and the reports built on them.
//!
//! One [`ResourceActor<ProductLedger>`](crate::framework::ResourceActor) owns every product and
//! its ledger. Writes ([`StockAction`]) and reads ([`LedgerQuery`]) are processed one at a time,
//! so a check on the stock and the update that depends on it can never interleave with another
//! request.

mod actions;
mod aggregation;
mod context;
pub mod entity;
pub mod error;
mod query;
mod reverser;
mod writer;

#[cfg(test)]
pub(crate) mod testing;

pub use actions::*;
pub use context::LedgerContext;
pub use entity::ProductLedger;
pub use error::*;
pub use query::ALL_TRANSACTIONS_CAP;
pub use writer::{same_quantity, STOCK_EPSILON};

use crate::clients::{CatalogClient, LedgerClient};
use crate::framework::ResourceActor;

/// Creates the ledger actor and the two clients that front it.
///
/// The actor does nothing until `run(context)` is spawned.
pub fn new(buffer_size: usize) -> (ResourceActor<ProductLedger>, CatalogClient, LedgerClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    let catalog = CatalogClient::new(generic_client.clone());
    let ledger = LedgerClient::new(generic_client);

    (actor, catalog, ledger)
}
