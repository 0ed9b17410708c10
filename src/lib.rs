//! # Stock Ledger
//!
//! > **An inventory stock ledger with revenue and profit reporting, built on resource actors.**
//!
//! Every change to a product's quantity (restock, sale, stock-take correction) is recorded as
//! an immutable transaction. The running stock balance and the financial reports are derived
//! from that ledger.
//!
//! ## 🏗️ Design
//!
//! ### One owner for catalog and ledger
//! A single [`ResourceActor`](framework::ResourceActor) owns every product *together with* its
//! transactions ([`ProductLedger`](ledger_actor::ProductLedger)). Requests are processed one at
//! a time, so:
//! - recording a transaction and moving the stock happen in one step,
//! - the "is there enough stock?" check cannot race with another sale,
//! - reports always see a consistent snapshot.
//!
//! ### Invariants
//! - Stock is never negative. An OUT that would overdraw is rejected with no side effect.
//! - Replaying a product's ledger from its opening stock reproduces every `balance_after`
//!   snapshot, until a non-tail transaction is reverted (see
//!   [`LedgerClient::revert`](clients::LedgerClient::revert) and
//!   [`LedgerClient::audit`](clients::LedgerClient::audit)).
//! - Revenue and profit use the product's *current* prices at read time.
//!
//! ### Errors
//! [`LedgerError`](ledger_actor::LedgerError) is the one error type callers see. Failures inside
//! the actor travel boxed in a [`FrameworkError`](framework::FrameworkError) and are downcast back
//! by the clients.
//!
//! ## 🗺️ Module Tour
//!
//! - **[`framework`]**: the generic actor, its client, and the mock used in client tests.
//! - **[`ledger_actor`]**: the `ProductLedger` entity: writer, reverser, queries, aggregation.
//! - **[`clients`]**: [`CatalogClient`](clients::CatalogClient) and
//!   [`LedgerClient`](clients::LedgerClient).
//! - **[`lifecycle`]**: [`LedgerSystem`](lifecycle::LedgerSystem) startup/shutdown and
//!   [`setup_tracing`](lifecycle::setup_tracing).
//! - **[`model`]**: plain records (products, transactions, reports).
//! - **[`config`]** and **[`clock`]**: runtime settings and the injected wall clock.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod clients;
pub mod clock;
pub mod config;
pub mod framework;
pub mod ledger_actor;
pub mod lifecycle;
pub mod model;
