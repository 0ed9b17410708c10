//! # System Lifecycle
//!
//! Starting, wiring and stopping the ledger actor.
//!
//! ## Dependency Injection via Context
//!
//! The actor is created without its dependencies; they arrive at `run(context)` time
//! ("late binding"). For the ledger that context is a [`LedgerContext`](crate::ledger_actor::LedgerContext):
//! the clock every timestamp and "today" comes from, the transaction id sequence, and the sale
//! marker used by the reports.
//!
//! ```rust,ignore
//! let (actor, catalog, ledger) = ledger_actor::new(config.channel_buffer);
//! let handle = tokio::spawn(actor.run(LedgerContext::new(clock, "Sale")));
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of the channel
//! 2. **Actor detects closure** - `receiver.recv()` returns `None`
//! 3. **Actor logs final state** - and its task ends
//! 4. **Await completion** - [`LedgerSystem::shutdown`] joins the task
//!
//! Requests already queued are answered before the actor stops.

pub mod ledger_system;
pub mod tracing;

pub use ledger_system::*;
pub use self::tracing::setup_tracing;
