//! Generic actor framework for resource management.
//!
//! The building blocks used to give the stock ledger a single owner: one task holds the state,
//! every request reaches it through a channel, and requests are applied one after another.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that resource types implement to be managed by an actor
//! - [`ResourceActor`] - Generic actor that owns the entity store
//! - [`ResourceClient`] - Cloneable, type-safe handle for sending requests
//! - [`FrameworkError`] - Plumbing errors, with entity errors boxed inside
//!
//! # Testing
//!
//! See the [`mock`] module for utilities to test clients without spawning the real actor.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use entity::{ActorEntity, Store};
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
