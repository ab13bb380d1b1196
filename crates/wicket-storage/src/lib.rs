//! # wicket-storage
//!
//! Storage abstraction for the wicket authentication gateway.
//!
//! This crate defines the [`IdentityProvider`] interface that concrete
//! backends implement, together with the storage error taxonomy. A
//! thread-safe in-memory provider is included for tests and
//! single-process deployments; the durable PostgreSQL backend lives in
//! `wicket-storage-sql`.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod error;
pub mod identity;
pub mod memory;

pub use error::{StorageError, StorageResult};
pub use identity::IdentityProvider;
pub use memory::MemoryIdentityProvider;
