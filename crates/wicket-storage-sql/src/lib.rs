//! # wicket-storage-sql
//!
//! PostgreSQL implementation of the wicket storage interfaces, built on
//! `sqlx`. Identity records are durable and survive process restarts;
//! the email column's primary-key constraint is what makes concurrent
//! registration of the same email atomic.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod error;
pub mod identity;
pub mod pool;

pub use identity::{ensure_schema, PgIdentityProvider};
pub use pool::{create_pool, PoolConfig};
