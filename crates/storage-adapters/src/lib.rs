//! # Storage adapters
//!
//! Implementations of the `domains` storage ports.
//!
//! | Adapter | Feature | Backing |
//! |---|---|---|
//! | [`InMemoryStore`] | always | `DashMap` tables, process-local |
//! | `PgStore` | `db-postgres` | PostgreSQL via `sqlx` |
//!
//! Both keep one like per `(comment_id, owner)` structurally and perform
//! the like toggle as a single atomic write.

pub mod generators;
pub mod memory;

#[cfg(feature = "db-postgres")]
pub mod postgres;

pub use generators::{Clock, IdGenerator, SystemClock, UuidIds};
pub use memory::InMemoryStore;

#[cfg(feature = "db-postgres")]
pub use postgres::PgStore;
