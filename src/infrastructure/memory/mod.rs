//! In-process storage backend.
//!
//! Used when no database is configured and by the integration tests. A single
//! [`MemoryStore`] implements every repository trait so that deleting a
//! category or account also drops its memberships, as the database schema
//! does with `ON DELETE CASCADE`.

mod store;

pub use store::MemoryStore;
