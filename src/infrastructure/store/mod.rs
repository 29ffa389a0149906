//! Credential store implementations

mod in_memory;
mod migrations;
mod postgres;

pub use in_memory::InMemoryCredentialStore;
pub use migrations::{credential_store_migrations, Migration, PostgresMigrator};
pub use postgres::{PostgresConfig, PostgresCredentialStore};
