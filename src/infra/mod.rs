//! Infrastructure layer - External systems integration
//!
//! Database connection, migrations, and the user store implementations.

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{InMemoryUserStore, StoreError, UserRepository, UserStore};

#[cfg(test)]
pub use repositories::MockUserRepository;
