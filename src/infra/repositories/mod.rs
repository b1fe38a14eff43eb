//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;
mod memory_repository;
mod user_repository;

pub use memory_repository::InMemoryUserStore;
pub use user_repository::{StoreError, UserRepository, UserStore};

#[cfg(test)]
pub use user_repository::MockUserRepository;
