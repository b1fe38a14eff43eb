//! Domain layer - Core business entities and logic
//!
//! Contains the user entity, its role, and the password value object.
//! Nothing here knows about HTTP or the database.

pub mod password;
pub mod user;

pub use password::{Password, PasswordError};
pub use user::{is_valid_email, NewUser, User, UserResponse, UserRole};
