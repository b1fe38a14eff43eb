//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod auth_service;
mod token;
mod user_service;

pub use auth_service::{AuthService, Authenticator};
pub use token::{AccessToken, Claims, JwtIssuer, TokenError, TokenIssuer};
pub use user_service::{UserManager, UserService};
