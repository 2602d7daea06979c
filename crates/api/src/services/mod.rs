//! Business-logic services.
//!
//! Services compose repositories and enforce operation semantics; handlers
//! stay thin. Each service borrows the shared pool through its repositories.

pub mod auth;
pub mod cart;
pub mod catalog;

pub use auth::{AuthError, AuthService};
pub use cart::CartService;
pub use catalog::CatalogService;
