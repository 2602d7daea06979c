//! Domain types for the API.
//!
//! Wire representations are camelCase JSON; validation helpers live next to
//! the types they validate and report every violated field, not just the
//! first.

pub mod cart;
pub mod product;
pub mod user;

pub use cart::{Cart, CartItem, CartItemInput, EnrichedCart, EnrichedCartItem};
pub use product::{Product, ProductImage, ProductInput, SizeOption};
pub use user::User;
