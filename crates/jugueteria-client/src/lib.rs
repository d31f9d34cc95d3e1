// Typed REST client for the jugueteria backend API
// One ApiClient wraps the HTTP stack and the request authorizer; each
// domain module contributes its DTOs and endpoint methods.

pub mod auth;
pub mod cart;
pub mod categories;
pub mod client;
pub mod error;
pub mod orders;
pub mod payments;
pub mod products;
pub mod reports;
pub mod reviews;
pub mod users;

pub use auth::*;
pub use cart::*;
pub use categories::*;
pub use client::ApiClient;
pub use error::ApiError;
pub use orders::*;
pub use payments::*;
pub use products::*;
pub use reports::*;
pub use reviews::*;
pub use users::*;
