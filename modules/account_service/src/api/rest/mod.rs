//! REST API for accounts.

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod mapper;
pub mod routes;

pub use extract::{AdminAccount, CurrentAccount, VerifiedAccount};
pub use routes::register_routes;
