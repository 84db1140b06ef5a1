//! Domain layer - repository traits and the account service.

pub mod password;
pub mod repository;
pub mod service;
pub mod verified;

pub use repository::{PasswordResetsRepository, UsersRepository};
pub use service::Service;
