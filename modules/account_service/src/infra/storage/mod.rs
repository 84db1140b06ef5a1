//! SeaORM storage backend for accounts.

pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod repositories;

pub use repositories::{SeaOrmPasswordResetsRepository, SeaOrmUsersRepository};
