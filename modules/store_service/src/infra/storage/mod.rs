//! SeaORM storage backend for the marketplace.

pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod repositories;

pub use repositories::{SeaOrmSegmentsRepository, SeaOrmStoresRepository};
