//! SeaORM storage backend for addresses.

pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod repositories;

pub use repositories::SeaOrmAddressesRepository;
