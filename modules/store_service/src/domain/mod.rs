//! Domain layer - repository traits and the store service.

pub mod repository;
pub mod service;

pub use repository::{SegmentsRepository, StoresRepository};
pub use service::Service;
