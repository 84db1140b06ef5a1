//! Contract layer - transport-agnostic models and errors.
//!
//! NO serde derives on models - these are pure domain types.

pub mod error;
pub mod model;

pub use error::AddressError;
pub use model::{Address, AddressPatch, NewAddress, OwnerRef};
