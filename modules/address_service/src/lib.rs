//! Address Service Module
//!
//! One physical table serves address records for every owner entity type.
//! Rows carry an `(discriminator, parent_id)` pair instead of a typed foreign
//! key; every read and write is scoped by the owning entity, so an address id
//! alone never authorizes access.

// Public exports
pub mod contract;
pub use contract::{Address, AddressError, AddressPatch, NewAddress, OwnerRef};

// Internal modules (consumed by the account/store REST areas and the server)
pub mod domain;
pub mod infra;
