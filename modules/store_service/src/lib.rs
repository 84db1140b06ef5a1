//! Store Service Module
//!
//! The marketplace domain: segments (store categories), stores with their
//! membership rows, and store-owned addresses. Listing endpoints run through
//! the shared query engine; mutations are gated on store ownership or admin
//! privileges.

// Public exports
pub mod contract;
pub use contract::{
    DocumentType, NewSegment, NewStore, Segment, SegmentPatch, Store, StoreError, StorePatch,
    StorePerson,
};

pub mod api;
pub mod domain;
pub mod infra;
