//! Notification Service Module
//!
//! Fire-and-forget email dispatch. Request paths hand a named job to the
//! dispatcher and get a job id back immediately; a worker task renders the
//! email and posts it to the delivery HTTP API. Delivery outcome is never
//! observed synchronously, and failed jobs are logged, not retried.

// Public exports
pub mod contract;
pub use contract::{
    client::{AccountDirectory, NotificationDispatcher},
    error::NotificationError,
    model::{EmailJob, JobId, Recipient},
};

pub mod config;
pub use config::Config;

pub mod domain;
pub mod infra;
