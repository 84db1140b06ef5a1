//! Contract layer - inter-module traits, job models, errors.
//!
//! Other modules depend only on this layer: they dispatch jobs through
//! [`client::NotificationDispatcher`] and supply recipients through
//! [`client::AccountDirectory`], wired together by the server binary.

pub mod client;
pub mod error;
pub mod model;

pub use client::{AccountDirectory, NotificationDispatcher};
pub use error::NotificationError;
pub use model::{EmailJob, JobId, Recipient};
