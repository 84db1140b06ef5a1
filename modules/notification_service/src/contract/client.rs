//! Native client traits for in-process inter-module calls.

use anyhow::Result;
use async_trait::async_trait;

use super::error::NotificationError;
use super::model::{EmailJob, JobId, Recipient};

/// Accepts a job and returns its handle immediately; execution happens
/// asynchronously in the worker. This is the only surface request paths see.
pub trait NotificationDispatcher: Send + Sync {
    /// # Errors
    /// `NotificationError::QueueClosed` once the worker has shut down.
    fn dispatch(&self, job: EmailJob) -> Result<JobId, NotificationError>;
}

/// Recipient lookup, implemented by the account module and injected at
/// wiring time so the worker can resolve an account id to a name/email pair.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    async fn find_recipient(&self, account_id: i64) -> Result<Option<Recipient>>;
}
