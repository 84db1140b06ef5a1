//! In-process job queue: dispatcher handle plus worker loop.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::contract::{EmailJob, JobId, NotificationDispatcher, NotificationError};
use crate::domain::service::Service;

struct QueuedJob {
    id: JobId,
    job: EmailJob,
}

/// Dispatcher handle given to request paths. Cloneable and cheap; sending
/// never blocks.
#[derive(Clone)]
pub struct QueueDispatcher {
    tx: mpsc::UnboundedSender<QueuedJob>,
}

impl QueueDispatcher {
    /// Create the dispatcher/worker pair. The caller spawns
    /// [`Worker::run`] on the runtime.
    pub fn new(service: Arc<Service>) -> (Self, Worker) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, Worker { rx, service })
    }
}

impl NotificationDispatcher for QueueDispatcher {
    fn dispatch(&self, job: EmailJob) -> Result<JobId, NotificationError> {
        let id = Uuid::new_v4();
        info!(job = job.name(), job_id = %id, account_id = job.account_id(), "job queued");
        self.tx
            .send(QueuedJob { id, job })
            .map_err(|_| NotificationError::QueueClosed)?;
        Ok(id)
    }
}

/// Consumes queued jobs until every dispatcher handle is dropped.
///
/// Failures are logged and dropped; retries, if wanted, belong to the
/// dispatch layer, not here.
pub struct Worker {
    rx: mpsc::UnboundedReceiver<QueuedJob>,
    service: Arc<Service>,
}

impl Worker {
    #[instrument(skip(self))]
    pub async fn run(mut self) {
        info!("notification worker started");
        while let Some(queued) = self.rx.recv().await {
            let job_name = queued.job.name();
            if let Err(err) = self.service.process(queued.job).await {
                error!(job = job_name, job_id = %queued.id, error = %err, "job failed");
            }
        }
        info!("notification worker stopped");
    }
}
