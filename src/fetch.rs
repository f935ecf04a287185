//! Background fetch system
//!
//! Pending controller fetches run as tokio tasks and report back over a
//! channel, so the event loop keeps drawing and reading keys while a request
//! is in flight.

use tokio::sync::mpsc;
use tracing::debug;

use beatvideo::controllers::{DetailOutcome, PendingDetail, PendingSearch, SearchOutcome};

/// Which view asked for a movie's details
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailTarget {
    /// The film overlay on top of the list
    Overlay,
    /// The full-screen detail page
    Page,
}

/// Work handed to a background task
pub enum FetchJob {
    Search(PendingSearch),
    Detail {
        target: DetailTarget,
        pending: PendingDetail,
    },
}

impl FetchJob {
    /// Runs the job to completion and wraps the result for the app
    pub async fn run(self) -> FetchMessage {
        match self {
            FetchJob::Search(pending) => FetchMessage::SearchFinished(pending.run().await),
            FetchJob::Detail { target, pending } => {
                let movie_id = pending.movie_id();
                FetchMessage::DetailFinished {
                    target,
                    movie_id,
                    outcome: pending.run().await,
                }
            }
        }
    }
}

/// Messages sent from fetch tasks to the main loop
#[derive(Debug, Clone)]
pub enum FetchMessage {
    /// A list search resolved
    SearchFinished(SearchOutcome),
    /// A detail lookup resolved
    DetailFinished {
        target: DetailTarget,
        movie_id: u64,
        outcome: DetailOutcome,
    },
}

/// Handle for spawning fetches and collecting their results
pub struct FetchHandle {
    sender: mpsc::Sender<FetchMessage>,
    receiver: mpsc::Receiver<FetchMessage>,
}

impl FetchHandle {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel(32);
        Self { sender, receiver }
    }

    /// Spawns `job` on the runtime; its result arrives through `try_recv`
    pub fn spawn(&self, job: FetchJob) {
        let tx = self.sender.clone();
        tokio::spawn(async move {
            let message = job.run().await;
            if tx.send(message).await.is_err() {
                debug!("fetch result dropped: receiver closed");
            }
        });
    }

    /// Checks for a finished fetch without blocking
    ///
    /// # Returns
    /// * `Some(FetchMessage)` if a fetch has finished
    /// * `None` if nothing is pending
    pub fn try_recv(&mut self) -> Option<FetchMessage> {
        self.receiver.try_recv().ok()
    }

    /// Waits for the next finished fetch
    #[cfg(test)]
    pub async fn recv(&mut self) -> Option<FetchMessage> {
        self.receiver.recv().await
    }
}
