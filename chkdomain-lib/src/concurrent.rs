//! Concurrent job scheduling for domain checks.
//!
//! Domains are turned into jobs on a shared queue and drained by a fixed
//! pool of workers. Every job owns a handle to the result channel and
//! publishes exactly one `DomainResult`, so the consumer sees exactly one
//! result per input domain, in completion order.

use crate::error::ChkDomainError;
use crate::types::{CheckConfig, DomainResult, MAX_CONCURRENCY};
use futures::{FutureExt, Stream};
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::{mpsc, Mutex};

/// A pending lookup for one domain.
///
/// Consumed by `run`, so a job can only ever publish once.
struct Job {
    domain: String,
    results: mpsc::UnboundedSender<DomainResult>,
}

impl Job {
    fn new(domain: String, results: mpsc::UnboundedSender<DomainResult>) -> Self {
        Self { domain, results }
    }

    /// Run `lookup` for this job's domain and publish its result.
    ///
    /// A panicking lookup still publishes, as an `Internal` failure.
    async fn run<F, Fut>(self, lookup: &F)
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = DomainResult>,
    {
        let domain = self.domain.clone();
        let outcome = AssertUnwindSafe(async { lookup(domain.clone()).await })
            .catch_unwind()
            .await;

        let result = outcome.unwrap_or_else(|_| {
            tracing::warn!(domain = %self.domain, "lookup panicked");
            DomainResult::Failure {
                domain: self.domain.clone(),
                error: ChkDomainError::internal("lookup panicked"),
            }
        });

        self.publish(result);
    }

    fn publish(self, result: DomainResult) {
        if self.results.send(result).is_err() {
            tracing::debug!(domain = %self.domain, "result stream dropped before delivery");
        }
    }
}

/// Manages a pool of workers running domain lookups.
#[derive(Debug, Clone, Copy)]
pub struct ConcurrentProcessor {
    max_concurrency: usize,
}

impl ConcurrentProcessor {
    /// Create a processor running at most `max_concurrency` lookups at once
    /// (clamped to 1..=100).
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            max_concurrency: max_concurrency.clamp(1, MAX_CONCURRENCY),
        }
    }

    pub fn from_config(config: &CheckConfig) -> Self {
        Self::new(config.concurrency)
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Start `lookup` for every domain and return the stream of results.
    ///
    /// Workers are spawned onto the current tokio runtime immediately; the
    /// returned stream yields exactly `domains.len()` results in whatever
    /// order they complete. Both channels are unbounded, so neither the
    /// job producer nor the workers ever wait on a slow consumer.
    pub fn run<F, Fut>(&self, domains: Vec<String>, lookup: F) -> ResultStream
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = DomainResult> + Send + 'static,
    {
        let expected = domains.len();
        let workers = self.max_concurrency.min(expected);

        let (job_tx, job_rx) = mpsc::unbounded_channel::<Job>();
        let (result_tx, result_rx) = mpsc::unbounded_channel::<DomainResult>();

        for domain in domains {
            let job = Job::new(domain, result_tx.clone());
            if let Err(mpsc::error::SendError(job)) = job_tx.send(job) {
                let failure = DomainResult::Failure {
                    domain: job.domain.clone(),
                    error: ChkDomainError::internal("job queue closed"),
                };
                job.publish(failure);
            }
        }
        // Once the queue is empty, workers see it closed and exit. Their jobs
        // hold the last result senders, so the result channel closes after
        // the final publish.
        drop(job_tx);
        drop(result_tx);

        let queue = Arc::new(Mutex::new(job_rx));
        let lookup = Arc::new(lookup);

        tracing::debug!(domains = expected, workers, "starting worker pool");

        for worker in 0..workers {
            let queue = Arc::clone(&queue);
            let lookup = Arc::clone(&lookup);
            tokio::spawn(async move {
                let mut completed = 0usize;
                loop {
                    let next = queue.lock().await.recv().await;
                    let Some(job) = next else { break };
                    job.run(lookup.as_ref()).await;
                    completed += 1;
                }
                tracing::debug!(worker, completed, "worker drained queue");
            });
        }

        ResultStream {
            results: result_rx,
            expected,
            received: 0,
        }
    }
}

/// Completion-ordered stream of results.
///
/// Ends after exactly as many results as domains were submitted.
pub struct ResultStream {
    results: mpsc::UnboundedReceiver<DomainResult>,
    expected: usize,
    received: usize,
}

impl ResultStream {
    /// Number of domains submitted.
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Number of results not yet yielded.
    pub fn remaining(&self) -> usize {
        self.expected - self.received
    }
}

impl Stream for ResultStream {
    type Item = DomainResult;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.received == self.expected {
            return Poll::Ready(None);
        }

        match self.results.poll_recv(cx) {
            Poll::Ready(Some(result)) => {
                self.received += 1;
                Poll::Ready(Some(result))
            }
            other => other,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining()))
    }
}
