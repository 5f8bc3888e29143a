// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Serial dispatch queue for platform logging
//!
//! A single named worker thread drains an unbounded channel of jobs in FIFO
//! order. Enqueuing never blocks, so the native thread that emitted a message
//! is never held up by the platform logger.

use crossbeam::channel::{self, Sender};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle, ThreadId};

use crate::error::{LoggerError, LoggerResult};

/// Label of the process-wide platform logging queue
pub const OS_LOGGER_QUEUE_LABEL: &str = "chewing.ChewingLogger.osLoggerQueue";

type Job = Box<dyn FnOnce() + Send + 'static>;

static GLOBAL: Lazy<SerialQueue> = Lazy::new(|| {
    SerialQueue::spawn(OS_LOGGER_QUEUE_LABEL)
        .unwrap_or_else(|_| SerialQueue::inline(OS_LOGGER_QUEUE_LABEL))
});

/// FIFO job queue backed by one worker thread
///
/// # Design
/// - Jobs run one at a time, in enqueue order
/// - A panicking job is contained and does not stop the worker
/// - Dropping the queue closes the channel and joins the worker after it
///   has drained the remaining jobs
pub struct SerialQueue {
    label: String,
    // None means inline mode: jobs run on the caller
    sender: Option<Sender<Job>>,
    worker: Option<ThreadId>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl SerialQueue {
    /// Spawn a queue with its own worker thread
    ///
    /// # Errors
    /// Returns `LoggerError::QueueSpawn` if the OS refuses to create the thread
    pub fn spawn(label: impl Into<String>) -> LoggerResult<Self> {
        let label = label.into();
        let (tx, rx) = channel::unbounded::<Job>();

        let handle = thread::Builder::new()
            .name(label.clone())
            .spawn(move || {
                for job in rx.iter() {
                    let _ = panic::catch_unwind(AssertUnwindSafe(job));
                }
            })
            .map_err(|source| LoggerError::QueueSpawn {
                label: label.clone(),
                source,
            })?;

        Ok(Self {
            label,
            sender: Some(tx),
            worker: Some(handle.thread().id()),
            handle: Mutex::new(Some(handle)),
        })
    }

    /// A queue without a worker; [`dispatch`](Self::dispatch) runs jobs on the caller
    pub fn inline(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            sender: None,
            worker: None,
            handle: Mutex::new(None),
        }
    }

    /// The process-wide platform logging queue, started on first use
    pub fn global() -> &'static SerialQueue {
        &GLOBAL
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether jobs run on a dedicated worker thread
    pub fn is_threaded(&self) -> bool {
        self.sender.is_some()
    }

    /// Number of jobs waiting to run
    pub fn pending(&self) -> usize {
        self.sender.as_ref().map_or(0, Sender::len)
    }

    /// Enqueue a job without waiting for it
    pub fn dispatch<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        match &self.sender {
            Some(tx) => {
                if let Err(channel::SendError(job)) = tx.send(Box::new(job)) {
                    // Worker is gone; keep the message rather than lose it.
                    let _ = panic::catch_unwind(AssertUnwindSafe(job));
                }
            }
            None => {
                let _ = panic::catch_unwind(AssertUnwindSafe(job));
            }
        }
    }

    /// Block until every job enqueued before this call has run
    ///
    /// Called from a job on this queue's worker it returns at once, since
    /// the barrier would sit behind the running job.
    pub fn flush(&self) {
        if self.sender.is_none() || self.is_worker_thread() {
            return;
        }
        let (done_tx, done_rx) = channel::bounded::<()>(1);
        self.dispatch(move || {
            let _ = done_tx.send(());
        });
        let _ = done_rx.recv();
    }
}

impl SerialQueue {
    fn is_worker_thread(&self) -> bool {
        self.worker == Some(thread::current().id())
    }
}

impl Drop for SerialQueue {
    fn drop(&mut self) {
        self.sender.take();
        if let Some(handle) = self.handle.get_mut().take() {
            if handle.thread().id() != thread::current().id() {
                let _ = handle.join();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_jobs_run_in_order() {
        let queue = SerialQueue::spawn("test-serial-queue").unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for i in 0..100 {
            let seen = Arc::clone(&seen);
            queue.dispatch(move || seen.lock().push(i));
        }
        queue.flush();

        assert_eq!(*seen.lock(), (0..100).collect::<Vec<_>>());
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_jobs_run_off_the_caller_thread() {
        let queue = SerialQueue::spawn("test-serial-thread").unwrap();
        let caller = thread::current().id();
        let worker = Arc::new(Mutex::new(None));

        let worker_clone = Arc::clone(&worker);
        queue.dispatch(move || *worker_clone.lock() = Some(thread::current().id()));
        queue.flush();

        let worker = (*worker.lock()).unwrap();
        assert_ne!(worker, caller);
    }

    #[test]
    fn test_panicking_job_does_not_stop_worker() {
        let queue = SerialQueue::spawn("test-serial-panic").unwrap();
        let counter = Arc::new(AtomicUsize::new(0));

        queue.dispatch(|| panic!("job failure"));
        let counter_clone = Arc::clone(&counter);
        queue.dispatch(move || {
            counter_clone.fetch_add(1, Ordering::Relaxed);
        });
        queue.flush();

        assert_eq!(counter.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_flush_from_job_returns() {
        let queue = Arc::new(SerialQueue::spawn("test-serial-reentrant").unwrap());
        let counter = Arc::new(AtomicUsize::new(0));

        let inner = Arc::clone(&queue);
        let counter_clone = Arc::clone(&counter);
        queue.dispatch(move || {
            inner.flush();
            counter_clone.fetch_add(1, Ordering::Relaxed);
        });
        queue.flush();

        assert_eq!(counter.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_drop_drains_pending_jobs() {
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let queue = SerialQueue::spawn("test-serial-drop").unwrap();
            for _ in 0..10 {
                let counter = Arc::clone(&counter);
                queue.dispatch(move || {
                    counter.fetch_add(1, Ordering::Relaxed);
                });
            }
        }
        assert_eq!(counter.load(Ordering::Relaxed), 10);
    }

    #[test]
    fn test_inline_queue_runs_on_caller() {
        let queue = SerialQueue::inline("inline");
        assert!(!queue.is_threaded());

        let caller = thread::current().id();
        let ran_on = Arc::new(Mutex::new(None));
        let ran_on_clone = Arc::clone(&ran_on);
        queue.dispatch(move || *ran_on_clone.lock() = Some(thread::current().id()));
        queue.flush();

        assert_eq!(*ran_on.lock(), Some(caller));
    }

    #[test]
    fn test_global_queue_is_labelled() {
        assert_eq!(SerialQueue::global().label(), OS_LOGGER_QUEUE_LABEL);
    }
}
