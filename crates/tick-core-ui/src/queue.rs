//! Single-threaded UI task queue.
//!
//! The host environment is assumed to drive a cooperative, single-threaded
//! UI event loop. Model mutation events may arrive from background
//! threads, so anything that touches widgets or providers is marshalled
//! here: `submit` appends a task from any thread, and the host calls
//! [`UiQueue::run_pending`] from its UI thread to execute tasks serialized
//! in enqueue order.
//!
//! Tasks are never coalesced and never cancelled. The only way a queued
//! task does not run its payload is target disposal, checked at execution
//! time (see [`UiQueue::submit_for`]).

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// A widget or view that can be torn down while work is still queued.
pub trait Disposable {
    /// Whether the target has been disposed.
    fn is_disposed(&self) -> bool;
}

/// A shared disposal token.
///
/// Cloned flags observe the same underlying state, so a task holding a
/// clone sees a disposal that happened after it was enqueued.
#[derive(Debug, Clone, Default)]
pub struct DisposeFlag {
    disposed: Arc<AtomicBool>,
}

impl DisposeFlag {
    /// Create a live (not disposed) flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the target as disposed. Irreversible.
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::Release);
    }
}

impl Disposable for DisposeFlag {
    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}

type Task = Box<dyn FnOnce() + Send>;

/// A FIFO of deferred UI work.
///
/// Cloning the queue yields another submitter for the same FIFO; clones
/// are cheap and `Send`, so background threads can hold one.
#[derive(Clone, Default)]
pub struct UiQueue {
    tasks: Arc<Mutex<VecDeque<Task>>>,
}

impl UiQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task. May be called from any thread.
    pub fn submit<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if let Ok(mut tasks) = self.tasks.lock() {
            tasks.push_back(Box::new(task));
        }
    }

    /// Append a task bound to a disposable target.
    ///
    /// If the target is already disposed nothing is enqueued; otherwise
    /// disposal is re-checked when the task runs, and a disposed target
    /// turns the task into a silent no-op. This is the expected teardown
    /// race, not an error.
    pub fn submit_for<D, F>(&self, target: D, task: F)
    where
        D: Disposable + Send + 'static,
        F: FnOnce() + Send + 'static,
    {
        if target.is_disposed() {
            return;
        }
        self.submit(move || {
            if target.is_disposed() {
                return;
            }
            task();
        });
    }

    /// Number of queued tasks.
    pub fn pending(&self) -> usize {
        self.tasks.lock().map(|t| t.len()).unwrap_or(0)
    }

    /// Run queued tasks on the calling (UI) thread until the queue is
    /// empty, in enqueue order. Tasks submitted while draining run too.
    ///
    /// Returns the number of tasks executed.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            // Pop outside the task invocation so tasks may submit more work.
            let task = match self.tasks.lock() {
                Ok(mut tasks) => tasks.pop_front(),
                Err(_) => None,
            };
            match task {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }
}
