use thiserror::Error;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

type Job = Box<dyn FnOnce() + Send + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("main queue is closed")]
pub struct QueueClosed;

/// The designated execution context for completions.
///
/// Jobs queued from any thread run on whichever thread owns the queue and
/// drains it, in the order they were queued.
pub struct MainQueue {
    sender: UnboundedSender<Job>,
    receiver: UnboundedReceiver<Job>,
}

/// Cloneable sending side of a `MainQueue`.
#[derive(Clone)]
pub struct MainHandle {
    sender: UnboundedSender<Job>,
}

impl MainQueue {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded_channel();
        Self { sender, receiver }
    }

    pub fn handle(&self) -> MainHandle {
        MainHandle {
            sender: self.sender.clone(),
        }
    }

    /// Runs every job already queued, without waiting. Returns how many ran.
    pub fn drain(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.receiver.try_recv() {
            job();
            ran += 1;
        }
        ran
    }

    /// Blocks until the next job arrives and runs it.
    ///
    /// Must be called from a plain thread, not from inside the async runtime.
    pub fn run_next(&mut self) {
        if let Some(job) = self.receiver.blocking_recv() {
            job();
        }
    }

    /// Runs jobs as they arrive until `done` reports true.
    pub fn run_until(&mut self, mut done: impl FnMut() -> bool) {
        while !done() {
            self.run_next();
        }
    }
}

impl Default for MainQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl MainHandle {
    pub fn queue(&self, job: impl FnOnce() + Send + 'static) -> Result<(), QueueClosed> {
        self.sender.send(Box::new(job)).map_err(|_| QueueClosed)
    }
}
