//! Background execution of split and join jobs.
//!
//! The control surface submits a job and immediately gets back a
//! [`JobHandle`]; the operation runs on a fixed-size worker pool and reports
//! through a per-job progress channel, so the submitting thread stays free
//! to render updates. Within one job all I/O and progress emission is
//! strictly sequential; concurrency exists only between jobs, which share
//! no mutable state.
//!
//! Submission is bounded: once `queue_size + nb_threads` jobs are in
//! flight, `submit_*` blocks until a worker frees a slot.

use std::sync::{Arc, Condvar, Mutex};

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use rayon::ThreadPool;

use crate::error::Result;
use crate::io::join::{join, JoinJob};
use crate::io::progress::{CancelFlag, ProgressEvent};
use crate::io::split::{split, SplitJob};
use crate::util::count_cores;

// Shared pending-job accounting backing wait_idle().
struct RunnerState {
    pending: usize,
}

/// Completed-operation summary delivered through [`JobHandle::wait`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// A split finished; number of parts written.
    Split { parts: u32 },
    /// A join finished; number of bytes written.
    Join { bytes: u64 },
}

/// Live handle on one submitted job.
pub struct JobHandle {
    progress: Receiver<ProgressEvent>,
    outcome: Receiver<Result<JobOutcome>>,
    cancel: CancelFlag,
}

impl JobHandle {
    /// The job's progress stream. Iteration ends when the job finishes;
    /// dropping the handle early does not fail the job.
    pub fn progress(&self) -> &Receiver<ProgressEvent> {
        &self.progress
    }

    /// Requests cooperative cancellation at the next part boundary.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Blocks until the job finishes and returns its outcome.
    pub fn wait(self) -> Result<JobOutcome> {
        self.outcome.recv().expect("job worker disconnected")
    }
}

/// Fixed-size worker pool executing jobs in the background.
pub struct JobRunner {
    pool: Arc<ThreadPool>,
    /// Bounded channel used as a semaphore: tokens represent free in-flight
    /// slots. Submitters take a token, finished workers return it.
    slot_tx: Sender<()>,
    slot_rx: Receiver<()>,
    state: Arc<(Mutex<RunnerState>, Condvar)>,
}

impl JobRunner {
    /// Creates a pool of `nb_threads` workers admitting `queue_size` queued
    /// jobs beyond the running ones. Returns `None` when either count is
    /// zero or the pool cannot start.
    pub fn new(nb_threads: usize, queue_size: usize) -> Option<Self> {
        if nb_threads < 1 || queue_size < 1 {
            return None;
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(nb_threads)
            .build()
            .ok()?;

        let capacity = queue_size + nb_threads;
        let (slot_tx, slot_rx) = bounded(capacity);
        for _ in 0..capacity {
            slot_tx.send(()).ok()?;
        }

        let state = Arc::new((Mutex::new(RunnerState { pending: 0 }), Condvar::new()));

        Some(JobRunner {
            pool: Arc::new(pool),
            slot_tx,
            slot_rx,
            state,
        })
    }

    /// Pool sized to the machine's logical cores.
    pub fn with_default_threads() -> Option<Self> {
        let cores = count_cores();
        JobRunner::new(cores, cores)
    }

    /// Submits a split job; may block when the queue is full.
    pub fn submit_split(&self, job: SplitJob) -> JobHandle {
        self.submit(move |cancel, sink| {
            split(&job, cancel, sink).map(|parts| JobOutcome::Split { parts })
        })
    }

    /// Submits a join job; may block when the queue is full.
    pub fn submit_join(&self, job: JoinJob) -> JobHandle {
        self.submit(move |cancel, sink| {
            join(&job, cancel, sink).map(|bytes| JobOutcome::Join { bytes })
        })
    }

    fn submit<F>(&self, run: F) -> JobHandle
    where
        F: FnOnce(&CancelFlag, &mut Sender<ProgressEvent>) -> Result<JobOutcome> + Send + 'static,
    {
        // Block until an in-flight slot is free.
        self.slot_rx.recv().expect("runner slot channel closed");

        // Count the job as pending before it is spawned so wait_idle cannot
        // observe zero between submit and execution start.
        {
            let (lock, _cvar) = &*self.state;
            lock.lock().unwrap().pending += 1;
        }

        let (progress_tx, progress_rx) = unbounded();
        let (outcome_tx, outcome_rx) = bounded(1);
        let cancel = CancelFlag::new();
        let worker_cancel = cancel.clone();

        let state = Arc::clone(&self.state);
        let slot_tx = self.slot_tx.clone();
        self.pool.spawn(move || {
            let mut sink = progress_tx;
            let result = run(&worker_cancel, &mut sink);
            // Close the progress stream before publishing the outcome so a
            // consumer draining events observes the stream end first.
            drop(sink);
            let _ = outcome_tx.send(result);

            let (lock, cvar) = &*state;
            let mut s = lock.lock().unwrap();
            s.pending -= 1;
            if s.pending == 0 {
                cvar.notify_all();
            }
            // Return the slot token.
            let _ = slot_tx.send(());
        });

        JobHandle {
            progress: progress_rx,
            outcome: outcome_rx,
            cancel,
        }
    }

    /// Blocks until every submitted job has finished. The pool stays usable
    /// and accepts further submissions afterwards.
    pub fn wait_idle(&self) {
        let (lock, cvar) = &*self.state;
        let mut s = lock.lock().unwrap();
        while s.pending > 0 {
            s = cvar.wait(s).unwrap();
        }
    }
}

impl Drop for JobRunner {
    // In-flight jobs finish before the pool is torn down; rayon joins its
    // workers on drop.
    fn drop(&mut self) {
        self.wait_idle();
    }
}
