//! Run controller: owns the buffer and the lifetime of the sort worker
//!
//! While idle the controller holds the buffer and accepts replacement
//! commands. [`RunController::start`] moves the buffer onto a freshly
//! spawned worker thread; the worker hands it back when it exits, and the
//! controller takes it back when it joins the thread, either in
//! [`RunController::request_stop`] or in [`RunController::reap`] once the
//! run has completed by itself.
//!
//! # Status transitions
//!
//! ```text
//! Idle ──start──▶ Running ──request_stop──▶ CancelRequested
//!                    │                            │
//!                    └──────────▶ Completed ◀─────┘
//!                                     │
//!                         reap / request_stop (join)
//!                                     ▼
//!                                   Idle
//! ```
//!
//! The renderer never touches the live buffer; it reads the latest
//! [`Snapshot`] through [`RunController::current_snapshot`].

use super::algorithms::{Algorithm, Halt, StepHost};
use super::buffer::SortBuffer;
use super::errors::EngineError;
use super::pacing::{CancelToken, StepDelay};
use crate::snapshot::{Snapshot, SnapshotPublisher};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, trace, warn};

/// Lifecycle of the current run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RunStatus {
    Idle = 0,
    Running = 1,
    CancelRequested = 2,
    Completed = 3,
}

impl RunStatus {
    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => RunStatus::Running,
            2 => RunStatus::CancelRequested,
            3 => RunStatus::Completed,
            _ => RunStatus::Idle,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RunStatus::Idle => "IDLE",
            RunStatus::Running => "RUNNING",
            RunStatus::CancelRequested => "STOPPING",
            RunStatus::Completed => "DONE",
        }
    }

    /// Whether a worker may still be touching the buffer
    pub fn is_active(self) -> bool {
        self != RunStatus::Idle
    }
}

/// Atomic cell shared by the controller and its worker
#[derive(Debug)]
struct StatusCell(AtomicU8);

impl StatusCell {
    fn new(status: RunStatus) -> Self {
        StatusCell(AtomicU8::new(status as u8))
    }

    fn load(&self) -> RunStatus {
        RunStatus::from_u8(self.0.load(Ordering::Acquire))
    }

    fn store(&self, status: RunStatus) {
        self.0.store(status as u8, Ordering::Release);
    }

    fn transition(&self, from: RunStatus, to: RunStatus) -> bool {
        self.0
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// How a run ended
#[derive(Debug)]
pub enum RunOutcome {
    /// Every step was executed; the buffer is sorted
    Finished,
    /// A stop was requested and honoured
    Cancelled,
    /// The run was aborted by a defect
    Faulted(EngineError),
}

/// Summary of a finished run, handed back when the worker is reclaimed
#[derive(Debug)]
pub struct RunReport {
    pub algorithm: Algorithm,
    pub outcome: RunOutcome,
    pub steps: u64,
    pub comparisons: u64,
    pub elapsed: Duration,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match &self.outcome {
            RunOutcome::Finished => "finished".to_string(),
            RunOutcome::Cancelled => "stopped".to_string(),
            RunOutcome::Faulted(err) => format!("failed ({})", err),
        };
        write!(
            f,
            "{} {} after {} steps, {} comparisons ({:.1}s)",
            self.algorithm,
            what,
            self.steps,
            self.comparisons,
            self.elapsed.as_secs_f64()
        )
    }
}

/// State shared by the controller and one worker
#[derive(Debug)]
struct RunShared {
    algorithm: Algorithm,
    status: StatusCell,
    cancel: CancelToken,
    delay: Arc<StepDelay>,
    publisher: Arc<SnapshotPublisher>,
}

/// What the worker returns when its thread exits
struct WorkerExit {
    values: Vec<i32>,
    outcome: Result<(), Halt>,
    steps: u64,
    comparisons: u64,
}

struct Worker {
    shared: Arc<RunShared>,
    handle: JoinHandle<WorkerExit>,
    started: Instant,
}

/// Largest buffer `generate_random` will build
pub const MAX_VALUE_COUNT: usize = 10_000;

/// Owns the buffer and runs at most one sort over it at a time
pub struct RunController {
    /// The buffer; empty and meaningless while a worker holds it
    buffer: Vec<i32>,
    worker: Option<Worker>,
    publisher: Arc<SnapshotPublisher>,
    delay: Arc<StepDelay>,
    rng: StdRng,
    max_value: i32,
}

impl RunController {
    /// Create an idle controller over `values`.
    ///
    /// `max_value` bounds generated values (`1..=max_value`); `seed` makes
    /// generation and shuffling reproducible.
    pub fn new(values: Vec<i32>, delay: Duration, max_value: i32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        RunController {
            publisher: Arc::new(SnapshotPublisher::new(Snapshot::idle(values.clone()))),
            buffer: values,
            worker: None,
            delay: Arc::new(StepDelay::new(delay)),
            rng,
            max_value: max_value.max(1),
        }
    }

    /// Current status; `Idle` whenever no worker is attached
    pub fn status(&self) -> RunStatus {
        match &self.worker {
            Some(worker) => worker.shared.status.load(),
            None => RunStatus::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.worker.is_none()
    }

    /// The running (or just completed) algorithm, if any
    pub fn active_algorithm(&self) -> Option<Algorithm> {
        self.worker.as_ref().map(|w| w.shared.algorithm)
    }

    /// Latest published snapshot. Never waits on the worker.
    pub fn current_snapshot(&self) -> Arc<Snapshot> {
        self.publisher.latest()
    }

    pub fn step_delay(&self) -> Duration {
        self.delay.get()
    }

    /// Change the pause between steps; picked up by the next step
    pub fn set_step_delay(&self, delay: Duration) {
        self.delay.set(delay);
        debug!(delay_us = self.delay.get().as_micros() as u64, "step delay changed");
    }

    /// Replace the buffer with `values` and sort it with `algorithm`
    pub fn start(&mut self, algorithm: Algorithm, values: Vec<i32>) -> Result<(), EngineError> {
        self.ensure_can_start(algorithm)?;
        self.buffer = values;
        self.launch(algorithm)
    }

    /// Sort the buffer the controller already holds
    pub fn start_in_place(&mut self, algorithm: Algorithm) -> Result<(), EngineError> {
        self.ensure_can_start(algorithm)?;
        self.launch(algorithm)
    }

    fn ensure_can_start(&mut self, algorithm: Algorithm) -> Result<(), EngineError> {
        self.reap();
        if self.worker.is_some() {
            warn!(%algorithm, "start rejected: a sort is already running");
            return Err(EngineError::AlreadyRunning);
        }
        Ok(())
    }

    fn launch(&mut self, algorithm: Algorithm) -> Result<(), EngineError> {
        let values = std::mem::take(&mut self.buffer);
        let len = values.len();

        let shared = Arc::new(RunShared {
            algorithm,
            status: StatusCell::new(RunStatus::Running),
            cancel: CancelToken::new(),
            delay: Arc::clone(&self.delay),
            publisher: Arc::clone(&self.publisher),
        });

        self.publisher.publish(Snapshot::capture(
            &SortBuffer::new(values.clone()),
            RunStatus::Running,
            algorithm,
            0,
        ));

        let worker_shared = Arc::clone(&shared);
        let spawned = thread::Builder::new()
            .name(format!("sort-{}", algorithm.ordinal()))
            .spawn(move || run_worker(values, worker_shared));

        match spawned {
            Ok(handle) => {
                info!(%algorithm, len, "sort started");
                self.worker = Some(Worker {
                    shared,
                    handle,
                    started: Instant::now(),
                });
                Ok(())
            }
            Err(err) => {
                // The closure (and the buffer inside it) is gone; recover the
                // values from the snapshot published just above
                self.buffer = self.publisher.latest().values.clone();
                self.publisher.publish(Snapshot::idle(self.buffer.clone()));
                error!(%algorithm, %err, "failed to spawn sort worker");
                Err(EngineError::WorkerSpawn(err))
            }
        }
    }

    /// Stop the active run and wait for its worker to exit.
    ///
    /// Returns `None` when nothing was running. When this returns the
    /// worker thread is gone and the buffer is back with the controller.
    pub fn request_stop(&mut self) -> Option<RunReport> {
        let worker = self.worker.take()?;
        if worker
            .shared
            .status
            .transition(RunStatus::Running, RunStatus::CancelRequested)
        {
            info!(algorithm = %worker.shared.algorithm, "stop requested");
        }
        worker.shared.cancel.cancel();
        Some(self.reclaim(worker))
    }

    /// Reclaim a worker whose run has completed on its own.
    ///
    /// Call once per frame; returns the report exactly once per run.
    pub fn reap(&mut self) -> Option<RunReport> {
        let finished = self.worker.as_ref().is_some_and(|w| {
            w.shared.status.load() == RunStatus::Completed || w.handle.is_finished()
        });
        if !finished {
            return None;
        }
        let worker = self.worker.take()?;
        Some(self.reclaim(worker))
    }

    fn reclaim(&mut self, worker: Worker) -> RunReport {
        let Worker {
            shared,
            handle,
            started,
        } = worker;
        let algorithm = shared.algorithm;

        let report = match handle.join() {
            Ok(exit) => {
                self.buffer = exit.values;
                let outcome = match exit.outcome {
                    Ok(()) => RunOutcome::Finished,
                    Err(Halt::Cancelled) => RunOutcome::Cancelled,
                    Err(Halt::Fault(err)) => RunOutcome::Faulted(err),
                };
                RunReport {
                    algorithm,
                    outcome,
                    steps: exit.steps,
                    comparisons: exit.comparisons,
                    elapsed: started.elapsed(),
                }
            }
            Err(_) => {
                let last = self.publisher.latest();
                self.buffer = last.values.clone();
                error!(%algorithm, "sort worker panicked");
                RunReport {
                    algorithm,
                    outcome: RunOutcome::Faulted(EngineError::WorkerPanicked),
                    steps: last.steps,
                    comparisons: last.comparisons,
                    elapsed: started.elapsed(),
                }
            }
        };

        shared.status.store(RunStatus::Idle);
        self.publisher.publish(Snapshot {
            algorithm: Some(algorithm),
            steps: report.steps,
            comparisons: report.comparisons,
            ..Snapshot::idle(self.buffer.clone())
        });
        debug!(%report, "worker reclaimed");
        report
    }

    fn ensure_idle(&mut self, command: &str) -> Result<(), EngineError> {
        self.reap();
        if self.worker.is_some() {
            warn!(command, "buffer change rejected while sorting");
            return Err(EngineError::MutationWhileRunning);
        }
        Ok(())
    }

    fn replace_buffer(&mut self, values: Vec<i32>) {
        self.buffer = values;
        self.publisher.publish(Snapshot::idle(self.buffer.clone()));
    }

    /// Replace the buffer with `count` random values in `1..=max_value`
    pub fn generate_random(&mut self, count: usize) -> Result<(), EngineError> {
        self.ensure_idle("generate")?;
        if count > MAX_VALUE_COUNT {
            warn!(count, "generate rejected: too many values");
            return Err(EngineError::TooManyValues {
                count,
                max: MAX_VALUE_COUNT,
            });
        }
        let max = self.max_value;
        let values = (0..count)
            .map(|_| self.rng.random_range(1..=max))
            .collect();
        self.replace_buffer(values);
        debug!(count, max, "generated random data");
        Ok(())
    }

    /// Randomly permute the buffer
    pub fn shuffle(&mut self) -> Result<(), EngineError> {
        self.ensure_idle("shuffle")?;
        let mut values = std::mem::take(&mut self.buffer);
        values.shuffle(&mut self.rng);
        self.replace_buffer(values);
        debug!(len = self.buffer.len(), "shuffled data");
        Ok(())
    }

    /// Replace the buffer with whitespace-separated integers from `text`
    pub fn set_custom(&mut self, text: &str) -> Result<(), EngineError> {
        self.ensure_idle("custom")?;
        let values = parse_values(text)?;
        debug!(len = values.len(), "loaded custom data");
        self.replace_buffer(values);
        Ok(())
    }

    /// The buffer as of the last time the controller held it
    pub fn values(&self) -> Vec<i32> {
        if self.worker.is_none() {
            self.buffer.clone()
        } else {
            self.publisher.latest().values.clone()
        }
    }
}

impl Drop for RunController {
    fn drop(&mut self) {
        let _ = self.request_stop();
    }
}

/// Parse whitespace-separated integers
pub fn parse_values(text: &str) -> Result<Vec<i32>, EngineError> {
    text.split_whitespace()
        .map(|token| {
            token.parse::<i32>().map_err(|_| EngineError::InvalidValue {
                token: token.to_string(),
            })
        })
        .collect()
}

/// Step host for the worker thread: publish, pace, poll
struct WorkerHost {
    buffer: SortBuffer,
    shared: Arc<RunShared>,
    steps: u64,
}

impl WorkerHost {
    fn publish(&self) {
        self.shared.publisher.publish(Snapshot::capture(
            &self.buffer,
            self.shared.status.load(),
            self.shared.algorithm,
            self.steps,
        ));
    }
}

impl StepHost for WorkerHost {
    fn buffer(&mut self) -> &mut SortBuffer {
        &mut self.buffer
    }

    fn step(&mut self) -> Result<(), Halt> {
        self.steps += 1;
        self.publish();
        trace!(step = self.steps, markers = ?self.buffer.markers(), "step");

        self.checkpoint()?;
        if self.shared.cancel.wait(self.shared.delay.get()) {
            return Err(Halt::Cancelled);
        }
        self.checkpoint()
    }

    fn checkpoint(&mut self) -> Result<(), Halt> {
        if self.shared.cancel.is_cancelled() {
            Err(Halt::Cancelled)
        } else {
            Ok(())
        }
    }
}

fn run_worker(values: Vec<i32>, shared: Arc<RunShared>) -> WorkerExit {
    let algorithm = shared.algorithm;
    let mut host = WorkerHost {
        buffer: SortBuffer::new(values),
        shared,
        steps: 0,
    };

    let outcome = algorithm.run(&mut host);
    host.buffer.clear_markers();

    let status = &host.shared.status;
    if !status.transition(RunStatus::Running, RunStatus::Completed) {
        status.transition(RunStatus::CancelRequested, RunStatus::Completed);
    }
    host.publish();

    match &outcome {
        Ok(()) => info!(%algorithm, steps = host.steps, "sort completed"),
        Err(Halt::Cancelled) => info!(%algorithm, steps = host.steps, "sort cancelled"),
        Err(Halt::Fault(err)) => error!(%algorithm, %err, "sort aborted"),
    }

    WorkerExit {
        comparisons: host.buffer.comparisons(),
        steps: host.steps,
        values: host.buffer.into_values(),
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(values: Vec<i32>, delay: Duration) -> RunController {
        crate::logging::init_test_tracing();
        RunController::new(values, delay, 100, Some(7))
    }

    fn wait_for_completion(ctl: &mut RunController) -> RunReport {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(report) = ctl.reap() {
                return report;
            }
            assert!(Instant::now() < deadline, "run did not complete");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_status_round_trip() {
        let cell = StatusCell::new(RunStatus::Running);
        assert!(cell.transition(RunStatus::Running, RunStatus::CancelRequested));
        assert!(!cell.transition(RunStatus::Running, RunStatus::Completed));
        assert_eq!(cell.load(), RunStatus::CancelRequested);
    }

    #[test]
    fn test_run_completes_and_reaps() {
        let mut ctl = controller(vec![3, 1, 2], Duration::from_micros(1));
        ctl.start_in_place(Algorithm::Bubble).unwrap();
        assert!(ctl.status().is_active());

        let report = wait_for_completion(&mut ctl);
        assert!(matches!(report.outcome, RunOutcome::Finished));
        assert_eq!(report.steps, 3);
        assert_eq!(ctl.status(), RunStatus::Idle);
        assert_eq!(ctl.values(), vec![1, 2, 3]);

        let snapshot = ctl.current_snapshot();
        assert_eq!(snapshot.status, RunStatus::Idle);
        assert!(snapshot.markers.is_clear());
        assert_eq!(snapshot.values, vec![1, 2, 3]);

        // Reported only once
        assert!(ctl.reap().is_none());
    }

    #[test]
    fn test_start_while_running_rejected() {
        let mut ctl = controller(vec![5, 4, 3, 2, 1], Duration::from_secs(5));
        ctl.start_in_place(Algorithm::Selection).unwrap();

        let err = ctl.start(Algorithm::Quick, vec![1]).unwrap_err();
        assert!(matches!(err, EngineError::AlreadyRunning));
        assert_eq!(ctl.active_algorithm(), Some(Algorithm::Selection));

        let report = ctl.request_stop().unwrap();
        assert!(matches!(report.outcome, RunOutcome::Cancelled));
        assert_eq!(report.algorithm, Algorithm::Selection);
    }

    #[test]
    fn test_stop_interrupts_long_delay() {
        let mut ctl = controller(vec![9, 8, 7, 6], Duration::from_secs(60));
        ctl.start_in_place(Algorithm::Insertion).unwrap();
        thread::sleep(Duration::from_millis(20));

        let started = Instant::now();
        let report = ctl.request_stop().unwrap();
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(matches!(report.outcome, RunOutcome::Cancelled));
        assert_eq!(ctl.status(), RunStatus::Idle);

        let mut values = ctl.values();
        values.sort();
        assert_eq!(values, vec![6, 7, 8, 9]);
    }

    #[test]
    fn test_stop_when_idle_is_noop() {
        let mut ctl = controller(vec![1], Duration::from_millis(1));
        assert!(ctl.request_stop().is_none());
        assert_eq!(ctl.status(), RunStatus::Idle);
    }

    #[test]
    fn test_mutation_rejected_while_running() {
        let mut ctl = controller(vec![4, 3, 2, 1], Duration::from_secs(5));
        ctl.start_in_place(Algorithm::Heap).unwrap();

        assert!(matches!(
            ctl.generate_random(10),
            Err(EngineError::MutationWhileRunning)
        ));
        assert!(matches!(
            ctl.shuffle(),
            Err(EngineError::MutationWhileRunning)
        ));
        assert!(matches!(
            ctl.set_custom("1 2 3"),
            Err(EngineError::MutationWhileRunning)
        ));

        ctl.request_stop();
        assert_eq!(ctl.values().len(), 4);
    }

    #[test]
    fn test_buffer_commands_when_idle() {
        let mut ctl = controller(Vec::new(), Duration::from_millis(1));

        ctl.generate_random(25).unwrap();
        let values = ctl.values();
        assert_eq!(values.len(), 25);
        assert!(values.iter().all(|v| (1..=100).contains(v)));
        assert_eq!(ctl.current_snapshot().values, values);

        ctl.shuffle().unwrap();
        let mut shuffled = ctl.values();
        shuffled.sort();
        let mut original = values;
        original.sort();
        assert_eq!(shuffled, original);

        ctl.set_custom("  10 -2\t7 ").unwrap();
        assert_eq!(ctl.values(), vec![10, -2, 7]);

        let err = ctl.set_custom("1 two 3").unwrap_err();
        assert!(matches!(err, EngineError::InvalidValue { ref token } if token == "two"));
        assert_eq!(ctl.values(), vec![10, -2, 7]);

        ctl.set_custom("").unwrap();
        assert!(ctl.values().is_empty());
    }

    #[test]
    fn test_generate_rejects_oversized_count() {
        let mut ctl = controller(vec![1, 2, 3], Duration::from_millis(1));
        let err = ctl.generate_random(usize::MAX / 2).unwrap_err();
        assert!(matches!(
            err,
            EngineError::TooManyValues { max: MAX_VALUE_COUNT, .. }
        ));
        assert_eq!(ctl.values(), vec![1, 2, 3]);

        ctl.generate_random(MAX_VALUE_COUNT).unwrap();
        assert_eq!(ctl.values().len(), MAX_VALUE_COUNT);
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let mut a = controller(Vec::new(), Duration::from_millis(1));
        let mut b = controller(Vec::new(), Duration::from_millis(1));
        a.generate_random(30).unwrap();
        b.generate_random(30).unwrap();
        assert_eq!(a.values(), b.values());
    }

    #[test]
    fn test_drop_joins_worker() {
        let mut ctl = controller(vec![3, 2, 1], Duration::from_secs(60));
        ctl.start_in_place(Algorithm::Bubble).unwrap();
        let started = Instant::now();
        drop(ctl);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_report_display() {
        let report = RunReport {
            algorithm: Algorithm::Quick,
            outcome: RunOutcome::Cancelled,
            steps: 12,
            comparisons: 12,
            elapsed: Duration::from_millis(1500),
        };
        assert_eq!(
            report.to_string(),
            "Quick Sort stopped after 12 steps, 12 comparisons (1.5s)"
        );
    }
}
