// End-to-end tests for the stepped sort engine

use std::thread;
use std::time::{Duration, Instant};

use dsviz::engine::algorithms::{Halt, StepHost};
use dsviz::engine::buffer::{Markers, SortBuffer};
use dsviz::engine::{Algorithm, EngineError, RunController, RunOutcome, RunReport, RunStatus};

const FAST: Duration = Duration::from_micros(1);

fn controller(values: Vec<i32>, delay: Duration) -> RunController {
    RunController::new(values, delay, 100, Some(11))
}

/// Poll the controller like the UI does until the run is reclaimed
fn wait_for_report(controller: &mut RunController) -> RunReport {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        if let Some(report) = controller.reap() {
            return report;
        }
        assert!(Instant::now() < deadline, "sort did not finish in time");
        thread::sleep(Duration::from_millis(1));
    }
}

fn sorted(values: &[i32]) -> Vec<i32> {
    let mut copy = values.to_vec();
    copy.sort_unstable();
    copy
}

#[test]
fn test_every_algorithm_sorts() {
    let input = vec![9, -4, 7, 7, 0, 31, 2, -4, 15, 1, 8, 3];
    for algorithm in Algorithm::ALL {
        let mut controller = controller(Vec::new(), FAST);
        controller
            .start(algorithm, input.clone())
            .expect("start on an idle controller");
        let report = wait_for_report(&mut controller);

        assert!(
            matches!(report.outcome, RunOutcome::Finished),
            "{} ended with {:?}",
            algorithm,
            report.outcome
        );
        assert_eq!(controller.values(), sorted(&input), "{}", algorithm);
        assert_eq!(controller.status(), RunStatus::Idle);

        let snapshot = controller.current_snapshot();
        assert_eq!(snapshot.status, RunStatus::Idle);
        assert!(snapshot.markers.is_clear());
        assert_eq!(snapshot.steps, report.steps);
    }
}

#[test]
fn test_quick_sort_scenario() {
    let mut controller = controller(Vec::new(), FAST);
    controller.start(Algorithm::Quick, vec![5, 3, 1, 4, 2]).unwrap();
    let report = wait_for_report(&mut controller);

    assert_eq!(controller.values(), vec![1, 2, 3, 4, 5]);
    assert!(matches!(report.outcome, RunOutcome::Finished));
    assert_eq!(report.steps, 7);
}

#[test]
fn test_empty_buffer_completes_without_markers() {
    let mut controller = controller(Vec::new(), FAST);
    controller.start(Algorithm::Merge, Vec::new()).unwrap();
    assert!(controller.status().is_active());

    let report = wait_for_report(&mut controller);
    assert!(matches!(report.outcome, RunOutcome::Finished));
    assert_eq!(report.steps, 0);
    assert!(controller.values().is_empty());
    assert!(controller.current_snapshot().markers.is_clear());
}

#[test]
fn test_immediate_stop_keeps_permutation() {
    let mut controller = controller(vec![2, 1], Duration::from_millis(200));
    controller.start_in_place(Algorithm::Bubble).unwrap();

    let asked = Instant::now();
    let report = controller.request_stop().expect("a run was active");
    assert!(asked.elapsed() < Duration::from_millis(150));

    let values = controller.values();
    assert!(values == vec![2, 1] || values == vec![1, 2], "{:?}", values);
    assert_eq!(controller.status(), RunStatus::Idle);
    assert!(matches!(
        report.outcome,
        RunOutcome::Cancelled | RunOutcome::Finished
    ));
}

#[test]
fn test_stop_mid_run_every_algorithm() {
    let input: Vec<i32> = (0..40).rev().collect();
    for algorithm in Algorithm::ALL {
        let mut controller = controller(input.clone(), Duration::from_millis(2));
        controller.start_in_place(algorithm).unwrap();
        thread::sleep(Duration::from_millis(15));

        let report = controller.request_stop().expect("a run was active");
        assert!(matches!(report.outcome, RunOutcome::Cancelled), "{}", algorithm);
        assert_eq!(sorted(&controller.values()), sorted(&input), "{}", algorithm);
        assert!(controller.request_stop().is_none());

        // A fresh run on the partial result still sorts it
        controller.set_step_delay(FAST);
        controller.start_in_place(algorithm).unwrap();
        wait_for_report(&mut controller);
        assert_eq!(controller.values(), sorted(&input), "{}", algorithm);
    }
}

#[test]
fn test_buffer_frozen_after_stop() {
    let input: Vec<i32> = (0..60).rev().collect();
    for algorithm in Algorithm::ALL {
        let mut controller = controller(input.clone(), Duration::from_millis(1));
        controller.start_in_place(algorithm).unwrap();
        thread::sleep(Duration::from_millis(10));
        controller.request_stop().expect("a run was active");

        let snapshot = controller.current_snapshot();
        let values = controller.values();
        assert_eq!(snapshot.values, values, "{}", algorithm);

        // Several step delays later nothing has moved
        thread::sleep(Duration::from_millis(20));
        let later = controller.current_snapshot();
        assert_eq!(*later, *snapshot, "{}", algorithm);
        assert_eq!(later.steps, snapshot.steps, "{}", algorithm);
        assert_eq!(controller.values(), values, "{}", algorithm);
        assert_eq!(controller.status(), RunStatus::Idle);
    }
}

#[test]
fn test_second_start_rejected() {
    let mut controller = controller(vec![3, 2, 1], Duration::from_millis(100));
    controller.start_in_place(Algorithm::Selection).unwrap();

    let err = controller
        .start(Algorithm::Heap, vec![1])
        .expect_err("a run is active");
    assert!(matches!(err, EngineError::AlreadyRunning));
    assert!(err.is_rejection());
    assert_eq!(controller.active_algorithm(), Some(Algorithm::Selection));

    controller.request_stop();
}

#[test]
fn test_buffer_commands_rejected_while_running() {
    let mut controller = controller(vec![4, 3, 2, 1], Duration::from_millis(100));
    controller.start_in_place(Algorithm::Insertion).unwrap();

    assert!(matches!(
        controller.generate_random(5),
        Err(EngineError::MutationWhileRunning)
    ));
    assert!(matches!(
        controller.shuffle(),
        Err(EngineError::MutationWhileRunning)
    ));
    assert!(matches!(
        controller.set_custom("1 2"),
        Err(EngineError::MutationWhileRunning)
    ));

    controller.request_stop();
    controller.set_custom("8 9").unwrap();
    assert_eq!(controller.values(), vec![8, 9]);
}

#[test]
fn test_snapshots_stay_consistent_while_running() {
    let input: Vec<i32> = (0..200).map(|i| (i * 37) % 101).collect();
    let expected = sorted(&input);
    let mut controller = controller(input.clone(), FAST);
    controller.start_in_place(Algorithm::Heap).unwrap();

    let mut seen = 0;
    while controller.status() != RunStatus::Completed {
        let snapshot = controller.current_snapshot();
        if snapshot.status == RunStatus::Idle {
            break;
        }
        assert!(snapshot.is_consistent());
        assert_eq!(snapshot.values.len(), input.len());
        // Heap sort only swaps, so every step is a permutation
        assert_eq!(sorted(&snapshot.values), expected);
        seen += 1;
    }
    assert!(seen > 0);

    wait_for_report(&mut controller);
    assert_eq!(controller.values(), expected);
}

/// A host that never pauses and counts what it sees
struct Counting {
    buffer: SortBuffer,
    steps: usize,
    last: Markers,
}

impl StepHost for Counting {
    fn buffer(&mut self) -> &mut SortBuffer {
        &mut self.buffer
    }

    fn step(&mut self) -> Result<(), Halt> {
        self.steps += 1;
        self.last = self.buffer.markers();
        Ok(())
    }

    fn checkpoint(&mut self) -> Result<(), Halt> {
        Ok(())
    }
}

#[test]
fn test_algorithms_run_on_custom_host() {
    for algorithm in Algorithm::ALL {
        let mut host = Counting {
            buffer: SortBuffer::new(vec![4, 1, 3, 2]),
            steps: 0,
            last: Markers::NONE,
        };
        algorithm.run(&mut host).expect("host never cancels");
        assert_eq!(host.buffer.values(), &[1, 2, 3, 4], "{}", algorithm);
        assert!(host.steps > 0);
        assert!(host.buffer.comparisons() > 0);
        // Markers are left as the algorithm set them; only the worker clears them
        assert!(host.last.within(4));
    }
}
