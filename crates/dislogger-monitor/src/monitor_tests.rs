//! Lifecycle tests for the monitor runner.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use dislogger_logging::{Formatter, Level, MemoryHandler};

use super::*;

#[derive(Default)]
struct Probe {
    iterations: AtomicUsize,
    busy: AtomicBool,
}

struct CountingLoop {
    probe: Arc<Probe>,
    work: Duration,
    interval: Duration,
}

#[async_trait]
impl MonitorLoop for CountingLoop {
    fn kind(&self) -> &'static str {
        "counting"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    async fn iterate(&mut self, _logger: &Logger) {
        self.probe.busy.store(true, Ordering::SeqCst);
        tokio::time::sleep(self.work).await;
        self.probe.iterations.fetch_add(1, Ordering::SeqCst);
        self.probe.busy.store(false, Ordering::SeqCst);
    }
}

fn monitor(work: Duration, interval: Duration) -> (Monitor, Arc<Probe>, Arc<MemoryHandler>) {
    let memory = Arc::new(MemoryHandler::new(
        "Memory",
        Level::Debug,
        Arc::new(Formatter::new("Main", "%(message)s")),
    ));
    let logger = Arc::new(Logger::new("main", Level::Info).with_handler(memory.clone()));
    let probe = Arc::new(Probe::default());
    let worker = CountingLoop {
        probe: Arc::clone(&probe),
        work,
        interval,
    };
    (Monitor::new("gateway", logger, Box::new(worker)), probe, memory)
}

#[tokio::test(start_paused = true)]
async fn test_stop_joins_the_loop() {
    let (mut monitor, probe, _) = monitor(Duration::from_millis(500), Duration::from_secs(2));

    monitor.start().unwrap();
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(probe.iterations.load(Ordering::SeqCst) >= 2);

    monitor.stop().await.unwrap();
    let after_stop = probe.iterations.load(Ordering::SeqCst);
    assert!(!probe.busy.load(Ordering::SeqCst));

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(probe.iterations.load(Ordering::SeqCst), after_stop);
}

#[tokio::test(start_paused = true)]
async fn test_is_monitoring_until_stop_returns() {
    let (mut monitor, _, _) = monitor(Duration::ZERO, Duration::from_secs(2));
    assert!(!monitor.is_monitoring());
    assert_eq!(monitor.state(), RunState::Idle);

    monitor.start().unwrap();
    assert!(monitor.is_monitoring());
    assert_eq!(monitor.state(), RunState::Running);

    monitor.stop().await.unwrap();
    assert!(!monitor.is_monitoring());
    assert_eq!(monitor.state(), RunState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_stop_does_not_wait_for_full_interval() {
    let (mut monitor, _, _) = monitor(Duration::ZERO, Duration::from_secs(600));
    monitor.start().unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;

    let started = tokio::time::Instant::now();
    monitor.stop().await.unwrap();
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn test_start_twice_is_rejected() {
    let (mut monitor, _, _) = monitor(Duration::ZERO, Duration::from_secs(2));
    monitor.start().unwrap();
    assert!(matches!(monitor.start(), Err(MonitorError::AlreadyStarted(ref n)) if n == "gateway"));
    monitor.stop().await.unwrap();
}

#[tokio::test]
async fn test_stop_when_idle_is_rejected() {
    let (mut monitor, _, _) = monitor(Duration::ZERO, Duration::from_secs(2));
    assert!(matches!(monitor.stop().await, Err(MonitorError::NotRunning(_))));
}

#[tokio::test]
async fn test_stopped_monitor_cannot_restart() {
    let (mut monitor, _, _) = monitor(Duration::ZERO, Duration::from_secs(2));
    monitor.start().unwrap();
    monitor.stop().await.unwrap();

    assert!(matches!(monitor.start(), Err(MonitorError::AlreadyStarted(_))));
    assert!(!monitor.is_monitoring());
}

#[test]
fn test_start_outside_runtime() {
    let (mut monitor, _, memory) = monitor(Duration::ZERO, Duration::from_secs(2));
    assert!(matches!(monitor.start(), Err(MonitorError::NoRuntime(_))));
    assert!(memory.is_empty());
    assert!(!monitor.is_monitoring());
}

#[tokio::test(start_paused = true)]
async fn test_lifecycle_is_logged() {
    let (mut monitor, _, memory) = monitor(Duration::ZERO, Duration::from_secs(2));
    monitor.start().unwrap();
    tokio::time::sleep(Duration::from_secs(3)).await;
    monitor.stop().await.unwrap();

    let records = memory.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].message, "Started monitoring.");
    assert_eq!(records[1].message, "Stopped monitoring.");
    assert!(records.iter().all(|r| r.level == Level::Info && r.logger == "main"));
}

#[test]
fn test_run_state_display() {
    assert_eq!(RunState::Idle.to_string(), "idle");
    assert_eq!(RunState::Stopping.to_string(), "stopping");
}
