//! Tests for the liveness state machine, driven on a paused clock.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use dislogger_logging::{Formatter, Level, MemoryHandler};

use super::*;

struct FakeProbe {
    up: AtomicBool,
    calls: AtomicUsize,
}

impl FakeProbe {
    fn new(up: bool) -> Arc<Self> {
        Arc::new(Self {
            up: AtomicBool::new(up),
            calls: AtomicUsize::new(0),
        })
    }

    fn set(&self, up: bool) {
        self.up.store(up, Ordering::SeqCst);
    }
}

#[async_trait]
impl PresenceProbe for FakeProbe {
    async fn probe(&self, _address: &str, _timeout: Duration) -> Result<bool, MonitorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.up.load(Ordering::SeqCst))
    }
}

struct BrokenProbe;

#[async_trait]
impl PresenceProbe for BrokenProbe {
    async fn probe(&self, _address: &str, _timeout: Duration) -> Result<bool, MonitorError> {
        Err(MonitorError::Probe("no such device".to_string()))
    }
}

struct HangingProbe;

#[async_trait]
impl PresenceProbe for HangingProbe {
    async fn probe(&self, _address: &str, _timeout: Duration) -> Result<bool, MonitorError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(true)
    }
}

fn capture() -> (Logger, Arc<MemoryHandler>) {
    let memory = Arc::new(MemoryHandler::new(
        "Memory",
        Level::Debug,
        Arc::new(Formatter::new("Main", "%(levelname)s %(message)s")),
    ));
    let logger = Logger::new("main", Level::Debug).with_handler(memory.clone());
    (logger, memory)
}

/// One loop iteration followed by the regular pause.
async fn tick(monitor: &mut LivenessMonitor, logger: &Logger) {
    monitor.iterate(logger).await;
    tokio::time::advance(PROBE_INTERVAL).await;
}

#[tokio::test(start_paused = true)]
async fn test_failed_probes_within_grace_are_silent() {
    let probe = FakeProbe::new(false);
    let (logger, memory) = capture();
    let mut monitor = LivenessMonitor::new("10.0.0.5", probe.clone());

    for _ in 0..3 {
        tick(&mut monitor, &logger).await;
    }
    assert!(memory.is_empty());
    assert_eq!(probe.calls.load(Ordering::SeqCst), 3);

    probe.set(true);
    monitor.iterate(&logger).await;

    assert_eq!(memory.levels(), vec![Level::Info]);
    let message = &memory.records()[0].message;
    assert!(message.contains("10.0.0.5"));
    assert!(message.contains("CONNECTED"));
}

#[tokio::test(start_paused = true)]
async fn test_silent_until_grace_window_elapses() {
    let (logger, memory) = capture();
    let mut monitor = LivenessMonitor::new("10.0.0.5", FakeProbe::new(false));

    // t = 0, 2, ..., 300: still inside the window.
    for _ in 0..=150 {
        tick(&mut monitor, &logger).await;
    }
    assert!(memory.is_empty());

    monitor.iterate(&logger).await;
    assert_eq!(memory.levels(), vec![Level::Error]);
    assert!(monitor.outage_alerted());
}

#[tokio::test(start_paused = true)]
async fn test_outage_escalates_to_error_once() {
    let (logger, memory) = capture();
    let mut monitor = LivenessMonitor::new("10.0.0.5", FakeProbe::new(false));

    for _ in 0..200 {
        tick(&mut monitor, &logger).await;
    }

    let levels = memory.levels();
    assert!(levels.len() > 2);
    assert_eq!(levels[0], Level::Error);
    assert!(levels[1..].iter().all(|l| *l == Level::Warning));
    assert!(memory.records()[0].message.contains("gave no sign of life since"));
}

#[tokio::test(start_paused = true)]
async fn test_recovery_ends_outage() {
    let probe = FakeProbe::new(false);
    let (logger, memory) = capture();
    let mut monitor = LivenessMonitor::new("10.0.0.5", probe.clone());

    for _ in 0..160 {
        tick(&mut monitor, &logger).await;
    }
    let before = monitor.last_seen_at();
    let outage_logs = memory.len();
    assert!(monitor.outage_alerted());

    probe.set(true);
    tick(&mut monitor, &logger).await;
    tick(&mut monitor, &logger).await;

    assert!(!monitor.outage_alerted());
    assert!(monitor.last_seen_at() >= before);
    let after: Vec<_> = memory.records().into_iter().skip(outage_logs).collect();
    assert!(!after.is_empty());
    assert_eq!(after[0].level, Level::Info);
    assert!(after[0].message.contains("10.0.0.5 is CONNECTED"));

    // A new outage starts over with an error.
    probe.set(false);
    memory.clear();
    for _ in 0..160 {
        tick(&mut monitor, &logger).await;
    }
    assert_eq!(memory.levels().first(), Some(&Level::Error));
    assert_eq!(
        memory.levels().iter().filter(|l| **l == Level::Error).count(),
        1
    );
}

#[tokio::test(start_paused = true)]
async fn test_success_suppressed_by_rate_limit_is_reported_later() {
    let probe = FakeProbe::new(true);
    let (logger, memory) = capture();
    let mut monitor = LivenessMonitor::new("10.0.0.5", probe.clone());

    // t = 0: reported.
    tick(&mut monitor, &logger).await;
    assert_eq!(memory.len(), 1);

    // t = 2: success inside the rate window, held back.
    tick(&mut monitor, &logger).await;
    assert_eq!(memory.len(), 1);

    // t = 4: probe fails but the held back success goes out.
    probe.set(false);
    tick(&mut monitor, &logger).await;
    assert_eq!(memory.levels(), vec![Level::Info, Level::Info]);

    // t = 6, 8: nothing new to say while stale.
    tick(&mut monitor, &logger).await;
    tick(&mut monitor, &logger).await;
    assert_eq!(memory.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_log_frequency_is_bounded() {
    let probe = FakeProbe::new(true);
    let (logger, memory) = capture();
    let mut monitor = LivenessMonitor::new("10.0.0.5", probe.clone());

    let started = Instant::now();
    for i in 0..500 {
        // Flapping, with one outage longer than the grace window.
        probe.set(i % 2 == 0 && !(100..260).contains(&i));
        monitor.iterate(&logger).await;
        if i < 499 {
            tokio::time::advance(PROBE_INTERVAL).await;
        }
    }
    let elapsed = Instant::now().duration_since(started);

    let bound = (elapsed.as_secs_f64() / LOG_INTERVAL.as_secs_f64()).ceil() as usize + 1;
    assert!(memory.len() <= bound, "{} logs > bound {}", memory.len(), bound);
    assert!(!memory.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_probe_error_counts_as_failure() {
    let (logger, memory) = capture();
    let mut monitor = LivenessMonitor::new("10.0.0.5", Arc::new(BrokenProbe));

    for _ in 0..152 {
        tick(&mut monitor, &logger).await;
    }
    assert_eq!(memory.levels().first(), Some(&Level::Error));
}

#[tokio::test(start_paused = true)]
async fn test_hanging_probe_is_bounded_by_timeout() {
    let (logger, memory) = capture();
    let mut monitor = LivenessMonitor::new("10.0.0.5", Arc::new(HangingProbe));

    let started = Instant::now();
    monitor.iterate(&logger).await;

    assert!(Instant::now().duration_since(started) <= PROBE_TIMEOUT + Duration::from_millis(10));
    assert!(memory.is_empty());
}

#[test]
fn test_from_config_trims_address() {
    let config = LivenessConfig {
        ip: " 192.168.1.20 ".to_string(),
    };
    let monitor = LivenessMonitor::from_config(&config, FakeProbe::new(true)).unwrap();
    assert_eq!(monitor.address(), "192.168.1.20");
    assert_eq!(monitor.kind(), "liveness");
    assert_eq!(monitor.interval(), PROBE_INTERVAL);

    let blank = LivenessConfig { ip: String::new() };
    assert!(LivenessMonitor::from_config(&blank, FakeProbe::new(true)).is_err());
}

#[tokio::test]
async fn test_arping_probe_missing_program_is_an_error() {
    let probe = ArpingProbe::with_program("/nonexistent/dislogger-arping");
    let result = probe.probe("127.0.0.1", PROBE_TIMEOUT).await;
    assert!(matches!(result, Err(MonitorError::Probe(_))));
}
