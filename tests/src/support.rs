//! Fixtures shared by the integration scenarios.

use query_bridge::{BridgeConfig, CorrelationRegistry, QueryBridge, ResponseListener};
use shared_bus::{EventFilter, EventPublisher, EventTopic, InMemoryEventBus, SocialEvent, Subscription};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::fmt::MakeWriter;

/// Response window used throughout the suite.
pub const QUERY_TIMEOUT: Duration = Duration::from_millis(5000);

/// A bus with a running response listener and a bridge over it.
pub struct Bridged {
    pub bus: Arc<InMemoryEventBus>,
    pub registry: Arc<CorrelationRegistry>,
    pub bridge: QueryBridge,
}

impl Bridged {
    pub fn new() -> Self {
        let bus = Arc::new(InMemoryEventBus::new());
        let registry = Arc::new(CorrelationRegistry::new());
        ResponseListener::new(bus.as_ref(), Arc::clone(&registry)).spawn();
        let bridge = QueryBridge::new(
            Arc::clone(&registry),
            bus.clone(),
            &BridgeConfig::with_timeout(QUERY_TIMEOUT),
        );
        Self {
            bus,
            registry,
            bridge,
        }
    }

    /// Answer queries on `topic` after `delay`.
    ///
    /// `answer` may return several responses; they are published in order.
    pub fn respond_after<F>(&self, topic: EventTopic, delay: Duration, answer: F)
    where
        F: Fn(SocialEvent) -> Vec<SocialEvent> + Send + Sync + 'static,
    {
        let mut sub = self.bus.subscribe(EventFilter::topics(vec![topic]));
        let bus = Arc::clone(&self.bus);
        let answer = Arc::new(answer);
        tokio::spawn(async move {
            while let Some(event) = sub.recv().await {
                let bus = Arc::clone(&bus);
                let answer = Arc::clone(&answer);
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    for response in answer(event) {
                        bus.publish(response).await;
                    }
                });
            }
        });
    }

    /// Subscribe to `topic` and never answer.
    pub fn silent(&self, topic: EventTopic) -> Subscription {
        self.bus.subscribe(EventFilter::topics(vec![topic]))
    }
}

impl Default for Bridged {
    fn default() -> Self {
        Self::new()
    }
}

/// Log output collected in memory.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        let buffer = self.0.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Lines logged at `level` (e.g. `"WARN"`).
    pub fn lines_at(&self, level: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(level))
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Capture warnings and errors on this thread until the guard drops.
///
/// Only reliable on a current-thread runtime, where spawned tasks run on
/// the test's thread.
pub fn capture_warnings() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}
