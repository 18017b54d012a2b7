//! Core event types and async event sources for camo.
//!
//! Everything that can wake the runtime loop is an [`Event`] pushed into a
//! single bounded channel. Producers (the terminal input task, the signal
//! source) never touch editor state; the loop is the only consumer and
//! handles events strictly one at a time.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;
use tracing::{info, trace, warn};

/// Capacity of the runtime event channel. Producers use awaiting sends, so a
/// full channel applies backpressure instead of dropping keys.
pub const EVENT_CHANNEL_CAP: usize = 1024;

// Relaxed atomic counters; logged once at shutdown.
pub static CHANNEL_SEND_FAILURES: AtomicU64 = AtomicU64::new(0);
pub static KEYPRESS_TOTAL: AtomicU64 = AtomicU64::new(0);

/// Point-in-time read of the event counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventCounters {
    pub keypresses: u64,
    pub send_failures: u64,
}

impl EventCounters {
    pub fn snapshot() -> Self {
        Self {
            keypresses: KEYPRESS_TOTAL.load(Ordering::Relaxed),
            send_failures: CHANNEL_SEND_FAILURES.load(Ordering::Relaxed),
        }
    }
}

/// Top-level event enum consumed by the runtime loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Input(InputEvent),
    /// External termination request (signal). Handled like Quit: no save.
    Shutdown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    /// Terminal resize (columns, rows).
    Resize(u16, u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub const fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            mods: KeyModifiers::empty(),
        }
    }

    pub const fn ctrl(c: char) -> Self {
        Self {
            code: KeyCode::Char(c),
            mods: KeyModifiers::CTRL,
        }
    }
}

/// Logical keys surfaced by the input layer. Keys the editor has no use for
/// are dropped before they reach the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Tab,
    Up,
    Down,
    Left,
    Right,
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.code, self.mods)
    }
}

// -------------------------------------------------------------------------------------------------
// Async Event Sources
// -------------------------------------------------------------------------------------------------

/// Trait implemented by any async event producer. Implementors spawn one
/// background task that pushes `Event`s into the shared channel and must stop
/// once the channel is closed.
pub trait AsyncEventSource: Send + 'static {
    /// Stable identifier used in logs.
    fn name(&self) -> &'static str;
    fn spawn(self: Box<Self>, tx: Sender<Event>) -> JoinHandle<()>;
}

/// Registry of event sources spawned together at startup.
pub struct EventSourceRegistry {
    sources: Vec<Box<dyn AsyncEventSource>>,
}

impl Default for EventSourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSourceRegistry {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    pub fn register<S: AsyncEventSource>(&mut self, src: S) {
        self.sources.push(Box::new(src));
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Spawn all registered sources, returning their JoinHandles. Each source
    /// receives its own clone of `tx`; during shutdown the caller drops its
    /// last sender before awaiting the handles so sources observe the closed
    /// channel and exit.
    pub fn spawn_all(&mut self, tx: &Sender<Event>) -> Vec<JoinHandle<()>> {
        // Drain so a second call cannot spawn duplicates.
        let mut out = Vec::with_capacity(self.sources.len());
        for src in self.sources.drain(..) {
            let name = src.name();
            info!(target: "runtime.events", source = name, "spawning event source");
            out.push(src.spawn(tx.clone()));
        }
        out
    }
}

/// Turns process termination signals into `Event::Shutdown` so the runtime
/// unwinds through its normal exit path and restores the terminal.
#[derive(Debug, Default)]
pub struct SignalEventSource;

impl AsyncEventSource for SignalEventSource {
    fn name(&self) -> &'static str {
        "signal"
    }

    fn spawn(self: Box<Self>, tx: Sender<Event>) -> JoinHandle<()> {
        tokio::spawn(async move {
            tokio::select! {
                res = wait_for_termination() => match res {
                    Ok(signal) => {
                        info!(target: "runtime.events", signal, "termination_signal");
                        if tx.send(Event::Shutdown).await.is_err() {
                            CHANNEL_SEND_FAILURES.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                    Err(e) => warn!(target: "runtime.events", ?e, "signal_listener_failed"),
                },
                _ = tx.closed() => {
                    trace!(target: "runtime.events", "signal_source_channel_closed");
                }
            }
        })
    }
}

#[cfg(unix)]
async fn wait_for_termination() -> std::io::Result<&'static str> {
    use tokio::signal::unix::{SignalKind, signal};
    let mut term = signal(SignalKind::terminate())?;
    let mut hup = signal(SignalKind::hangup())?;
    let mut int = signal(SignalKind::interrupt())?;
    let name = tokio::select! {
        _ = term.recv() => "SIGTERM",
        _ = hup.recv() => "SIGHUP",
        _ = int.recv() => "SIGINT",
    };
    Ok(name)
}

#[cfg(not(unix))]
async fn wait_for_termination() -> std::io::Result<&'static str> {
    tokio::signal::ctrl_c().await?;
    Ok("ctrl_c")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicBool;
    use std::time::Duration;
    use tokio::sync::mpsc;

    #[test]
    fn key_event_display() {
        let k = KeyEvent::ctrl('s');
        let s = format!("{}", k);
        assert!(s.contains("Char"));
        assert!(s.contains("CTRL"));
    }

    #[test]
    fn counter_snapshot_reads_current_totals() {
        let before = EventCounters::snapshot();
        KEYPRESS_TOTAL.fetch_add(2, Ordering::Relaxed);
        CHANNEL_SEND_FAILURES.fetch_add(1, Ordering::Relaxed);
        let after = EventCounters::snapshot();
        // Other tests may bump the globals concurrently.
        assert!(after.keypresses >= before.keypresses + 2);
        assert!(after.send_failures > before.send_failures);
    }

    struct MockOnceSource;

    impl AsyncEventSource for MockOnceSource {
        fn name(&self) -> &'static str {
            "mock_once"
        }
        fn spawn(self: Box<Self>, tx: Sender<Event>) -> JoinHandle<()> {
            tokio::spawn(async move {
                let _ = tx
                    .send(Event::Input(InputEvent::Key(KeyEvent::plain(
                        KeyCode::Char('x'),
                    ))))
                    .await;
            })
        }
    }

    #[tokio::test]
    async fn registry_spawns_and_emits() {
        let (tx, mut rx) = mpsc::channel::<Event>(8);
        let mut reg = EventSourceRegistry::new();
        reg.register(MockOnceSource);
        assert_eq!(reg.len(), 1);
        let handles = reg.spawn_all(&tx);
        assert!(reg.is_empty(), "spawn_all drains the registry");

        let ev = tokio::time::timeout(Duration::from_millis(200), rx.recv())
            .await
            .expect("mock source should emit promptly");
        assert_eq!(
            ev,
            Some(Event::Input(InputEvent::Key(KeyEvent::plain(KeyCode::Char(
                'x'
            )))))
        );

        drop(tx);
        for handle in handles {
            let _ = tokio::time::timeout(Duration::from_millis(50), handle).await;
        }
    }

    struct MockCloseSource {
        flag: Arc<AtomicBool>,
    }

    impl AsyncEventSource for MockCloseSource {
        fn name(&self) -> &'static str {
            "mock_close"
        }

        fn spawn(self: Box<Self>, tx: Sender<Event>) -> JoinHandle<()> {
            let flag = self.flag;
            tokio::spawn(async move {
                tx.closed().await;
                flag.store(true, Ordering::SeqCst);
            })
        }
    }

    #[tokio::test]
    async fn registry_sources_exit_on_channel_drop() {
        let (tx, rx) = mpsc::channel::<Event>(8);
        let mut reg = EventSourceRegistry::new();
        let flag = Arc::new(AtomicBool::new(false));
        reg.register(MockCloseSource { flag: flag.clone() });
        reg.register(SignalEventSource);
        let handles = reg.spawn_all(&tx);

        drop(tx);
        drop(rx);

        for handle in handles {
            match tokio::time::timeout(Duration::from_millis(200), handle).await {
                Ok(join_res) => join_res.expect("source task should exit cleanly"),
                Err(_) => panic!("source task did not observe channel closure"),
            }
        }

        assert!(flag.load(Ordering::SeqCst));
    }
}
