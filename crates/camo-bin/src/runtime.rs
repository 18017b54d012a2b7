//! Runtime event loop: the single owner of the editor session.
//!
//! Each received event is handled to completion (session mutation, render
//! commands, flush) before the next one is received.

use anyhow::{Context, Result};
use core_actions::{Action, DocumentStore, EditorSession, translate_key};
use core_events::{Event, EventCounters, InputEvent};
use core_render::{Renderer, Writer};
use core_state::{RenderEffect, ScreenSize};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace, warn};

const SOURCE_JOIN_TIMEOUT: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShutdownReason {
    Quit,
    ShutdownEvent,
    ChannelClosed,
    Fatal,
}

impl ShutdownReason {
    fn as_str(&self) -> &'static str {
        match self {
            ShutdownReason::Quit => "quit",
            ShutdownReason::ShutdownEvent => "shutdown_event",
            ShutdownReason::ChannelClosed => "channel_closed",
            ShutdownReason::Fatal => "fatal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Break { reason: ShutdownReason },
}

/// Session plus the renderer mirroring it. Turns one event into the terminal
/// commands for that event; knows nothing about channels or stdout.
pub(crate) struct EventProcessor<S: DocumentStore> {
    session: EditorSession<S>,
    renderer: Renderer,
}

impl<S: DocumentStore> EventProcessor<S> {
    pub(crate) fn new(session: EditorSession<S>, tab_width: u16) -> Self {
        let renderer = Renderer::new(session.screen(), tab_width);
        Self { session, renderer }
    }

    pub(crate) fn session(&self) -> &EditorSession<S> {
        &self.session
    }

    /// Clear the screen and paint the loaded buffer.
    pub(crate) fn initial_frame(&mut self) -> Writer {
        let mut w = Writer::new();
        self.renderer.begin_full(&mut w);
        let effects = self.session.initial_draw();
        self.renderer.apply(&mut w, &effects);
        self.renderer.sync_cursor(&mut w, self.session.cursor());
        w
    }

    /// Errors are fatal; the session has already terminated when one is
    /// returned.
    pub(crate) fn process(&mut self, event: &Event) -> Result<(Writer, LoopControl)> {
        match event {
            Event::Shutdown => Ok((
                Writer::new(),
                LoopControl::Break {
                    reason: ShutdownReason::ShutdownEvent,
                },
            )),
            Event::Input(InputEvent::Resize(cols, rows)) => {
                let screen = ScreenSize::from_terminal((*cols, *rows));
                debug!(target: "runtime", rows = screen.rows(), cols = screen.cols(), "resize");
                self.renderer.resize(screen);
                let effects: Vec<RenderEffect> = self.session.resize(screen).into_iter().collect();
                Ok((self.frame(&effects), LoopControl::Continue))
            }
            Event::Input(InputEvent::Key(key)) => {
                let action = translate_key(key);
                trace!(target: "runtime", action = action.label(), "key_action");
                if action == Action::Unhandled {
                    return Ok((Writer::new(), LoopControl::Continue));
                }
                let effects = self.session.handle(action)?;
                let w = self.frame(&effects);
                if self.session.is_terminated() {
                    return Ok((
                        w,
                        LoopControl::Break {
                            reason: ShutdownReason::Quit,
                        },
                    ));
                }
                Ok((w, LoopControl::Continue))
            }
        }
    }

    fn frame(&mut self, effects: &[RenderEffect]) -> Writer {
        self.renderer.frame(effects, self.session.cursor())
    }
}

pub(crate) struct EditorRuntime<'a, S: DocumentStore> {
    processor: EventProcessor<S>,
    rx: mpsc::Receiver<Event>,
    tx: Option<mpsc::Sender<Event>>,
    source_handles: Vec<JoinHandle<()>>,
    input_task: Option<JoinHandle<()>>,
    input_shutdown: Option<core_input::AsyncInputShutdown>,
    // Dropped last: restores the terminal once the loop has unwound.
    _terminal_guard: core_terminal::TerminalGuard<'a>,
}

impl<'a, S: DocumentStore> EditorRuntime<'a, S> {
    pub(crate) fn new(
        processor: EventProcessor<S>,
        terminal_guard: core_terminal::TerminalGuard<'a>,
        tx: mpsc::Sender<Event>,
        rx: mpsc::Receiver<Event>,
        input_task: JoinHandle<()>,
        input_shutdown: core_input::AsyncInputShutdown,
        source_handles: Vec<JoinHandle<()>>,
    ) -> Self {
        Self {
            processor,
            rx,
            tx: Some(tx),
            source_handles,
            input_task: Some(input_task),
            input_shutdown: Some(input_shutdown),
            _terminal_guard: terminal_guard,
        }
    }

    pub(crate) async fn run(&mut self) -> Result<()> {
        let outcome = self.event_loop().await;
        let reason = match &outcome {
            Ok(reason) => *reason,
            Err(_) => ShutdownReason::Fatal,
        };
        self.rx.close();
        self.finalize_shutdown(reason).await;
        outcome.map(|_| ())
    }

    async fn event_loop(&mut self) -> Result<ShutdownReason> {
        self.processor
            .initial_frame()
            .flush()
            .context("initial render")?;

        while let Some(event) = self.rx.recv().await {
            let (writer, control) = self.processor.process(&event)?;
            if !writer.is_empty() {
                writer.flush().context("writing to terminal")?;
            }
            if let LoopControl::Break { reason } = control {
                return Ok(reason);
            }
        }
        Ok(ShutdownReason::ChannelClosed)
    }

    async fn finalize_shutdown(&mut self, reason: ShutdownReason) {
        log_shutdown_stage(reason, "begin");
        if let Some(tx) = self.tx.take() {
            trace!(target: "runtime.shutdown", reason = reason.as_str(), "dropping_runtime_sender");
            drop(tx);
        }

        while let Some(handle) = self.source_handles.pop() {
            match tokio::time::timeout(SOURCE_JOIN_TIMEOUT, handle).await {
                Ok(Ok(())) => trace!(target: "runtime.shutdown", "event_source_task_stopped"),
                Ok(Err(err)) if err.is_cancelled() => {
                    trace!(target: "runtime.shutdown", "event_source_task_cancelled")
                }
                Ok(Err(err)) => error!(target: "runtime.shutdown", ?err, "event_source_task_error"),
                Err(_) => warn!(target: "runtime.shutdown", "event_source_task_timeout"),
            }
        }

        if let Some(shutdown) = self.input_shutdown.take() {
            trace!(target: "runtime.shutdown", "input_task_shutdown_signal");
            shutdown.signal();
        }
        if let Some(handle) = self.input_task.take() {
            match handle.await {
                Ok(()) => trace!(target: "runtime.shutdown", "input_task_joined"),
                Err(err) if err.is_cancelled() => {
                    trace!(target: "runtime.shutdown", "input_task_cancelled")
                }
                Err(err) => error!(target: "runtime.shutdown", ?err, "input_task_join_failed"),
            }
        }

        let counters = EventCounters::snapshot();
        info!(
            target: "runtime.shutdown",
            keypresses = counters.keypresses,
            send_failures = counters.send_failures,
            "event_counters"
        );
        log_shutdown_stage(reason, "complete");
        info!(
            target: "runtime.shutdown",
            len = self.processor.session().buffer().len(),
            "session_closed"
        );
    }
}

fn log_shutdown_stage(reason: ShutdownReason, stage: &'static str) {
    info!(
        target: "runtime.shutdown",
        reason = reason.as_str(),
        stage = stage,
        "shutdown_stage"
    );
}
