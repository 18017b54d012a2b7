//! camo entrypoint.
use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;
use core_actions::{EditorSession, FileStore};
use core_events::{EVENT_CHANNEL_CAP, Event, EventSourceRegistry, SignalEventSource};
use core_state::{EditorError, ScreenSize};
use core_terminal::{CrosstermBackend, TerminalBackend};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Once;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

mod runtime;

use runtime::{EditorRuntime, EventProcessor};

const LOG_FILE_NAME: &str = "camo.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "camo", version, about = "Minimal terminal text editor")]
struct Args {
    /// File to edit. Created empty when it does not exist.
    pub path: PathBuf,
    /// Configuration file path (overrides discovery of `camo.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

#[derive(Debug)]
enum CliOutcome {
    Run(Args),
    /// Help or version text; print it and exit successfully.
    Exit(String),
}

fn parse_args<I, T>(argv: I) -> Result<CliOutcome, EditorError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Args::try_parse_from(argv) {
        Ok(args) => Ok(CliOutcome::Run(args)),
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                Ok(CliOutcome::Exit(e.render().to_string()))
            }
            _ => Err(EditorError::Usage(e.render().to_string())),
        },
    }
}

struct AppStartup {
    backend: CrosstermBackend,
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self {
            backend: CrosstermBackend::default(),
            log_guard: None,
        }
    }

    /// Bootstrap and run the session to completion. The terminal is restored
    /// before this returns, on success and on error alike.
    async fn run(&mut self, args: Args) -> Result<()> {
        self.configure_logging();
        info!(target: "runtime", "startup");

        let config = core_config::load_from(args.config.clone())?;
        let alternate_screen = config.alternate_screen();
        Self::install_panic_hook(alternate_screen);

        // Load before touching the terminal so open errors reach a sane shell.
        let screen = terminal_screen();
        let session = EditorSession::open(FileStore::new(&args.path), screen)?
            .with_tab_width(config.effective_tab_width);
        info!(
            target: "runtime.startup",
            path = %args.path.display(),
            len = session.buffer().len(),
            rows = screen.rows(),
            cols = screen.cols(),
            tab_width = config.effective_tab_width,
            alternate_screen,
            config_override = args.config.is_some(),
            "bootstrap_complete"
        );
        let processor = EventProcessor::new(session, config.effective_tab_width);

        self.backend = CrosstermBackend::new(alternate_screen);
        self.backend.set_title(&window_title(&args.path))?;
        let guard = self.backend.enter_guard()?;

        let (tx, rx) = mpsc::channel::<Event>(EVENT_CHANNEL_CAP);
        let (input_task, input_shutdown) = core_input::spawn_async_input(tx.clone());
        let mut registry = EventSourceRegistry::new();
        registry.register(SignalEventSource);
        let source_handles = registry.spawn_all(&tx);

        let mut runtime = EditorRuntime::new(
            processor,
            guard,
            tx,
            rx,
            input_task,
            input_shutdown,
            source_handles,
        );
        runtime.run().await
    }

    /// Best effort: when `camo.log` cannot be created (read-only working
    /// directory) the session runs without a log.
    fn configure_logging(&mut self) {
        let log_dir = Path::new(".");
        let _ = std::fs::remove_file(log_dir.join(LOG_FILE_NAME));

        let appender = match RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(LOG_FILE_NAME)
            .build(log_dir)
        {
            Ok(appender) => appender,
            Err(_) => return,
        };
        let (nb_writer, guard) = tracing_appender::non_blocking(appender);
        let installed = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .with_ansi(false)
            .try_init()
            .is_ok();
        if installed {
            self.log_guard = Some(guard);
        }
    }

    fn install_panic_hook(alternate_screen: bool) {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                core_terminal::restore_terminal(alternate_screen);
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

fn terminal_screen() -> ScreenSize {
    match crossterm::terminal::size() {
        Ok(size) => ScreenSize::from_terminal(size),
        Err(e) => {
            warn!(target: "runtime.startup", ?e, "terminal_size_unavailable");
            ScreenSize::default()
        }
    }
}

fn window_title(path: &Path) -> String {
    match path.file_name() {
        Some(name) => format!("camo - {}", name.to_string_lossy()),
        None => "camo".to_string(),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match parse_args(std::env::args_os()) {
        Ok(CliOutcome::Run(args)) => args,
        Ok(CliOutcome::Exit(text)) => {
            print!("{text}");
            return ExitCode::SUCCESS;
        }
        Err(EditorError::Usage(rendered)) => {
            eprint!("{rendered}");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut startup = AppStartup::new();
    let outcome = startup.run(args).await;
    match outcome {
        Ok(()) => {
            info!(target: "runtime", "exit");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(target: "runtime", error = %format!("{e:#}"), "fatal");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
