//! src/main.rs
//! PixelOcean terminal image browser

use std::{
    io::{self, Stdout},
    panic::PanicHookInfo,
    sync::Arc,
    time::Instant,
};

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use stockr::{ImageSource, StockClient};
use tokio::{
    signal,
    sync::{Notify, mpsc},
};
use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use pixdeck::{
    AppState, Logger,
    config::Config,
    controller::{
        Action, ClipboardShare, Dispatcher, EventLoop, SystemOpener, TaskResult,
        event_loop::spawn_debounce_forwarder,
    },
    util::{DebounceConfig, Debouncer},
    view::{View, theme},
};

type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> Result<()> {
    setup_panic_handler();

    let app = App::new()
        .await
        .context("Failed to initialize application")?;
    app.run().await.context("Application runtime error")?;

    info!("Application exited cleanly");
    Ok(())
}

struct App {
    terminal: AppTerminal,
    event_loop: EventLoop,
    dispatcher: Dispatcher,
    shutdown: Arc<Notify>,
    _log_guard: WorkerGuard,
}

impl App {
    async fn new() -> Result<Self> {
        let config = Config::load().await.context("Failed to load configuration")?;

        // Fail before touching the terminal so the message stays readable
        let client = StockClient::new(&config.provider)
            .context("Set PIXDECK_ACCESS_KEY to an Unsplash access key")?;
        let source: Arc<dyn ImageSource> = Arc::new(client);

        let log_dir = config.log_dir()?;
        let log_guard = Logger::init_tracing(&log_dir, &config.logging.level)?;
        info!("Starting PixelOcean (logs in {})", log_dir.display());
        theme::init_theme();

        let terminal = setup_terminal().context("Failed to initialize terminal")?;

        // Create communication channels
        let (task_tx, task_rx) = mpsc::unbounded_channel::<TaskResult>();
        let (action_tx, action_rx) = mpsc::unbounded_channel::<Action>();

        let (debouncer, debounced) =
            Debouncer::new(DebounceConfig::search_input().with_delay(config.search.debounce));
        spawn_debounce_forwarder(debounced, action_tx);

        let mut dispatcher = Dispatcher::new(
            AppState::new(&config),
            source,
            task_tx,
            debouncer,
            Box::new(ClipboardShare),
            Box::new(SystemOpener),
        );
        dispatcher.start();

        let event_loop = EventLoop::new(task_rx, action_rx);

        info!("Application initialized successfully");

        Ok(Self {
            terminal,
            event_loop,
            dispatcher,
            shutdown: Arc::new(Notify::new()),
            _log_guard: log_guard,
        })
    }

    async fn run(mut self) -> Result<()> {
        self.setup_shutdown_handler();
        info!("Starting event loop");

        loop {
            self.render()?;

            tokio::select! {
                _ = self.shutdown.notified() => {
                    info!("Shutdown signal received");
                    break;
                }

                maybe_action = self.event_loop.next_action() => {
                    let Some(action) = maybe_action else {
                        info!("Input closed, exiting");
                        break;
                    };
                    if self.dispatcher.dispatch(action).await.is_break() {
                        break;
                    }
                }
            }
        }

        info!("Event loop terminated cleanly");
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        if !self.dispatcher.state().ui.needs_redraw() {
            return Ok(());
        }

        let start = Instant::now();
        let state = self.dispatcher.state_mut();
        self.terminal
            .draw(|frame: &mut Frame<'_>| View::redraw(frame, state))
            .context("Failed to draw terminal")?;
        self.dispatcher.state().ui.clear_redraw();

        let duration = start.elapsed();
        if duration.as_millis() > 16 {
            warn!("Slow render: {}ms (target: <16ms)", duration.as_millis());
        } else {
            debug!("Rendered in {:?}", duration);
        }
        Ok(())
    }

    fn setup_shutdown_handler(&self) {
        let shutdown = self.shutdown.clone();

        tokio::spawn(async move {
            #[cfg(unix)]
            {
                use tokio::signal::unix::{SignalKind, signal};

                match signal(SignalKind::terminate()) {
                    Ok(mut sigterm) => {
                        tokio::select! {
                            _ = sigterm.recv() => info!("Received SIGTERM"),
                            _ = signal::ctrl_c() => info!("Received Ctrl+C"),
                        }
                    }
                    Err(e) => {
                        warn!("Failed to install SIGTERM handler: {}", e);
                        if signal::ctrl_c().await.is_err() {
                            return;
                        }
                    }
                }
            }

            #[cfg(not(unix))]
            {
                if let Err(e) = signal::ctrl_c().await {
                    warn!("Failed to listen for Ctrl+C: {}", e);
                    return;
                }
                info!("Received Ctrl+C");
            }

            shutdown.notify_one();
        });
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Err(e) = cleanup_terminal(&mut self.terminal) {
            warn!("Failed to cleanup terminal: {}", e);
        }
    }
}

fn setup_terminal() -> Result<AppTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    info!("Terminal setup complete");
    Ok(terminal)
}

fn cleanup_terminal(terminal: &mut AppTerminal) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    info!("Terminal cleanup complete");
    Ok(())
}

fn setup_panic_handler() {
    let original_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info: &PanicHookInfo<'_>| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen, DisableMouseCapture);

        error!("Application panicked: {}", panic_info);
        original_hook(panic_info);
    }));
}
