//! File logging for the terminal UI.
//!
//! The terminal owns stdout/stderr while the UI runs, so every event goes to a
//! daily rolling file instead.

use std::{
    fs,
    path::Path,
    sync::OnceLock,
    sync::atomic::{AtomicUsize, Ordering},
};

use anyhow::{Context, Result};
use tracing::Metadata;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        self, FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    prelude::*,
};

const LOG_FILE_PREFIX: &str = "pixdeck.log";

pub struct Logger;

impl Logger {
    /// Call **once** near the start of `main`; keep the guard alive until exit.
    pub fn init_tracing(log_dir: &Path, default_level: &str) -> Result<WorkerGuard> {
        fs::create_dir_all(log_dir)
            .with_context(|| format!("cannot create log dir {}", log_dir.display()))?;

        SEQ.get_or_init(|| AtomicUsize::new(1));

        // daily rolling file appender → <log_dir>/pixdeck.log.YYYY-MM-DD
        let file = rolling::daily(log_dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(file);

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(default_level))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let file_layer = fmt::layer()
            .event_format(SeqFileMod)
            .with_writer(writer)
            .with_ansi(false)
            .with_filter(filter);

        tracing_subscriber::registry()
            .with(file_layer)
            .try_init()
            .context("tracing subscriber already installed")?;

        Ok(guard)
    }
}

static SEQ: OnceLock<AtomicUsize> = OnceLock::new();

/// Custom formatter: `[SEQ] TIMESTAMP LEVEL [file:line mod::path] message`
struct SeqFileMod;

impl<S, N> FormatEvent<S, N> for SeqFileMod
where
    S: tracing::Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut w: Writer<'_>,
        ev: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        // monotonically‑increasing sequence number
        let seq: usize = SEQ
            .get()
            .map_or(0, |seq| seq.fetch_add(1, Ordering::Relaxed));

        let meta: &'static Metadata<'static> = ev.metadata();
        write!(
            w,
            "{seq:06} {} {:5} [{}:{} {}] ",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
            meta.level(),
            meta.file().unwrap_or("??"),
            meta.line().unwrap_or(0),
            meta.module_path().unwrap_or("???"),
        )?;

        ctx.field_format().format_fields(w.by_ref(), ev)?;
        writeln!(w)
    }
}
