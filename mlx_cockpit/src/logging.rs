//! Logging initialisation.
//!
//! The TUI owns the terminal, so with `MLX_COCKPIT_LOG=1` logs go to
//! `<data dir>/mlx-cockpit/mlx-cockpit.log`; otherwise the TUI logs nothing.
//! One-shot modes log to stderr, filtered by `RUST_LOG` (default `warn`).

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub struct LogGuard {
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber. Keep the guard alive until exit so lines get flushed.
pub fn init(tui: bool) -> LogGuard {
    if std::env::var("MLX_COCKPIT_LOG").as_deref() == Ok("1") {
        let dir = dirs_next::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("mlx-cockpit");
        let _ = std::fs::create_dir_all(&dir);
        let (writer, guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, "mlx-cockpit.log"));
        let _ = tracing_subscriber::registry()
            .with(filter())
            .with(fmt::layer().with_writer(writer).with_ansi(false))
            .try_init();
        return LogGuard {
            _file_guard: Some(guard),
        };
    }
    if !tui {
        let _ = tracing_subscriber::registry()
            .with(filter())
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init();
    }
    LogGuard { _file_guard: None }
}
