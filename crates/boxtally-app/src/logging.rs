// Tracing setup shared by the binaries.

use anyhow::Context;

const DEFAULT_FILTER: &str = "boxtally_app=info,boxtally_core=info,boxtally_tui=info,warn";

/// Initialize tracing to log to `logs/<name>.log`. Stdout carries the stats
/// view and the dashboard owns the terminal, so nothing is logged there.
pub fn init_tracing(name: &str) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join(format!("{name}.log")))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
