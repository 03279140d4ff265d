use std::sync::Arc;

use clap::Parser;
use tinyhttpd::cli::Cli;
use tinyhttpd::server::{HttpServer, ServerHandle, ServerState};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let state = Arc::new(ServerState::new(&cli.webapp_root));
    let server = HttpServer::new(state).start(cli.addr.as_str())?;
    info!(
        addr = %server.local_addr(),
        webapp_root = %cli.webapp_root.display(),
        "tinyhttpd started"
    );

    wait_for_shutdown(server)
}

#[cfg(unix)]
fn wait_for_shutdown(server: ServerHandle) -> anyhow::Result<()> {
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    if let Some(signal) = signals.forever().next() {
        info!(signal, "shutdown signal received");
    }
    server.stop();
    Ok(())
}

#[cfg(not(unix))]
fn wait_for_shutdown(server: ServerHandle) -> anyhow::Result<()> {
    server
        .join()
        .map_err(|err| anyhow::anyhow!("server exited abnormally: {err:?}"))
}
