//! `warden serve`: answer host events over stdin/stdout.

use anyhow::Result;
use tokio::io::BufReader;
use tracing::info;
use warden_runtime::WardenRuntime;

use super::load_config;
use crate::stdio;

/// Serve until stdin closes.
pub(crate) async fn run_serve() -> Result<()> {
    let resolved = load_config()?;
    let runtime = WardenRuntime::from_config(&resolved)?;
    info!(files = ?resolved.loaded_files, "Serving host events on stdio");

    let stats = stdio::serve(
        &runtime,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        std::env::current_dir().ok(),
    )
    .await?;

    info!(
        events = stats.events,
        blocked = stats.blocked,
        errors = stats.errors,
        "Serve finished"
    );
    Ok(())
}
