pub mod core;
pub mod http;
pub mod shared;
pub mod todos;

use crate::core::logging::init_logging;
use crate::core::settings::load_settings;
use http::{build_router, AppState};
use shared::paths::get_log_dir;
use todos::TodoStore;

/// Loads settings, prepares the data file and serves until SIGINT/SIGTERM.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let _logging_guards = init_logging(&get_log_dir())?;
    let settings = load_settings()?;

    // Initialize the data file up front so the first request never creates it
    let created = todos::storage::bootstrap(&settings.data_file)?;
    let store = TodoStore::new(settings.data_file.clone());
    let summary = store.summary()?;
    tracing::info!(
        target: "todos",
        path = %store.path().display(),
        created,
        total = summary.total,
        active = summary.active,
        deleted = summary.deleted,
        "Todo store initialized"
    );

    if !settings.static_dir.is_dir() {
        tracing::warn!(
            target: "system",
            static_dir = %settings.static_dir.display(),
            "Static directory not found, UI will not be served"
        );
    }

    let app = build_router(AppState::new(store), &settings.static_dir);

    let addr = settings.bind_addr().await?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(target: "system", "Server running on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await?;

    tracing::info!(target: "system", "Server stopped");
    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                tracing::warn!(target: "system", "Signal handlers unavailable, falling back to ctrl-c");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
