//! tax-server entry point.
//!
//! Loads configuration, sets up tracing, opens the configuration store and
//! serves the router until Ctrl-C or SIGTERM. Handlers live in `routes.rs`.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use clap::Parser;
use tax_server::{
    config::Cli,
    routes,
    state::AppState,
};
use tokio::{net::TcpListener, sync::Notify};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, debug, info, warn};

/// How long in-flight requests get to finish after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Silent if the file does not exist; production injects env vars directly.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();

    debug!(database_url = %cli.database_url, "opening config store");
    let store = tax_db_sqlite::open_store(&cli.database_url)
        .await
        .context("failed to open config store")?;

    let state = Arc::new(AppState::new(Arc::new(store), cli.admin_credentials()));

    let app = routes::build_router(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    let addr = cli.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("tax-server listening on http://{}", addr);

    let shutdown = Arc::new(Notify::new());
    let mut server = tokio::spawn({
        let shutdown = Arc::clone(&shutdown);
        async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move { shutdown.notified().await })
                .await
        }
    });

    tokio::select! {
        joined = &mut server => {
            return joined.context("server task panicked")?.context("server crashed");
        }
        () = shutdown_signal() => {}
    }

    info!("shutting down");
    shutdown.notify_one();

    match tokio::time::timeout(SHUTDOWN_GRACE, server).await {
        Ok(joined) => joined
            .context("server task panicked")?
            .context("server crashed")?,
        Err(_) => warn!(
            grace_secs = SHUTDOWN_GRACE.as_secs(),
            "in-flight requests did not finish in time"
        ),
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
