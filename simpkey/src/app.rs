//! Router assembly and the server loop.

use axum::routing::get;
use axum::Router;
use simpkey_client::RemoteClient;
use simpkey_core::{catch_panic_layer, default_trace, SecureHeaders};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::controllers;
use crate::state::AppState;

/// Build the full application router.
///
/// Layer order, outermost first: panic catcher, request tracing, security
/// headers, routes.
pub fn build_router<C: RemoteClient>(state: AppState<C>, headers: SecureHeaders) -> Router {
    let router = controllers::routes::<C>()
        .route("/health", get(health))
        .fallback(controllers::not_found)
        .method_not_allowed_fallback(controllers::not_found)
        .with_state(state);

    headers
        .apply(router)
        .layer(default_trace())
        .layer(catch_panic_layer())
}

async fn health() -> &'static str {
    "OK"
}

/// Bind `addr` and serve until Ctrl-C or SIGTERM.
pub async fn serve(router: Router, addr: &str) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "simpkey listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("simpkey stopped");
    Ok(())
}

/// Wait for a shutdown signal (Ctrl-C or SIGTERM on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
