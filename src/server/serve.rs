//! Connection-serving loop
//!
//! Accepts TCP connections and drives each one on its own task with hyper's
//! HTTP/1 connection builder. The idle timeout is enforced through hyper's
//! header read timeout, which is armed whenever a connection is waiting for
//! the head of its next request.

use axum::Router;
use hyper::server::conn::http1;
use hyper_util::{
    rt::{TokioIo, TokioTimer},
    server::graceful::GracefulShutdown,
    service::TowerToHyperService,
};
use std::{future::Future, time::Duration};
use tokio::net::TcpListener;

/// Time in-flight connections get to finish once shutdown starts
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Serve `app` on `listener` until `shutdown` resolves
///
/// After `shutdown` resolves the listener is closed and in-flight
/// connections are given a grace period to complete.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    idle_timeout: Duration,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()>,
{
    let graceful = GracefulShutdown::new();
    let mut http = http1::Builder::new();
    http.timer(TokioTimer::new())
        .header_read_timeout(idle_timeout)
        .keep_alive(true);

    tokio::pin!(shutdown);

    loop {
        let (stream, remote_addr) = tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok(conn) => conn,
                Err(e) => {
                    tracing::warn!("Failed to accept connection: {}", e);
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    continue;
                }
            },
            () = &mut shutdown => break,
        };

        tracing::trace!("Accepted connection from {}", remote_addr);

        let service = TowerToHyperService::new(app.clone());
        let conn = graceful.watch(http.serve_connection(TokioIo::new(stream), service));

        tokio::spawn(async move {
            if let Err(e) = conn.await {
                tracing::debug!("Connection from {} ended with error: {}", remote_addr, e);
            }
        });
    }

    tracing::info!("Shutdown signal received, draining connections");
    drop(listener);
    tokio::select! {
        () = graceful.shutdown() => {
            tracing::info!("All connections closed");
        }
        () = tokio::time::sleep(DRAIN_TIMEOUT) => {
            tracing::warn!(
                "Timed out after {}s waiting for connections to close",
                DRAIN_TIMEOUT.as_secs()
            );
        }
    }

    Ok(())
}

/// Resolve when the process receives Ctrl-C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
