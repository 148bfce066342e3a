//! BeamGate Server - an HTTP endpoint that only accepts SORACOM Beam traffic.
//!
//! Every request must carry a valid Beam signature computed from the shared
//! secret configured on the relay. Verified requests are acknowledged with
//! `valid`; everything else is rejected with a generic error.
//!
//! # Usage
//!
//! ```text
//! SORACOM_BEAM_SHARED_SECRET=topsecret SERVER_PORT=8080 beamgate-server
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GATEWAY_LISTEN` | `0.0.0.0:8080` | Bind address |
//! | `SERVER_PORT` | *(unset)* | Port on all interfaces, used when `GATEWAY_LISTEN` is unset |
//! | `BEAM_SHARED_SECRET_VAR` | `SORACOM_BEAM_SHARED_SECRET` | Variable holding the shared secret |
//! | `SORACOM_BEAM_SHARED_SECRET` | *(unset)* | The shared secret, re-read on every request |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

mod gateway;
mod handler;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use beamgate_auth::{EnvSharedSecretProvider, SharedSecretProvider};
use beamgate_core::BeamGateConfig;
use bytes::Bytes;
use http_body_util::{BodyExt, Empty};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use hyper_util::server::graceful::GracefulShutdown;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::gateway::GatewayService;

/// Server version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `log_level` is used as the filter.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid LOG_LEVEL filter: {log_level}"))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Build the shared-secret provider named by the configuration.
fn build_secret_provider(config: &BeamGateConfig) -> Arc<dyn SharedSecretProvider> {
    let provider = EnvSharedSecretProvider::new(config.shared_secret_var.clone());

    // The secret is re-read per request; this only warns early about a misconfiguration.
    if provider.shared_secret().is_err() {
        warn!(
            var = %provider.var(),
            "shared secret is not set, every request will be rejected until it is"
        );
    }

    Arc::new(provider)
}

/// Resolve once the process is asked to stop (Ctrl-C, or SIGTERM on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl-C"),
        () = terminate => info!("received SIGTERM"),
    }
}

/// Serve one accepted connection on its own task, tracked by `graceful`.
fn spawn_connection(
    http: &HttpConnBuilder<TokioExecutor>,
    graceful: &GracefulShutdown,
    stream: TcpStream,
    peer_addr: SocketAddr,
    service: GatewayService,
) {
    let conn = http
        .serve_connection(TokioIo::new(stream), service)
        .into_owned();
    let conn = graceful.watch(conn);

    tokio::spawn(async move {
        match conn.await {
            Ok(()) => debug!(%peer_addr, "connection closed"),
            Err(e) => warn!(%peer_addr, error = %e, "connection ended with error"),
        }
    });
}

/// Accept connections until `shutdown` resolves, then drain in-flight requests.
async fn serve(
    listener: TcpListener,
    service: GatewayService,
    shutdown: impl std::future::Future<Output = ()>,
) -> Result<()> {
    let http = HttpConnBuilder::new(TokioExecutor::new());
    let graceful = GracefulShutdown::new();
    tokio::pin!(shutdown);

    loop {
        let accepted = tokio::select! {
            biased;
            () = &mut shutdown => break,
            accepted = listener.accept() => accepted,
        };

        match accepted {
            Ok((stream, peer_addr)) => {
                spawn_connection(&http, &graceful, stream, peer_addr, service.clone());
            }
            Err(e) => warn!(error = %e, "failed to accept connection"),
        }
    }

    info!("draining open connections");
    graceful.shutdown().await;
    info!("shutdown complete");

    Ok(())
}

/// Ask the server at `addr` for its health over HTTP/1.1.
///
/// Succeeds only on `200 OK` with a JSON body whose `status` is `running`.
async fn run_health_check(addr: &str) -> Result<()> {
    let stream = TcpStream::connect(addr)
        .await
        .with_context(|| format!("cannot connect to {addr}"))?;

    let (mut sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
        .await
        .context("HTTP handshake failed")?;
    tokio::spawn(conn);

    let request = http::Request::get("/health")
        .header(http::header::HOST, addr)
        .body(Empty::<Bytes>::new())?;
    let response = sender.send_request(request).await?;

    let status = response.status();
    let body = response.into_body().collect().await?.to_bytes();
    let health: serde_json::Value =
        serde_json::from_slice(&body).context("health response is not JSON")?;

    if status == http::StatusCode::OK && health["status"] == "running" {
        Ok(())
    } else {
        anyhow::bail!("unhealthy response from {addr}: {status} {health}")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = BeamGateConfig::from_env();

    // Container HEALTHCHECK entry point.
    if std::env::args().any(|a| a == "--health-check") {
        let addr = config.gateway_listen.replace("0.0.0.0", "127.0.0.1");
        let healthy = run_health_check(&addr).await.is_ok();
        std::process::exit(i32::from(!healthy));
    }

    init_tracing(&config.log_level)?;

    info!(
        gateway_listen = %config.gateway_listen,
        shared_secret_var = %config.shared_secret_var,
        version = VERSION,
        "starting BeamGate Server",
    );

    let service = GatewayService::new(build_secret_provider(&config));

    let addr = config.listen_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(%addr, "listening for connections");

    serve(listener, service, shutdown_signal()).await
}
