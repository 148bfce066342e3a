//! Integration tests for BeamGate.
//!
//! Most tests start an in-process server on an ephemeral port and talk to it
//! over real TCP. Tests against a separately running `beamgate-server` are
//! marked `#[ignore]` so they don't run during normal `cargo test`.
//!
//! Run those with a server started as
//! `SORACOM_BEAM_SHARED_SECRET=secret beamgate-server`:
//! ```text
//! cargo test -p beamgate-integration -- --ignored
//! ```

use std::convert::Infallible;
use std::future::{Ready, ready};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, Once};

use beamgate_auth::{
    BeamAuthError, DeviceIdentity, SharedSecretProvider, SignatureVersion,
    StaticSharedSecretProvider,
};
use beamgate_http::{BeamSignatureGate, GateBody, gate_body_from_string};
use hyper::service::Service;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use tokio::net::TcpListener;

static INIT: Once = Once::new();

/// Timestamp used by the reference vectors.
pub const TEST_TIMESTAMP: &str = "1443571200000";

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Endpoint URL of a separately running server.
#[must_use]
pub fn endpoint_url() -> String {
    std::env::var("BEAMGATE_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:8080".to_owned())
}

/// Downstream service that answers with the verified device's primary ID header.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoDeviceService;

impl<B> Service<http::Request<B>> for EchoDeviceService {
    type Response = http::Response<GateBody>;
    type Error = Infallible;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn call(&self, req: http::Request<B>) -> Self::Future {
        let id = [
            "x-soracom-imsi",
            "x-soracom-sigfox-device-id",
            "x-soracom-lora-device-id",
            "x-device-id",
        ]
        .iter()
        .find_map(|name| req.headers().get(*name).and_then(|v| v.to_str().ok()))
        .unwrap_or("")
        .to_owned();

        tracing::debug!(id = %id, "echoing verified device");
        ready(Ok(http::Response::new(gate_body_from_string(id))))
    }
}

/// A secret that tests can rotate while the server is running.
#[derive(Debug, Default)]
pub struct RotatingSecretProvider {
    secret: Mutex<String>,
}

impl RotatingSecretProvider {
    /// Create a provider holding `secret`.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Mutex::new(secret.into()),
        }
    }

    /// Replace the current secret.
    pub fn rotate(&self, secret: impl Into<String>) {
        *self.secret.lock().unwrap() = secret.into();
    }
}

impl SharedSecretProvider for RotatingSecretProvider {
    fn shared_secret(&self) -> Result<String, BeamAuthError> {
        let secret = self.secret.lock().unwrap().clone();
        if secret.is_empty() {
            return Err(BeamAuthError::SharedSecretMissing);
        }
        Ok(secret)
    }
}

/// Start a gated [`EchoDeviceService`] on an ephemeral port.
pub async fn spawn_gated_server(secret_provider: Arc<dyn SharedSecretProvider>) -> SocketAddr {
    init_tracing();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let gate = BeamSignatureGate::new(EchoDeviceService, secret_provider);

    tokio::spawn(async move {
        let http = HttpConnBuilder::new(TokioExecutor::new());
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            let conn = http
                .serve_connection(TokioIo::new(stream), gate.clone())
                .into_owned();
            tokio::spawn(async move {
                let _ = conn.await;
            });
        }
    });

    addr
}

/// Start a gated server with a fixed secret and return its base URL.
pub async fn spawn_with_secret(secret: &str) -> String {
    let addr = spawn_gated_server(Arc::new(StaticSharedSecretProvider::new(secret))).await;
    format!("http://{addr}")
}

/// Identity headers the relay would attach for `identity`.
#[must_use]
pub fn identity_headers(identity: &DeviceIdentity) -> Vec<(&'static str, String)> {
    match identity {
        DeviceIdentity::Cellular { imsi, imei } => {
            let mut headers = vec![("X-Soracom-Imsi", imsi.clone())];
            if let Some(imei) = imei {
                headers.push(("X-Soracom-Imei", imei.clone()));
            }
            headers
        }
        DeviceIdentity::Sigfox { device_id } => {
            vec![("X-Soracom-Sigfox-Device-Id", device_id.clone())]
        }
        DeviceIdentity::LoRaWan { device_id } => {
            vec![("X-Soracom-Lora-Device-Id", device_id.clone())]
        }
        DeviceIdentity::InventoryNotify { device_id } => vec![("X-Device-Id", device_id.clone())],
    }
}

/// Build a request signed the way the relay signs it.
#[must_use]
pub fn signed_request(
    client: &reqwest::Client,
    url: &str,
    secret: &str,
    identity: &DeviceIdentity,
) -> reqwest::RequestBuilder {
    let version = SignatureVersion::V20151001;
    let signature = version.compute(secret, identity, TEST_TIMESTAMP);

    let mut request = client
        .post(url)
        .header("X-Soracom-Timestamp", TEST_TIMESTAMP)
        .header("X-Soracom-Signature-Version", version.as_str())
        .header("X-Soracom-Signature", signature);
    for (name, value) in identity_headers(identity) {
        request = request.header(name, value);
    }
    request
}

mod test_gate;
mod test_server;
