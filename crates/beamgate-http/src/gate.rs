//! Hyper service that only forwards Beam-signed requests.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use beamgate_auth::{BeamAuthError, SharedSecretProvider, verify_request};
use hyper::service::Service;
use tracing::{debug, error, warn};

use crate::body::GateBody;
use crate::response::rejection_response;

/// Callback invoked with the failure kind of every rejected request.
pub type RejectionHook = Arc<dyn Fn(&BeamAuthError) + Send + Sync>;

/// Gate in front of a downstream service.
///
/// Each call verifies the request headers against the current shared secret.
/// On success the request is passed to the inner service untouched; on
/// failure the inner service is not called and the gate answers with
/// [`rejection_response`].
pub struct BeamSignatureGate<S> {
    inner: S,
    secret_provider: Arc<dyn SharedSecretProvider>,
    on_rejected: Option<RejectionHook>,
}

impl<S> BeamSignatureGate<S> {
    /// Wrap `inner`, verifying against secrets from `secret_provider`.
    pub fn new(inner: S, secret_provider: Arc<dyn SharedSecretProvider>) -> Self {
        Self {
            inner,
            secret_provider,
            on_rejected: None,
        }
    }

    /// Install a callback that observes every rejection.
    #[must_use]
    pub fn with_rejection_hook(
        mut self,
        hook: impl Fn(&BeamAuthError) + Send + Sync + 'static,
    ) -> Self {
        self.on_rejected = Some(Arc::new(hook));
        self
    }

    fn reject(&self, err: &BeamAuthError) -> http::Response<GateBody> {
        if err.is_server_fault() {
            error!(kind = err.kind(), error = %err, "rejecting request: server misconfigured");
        } else {
            warn!(kind = err.kind(), error = %err, "rejecting request");
        }

        if let Some(hook) = &self.on_rejected {
            hook(err);
        }

        rejection_response(err)
    }
}

impl<S: Clone> Clone for BeamSignatureGate<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            secret_provider: Arc::clone(&self.secret_provider),
            on_rejected: self.on_rejected.clone(),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for BeamSignatureGate<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeamSignatureGate")
            .field("inner", &self.inner)
            .field("secret_provider", &"...")
            .field("on_rejected", &self.on_rejected.as_ref().map(|_| "..."))
            .finish()
    }
}

impl<S, B> Service<http::Request<B>> for BeamSignatureGate<S>
where
    S: Service<http::Request<B>, Response = http::Response<GateBody>>,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
{
    type Response = http::Response<GateBody>;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<B>) -> Self::Future {
        match verify_request(req.headers(), self.secret_provider.as_ref()) {
            Ok(auth) => {
                debug!(
                    device = auth.identity.kind(),
                    id = auth.identity.id(),
                    version = %auth.version,
                    "Beam signature verified, forwarding request"
                );
                Box::pin(self.inner.call(req))
            }
            Err(err) => Box::pin(std::future::ready(Ok(self.reject(&err)))),
        }
    }
}
