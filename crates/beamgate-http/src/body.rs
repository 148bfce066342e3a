//! Response body type for gated services.
//!
//! The gate answers rejected requests itself and forwards the rest, so the
//! wrapped service must produce the same body type. [`GateBody`] is a
//! type-erased body that any service can convert into.

use std::convert::Infallible;
use std::io;

use bytes::Bytes;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full};

/// Type-erased response body used by the gate and the services it wraps.
pub type GateBody = BoxBody<Bytes, io::Error>;

/// Create a [`GateBody`] from a string.
pub fn gate_body_from_string(s: impl Into<String>) -> GateBody {
    Full::new(Bytes::from(s.into()))
        .map_err(|never: Infallible| match never {})
        .boxed()
}
