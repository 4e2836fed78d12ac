//! The single pass every operation makes: validate, build, dispatch, map.
//!
//! Validation failures return before anything is built or sent. Transport
//! faults go through [`map_status`]. A response of the wrong shape becomes an
//! internal error. Nothing escapes as a panic or an outer `Result`; the
//! caller always gets the operation's own result type.

use std::time::Duration;

use crate::error::{MomentoError, Result, map_status};
use crate::metadata::Metadata;
use crate::proto::{Request, Response};
use crate::response::MomentoResponse;
use crate::status::Status;
use crate::transport::{Channel, Transport};

/// Run one call.
///
/// `validated` is the outcome of the argument checks, carrying any values
/// they resolved (such as an effective TTL). `build` turns those into the
/// request and its call metadata and only runs if validation passed.
/// `project` turns the response into the success variant.
pub(crate) async fn execute<T, R, V, B, P>(
    channel: &Channel<T>,
    deadline: Duration,
    validated: Result<V>,
    build: B,
    project: P,
) -> R
where
    T: Transport,
    R: MomentoResponse,
    B: FnOnce(V) -> (Request, Metadata),
    P: FnOnce(Response) -> Result<R>,
{
    let resolved = match validated {
        Ok(resolved) => resolved,
        Err(error) => {
            tracing::debug!(%error, "request rejected before dispatch");
            return R::from_error(error);
        }
    };

    let (request, metadata) = build(resolved);
    let method = request.method();

    let outcome = match tokio::time::timeout(
        deadline,
        channel.unary(request, metadata.clone(), deadline),
    )
    .await
    {
        Ok(outcome) => outcome,
        Err(_) => Err(Status::deadline_exceeded(format!(
            "no response within {}ms",
            deadline.as_millis()
        ))),
    };

    match outcome {
        Ok(response) => project(response).unwrap_or_else(|error| {
            tracing::warn!(%method, %error, "unexpected response");
            R::from_error(error)
        }),
        Err(status) => {
            let error = map_status(&status, Some(&metadata));
            tracing::debug!(%method, %status, kind = %error.kind(), "call failed");
            R::from_error(error)
        }
    }
}

/// Error for a response that does not fit the call that produced it.
pub(crate) fn unexpected(response: &Response) -> MomentoError {
    MomentoError::internal(format!("Unexpected response: {}", response.name()))
}
