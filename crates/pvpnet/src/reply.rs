//! The per-request response envelope and the checks the dispatcher runs
//! against it.
//!
//! Every HTTP exchange is decoded once into a [`Reply`] (transport
//! status plus the body, if it parsed as JSON) and everything
//! downstream inspects that envelope instead of poking at raw
//! responses.

use reqwest::StatusCode;
use serde_json::Value;

use crate::{DomainError, Error};

/// One HTTP exchange, decoded once.
#[derive(Debug, Clone)]
pub(crate) struct Reply {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl Reply {
    /// Reads the response body and decodes it as JSON. A body that is
    /// empty or not JSON simply leaves `body` as `None`; whether that is
    /// an error depends on what the dispatcher does next.
    pub(crate) async fn read(response: reqwest::Response) -> Result<Self, Error> {
        let status = response.status();
        let text = response.text().await?;
        let body = serde_json::from_str(&text).ok();
        Ok(Self { status, body })
    }

    /// Whether the decoded body carries the session-expiry signal: an
    /// `httpStatus` field with the literal value 400.
    ///
    /// Compatibility note: the marker is checked in the BODY, never the
    /// transport status. A 200 response whose JSON happens to include
    /// `httpStatus: 400` (an upstream proxy, say) triggers
    /// re-authentication too; downstream behavior depends on this, so
    /// it is preserved rather than fixed.
    pub(crate) fn session_expired(&self) -> bool {
        let marker = self.body.as_ref().and_then(|body| body.get("httpStatus"));
        matches!(marker, Some(Value::Number(n)) if n.as_i64() == Some(400))
    }

    /// Unwraps the parsed body, or raises the generic empty-response
    /// error when the endpoint gave us nothing usable.
    pub(crate) fn into_body(self) -> Result<Value, Error> {
        self.body.ok_or(Error::EmptyResponse)
    }
}

/// Applies the caller-declared status rules. Runs before anything looks
/// at the body: a matching rule raises the declared error verbatim, so
/// endpoint methods can turn a bare 404 into "you are not in a
/// pre-game" without the dispatcher knowing what a pre-game is.
pub(crate) fn check_status(
    status: StatusCode,
    rules: &[(StatusCode, DomainError)],
) -> Result<(), DomainError> {
    for (code, error) in rules {
        if *code == status {
            return Err(error.clone());
        }
    }
    Ok(())
}

// =========================================================================
// Tests
// =========================================================================
