//! Unified error type for the pvpnet client.

use pvpnet_auth::AuthError;
use pvpnet_routes::RouteError;

/// An endpoint-declared failure, raised when a response's HTTP status
/// matches a rule the endpoint method registered with the dispatcher.
///
/// The dispatcher knows nothing about endpoint semantics; each method
/// declares which statuses mean what for its endpoint (a 404 on a
/// current-match fetch means "not in that phase", not "bad URL").
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// The player is not in the game phase this endpoint reports on.
    #[error("{0}")]
    Phase(String),
}

/// Top-level error that wraps all failure classes of the client.
///
/// Sub-crate errors pass through transparently, so callers match on
/// one type. The `#[from]` attributes generate the conversions the `?`
/// operator relies on.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A routing/configuration error (invalid region or queue).
    #[error(transparent)]
    Route(#[from] RouteError),

    /// A session-bootstrap error (lockfile, handshake).
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// An endpoint-declared status failure.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The request needed a body and got none (or an unparseable one).
    #[error("request returned no parseable body")]
    EmptyResponse,

    /// A response body is parseable JSON but missing a field this
    /// client needs to continue (e.g. the current party id).
    #[error("response is missing expected field {0:?}")]
    MissingField(&'static str),

    /// An endpoint was called before `activate()`.
    #[error("client is not activated; call activate() first")]
    NotActivated,

    /// A loopback-only endpoint was called on a remotely-authenticated
    /// client. Local endpoints need the running game client's lockfile.
    #[error("local endpoints are not available under credential authentication")]
    LocalUnavailable,

    /// A transport-level failure from the underlying HTTP stack.
    #[error("http transport failure")]
    Transport(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_route_error() {
        let err = RouteError::InvalidRegion("moon".into());
        let client_err: Error = err.into();
        assert!(matches!(client_err, Error::Route(_)));
        assert!(client_err.to_string().contains("moon"));
    }

    #[test]
    fn test_from_auth_error() {
        let err = AuthError::Protocol("no subject".into());
        let client_err: Error = err.into();
        assert!(matches!(client_err, Error::Auth(_)));
        assert!(client_err.to_string().contains("no subject"));
    }

    #[test]
    fn test_from_domain_error_keeps_declared_message() {
        let err = DomainError::Phase("You are not in a core-game".into());
        let client_err: Error = err.into();
        assert_eq!(client_err.to_string(), "You are not in a core-game");
    }
}
