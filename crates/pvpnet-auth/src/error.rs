//! Error types for session bootstrap.

use std::path::PathBuf;

/// Errors that can occur while acquiring or refreshing a session.
///
/// The two `Lockfile*` variants are configuration errors: the descriptor
/// file the game client writes is missing or unparseable, which no retry
/// will fix. The remaining variants classify handshake failures so
/// callers can tell "the game isn't running" from "the network is down"
/// from "the endpoint answered something unexpected".
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The lockfile could not be read at the expected path.
    #[error("lockfile not found at {path:?}: {source}")]
    LockfileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The lockfile was read but its content is not the expected
    /// 5-field colon-delimited record.
    #[error("malformed lockfile: {0}")]
    LockfileMalformed(String),

    /// The loopback endpoint refused the connection, meaning the game client
    /// process is not running (or not listening on the lockfile port).
    #[error("connection to the local client refused; is the game running?")]
    ProcessNotFound(#[source] reqwest::Error),

    /// A transport-level failure other than a loopback refusal.
    #[error("network failure during authentication")]
    Network(#[source] reqwest::Error),

    /// The endpoint answered, but not with the shape the handshake
    /// expects (missing field, undecodable body, non-2xx status).
    #[error("unexpected authentication response: {0}")]
    Protocol(String),
}

impl AuthError {
    /// Classifies a transport error from a handshake request.
    ///
    /// On the loopback path a refused connection means the game client
    /// process is gone; everywhere else it is an ordinary network
    /// failure.
    pub(crate) fn transport(err: reqwest::Error, loopback: bool) -> Self {
        if loopback && err.is_connect() {
            Self::ProcessNotFound(err)
        } else {
            Self::Network(err)
        }
    }
}
