//! Session bootstrap for the pvpnet client.
//!
//! Two ways in:
//!
//! - [`local::authenticate`] exchanges the running game client's
//!   lockfile password for a bearer token and entitlement JWT over the
//!   loopback HTTPS API.
//! - [`riot::authenticate`] performs the multi-step credential handshake
//!   against the remote identity provider when no game client is
//!   running. Loopback-only endpoints are unavailable in this mode.
//!
//! Both produce a [`Session`]: the acting player's id plus the two
//! header sets the dispatcher attaches to requests. The session is
//! replaced wholesale on re-authentication, never field-mutated.

mod error;
mod lockfile;
mod session;
mod version;

pub mod local;
pub mod riot;

pub use error::AuthError;
pub use lockfile::Lockfile;
pub use session::{CLIENT_PLATFORM, Session};
pub use version::current_version;
