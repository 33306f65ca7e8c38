//! The per-endpoint method catalog.
//!
//! Each method is a one-line URL template plus a dispatch call, grouped
//! by service. Methods that identify a player accept `Option<&str>` and
//! default to the acting player; methods that identify a match default
//! to the player's current one via the phase endpoints.

mod contracts;
mod coregame;
mod local;
mod party;
mod pregame;
mod pvp;
mod session;
mod store;

pub use store::DEFAULT_ITEM_TYPE;
