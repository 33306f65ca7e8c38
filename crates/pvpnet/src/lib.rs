//! # pvpnet
//!
//! Typed client for the game's player-data, game-server, shared and
//! local companion-process HTTP APIs.
//!
//! A [`Client`] is built for a region, activated against either the
//! local client process (loopback) or the remote login flow, and then
//! exposes the endpoint catalog as async methods returning raw
//! [`serde_json::Value`] payloads.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pvpnet::{Client, Region};
//!
//! # async fn run() -> Result<(), pvpnet::Error> {
//! let mut client = Client::new(Region::Na)?;
//! client.activate().await?;
//! let wallet = client.store_fetch_wallet().await?;
//! println!("{wallet:#}");
//! # Ok(())
//! # }
//! ```

mod client;
mod endpoints;
mod error;
mod reply;

pub use client::Client;
pub use endpoints::DEFAULT_ITEM_TYPE;
pub use error::{DomainError, Error};

pub use pvpnet_auth::{AuthError, CLIENT_PLATFORM, Lockfile, Session};
pub use pvpnet_routes::{EndpointKind, QUEUES, Queue, REGIONS, Region, RouteError};
