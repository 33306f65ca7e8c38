//! Static routing data for the game's REST APIs: the region/shard tables,
//! the base-URL templates for each endpoint class, and the valid
//! matchmaking queues.
//!
//! Everything in this crate is pure configuration, no I/O. The
//! [`RegionRoutes`] value is computed once from a [`Region`] and the two
//! override tables, and the client reads its base URLs from it for the
//! lifetime of the process.

mod error;
mod queue;
mod region;

pub use error::RouteError;
pub use queue::{QUEUES, Queue};
pub use region::{EndpointKind, REGIONS, Region, RegionRoutes};
