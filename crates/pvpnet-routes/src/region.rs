//! Regions, shards, and the base-URL router.
//!
//! A *region* is what the player selects; a *shard* is the physical
//! data-center cluster that actually serves them. Some regions share a
//! shard under a different routing name, so resolution goes through two
//! disjoint override tables:
//!
//! 1. region → shard (`latam` and `br` ride on the `na` shard)
//! 2. shard → region (the `pbe` shard answers as the `na` region)
//!
//! The order matters: a region is first redirected to a shared shard,
//! and that shard can then redirect to a canonical region different from
//! the caller's original request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::RouteError;

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// The valid region identifiers, as the remote API spells them.
pub const REGIONS: &[&str] = &["na", "eu", "latam", "br", "ap", "kr", "pbe"];

/// A game region (also the namespace shards are named in).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Na,
    Eu,
    Latam,
    Br,
    Ap,
    Kr,
    /// Public beta environment. Collapses to the `na` region for glz
    /// routing while keeping its own shard.
    Pbe,
}

impl Region {
    /// The lowercase identifier used in URLs and the public API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Na => "na",
            Self::Eu => "eu",
            Self::Latam => "latam",
            Self::Br => "br",
            Self::Ap => "ap",
            Self::Kr => "kr",
            Self::Pbe => "pbe",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "na" => Ok(Self::Na),
            "eu" => Ok(Self::Eu),
            "latam" => Ok(Self::Latam),
            "br" => Ok(Self::Br),
            "ap" => Ok(Self::Ap),
            "kr" => Ok(Self::Kr),
            "pbe" => Ok(Self::Pbe),
            other => Err(RouteError::InvalidRegion(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Override tables
// ---------------------------------------------------------------------------

/// Region → shard override: regions that ride on another region's shard.
fn shard_override(region: Region) -> Option<Region> {
    match region {
        Region::Latam | Region::Br => Some(Region::Na),
        _ => None,
    }
}

/// Shard → region override: shards that answer as a different region.
fn region_override(shard: Region) -> Option<Region> {
    match shard {
        Region::Pbe => Some(Region::Na),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Endpoint classes
// ---------------------------------------------------------------------------

/// The class of endpoint a request is dispatched against.
///
/// The three remote classes resolve to a [`RegionRoutes`] base URL; the
/// `Local` class targets the loopback API on the port named in the
/// lockfile, so it carries no routed base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    /// Player-data services: `https://pd.{shard}.a.pvp.net`.
    PlayerData,
    /// Latency-sensitive game-server services (party, pregame,
    /// core-game): `https://glz-{region}-1.{shard}.a.pvp.net`.
    GameServer,
    /// Shared services: `https://shared.{shard}.a.pvp.net`.
    Shared,
    /// The loopback API of the running game client.
    Local,
}

// ---------------------------------------------------------------------------
// RegionRoutes
// ---------------------------------------------------------------------------

/// The resolved region, shard, and base URLs for one client.
///
/// A pure function of the requested region plus the two override tables;
/// constructing it twice for the same region always yields the same URLs.
/// Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionRoutes {
    region: Region,
    shard: Region,
    base_url: String,
    base_url_glz: String,
    base_url_shared: String,
}

impl RegionRoutes {
    /// Resolves the overrides (region→shard first, then shard→region)
    /// and renders the three base-URL templates.
    pub fn new(region: Region) -> Self {
        let mut region = region;
        let mut shard = region;
        if let Some(s) = shard_override(region) {
            shard = s;
        }
        if let Some(r) = region_override(shard) {
            region = r;
        }
        Self {
            region,
            shard,
            base_url: format!("https://pd.{shard}.a.pvp.net"),
            base_url_glz: format!("https://glz-{region}-1.{shard}.a.pvp.net"),
            base_url_shared: format!("https://shared.{shard}.a.pvp.net"),
        }
    }

    /// The canonical region after override resolution. May differ from
    /// the region the client was constructed with.
    pub fn region(&self) -> Region {
        self.region
    }

    /// The shard backing this region.
    pub fn shard(&self) -> Region {
        self.shard
    }

    /// Base URL for player-data endpoints.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL for game-server-local ("glz") endpoints.
    pub fn base_url_glz(&self) -> &str {
        &self.base_url_glz
    }

    /// Base URL for shared endpoints.
    pub fn base_url_shared(&self) -> &str {
        &self.base_url_shared
    }
}

// =========================================================================
// Tests
// =========================================================================
