//! The fixed set of matchmaking queue identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::RouteError;

/// The valid queue identifiers, as the remote API spells them.
pub const QUEUES: &[&str] = &[
    "competitive",
    "custom",
    "deathmatch",
    "ggteam",
    "snowball",
    "spikerush",
    "unrated",
    "onefa",
    "null",
];

/// A matchmaking queue.
///
/// Endpoint methods take a `Queue` rather than a raw string, so an
/// invalid identifier is rejected at parse time, before any network
/// call is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Queue {
    Competitive,
    Custom,
    Deathmatch,
    /// Escalation ("ggteam" on the wire).
    Ggteam,
    Snowball,
    Spikerush,
    Unrated,
    /// Replication ("onefa" on the wire).
    Onefa,
    /// No queue filter.
    Null,
}

impl Queue {
    /// The lowercase identifier used in URLs and request bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Competitive => "competitive",
            Self::Custom => "custom",
            Self::Deathmatch => "deathmatch",
            Self::Ggteam => "ggteam",
            Self::Snowball => "snowball",
            Self::Spikerush => "spikerush",
            Self::Unrated => "unrated",
            Self::Onefa => "onefa",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Queue {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "competitive" => Ok(Self::Competitive),
            "custom" => Ok(Self::Custom),
            "deathmatch" => Ok(Self::Deathmatch),
            "ggteam" => Ok(Self::Ggteam),
            "snowball" => Ok(Self::Snowball),
            "spikerush" => Ok(Self::Spikerush),
            "unrated" => Ok(Self::Unrated),
            "onefa" => Ok(Self::Onefa),
            "null" => Ok(Self::Null),
            other => Err(RouteError::InvalidQueue(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_every_listed_queue() {
        for name in QUEUES {
            let queue: Queue = name.parse().expect("listed queue must parse");
            assert_eq!(queue.as_str(), *name);
        }
    }

    #[test]
    fn test_from_str_unknown_queue_returns_error() {
        // Validation happens here, before a request is ever built.
        let result = "ranked".parse::<Queue>();
        assert_eq!(result, Err(RouteError::InvalidQueue("ranked".into())));
    }

    #[test]
    fn test_display_matches_wire_spelling() {
        assert_eq!(Queue::Ggteam.to_string(), "ggteam");
        assert_eq!(Queue::Null.to_string(), "null");
    }

    #[test]
    fn test_queue_serializes_lowercase() {
        let json = serde_json::to_string(&Queue::Spikerush).unwrap();
        assert_eq!(json, "\"spikerush\"");
    }
}
