//! Error types for the routing layer.

use crate::{QUEUES, REGIONS};

/// Errors raised while resolving static routing configuration.
///
/// These are configuration/input errors: they fire before any network
/// call is made and are never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// The requested region is not in the fixed enumerated set.
    #[error("invalid region {0:?}, valid regions are: {valid}", valid = REGIONS.join(", "))]
    InvalidRegion(String),

    /// The requested matchmaking queue is not in the fixed enumerated set.
    #[error("invalid queue {0:?}, valid queues are: {valid}", valid = QUEUES.join(", "))]
    InvalidQueue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_region_names_the_valid_set() {
        let err = RouteError::InvalidRegion("moon".into());
        let msg = err.to_string();
        assert!(msg.contains("\"moon\""));
        for region in REGIONS {
            assert!(msg.contains(region), "message should list {region}");
        }
    }

    #[test]
    fn test_invalid_queue_names_the_valid_set() {
        let err = RouteError::InvalidQueue("ranked".into());
        let msg = err.to_string();
        assert!(msg.contains("\"ranked\""));
        assert!(msg.contains("competitive"));
        assert!(msg.contains("spikerush"));
    }
}
