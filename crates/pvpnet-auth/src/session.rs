//! The authenticated session: player id plus the two header sets.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::AuthError;

/// Static base64-encoded platform descriptor blob sent as
/// `X-Riot-ClientPlatform` on every remote request. Decodes to a small
/// JSON document describing a Windows PC client.
pub const CLIENT_PLATFORM: &str = "ew0KCSJwbGF0Zm9ybVR5cGUiOiAiUEMiLA0KCSJwbGF0Zm9ybU9TIjogIldpbmRvd3MiLA0KCSJwbGF0Zm9ybU9TVmVyc2lvbiI6ICIxMC4wLjE5MDQyLjEuMjU2LjY0Yml0IiwNCgkicGxhdGZvcm1DaGlwc2V0IjogIlVua25vd24iDQp9";

pub(crate) const HEADER_ENTITLEMENTS_JWT: HeaderName =
    HeaderName::from_static("x-riot-entitlements-jwt");
pub(crate) const HEADER_CLIENT_PLATFORM: HeaderName =
    HeaderName::from_static("x-riot-clientplatform");
pub(crate) const HEADER_CLIENT_VERSION: HeaderName =
    HeaderName::from_static("x-riot-clientversion");

/// One long-lived authenticated session.
///
/// `auth_headers` go on the remote endpoint classes, `local_headers` on
/// the loopback class. Under remote (credential) authentication there is
/// no loopback service to talk to, so `local_headers` is empty.
///
/// Fields are private on purpose: the session is only ever replaced as a
/// whole by re-authentication, never mutated one header at a time.
#[derive(Debug, Clone)]
pub struct Session {
    puuid: String,
    auth_headers: HeaderMap,
    local_headers: HeaderMap,
}

impl Session {
    pub fn new(puuid: String, auth_headers: HeaderMap, local_headers: HeaderMap) -> Self {
        Self {
            puuid,
            auth_headers,
            local_headers,
        }
    }

    /// The acting player's opaque id.
    pub fn puuid(&self) -> &str {
        &self.puuid
    }

    /// Headers for the player-data, game-server, and shared classes.
    pub fn auth_headers(&self) -> &HeaderMap {
        &self.auth_headers
    }

    /// Headers for the loopback class. Empty under remote auth.
    pub fn local_headers(&self) -> &HeaderMap {
        &self.local_headers
    }

    /// Whether this session can reach loopback-only endpoints.
    pub fn has_local(&self) -> bool {
        !self.local_headers.is_empty()
    }
}

/// Builds a `HeaderValue` from a token, rejecting anything that is not
/// legal in an HTTP header.
pub(crate) fn header_value(s: &str) -> Result<HeaderValue, AuthError> {
    HeaderValue::from_str(s)
        .map_err(|_| AuthError::Protocol("token contains characters not valid in a header".into()))
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;

    use super::*;

    fn bearer_map(token: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            reqwest::header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        map
    }

    #[test]
    fn test_client_platform_blob_decodes_to_platform_json() {
        let decoded = STANDARD.decode(CLIENT_PLATFORM).expect("blob must be valid base64");
        let value: serde_json::Value =
            serde_json::from_slice(&decoded).expect("blob must decode to JSON");
        assert_eq!(value["platformType"], "PC");
        assert_eq!(value["platformOS"], "Windows");
    }

    #[test]
    fn test_has_local_false_when_local_headers_empty() {
        let session = Session::new("puuid-1".into(), bearer_map("abc"), HeaderMap::new());
        assert!(!session.has_local());
    }

    #[test]
    fn test_has_local_true_when_local_headers_present() {
        let session = Session::new("puuid-1".into(), bearer_map("abc"), bearer_map("local"));
        assert!(session.has_local());
    }

    #[test]
    fn test_header_value_rejects_control_characters() {
        assert!(matches!(header_value("abc\ndef"), Err(AuthError::Protocol(_))));
        assert!(header_value("abc.def-ghi_jkl").is_ok());
    }
}
