//! The remote credential authenticator.
//!
//! When no game client is running, a session can be bootstrapped
//! directly against the identity provider with a username and password.
//! The handshake is an OAuth-style dance carried by one cookie-bearing
//! HTTP session:
//!
//! 1. POST an authorization initiation (fixed client id, nonce,
//!    redirect URI, response type),
//! 2. PUT the credentials to the same endpoint,
//! 3. pull `access_token` and `id_token` out of the redirect URI the
//!    provider answers with,
//! 4. exchange the bearer token for an entitlements token,
//! 5. ask the user-info endpoint who the subject is.
//!
//! Sessions made this way have no local headers: loopback-only
//! endpoints are unavailable under remote auth.

use reqwest::header::{AUTHORIZATION, HeaderMap};
use serde_json::{Value, json};

use crate::session::{HEADER_ENTITLEMENTS_JWT, header_value};
use crate::{AuthError, Session};

const AUTHORIZATION_URL: &str = "https://auth.riotgames.com/api/v1/authorization";
const ENTITLEMENTS_URL: &str = "https://entitlements.auth.riotgames.com/api/token/v1";
const USERINFO_URL: &str = "https://auth.riotgames.com/userinfo";
const CLIENT_ID: &str = "play-valorant-web-prod";
const REDIRECT_URI: &str = "https://playvalorant.com/opt_in";

/// Runs the credential handshake and returns a [`Session`] with empty
/// local headers.
pub async fn authenticate(username: &str, password: &str) -> Result<Session, AuthError> {
    // The authorization steps share cookies, so the handshake gets its
    // own cookie-store client rather than the process-wide one.
    let http = reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .map_err(AuthError::Network)?;

    tracing::debug!("initiating remote authorization");
    let init = json!({
        "client_id": CLIENT_ID,
        "nonce": "1",
        "redirect_uri": REDIRECT_URI,
        "response_type": "token id_token",
    });
    let response = http
        .post(AUTHORIZATION_URL)
        .json(&init)
        .send()
        .await
        .map_err(|e| AuthError::transport(e, false))?;
    if !response.status().is_success() {
        return Err(AuthError::Protocol(format!(
            "authorization initiation returned {}",
            response.status()
        )));
    }

    let credentials = json!({
        "type": "auth",
        "username": username,
        "password": password,
    });
    let response = http
        .put(AUTHORIZATION_URL)
        .json(&credentials)
        .send()
        .await
        .map_err(|e| AuthError::transport(e, false))?;
    if !response.status().is_success() {
        return Err(AuthError::Protocol(format!(
            "credential submission returned {}",
            response.status()
        )));
    }
    let body: Value = response
        .json()
        .await
        .map_err(|e| AuthError::Protocol(format!("authorization response: {e}")))?;
    let uri = body
        .pointer("/response/parameters/uri")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            AuthError::Protocol("authorization response carries no redirect uri".into())
        })?;
    let (access_token, _id_token) = extract_tokens(uri).ok_or_else(|| {
        AuthError::Protocol("redirect uri does not carry the expected token parameters".into())
    })?;

    let bearer = header_value(&format!("Bearer {access_token}"))?;

    let response = http
        .post(ENTITLEMENTS_URL)
        .header(AUTHORIZATION, bearer.clone())
        .json(&json!({}))
        .send()
        .await
        .map_err(|e| AuthError::transport(e, false))?;
    let body: Value = response
        .json()
        .await
        .map_err(|e| AuthError::Protocol(format!("entitlements endpoint: {e}")))?;
    let entitlements_token = body
        .get("entitlements_token")
        .and_then(Value::as_str)
        .ok_or_else(|| AuthError::Protocol("entitlements response has no token".into()))?
        .to_string();

    let response = http
        .post(USERINFO_URL)
        .header(AUTHORIZATION, bearer.clone())
        .json(&json!({}))
        .send()
        .await
        .map_err(|e| AuthError::transport(e, false))?;
    let body: Value = response
        .json()
        .await
        .map_err(|e| AuthError::Protocol(format!("userinfo endpoint: {e}")))?;
    let puuid = body
        .get("sub")
        .and_then(Value::as_str)
        .ok_or_else(|| AuthError::Protocol("userinfo response has no subject".into()))?
        .to_string();

    let mut auth_headers = HeaderMap::new();
    auth_headers.insert(AUTHORIZATION, bearer);
    auth_headers.insert(HEADER_ENTITLEMENTS_JWT, header_value(&entitlements_token)?);

    tracing::info!(%puuid, "remote session established");
    // No local headers: there is no loopback service in this mode.
    Ok(Session::new(puuid, auth_headers, HeaderMap::new()))
}

/// Extracts `access_token` and `id_token` from the redirect URI's
/// fragment.
///
/// The provider embeds the tokens as `key=value` pairs in a fixed shape:
/// `access_token` first, then `id_token`, then a numeric `expires_in`.
/// All three must appear, in that order, or the whole extraction fails.
pub(crate) fn extract_tokens(uri: &str) -> Option<(String, String)> {
    let (access_token, rest) = capture(uri, "access_token=")?;
    let (id_token, rest) = capture(rest, "id_token=")?;
    let (expires_in, _) = capture(rest, "expires_in=")?;
    if !expires_in.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((access_token.to_string(), id_token.to_string()))
}

/// Finds `key` in `s` and returns (value up to the next `&`, the
/// remainder after the value).
fn capture<'a>(s: &'a str, key: &str) -> Option<(&'a str, &'a str)> {
    let start = s.find(key)? + key.len();
    let rest = &s[start..];
    let end = rest.find('&').unwrap_or(rest.len());
    Some((&rest[..end], &rest[end..]))
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const REDIRECT: &str = "https://playvalorant.com/opt_in#access_token=eyJhbGc.acc-ess_1&scope=openid&iss=https%3A%2F%2Fauth.riotgames.com&id_token=eyJhbGc.id_2&token_type=Bearer&expires_in=3600";

    #[test]
    fn test_extract_tokens_reads_the_fixed_shape() {
        let (access, id) = extract_tokens(REDIRECT).unwrap();
        assert_eq!(access, "eyJhbGc.acc-ess_1");
        assert_eq!(id, "eyJhbGc.id_2");
    }

    #[test]
    fn test_extract_tokens_requires_expires_in() {
        let uri = "https://playvalorant.com/opt_in#access_token=a&id_token=b";
        assert_eq!(extract_tokens(uri), None);
    }

    #[test]
    fn test_extract_tokens_rejects_non_numeric_expires_in() {
        let uri = "https://playvalorant.com/opt_in#access_token=a&id_token=b&expires_in=soon";
        assert_eq!(extract_tokens(uri), None);
    }

    #[test]
    fn test_extract_tokens_is_order_sensitive() {
        // id_token before access_token does not match the fixed shape.
        let uri = "https://playvalorant.com/opt_in#id_token=b&access_token=a&expires_in=3600";
        assert_eq!(extract_tokens(uri), None);
    }

    #[test]
    fn test_extract_tokens_missing_access_token_fails() {
        let uri = "https://playvalorant.com/opt_in#id_token=b&expires_in=3600";
        assert_eq!(extract_tokens(uri), None);
    }

    #[test]
    fn test_capture_stops_at_ampersand() {
        let (value, rest) = capture("k=v1&next=v2", "k=").unwrap();
        assert_eq!(value, "v1");
        assert_eq!(rest, "&next=v2");
    }

    #[test]
    fn test_capture_takes_to_end_without_ampersand() {
        let (value, rest) = capture("k=v1", "k=").unwrap();
        assert_eq!(value, "v1");
        assert_eq!(rest, "");
    }
}
