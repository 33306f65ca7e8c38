//! The local-session authenticator.
//!
//! The running game client serves an `entitlements/v1/token` endpoint on
//! the loopback port named in the lockfile, authenticated by Basic auth
//! with the literal principal `riot` and the lockfile password. The
//! loopback certificate is self-signed, so the caller passes a reqwest
//! client built with TLS verification disabled. That client must never
//! be pointed anywhere but 127.0.0.1.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{AUTHORIZATION, HeaderMap};
use serde::Deserialize;

use crate::session::{
    HEADER_CLIENT_PLATFORM, HEADER_CLIENT_VERSION, HEADER_ENTITLEMENTS_JWT, header_value,
};
use crate::{AuthError, CLIENT_PLATFORM, Lockfile, Session};

/// Response of the loopback token endpoint. `token` is the entitlement
/// JWT, despite the unadorned name.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    subject: String,
    #[serde(rename = "accessToken")]
    access_token: String,
    token: String,
}

/// Exchanges the lockfile password for a full [`Session`].
///
/// `loopback` must be the TLS-verification-disabled client.
/// `client_version` is the header value from [`crate::current_version`];
/// the caller fetches it once and reuses it across session refreshes,
/// since the build cannot change while the game client runs.
pub async fn authenticate(
    loopback: &reqwest::Client,
    lockfile: &Lockfile,
    client_version: &str,
) -> Result<Session, AuthError> {
    let basic = basic_auth(&lockfile.password);
    let url = format!(
        "{}://127.0.0.1:{}/entitlements/v1/token",
        lockfile.protocol, lockfile.port
    );
    tracing::debug!(port = lockfile.port, "exchanging lockfile password for session tokens");

    let response = loopback
        .get(&url)
        .header(AUTHORIZATION, header_value(&basic)?)
        .send()
        .await
        .map_err(|e| AuthError::transport(e, true))?;
    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| AuthError::Protocol(format!("token endpoint: {e}")))?;

    let mut auth_headers = HeaderMap::new();
    auth_headers.insert(
        AUTHORIZATION,
        header_value(&format!("Bearer {}", token.access_token))?,
    );
    auth_headers.insert(HEADER_ENTITLEMENTS_JWT, header_value(&token.token)?);
    auth_headers.insert(HEADER_CLIENT_PLATFORM, header_value(CLIENT_PLATFORM)?);
    auth_headers.insert(HEADER_CLIENT_VERSION, header_value(client_version)?);

    let mut local_headers = HeaderMap::new();
    local_headers.insert(AUTHORIZATION, header_value(&basic)?);

    tracing::info!(puuid = %token.subject, "local session established");
    Ok(Session::new(token.subject, auth_headers, local_headers))
}

/// Basic-auth header value for the loopback API: the literal principal
/// `riot` joined with the lockfile password.
pub(crate) fn basic_auth(password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("riot:{password}")))
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    #[test]
    fn test_basic_auth_encodes_riot_principal_and_password() {
        // base64("riot:testpass")
        assert_eq!(basic_auth("testpass"), "Basic cmlvdDp0ZXN0cGFzcw==");
    }

    #[test]
    fn test_basic_auth_round_trips_through_decode() {
        let value = basic_auth("s3cret");
        let encoded = value.strip_prefix("Basic ").unwrap();
        let decoded = STANDARD.decode(encoded).unwrap();
        assert_eq!(decoded, b"riot:s3cret");
    }

    #[test]
    fn test_token_response_deserializes_loopback_shape() {
        let json = r#"{
            "accessToken": "eyJhbGc.access",
            "entitlements": [],
            "issuer": "https://127.0.0.1",
            "subject": "1b2c3d4e-aaaa-bbbb-cccc-1234567890ab",
            "token": "eyJhbGc.entitlement"
        }"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.subject, "1b2c3d4e-aaaa-bbbb-cccc-1234567890ab");
        assert_eq!(token.access_token, "eyJhbGc.access");
        assert_eq!(token.token, "eyJhbGc.entitlement");
    }

    const TOKEN_BODY: &str = r#"{"accessToken":"acc-1","entitlements":[],"issuer":"https://127.0.0.1","subject":"puuid-9","token":"ent-1"}"#;

    /// A one-endpoint loopback stub answering every request with the
    /// canned token body.
    async fn spawn_token_stub(hits: Arc<AtomicUsize>) -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let hits = hits.clone();
                tokio::spawn(async move {
                    let mut buf = [0u8; 4096];
                    let mut request = Vec::new();
                    loop {
                        match socket.read(&mut buf).await {
                            Ok(0) | Err(_) => break,
                            Ok(n) => {
                                request.extend_from_slice(&buf[..n]);
                                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                                    break;
                                }
                            }
                        }
                    }
                    hits.fetch_add(1, Ordering::SeqCst);
                    let response = format!(
                        "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{TOKEN_BODY}",
                        TOKEN_BODY.len()
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                });
            }
        });
        port
    }

    #[tokio::test]
    async fn test_authenticate_builds_session_from_token_endpoint() {
        let hits = Arc::new(AtomicUsize::new(0));
        let port = spawn_token_stub(hits.clone()).await;
        let lockfile = Lockfile {
            name: "Riot Client".into(),
            pid: 7,
            port,
            password: "pw".into(),
            protocol: "http".into(),
        };
        let version = "release-07.00-shipping-71-1059966";

        let session = authenticate(&reqwest::Client::new(), &lockfile, version)
            .await
            .unwrap();

        assert_eq!(session.puuid(), "puuid-9");
        assert!(session.has_local());
        assert_eq!(session.auth_headers()[AUTHORIZATION], "Bearer acc-1");
        assert_eq!(session.auth_headers()["x-riot-entitlements-jwt"], "ent-1");
        assert_eq!(session.auth_headers()["x-riot-clientversion"], version);
        assert_eq!(
            session.local_headers()[AUTHORIZATION],
            basic_auth("pw").as_str()
        );
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
