//! The client: session ownership and the request dispatcher.

use std::path::PathBuf;

use pvpnet_auth::{Lockfile, Session, current_version, local, riot};
use pvpnet_routes::{EndpointKind, Region, RegionRoutes};
use reqwest::{Method, StatusCode};
use serde_json::Value;

use crate::reply::{Reply, check_status};
use crate::{DomainError, Error};

/// Explicit account credentials for remote authentication.
struct Credentials {
    username: String,
    password: String,
}

/// A long-lived client for one player's session.
///
/// Construct with [`Client::new`] (lockfile authentication against the
/// running game client) or [`Client::with_credentials`] (remote
/// authentication; loopback endpoints unavailable), then call
/// [`Client::activate`] before any endpoint method.
///
/// Endpoint methods take `&mut self` because a response carrying the
/// session-expiry signal replaces the session in place before the
/// request is retried.
pub struct Client {
    routes: RegionRoutes,
    http: reqwest::Client,
    loopback: reqwest::Client,
    credentials: Option<Credentials>,
    lockfile_path: Option<PathBuf>,
    lockfile: Option<Lockfile>,
    session: Option<Session>,
    client_version: Option<String>,
    player_name: Option<String>,
    player_tag: Option<String>,
}

impl Client {
    /// A client that will authenticate through the running game
    /// client's lockfile.
    pub fn new(region: Region) -> Result<Self, Error> {
        let mut client = Self::build(region)?;
        client.lockfile_path = Lockfile::default_path();
        Ok(client)
    }

    /// A client that will authenticate remotely with account
    /// credentials. Loopback-only endpoints return
    /// [`Error::LocalUnavailable`] on such a client.
    pub fn with_credentials(
        region: Region,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, Error> {
        let mut client = Self::build(region)?;
        client.credentials = Some(Credentials {
            username: username.into(),
            password: password.into(),
        });
        Ok(client)
    }

    fn build(region: Region) -> Result<Self, Error> {
        // The loopback endpoint presents a self-signed certificate.
        // This client is only ever pointed at 127.0.0.1.
        let loopback = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .build()?;
        Ok(Self {
            routes: RegionRoutes::new(region),
            http: reqwest::Client::new(),
            loopback,
            credentials: None,
            lockfile_path: None,
            lockfile: None,
            session: None,
            client_version: None,
            player_name: None,
            player_tag: None,
        })
    }

    /// Overrides the lockfile location (the default is the platform
    /// path the game client writes to).
    pub fn lockfile_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.lockfile_path = Some(path.into());
        self
    }

    /// Acquires the session: parses the lockfile and runs the local
    /// handshake, or runs the remote credential handshake.
    ///
    /// On the lockfile path this also asks the loopback chat session
    /// for the player's display name and tag; failure there is logged
    /// and ignored, since the session itself is already established.
    pub async fn activate(&mut self) -> Result<(), Error> {
        match &self.credentials {
            Some(credentials) => {
                let session =
                    riot::authenticate(&credentials.username, &credentials.password).await?;
                self.session = Some(session);
            }
            None => {
                let path = self.lockfile_path.clone().ok_or_else(|| {
                    Error::Auth(pvpnet_auth::AuthError::LockfileUnreadable {
                        path: PathBuf::from("%LOCALAPPDATA%/Riot Games/Riot Client/Config/lockfile"),
                        source: std::io::Error::new(
                            std::io::ErrorKind::NotFound,
                            "LOCALAPPDATA is not set",
                        ),
                    })
                })?;
                let lockfile = Lockfile::load(&path)?;
                // The build cannot change while the game client runs, so
                // the version header is fetched once and reused for
                // every session refresh.
                let version = current_version(&self.http).await?;
                let session = local::authenticate(&self.loopback, &lockfile, &version).await?;
                self.lockfile = Some(lockfile);
                self.session = Some(session);
                self.client_version = Some(version);

                match self.rnet_fetch_chat_session().await {
                    Ok(chat) => {
                        self.player_name = chat
                            .get("game_name")
                            .and_then(Value::as_str)
                            .map(str::to_string);
                        self.player_tag = chat
                            .get("game_tag")
                            .and_then(Value::as_str)
                            .map(str::to_string);
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "could not fetch chat session for display name");
                    }
                }
            }
        }
        tracing::info!(region = %self.routes.region(), shard = %self.routes.shard(), "client activated");
        Ok(())
    }

    /// The acting player's opaque id, once activated.
    pub fn puuid(&self) -> Option<&str> {
        self.session.as_ref().map(Session::puuid)
    }

    /// The player's display name, when the local chat session provided
    /// one during activation.
    pub fn player_name(&self) -> Option<&str> {
        self.player_name.as_deref()
    }

    /// The player's tag line, when the local chat session provided one.
    pub fn player_tag(&self) -> Option<&str> {
        self.player_tag.as_deref()
    }

    /// The canonical region after override resolution.
    pub fn region(&self) -> Region {
        self.routes.region()
    }

    /// The shard backing this client's region.
    pub fn shard(&self) -> Region {
        self.routes.shard()
    }

    // -- Dispatch -----------------------------------------------------------

    /// GET against an endpoint class.
    pub async fn fetch(
        &mut self,
        kind: EndpointKind,
        path: &str,
        rules: &[(StatusCode, DomainError)],
    ) -> Result<Value, Error> {
        self.request(Method::GET, kind, path, None, rules).await
    }

    /// POST against an endpoint class.
    pub async fn post(
        &mut self,
        kind: EndpointKind,
        path: &str,
        body: Option<Value>,
        rules: &[(StatusCode, DomainError)],
    ) -> Result<Value, Error> {
        self.request(Method::POST, kind, path, body.as_ref(), rules).await
    }

    /// PUT against an endpoint class.
    pub async fn put(
        &mut self,
        kind: EndpointKind,
        path: &str,
        body: Option<Value>,
        rules: &[(StatusCode, DomainError)],
    ) -> Result<Value, Error> {
        self.request(Method::PUT, kind, path, body.as_ref(), rules).await
    }

    /// DELETE against an endpoint class.
    pub async fn delete(
        &mut self,
        kind: EndpointKind,
        path: &str,
        body: Option<Value>,
        rules: &[(StatusCode, DomainError)],
    ) -> Result<Value, Error> {
        self.request(Method::DELETE, kind, path, body.as_ref(), rules).await
    }

    /// The generic dispatcher.
    ///
    /// Order of checks: declared status rules first, then the
    /// session-expiry marker in the decoded body, then the body itself.
    /// On expiry the session is refreshed and the same request runs
    /// exactly once more; the retry's outcome is returned directly, so
    /// a second expiry marker passes through as ordinary data. There
    /// is no retry loop.
    async fn request(
        &mut self,
        method: Method,
        kind: EndpointKind,
        path: &str,
        body: Option<&Value>,
        rules: &[(StatusCode, DomainError)],
    ) -> Result<Value, Error> {
        let reply = self.exchange(&method, kind, path, body).await?;
        check_status(reply.status, rules)?;
        if reply.session_expired() {
            tracing::info!(path, "session expiry signal in response, re-authenticating");
            self.reauthenticate().await?;
            let retry = self.exchange(&method, kind, path, body).await?;
            check_status(retry.status, rules)?;
            return retry.into_body();
        }
        reply.into_body()
    }

    /// Issues one HTTP call with the session's current headers and
    /// decodes the response into a [`Reply`].
    async fn exchange(
        &self,
        method: &Method,
        kind: EndpointKind,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Reply, Error> {
        let session = self.session.as_ref().ok_or(Error::NotActivated)?;
        let builder = match kind {
            EndpointKind::Local => {
                if !session.has_local() {
                    return Err(Error::LocalUnavailable);
                }
                let lockfile = self.lockfile.as_ref().ok_or(Error::NotActivated)?;
                let url = format!(
                    "{}://127.0.0.1:{}{path}",
                    lockfile.protocol, lockfile.port
                );
                self.loopback
                    .request(method.clone(), url)
                    .headers(session.local_headers().clone())
            }
            EndpointKind::PlayerData => self.remote(method, self.routes.base_url(), path, session),
            EndpointKind::GameServer => {
                self.remote(method, self.routes.base_url_glz(), path, session)
            }
            EndpointKind::Shared => {
                self.remote(method, self.routes.base_url_shared(), path, session)
            }
        };
        let builder = match body {
            Some(json) => builder.json(json),
            None => builder,
        };
        let response = builder.send().await?;
        tracing::debug!(%method, status = %response.status(), path, "dispatched");
        Reply::read(response).await
    }

    fn remote(
        &self,
        method: &Method,
        base: &str,
        path: &str,
        session: &Session,
    ) -> reqwest::RequestBuilder {
        self.http
            .request(method.clone(), format!("{base}{path}"))
            .headers(session.auth_headers().clone())
    }

    /// Refreshes the session through whichever authenticator variant is
    /// active. The only place the session is ever replaced after
    /// activation.
    async fn reauthenticate(&mut self) -> Result<(), Error> {
        let session = match (&self.credentials, &self.lockfile) {
            (Some(credentials), _) => {
                riot::authenticate(&credentials.username, &credentials.password).await?
            }
            (None, Some(lockfile)) => {
                let version = match self.client_version.clone() {
                    Some(v) => v,
                    None => current_version(&self.http).await?,
                };
                local::authenticate(&self.loopback, lockfile, &version).await?
            }
            (None, None) => return Err(Error::NotActivated),
        };
        self.session = Some(session);
        tracing::info!("session credentials refreshed");
        Ok(())
    }

    /// Substitutes the acting player's id when the caller passed none.
    pub(crate) fn resolved_puuid(&self, puuid: Option<&str>) -> Result<String, Error> {
        match puuid {
            Some(p) => Ok(p.to_string()),
            None => self
                .session
                .as_ref()
                .map(|s| s.puuid().to_string())
                .ok_or(Error::NotActivated),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    fn bearer_map() -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(AUTHORIZATION, HeaderValue::from_static("Bearer test"));
        map
    }

    /// A client with an injected remote-auth session (no local headers)
    /// so tests can exercise dispatch checks without any network.
    fn remote_client() -> Client {
        let mut client = Client::with_credentials(Region::Na, "user", "pass").unwrap();
        client.session = Some(Session::new("puuid-1".into(), bearer_map(), HeaderMap::new()));
        client
    }

    #[tokio::test]
    async fn test_fetch_before_activate_is_not_activated() {
        let mut client = Client::new(Region::Na).unwrap();
        let result = client
            .fetch(EndpointKind::PlayerData, "/mmr/v1/players/x", &[])
            .await;
        assert!(matches!(result, Err(Error::NotActivated)));
    }

    #[tokio::test]
    async fn test_post_before_activate_is_not_activated() {
        let mut client = Client::new(Region::Na).unwrap();
        let result = client
            .post(EndpointKind::GameServer, "/parties/v1/x", None, &[])
            .await;
        assert!(matches!(result, Err(Error::NotActivated)));
    }

    #[tokio::test]
    async fn test_local_endpoint_under_remote_auth_is_unavailable() {
        // The capability restriction: a credential-authenticated session
        // has no local headers, so the loopback class is refused before
        // any I/O happens.
        let mut client = remote_client();
        let result = client.fetch(EndpointKind::Local, "/chat/v4/presences", &[]).await;
        assert!(matches!(result, Err(Error::LocalUnavailable)));
    }

    #[test]
    fn test_resolved_puuid_prefers_explicit_argument() {
        let client = remote_client();
        assert_eq!(client.resolved_puuid(Some("other")).unwrap(), "other");
    }

    #[test]
    fn test_resolved_puuid_falls_back_to_session() {
        let client = remote_client();
        assert_eq!(client.resolved_puuid(None).unwrap(), "puuid-1");
    }

    #[test]
    fn test_resolved_puuid_without_session_is_not_activated() {
        let client = Client::new(Region::Na).unwrap();
        assert!(matches!(client.resolved_puuid(None), Err(Error::NotActivated)));
    }

    #[test]
    fn test_client_region_reflects_override_resolution() {
        let client = Client::new(Region::Br).unwrap();
        assert_eq!(client.region(), Region::Br);
        assert_eq!(client.shard(), Region::Na);
    }

    #[test]
    fn test_puuid_none_before_activation() {
        let client = Client::new(Region::Eu).unwrap();
        assert!(client.puuid().is_none());
    }

    // =====================================================================
    // Re-authentication and retry
    // =====================================================================

    const EXPIRED_BODY: &str = r#"{"httpStatus": 400, "message": "credentials expired"}"#;
    const TOKEN_BODY: &str = r#"{"accessToken":"fresh-acc","entitlements":[],"issuer":"https://127.0.0.1","subject":"puuid-1","token":"fresh-ent"}"#;

    struct LoopbackStub {
        port: u16,
        token_hits: Arc<AtomicUsize>,
        data_hits: Arc<AtomicUsize>,
    }

    /// A loopback HTTP stub answering the token endpoint with a canned
    /// fresh session and every other path with `data_replies` in order
    /// (the last entry repeats).
    async fn spawn_stub(data_replies: Vec<(u16, &'static str)>) -> LoopbackStub {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let token_hits = Arc::new(AtomicUsize::new(0));
        let data_hits = Arc::new(AtomicUsize::new(0));
        let stub_token_hits = token_hits.clone();
        let stub_data_hits = data_hits.clone();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let token_hits = stub_token_hits.clone();
                let data_hits = stub_data_hits.clone();
                let data_replies = data_replies.clone();
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
                    let head = String::from_utf8_lossy(&request);
                    let (status, body) = if head.starts_with("GET /entitlements/v1/token") {
                        token_hits.fetch_add(1, Ordering::SeqCst);
                        (200, TOKEN_BODY)
                    } else {
                        let i = data_hits.fetch_add(1, Ordering::SeqCst);
                        data_replies[i.min(data_replies.len() - 1)]
                    };
                    let response = format!(
                        "HTTP/1.1 {status} OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                });
            }
        });
        LoopbackStub {
            port,
            token_hits,
            data_hits,
        }
    }

    /// A lockfile-activated client whose loopback port points at the
    /// stub, with the session and version injected so no real handshake
    /// is needed up front.
    fn stub_client(port: u16) -> Client {
        let mut client = Client::new(Region::Na).unwrap();
        client.lockfile = Some(Lockfile {
            name: "Riot Client".into(),
            pid: 7,
            port,
            password: "pw".into(),
            protocol: "http".into(),
        });
        client.session = Some(Session::new("puuid-1".into(), bearer_map(), bearer_map()));
        client.client_version = Some("release-07.00-shipping-71-1059966".into());
        client
    }

    #[tokio::test]
    async fn test_expiry_marker_reauthenticates_once_and_retries_once() {
        let stub = spawn_stub(vec![(200, EXPIRED_BODY), (200, r#"{"ok": true}"#)]).await;
        let mut client = stub_client(stub.port);

        let body = client
            .fetch(EndpointKind::Local, "/chat/v4/presences", &[])
            .await
            .unwrap();

        assert_eq!(body["ok"], true);
        assert_eq!(stub.token_hits.load(Ordering::SeqCst), 1);
        assert_eq!(stub.data_hits.load(Ordering::SeqCst), 2);
        // The refreshed session replaced the injected one.
        let session = client.session.as_ref().unwrap();
        assert_eq!(session.auth_headers()[AUTHORIZATION], "Bearer fresh-acc");
    }

    #[tokio::test]
    async fn test_second_expiry_marker_returns_as_data_without_second_refresh() {
        let stub = spawn_stub(vec![(200, EXPIRED_BODY), (200, EXPIRED_BODY)]).await;
        let mut client = stub_client(stub.port);

        let body = client
            .fetch(EndpointKind::Local, "/chat/v4/presences", &[])
            .await
            .unwrap();

        // The retried body comes back verbatim; no retry loop.
        assert_eq!(body["httpStatus"], 400);
        assert_eq!(stub.token_hits.load(Ordering::SeqCst), 1);
        assert_eq!(stub.data_hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_status_rules_apply_to_the_retried_request() {
        let stub = spawn_stub(vec![(200, EXPIRED_BODY), (404, "{}")]).await;
        let mut client = stub_client(stub.port);
        let rules = [(
            StatusCode::NOT_FOUND,
            DomainError::Phase("You are not in a pre-game".into()),
        )];

        let err = client
            .fetch(EndpointKind::Local, "/chat/v4/presences", &rules)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Domain(DomainError::Phase(_))));
        assert_eq!(stub.token_hits.load(Ordering::SeqCst), 1);
        assert_eq!(stub.data_hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_no_refresh_without_expiry_marker() {
        let stub = spawn_stub(vec![(200, r#"{"ok": true}"#)]).await;
        let mut client = stub_client(stub.port);

        let body = client
            .fetch(EndpointKind::Local, "/chat/v4/presences", &[])
            .await
            .unwrap();

        assert_eq!(body["ok"], true);
        assert_eq!(stub.token_hits.load(Ordering::SeqCst), 0);
        assert_eq!(stub.data_hits.load(Ordering::SeqCst), 1);
    }
}
