//! Endpoints served by the client process itself over loopback.
//!
//! These talk to the local companion process rather than the regional
//! services, so they need the lockfile password headers and are only
//! available on a loopback-activated [`Client`].

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use pvpnet_routes::EndpointKind;
use serde_json::Value;

use crate::{Client, Error};

impl Client {
    /// `PRESENCE_RNet_GET`: the decoded rich presence of one player.
    ///
    /// Looks the player up in the full presence list and decodes the
    /// base64 `private` blob. Returns `Ok(None)` when the player has no
    /// presence or the blob is missing or malformed.
    pub async fn fetch_presence(&mut self, puuid: Option<&str>) -> Result<Option<Value>, Error> {
        let puuid = self.resolved_puuid(puuid)?;
        let presences = self.fetch_all_friend_presences().await?;
        Ok(decode_private_presence(&presences, &puuid))
    }

    /// `PRESENCE_RNet_GET_ALL`: raw presence data for friends and the
    /// local player.
    pub async fn fetch_all_friend_presences(&mut self) -> Result<Value, Error> {
        self.fetch(EndpointKind::Local, "/chat/v4/presences", &[])
            .await
    }

    /// `RiotClientSession_FetchSessions`: running client sessions and
    /// their launch arguments.
    pub async fn riotclient_session_fetch_sessions(&mut self) -> Result<Value, Error> {
        self.fetch(EndpointKind::Local, "/product-session/v1/external-sessions", &[])
            .await
    }

    /// `AccountAlias_RNet_GET_ACTIVE`: the signed-in account's name
    /// and tag.
    pub async fn rnet_fetch_active_alias(&mut self) -> Result<Value, Error> {
        self.fetch(EndpointKind::Local, "/player-account/aliases/v1/active", &[])
            .await
    }

    /// `RSO_RNet_GET_ENTITLEMENTS_TOKEN`: the local account's alias
    /// record, served from the same path as the active alias.
    pub async fn rso_rnet_fetch_entitlements_token(&mut self) -> Result<Value, Error> {
        self.fetch(EndpointKind::Local, "/player-account/aliases/v1/active", &[])
            .await
    }

    /// `TEXT_CHAT_RNet_FetchSession`: current chat session, including
    /// the local player's puuid, name and tag.
    pub async fn rnet_fetch_chat_session(&mut self) -> Result<Value, Error> {
        self.fetch(EndpointKind::Local, "/chat/v1/session", &[]).await
    }

    /// `CHATFRIENDS_RNet_GET_ALL`: the friends list.
    pub async fn rnet_fetch_all_friends(&mut self) -> Result<Value, Error> {
        self.fetch(EndpointKind::Local, "/chat/v4/friends", &[]).await
    }

    /// `RiotKV_RNet_GetSettings`: client settings (keybinds, crosshair
    /// and so on).
    pub async fn rnet_fetch_settings(&mut self) -> Result<Value, Error> {
        self.fetch(
            EndpointKind::Local,
            "/player-preferences/v1/data-json/Ares.PlayerSettings",
            &[],
        )
        .await
    }

    /// `FRIENDS_RNet_FetchFriendRequests`.
    pub async fn rnet_fetch_friend_requests(&mut self) -> Result<Value, Error> {
        self.fetch(EndpointKind::Local, "/chat/v4/friendrequests", &[])
            .await
    }
}

/// Finds `puuid` in a presence list and decodes its base64 `private`
/// payload. Any missing piece yields `None`.
fn decode_private_presence(presences: &Value, puuid: &str) -> Option<Value> {
    let entry = presences
        .get("presences")?
        .as_array()?
        .iter()
        .find(|p| p.get("puuid").and_then(Value::as_str) == Some(puuid))?;
    let blob = entry.get("private")?.as_str()?;
    let decoded = STANDARD.decode(blob).ok()?;
    serde_json::from_slice(&decoded).ok()
}

// =====================================================================
// Tests
// =====================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn presence_list(puuid: &str, private: Value) -> Value {
        json!({
            "presences": [
                { "puuid": "someone-else", "private": "not base64!!" },
                { "puuid": puuid, "private": private },
            ]
        })
    }

    #[test]
    fn test_decode_private_presence_valid_blob_decodes_json() {
        let blob = STANDARD.encode(r#"{"sessionLoopState":"MENUS"}"#);
        let presences = presence_list("me", Value::String(blob));
        let decoded = decode_private_presence(&presences, "me").unwrap();
        assert_eq!(decoded["sessionLoopState"], "MENUS");
    }

    #[test]
    fn test_decode_private_presence_unknown_puuid_returns_none() {
        let presences = presence_list("me", Value::String(STANDARD.encode("{}")));
        assert!(decode_private_presence(&presences, "nobody").is_none());
    }

    #[test]
    fn test_decode_private_presence_invalid_base64_returns_none() {
        let presences = presence_list("me", Value::String("%%%".into()));
        assert!(decode_private_presence(&presences, "me").is_none());
    }

    #[test]
    fn test_decode_private_presence_non_json_payload_returns_none() {
        let presences = presence_list("me", Value::String(STANDARD.encode("plain text")));
        assert!(decode_private_presence(&presences, "me").is_none());
    }

    #[test]
    fn test_decode_private_presence_missing_private_field_returns_none() {
        let presences = json!({ "presences": [{ "puuid": "me" }] });
        assert!(decode_private_presence(&presences, "me").is_none());
    }

    #[test]
    fn test_decode_private_presence_empty_list_returns_none() {
        let presences = json!({ "presences": [] });
        assert!(decode_private_presence(&presences, "me").is_none());
    }
}
