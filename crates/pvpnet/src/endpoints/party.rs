//! Party endpoints (game-server-local class).

use pvpnet_routes::{EndpointKind, Queue};
use serde_json::{Value, json};

use crate::{Client, Error};

impl Client {
    /// `Party_FetchPlayer`: the party the acting player belongs to.
    pub async fn party_fetch_player(&mut self) -> Result<Value, Error> {
        let puuid = self.resolved_puuid(None)?;
        self.fetch(
            EndpointKind::GameServer,
            &format!("/parties/v1/players/{puuid}"),
            &[],
        )
        .await
    }

    /// `Party_RemovePlayer`: removes a player from their party.
    pub async fn party_remove_player(&mut self, puuid: &str) -> Result<Value, Error> {
        self.delete(
            EndpointKind::GameServer,
            &format!("/parties/v1/players/{puuid}"),
            None,
            &[],
        )
        .await
    }

    /// `Party_FetchParty`: details of the current party.
    pub async fn fetch_party(&mut self) -> Result<Value, Error> {
        let party_id = self.current_party_id().await?;
        self.fetch(
            EndpointKind::GameServer,
            &format!("/parties/v1/parties/{party_id}"),
            &[],
        )
        .await
    }

    /// `Party_SetMemberReady`: marks the acting player ready or not.
    pub async fn party_set_member_ready(&mut self, ready: bool) -> Result<Value, Error> {
        let party_id = self.current_party_id().await?;
        let puuid = self.resolved_puuid(None)?;
        self.post(
            EndpointKind::GameServer,
            &format!("/parties/v1/parties/{party_id}/members/{puuid}/setReady"),
            Some(json!({ "ready": ready })),
            &[],
        )
        .await
    }

    /// `Party_RefreshCompetitiveTier`: refreshes the acting player's
    /// competitive tier.
    pub async fn party_refresh_competitive_tier(&mut self) -> Result<Value, Error> {
        let party_id = self.current_party_id().await?;
        let puuid = self.resolved_puuid(None)?;
        self.post(
            EndpointKind::GameServer,
            &format!("/parties/v1/parties/{party_id}/members/{puuid}/refreshCompetitiveTier"),
            None,
            &[],
        )
        .await
    }

    /// `Party_RefreshPlayerIdentity`: refreshes the acting player's
    /// identity.
    pub async fn party_refresh_player_identity(&mut self) -> Result<Value, Error> {
        let party_id = self.current_party_id().await?;
        let puuid = self.resolved_puuid(None)?;
        self.post(
            EndpointKind::GameServer,
            &format!("/parties/v1/parties/{party_id}/members/{puuid}/refreshPlayerIdentity"),
            None,
            &[],
        )
        .await
    }

    /// `Party_RefreshPings`: refreshes the acting player's pings.
    pub async fn party_refresh_pings(&mut self) -> Result<Value, Error> {
        let party_id = self.current_party_id().await?;
        let puuid = self.resolved_puuid(None)?;
        self.post(
            EndpointKind::GameServer,
            &format!("/parties/v1/parties/{party_id}/members/{puuid}/refreshPings"),
            None,
            &[],
        )
        .await
    }

    /// `Party_ChangeQueue`: sets the party's matchmaking queue.
    pub async fn party_change_queue(&mut self, queue: Queue) -> Result<Value, Error> {
        let party_id = self.current_party_id().await?;
        self.post(
            EndpointKind::GameServer,
            &format!("/parties/v1/parties/{party_id}/queue"),
            Some(json!({ "queueID": queue.as_str() })),
            &[],
        )
        .await
    }

    /// `Party_StartCustomGame`.
    pub async fn party_start_custom_game(&mut self) -> Result<Value, Error> {
        let party_id = self.current_party_id().await?;
        self.post(
            EndpointKind::GameServer,
            &format!("/parties/v1/parties/{party_id}/startcustomgame"),
            None,
            &[],
        )
        .await
    }

    /// `Party_EnterMatchmakingQueue`.
    pub async fn party_enter_matchmaking_queue(&mut self) -> Result<Value, Error> {
        let party_id = self.current_party_id().await?;
        self.post(
            EndpointKind::GameServer,
            &format!("/parties/v1/parties/{party_id}/matchmaking/join"),
            None,
            &[],
        )
        .await
    }

    /// `Party_LeaveMatchmakingQueue`.
    pub async fn party_leave_matchmaking_queue(&mut self) -> Result<Value, Error> {
        let party_id = self.current_party_id().await?;
        self.post(
            EndpointKind::GameServer,
            &format!("/parties/v1/parties/{party_id}/matchmaking/leave"),
            None,
            &[],
        )
        .await
    }

    /// `Party_SetAccessibility`: opens or closes the party.
    pub async fn party_set_accessibility(&mut self, open: bool) -> Result<Value, Error> {
        let party_id = self.current_party_id().await?;
        let state = if open { "OPEN" } else { "CLOSED" };
        self.post(
            EndpointKind::GameServer,
            &format!("/parties/v1/parties/{party_id}/accessibility"),
            Some(json!({ "accessibility": state })),
            &[],
        )
        .await
    }

    /// `Party_SetCustomGameSettings`: map, mode, server pod, and
    /// rules for a custom game.
    pub async fn party_set_custom_game_settings(&mut self, settings: Value) -> Result<Value, Error> {
        let party_id = self.current_party_id().await?;
        self.post(
            EndpointKind::GameServer,
            &format!("/parties/v1/parties/{party_id}/customgamesettings"),
            Some(settings),
            &[],
        )
        .await
    }

    /// `Party_InviteToPartyByDisplayName`: invite by name and tag
    /// (tag without the `#`).
    pub async fn party_invite_by_display_name(
        &mut self,
        name: &str,
        tag: &str,
    ) -> Result<Value, Error> {
        let party_id = self.current_party_id().await?;
        self.post(
            EndpointKind::GameServer,
            &format!("/parties/v1/parties/{party_id}/invites/name/{name}/tag/{tag}"),
            None,
            &[],
        )
        .await
    }

    /// `Party_RequestToJoinParty`.
    pub async fn party_request_to_join(
        &mut self,
        party_id: &str,
        other_puuid: &str,
    ) -> Result<Value, Error> {
        self.post(
            EndpointKind::GameServer,
            &format!("/parties/v1/parties/{party_id}/request"),
            Some(json!({ "Subjects": [other_puuid] })),
            &[],
        )
        .await
    }

    /// `Party_DeclineRequest`: declines a join request (id from the
    /// `Requests` array of [`Client::fetch_party`]).
    pub async fn party_decline_request(&mut self, request_id: &str) -> Result<Value, Error> {
        let party_id = self.current_party_id().await?;
        self.post(
            EndpointKind::GameServer,
            &format!("/parties/v1/parties/{party_id}/request/{request_id}/decline"),
            None,
            &[],
        )
        .await
    }

    /// `Party_PlayerJoin`.
    pub async fn party_join(&mut self, party_id: &str) -> Result<Value, Error> {
        let puuid = self.resolved_puuid(None)?;
        self.post(
            EndpointKind::GameServer,
            &format!("/parties/v1/players/{puuid}/joinparty/{party_id}"),
            None,
            &[],
        )
        .await
    }

    /// `Party_PlayerLeave`.
    pub async fn party_leave(&mut self, party_id: &str) -> Result<Value, Error> {
        let puuid = self.resolved_puuid(None)?;
        self.post(
            EndpointKind::GameServer,
            &format!("/parties/v1/players/{puuid}/leaveparty/{party_id}"),
            None,
            &[],
        )
        .await
    }

    /// `Party_FetchCustomGameConfigs`: available game modes and maps.
    pub async fn party_fetch_custom_game_configs(&mut self) -> Result<Value, Error> {
        self.fetch(
            EndpointKind::GameServer,
            "/parties/v1/parties/customgameconfigs",
            &[],
        )
        .await
    }

    /// `Party_FetchMUCToken`: party text chat token.
    pub async fn party_fetch_muc_token(&mut self) -> Result<Value, Error> {
        let party_id = self.current_party_id().await?;
        self.fetch(
            EndpointKind::GameServer,
            &format!("/parties/v1/parties/{party_id}/muctoken"),
            &[],
        )
        .await
    }

    /// `Party_FetchVoiceToken`: party voice token.
    pub async fn party_fetch_voice_token(&mut self) -> Result<Value, Error> {
        let party_id = self.current_party_id().await?;
        self.fetch(
            EndpointKind::GameServer,
            &format!("/parties/v1/parties/{party_id}/voicetoken"),
            &[],
        )
        .await
    }

    /// The acting player's current party id, looked up through
    /// [`Client::party_fetch_player`].
    pub(crate) async fn current_party_id(&mut self) -> Result<String, Error> {
        let party = self.party_fetch_player().await?;
        party
            .get("CurrentPartyID")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(Error::MissingField("CurrentPartyID"))
    }
}
