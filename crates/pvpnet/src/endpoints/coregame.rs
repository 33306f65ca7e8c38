//! Core-game (live match) endpoints.
//!
//! A 404 from the coregame service means the player is not in a live
//! match, surfaced as [`DomainError::Phase`].

use pvpnet_routes::EndpointKind;
use reqwest::StatusCode;
use serde_json::Value;

use crate::{Client, DomainError, Error};

fn phase_rule() -> [(StatusCode, DomainError); 1] {
    [(
        StatusCode::NOT_FOUND,
        DomainError::Phase("You are not in a core-game".into()),
    )]
}

impl Client {
    /// `CoreGame_FetchPlayer`: the id of the live match.
    pub async fn coregame_fetch_player(&mut self) -> Result<Value, Error> {
        let puuid = self.resolved_puuid(None)?;
        self.fetch(
            EndpointKind::GameServer,
            &format!("/core-game/v1/players/{puuid}"),
            &phase_rule(),
        )
        .await
    }

    /// `CoreGame_FetchMatch`: info for a live match. `match_id: None`
    /// means the player's current one.
    pub async fn coregame_fetch_match(&mut self, match_id: Option<&str>) -> Result<Value, Error> {
        let match_id = self.coregame_match_id(match_id).await?;
        self.fetch(
            EndpointKind::GameServer,
            &format!("/core-game/v1/matches/{match_id}"),
            &phase_rule(),
        )
        .await
    }

    /// `CoreGame_FetchMatchLoadouts`.
    pub async fn coregame_fetch_match_loadouts(
        &mut self,
        match_id: Option<&str>,
    ) -> Result<Value, Error> {
        let match_id = self.coregame_match_id(match_id).await?;
        self.fetch(
            EndpointKind::GameServer,
            &format!("/core-game/v1/matches/{match_id}/loadouts"),
            &phase_rule(),
        )
        .await
    }

    /// `CoreGame_FetchTeamChatMUCToken`.
    pub async fn coregame_fetch_team_chat_muc_token(
        &mut self,
        match_id: Option<&str>,
    ) -> Result<Value, Error> {
        let match_id = self.coregame_match_id(match_id).await?;
        self.fetch(
            EndpointKind::GameServer,
            &format!("/core-game/v1/matches/{match_id}/teamchatmuctoken"),
            &phase_rule(),
        )
        .await
    }

    /// `CoreGame_FetchAllChatMUCToken`.
    pub async fn coregame_fetch_all_chat_muc_token(
        &mut self,
        match_id: Option<&str>,
    ) -> Result<Value, Error> {
        let match_id = self.coregame_match_id(match_id).await?;
        self.fetch(
            EndpointKind::GameServer,
            &format!("/core-game/v1/matches/{match_id}/allchatmuctoken"),
            &phase_rule(),
        )
        .await
    }

    /// `CoreGame_DisassociatePlayer`: leaves the live match.
    pub async fn coregame_disassociate_player(
        &mut self,
        match_id: Option<&str>,
    ) -> Result<Value, Error> {
        let match_id = self.coregame_match_id(match_id).await?;
        let puuid = self.resolved_puuid(None)?;
        self.post(
            EndpointKind::GameServer,
            &format!("/core-game/v1/players/{puuid}/disassociate/{match_id}"),
            None,
            &phase_rule(),
        )
        .await
    }

    async fn coregame_match_id(&mut self, match_id: Option<&str>) -> Result<String, Error> {
        match match_id {
            Some(id) => Ok(id.to_string()),
            None => {
                let player = self.coregame_fetch_player().await?;
                player
                    .get("MatchID")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .ok_or(Error::MissingField("MatchID"))
            }
        }
    }
}
