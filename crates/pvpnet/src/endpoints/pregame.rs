//! Pre-game (agent select) endpoints.
//!
//! Every method here declares the same status rule: a 404 from the
//! pregame service means the player is not in agent select right now,
//! surfaced as [`DomainError::Phase`] rather than a bare status code.

use pvpnet_routes::EndpointKind;
use reqwest::StatusCode;
use serde_json::Value;

use crate::{Client, DomainError, Error};

fn phase_rule() -> [(StatusCode, DomainError); 1] {
    [(
        StatusCode::NOT_FOUND,
        DomainError::Phase("You are not in a pre-game".into()),
    )]
}

impl Client {
    /// `Pregame_GetPlayer`: the id of the match in agent select.
    pub async fn pregame_fetch_player(&mut self) -> Result<Value, Error> {
        let puuid = self.resolved_puuid(None)?;
        self.fetch(
            EndpointKind::GameServer,
            &format!("/pregame/v1/players/{puuid}"),
            &phase_rule(),
        )
        .await
    }

    /// `Pregame_GetMatch`: info for a match in agent select.
    /// `match_id: None` means the player's current one.
    pub async fn pregame_fetch_match(&mut self, match_id: Option<&str>) -> Result<Value, Error> {
        let match_id = self.pregame_match_id(match_id).await?;
        self.fetch(
            EndpointKind::GameServer,
            &format!("/pregame/v1/matches/{match_id}"),
            &phase_rule(),
        )
        .await
    }

    /// `Pregame_GetMatchLoadouts`: skins and sprays for a match in
    /// agent select.
    pub async fn pregame_fetch_match_loadouts(
        &mut self,
        match_id: Option<&str>,
    ) -> Result<Value, Error> {
        let match_id = self.pregame_match_id(match_id).await?;
        self.fetch(
            EndpointKind::GameServer,
            &format!("/pregame/v1/matches/{match_id}/loadouts"),
            &phase_rule(),
        )
        .await
    }

    /// `Pregame_FetchChatToken`.
    pub async fn pregame_fetch_chat_token(
        &mut self,
        match_id: Option<&str>,
    ) -> Result<Value, Error> {
        let match_id = self.pregame_match_id(match_id).await?;
        self.fetch(
            EndpointKind::GameServer,
            &format!("/pregame/v1/matches/{match_id}/chattoken"),
            &phase_rule(),
        )
        .await
    }

    /// `Pregame_FetchVoiceToken`.
    pub async fn pregame_fetch_voice_token(
        &mut self,
        match_id: Option<&str>,
    ) -> Result<Value, Error> {
        let match_id = self.pregame_match_id(match_id).await?;
        self.fetch(
            EndpointKind::GameServer,
            &format!("/pregame/v1/matches/{match_id}/voicetoken"),
            &phase_rule(),
        )
        .await
    }

    /// `Pregame_SelectCharacter`: hovers an agent.
    pub async fn pregame_select_character(
        &mut self,
        agent_id: &str,
        match_id: Option<&str>,
    ) -> Result<Value, Error> {
        let match_id = self.pregame_match_id(match_id).await?;
        self.post(
            EndpointKind::GameServer,
            &format!("/pregame/v1/matches/{match_id}/select/{agent_id}"),
            None,
            &phase_rule(),
        )
        .await
    }

    /// `Pregame_LockCharacter`: locks an agent in.
    pub async fn pregame_lock_character(
        &mut self,
        agent_id: &str,
        match_id: Option<&str>,
    ) -> Result<Value, Error> {
        let match_id = self.pregame_match_id(match_id).await?;
        self.post(
            EndpointKind::GameServer,
            &format!("/pregame/v1/matches/{match_id}/lock/{agent_id}"),
            None,
            &phase_rule(),
        )
        .await
    }

    /// `Pregame_QuitMatch`: dodges the match in agent select.
    pub async fn pregame_quit_match(&mut self, match_id: Option<&str>) -> Result<Value, Error> {
        let match_id = self.pregame_match_id(match_id).await?;
        self.post(
            EndpointKind::GameServer,
            &format!("/pregame/v1/matches/{match_id}/quit"),
            None,
            &phase_rule(),
        )
        .await
    }

    async fn pregame_match_id(&mut self, match_id: Option<&str>) -> Result<String, Error> {
        match match_id {
            Some(id) => Ok(id.to_string()),
            None => {
                let player = self.pregame_fetch_player().await?;
                player
                    .get("MatchID")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .ok_or(Error::MissingField("MatchID"))
            }
        }
    }
}
