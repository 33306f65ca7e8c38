//! Game session state endpoints.

use pvpnet_routes::EndpointKind;
use serde_json::Value;

use crate::{Client, Error};

impl Client {
    /// `Session_Get`: the player's current session state.
    pub async fn session_fetch(&mut self) -> Result<Value, Error> {
        let puuid = self.resolved_puuid(None)?;
        self.fetch(
            EndpointKind::GameServer,
            &format!("/session/v1/sessions/{puuid}"),
            &[],
        )
        .await
    }

    /// `Session_ReConnect`.
    pub async fn session_reconnect(&mut self) -> Result<Value, Error> {
        let puuid = self.resolved_puuid(None)?;
        self.fetch(
            EndpointKind::GameServer,
            &format!("/session/v1/sessions/{puuid}/reconnect"),
            &[],
        )
        .await
    }
}
