//! Contract (battle pass and agent contract) endpoints.

use pvpnet_routes::EndpointKind;
use serde_json::Value;

use crate::{Client, Error};

impl Client {
    /// `ContractDefinitions_Fetch`: definitions for all contracts.
    pub async fn contracts_fetch_definitions(&mut self) -> Result<Value, Error> {
        self.fetch(
            EndpointKind::PlayerData,
            "/contract-definitions/v2/definitions",
            &[],
        )
        .await
    }

    /// `Contracts_Fetch`: the player's contract progress.
    pub async fn contracts_fetch(&mut self) -> Result<Value, Error> {
        let puuid = self.resolved_puuid(None)?;
        self.fetch(
            EndpointKind::PlayerData,
            &format!("/contracts/v1/contracts/{puuid}"),
            &[],
        )
        .await
    }

    /// `Contracts_Activate`: makes a contract the active one.
    pub async fn contracts_activate(&mut self, contract_id: &str) -> Result<Value, Error> {
        let puuid = self.resolved_puuid(None)?;
        self.post(
            EndpointKind::PlayerData,
            &format!("/contracts/v1/contracts/{puuid}/special/{contract_id}"),
            None,
            &[],
        )
        .await
    }

    /// `ContractDefinitions_FetchActiveStory`: the current battle pass.
    pub async fn contracts_fetch_active_story(&mut self) -> Result<Value, Error> {
        self.fetch(
            EndpointKind::PlayerData,
            "/contract-definitions/v2/definitions/story",
            &[],
        )
        .await
    }
}
