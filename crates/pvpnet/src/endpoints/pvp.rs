//! General PvP endpoints: content, progression, MMR, match history, and
//! game configuration.

use pvpnet_routes::{EndpointKind, Queue, Region};
use serde_json::Value;

use crate::{Client, Error};

impl Client {
    /// `Content_FetchContent`: names and ids for game content such as
    /// agents, maps, and guns.
    pub async fn fetch_content(&mut self) -> Result<Value, Error> {
        self.fetch(EndpointKind::Shared, "/content-service/v2/content", &[])
            .await
    }

    /// `AccountXP_GetPlayer`: account level, XP, and XP history for
    /// the acting player.
    pub async fn fetch_account_xp(&mut self) -> Result<Value, Error> {
        let puuid = self.resolved_puuid(None)?;
        self.fetch(
            EndpointKind::PlayerData,
            &format!("/account-xp/v1/players/{puuid}"),
            &[],
        )
        .await
    }

    /// `playerLoadoutUpdate`: the player's current loadout.
    pub async fn fetch_player_loadout(&mut self) -> Result<Value, Error> {
        let puuid = self.resolved_puuid(None)?;
        self.fetch(
            EndpointKind::PlayerData,
            &format!("/personalization/v2/players/{puuid}/playerloadout"),
            &[],
        )
        .await
    }

    /// `playerLoadoutUpdate`: replaces the player's loadout. Use the
    /// value from [`Client::fetch_player_loadout`] without properties
    /// like `Subject` and `Version`; changes apply from the next game.
    pub async fn put_player_loadout(&mut self, loadout: Value) -> Result<Value, Error> {
        let puuid = self.resolved_puuid(None)?;
        self.put(
            EndpointKind::PlayerData,
            &format!("/personalization/v2/players/{puuid}/playerloadout"),
            Some(loadout),
            &[],
        )
        .await
    }

    /// `MMR_FetchPlayer`: matchmaking rating for a player.
    pub async fn fetch_mmr(&mut self, puuid: Option<&str>) -> Result<Value, Error> {
        let puuid = self.resolved_puuid(puuid)?;
        self.fetch(EndpointKind::PlayerData, &format!("/mmr/v1/players/{puuid}"), &[])
            .await
    }

    /// `MatchHistory_FetchMatchHistory`: recent matches for a player.
    /// Pass [`Queue::Null`] for no queue filter.
    pub async fn fetch_match_history(
        &mut self,
        puuid: Option<&str>,
        start_index: u32,
        end_index: u32,
        queue: Queue,
    ) -> Result<Value, Error> {
        let puuid = self.resolved_puuid(puuid)?;
        let mut path = format!(
            "/match-history/v1/history/{puuid}?startIndex={start_index}&endIndex={end_index}"
        );
        if queue != Queue::Null {
            path.push_str(&format!("&queue={queue}"));
        }
        self.fetch(EndpointKind::PlayerData, &path, &[]).await
    }

    /// Full info for a finished match, including damage and kill
    /// positions, same as the official API with a production key.
    pub async fn fetch_match_details(&mut self, match_id: &str) -> Result<Value, Error> {
        self.fetch(
            EndpointKind::PlayerData,
            &format!("/match-details/v1/matches/{match_id}"),
            &[],
        )
        .await
    }

    /// `MMR_FetchCompetitiveUpdates`: recent games and how they
    /// changed ranking.
    pub async fn fetch_competitive_updates(
        &mut self,
        puuid: Option<&str>,
        start_index: u32,
        end_index: u32,
        queue: Queue,
    ) -> Result<Value, Error> {
        let puuid = self.resolved_puuid(puuid)?;
        self.fetch(
            EndpointKind::PlayerData,
            &format!(
                "/mmr/v1/players/{puuid}/competitiveupdates?startIndex={start_index}&endIndex={end_index}&queue={queue}"
            ),
            &[],
        )
        .await
    }

    /// `MMR_FetchLeaderboard`: the competitive leaderboard for a
    /// season. `season: None` means the live season.
    pub async fn fetch_leaderboard(
        &mut self,
        season: Option<&str>,
        start_index: u32,
        size: u32,
        region: Region,
    ) -> Result<Value, Error> {
        let season = match season {
            Some(s) => s.to_string(),
            None => self.live_season().await?,
        };
        self.fetch(
            EndpointKind::PlayerData,
            &format!(
                "/mmr/v1/leaderboards/affinity/{region}/queue/competitive/season/{season}?startIndex={start_index}&size={size}"
            ),
            &[],
        )
        .await
    }

    /// `Restrictions_FetchPlayerRestrictionsV2`: gameplay penalties on
    /// the account.
    pub async fn fetch_player_restrictions(&mut self) -> Result<Value, Error> {
        self.fetch(EndpointKind::PlayerData, "/restrictions/v2/penalties", &[])
            .await
    }

    /// `ItemProgressionDefinitionsV2_Fetch`: details for item
    /// upgrades.
    pub async fn fetch_item_progression_definitions(&mut self) -> Result<Value, Error> {
        self.fetch(
            EndpointKind::PlayerData,
            "/contract-definitions/v3/item-upgrades",
            &[],
        )
        .await
    }

    /// `Config_FetchConfig`: internal game configuration for this
    /// client's region.
    pub async fn fetch_config(&mut self) -> Result<Value, Error> {
        let region = self.region();
        self.fetch(EndpointKind::Shared, &format!("/v1/config/{region}"), &[])
            .await
    }

    /// The UUID of the live competitive season, read off the acting
    /// player's latest competitive update.
    pub(crate) async fn live_season(&mut self) -> Result<String, Error> {
        let mmr = self.fetch_mmr(None).await?;
        mmr.pointer("/LatestCompetitiveUpdate/SeasonID")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(Error::MissingField("LatestCompetitiveUpdate.SeasonID"))
    }
}
