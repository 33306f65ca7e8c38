//! Store endpoints.

use pvpnet_routes::EndpointKind;
use serde_json::Value;

use crate::{Client, Error};

/// The `skin_level` entitlement item type, the default for
/// [`Client::store_fetch_entitlements`]. Other item types (chromas,
/// agents, buddies, sprays, cards, titles) have their own UUIDs,
/// correlatable with [`Client::fetch_content`].
pub const DEFAULT_ITEM_TYPE: &str = "e7c63390-eda7-46e0-bb7a-a6abdacd2433";

impl Client {
    /// `Store_GetOffers`: prices for all store items.
    pub async fn store_fetch_offers(&mut self) -> Result<Value, Error> {
        self.fetch(EndpointKind::PlayerData, "/store/v1/offers/", &[]).await
    }

    /// `Store_GetStorefrontV2`: the currently available store items.
    pub async fn store_fetch_storefront(&mut self) -> Result<Value, Error> {
        let puuid = self.resolved_puuid(None)?;
        self.fetch(
            EndpointKind::PlayerData,
            &format!("/store/v2/storefront/{puuid}"),
            &[],
        )
        .await
    }

    /// `Store_GetWallet`: the player's point balances.
    pub async fn store_fetch_wallet(&mut self) -> Result<Value, Error> {
        let puuid = self.resolved_puuid(None)?;
        self.fetch(
            EndpointKind::PlayerData,
            &format!("/store/v1/wallet/{puuid}"),
            &[],
        )
        .await
    }

    /// `Store_GetOrder`: one order, by the id returned when it was
    /// created.
    pub async fn store_fetch_order(&mut self, order_id: &str) -> Result<Value, Error> {
        self.fetch(
            EndpointKind::PlayerData,
            &format!("/store/v1/order/{order_id}"),
            &[],
        )
        .await
    }

    /// `Store_GetEntitlements`: what the player owns for one item
    /// type. `None` means [`DEFAULT_ITEM_TYPE`] (skin levels).
    pub async fn store_fetch_entitlements(
        &mut self,
        item_type: Option<&str>,
    ) -> Result<Value, Error> {
        let puuid = self.resolved_puuid(None)?;
        let item_type = item_type.unwrap_or(DEFAULT_ITEM_TYPE);
        self.fetch(
            EndpointKind::PlayerData,
            &format!("/store/v1/entitlements/{puuid}/{item_type}"),
            &[],
        )
        .await
    }
}
