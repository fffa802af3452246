//! Profile and home-screen endpoints

use crate::client::ApiClient;
use crate::error::Result;
use sanad_core::{HomeData, ProfileData, TriggerCallData, UpdateProfileRequest};
use tracing::info;

impl ApiClient {
    /// `GET /screen/profile/data` — the authenticated profile.
    pub async fn profile(&self) -> Result<ProfileData> {
        self.get("/screen/profile/data").await
    }

    /// `POST /screen/profile/update` — edit the profile.
    ///
    /// Callers pass the returned customer to the session's refresh-user
    /// operation so cached display data stays consistent.
    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<ProfileData> {
        self.post("/screen/profile/update", request).await
    }

    /// `GET /screen/home/data` — profile plus dashboard counters.
    pub async fn home(&self) -> Result<HomeData> {
        self.get("/screen/home/data").await
    }

    /// `GET /screen/home/trigger/call/{customer_id}` — start an emergency
    /// call cascade to the account's helpers.
    pub async fn trigger_call(&self, customer_id: i64) -> Result<TriggerCallData> {
        let data: TriggerCallData = self
            .get(&format!("/screen/home/trigger/call/{customer_id}"))
            .await?;
        info!(
            "Emergency call {} started ({})",
            data.response.customer_call_uuid, data.response.status
        );
        Ok(data)
    }
}
