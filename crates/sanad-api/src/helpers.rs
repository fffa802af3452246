//! Helpers-screen endpoints

use crate::client::ApiClient;
use crate::error::Result;
use sanad_core::{AddHelperRequest, Helper, HelpersData, UpdateHelperRequest};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct HelperData {
    helper: Helper,
}

impl ApiClient {
    /// `GET /screen/helpers/data` — list the account's emergency contacts.
    pub async fn helpers(&self) -> Result<HelpersData> {
        self.get("/screen/helpers/data").await
    }

    /// `GET /screen/helpers/{id}` — fetch a single helper.
    pub async fn helper(&self, helper_id: i64) -> Result<Helper> {
        let data: HelperData = self.get(&format!("/screen/helpers/{helper_id}")).await?;
        Ok(data.helper)
    }

    /// `POST /screen/helpers/add` — attach a new helper to the account.
    pub async fn add_helper(&self, request: &AddHelperRequest) -> Result<Helper> {
        let data: HelperData = self.post("/screen/helpers/add", request).await?;
        Ok(data.helper)
    }

    /// `POST /screen/helpers/{id}/update` — edit a helper's details or
    /// call priority.
    pub async fn update_helper(
        &self,
        helper_id: i64,
        request: &UpdateHelperRequest,
    ) -> Result<Helper> {
        let data: HelperData = self
            .post(&format!("/screen/helpers/{helper_id}/update"), request)
            .await?;
        Ok(data.helper)
    }

    /// `DELETE /screen/helpers/{id}/delete` — detach a helper.
    pub async fn delete_helper(&self, helper_id: i64) -> Result<()> {
        self.delete(&format!("/screen/helpers/{helper_id}/delete"))
            .await
    }
}
