//! Call-history endpoints, for both call directions

use crate::client::ApiClient;
use crate::error::Result;
use sanad_core::{CustomerCall, CustomerCallsData, HelperCall, HelperCallsData};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CustomerCallData {
    customer_call: CustomerCall,
}

#[derive(Debug, Deserialize)]
struct HelperCallData {
    helper_call: HelperCall,
}

impl ApiClient {
    /// `GET /screen/customer-calls/data` — emergency calls triggered by the
    /// customer's devices.
    pub async fn customer_calls(&self) -> Result<CustomerCallsData> {
        self.get("/screen/customer-calls/data").await
    }

    /// `GET /screen/customer-calls/{id}` — one call with its helper legs.
    pub async fn customer_call(&self, call_id: i64) -> Result<CustomerCall> {
        let data: CustomerCallData = self
            .get(&format!("/screen/customer-calls/{call_id}"))
            .await?;
        Ok(data.customer_call)
    }

    /// `DELETE /screen/customer-calls/{id}/delete`
    pub async fn delete_customer_call(&self, call_id: i64) -> Result<()> {
        self.delete(&format!("/screen/customer-calls/{call_id}/delete"))
            .await
    }

    /// `GET /screen/helper-calls/data` — the outbound legs placed to helpers.
    pub async fn helper_calls(&self) -> Result<HelperCallsData> {
        self.get("/screen/helper-calls/data").await
    }

    /// `GET /screen/helper-calls/{id}`
    pub async fn helper_call(&self, call_id: i64) -> Result<HelperCall> {
        let data: HelperCallData = self.get(&format!("/screen/helper-calls/{call_id}")).await?;
        Ok(data.helper_call)
    }

    /// `DELETE /screen/helper-calls/{id}/delete`
    pub async fn delete_helper_call(&self, call_id: i64) -> Result<()> {
        self.delete(&format!("/screen/helper-calls/{call_id}/delete"))
            .await
    }
}
