//! Devices-screen endpoints and the pairing submitter

use crate::client::ApiClient;
use crate::error::Result;
use sanad_core::{AddDeviceRequest, Device, DeviceUuid, DevicesData};
use sanad_pairing::{PairDevice, PairRejection};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct DeviceData {
    device: Device,
}

impl ApiClient {
    /// `GET /screen/devices/data` — list the account's paired devices.
    pub async fn devices(&self) -> Result<DevicesData> {
        self.get("/screen/devices/data").await
    }

    /// `GET /screen/devices/{id}` — fetch a single device.
    pub async fn device(&self, device_id: i64) -> Result<Device> {
        let data: DeviceData = self.get(&format!("/screen/devices/{device_id}")).await?;
        Ok(data.device)
    }

    /// `POST /screen/devices/add` — claim a device by its identifier.
    ///
    /// Fails with the backend's message when the identifier is malformed or
    /// already claimed by another account.
    pub async fn add_device(&self, uuid: &DeviceUuid) -> Result<Device> {
        let request = AddDeviceRequest {
            uuid: uuid.as_str().to_string(),
        };
        let data: DeviceData = self.post("/screen/devices/add", &request).await?;
        Ok(data.device)
    }

    /// `DELETE /screen/devices/{id}/delete` — release a device.
    pub async fn delete_device(&self, device_id: i64) -> Result<()> {
        self.delete(&format!("/screen/devices/{device_id}/delete"))
            .await
    }
}

/// The real pairing submitter: backend errors collapse to the user-facing
/// message the flow surfaces.
impl PairDevice for ApiClient {
    async fn pair_device(&self, uuid: &DeviceUuid) -> std::result::Result<(), PairRejection> {
        self.add_device(uuid)
            .await
            .map(|_| ())
            .map_err(|e| PairRejection(e.user_message()))
    }
}
