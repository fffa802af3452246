//! Backend entity model
//!
//! Serde mirrors of the JSON entities served under `/api/v1/customer`. The
//! client never mutates these directly; they are read from `data` payloads
//! and sent back only through the dedicated request bodies below.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated account (patient) profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub disability: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub avatar_full_url: Option<String>,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A paired emergency-call device, owned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: i64,
    pub uuid: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_full_url: Option<String>,
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Per-customer attachment data on a helper (call priority and notes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelperPivot {
    pub customer_id: i64,
    pub helper_id: i64,
    pub priority: i32,
    #[serde(default)]
    pub notes: Option<String>,
}

/// An emergency contact attached to the customer's account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Helper {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub avatar_full_url: Option<String>,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
    #[serde(default)]
    pub pivot: Option<HelperPivot>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// An emergency call triggered from a device, with its status timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerCall {
    pub id: i64,
    pub uuid: String,
    pub customer_id: i64,
    #[serde(default)]
    pub device_id: Option<i64>,
    #[serde(default)]
    pub twilio_call_sid: Option<String>,
    pub status: String,
    #[serde(default)]
    pub initiated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ringing_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub answered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_seconds: Option<i64>,
    #[serde(default)]
    pub help_requested: bool,
    #[serde(default)]
    pub outcome: Option<String>,
    #[serde(default)]
    pub trigger_metadata: Option<serde_json::Value>,
    #[serde(default)]
    pub call_metadata: Option<serde_json::Value>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub retry_count: i32,
    #[serde(default)]
    pub device: Option<Device>,
    #[serde(default)]
    pub helper_calls: Option<Vec<HelperCall>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The outbound leg placed to a helper for one emergency call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelperCall {
    pub id: i64,
    pub uuid: String,
    pub helper_id: i64,
    pub customer_id: i64,
    pub customer_call_id: i64,
    #[serde(default)]
    pub twilio_call_sid: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub priority: i32,
    pub status: String,
    #[serde(default)]
    pub initiated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ringing_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub answered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_seconds: Option<i64>,
    #[serde(default)]
    pub accepted: bool,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub call_metadata: Option<serde_json::Value>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub retry_count: i32,
    #[serde(default)]
    pub helper: Option<Helper>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

// ---- Request bodies ----

/// `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email or phone number
    pub identifier: String,
    pub password: String,
}

/// `POST /auth/register`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disability: Option<String>,
}

/// `POST /auth/reset_password`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub new_password_confirmation: String,
}

/// `POST /screen/devices/add`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddDeviceRequest {
    pub uuid: String,
}

/// `POST /screen/helpers/add`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddHelperRequest {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

/// `POST /screen/helpers/{id}/update`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateHelperRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

/// `POST /screen/profile/update`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disability: Option<String>,
}

// ---- `data` payloads ----

/// `data` for login and register responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthData {
    pub token: String,
    pub customer: Customer,
}

/// `data` for the devices screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevicesData {
    pub devices: Vec<Device>,
}

/// `data` for the helpers screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelpersData {
    pub helpers: Vec<Helper>,
}

/// `data` for the customer-calls screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerCallsData {
    pub customer_calls: Vec<CustomerCall>,
}

/// `data` for the helper-calls screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelperCallsData {
    pub helper_calls: Vec<HelperCall>,
}

/// `data` for the profile screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileData {
    pub customer: Customer,
}

/// `data` for the home screen: the profile plus dashboard counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeData {
    pub customer: Customer,
    #[serde(default)]
    pub helpers_count: u32,
    #[serde(default)]
    pub devices_count: u32,
    #[serde(default)]
    pub customer_calls_count: u32,
    #[serde(default)]
    pub helper_calls_count: u32,
}

/// Inner payload of a trigger-call response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerResponse {
    pub message: String,
    pub customer_call_id: i64,
    pub customer_call_uuid: String,
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// `data` for `GET /screen/home/trigger/call/{customer_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerCallData {
    pub response: TriggerResponse,
}
