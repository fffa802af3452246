//! SANAD Core - Shared types and backend data model
//!
//! This crate provides the foundational types used across all SANAD client
//! components: the API configuration, the `{success, message, data}` response
//! envelope, the backend entity model, and device-identifier validation.

pub mod config;
pub mod envelope;
pub mod ident;
pub mod model;

pub use config::ApiConfig;
pub use envelope::ApiEnvelope;
pub use ident::{DeviceUuid, InvalidDeviceUuid};
pub use model::{
    AddDeviceRequest, AddHelperRequest, AuthData, Customer, CustomerCall, CustomerCallsData,
    Device, DevicesData, Helper, HelperCall, HelperCallsData, HelperPivot, HelpersData, HomeData,
    LoginRequest, ProfileData, RegisterRequest, ResetPasswordRequest, TriggerCallData,
    TriggerResponse, UpdateHelperRequest, UpdateProfileRequest,
};
