//! SANAD API - Async REST client for the SANAD backend
//!
//! Consumes the `/api/v1/customer` surface: JSON bodies, an
//! `Authorization: Bearer <token>` header on authenticated endpoints, and a
//! `{success, message, data}` envelope on every response. All requests carry
//! a fixed client-side timeout; a timeout is handled like any other network
//! error.
//!
//! Endpoint methods are grouped by backend screen: [`auth`], [`profile`]
//! (which also covers home and the emergency trigger), [`devices`],
//! [`helpers`], and [`calls`]. [`fetch`] provides the request-sequencing
//! guard screens use to discard out-of-order responses.

pub mod auth;
pub mod calls;
pub mod client;
pub mod devices;
pub mod error;
pub mod fetch;
pub mod helpers;
pub mod profile;

pub use client::ApiClient;
pub use error::{Error, Result, GENERIC_FAILURE};
pub use fetch::{FetchGuard, FetchTicket};
