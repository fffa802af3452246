//! SANAD Session - Authentication session lifecycle
//!
//! Owns the bearer token and the authenticated user profile, persists them
//! together to a secure key/value file, and exposes them to the rest of the
//! client behind an explicit four-operation mutation surface.
//!
//! # Lifecycle
//!
//! 1. App start: `Session::initialize()` restores a persisted token/user
//!    pair; until it completes the session reports `SessionState::Pending`
//!    and screens must not redirect on session presence
//! 2. Login/registration: `Session::establish(token, user)` persists and
//!    adopts both values
//! 3. Profile edit: `Session::refresh_user(user)` replaces the profile only
//! 4. Logout: `Session::clear()` removes both values, in memory and on disk
//!
//! Token and user are set and cleared together; the session never holds one
//! without the other.

pub mod session;
pub mod storage;

pub use session::{Session, SessionError, SessionResult, SessionState};
pub use storage::{SessionStorage, StorageError, StorageResult};
