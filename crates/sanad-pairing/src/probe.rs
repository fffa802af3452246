//! Camera capability probe
//!
//! Whether a camera is usable is decided exactly once, when the flow opens,
//! and mapped to a distinct rendering branch. Availability checks never live
//! inside the flow's business logic.

use std::future::Future;

/// Result of probing the camera capability at flow-open time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraAccess {
    /// Camera exists and permission was granted
    Available,
    /// Camera exists but permission was denied; fall back to manual entry
    Denied,
    /// No camera on this platform or build; fall back to manual entry
    Unavailable,
}

/// One-time check of whether the camera is usable.
///
/// The flow calls this once per presentation and never retries permission
/// automatically.
pub trait CameraProbe {
    fn probe(&self) -> impl Future<Output = CameraAccess> + Send;
}

/// A probe with a predetermined answer.
///
/// Used where the answer is known up front: headless builds report
/// `Unavailable`, tests script whichever branch they exercise.
#[derive(Debug, Clone, Copy)]
pub struct FixedProbe(pub CameraAccess);

impl CameraProbe for FixedProbe {
    async fn probe(&self) -> CameraAccess {
        self.0
    }
}
