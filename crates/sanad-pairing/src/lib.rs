//! SANAD Pairing - Device pairing flow
//!
//! Captures a candidate device identifier via code scanning or manual text
//! entry, validates its shape, and submits it to the backend to associate
//! the account with that device.
//!
//! # Flow
//!
//! 1. On open, the camera capability is probed exactly once
//! 2. An available camera lands in Scanning; denied or absent cameras fall
//!    back to ManualEntry, where pairing can still complete by typing an
//!    identifier
//! 3. The first decode engages a one-shot lock against duplicate frames
//! 4. The candidate is shape-checked locally before any network call
//! 5. Submission goes through the [`PairDevice`] trait; on success the flow
//!    invokes its success callback and closes, on failure it surfaces the
//!    backend message and returns to the capture state
//!
//! # Example
//!
//! ```no_run
//! use sanad_pairing::{CameraAccess, FixedProbe, PairingFlow, ScanOutcome};
//!
//! async fn example(pairer: &impl sanad_pairing::PairDevice) {
//!     let mut flow = PairingFlow::new();
//!     flow.open(&FixedProbe(CameraAccess::Available)).await;
//!
//!     if let ScanOutcome::Accepted(uuid) = flow.on_scan("11111111-1111-4111-8111-111111111111") {
//!         let outcome = flow.submit(pairer, uuid).await;
//!         println!("{outcome:?}");
//!     }
//! }
//! ```

pub mod flow;
pub mod probe;
pub mod scan;

pub use flow::{
    FlowState, PairDevice, PairRejection, PairingFlow, ScanOutcome, SubmitOutcome, SubmitTicket,
};
pub use probe::{CameraAccess, CameraProbe, FixedProbe};
pub use scan::{LineScanner, ScanSource, ScriptedScanner};
