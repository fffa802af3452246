//! The pairing flow state machine
//!
//! Drives a candidate device identifier from capture (scan or manual entry)
//! through validation and submission. States:
//!
//! ```text
//! Idle -> PermissionPending -> Scanning ----\
//!                          \-> ManualEntry --+-> Submitting -> Idle
//! ```
//!
//! A denied or absent camera falls back to manual entry without retrying
//! permission. The first decode engages a one-shot lock so repeated frames of
//! the same code cannot double-submit. A dismissed flow never applies the
//! result of an in-flight submission.

use crate::probe::{CameraAccess, CameraProbe};
use sanad_core::{DeviceUuid, InvalidDeviceUuid};
use std::future::Future;
use thiserror::Error;
use tracing::{debug, info, warn};

/// User-facing rejection from a pairing submission (backend message or a
/// generic fallback, already resolved by the submitter).
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct PairRejection(pub String);

/// Submits a validated candidate to the backend for association with the
/// current account.
pub trait PairDevice {
    fn pair_device(
        &self,
        uuid: &DeviceUuid,
    ) -> impl Future<Output = Result<(), PairRejection>> + Send;
}

/// Flow states, as rendered by the hosting screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// Not presented
    Idle,
    /// Camera permission request in flight
    PermissionPending,
    /// Camera live, awaiting a decode
    Scanning,
    /// Camera unusable, text field shown
    ManualEntry,
    /// Candidate dispatched to the backend
    Submitting,
}

/// Which capture branch the flow entered after the probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureMode {
    Scanning,
    ManualEntry,
}

impl CaptureMode {
    fn state(self) -> FlowState {
        match self {
            CaptureMode::Scanning => FlowState::Scanning,
            CaptureMode::ManualEntry => FlowState::ManualEntry,
        }
    }
}

/// Outcome of offering a scanned payload to the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Not scanning, or the one-shot lock is engaged
    Ignored,
    /// Payload failed shape validation; message recorded, lock reset
    Rejected,
    /// Payload validated; caller should submit it
    Accepted(DeviceUuid),
}

/// Outcome of a completed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Pairing succeeded; the flow has closed
    Paired(String),
    /// Backend rejected the candidate; flow returned to its capture state
    Failed(String),
    /// The flow was dismissed while the submission was in flight; no state
    /// was updated
    Stale,
}

/// Ticket tying an in-flight submission to the flow presentation that
/// started it.
#[derive(Debug)]
pub struct SubmitTicket {
    generation: u64,
    raw: String,
}

/// The device pairing flow.
///
/// Single-owner state machine; asynchronous submission is split into
/// [`PairingFlow::begin_submit`] / [`PairingFlow::complete_submit`] so a
/// dismissal between the two leaves the completed result unapplied.
pub struct PairingFlow {
    state: FlowState,
    capture: CaptureMode,
    scan_locked: bool,
    manual_input: String,
    /// Bumped on every close; stale submissions compare against it
    generation: u64,
    last_message: Option<String>,
    on_success: Option<Box<dyn FnMut(&str) + Send>>,
}

impl PairingFlow {
    pub fn new() -> Self {
        Self {
            state: FlowState::Idle,
            capture: CaptureMode::ManualEntry,
            scan_locked: false,
            manual_input: String::new(),
            generation: 0,
            last_message: None,
            on_success: None,
        }
    }

    /// Register a callback invoked with the raw captured string on
    /// successful pairing (e.g. to refresh the caller's device list).
    pub fn with_on_success(mut self, callback: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_success = Some(Box::new(callback));
        self
    }

    /// Present the flow, probing the camera capability exactly once.
    ///
    /// Available cameras land in Scanning; denied or absent cameras land in
    /// ManualEntry, with no automatic permission retry. No-op unless Idle.
    pub async fn open<P: CameraProbe>(&mut self, probe: &P) -> FlowState {
        if self.state != FlowState::Idle {
            return self.state;
        }
        self.state = FlowState::PermissionPending;
        let access = probe.probe().await;
        self.capture = match access {
            CameraAccess::Available => CaptureMode::Scanning,
            CameraAccess::Denied | CameraAccess::Unavailable => {
                debug!("Camera {access:?}, falling back to manual entry");
                CaptureMode::ManualEntry
            }
        };
        self.state = self.capture.state();
        self.state
    }

    /// Offer a decoded payload to the flow.
    ///
    /// The first decode engages the one-shot lock; further decodes are
    /// ignored until the lock is reset. An invalid payload surfaces a
    /// rejection message and resets the lock so scanning can continue.
    pub fn on_scan(&mut self, payload: &str) -> ScanOutcome {
        if self.state != FlowState::Scanning || self.scan_locked {
            return ScanOutcome::Ignored;
        }
        self.scan_locked = true;
        match DeviceUuid::parse(payload) {
            Ok(uuid) => ScanOutcome::Accepted(uuid),
            Err(InvalidDeviceUuid(_)) => {
                warn!("Scanned payload is not a valid device identifier");
                self.last_message =
                    Some("Scanned code does not contain a valid device identifier".to_string());
                self.scan_locked = false;
                ScanOutcome::Rejected
            }
        }
    }

    /// Replace the manual-entry text. Preserved across failed submissions.
    pub fn set_manual_input(&mut self, text: impl Into<String>) {
        self.manual_input = text.into();
    }

    /// Validate the typed text, recording a rejection message on failure.
    pub fn validate_manual(&mut self) -> Option<DeviceUuid> {
        match DeviceUuid::parse(self.manual_input.trim()) {
            Ok(uuid) => Some(uuid),
            Err(InvalidDeviceUuid(_)) => {
                self.last_message =
                    Some("Entered text is not a valid device identifier".to_string());
                None
            }
        }
    }

    /// Move to Submitting and hand back a ticket for the dispatch.
    ///
    /// `None` unless the flow is in a capture state.
    pub fn begin_submit(&mut self, candidate: &DeviceUuid) -> Option<SubmitTicket> {
        match self.state {
            FlowState::Scanning | FlowState::ManualEntry => {
                self.state = FlowState::Submitting;
                Some(SubmitTicket {
                    generation: self.generation,
                    raw: candidate.as_str().to_string(),
                })
            }
            _ => None,
        }
    }

    /// Apply the result of a dispatched submission.
    ///
    /// A ticket from a presentation that has since been dismissed is
    /// discarded without touching any state.
    pub fn complete_submit(
        &mut self,
        ticket: SubmitTicket,
        result: Result<(), PairRejection>,
    ) -> SubmitOutcome {
        if ticket.generation != self.generation {
            debug!("Discarding stale pairing submission");
            return SubmitOutcome::Stale;
        }
        match result {
            Ok(()) => {
                info!("Device {} paired", ticket.raw);
                if let Some(callback) = self.on_success.as_mut() {
                    callback(&ticket.raw);
                }
                self.dismiss();
                SubmitOutcome::Paired(ticket.raw)
            }
            Err(PairRejection(message)) => {
                warn!("Pairing submission failed: {message}");
                // Back to the prior capture state; manual text survives
                self.state = self.capture.state();
                self.scan_locked = false;
                self.last_message = Some(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Begin, dispatch, and complete a submission in one call.
    ///
    /// Convenience for single-task drivers; concurrent dismissal handling
    /// needs the split begin/complete form.
    pub async fn submit<P: PairDevice>(
        &mut self,
        pairer: &P,
        candidate: DeviceUuid,
    ) -> SubmitOutcome {
        let Some(ticket) = self.begin_submit(&candidate) else {
            return SubmitOutcome::Stale;
        };
        let result = pairer.pair_device(&candidate).await;
        self.complete_submit(ticket, result)
    }

    /// Dismiss the flow. Any in-flight submission's completion is discarded.
    pub fn close(&mut self) {
        if self.state != FlowState::Idle {
            debug!("Pairing flow closed from {:?}", self.state);
        }
        self.dismiss();
    }

    fn dismiss(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.state = FlowState::Idle;
        self.scan_locked = false;
        self.manual_input.clear();
        self.last_message = None;
    }

    /// Re-arm scanning after the consumer has handled a decode.
    pub fn reset_scan_lock(&mut self) {
        self.scan_locked = false;
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// The most recent rejection or backend error message, if any
    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    /// Current manual-entry text
    pub fn manual_input(&self) -> &str {
        &self.manual_input
    }
}

impl Default for PairingFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::FixedProbe;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const VALID_UUID: &str = "11111111-1111-4111-8111-111111111111";

    /// Pairer with a scripted result and a call counter.
    struct FakePairer {
        result: Result<(), PairRejection>,
        calls: Arc<AtomicUsize>,
    }

    impl FakePairer {
        fn ok() -> Self {
            Self {
                result: Ok(()),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn rejecting(message: &str) -> Self {
            Self {
                result: Err(PairRejection(message.to_string())),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl PairDevice for FakePairer {
        async fn pair_device(&self, _uuid: &DeviceUuid) -> Result<(), PairRejection> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    #[tokio::test]
    async fn test_open_branches_on_probe() {
        let mut flow = PairingFlow::new();
        assert_eq!(
            flow.open(&FixedProbe(CameraAccess::Available)).await,
            FlowState::Scanning
        );

        let mut flow = PairingFlow::new();
        assert_eq!(
            flow.open(&FixedProbe(CameraAccess::Denied)).await,
            FlowState::ManualEntry
        );

        let mut flow = PairingFlow::new();
        assert_eq!(
            flow.open(&FixedProbe(CameraAccess::Unavailable)).await,
            FlowState::ManualEntry
        );
    }

    #[tokio::test]
    async fn test_invalid_scan_rejected_locally() {
        let pairer = FakePairer::ok();
        let mut flow = PairingFlow::new();
        flow.open(&FixedProbe(CameraAccess::Available)).await;

        assert_eq!(flow.on_scan("not-a-uuid"), ScanOutcome::Rejected);
        assert_eq!(flow.state(), FlowState::Scanning);
        assert!(flow.last_message().unwrap().contains("not"));
        // Lock was reset, the next frame is considered
        assert!(matches!(flow.on_scan(VALID_UUID), ScanOutcome::Accepted(_)));
        // Nothing reached the network for the invalid payload
        assert_eq!(pairer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_scan_lock_is_one_shot() {
        let mut flow = PairingFlow::new();
        flow.open(&FixedProbe(CameraAccess::Available)).await;

        assert!(matches!(flow.on_scan(VALID_UUID), ScanOutcome::Accepted(_)));
        // Repeated frames of the same code are ignored until reset
        assert_eq!(flow.on_scan(VALID_UUID), ScanOutcome::Ignored);
        flow.reset_scan_lock();
        assert!(matches!(flow.on_scan(VALID_UUID), ScanOutcome::Accepted(_)));
    }

    #[tokio::test]
    async fn test_successful_pairing_closes_and_calls_back() {
        let paired = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = paired.clone();
        let mut flow = PairingFlow::new()
            .with_on_success(move |raw| sink.lock().unwrap().push(raw.to_string()));
        flow.open(&FixedProbe(CameraAccess::Available)).await;

        let ScanOutcome::Accepted(uuid) = flow.on_scan(VALID_UUID) else {
            panic!("scan should be accepted");
        };
        let outcome = flow.submit(&FakePairer::ok(), uuid).await;
        assert_eq!(outcome, SubmitOutcome::Paired(VALID_UUID.to_string()));
        assert_eq!(flow.state(), FlowState::Idle);
        assert_eq!(paired.lock().unwrap().as_slice(), &[VALID_UUID.to_string()]);
    }

    #[tokio::test]
    async fn test_backend_rejection_returns_to_scanning() {
        let called = Arc::new(AtomicUsize::new(0));
        let counter = called.clone();
        let mut flow = PairingFlow::new().with_on_success(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        flow.open(&FixedProbe(CameraAccess::Available)).await;

        let ScanOutcome::Accepted(uuid) = flow.on_scan(VALID_UUID) else {
            panic!("scan should be accepted");
        };
        let pairer = FakePairer::rejecting("Device already assigned");
        let outcome = flow.submit(&pairer, uuid).await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed("Device already assigned".to_string())
        );
        assert_eq!(flow.state(), FlowState::Scanning);
        assert_eq!(flow.last_message(), Some("Device already assigned"));
        // Lock reset so the user can rescan
        assert!(matches!(flow.on_scan(VALID_UUID), ScanOutcome::Accepted(_)));
        // Success callback never fired
        assert_eq!(called.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_manual_entry_after_denied_camera() {
        let mut flow = PairingFlow::new();
        flow.open(&FixedProbe(CameraAccess::Denied)).await;
        assert_eq!(flow.state(), FlowState::ManualEntry);

        flow.set_manual_input("nonsense");
        assert!(flow.validate_manual().is_none());
        assert!(flow.last_message().is_some());

        flow.set_manual_input(VALID_UUID);
        let uuid = flow.validate_manual().unwrap();
        let pairer = FakePairer::ok();
        let outcome = flow.submit(&pairer, uuid).await;
        assert_eq!(outcome, SubmitOutcome::Paired(VALID_UUID.to_string()));
        assert_eq!(pairer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_manual_input_survives_failed_submit() {
        let mut flow = PairingFlow::new();
        flow.open(&FixedProbe(CameraAccess::Unavailable)).await;

        flow.set_manual_input(VALID_UUID);
        let uuid = flow.validate_manual().unwrap();
        let outcome = flow.submit(&FakePairer::rejecting("Device already assigned"), uuid).await;
        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert_eq!(flow.state(), FlowState::ManualEntry);
        assert_eq!(flow.manual_input(), VALID_UUID);
    }

    #[tokio::test]
    async fn test_dismissal_discards_in_flight_submission() {
        let mut flow = PairingFlow::new();
        flow.open(&FixedProbe(CameraAccess::Available)).await;

        let ScanOutcome::Accepted(uuid) = flow.on_scan(VALID_UUID) else {
            panic!("scan should be accepted");
        };
        let ticket = flow.begin_submit(&uuid).unwrap();
        assert_eq!(flow.state(), FlowState::Submitting);

        // User closes the modal while the request is in flight
        flow.close();
        assert_eq!(flow.state(), FlowState::Idle);

        let outcome = flow.complete_submit(ticket, Ok(()));
        assert_eq!(outcome, SubmitOutcome::Stale);
        assert_eq!(flow.state(), FlowState::Idle);
    }

    #[tokio::test]
    async fn test_scans_ignored_when_not_scanning() {
        let mut flow = PairingFlow::new();
        assert_eq!(flow.on_scan(VALID_UUID), ScanOutcome::Ignored);

        flow.open(&FixedProbe(CameraAccess::Denied)).await;
        assert_eq!(flow.on_scan(VALID_UUID), ScanOutcome::Ignored);
    }
}
