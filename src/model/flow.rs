//! Async action flows: location fetch, photo acquisition and spot submission
//!
//! Each flow moves `Idle -> InProgress -> Succeeded | Failed -> Idle`. The
//! outcome of the collaborator call decides the transition and the toast.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use super::toast::{ToastKind, ToastQueue};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhotoSource {
    Camera,
    Library,
}

/// Which user action a flow drives; decides its toast wording
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowKind {
    /// "Locate me" on the spots screen
    NearbyLocation,
    /// Setting the location of a new spot
    SpotLocation,
    Photo(PhotoSource),
    Submit,
}

impl FlowKind {
    pub fn success_message(self) -> &'static str {
        match self {
            FlowKind::NearbyLocation => "Location updated successfully",
            FlowKind::SpotLocation => "Location set successfully",
            FlowKind::Photo(PhotoSource::Library) => "Photo added successfully",
            FlowKind::Photo(PhotoSource::Camera) => "Photo captured successfully",
            FlowKind::Submit => {
                "Hidden spot submitted successfully! It will be reviewed and published soon."
            }
        }
    }

    pub fn permission_message(self) -> &'static str {
        match self {
            FlowKind::NearbyLocation => "Location permission required to discover nearby spots",
            FlowKind::SpotLocation => "Location access required to set spot location",
            FlowKind::Photo(PhotoSource::Library) => "Camera roll permissions required to add photos",
            FlowKind::Photo(PhotoSource::Camera) => "Camera permissions required to take photos",
            FlowKind::Submit => "Permission required to submit spots",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            FlowKind::NearbyLocation | FlowKind::SpotLocation => "Failed to get current location",
            FlowKind::Photo(PhotoSource::Library) => "Failed to pick image. Please try again.",
            FlowKind::Photo(PhotoSource::Camera) => "Failed to take photo. Please try again.",
            FlowKind::Submit => "Failed to submit spot. Please try again.",
        }
    }
}

/// Classified result of a collaborator call
#[derive(Debug)]
pub enum ActionOutcome<T> {
    Success(T),
    PermissionDenied,
    Failed(anyhow::Error),
    /// The user backed out; not an error
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    PermissionDenied,
    OperationFailed,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FlowState<T> {
    Idle,
    InProgress,
    Succeeded(T),
    Failed(FailureKind),
}

/// What a completed [`ActionFlow::run`] hands back to the caller
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution<T> {
    Succeeded(T),
    Failed(FailureKind),
    Cancelled,
    /// Another run of the same flow was still in progress; nothing happened
    Busy,
}

impl<T> Resolution<T> {
    #[cfg(test)]
    pub fn succeeded(self) -> Option<T> {
        match self {
            Resolution::Succeeded(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct ActionFlow<T> {
    kind: FlowKind,
    state: Arc<Mutex<FlowState<T>>>,
}

impl<T: Clone + Send + 'static> ActionFlow<T> {
    pub fn new(kind: FlowKind) -> Self {
        Self {
            kind,
            state: Arc::new(Mutex::new(FlowState::Idle)),
        }
    }

    /// A flow of another kind that shares this one's state, so at most one
    /// of the two can be in progress
    pub fn sharing_state(&self, kind: FlowKind) -> Self {
        Self {
            kind,
            state: Arc::clone(&self.state),
        }
    }

    #[cfg(test)]
    pub async fn state(&self) -> FlowState<T> {
        self.state.lock().await.clone()
    }

    pub async fn is_in_progress(&self) -> bool {
        matches!(*self.state.lock().await, FlowState::InProgress)
    }

    /// Enter `InProgress`, dropping any unread result. Returns `false` when
    /// the flow is already running.
    pub async fn start(&self) -> bool {
        let mut state = self.state.lock().await;
        if matches!(*state, FlowState::InProgress) {
            tracing::debug!(flow = ?self.kind, "Flow already in progress, ignoring");
            return false;
        }
        *state = FlowState::InProgress;
        tracing::debug!(flow = ?self.kind, "Flow started");
        true
    }

    /// Apply the collaborator outcome and show the matching toast
    pub async fn finish(&self, outcome: ActionOutcome<T>, toasts: &ToastQueue) {
        let mut state = self.state.lock().await;
        if !matches!(*state, FlowState::InProgress) {
            tracing::warn!(flow = ?self.kind, "Outcome arrived for a flow that is not running");
            return;
        }

        match outcome {
            ActionOutcome::Success(value) => {
                *state = FlowState::Succeeded(value);
                drop(state);
                tracing::info!(flow = ?self.kind, "Flow succeeded");
                toasts.show(ToastKind::Success, self.kind.success_message()).await;
            }
            ActionOutcome::PermissionDenied => {
                *state = FlowState::Failed(FailureKind::PermissionDenied);
                drop(state);
                tracing::warn!(flow = ?self.kind, "Permission denied");
                toasts.show(ToastKind::Warning, self.kind.permission_message()).await;
            }
            ActionOutcome::Failed(e) => {
                *state = FlowState::Failed(FailureKind::OperationFailed);
                drop(state);
                tracing::error!(flow = ?self.kind, error = %e, "Flow failed");
                toasts.show(ToastKind::Error, self.kind.failure_message()).await;
            }
            ActionOutcome::Cancelled => {
                *state = FlowState::Idle;
                tracing::debug!(flow = ?self.kind, "Flow cancelled by user");
            }
        }
    }

    /// Read the result and return the flow to `Idle`
    pub async fn take(&self) -> FlowState<T> {
        let mut state = self.state.lock().await;
        match *state {
            FlowState::InProgress => FlowState::InProgress,
            _ => std::mem::replace(&mut *state, FlowState::Idle),
        }
    }

    /// Drive one full run: start, await the collaborator (bounded by
    /// `timeout`), apply the outcome and consume it.
    pub async fn run<Fut>(&self, toasts: &ToastQueue, timeout: Duration, operation: Fut) -> Resolution<T>
    where
        Fut: Future<Output = ActionOutcome<T>>,
    {
        if !self.start().await {
            return Resolution::Busy;
        }

        let outcome = match tokio::time::timeout(timeout, operation).await {
            Ok(outcome) => outcome,
            Err(_) => ActionOutcome::Failed(anyhow::anyhow!(
                "no response within {}ms",
                timeout.as_millis()
            )),
        };
        self.finish(outcome, toasts).await;

        match self.take().await {
            FlowState::Succeeded(value) => Resolution::Succeeded(value),
            FlowState::Failed(kind) => Resolution::Failed(kind),
            FlowState::Idle | FlowState::InProgress => Resolution::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(15);

    async fn kinds(toasts: &ToastQueue) -> Vec<ToastKind> {
        toasts.history().await.into_iter().map(|t| t.kind).collect()
    }

    #[tokio::test]
    async fn permission_denied_fails_then_returns_to_idle() {
        let toasts = ToastQueue::default();
        let flow: ActionFlow<String> = ActionFlow::new(FlowKind::SpotLocation);

        assert!(flow.start().await);
        assert_eq!(flow.state().await, FlowState::InProgress);

        flow.finish(ActionOutcome::PermissionDenied, &toasts).await;
        assert_eq!(flow.state().await, FlowState::Failed(FailureKind::PermissionDenied));

        assert_eq!(flow.take().await, FlowState::Failed(FailureKind::PermissionDenied));
        assert_eq!(flow.state().await, FlowState::Idle);

        let history = toasts.history().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].kind, ToastKind::Warning);
        assert_eq!(history[0].message, "Location access required to set spot location");
    }

    #[tokio::test]
    async fn success_carries_the_value_and_shows_success() {
        let toasts = ToastQueue::default();
        let flow = ActionFlow::new(FlowKind::Photo(PhotoSource::Camera));

        let resolution = flow
            .run(&toasts, TIMEOUT, async { ActionOutcome::Success("file:///photo.jpg".to_string()) })
            .await;

        assert_eq!(resolution, Resolution::Succeeded("file:///photo.jpg".to_string()));
        assert_eq!(flow.state().await, FlowState::Idle);
        let current = toasts.current().await.unwrap();
        assert_eq!(current.kind, ToastKind::Success);
        assert_eq!(current.message, "Photo captured successfully");
    }

    #[tokio::test]
    async fn operation_failure_shows_an_error() {
        let toasts = ToastQueue::default();
        let flow: ActionFlow<String> = ActionFlow::new(FlowKind::Photo(PhotoSource::Library));

        let resolution = flow
            .run(&toasts, TIMEOUT, async { ActionOutcome::Failed(anyhow::anyhow!("picker crashed")) })
            .await;

        assert_eq!(resolution, Resolution::Failed(FailureKind::OperationFailed));
        assert_eq!(kinds(&toasts).await, vec![ToastKind::Error]);
        assert_eq!(
            toasts.current().await.map(|t| t.message),
            Some("Failed to pick image. Please try again.".to_string())
        );
    }

    #[tokio::test]
    async fn cancellation_is_silent() {
        let toasts = ToastQueue::default();
        let flow: ActionFlow<String> = ActionFlow::new(FlowKind::Photo(PhotoSource::Library));

        let resolution = flow.run(&toasts, TIMEOUT, async { ActionOutcome::Cancelled }).await;

        assert_eq!(resolution, Resolution::Cancelled);
        assert_eq!(flow.state().await, FlowState::Idle);
        assert!(toasts.history().await.is_empty());
    }

    #[tokio::test]
    async fn second_start_while_running_is_a_no_op() {
        let toasts = ToastQueue::default();
        let flow: ActionFlow<u32> = ActionFlow::new(FlowKind::Submit);

        assert!(flow.start().await);
        assert!(flow.is_in_progress().await);

        let resolution = flow.run(&toasts, TIMEOUT, async { ActionOutcome::Success(7) }).await;
        assert_eq!(resolution, Resolution::Busy);
        assert!(flow.is_in_progress().await);
        assert_eq!(flow.take().await, FlowState::InProgress);
        assert!(toasts.history().await.is_empty());
    }

    #[tokio::test]
    async fn flows_sharing_state_exclude_each_other() {
        let toasts = ToastQueue::default();
        let library: ActionFlow<String> = ActionFlow::new(FlowKind::Photo(PhotoSource::Library));
        let camera = library.sharing_state(FlowKind::Photo(PhotoSource::Camera));

        assert!(camera.start().await);
        assert!(library.is_in_progress().await);
        assert!(!library.start().await);

        camera.finish(ActionOutcome::Success("file:///shot.jpg".to_string()), &toasts).await;
        assert_eq!(camera.take().await, FlowState::Succeeded("file:///shot.jpg".to_string()));
        assert_eq!(
            toasts.current().await.map(|t| t.message),
            Some("Photo captured successfully".to_string())
        );
        assert!(library.start().await);
    }

    #[tokio::test]
    async fn start_clears_an_unread_result() {
        let toasts = ToastQueue::default();
        let flow: ActionFlow<u32> = ActionFlow::new(FlowKind::Submit);

        assert!(flow.start().await);
        flow.finish(ActionOutcome::Success(1), &toasts).await;
        assert_eq!(flow.state().await, FlowState::Succeeded(1));

        assert!(flow.start().await);
        assert_eq!(flow.state().await, FlowState::InProgress);
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_collaborator_times_out_as_a_failure() {
        let toasts = ToastQueue::default();
        let flow: ActionFlow<u32> = ActionFlow::new(FlowKind::NearbyLocation);

        let resolution = flow
            .run(&toasts, Duration::from_millis(500), std::future::pending())
            .await;

        assert_eq!(resolution, Resolution::Failed(FailureKind::OperationFailed));
        assert_eq!(flow.state().await, FlowState::Idle);
        assert_eq!(
            toasts.current().await.map(|t| t.message),
            Some("Failed to get current location".to_string())
        );
    }

    #[tokio::test]
    async fn late_outcome_for_idle_flow_is_ignored() {
        let toasts = ToastQueue::default();
        let flow: ActionFlow<u32> = ActionFlow::new(FlowKind::Submit);

        flow.finish(ActionOutcome::Success(3), &toasts).await;
        assert_eq!(flow.state().await, FlowState::Idle);
        assert!(toasts.history().await.is_empty());
    }
}
