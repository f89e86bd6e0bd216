//! Spots screen actions: filters, refresh, "locate me" and the detail overlay

use crate::devices::{Accuracy, Permission};
use crate::model::{ActionOutcome, Coordinates, Resolution, ToastKind, ANONYMOUS_LABEL};
use super::AppController;

impl AppController {
    pub async fn clear_filters(&self) {
        self.model.clear_filters().await;
        self.model.toasts.show(ToastKind::Info, "Filters cleared").await;
    }

    /// Simulated pull-to-refresh. A second request while one is running is
    /// dropped.
    pub async fn refresh_spots(&self) {
        if !self.model.begin_refresh().await {
            tracing::debug!("Refresh already running, ignoring");
            return;
        }

        tracing::info!(delay_ms = self.refresh_delay.as_millis() as u64, "Refreshing spots");
        tokio::time::sleep(self.refresh_delay).await;
        self.model.end_refresh().await;
        self.model.toasts.show(ToastKind::Success, "Spots refreshed").await;
    }

    /// Ask for the user's position so nearby spots can be discovered
    pub async fn locate_user(&self) -> Resolution<Coordinates> {
        let location = self.devices.location.clone();
        let resolution = self
            .model
            .flows
            .nearby_location
            .run(&self.model.toasts, self.model.flow_timeout(), async move {
                if location.request_permission().await == Permission::Denied {
                    return ActionOutcome::PermissionDenied;
                }
                match location.current_position(Accuracy::Balanced).await {
                    Ok(coordinates) => ActionOutcome::Success(coordinates),
                    Err(e) => ActionOutcome::Failed(e),
                }
            })
            .await;

        if let Resolution::Succeeded(coordinates) = &resolution {
            tracing::info!(%coordinates, "User located");
            self.model.set_user_location(*coordinates).await;
        }
        resolution
    }

    pub async fn open_selected_spot(&self) {
        if let Some(spot) = self.model.get_selected_spot().await {
            tracing::debug!(spot_id = %spot.id, "Opening spot detail");
            self.model.open_detail(spot.id).await;
        }
    }

    /// Comments have no backend; a posted comment is logged and the composer
    /// cleared.
    pub async fn post_comment(&self) -> bool {
        let Some((spot_id, text, anonymous)) = self.model.take_comment().await else {
            return false;
        };
        let author = if anonymous { ANONYMOUS_LABEL } else { self.model.profile_name() };
        tracing::info!(%spot_id, %author, chars = text.chars().count(), "Comment posted");
        true
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::controller::testing::*;
    use crate::devices::Permission;
    use crate::model::{FailureKind, FlowState, Resolution, ToastKind};

    #[tokio::test]
    async fn clearing_filters_shows_an_info_toast() {
        let h = default_harness();
        h.model.append_to_search('z').await;
        h.controller.clear_filters().await;

        assert_eq!(h.model.get_discovery_view().await.results.len(), 4);
        let toast = h.model.toasts.current().await.unwrap();
        assert_eq!(toast.kind, ToastKind::Info);
        assert_eq!(toast.message, "Filters cleared");
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_is_guarded_while_running() {
        let h = default_harness();
        let first = tokio::spawn({
            let controller = h.controller.clone();
            async move { controller.refresh_spots().await }
        });
        tokio::task::yield_now().await;
        assert!(h.model.get_discovery_view().await.is_refreshing);

        h.controller.refresh_spots().await;
        assert!(h.model.toasts.history().await.is_empty());

        tokio::time::advance(Duration::from_millis(1000)).await;
        first.await.unwrap();

        assert!(!h.model.get_discovery_view().await.is_refreshing);
        let history = h.model.toasts.history().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].message, "Spots refreshed");
    }

    #[tokio::test]
    async fn denied_location_stores_nothing() {
        let h = harness(
            FakeLocation::new(Permission::Denied),
            FakePhotos { permission: Permission::Granted, canceled: false },
            FakeSubmission { latency: Duration::ZERO, fail: false, calls: Default::default() },
        );

        let resolution = h.controller.locate_user().await;

        assert_eq!(resolution, Resolution::Failed(FailureKind::PermissionDenied));
        assert_eq!(h.model.flows.nearby_location.state().await, FlowState::Idle);
        assert_eq!(h.model.get_discovery_view().await.user_location, None);
        assert_eq!(h.location.position_calls.load(std::sync::atomic::Ordering::SeqCst), 0);

        let history = h.model.toasts.history().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].kind, ToastKind::Warning);
    }

    #[tokio::test]
    async fn granted_location_is_stored() {
        let h = default_harness();
        let resolution = h.controller.locate_user().await;

        let coordinates = resolution.succeeded().unwrap();
        assert_eq!(h.model.get_discovery_view().await.user_location, Some(coordinates));
        assert_eq!(
            h.model.toasts.current().await.map(|t| t.message),
            Some("Location updated successfully".to_string())
        );
    }

    #[tokio::test]
    async fn gps_failure_becomes_an_error_toast() {
        let mut location = FakeLocation::new(Permission::Granted);
        location.fail = true;
        let h = harness(
            location,
            FakePhotos { permission: Permission::Granted, canceled: false },
            FakeSubmission { latency: Duration::ZERO, fail: false, calls: Default::default() },
        );

        let resolution = h.controller.locate_user().await;

        assert_eq!(resolution, Resolution::Failed(FailureKind::OperationFailed));
        assert_eq!(h.model.toasts.current().await.unwrap().kind, ToastKind::Error);
        assert_eq!(h.model.get_discovery_view().await.user_location, None);
    }

    #[tokio::test]
    async fn enter_opens_the_selected_spot() {
        let h = default_harness();
        h.model.move_spot_selection(true).await;
        h.controller.open_selected_spot().await;

        let selected = h.model.get_discovery_view().await.results[1].id.clone();
        assert_eq!(h.model.get_ui_state().await.detail.unwrap().spot_id, selected);
    }

    #[tokio::test]
    async fn blank_comments_are_not_posted() {
        let h = default_harness();
        h.controller.open_selected_spot().await;
        assert!(!h.controller.post_comment().await);

        h.model.edit_comment(Some('!')).await;
        assert!(h.controller.post_comment().await);
        assert!(h.model.get_ui_state().await.detail.unwrap().comment.is_empty());
    }
}
