//! Add Spot screen actions: location, photos, tips and submission

use crate::devices::{Accuracy, CaptureOptions, Permission, SubmissionAck};
use crate::model::{
    format_address, ActionOutcome, PhotoSource, Resolution, SpotLocation, ToastKind, ValidationError,
    MAX_PHOTOS,
};
use super::AppController;

impl AppController {
    /// Take a high-accuracy fix and reverse-geocode it into an address
    pub async fn fetch_spot_location(&self) -> Resolution<SpotLocation> {
        let generation = self.model.form.lock().await.generation();
        let location = self.devices.location.clone();
        let resolution = self
            .model
            .flows
            .spot_location
            .run(&self.model.toasts, self.model.flow_timeout(), async move {
                if location.request_permission().await == Permission::Denied {
                    return ActionOutcome::PermissionDenied;
                }
                let coordinates = match location.current_position(Accuracy::High).await {
                    Ok(coordinates) => coordinates,
                    Err(e) => return ActionOutcome::Failed(e),
                };
                match location.reverse_geocode(coordinates).await {
                    Ok(addresses) => ActionOutcome::Success(SpotLocation {
                        coordinates,
                        address: format_address(&addresses),
                    }),
                    Err(e) => ActionOutcome::Failed(e),
                }
            })
            .await;

        if let Resolution::Succeeded(spot_location) = &resolution {
            let stored = self
                .model
                .edit_form_if(generation, |draft| draft.location = Some(spot_location.clone()))
                .await;
            if stored.is_some() {
                tracing::info!(address = %spot_location.address, "Spot location set");
            }
        }
        resolution
    }

    /// Pick from the library or shoot with the camera. Both sources share one
    /// flow state, and a full gallery is refused before any permission prompt.
    pub async fn acquire_photo(&self, source: PhotoSource) -> Resolution<String> {
        if self.model.flows.photo_busy().await {
            tracing::debug!(?source, "Photo request already in progress, ignoring");
            return Resolution::Busy;
        }
        let (generation, can_add) = {
            let draft = self.model.form.lock().await;
            (draft.generation(), draft.can_add_photo())
        };
        if !can_add {
            self.model
                .toasts
                .show(ToastKind::Warning, format!("You can add at most {MAX_PHOTOS} photos"))
                .await;
            return Resolution::Cancelled;
        }

        let photos = self.devices.photos.clone();
        let resolution = self
            .model
            .flows
            .photo(source)
            .run(&self.model.toasts, self.model.flow_timeout(), async move {
                if photos.request_permission(source).await == Permission::Denied {
                    return ActionOutcome::PermissionDenied;
                }
                match photos.capture(source, CaptureOptions::default()).await {
                    Ok(capture) if capture.canceled => ActionOutcome::Cancelled,
                    Ok(capture) => match capture.uri {
                        Some(uri) => ActionOutcome::Success(uri),
                        None => ActionOutcome::Cancelled,
                    },
                    Err(e) => ActionOutcome::Failed(e),
                }
            })
            .await;

        if let Resolution::Succeeded(uri) = &resolution {
            let added = self
                .model
                .edit_form_if(generation, |draft| draft.add_photo(uri.clone()))
                .await;
            if let Some(Err(e)) = added {
                tracing::warn!(error = %e, "Photo arrived after the gallery filled up");
            }
        }
        resolution
    }

    pub async fn remove_selected_photo(&self) {
        if let Some(uri) = self.model.remove_selected_photo().await {
            tracing::debug!(%uri, "Photo removed from draft");
            self.model.toasts.show(ToastKind::Info, "Photo removed").await;
        }
    }

    pub async fn add_tip(&self) -> bool {
        let added = self.model.commit_tip().await;
        if added {
            self.model.toasts.show(ToastKind::Success, "Tip added").await;
        }
        added
    }

    pub async fn remove_last_tip(&self) {
        if self.model.remove_last_tip().await.is_some() {
            self.model.toasts.show(ToastKind::Info, "Tip removed").await;
        }
    }

    /// Validate the draft and hand it to the submission service. An invalid
    /// draft never starts the flow: the first missing field is reported as an
    /// error toast and returned.
    pub async fn submit_spot(&self) -> Result<Resolution<SubmissionAck>, ValidationError> {
        if self.model.flows.submit.is_in_progress().await {
            return Ok(Resolution::Busy);
        }

        let draft = self.model.get_form_draft().await;
        let generation = draft.generation();
        if let Err(e) = draft.validate() {
            tracing::debug!(field = e.field.id(), "Draft rejected");
            self.model.toasts.show(ToastKind::Error, e.to_string()).await;
            return Err(e);
        }

        let submission = self.devices.submission.clone();
        let resolution = self
            .model
            .flows
            .submit
            .run(&self.model.toasts, self.model.flow_timeout(), async move {
                match submission.submit(&draft).await {
                    Ok(ack) => ActionOutcome::Success(ack),
                    Err(e) => ActionOutcome::Failed(e),
                }
            })
            .await;

        if let Resolution::Succeeded(ack) = &resolution {
            tracing::info!(reference = %ack.reference, "Spot submitted");
            self.model.reset_form_if(generation).await;
        }
        Ok(resolution)
    }
}
