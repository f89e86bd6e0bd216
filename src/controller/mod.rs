//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and drives the async user actions.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `discovery`: Filters, refresh, "locate me" and the spot detail
//! - `submission`: The add-spot form: location, photos, tips and submit

mod input;
mod discovery;
mod submission;

use std::sync::Arc;
use std::time::Duration;

use crate::devices::Devices;
use crate::model::AppModel;

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<AppModel>,
    pub(crate) devices: Devices,
    refresh_delay: Duration,
}

impl AppController {
    pub fn new(model: Arc<AppModel>, devices: Devices, refresh_delay: Duration) -> Self {
        Self {
            model,
            devices,
            refresh_delay,
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted collaborators for controller tests

    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use anyhow::Result;
    use async_trait::async_trait;
    use chrono::Local;

    use crate::devices::{
        Accuracy, CaptureOptions, CaptureResult, Devices, LocationService, Permission, PhotoService,
        SubmissionAck, SubmissionService,
    };
    use crate::model::{AppModel, Coordinates, FormDraft, GeocodedAddress, PhotoSource, SpotRepository, ToastQueue};

    use super::AppController;

    pub struct FakeLocation {
        pub permission: Permission,
        pub fail: bool,
        pub latency: Duration,
        pub position_calls: AtomicUsize,
    }

    impl FakeLocation {
        pub fn new(permission: Permission) -> Self {
            Self { permission, fail: false, latency: Duration::ZERO, position_calls: AtomicUsize::new(0) }
        }
    }

    #[async_trait]
    impl LocationService for FakeLocation {
        async fn request_permission(&self) -> Permission {
            self.permission
        }

        async fn current_position(&self, _accuracy: Accuracy) -> Result<Coordinates> {
            self.position_calls.fetch_add(1, Ordering::SeqCst);
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            if self.fail {
                anyhow::bail!("GPS unavailable");
            }
            Ok(Coordinates { latitude: 26.2295, longitude: 78.1808 })
        }

        async fn reverse_geocode(&self, _coordinates: Coordinates) -> Result<Vec<GeocodedAddress>> {
            Ok(vec![GeocodedAddress {
                street: Some("Fort Road".to_string()),
                city: Some("Gwalior".to_string()),
            }])
        }
    }

    pub struct FakePhotos {
        pub permission: Permission,
        pub canceled: bool,
    }

    #[async_trait]
    impl PhotoService for FakePhotos {
        async fn request_permission(&self, _source: PhotoSource) -> Permission {
            self.permission
        }

        async fn capture(&self, source: PhotoSource, _options: CaptureOptions) -> Result<CaptureResult> {
            Ok(CaptureResult {
                canceled: self.canceled,
                uri: (!self.canceled).then(|| format!("file:///{source:?}.jpg").to_lowercase()),
            })
        }
    }

    pub struct FakeSubmission {
        pub latency: Duration,
        pub fail: bool,
        pub calls: AtomicUsize,
    }

    #[async_trait]
    impl SubmissionService for FakeSubmission {
        async fn submit(&self, _draft: &FormDraft) -> Result<SubmissionAck> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.latency).await;
            if self.fail {
                anyhow::bail!("backend rejected the spot");
            }
            Ok(SubmissionAck { reference: "ack-1".to_string(), received_at: Local::now() })
        }
    }

    pub struct Harness {
        pub controller: AppController,
        pub model: Arc<AppModel>,
        pub location: Arc<FakeLocation>,
        pub submission: Arc<FakeSubmission>,
    }

    pub fn harness(location: FakeLocation, photos: FakePhotos, submission: FakeSubmission) -> Harness {
        let model = Arc::new(AppModel::new(
            SpotRepository::gwalior(),
            "Gwalior",
            ToastQueue::default(),
            Duration::from_secs(15),
        ));
        let location = Arc::new(location);
        let submission = Arc::new(submission);
        let devices = Devices {
            location: location.clone(),
            photos: Arc::new(photos),
            submission: submission.clone(),
        };
        Harness {
            controller: AppController::new(model.clone(), devices, Duration::from_millis(1000)),
            model,
            location,
            submission,
        }
    }

    pub fn default_harness() -> Harness {
        harness(
            FakeLocation::new(Permission::Granted),
            FakePhotos { permission: Permission::Granted, canceled: false },
            FakeSubmission { latency: Duration::from_millis(2000), fail: false, calls: AtomicUsize::new(0) },
        )
    }
}
