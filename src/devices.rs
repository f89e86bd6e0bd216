//! Device and service collaborators: location, photos, spot submission
//!
//! The terminal build has no GPS or camera, so the implementations here are
//! simulations driven by [`SimulationConfig`]. Tests swap in their own fakes.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Local};

use crate::config::SimulationConfig;
use crate::model::{Coordinates, FormDraft, GeocodedAddress, PhotoSource};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Accuracy {
    Balanced,
    High,
}

/// Options passed to the photo picker
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptureOptions {
    pub allows_editing: bool,
    pub aspect: (u16, u16),
    pub quality: f32,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            allows_editing: true,
            aspect: (16, 9),
            quality: 0.8,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CaptureResult {
    pub canceled: bool,
    pub uri: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SubmissionAck {
    pub reference: String,
    pub received_at: DateTime<Local>,
}

#[async_trait]
pub trait LocationService: Send + Sync {
    async fn request_permission(&self) -> Permission;
    async fn current_position(&self, accuracy: Accuracy) -> Result<Coordinates>;
    async fn reverse_geocode(&self, coordinates: Coordinates) -> Result<Vec<GeocodedAddress>>;
}

#[async_trait]
pub trait PhotoService: Send + Sync {
    async fn request_permission(&self, source: PhotoSource) -> Permission;
    async fn capture(&self, source: PhotoSource, options: CaptureOptions) -> Result<CaptureResult>;
}

#[async_trait]
pub trait SubmissionService: Send + Sync {
    async fn submit(&self, draft: &FormDraft) -> Result<SubmissionAck>;
}

/// The collaborators one controller talks to
#[derive(Clone)]
pub struct Devices {
    pub location: Arc<dyn LocationService>,
    pub photos: Arc<dyn PhotoService>,
    pub submission: Arc<dyn SubmissionService>,
}

impl Devices {
    pub fn simulated(config: &SimulationConfig) -> Self {
        Self {
            location: Arc::new(SimulatedLocation::new(config.clone())),
            photos: Arc::new(SimulatedPhotos::new(config.clone())),
            submission: Arc::new(SimulatedSubmission::new(config.clone())),
        }
    }
}

fn permission(granted: bool) -> Permission {
    if granted { Permission::Granted } else { Permission::Denied }
}

pub struct SimulatedLocation {
    config: SimulationConfig,
}

impl SimulatedLocation {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl LocationService for SimulatedLocation {
    async fn request_permission(&self) -> Permission {
        permission(self.config.grant_location)
    }

    async fn current_position(&self, accuracy: Accuracy) -> Result<Coordinates> {
        tracing::debug!(?accuracy, "Simulated position fix");
        tokio::time::sleep(Duration::from_millis(self.config.location_latency_ms)).await;
        if self.config.fail_location {
            anyhow::bail!("no position fix available");
        }
        Ok(Coordinates {
            latitude: self.config.latitude,
            longitude: self.config.longitude,
        })
    }

    async fn reverse_geocode(&self, _coordinates: Coordinates) -> Result<Vec<GeocodedAddress>> {
        Ok(vec![GeocodedAddress {
            street: self.config.street.clone(),
            city: self.config.city.clone(),
        }])
    }
}

const SAMPLE_PHOTOS: [&str; 5] = ["1770809", "2387793", "1612461", "1366919", "1194420"];

pub struct SimulatedPhotos {
    config: SimulationConfig,
    next: AtomicUsize,
}

impl SimulatedPhotos {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            next: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl PhotoService for SimulatedPhotos {
    async fn request_permission(&self, source: PhotoSource) -> Permission {
        match source {
            PhotoSource::Camera => permission(self.config.grant_camera),
            PhotoSource::Library => permission(self.config.grant_library),
        }
    }

    async fn capture(&self, source: PhotoSource, options: CaptureOptions) -> Result<CaptureResult> {
        tracing::debug!(?source, ?options, "Simulated photo capture");
        if self.config.fail_photos {
            anyhow::bail!("{source:?} unavailable");
        }
        if self.config.cancel_photos {
            return Ok(CaptureResult { canceled: true, uri: None });
        }
        let id = SAMPLE_PHOTOS[self.next.fetch_add(1, Ordering::Relaxed) % SAMPLE_PHOTOS.len()];
        Ok(CaptureResult {
            canceled: false,
            uri: Some(format!("https://images.pexels.com/photos/{id}/pexels-photo-{id}.jpeg")),
        })
    }
}

pub struct SimulatedSubmission {
    config: SimulationConfig,
    counter: AtomicUsize,
}

impl SimulatedSubmission {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            counter: AtomicUsize::new(1),
        }
    }
}

#[async_trait]
impl SubmissionService for SimulatedSubmission {
    async fn submit(&self, draft: &FormDraft) -> Result<SubmissionAck> {
        tracing::debug!(name = %draft.name, photos = draft.photos.len(), "Simulating spot submission");
        tokio::time::sleep(Duration::from_millis(self.config.submit_latency_ms)).await;

        if self.config.fail_submissions {
            anyhow::bail!("submission endpoint unavailable");
        }

        // the draft is intentionally discarded; there is no backend
        Ok(SubmissionAck {
            reference: format!("draft-{}", self.counter.fetch_add(1, Ordering::Relaxed)),
            received_at: Local::now(),
        })
    }
}
