//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: UI state (screens, focus, overlays)
//! - `spot`: Spot records, experiences and the category set
//! - `dataset`: The read-only spot repository and the built-in Gwalior fixture
//! - `query`: Search, filter, sort and aggregate stats over the dataset
//! - `toast`: The single toast slot with auto-dismiss
//! - `flow`: Async action state machine for location, photo and submit actions
//! - `form`: Add-spot draft, editing rules and validation
//! - `profile`: Mock user profile
//! - `app_model`: Main application model with state management methods

mod types;
mod spot;
mod dataset;
mod query;
mod toast;
mod flow;
mod form;
mod profile;
mod app_model;

pub use types::{DetailState, FormField, Screen, UiState};

pub use spot::{Category, Coordinates, Spot, ANONYMOUS_LABEL};

pub use dataset::SpotRepository;

pub use toast::{Toast, ToastKind, ToastQueue};

pub use flow::{ActionOutcome, PhotoSource, Resolution};
#[cfg(test)]
pub use flow::{FailureKind, FlowState};

pub use form::{format_address, FormDraft, GeocodedAddress, RatingKind, SpotLocation, ValidationError, MAX_PHOTOS};

pub use profile::ProfileTab;

pub use app_model::{AppModel, DiscoveryView, FormView, ProfileView};
