//! Town detection for the personal-details panel.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default town before any detection.
pub const DEFAULT_TOWN: &str = "Boston";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// Geolocation failures, each with the message shown under the town field.
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationError {
    #[error("Location access denied. Please enable it in your browser settings.")]
    PermissionDenied,
    #[error("Location information is unavailable.")]
    PositionUnavailable,
    #[error("The request to get user location timed out.")]
    Timeout,
    #[error("An unknown error occurred.")]
    Unknown,
}

#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<Position, LocationError>;
}

/// Provider with a canned answer.
#[derive(Debug, Clone)]
pub struct MockLocationProvider {
    outcome: Result<Position, LocationError>,
}

impl MockLocationProvider {
    pub fn succeeding() -> Self {
        Self {
            outcome: Ok(Position {
                latitude: 25.7617,
                longitude: -80.1918,
            }),
        }
    }

    pub fn failing(error: LocationError) -> Self {
        Self { outcome: Err(error) }
    }
}

impl Default for MockLocationProvider {
    fn default() -> Self {
        Self::succeeding()
    }
}

#[async_trait]
impl LocationProvider for MockLocationProvider {
    async fn current_position(&self) -> Result<Position, LocationError> {
        self.outcome
    }
}

/// State of the "Edit Personal Details" panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalDetails {
    pub town: String,
    pub detecting: bool,
    pub error: Option<String>,
}

impl Default for PersonalDetails {
    fn default() -> Self {
        Self {
            town: DEFAULT_TOWN.to_string(),
            detecting: false,
            error: None,
        }
    }
}

impl PersonalDetails {
    pub fn set_town(&mut self, town: impl Into<String>) {
        self.town = town.into();
    }

    /// Asks `provider` for a position and fills in the town.
    ///
    /// On success the town changes to `detected_town` after `delay`. On failure the town is
    /// kept and `error` carries the message. `detecting` is false again on return.
    pub async fn detect_location(
        &mut self,
        provider: &dyn LocationProvider,
        delay: Duration,
        detected_town: &str,
    ) -> Result<(), LocationError> {
        self.detecting = true;
        self.error = None;

        let outcome = provider.current_position().await;
        let result = match outcome {
            Ok(position) => {
                debug!(lat = position.latitude, lon = position.longitude, "position acquired");
                tokio::time::sleep(delay).await;
                self.town = detected_town.to_string();
                Ok(())
            }
            Err(err) => {
                warn!(error = ?err, "location detection failed");
                self.error = Some(err.to_string());
                Err(err)
            }
        };

        self.detecting = false;
        result
    }
}
