//! High-level service facade combining schedules, icons and pictures.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::task;
use tracing::error;

use crate::compositor::{composite, parse_image_query};
use crate::icons::{IconSelection, resolve_icons};
use crate::model::{PickupResult, SensorId, SensorState};
use crate::ports::{AssetSource, CompositeError, ScheduleError};
use crate::registry::{PickupSensor, SensorRegistry};
use crate::scheduler::next_pickup;

/// Public entry point for pickup sensors and their pictures.
pub struct AffaldService {
    registry: Arc<SensorRegistry>,
    assets: Arc<dyn AssetSource>,
}

impl AffaldService {
    /// Create a new service bound to the provided registry and icon assets.
    #[must_use]
    pub fn new(registry: Arc<SensorRegistry>, assets: Arc<dyn AssetSource>) -> Self {
        Self { registry, assets }
    }

    /// Next pickup of one sensor as seen from `today`.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::UnknownSensor`] for an unregistered id and
    /// [`ScheduleError::NotFound`] when the schedule yields no date.
    pub fn next_pickup_for(
        &self,
        id: &SensorId,
        today: NaiveDate,
    ) -> Result<PickupResult, ScheduleError> {
        let sensor = self.registry.sensor(id)?;
        next_pickup(today, &sensor.config, &sensor.exceptions)
    }

    /// Icons for one sensor's waste category.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::UnknownSensor`] for an unregistered id.
    pub fn icons_for(&self, id: &SensorId) -> Result<IconSelection, ScheduleError> {
        let sensor = self.registry.sensor(id)?;
        Ok(resolve_icons(sensor.config.waste_type()))
    }

    /// Published state of one sensor.
    ///
    /// A schedule without a date yields an unavailable state rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::UnknownSensor`] for an unregistered id.
    pub fn state_for(&self, id: &SensorId, today: NaiveDate) -> Result<SensorState, ScheduleError> {
        let sensor = self.registry.sensor(id)?;
        Ok(refresh(sensor, today))
    }

    /// Published state of every sensor, in id order.
    #[must_use]
    pub fn states(&self, today: NaiveDate) -> Vec<SensorState> {
        self.registry
            .sensors()
            .map(|sensor| refresh(sensor, today))
            .collect()
    }

    /// Answer a picture request carrying the comma separated `images` parameter.
    ///
    /// Loading and drawing run on the blocking thread pool.
    ///
    /// # Errors
    ///
    /// Returns [`CompositeError::MissingParameter`] without a parameter,
    /// [`CompositeError::NoAssets`] when nothing can be drawn and
    /// [`CompositeError::Internal`] when drawing fails.
    pub async fn picture(&self, images: Option<&str>) -> Result<Vec<u8>, CompositeError> {
        let identifiers = parse_image_query(images)?;
        let assets = Arc::clone(&self.assets);
        task::spawn_blocking(move || composite(&identifiers, assets.as_ref()))
            .await
            .map_err(|err| CompositeError::Internal(err.to_string()))?
    }
}

fn refresh(sensor: &PickupSensor, today: NaiveDate) -> SensorState {
    let picture = resolve_icons(sensor.config.waste_type()).picture().url();
    let result = match next_pickup(today, &sensor.config, &sensor.exceptions) {
        Ok(result) => Some(result),
        Err(err) => {
            error!(
                sensor = %sensor.id,
                waste_type = sensor.config.waste_type(),
                error = %err,
                "Could not find next pickup date"
            );
            None
        }
    };
    SensorState::new(&sensor.id, &sensor.config, result, picture)
}
