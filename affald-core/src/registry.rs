//! Registry for all configured pickup sensors.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::model::{ScheduleConfig, SensorId};
use crate::ports::ScheduleError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// One waste category with its schedule and manual overrides.
pub struct PickupSensor {
    /// Unique identifier.
    pub id: SensorId,
    /// Recurrence parameters.
    #[serde(flatten)]
    pub config: ScheduleConfig,
    /// Raw override text, `original:override` pairs separated by commas.
    #[serde(default)]
    pub exceptions: String,
}

impl PickupSensor {
    /// Sensor without overrides.
    #[must_use]
    pub fn new<S: Into<String>>(id: S, config: ScheduleConfig) -> Self {
        Self {
            id: SensorId(id.into()),
            config,
            exceptions: String::new(),
        }
    }

    /// Replace the override text.
    #[must_use]
    pub fn with_exceptions<S: Into<String>>(mut self, exceptions: S) -> Self {
        self.exceptions = exceptions.into();
        self
    }
}

/// Registry that resolves sensors by identifier, in identifier order.
#[derive(Debug, Default)]
pub struct SensorRegistry {
    sensors: BTreeMap<SensorId, PickupSensor>,
}

impl SensorRegistry {
    /// Build a registry from the provided sensors; a repeated id replaces the earlier entry.
    #[must_use]
    pub fn new(sensors: Vec<PickupSensor>) -> Self {
        let sensors = sensors
            .into_iter()
            .map(|sensor| (sensor.id.clone(), sensor))
            .collect();
        Self { sensors }
    }

    /// Identifiers of all registered sensors.
    #[must_use]
    pub fn ids(&self) -> Vec<SensorId> {
        self.sensors.keys().cloned().collect()
    }

    /// Iterator over the registered sensors.
    pub fn sensors(&self) -> impl Iterator<Item = &PickupSensor> {
        self.sensors.values()
    }

    /// Look up a sensor.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::UnknownSensor`] when no sensor has this id.
    pub fn sensor(&self, id: &SensorId) -> Result<&PickupSensor, ScheduleError> {
        self.sensors
            .get(id)
            .ok_or_else(|| ScheduleError::UnknownSensor(id.clone()))
    }

    /// Number of registered sensors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    /// No sensors are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }
}
