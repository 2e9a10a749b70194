//! Domain data structures for schedules, pickup results and sensor output.

use std::fmt;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::ports::ConfigError;

/// Longest accepted pickup interval in weeks.
pub const MAX_FREQUENCY_WEEKS: u32 = 52;
/// Highest ISO week number.
pub const MAX_ISO_WEEK: u32 = 53;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
/// Identifier for a configured pickup sensor.
pub struct SensorId(pub String);

impl fmt::Display for SensorId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
/// Weekday of the pickup, Monday = 0 through Sunday = 6.
pub struct PickupDay(u32);

impl PickupDay {
    /// Validate a weekday index.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PickupDay`] when `index` is above 6.
    pub const fn new(index: u32) -> Result<Self, ConfigError> {
        if index > 6 {
            return Err(ConfigError::PickupDay(index));
        }
        Ok(Self(index))
    }

    /// Days after Monday.
    #[must_use]
    pub const fn days_from_monday(self) -> u32 {
        self.0
    }

    /// Calendar weekday.
    #[must_use]
    pub const fn weekday(self) -> Weekday {
        match self.0 {
            0 => Weekday::Mon,
            1 => Weekday::Tue,
            2 => Weekday::Wed,
            3 => Weekday::Thu,
            4 => Weekday::Fri,
            5 => Weekday::Sat,
            _ => Weekday::Sun,
        }
    }

    /// Danish weekday name as shown in the setup form.
    #[must_use]
    pub const fn danish_name(self) -> &'static str {
        match self.weekday() {
            Weekday::Mon => "Mandag",
            Weekday::Tue => "Tirsdag",
            Weekday::Wed => "Onsdag",
            Weekday::Thu => "Torsdag",
            Weekday::Fri => "Fredag",
            Weekday::Sat => "Lørdag",
            Weekday::Sun => "Søndag",
        }
    }
}

impl TryFrom<u32> for PickupDay {
    type Error = ConfigError;

    fn try_from(index: u32) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

impl From<PickupDay> for u32 {
    fn from(day: PickupDay) -> Self {
        day.0
    }
}

impl fmt::Display for PickupDay {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.danish_name())
    }
}

/// Unvalidated schedule as read from configuration files.
#[derive(Debug, Deserialize)]
struct RawScheduleConfig {
    waste_type: String,
    pickup_day: u32,
    frequency_weeks: u32,
    start_week: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawScheduleConfig")]
/// Recurring pickup parameters for one waste category.
pub struct ScheduleConfig {
    waste_type: String,
    pickup_day: PickupDay,
    frequency_weeks: u32,
    start_week: u32,
}

impl ScheduleConfig {
    /// Build a validated schedule.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first parameter outside its range.
    pub fn new<S: Into<String>>(
        waste_type: S,
        pickup_day: u32,
        frequency_weeks: u32,
        start_week: u32,
    ) -> Result<Self, ConfigError> {
        let pickup_day = PickupDay::new(pickup_day)?;
        if !(1..=MAX_FREQUENCY_WEEKS).contains(&frequency_weeks) {
            return Err(ConfigError::Frequency(frequency_weeks));
        }
        if !(1..=MAX_ISO_WEEK).contains(&start_week) {
            return Err(ConfigError::StartWeek(start_week));
        }
        Ok(Self {
            waste_type: waste_type.into(),
            pickup_day,
            frequency_weeks,
            start_week,
        })
    }

    /// Free-text waste category label.
    #[must_use]
    pub fn waste_type(&self) -> &str {
        &self.waste_type
    }

    /// Weekday of the pickup.
    #[must_use]
    pub const fn pickup_day(&self) -> PickupDay {
        self.pickup_day
    }

    /// Recurrence interval in ISO weeks.
    #[must_use]
    pub const fn frequency_weeks(&self) -> u32 {
        self.frequency_weeks
    }

    /// ISO week anchoring the recurrence phase.
    #[must_use]
    pub const fn start_week(&self) -> u32 {
        self.start_week
    }
}

impl TryFrom<RawScheduleConfig> for ScheduleConfig {
    type Error = ConfigError;

    fn try_from(raw: RawScheduleConfig) -> Result<Self, Self::Error> {
        Self::new(
            raw.waste_type,
            raw.pickup_day,
            raw.frequency_weeks,
            raw.start_week,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Next pickup as seen from a given day.
pub struct PickupResult {
    /// Date of the next pickup, never before the reference day.
    pub next_date: NaiveDate,
    /// Whole days from the reference day to `next_date`.
    pub days_until: i64,
}

impl PickupResult {
    /// Pickup happens on the reference day.
    #[must_use]
    pub const fn is_today(&self) -> bool {
        self.days_until == 0
    }

    /// Pickup happens the day after the reference day.
    #[must_use]
    pub const fn is_tomorrow(&self) -> bool {
        self.days_until == 1
    }

    /// Danish countdown phrase.
    #[must_use]
    pub fn human_readable(&self) -> String {
        match self.days_until {
            0 => "I dag".to_owned(),
            1 => "I morgen".to_owned(),
            days => format!("Om {days} dage"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Attribute bundle published next to the pickup date.
pub struct SensorAttributes {
    /// Days until the next pickup, absent when no date was found.
    pub days_until_pickup: Option<i64>,
    /// Danish countdown phrase, absent when no date was found.
    pub human_readable_next: Option<String>,
    /// Pickup is today.
    pub is_today: bool,
    /// Pickup is tomorrow.
    pub is_tomorrow: bool,
    /// Configured interval in weeks.
    pub pickup_frequency: u32,
    /// Configured weekday index.
    pub pickup_day: PickupDay,
    /// Configured waste category label.
    pub collection_of: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Computed output of one pickup sensor for one refresh.
pub struct SensorState {
    /// Display name.
    pub name: String,
    /// Stable identifier derived from the sensor id.
    pub unique_id: String,
    /// Next pickup date, absent when unavailable.
    pub state: Option<NaiveDate>,
    /// Picture URL for the waste category.
    pub entity_picture: String,
    /// Derived attributes.
    pub attributes: SensorAttributes,
}

impl SensorState {
    /// Assemble the published state from a schedule and an optional result.
    #[must_use]
    pub fn new(
        id: &SensorId,
        config: &ScheduleConfig,
        result: Option<PickupResult>,
        entity_picture: String,
    ) -> Self {
        Self {
            name: format!("Affaldsafhentning {}", config.waste_type()),
            unique_id: format!("{id}_pickup"),
            state: result.map(|pickup| pickup.next_date),
            entity_picture,
            attributes: SensorAttributes {
                days_until_pickup: result.map(|pickup| pickup.days_until),
                human_readable_next: result.as_ref().map(PickupResult::human_readable),
                is_today: result.is_some_and(|pickup| pickup.is_today()),
                is_tomorrow: result.is_some_and(|pickup| pickup.is_tomorrow()),
                pickup_frequency: config.frequency_weeks(),
                pickup_day: config.pickup_day(),
                collection_of: config.waste_type().to_owned(),
            },
        }
    }

    /// The state as published text, `YYYY-MM-DD`.
    #[must_use]
    pub fn state_text(&self) -> Option<String> {
        self.state.map(|date| date.format("%Y-%m-%d").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    #[test]
    fn schedule_ranges_are_validated() {
        let upper = ScheduleConfig::new("Rest", 6, 52, 53).expect("upper bounds accepted");
        assert_eq!(upper.start_week(), 53, "upper start week kept");
        let lower = ScheduleConfig::new("Rest", 0, 1, 1).expect("lower bounds accepted");
        assert_eq!(lower.frequency_weeks(), 1, "lower frequency kept");
        assert_eq!(
            ScheduleConfig::new("Rest", 7, 2, 1),
            Err(ConfigError::PickupDay(7)),
            "weekday index"
        );
        assert_eq!(
            ScheduleConfig::new("Rest", 0, 0, 1),
            Err(ConfigError::Frequency(0)),
            "zero frequency"
        );
        assert_eq!(
            ScheduleConfig::new("Rest", 0, 53, 1),
            Err(ConfigError::Frequency(53)),
            "frequency above a year"
        );
        assert_eq!(
            ScheduleConfig::new("Rest", 0, 2, 54),
            Err(ConfigError::StartWeek(54)),
            "start week"
        );
    }

    #[test]
    fn pickup_day_names_follow_weekday_order() {
        let names = (0..7)
            .map(|index| PickupDay::new(index).map(PickupDay::danish_name))
            .collect::<Result<Vec<_>, _>>()
            .expect("all indices valid");
        assert_eq!(
            names,
            ["Mandag", "Tirsdag", "Onsdag", "Torsdag", "Fredag", "Lørdag", "Søndag"],
            "Danish names"
        );
        let tuesday = PickupDay::new(1).expect("valid index");
        assert_eq!(tuesday.weekday(), Weekday::Tue, "index 1 is Tuesday");
    }

    #[test]
    fn human_readable_phrases() {
        let today = date(2024, 6, 10);
        let phrase = |days_until| {
            PickupResult {
                next_date: today,
                days_until,
            }
            .human_readable()
        };
        assert_eq!(phrase(0), "I dag", "today");
        assert_eq!(phrase(1), "I morgen", "tomorrow");
        assert_eq!(phrase(8), "Om 8 dage", "later");
    }

    #[test]
    fn sensor_state_echoes_configuration() {
        let config = ScheduleConfig::new("Mad og glas", 1, 2, 1).expect("valid schedule");
        let result = PickupResult {
            next_date: date(2024, 6, 11),
            days_until: 1,
        };
        let state = SensorState::new(
            &SensorId("kitchen".to_owned()),
            &config,
            Some(result),
            "/picture".to_owned(),
        );
        assert_eq!(state.name, "Affaldsafhentning Mad og glas", "name prefix");
        assert_eq!(state.unique_id, "kitchen_pickup", "unique id");
        assert_eq!(state.state_text().as_deref(), Some("2024-06-11"), "date text");
        assert!(state.attributes.is_tomorrow, "tomorrow flag");
        assert!(!state.attributes.is_today, "today flag");
        assert_eq!(state.attributes.human_readable_next.as_deref(), Some("I morgen"), "phrase");
        assert_eq!(state.attributes.pickup_frequency, 2, "frequency echo");
        assert_eq!(state.attributes.pickup_day.days_from_monday(), 1, "day echo");
    }

    #[test]
    fn unavailable_sensor_has_no_countdown() {
        let config = ScheduleConfig::new("Papir", 4, 4, 3).expect("valid schedule");
        let state = SensorState::new(&SensorId("paper".to_owned()), &config, None, String::new());
        assert_eq!(state.state, None, "no date");
        assert_eq!(state.attributes.days_until_pickup, None, "no countdown");
        assert_eq!(state.attributes.human_readable_next, None, "no phrase");
        assert!(!state.attributes.is_today && !state.attributes.is_tomorrow, "flags cleared");
    }
}
