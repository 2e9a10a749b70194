//! Next pickup computation combining the recurrence with manual overrides.

use chrono::NaiveDate;
use tracing::debug;

use crate::exceptions::{ExceptionTable, parse_exceptions};
use crate::model::{PickupResult, ScheduleConfig};
use crate::ports::ScheduleError;
use crate::recurrence::{SEARCH_HORIZON_WEEKS, candidate_pickup_dates, matches_recurrence};

/// Next pickup on or after `today`.
///
/// # Errors
///
/// Returns [`ScheduleError::NotFound`] when none of the [`SEARCH_HORIZON_WEEKS`] weeks starting
/// with the current one matches.
pub fn next_pickup(
    today: NaiveDate,
    config: &ScheduleConfig,
    exception_text: &str,
) -> Result<PickupResult, ScheduleError> {
    next_pickup_within(
        today,
        config,
        &parse_exceptions(exception_text),
        SEARCH_HORIZON_WEEKS,
    )
}

/// Next pickup on or after `today`, inspecting `horizon` week offsets from the current week.
///
/// The first candidate in a pickup week is passed through `exceptions`. An override that
/// lands before `today` has already happened, so the search continues with the next week.
///
/// # Errors
///
/// Returns [`ScheduleError::NotFound`] when the horizon is exhausted.
pub fn next_pickup_within(
    today: NaiveDate,
    config: &ScheduleConfig,
    exceptions: &ExceptionTable,
    horizon: usize,
) -> Result<PickupResult, ScheduleError> {
    for candidate in candidate_pickup_dates(today, config.pickup_day()).within_weeks(horizon) {
        if !matches_recurrence(candidate, config.start_week(), config.frequency_weeks()) {
            continue;
        }

        let next_date = exceptions.resolve(candidate);
        if next_date != candidate {
            debug!(
                waste_type = config.waste_type(),
                %candidate,
                %next_date,
                "Overriding pickup date"
            );
        }
        if next_date < today {
            debug!(%candidate, %next_date, "Override already passed, searching further");
            continue;
        }

        return Ok(PickupResult {
            next_date,
            days_until: (next_date - today).num_days(),
        });
    }

    Err(ScheduleError::NotFound { horizon })
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    fn schedule(pickup_day: u32, frequency_weeks: u32, start_week: u32) -> ScheduleConfig {
        ScheduleConfig::new("Restaffald", pickup_day, frequency_weeks, start_week)
            .expect("valid schedule")
    }

    #[test]
    fn biweekly_tuesday_from_monday() {
        let result = next_pickup(date(2024, 6, 10), &schedule(1, 2, 1), "").expect("pickup found");
        assert_eq!(result.next_date, date(2024, 6, 18), "week 25 is the pickup week");
        assert_eq!(result.days_until, 8, "eight days ahead");
        assert!(!result.is_today() && !result.is_tomorrow(), "neither today nor tomorrow");
    }

    #[test]
    fn pickup_today_counts() {
        let result = next_pickup(date(2024, 6, 18), &schedule(1, 2, 1), "").expect("pickup found");
        assert_eq!(result.days_until, 0, "today");
        assert!(result.is_today(), "today flag");
    }

    #[test]
    fn pickup_tomorrow_counts() {
        let result = next_pickup(date(2024, 6, 17), &schedule(1, 2, 1), "").expect("pickup found");
        assert_eq!(result.next_date, date(2024, 6, 18), "next day");
        assert!(result.is_tomorrow(), "tomorrow flag");
    }

    #[test]
    fn override_replaces_computed_date() {
        let result = next_pickup(
            date(2024, 6, 10),
            &schedule(1, 2, 1),
            "2024-06-18:2024-06-20, garbage",
        )
        .expect("pickup found");
        assert_eq!(result.next_date, date(2024, 6, 20), "override applied");
        assert_eq!(result.days_until, 10, "counted to the override");
    }

    #[test]
    fn override_for_other_dates_is_ignored() {
        let result = next_pickup(date(2024, 6, 10), &schedule(1, 2, 1), "2024-06-11:2024-06-12")
            .expect("pickup found");
        assert_eq!(result.next_date, date(2024, 6, 18), "non-pickup week key has no effect");
    }

    #[test]
    fn override_into_the_past_continues_search() {
        let result = next_pickup(date(2024, 6, 18), &schedule(1, 2, 1), "2024-06-18:2024-06-14")
            .expect("pickup found");
        assert_eq!(result.next_date, date(2024, 7, 2), "following pickup week");
        assert_eq!(result.days_until, 14, "two weeks ahead");
    }

    #[test]
    fn exhausted_horizon_is_not_found() {
        let exceptions = ExceptionTable::default();
        let result = next_pickup_within(date(2024, 6, 10), &schedule(1, 2, 1), &exceptions, 1);
        assert_eq!(result, Err(ScheduleError::NotFound { horizon: 1 }), "only week 24 inspected");
    }

    #[test]
    fn passed_current_week_counts_towards_horizon() {
        // Wednesday of week 10 in 2020, a 53-week year: week 10 of 2021 is offset 53.
        let result = next_pickup(date(2020, 3, 4), &schedule(0, 52, 10), "");
        assert_eq!(
            result,
            Err(ScheduleError::NotFound { horizon: SEARCH_HORIZON_WEEKS }),
            "week 10 of 2021 lies beyond the horizon"
        );
        let monday = next_pickup(date(2020, 3, 2), &schedule(0, 52, 10), "").expect("pickup found");
        assert_eq!(monday.next_date, date(2020, 3, 2), "same week still reachable on the day");
    }

    #[test]
    fn results_respect_weekday_and_recurrence() {
        let start = date(2023, 11, 20);
        for offset in 0..120 {
            let today = start + chrono::Days::new(offset);
            for (pickup_day, frequency_weeks, start_week) in
                [(0, 1, 1), (2, 2, 5), (4, 3, 53), (5, 4, 52), (6, 52, 53), (3, 13, 1)]
            {
                let config = schedule(pickup_day, frequency_weeks, start_week);
                let result = next_pickup(today, &config, "").expect("pickup found");
                assert!(result.next_date >= today, "{} not before {today}", result.next_date);
                assert!(result.days_until >= 0, "non-negative countdown");
                assert_eq!(
                    result.next_date.weekday(),
                    config.pickup_day().weekday(),
                    "weekday for {today}"
                );
                assert!(
                    matches_recurrence(result.next_date, start_week, frequency_weeks),
                    "recurrence for {today}"
                );
            }
        }
    }

    #[test]
    fn repeated_calls_agree() {
        let config = schedule(3, 3, 7);
        let today = date(2025, 2, 14);
        let text = "2025-02-20:2025-02-21";
        assert_eq!(
            next_pickup(today, &config, text),
            next_pickup(today, &config, text),
            "pure function"
        );
    }
}
