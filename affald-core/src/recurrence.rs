//! Calendar arithmetic for weekly pickups recurring every N ISO weeks.

use std::iter::FusedIterator;

use chrono::{Datelike, Days, NaiveDate};

use crate::model::PickupDay;

/// Number of week offsets inspected before giving up, about one year.
///
/// The current week counts even when its pickup day has already passed.
pub const SEARCH_HORIZON_WEEKS: usize = 53;

const DAYS_PER_WEEK: Days = Days::new(7);

/// Ascending pickup-day dates, one per week, starting in the week of `today`.
///
/// Dates before `today` are skipped. Unless limited with [`CandidateDates::within_weeks`],
/// the sequence only ends if the calendar overflows; clone it to restart from the same point.
#[derive(Debug, Clone)]
pub struct CandidateDates {
    today: NaiveDate,
    upcoming: Option<NaiveDate>,
    weeks_left: Option<usize>,
}

impl CandidateDates {
    /// Stop after `weeks` week offsets from the week of `today`, skipped weeks included.
    #[must_use]
    pub fn within_weeks(mut self, weeks: usize) -> Self {
        self.weeks_left = Some(weeks);
        self
    }
}

impl Iterator for CandidateDates {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(left) = self.weeks_left {
                if left == 0 {
                    return None;
                }
                self.weeks_left = Some(left.saturating_sub(1));
            }
            let candidate = self.upcoming?;
            self.upcoming = candidate.checked_add_days(DAYS_PER_WEEK);
            if candidate >= self.today {
                return Some(candidate);
            }
        }
    }
}

impl FusedIterator for CandidateDates {}

/// Pickup-day dates of the current and following weeks, never before `today`.
#[must_use]
pub fn candidate_pickup_dates(today: NaiveDate, pickup_day: PickupDay) -> CandidateDates {
    let since_monday = Days::new(u64::from(today.weekday().num_days_from_monday()));
    let first = today
        .checked_sub_days(since_monday)
        .and_then(|monday| {
            monday.checked_add_days(Days::new(u64::from(pickup_day.days_from_monday())))
        });
    CandidateDates {
        today,
        upcoming: first,
        weeks_left: None,
    }
}

/// Whether the ISO week of `date` is a pickup week.
///
/// True iff `(iso_week(date) - start_week) mod frequency_weeks == 0`. Year boundaries are
/// not special-cased, so a week 53 followed by week 1 can match twice in a row.
#[must_use]
pub fn matches_recurrence(date: NaiveDate, start_week: u32, frequency_weeks: u32) -> bool {
    if frequency_weeks == 0 {
        return false;
    }
    let offset = i64::from(date.iso_week().week()) - i64::from(start_week);
    offset.rem_euclid(i64::from(frequency_weeks)) == 0
}
