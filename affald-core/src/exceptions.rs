//! Manual pickup date overrides, such as collections shifted by public holidays.
//!
//! The raw text is a comma separated list of `original:override` pairs, for example
//! `2024-12-24:2024-12-27, 2025-01-01:2025-01-02`. Parsing is best-effort: every pair
//! that is not two valid dates is logged and dropped.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::warn;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Lookup from a scheduled pickup date to its replacement.
pub struct ExceptionTable {
    overrides: HashMap<NaiveDate, NaiveDate>,
}

impl ExceptionTable {
    /// Replacement for `date`, or `date` itself when it has no override.
    #[must_use]
    pub fn resolve(&self, date: NaiveDate) -> NaiveDate {
        self.overrides.get(&date).copied().unwrap_or(date)
    }

    /// Number of usable overrides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    /// No usable overrides were parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

/// Parse the override text into a table. Never fails; malformed pairs are skipped.
#[must_use]
pub fn parse_exceptions(raw: &str) -> ExceptionTable {
    let compact = raw
        .chars()
        .filter(|character| !character.is_whitespace())
        .collect::<String>();

    let overrides = compact
        .split(',')
        .filter(|token| !token.is_empty())
        .filter_map(|token| {
            let pair = parse_pair(token);
            if pair.is_none() {
                warn!(token, "Ignoring malformed pickup exception");
            }
            pair
        })
        .collect();

    ExceptionTable { overrides }
}

fn parse_pair(token: &str) -> Option<(NaiveDate, NaiveDate)> {
    let (original, replacement) = token.split_once(':')?;
    let original_date = NaiveDate::parse_from_str(original, DATE_FORMAT).ok()?;
    // Keys match on their exact text, so only the canonical spelling can ever hit.
    if original_date.format(DATE_FORMAT).to_string() != original {
        return None;
    }
    let replacement_date = NaiveDate::parse_from_str(replacement, DATE_FORMAT).ok()?;
    Some((original_date, replacement_date))
}
