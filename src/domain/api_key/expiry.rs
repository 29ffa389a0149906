//! Expiry computation and status derivation for API keys

use chrono::{DateTime, Datelike, Utc};

use super::entity::KeyStatus;

/// Policy deciding how long a newly issued key stays valid and how the
/// active/inactive status is derived from the expiry instant.
///
/// The validity period is a calendar-year advance, not a fixed number of
/// seconds: month, day and time-of-day are preserved, so a key issued on
/// 2025-03-15 14:00 expires on 2026-03-15 14:00 regardless of leap days
/// in between.
#[derive(Debug, Clone, Copy)]
pub struct ExpiryPolicy {
    validity_years: i32,
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self { validity_years: 1 }
    }
}

impl ExpiryPolicy {
    /// Create a policy with the default one-year validity
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a policy with a custom validity in calendar years
    pub fn with_validity_years(years: i32) -> Self {
        Self {
            validity_years: years,
        }
    }

    /// Compute the expiry instant for a key issued at `issued_at`
    ///
    /// Advances the calendar year component. Feb 29 clamps to Feb 28 when
    /// the target year is not a leap year.
    pub fn compute_expiry(&self, issued_at: DateTime<Utc>) -> DateTime<Utc> {
        let target_year = issued_at.year() + self.validity_years;

        issued_at
            .with_year(target_year)
            .or_else(|| issued_at.with_day(28)?.with_year(target_year))
            .unwrap_or(issued_at)
    }

    /// Derive the status of a key from its expiry instant and the current
    /// time. The boundary `now == expires_at` is inactive.
    pub fn status(&self, expires_at: DateTime<Utc>, now: DateTime<Utc>) -> KeyStatus {
        if now >= expires_at {
            KeyStatus::Inactive
        } else {
            KeyStatus::Active
        }
    }
}
