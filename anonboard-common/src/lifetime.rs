//! Ownership window of a post.
//!
//! Authors may delete their own posts for a limited time after creation. Once
//! that window has passed the post is due for automatic deletion. Every
//! function takes the current time as an argument so results are reproducible.

use crate::{model::ModelValidationError, util::PositiveDuration};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use time::{Duration, UtcDateTime};

pub const DEFAULT_DELETION_HOURS: u32 = 24;
pub const MAX_DELETION_HOURS: u32 = 24 * 366;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Error)]
#[error(
    "A deletion window of {0} hours exceeds the maximum of {max} hours",
    max = MAX_DELETION_HOURS
)]
pub struct DeletionWindowTooLongError(u32);

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct DeletionWindow(Duration);

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum TimeRemaining {
    Expired,
    Remaining { hours: i64, minutes: i64 },
}

impl DeletionWindow {
    #[must_use]
    pub fn new(length: PositiveDuration) -> Self {
        Self(length.get())
    }

    pub fn from_hours(hours: u32) -> Result<Self, ModelValidationError> {
        if hours > MAX_DELETION_HOURS {
            return Err(DeletionWindowTooLongError(hours).into());
        }

        Ok(Self::new(PositiveDuration::from_hours(hours)?))
    }

    #[must_use]
    pub fn length(self) -> Duration {
        self.0
    }

    /// `None` when the expiry lies past the latest representable date.
    #[must_use]
    pub fn expires_at(self, created_at: UtcDateTime) -> Option<UtcDateTime> {
        created_at.checked_add(self.0)
    }

    #[must_use]
    pub fn can_be_deleted(self, created_at: UtcDateTime, now: UtcDateTime) -> bool {
        now.checked_sub(self.0)
            .is_none_or(|deadline| created_at > deadline)
    }

    #[must_use]
    pub fn should_auto_delete(self, created_at: UtcDateTime, now: UtcDateTime) -> bool {
        !self.can_be_deleted(created_at, now)
    }

    #[must_use]
    pub fn time_remaining(self, created_at: UtcDateTime, now: UtcDateTime) -> TimeRemaining {
        let remaining = self.0.saturating_sub(now - created_at);
        if !remaining.is_positive() {
            return TimeRemaining::Expired;
        }

        let hours = remaining.whole_hours();
        let minutes = (remaining - Duration::hours(hours)).whole_minutes();

        TimeRemaining::Remaining { hours, minutes }
    }
}

impl Default for DeletionWindow {
    fn default() -> Self {
        Self(Duration::hours(i64::from(DEFAULT_DELETION_HOURS)))
    }
}

impl From<PositiveDuration> for DeletionWindow {
    fn from(value: PositiveDuration) -> Self {
        Self::new(value)
    }
}

impl Display for TimeRemaining {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeRemaining::Expired => f.write_str("Expired"),
            TimeRemaining::Remaining { hours, minutes } if *hours > 0 => {
                write!(f, "{hours}h {minutes}m remaining")
            }
            TimeRemaining::Remaining { minutes, .. } => write!(f, "{minutes}m remaining"),
        }
    }
}
