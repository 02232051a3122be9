use crate::{lifetime::DeletionWindow, model::Id};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcDateTime};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

pub type PostId = Id<PostMarker>;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct PostAge {
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct PostLifetime {
    pub can_be_deleted: bool,
    pub should_auto_delete: bool,
    pub time_remaining: String,
}

impl PostLifetime {
    #[must_use]
    pub fn new(window: DeletionWindow, age: PostAge, now: UtcDateTime) -> Self {
        let created_at = age.created_at.to_utc();

        Self {
            can_be_deleted: window.can_be_deleted(created_at, now),
            should_auto_delete: window.should_auto_delete(created_at, now),
            time_remaining: window.time_remaining(created_at, now).to_string(),
        }
    }
}
