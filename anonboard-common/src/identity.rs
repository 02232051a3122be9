//! Pseudonymous identities for anonymous posts.
//!
//! Authors are never revealed. Instead every post is shown under a name,
//! initials and avatar color derived from its id alone, so the same post
//! renders identically everywhere without storing any mapping.

use crate::model::post::PostId;
use serde::{Deserialize, Serialize};

pub const ANONYMOUS_NAME: &str = "Anonymous";
pub const DISPLAY_NAME_PREFIX: &str = "Anon-";
pub const DISPLAY_NAME_ID_LEN: usize = 8;
pub const UNKNOWN_INITIALS: &str = "?";

pub const AVATAR_COLORS: [&str; 14] = [
    "#6366f1", "#8b5cf6", "#ec4899", "#f43f5e", "#f59e0b", "#10b981", "#06b6d4", "#3b82f6",
    "#a855f7", "#ef4444", "#14b8a6", "#f97316", "#84cc16", "#22c55e",
];
pub const DEFAULT_AVATAR_COLOR: &str = AVATAR_COLORS[0];

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Deserialize, Serialize)]
pub struct AnonymousIdentity {
    pub display_name: String,
    pub initials: String,
    pub avatar_color: String,
}

impl AnonymousIdentity {
    /// Derives the identity shown for the post with the given id. An empty id
    /// yields the generic [`ANONYMOUS_NAME`].
    #[must_use]
    pub fn derive(id: &str) -> Self {
        let display_name = display_name(id);
        let initials = initials(&display_name);

        Self {
            display_name,
            initials,
            avatar_color: avatar_color(id).to_owned(),
        }
    }

    #[must_use]
    pub fn for_post(id: &PostId) -> Self {
        Self::derive(id.as_str())
    }
}

#[must_use]
pub fn display_name(id: &str) -> String {
    if id.is_empty() {
        return ANONYMOUS_NAME.to_owned();
    }

    let short_id = match id.char_indices().nth(DISPLAY_NAME_ID_LEN) {
        Some((cut, _)) => &id[..cut],
        None => id,
    };
    format!("{DISPLAY_NAME_PREFIX}{short_id}")
}

/// Two upper-cased characters of `display_name`, taken after its first `-`
/// when at least two characters follow it.
#[must_use]
pub fn initials(display_name: &str) -> String {
    if display_name.is_empty() {
        return UNKNOWN_INITIALS.to_owned();
    }

    let source = match display_name.split_once('-') {
        Some((_, suffix)) if suffix.chars().nth(1).is_some() => suffix,
        _ => display_name,
    };
    source.chars().flat_map(char::to_uppercase).take(2).collect()
}

#[must_use]
pub fn avatar_color(id: &str) -> &'static str {
    if id.is_empty() {
        return DEFAULT_AVATAR_COLOR;
    }

    let hash = id.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    });
    // The palette is tiny, so the remainder always fits.
    #[allow(clippy::cast_possible_truncation)]
    let index = (hash % AVATAR_COLORS.len() as u64) as usize;

    AVATAR_COLORS[index]
}
