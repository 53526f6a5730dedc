use serde::de::{Error, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Formatter;

/// Short board name, e.g. `g` or `pol`.
pub type BoardName = String;

/// Post number, unique inside a board.
///
/// The thread number is the post number of its opening post.
pub type PostNumber = u64;

/// Page index in board index pages, starting from 1.
pub type PageNumber = u32;

/// Read-only JSON api.
pub const API_BASE_URL: &str = "https://a.4cdn.org";

/// User uploaded images and thumbnails.
pub const IMAGE_BASE_URL: &str = "https://i.4cdn.org";

/// Static assets like flags and the spoiler placeholder.
pub const STATIC_BASE_URL: &str = "https://s.4cdn.org";

/// Web pages of boards.
pub const WEB_BASE_URL: &str = "https://boards.4chan.org";

/// Site root page.
pub const ROOT_URL: &str = "https://4chan.org/";

/// Undocumented search api used by the mobile site.
pub const SEARCH_URL: &str = "https://p.4chan.org/api/search";

struct FlagVisitor;

impl<'de> Visitor<'de> for FlagVisitor {
    type Value = Flag;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("expected to get integer flag or boolean")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(Flag(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(Flag(v != 0))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(Flag(v != 0))
    }
}

/// Hold the integer flags in api responses.
///
/// Upstream sends `1` for set and `0` (or nothing at all) for unset. Any non-zero number is taken
/// as set, and plain json booleans are accepted too.
///
/// Serializes back as `0`/`1` so saved data stays in the upstream format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flag(pub bool);

impl Flag {
    pub fn is_set(&self) -> bool {
        self.0
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        Flag(value)
    }
}

impl Serialize for Flag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(u8::from(self.0))
    }
}

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(FlagVisitor)
    }
}
