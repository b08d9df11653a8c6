//! The `(character, star)` grouping key.

use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

const STAR_SEPARATOR: &str = "__S";

/// Grouping and selection key, rendered as `"<characterId>__S<star>"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    character_id: String,
    star: u32,
}

impl GroupKey {
    pub fn new(character_id: impl Into<String>, star: u32) -> Self {
        Self {
            character_id: character_id.into(),
            star,
        }
    }

    pub fn character_id(&self) -> &str {
        &self.character_id
    }

    pub fn star(&self) -> u32 {
        self.star
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{STAR_SEPARATOR}{}", self.character_id, self.star)
    }
}

impl FromStr for GroupKey {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::InvalidGroupKey(value.to_string());
        let (id, star) = value.rsplit_once(STAR_SEPARATOR).ok_or_else(invalid)?;
        if id.trim().is_empty() {
            return Err(invalid());
        }
        let star: u32 = star.parse().map_err(|_| invalid())?;
        if star == 0 {
            return Err(invalid());
        }
        Ok(Self::new(id, star))
    }
}

impl serde::Serialize for GroupKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for GroupKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
