use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::http::{QueryParams, QueryValue};

/// Player ban state. Travels as an integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum BanMode {
    #[default]
    Normal,
    Temporary,
    Permanent,
}

impl From<BanMode> for u8 {
    fn from(mode: BanMode) -> Self {
        match mode {
            BanMode::Normal => 0,
            BanMode::Temporary => 1,
            BanMode::Permanent => 2,
        }
    }
}

impl TryFrom<u8> for BanMode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(BanMode::Normal),
            1 => Ok(BanMode::Temporary),
            2 => Ok(BanMode::Permanent),
            other => Err(format!("unknown ban mode {other}")),
        }
    }
}

impl QueryValue for BanMode {
    fn to_query_value(&self) -> String {
        u8::from(*self).to_string()
    }
}

/// IP threat level. Serialized as an integer; decoding also accepts the
/// level name, which some server builds send instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "RawThreatLevel")]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawThreatLevel {
    Number(u8),
    Name(String),
}

impl From<ThreatLevel> for u8 {
    fn from(level: ThreatLevel) -> Self {
        match level {
            ThreatLevel::Low => 0,
            ThreatLevel::Medium => 1,
            ThreatLevel::High => 2,
            ThreatLevel::Critical => 3,
        }
    }
}

impl TryFrom<u8> for ThreatLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ThreatLevel::Low),
            1 => Ok(ThreatLevel::Medium),
            2 => Ok(ThreatLevel::High),
            3 => Ok(ThreatLevel::Critical),
            other => Err(format!("unknown threat level {other}")),
        }
    }
}

impl TryFrom<RawThreatLevel> for ThreatLevel {
    type Error = String;

    fn try_from(raw: RawThreatLevel) -> Result<Self, Self::Error> {
        match raw {
            RawThreatLevel::Number(n) => ThreatLevel::try_from(n),
            RawThreatLevel::Name(name) => match name.trim().to_lowercase().as_str() {
                "low" | "0" => Ok(ThreatLevel::Low),
                "medium" | "1" => Ok(ThreatLevel::Medium),
                "high" | "2" => Ok(ThreatLevel::High),
                "critical" | "3" => Ok(ThreatLevel::Critical),
                _ => Err(format!("unknown threat level `{name}`")),
            },
        }
    }
}

impl QueryValue for ThreatLevel {
    fn to_query_value(&self) -> String {
        u8::from(*self).to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServerType {
    Minecraft,
    Proxy,
    Lobby,
}

/// A field of a partial update.
///
/// `Unchanged` must be skipped by the containing struct
/// (`skip_serializing_if = "Patch::is_unchanged"`); `Clear` is sent as
/// `null`; `Set` is sent as the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    #[default]
    Unchanged,
    Clear,
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Patch::Unchanged)
    }
}

impl<T> From<T> for Patch<T> {
    fn from(value: T) -> Self {
        Patch::Set(value)
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Patch::Unchanged | Patch::Clear => serializer.serialize_none(),
            Patch::Set(value) => serializer.serialize_some(value),
        }
    }
}

/// A present `null` decodes as `Clear`; pair with `#[serde(default)]` so a
/// missing field decodes as `Unchanged`.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Set(value),
            None => Patch::Clear,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub page: Option<i32>,
    pub page_size: Option<i32>,
}

impl Pagination {
    pub fn new(page: i32, page_size: i32) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
        }
    }

    pub fn query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("page", self.page)
            .push_opt("page_size", self.page_size)
    }
}
