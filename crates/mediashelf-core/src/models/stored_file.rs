use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::render::{select_strategy, RenderStrategy};

/// Opaque identifier assigned by the remote service.
///
/// The service currently emits integers; strings are accepted too so the
/// client does not depend on the key type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FileId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for FileId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Str(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => FileId(n.to_string()),
            RawId::Str(s) => FileId(s),
        })
    }
}

/// A file record owned by the remote service, as returned by the listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredFile {
    pub id: FileId,
    /// Absolute or server-relative URL of the stored bytes
    #[serde(rename = "file")]
    pub url: String,
    pub file_name: String,
    /// Short extension-like token ("mp4", "jpeg"), not a MIME type. May be absent.
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(rename = "file_size", default)]
    pub file_size_bytes: u64,
    /// Server-assigned, opaque to the client
    #[serde(default)]
    pub category: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub uploaded_at: DateTime<Utc>,
}

impl StoredFile {
    pub fn render_strategy(&self) -> RenderStrategy {
        select_strategy(self.file_type.as_deref())
    }

    pub fn size_kb(&self) -> u64 {
        super::size_kb(self.file_size_bytes)
    }
}

/// RFC 3339 first; naive timestamps (no offset) are taken as UTC.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;

    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{}': {}", raw, e)))
}
