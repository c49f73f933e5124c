use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Game record as returned by the catalog. Every field is optional; unknown fields are ignored
/// and a field holding an unexpected type reads as `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub first_release_date: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub total_rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub cover: Option<RawCover>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub websites: Option<Vec<WebsiteLink>>,
}

impl RawRecord {
    /// Read one array element. Anything that is not an object becomes an empty record.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCover {
    #[serde(default, deserialize_with = "lenient")]
    pub image_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebsiteLink {
    #[serde(default, deserialize_with = "lenient")]
    pub category: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Keeps the list when the field is an array, dropping elements that are not link objects
/// (the catalog sends bare ids when websites are not expanded).
fn lenient_list<'de, D>(deserializer: D) -> Result<Option<Vec<WebsiteLink>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .filter(Value::is_object)
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        )),
        _ => Ok(None),
    }
}

/// Website categories surfaced in the output. Codes follow the catalog's enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebsiteCategory {
    Official,
    Steam,
    Itch,
    Epic,
    Gog,
}

impl WebsiteCategory {
    pub const fn code(self) -> i64 {
        match self {
            WebsiteCategory::Official => 1,
            WebsiteCategory::Steam => 13,
            WebsiteCategory::Itch => 15,
            WebsiteCategory::Epic => 16,
            WebsiteCategory::Gog => 17,
        }
    }
}

/// Presentation schema written to the per-date files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub official_url: Option<String>,
    pub steam_url: Option<String>,
    pub itch_url: Option<String>,
    pub gog_url: Option<String>,
    pub epic_url: Option<String>,
    pub source_url: Option<String>,
    pub rating: Option<f64>,
    pub release_date: String,
}
