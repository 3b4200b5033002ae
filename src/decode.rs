// Response decoder: serde shapes for the airing schedule envelope.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::error::ReportError;

/// One episode broadcast as returned by the API.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AiringRecord {
    #[serde(default, deserialize_with = "nullable")]
    pub episode: u32,
    /// Epoch seconds, UTC.
    #[serde(default, deserialize_with = "nullable")]
    pub airing_at: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub media: Media,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    #[serde(default, deserialize_with = "nullable")]
    pub title: MediaTitle,
    /// 0-100, 0 when the show has no rating yet.
    #[serde(default, deserialize_with = "nullable")]
    pub average_score: u32,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaTitle {
    #[serde(default, deserialize_with = "nullable")]
    pub romaji: String,
    #[serde(default, deserialize_with = "nullable")]
    pub english: String,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default, deserialize_with = "nullable")]
    pub has_next_page: bool,
}

/// The `data.Page` object of the response.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default, deserialize_with = "nullable")]
    pub page_info: PageInfo,
    #[serde(default, deserialize_with = "nullable")]
    pub airing_schedules: Vec<AiringRecord>,
}

#[derive(Deserialize, Debug)]
struct Envelope {
    data: Option<Data>,
    errors: Option<Vec<ApiMessage>>,
}

#[derive(Deserialize, Debug)]
struct Data {
    #[serde(rename = "Page")]
    page: Option<Page>,
}

#[derive(Deserialize, Debug)]
struct ApiMessage {
    #[serde(default)]
    message: String,
}

/// `null` decodes to the type's zero value.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a raw response body into its page of airing records.
pub fn decode_page(body: &[u8]) -> Result<Page, ReportError> {
    let envelope: Envelope = serde_json::from_slice(body).map_err(ReportError::Decode)?;
    match envelope {
        Envelope {
            data: Some(Data { page: Some(page) }),
            ..
        } => {
            tracing::debug!(records = page.airing_schedules.len(), "decoded airing page");
            Ok(page)
        }
        Envelope {
            errors: Some(errors),
            ..
        } if !errors.is_empty() => {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            Err(ReportError::Api(messages.join("; ")))
        }
        Envelope { data: None, .. } => {
            Err(ReportError::Decode(serde_json::Error::missing_field("data")))
        }
        Envelope { .. } => Err(ReportError::Decode(serde_json::Error::missing_field("Page"))),
    }
}
