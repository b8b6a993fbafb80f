use std::{collections::BTreeMap, fmt, num::NonZeroU32};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tabled::Tabled;
use url::Url;

pub type Headers = BTreeMap<String, String>;
pub type Params = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    #[serde(rename = "GET")]
    Get,
    #[serde(rename = "POST")]
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credential the transport must attach to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthRequirement {
    /// Session-derived credential (client login token).
    Session,
    /// OAuth bearer token. No mobile client call uses it.
    OAuth,
}

/// Everything the transport needs to issue one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: String,
    pub headers: Headers,
    pub params: Params,
    pub body: Option<String>,
    pub auth: AuthRequirement,
    pub follow_redirects: bool,
    pub verify_tls: bool,
}

impl RequestDescriptor {
    /// The URL with query parameters appended and encoded.
    pub fn full_url(&self) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.url)?;
        if !self.params.is_empty() {
            url.query_pairs_mut().extend_pairs(self.params.iter());
        }
        Ok(url)
    }
}

/// Raw response handed back by the transport.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseDescriptor {
    pub status: u16,
    /// Lower-cased by the constructors; [`Self::header`] matches any case.
    pub headers: Headers,
    pub body: String,
}

impl ResponseDescriptor {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        ResponseDescriptor {
            status,
            headers: Headers::new(),
            body: body.into(),
        }
    }

    /// A JSON `200 OK` response.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Arguments shared by every "list this resource" call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListArgs {
    /// Only return items changed after this instant; the epoch when absent.
    pub updated_after: Option<DateTime<Utc>>,
    /// `nextPageToken` of a previous response, passed through unchanged.
    pub start_token: Option<String>,
    /// Page size. The server uses 1000 when absent.
    pub max_results: Option<NonZeroU32>,
}

impl ListArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updated_after(mut self, instant: DateTime<Utc>) -> Self {
        self.updated_after = Some(instant);
        self
    }

    pub fn start_token(mut self, token: impl Into<String>) -> Self {
        self.start_token = Some(token.into());
        self
    }

    /// Sets the page size. `0` leaves it to the server.
    pub fn max_results(mut self, max: u32) -> Self {
        self.max_results = NonZeroU32::new(max);
        self
    }

    /// Arguments for the page following `response`, if the server sent a
    /// continuation token.
    pub fn next_page(&self, response: &Value) -> Option<ListArgs> {
        let token = response.get("nextPageToken")?.as_str()?;
        Some(ListArgs {
            start_token: Some(token.to_string()),
            ..self.clone()
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchArgs {
    pub query: String,
    pub max_results: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StreamArgs {
    pub song_id: String,
    pub device_id: String,
    /// Signing salt; the current time in milliseconds when absent.
    pub salt: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArtistArgs {
    pub artist_id: String,
    pub include_albums: bool,
    pub num_top_tracks: u32,
    pub num_related_artists: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlbumArgs {
    pub album_id: String,
    pub include_tracks: bool,
}

impl AlbumArgs {
    pub fn new(album_id: impl Into<String>) -> Self {
        AlbumArgs {
            album_id: album_id.into(),
            include_tracks: true,
        }
    }
}

/// Typed view of a batch mutation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutateResponse {
    pub mutate_response: Vec<MutateResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutateResult {
    pub id: String,
    pub client_id: Option<String>,
    pub response_code: String,
}

impl MutateResult {
    pub fn is_ok(&self) -> bool {
        self.response_code == "OK"
    }
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub id: String,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub name: String,
    pub owner: String,
    pub id: String,
}

#[derive(Tabled)]
pub struct StationTableRow {
    pub name: String,
    pub seed: String,
    pub id: String,
}

#[derive(Tabled)]
pub struct SearchTableRow {
    pub score: String,
    pub kind: String,
    pub name: String,
    pub id: String,
}

#[derive(Tabled)]
pub struct MutationTableRow {
    pub id: String,
    pub code: String,
}
