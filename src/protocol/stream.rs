use serde_json::Value;

use super::{Call, signing};
use crate::{
    error::{CallError, Result},
    schema::Schema,
    types::{Headers, Method, Params, ResponseDescriptor, StreamArgs},
};

pub const STREAM_URL: &str = "https://android.clients.google.com/music/mplay";

/// Leading character of all-access (catalog) track ids.
pub const ALL_ACCESS_MARKER: char = 'T';

/// Resolves a track to a signed, short-lived stream location.
///
/// The server answers with a redirect; the result is its target URL as a JSON
/// string. There is no body to validate.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetStreamUrl;

impl GetStreamUrl {
    pub fn is_all_access(song_id: &str) -> bool {
        song_id.starts_with(ALL_ACCESS_MARKER)
    }
}

impl Call for GetStreamUrl {
    type Args = StreamArgs;

    fn name(&self) -> &'static str {
        "GetStreamUrl"
    }

    fn method(&self) -> Method {
        Method::Get
    }

    fn url(&self, _args: &StreamArgs) -> String {
        STREAM_URL.to_string()
    }

    fn headers(&self, args: &StreamArgs) -> Headers {
        Headers::from([("X-Device-ID".to_string(), args.device_id.clone())])
    }

    fn params(&self, args: &StreamArgs) -> Params {
        let (sig, salt) = signing::get_signature(&args.song_id, args.salt.as_deref());

        let mut params = Params::from([
            ("opt".to_string(), "hi".to_string()),
            ("net".to_string(), "wifi".to_string()),
            ("pt".to_string(), "e".to_string()),
            ("slt".to_string(), salt),
            ("sig".to_string(), sig),
        ]);

        let id_key = if Self::is_all_access(&args.song_id) {
            "mjck"
        } else {
            "songid"
        };
        params.insert(id_key.to_string(), args.song_id.clone());

        params
    }

    // the redirect target is the result
    fn follow_redirects(&self) -> bool {
        false
    }

    fn verify_tls(&self) -> bool {
        false
    }

    fn response_schema(&self) -> Option<Schema> {
        None
    }

    fn parse_response(&self, response: &ResponseDescriptor) -> Result<Value> {
        response
            .header("location")
            .map(|location| Value::String(location.to_string()))
            .ok_or_else(|| CallError::Parse {
                call: self.name(),
                reason: format!("no redirect location in HTTP {} response", response.status),
            })
    }
}
