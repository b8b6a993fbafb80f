//! # Protocol Module
//!
//! Definitions of the calls made by the mobile client. Each operation is a
//! unit struct implementing [`Call`]; the trait supplies the standard
//! behaviour and an operation overrides only what differs for its endpoint.
//!
//! ## Call lifecycle
//!
//! ```text
//! args ──build_request──▶ RequestDescriptor ──transport──▶ ResponseDescriptor
//!                                                               │
//!            Value ◀── check_success ◀── validate ◀── parse_response
//! ```
//!
//! Building a request and processing a response are pure: no I/O happens in
//! this module, and the only shared state is the immutable schema catalog and
//! the signing key. The transport layer owns sending, credentials and any
//! retry decision.
//!
//! ## Specializations
//!
//! - [`list`] - "list this resource" calls: JSON headers, `updated-min`
//!   parameter, paging body, envelope normalisation and display filtering.
//! - [`batch`] - batch mutation calls: mutation envelope, all-or-nothing
//!   success check and mutation builders.
//! - [`signing`] - stream URL signature.
//!
//! ## Operations
//!
//! | Call | Method | Endpoint |
//! |---|---|---|
//! | [`Search`] | GET | `query` |
//! | [`ListTracks`] | POST | `trackfeed` |
//! | [`ListPlaylists`] | POST | `playlistfeed` |
//! | [`ListStations`] | POST | `radio/station` |
//! | [`GetStreamUrl`] | GET | `mplay` |
//! | [`BatchMutateTracks`] | POST | `trackbatch` |
//! | [`GetStoreTrack`] | GET | `fetchtrack` |
//! | [`GetArtist`] | GET | `fetchartist` |
//! | [`GetAlbum`] | GET | `fetchalbum` |

pub mod batch;
pub mod library;
pub mod list;
pub mod search;
pub mod signing;
pub mod store;
pub mod stream;
pub mod tracks;

use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    error::{CallError, Result},
    schema::{ClosedValidator, Schema, Validator},
    types::{AuthRequirement, Headers, Method, Params, RequestDescriptor, ResponseDescriptor},
};

pub use library::{ListPlaylists, ListStations};
pub use search::Search;
pub use store::{GetAlbum, GetArtist};
pub use stream::GetStreamUrl;
pub use tracks::{BatchMutateTracks, GetStoreTrack, ListTracks};

/// Base URL of the mobile client ("sj") service.
pub const SJ_URL: &str = "https://www.googleapis.com/sj/v1/";

pub(crate) fn sj_endpoint(path: &str) -> String {
    format!("{}{}", SJ_URL, path)
}

/// Contract shared by every mobile client call.
pub trait Call {
    /// Call-specific arguments.
    type Args: ?Sized;

    /// Name used in errors and logs.
    fn name(&self) -> &'static str;

    fn method(&self) -> Method;

    fn url(&self, args: &Self::Args) -> String;

    fn headers(&self, _args: &Self::Args) -> Headers {
        Headers::new()
    }

    fn params(&self, _args: &Self::Args) -> Params {
        Params::new()
    }

    fn body(&self, _args: &Self::Args) -> Option<String> {
        None
    }

    fn auth(&self) -> AuthRequirement {
        AuthRequirement::Session
    }

    fn follow_redirects(&self) -> bool {
        true
    }

    fn verify_tls(&self) -> bool {
        true
    }

    /// Description the decoded response must match; `None` skips validation.
    fn response_schema(&self) -> Option<Schema>;

    fn parse_response(&self, response: &ResponseDescriptor) -> Result<Value> {
        parse_json(self.name(), &response.body)
    }

    fn validate(&self, msg: &Value) -> Result<()> {
        self.validate_with(&ClosedValidator::default(), msg)
    }

    fn validate_with(&self, validator: &dyn Validator, msg: &Value) -> Result<()> {
        match self.response_schema() {
            Some(schema) => validator
                .validate(&schema, msg)
                .map_err(|failure| CallError::Validation {
                    call: self.name(),
                    failure,
                }),
            None => Ok(()),
        }
    }

    /// Domain-level acceptance of a shape-valid response. Accepts everything
    /// unless a call overrides it.
    fn check_success(&self, _msg: &Value) -> Result<()> {
        Ok(())
    }

    /// Copy of `msg` trimmed for logging. Never returned to callers.
    fn filter_for_display(&self, msg: &Value) -> Value {
        msg.clone()
    }

    fn build_request(&self, args: &Self::Args) -> RequestDescriptor {
        let request = RequestDescriptor {
            method: self.method(),
            url: self.url(args),
            headers: self.headers(args),
            params: self.params(args),
            body: self.body(args),
            auth: self.auth(),
            follow_redirects: self.follow_redirects(),
            verify_tls: self.verify_tls(),
        };
        debug!(call = self.name(), method = %request.method, url = %request.url, "built request");
        request
    }

    fn process(&self, response: &ResponseDescriptor) -> Result<Value> {
        self.process_with(&ClosedValidator::default(), response)
    }

    /// Parses, validates and success-checks a response, in that order.
    fn process_with(
        &self,
        validator: &dyn Validator,
        response: &ResponseDescriptor,
    ) -> Result<Value> {
        let msg = self.parse_response(response)?;

        if let Err(e) = self
            .validate_with(validator, &msg)
            .and_then(|_| self.check_success(&msg))
        {
            warn!(call = self.name(), error = %e, "response rejected");
            return Err(e);
        }

        debug!(
            call = self.name(),
            response = %self.filter_for_display(&msg),
            "call succeeded"
        );
        Ok(msg)
    }
}

pub(crate) fn parse_json(call: &'static str, body: &str) -> Result<Value> {
    serde_json::from_str(body).map_err(|e| CallError::Parse {
        call,
        reason: e.to_string(),
    })
}

/// Standard headers for calls that exchange JSON.
pub(crate) fn json_headers() -> Headers {
    Headers::from([("Content-Type".to_string(), "application/json".to_string())])
}

/// Standard params asking the server for a JSON answer.
pub(crate) fn json_params() -> Params {
    Params::from([("alt".to_string(), "json".to_string())])
}
