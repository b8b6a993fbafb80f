use serde_json::Value;

use super::{Call, batch, json_headers, json_params, list, sj_endpoint};
use crate::{
    error::{CallError, Result},
    schema::{Schema, SchemaName},
    types::{Headers, ListArgs, Method, Params, ResponseDescriptor},
};

/// Lists the tracks of the user's library.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListTracks;

impl Call for ListTracks {
    type Args = ListArgs;

    fn name(&self) -> &'static str {
        "ListTracks"
    }

    fn method(&self) -> Method {
        Method::Post
    }

    fn url(&self, _args: &ListArgs) -> String {
        sj_endpoint("trackfeed")
    }

    fn headers(&self, _args: &ListArgs) -> Headers {
        list::headers()
    }

    fn params(&self, args: &ListArgs) -> Params {
        list::params(args)
    }

    fn body(&self, args: &ListArgs) -> Option<String> {
        Some(list::body(args))
    }

    fn response_schema(&self) -> Option<Schema> {
        Some(list::envelope(SchemaName::Track))
    }

    fn parse_response(&self, response: &ResponseDescriptor) -> Result<Value> {
        list::parse(self.name(), response)
    }

    fn filter_for_display(&self, msg: &Value) -> Value {
        list::filter(msg, "tracks")
    }
}

/// Applies create/delete mutations to library tracks.
///
/// See [`batch::build_track_add`] and [`batch::build_track_deletes`] for
/// building the mutation records.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchMutateTracks;

impl Call for BatchMutateTracks {
    type Args = [Value];

    fn name(&self) -> &'static str {
        "BatchMutateTracks"
    }

    fn method(&self) -> Method {
        Method::Post
    }

    fn url(&self, _mutations: &[Value]) -> String {
        sj_endpoint("trackbatch")
    }

    fn headers(&self, _mutations: &[Value]) -> Headers {
        json_headers()
    }

    fn params(&self, _mutations: &[Value]) -> Params {
        json_params()
    }

    fn body(&self, mutations: &[Value]) -> Option<String> {
        Some(batch::body(mutations))
    }

    fn response_schema(&self) -> Option<Schema> {
        Some(batch::envelope())
    }

    fn check_success(&self, msg: &Value) -> Result<()> {
        batch::check(msg).map_err(|failure| CallError::Failure {
            call: self.name(),
            failure,
        })
    }
}

/// Fetches a single store track by its store id.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetStoreTrack;

impl Call for GetStoreTrack {
    type Args = str;

    fn name(&self) -> &'static str {
        "GetStoreTrack"
    }

    fn method(&self) -> Method {
        Method::Get
    }

    fn url(&self, _track_id: &str) -> String {
        sj_endpoint("fetchtrack")
    }

    fn headers(&self, _track_id: &str) -> Headers {
        json_headers()
    }

    fn params(&self, track_id: &str) -> Params {
        let mut params = json_params();
        params.insert("nid".to_string(), track_id.to_string());
        params
    }

    fn response_schema(&self) -> Option<Schema> {
        Some(Schema::Ref(SchemaName::Track))
    }
}
