use serde_json::Value;

use super::{Call, list, sj_endpoint};
use crate::{
    error::Result,
    schema::{Schema, SchemaName},
    types::{Headers, ListArgs, Method, Params, ResponseDescriptor},
};

/// Lists the user's playlists.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListPlaylists;

impl Call for ListPlaylists {
    type Args = ListArgs;

    fn name(&self) -> &'static str {
        "ListPlaylists"
    }

    fn method(&self) -> Method {
        Method::Post
    }

    fn url(&self, _args: &ListArgs) -> String {
        sj_endpoint("playlistfeed")
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
        Some(list::envelope(SchemaName::Playlist))
    }

    fn parse_response(&self, response: &ResponseDescriptor) -> Result<Value> {
        list::parse(self.name(), response)
    }

    fn filter_for_display(&self, msg: &Value) -> Value {
        list::filter(msg, "playlists")
    }
}

/// Lists the user's radio stations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListStations;

impl Call for ListStations {
    type Args = ListArgs;

    fn name(&self) -> &'static str {
        "ListStations"
    }

    fn method(&self) -> Method {
        Method::Post
    }

    fn url(&self, _args: &ListArgs) -> String {
        sj_endpoint("radio/station")
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
        Some(list::envelope(SchemaName::Station))
    }

    fn parse_response(&self, response: &ResponseDescriptor) -> Result<Value> {
        list::parse(self.name(), response)
    }

    fn filter_for_display(&self, msg: &Value) -> Value {
        list::filter(msg, "stations")
    }
}
