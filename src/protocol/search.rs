use super::{Call, sj_endpoint};
use crate::{
    schema::{ObjectSchema, Schema, SchemaName},
    types::{Method, Params, SearchArgs},
};

/// Searches the store catalog for artists, albums and tracks.
#[derive(Debug, Clone, Copy, Default)]
pub struct Search;

impl Call for Search {
    type Args = SearchArgs;

    fn name(&self) -> &'static str {
        "Search"
    }

    fn method(&self) -> Method {
        Method::Get
    }

    fn url(&self, _args: &SearchArgs) -> String {
        sj_endpoint("query")
    }

    fn params(&self, args: &SearchArgs) -> Params {
        Params::from([
            ("q".to_string(), args.query.clone()),
            ("max-results".to_string(), args.max_results.to_string()),
        ])
    }

    fn response_schema(&self) -> Option<Schema> {
        Some(
            ObjectSchema::closed()
                .field("kind", Schema::String)
                .field(
                    "entries",
                    Schema::array_of(Schema::Ref(SchemaName::SearchResult)),
                )
                .into(),
        )
    }
}
