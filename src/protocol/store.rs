use url::Url;

use super::{Call, json_params, sj_endpoint};
use crate::{
    schema::{Schema, SchemaName},
    types::{AlbumArgs, ArtistArgs, Method, Params},
    utils::wire_bool,
};

/// Fetches a store artist, optionally with albums, top tracks and related
/// artists.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetArtist;

impl Call for GetArtist {
    type Args = ArtistArgs;

    fn name(&self) -> &'static str {
        "GetArtist"
    }

    fn method(&self) -> Method {
        Method::Get
    }

    fn url(&self, _args: &ArtistArgs) -> String {
        sj_endpoint("fetchartist")
    }

    fn params(&self, args: &ArtistArgs) -> Params {
        let mut params = json_params();
        params.extend([
            ("nid".to_string(), args.artist_id.clone()),
            (
                "include-albums".to_string(),
                wire_bool(args.include_albums).to_string(),
            ),
            (
                "num-top-tracks".to_string(),
                args.num_top_tracks.to_string(),
            ),
            (
                "num-related-artists".to_string(),
                args.num_related_artists.to_string(),
            ),
        ]);
        params
    }

    fn response_schema(&self) -> Option<Schema> {
        Some(Schema::Ref(SchemaName::Artist))
    }
}

/// Fetches a store album. Its parameters travel inside the URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetAlbum;

impl Call for GetAlbum {
    type Args = AlbumArgs;

    fn name(&self) -> &'static str {
        "GetAlbum"
    }

    fn method(&self) -> Method {
        Method::Get
    }

    fn url(&self, args: &AlbumArgs) -> String {
        let endpoint = sj_endpoint("fetchalbum");
        let query = [
            ("alt", "json"),
            ("nid", args.album_id.as_str()),
            ("include-tracks", wire_bool(args.include_tracks)),
        ];
        match Url::parse_with_params(&endpoint, query) {
            Ok(url) => url.to_string(),
            // endpoint is a constant, well-formed URL
            Err(_) => endpoint,
        }
    }

    fn response_schema(&self) -> Option<Schema> {
        Some(Schema::Ref(SchemaName::Album))
    }
}
