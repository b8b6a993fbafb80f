mod common;

use std::num::NonZeroU32;

use chrono::{TimeZone, Utc};
use common::*;
use mcproto::error::CallError;
use mcproto::protocol::{
    BatchMutateTracks, Call, GetAlbum, GetArtist, GetStoreTrack, GetStreamUrl, ListPlaylists,
    ListStations, ListTracks, SJ_URL, Search, list, stream::STREAM_URL,
};
use mcproto::types::{
    AlbumArgs, ArtistArgs, AuthRequirement, Headers, ListArgs, Method, ResponseDescriptor,
    SearchArgs, StreamArgs,
};
use serde_json::{Value, json};

fn ok(body: &Value) -> ResponseDescriptor {
    ResponseDescriptor::ok(body.to_string())
}

#[test]
fn test_every_call_requires_session_auth() {
    assert_eq!(Search.auth(), AuthRequirement::Session);
    assert_eq!(ListTracks.auth(), AuthRequirement::Session);
    assert_eq!(ListPlaylists.auth(), AuthRequirement::Session);
    assert_eq!(ListStations.auth(), AuthRequirement::Session);
    assert_eq!(GetStreamUrl.auth(), AuthRequirement::Session);
    assert_eq!(BatchMutateTracks.auth(), AuthRequirement::Session);
    assert_eq!(GetStoreTrack.auth(), AuthRequirement::Session);
    assert_eq!(GetArtist.auth(), AuthRequirement::Session);
    assert_eq!(GetAlbum.auth(), AuthRequirement::Session);
}

#[test]
fn test_search_request() {
    let args = SearchArgs {
        query: "paranoid android".to_string(),
        max_results: 10,
    };
    let request = Search.build_request(&args);

    assert_eq!(request.method, Method::Get);
    assert_eq!(request.url, format!("{}query", SJ_URL));
    assert_eq!(request.params["q"], "paranoid android");
    assert_eq!(request.params["max-results"], "10");
    assert!(request.headers.is_empty());
    assert!(request.body.is_none());
    assert!(request.follow_redirects);

    let full = request.full_url().unwrap();
    assert_eq!(full.query(), Some("max-results=10&q=paranoid+android"));
}

#[test]
fn test_list_requests_use_expected_endpoints() {
    let args = ListArgs::new();
    assert_eq!(ListTracks.build_request(&args).url, format!("{}trackfeed", SJ_URL));
    assert_eq!(ListPlaylists.build_request(&args).url, format!("{}playlistfeed", SJ_URL));
    assert_eq!(ListStations.build_request(&args).url, format!("{}radio/station", SJ_URL));
}

#[test]
fn test_list_request_defaults() {
    let request = ListTracks.build_request(&ListArgs::new());

    assert_eq!(request.method, Method::Post);
    assert_eq!(request.headers["Content-Type"], "application/json");
    assert_eq!(request.params["alt"], "json");
    assert_eq!(request.params["updated-min"], "0");

    let body: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({}));
}

#[test]
fn test_list_request_with_paging() {
    let updated = Utc.with_ymd_and_hms(2013, 10, 1, 12, 0, 0).unwrap();
    let args = ListArgs::new()
        .updated_after(updated)
        .start_token("KmMKUQoLX3N0")
        .max_results(250);
    let request = ListPlaylists.build_request(&args);

    assert_eq!(request.params["updated-min"], "1380628800000000");

    let body: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({"start-token": "KmMKUQoLX3N0", "max-results": "250"}));
}

#[test]
fn test_list_parse_synthesizes_missing_data() {
    let calls: [&dyn Call<Args = ListArgs>; 3] = [&ListTracks, &ListPlaylists, &ListStations];

    for call in calls {
        let msg = call.process(&ok(&json!({"kind": "sj#list"}))).unwrap();
        assert_eq!(msg["data"]["items"], json!([]));
        assert!(list::items(&msg).is_empty());
    }
}

#[test]
fn test_list_pipeline_accepts_fixtures() {
    let tracks = feed_json("sj#trackList", vec![track_json("T1"), track_json("T2")]);
    let msg = ListTracks.process(&ok(&tracks)).unwrap();
    assert_eq!(list::items(&msg).len(), 2);

    let playlists = feed_json("sj#playlistList", vec![playlist_json()]);
    assert!(ListPlaylists.process(&ok(&playlists)).is_ok());

    let stations = feed_json("sj#radioList", vec![station_json()]);
    assert!(ListStations.process(&ok(&stations)).is_ok());
}

#[test]
fn test_list_pipeline_rejects_wrong_items() {
    // a playlist is not a track
    let body = feed_json("sj#trackList", vec![playlist_json()]);
    let err = ListTracks.process(&ok(&body)).unwrap_err();

    assert!(err.is_validation());
    match err {
        CallError::Validation { call, failure } => {
            assert_eq!(call, "ListTracks");
            assert_eq!(failure.path, "$.data.items[0]");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_list_filter_for_display() {
    let body = feed_json("sj#trackList", vec![track_json("T1"), track_json("T2"), track_json("T3")]);
    let msg = ListTracks.process(&ok(&body)).unwrap();

    let filtered = ListTracks.filter_for_display(&msg);
    assert_eq!(filtered["data"]["items"], json!(["<3 tracks>"]));
    assert_eq!(filtered["nextPageToken"], msg["nextPageToken"]);

    // the returned value keeps every item
    assert_eq!(list::items(&msg).len(), 3);

    let empty = ListStations.process(&ok(&json!({}))).unwrap();
    assert_eq!(ListStations.filter_for_display(&empty)["data"]["items"], json!(["<0 stations>"]));
}

#[test]
fn test_next_page_passes_token_through() {
    let args = ListArgs::new().max_results(50);
    let body = feed_json("sj#trackList", vec![]);

    let next = args.next_page(&body).unwrap();
    assert_eq!(next.start_token.as_deref(), Some("KmMKUQoLX3N0"));
    assert_eq!(next.max_results.map(NonZeroU32::get), Some(50));

    assert!(args.next_page(&json!({"kind": "sj#trackList"})).is_none());
}

#[test]
fn test_get_store_track_request() {
    let request = GetStoreTrack.build_request("Tj6fhurtstzgdpvfm4xv6i5cei4");

    assert_eq!(request.method, Method::Get);
    assert_eq!(request.url, format!("{}fetchtrack", SJ_URL));
    assert_eq!(request.headers["Content-Type"], "application/json");
    assert_eq!(request.params["alt"], "json");
    assert_eq!(request.params["nid"], "Tj6fhurtstzgdpvfm4xv6i5cei4");
}

#[test]
fn test_get_artist_request() {
    let args = ArtistArgs {
        artist_id: "Apcbqxzlt5c4kojxr4qqeesfphe".to_string(),
        include_albums: true,
        num_top_tracks: 5,
        num_related_artists: 3,
    };
    let request = GetArtist.build_request(&args);

    assert_eq!(request.url, format!("{}fetchartist", SJ_URL));
    assert_eq!(request.params["alt"], "json");
    assert_eq!(request.params["nid"], "Apcbqxzlt5c4kojxr4qqeesfphe");
    assert_eq!(request.params["include-albums"], "True");
    assert_eq!(request.params["num-top-tracks"], "5");
    assert_eq!(request.params["num-related-artists"], "3");
}

#[test]
fn test_get_album_embeds_params_in_url() {
    let request = GetAlbum.build_request(&AlbumArgs::new("Bfp7wmj7gbpuizcrxiw5c2ivz4y"));

    assert_eq!(
        request.url,
        format!(
            "{}fetchalbum?alt=json&nid=Bfp7wmj7gbpuizcrxiw5c2ivz4y&include-tracks=True",
            SJ_URL
        )
    );
    assert!(request.params.is_empty());

    let without = GetAlbum.build_request(&AlbumArgs {
        album_id: "B1".to_string(),
        include_tracks: false,
    });
    assert!(without.url.ends_with("include-tracks=False"));
}

#[test]
fn test_stream_request_for_all_access_track() {
    let args = StreamArgs {
        song_id: "Tj6fhurtstzgdpvfm4xv6i5cei4".to_string(),
        device_id: "0x1234".to_string(),
        salt: Some("1000".to_string()),
    };
    let request = GetStreamUrl.build_request(&args);

    assert_eq!(request.url, STREAM_URL);
    assert!(!request.follow_redirects);
    assert!(!request.verify_tls);
    assert_eq!(request.headers["X-Device-ID"], "0x1234");
    assert_eq!(request.params["mjck"], "Tj6fhurtstzgdpvfm4xv6i5cei4");
    assert!(!request.params.contains_key("songid"));
    assert_eq!(request.params["slt"], "1000");
    assert_eq!(request.params["sig"], "q5GtXjke7YKj4B3xTHZ0zA7l39A");
    assert_eq!(request.params["opt"], "hi");
    assert_eq!(request.params["net"], "wifi");
    assert_eq!(request.params["pt"], "e");
}

#[test]
fn test_stream_request_for_library_track() {
    let args = StreamArgs {
        song_id: "abcdef-123".to_string(),
        device_id: "0x1234".to_string(),
        salt: Some("1000".to_string()),
    };
    let request = GetStreamUrl.build_request(&args);

    assert_eq!(request.params["songid"], "abcdef-123");
    assert!(!request.params.contains_key("mjck"));
    assert_eq!(request.params["sig"], "nGR7VZsxaCV5ageYvSM8F49c8IU");
}

#[test]
fn test_stream_response_is_redirect_location() {
    let response = ResponseDescriptor::new(302, "")
        .with_header("Location", "https://r1.example.com/videoplayback?id=1");

    let msg = GetStreamUrl.process(&response).unwrap();
    assert_eq!(msg, json!("https://r1.example.com/videoplayback?id=1"));

    // body is never looked at
    let garbage = ResponseDescriptor::new(302, "<html>").with_header("location", "https://x");
    assert!(GetStreamUrl.process(&garbage).is_ok());

    let missing = GetStreamUrl.process(&ResponseDescriptor::ok("")).unwrap_err();
    assert!(missing.is_parse());
}

#[test]
fn test_batch_request() {
    let mutations = vec![json!({"delete": "id-1"}), json!({"delete": "id-2"})];
    let request = BatchMutateTracks.build_request(mutations.as_slice());

    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url, format!("{}trackbatch", SJ_URL));
    assert_eq!(request.headers["Content-Type"], "application/json");
    assert_eq!(request.params["alt"], "json");

    let body: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({"mutations": mutations}));
}

#[test]
fn test_batch_pipeline() {
    assert!(BatchMutateTracks.process(&ok(&mutate_json(&["OK", "OK"]))).is_ok());

    let rejected = BatchMutateTracks
        .process(&ok(&mutate_json(&["OK", "CONFLICT"])))
        .unwrap_err();
    assert!(rejected.is_call_failure());
    match rejected {
        CallError::Failure { failure, .. } => {
            assert_eq!(failure.rejected.len(), 1);
            assert_eq!(failure.rejected[0].index, 1);
            assert_eq!(failure.rejected[0].id.as_deref(), Some("id-1"));
            assert_eq!(failure.rejected[0].response_code.as_deref(), Some("CONFLICT"));
        }
        other => panic!("unexpected error: {}", other),
    }

    // an envelope with an error key is not shape-valid either
    let mut with_error = mutate_json(&["OK"]);
    with_error["error"] = json!({"code": 400});
    assert!(BatchMutateTracks.process(&ok(&with_error)).unwrap_err().is_validation());
}

#[test]
fn test_check_success_for_batch() {
    assert!(BatchMutateTracks.check_success(&mutate_json(&["OK", "OK"])).is_ok());
    assert!(BatchMutateTracks.check_success(&mutate_json(&["OK", "NOT_FOUND"])).is_err());

    let mut with_error = mutate_json(&["OK", "OK"]);
    with_error["error"] = json!("quota");
    assert!(BatchMutateTracks.check_success(&with_error).unwrap_err().is_call_failure());
}

#[test]
fn test_check_success_default_accepts_anything() {
    assert!(Search.check_success(&json!({"success": false})).is_ok());
    assert!(GetAlbum.check_success(&json!(null)).is_ok());
}

// Known-good, malformed and schema-violating responses for one call
fn assert_classifies<C: Call + ?Sized>(call: &C, good: Value, violating: Value) {
    assert!(call.process(&ok(&good)).is_ok(), "{}: good fixture", call.name());

    let malformed = call.process(&ResponseDescriptor::ok("{not json")).unwrap_err();
    assert!(malformed.is_parse(), "{}: {}", call.name(), malformed);

    let invalid = call.process(&ok(&violating)).unwrap_err();
    assert!(invalid.is_validation(), "{}: {}", call.name(), invalid);
}

#[test]
fn test_pipeline_classification_for_every_call() {
    let mut no_title = track_json("T1");
    no_title.as_object_mut().unwrap().remove("title");

    assert_classifies(
        &Search,
        json!({"kind": "sj#searchresponse", "entries": [search_result_json()]}),
        json!({"kind": "sj#searchresponse", "entries": [{"score": "high", "type": "1"}]}),
    );
    assert_classifies(
        &ListTracks,
        feed_json("sj#trackList", vec![track_json("T1")]),
        feed_json("sj#trackList", vec![no_title.clone()]),
    );
    assert_classifies(
        &ListPlaylists,
        feed_json("sj#playlistList", vec![playlist_json()]),
        json!({"kind": "sj#playlistList", "data": {"items": [{"name": "x"}]}}),
    );
    assert_classifies(
        &ListStations,
        feed_json("sj#radioList", vec![station_json()]),
        json!({"kind": "sj#radioList", "data": {"items": [], "extra": true}}),
    );
    assert_classifies(
        &BatchMutateTracks,
        mutate_json(&["OK"]),
        json!({"mutate_response": [{"response_code": "OK"}]}),
    );
    assert_classifies(&GetStoreTrack, track_json("T1"), no_title);
    assert_classifies(
        &GetArtist,
        artist_json("Radiohead"),
        json!({"kind": "sj#artist", "name": "Radiohead"}),
    );
    assert_classifies(
        &GetAlbum,
        album_json(),
        json!({"kind": "sj#album", "name": "OK Computer", "year": "1997"}),
    );
}

#[test]
fn test_zero_page_size_is_left_to_server() {
    let args = ListArgs::new().max_results(0);
    assert!(args.max_results.is_none());

    let body: Value =
        serde_json::from_str(ListTracks.build_request(&args).body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({}));
}

#[test]
fn test_stream_location_header_matches_any_case() {
    // built by hand, as a custom transport would
    let response = ResponseDescriptor {
        status: 302,
        headers: Headers::from([(
            "Location".to_string(),
            "https://r1.example.com/videoplayback?id=1".to_string(),
        )]),
        body: String::new(),
    };

    let msg = GetStreamUrl.process(&response).unwrap();
    assert_eq!(msg, json!("https://r1.example.com/videoplayback?id=1"));
    assert_eq!(response.header("LOCATION"), Some("https://r1.example.com/videoplayback?id=1"));
    assert_eq!(response.header("location"), Some("https://r1.example.com/videoplayback?id=1"));
}
