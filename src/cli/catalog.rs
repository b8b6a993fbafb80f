use serde_json::Value;
use tabled::Table;

use super::run;
use crate::{
    protocol::{GetAlbum, GetArtist, GetStoreTrack, Search},
    types::{AlbumArgs, ArtistArgs, SearchArgs, SearchTableRow, TrackTableRow},
    info, utils, warning,
};

/// Searches the store and prints one row per result.
pub async fn search(query: String, max_results: u32) {
    let args = SearchArgs { query, max_results };
    let msg = run("Searching...", &Search, &args).await;

    let entries = msg
        .get("entries")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    if entries.is_empty() {
        warning!("No results for '{}'", args.query);
        return;
    }

    let rows: Vec<SearchTableRow> = entries.iter().map(search_row).collect();
    println!("{}", Table::new(rows));
}

fn search_row(entry: &Value) -> SearchTableRow {
    let kind = utils::str_field(entry, "type");
    let score = entry
        .get("score")
        .and_then(Value::as_f64)
        .map(|s| format!("{:.1}", s))
        .unwrap_or_default();

    // the populated entity depends on the result type
    let (name, id) = if let Some(track) = entry.get("track") {
        (
            format!(
                "{} - {}",
                utils::str_field(track, "artist"),
                utils::str_field(track, "title")
            ),
            utils::str_field(track, "nid"),
        )
    } else if let Some(album) = entry.get("album") {
        (
            format!(
                "{} - {}",
                utils::str_field(album, "albumArtist"),
                utils::str_field(album, "name")
            ),
            utils::str_field(album, "albumId"),
        )
    } else if let Some(artist) = entry.get("artist") {
        (
            utils::str_field(artist, "name"),
            utils::str_field(artist, "artistId"),
        )
    } else {
        (String::new(), String::new())
    };

    SearchTableRow {
        score,
        kind,
        name: utils::truncate(&name, 60),
        id,
    }
}

pub(crate) fn track_row(track: &Value) -> TrackTableRow {
    let id = track
        .get("id")
        .or_else(|| track.get("nid"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    TrackTableRow {
        title: utils::truncate(&utils::str_field(track, "title"), 40),
        artist: utils::truncate(&utils::str_field(track, "artist"), 30),
        album: utils::truncate(&utils::str_field(track, "album"), 30),
        id,
    }
}

/// Prints a single store track.
pub async fn track(track_id: String) {
    let msg = run("Fetching track...", &GetStoreTrack, track_id.as_str()).await;
    println!("{}", Table::new(vec![track_row(&msg)]));
    info!(
        "Album {} by {}",
        utils::str_field(&msg, "albumId"),
        utils::join_str_array(msg.get("artistId"), ", ")
    );
}

/// Prints an artist with its top tracks and related artists.
pub async fn artist(args: ArtistArgs) {
    let msg = run("Fetching artist...", &GetArtist, &args).await;

    info!(
        "{} ({} albums)",
        utils::str_field(&msg, "name"),
        msg.get("albums")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0)
    );

    if let Some(top) = msg.get("topTracks").and_then(Value::as_array) {
        let rows: Vec<TrackTableRow> = top.iter().map(track_row).collect();
        println!("{}", Table::new(rows));
    }

    if let Some(related) = msg.get("related_artists").and_then(Value::as_array) {
        let names: Vec<String> = related
            .iter()
            .map(|a| utils::str_field(a, "name"))
            .collect();
        info!("Related: {}", names.join(", "));
    }
}

/// Prints an album and, when requested, its tracks.
pub async fn album(args: AlbumArgs) {
    let msg = run("Fetching album...", &GetAlbum, &args).await;

    info!(
        "{} - {} ({})",
        utils::str_field(&msg, "albumArtist"),
        utils::str_field(&msg, "name"),
        msg.get("year").and_then(Value::as_i64).unwrap_or_default()
    );

    if let Some(tracks) = msg.get("tracks").and_then(Value::as_array) {
        let rows: Vec<TrackTableRow> = tracks.iter().map(track_row).collect();
        println!("{}", Table::new(rows));
    }
}
