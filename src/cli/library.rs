use std::num::NonZeroU32;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde_json::Value;
use tabled::Table;

use super::{catalog::track_row, run};
use crate::{
    error, info,
    protocol::{BatchMutateTracks, GetStoreTrack, ListPlaylists, ListStations, ListTracks, batch, list},
    schema::catalog::seed_field,
    success,
    types::{ListArgs, MutateResponse, MutationTableRow, PlaylistTableRow, StationTableRow},
    utils, warning,
};

/// Library resources that can be listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Feed {
    Tracks,
    Playlists,
    Stations,
}

/// Lists one page of a library feed.
pub async fn list(
    feed: Feed,
    updated_after: Option<DateTime<Utc>>,
    start_token: Option<String>,
    max_results: Option<NonZeroU32>,
) {
    let args = ListArgs {
        updated_after,
        start_token,
        max_results,
    };

    let msg = match feed {
        Feed::Tracks => run("Fetching tracks...", &ListTracks, &args).await,
        Feed::Playlists => run("Fetching playlists...", &ListPlaylists, &args).await,
        Feed::Stations => run("Fetching stations...", &ListStations, &args).await,
    };

    let items = list::items(&msg);
    if items.is_empty() {
        warning!("Nothing to list.");
        return;
    }

    let table = match feed {
        Feed::Tracks => Table::new(items.iter().map(track_row)).to_string(),
        Feed::Playlists => Table::new(items.iter().map(playlist_row)).to_string(),
        Feed::Stations => Table::new(items.iter().map(station_row)).to_string(),
    };
    println!("{}", table);

    if let Some(next) = args.next_page(&msg) {
        if let Some(token) = next.start_token {
            info!("More items available, continue with --start-token {}", token);
        }
    }
}

fn playlist_row(playlist: &Value) -> PlaylistTableRow {
    PlaylistTableRow {
        name: utils::truncate(&utils::str_field(playlist, "name"), 40),
        owner: utils::str_field(playlist, "ownerName"),
        id: utils::str_field(playlist, "id"),
    }
}

fn station_row(station: &Value) -> StationTableRow {
    let seed = station
        .get("seed")
        .and_then(|seed| seed_field(seed).map(|field| (field, seed)))
        .map(|(field, seed)| format!("{}={}", field, utils::str_field(seed, field)))
        .unwrap_or_default();

    StationTableRow {
        name: utils::truncate(&utils::str_field(station, "name"), 40),
        seed,
        id: utils::str_field(station, "id"),
    }
}

/// Deletes library tracks by id.
pub async fn delete(track_ids: Vec<String>) {
    let mutations = batch::build_track_deletes(&track_ids);
    let msg = run("Deleting tracks...", &BatchMutateTracks, mutations.as_slice()).await;
    print_mutations(&msg);
    success!("Deleted {} track(s).", track_ids.len());
}

/// Adds a store track to the library.
pub async fn add(store_id: String) {
    let store_track = run("Fetching store track...", &GetStoreTrack, store_id.as_str()).await;

    let Some(track) = store_track.as_object() else {
        error!("Store track {} is not an object", store_id);
    };

    let mutations = vec![batch::build_track_add(track)];
    let msg = run("Adding track...", &BatchMutateTracks, mutations.as_slice()).await;
    print_mutations(&msg);
    success!("Added {}.", utils::str_field(&store_track, "title"));
}

fn print_mutations(msg: &Value) {
    let response: MutateResponse = match serde_json::from_value(msg.clone()) {
        Ok(response) => response,
        Err(e) => error!("Cannot read mutation results: {}", e),
    };

    let rows: Vec<MutationTableRow> = response
        .mutate_response
        .into_iter()
        .map(|r| MutationTableRow {
            id: r.id,
            code: r.response_code,
        })
        .collect();
    println!("{}", Table::new(rows));
}
