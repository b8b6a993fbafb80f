use std::path::PathBuf;

use clap::ValueEnum;
use serde_json::Value;

use crate::{
    error::Result,
    info,
    protocol::{
        BatchMutateTracks, Call, GetAlbum, GetArtist, GetStoreTrack, GetStreamUrl, ListPlaylists,
        ListStations, ListTracks, Search,
    },
    success,
    types::ResponseDescriptor,
    warning,
};

/// Operations whose responses can be checked offline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Operation {
    Search,
    ListTracks,
    ListPlaylists,
    ListStations,
    GetStreamUrl,
    BatchMutateTracks,
    GetStoreTrack,
    GetArtist,
    GetAlbum,
}

impl Operation {
    /// Runs a raw response through the operation's parse, validate and
    /// success-check steps.
    pub fn process(&self, response: &ResponseDescriptor) -> Result<Value> {
        match self {
            Operation::Search => Search.process(response),
            Operation::ListTracks => ListTracks.process(response),
            Operation::ListPlaylists => ListPlaylists.process(response),
            Operation::ListStations => ListStations.process(response),
            Operation::GetStreamUrl => GetStreamUrl.process(response),
            Operation::BatchMutateTracks => BatchMutateTracks.process(response),
            Operation::GetStoreTrack => GetStoreTrack.process(response),
            Operation::GetArtist => GetArtist.process(response),
            Operation::GetAlbum => GetAlbum.process(response),
        }
    }

    /// Display-filtered form of a processed response.
    pub fn filter_for_display(&self, msg: &Value) -> Value {
        match self {
            Operation::ListTracks => ListTracks.filter_for_display(msg),
            Operation::ListPlaylists => ListPlaylists.filter_for_display(msg),
            Operation::ListStations => ListStations.filter_for_display(msg),
            _ => msg.clone(),
        }
    }
}

/// Checks a saved response body against an operation.
///
/// For `get-stream-url` the file holds the redirect location instead of a
/// body.
pub async fn check(operation: Operation, path: PathBuf) -> crate::Res<()> {
    let content = async_fs::read_to_string(&path).await?;

    let response = match operation {
        Operation::GetStreamUrl => ResponseDescriptor::new(302, "").with_header("Location", content.trim()),
        _ => ResponseDescriptor::ok(content),
    };

    info!("Checking {} against {:?}", path.display(), operation);

    match operation.process(&response) {
        Ok(msg) => {
            let shown = operation.filter_for_display(&msg);
            println!("{}", serde_json::to_string_pretty(&shown)?);
            success!("Response is valid.");
        }
        Err(e) if e.is_validation() => warning!("Schema mismatch: {}", e),
        Err(e) if e.is_call_failure() => warning!("Server rejected the call: {}", e),
        Err(e) => return Err(Box::new(e)),
    }

    Ok(())
}
