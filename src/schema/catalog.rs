//! Entity descriptions for the music catalog.
//!
//! Every entry is built once on first use and then only handed out by shared
//! reference. Entities that embed other entities do it through
//! [`Schema::Ref`], never by inlining a copy.

use std::{collections::HashMap, fmt};

use once_cell::sync::Lazy;
use serde_json::Value;

use super::{ObjectSchema, Schema};

static CATALOG: Lazy<SchemaCatalog> = Lazy::new(SchemaCatalog::build);

/// Returns the process-wide schema catalog.
pub fn catalog() -> &'static SchemaCatalog {
    &CATALOG
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaName {
    Track,
    Album,
    Artist,
    Playlist,
    Station,
    StationSeed,
    SearchResult,
}

impl SchemaName {
    pub const ALL: [SchemaName; 7] = [
        SchemaName::Track,
        SchemaName::Album,
        SchemaName::Artist,
        SchemaName::Playlist,
        SchemaName::Station,
        SchemaName::StationSeed,
        SchemaName::SearchResult,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaName::Track => "Track",
            SchemaName::Album => "Album",
            SchemaName::Artist => "Artist",
            SchemaName::Playlist => "Playlist",
            SchemaName::Station => "Station",
            SchemaName::StationSeed => "StationSeed",
            SchemaName::SearchResult => "SearchResult",
        }
    }
}

impl fmt::Display for SchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named, immutable entity descriptions.
#[derive(Debug)]
pub struct SchemaCatalog {
    entries: HashMap<SchemaName, ObjectSchema>,
}

impl SchemaCatalog {
    fn build() -> Self {
        let entries = HashMap::from([
            (SchemaName::Track, track()),
            (SchemaName::Album, album()),
            (SchemaName::Artist, artist()),
            (SchemaName::Playlist, playlist()),
            (SchemaName::Station, station()),
            (SchemaName::StationSeed, station_seed()),
            (SchemaName::SearchResult, search_result()),
        ]);
        SchemaCatalog { entries }
    }

    /// Borrows the shared description of an entity.
    pub fn get(&self, name: SchemaName) -> Option<&ObjectSchema> {
        self.entries.get(&name)
    }

    /// Returns a private deep copy of an entry for call-local edits.
    pub fn customize(&self, name: SchemaName) -> Option<ObjectSchema> {
        self.get(name).cloned()
    }
}

fn art_ref_list() -> Schema {
    Schema::array_of(ObjectSchema::open().field("url", Schema::String).into())
}

fn track() -> ObjectSchema {
    ObjectSchema::closed()
        .field("kind", Schema::String)
        .field("title", Schema::String)
        .field("artist", Schema::String)
        .field("album", Schema::String)
        .field("albumArtist", Schema::String)
        .field("trackNumber", Schema::Integer)
        .field("durationMillis", Schema::String)
        .field("albumArtRef", art_ref_list())
        .field("discNumber", Schema::Integer)
        .field("estimatedSize", Schema::String)
        .field("trackType", Schema::String)
        .field("storeId", Schema::String)
        .field("albumId", Schema::String)
        .field("artistId", Schema::array_of(Schema::String))
        .field("nid", Schema::String)
        .field("trackAvailableForPurchase", Schema::Boolean)
        .field("albumAvailableForPurchase", Schema::Boolean)
        .optional("playCount", Schema::Integer)
        .optional("year", Schema::Integer)
}

fn playlist() -> ObjectSchema {
    ObjectSchema::closed()
        .field("kind", Schema::String)
        .field("name", Schema::String)
        .field("deleted", Schema::Boolean)
        .optional("type", Schema::String)
        .field("lastModifiedTimestamp", Schema::String)
        .field("recentTimestamp", Schema::String)
        .field("shareToken", Schema::String)
        .field("ownerProfilePhotoUrl", Schema::String)
        .field("ownerName", Schema::String)
        .field("accessControlled", Schema::Boolean)
        .field("creationTimestamp", Schema::String)
        .field("id", Schema::String)
        .optional("albumArtRef", art_ref_list())
}

// albumArtRef is a plain string here, unlike Track and Playlist.
fn album() -> ObjectSchema {
    ObjectSchema::closed()
        .field("kind", Schema::String)
        .field("name", Schema::String)
        .field("albumArtist", Schema::String)
        .field("albumArtRef", Schema::String)
        .field("albumId", Schema::String)
        .field("artist", Schema::String)
        .field("artistId", Schema::array_of(Schema::String))
        .field("year", Schema::Integer)
        .optional("tracks", Schema::array_of(Schema::Ref(SchemaName::Track)))
}

fn artist() -> ObjectSchema {
    ObjectSchema::closed()
        .field("kind", Schema::String)
        .field("name", Schema::String)
        .optional("artistArtRef", Schema::String)
        .field("artistId", Schema::String)
        .optional("albums", Schema::array_of(Schema::Ref(SchemaName::Album)))
        .optional("topTracks", Schema::array_of(Schema::Ref(SchemaName::Track)))
        .optional("total_albums", Schema::Integer)
        .optional(
            "related_artists",
            Schema::array_of(Schema::Ref(SchemaName::Artist)),
        )
}

fn search_result() -> ObjectSchema {
    ObjectSchema::closed()
        .field("score", Schema::Number)
        .field("type", Schema::String)
        .optional("best_result", Schema::Boolean)
        .optional("artist", Schema::Ref(SchemaName::Artist))
        .optional("album", Schema::Ref(SchemaName::Album))
        .optional("track", Schema::Ref(SchemaName::Track))
}

/// Fields of a station seed that identify what the station is built from.
pub const SEED_FIELDS: [&str; 5] = ["albumId", "artistId", "genreId", "trackId", "trackLockerId"];

fn station_seed() -> ObjectSchema {
    SEED_FIELDS
        .iter()
        .fold(ObjectSchema::closed().field("kind", Schema::String), |seed, name| {
            seed.optional(name, Schema::String)
        })
}

fn station() -> ObjectSchema {
    ObjectSchema::closed()
        .field("imageUrl", Schema::String)
        .field("kind", Schema::String)
        .field("name", Schema::String)
        .field("deleted", Schema::Boolean)
        .field("lastModifiedTimestamp", Schema::String)
        .field("recentTimestamp", Schema::String)
        .field("clientId", Schema::String)
        .field("seed", Schema::Ref(SchemaName::StationSeed))
        .field("id", Schema::String)
        .optional("description", Schema::String)
        .optional("tracks", Schema::array_of(Schema::Ref(SchemaName::Track)))
}

/// Returns the single identifying field of a station seed document.
///
/// Validation does not enforce the one-field rule, so this returns `None`
/// both when no identifying field is present and when several are.
pub fn seed_field(seed: &Value) -> Option<&'static str> {
    let mut present = SEED_FIELDS
        .iter()
        .copied()
        .filter(|name| seed.get(*name).is_some());
    match (present.next(), present.next()) {
        (Some(name), None) => Some(name),
        _ => None,
    }
}
