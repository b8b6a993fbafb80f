#![allow(dead_code)]

use serde_json::{Value, json};

// Helper function to create a store track with every required field
pub fn track_json(nid: &str) -> Value {
    json!({
        "kind": "sj#track",
        "title": "Paranoid Android",
        "artist": "Radiohead",
        "album": "OK Computer",
        "albumArtist": "Radiohead",
        "trackNumber": 2,
        "durationMillis": "383000",
        "albumArtRef": [{"url": "http://lh3.example.com/art"}],
        "discNumber": 1,
        "estimatedSize": "15343102",
        "trackType": "7",
        "storeId": nid,
        "albumId": "Bfp7wmj7gbpuizcrxiw5c2ivz4y",
        "artistId": ["Apcbqxzlt5c4kojxr4qqeesfphe"],
        "nid": nid,
        "trackAvailableForPurchase": true,
        "albumAvailableForPurchase": false
    })
}

pub fn album_json() -> Value {
    json!({
        "kind": "sj#album",
        "name": "OK Computer",
        "albumArtist": "Radiohead",
        "albumArtRef": "http://lh3.example.com/album",
        "albumId": "Bfp7wmj7gbpuizcrxiw5c2ivz4y",
        "artist": "Radiohead",
        "artistId": ["Apcbqxzlt5c4kojxr4qqeesfphe"],
        "year": 1997
    })
}

pub fn artist_json(name: &str) -> Value {
    json!({
        "kind": "sj#artist",
        "name": name,
        "artistId": format!("A{}", name.to_lowercase())
    })
}

pub fn playlist_json() -> Value {
    json!({
        "kind": "sj#playlist",
        "name": "Road trip",
        "deleted": false,
        "lastModifiedTimestamp": "1380000000000000",
        "recentTimestamp": "1380000000000000",
        "shareToken": "AMaBXymHQ",
        "ownerProfilePhotoUrl": "http://lh3.example.com/photo",
        "ownerName": "Some One",
        "accessControlled": false,
        "creationTimestamp": "1370000000000000",
        "id": "e8e3a-playlist"
    })
}

pub fn seed_json() -> Value {
    json!({
        "kind": "sj#radioSeed",
        "artistId": "Apcbqxzlt5c4kojxr4qqeesfphe"
    })
}

pub fn station_json() -> Value {
    json!({
        "imageUrl": "http://lh3.example.com/station",
        "kind": "sj#radioStation",
        "name": "Radiohead radio",
        "deleted": false,
        "lastModifiedTimestamp": "1380000000000000",
        "recentTimestamp": "1380000000000000",
        "clientId": "c-1",
        "seed": seed_json(),
        "id": "station-1"
    })
}

pub fn search_result_json() -> Value {
    json!({
        "score": 312.5,
        "type": "1",
        "track": track_json("Tj6fhurtstzgdpvfm4xv6i5cei4")
    })
}

/// Canned list envelope around `items`.
pub fn feed_json(kind: &str, items: Vec<Value>) -> Value {
    json!({
        "kind": kind,
        "nextPageToken": "KmMKUQoLX3N0",
        "data": {"items": items}
    })
}

pub fn mutate_json(codes: &[&str]) -> Value {
    let results: Vec<Value> = codes
        .iter()
        .enumerate()
        .map(|(i, code)| json!({"id": format!("id-{}", i), "response_code": code}))
        .collect();
    json!({ "mutate_response": results })
}
