//! Batch mutation calls.
//!
//! The request carries a list of mutation records and the server answers with
//! one `{id, client_id?, response_code}` record per mutation, in the same
//! order. A batch is reported successful only when every record says `OK`;
//! callers that want to act on partial success can read the per-item codes
//! from the failure or with [`rejected_mutations`].

use serde_json::{Map, Value, json};

use crate::{
    error::{CallFailure, RejectedMutation},
    schema::{ObjectSchema, Schema},
};

/// Fields of a store track that the server fills in itself.
const SERVER_ONLY_FIELDS: [&str; 5] = [
    "kind",
    "trackAvailableForPurchase",
    "albumAvailableForPurchase",
    "albumArtRef",
    "artistId",
];

/// Value `trackType` is forced to on tracks created from store tracks.
pub const CREATED_TRACK_TYPE: i64 = 8;

pub fn body(mutations: &[Value]) -> String {
    json!({ "mutations": mutations }).to_string()
}

pub fn envelope() -> Schema {
    let result = ObjectSchema::open()
        .field("id", Schema::String)
        .optional("client_id", Schema::String)
        .field("response_code", Schema::String);

    ObjectSchema::closed()
        .field("mutate_response", Schema::array_of(result.into()))
        .into()
}

/// Mutations whose response code is anything other than `OK`.
pub fn rejected_mutations(msg: &Value) -> Vec<RejectedMutation> {
    msg.get("mutate_response")
        .and_then(Value::as_array)
        .map(|results| {
            results
                .iter()
                .enumerate()
                .filter(|(_, r)| r.get("response_code").and_then(Value::as_str) != Some("OK"))
                .map(|(index, r)| RejectedMutation {
                    index,
                    id: r.get("id").and_then(Value::as_str).map(str::to_string),
                    response_code: r
                        .get("response_code")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// All-or-nothing acceptance of a batch response.
pub fn check(msg: &Value) -> Result<(), CallFailure> {
    let rejected = rejected_mutations(msg);
    let server_error = msg.get("error").cloned();

    if rejected.is_empty() && server_error.is_none() {
        return Ok(());
    }

    let reason = if server_error.is_some() {
        "the server reported an error for the batch".to_string()
    } else {
        format!("{} mutation(s) were not applied", rejected.len())
    };

    Err(CallFailure {
        reason,
        rejected,
        server_error,
    })
}

/// One `{"delete": id}` record per id.
pub fn build_track_deletes<S: AsRef<str>>(track_ids: &[S]) -> Vec<Value> {
    track_ids
        .iter()
        .map(|id| json!({ "delete": id.as_ref() }))
        .collect()
}

/// Turns a store track description into a `create` mutation.
///
/// Works on a copy of `store_track`: server-only fields are dropped, missing
/// library fields get their client defaults, and `trackType` is overwritten.
///
/// # Arguments
///
/// * `store_track` - Track as returned by `GetStoreTrack`; left untouched
///
/// # Returns
///
/// A `{"create": track}` record for [`super::BatchMutateTracks`]. Fields the
/// input already carries, such as `rating`, keep their values.
///
/// # Example
///
/// ```
/// use mcproto::protocol::batch::build_track_add;
/// use serde_json::json;
///
/// let store = json!({"title": "Airbag", "kind": "sj#track", "trackType": "7"});
/// let record = build_track_add(store.as_object().unwrap());
/// assert_eq!(record["create"]["trackType"], 8);
/// assert!(record["create"].get("kind").is_none());
/// ```
pub fn build_track_add(store_track: &Map<String, Value>) -> Value {
    let mut track = store_track.clone();

    for key in SERVER_ONLY_FIELDS {
        track.remove(key);
    }

    let defaults = [
        ("playCount", json!(0)),
        ("rating", json!("0")),
        ("genre", json!("")),
        ("lastModifiedTimestamp", json!("0")),
        ("deleted", json!(false)),
        ("beatsPerMinute", json!(-1)),
        ("composer", json!("")),
        ("creationTimestamp", json!("-1")),
        ("totalDiscCount", json!(0)),
    ];
    for (key, default) in defaults {
        track.entry(key).or_insert(default);
    }

    track.insert("trackType".to_string(), json!(CREATED_TRACK_TYPE));

    json!({ "create": track })
}
