//! Shared behaviour of calls that list a resource.
//!
//! A list call posts its paging arguments as a JSON body, asks for items
//! updated after a point in time through the `updated-min` parameter, and
//! answers with an envelope:
//!
//! ```json
//! {"kind": "...", "nextPageToken": "...", "data": {"items": [...]}}
//! ```
//!
//! The server leaves `data` out when there is nothing to list; [`parse`]
//! puts an empty item list back so callers see one shape.

use serde_json::{Map, Value, json};

use super::parse_json;
use crate::{
    error::Result,
    schema::{ObjectSchema, Schema, SchemaName},
    types::{Headers, ListArgs, Params, ResponseDescriptor},
    utils,
};

/// JSON content type; list requests carry a JSON body.
pub fn headers() -> Headers {
    super::json_headers()
}

/// Query parameters of a list request.
///
/// # Arguments
///
/// * `args` - Paging arguments; only `updated_after` is read here
///
/// # Returns
///
/// `alt=json` and `updated-min`, the microseconds since the epoch of
/// `updated_after`, or `0` to list everything.
pub fn params(args: &ListArgs) -> Params {
    let microseconds = args
        .updated_after
        .as_ref()
        .map(utils::datetime_to_microseconds)
        .unwrap_or(0);

    let mut params = super::json_params();
    params.insert("updated-min".to_string(), microseconds.to_string());
    params
}

/// JSON body of a list request.
///
/// `start-token` and `max-results` are only included when set; the page size
/// is sent as a string.
///
/// # Example
///
/// ```
/// use mcproto::{protocol::list, types::ListArgs};
///
/// let body = list::body(&ListArgs::new().start_token("KmMK").max_results(100));
/// assert_eq!(body, r#"{"max-results":"100","start-token":"KmMK"}"#);
/// ```
pub fn body(args: &ListArgs) -> String {
    let mut data = Map::new();

    if let Some(token) = &args.start_token {
        data.insert("start-token".to_string(), json!(token));
    }

    if let Some(max) = args.max_results {
        data.insert("max-results".to_string(), json!(max.to_string()));
    }

    Value::Object(data).to_string()
}

/// Envelope description wrapping `item` in `data.items`.
pub fn envelope(item: SchemaName) -> Schema {
    ObjectSchema::closed()
        .optional("kind", Schema::String)
        .optional("nextPageToken", Schema::String)
        .optional(
            "data",
            ObjectSchema::closed()
                .field("items", Schema::array_of(Schema::Ref(item)))
                .into(),
        )
        .into()
}

/// Decodes a list response and fills in a missing `data` member.
///
/// # Arguments
///
/// * `call` - Name of the call, used in errors
/// * `response` - Raw response from the transport
///
/// # Errors
///
/// Returns [`crate::error::CallError::Parse`] if the body is not JSON.
pub fn parse(call: &'static str, response: &ResponseDescriptor) -> Result<Value> {
    let mut msg = parse_json(call, &response.body)?;

    if let Value::Object(map) = &mut msg {
        if !map.contains_key("data") {
            map.insert("data".to_string(), json!({ "items": [] }));
        }
    }

    Ok(msg)
}

/// Replaces the listed items with a `<N label>` placeholder.
pub fn filter(msg: &Value, label: &str) -> Value {
    let mut filtered = msg.clone();

    if let Some(items) = filtered.pointer_mut("/data/items") {
        let count = items.as_array().map(Vec::len).unwrap_or(0);
        *items = json!([utils::item_placeholder(count, label)]);
    }

    filtered
}

/// Items of a processed list response.
pub fn items(msg: &Value) -> &[Value] {
    msg.pointer("/data/items")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
