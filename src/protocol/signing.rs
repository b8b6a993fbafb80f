//! Stream URL signing.
//!
//! The signing key ships inside the client split into two blobs that are
//! XOR-ed together at start-up. Anyone holding the binary can recover it: the
//! split only keeps the key from appearing verbatim. The scheme is reproduced
//! as the server expects it and is not meant as protection.

use base64::{
    Engine,
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
};
use hmac::{Hmac, Mac};
use once_cell::sync::Lazy;
use sha1::Sha1;

use crate::utils;

const KEY_BLOB_1: &str = "VzeC4H4h+T2f0VI180nVX8x+Mb5HiTtGnKgH52Otj8ZCGDz9jRW\
                          yHb6QXK0JskSiOgzQfwTY5xgLLSdUSreaLVMsVVWfxfa8Rw==";
const KEY_BLOB_2: &str = "ZAPnhUkYwQ6y5DdQxWThbvhJHN8msQ1rqJw0ggKdufQjelrKuiG\
                          GJI30aswkgCWTDyHkTGK9ynlqTkJ5L4CiGGUabGeo8M6JTQ==";

static KEY: Lazy<Vec<u8>> = Lazy::new(|| {
    // both blobs are compile-time constants
    let s1 = STANDARD.decode(KEY_BLOB_1).expect("key blob 1 is valid base64");
    let s2 = STANDARD.decode(KEY_BLOB_2).expect("key blob 2 is valid base64");
    derive_key(&s1, &s2)
});

/// Byte-wise XOR of two blobs, truncated to the shorter one.
pub fn derive_key(s1: &[u8], s2: &[u8]) -> Vec<u8> {
    s1.iter().zip(s2).map(|(a, b)| a ^ b).collect()
}

/// Returns a `(signature, salt)` pair for `song_id`.
///
/// The signature is HMAC-SHA1 over the id followed by the salt, URL-safe
/// base64 encoded without its trailing pad character.
///
/// # Arguments
///
/// * `song_id` - Library or all-access track id, signed as given
/// * `salt` - Salt to sign with; the current time in milliseconds when `None`
///
/// # Returns
///
/// The 27 character signature and the salt that was used. Both go on the
/// stream request, as `sig` and `slt`.
///
/// # Example
///
/// ```
/// use mcproto::protocol::signing::get_signature;
///
/// let (sig, salt) = get_signature("Tj6fhurtstzgdpvfm4xv6i5cei4", Some("1000"));
/// assert_eq!(sig, "q5GtXjke7YKj4B3xTHZ0zA7l39A");
/// assert_eq!(salt, "1000");
/// ```
pub fn get_signature(song_id: &str, salt: Option<&str>) -> (String, String) {
    let salt = salt.map(str::to_string).unwrap_or_else(utils::current_millis);
    (sign(&KEY, song_id, &salt), salt)
}

pub(crate) fn sign(key: &[u8], song_id: &str, salt: &str) -> String {
    let mut mac = Hmac::<Sha1>::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(song_id.as_bytes());
    mac.update(salt.as_bytes());

    // a 20 byte digest encodes to 27 chars plus exactly one '='
    URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
}
