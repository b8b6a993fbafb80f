use super::run;
use crate::{
    config, error,
    protocol::{GetStreamUrl, signing},
    success,
    types::StreamArgs,
};

/// Resolves and prints the stream URL of a track.
pub async fn stream(song_id: String, device_id: Option<String>) {
    let Some(device_id) = device_id.or_else(config::device_id) else {
        error!("No device id. Pass --device-id or set MCPROTO_DEVICE_ID.");
    };

    let args = StreamArgs {
        song_id,
        device_id,
        salt: None,
    };
    let location = run("Resolving stream...", &GetStreamUrl, &args).await;

    match location.as_str() {
        Some(url) => println!("{}", url),
        None => error!("Unexpected stream location: {}", location),
    }
}

/// Prints the signature and salt for a track id without contacting the server.
pub fn sign(song_id: String, salt: Option<String>) {
    let (sig, salt) = signing::get_signature(&song_id, salt.as_deref());
    let id_param = if GetStreamUrl::is_all_access(&song_id) {
        "mjck"
    } else {
        "songid"
    };

    success!("sig={} slt={} {}={}", sig, salt, id_param, song_id);
}
