//! Configuration management for the mobile client tooling.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Request building itself never reads
//! configuration; only the transport and the command-line front-end do.
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `MCPROTO_AUTH_TOKEN` | session credential attached to every call | none |
//! | `MCPROTO_DEVICE_ID` | device id sent with stream requests | none |
//! | `MCPROTO_TIMEOUT_SECS` | per-request timeout | `30` |
//! | `MCPROTO_LOG` | `tracing` filter directive | `warn` |

use std::{env, path::PathBuf, time::Duration};

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_FILTER: &str = "warn";

/// Path of the optional `.env` file.
///
/// - Linux: `~/.local/share/mcproto/.env`
/// - macOS: `~/Library/Application Support/mcproto/.env`
/// - Windows: `%LOCALAPPDATA%/mcproto/.env`
pub fn env_file() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("mcproto/.env");
    path
}

/// Loads environment variables from the `.env` file, if there is one.
///
/// Creates the parent directory so users know where the file belongs.
/// Variables already set in the environment take precedence over the file.
///
/// # Returns
///
/// `Ok(())` when the file was loaded or does not exist yet.
///
/// # Errors
///
/// This function will return an error if:
/// - The parent directory cannot be created
/// - The `.env` file exists but cannot be read or parsed
///
/// # Example
///
/// ```
/// use mcproto::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let path = env_file();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.exists() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| e.to_string())
}

/// Session credential for authenticated calls.
///
/// Reads `MCPROTO_AUTH_TOKEN`. The value is sent as
/// `Authorization: GoogleLogin auth=<token>` by the HTTP transport.
///
/// # Returns
///
/// `None` when the variable is unset or blank; session calls then fail with
/// [`crate::error::CallError::MissingCredential`].
///
/// # Example
///
/// ```
/// let transport = mcproto::transport::HttpTransport::new(mcproto::config::auth_token());
/// ```
pub fn auth_token() -> Option<String> {
    non_empty_var("MCPROTO_AUTH_TOKEN")
}

/// Device id used for stream URL requests.
pub fn device_id() -> Option<String> {
    non_empty_var("MCPROTO_DEVICE_ID")
}

/// Per-request timeout.
///
/// Reads `MCPROTO_TIMEOUT_SECS` as whole seconds. Falls back to 30 seconds
/// when the variable is missing or not a number.
pub fn request_timeout() -> Duration {
    let secs = non_empty_var("MCPROTO_TIMEOUT_SECS")
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

/// Filter directive for the log subscriber.
pub fn log_filter() -> String {
    non_empty_var("MCPROTO_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
