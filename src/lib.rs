//! Mobile client protocol library
//!
//! Request/response contract for the music service's mobile client web API.
//! Each operation knows how to build its HTTP request and how to decode,
//! validate and accept the JSON that comes back; sending is left to a
//! [`transport::Transport`].
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration from environment variables
//! - `error` - Error taxonomy for calls
//! - `protocol` - Call abstraction and the concrete operations
//! - `schema` - Entity schema catalog and validator
//! - `transport` - Request sending (reqwest)
//! - `types` - Request/response descriptors and call arguments
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use mcproto::{protocol::{Call, ListTracks}, types::{ListArgs, ResponseDescriptor}};
//!
//! let request = ListTracks.build_request(&ListArgs::new().max_results(100));
//! assert_eq!(request.params["updated-min"], "0");
//!
//! let tracks = ListTracks.process(&ResponseDescriptor::ok(r#"{"kind": "sj#trackList"}"#))?;
//! assert_eq!(tracks["data"]["items"], serde_json::json!([]));
//! # Ok::<(), mcproto::error::CallError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod protocol;
pub mod schema;
pub mod transport;
pub mod types;
pub mod utils;

/// Boxed error result used by the command-line layer.
///
/// Library operations return [`error::Result`]; the CLI mixes those with
/// I/O and parsing errors and only needs to print them.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for fatal errors in the command-line front-end; library code returns
/// errors instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
