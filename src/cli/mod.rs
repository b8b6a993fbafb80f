//! # CLI Module
//!
//! Command implementations for the `mcproto` binary. Every networked command
//! builds a call from [`crate::protocol`], sends it through
//! [`crate::transport::HttpTransport`] configured from the environment, and
//! renders the validated response as a table.
//!
//! ## Commands
//!
//! - [`search`] - search the store catalog
//! - [`list`] - list library tracks, playlists or stations
//! - [`track`], [`artist`], [`album`] - fetch store entities
//! - [`stream`] - resolve a signed stream URL
//! - [`delete`], [`add`] - batch-mutate library tracks
//! - [`sign`] - compute a stream signature offline
//! - [`check`] - run a saved response through an operation's pipeline offline
//!
//! ## Error Handling
//!
//! Failures are printed with the console macros and end the process; the
//! error's classification (validation, server rejection, transport) is part
//! of the message.

mod catalog;
mod check;
mod library;
mod stream;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

use crate::{
    error,
    protocol::Call,
    transport::{self, HttpTransport},
};

pub use catalog::{album, artist, search, track};
pub use check::{Operation, check};
pub use library::{Feed, add, delete, list};
pub use stream::{sign, stream};

/// Performs `call` with a spinner, exiting on failure.
async fn run<C>(message: &str, call: &C, args: &C::Args) -> Value
where
    C: Call + ?Sized,
{
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let transport = HttpTransport::from_env();
    let result = transport::perform(&transport, call, args).await;
    pb.finish_and_clear();

    match result {
        Ok(msg) => msg,
        Err(e) => error!("{}", e),
    }
}
