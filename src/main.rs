use std::{num::NonZeroU32, path::PathBuf};

use chrono::{DateTime, Utc};
use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use mcproto::{
    cli, config, error,
    types::{AlbumArgs, ArtistArgs},
    warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Search the store catalog
    Search(SearchOptions),

    /// List library tracks, playlists or stations
    List(ListOptions),

    /// Show a store track
    Track { nid: String },

    /// Show a store artist
    Artist(ArtistOptions),

    /// Show a store album
    Album(AlbumOptions),

    /// Print the stream URL of a track
    Stream(StreamOptions),

    /// Delete library tracks
    Delete {
        #[clap(required = true)]
        ids: Vec<String>,
    },

    /// Add a store track to the library
    Add { nid: String },

    /// Compute a stream signature offline
    Sign(SignOptions),

    /// Validate a saved response against an operation
    Check(CheckOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    query: String,
    #[clap(long, default_value_t = 20)]
    max_results: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct ListOptions {
    #[clap(value_enum)]
    feed: cli::Feed,

    /// Only items changed after this RFC 3339 instant
    #[clap(long, value_parser = parse_instant)]
    updated_after: Option<DateTime<Utc>>,

    /// Continuation token from a previous listing
    #[clap(long)]
    start_token: Option<String>,

    /// Page size, at least 1
    #[clap(long)]
    max_results: Option<NonZeroU32>,
}

#[derive(Parser, Debug, Clone)]
pub struct ArtistOptions {
    nid: String,
    #[clap(long)]
    albums: bool,
    #[clap(long, default_value_t = 5)]
    top_tracks: u32,
    #[clap(long, default_value_t = 5)]
    related: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct AlbumOptions {
    nid: String,
    /// Leave the track list out
    #[clap(long)]
    no_tracks: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct StreamOptions {
    song_id: String,
    #[clap(long)]
    device_id: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct SignOptions {
    song_id: String,
    #[clap(long)]
    salt: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CheckOptions {
    #[clap(value_enum)]
    operation: cli::Operation,
    file: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn parse_instant(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment file. Err: {}", e);
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config::log_filter()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Search(opt) => cli::search(opt.query, opt.max_results).await,
        Command::List(opt) => {
            cli::list(opt.feed, opt.updated_after, opt.start_token, opt.max_results).await
        }
        Command::Track { nid } => cli::track(nid).await,
        Command::Artist(opt) => {
            cli::artist(ArtistArgs {
                artist_id: opt.nid,
                include_albums: opt.albums,
                num_top_tracks: opt.top_tracks,
                num_related_artists: opt.related,
            })
            .await
        }
        Command::Album(opt) => {
            cli::album(AlbumArgs {
                album_id: opt.nid,
                include_tracks: !opt.no_tracks,
            })
            .await
        }
        Command::Stream(opt) => cli::stream(opt.song_id, opt.device_id).await,
        Command::Delete { ids } => cli::delete(ids).await,
        Command::Add { nid } => cli::add(nid).await,
        Command::Sign(opt) => cli::sign(opt.song_id, opt.salt),
        Command::Check(opt) => {
            if let Err(e) = cli::check(opt.operation, opt.file).await {
                error!("Check failed: {}", e);
            }
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
