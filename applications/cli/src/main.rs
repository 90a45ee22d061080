/// Utawaku - segment playlist player
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utawaku_cli::{
    commands::{self, SegmentEdit},
    simulate, AppConfig, SimulationOptions,
};
use utawaku_core::{extract_video_id, PlaylistStore, SegmentDraft};
use utawaku_oembed::OEmbedClient;

#[derive(Parser)]
#[command(name = "utawaku")]
#[command(about = "Play trimmed segments of online videos back to back", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Playlist file (overrides the configured path)
    #[arg(short, long, global = true, env = "UTAWAKU_PLAYLIST")]
    playlist: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the playlist
    List,
    /// Add a segment
    Add {
        /// Share URL or video id
        video: String,
        /// Title (looked up online when omitted)
        #[arg(short, long)]
        title: Option<String>,
        /// Start time (h:mm:ss, m:ss or seconds)
        #[arg(short, long, default_value = "0")]
        start: String,
        /// End time; equal to start plays to the end of the video
        #[arg(short, long, default_value = "0")]
        end: String,
        /// Rating, 1-6 stars
        #[arg(short, long, default_value_t = 1)]
        rating: u8,
        /// Free text annotation
        #[arg(short, long, default_value = "")]
        article: String,
        /// Insert at this position instead of appending
        #[arg(long)]
        at: Option<usize>,
    },
    /// Edit a segment; changing the title saves a copy
    Edit {
        /// Position in the playlist (from 1)
        position: usize,
        #[arg(long)]
        video: Option<String>,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        start: Option<String>,
        #[arg(short, long)]
        end: Option<String>,
        #[arg(short, long)]
        rating: Option<u8>,
        #[arg(short, long)]
        article: Option<String>,
    },
    /// Remove a segment
    Remove {
        /// Position in the playlist (from 1)
        position: usize,
    },
    /// Move a segment to another position
    Move { from: usize, to: usize },
    /// Restore the demo playlist
    Reset,
    /// Replace the playlist with a CSV file
    Import { file: PathBuf },
    /// Write the playlist as CSV (stdout when no file is given)
    Export { file: Option<PathBuf> },
    /// Look up a video's title
    Title {
        /// Share URL or video id
        video: String,
    },
    /// Play the playlist against a simulated player and print the transcript
    Simulate {
        /// Virtual seconds to run
        #[arg(short, long, default_value_t = 300)]
        seconds: u64,
        /// Position to start at (from 1)
        #[arg(long, default_value_t = 1)]
        from: usize,
        /// Pick segments at random
        #[arg(long)]
        shuffle: bool,
        /// Seed for shuffle picks
        #[arg(long)]
        seed: Option<u64>,
        /// Length of every simulated video in seconds
        #[arg(long, default_value_t = 300.0)]
        video_secs: f64,
    },
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "utawaku=info,utawaku_cli=info,utawaku_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(playlist) = cli.playlist {
        config.playlist_path = playlist;
    }
    config.validate()?;

    run(cli.command, &config).await
}

async fn run(command: Commands, config: &AppConfig) -> anyhow::Result<()> {
    let path = &config.playlist_path;

    match command {
        Commands::List => {
            let store = PlaylistStore::load(path)?;
            println!("{}", commands::render_list(&store));
        }
        Commands::Add {
            video,
            title,
            start,
            end,
            rating,
            article,
            at,
        } => {
            let mut store = PlaylistStore::load(path)?;
            let lookup = OEmbedClient::new(config.oembed.clone())?;
            let draft = SegmentDraft {
                video,
                title: title.unwrap_or_default(),
                start,
                end,
                rating,
                article,
            };
            let position = commands::add_segment(&mut store, draft, at, &lookup).await?;
            store.save(path)?;
            println!("Added at position {position}");
        }
        Commands::Edit {
            position,
            video,
            title,
            start,
            end,
            rating,
            article,
        } => {
            let mut store = PlaylistStore::load(path)?;
            let edit = SegmentEdit {
                video,
                title,
                start,
                end,
                rating,
                article,
            };
            commands::edit_segment(&mut store, position, &edit)?;
            store.save(path)?;
            println!("{}", commands::render_list(&store));
        }
        Commands::Remove { position } => {
            let mut store = PlaylistStore::load(path)?;
            let segment = commands::remove_segment(&mut store, position)?;
            store.save(path)?;
            println!("Removed \"{}\"", segment.title);
        }
        Commands::Move { from, to } => {
            let mut store = PlaylistStore::load(path)?;
            commands::move_segment(&mut store, from, to)?;
            store.save(path)?;
            println!("{}", commands::render_list(&store));
        }
        Commands::Reset => {
            let mut store = PlaylistStore::load(path)?;
            store.reset_to_default();
            store.save(path)?;
            println!("Playlist reset ({} segments)", store.len());
        }
        Commands::Import { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let mut store = PlaylistStore::load(path)?;
            store.import_csv(&text)?;
            store.save(path)?;
            println!("Imported {} segments", store.len());
        }
        Commands::Export { file } => {
            let store = PlaylistStore::load(path)?;
            let csv = store.export_csv();
            match file {
                Some(file) => {
                    std::fs::write(&file, csv)
                        .with_context(|| format!("writing {}", file.display()))?;
                    println!("Exported {} segments", store.len());
                }
                None => println!("{csv}"),
            }
        }
        Commands::Title { video } => {
            let video_id = extract_video_id(&video)
                .with_context(|| format!("not a video URL or id: {video}"))?;
            let client = OEmbedClient::new(config.oembed.clone())?;
            let title = client.try_fetch_title(video_id.as_str()).await?;
            println!("{title}");
        }
        Commands::Simulate {
            seconds,
            from,
            shuffle,
            seed,
            video_secs,
        } => {
            let store = PlaylistStore::load(path)?;
            let options = SimulationOptions {
                duration: Duration::from_secs(seconds),
                start_index: commands::to_index(from, store.len())?,
                shuffle: shuffle || config.engine.shuffle,
                seed,
                video_secs,
                ..SimulationOptions::default()
            };
            let report = simulate(&store, &config.engine, &options)?;
            for line in &report.lines {
                println!("{line}");
            }
            println!(
                "{} started, {} finished",
                report.segments_started, report.segments_finished
            );
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}
