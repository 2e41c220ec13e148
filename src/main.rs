// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use podcast_feed::probe::DEFAULT_FFPROBE;
use podcast_feed::{
    FeedCache, FeedServer, FfprobeProbe, GenerateOptions, NoopReporter, ProgressEvent,
    ProgressReporter, SharedProgressReporter, TracingReporter, generate_from_file,
};

// Emoji with fallback for terminals without Unicode support
static MICROPHONE: Emoji<'_, '_> = Emoji("🎙️  ", "");
static CONFIG: Emoji<'_, '_> = Emoji("📄 ", "[~] ");
static PROBE: Emoji<'_, '_> = Emoji("🎧 ", "[i] ");
static RENDER: Emoji<'_, '_> = Emoji("📡 ", "[r] ");
static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "[+] ");
static GLOBE: Emoji<'_, '_> = Emoji("🌐 ", "");

/// Generate a podcast RSS feed from a TOML episode list and serve it
#[derive(Parser, Debug)]
#[command(name = "podcast-feed")]
#[command(about = "Generate a podcast RSS feed from a TOML episode list and serve it")]
#[command(version)]
struct Args {
    /// Path to the feed configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Directory with static assets; audio lives in <static-dir>/download/audio
    #[arg(long, default_value = "static")]
    static_dir: PathBuf,

    /// The port to run on
    #[arg(short, long, default_value = "80")]
    port: u16,

    /// Interface to bind to
    #[arg(short, long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    interface: IpAddr,

    /// Number of HTTP worker threads
    #[arg(short = 't', long, default_value = "4")]
    threads: usize,

    /// Executable used to probe audio durations
    #[arg(long, default_value = DEFAULT_FFPROBE)]
    ffprobe: String,

    /// Quiet mode - suppress progress output
    #[arg(short, long)]
    quiet: bool,
}

/// Spinner shown while the feed is generated at startup
struct SpinnerReporter {
    bar: ProgressBar,
}

impl SpinnerReporter {
    fn new() -> Result<Self> {
        let bar = ProgressBar::new_spinner();
        bar.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {wide_msg}")?);
        bar.enable_steady_tick(Duration::from_millis(100));
        Ok(Self { bar })
    }
}

impl ProgressReporter for SpinnerReporter {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::LoadingConfig { path } => {
                self.bar
                    .set_message(format!("{CONFIG}Loading config: {}", path.cyan()));
            }

            ProgressEvent::EpisodeProbing {
                episode_title,
                episode_index,
                total_episodes,
            } => {
                self.bar.set_message(format!(
                    "{PROBE}[{}/{}] Probing {}",
                    (episode_index + 1).to_string().cyan(),
                    total_episodes.to_string().cyan(),
                    episode_title.bold()
                ));
            }

            ProgressEvent::EpisodeEnriched { .. } => {}

            ProgressEvent::Rendering { episodes } => {
                self.bar.set_message(format!(
                    "{RENDER}Rendering feed with {} episodes",
                    episodes.to_string().cyan()
                ));
            }

            ProgressEvent::FeedGenerated { episodes, bytes } => {
                self.bar.finish_and_clear();
                println!(
                    "{SUCCESS}{} {} episodes, {} bytes",
                    "Feed generated:".bold().green(),
                    episodes.to_string().green().bold(),
                    bytes.to_string().cyan()
                );
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::from_default_env().add_directive("podcast_feed=info".parse()?))
        .init();

    if !args.quiet {
        println!(
            "\n{}{} {}\n",
            MICROPHONE,
            "podcast-feed".bold().magenta(),
            "- Podcast Feed Server".dimmed()
        );
    }

    let spinner = if args.quiet {
        None
    } else {
        Some(Arc::new(SpinnerReporter::new()?))
    };
    let reporter: SharedProgressReporter = match &spinner {
        Some(spinner) => Arc::clone(spinner) as SharedProgressReporter,
        None => NoopReporter::shared(),
    };

    let probe = Arc::new(FfprobeProbe::with_tool(args.ffprobe.clone()));
    let options = GenerateOptions {
        audio_dir: args.static_dir.join("download").join("audio"),
    };

    // A feed that never generated successfully is fatal, nothing is served
    let feed = match generate_from_file(&args.config, &options, probe.as_ref(), &reporter).await {
        Ok(feed) => feed,
        Err(e) => {
            if let Some(spinner) = &spinner {
                spinner.bar.finish_and_clear();
            }
            return Err(e).context("Failed to generate feed");
        }
    };

    let cache = Arc::new(FeedCache::new(feed));
    let server = FeedServer::bind(
        SocketAddr::new(args.interface, args.port),
        args.threads,
        Arc::clone(&cache),
        args.static_dir.clone(),
    )?;

    if !args.quiet {
        println!(
            "{GLOBE}Serving on {}\n",
            format!("http://{}", server.addr()).cyan()
        );
    }

    #[cfg(unix)]
    tokio::spawn(regenerate_on_hangup(
        Arc::clone(&cache),
        args.config.clone(),
        options,
        probe,
    ));

    let shutdown = server.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutting down");
            shutdown.shutdown();
        }
    });

    tokio::task::spawn_blocking(move || server.run())
        .await
        .context("HTTP server task failed")?
}

/// Rebuild the feed whenever the process receives SIGHUP
#[cfg(unix)]
async fn regenerate_on_hangup(
    cache: Arc<FeedCache>,
    config_path: PathBuf,
    options: GenerateOptions,
    probe: Arc<FfprobeProbe>,
) {
    use tokio::signal::unix::{SignalKind, signal};

    let mut hangup = match signal(SignalKind::hangup()) {
        Ok(hangup) => hangup,
        Err(e) => {
            tracing::warn!(error = %e, "cannot listen for SIGHUP, regeneration disabled");
            return;
        }
    };

    let reporter = TracingReporter::shared();
    while hangup.recv().await.is_some() {
        tracing::info!("SIGHUP received, regenerating feed");
        // Failures are logged by regenerate and the previous feed stays cached
        let _ = podcast_feed::regenerate(
            &cache,
            &config_path,
            &options,
            probe.as_ref(),
            &reporter,
        )
        .await;
    }
}
