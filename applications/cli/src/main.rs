/// padporter - mirror a sample library into a sampler-compliant tree
use anyhow::Context;
use clap::{Parser, ValueEnum};
use padporter_audio::{ChannelPolicy, ResampleQuality};
use padporter_core::{CancelToken, TracingReporter};
use padporter_mirror::{LocalProvider, MirrorConfig, TreeMirror};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "padporter")]
#[command(
    about = "Prepare a sample library for hardware-sampler import",
    long_about = "Mirrors a source directory tree into a destination tree, \
                  normalizing every name to [a-zA-Z0-9_] and converting every \
                  WAV file to 16-bit PCM at 44100 or 48000 Hz."
)]
struct Cli {
    /// Source directory holding the sample library
    source: PathBuf,

    /// Destination directory (e.g. the SD card import folder)
    dest: PathBuf,

    /// TOML configuration file; command-line flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Channel handling for multi-channel input
    #[arg(long, value_enum)]
    channel_policy: Option<ChannelPolicyArg>,

    /// Resampling quality
    #[arg(long, value_enum)]
    quality: Option<QualityArg>,

    /// Process entries in provider order instead of sorting by name
    #[arg(long)]
    no_sort: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ChannelPolicyArg {
    /// Keep the source channel count
    Preserve,
    /// Average all channels into one
    DownmixMono,
}

impl From<ChannelPolicyArg> for ChannelPolicy {
    fn from(arg: ChannelPolicyArg) -> Self {
        match arg {
            ChannelPolicyArg::Preserve => ChannelPolicy::Preserve,
            ChannelPolicyArg::DownmixMono => ChannelPolicy::DownmixMono,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum QualityArg {
    /// Linear interpolation, low CPU
    Fast,
    /// Windowed-sinc interpolation
    High,
}

impl From<QualityArg> for ResampleQuality {
    fn from(arg: QualityArg) -> Self {
        match arg {
            QualityArg::Fast => ResampleQuality::Fast,
            QualityArg::High => ResampleQuality::High,
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<MirrorConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Cannot read config file {}", path.display()))?;
            toml::from_str(&raw)
                .with_context(|| format!("Cannot parse config file {}", path.display()))?
        }
        None => MirrorConfig::default(),
    };

    if let Some(policy) = cli.channel_policy {
        config.convert.channel_policy = policy.into();
    }
    if let Some(quality) = cli.quality {
        config.convert.quality = quality.into();
    }
    if cli.no_sort {
        config.sort_listing = false;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "padporter=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    tracing::info!(
        "Mirroring {} into {}",
        cli.source.display(),
        cli.dest.display()
    );

    let mut provider = LocalProvider::new(&cli.source);
    let reporter = TracingReporter;
    let cancel = CancelToken::new();

    let mut mirror = TreeMirror::new(&mut provider, &reporter, cancel, config);
    let summary = mirror
        .run("", &cli.dest)
        .context("Mirror run failed before traversal")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary.summary_text());
    }

    if !summary.success() {
        std::process::exit(1);
    }
    Ok(())
}
