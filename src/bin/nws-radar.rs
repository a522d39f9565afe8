use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing::Level;

use nws_radar::{FrameLimit, RadarConfig, RadarSession, Series, SessionOpts};

#[derive(Parser, Debug)]
#[command(name = "nws-radar", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Single-station loop: base map, overlays, radar, legend and warnings.
    Loop(LoopArgs),
    /// Regional mosaic loop.
    Mosaic(MosaicArgs),
    /// Pre-rendered lite image for a station.
    Lite(LiteArgs),
    /// Session described by a JSON config file.
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
struct OutputArgs {
    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    /// Fetch worker threads.
    #[arg(long)]
    workers: Option<usize>,
}

#[derive(Parser, Debug)]
struct LoopArgs {
    /// Radar site, e.g. ABR.
    #[arg(long)]
    station: String,

    /// Radar product, e.g. N0R.
    #[arg(long, default_value = "N0R")]
    product: String,

    #[arg(long, default_value = "Short")]
    range: String,

    /// Number of most recent frames.
    #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
    frames: i64,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Parser, Debug)]
struct MosaicArgs {
    /// Mosaic region, e.g. SOUTHPLAINS.
    #[arg(long)]
    region: String,

    #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
    frames: i64,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Parser, Debug)]
struct LiteArgs {
    #[arg(long)]
    station: String,

    #[arg(long, default_value = "N0R")]
    product: String,

    /// Fetch the latest still instead of the animated loop.
    #[arg(long)]
    still: bool,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Input session config JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (session, out) = match cli.cmd {
        Command::Loop(args) => (
            session_for(
                Series::standard(&args.station, &args.product, &args.range)?,
                args.frames,
                args.output.workers,
            )?,
            args.output.out,
        ),
        Command::Mosaic(args) => (
            session_for(
                Series::mosaic(&args.region)?,
                args.frames,
                args.output.workers,
            )?,
            args.output.out,
        ),
        Command::Lite(args) => (
            session_for(
                Series::lite(&args.station, &args.product, !args.still)?,
                1,
                args.output.workers,
            )?,
            args.output.out,
        ),
        Command::Config(args) => {
            let cfg = RadarConfig::from_path(&args.in_path)?;
            (RadarSession::from_config(&cfg)?, args.out)
        }
    };

    session.update().context("update radar images")?;
    session.image(Some(out.as_path()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn session_for(
    series: Series,
    frames: i64,
    workers: Option<usize>,
) -> anyhow::Result<RadarSession> {
    let opts = SessionOpts {
        workers,
        ..SessionOpts::default()
    };
    Ok(RadarSession::over_http(series, FrameLimit::new(frames)?, opts)?)
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}
