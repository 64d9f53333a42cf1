use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use map_dither::{DitherAlgorithm, MinecraftMapPalette, Rgb};
use mapcast::models::{AppConfig, DitheredFramePacket, PaletteKind, StreamConfig, StreamSettings};
use mapcast::rendering::{decode_png, render_preview};
use mapcast::services::{
    load_palette, split_tiles, DitherPipelineStep, FramePipelineStep, StreamWorker, TraceSink,
};

#[derive(Parser)]
#[command(name = "mapcast")]
#[command(about = "Mapcast - stream video frames onto Minecraft map walls")]
struct Cli {
    /// Path to config.yaml (default: $MAPCAST_CONFIG or ./config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the palette lookup tables and report timing
    Palette {
        /// Show the palette entry chosen for this color (e.g. "#3A7F20")
        #[arg(long)]
        probe: Option<String>,
    },
    /// Dither a PNG and write what the maps would show
    Preview {
        /// Input PNG file path
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Dither algorithm (overrides the stream's)
        #[arg(short, long)]
        algorithm: Option<String>,

        /// Stream whose settings to use
        #[arg(short, long)]
        stream: Option<String>,
    },
    /// Split a PNG into the map tiles a stream would display
    Tiles {
        /// Input PNG file path
        #[arg(short, long)]
        input: PathBuf,

        /// Stream whose settings to use
        #[arg(short, long)]
        stream: Option<String>,
    },
    /// Push a PNG through a stream worker repeatedly and report throughput
    Replay {
        /// Input PNG file path
        #[arg(short, long)]
        input: PathBuf,

        /// Number of frames to submit
        #[arg(short, long, default_value_t = 60)]
        frames: u32,

        /// Stream whose settings to use
        #[arg(short, long)]
        stream: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "mapcast=info".into()))
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();
    let config_path = cli
        .config
        .or_else(|| std::env::var_os("MAPCAST_CONFIG").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("config.yaml"));
    let config = AppConfig::load(&config_path);

    match cli.command {
        Commands::Palette { probe } => run_palette_command(&config, probe.as_deref()),
        Commands::Preview {
            input,
            output,
            algorithm,
            stream,
        } => run_preview_command(
            &config,
            &input,
            &output,
            algorithm.as_deref(),
            stream.as_deref(),
        ),
        Commands::Tiles { input, stream } => run_tiles_command(&config, &input, stream.as_deref()),
        Commands::Replay {
            input,
            frames,
            stream,
        } => run_replay_command(&config, &input, frames, stream.as_deref()).await,
    }
}

/// Settings for the named stream, or defaults when no name is given.
fn stream_settings(config: &AppConfig, stream: Option<&str>) -> anyhow::Result<StreamSettings> {
    match stream {
        Some(name) => Ok(config.stream_settings(name)?),
        None => Ok(StreamConfig::default().resolve("default")?),
    }
}

fn run_palette_command(config: &AppConfig, probe: Option<&str>) -> anyhow::Result<()> {
    let started = Instant::now();
    let palette = load_palette(config)?;
    println!(
        "Built lookup tables for {} colors in {} ms",
        palette.len(),
        started.elapsed().as_millis()
    );

    if let Some(probe) = probe {
        let color: Rgb = probe.parse()?;
        let (index, packed) = palette.best_match(color.r, color.g, color.b);
        let name = match config.palette.kind {
            PaletteKind::Minecraft => MinecraftMapPalette::base_name(index),
            PaletteKind::Custom => None,
        };
        println!(
            "{} -> index {} {}{}",
            color,
            index,
            Rgb::from_packed(packed),
            name.map(|n| format!(" ({n})")).unwrap_or_default()
        );
    }

    Ok(())
}

fn run_preview_command(
    config: &AppConfig,
    input: &Path,
    output: &Path,
    algorithm: Option<&str>,
    stream: Option<&str>,
) -> anyhow::Result<()> {
    let settings = stream_settings(config, stream)?;
    let algorithm = match algorithm {
        Some(name) => name.parse::<DitherAlgorithm>()?,
        None => settings.algorithm,
    };
    let palette = load_palette(config)?;

    let png_bytes = std::fs::read(input)?;
    let preview = render_preview(&png_bytes, &palette, algorithm)?;
    std::fs::write(output, &preview)?;

    println!(
        "Wrote {} ({} bytes, {})",
        output.display(),
        preview.len(),
        algorithm
    );
    Ok(())
}

fn run_tiles_command(config: &AppConfig, input: &Path, stream: Option<&str>) -> anyhow::Result<()> {
    let settings = stream_settings(config, stream)?;
    let palette = load_palette(config)?;
    let frame = decode_png(&std::fs::read(input)?)?;

    let (wall_w, wall_h) = settings.grid.pixel_size();
    if frame.width() > wall_w || frame.height() > wall_h {
        tracing::warn!(
            frame_width = frame.width(),
            frame_height = frame.height(),
            wall_width = wall_w,
            wall_height = wall_h,
            "Frame is larger than the map wall and will be cropped"
        );
    }

    let mut step = DitherPipelineStep::new(palette, settings.algorithm);
    let packet: DitheredFramePacket = step.process(frame);

    for tile in split_tiles(settings.grid, &packet) {
        println!(
            "map {:>6}: {:>5} of {} pixels covered",
            tile.map_id,
            tile.covered_pixels(),
            tile.pixels.len()
        );
    }
    Ok(())
}

async fn run_replay_command(
    config: &AppConfig,
    input: &Path,
    frames: u32,
    stream: Option<&str>,
) -> anyhow::Result<()> {
    let settings = stream_settings(config, stream)?;
    let palette = load_palette(config)?;
    let frame = decode_png(&std::fs::read(input)?)?;

    let started = Instant::now();
    let mut worker = StreamWorker::spawn(settings, palette, Box::new(TraceSink));
    for _ in 0..frames {
        worker.submit(frame.clone()).await?;
    }
    let stats = worker.finish().await?;

    let elapsed = started.elapsed();
    println!(
        "{} frames dithered, {} skipped in {} ms ({:.1} fps)",
        stats.dithered,
        stats.skipped,
        elapsed.as_millis(),
        stats.dithered as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );
    Ok(())
}
