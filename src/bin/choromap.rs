use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "choromap", version, about = "Render choropleth time-series animations")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every date of the case table to an MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render a single date as a PNG.
    Frame(FrameArgs),
    /// List the dates found in the case table.
    Dates(DatesArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// TOML configuration; built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output MP4 path (overrides `output.path`).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Keep earlier frames' fills underneath the current ones.
    #[arg(long)]
    accumulate: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[arg(long)]
    config: Option<PathBuf>,

    /// Date column to render, exactly as in the table header.
    #[arg(long)]
    date: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct DatesArgs {
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Dates(args) => cmd_dates(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = choromap::AppConfig::load_or_default(args.config.as_deref())?;
    if let Some(out) = args.out {
        cfg.output.path = out;
    }
    if args.accumulate {
        cfg.output.overlay_policy = choromap::OverlayPolicy::Accumulate;
    }

    let stats = choromap::render_to_mp4(&cfg)?;
    eprintln!(
        "wrote {} ({} frames, {} fills)",
        cfg.output.path.display(),
        stats.frames,
        stats.regions_filled
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = choromap::AppConfig::load_or_default(args.config.as_deref())?;
    let mut renderer = choromap::load_renderer(&cfg)?;
    let (frame, stats) = renderer.render_single(&args.date)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    // PNG stores straight alpha.
    let data: Vec<u8> = frame
        .data
        .chunks_exact(4)
        .flat_map(|px| {
            choromap::Rgba8Premul {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
            .to_straight_rgba()
        })
        .collect();

    image::save_buffer_with_format(
        &args.out,
        &data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} filled, {} unfilled)",
        args.out.display(),
        stats.filled,
        stats.unfilled
    );
    Ok(())
}

fn cmd_dates(args: DatesArgs) -> anyhow::Result<()> {
    let cfg = choromap::AppConfig::load_or_default(args.config.as_deref())?;
    let table = choromap::CaseTable::from_path(&cfg.input.cases, &cfg.input.code_column)?;
    for date in table.dates() {
        println!("{date}");
    }
    Ok(())
}
