use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

use rewebp::{
    InputFile, LibwebpEncoder, Session, Settings, compress, format_bytes, format_duration_ms,
    format_fps,
};

#[derive(Parser, Debug)]
#[command(name = "rewebp", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Inspect a WebP file and estimate its recompressed size.
    Probe(ProbeArgs),
    /// Dump one decoded frame as a PNG.
    Frame(FrameArgs),
    /// Recompress a WebP file at a target frame rate and quality.
    Compress(CompressArgs),
}

#[derive(Parser, Debug)]
struct ProbeArgs {
    /// Input WebP file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Target frame rate for the estimate (defaults to the source rate).
    #[arg(long)]
    fps: Option<u32>,

    /// Target quality in 1..=100 for the estimate.
    #[arg(long)]
    quality: Option<u8>,

    /// Emit JSON instead of text.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input WebP file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct CompressArgs {
    /// Input WebP file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output WebP path.
    #[arg(long)]
    out: PathBuf,

    /// Target frame rate (defaults to the source rate, capped at 60).
    #[arg(long)]
    fps: Option<u32>,

    /// Target quality in 1..=100.
    #[arg(long)]
    quality: Option<u8>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::WARN)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Probe(args) => cmd_probe(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Compress(args) => cmd_compress(args),
    }
}

fn load_session(path: &Path) -> anyhow::Result<Session> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read input '{}'", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input.webp".to_string());
    let mut input = InputFile::new(bytes, name);
    if path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("webp"))
    {
        input = input.with_media_type("image/webp");
    }
    Ok(Session::load(input)?)
}

fn apply_overrides(session: &mut Session, fps: Option<u32>, quality: Option<u8>) {
    let mut settings = session.settings();
    if let Some(fps) = fps {
        settings.fps = fps;
    }
    if let Some(quality) = quality {
        settings.quality = quality;
    }
    session.set_settings(settings);
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<()> {
    let mut session = load_session(&args.in_path)?;
    apply_overrides(&mut session, args.fps, args.quality);

    let metadata = session.metadata();
    let settings = session.settings();
    let estimate = session.estimate();

    if args.json {
        let doc = json!({
            "metadata": metadata,
            "settings": settings,
            "estimated_bytes": estimate,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("file:       {}", metadata.file_name);
    println!("resolution: {} × {}", metadata.width, metadata.height);
    println!(
        "frames:     {} @ {}",
        metadata.frame_count,
        format_fps(metadata.fps)
    );
    println!("duration:   {}", format_duration_ms(metadata.total_duration_ms));
    println!("size:       {}", format_bytes(metadata.size_bytes as f64));
    println!(
        "estimate:   {} at {} fps, quality {}",
        format_bytes(estimate),
        settings.fps,
        settings.quality
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let session = load_session(&args.in_path)?;
    let frame = session
        .frames()
        .get(args.index)
        .with_context(|| format!("frame {} out of range 0..{}", args.index, session.frame_count()))?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let pixels = frame.bitmap.to_pixels();
    image::save_buffer_with_format(
        &args.out,
        &pixels.rgba,
        pixels.width,
        pixels.height,
        image::ExtendedColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write frame png '{}'", args.out.display()))?;
    println!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_compress(args: CompressArgs) -> anyhow::Result<()> {
    let mut session = load_session(&args.in_path)?;
    apply_overrides(&mut session, args.fps, args.quality);
    let Settings { fps, quality } = session.settings();

    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}% {msg}")
            .expect("Invalid progress bar template")
            .progress_chars("#>-"),
    );
    bar.set_message(format!("{} fps, quality {}", fps, quality));

    let result = compress(&session, &LibwebpEncoder::new(), &mut |fraction| {
        bar.set_position((f64::from(fraction) * 100.0).round() as u64);
    })?;
    bar.finish_and_clear();

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &result.bytes)
        .with_context(|| format!("write output '{}'", args.out.display()))?;

    for line in result.summary.lines() {
        println!("{line}");
    }
    println!("wrote {}", args.out.display());
    Ok(())
}
