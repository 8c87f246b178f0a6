use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use starmap::persist::share::{DEFAULT_SHARE_BASE, decode_from_url, encode_shareable, parse_base};
use starmap::{
    Canvas, CelestialConfig, CompositorOpts, ConfigPatch, DesignerConfig, FontSource, SkyChart,
    compose_once, encode_png, merge,
};

#[derive(Parser, Debug)]
#[command(name = "starmap", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose a poster PNG from a design and an exported sky chart.
    Render(RenderArgs),
    /// Print the share link for a design.
    Share(ShareArgs),
    /// Print the sky-chart renderer configuration for a design as JSON.
    Celestial(CelestialArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct DesignSource {
    /// Design JSON (the stored camelCase format; partial documents are merged over defaults).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Share link to take the design from.
    #[arg(long)]
    share_url: Option<String>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    design: DesignSource,

    /// Sky chart exported by the renderer (SVG or PNG).
    #[arg(long)]
    chart: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Output width in pixels.
    #[arg(long, default_value_t = 600, conflicts_with = "print_dpi")]
    width: u32,

    /// Output height in pixels.
    #[arg(long, default_value_t = 600, conflicts_with = "print_dpi")]
    height: u32,

    /// Render at print resolution for the design's poster size instead.
    #[arg(long)]
    print_dpi: Option<u32>,

    /// TTF/OTF font for the overlay text (defaults to `STARMAP_FONT`, then system fonts).
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ShareArgs {
    /// Design JSON.
    #[arg(long)]
    config: PathBuf,

    /// Base URL of the designer.
    #[arg(long, default_value = DEFAULT_SHARE_BASE)]
    base: String,
}

#[derive(Parser, Debug)]
struct CelestialArgs {
    /// Design JSON.
    #[arg(long)]
    config: PathBuf,

    /// Chart width in pixels.
    #[arg(long, default_value_t = 600)]
    width: u32,
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
        Command::Share(args) => cmd_share(args),
        Command::Celestial(args) => cmd_celestial(args),
    }
}

fn read_config(path: &Path) -> anyhow::Result<DesignerConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("parse config json '{}'", path.display()))?;
    let (patch, discarded) = ConfigPatch::from_json_lenient(&value);
    if !discarded.is_empty() {
        tracing::warn!(?discarded, "ignored malformed config fields");
    }
    let config = merge(&DesignerConfig::default(), &patch.limited());
    for issue in config.validate() {
        tracing::warn!(?issue, "config issue");
    }
    Ok(config)
}

fn load_design(src: &DesignSource) -> anyhow::Result<DesignerConfig> {
    match (&src.config, &src.share_url) {
        (Some(path), _) => read_config(path),
        (None, Some(link)) => {
            let url = url::Url::parse(link).with_context(|| format!("parse share url '{link}'"))?;
            Ok(merge(&DesignerConfig::default(), &decode_from_url(&url)))
        }
        (None, None) => anyhow::bail!("either --config or --share-url is required"),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = load_design(&args.design)?;
    let chart = SkyChart::from_path(&args.chart)?;
    let canvas = match args.print_dpi {
        Some(dpi) => config.poster_size.print_canvas(dpi)?,
        None => Canvas::new(args.width, args.height),
    };
    let opts = CompositorOpts {
        font: args.font.map(FontSource::File).unwrap_or_default(),
        ..CompositorOpts::default()
    };

    let raster = compose_once(&chart, &config, canvas, opts)?
        .into_raster()
        .context("canvas is empty; nothing to render")?;
    let png = encode_png(&raster)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, png).with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_share(args: ShareArgs) -> anyhow::Result<()> {
    let config = read_config(&args.config)?;
    let base = parse_base(&args.base)?;
    println!("{}", encode_shareable(&base, &config));
    Ok(())
}

fn cmd_celestial(args: CelestialArgs) -> anyhow::Result<()> {
    let config = read_config(&args.config)?;
    let cfg = CelestialConfig::for_design(&config, args.width);
    println!(
        "{}",
        serde_json::to_string_pretty(&cfg).context("serialize celestial config")?
    );
    Ok(())
}
