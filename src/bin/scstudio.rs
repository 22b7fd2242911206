use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "scstudio", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a scene JSON to a PNG.
    Render(RenderArgs),
    /// Generate a thumbnail background with the image-generation service.
    Generate(GenerateArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path. Defaults to the export naming convention
    /// (SC-Studio-<ratio>-<unixtime>.png) in the current directory.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Directory containing the catalog font files.
    #[arg(long, default_value = "fonts")]
    fonts_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Scene description for the background.
    #[arg(long)]
    description: String,

    /// Style preset id (e.g. realistic, cyberpunk, game-art).
    #[arg(long, default_value = "realistic")]
    style: String,

    /// Target aspect ratio (one of the resolution catalog ratios).
    #[arg(long, default_value = "16:9")]
    aspect_ratio: String,

    /// Output image path.
    #[arg(long, default_value = "background.png")]
    out: PathBuf,

    /// API key for the generation service. Falls back to $GEMINI_API_KEY.
    #[arg(long)]
    api_key: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Generate(args) => cmd_generate(args),
    }
}

fn read_scene_json(path: &Path) -> anyhow::Result<scstudio::Scene> {
    let f = File::open(path).with_context(|| format!("open scene '{}'", path.display()))?;
    let r = BufReader::new(f);
    let scene: scstudio::Scene = serde_json::from_reader(r).with_context(|| "parse scene JSON")?;
    Ok(scene)
}

fn unix_time_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let scene = read_scene_json(&args.in_path)?;
    scene.validate()?;

    let resolution = scstudio::resolution(&scene.resolution)
        .with_context(|| format!("unknown resolution id '{}'", scene.resolution))?;

    let mut compositor = scstudio::Compositor::new(scstudio::FontStore::new(&args.fonts_dir));
    let frame = compositor.render(&scene, resolution)?;

    let out = args.out.unwrap_or_else(|| {
        PathBuf::from(scstudio::export::file_name(
            resolution.aspect_ratio,
            unix_time_now(),
        ))
    });
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    // Credential resolution stays at the CLI boundary; the client itself only
    // ever sees an explicit config value.
    let api_key = match args.api_key {
        Some(key) => key,
        None => std::env::var("GEMINI_API_KEY")
            .context("no --api-key given and $GEMINI_API_KEY is not set")?,
    };

    let style = scstudio::genai::style_preset(&args.style)
        .with_context(|| format!("unknown style preset '{}'", args.style))?;

    let cfg = scstudio::genai::GenAiConfig::new(api_key);
    let client = scstudio::genai::http_client()?;
    let request = scstudio::genai::BackgroundRequest {
        description: &args.description,
        style_modifier: style.prompt_modifier,
        aspect_ratio: &args.aspect_ratio,
    };

    let runtime = tokio::runtime::Runtime::new().context("start async runtime")?;
    let data_url =
        runtime.block_on(scstudio::genai::generate_background(&client, &cfg, &request))?;

    let bytes = scstudio::decode_data_url(&data_url)?;
    std::fs::write(&args.out, &bytes)
        .with_context(|| format!("write image '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
