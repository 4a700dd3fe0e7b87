use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use damascus::{
    BladeView, BladeViewOpts, BlockView, BlockViewOpts, Fps, FrameLoop, HeadlessHost, Material,
    PatternRaster, PngSequenceSink, Recipe, SceneView, SynthOpts, Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "damascus", version, about = "Plan and preview Damascus steel patterns")]
struct Cli {
    /// Log verbosity on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Synthesize the pattern raster as a PNG.
    Pattern(PatternArgs),
    /// Print the forging instructions.
    Steps(StepsArgs),
    /// Record the animated block preview as a PNG sequence.
    Block(ViewArgs),
    /// Record the blade preview as a PNG sequence.
    Blade(BladeArgs),
    /// Encode or decode share tokens.
    #[command(subcommand)]
    Share(ShareCommand),
    /// List the material catalog.
    Materials,
    /// Report which stack layer a pattern coordinate lands on.
    Sample(SampleArgs),
}

#[derive(Args, Debug)]
struct RecipeArgs {
    /// Recipe JSON file.
    #[arg(long, conflicts_with = "share")]
    recipe: Option<PathBuf>,

    /// Share token or share link.
    #[arg(long)]
    share: Option<String>,
}

impl RecipeArgs {
    fn load(&self) -> anyhow::Result<Recipe> {
        match (&self.recipe, &self.share) {
            (Some(path), _) => Ok(Recipe::from_path(path)?),
            (None, Some(s)) if s.contains('?') => Ok(damascus::recipe_from_url(s)?),
            (None, Some(s)) => Ok(damascus::decode_share_token(s)?),
            (None, None) => anyhow::bail!("one of --recipe or --share is required"),
        }
    }
}

#[derive(Args, Debug)]
struct PatternArgs {
    #[command(flatten)]
    recipe: RecipeArgs,

    #[arg(long, default_value_t = 512)]
    width: u32,

    #[arg(long, default_value_t = 512)]
    height: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct StepsArgs {
    #[command(flatten)]
    recipe: RecipeArgs,

    /// Write to a file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ViewArgs {
    #[command(flatten)]
    recipe: RecipeArgs,

    /// Displayed width in layout pixels.
    #[arg(long, default_value_t = 640.0)]
    width: f64,

    /// Displayed height in layout pixels.
    #[arg(long, default_value_t = 360.0)]
    height: f64,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Pattern raster size (square).
    #[arg(long, default_value_t = 512)]
    raster_size: u32,

    #[arg(long, default_value_t = 120)]
    frames: u64,

    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Output directory for PNG frames.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct BladeArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Horizontal pattern scroll, in pattern widths.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    u_offset: f64,
}

#[derive(Subcommand, Debug)]
enum ShareCommand {
    /// Print the share token (or link, with `--base`) for a recipe file.
    Encode {
        /// Recipe JSON file.
        #[arg(long)]
        recipe: PathBuf,
        /// Base URL to append the token to.
        #[arg(long)]
        base: Option<String>,
    },
    /// Decode a share token or link back to recipe JSON.
    Decode {
        /// Token or link.
        token: String,
        /// Write the recipe to a file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct SampleArgs {
    #[command(flatten)]
    recipe: RecipeArgs,

    /// Position along the bar, in `[0, 1)`.
    #[arg(long)]
    u: f64,

    /// Position across the stack, in `[0, 1)`.
    #[arg(long)]
    v: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Pattern(args) => cmd_pattern(args),
        Command::Steps(args) => cmd_steps(args),
        Command::Block(args) => cmd_block(args),
        Command::Blade(args) => cmd_blade(args),
        Command::Share(cmd) => cmd_share(cmd),
        Command::Materials => cmd_materials(),
        Command::Sample(args) => cmd_sample(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_pattern(args: PatternArgs) -> anyhow::Result<()> {
    let recipe = args.recipe.load()?;
    let raster = damascus::synthesize_with(
        &recipe.layers,
        &recipe.ops,
        args.width,
        args.height,
        &SynthOpts::from_env(),
    );
    raster.save_png(&args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_steps(args: StepsArgs) -> anyhow::Result<()> {
    let recipe = args.recipe.load()?;
    let text = damascus::export_text(&recipe.ops);
    write_text(args.out.as_deref(), &text)
}

fn cmd_block(args: ViewArgs) -> anyhow::Result<()> {
    record_view(&args, BlockView::new(BlockViewOpts::from_env()))
}

fn cmd_blade(args: BladeArgs) -> anyhow::Result<()> {
    let view = BladeView::new(BladeViewOpts::from_env()).with_u_offset(args.u_offset);
    record_view(&args.view, view)
}

fn record_view<V: SceneView>(args: &ViewArgs, view: V) -> anyhow::Result<()> {
    let recipe = args.recipe.load()?;
    let raster = pattern_for_view(&recipe, args.raster_size);

    let mut host = HeadlessHost::new(Viewport::new(args.width, args.height).with_dpr(args.dpr));
    let mut frame_loop = FrameLoop::mount(view, raster, &mut host)?;
    let fps = Fps::new(args.fps, 1)?;

    let mut sink = PngSequenceSink::new(&args.out);
    let result = damascus::record(&mut frame_loop, &mut host, args.frames, fps, &mut sink);
    frame_loop.unmount(&mut host);
    let frames = result?;

    eprintln!(
        "wrote {frames} frames ({:.2}s at {} fps) to {}",
        fps.frames_to_secs(frames),
        fps.as_f64(),
        args.out.display()
    );
    Ok(())
}

/// An empty stack has nothing to show, so the views draw their plain fallback.
fn pattern_for_view(recipe: &Recipe, size: u32) -> Option<PatternRaster> {
    if recipe.layers.is_empty() {
        return None;
    }
    Some(damascus::synthesize_with(
        &recipe.layers,
        &recipe.ops,
        size,
        size,
        &SynthOpts::from_env(),
    ))
}

fn cmd_share(cmd: ShareCommand) -> anyhow::Result<()> {
    match cmd {
        ShareCommand::Encode { recipe, base } => {
            let recipe = Recipe::from_path(&recipe)?;
            let out = match base {
                Some(base) => damascus::share_url(&base, &recipe)?,
                None => damascus::encode_share_token(&recipe)?,
            };
            println!("{out}");
            Ok(())
        }
        ShareCommand::Decode { token, out } => {
            let recipe = if token.contains('?') {
                damascus::recipe_from_url(&token)?
            } else {
                damascus::decode_share_token(&token)?
            };
            match out {
                Some(path) => {
                    recipe.save(&path)?;
                    eprintln!("wrote {}", path.display());
                    Ok(())
                }
                None => write_text(None, &recipe.to_json_pretty()?),
            }
        }
    }
}

fn cmd_materials() -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    for m in Material::ALL {
        let info = damascus::material_info(m);
        writeln!(stdout, "{:<10} {:<28} etch {:.2}", info.id, info.name, info.etch)
            .context("write stdout")?;
    }
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let recipe = args.recipe.load()?;
    let hit = damascus::layer_index_at(recipe.layers.len(), &recipe.ops, args.u, args.v)
        .and_then(|i| Some((i, recipe.layers.get(i)?)));
    match hit {
        Some((i, m)) => println!("layer {i}: {}", m.name()),
        None => println!("empty stack"),
    }
    Ok(())
}

fn write_text(out: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            damascus::encode::ensure_parent_dir(path)?;
            std::fs::write(path, format!("{text}\n"))
                .with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}
