use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use framefit::{
    FitPolicy, FusionMaskSpec, FusionParams, InterpolationMethod, LimitOptions, Size,
    SplitDirection, SplitOptions,
};

#[derive(Parser, Debug)]
#[command(name = "framefit", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fit a batch of images to one size.
    Fit(FitArgs),
    /// Fuse two batches through a split or polygon mask.
    Fuse(FuseArgs),
    /// Render a fusion mask as a PNG.
    Mask(MaskArgs),
    /// Keep an image within a side-length window.
    Limit(LimitArgs),
    /// Cut an image into strips and keep one.
    Split(SplitArgs),
}

#[derive(Parser, Debug)]
struct FitArgs {
    /// Input images; together they form one batch.
    #[arg(long = "in", required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Target width.
    #[arg(long)]
    width: i64,

    /// Target height.
    #[arg(long)]
    height: i64,

    /// stretch, adaptive, crop or pad.
    #[arg(long, default_value_t = FitPolicy::Adaptive)]
    policy: FitPolicy,

    /// nearest-exact, bilinear, area, bicubic or lanczos.
    #[arg(long, default_value_t = InterpolationMethod::Bilinear)]
    method: InterpolationMethod,

    /// Treat inputs as masks (luma).
    #[arg(long, default_value_t = false)]
    mask: bool,
}

#[derive(Parser, Debug)]
struct FuseArgs {
    /// Images of clip A.
    #[arg(long, required = true, num_args = 1..)]
    a: Vec<PathBuf>,

    /// Images of clip B.
    #[arg(long, required = true, num_args = 1..)]
    b: Vec<PathBuf>,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Fusion parameters JSON.
    #[arg(long)]
    params: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct MaskArgs {
    /// Mask width.
    #[arg(long)]
    width: i64,

    /// Mask height.
    #[arg(long)]
    height: i64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Fusion parameters JSON; only its `mask` section is used.
    #[arg(long)]
    params: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct LimitArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,

    /// Optional mask matching the input image.
    #[arg(long)]
    mask: Option<PathBuf>,

    /// Where to write the resized mask.
    #[arg(long)]
    mask_out: Option<PathBuf>,

    /// Longest allowed side.
    #[arg(long, default_value_t = 2048)]
    max: u32,

    /// Sides below this are scaled up.
    #[arg(long, default_value_t = 256)]
    min: u32,

    /// Kernel used for the image.
    #[arg(long, default_value_t = InterpolationMethod::Bilinear)]
    method: InterpolationMethod,
}

#[derive(Parser, Debug)]
struct SplitArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,

    /// horizontal (columns) or vertical (rows).
    #[arg(long, default_value = "horizontal")]
    direction: SplitDirection,

    /// Number of strips.
    #[arg(long, default_value_t = 2)]
    parts: usize,

    /// 1-based strip to keep.
    #[arg(long, default_value_t = 1)]
    position: usize,

    /// Strip weights, e.g. `1:2`.
    #[arg(long, default_value = "1:1")]
    ratios: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Fit(args) => cmd_fit(args),
        Command::Fuse(args) => cmd_fuse(args),
        Command::Mask(args) => cmd_mask(args),
        Command::Limit(args) => cmd_limit(args),
        Command::Split(args) => cmd_split(args),
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
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn cmd_fit(args: FitArgs) -> anyhow::Result<()> {
    let batch = if args.mask {
        framefit::load_masks(&args.inputs)?
    } else {
        framefit::load_images(&args.inputs, true)?
    };
    let target = Size::from_signed(args.height, args.width)?;
    let out = framefit::fit(&batch, target, args.policy, args.method)?;
    let written = framefit::save_frames(&out, &args.out_dir)?;
    eprintln!(
        "wrote {} frame(s) to {}",
        written.len(),
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_fuse(args: FuseArgs) -> anyhow::Result<()> {
    let params = load_params(args.params.as_ref())?;
    let a = framefit::load_images(&args.a, false)?;
    let b = framefit::load_images(&args.b, false)?;
    let out = framefit::fuse(&a, &b, &params)?;
    let written = framefit::save_frames(&out, &args.out_dir)?;
    eprintln!(
        "wrote {} frame(s) to {}",
        written.len(),
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_mask(args: MaskArgs) -> anyhow::Result<()> {
    let spec: FusionMaskSpec = load_params(args.params.as_ref())?.mask;
    let size = Size::from_signed(args.height, args.width)?;
    let mask = framefit::build_mask(size, &spec)?;
    framefit::save_frame(&mask, 0, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_limit(args: LimitArgs) -> anyhow::Result<()> {
    let image = framefit::load_images(std::slice::from_ref(&args.in_path), true)?;
    let mask = args
        .mask
        .as_ref()
        .map(|p| framefit::load_masks(std::slice::from_ref(p)))
        .transpose()?;
    let opts = LimitOptions {
        max_side: args.max,
        min_side: args.min,
        method: args.method,
    };
    let outcome = framefit::limit_size(&image, mask.as_ref(), &opts)?;
    framefit::save_frame(&outcome.image, 0, &args.out)?;
    if let Some(mask_out) = &args.mask_out {
        framefit::save_frame(&outcome.mask, 0, mask_out)?;
    }
    eprintln!(
        "wrote {} ({} -> {})",
        args.out.display(),
        outcome.original,
        outcome.resized
    );
    Ok(())
}

fn cmd_split(args: SplitArgs) -> anyhow::Result<()> {
    let image = framefit::load_images(std::slice::from_ref(&args.in_path), true)?;
    let opts = SplitOptions {
        direction: args.direction,
        parts: args.parts,
        position: args.position,
        ratios: framefit::parse_ratios(&args.ratios, args.parts),
    };
    let strip = framefit::split(&image, &opts)?;
    framefit::save_frame(&strip, 0, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn load_params(path: Option<&PathBuf>) -> anyhow::Result<FusionParams> {
    match path {
        Some(p) => FusionParams::from_path(p)
            .with_context(|| format!("load fusion params '{}'", p.display())),
        None => Ok(FusionParams::default()),
    }
}
