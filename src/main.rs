use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use daub::io;
use raster_core::{dither, filter, paint, quant, resample, RasterImage};

#[derive(Parser)]
#[command(name = "daub")]
#[command(about = "Classic raster transforms: quantize, dither, filter, resample, paint")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Input and output paths shared by every operation.
#[derive(Args)]
struct IoArgs {
    /// Source image file
    input: PathBuf,

    /// Destination image file (format from extension)
    output: PathBuf,
}

/// Random-source control for stochastic operations.
#[derive(Args)]
struct SeedArg {
    /// Fixed seed for reproducible output; omit for a fresh seed per run
    #[arg(long)]
    seed: Option<u64>,
}

impl SeedArg {
    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert to grayscale
    Grayscale(IoArgs),
    /// Uniform quantization to 3/3/2 bits per channel
    QuantUniform(IoArgs),
    /// Populosity quantization to the 256 most frequent colors
    QuantPop(IoArgs),
    /// Fixed mid-point threshold dither
    DitherThreshold(IoArgs),
    /// Random-perturbation threshold dither
    DitherRandom {
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        seed: SeedArg,
    },
    /// Per-channel brightness-preserving threshold dither
    DitherBright(IoArgs),
    /// Ordered clustered-dot dither (4x4 matrix)
    DitherCluster(IoArgs),
    /// Floyd-Steinberg dither to 1-bit grayscale
    DitherFs(IoArgs),
    /// Floyd-Steinberg dither to 3/3/2-bit color
    DitherColor(IoArgs),
    /// 5x5 box blur
    FilterBox(IoArgs),
    /// 5x5 Bartlett blur
    FilterBartlett(IoArgs),
    /// 5x5 Gaussian blur
    FilterGauss(IoArgs),
    /// NxN binomial Gaussian blur
    FilterGaussN {
        #[command(flatten)]
        io: IoArgs,
        /// Kernel size (odd, >= 3)
        #[arg(short = 'n', long)]
        size: usize,
    },
    /// Edge detection (high-pass, mid-gray biased)
    FilterEdge(IoArgs),
    /// Detail enhancement (edge response added back)
    FilterEnhance(IoArgs),
    /// Painterly rendering with layered brush strokes
    NprPaint {
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        seed: SeedArg,
    },
    /// Downsample to half dimensions
    Half(IoArgs),
    /// Upsample to double dimensions
    Double(IoArgs),
    /// Upscale by an arbitrary factor (>= 1.0)
    Scale {
        #[command(flatten)]
        io: IoArgs,
        /// Scale factor
        factor: f32,
    },
    /// Rotate clockwise about the origin
    Rotate {
        #[command(flatten)]
        io: IoArgs,
        /// Angle in degrees
        degrees: f32,
    },
    /// Per-channel absolute difference of two images
    Diff {
        /// Source image file
        input: PathBuf,
        /// Image to compare against (must match dimensions)
        other: PathBuf,
        /// Destination image file
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "daub=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Grayscale(io) => run_in_place(&io, |img| img.to_grayscale()),
        Commands::QuantUniform(io) => run_in_place(&io, quant::quantize_uniform),
        Commands::QuantPop(io) => run_in_place(&io, quant::quantize_populosity),
        Commands::DitherThreshold(io) => run_in_place(&io, dither::threshold),
        Commands::DitherRandom { io, seed } => {
            let mut rng = seed.rng();
            run_in_place(&io, |img| dither::random(img, &mut rng))
        }
        Commands::DitherBright(io) => run_in_place(&io, dither::brightness_preserving),
        Commands::DitherCluster(io) => run_in_place(&io, dither::ordered_cluster),
        Commands::DitherFs(io) => run_in_place(&io, |img| {
            dither::floyd_steinberg(img, dither::DitherMode::Grayscale)
        }),
        Commands::DitherColor(io) => run_in_place(&io, |img| {
            dither::floyd_steinberg(img, dither::DitherMode::Color)
        }),
        Commands::FilterBox(io) => run_filter(&io, filter::Kernel::box_blur()),
        Commands::FilterBartlett(io) => run_filter(&io, filter::Kernel::bartlett()),
        Commands::FilterGauss(io) => run_filter(&io, filter::Kernel::gaussian()),
        Commands::FilterGaussN { io, size } => run_filter(&io, filter::Kernel::gaussian_n(size)?),
        Commands::FilterEdge(io) => run_filter(&io, filter::Kernel::edge_detect()),
        Commands::FilterEnhance(io) => run_filter(&io, filter::Kernel::enhance()),
        Commands::NprPaint { io, seed } => {
            let mut rng = seed.rng();
            run_in_place(&io, |img| paint::painterly(img, &mut rng))
        }
        Commands::Half(io) => run_resample(&io, resample::half_size),
        Commands::Double(io) => run_resample(&io, resample::double_size),
        Commands::Scale { io, factor } => run_resample(&io, |img| resample::resize(img, factor)),
        Commands::Rotate { io, degrees } => {
            run_resample(&io, |img| resample::rotate(img, degrees))
        }
        Commands::Diff {
            input,
            other,
            output,
        } => run_diff(&input, &other, &output),
    }
}

/// Load, apply an in-place transform, save.
fn run_in_place(io: &IoArgs, op: impl FnOnce(&mut RasterImage)) -> anyhow::Result<()> {
    let mut image = io::load(&io.input)?;
    tracing::info!(
        input = %io.input.display(),
        width = image.width(),
        height = image.height(),
        "loaded"
    );
    op(&mut image);
    io::save(image, &io.output)?;
    tracing::info!(output = %io.output.display(), "saved");
    Ok(())
}

fn run_filter(io: &IoArgs, kernel: filter::Kernel) -> anyhow::Result<()> {
    run_in_place(io, |img| filter::convolve(img, &kernel))
}

/// Load, apply a dimension-changing transform, save the new image.
fn run_resample(
    io: &IoArgs,
    op: impl FnOnce(&RasterImage) -> Result<RasterImage, raster_core::RasterError>,
) -> anyhow::Result<()> {
    let image = io::load(&io.input)?;
    let out = op(&image)?;
    tracing::info!(
        width = out.width(),
        height = out.height(),
        "resampled"
    );
    io::save(out, &io.output)?;
    Ok(())
}

fn run_diff(input: &Path, other: &Path, output: &Path) -> anyhow::Result<()> {
    let mut left = io::load(input)?;
    let right = io::load(other)?;
    left.difference(&right)?;
    io::save(left, output)?;
    Ok(())
}
