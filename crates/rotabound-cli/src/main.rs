//! Command-line front end: load an image, rotate it onto a bounding canvas,
//! resample it back to the input size and save the result.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info};

use rotabound_core::{
    decode, encode, rotate_and_restore, rotate_bound_with, BoundsRounding, FilterType,
    InterpolationFilter, PipelineOptions, Raster, RotateOptions, DEFAULT_ANGLE,
};

/// Rotate an image without cropping its corners.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path of the image file to process.
    input: PathBuf,

    /// Output path; `.png`, `.jpg` or `.jpeg`. Defaults to `<stem>-rotated.png`.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Rotation angle, degrees. Positive turns clockwise on screen.
    #[arg(short, long, default_value_t = DEFAULT_ANGLE, allow_negative_numbers = true)]
    angle: f64,

    /// Background for uncovered pixels, `R,G,B` or `R,G,B,A`.
    #[arg(short, long, value_parser = parse_fill, default_value = "0,0,0,0")]
    fill: [u8; 4],

    /// Sampling filter used while rotating.
    #[arg(long, value_enum, default_value_t = Interpolation::Bilinear)]
    interpolation: Interpolation,

    /// Filter used to resize the canvas back to the input size.
    #[arg(long, value_enum, default_value_t = ResizeFilter::Area)]
    resize_filter: ResizeFilter,

    /// Rounding of the enlarged canvas.
    #[arg(long, value_enum, default_value_t = Rounding::Ceil)]
    rounding: Rounding,

    /// Save the enlarged canvas instead of resizing back.
    #[arg(long)]
    keep_canvas: bool,

    /// JPEG quality (1-100).
    #[arg(short, long, default_value_t = 90, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Interpolation {
    Nearest,
    Bilinear,
    Lanczos3,
}

impl From<Interpolation> for InterpolationFilter {
    fn from(value: Interpolation) -> Self {
        match value {
            Interpolation::Nearest => InterpolationFilter::Nearest,
            Interpolation::Bilinear => InterpolationFilter::Bilinear,
            Interpolation::Lanczos3 => InterpolationFilter::Lanczos3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ResizeFilter {
    Area,
    Nearest,
    Bilinear,
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(value: ResizeFilter) -> Self {
        match value {
            ResizeFilter::Area => FilterType::Area,
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Bilinear => FilterType::Bilinear,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Rounding {
    Ceil,
    Round,
    Truncate,
}

impl From<Rounding> for BoundsRounding {
    fn from(value: Rounding) -> Self {
        match value {
            Rounding::Ceil => BoundsRounding::Ceil,
            Rounding::Round => BoundsRounding::Round,
            Rounding::Truncate => BoundsRounding::Truncate,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Png,
    Jpeg,
}

impl Args {
    fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            rotate: RotateOptions {
                interpolation: self.interpolation.into(),
                fill: self.fill,
                rounding: self.rounding.into(),
            },
            resize_filter: self.resize_filter.into(),
        }
    }

    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input))
    }
}

/// Parse `R,G,B` or `R,G,B,A`. A missing alpha is opaque.
fn parse_fill(s: &str) -> Result<[u8; 4], String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<u8>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid fill color {:?}: {}", s, e))?;

    match *parts.as_slice() {
        [r, g, b] => Ok([r, g, b, 255]),
        [r, g, b, a] => Ok([r, g, b, a]),
        _ => Err(format!(
            "invalid fill color {:?}: expected R,G,B or R,G,B,A",
            s
        )),
    }
}

/// `<dir>/<stem>-rotated.png` next to the input.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    input.with_file_name(format!("{}-rotated.png", stem))
}

fn output_format(path: &Path) -> Result<OutputFormat> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => Ok(OutputFormat::Png),
        Some("jpg") | Some("jpeg") => Ok(OutputFormat::Jpeg),
        _ => bail!(
            "unsupported output format for {}: use .png, .jpg or .jpeg",
            path.display()
        ),
    }
}

fn process(args: &Args, source: &Raster) -> Result<Raster> {
    let options = args.pipeline_options();
    let result = if args.keep_canvas {
        rotate_bound_with(source, args.angle, &options.rotate)?
    } else {
        rotate_and_restore(source, args.angle, &options)?
    };
    Ok(result)
}

fn run(args: &Args) -> Result<()> {
    let output = args.output_path();
    // Check before doing any work
    let format = output_format(&output)?;

    info!("Processing {}", args.input.display());
    let source = decode::open_image(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    debug!(
        "loaded {}x{} with {} channels",
        source.width, source.height, source.channels
    );

    let start = Instant::now();
    let result = process(args, &source)?;
    info!(
        "Rotated by {} degrees to {}x{} in {:?}",
        args.angle,
        result.width,
        result.height,
        start.elapsed()
    );

    let bytes = match format {
        OutputFormat::Png => encode::encode_png(&result)?,
        OutputFormat::Jpeg => encode::encode_jpeg(&result, args.quality)?,
    };
    std::fs::write(&output, bytes)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!("Saved {}", output.display());

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    run(&args)
}
