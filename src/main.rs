use anyhow::Result;
use clap::Parser;
use colorkey::{
    apply_with,
    color::{Color, RemovalSet, DEFAULT_TOLERANCE},
    error::{Error, ErrorKind},
    filter::ColorKey,
    log, logger,
};
use std::{path::PathBuf, process::ExitCode};

/// Make pixels close to the given colors fully transparent and save as PNG
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// The image to read (PNG, JPEG, ...)
    input: PathBuf,

    /// Where to write the PNG result
    output: PathBuf,

    /// A color to remove, as <R,G,B> or <rrggbb>. Repeat for more colors
    #[arg(short = 'c', long = "color", value_name = "COLOR", required = true)]
    colors: Vec<Color>,

    /// Maximum RGB distance at which a pixel counts as a match
    #[arg(short = 't', long, value_name = "DIST", default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// The amount of threads used for the pixel pass
    #[arg(short = 'j', long, value_name = "NUM", default_value_t = 1)]
    threads: usize,

    /// Print decoding and filter details
    #[arg(short = 'v', long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors
    #[arg(short = 'q', long)]
    quiet: bool,
}

fn build_filter(args: &Args) -> Result<ColorKey> {
    let removal = RemovalSet::new(args.colors.clone(), args.tolerance)?;
    Ok(ColorKey::new(removal).parallel(args.threads > 1))
}

fn run(args: Args) -> Result<()> {
    let filter = build_filter(&args)?;

    let stats = if filter.is_parallel() {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build()?;
        pool.install(|| apply_with(&args.input, &args.output, &filter))?
    } else {
        apply_with(&args.input, &args.output, &filter)?
    };

    log!(
        "colorkey";
        "removed {} of {} pixels, saved {}",
        stats.removed,
        stats.total,
        args.output.display()
    );
    Ok(())
}

/// Distinct exit status per failure so scripts can tell them apart.
fn exit_code(e: &anyhow::Error) -> ExitCode {
    match e.downcast_ref::<Error>().map(Error::kind) {
        Some(ErrorKind::NotFound) => ExitCode::from(2),
        Some(ErrorKind::DecodeFailure) => ExitCode::from(3),
        Some(ErrorKind::EncodeFailure) => ExitCode::from(4),
        Some(ErrorKind::InvalidInput) => ExitCode::from(5),
        None => ExitCode::FAILURE,
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    logger::set_verbose(args.verbose);
    logger::set_quiet(args.quiet);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log!("error"; "{e:#}");
            exit_code(&e)
        }
    }
}
