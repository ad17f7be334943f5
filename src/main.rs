//! `lloyd2d` command-line front end.
//!
//! - `run`: cluster a problem file and print progress
//! - `generate`: write a synthetic blob problem

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use lloyd2d::report::ProgressReporter;
use lloyd2d::{synthetic, KMeans, KMeansConfig, NoopObserver, Problem};

#[derive(Parser)]
#[command(name = "lloyd2d")]
#[command(version)]
#[command(about = "K-means clustering of 2-D points with given initial centers")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cluster the points of a problem file
    Run(RunArgs),
    /// Write a synthetic problem file
    Generate(GenerateArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Problem file: point count, center count, then "x y" lines
    input: PathBuf,

    /// TOML file with `epsilon` and `max_iterations`
    #[arg(long)]
    config: Option<PathBuf>,

    /// Per-axis convergence tolerance (overrides the config file)
    #[arg(long)]
    epsilon: Option<f64>,

    /// Iteration cap (overrides the config file)
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Only print the final centers
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Args)]
struct GenerateArgs {
    /// Number of blobs
    #[arg(long, default_value_t = 3)]
    clusters: usize,

    /// Points drawn around each blob mean
    #[arg(long, default_value_t = 20)]
    points_per_cluster: usize,

    /// Standard deviation of each blob
    #[arg(long, default_value_t = 2.0)]
    spread: f64,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(io::stderr)
        .init();

    let outcome = match cli.command {
        Commands::Run(args) => run(args),
        Commands::Generate(args) => generate(args),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &RunArgs) -> Result<KMeansConfig> {
    let mut config = match &args.config {
        Some(path) => KMeansConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => KMeansConfig::default(),
    };
    if let Some(epsilon) = args.epsilon {
        config = config.epsilon(epsilon);
    }
    if let Some(max_iterations) = args.max_iterations {
        config = config.max_iterations(max_iterations);
    }
    Ok(config)
}

fn run(args: RunArgs) -> Result<()> {
    let config = load_config(&args)?;
    let problem = Problem::load(&args.input)
        .with_context(|| format!("reading problem {}", args.input.display()))?;
    info!(
        points = problem.num_points(),
        centers = problem.num_centers(),
        "loaded problem"
    );

    let kmeans = KMeans::new(problem.num_centers()).with_config(config);
    let mut reporter = ProgressReporter::new(io::stdout().lock());
    if !args.quiet {
        reporter.write_initial(&problem.points, &problem.centers);
    }

    let outcome = if args.quiet {
        kmeans.fit_with_observer(&problem.points, &problem.centers, &mut NoopObserver)
    } else {
        kmeans.fit_with_observer(&problem.points, &problem.centers, &mut reporter)
    };
    let result = outcome.context("clustering failed")?;

    reporter.write_final(&result.centers, result.iterations);
    Ok(())
}

fn generate(args: GenerateArgs) -> Result<()> {
    let problem = synthetic::blob_problem(
        args.clusters,
        args.points_per_cluster,
        args.spread,
        args.seed,
    )
    .context("generating problem")?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            problem.write_to(&mut writer)?;
            writer.flush()?;
            info!(path = %path.display(), points = problem.num_points(), "wrote problem");
        }
        None => problem.write_to(io::stdout().lock())?,
    }
    Ok(())
}
