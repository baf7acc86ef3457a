use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "shader-filter", version)]
struct Cli {
    /// Log filter, e.g. `warn`, `debug` or `shader_filter=trace`.
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Node options JSON. Missing fields take their defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the issues report. Exits non-zero when the shader has issues.
    Check(InputArgs),
    /// Print parsed metadata, declarations and issues as JSON.
    Params(InputArgs),
    /// Print the evaluation job for one frame as JSON.
    Job(JobArgs),
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Input shader source.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct JobArgs {
    /// Input shader source.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output width in pixels.
    #[arg(long)]
    width: f64,

    /// Output height in pixels.
    #[arg(long)]
    height: f64,

    /// Frame index (0-based).
    #[arg(long, default_value_t = 0)]
    frame: u64,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;
    let opts = load_opts(cli.config.as_deref())?;
    match cli.cmd {
        Command::Check(args) => cmd_check(args, opts),
        Command::Params(args) => cmd_params(args, opts),
        Command::Job(args) => cmd_job(args, opts),
    }
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn load_opts(path: Option<&Path>) -> anyhow::Result<shader_filter::ShaderNodeOpts> {
    let Some(path) = path else {
        return Ok(shader_filter::ShaderNodeOpts::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    shader_filter::ShaderNodeOpts::from_json_str(&json)
        .with_context(|| format!("load config '{}'", path.display()))
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read shader '{}'", path.display()))
}

fn load_node(
    path: &Path,
    opts: shader_filter::ShaderNodeOpts,
) -> anyhow::Result<shader_filter::ShaderFilterNode> {
    let source = read_source(path)?;
    let mut node = shader_filter::ShaderFilterNode::with_store(opts)?;
    node.set_source(source);
    Ok(node)
}

fn cmd_check(args: InputArgs, opts: shader_filter::ShaderNodeOpts) -> anyhow::Result<ExitCode> {
    let node = load_node(&args.in_path, opts)?;
    println!("{}", node.issues_report());
    Ok(if node.errors().is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_params(args: InputArgs, opts: shader_filter::ShaderNodeOpts) -> anyhow::Result<ExitCode> {
    let source = read_source(&args.in_path)?;
    let out = shader_filter::parse_directives(&source, &opts.parser);
    let json = serde_json::to_string_pretty(&out).context("serialize parse output")?;
    println!("{json}");
    Ok(ExitCode::SUCCESS)
}

fn cmd_job(args: JobArgs, opts: shader_filter::ShaderNodeOpts) -> anyhow::Result<ExitCode> {
    let resolution = shader_filter::Resolution::new(args.width, args.height);
    if resolution.is_degenerate() {
        anyhow::bail!(
            "resolution must be positive, got {}x{}",
            args.width,
            args.height
        );
    }
    let node = load_node(&args.in_path, opts)?;
    let job = node
        .job(shader_filter::FrameIndex(args.frame), resolution)
        .with_context(|| format!("shader '{}' is empty", args.in_path.display()))?;
    let fp = job.fingerprint();
    tracing::debug!(hi = fp.hi, lo = fp.lo, "job fingerprint");
    println!("{}", job.to_json()?);
    Ok(ExitCode::SUCCESS)
}
