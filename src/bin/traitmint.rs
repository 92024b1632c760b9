use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "traitmint", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate unique combinations and write images plus metadata.
    Mint(MintArgs),
    /// Validate the trait table and layer assets without writing output.
    Check(CheckArgs),
    /// Write the names of all layer files in a directory, one per line.
    ListAssets(ListAssetsArgs),
}

#[derive(Parser, Debug)]
struct MintArgs {
    /// Run configuration JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the number of assets to mint.
    #[arg(long)]
    count: Option<usize>,

    /// Override the RNG seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Write outputs on a rayon pool.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Run configuration JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the number of assets the check compares against.
    #[arg(long)]
    count: Option<usize>,
}

#[derive(Parser, Debug)]
struct ListAssetsArgs {
    /// Directory holding the layer files.
    #[arg(long)]
    assets: PathBuf,

    /// Output text file.
    #[arg(long)]
    out: PathBuf,

    /// File extension to include.
    #[arg(long, default_value = "png")]
    ext: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Mint(args) => cmd_mint(args),
        Command::Check(args) => cmd_check(args),
        Command::ListAssets(args) => cmd_list_assets(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<traitmint::MintConfig> {
    let cfg = match path {
        Some(p) => traitmint::MintConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display()))?,
        None => traitmint::MintConfig::default(),
    };
    Ok(cfg)
}

fn cmd_mint(args: MintArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.config.as_ref())?;
    if let Some(count) = args.count {
        cfg.count = count;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    if args.parallel {
        cfg.parallel = true;
    }
    if args.threads.is_some() {
        cfg.threads = args.threads;
    }

    let threading = traitmint::BatchThreading::from_config(&cfg);
    let stats = traitmint::run_batch(&cfg, &threading)?;

    eprintln!("minted {} assets (seed {})", stats.combinations, stats.seed);
    eprintln!("wrote {}", cfg.image_dir_path().display());
    eprintln!("wrote {}", cfg.metadata_dir_path().display());
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.config.as_ref())?;
    if let Some(count) = args.count {
        cfg.count = count;
    }

    let report = traitmint::check_batch(&cfg)?;
    eprintln!("groups:");
    for (name, n) in &report.groups {
        eprintln!("  {name}: {n} layers");
    }
    eprintln!("layers:            {}", report.layers);
    eprintln!("combination space: {}", report.combination_space);
    eprintln!("requested:         {}", report.requested);

    if !report.fits() {
        anyhow::bail!(
            "requested {} unique assets but only {} combinations exist",
            report.requested,
            report.combination_space
        );
    }
    Ok(())
}

fn cmd_list_assets(args: ListAssetsArgs) -> anyhow::Result<()> {
    let names = traitmint::list_assets(&args.assets, &args.ext)?;
    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    traitmint::write_asset_list(&names, &args.out)?;

    eprintln!("wrote {} ({} files)", args.out.display(), names.len());
    Ok(())
}
