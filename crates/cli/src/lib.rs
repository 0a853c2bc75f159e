use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use context_map::{MapConfig, MapContext, MapRequest, StrategyKind, TiktokenCounter};
use std::io;
use std::path::{Path, PathBuf};

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "context-map")]
#[command(about = "Syntax-aware map of a git repository for LLM prompts", long_about = None)]
#[command(version)]
struct Cli {
    /// Map strategy: fullmap or repomap
    strategy: StrategyKind,

    /// Repository root (working tree of a git repository)
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Only map files with at most this many path segments
    #[arg(long)]
    depth: Option<usize>,

    /// Only map files under this directory, relative to the root
    #[arg(long)]
    dir: Option<String>,

    /// Relative path to favour in the ranking (repomap, repeatable)
    #[arg(long = "mentioned-file", value_name = "REL_PATH")]
    mentioned_files: Vec<String>,

    /// Identifier whose references weigh more (repomap, repeatable)
    #[arg(long = "mentioned-ident", value_name = "NAME")]
    mentioned_idents: Vec<String>,

    /// Append the token count of the map
    #[arg(long)]
    token_count: bool,

    /// Model whose tokenizer counts tokens (overrides the config file)
    #[arg(long)]
    model: Option<String>,

    /// Configuration file (default: <root>/.context-map.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the selected tags as JSON instead of the map
    #[arg(long)]
    tags: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long)]
    quiet: bool,
}

pub fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let root = cli
        .root
        .canonicalize()
        .with_context(|| format!("Invalid repository root {}", cli.root.display()))?;
    let config = load_config(&root, cli.config.as_deref(), cli.model)?;
    let ctx = MapContext::open(&root, config)?;

    if cli.strategy == StrategyKind::FullMap
        && !(cli.mentioned_files.is_empty() && cli.mentioned_idents.is_empty())
    {
        log::warn!("Mentioned files and identifiers only affect the repomap strategy");
    }

    let mut request = MapRequest::new();
    request.depth = cli.depth;
    request.dir = cli.dir;
    request.mentioned_files.extend(cli.mentioned_files);
    request.mentioned_idents.extend(cli.mentioned_idents);

    let selector = cli.strategy.selector();
    if cli.tags {
        let tags = selector.select_tags(&ctx, &request)?;
        return print_stdout(&serde_json::to_string_pretty(&tags)?);
    }

    let output = if cli.token_count {
        ctx.map_with_token_count(selector.as_ref(), &request, &TiktokenCounter)?
    } else {
        ctx.map(selector.as_ref(), &request)?
    };
    print_stdout(&output)
}

fn load_config(root: &Path, path: Option<&Path>, model: Option<String>) -> Result<MapConfig> {
    let mut config = match path {
        Some(path) => MapConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => MapConfig::for_root(root)?,
    };
    if let Some(model) = model {
        config.model = model;
    }
    Ok(config)
}
