//! ptt-harvest main entry point
//!
//! This is the command-line interface for collecting today's popular posts
//! from a PTT board.

use anyhow::Context;
use clap::Parser;
use ptt_harvest::board::BoardRegistry;
use ptt_harvest::config::{load_config_with_hash, Config};
use ptt_harvest::crawler::{today_target_date, CrawlSettings, Harvester, HttpFetcher, PageFetcher};
use ptt_harvest::output::{render, write_output, OutputFormat};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// ptt-harvest: today's popular posts from a PTT board
///
/// Walks the board index from the newest page backwards and prints the posts
/// dated today that reached the minimum push count.
#[derive(Parser, Debug)]
#[command(name = "ptt-harvest")]
#[command(version)]
#[command(about = "Collect today's popular posts from a PTT board", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Board display name (e.g. 八卦, 表特)
    #[arg(short, long)]
    board: Option<String>,

    /// Target date as shown on the index, "M/DD" (default: today)
    #[arg(short, long)]
    date: Option<String>,

    /// Minimum push count
    #[arg(long, allow_hyphen_values = true)]
    min_push: Option<i32>,

    /// Maximum number of posts
    #[arg(long)]
    max: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write results to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Print the raw markup of the board's newest index page and exit
    #[arg(long, conflicts_with = "list_boards")]
    dump_index: bool,

    /// List known boards and exit
    #[arg(long, conflicts_with = "dump_index")]
    list_boards: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    let registry = BoardRegistry::new(&config.site.domain, &config.boards);

    if cli.list_boards {
        handle_list_boards(&registry);
        return Ok(());
    }

    let board_name = cli.board.clone().unwrap_or(config.crawler.board.clone());
    let board = registry.resolve(&board_name)?;
    let fetcher = HttpFetcher::new(board.domain())?;

    if cli.dump_index {
        let html = fetcher.fetch(&board.index_url()).await?;
        emit(&html, cli.output.as_ref())?;
        return Ok(());
    }

    let target_date = match cli.date.clone() {
        Some(date) => date,
        None => today_target_date(config.crawler.utc_offset_hours)?,
    };

    let max_articles = cli.max.unwrap_or(config.crawler.max_articles);
    if max_articles == 0 {
        anyhow::bail!("--max must be at least 1");
    }

    let settings = CrawlSettings {
        board,
        target_date,
        min_push_count: cli.min_push.unwrap_or(config.crawler.min_push_count),
        max_articles,
    };

    let harvester = Harvester::new(fetcher, settings);
    let (articles, summary) = match harvester.run_with_summary().await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            return Err(e.into());
        }
    };

    let rendered = render(&articles, cli.format, harvester.settings(), &summary)?;
    emit(&rendered, cli.output.as_ref())?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout only carries results.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ptt_harvest=info,warn"),
            1 => EnvFilter::new("ptt_harvest=debug,info"),
            2 => EnvFilter::new("ptt_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles --list-boards
fn handle_list_boards(registry: &BoardRegistry) {
    println!("Boards on {} ({}):", registry.domain(), registry.len());
    for (name, path) in registry.iter() {
        println!("  {}  {}/bbs/{}/index.html", name, registry.domain(), path);
    }
}

fn emit(content: &str, output: Option<&PathBuf>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            write_output(content, path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("Results written to: {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}
