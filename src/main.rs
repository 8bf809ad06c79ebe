use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result, WrapErr};

use cograph_core::{CographConfig, OutputFormat};
use cograph_graph::centrality::{CentralityOptions, CentralityReport};
use cograph_graph::graph::{ChangeGraph, EdgeKind};
use cograph_mine::collect::collect_changes;
use cograph_mine::mining::MiningOptions;

#[derive(Parser)]
#[command(
    name = "cograph",
    version,
    about = "Method-level co-change centrality for git histories",
    long_about = "cograph mines a git history for methods that change together, builds a\n\
                   co-change graph over (file, function) pairs, and ranks the functions\n\
                   with PageRank, closeness, and common-neighbor centrality.\n\n\
                   Examples:\n  \
                     cograph analyze --path .            Rank the current repository\n  \
                     cograph analyze --since 90          Only mine the last 90 days\n  \
                     cograph analyze --format json       Machine-readable report\n  \
                     cograph init                        Create a .cograph.toml config"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file (default: .cograph.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        global = true,
        default_value = "text",
        long_help = "Output format for command results.\n\n\
                       Formats:\n  \
                         text      Human-readable ranked tables (default)\n  \
                         json      Machine-readable JSON report\n  \
                         markdown  GitHub-flavored Markdown tables"
    )]
    format: OutputFormat,

    /// When to use colors
    #[arg(long, global = true, default_value = "auto")]
    color: ColorChoice,
}

#[derive(Subcommand)]
enum Command {
    /// Mine a repository and rank its functions by co-change centrality
    #[command(long_about = "Mine a repository and rank its functions by co-change centrality.\n\n\
        Walks the commit history, detects which method bodies changed per commit,\n\
        builds a co-change multigraph over (file, function) pairs, and computes\n\
        PageRank, closeness, and common-neighbor centrality for every node.\n\n\
        Examples:\n  cograph analyze --path .\n  cograph analyze --since 180 --limit 10\n  cograph analyze --branch develop --quiet")]
    Analyze {
        /// Repository path (default: current directory)
        #[arg(long, default_value = ".")]
        path: PathBuf,

        /// Time range in days; 0 mines the full history
        #[arg(long)]
        since: Option<u64>,

        /// Branch to walk (default: HEAD)
        #[arg(long)]
        branch: Option<String>,

        /// Skip commits touching more files than this; 0 disables the guard
        #[arg(long)]
        max_files_per_commit: Option<usize>,

        /// Common-neighbor weighting between shared neighbors and distance
        #[arg(long)]
        alpha: Option<f64>,

        /// Maximum rows to show per metric in text/markdown output
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Suppress per-change progress lines on stderr
        #[arg(long, short)]
        quiet: bool,
    },
    /// Create a default .cograph.toml configuration file
    #[command(long_about = "Create a default .cograph.toml configuration file.\n\n\
        Generates a commented-out template with all available options.\n\
        Fails if .cograph.toml already exists.")]
    Init,
    /// Generate shell completion scripts
    #[command(hide = true)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Clone, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    /// Auto-detect based on terminal
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

fn main() -> Result<()> {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    let use_color = match cli.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stdout().is_terminal(),
    };

    match cli.command {
        None => {
            print_welcome(use_color);
            Ok(())
        }
        Some(Command::Analyze {
            ref path,
            since,
            ref branch,
            max_files_per_commit,
            alpha,
            limit,
            quiet,
        }) => {
            // Hint: not a git repository
            if !path.join(".git").exists() && git2::Repository::discover(path).is_err() {
                miette::bail!(miette::miette!(
                    help = "Run cograph from inside a git repository, or specify --path to one",
                    "Not a git repository: {}",
                    path.display()
                ));
            }

            let config = load_config(cli.config.as_deref(), path)?;

            let mut mining = MiningOptions::from(&config.mining);
            if let Some(since) = since {
                mining.since_days = since;
            }
            if let Some(max) = max_files_per_commit {
                mining.max_files_per_commit = max;
            }
            if branch.is_some() {
                mining.branch = branch.clone();
            }

            let mut centrality = CentralityOptions::from(&config.centrality);
            if let Some(alpha) = alpha {
                centrality.alpha = alpha;
            }

            eprintln!("Mining method-level history at {}...", path.display());
            let changes = collect_changes(path, &mining, !quiet).into_diagnostic()?;
            eprintln!("Collected {} unique method changes.", changes.len());

            let graph = ChangeGraph::build(&changes);
            eprintln!(
                "Graph: {} nodes, {} co-commit edges, {} recurrence edges.",
                graph.node_count(),
                graph.count_edges(EdgeKind::CoCommit),
                graph.count_edges(EdgeKind::Recurrence)
            );

            let report = cograph_graph::centrality::compute_centralities(&graph, &centrality);
            print_report(&report, cli.format, limit)
        }
        Some(Command::Init) => run_init(),
        Some(Command::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "cograph", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Resolve configuration: an explicit --config path must exist; otherwise a
/// .cograph.toml next to the repository (or the cwd) is used when present,
/// and defaults apply when it is not.
fn load_config(explicit: Option<&Path>, repo_path: &Path) -> Result<CographConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(cograph_core::CographError::FileNotFound(path.to_path_buf()))
                .into_diagnostic();
        }
        return CographConfig::from_file(path)
            .into_diagnostic()
            .wrap_err(format!("reading {}", path.display()));
    }

    for candidate in [repo_path.join(".cograph.toml"), PathBuf::from(".cograph.toml")] {
        if candidate.exists() {
            return CographConfig::from_file(&candidate)
                .into_diagnostic()
                .wrap_err(format!("reading {}", candidate.display()));
        }
    }

    Ok(CographConfig::default())
}

fn print_report(report: &CentralityReport, format: OutputFormat, limit: usize) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report).into_diagnostic()?;
            println!("{json}");
        }
        OutputFormat::Text => {
            print_ranked_table("PageRank", &report.page_rank, limit, false);
            print_ranked_table("Closeness centrality", &report.closeness, limit, false);
            print_ranked_table(
                "Common-neighbor centrality",
                &report.common_neighbor,
                limit,
                false,
            );
        }
        OutputFormat::Markdown => {
            print_ranked_table("PageRank", &report.page_rank, limit, true);
            print_ranked_table("Closeness centrality", &report.closeness, limit, true);
            print_ranked_table(
                "Common-neighbor centrality",
                &report.common_neighbor,
                limit,
                true,
            );
        }
    }
    Ok(())
}

fn print_ranked_table(
    title: &str,
    scores: &std::collections::HashMap<String, f64>,
    limit: usize,
    markdown: bool,
) {
    let mut rows: Vec<(&str, f64)> = scores.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    rows.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });
    rows.truncate(limit);

    if markdown {
        println!("## {title}\n");
        println!("| function | score |");
        println!("|----------|-------|");
        for (key, score) in &rows {
            println!("| `{key}` | {score:.6} |");
        }
        println!();
    } else {
        println!("{title}:");
        if rows.is_empty() {
            println!("  (no functions found)");
        }
        for (key, score) in &rows {
            println!("  {score:>10.6}  {key}");
        }
        println!();
    }
}

const CONFIG_TEMPLATE: &str = r#"# cograph configuration
# All settings are optional; the values below are the defaults.

[mining]
# Only include commits from the last N days; 0 walks the full history.
# since_days = 0
# Skip commits touching more files than this; 0 disables the guard.
# max_files_per_commit = 50
# Branch to walk (default: HEAD).
# branch = "main"

[centrality]
# Common-neighbor weighting between shared-neighbor count and distance.
# alpha = 0.8
# PageRank damping factor.
# damping = 0.85
# PageRank iteration bound.
# max_iterations = 100
# PageRank convergence tolerance, scaled by node count.
# tolerance = 1e-6
"#;

fn run_init() -> Result<()> {
    let path = Path::new(".cograph.toml");
    if path.exists() {
        miette::bail!(miette::miette!(
            help = "Remove or rename the existing file first",
            ".cograph.toml already exists"
        ));
    }
    std::fs::write(path, CONFIG_TEMPLATE)
        .into_diagnostic()
        .wrap_err("writing .cograph.toml")?;
    println!("Created .cograph.toml");
    Ok(())
}

fn print_welcome(use_color: bool) {
    let version = env!("CARGO_PKG_VERSION");

    if use_color {
        println!("\x1b[1m\x1b[33m\u{26A1}\x1b[0m \x1b[1mcograph\x1b[0m v{version} — which functions change together, and which matter\n");

        println!("Quick start:");
        println!("  \x1b[36mcograph init\x1b[0m                  Create a .cograph.toml config file");
        println!("  \x1b[36mcograph analyze --path .\x1b[0m      Rank functions by co-change centrality\n");

        println!("All commands:");
        println!("  \x1b[32manalyze\x1b[0m   Mine history and rank functions (PageRank, closeness, common-neighbor)");
        println!("  \x1b[32minit\x1b[0m      Create default configuration\n");
    } else {
        println!("cograph v{version} — which functions change together, and which matter\n");

        println!("Quick start:");
        println!("  cograph init                  Create a .cograph.toml config file");
        println!("  cograph analyze --path .      Rank functions by co-change centrality\n");

        println!("All commands:");
        println!("  analyze   Mine history and rank functions (PageRank, closeness, common-neighbor)");
        println!("  init      Create default configuration\n");
    }

    println!("Run 'cograph <command> --help' for details.");
}
