#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use kinship_core::FamilyTree;
use kinship_core::config::{EffectiveConfig, build_tree, resolve_config};
use output::{CliError, OutputMode, render_error};
use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "kin: family tree and relationship queries",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format; overrides --json, FORMAT and user config.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Project directory holding kinship.toml (default: current directory).
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Pick the output mode: explicit `--format` first, then the resolved config.
    fn output_mode(&self, resolved: &str) -> OutputMode {
        self.format
            .unwrap_or_else(|| OutputMode::from_resolved(resolved))
    }

    /// Output mode used before config has been resolved.
    fn fallback_mode(&self) -> OutputMode {
        self.format.unwrap_or(if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        })
    }

    fn project_root(&self) -> PathBuf {
        self.root.clone().unwrap_or_else(|| {
            env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        })
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Read",
        about = "Resolve a relationship for one person",
        long_about = "List the people related to NAME by RELATIONSHIP, ordered by when they joined the tree.",
        after_help = "EXAMPLES:\n    # Maternal aunts of Remus\n    kin query Remus MATERNAL_AUNT\n\n    # Kinds are case-insensitive and accept dashes\n    kin query Darcy sister-in-law\n\n    # Emit machine-readable output\n    kin query \"Queen Margret\" SON --json"
    )]
    Query(cmd::query::QueryArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show one person",
        long_about = "Show a person's gender, mother, father, spouse and children.",
        after_help = "EXAMPLES:\n    # Show a person\n    kin show Victoire\n\n    # Emit machine-readable output\n    kin show \"King Arthur\" --json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Read",
        about = "List everyone in the tree",
        long_about = "List every person in creation order.",
        after_help = "EXAMPLES:\n    # List everyone\n    kin list\n\n    # Only women\n    kin list --gender female\n\n    # Emit machine-readable output\n    kin list --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Read",
        about = "Export the tree as a graph",
        long_about = "Export mother and spouse edges as Graphviz DOT, or as node/edge lists with --json.",
        after_help = "EXAMPLES:\n    # Whole tree as DOT\n    kin graph | dot -Tsvg > family.svg\n\n    # One line of descent\n    kin graph Bill"
    )]
    Graph(cmd::graph::GraphArgs),

    #[command(
        next_help_heading = "Scripts",
        about = "Apply command scripts",
        long_about = "Apply ADD_PERSON, ADD_SPOUSE, ADD_CHILD and GET_RELATIONSHIP scripts on top of the configured tree.",
        after_help = "EXAMPLES:\n    # Run one script\n    kin run family.kin\n\n    # Start from an empty tree\n    kin --root ./empty-project run family.kin"
    )]
    Run(cmd::run::RunArgs),

    #[command(
        next_help_heading = "Scripts",
        about = "Walk through the sample family",
        long_about = "Query Darcy's sisters-in-law, add Karlo under Victoire, then query Karlo's maternal aunts.",
        after_help = "EXAMPLES:\n    # Run the walkthrough\n    kin demo"
    )]
    Demo,

    #[command(
        next_help_heading = "Reference",
        about = "List supported relationship kinds",
        after_help = "EXAMPLES:\n    # Show kinds and what they mean\n    kin relationships"
    )]
    Relationships,

    #[command(
        next_help_heading = "Reference",
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    kin completions bash\n\n    # Generate zsh completions\n    kin completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("KINSHIP_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "kinship=debug,info"
        } else {
            "kinship=info,warn"
        })
    });

    let format = env::var("KINSHIP_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn load_tree(root: &Path, config: &EffectiveConfig) -> anyhow::Result<FamilyTree> {
    build_tree(root, &config.project.tree)
}

fn dispatch(
    command: Commands,
    root: &Path,
    config: &EffectiveConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    match command {
        Commands::Query(args) => cmd::query::run_query(&args, &load_tree(root, config)?, output),
        Commands::Show(args) => cmd::show::run_show(&args, &load_tree(root, config)?, output),
        Commands::List(args) => cmd::list::run_list(&args, &load_tree(root, config)?, output),
        Commands::Graph(args) => cmd::graph::run_graph(&args, &load_tree(root, config)?, output),
        Commands::Run(args) => {
            let mut tree = load_tree(root, config)?;
            cmd::run::run_scripts(&args, &mut tree, output)
        }
        Commands::Demo => {
            let mut tree = load_tree(root, config)?;
            cmd::demo::run_demo(&mut tree, output)
        }
        Commands::Relationships => cmd::relationships::run_relationships(output),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}

fn fail(output: OutputMode, err: &anyhow::Error) -> ExitCode {
    debug!(error = %format!("{err:#}"), "command failed");
    if render_error(output, &CliError::from_anyhow(err)).is_err() {
        eprintln!("error: {err:#}");
    }
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let root = cli.project_root();
    let config = match resolve_config(&root, cli.json) {
        Ok(config) => config,
        Err(err) => return fail(cli.fallback_mode(), &err),
    };
    let output = cli.output_mode(&config.resolved_output);
    debug!(root = %root.display(), ?output, "config resolved");

    match dispatch(cli.command, &root, &config, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fail(output, &err),
    }
}
