//! Personal Styles - packaged matplotlib style sheets
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pstyle_app::config::{default_config_path, init_config, load_settings, OutputFormat};
use pstyle_app::CommandContext;
use pstyle_core::prelude::*;
use pstyle_core::{build_registry, locate_package_root, logging};

/// Personal Styles - resolve packaged matplotlib styles to file paths
#[derive(Parser, Debug)]
#[command(name = "pstyle", version)]
#[command(about = "Resolve packaged matplotlib styles to file paths", long_about = None)]
struct Args {
    /// Path to config.toml (default: <config_dir>/personal-styles/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Package root containing styles/ (overrides the config file)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(flatten)]
    Query(Query),

    /// Write a default config file
    InitConfig,
}

/// Commands answered from the style registry
#[derive(Subcommand, Debug)]
enum Query {
    /// List theme collections
    Collections,

    /// List styles and their paths
    List {
        /// Only list this collection
        collection: Option<String>,
    },

    /// Print the path of one style
    Path {
        /// Style name, optionally qualified as <collection>/<style>
        style: String,

        /// Collection to look in (default: configured default collection)
        #[arg(short, long)]
        collection: Option<String>,
    },

    /// Print the settings of one style
    Show {
        /// Style name, optionally qualified as <collection>/<style>
        style: String,

        #[arg(short, long)]
        collection: Option<String>,
    },

    /// Check that every packaged style exists and parses
    Verify,
}

fn main() {
    let args = Args::parse();

    match run(args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            error!("{}", err);
            eprintln!("❌ {err}");
            if err.is_fatal() {
                eprintln!("   The installed style package looks broken; try reinstalling.");
                eprintln!("   Logs: {}", logging::log_directory().display());
            }
            std::process::exit(1);
        }
    }
}

/// Returns Ok(false) when the command ran but reported problems
fn run(args: Args) -> Result<bool> {
    color_eyre::install().map_err(|e| Error::config(e.to_string()))?;
    logging::init()?;

    match args.command {
        Command::InitConfig => write_default_config(args.config),
        Command::Query(query) => run_query(query, args.config, args.data_dir, args.json),
    }
}

fn run_query(
    query: Query,
    config: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    json: bool,
) -> Result<bool> {
    let mut settings = load_settings(config.as_deref());
    if json {
        settings.output.format = OutputFormat::Json;
    }

    let data_dir = data_dir.or_else(|| settings.registry.data_dir());
    let root = locate_package_root(data_dir.as_deref())?;
    info!("Package root: {:?} ({:?})", root.path, root.source);

    let registry = build_registry(&root.path)?;
    let ctx = CommandContext::new(&registry, &settings);

    let output = match query {
        Query::Collections => ctx.collections()?,
        Query::List { collection } => ctx.list(collection.as_deref())?,
        Query::Path { style, collection } => ctx.path(&style, collection.as_deref())?,
        Query::Show { style, collection } => ctx.show(&style, collection.as_deref())?,
        Query::Verify => {
            let outcome = ctx.verify()?;
            print_output(&outcome.output);
            return Ok(outcome.ok);
        }
    };

    print_output(&output);
    Ok(true)
}

fn write_default_config(explicit: Option<PathBuf>) -> Result<bool> {
    let path = explicit
        .or_else(default_config_path)
        .ok_or_else(|| Error::config("No config directory on this platform; pass --config"))?;

    if init_config(&path)? {
        println!("Created {}", path.display());
    } else {
        println!("Config already exists: {}", path.display());
    }
    Ok(true)
}

fn print_output(output: &str) {
    if output.ends_with('\n') {
        print!("{output}");
    } else {
        println!("{output}");
    }
}
