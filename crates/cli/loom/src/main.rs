//! Loom manifest CLI
//!
//! Loads a scope manifest and shows how its variables and rule bindings
//! evaluate in each scope.

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use lm_eval::ScopeId;
use lm_manifest::{LoadedManifest, ROOT_SCOPE};
use std::path::{Path, PathBuf};

mod check;
mod eval;
mod logging;
mod lookup;
mod rules;

#[derive(Parser)]
#[command(name = "loom")]
#[command(about = "Inspect and evaluate loom scope manifests", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the scope manifest
    #[arg(short, long, global = true, default_value = "loom.toml")]
    manifest: PathBuf,

    /// More log output (-v debug, -vv trace); overrides LOOM_LOG
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// When to color the output
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the manifest and report problems
    Check,

    /// List the rules registered in a scope
    Rules {
        /// Scope whose rule table to show
        #[arg(long, default_value = ROOT_SCOPE)]
        scope: String,
    },

    /// Print the value of a variable as seen from a scope
    Lookup {
        /// Scope to look from
        scope: String,

        /// Variable name
        var: String,
    },

    /// Evaluate rule bindings for a scope
    Eval {
        /// Scope to evaluate in
        scope: String,

        /// Binding keys to evaluate (default: every reserved key)
        #[arg(long = "key")]
        keys: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.color {
        ColorChoice::Auto => {}
        ColorChoice::Always => colored::control::set_override(true),
        ColorChoice::Never => colored::control::set_override(false),
    }

    let loaded = load(&cli.manifest)?;

    match cli.command {
        Commands::Check => check::check(&cli.manifest, &loaded),
        Commands::Rules { scope } => rules::rules(&loaded, &scope),
        Commands::Lookup { scope, var } => lookup::lookup(&loaded, &scope, &var),
        Commands::Eval { scope, keys } => eval::eval(&loaded, &scope, &keys),
    }
}

/// Load the manifest, rendering manifest errors as miette diagnostics
fn load(path: &Path) -> Result<LoadedManifest> {
    tracing::debug!(path = %path.display(), "loading manifest");
    lm_manifest::load_file(path).map_err(|err| {
        let report = miette::Report::new(err);
        anyhow::anyhow!("{report:?}")
    })
}

/// Resolve a scope name given on the command line
fn find_scope(loaded: &LoadedManifest, name: &str) -> Result<ScopeId> {
    loaded.scope(name).ok_or_else(|| {
        let known: Vec<_> = loaded.scope_names().collect();
        anyhow::anyhow!("unknown scope `{name}` (known scopes: {})", known.join(", "))
    })
}
