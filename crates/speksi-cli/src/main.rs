mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ana-speksi",
    about = "Spec-driven development workflow: derive each spec's phase from its documents and gate advancement on acceptance",
    version,
    propagate_version = true
)]
struct Cli {
    /// ana-speksi directory (default: nearest ana-speksi/ above the current directory)
    #[arg(long, global = true, env = "ANA_SPEKSI_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the ana-speksi directory layout and default config
    Init,

    /// Show the phase, documents and stories of ongoing specs
    Status {
        /// Only show this spec
        #[arg(long, short = 'n')]
        name: Option<String>,
    },

    /// Start a new spec with a draft proposal
    New {
        /// Ticket identifier (e.g. PROJ-123)
        ticket: String,

        /// Short description of the change, used to derive the folder name
        description: Vec<String>,

        /// Explicit short name; derived from the description when omitted
        #[arg(long, short = 'n')]
        name: Option<String>,
    },

    /// Accept the documents gating the spec's current phase
    Accept {
        /// Spec name or suffix (omit when only one spec is ongoing)
        spec: Option<String>,

        /// Report the gate without accepting anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Show what the spec needs next: skill, stories, acceptance gate
    Continue {
        /// Spec name or suffix (omit when only one spec is ongoing)
        spec: Option<String>,
    },

    /// Show the next unchecked task to implement
    Next {
        /// Spec name or suffix (omit when only one spec is ongoing)
        spec: Option<String>,

        /// Story folder (default: first story with unchecked tasks)
        #[arg(long, short = 's')]
        story: Option<String>,
    },

    /// Rewrite task counts in index.md from the tasks.md checkboxes
    SyncCounts {
        /// Spec name or suffix (omit to sync every ongoing spec)
        spec: Option<String>,
    },

    /// Move a finished spec into archive/
    Archive {
        /// Spec name or suffix (omit when only one spec is ongoing)
        spec: Option<String>,

        /// Archive even when the spec has not reached docufy
        #[arg(long)]
        force: bool,
    },

    /// Inspect the ground truth under truth/
    Truth {
        #[command(subcommand)]
        subcommand: cmd::truth::TruthSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root, cli.json),
        Commands::Status { name } => cmd::status::run(&root, name.as_deref(), cli.json),
        Commands::New {
            ticket,
            description,
            name,
        } => cmd::new::run(&root, &ticket, &description.join(" "), name.as_deref(), cli.json),
        Commands::Accept { spec, dry_run } => {
            cmd::accept::run(&root, spec.as_deref(), dry_run, cli.json)
        }
        Commands::Continue { spec } => cmd::continue_cmd::run(&root, spec.as_deref(), cli.json),
        Commands::Next { spec, story } => {
            cmd::next::run(&root, spec.as_deref(), story.as_deref(), cli.json)
        }
        Commands::SyncCounts { spec } => cmd::sync_counts::run(&root, spec.as_deref(), cli.json),
        Commands::Archive { spec, force } => {
            cmd::archive::run(&root, spec.as_deref(), force, cli.json)
        }
        Commands::Truth { subcommand } => cmd::truth::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
