#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod command;

use command::extract::ExtractArgs;

#[derive(Parser)]
#[command(name = "gleanrs")]
#[command(about = "Pattern-driven entity and event extraction", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract entities and events from text
    Extract(ExtractArgs),
    /// List configured rule domains
    Domains {
        /// Rule catalog file to use instead of the embedded one
        #[arg(short, long)]
        rules: Option<PathBuf>,
    },
    /// List entity types defined for a domain
    Types {
        /// Domain to inspect
        #[arg(short, long, default_value = "healthcare")]
        domain: String,

        /// Rule catalog file to use instead of the embedded one
        #[arg(short, long)]
        rules: Option<PathBuf>,
    },
    /// Print a bundled sample text
    Sample {
        /// Domain of the sample corpus
        #[arg(short, long, default_value = "healthcare")]
        domain: String,

        /// Which sample to print
        #[arg(short, long, default_value_t = 0)]
        index: usize,
    },
    /// Write the default rule catalog to a file for customization
    Init {
        /// Destination path
        #[arg(short, long, default_value = "gleanrs_rules.json")]
        path: PathBuf,
    },
    /// Show version
    Version,
}

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract(args) => command::extract::run(&args)?,
        Commands::Domains { rules } => command::domains::run(rules.as_deref())?,
        Commands::Types { domain, rules } => command::types::run(&domain, rules.as_deref())?,
        Commands::Sample { domain, index } => command::sample::run(&domain, index)?,
        Commands::Init { path } => command::init::run(&path)?,
        Commands::Version => println!("gleanrs {}", env!("CARGO_PKG_VERSION")),
    }

    Ok(())
}
