mod status;
mod sync;

use clap::{Args, Parser, Subcommand};
use mgcbsync_core::SyncConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mgcbsync",
    version,
    about = "Register new content files in a MonoGame .mgcb build file",
    long_about = "mgcbsync scans a MonoGame content directory for textures and sound effects, \
                  compares them against the #begin entries already present in the .mgcb file, \
                  and appends a build stanza for every file that is not registered yet."
)]
pub struct Cli {
    #[command(flatten)]
    pub paths: PathArgs,

    /// Mirror log output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args)]
pub struct PathArgs {
    /// Content directory to scan. Defaults to ./content
    #[arg(long, global = true, env = "MGCBSYNC_CONTENT_DIR", value_name = "DIR")]
    pub content_dir: Option<PathBuf>,

    /// MGCB file to update. Defaults to content.mgcb inside the content directory
    #[arg(long, global = true, env = "MGCBSYNC_MGCB", value_name = "FILE")]
    pub mgcb: Option<PathBuf>,

    /// JSON file with paths and asset groups
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl PathArgs {
    /// Config file first, then command line overrides.
    pub fn resolve(&self) -> mgcbsync_core::Result<SyncConfig> {
        let mut config = match &self.config {
            Some(path) => SyncConfig::load(path)?,
            None => SyncConfig::default(),
        };
        if let Some(dir) = &self.content_dir {
            config.content_dir = dir.clone();
        }
        if let Some(mgcb) = &self.mgcb {
            config.mgcb_file = Some(mgcb.clone());
        }
        Ok(config)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Append stanzas for unregistered assets (the default command)
    #[command(
        long_about = "Reads the registered entries, scans the content directory and appends one \
                            stanza per new asset, sorted by path. Existing content is never rewritten."
    )]
    Sync {
        /// Report what would be added without writing
        #[arg(long)]
        dry_run: bool,
    },
    /// Show registered, discovered and pending assets
    Status,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Sync { dry_run: false });
    let component = match &command {
        Commands::Sync { .. } => "sync",
        Commands::Status => "status",
    };
    let _guard = mgcbsync_core::logging::init_logging(component, cli.verbose);

    let config = cli.paths.resolve()?;

    match command {
        Commands::Sync { dry_run } => sync::run(config, dry_run),
        Commands::Status => status::run(config),
    }
}
