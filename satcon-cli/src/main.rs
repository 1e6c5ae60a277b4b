//! Satcon CLI - command-line access to the Satellite Config service.
//!
//! # Commands
//!
//! - `satcon channel` - Manage configuration channels
//! - `satcon cluster` - Register and inspect clusters
//! - `satcon group` - Manage cluster groups
//! - `satcon resource` - Query resources reported by clusters
//! - `satcon subscription` - Subscribe groups to channel versions
//! - `satcon version` - Upload and inspect channel versions
//! - `satcon user` - Sign in and show the current user
//! - `satcon completions` - Generate shell completions

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::Colorize;
use std::io;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

use commands::channel::{self, ChannelArgs};
use commands::cluster::{self, ClusterArgs};
use commands::group::{self, GroupArgs};
use commands::resource::{self, ResourceArgs};
use commands::subscription::{self, SubscriptionArgs};
use commands::user::{self, UserArgs};
use commands::version::{self, VersionArgs};
use commands::{ConnectionArgs, Context};
use error::CliResult;

/// Satcon CLI - Satellite Config client
#[derive(Parser)]
#[command(name = "satcon")]
#[command(author = "Pegasus Heavy Industries LLC")]
#[command(version)]
#[command(about = "Manage Satellite Config channels, clusters, groups and subscriptions")]
#[command(long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = format!(
    "{}\n  {} satcon channel -a list -o my-org\n  {} satcon cluster -a register -n edge-1 -o my-org\n  {} satcon version -a add --channel <uuid> -n v2 -f app.yaml -o my-org",
    "Examples:".bright_cyan().bold(),
    "$".dimmed(),
    "$".dimmed(),
    "$".dimmed(),
))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    connection: ConnectionArgs,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage configuration channels
    #[command(alias = "channels")]
    Channel(ChannelArgs),

    /// Register and inspect clusters
    #[command(alias = "clusters")]
    Cluster(ClusterArgs),

    /// Manage cluster groups
    #[command(alias = "groups")]
    Group(GroupArgs),

    /// Query resources reported by clusters
    #[command(alias = "resources")]
    Resource(ResourceArgs),

    /// Subscribe groups to channel versions
    #[command(alias = "subscriptions")]
    Subscription(SubscriptionArgs),

    /// Upload and inspect channel versions
    #[command(alias = "versions")]
    Version(VersionArgs),

    /// Sign in and show the current user
    User(UserArgs),

    /// Generate shell completions
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn dispatch(command: Commands, connection: ConnectionArgs) -> CliResult<()> {
    if let Commands::Completions { shell } = command {
        generate(shell, &mut Cli::command(), "satcon", &mut io::stdout());
        return Ok(());
    }

    let ctx = Context::new(&connection)?;
    match command {
        Commands::Channel(args) => channel::run(&ctx, args).await,
        Commands::Cluster(args) => cluster::run(&ctx, args).await,
        Commands::Group(args) => group::run(&ctx, args).await,
        Commands::Resource(args) => resource::run(&ctx, args).await,
        Commands::Subscription(args) => subscription::run(&ctx, args).await,
        Commands::Version(args) => version::run(&ctx, args).await,
        Commands::User(args) => user::run(&ctx, &connection, args).await,
        Commands::Completions { .. } => Ok(()),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    init_tracing(cli.verbose);

    if let Err(e) = dispatch(cli.command, cli.connection).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
