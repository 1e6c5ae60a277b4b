//! `satcon version` - upload and inspect channel versions.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use satcon_client::actions::versions::NewVersion;

use super::{CommonArgs, Context};
use crate::error::{CliError, CliResult, required};
use crate::output::print;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum VersionAction {
    /// Show a version of --channel by --id (uuid) or --name
    Get,
    /// Upload file -f as version --name of --channel
    Add,
    /// Delete version --id
    Remove,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Action to perform
    #[arg(short, long, value_enum, default_value = "get")]
    pub action: VersionAction,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Channel uuid (or channel name when looking a version up by name)
    #[arg(long)]
    pub channel: Option<String>,

    /// YAML file to upload
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Version description
    #[arg(long)]
    pub description: Option<String>,
}

pub async fn run(ctx: &Context, args: VersionArgs) -> CliResult<()> {
    let org = ctx.org()?;
    let versions = ctx.client.versions();
    let CommonArgs { name, id } = args.common;

    match args.action {
        VersionAction::Get => {
            let channel = required(args.channel, "--channel")?;
            match id {
                Some(id) => print(&versions.channel_version(org, &channel, &id).await?),
                None => {
                    let name = required(name, "--id or --name")?;
                    print(&versions.channel_version_by_name(org, &channel, &name).await?)
                }
            }
        }
        VersionAction::Add => {
            let channel = required(args.channel, "--channel")?;
            let name = required(name, "--name")?;
            let file = required(args.file, "-f")?;
            let content = std::fs::read_to_string(&file).map_err(|e| {
                CliError::InvalidArgument(format!("cannot read {}: {}", file.display(), e))
            })?;

            let mut version = NewVersion::new(channel, name, content);
            if let Some(description) = args.description {
                version = version.description(description);
            }
            print(&versions.add_channel_version(org, version).await?)
        }
        VersionAction::Remove => {
            let id = required(id, "--id")?;
            print(&versions.remove_channel_version(org, &id).await?)
        }
    }
}
