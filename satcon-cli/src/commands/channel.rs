//! `satcon channel` - manage configuration channels.

use clap::{Args, ValueEnum};

use super::{CommonArgs, Context};
use crate::error::{CliResult, required};
use crate::output::print;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelAction {
    /// List every channel in the organization
    List,
    /// Show one channel by --id or --name
    Get,
    /// Create a channel named --name
    Add,
    /// Rename channel --id to --name
    Edit,
    /// Delete channel --id
    Remove,
}

#[derive(Args, Debug)]
pub struct ChannelArgs {
    /// Action to perform
    #[arg(short, long, value_enum, default_value = "list")]
    pub action: ChannelAction,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn run(ctx: &Context, args: ChannelArgs) -> CliResult<()> {
    let org = ctx.org()?;
    let channels = ctx.client.channels();
    let CommonArgs { name, id } = args.common;

    match args.action {
        ChannelAction::List => print(&channels.channels(org).await?),
        ChannelAction::Get => match id {
            Some(id) => print(&channels.channel(org, &id).await?),
            None => {
                let name = required(name, "--id or --name")?;
                print(&channels.channel_by_name(org, &name).await?)
            }
        },
        ChannelAction::Add => {
            let name = required(name, "--name")?;
            print(&channels.add_channel(org, &name).await?)
        }
        ChannelAction::Edit => {
            let id = required(id, "--id")?;
            let name = required(name, "--name")?;
            print(&channels.edit_channel(org, &id, &name).await?)
        }
        ChannelAction::Remove => {
            let id = required(id, "--id")?;
            print(&channels.remove_channel(org, &id).await?)
        }
    }
}
