//! `satcon subscription` - subscribe groups to channel versions.

use clap::{Args, ValueEnum};

use super::{CommonArgs, Context};
use crate::error::{CliResult, required};
use crate::output::print;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubscriptionAction {
    /// List every subscription in the organization
    List,
    /// Show subscription --id
    Get,
    /// List the subscriptions that apply to cluster -c
    ForCluster,
    /// Subscribe the -g groups to --version-id of --channel
    Add,
    /// Replace name, channel, version and groups of subscription --id
    Edit,
    /// Point subscription --id at --version-id
    Set,
    /// Delete subscription --id
    Remove,
}

#[derive(Args, Debug)]
pub struct SubscriptionArgs {
    /// Action to perform
    #[arg(short, long, value_enum, default_value = "list")]
    pub action: SubscriptionAction,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Channel uuid
    #[arg(long)]
    pub channel: Option<String>,

    /// Channel version uuid
    #[arg(long)]
    pub version_id: Option<String>,

    /// Group name (repeatable)
    #[arg(short = 'g', long = "group")]
    pub groups: Vec<String>,

    /// Cluster ID
    #[arg(short = 'c', long = "cluster")]
    pub cluster: Option<String>,
}

pub async fn run(ctx: &Context, args: SubscriptionArgs) -> CliResult<()> {
    let org = ctx.org()?;
    let subscriptions = ctx.client.subscriptions();
    let CommonArgs { name, id } = args.common;

    match args.action {
        SubscriptionAction::List => print(&subscriptions.subscriptions(org).await?),
        SubscriptionAction::Get => {
            let id = required(id, "--id")?;
            print(&subscriptions.subscription(org, &id).await?)
        }
        SubscriptionAction::ForCluster => {
            let cluster = required(args.cluster, "-c")?;
            print(&subscriptions.subscriptions_for_cluster(org, &cluster).await?)
        }
        SubscriptionAction::Add => {
            let name = required(name, "--name")?;
            let channel = required(args.channel, "--channel")?;
            let version = required(args.version_id, "--version-id")?;
            print(
                &subscriptions
                    .add_subscription(org, &name, &channel, &version, args.groups)
                    .await?,
            )
        }
        SubscriptionAction::Edit => {
            let id = required(id, "--id")?;
            let name = required(name, "--name")?;
            let channel = required(args.channel, "--channel")?;
            let version = required(args.version_id, "--version-id")?;
            print(
                &subscriptions
                    .edit_subscription(org, &id, &name, &channel, &version, args.groups)
                    .await?,
            )
        }
        SubscriptionAction::Set => {
            let id = required(id, "--id")?;
            let version = required(args.version_id, "--version-id")?;
            print(&subscriptions.set_subscription(org, &id, &version).await?)
        }
        SubscriptionAction::Remove => {
            let id = required(id, "--id")?;
            print(&subscriptions.remove_subscription(org, &id).await?)
        }
    }
}
