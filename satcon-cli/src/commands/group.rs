//! `satcon group` - manage cluster groups.

use clap::{Args, ValueEnum};

use super::{CommonArgs, Context};
use crate::error::{CliError, CliResult, required};
use crate::output::print;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupAction {
    /// List every group in the organization
    List,
    /// Show group --name
    Get,
    /// Create a group named --name
    Add,
    /// Delete a group by --id or --name
    Remove,
    /// Add the -c clusters to group --id
    GroupClusters,
    /// Remove the -c clusters from group --id
    UngroupClusters,
    /// Add the -c clusters to every -g group
    Assign,
    /// Remove the -c clusters from every -g group
    Unassign,
}

#[derive(Args, Debug)]
pub struct GroupArgs {
    /// Action to perform
    #[arg(short, long, value_enum, default_value = "list")]
    pub action: GroupAction,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Cluster ID (repeatable)
    #[arg(short = 'c', long = "cluster")]
    pub clusters: Vec<String>,

    /// Group uuid (repeatable)
    #[arg(short = 'g', long = "group")]
    pub groups: Vec<String>,
}

fn non_empty(values: Vec<String>, flag: &'static str) -> CliResult<Vec<String>> {
    if values.is_empty() {
        return Err(CliError::MissingArgument(flag));
    }
    Ok(values)
}

pub async fn run(ctx: &Context, args: GroupArgs) -> CliResult<()> {
    let org = ctx.org()?;
    let groups = ctx.client.groups();
    let CommonArgs { name, id } = args.common;

    match args.action {
        GroupAction::List => print(&groups.groups(org).await?),
        GroupAction::Get => {
            let name = required(name, "--name")?;
            print(&groups.group_by_name(org, &name).await?)
        }
        GroupAction::Add => {
            let name = required(name, "--name")?;
            print(&groups.add_group(org, &name).await?)
        }
        GroupAction::Remove => match id {
            Some(id) => print(&groups.remove_group(org, &id).await?),
            None => {
                let name = required(name, "--id or --name")?;
                print(&groups.remove_group_by_name(org, &name).await?)
            }
        },
        GroupAction::GroupClusters => {
            let id = required(id, "--id")?;
            let clusters = non_empty(args.clusters, "-c")?;
            print(&groups.group_clusters(org, &id, clusters).await?)
        }
        GroupAction::UngroupClusters => {
            let id = required(id, "--id")?;
            let clusters = non_empty(args.clusters, "-c")?;
            print(&groups.ungroup_clusters(org, &id, clusters).await?)
        }
        GroupAction::Assign => {
            let group_uuids = non_empty(args.groups, "-g")?;
            let cluster_ids = non_empty(args.clusters, "-c")?;
            print(&groups.assign_cluster_groups(org, group_uuids, cluster_ids).await?)
        }
        GroupAction::Unassign => {
            let group_uuids = non_empty(args.groups, "-g")?;
            let cluster_ids = non_empty(args.clusters, "-c")?;
            print(&groups.unassign_cluster_groups(org, group_uuids, cluster_ids).await?)
        }
    }
}
