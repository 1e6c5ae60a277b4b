//! `satcon cluster` - register and inspect clusters.

use clap::{Args, ValueEnum};
use satcon_client::Registration;

use super::{CommonArgs, Context};
use crate::error::{CliResult, required};
use crate::output::print;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClusterAction {
    /// List every cluster in the organization
    List,
    /// Show one cluster by --id or --name
    Get,
    /// Register a new cluster named --name
    Register,
    /// Delete cluster --id
    Delete,
    /// Delete every cluster in the organization
    DeleteAll,
    /// Re-enable the registration URL of cluster --id
    EnableRegistrationUrl,
}

#[derive(Args, Debug)]
pub struct ClusterArgs {
    /// Action to perform
    #[arg(short, long, value_enum, default_value = "list")]
    pub action: ClusterAction,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn run(ctx: &Context, args: ClusterArgs) -> CliResult<()> {
    let org = ctx.org()?;
    let clusters = ctx.client.clusters();
    let CommonArgs { name, id } = args.common;

    match args.action {
        ClusterAction::List => print(&clusters.clusters_by_org_id(org).await?),
        ClusterAction::Get => match id {
            Some(id) => print(&clusters.cluster_by_cluster_id(org, &id).await?),
            None => {
                let name = required(name, "--id or --name")?;
                print(&clusters.cluster_by_name(org, &name).await?)
            }
        },
        ClusterAction::Register => {
            let name = required(name, "--name")?;
            print(&clusters.register_cluster(org, Registration::new(name)).await?)
        }
        ClusterAction::Delete => {
            let id = required(id, "--id")?;
            print(&clusters.delete_cluster_by_cluster_id(org, &id).await?)
        }
        ClusterAction::DeleteAll => print(&clusters.delete_clusters(org).await?),
        ClusterAction::EnableRegistrationUrl => {
            let id = required(id, "--id")?;
            print(&clusters.enable_registration_url(org, &id).await?)
        }
    }
}
