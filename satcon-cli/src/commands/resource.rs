//! `satcon resource` - query resources reported by clusters.

use clap::{Args, ValueEnum};

use super::{CommonArgs, Context};
use crate::error::{CliResult, required};
use crate::output::print;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceAction {
    /// Search resources, optionally narrowed by --filter
    List,
    /// Search the resources of cluster -c
    ByCluster,
    /// Show resource --id
    Get,
    /// Show the resource at --self-link on cluster -c
    ByKeys,
    /// Show the stored content at --self-link on cluster -c
    Content,
}

#[derive(Args, Debug)]
pub struct ResourceArgs {
    /// Action to perform
    #[arg(short, long, value_enum, default_value = "list")]
    pub action: ResourceAction,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Cluster ID
    #[arg(short = 'c', long = "cluster")]
    pub cluster: Option<String>,

    /// Self-link filter
    #[arg(long)]
    pub filter: Option<String>,

    /// Maximum number of resources returned
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Kubernetes self link of the resource
    #[arg(long)]
    pub self_link: Option<String>,

    /// History entry to show instead of the current content
    #[arg(long)]
    pub hist_id: Option<String>,
}

pub async fn run(ctx: &Context, args: ResourceArgs) -> CliResult<()> {
    let org = ctx.org()?;
    let resources = ctx.client.resources();
    let filter = args.filter.as_deref();

    match args.action {
        ResourceAction::List => print(&resources.resources(org, filter, args.limit).await?),
        ResourceAction::ByCluster => {
            let cluster = required(args.cluster, "-c")?;
            print(
                &resources
                    .resources_by_cluster(org, &cluster, filter, args.limit)
                    .await?,
            )
        }
        ResourceAction::Get => {
            let id = required(args.common.id, "--id")?;
            print(&resources.resource(org, &id).await?)
        }
        ResourceAction::ByKeys => {
            let cluster = required(args.cluster, "-c")?;
            let self_link = required(args.self_link, "--self-link")?;
            print(&resources.resource_by_keys(org, &cluster, &self_link).await?)
        }
        ResourceAction::Content => {
            let cluster = required(args.cluster, "-c")?;
            let self_link = required(args.self_link, "--self-link")?;
            print(
                &resources
                    .resource_content(org, &cluster, &self_link, args.hist_id.as_deref())
                    .await?,
            )
        }
    }
}
