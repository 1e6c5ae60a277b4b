//! Entity types mirroring the Satellite Config schema.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Configuration channel.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub uuid: String,
    pub org_id: Option<String>,
    pub name: Option<String>,
    pub created: Option<String>,
    #[serde(default)]
    pub versions: Vec<ChannelVersion>,
    #[serde(default)]
    pub subscriptions: Vec<ChannelSubscription>,
}

/// Version entry listed on a channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelVersion {
    pub uuid: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub created: Option<String>,
}

/// Subscription entry listed on a channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSubscription {
    pub uuid: String,
    pub name: Option<String>,
    #[serde(default)]
    pub groups: Vec<String>,
}

/// Full channel version including its content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployableVersion {
    pub org_id: Option<String>,
    pub uuid: String,
    pub channel_id: Option<String>,
    pub channel_name: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub created: Option<String>,
}

/// Cluster registration payload.
///
/// `name` is required by the service; any other keys are passed through.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Registration {
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Registration {
    /// Registration carrying only a cluster name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// Group reference attached to a cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClusterGroup {
    pub uuid: String,
    pub name: Option<String>,
}

/// Registered cluster.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub id: Option<String>,
    pub org_id: Option<String>,
    pub cluster_id: String,
    pub metadata: Option<Value>,
    pub registration: Option<Value>,
    pub reg_state: Option<String>,
    #[serde(default)]
    pub groups: Vec<ClusterGroup>,
    pub created: Option<String>,
    pub updated: Option<String>,
}

/// Cluster group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub uuid: String,
    pub org_id: Option<String>,
    pub name: Option<String>,
    pub created: Option<String>,
    #[serde(default)]
    pub clusters: Vec<GroupCluster>,
}

/// Cluster reference attached to a group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCluster {
    pub cluster_id: String,
    pub name: Option<String>,
}

/// Channel subscription.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub uuid: String,
    pub org_id: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub groups: Vec<String>,
    pub channel_uuid: Option<String>,
    pub channel_name: Option<String>,
    pub channel: Option<String>,
    pub version: Option<String>,
    pub version_uuid: Option<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
}

/// Cluster reference attached to a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterInfo {
    pub cluster_id: String,
    pub name: Option<String>,
}

/// Kubernetes resource reported by a cluster.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub org_id: Option<String>,
    pub cluster_id: Option<String>,
    pub cluster: Option<ClusterInfo>,
    pub self_link: Option<String>,
    pub hash: Option<String>,
    pub data: Option<Value>,
    #[serde(default)]
    pub deleted: bool,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub last_modified: Option<String>,
}

/// Page of resources.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ResourceList {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// Stored content of a resource, optionally at a past revision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContent {
    pub id: String,
    pub hist_id: Option<String>,
    pub content: Option<String>,
    pub updated: Option<String>,
}

/// Signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(rename = "type")]
    pub user_type: Option<String>,
    pub org_id: Option<String>,
    pub identifier: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}
