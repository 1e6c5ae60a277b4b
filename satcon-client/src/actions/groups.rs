//! Cluster group operations.

use serde::{Deserialize, Serialize};

use super::RemovalResponse;
use crate::types::Group;
use crate::web::GraphQLQuery;
use crate::{Client, Result};

const GROUP_FIELDS: [&str; 5] = [
    "uuid",
    "orgId",
    "name",
    "created",
    "clusters { clusterId name }",
];

/// Variables for `addGroup`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddGroupVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
    /// Group name.
    pub name: String,
}

impl AddGroupVariables {
    /// Build the variables for `addGroup`.
    pub fn new(org_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            query: GraphQLQuery::mutation("addGroup")
                .arg("orgId", "String!")
                .arg("name", "String!")
                .returns(["uuid"]),
            org_id: org_id.into(),
            name: name.into(),
        }
    }
}

operation!(AddGroupVariables => AddGroupResponse, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "name": {{json name}}
}{{/inline}}"#);

/// Result of `addGroup`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AddGroupResponse {
    /// UUID of the new group.
    pub uuid: String,
}

/// Variables for `groups`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupsVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
}

impl GroupsVariables {
    /// Build the variables for `groups`.
    pub fn new(org_id: impl Into<String>) -> Self {
        Self {
            query: GraphQLQuery::query("groups")
                .arg("orgId", "String!")
                .returns(GROUP_FIELDS),
            org_id: org_id.into(),
        }
    }
}

operation!(GroupsVariables => Vec<Group>, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}}
}{{/inline}}"#);

/// Variables for `groupByName`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupByNameVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
    /// Group name.
    pub name: String,
}

impl GroupByNameVariables {
    /// Build the variables for `groupByName`.
    pub fn new(org_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            query: GraphQLQuery::query("groupByName")
                .arg("orgId", "String!")
                .arg("name", "String!")
                .returns(GROUP_FIELDS),
            org_id: org_id.into(),
            name: name.into(),
        }
    }
}

operation!(GroupByNameVariables => Group, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "name": {{json name}}
}{{/inline}}"#);

/// Variables for `removeGroup`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveGroupVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
    /// Group UUID.
    pub uuid: String,
}

impl RemoveGroupVariables {
    /// Build the variables for `removeGroup`.
    pub fn new(org_id: impl Into<String>, uuid: impl Into<String>) -> Self {
        Self {
            query: GraphQLQuery::mutation("removeGroup")
                .arg("orgId", "String!")
                .arg("uuid", "String!")
                .returns(["uuid", "success"]),
            org_id: org_id.into(),
            uuid: uuid.into(),
        }
    }
}

operation!(RemoveGroupVariables => RemovalResponse, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "uuid": {{json uuid}}
}{{/inline}}"#);

/// Variables for `removeGroupByName`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveGroupByNameVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
    /// Group name.
    pub name: String,
}

impl RemoveGroupByNameVariables {
    /// Build the variables for `removeGroupByName`.
    pub fn new(org_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            query: GraphQLQuery::mutation("removeGroupByName")
                .arg("orgId", "String!")
                .arg("name", "String!")
                .returns(["uuid", "success"]),
            org_id: org_id.into(),
            name: name.into(),
        }
    }
}

operation!(RemoveGroupByNameVariables => RemovalResponse, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "name": {{json name}}
}{{/inline}}"#);

/// Variables for `groupClusters` and `unGroupClusters`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupClustersVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
    /// Group UUID.
    pub uuid: String,
    /// Cluster IDs.
    pub clusters: Vec<String>,
}

impl GroupClustersVariables {
    /// Add `clusters` to the group `uuid`.
    pub fn new(org_id: impl Into<String>, uuid: impl Into<String>, clusters: Vec<String>) -> Self {
        Self::with_operation(GraphQLQuery::mutation("groupClusters"), org_id, uuid, clusters)
    }

    /// Remove `clusters` from the group `uuid`.
    pub fn ungroup(org_id: impl Into<String>, uuid: impl Into<String>, clusters: Vec<String>) -> Self {
        Self::with_operation(GraphQLQuery::mutation("unGroupClusters"), org_id, uuid, clusters)
    }

    fn with_operation(
        query: GraphQLQuery,
        org_id: impl Into<String>,
        uuid: impl Into<String>,
        clusters: Vec<String>,
    ) -> Self {
        Self {
            query: query
                .arg("orgId", "String!")
                .arg("uuid", "String!")
                .arg("clusters", "[String!]!")
                .returns(["modified"]),
            org_id: org_id.into(),
            uuid: uuid.into(),
            clusters,
        }
    }
}

operation!(GroupClustersVariables => ModifiedResponse, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "uuid": {{json uuid}},
  "clusters": {{json clusters}}
}{{/inline}}"#);

/// Variables for `assignClusterGroups` and `unassignClusterGroups`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignClusterGroupsVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
    /// Group UUIDs.
    pub group_uuids: Vec<String>,
    /// Cluster IDs.
    pub cluster_ids: Vec<String>,
}

impl AssignClusterGroupsVariables {
    /// Put every cluster in `cluster_ids` into every group in `group_uuids`.
    pub fn new(org_id: impl Into<String>, group_uuids: Vec<String>, cluster_ids: Vec<String>) -> Self {
        Self::with_operation(
            GraphQLQuery::mutation("assignClusterGroups"),
            org_id,
            group_uuids,
            cluster_ids,
        )
    }

    /// Take every cluster in `cluster_ids` out of every group in `group_uuids`.
    pub fn unassign(
        org_id: impl Into<String>,
        group_uuids: Vec<String>,
        cluster_ids: Vec<String>,
    ) -> Self {
        Self::with_operation(
            GraphQLQuery::mutation("unassignClusterGroups"),
            org_id,
            group_uuids,
            cluster_ids,
        )
    }

    fn with_operation(
        query: GraphQLQuery,
        org_id: impl Into<String>,
        group_uuids: Vec<String>,
        cluster_ids: Vec<String>,
    ) -> Self {
        Self {
            query: query
                .arg("orgId", "String!")
                .arg("groupUuids", "[String!]!")
                .arg("clusterIds", "[String!]!")
                .returns(["modified"]),
            org_id: org_id.into(),
            group_uuids,
            cluster_ids,
        }
    }
}

operation!(AssignClusterGroupsVariables => ModifiedResponse, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "groupUuids": {{json groupUuids}},
  "clusterIds": {{json clusterIds}}
}{{/inline}}"#);

/// Result of the group membership mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModifiedResponse {
    /// Number of clusters whose membership changed.
    #[serde(default)]
    pub modified: u64,
}

/// Group operations.
#[derive(Debug, Clone)]
pub struct Groups {
    client: Client,
}

resource_client!(Groups);

impl Groups {
    /// Create a cluster group.
    pub async fn add_group(&self, org_id: &str, name: &str) -> Result<Option<AddGroupResponse>> {
        self.client
            .execute(&AddGroupVariables::new(org_id, name))
            .await
    }

    /// List the organization's groups.
    pub async fn groups(&self, org_id: &str) -> Result<Option<Vec<Group>>> {
        self.client.execute(&GroupsVariables::new(org_id)).await
    }

    /// Look a group up by name.
    pub async fn group_by_name(&self, org_id: &str, name: &str) -> Result<Option<Group>> {
        self.client
            .execute(&GroupByNameVariables::new(org_id, name))
            .await
    }

    /// Delete a group by UUID.
    pub async fn remove_group(&self, org_id: &str, uuid: &str) -> Result<Option<RemovalResponse>> {
        self.client
            .execute(&RemoveGroupVariables::new(org_id, uuid))
            .await
    }

    /// Delete a group by name.
    pub async fn remove_group_by_name(
        &self,
        org_id: &str,
        name: &str,
    ) -> Result<Option<RemovalResponse>> {
        self.client
            .execute(&RemoveGroupByNameVariables::new(org_id, name))
            .await
    }

    /// Add clusters to a group.
    pub async fn group_clusters(
        &self,
        org_id: &str,
        uuid: &str,
        clusters: Vec<String>,
    ) -> Result<Option<ModifiedResponse>> {
        self.client
            .execute(&GroupClustersVariables::new(org_id, uuid, clusters))
            .await
    }

    /// Remove clusters from a group.
    pub async fn ungroup_clusters(
        &self,
        org_id: &str,
        uuid: &str,
        clusters: Vec<String>,
    ) -> Result<Option<ModifiedResponse>> {
        self.client
            .execute(&GroupClustersVariables::ungroup(org_id, uuid, clusters))
            .await
    }

    /// Add every listed cluster to every listed group.
    pub async fn assign_cluster_groups(
        &self,
        org_id: &str,
        group_uuids: Vec<String>,
        cluster_ids: Vec<String>,
    ) -> Result<Option<ModifiedResponse>> {
        self.client
            .execute(&AssignClusterGroupsVariables::new(org_id, group_uuids, cluster_ids))
            .await
    }

    /// Remove every listed cluster from every listed group.
    pub async fn unassign_cluster_groups(
        &self,
        org_id: &str,
        group_uuids: Vec<String>,
        cluster_ids: Vec<String>,
    ) -> Result<Option<ModifiedResponse>> {
        self.client
            .execute(&AssignClusterGroupsVariables::unassign(
                org_id,
                group_uuids,
                cluster_ids,
            ))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testing::{Canned, client, render};
    use serde_json::json;

    #[test]
    fn test_group_clusters_renders_list() {
        let vars = GroupClustersVariables::new("org", "g-1", vec!["c-1".into(), "c-2".into()]);
        let body = render(&vars);
        assert_eq!(body["variables"]["clusters"], json!(["c-1", "c-2"]));
        assert!(body["query"].as_str().unwrap().contains("$clusters: [String!]!"));
    }

    #[test]
    fn test_ungroup_uses_its_own_field() {
        let body = render(&GroupClustersVariables::ungroup("org", "g-1", vec![]));
        let query = body["query"].as_str().unwrap();
        assert!(query.contains("unGroupClusters("));
        assert_eq!(body["variables"]["clusters"], json!([]));
    }

    #[test]
    fn test_unassign_body() {
        let vars =
            AssignClusterGroupsVariables::unassign("org", vec!["g-1".into()], vec!["c-1".into()]);
        let body = render(&vars);
        assert!(body["query"].as_str().unwrap().contains("unassignClusterGroups("));
        assert_eq!(
            body["variables"],
            json!({"orgId": "org", "groupUuids": ["g-1"], "clusterIds": ["c-1"]})
        );
    }

    #[tokio::test]
    async fn test_groups_list() {
        let executor = Canned::new(json!({
            "data": {"groups": [
                {"uuid": "g-1", "name": "prod", "clusters": [{"clusterId": "c-1"}]},
                {"uuid": "g-2", "name": "dev"}
            ]}
        }));
        let groups = Groups::from(client(executor));
        let list = groups.groups("org").await.unwrap().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].clusters[0].cluster_id, "c-1");
        assert!(list[1].clusters.is_empty());
    }

    #[tokio::test]
    async fn test_assign_modified() {
        let executor = Canned::new(json!({"data": {"assignClusterGroups": {"modified": 3}}}));
        let groups = Groups::from(client(executor));
        let result = groups
            .assign_cluster_groups("org", vec!["g-1".into()], vec!["c-1".into()])
            .await
            .unwrap();
        assert_eq!(result, Some(ModifiedResponse { modified: 3 }));
    }
}
