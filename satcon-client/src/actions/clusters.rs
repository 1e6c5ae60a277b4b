//! Cluster operations.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Cluster, Registration};
use crate::web::GraphQLQuery;
use crate::{Client, Result};

const CLUSTER_FIELDS: [&str; 9] = [
    "id",
    "orgId",
    "clusterId",
    "metadata",
    "registration",
    "regState",
    "groups { uuid name }",
    "created",
    "updated",
];

/// Variables for `registerCluster`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterClusterVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
    /// Registration data sent for the cluster.
    pub registration: Registration,
}

impl RegisterClusterVariables {
    /// Build the variables for `registerCluster`.
    pub fn new(org_id: impl Into<String>, registration: Registration) -> Self {
        Self {
            query: GraphQLQuery::mutation("registerCluster")
                .arg("orgId", "String!")
                .arg("registration", "JSON!")
                .returns(["url", "orgId", "clusterId", "regState", "registration"]),
            org_id: org_id.into(),
            registration,
        }
    }
}

operation!(RegisterClusterVariables => RegisterClusterResponse, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "registration": {{json registration}}
}{{/inline}}"#);

/// Result of `registerCluster`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterClusterResponse {
    /// Manifest URL to apply on the cluster.
    pub url: Option<String>,
    /// Organization ID.
    pub org_id: Option<String>,
    /// ID assigned to the new cluster.
    pub cluster_id: String,
    /// Registration state.
    pub reg_state: Option<String>,
    /// Registration data as stored by the server.
    pub registration: Option<Value>,
}

/// Variables for `clustersByOrgId`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClustersByOrgIdVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
}

impl ClustersByOrgIdVariables {
    /// Build the variables for `clustersByOrgId`.
    pub fn new(org_id: impl Into<String>) -> Self {
        Self {
            query: GraphQLQuery::query("clustersByOrgId")
                .arg("orgId", "String!")
                .returns(CLUSTER_FIELDS),
            org_id: org_id.into(),
        }
    }
}

operation!(ClustersByOrgIdVariables => Vec<Cluster>, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}}
}{{/inline}}"#);

/// Variables for `clusterByClusterId`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterByClusterIdVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
    /// Cluster ID.
    pub cluster_id: String,
}

impl ClusterByClusterIdVariables {
    /// Build the variables for `clusterByClusterId`.
    pub fn new(org_id: impl Into<String>, cluster_id: impl Into<String>) -> Self {
        Self {
            query: GraphQLQuery::query("clusterByClusterId")
                .arg("orgId", "String!")
                .arg("clusterId", "String!")
                .returns(CLUSTER_FIELDS),
            org_id: org_id.into(),
            cluster_id: cluster_id.into(),
        }
    }
}

operation!(ClusterByClusterIdVariables => Cluster, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "clusterId": {{json clusterId}}
}{{/inline}}"#);

/// Variables for `clusterByName`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterByNameVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
    /// Cluster name.
    pub cluster_name: String,
}

impl ClusterByNameVariables {
    /// Build the variables for `clusterByName`.
    pub fn new(org_id: impl Into<String>, cluster_name: impl Into<String>) -> Self {
        Self {
            query: GraphQLQuery::query("clusterByName")
                .arg("orgId", "String!")
                .arg("clusterName", "String!")
                .returns(CLUSTER_FIELDS),
            org_id: org_id.into(),
            cluster_name: cluster_name.into(),
        }
    }
}

operation!(ClusterByNameVariables => Cluster, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "clusterName": {{json clusterName}}
}{{/inline}}"#);

/// Variables for `deleteClusterByClusterId`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteClusterVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
    /// Cluster ID.
    pub cluster_id: String,
}

impl DeleteClusterVariables {
    /// Build the variables for `deleteClusterByClusterId`.
    pub fn new(org_id: impl Into<String>, cluster_id: impl Into<String>) -> Self {
        Self {
            query: GraphQLQuery::mutation("deleteClusterByClusterId")
                .arg("orgId", "String!")
                .arg("clusterId", "String!")
                .returns(["deletedClusterCount", "deletedResourceCount"]),
            org_id: org_id.into(),
            cluster_id: cluster_id.into(),
        }
    }
}

operation!(DeleteClusterVariables => DeleteClustersResponse, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "clusterId": {{json clusterId}}
}{{/inline}}"#);

/// Variables for `deleteClusters`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteClustersVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
}

impl DeleteClustersVariables {
    /// Build the variables for `deleteClusters`.
    pub fn new(org_id: impl Into<String>) -> Self {
        Self {
            query: GraphQLQuery::mutation("deleteClusters")
                .arg("orgId", "String!")
                .returns(["deletedClusterCount", "deletedResourceCount"]),
            org_id: org_id.into(),
        }
    }
}

operation!(DeleteClustersVariables => DeleteClustersResponse, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}}
}{{/inline}}"#);

/// Counts reported by the cluster deletion mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteClustersResponse {
    /// Number of clusters removed.
    #[serde(default)]
    pub deleted_cluster_count: u64,
    /// Number of resources removed.
    #[serde(default)]
    pub deleted_resource_count: u64,
}

/// Variables for `enableRegistrationUrl`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnableRegistrationUrlVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
    /// Cluster ID.
    pub cluster_id: String,
}

impl EnableRegistrationUrlVariables {
    /// Build the variables for `enableRegistrationUrl`.
    pub fn new(org_id: impl Into<String>, cluster_id: impl Into<String>) -> Self {
        Self {
            query: GraphQLQuery::mutation("enableRegistrationUrl")
                .arg("orgId", "String!")
                .arg("clusterId", "String!")
                .returns(["url"]),
            org_id: org_id.into(),
            cluster_id: cluster_id.into(),
        }
    }
}

operation!(EnableRegistrationUrlVariables => EnableRegistrationUrlResponse, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "clusterId": {{json clusterId}}
}{{/inline}}"#);

/// Result of `enableRegistrationUrl`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EnableRegistrationUrlResponse {
    /// Registration URL to apply on the cluster.
    pub url: String,
}

/// Cluster operations.
#[derive(Debug, Clone)]
pub struct Clusters {
    client: Client,
}

resource_client!(Clusters);

impl Clusters {
    /// Register a cluster and obtain the manifest URL for it.
    pub async fn register_cluster(
        &self,
        org_id: &str,
        registration: Registration,
    ) -> Result<Option<RegisterClusterResponse>> {
        self.client
            .execute(&RegisterClusterVariables::new(org_id, registration))
            .await
    }

    /// List the clusters registered in the organization.
    pub async fn clusters_by_org_id(&self, org_id: &str) -> Result<Option<Vec<Cluster>>> {
        self.client
            .execute(&ClustersByOrgIdVariables::new(org_id))
            .await
    }

    /// Look a cluster up by ID.
    pub async fn cluster_by_cluster_id(
        &self,
        org_id: &str,
        cluster_id: &str,
    ) -> Result<Option<Cluster>> {
        self.client
            .execute(&ClusterByClusterIdVariables::new(org_id, cluster_id))
            .await
    }

    /// Look a cluster up by name.
    pub async fn cluster_by_name(&self, org_id: &str, name: &str) -> Result<Option<Cluster>> {
        self.client
            .execute(&ClusterByNameVariables::new(org_id, name))
            .await
    }

    /// Delete one cluster and the resources it reported.
    pub async fn delete_cluster_by_cluster_id(
        &self,
        org_id: &str,
        cluster_id: &str,
    ) -> Result<Option<DeleteClustersResponse>> {
        self.client
            .execute(&DeleteClusterVariables::new(org_id, cluster_id))
            .await
    }

    /// Delete every cluster in the organization.
    pub async fn delete_clusters(&self, org_id: &str) -> Result<Option<DeleteClustersResponse>> {
        self.client
            .execute(&DeleteClustersVariables::new(org_id))
            .await
    }

    /// Re-enable the registration URL of an existing cluster.
    pub async fn enable_registration_url(
        &self,
        org_id: &str,
        cluster_id: &str,
    ) -> Result<Option<EnableRegistrationUrlResponse>> {
        self.client
            .execute(&EnableRegistrationUrlVariables::new(org_id, cluster_id))
            .await
    }
}
