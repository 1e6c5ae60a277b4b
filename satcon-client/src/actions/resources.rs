//! Resource queries.
//!
//! Resources are reported by the agents running on each cluster and are
//! read-only from the client's side.

use serde::Serialize;

use crate::types::{Resource, ResourceContent, ResourceList};
use crate::web::GraphQLQuery;
use crate::{Client, Result};

const RESOURCE_FIELDS: &str = "id orgId clusterId cluster { clusterId name } selfLink hash data deleted created updated lastModified";

fn resource_list_fields() -> [String; 2] {
    ["count".to_string(), format!("resources {{ {RESOURCE_FIELDS} }}")]
}

/// Variables for `resources`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcesVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
    /// Self-link filter applied by the server.
    pub filter: Option<String>,
    /// Maximum number of resources returned.
    pub limit: Option<u32>,
}

impl ResourcesVariables {
    /// Build the variables for `resources`.
    pub fn new(org_id: impl Into<String>, filter: Option<String>, limit: Option<u32>) -> Self {
        Self {
            query: GraphQLQuery::query("resources")
                .arg("orgId", "String!")
                .arg("filter", "String")
                .arg("limit", "Int")
                .returns(resource_list_fields()),
            org_id: org_id.into(),
            filter,
            limit,
        }
    }
}

operation!(ResourcesVariables => ResourceList, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "filter": {{json filter}},
  "limit": {{json limit}}
}{{/inline}}"#);

/// Variables for `resourcesByCluster`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcesByClusterVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
    /// Cluster ID.
    pub cluster_id: String,
    /// Self-link filter applied by the server.
    pub filter: Option<String>,
    /// Maximum number of resources returned.
    pub limit: Option<u32>,
}

impl ResourcesByClusterVariables {
    /// Build the variables for `resourcesByCluster`.
    pub fn new(
        org_id: impl Into<String>,
        cluster_id: impl Into<String>,
        filter: Option<String>,
        limit: Option<u32>,
    ) -> Self {
        Self {
            query: GraphQLQuery::query("resourcesByCluster")
                .arg("orgId", "String!")
                .arg("clusterId", "String!")
                .arg("filter", "String")
                .arg("limit", "Int")
                .returns(resource_list_fields()),
            org_id: org_id.into(),
            cluster_id: cluster_id.into(),
            filter,
            limit,
        }
    }
}

operation!(ResourcesByClusterVariables => ResourceList, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "clusterId": {{json clusterId}},
  "filter": {{json filter}},
  "limit": {{json limit}}
}{{/inline}}"#);

/// Variables for `resource`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
    /// Resource ID.
    pub id: String,
}

impl ResourceVariables {
    /// Build the variables for `resource`.
    pub fn new(org_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            query: GraphQLQuery::query("resource")
                .arg("orgId", "String!")
                .arg("id", "String!")
                .returns([RESOURCE_FIELDS]),
            org_id: org_id.into(),
            id: id.into(),
        }
    }
}

operation!(ResourceVariables => Resource, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "id": {{json id}}
}{{/inline}}"#);

/// Variables for `resourceByKeys`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceByKeysVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
    /// Cluster ID.
    pub cluster_id: String,
    /// Kubernetes self link of the resource.
    pub self_link: String,
}

impl ResourceByKeysVariables {
    /// Build the variables for `resourceByKeys`.
    pub fn new(
        org_id: impl Into<String>,
        cluster_id: impl Into<String>,
        self_link: impl Into<String>,
    ) -> Self {
        Self {
            query: GraphQLQuery::query("resourceByKeys")
                .arg("orgId", "String!")
                .arg("clusterId", "String!")
                .arg("selfLink", "String!")
                .returns([RESOURCE_FIELDS]),
            org_id: org_id.into(),
            cluster_id: cluster_id.into(),
            self_link: self_link.into(),
        }
    }
}

operation!(ResourceByKeysVariables => Resource, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "clusterId": {{json clusterId}},
  "selfLink": {{json selfLink}}
}{{/inline}}"#);

/// Variables for `resourceContent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContentVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
    /// Cluster ID.
    pub cluster_id: String,
    /// Kubernetes self link of the resource.
    pub resource_self_link: String,
    /// History entry to read; the current content when absent.
    pub hist_id: Option<String>,
}

impl ResourceContentVariables {
    /// Build the variables for `resourceContent`.
    pub fn new(
        org_id: impl Into<String>,
        cluster_id: impl Into<String>,
        resource_self_link: impl Into<String>,
        hist_id: Option<String>,
    ) -> Self {
        Self {
            query: GraphQLQuery::query("resourceContent")
                .arg("orgId", "String!")
                .arg("clusterId", "String!")
                .arg("resourceSelfLink", "String!")
                .arg("histId", "String")
                .returns(["id", "histId", "content", "updated"]),
            org_id: org_id.into(),
            cluster_id: cluster_id.into(),
            resource_self_link: resource_self_link.into(),
            hist_id,
        }
    }
}

operation!(ResourceContentVariables => ResourceContent, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "clusterId": {{json clusterId}},
  "resourceSelfLink": {{json resourceSelfLink}},
  "histId": {{json histId}}
}{{/inline}}"#);

/// Resource queries.
#[derive(Debug, Clone)]
pub struct Resources {
    client: Client,
}

resource_client!(Resources);

impl Resources {
    /// Search resources across the organization.
    ///
    /// `filter` is matched by the server against the resource self link.
    pub async fn resources(
        &self,
        org_id: &str,
        filter: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Option<ResourceList>> {
        self.client
            .execute(&ResourcesVariables::new(
                org_id,
                filter.map(str::to_string),
                limit,
            ))
            .await
    }

    /// Search the resources reported by one cluster.
    pub async fn resources_by_cluster(
        &self,
        org_id: &str,
        cluster_id: &str,
        filter: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Option<ResourceList>> {
        self.client
            .execute(&ResourcesByClusterVariables::new(
                org_id,
                cluster_id,
                filter.map(str::to_string),
                limit,
            ))
            .await
    }

    /// Look a resource up by ID.
    pub async fn resource(&self, org_id: &str, id: &str) -> Result<Option<Resource>> {
        self.client
            .execute(&ResourceVariables::new(org_id, id))
            .await
    }

    /// Look a resource up by cluster and self link.
    pub async fn resource_by_keys(
        &self,
        org_id: &str,
        cluster_id: &str,
        self_link: &str,
    ) -> Result<Option<Resource>> {
        self.client
            .execute(&ResourceByKeysVariables::new(org_id, cluster_id, self_link))
            .await
    }

    /// Stored content of a resource; `hist_id` selects a past revision.
    pub async fn resource_content(
        &self,
        org_id: &str,
        cluster_id: &str,
        self_link: &str,
        hist_id: Option<&str>,
    ) -> Result<Option<ResourceContent>> {
        self.client
            .execute(&ResourceContentVariables::new(
                org_id,
                cluster_id,
                self_link,
                hist_id.map(str::to_string),
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
    fn test_optional_arguments_rendered_as_null() {
        let body = render(&ResourcesVariables::new("org", None, None));
        assert_eq!(
            body["variables"],
            json!({"orgId": "org", "filter": null, "limit": null})
        );
    }

    #[test]
    fn test_limit_rendered_as_number() {
        let body = render(&ResourcesByClusterVariables::new(
            "org",
            "c-1",
            Some("deployments".into()),
            Some(25),
        ));
        assert_eq!(body["variables"]["limit"], 25);
        assert_eq!(body["variables"]["filter"], "deployments");
        let query = body["query"].as_str().unwrap();
        assert!(query.contains("$limit: Int"));
        assert!(query.contains("resources { id orgId clusterId"));
    }

    #[tokio::test]
    async fn test_resources_page() {
        let executor = Canned::new(json!({
            "data": {"resources": {
                "count": 1,
                "resources": [{
                    "id": "r-1",
                    "clusterId": "c-1",
                    "selfLink": "/api/v1/namespaces/default/configmaps/demo",
                    "cluster": {"clusterId": "c-1", "name": "one"}
                }]
            }}
        }));
        let resources = Resources::from(client(executor));
        let page = resources.resources("org", None, Some(10)).await.unwrap().unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(
            page.resources[0].cluster.as_ref().map(|c| c.cluster_id.as_str()),
            Some("c-1")
        );
        assert!(!page.resources[0].deleted);
    }

    #[tokio::test]
    async fn test_resource_by_keys() {
        let executor = Canned::new(json!({
            "data": {"resourceByKeys": {"id": "r-1", "selfLink": "/api/v1/pods/x"}}
        }));
        let resources = Resources::from(client(executor.clone()));
        let resource = resources
            .resource_by_keys("org", "c-1", "/api/v1/pods/x")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(resource.id, "r-1");
        assert_eq!(executor.last()["variables"]["selfLink"], "/api/v1/pods/x");
    }
}
