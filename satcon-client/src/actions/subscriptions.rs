//! Channel subscription operations.

use serde::{Deserialize, Serialize};

use super::RemovalResponse;
use crate::types::Subscription;
use crate::web::GraphQLQuery;
use crate::{Client, Result};

const SUBSCRIPTION_FIELDS: [&str; 11] = [
    "uuid",
    "orgId",
    "name",
    "groups",
    "channelUuid",
    "channelName",
    "channel",
    "version",
    "versionUuid",
    "created",
    "updated",
];

/// Variables for `addSubscription`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSubscriptionVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
    /// Subscription name.
    pub name: String,
    /// Group names the subscription targets.
    pub groups: Vec<String>,
    /// Channel UUID.
    pub channel_uuid: String,
    /// Version UUID.
    pub version_uuid: String,
}

impl AddSubscriptionVariables {
    /// Build the variables for `addSubscription`.
    pub fn new(
        org_id: impl Into<String>,
        name: impl Into<String>,
        channel_uuid: impl Into<String>,
        version_uuid: impl Into<String>,
        groups: Vec<String>,
    ) -> Self {
        Self {
            query: GraphQLQuery::mutation("addSubscription")
                .arg("orgId", "String!")
                .arg("name", "String!")
                .arg("groups", "[String!]!")
                .arg("channelUuid", "String!")
                .arg("versionUuid", "String!")
                .returns(["uuid"]),
            org_id: org_id.into(),
            name: name.into(),
            groups,
            channel_uuid: channel_uuid.into(),
            version_uuid: version_uuid.into(),
        }
    }
}

operation!(AddSubscriptionVariables => AddSubscriptionResponse, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "name": {{json name}},
  "groups": {{json groups}},
  "channelUuid": {{json channelUuid}},
  "versionUuid": {{json versionUuid}}
}{{/inline}}"#);

/// Result of `addSubscription`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AddSubscriptionResponse {
    /// UUID of the new subscription.
    pub uuid: String,
}

/// Variables for `subscriptions`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionsVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
}

impl SubscriptionsVariables {
    /// Build the variables for `subscriptions`.
    pub fn new(org_id: impl Into<String>) -> Self {
        Self {
            query: GraphQLQuery::query("subscriptions")
                .arg("orgId", "String!")
                .returns(SUBSCRIPTION_FIELDS),
            org_id: org_id.into(),
        }
    }
}

operation!(SubscriptionsVariables => Vec<Subscription>, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}}
}{{/inline}}"#);

/// Variables for `subscription`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
    /// Subscription UUID.
    pub uuid: String,
}

impl SubscriptionVariables {
    /// Build the variables for `subscription`.
    pub fn new(org_id: impl Into<String>, uuid: impl Into<String>) -> Self {
        Self {
            query: GraphQLQuery::query("subscription")
                .arg("orgId", "String!")
                .arg("uuid", "String!")
                .returns(SUBSCRIPTION_FIELDS),
            org_id: org_id.into(),
            uuid: uuid.into(),
        }
    }
}

operation!(SubscriptionVariables => Subscription, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "uuid": {{json uuid}}
}{{/inline}}"#);

/// Variables for `subscriptionsForCluster`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionsForClusterVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
    /// Cluster ID.
    pub cluster_id: String,
}

impl SubscriptionsForClusterVariables {
    /// Build the variables for `subscriptionsForCluster`.
    pub fn new(org_id: impl Into<String>, cluster_id: impl Into<String>) -> Self {
        Self {
            query: GraphQLQuery::query("subscriptionsForCluster")
                .arg("orgId", "String!")
                .arg("clusterId", "String!")
                .returns(SUBSCRIPTION_FIELDS),
            org_id: org_id.into(),
            cluster_id: cluster_id.into(),
        }
    }
}

operation!(SubscriptionsForClusterVariables => Vec<Subscription>, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "clusterId": {{json clusterId}}
}{{/inline}}"#);

/// Variables for `editSubscription`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditSubscriptionVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
    /// Subscription UUID.
    pub uuid: String,
    /// Subscription name.
    pub name: String,
    /// Group names the subscription targets.
    pub groups: Vec<String>,
    /// Channel UUID.
    pub channel_uuid: String,
    /// Version UUID.
    pub version_uuid: String,
}

impl EditSubscriptionVariables {
    /// Build the variables for `editSubscription`.
    pub fn new(
        org_id: impl Into<String>,
        uuid: impl Into<String>,
        name: impl Into<String>,
        channel_uuid: impl Into<String>,
        version_uuid: impl Into<String>,
        groups: Vec<String>,
    ) -> Self {
        Self {
            query: GraphQLQuery::mutation("editSubscription")
                .arg("orgId", "String!")
                .arg("uuid", "String!")
                .arg("name", "String!")
                .arg("groups", "[String!]!")
                .arg("channelUuid", "String!")
                .arg("versionUuid", "String!")
                .returns(["uuid", "success"]),
            org_id: org_id.into(),
            uuid: uuid.into(),
            name: name.into(),
            groups,
            channel_uuid: channel_uuid.into(),
            version_uuid: version_uuid.into(),
        }
    }
}

operation!(EditSubscriptionVariables => RemovalResponse, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "uuid": {{json uuid}},
  "name": {{json name}},
  "groups": {{json groups}},
  "channelUuid": {{json channelUuid}},
  "versionUuid": {{json versionUuid}}
}{{/inline}}"#);

/// Variables for `setSubscription`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetSubscriptionVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
    /// Subscription UUID.
    pub uuid: String,
    /// Version UUID.
    pub version_uuid: String,
}

impl SetSubscriptionVariables {
    /// Build the variables for `setSubscription`.
    pub fn new(
        org_id: impl Into<String>,
        uuid: impl Into<String>,
        version_uuid: impl Into<String>,
    ) -> Self {
        Self {
            query: GraphQLQuery::mutation("setSubscription")
                .arg("orgId", "String!")
                .arg("uuid", "String!")
                .arg("versionUuid", "String!")
                .returns(["uuid", "success"]),
            org_id: org_id.into(),
            uuid: uuid.into(),
            version_uuid: version_uuid.into(),
        }
    }
}

operation!(SetSubscriptionVariables => RemovalResponse, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "uuid": {{json uuid}},
  "versionUuid": {{json versionUuid}}
}{{/inline}}"#);

/// Variables for `removeSubscription`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveSubscriptionVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
    /// Subscription UUID.
    pub uuid: String,
}

impl RemoveSubscriptionVariables {
    /// Build the variables for `removeSubscription`.
    pub fn new(org_id: impl Into<String>, uuid: impl Into<String>) -> Self {
        Self {
            query: GraphQLQuery::mutation("removeSubscription")
                .arg("orgId", "String!")
                .arg("uuid", "String!")
                .returns(["uuid", "success"]),
            org_id: org_id.into(),
            uuid: uuid.into(),
        }
    }
}

operation!(RemoveSubscriptionVariables => RemovalResponse, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "uuid": {{json uuid}}
}{{/inline}}"#);

/// Subscription operations.
#[derive(Debug, Clone)]
pub struct Subscriptions {
    client: Client,
}

resource_client!(Subscriptions);

impl Subscriptions {
    /// Subscribe `groups` to a version of a channel.
    pub async fn add_subscription(
        &self,
        org_id: &str,
        name: &str,
        channel_uuid: &str,
        version_uuid: &str,
        groups: Vec<String>,
    ) -> Result<Option<AddSubscriptionResponse>> {
        self.client
            .execute(&AddSubscriptionVariables::new(
                org_id,
                name,
                channel_uuid,
                version_uuid,
                groups,
            ))
            .await
    }

    /// List the subscriptions in the organization.
    pub async fn subscriptions(&self, org_id: &str) -> Result<Option<Vec<Subscription>>> {
        self.client
            .execute(&SubscriptionsVariables::new(org_id))
            .await
    }

    /// Look a subscription up by UUID.
    pub async fn subscription(&self, org_id: &str, uuid: &str) -> Result<Option<Subscription>> {
        self.client
            .execute(&SubscriptionVariables::new(org_id, uuid))
            .await
    }

    /// Subscriptions that apply to one cluster through its groups.
    pub async fn subscriptions_for_cluster(
        &self,
        org_id: &str,
        cluster_id: &str,
    ) -> Result<Option<Vec<Subscription>>> {
        self.client
            .execute(&SubscriptionsForClusterVariables::new(org_id, cluster_id))
            .await
    }

    /// Replace the name, channel version and groups of a subscription.
    pub async fn edit_subscription(
        &self,
        org_id: &str,
        uuid: &str,
        name: &str,
        channel_uuid: &str,
        version_uuid: &str,
        groups: Vec<String>,
    ) -> Result<Option<RemovalResponse>> {
        self.client
            .execute(&EditSubscriptionVariables::new(
                org_id,
                uuid,
                name,
                channel_uuid,
                version_uuid,
                groups,
            ))
            .await
    }

    /// Point a subscription at another version of its channel.
    pub async fn set_subscription(
        &self,
        org_id: &str,
        uuid: &str,
        version_uuid: &str,
    ) -> Result<Option<RemovalResponse>> {
        self.client
            .execute(&SetSubscriptionVariables::new(org_id, uuid, version_uuid))
            .await
    }

    /// Delete a subscription.
    pub async fn remove_subscription(
        &self,
        org_id: &str,
        uuid: &str,
    ) -> Result<Option<RemovalResponse>> {
        self.client
            .execute(&RemoveSubscriptionVariables::new(org_id, uuid))
            .await
    }
}
