//! Channel operations.

use serde::{Deserialize, Serialize};

use super::RemovalResponse;
use crate::types::Channel;
use crate::web::GraphQLQuery;
use crate::{Client, Result};

const CHANNEL_FIELDS: [&str; 6] = [
    "uuid",
    "orgId",
    "name",
    "created",
    "versions { uuid name description location created }",
    "subscriptions { uuid name groups }",
];

/// Variables for `addChannel`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChannelVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
    /// Channel name.
    pub name: String,
}

impl AddChannelVariables {
    /// Build the variables for `addChannel`.
    pub fn new(org_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            query: GraphQLQuery::mutation("addChannel")
                .arg("orgId", "String!")
                .arg("name", "String!")
                .returns(["uuid"]),
            org_id: org_id.into(),
            name: name.into(),
        }
    }
}

operation!(AddChannelVariables => AddChannelResponse, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "name": {{json name}}
}{{/inline}}"#);

/// Result of `addChannel`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AddChannelResponse {
    /// UUID of the new channel.
    pub uuid: String,
}

/// Variables for `channels`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelsVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
}

impl ChannelsVariables {
    /// Build the variables for `channels`.
    pub fn new(org_id: impl Into<String>) -> Self {
        Self {
            query: GraphQLQuery::query("channels")
                .arg("orgId", "String!")
                .returns(CHANNEL_FIELDS),
            org_id: org_id.into(),
        }
    }
}

operation!(ChannelsVariables => Vec<Channel>, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}}
}{{/inline}}"#);

/// Variables for `channel`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
    /// Channel UUID.
    pub uuid: String,
}

impl ChannelVariables {
    /// Build the variables for `channel`.
    pub fn new(org_id: impl Into<String>, uuid: impl Into<String>) -> Self {
        Self {
            query: GraphQLQuery::query("channel")
                .arg("orgId", "String!")
                .arg("uuid", "String!")
                .returns(CHANNEL_FIELDS),
            org_id: org_id.into(),
            uuid: uuid.into(),
        }
    }
}

operation!(ChannelVariables => Channel, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "uuid": {{json uuid}}
}{{/inline}}"#);

/// Variables for `channelByName`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelByNameVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
    /// Channel name.
    pub name: String,
}

impl ChannelByNameVariables {
    /// Build the variables for `channelByName`.
    pub fn new(org_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            query: GraphQLQuery::query("channelByName")
                .arg("orgId", "String!")
                .arg("name", "String!")
                .returns(CHANNEL_FIELDS),
            org_id: org_id.into(),
            name: name.into(),
        }
    }
}

operation!(ChannelByNameVariables => Channel, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "name": {{json name}}
}{{/inline}}"#);

/// Variables for `editChannel`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditChannelVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
    /// Channel UUID.
    pub uuid: String,
    /// Channel name.
    pub name: String,
}

impl EditChannelVariables {
    /// Build the variables for `editChannel`.
    pub fn new(
        org_id: impl Into<String>,
        uuid: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            query: GraphQLQuery::mutation("editChannel")
                .arg("orgId", "String!")
                .arg("uuid", "String!")
                .arg("name", "String!")
                .returns(["uuid", "success", "name"]),
            org_id: org_id.into(),
            uuid: uuid.into(),
            name: name.into(),
        }
    }
}

operation!(EditChannelVariables => EditChannelResponse, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "uuid": {{json uuid}},
  "name": {{json name}}
}{{/inline}}"#);

/// Result of `editChannel`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EditChannelResponse {
    /// Channel UUID.
    pub uuid: String,
    /// Whether the server applied the change.
    #[serde(default)]
    pub success: bool,
    /// Name after the edit.
    pub name: Option<String>,
}

/// Variables for `removeChannel`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveChannelVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
    /// Channel UUID.
    pub uuid: String,
}

impl RemoveChannelVariables {
    /// Build the variables for `removeChannel`.
    pub fn new(org_id: impl Into<String>, uuid: impl Into<String>) -> Self {
        Self {
            query: GraphQLQuery::mutation("removeChannel")
                .arg("orgId", "String!")
                .arg("uuid", "String!")
                .returns(["uuid", "success"]),
            org_id: org_id.into(),
            uuid: uuid.into(),
        }
    }
}

operation!(RemoveChannelVariables => RemovalResponse, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "uuid": {{json uuid}}
}{{/inline}}"#);

/// Channel operations.
#[derive(Debug, Clone)]
pub struct Channels {
    client: Client,
}

resource_client!(Channels);

impl Channels {
    /// Create a channel named `name`.
    pub async fn add_channel(&self, org_id: &str, name: &str) -> Result<Option<AddChannelResponse>> {
        self.client
            .execute(&AddChannelVariables::new(org_id, name))
            .await
    }

    /// List the organization's channels.
    pub async fn channels(&self, org_id: &str) -> Result<Option<Vec<Channel>>> {
        self.client.execute(&ChannelsVariables::new(org_id)).await
    }

    /// Look a channel up by UUID.
    pub async fn channel(&self, org_id: &str, uuid: &str) -> Result<Option<Channel>> {
        self.client
            .execute(&ChannelVariables::new(org_id, uuid))
            .await
    }

    /// Look a channel up by name.
    pub async fn channel_by_name(&self, org_id: &str, name: &str) -> Result<Option<Channel>> {
        self.client
            .execute(&ChannelByNameVariables::new(org_id, name))
            .await
    }

    /// Rename a channel.
    pub async fn edit_channel(
        &self,
        org_id: &str,
        uuid: &str,
        name: &str,
    ) -> Result<Option<EditChannelResponse>> {
        self.client
            .execute(&EditChannelVariables::new(org_id, uuid, name))
            .await
    }

    /// Delete a channel.
    pub async fn remove_channel(&self, org_id: &str, uuid: &str) -> Result<Option<RemovalResponse>> {
        self.client
            .execute(&RemoveChannelVariables::new(org_id, uuid))
            .await
    }
}
