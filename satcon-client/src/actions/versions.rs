//! Channel version operations.

use serde::{Deserialize, Serialize};

use super::RemovalResponse;
use crate::types::DeployableVersion;
use crate::web::GraphQLQuery;
use crate::{Client, Result};

const VERSION_FIELDS: [&str; 9] = [
    "orgId",
    "uuid",
    "channelId",
    "channelName",
    "name",
    "type",
    "description",
    "content",
    "created",
];

/// Content type of uploaded version files.
pub const DEFAULT_CONTENT_TYPE: &str = "application/yaml";

/// A version to upload into a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVersion {
    /// Channel UUID.
    pub channel_uuid: String,
    /// Version name.
    pub name: String,
    /// MIME type of the content.
    pub content_type: String,
    /// Version content, usually YAML.
    pub content: String,
    /// Free-form description.
    pub description: Option<String>,
}

impl NewVersion {
    /// YAML version named `name` with the given `content`.
    pub fn new(
        channel_uuid: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            channel_uuid: channel_uuid.into(),
            name: name.into(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            content: content.into(),
            description: None,
        }
    }

    /// Attach a description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Variables for `addChannelVersion`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChannelVersionVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
    /// Channel UUID.
    pub channel_uuid: String,
    /// Version name.
    pub name: String,
    /// MIME type of the content.
    #[serde(rename = "type")]
    pub content_type: String,
    /// Version content, usually YAML.
    pub content: String,
    /// Free-form description.
    pub description: Option<String>,
}

impl AddChannelVersionVariables {
    /// Build the variables for `addChannelVersion`.
    pub fn new(org_id: impl Into<String>, version: NewVersion) -> Self {
        Self {
            query: GraphQLQuery::mutation("addChannelVersion")
                .arg("orgId", "String!")
                .arg("channelUuid", "String!")
                .arg("name", "String!")
                .arg("type", "String!")
                .arg("content", "String")
                .arg("description", "String")
                .returns(["versionUuid", "success"]),
            org_id: org_id.into(),
            channel_uuid: version.channel_uuid,
            name: version.name,
            content_type: version.content_type,
            content: version.content,
            description: version.description,
        }
    }
}

operation!(AddChannelVersionVariables => AddChannelVersionResponse, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "channelUuid": {{json channelUuid}},
  "name": {{json name}},
  "type": {{json type}},
  "content": {{json content}},
  "description": {{json description}}
}{{/inline}}"#);

/// Result of `addChannelVersion`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChannelVersionResponse {
    /// UUID of the new version.
    pub version_uuid: String,
    /// Whether the server applied the change.
    #[serde(default)]
    pub success: bool,
}

/// Variables for `channelVersion`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelVersionVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
    /// Channel UUID.
    pub channel_uuid: String,
    /// Version UUID.
    pub version_uuid: String,
}

impl ChannelVersionVariables {
    /// Build the variables for `channelVersion`.
    pub fn new(
        org_id: impl Into<String>,
        channel_uuid: impl Into<String>,
        version_uuid: impl Into<String>,
    ) -> Self {
        Self {
            query: GraphQLQuery::query("channelVersion")
                .arg("orgId", "String!")
                .arg("channelUuid", "String!")
                .arg("versionUuid", "String!")
                .returns(VERSION_FIELDS),
            org_id: org_id.into(),
            channel_uuid: channel_uuid.into(),
            version_uuid: version_uuid.into(),
        }
    }
}

operation!(ChannelVersionVariables => DeployableVersion, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "channelUuid": {{json channelUuid}},
  "versionUuid": {{json versionUuid}}
}{{/inline}}"#);

/// Variables for `channelVersionByName`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelVersionByNameVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
    /// Channel name.
    pub channel_name: String,
    /// Version name.
    pub version_name: String,
}

impl ChannelVersionByNameVariables {
    /// Build the variables for `channelVersionByName`.
    pub fn new(
        org_id: impl Into<String>,
        channel_name: impl Into<String>,
        version_name: impl Into<String>,
    ) -> Self {
        Self {
            query: GraphQLQuery::query("channelVersionByName")
                .arg("orgId", "String!")
                .arg("channelName", "String!")
                .arg("versionName", "String!")
                .returns(VERSION_FIELDS),
            org_id: org_id.into(),
            channel_name: channel_name.into(),
            version_name: version_name.into(),
        }
    }
}

operation!(ChannelVersionByNameVariables => DeployableVersion, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "channelName": {{json channelName}},
  "versionName": {{json versionName}}
}{{/inline}}"#);

/// Variables for `removeChannelVersion`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveChannelVersionVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Organization ID.
    pub org_id: String,
    /// Version UUID.
    pub uuid: String,
}

impl RemoveChannelVersionVariables {
    /// Build the variables for `removeChannelVersion`.
    pub fn new(org_id: impl Into<String>, uuid: impl Into<String>) -> Self {
        Self {
            query: GraphQLQuery::mutation("removeChannelVersion")
                .arg("orgId", "String!")
                .arg("uuid", "String!")
                .returns(["uuid", "success"]),
            org_id: org_id.into(),
            uuid: uuid.into(),
        }
    }
}

operation!(RemoveChannelVersionVariables => RemovalResponse, r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "uuid": {{json uuid}}
}{{/inline}}"#);

/// Channel version operations.
#[derive(Debug, Clone)]
pub struct Versions {
    client: Client,
}

resource_client!(Versions);

impl Versions {
    /// Upload a new version into a channel.
    pub async fn add_channel_version(
        &self,
        org_id: &str,
        version: NewVersion,
    ) -> Result<Option<AddChannelVersionResponse>> {
        self.client
            .execute(&AddChannelVersionVariables::new(org_id, version))
            .await
    }

    /// Read a channel version by UUID.
    pub async fn channel_version(
        &self,
        org_id: &str,
        channel_uuid: &str,
        version_uuid: &str,
    ) -> Result<Option<DeployableVersion>> {
        self.client
            .execute(&ChannelVersionVariables::new(org_id, channel_uuid, version_uuid))
            .await
    }

    /// Read a channel version by channel and version name.
    pub async fn channel_version_by_name(
        &self,
        org_id: &str,
        channel_name: &str,
        version_name: &str,
    ) -> Result<Option<DeployableVersion>> {
        self.client
            .execute(&ChannelVersionByNameVariables::new(
                org_id,
                channel_name,
                version_name,
            ))
            .await
    }

    /// Delete a channel version.
    pub async fn remove_channel_version(
        &self,
        org_id: &str,
        uuid: &str,
    ) -> Result<Option<RemovalResponse>> {
        self.client
            .execute(&RemoveChannelVersionVariables::new(org_id, uuid))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testing::{Canned, client, render};
    use serde_json::json;

    const MANIFEST: &str = "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: \"demo\"\n";

    #[test]
    fn test_content_is_json_escaped() {
        let version = NewVersion::new("ch-1", "v1", MANIFEST).description("first");
        let body = render(&AddChannelVersionVariables::new("org", version));
        assert_eq!(body["variables"]["content"], MANIFEST);
        assert_eq!(body["variables"]["type"], DEFAULT_CONTENT_TYPE);
        assert_eq!(body["variables"]["description"], "first");
    }

    #[test]
    fn test_missing_description_is_null() {
        let body = render(&AddChannelVersionVariables::new(
            "org",
            NewVersion::new("ch-1", "v1", MANIFEST),
        ));
        assert!(body["variables"]["description"].is_null());
        assert!(body["query"].as_str().unwrap().contains("$description: String"));
    }

    #[tokio::test]
    async fn test_channel_version_by_name() {
        let executor = Canned::new(json!({
            "data": {"channelVersionByName": {
                "uuid": "v-1", "name": "v1", "type": "application/yaml", "content": MANIFEST
            }}
        }));
        let versions = Versions::from(client(executor.clone()));
        let version = versions
            .channel_version_by_name("org", "ch", "v1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(version.content_type.as_deref(), Some("application/yaml"));
        assert_eq!(version.content.as_deref(), Some(MANIFEST));
        assert_eq!(
            executor.last()["variables"],
            json!({"orgId": "org", "channelName": "ch", "versionName": "v1"})
        );
    }
}
