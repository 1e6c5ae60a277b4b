//! Rendering properties checked across every operation.

use std::collections::HashSet;

use satcon_client::actions::{channels, clusters, groups, resources, subscriptions, users, versions};
use satcon_client::*;
use serde_json::Value;

fn render<O: Operation>(operation: &O) -> Value {
    let body = build_request_body(O::TEMPLATE, operation, operation.helpers()).unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn between<'a>(text: &'a str, open: &str) -> &'a str {
    let start = text.find(open).unwrap() + open.len();
    let end = start + text[start..].find(')').unwrap();
    &text[start..end]
}

/// Check the document shape and argument lists of one operation.
fn check<O: Operation>(operation: O) {
    let query = operation.query().clone();
    let body = render(&operation);
    let document = body["query"].as_str().unwrap();

    assert!(document.starts_with(&format!("{} ", query.kind)), "{document}");
    for field in &query.returns {
        assert!(document.contains(field.as_str()), "{field} missing in {document}");
    }

    let variables = body["variables"].as_object().unwrap();
    if query.args.is_empty() {
        assert!(!document.contains('$'));
        return;
    }

    let declared: HashSet<&str> = between(document, "(").split(", ").collect();
    let expected: HashSet<String> = query
        .args
        .iter()
        .map(|(name, ty)| format!("${name}: {ty}"))
        .collect();
    assert_eq!(declared.len(), query.args.len(), "{document}");
    assert_eq!(
        declared,
        expected.iter().map(String::as_str).collect::<HashSet<_>>()
    );

    let bound: HashSet<&str> = between(document, &format!("{}(", query.operation_name))
        .split(", ")
        .collect();
    assert_eq!(bound.len(), query.args.len(), "{document}");
    for name in query.args.keys() {
        assert!(bound.contains(format!("{name}: ${name}").as_str()));
        assert!(variables.contains_key(name), "{name} not bound");
    }
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn test_channel_operations() {
    check(channels::AddChannelVariables::new("org", "name"));
    check(channels::ChannelsVariables::new("org"));
    check(channels::ChannelVariables::new("org", "uuid"));
    check(channels::ChannelByNameVariables::new("org", "name"));
    check(channels::EditChannelVariables::new("org", "uuid", "name"));
    check(channels::RemoveChannelVariables::new("org", "uuid"));
}

#[test]
fn test_cluster_operations() {
    check(clusters::RegisterClusterVariables::new("org", Registration::new("c")));
    check(clusters::ClustersByOrgIdVariables::new("org"));
    check(clusters::ClusterByClusterIdVariables::new("org", "c-1"));
    check(clusters::ClusterByNameVariables::new("org", "c"));
    check(clusters::DeleteClusterVariables::new("org", "c-1"));
    check(clusters::DeleteClustersVariables::new("org"));
    check(clusters::EnableRegistrationUrlVariables::new("org", "c-1"));
}

#[test]
fn test_group_operations() {
    check(groups::AddGroupVariables::new("org", "g"));
    check(groups::GroupsVariables::new("org"));
    check(groups::GroupByNameVariables::new("org", "g"));
    check(groups::RemoveGroupVariables::new("org", "g-1"));
    check(groups::RemoveGroupByNameVariables::new("org", "g"));
    check(groups::GroupClustersVariables::new("org", "g-1", ids(&["c-1", "c-2"])));
    check(groups::GroupClustersVariables::ungroup("org", "g-1", ids(&["c-1"])));
    check(groups::AssignClusterGroupsVariables::new("org", ids(&["g-1"]), ids(&["c-1"])));
    check(groups::AssignClusterGroupsVariables::unassign("org", ids(&["g-1"]), ids(&["c-1"])));
}

#[test]
fn test_subscription_operations() {
    check(subscriptions::AddSubscriptionVariables::new("org", "s", "ch", "v", ids(&["g"])));
    check(subscriptions::SubscriptionsVariables::new("org"));
    check(subscriptions::SubscriptionVariables::new("org", "s-1"));
    check(subscriptions::SubscriptionsForClusterVariables::new("org", "c-1"));
    check(subscriptions::EditSubscriptionVariables::new("org", "s-1", "s", "ch", "v", ids(&["g"])));
    check(subscriptions::SetSubscriptionVariables::new("org", "s-1", "v"));
    check(subscriptions::RemoveSubscriptionVariables::new("org", "s-1"));
}

#[test]
fn test_version_operations() {
    let version = versions::NewVersion::new("ch-1", "v1", "kind: ConfigMap\n");
    check(versions::AddChannelVersionVariables::new("org", version));
    check(versions::ChannelVersionVariables::new("org", "ch-1", "v-1"));
    check(versions::ChannelVersionByNameVariables::new("org", "ch", "v1"));
    check(versions::RemoveChannelVersionVariables::new("org", "v-1"));
}

#[test]
fn test_resource_operations() {
    check(resources::ResourcesVariables::new("org", None, Some(10)));
    check(resources::ResourcesByClusterVariables::new("org", "c-1", Some("pods".into()), None));
    check(resources::ResourceVariables::new("org", "r-1"));
    check(resources::ResourceByKeysVariables::new("org", "c-1", "/api/v1/pods/x"));
    check(resources::ResourceContentVariables::new("org", "c-1", "/api/v1/pods/x", None));
}

#[test]
fn test_user_operations() {
    check(users::SignInVariables::new("admin", "secret"));
    check(users::MeVariables::new());
}

#[test]
fn test_unescaped_template_rejected() {
    let vars = channels::ChannelsVariables::new("org");
    let err = build_request_body(
        r#"{{#*inline "vars"}}{"orgId": "{{orgId}}"}{{/inline}}"#,
        &vars,
        None,
    )
    .unwrap_err();
    assert!(matches!(err, BuildError::UnescapedField(_)));
}

#[test]
fn test_values_with_quotes_stay_valid_json() {
    let body = render(&channels::AddChannelVariables::new(
        "org",
        "name with \"quotes\" and \\ backslash\n",
    ));
    assert_eq!(
        body["variables"]["name"],
        "name with \"quotes\" and \\ backslash\n"
    );
}
