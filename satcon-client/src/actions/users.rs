//! User operations.

use serde::{Deserialize, Serialize};

use crate::types::User;
use crate::web::GraphQLQuery;
use crate::{Client, Result};

/// Variables for `signIn`.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
    /// Login name.
    pub login: String,
    /// Password.
    pub password: String,
}

impl SignInVariables {
    /// Build the variables for `signIn`.
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            query: GraphQLQuery::mutation("signIn")
                .arg("login", "String!")
                .arg("password", "String!")
                .returns(["token"]),
            login: login.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for SignInVariables {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInVariables")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

operation!(SignInVariables => SignInResponse, r#"{{#*inline "vars"}}{
  "login": {{json login}},
  "password": {{json password}}
}{{/inline}}"#);

/// Result of `signIn`.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SignInResponse {
    /// JWT for subsequent requests; absent when the sign-in was refused.
    #[serde(default)]
    pub token: Option<String>,
}

impl std::fmt::Debug for SignInResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInResponse")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Variables for `me`.
#[derive(Debug, Clone, Serialize)]
pub struct MeVariables {
    /// Operation descriptor.
    #[serde(flatten)]
    pub query: GraphQLQuery,
}

impl MeVariables {
    /// Build the variables for `me`.
    pub fn new() -> Self {
        Self {
            query: GraphQLQuery::query("me")
                .returns(["id", "type", "orgId", "identifier", "email", "role"]),
        }
    }
}

impl Default for MeVariables {
    fn default() -> Self {
        Self::new()
    }
}

operation!(MeVariables => User, r#"{{#*inline "vars"}}{}{{/inline}}"#);

/// User operations.
#[derive(Debug, Clone)]
pub struct Users {
    client: Client,
}

resource_client!(Users);

impl Users {
    /// Exchange a login and password for a token.
    pub async fn sign_in(&self, login: &str, password: &str) -> Result<Option<SignInResponse>> {
        self.client
            .execute(&SignInVariables::new(login, password))
            .await
    }

    /// The user the request's credentials belong to.
    pub async fn me(&self) -> Result<Option<User>> {
        self.client.execute(&MeVariables::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testing::{Canned, client, render};
    use serde_json::json;

    #[test]
    fn test_me_has_no_arguments() {
        let body = render(&MeVariables::new());
        assert_eq!(
            body["query"],
            "query { me { id type orgId identifier email role } }"
        );
        assert_eq!(body["variables"], json!({}));
    }

    #[tokio::test]
    async fn test_sign_in_null_token() {
        let executor = Canned::new(json!({"data": {"signIn": {"token": null}}}));
        let users = Users::from(client(executor));
        let response = users.sign_in("admin", "pw").await.unwrap().unwrap();
        assert_eq!(response.token, None);
    }

    #[test]
    fn test_password_not_in_debug() {
        let vars = SignInVariables::new("admin", "hunter2");
        assert!(!format!("{vars:?}").contains("hunter2"));
    }

    #[tokio::test]
    async fn test_sign_in() {
        let executor = Canned::new(json!({"data": {"signIn": {"token": "jwt"}}}));
        let users = Users::from(client(executor.clone()));
        let response = users.sign_in("admin", "pw").await.unwrap().unwrap();
        assert_eq!(response.token.as_deref(), Some("jwt"));
        assert_eq!(
            executor.last()["variables"],
            json!({"login": "admin", "password": "pw"})
        );
    }
}
