//! Typed operations per resource.
//!
//! Every operation is a variables struct carrying its [`GraphQLQuery`]
//! descriptor and argument values, a `vars` template, and the type its
//! payload deserializes into. Resource clients ([`Channels`], [`Clusters`],
//! ...) build the variables and hand them to [`Client::execute`].
//!
//! [`Client::execute`]: crate::Client::execute

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::web::{ExtraHelpers, GraphQLQuery};

/// A single GraphQL operation with its argument values.
pub trait Operation: Serialize + Send + Sync {
    /// Payload found under `data.<operationName>`.
    type Output: DeserializeOwned;

    /// Handlebars fragment declaring the `vars` inline partial.
    const TEMPLATE: &'static str;

    /// The operation descriptor.
    fn query(&self) -> &GraphQLQuery;

    /// Extra template helpers for this operation.
    fn helpers(&self) -> Option<ExtraHelpers> {
        None
    }
}

/// Implement [`Operation`] for a variables struct with a `query` field.
macro_rules! operation {
    ($vars:ty => $output:ty, $template:expr) => {
        impl $crate::actions::Operation for $vars {
            type Output = $output;
            const TEMPLATE: &'static str = $template;

            fn query(&self) -> &$crate::web::GraphQLQuery {
                &self.query
            }
        }
    };
}

/// Implement construction shared by every resource client.
macro_rules! resource_client {
    ($name:ident) => {
        impl $name {
            /// Create the resource client.
            ///
            /// Fails if `endpoint` is empty; `http` defaults to `reqwest::Client`.
            pub fn new(
                endpoint: &str,
                http: Option<std::sync::Arc<dyn $crate::web::HttpExecutor>>,
                auth: Option<std::sync::Arc<dyn $crate::auth::Authenticator>>,
            ) -> $crate::Result<Self> {
                $crate::Client::new(endpoint, http, auth).map(Self::from)
            }

            /// The underlying client.
            pub fn client(&self) -> &$crate::Client {
                &self.client
            }
        }

        impl From<$crate::Client> for $name {
            fn from(client: $crate::Client) -> Self {
                Self { client }
            }
        }
    };
}

pub mod channels;
pub mod clusters;
pub mod groups;
pub mod resources;
pub mod subscriptions;
pub mod users;
pub mod versions;

pub use channels::Channels;
pub use clusters::Clusters;
pub use groups::Groups;
pub use resources::Resources;
pub use subscriptions::Subscriptions;
pub use users::Users;
pub use versions::Versions;

/// Result of mutations that report `uuid` and `success`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct RemovalResponse {
    /// Affected object.
    pub uuid: String,
    /// Whether the server applied the change.
    #[serde(default)]
    pub success: bool,
}
