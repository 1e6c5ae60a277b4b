//! Request rendering, transport and response decoding shared by every action.

mod query;
mod response;
mod transport;

pub use query::{BuildError, ExtraHelpers, GraphQLQuery, OperationKind, build_request_body};
pub use response::{ErrorLocation, GraphQLResponse, GraphQLResponseError};
pub use transport::{HttpExecutor, do_query, do_query_with_token};
