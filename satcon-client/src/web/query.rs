//! GraphQL request body rendering.
//!
//! A request body is produced from two pieces: the operation descriptor
//! ([`GraphQLQuery`]) carried by a variables struct, and a per-operation
//! Handlebars fragment declaring an inline partial named `vars` that renders
//! the JSON `variables` object:
//!
//! ```text
//! {{#*inline "vars"}}{
//!   "orgId": {{json orgId}},
//!   "name": {{json name}}
//! }{{/inline}}
//! ```
//!
//! Every value a fragment emits must go through the `json` helper, which
//! writes a complete JSON value via `serde_json`. Fragments that reference a
//! field any other way are rejected before rendering.

use std::collections::BTreeMap;

use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext,
    RenderErrorReason,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::trace;

/// Additional helpers made available to a single render.
pub type ExtraHelpers = Vec<(&'static str, Box<dyn HelperDef + Send + Sync>)>;

const REQUEST_TEMPLATE: &str = "request";

// `{{kind}}`, `{{operationName}}` and `{{this}}` pass through the JSON string
// escape registered below; helper output is escaped by the helpers themselves.
const MASTER_TEMPLATE: &str = concat!(
    "{\n",
    r#"  "query": "{{kind}} {{#if args}}({{buildArgsList args}}) {{/if}}{ {{operationName}}{{#if args}}({{buildArgVarsList args}}){{/if}} { {{#each returns}}{{this}} {{/each}}} }","#,
    "\n",
    r#"  "variables": {{> vars}}"#,
    "\n}",
);

static EXPRESSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{\{~?\s*(.*?)\s*~?\}\}").expect("expression regex is valid"));

/// GraphQL operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Read-only query.
    Query,
    /// Mutation.
    Mutation,
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Query => write!(f, "query"),
            Self::Mutation => write!(f, "mutation"),
        }
    }
}

/// Operation descriptor: kind, schema field name, argument types and the
/// fields selected from the result.
///
/// Every key in `args` must be bound by the operation's `vars` fragment;
/// [`build_request_body`] fails with [`BuildError::UnboundArgument`] otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLQuery {
    /// Query or mutation.
    pub kind: OperationKind,
    /// Schema field invoked by the operation.
    pub operation_name: String,
    /// Argument name to GraphQL type, e.g. `orgId -> String!`.
    pub args: BTreeMap<String, String>,
    /// Selected fields, possibly with raw nested selections.
    pub returns: Vec<String>,
}

impl GraphQLQuery {
    /// Create a query descriptor.
    pub fn query(operation_name: impl Into<String>) -> Self {
        Self::new(OperationKind::Query, operation_name)
    }

    /// Create a mutation descriptor.
    pub fn mutation(operation_name: impl Into<String>) -> Self {
        Self::new(OperationKind::Mutation, operation_name)
    }

    fn new(kind: OperationKind, operation_name: impl Into<String>) -> Self {
        Self {
            kind,
            operation_name: operation_name.into(),
            args: BTreeMap::new(),
            returns: Vec::new(),
        }
    }

    /// Declare an argument and its GraphQL type.
    pub fn arg(mut self, name: impl Into<String>, graphql_type: impl Into<String>) -> Self {
        self.args.insert(name.into(), graphql_type.into());
        self
    }

    /// Append selected fields.
    pub fn returns<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.returns.extend(fields.into_iter().map(Into::into));
        self
    }
}

/// Request body rendering errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A fragment expression emits a value without the `json` helper.
    #[error("template expression `{{{{{0}}}}}` must be wrapped in the json helper")]
    UnescapedField(String),

    /// The template could not be parsed.
    #[error("failed to parse template: {0}")]
    Parse(#[source] Box<handlebars::TemplateError>),

    /// The template failed while rendering (missing field, missing `vars` block).
    #[error("failed to render template: {0}")]
    Render(#[source] Box<handlebars::RenderError>),

    /// The variables struct could not be serialized.
    #[error("failed to serialize variables: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The rendered body is not a JSON document.
    #[error("rendered request body is not valid JSON: {0}")]
    MalformedBody(#[source] serde_json::Error),

    /// A declared argument has no value in the rendered `variables` object.
    #[error("argument `{0}` is declared but not bound in the variables template")]
    UnboundArgument(String),
}

/// Render a complete `{"query": ..., "variables": ...}` request body.
pub fn build_request_body<V>(
    template: &str,
    variables: &V,
    extra_helpers: Option<ExtraHelpers>,
) -> Result<Vec<u8>, BuildError>
where
    V: Serialize + ?Sized,
{
    check_escaped(template)?;

    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry.register_escape_fn(escape_json_string);
    registry.register_helper("json", Box::new(json_helper));
    registry.register_helper("buildArgsList", Box::new(build_args_list));
    registry.register_helper("buildArgVarsList", Box::new(build_arg_vars_list));
    for (name, helper) in extra_helpers.into_iter().flatten() {
        registry.register_helper(name, helper);
    }

    registry
        .register_template_string(REQUEST_TEMPLATE, format!("{template}{MASTER_TEMPLATE}"))
        .map_err(|e| BuildError::Parse(Box::new(e)))?;

    let context = serde_json::to_value(variables).map_err(BuildError::Serialize)?;
    let rendered = registry
        .render(REQUEST_TEMPLATE, &context)
        .map_err(|e| BuildError::Render(Box::new(e)))?;

    let document: Value = serde_json::from_str(&rendered).map_err(BuildError::MalformedBody)?;
    check_bound(&context, &document)?;

    // Variables may hold credentials, so only the size is logged.
    trace!(
        operation = context.get("operationName").and_then(serde_json::Value::as_str).unwrap_or_default(),
        bytes = rendered.len(),
        "Rendered GraphQL request body"
    );
    Ok(rendered.into_bytes())
}

fn check_escaped(template: &str) -> Result<(), BuildError> {
    for capture in EXPRESSION.captures_iter(template) {
        let expression = capture.get(1).map_or("", |m| m.as_str());
        if !is_escaped_expression(expression) {
            return Err(BuildError::UnescapedField(expression.to_string()));
        }
    }
    Ok(())
}

fn is_escaped_expression(expression: &str) -> bool {
    if expression.starts_with(['#', '/', '!', '>']) {
        return true;
    }
    if expression == "else" || expression.starts_with("else ") {
        return true;
    }
    expression
        .strip_prefix("json")
        .is_some_and(|rest| rest.starts_with(char::is_whitespace))
}

fn check_bound(context: &Value, document: &Value) -> Result<(), BuildError> {
    let Some(args) = context.get("args").and_then(Value::as_object) else {
        return Ok(());
    };
    let bound = document.get("variables").and_then(Value::as_object);
    for name in args.keys() {
        if !bound.is_some_and(|vars| vars.contains_key(name)) {
            return Err(BuildError::UnboundArgument(name.clone()));
        }
    }
    Ok(())
}

/// Escape text for embedding inside a JSON string literal.
fn escape_json_string(raw: &str) -> String {
    let quoted = Value::String(raw.to_string()).to_string();
    quoted[1..quoted.len() - 1].to_string()
}

fn json_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let param = h
        .param(0)
        .ok_or(RenderErrorReason::ParamNotFoundForIndex("json", 0))?;
    if param.is_value_missing() {
        return Err(RenderErrorReason::Other(format!(
            "json: no value for {}",
            param.relative_path().map_or("parameter", String::as_str)
        ))
        .into());
    }
    out.write(&param.value().to_string())?;
    Ok(())
}

fn build_args_list(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let args = args_param(h, "buildArgsList")?;
    let list = args
        .iter()
        .map(|(name, ty)| format!("${name}: {}", ty.as_str().unwrap_or_default()))
        .collect::<Vec<_>>()
        .join(", ");
    out.write(&escape_json_string(&list))?;
    Ok(())
}

fn build_arg_vars_list(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let args = args_param(h, "buildArgVarsList")?;
    let list = args
        .keys()
        .map(|name| format!("{name}: ${name}"))
        .collect::<Vec<_>>()
        .join(", ");
    out.write(&escape_json_string(&list))?;
    Ok(())
}

fn args_param<'a>(
    h: &'a Helper,
    helper: &'static str,
) -> Result<&'a serde_json::Map<String, Value>, RenderErrorReason> {
    h.param(0)
        .ok_or(RenderErrorReason::ParamNotFoundForIndex(helper, 0))?
        .value()
        .as_object()
        .ok_or_else(|| RenderErrorReason::Other(format!("{helper}: argument map expected")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct TestVariables {
        #[serde(flatten)]
        query: GraphQLQuery,
        org_id: String,
        name: String,
    }

    const TEST_TEMPLATE: &str = r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "name": {{json name}}
}{{/inline}}"#;

    fn test_variables() -> TestVariables {
        TestVariables {
            query: GraphQLQuery::mutation("addThing")
                .arg("orgId", "String!")
                .arg("name", "String!")
                .returns(["uuid", "owner { id }"]),
            org_id: "org-1".to_string(),
            name: "a \"quoted\" name".to_string(),
        }
    }

    fn render(template: &str, vars: &TestVariables) -> Result<Value, BuildError> {
        let body = build_request_body(template, vars, None)?;
        Ok(serde_json::from_slice(&body).unwrap())
    }

    fn tokens(list: &str) -> HashSet<String> {
        list.split(", ").map(str::to_string).collect()
    }

    #[test]
    fn test_renders_document() {
        let body = render(TEST_TEMPLATE, &test_variables()).unwrap();
        let query = body["query"].as_str().unwrap();

        assert!(query.starts_with("mutation ("));
        assert!(query.contains("addThing("));
        assert!(query.contains("uuid owner { id }"));
        assert_eq!(body["variables"]["orgId"], "org-1");
        assert_eq!(body["variables"]["name"], "a \"quoted\" name");
    }

    #[test]
    fn test_argument_lists_are_token_sets() {
        let body = render(TEST_TEMPLATE, &test_variables()).unwrap();
        let query = body["query"].as_str().unwrap();

        let decl = &query[query.find('(').unwrap() + 1..query.find(')').unwrap()];
        assert_eq!(
            tokens(decl),
            tokens("$orgId: String!, $name: String!"),
        );

        let call_start = query.find("addThing(").unwrap() + "addThing(".len();
        let call_end = call_start + query[call_start..].find(')').unwrap();
        assert_eq!(
            tokens(&query[call_start..call_end]),
            tokens("orgId: $orgId, name: $name"),
        );
    }

    #[test]
    fn test_query_without_arguments() {
        #[derive(Serialize)]
        struct NoArgs {
            #[serde(flatten)]
            query: GraphQLQuery,
        }
        let vars = NoArgs {
            query: GraphQLQuery::query("me").returns(["id", "email"]),
        };
        let body = build_request_body(r#"{{#*inline "vars"}}{}{{/inline}}"#, &vars, None).unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["query"], "query { me { id email } }");
        assert_eq!(body["variables"], serde_json::json!({}));
    }

    #[test]
    fn test_unescaped_field_rejected() {
        let template = r#"{{#*inline "vars"}}{"orgId": "{{orgId}}", "name": {{json name}}}{{/inline}}"#;
        let err = render(template, &test_variables()).unwrap_err();
        assert!(matches!(err, BuildError::UnescapedField(ref expr) if expr == "orgId"));
    }

    #[test]
    fn test_triple_stash_rejected() {
        let template = r#"{{#*inline "vars"}}{"orgId": "{{{orgId}}}"}{{/inline}}"#;
        let err = render(template, &test_variables()).unwrap_err();
        assert!(matches!(err, BuildError::UnescapedField(_)));
    }

    #[test]
    fn test_parse_error() {
        let template = r#"{{#*inline "vars"}}{"orgId": {{json orgId}}"#;
        let err = render(template, &test_variables()).unwrap_err();
        assert!(matches!(err, BuildError::Parse(_)));
    }

    #[test]
    fn test_missing_field_is_render_error() {
        let template = r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "name": {{json missingField}}
}{{/inline}}"#;
        let err = render(template, &test_variables()).unwrap_err();
        assert!(matches!(err, BuildError::Render(_)));
    }

    #[test]
    fn test_missing_vars_block_is_render_error() {
        let err = render("", &test_variables()).unwrap_err();
        assert!(matches!(err, BuildError::Render(_)));
    }

    #[test]
    fn test_unbound_argument() {
        let template = r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}}
}{{/inline}}"#;
        let err = render(template, &test_variables()).unwrap_err();
        assert!(matches!(err, BuildError::UnboundArgument(ref name) if name == "name"));
    }

    #[test]
    fn test_extra_helper() {
        fn upper(
            h: &Helper,
            _: &Handlebars,
            _: &Context,
            _: &mut RenderContext,
            out: &mut dyn Output,
        ) -> HelperResult {
            let value = h.param(0).and_then(|p| p.value().as_str()).unwrap_or_default();
            out.write(&Value::String(value.to_uppercase()).to_string())?;
            Ok(())
        }

        let template = r#"{{#*inline "vars"}}{
  "orgId": {{json orgId}},
  "name": {{#upper name}}{{/upper}}
}{{/inline}}"#;
        let helpers: ExtraHelpers = vec![("upper", Box::new(upper))];
        let body = build_request_body(template, &test_variables(), Some(helpers)).unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["variables"]["name"], "A \"QUOTED\" NAME");
    }

    #[test]
    fn test_escape_json_string() {
        assert_eq!(escape_json_string(r#"a "b" \c"#), r#"a \"b\" \\c"#);
        assert_eq!(escape_json_string("line\nbreak"), "line\\nbreak");
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_trace_omits_variable_values() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(captured.clone())
            .finish();

        let mut vars = test_variables();
        vars.name = "hunter2".to_string();
        tracing::subscriber::with_default(subscriber, || render(TEST_TEMPLATE, &vars)).unwrap();

        let logged = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("Rendered GraphQL request body"));
        assert!(logged.contains("addThing"));
        assert!(!logged.contains("hunter2"));
    }
}
