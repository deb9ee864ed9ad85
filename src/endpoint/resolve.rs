//! Positional argument resolution.
//!
//! Create and update take `[BASE_PATH|API_NAME] API_PATH API_VERB ACTION`; the optional
//! leading token is recognised by arity (four tokens) and classified by its first
//! character. Get, delete and list take `BASE_PATH|API_NAME [API_PATH [API_VERB]]`.
//! Resolution never performs I/O.

use crate::config::ClientConfig;
use crate::endpoint::model::{
    ActionRef, EndpointDefinition, EndpointFields, EndpointQuery, EndpointSelector,
    EndpointSource, BACKEND_METHOD,
};
use crate::endpoint::name::QualifiedName;
use crate::endpoint::verb::{has_path_prefix, validate_relative_path, validate_verb};
use crate::error::{ComposedError, DisplayFlags, ErrorKind, ExitCode};
use tracing::debug;

/// Inclusive bounds on the number of positional arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    pub min: usize,
    pub max: usize,
}

impl Arity {
    pub const DEFINITION: Arity = Arity { min: 3, max: 4 };
    pub const GET: Arity = Arity { min: 1, max: 1 };
    pub const DELETE: Arity = Arity { min: 1, max: 3 };
    pub const LIST: Arity = Arity { min: 0, max: 3 };
}

pub const DEFINITION_HINT: &str =
    "Specify a swagger file or specify an API base path with an API path, an API verb, and an action name.";
pub const GET_HINT: &str = "An API base path or API name is required.";
pub const DELETE_HINT: &str =
    "An API base path or API name is required.  An optional API relative path and operation may also be provided.";
pub const LIST_HINT: &str =
    "Optional parameters are: API base path (or API name), API relative path and operation.";

/// Named flags that feed a definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefinitionFlags {
    pub api_name: Option<String>,
}

pub fn check_arity(
    args: &[String],
    arity: Arity,
    command: &str,
    hint: &str,
) -> Result<(), ComposedError> {
    if args.len() < arity.min {
        debug!(command, given = args.len(), min = arity.min, "Not enough arguments");
        return Err(ComposedError::usage(format!(
            "{}: not enough arguments. {}",
            command, hint
        )));
    }
    if args.len() > arity.max {
        debug!(command, given = args.len(), max = arity.max, "Too many arguments");
        return Err(ComposedError::usage(format!(
            "{}: too many arguments ({}). {}",
            command,
            args[arity.max..].join(", "),
            hint
        )));
    }
    Ok(())
}

/// Build a field-sourced definition from create/update arguments.
pub fn resolve_definition(
    command: &str,
    args: &[String],
    flags: &DefinitionFlags,
    config: &ClientConfig,
) -> Result<EndpointDefinition, ComposedError> {
    check_arity(args, Arity::DEFINITION, command, DEFINITION_HINT)?;

    // Four tokens: the first is an explicit base path or API name; shift it off so the
    // remainder is always [API_PATH, API_VERB, ACTION?].
    let (leading, rest) = if args.len() == Arity::DEFINITION.max {
        (Some(args[0].as_str()), &args[1..])
    } else {
        (None, args)
    };
    let leading_is_name = leading.is_some_and(|token| !has_path_prefix(token));
    if let Some(token) = leading.filter(|_| leading_is_name) {
        debug!(token, "Treating leading argument as an API name; it does not begin with '/'");
    }

    let relative_path = &rest[0];
    validate_relative_path(relative_path)?;
    let verb = validate_verb(&rest[1])?;
    let action = rest
        .get(2)
        .map(|token| resolve_action(token, config))
        .transpose()?;

    let flag_name = flags.api_name.as_deref().filter(|name| !name.is_empty());
    if flag_name.is_some() && leading_is_name {
        debug!(?leading, ?flag_name, "API name given both as an argument and as a flag");
        return Err(ComposedError::validation(
            "An API name can only be specified once.",
        ));
    }

    let namespace = config.namespace().to_string();
    let (base_path, api_name, id) = match leading {
        Some(name) if leading_is_name => ("/".to_string(), Some(name.to_string()), None),
        Some(base_path) => (
            base_path.to_string(),
            flag_name.map(str::to_string),
            Some(format!("API:{}:{}", namespace, base_path)),
        ),
        None => ("/".to_string(), flag_name.map(str::to_string), None),
    };

    let fields = EndpointFields {
        base_path,
        relative_path: relative_path.clone(),
        verb,
        action,
        api_name,
        id,
    };
    debug!(?fields, "Parsed API definition");

    Ok(EndpointDefinition {
        namespace,
        source: EndpointSource::Fields(fields),
    })
}

/// Resolve a possibly qualified action name and derive its backend invocation URL.
pub fn resolve_action(token: &str, config: &ClientConfig) -> Result<ActionRef, ComposedError> {
    let qualified = QualifiedName::parse(token, config.namespace()).map_err(|e| {
        debug!(token, error = %e, "Failed to parse qualified name");
        ComposedError::wrap(
            ErrorKind::Validation(format!("'{}' is not a valid action name: {}", token, e)),
            e,
            ExitCode::General,
            DisplayFlags::message_and_usage(),
        )
    })?;
    if qualified.name.is_empty() {
        debug!(token, "Action name is empty");
        return Err(ComposedError::validation(format!(
            "'{}' is not a valid action name.",
            token
        )));
    }

    let backend_url = format!(
        "https://{}/api/v1/namespaces/{}/actions/{}",
        config.host(),
        qualified.namespace,
        qualified.entity_path()
    );
    Ok(ActionRef {
        namespace: qualified.namespace,
        package: qualified.package,
        name: qualified.name,
        backend_url,
        backend_method: BACKEND_METHOD.to_string(),
    })
}

/// Build a query from `BASE_PATH|API_NAME [API_PATH [API_VERB]]`.
pub fn resolve_query(
    command: &str,
    args: &[String],
    arity: Arity,
    hint: &str,
) -> Result<EndpointQuery, ComposedError> {
    check_arity(args, arity, command, hint)?;

    let mut tokens = args.iter();
    let selector = tokens.next().map(|token| EndpointSelector::from_token(token));
    if let Some(EndpointSelector::Name(name)) = &selector {
        debug!(name = %name, "Treating selector as an API name; it does not begin with '/'");
    }
    let relative_path = tokens
        .next()
        .map(|token| validate_relative_path(token).map(|_| token.clone()))
        .transpose()?;
    let verb = tokens.next().map(|token| validate_verb(token)).transpose()?;

    Ok(EndpointQuery {
        selector,
        relative_path,
        verb,
    })
}

pub fn resolve_get_query(args: &[String]) -> Result<EndpointQuery, ComposedError> {
    resolve_query("Api get", args, Arity::GET, GET_HINT)
}

pub fn resolve_delete_query(args: &[String]) -> Result<EndpointQuery, ComposedError> {
    resolve_query("Api delete", args, Arity::DELETE, DELETE_HINT)
}

pub fn resolve_list_query(args: &[String]) -> Result<EndpointQuery, ComposedError> {
    resolve_query("Api list", args, Arity::LIST, LIST_HINT)
}
