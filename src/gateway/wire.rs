//! JSON bodies exchanged with the route-management service.

use crate::endpoint::model::{EndpointDefinition, EndpointRecord, EndpointSource};
use serde::{Deserialize, Serialize};

/// Create/update request envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiDocRequest {
    pub apidoc: ApiDoc,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDoc {
    pub namespace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_base_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swagger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ApiAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAction {
    pub name: String,
    pub namespace: String,
    pub backend_method: String,
    pub backend_url: String,
    #[serde(rename = "authkey", skip_serializing_if = "Option::is_none")]
    pub auth_key: Option<String>,
}

impl ApiDocRequest {
    /// Document-sourced definitions send only the namespace and the raw document.
    pub fn from_definition(definition: &EndpointDefinition, auth_key: Option<&str>) -> Self {
        let apidoc = match &definition.source {
            EndpointSource::Document(raw) => ApiDoc {
                namespace: definition.namespace.clone(),
                swagger: Some(raw.clone()),
                ..ApiDoc::default()
            },
            EndpointSource::Fields(fields) => ApiDoc {
                namespace: definition.namespace.clone(),
                api_name: fields.api_name.clone(),
                gateway_base_path: Some(fields.base_path.clone()),
                gateway_path: Some(fields.relative_path.clone()),
                gateway_method: Some(fields.verb.as_str().to_string()),
                id: fields.id.clone(),
                swagger: None,
                action: fields.action.as_ref().map(|action| ApiAction {
                    name: action.entity_path(),
                    namespace: action.namespace.clone(),
                    backend_method: action.backend_method.clone(),
                    backend_url: action.backend_url.clone(),
                    auth_key: auth_key.map(str::to_string),
                }),
            },
        };
        Self { apidoc }
    }
}

/// Query response: `{"apis": [{"id", "key", "value": record}]}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordList {
    #[serde(default)]
    pub apis: Vec<RecordItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: Option<EndpointRecord>,
}

impl RecordList {
    pub fn into_records(self) -> Vec<EndpointRecord> {
        self.apis.into_iter().filter_map(|item| item.value).collect()
    }
}

/// Error payload returned by the service alongside a failing status.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default)]
    pub code: Option<serde_json::Value>,
}
