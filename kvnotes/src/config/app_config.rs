use serde::{Deserialize, Serialize};
use crate::lib_constants::{DEFAULT_LOGIN_URL, DEFAULT_TABLE_NAME, DEFAULT_USER_HEADER};

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub table: TableConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableBackend {
    #[default]
    Memory,
    DynamoDb,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TableConfig {
    #[serde(default)]
    pub backend: TableBackend,

    #[serde(default = "table_config_default_name")]
    pub name: String,

    /// Overrides the service endpoint, e.g. for DynamoDB Local.
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SessionConfig {
    /// Request header the authenticating proxy puts the user id into.
    #[serde(default = "session_config_default_user_header")]
    pub user_header: String,

    #[serde(default = "session_config_default_login_url")]
    pub login_url: String,
}

pub fn table_config_default_name() -> String {
    DEFAULT_TABLE_NAME.into()
}

pub fn session_config_default_user_header() -> String {
    DEFAULT_USER_HEADER.into()
}

pub fn session_config_default_login_url() -> String {
    DEFAULT_LOGIN_URL.into()
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            backend: TableBackend::default(),
            name: table_config_default_name(),
            endpoint_url: None,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            user_header: session_config_default_user_header(),
            login_url: session_config_default_login_url(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_json_eq;

    #[test]
    fn app_config_defaults_match() {
        assert_eq!(
            AppConfig::default(),
            serde_json::de::from_str("{}").unwrap(),
        )
    }

    #[test]
    fn table_config_defaults_match() {
        assert_eq!(
            TableConfig::default(),
            serde_json::de::from_str("{}").unwrap(),
        )
    }

    #[test]
    fn app_config_serialized_form() {
        assert_json_eq!(
            AppConfig::default(),
            r#"{
                "table": { "backend": "memory", "name": "note", "endpoint_url": null },
                "session": { "user_header": "X-Forwarded-User", "login_url": "/login" }
            }"#,
        );
    }

    #[test]
    fn backend_names() {
        let backend: TableBackend = serde_json::from_str("\"dynamodb\"").unwrap();
        assert_eq!(backend, TableBackend::DynamoDb);
    }
}
