// ABOUTME: Type definitions for the Facebook login settings
// ABOUTME: The persisted settings record and its field names

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use social_auth_storage::{ConfigObject, ConfigData, StorageResult};

/// Name of the configuration object holding the settings
pub const CONFIG_NAME: &str = "social_auth_facebook.settings";

/// Roles every installation defines; never offered in the disable list
pub const BUILTIN_ROLES: [&str; 2] = ["anonymous", "authenticated"];

/// Sentinel path meaning "the site front page"
pub const FRONT_PAGE: &str = "<front>";

pub mod fields {
    pub const APP_ID: &str = "app_id";
    pub const APP_SECRET: &str = "app_secret";
    pub const GRAPH_VERSION: &str = "graph_version";
    pub const OAUTH_REDIRECT_URL: &str = "oauth_redirect_url";
    pub const APP_DOMAINS: &str = "app_domains";
    pub const SITE_URL: &str = "site_url";
    pub const POST_LOGIN_PATH: &str = "post_login_path";
    pub const REDIRECT_USER_FORM: &str = "redirect_user_form";
    pub const DISABLE_ADMIN_LOGIN: &str = "disable_admin_login";
    pub const DISABLED_ROLES: &str = "disabled_roles";
}

/// Where users land after a successful login
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PostLoginPath {
    #[default]
    FrontPage,
    Path(String),
}

impl PostLoginPath {
    pub fn as_str(&self) -> &str {
        match self {
            PostLoginPath::FrontPage => FRONT_PAGE,
            PostLoginPath::Path(path) => path,
        }
    }
}

impl From<String> for PostLoginPath {
    fn from(value: String) -> Self {
        if value == FRONT_PAGE {
            PostLoginPath::FrontPage
        } else {
            PostLoginPath::Path(value)
        }
    }
}

impl From<&str> for PostLoginPath {
    fn from(value: &str) -> Self {
        PostLoginPath::from(value.to_string())
    }
}

impl From<PostLoginPath> for String {
    fn from(value: PostLoginPath) -> Self {
        match value {
            PostLoginPath::FrontPage => FRONT_PAGE.to_string(),
            PostLoginPath::Path(path) => path,
        }
    }
}

impl fmt::Display for PostLoginPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted Facebook login settings.
///
/// Missing keys fall back to their defaults, so a record that was never saved
/// loads as [`SettingsRecord::default`].
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsRecord {
    pub app_id: String,
    pub app_secret: String,
    pub graph_version: String,
    pub post_login_path: PostLoginPath,
    pub redirect_user_form: bool,
    pub disable_admin_login: bool,
    #[serde(deserialize_with = "null_as_empty")]
    pub disabled_roles: BTreeSet<String>,
}

impl SettingsRecord {
    pub fn from_config(config: &ConfigObject) -> StorageResult<Self> {
        Self::from_data(config.data())
    }

    pub fn from_data(data: &ConfigData) -> StorageResult<Self> {
        Ok(serde_json::from_value(serde_json::Value::Object(data.clone()))?)
    }

    /// Stage every field on `config`; nothing is written until the caller saves.
    pub fn apply_to(&self, config: &mut ConfigObject) {
        config
            .set(fields::APP_ID, self.app_id.as_str())
            .set(fields::APP_SECRET, self.app_secret.as_str())
            .set(fields::GRAPH_VERSION, self.graph_version.as_str())
            .set(fields::POST_LOGIN_PATH, self.post_login_path.as_str())
            .set(fields::REDIRECT_USER_FORM, self.redirect_user_form)
            .set(fields::DISABLE_ADMIN_LOGIN, self.disable_admin_login)
            .set(
                fields::DISABLED_ROLES,
                self.disabled_roles.iter().cloned().collect::<Vec<_>>(),
            );
    }

    pub fn is_role_disabled(&self, role: &str) -> bool {
        self.disabled_roles.contains(role)
    }
}

impl fmt::Debug for SettingsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secret = if self.app_secret.is_empty() { "" } else { "[redacted]" };
        f.debug_struct("SettingsRecord")
            .field("app_id", &self.app_id)
            .field("app_secret", &secret)
            .field("graph_version", &self.graph_version)
            .field("post_login_path", &self.post_login_path)
            .field("redirect_user_form", &self.redirect_user_form)
            .field("disable_admin_login", &self.disable_admin_login)
            .field("disabled_roles", &self.disabled_roles)
            .finish()
    }
}

// Absent, null and [] all mean "no disabled roles"
fn null_as_empty<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<BTreeSet<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// An assignable user role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub label: String,
}

impl Role {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    pub fn is_builtin(&self) -> bool {
        BUILTIN_ROLES.contains(&self.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn data(value: serde_json::Value) -> ConfigData {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_empty_data_yields_defaults() {
        let record = SettingsRecord::from_data(&ConfigData::new()).unwrap();
        assert_eq!(record, SettingsRecord::default());
        assert_eq!(record.post_login_path, PostLoginPath::FrontPage);
        assert!(!record.redirect_user_form);
        assert!(!record.disable_admin_login);
    }

    #[test]
    fn test_null_and_missing_roles_are_empty() {
        let record = SettingsRecord::from_data(&data(json!({"disabled_roles": null}))).unwrap();
        assert!(record.disabled_roles.is_empty());

        let record = SettingsRecord::from_data(&data(json!({"disabled_roles": []}))).unwrap();
        assert!(record.disabled_roles.is_empty());
    }

    #[test]
    fn test_post_login_path_sentinel() {
        assert_eq!(PostLoginPath::from("<front>"), PostLoginPath::FrontPage);
        assert_eq!(
            PostLoginPath::from("user/welcome"),
            PostLoginPath::Path("user/welcome".to_string())
        );
        assert_eq!(String::from(PostLoginPath::FrontPage), "<front>");

        let record = SettingsRecord::from_data(&data(json!({"post_login_path": "node/1"}))).unwrap();
        assert_eq!(record.post_login_path.as_str(), "node/1");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let record = SettingsRecord {
            app_secret: "s3cr3t".to_string(),
            ..SettingsRecord::default()
        };
        let rendered = format!("{:?}", record);
        assert!(!rendered.contains("s3cr3t"));
        assert!(rendered.contains("[redacted]"));
    }

    #[test]
    fn test_is_role_disabled() {
        let record = SettingsRecord {
            disabled_roles: BTreeSet::from(["editor".to_string()]),
            ..SettingsRecord::default()
        };
        assert!(record.is_role_disabled("editor"));
        assert!(!record.is_role_disabled("administrator"));
    }

    #[test]
    fn test_builtin_roles() {
        assert!(Role::new("anonymous", "Anonymous user").is_builtin());
        assert!(Role::new("authenticated", "Authenticated user").is_builtin());
        assert!(!Role::new("administrator", "Administrator").is_builtin());
    }
}
