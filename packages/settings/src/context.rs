// ABOUTME: Collaborators injected into the settings form
// ABOUTME: Request context (host and base URL) and the role-listing provider

use thiserror::Error;
use url::Url;

use crate::types::Role;

/// Path Facebook redirects back to after authorization
pub const OAUTH_CALLBACK_PATH: &str = "/user/login/facebook/callback";

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Base URL has no host: {0}")]
    MissingHost(String),
}

/// Host and base URL of the request being served
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    base_url: String,
    host: String,
}

impl RequestContext {
    pub fn new(base_url: impl Into<String>, host: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            host: host.into(),
        }
    }

    /// Derive the host from the base URL itself.
    pub fn from_base_url(base_url: &str) -> Result<Self, ContextError> {
        let parsed = Url::parse(base_url)?;
        let host = parsed
            .host_str()
            .ok_or_else(|| ContextError::MissingHost(base_url.to_string()))?
            .to_string();
        Ok(Self::new(base_url, host))
    }

    pub fn from_config(config: &social_auth_config::Config) -> Result<Self, ContextError> {
        Self::from_base_url(&config.base_url)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn oauth_redirect_url(&self) -> String {
        format!("{}{}", self.base_url, OAUTH_CALLBACK_PATH)
    }
}

/// Lists the roles defined on the site, in display order
pub trait RoleProvider: Send + Sync {
    fn list_roles(&self) -> Vec<Role>;
}

/// Fixed role list, for hosts that know their roles up front
#[derive(Debug, Clone, Default)]
pub struct StaticRoleProvider {
    roles: Vec<Role>,
}

impl StaticRoleProvider {
    pub fn new(roles: Vec<Role>) -> Self {
        Self { roles }
    }
}

impl RoleProvider for StaticRoleProvider {
    fn list_roles(&self) -> Vec<Role> {
        self.roles.clone()
    }
}
