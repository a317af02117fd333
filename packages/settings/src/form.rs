// ABOUTME: Declarative description of the Facebook settings form
// ABOUTME: Pure mapping from the current record and request context to field descriptors

use serde::Serialize;

use crate::context::RequestContext;
use crate::types::{fields, Role, SettingsRecord, CONFIG_NAME};

pub const FORM_ID: &str = "social_auth_facebook_form";

/// Configuration objects this form edits
pub const EDITABLE_CONFIG_NAMES: [&str; 1] = [CONFIG_NAME];

pub const NO_ROLES_FOUND: &str = "No roles found.";

const FACEBOOK_APPS_URL: &str = "https://developers.facebook.com/apps";
const FACEBOOK_CHANGELOG_URL: &str = "https://developers.facebook.com/docs/apps/changelog";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormDescription {
    pub form_id: &'static str,
    pub config_names: Vec<&'static str>,
    pub sections: Vec<FormSection>,
}

impl FormDescription {
    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields().find(|f| f.name == name)
    }

    pub fn section(&self, key: &str) -> Option<&FormSection> {
        self.sections.iter().find(|s| s.key == key)
    }
}

/// A titled, collapsible group of fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSection {
    pub key: &'static str,
    pub title: &'static str,
    pub description: String,
    pub open: bool,
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub title: &'static str,
    pub description: Option<String>,
    pub required: bool,
    /// Read-only fields are shown for copying and never read back from a submission
    pub disabled: bool,
    #[serde(flatten)]
    pub kind: FieldKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Textfield {
        default_value: String,
    },
    Number {
        default_value: String,
        min: u32,
        step: &'static str,
    },
    Checkbox {
        default_value: bool,
    },
    /// Multi-select; `options` keep the provider's order
    Checkboxes {
        options: Vec<Role>,
        default_value: Vec<String>,
    },
    /// Shown in place of a control that would have nothing to offer
    Message {
        text: &'static str,
    },
}

impl FormField {
    fn new(name: &'static str, title: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            title,
            description: None,
            required: false,
            disabled: false,
            kind,
        }
    }

    fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn read_only(mut self) -> Self {
        self.disabled = true;
        self
    }

    fn text(name: &'static str, title: &'static str, value: &str) -> Self {
        Self::new(
            name,
            title,
            FieldKind::Textfield {
                default_value: value.to_string(),
            },
        )
    }

    fn checkbox(name: &'static str, title: &'static str, value: bool) -> Self {
        Self::new(name, title, FieldKind::Checkbox { default_value: value })
    }

    /// Ids offered by a multi-select field; empty for every other kind
    pub fn option_ids(&self) -> Vec<&str> {
        match &self.kind {
            FieldKind::Checkboxes { options, .. } => options.iter().map(|r| r.id.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}

/// Roles that may be disabled: everything except the built-in ones
pub fn role_options(roles: &[Role]) -> Vec<Role> {
    roles.iter().filter(|r| !r.is_builtin()).cloned().collect()
}

/// Describe the form for `record`. Computed fields always come from `context`.
pub fn build_form(record: &SettingsRecord, context: &RequestContext, roles: &[Role]) -> FormDescription {
    FormDescription {
        form_id: FORM_ID,
        config_names: EDITABLE_CONFIG_NAMES.to_vec(),
        sections: vec![app_section(record, context), module_section(record, roles)],
    }
}

fn app_section(record: &SettingsRecord, context: &RequestContext) -> FormSection {
    FormSection {
        key: "fb_settings",
        title: "Facebook App settings",
        description: format!("You need to first create a Facebook App at {}", FACEBOOK_APPS_URL),
        open: true,
        fields: vec![
            FormField::text(fields::APP_ID, "Application ID", &record.app_id)
                .required()
                .describe("Copy the App ID of your Facebook App here. This value can be found from your App Dashboard."),
            FormField::text(fields::APP_SECRET, "App Secret", &record.app_secret)
                .required()
                .describe("Copy the App Secret of your Facebook App here. This value can be found from your App Dashboard."),
            FormField::new(
                fields::GRAPH_VERSION,
                "Facebook Graph API version",
                FieldKind::Number {
                    default_value: record.graph_version.clone(),
                    min: 0,
                    step: "any",
                },
            )
            .required()
            .describe(format!(
                "Copy the API Version of your Facebook App here. This value can be found from your App Dashboard. More information on API versions can be found at Facebook Platform Changelog ({})",
                FACEBOOK_CHANGELOG_URL
            )),
            FormField::text(
                fields::OAUTH_REDIRECT_URL,
                "Valid OAuth redirect URIs",
                &context.oauth_redirect_url(),
            )
            .read_only()
            .describe("Copy this value to Valid OAuth redirect URIs field of your Facebook App settings."),
            FormField::text(fields::APP_DOMAINS, "App Domains", context.host())
                .read_only()
                .describe("Copy this value to App Domains field of your Facebook App settings."),
            FormField::text(fields::SITE_URL, "Site URL", context.base_url())
                .read_only()
                .describe("Copy this value to Site URL field of your Facebook App settings."),
        ],
    }
}

/// Shows "No roles found." whenever no role is selectable, including when only built-in roles exist.
fn module_section(record: &SettingsRecord, roles: &[Role]) -> FormSection {
    let options = role_options(roles);
    let disabled_roles = if options.is_empty() {
        FormField::new(
            fields::DISABLED_ROLES,
            "Disable FB login for the following roles",
            FieldKind::Message { text: NO_ROLES_FOUND },
        )
    } else {
        FormField::new(
            fields::DISABLED_ROLES,
            "Disable FB login for the following roles",
            FieldKind::Checkboxes {
                options,
                default_value: record.disabled_roles.iter().cloned().collect(),
            },
        )
    };

    FormSection {
        key: "module_settings",
        title: "Simple FB Connect configurations",
        description: "These settings allow you to configure how Simple FB Connect module behaves on your site".to_string(),
        open: true,
        fields: vec![
            FormField::text(
                fields::POST_LOGIN_PATH,
                "Post login path",
                record.post_login_path.as_str(),
            )
            .required()
            .describe("Path where the user should be redirected after successful login. Use <front> to redirect user to your front page."),
            FormField::checkbox(
                fields::REDIRECT_USER_FORM,
                "Redirect new users to the user form",
                record.redirect_user_form,
            )
            .describe("If you check this, new users are redirected to the user form after the user is created. This is useful if you want to encourage users to fill in additional user fields."),
            FormField::checkbox(
                fields::DISABLE_ADMIN_LOGIN,
                "Disable FB login for administrator",
                record.disable_admin_login,
            )
            .describe("Disabling FB login for administrator (user 1) can help protect your site if a security vulnerability is ever discovered in the Facebook SDK or this module."),
            disabled_roles,
        ],
    }
}
