// ABOUTME: Settings form controller for Facebook login
// ABOUTME: Loads the stored record, builds the form, validates and persists submissions

use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use social_auth_storage::{ConfigFactory, ConfigStore, StorageError};

use crate::context::{RequestContext, RoleProvider};
use crate::form::{build_form, FormDescription, EDITABLE_CONFIG_NAMES, FORM_ID};
use crate::submission::{process_submission, Submission};
use crate::types::{SettingsRecord, CONFIG_NAME};
use crate::validation::FormErrors;

pub const SAVED_MESSAGE: &str = "The configuration options have been saved.";

#[derive(Debug, Error)]
pub enum SettingsFormError {
    /// The submission was rejected; nothing was written
    #[error(transparent)]
    Invalid(#[from] FormErrors),
    #[error("Settings storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result of an accepted submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub record: SettingsRecord,
    pub message: &'static str,
}

pub struct SettingsForm {
    configs: ConfigFactory,
    request_context: RequestContext,
    roles: Arc<dyn RoleProvider>,
}

impl SettingsForm {
    pub fn new(
        store: Arc<dyn ConfigStore>,
        request_context: RequestContext,
        roles: Arc<dyn RoleProvider>,
    ) -> Self {
        Self {
            configs: ConfigFactory::new(store),
            request_context,
            roles,
        }
    }

    pub fn form_id(&self) -> &'static str {
        FORM_ID
    }

    pub fn editable_config_names(&self) -> &'static [&'static str] {
        &EDITABLE_CONFIG_NAMES
    }

    /// Current settings, or defaults when none were ever saved
    pub async fn load_settings(&self) -> Result<SettingsRecord, SettingsFormError> {
        let config = self.configs.get_editable(CONFIG_NAME).await?;
        Ok(SettingsRecord::from_config(&config)?)
    }

    pub async fn build_form(&self) -> Result<FormDescription, SettingsFormError> {
        let record = self.load_settings().await?;
        Ok(build_form(&record, &self.request_context, &self.roles.list_roles()))
    }

    /// Check a submission without touching storage.
    pub fn validate_form(&self, submission: &Submission) -> Result<SettingsRecord, FormErrors> {
        // Only the declarations and role options matter here, not stored values
        let form = build_form(
            &SettingsRecord::default(),
            &self.request_context,
            &self.roles.list_roles(),
        );
        process_submission(&form, submission)
    }

    /// Validate and, if accepted, replace the stored settings in one save.
    pub async fn submit_form(&self, submission: &Submission) -> Result<SubmitOutcome, SettingsFormError> {
        let record = match self.validate_form(submission) {
            Ok(record) => record,
            Err(errors) => {
                warn!(
                    "Rejected {} submission, invalid fields: {:?}",
                    FORM_ID,
                    errors.field_names()
                );
                return Err(errors.into());
            }
        };

        let mut config = self.configs.get_editable(CONFIG_NAME).await?;
        record.apply_to(&mut config);
        if let Err(e) = config.save().await {
            error!("Failed to save {}: {}", CONFIG_NAME, e);
            return Err(e.into());
        }

        info!(
            "Saved {} (app_id: {}, graph_version: {})",
            CONFIG_NAME, record.app_id, record.graph_version
        );
        Ok(SubmitOutcome {
            record,
            message: SAVED_MESSAGE,
        })
    }
}
