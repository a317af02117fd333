// ABOUTME: Facebook social login settings
// ABOUTME: Settings record, form description, validation, and the form controller

pub mod context;
pub mod controller;
pub mod form;
pub mod submission;
pub mod types;
pub mod validation;

pub use context::{ContextError, RequestContext, RoleProvider, StaticRoleProvider};
pub use controller::{SettingsForm, SettingsFormError, SubmitOutcome};
pub use form::{build_form, FieldKind, FormDescription, FormField, FormSection};
pub use submission::{process_submission, Submission};
pub use types::*;
pub use validation::{validate_graph_version, FieldError, FormErrors, ValidationError};
