// ABOUTME: Turns a submitted key/value map into a validated settings record
// ABOUTME: Required and choice checks first, then the Graph API version rule

use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashMap};

use crate::form::{FieldKind, FormDescription, FormField};
use crate::types::{fields, PostLoginPath, SettingsRecord};
use crate::validation::{validate_graph_version, FormErrors, ValidationError};

/// Raw submitted values keyed by field name
pub type Submission = Map<String, Value>;

/// Validate `submission` against `form` and build the record to persist.
///
/// Required fields and multi-select choices are checked first; when any of
/// them fail the Graph API version is not looked at. Read-only fields in the
/// submission are ignored.
pub fn process_submission(
    form: &FormDescription,
    submission: &Submission,
) -> Result<SettingsRecord, FormErrors> {
    let mut errors = FormErrors::new();
    let mut values = Values::default();

    for field in form.fields().filter(|f| !f.disabled) {
        let raw = submission.get(field.name);
        match &field.kind {
            FieldKind::Textfield { .. } | FieldKind::Number { .. } => {
                match text_value(field, raw) {
                    Ok(text) => {
                        if field.required && text.trim().is_empty() {
                            errors.set_error(field.name, ValidationError::Required(field.title.to_string()));
                        }
                        values.text.insert(field.name, text);
                    }
                    Err(e) => errors.set_error(field.name, e),
                }
            }
            FieldKind::Checkbox { .. } => match checkbox_value(field, raw) {
                Ok(checked) => {
                    values.flags.insert(field.name, checked);
                }
                Err(e) => errors.set_error(field.name, e),
            },
            FieldKind::Checkboxes { .. } => match selected_options(field, raw) {
                Ok(selected) => values.selected = selected,
                Err(e) => errors.set_error(field.name, e),
            },
            FieldKind::Message { .. } => {}
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let record = values.into_record();
    if let Err(e) = validate_graph_version(&record.graph_version) {
        errors.set_error(fields::GRAPH_VERSION, e);
        return Err(errors);
    }

    Ok(record)
}

#[derive(Default)]
struct Values {
    text: HashMap<&'static str, String>,
    flags: HashMap<&'static str, bool>,
    selected: BTreeSet<String>,
}

impl Values {
    fn into_record(mut self) -> SettingsRecord {
        let mut take = |name: &str| self.text.remove(name).unwrap_or_default();
        SettingsRecord {
            app_id: take(fields::APP_ID),
            app_secret: take(fields::APP_SECRET),
            graph_version: take(fields::GRAPH_VERSION),
            post_login_path: PostLoginPath::from(take(fields::POST_LOGIN_PATH)),
            redirect_user_form: self.flags.get(fields::REDIRECT_USER_FORM).copied().unwrap_or(false),
            disable_admin_login: self.flags.get(fields::DISABLE_ADMIN_LOGIN).copied().unwrap_or(false),
            disabled_roles: self.selected,
        }
    }
}

fn text_value(field: &FormField, raw: Option<&Value>) -> Result<String, ValidationError> {
    match raw {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        // Numbers are refused: 2.10 would arrive as 2.1
        Some(_) => Err(ValidationError::InvalidType {
            field: field.name.to_string(),
            expected: "text",
        }),
    }
}

/// Checkboxes submit as booleans, 0/1, or their string forms; absent means unchecked
fn checkbox_value(field: &FormField, raw: Option<&Value>) -> Result<bool, ValidationError> {
    let invalid = || ValidationError::InvalidType {
        field: field.name.to_string(),
        expected: "a checkbox value",
    };

    match raw {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(Value::Number(n)) => match n.as_u64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(invalid()),
        },
        Some(Value::String(s)) => match s.as_str() {
            "" | "0" | "false" => Ok(false),
            "1" | "true" => Ok(true),
            _ => Err(invalid()),
        },
        Some(_) => Err(invalid()),
    }
}

/// Accepts either a list of ids or a map of id to id-or-falsy
fn selected_options(field: &FormField, raw: Option<&Value>) -> Result<BTreeSet<String>, ValidationError> {
    let ids: Vec<String> = match raw {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(id) => Ok(id.clone()),
                _ => Err(ValidationError::InvalidType {
                    field: field.name.to_string(),
                    expected: "a list of role ids",
                }),
            })
            .collect::<Result<_, _>>()?,
        Some(Value::Object(map)) => map
            .iter()
            .filter(|(_, checked)| is_checked(checked))
            .map(|(id, _)| id.clone())
            .collect(),
        Some(_) => {
            return Err(ValidationError::InvalidType {
                field: field.name.to_string(),
                expected: "a list of role ids",
            })
        }
    };

    let allowed = field.option_ids();
    if let Some(illegal) = ids.iter().find(|id| !allowed.contains(&id.as_str())) {
        return Err(ValidationError::IllegalChoice(illegal.clone()));
    }

    Ok(ids.into_iter().collect())
}

fn is_checked(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::Number(n) => n.as_u64() != Some(0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        _ => true,
    }
}
