//! Follow-up action submissions.
//!
//! An `action_required` outcome names the endpoint, the method, and the
//! fields the server wants. `ActionRequest` collects the user's values for
//! exactly those fields before anything is sent.

use thiserror::Error;

use crate::outcome::ApprovalOutcome;

/// Invalid construction of an [`ActionRequest`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionFieldError {
    /// The field was not listed in the server's `action_fields`.
    #[error("field {0:?} was not requested by the approval server")]
    Undeclared(String),

    /// The outcome is not `action_required`.
    #[error("outcome {0} does not request an action")]
    NotActionRequired(&'static str),
}

/// Values for a follow-up action, keyed by the server-declared field names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    action_url: String,
    action_method: String,
    declared: Vec<String>,
    values: Vec<(String, String)>,
}

impl ActionRequest {
    /// Start a request for the action named by an `action_required` outcome.
    pub fn from_outcome(outcome: &ApprovalOutcome) -> Result<Self, ActionFieldError> {
        match outcome {
            ApprovalOutcome::ActionRequired {
                action_url,
                action_method,
                action_fields,
                ..
            } => Ok(Self {
                action_url: action_url.clone(),
                action_method: action_method.clone(),
                declared: action_fields.clone().unwrap_or_default(),
                values: Vec::new(),
            }),
            other => Err(ActionFieldError::NotActionRequired(other.kind())),
        }
    }

    /// Supply a value for a declared field. A repeated name replaces the
    /// earlier value.
    pub fn with_field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, ActionFieldError> {
        let name = name.into();
        if !self.declared.iter().any(|d| *d == name) {
            return Err(ActionFieldError::Undeclared(name));
        }
        let value = value.into();
        match self.values.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name, value)),
        }
        Ok(self)
    }

    /// Declared fields that have no value yet, in declaration order.
    pub fn missing_fields(&self) -> Vec<&str> {
        self.declared
            .iter()
            .filter(|d| !self.values.iter().any(|(n, _)| n == *d))
            .map(String::as_str)
            .collect()
    }

    pub fn action_url(&self) -> &str {
        &self.action_url
    }

    pub fn action_method(&self) -> &str {
        &self.action_method
    }

    /// Supplied values, ordered as the server declared the fields.
    pub fn fields(&self) -> Vec<(&str, &str)> {
        self.declared
            .iter()
            .filter_map(|d| {
                self.values
                    .iter()
                    .find(|(n, _)| n == d)
                    .map(|(n, v)| (n.as_str(), v.as_str()))
            })
            .collect()
    }
}
