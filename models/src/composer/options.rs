use crate::ErrorLocation;
use crate::error::model_error::ModelError;

use std::panic::Location;

use serde::Serialize;

/// Branch used when the caller does not name one.
pub const DEFAULT_BRANCH: &str = "main";

/// Model used when the caller does not name one.
pub const DEFAULT_MODEL: &str = "claude-4-sonnet-thinking";

/// Caller intent for a new background composer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComposerOptions {
    task_description: String,
    repository_url: String,
    branch: Option<String>,
    model: Option<String>,
}

impl CreateComposerOptions {
    pub fn task_description(&self) -> &str {
        &self.task_description
    }

    pub fn repository_url(&self) -> &str {
        &self.repository_url
    }

    pub fn branch(&self) -> &str {
        self.branch.as_deref().unwrap_or(DEFAULT_BRANCH)
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }
}

/// Builder for creating validated CreateComposerOptions instances.
///
/// Blank optional values are treated as absent so the defaults apply.
#[derive(Debug, Default)]
pub struct CreateComposerOptionsBuilder {
    task_description: Option<String>,
    repository_url: Option<String>,
    branch: Option<String>,
    model: Option<String>,
}

impl CreateComposerOptionsBuilder {
    pub fn with_task_description(mut self, task: impl Into<String>) -> Self {
        self.task_description = Some(task.into());
        self
    }

    pub fn with_repository_url(mut self, url: impl Into<String>) -> Self {
        self.repository_url = Some(url.into());
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Build the options with validation.
    #[track_caller]
    pub fn build(self) -> Result<CreateComposerOptions, ModelError> {
        let task_description = self.task_description.ok_or_else(|| ModelError::Validation {
            message: String::from("Task description is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if task_description.trim().is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Task description cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let repository_url = self.repository_url.ok_or_else(|| ModelError::Validation {
            message: String::from("Repository URL is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let repository_url = repository_url.trim().to_string();

        if repository_url.is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Repository URL cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if !repository_url.starts_with("http://") && !repository_url.starts_with("https://") {
            return Err(ModelError::Validation {
                message: format!("Invalid repository URL format: {repository_url}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(CreateComposerOptions {
            task_description,
            repository_url,
            branch: non_blank(self.branch),
            model: non_blank(self.model),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
