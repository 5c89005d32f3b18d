use crate::error::tool::ToolError;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const CREATE_COMPOSER_TEMPLATE: &str = "create-composer-template";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskType {
    BugFix,
    Feature,
    Refactor,
    Documentation,
    Testing,
    Custom,
}

impl TaskType {
    pub fn prefix(self) -> &'static str {
        match self {
            TaskType::BugFix => "Fix the following bug:",
            TaskType::Feature => "Implement the following feature:",
            TaskType::Refactor => "Refactor the code to:",
            TaskType::Documentation => "Add or update documentation for:",
            TaskType::Testing => "Add tests for:",
            TaskType::Custom => "Custom task:",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Urgent => "URGENT",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateArgs {
    pub task_type: TaskType,
    pub description: String,
    pub priority: Option<Priority>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PromptArgument {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PromptDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub arguments: Vec<PromptArgument>,
}

/// A single user-role message carrying the rendered prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptMessage {
    pub role: &'static str,
    pub text: String,
}

pub fn definitions() -> Vec<PromptDefinition> {
    vec![PromptDefinition {
        name: CREATE_COMPOSER_TEMPLATE,
        description: "Template for creating a background composer with common task patterns",
        arguments: vec![
            PromptArgument {
                name: "taskType",
                description: "Type of task (bug-fix, feature, refactor, documentation, testing, custom)",
                required: true,
            },
            PromptArgument {
                name: "description",
                description: "Specific task description",
                required: true,
            },
            PromptArgument {
                name: "priority",
                description: "Task priority (low, medium, high, urgent)",
                required: false,
            },
        ],
    }]
}

/// `"<prefix> <description>"`, plus `"\n\nPriority: <LEVEL>"` when a priority is given.
pub fn render_template(args: &TemplateArgs) -> String {
    let mut text = format!("{} {}", args.task_type.prefix(), args.description);
    if let Some(priority) = args.priority {
        text.push_str(&format!("\n\nPriority: {}", priority.label()));
    }
    text
}

pub fn get_prompt(name: &str, arguments: Value) -> Result<PromptMessage, ToolError> {
    if name != CREATE_COMPOSER_TEMPLATE {
        return Err(ToolError::unknown_prompt(name));
    }

    let args: TemplateArgs = super::decode_arguments(arguments)?;

    Ok(PromptMessage {
        role: "user",
        text: render_template(&args),
    })
}
