use crate::{CreateComposerOptionsBuilder, DEFAULT_BRANCH, DEFAULT_MODEL, ModelError};

fn valid_builder() -> CreateComposerOptionsBuilder {
    CreateComposerOptionsBuilder::default()
        .with_task_description("Add a README")
        .with_repository_url("https://github.com/acme/widgets.git")
}

/// **VALUE**: Verifies omitted branch and model fall back to the fixed defaults.
///
/// **WHY THIS MATTERS**: The create payload always needs a ref and a model name.
/// Callers (CLI, tools) routinely omit both.
///
/// **BUG THIS CATCHES**: Would catch defaults drifting or blank strings being sent.
#[test]
fn given_no_branch_or_model_when_building_then_defaults_apply() {
    let options = valid_builder().build().unwrap();

    assert_eq!(options.branch(), DEFAULT_BRANCH);
    assert_eq!(options.model(), DEFAULT_MODEL);
    assert_eq!(options.branch(), "main");
}

#[test]
fn given_blank_branch_when_building_then_treated_as_absent() {
    let options = valid_builder().with_branch("  ").with_model("gpt-5").build().unwrap();

    assert_eq!(options.branch(), "main");
    assert_eq!(options.model(), "gpt-5");
}

#[test]
fn given_missing_task_when_building_then_returns_validation_error() {
    let result = CreateComposerOptionsBuilder::default()
        .with_repository_url("https://github.com/acme/widgets")
        .build();

    match result.unwrap_err() {
        ModelError::Validation { message, .. } => {
            assert_eq!(message, "Task description is required");
        }
    }
}

#[test]
fn given_blank_task_when_building_then_returns_validation_error() {
    let result = valid_builder().with_task_description("   ").build();

    assert_eq!(result.unwrap_err().message(), "Task description cannot be empty");
}

/// **VALUE**: Verifies non-http repository URLs are rejected before any payload is built.
///
/// **WHY THIS MATTERS**: The payload builder strips an http(s) prefix. An ssh-style URL
/// would pass through untouched and produce a snapshot name the remote cannot resolve.
///
/// **BUG THIS CATCHES**: Would catch the scheme check being removed.
#[test]
fn given_ssh_repository_url_when_building_then_returns_validation_error() {
    let result = valid_builder()
        .with_repository_url("git@github.com:acme/widgets.git")
        .build();

    let err = result.unwrap_err();
    assert!(err.message().starts_with("Invalid repository URL format"));
    assert!(err.to_string().contains("Validation Error"));
}
