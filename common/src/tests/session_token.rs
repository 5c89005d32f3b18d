use crate::{RedactError, SessionToken};

const RAW_TOKEN: &str = "user_01HZX9Q4%3A%3AeyJhbGciOiJIUzI1NiJ9.secret-part";

/// **VALUE**: Verifies the full token never shows up in Debug or Display output.
///
/// **WHY THIS MATTERS**: Clients log their credential preview at construction and
/// errors may be formatted with `{:?}`. A full token in a log file is a leaked session.
///
/// **BUG THIS CATCHES**: Would catch a derived `Debug` or a Display that prints `inner`.
#[test]
fn given_token_when_formatted_then_only_preview_is_visible() {
    let token = SessionToken::new(RAW_TOKEN).unwrap();

    let debug = format!("{token:?}");
    let display = format!("{token}");

    assert_eq!(display, "user_01H...");
    assert_eq!(debug, "SessionToken(user_01H...)");
    assert!(!debug.contains("secret-part"));
    assert!(!display.contains("secret-part"));
    assert_eq!(token.as_str(), RAW_TOKEN);
    assert_eq!(token.len(), RAW_TOKEN.len());
}

#[test]
fn given_blank_token_when_created_then_returns_empty_error() {
    let result = SessionToken::new("   ");

    assert!(matches!(result, Err(RedactError::Empty { .. })));
}

#[test]
fn given_surrounding_whitespace_when_created_then_token_is_trimmed() {
    let token = SessionToken::new("  abc123\n").unwrap();

    assert_eq!(token.as_str(), "abc123");
    assert_eq!(token.preview(), "abc123...");
}

/// **VALUE**: Verifies serialization of the token is refused.
///
/// **WHY THIS MATTERS**: Diagnostic payloads (probe reports, tool results) are
/// serialized to JSON. A token accidentally embedded in one must fail loudly.
///
/// **BUG THIS CATCHES**: Would catch a `#[derive(Serialize)]` replacing the manual impl.
#[test]
fn given_token_when_serialized_then_returns_error() {
    let token = SessionToken::new(RAW_TOKEN).unwrap();

    let result = serde_json::to_string(&token);

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("cannot be serialized"));
}
