use crate::ErrorLocation;

use std::panic::Location;

#[track_caller]
fn capture() -> ErrorLocation {
    ErrorLocation::from(Location::caller())
}

/// **VALUE**: Verifies that `#[track_caller]` reports the call site, not the helper.
///
/// **WHY THIS MATTERS**: Every error in the workspace builds its location through a
/// `#[track_caller]` constructor. If propagation breaks, all errors point at the
/// constructor instead of the failing operation.
///
/// **BUG THIS CATCHES**: Would catch if `ErrorLocation::from` stops receiving the
/// caller location (e.g. someone drops `#[track_caller]` from a constructor).
#[test]
fn given_track_caller_helper_when_capturing_then_reports_call_site_line() {
    let expected_line = line!() + 1;
    let location = capture();

    assert!(location.file.contains("error_location.rs"));
    assert_eq!(location.line, expected_line);
    assert!(location.column > 0);
}

#[test]
fn given_error_location_when_formatted_then_produces_bracketed_format() {
    let location = ErrorLocation {
        file: "src/transport/mod.rs",
        line: 42,
        column: 7,
    };

    assert_eq!(location.to_string(), "[src/transport/mod.rs:42:7]");
}
