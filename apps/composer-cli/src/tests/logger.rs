use crate::logger::{LOG_FILE_NAME, initialize};

use log::LevelFilter;
use tempfile::TempDir;

/// **VALUE**: Verifies that calling initialize() twice returns Ok both times.
///
/// **WHY THIS MATTERS**: Startup and tests may both reach the logger. A second
/// call that errors or panics would abort the command before it runs.
///
/// **BUG THIS CATCHES**: Would catch removal of the Once or AtomicBool guards,
/// which makes fern fail when installing a global logger twice.
#[test]
fn given_logger_initialized_when_called_again_then_returns_ok() {
    let temp_dir = TempDir::new().unwrap();

    let first = initialize(LevelFilter::Debug, Some(temp_dir.path()));
    let second = initialize(LevelFilter::Info, None);

    assert!(first.is_ok(), "First initialization should succeed");
    assert!(second.is_ok(), "Second initialization should succeed (idempotent)");
    assert!(temp_dir.path().join(LOG_FILE_NAME).exists());
}
