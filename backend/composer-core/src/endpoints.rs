//! Fixed table of remote paths, one per operation.

use const_format::concatcp;

const BACKGROUND_COMPOSER: &str = "/api/background-composer";
const DASHBOARD: &str = "/api/dashboard";

pub const LIST: &str = concatcp!(BACKGROUND_COMPOSER, "/list");
pub const CHECK_WEB_ACCESS: &str = concatcp!(BACKGROUND_COMPOSER, "/check-agent-web-access");
pub const USER_SETTINGS: &str =
    concatcp!(BACKGROUND_COMPOSER, "/get-background-composer-user-settings");
pub const UPDATE_USER_SETTINGS: &str =
    concatcp!(BACKGROUND_COMPOSER, "/update-background-composer-user-settings");
pub const CREATE: &str = "/api/auth/startBackgroundComposerFromSnapshot";
pub const GET_DETAILED: &str = concatcp!(BACKGROUND_COMPOSER, "/get-detailed-composer");
pub const GET_DIFF_DETAILS: &str = concatcp!(BACKGROUND_COMPOSER, "/get-diff-details");
pub const GET_CHANGES_HASH: &str = concatcp!(BACKGROUND_COMPOSER, "/get-changes-hash");
pub const OPEN_PR: &str = concatcp!(BACKGROUND_COMPOSER, "/open-pr");
pub const PAUSE: &str = concatcp!(BACKGROUND_COMPOSER, "/pause");
pub const REVERT_FILE: &str = concatcp!(BACKGROUND_COMPOSER, "/revert-file");
pub const ATTACH: &str = concatcp!(BACKGROUND_COMPOSER, "/attach-background-composer");
pub const ATTACH_LOGS: &str = concatcp!(BACKGROUND_COMPOSER, "/attach-background-composer-logs");
pub const PRIVACY_MODE: &str = concatcp!(DASHBOARD, "/get-user-privacy-mode");

/// Candidate routes for composer creation, tried in this order.
///
/// Only the first is confirmed; the rest are fallbacks for deployments that
/// moved the route. First success wins.
pub const CREATE_CANDIDATES: [&str; 5] = [
    CREATE,
    concatcp!(BACKGROUND_COMPOSER, "/start"),
    concatcp!(BACKGROUND_COMPOSER, "/run"),
    concatcp!(BACKGROUND_COMPOSER, "/new-task"),
    concatcp!(BACKGROUND_COMPOSER, "/submit"),
];
