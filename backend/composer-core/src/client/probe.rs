//! Reachability probe over every remote operation.

use crate::client::BackgroundComposerClient;
use crate::error::composer_api::ComposerApiError;

use models::{CreateComposerOptions, CreateComposerOptionsBuilder};

use log::{error, info, warn};
use serde::Serialize;
use serde_json::Map;

/// Remote statuses that prove the route exists even though the probe input was rejected.
pub const ACCESSIBLE_STATUS_CODES: [u16; 5] = [400, 404, 405, 422, 500];

/// Used for identifier-bound operations when neither create nor list produced one.
pub const PLACEHOLDER_COMPOSER_ID: &str = "bc-00000000-0000-0000-0000-000000000000";

const PROBE_TASK: &str = "Endpoint probe: describe the repository layout";
const PROBE_REPOSITORY_URL: &str = "https://github.com/octocat/Hello-World.git";
const PROBE_FILE_PATH: &str = "README.md";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Success,
    Accessible,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResult {
    pub endpoint: String,
    pub status: ProbeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProbeResult {
    /// Classify one call: 2xx is success, an accessible status is accessible,
    /// anything else (including no response at all) is an error.
    pub fn classify<T>(endpoint: &str, outcome: &Result<T, ComposerApiError>) -> Self {
        let Err(err) = outcome else {
            return Self {
                endpoint: endpoint.to_string(),
                status: ProbeStatus::Success,
                status_code: None,
                error: None,
            };
        };

        let status_code = err.status_code();
        let status = if ACCESSIBLE_STATUS_CODES.contains(&status_code) {
            ProbeStatus::Accessible
        } else {
            ProbeStatus::Error
        };

        Self {
            endpoint: endpoint.to_string(),
            status,
            status_code: (status_code != 0).then_some(status_code),
            error: Some(err.describe()),
        }
    }

    fn log(&self) {
        match self.status {
            ProbeStatus::Success => info!("✓ {} - Success", self.endpoint),
            ProbeStatus::Accessible => warn!(
                "~ {} - Accessible: {}",
                self.endpoint,
                self.error.as_deref().unwrap_or_default()
            ),
            ProbeStatus::Error => error!(
                "✗ {} - Failed: {}",
                self.endpoint,
                self.error.as_deref().unwrap_or_default()
            ),
        }
    }
}

impl BackgroundComposerClient {
    /// Walk every operation in a fixed order and classify each call.
    ///
    /// Never stops early. Identifier-bound operations use the id returned by
    /// create, else the first listed composer, else [`PLACEHOLDER_COMPOSER_ID`].
    pub async fn test_all_endpoints(&self) -> Vec<ProbeResult> {
        info!("Testing all API endpoints");
        let mut results = Vec::new();

        // No identifier needed
        record(&mut results, "Check Web Access", &self.check_web_access().await);

        let settings = self.get_user_settings().await;
        record(&mut results, "Get User Settings", &settings);
        let current = settings.unwrap_or_default();
        record(
            &mut results,
            "Update User Settings",
            &self.update_user_settings(&current).await,
        );

        record(&mut results, "Get Privacy Mode", &self.get_privacy_mode().await);

        // Create
        let created = match probe_options() {
            Ok(options) => self.create_composer(&options).await,
            Err(err) => Err(err),
        };
        record(&mut results, "Create Composer", &created);
        let mut subject = created.ok().map(|s| s.composer_id().to_string());

        // List
        let listed = self.list_composers().await;
        record(&mut results, "List Composers", &listed);
        if subject.is_none() {
            subject = listed
                .ok()
                .and_then(|list| list.first_id().map(str::to_string));
        }

        // Identifier-bound
        let bc_id = subject.as_deref().unwrap_or(PLACEHOLDER_COMPOSER_ID);
        info!("Probing identifier-bound operations with {bc_id}");

        record(
            &mut results,
            "Get Detailed Composer",
            &self.get_detailed_composer(bc_id).await,
        );
        record(&mut results, "Get Diff Details", &self.get_diff_details(bc_id).await);
        record(&mut results, "Get Changes Hash", &self.get_changes_hash(bc_id).await);
        record(
            &mut results,
            "Open Pull Request",
            &self.open_pr(bc_id, Map::new()).await,
        );
        record(&mut results, "Pause Composer", &self.pause_composer(bc_id).await);
        record(
            &mut results,
            "Revert File",
            &self.revert_file(bc_id, PROBE_FILE_PATH).await,
        );
        record(
            &mut results,
            "Attach Composer",
            &self.attach_composer(bc_id, Map::new()).await,
        );
        record(
            &mut results,
            "Attach Composer Logs",
            &self.attach_composer_logs(bc_id).await,
        );

        results
    }
}

fn record<T>(results: &mut Vec<ProbeResult>, endpoint: &str, outcome: &Result<T, ComposerApiError>) {
    let result = ProbeResult::classify(endpoint, outcome);
    result.log();
    results.push(result);
}

fn probe_options() -> Result<CreateComposerOptions, ComposerApiError> {
    Ok(CreateComposerOptionsBuilder::default()
        .with_task_description(PROBE_TASK)
        .with_repository_url(PROBE_REPOSITORY_URL)
        .build()?)
}
