//! Single entry point over every service adapter.

pub mod probe;

use crate::config::ClientConfig;
use crate::error::composer_api::ComposerApiError;
use crate::normalizer;
use crate::payload::{IdGenerator, UuidIdGenerator};
use crate::services::composer::DEFAULT_LIST_SIZE;
use crate::services::{ComposerService, DashboardService, UserService};
use crate::transport::TransportExecutor;

use common::SessionToken;
use models::{
    ActionResponse, ChangesHashResponse, ComposerList, ComposerSubmission, CreateComposerOptions,
    DetailedComposer, DiffDetailsResponse, NormalizedResponse, OpenPrResponse,
    PrivacyModeResponse, UserSettings, WebAccessResponse,
};

use std::sync::Arc;

use log::info;
use serde_json::{Map, Value};

/// Client for the background composer service.
///
/// Owns the session token and the transport; each adapter shares the same
/// transport, so one client means one credential and one base address.
pub struct BackgroundComposerClient {
    token: SessionToken,
    transport: Arc<TransportExecutor>,
    composers: ComposerService,
    users: UserService,
    dashboard: DashboardService,
}

impl BackgroundComposerClient {
    /// # Errors
    ///
    /// Returns [`ComposerApiError::Setup`] if the configuration is invalid.
    pub fn new(token: SessionToken, config: &ClientConfig) -> Result<Self, ComposerApiError> {
        Self::with_id_generator(token, config, Arc::new(UuidIdGenerator))
    }

    /// Like [`Self::new`] with a custom source of composer identifiers.
    pub fn with_id_generator(
        token: SessionToken,
        config: &ClientConfig,
        ids: Arc<dyn IdGenerator>,
    ) -> Result<Self, ComposerApiError> {
        let transport = Arc::new(TransportExecutor::new(config, &token)?);

        info!(
            "Initialized composer client for {} with session token {}",
            config.base_url,
            token.preview()
        );

        Ok(Self {
            composers: ComposerService::new(Arc::clone(&transport), ids),
            users: UserService::new(Arc::clone(&transport)),
            dashboard: DashboardService::new(Arc::clone(&transport)),
            token,
            transport,
        })
    }

    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    pub fn transport(&self) -> &TransportExecutor {
        &self.transport
    }

    // Composer lifecycle

    pub async fn list_composers(&self) -> Result<ComposerList, ComposerApiError> {
        self.list_composers_with(DEFAULT_LIST_SIZE, true).await
    }

    pub async fn list_composers_with(
        &self,
        n: u32,
        include_status: bool,
    ) -> Result<ComposerList, ComposerApiError> {
        info!("Listing background composers (n = {n})");
        self.composers.list(n, include_status).await
    }

    pub async fn create_composer(
        &self,
        options: &CreateComposerOptions,
    ) -> Result<ComposerSubmission, ComposerApiError> {
        self.composers.create(options).await
    }

    pub async fn get_detailed_composer(
        &self,
        bc_id: &str,
    ) -> Result<DetailedComposer, ComposerApiError> {
        info!("Getting detailed composer {bc_id}");
        self.composers.get_detailed(bc_id).await
    }

    pub async fn get_diff_details(
        &self,
        bc_id: &str,
    ) -> Result<DiffDetailsResponse, ComposerApiError> {
        self.composers.get_diff_details(bc_id).await
    }

    pub async fn get_changes_hash(
        &self,
        bc_id: &str,
    ) -> Result<ChangesHashResponse, ComposerApiError> {
        self.composers.get_changes_hash(bc_id).await
    }

    pub async fn open_pr(
        &self,
        bc_id: &str,
        pr_data: Map<String, Value>,
    ) -> Result<OpenPrResponse, ComposerApiError> {
        info!("Opening pull request for composer {bc_id}");
        self.composers.open_pr(bc_id, pr_data).await
    }

    pub async fn pause_composer(&self, bc_id: &str) -> Result<ActionResponse, ComposerApiError> {
        info!("Pausing composer {bc_id}");
        self.composers.pause(bc_id).await
    }

    pub async fn revert_file(
        &self,
        bc_id: &str,
        file_path: &str,
    ) -> Result<ActionResponse, ComposerApiError> {
        info!("Reverting {file_path} in composer {bc_id}");
        self.composers.revert_file(bc_id, file_path).await
    }

    pub async fn attach_composer(
        &self,
        bc_id: &str,
        attachment: Map<String, Value>,
    ) -> Result<ActionResponse, ComposerApiError> {
        self.composers.attach(bc_id, attachment).await
    }

    pub async fn attach_composer_logs(
        &self,
        bc_id: &str,
    ) -> Result<ActionResponse, ComposerApiError> {
        self.composers.attach_logs(bc_id).await
    }

    // User and dashboard

    pub async fn check_web_access(&self) -> Result<WebAccessResponse, ComposerApiError> {
        info!("Checking agent web access");
        self.users.check_web_access().await
    }

    pub async fn get_user_settings(&self) -> Result<UserSettings, ComposerApiError> {
        info!("Getting user settings");
        self.users.get_settings().await
    }

    pub async fn update_user_settings(
        &self,
        settings: &UserSettings,
    ) -> Result<UserSettings, ComposerApiError> {
        info!("Updating {} user setting(s)", settings.len());
        self.users.update_settings(settings).await
    }

    pub async fn get_privacy_mode(&self) -> Result<PrivacyModeResponse, ComposerApiError> {
        info!("Getting privacy mode");
        self.dashboard.get_privacy_mode().await
    }

    // Normalized views

    pub async fn list_composers_parsed(&self) -> Result<NormalizedResponse, ComposerApiError> {
        let list = self.list_composers().await?;
        Ok(normalizer::normalize_composer_list(&list))
    }

    pub async fn check_web_access_parsed(&self) -> Result<NormalizedResponse, ComposerApiError> {
        let response = self.check_web_access().await?;
        Ok(normalizer::normalize_web_access(&response))
    }

    pub async fn get_privacy_mode_parsed(&self) -> Result<NormalizedResponse, ComposerApiError> {
        let response = self.get_privacy_mode().await?;
        Ok(normalizer::normalize_privacy_mode(&response))
    }

    pub async fn get_user_settings_parsed(&self) -> Result<NormalizedResponse, ComposerApiError> {
        let settings = self.get_user_settings().await?;
        Ok(normalizer::normalize_user_settings(&settings))
    }
}
