use crate::endpoints;
use crate::error::composer_api::ComposerApiError;
use crate::services::send;
use crate::transport::{HttpMethod, RequestDescriptor, TransportExecutor};

use models::{UserSettings, WebAccessResponse};

use std::sync::Arc;

use serde_json::Value;

pub struct UserService {
    transport: Arc<TransportExecutor>,
}

impl UserService {
    pub fn new(transport: Arc<TransportExecutor>) -> Self {
        Self { transport }
    }

    pub async fn check_web_access(&self) -> Result<WebAccessResponse, ComposerApiError> {
        let descriptor = RequestDescriptor::new(endpoints::CHECK_WEB_ACCESS, HttpMethod::Post);
        send(&self.transport, descriptor).await
    }

    pub async fn get_settings(&self) -> Result<UserSettings, ComposerApiError> {
        send(&self.transport, RequestDescriptor::get(endpoints::USER_SETTINGS)).await
    }

    /// Send a partial settings map; the remote answers with the resulting settings.
    pub async fn update_settings(
        &self,
        settings: &UserSettings,
    ) -> Result<UserSettings, ComposerApiError> {
        let body = Value::Object(settings.as_map().clone());
        send(
            &self.transport,
            RequestDescriptor::post(endpoints::UPDATE_USER_SETTINGS, body),
        )
        .await
    }
}
