use crate::endpoints;
use crate::error::composer_api::ComposerApiError;
use crate::services::send;
use crate::transport::{HttpMethod, RequestDescriptor, TransportExecutor};

use models::PrivacyModeResponse;

use std::sync::Arc;

pub struct DashboardService {
    transport: Arc<TransportExecutor>,
}

impl DashboardService {
    pub fn new(transport: Arc<TransportExecutor>) -> Self {
        Self { transport }
    }

    pub async fn get_privacy_mode(&self) -> Result<PrivacyModeResponse, ComposerApiError> {
        let descriptor = RequestDescriptor::new(endpoints::PRIVACY_MODE, HttpMethod::Post);
        send(&self.transport, descriptor).await
    }
}
