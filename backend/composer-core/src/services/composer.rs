use crate::endpoints;
use crate::error::composer_api::ComposerApiError;
use crate::payload::{IdGenerator, build_composer_payload};
use crate::resolver::EndpointResolver;
use crate::services::{require_id, send};
use crate::transport::{RequestDescriptor, TransportExecutor};

use models::{
    ActionResponse, ChangesHashResponse, ComposerList, ComposerSubmission, CreateComposerOptions,
    CreateComposerResponse, DetailedComposer, DiffDetailsResponse, OpenPrResponse,
};

use std::sync::Arc;

use log::info;
use serde_json::{Map, Value, json};

pub const DEFAULT_LIST_SIZE: u32 = 100;

/// Composer lifecycle: list, create, inspect and remote state transitions.
pub struct ComposerService {
    transport: Arc<TransportExecutor>,
    ids: Arc<dyn IdGenerator>,
}

impl ComposerService {
    pub fn new(transport: Arc<TransportExecutor>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { transport, ids }
    }

    pub async fn list(&self, n: u32, include_status: bool) -> Result<ComposerList, ComposerApiError> {
        let descriptor = RequestDescriptor::post(
            endpoints::LIST,
            json!({ "n": n, "include_status": include_status }),
        );
        send(&self.transport, descriptor).await
    }

    /// Submit a new composer, falling back across the candidate create routes.
    pub async fn create(
        &self,
        options: &CreateComposerOptions,
    ) -> Result<ComposerSubmission, ComposerApiError> {
        let payload = build_composer_payload(options, self.ids.as_ref());
        let requested_id = payload.bc_id.clone();
        let body = serde_json::to_value(&payload)?;

        info!("Creating composer {requested_id} for {}", payload.repo_url);

        let value = EndpointResolver::new(&self.transport)
            .try_in_order(&endpoints::CREATE_CANDIDATES, &body)
            .await?;
        let response: CreateComposerResponse = super::decode(value)?;

        Ok(ComposerSubmission {
            requested_id,
            response,
        })
    }

    pub async fn get_detailed(&self, bc_id: &str) -> Result<DetailedComposer, ComposerApiError> {
        let bc_id = require_id("Composer ID", bc_id)?;
        let descriptor = RequestDescriptor::post(
            endpoints::GET_DETAILED,
            json!({
                "bcId": bc_id,
                "n": 1,
                "includeDiff": true,
                "includeTeamWide": true
            }),
        );
        send(&self.transport, descriptor).await
    }

    pub async fn get_diff_details(
        &self,
        bc_id: &str,
    ) -> Result<DiffDetailsResponse, ComposerApiError> {
        let bc_id = require_id("Composer ID", bc_id)?;
        send(&self.transport, id_request(endpoints::GET_DIFF_DETAILS, bc_id)).await
    }

    pub async fn get_changes_hash(
        &self,
        bc_id: &str,
    ) -> Result<ChangesHashResponse, ComposerApiError> {
        let bc_id = require_id("Composer ID", bc_id)?;
        send(&self.transport, id_request(endpoints::GET_CHANGES_HASH, bc_id)).await
    }

    /// `pr_data` is merged into the body; `bcId` always names `bc_id`.
    pub async fn open_pr(
        &self,
        bc_id: &str,
        pr_data: Map<String, Value>,
    ) -> Result<OpenPrResponse, ComposerApiError> {
        let bc_id = require_id("Composer ID", bc_id)?;
        send(&self.transport, merged_request(endpoints::OPEN_PR, bc_id, pr_data)).await
    }

    pub async fn pause(&self, bc_id: &str) -> Result<ActionResponse, ComposerApiError> {
        let bc_id = require_id("Composer ID", bc_id)?;
        send(&self.transport, id_request(endpoints::PAUSE, bc_id)).await
    }

    pub async fn revert_file(
        &self,
        bc_id: &str,
        file_path: &str,
    ) -> Result<ActionResponse, ComposerApiError> {
        let bc_id = require_id("Composer ID", bc_id)?;
        let file_path = require_id("File path", file_path)?;
        let descriptor = RequestDescriptor::post(
            endpoints::REVERT_FILE,
            json!({ "bcId": bc_id, "filePath": file_path }),
        );
        send(&self.transport, descriptor).await
    }

    pub async fn attach(
        &self,
        bc_id: &str,
        attachment: Map<String, Value>,
    ) -> Result<ActionResponse, ComposerApiError> {
        let bc_id = require_id("Composer ID", bc_id)?;
        send(&self.transport, merged_request(endpoints::ATTACH, bc_id, attachment)).await
    }

    pub async fn attach_logs(&self, bc_id: &str) -> Result<ActionResponse, ComposerApiError> {
        let bc_id = require_id("Composer ID", bc_id)?;
        send(&self.transport, id_request(endpoints::ATTACH_LOGS, bc_id)).await
    }
}

fn id_request(path: &str, bc_id: &str) -> RequestDescriptor {
    RequestDescriptor::post(path, json!({ "bcId": bc_id }))
}

fn merged_request(path: &str, bc_id: &str, mut extra: Map<String, Value>) -> RequestDescriptor {
    extra.insert(String::from("bcId"), Value::String(bc_id.to_string()));
    RequestDescriptor::post(path, Value::Object(extra))
}
