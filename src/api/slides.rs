//! Google Slides REST client.

use crate::api::{ApiClient, ApiError, SlidesService};
use crate::model::{EditOperation, PresentationId};
use reqwest::Method;
use serde_json::json;
use tracing::debug;

const SLIDES_BASE: &str = "https://slides.googleapis.com/v1";

/// Client for the Slides `presentations` resource.
#[derive(Debug, Clone)]
pub struct SlidesClient {
    api: ApiClient,
}

impl SlidesClient {
    /// Build a client over an authorized HTTP wrapper.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

impl SlidesService for SlidesClient {
    fn create_presentation(&mut self, title: &str) -> Result<PresentationId, ApiError> {
        let url = format!("{SLIDES_BASE}/presentations");
        let body = json!({ "title": title });
        let value = self.api.send(Method::POST, &url, &[], Some(&body))?;

        let id = value
            .get("presentationId")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| ApiError::MalformedResponse {
                url: url.clone(),
                reason: "missing presentationId".to_string(),
            })?;

        PresentationId::new(id).map_err(|_| ApiError::MalformedResponse {
            url,
            reason: "empty presentationId".to_string(),
        })
    }

    fn batch_update(
        &mut self,
        presentation: &PresentationId,
        operations: &[EditOperation],
    ) -> Result<(), ApiError> {
        let url = format!(
            "{SLIDES_BASE}/presentations/{}:batchUpdate",
            presentation.as_str()
        );
        let body = json!({ "requests": operations });
        debug!(
            presentation = %presentation,
            operations = operations.len(),
            "Submitting batch update"
        );
        self.api.send(Method::POST, &url, &[], Some(&body))?;
        Ok(())
    }
}
