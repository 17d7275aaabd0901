//! Google Drive REST client.

use crate::api::{ApiClient, ApiError, DriveService};
use crate::model::{FolderId, PresentationId};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;

const DRIVE_BASE: &str = "https://www.googleapis.com/drive/v3";
const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Client for the Drive `files` resource.
#[derive(Debug, Clone)]
pub struct DriveClient {
    api: ApiClient,
}

impl DriveClient {
    /// Build a client over an authorized HTTP wrapper.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

/// Escape a value for embedding in a Drive search query string literal.
fn escape_query_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

fn string_items(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

impl DriveService for DriveClient {
    fn find_folder(&mut self, name: &str) -> Result<Option<FolderId>, ApiError> {
        let url = format!("{DRIVE_BASE}/files");
        let query = format!(
            "name = '{}' and mimeType = '{FOLDER_MIME_TYPE}' and trashed = false",
            escape_query_value(name)
        );
        let value = self.api.send(
            Method::GET,
            &url,
            &[("q", query), ("fields", "files(id, name)".to_string())],
            None,
        )?;

        // Several identically-named folders can exist; the first match wins.
        let Some(first) = value
            .get("files")
            .and_then(Value::as_array)
            .and_then(|files| files.first())
        else {
            return Ok(None);
        };

        let id = first
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| ApiError::MalformedResponse {
                url: url.clone(),
                reason: "folder entry without id".to_string(),
            })?;

        let folder = FolderId::new(id).map_err(|_| ApiError::MalformedResponse {
            url,
            reason: "empty folder id".to_string(),
        })?;
        debug!(folder = %folder, name, "Found existing folder");
        Ok(Some(folder))
    }

    fn create_folder(&mut self, name: &str) -> Result<FolderId, ApiError> {
        let url = format!("{DRIVE_BASE}/files");
        let body = json!({
            "name": name,
            "mimeType": FOLDER_MIME_TYPE,
        });
        let value = self.api.send(
            Method::POST,
            &url,
            &[("fields", "id".to_string())],
            Some(&body),
        )?;

        let id = value
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| ApiError::MalformedResponse {
                url: url.clone(),
                reason: "missing folder id".to_string(),
            })?;

        FolderId::new(id).map_err(|_| ApiError::MalformedResponse {
            url,
            reason: "empty folder id".to_string(),
        })
    }

    fn parents(&mut self, file: &PresentationId) -> Result<Vec<String>, ApiError> {
        let url = format!("{DRIVE_BASE}/files/{}", file.as_str());
        let value = self.api.send(
            Method::GET,
            &url,
            &[("fields", "parents".to_string())],
            None,
        )?;
        Ok(string_items(&value, "parents"))
    }

    fn move_file(
        &mut self,
        file: &PresentationId,
        add: &FolderId,
        remove: &[String],
    ) -> Result<(), ApiError> {
        let url = format!("{DRIVE_BASE}/files/{}", file.as_str());
        let mut query = vec![
            ("addParents", add.as_str().to_string()),
            ("fields", "id, parents".to_string()),
        ];
        if !remove.is_empty() {
            query.push(("removeParents", remove.join(",")));
        }
        self.api
            .send(Method::PATCH, &url, &query, Some(&json!({})))?;
        Ok(())
    }
}
