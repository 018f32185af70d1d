//! Google Drive API client implementing the `RemoteStore` capability.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::json;

use crate::auth::Authenticator;
use crate::error::{DriveError, Result};
use crate::models::{
    ApiErrorResponse, FileListResponse, FileResource, RemoteNode, FOLDER_MIME_TYPE,
};
use crate::store::{ChildPage, RemoteStore};

/// Base URL for Google Drive API v3.
const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Fields requested on every node-returning call.
const NODE_FIELDS: &str = "id, name, mimeType";

/// Client for the Google Drive v3 REST API.
pub struct DriveClient {
    auth: Authenticator,
    http: Client,
    base_url: String,
}

impl DriveClient {
    /// Create a new DriveClient against the production API.
    pub fn new(auth: Authenticator) -> Self {
        Self::with_base_url(auth, DRIVE_API_BASE)
    }

    /// Create a client against an alternate base URL. Used by tests to point
    /// at a local mock server.
    pub fn with_base_url(auth: Authenticator, base_url: impl Into<String>) -> Self {
        Self {
            auth,
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Turn a non-success response into a `DriveError`, preferring the
    /// structured API error envelope over the raw body.
    async fn api_error(response: Response) -> DriveError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        if let Ok(parsed) = serde_json::from_str::<ApiErrorResponse>(&body) {
            return DriveError::Api {
                status: parsed.error.code,
                message: parsed.error.message,
            };
        }
        DriveError::Api {
            status,
            message: body,
        }
    }

    async fn decode_node(response: Response) -> Result<RemoteNode> {
        let resource: FileResource = response.json().await?;
        Ok(resource.into())
    }
}

#[async_trait]
impl RemoteStore for DriveClient {
    async fn get_metadata(&self, id: &str) -> Result<RemoteNode> {
        let token = self.auth.get_access_token().await?;

        let response = self
            .http
            .get(format!("{}/files/{}", self.base_url, id))
            .bearer_auth(&token)
            .query(&[("supportsAllDrives", "true"), ("fields", NODE_FIELDS)])
            .send()
            .await?;

        if response.status().as_u16() == 404 {
            return Err(DriveError::NotFound(id.to_string()));
        }
        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        Self::decode_node(response).await
    }

    async fn list_children(
        &self,
        folder_id: &str,
        page_token: Option<&str>,
        include_trashed: bool,
    ) -> Result<ChildPage> {
        let token = self.auth.get_access_token().await?;

        // Trashed items are excluded by the query predicate, not filtered
        // locally.
        let mut query = format!("'{}' in parents", folder_id.replace('\'', "\\'"));
        if !include_trashed {
            query.push_str(" and trashed = false");
        }

        let list_fields = format!("nextPageToken, files({})", NODE_FIELDS);
        let mut request = self
            .http
            .get(format!("{}/files", self.base_url))
            .bearer_auth(&token)
            .query(&[
                ("q", query.as_str()),
                ("spaces", "drive"),
                ("corpora", "user"),
                ("includeItemsFromAllDrives", "true"),
                ("supportsAllDrives", "true"),
                ("fields", list_fields.as_str()),
            ]);

        if let Some(page_token) = page_token {
            request = request.query(&[("pageToken", page_token)]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let list: FileListResponse = response.json().await?;
        Ok(ChildPage {
            nodes: list.files.into_iter().map(RemoteNode::from).collect(),
            next_page_token: list.next_page_token,
        })
    }

    async fn create_folder(&self, name: &str, parent_id: &str) -> Result<RemoteNode> {
        let token = self.auth.get_access_token().await?;

        let body = json!({
            "name": name,
            "mimeType": FOLDER_MIME_TYPE,
            "parents": [parent_id],
        });

        let response = self
            .http
            .post(format!("{}/files", self.base_url))
            .bearer_auth(&token)
            .query(&[("supportsAllDrives", "true"), ("fields", NODE_FIELDS)])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        Self::decode_node(response).await
    }

    async fn copy_file(&self, id: &str, name: &str, parent_id: &str) -> Result<RemoteNode> {
        let token = self.auth.get_access_token().await?;

        let body = json!({
            "name": name,
            "parents": [parent_id],
        });

        let response = self
            .http
            .post(format!("{}/files/{}/copy", self.base_url, id))
            .bearer_auth(&token)
            .query(&[("supportsAllDrives", "true"), ("fields", NODE_FIELDS)])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        Self::decode_node(response).await
    }
}
