//! Wire models for Google Drive API responses and the typed node model
//! the replicator works with.

use serde::{Deserialize, Serialize};

/// MIME type Drive uses to mark a folder.
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Kind of a remote node. Closed variant; the raw `mimeType` string never
/// leaves this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Folder,
    File,
}

/// An addressable item in the remote hierarchy. Identity is the id; name and
/// kind are snapshots taken at resolution time.
#[derive(Debug, Clone)]
pub struct RemoteNode {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
}

impl RemoteNode {
    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }
}

impl std::fmt::Display for RemoteNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            NodeKind::Folder => "folder",
            NodeKind::File => "file",
        };
        write!(f, "{}\t{}\t{}", self.id, kind, self.name)
    }
}

/// A file resource as returned by the Drive v3 `files` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResource {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub mime_type: Option<String>,
}

impl From<FileResource> for RemoteNode {
    fn from(res: FileResource) -> Self {
        let kind = if res.mime_type.as_deref() == Some(FOLDER_MIME_TYPE) {
            NodeKind::Folder
        } else {
            NodeKind::File
        };
        RemoteNode {
            id: res.id,
            name: res.name,
            kind,
        }
    }
}

/// Response from the files.list API endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileListResponse {
    #[serde(default)]
    pub files: Vec<FileResource>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Google API error response.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub code: u16,
    pub message: String,
}

/// Service account credentials from JSON file.
#[derive(Debug, Deserialize)]
pub struct ServiceAccountCredentials {
    pub client_email: String,
    pub private_key: String,
    pub token_uri: Option<String>,
}

/// OAuth2 token response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}
