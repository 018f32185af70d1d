//! The remote storage capability the replicator is written against.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::RemoteNode;

/// One page of a folder listing.
#[derive(Debug, Default)]
pub struct ChildPage {
    pub nodes: Vec<RemoteNode>,
    pub next_page_token: Option<String>,
}

/// Capability contract for the remote hierarchical store.
///
/// `list_children` returns a single page; callers drive the continuation
/// token until none remains. Transport-level concerns (auth, retry on
/// transient failures) live behind this boundary, never in front of it.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetch id, name and kind for a node.
    async fn get_metadata(&self, id: &str) -> Result<RemoteNode>;

    /// Fetch one page of a folder's immediate children. Trashed items are
    /// excluded by the remote query when `include_trashed` is false.
    async fn list_children(
        &self,
        folder_id: &str,
        page_token: Option<&str>,
        include_trashed: bool,
    ) -> Result<ChildPage>;

    /// Create an empty folder under `parent_id`.
    async fn create_folder(&self, name: &str, parent_id: &str) -> Result<RemoteNode>;

    /// Server-side copy of a file into `parent_id`.
    async fn copy_file(&self, id: &str, name: &str, parent_id: &str) -> Result<RemoteNode>;
}
