//! Full pagination over a folder's immediate children.

use crate::error::Result;
use crate::models::RemoteNode;
use crate::store::RemoteStore;

/// List all immediate children of `folder_id`, following continuation
/// tokens until the remote signals no further pages.
///
/// Children are concatenated in page order; no global ordering is
/// guaranteed. If any page request fails the whole listing is unavailable;
/// no partial child set is returned.
pub async fn list_all<S>(store: &S, folder_id: &str, include_trashed: bool) -> Result<Vec<RemoteNode>>
where
    S: RemoteStore + ?Sized,
{
    let mut children = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let page = store
            .list_children(folder_id, page_token.as_deref(), include_trashed)
            .await?;
        children.extend(page.nodes);

        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    Ok(children)
}
