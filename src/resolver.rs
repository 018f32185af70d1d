//! Root metadata resolution.

use crate::error::{DriveError, Result};
use crate::models::RemoteNode;
use crate::store::RemoteStore;

/// Resolve `id` and require it to be a folder.
///
/// `role` names what the id is being used as ("source", "destination
/// parent") so the validation message points at the right flag.
pub async fn resolve_folder<S>(store: &S, id: &str, role: &str) -> Result<RemoteNode>
where
    S: RemoteStore + ?Sized,
{
    let node = store.get_metadata(id).await?;
    if !node.is_folder() {
        return Err(DriveError::Validation(format!(
            "{} '{}' is not a folder",
            role, id
        )));
    }
    Ok(node)
}
