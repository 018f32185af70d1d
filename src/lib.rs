//! copy_drive - recursively copy a Google Drive folder to another location.
//!
//! The replication core walks a source folder tree through the `RemoteStore`
//! capability, creating destination folders before descending and copying
//! files into their mapped destination folder. A failed file or subtree is
//! recorded in the job report and never aborts its siblings.
//!
//! # Example
//!
//! ```no_run
//! use copy_drive::{Authenticator, DriveClient, ReplicationJob, Replicator};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let auth = Authenticator::from_file("service-account.json")?;
//!     let replicator = Replicator::new(DriveClient::new(auth));
//!
//!     let job = ReplicationJob {
//!         source_id: "source-folder-id".to_string(),
//!         dest_parent_id: "dest-parent-id".to_string(),
//!         new_name: None,
//!         include_trashed: false,
//!         dry_run: false,
//!     };
//!
//!     let report = replicator.replicate(&job, &CancellationToken::new()).await?;
//!     println!(
//!         "{} folders created, {} files copied",
//!         report.folders_created, report.files_copied
//!     );
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod lister;
pub mod models;
pub mod replicate;
pub mod resolver;
pub mod store;
pub mod url_parser;

// Re-exports for convenience
pub use auth::Authenticator;
pub use client::DriveClient;
pub use error::{DriveError, Result};
pub use models::{NodeKind, RemoteNode};
pub use replicate::{JobReport, JobStatus, ReplicationJob, Replicator};
pub use store::{ChildPage, RemoteStore};
pub use url_parser::extract_id;
