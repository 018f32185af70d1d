//! Recursive folder replication.
//!
//! The traversal is an explicit FIFO work queue of
//! `(source folder, destination folder)` pairs rather than language-level
//! recursion, so arbitrarily deep trees cannot exhaust the stack. A
//! destination folder is always created before anything is enqueued or
//! copied under it.

use std::collections::VecDeque;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::Result;
use crate::lister::list_all;
use crate::models::NodeKind;
use crate::resolver::resolve_folder;
use crate::store::RemoteStore;

/// Parameters of one replication invocation. Immutable for the job's
/// lifetime.
#[derive(Debug, Clone)]
pub struct ReplicationJob {
    /// Id of the folder to copy.
    pub source_id: String,
    /// Id of the folder the copy is created under.
    pub dest_parent_id: String,
    /// Optional name for the copied root; defaults to the source's name.
    pub new_name: Option<String>,
    /// Include items in the source's trash.
    pub include_trashed: bool,
    /// Plan and report without issuing any mutating call.
    pub dry_run: bool,
}

/// Result of processing one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A destination folder was created with this id.
    Created(String),
    /// A file was copied; the new copy has this id.
    Copied(String),
    /// The node could not be replicated; siblings were unaffected.
    Failed(ItemFailure),
}

/// What a recorded failure covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A single file copy failed.
    File,
    /// A folder could not be created or listed; its whole subtree was
    /// skipped.
    Subtree,
}

/// One failed item, identified by its source id and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    pub id: String,
    pub name: String,
    pub kind: FailureKind,
    pub reason: String,
}

/// How the job ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    /// The full traversal ran, possibly with per-item failures.
    Completed,
    /// Dry run; nothing was mutated.
    PlannedOnly,
    /// Cancellation stopped the traversal early; the report is partial.
    Cancelled,
}

/// Aggregate outcome of one replication invocation.
#[derive(Debug)]
pub struct JobReport {
    pub status: JobStatus,
    /// Id of the created destination root, unless the job was a dry run.
    pub root_id: Option<String>,
    pub folders_created: usize,
    pub files_copied: usize,
    pub failures: Vec<ItemFailure>,
}

impl JobReport {
    fn planned() -> Self {
        Self {
            status: JobStatus::PlannedOnly,
            root_id: None,
            folders_created: 0,
            files_copied: 0,
            failures: Vec::new(),
        }
    }

    fn started(root_id: String) -> Self {
        Self {
            status: JobStatus::Completed,
            root_id: Some(root_id),
            folders_created: 0,
            files_copied: 0,
            failures: Vec::new(),
        }
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Created(_) => self.folders_created += 1,
            Outcome::Copied(_) => self.files_copied += 1,
            Outcome::Failed(failure) => self.failures.push(failure),
        }
    }

    /// Number of individual file copies that failed. Subtree failures are
    /// in `failures` but not counted here.
    pub fn files_failed(&self) -> usize {
        self.failures
            .iter()
            .filter(|f| f.kind == FailureKind::File)
            .count()
    }
}

/// A source folder whose destination counterpart already exists.
struct Pending {
    source_id: String,
    source_name: String,
    dest_id: String,
}

/// Drives a replication job against a `RemoteStore`.
pub struct Replicator<S> {
    store: S,
}

impl<S: RemoteStore> Replicator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Replicate the job's source folder under its destination parent.
    ///
    /// Returns `Err` only for fatal conditions: root validation failure or
    /// failure to create the destination root, both of which happen before
    /// or at the first mutation. Every descendant failure is downgraded to
    /// an entry in the report and traversal continues.
    ///
    /// When `cancel` fires, no further remote calls are issued and the
    /// partial report comes back with `JobStatus::Cancelled`.
    pub async fn replicate(
        &self,
        job: &ReplicationJob,
        cancel: &CancellationToken,
    ) -> Result<JobReport> {
        let source = resolve_folder(&self.store, &job.source_id, "source").await?;
        let dest_parent =
            resolve_folder(&self.store, &job.dest_parent_id, "destination parent").await?;

        let root_name = job
            .new_name
            .clone()
            .unwrap_or_else(|| source.name.clone());

        info!(
            source = %source.name,
            source_id = %source.id,
            dest_parent = %dest_parent.name,
            dest_parent_id = %dest_parent.id,
            as_name = %root_name,
            "planning folder copy"
        );

        if job.dry_run {
            info!("dry run, skipping folder creation and file copies");
            return Ok(JobReport::planned());
        }

        let root = self.store.create_folder(&root_name, &dest_parent.id).await?;
        info!(name = %root_name, id = %root.id, "created destination root");

        let mut report = JobReport::started(root.id.clone());
        report.record(Outcome::Created(root.id.clone()));

        let mut queue: VecDeque<Pending> = VecDeque::new();
        queue.push_back(Pending {
            source_id: source.id,
            source_name: root_name,
            dest_id: root.id,
        });

        'walk: while let Some(pending) = queue.pop_front() {
            if cancel.is_cancelled() {
                report.status = JobStatus::Cancelled;
                break;
            }

            let children =
                match list_all(&self.store, &pending.source_id, job.include_trashed).await {
                    Ok(children) => children,
                    Err(err) => {
                        warn!(
                            folder = %pending.source_name,
                            id = %pending.source_id,
                            error = %err,
                            "failed to list folder, skipping subtree"
                        );
                        report.record(Outcome::Failed(ItemFailure {
                            id: pending.source_id,
                            name: pending.source_name,
                            kind: FailureKind::Subtree,
                            reason: err.to_string(),
                        }));
                        continue;
                    }
                };

            for child in children {
                if cancel.is_cancelled() {
                    report.status = JobStatus::Cancelled;
                    break 'walk;
                }

                match child.kind {
                    NodeKind::Folder => {
                        match self.store.create_folder(&child.name, &pending.dest_id).await {
                            Ok(created) => {
                                info!(name = %child.name, id = %created.id, "created subfolder");
                                report.record(Outcome::Created(created.id.clone()));
                                queue.push_back(Pending {
                                    source_id: child.id,
                                    source_name: child.name,
                                    dest_id: created.id,
                                });
                            }
                            Err(err) => {
                                warn!(
                                    name = %child.name,
                                    id = %child.id,
                                    error = %err,
                                    "failed to create subfolder, skipping subtree"
                                );
                                report.record(Outcome::Failed(ItemFailure {
                                    id: child.id,
                                    name: child.name,
                                    kind: FailureKind::Subtree,
                                    reason: err.to_string(),
                                }));
                            }
                        }
                    }
                    NodeKind::File => {
                        match self
                            .store
                            .copy_file(&child.id, &child.name, &pending.dest_id)
                            .await
                        {
                            Ok(copied) => {
                                info!(name = %child.name, id = %copied.id, "copied file");
                                report.record(Outcome::Copied(copied.id));
                            }
                            Err(err) => {
                                warn!(
                                    name = %child.name,
                                    id = %child.id,
                                    error = %err,
                                    "failed to copy file"
                                );
                                report.record(Outcome::Failed(ItemFailure {
                                    id: child.id,
                                    name: child.name,
                                    kind: FailureKind::File,
                                    reason: err.to_string(),
                                }));
                            }
                        }
                    }
                }
            }
        }

        Ok(report)
    }
}
