//! copy_drive CLI - Copy a Google Drive folder (and its contents) to another
//! location.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use copy_drive::replicate::{FailureKind, JobStatus};
use copy_drive::{extract_id, Authenticator, DriveClient, ReplicationJob, Replicator};

/// Copy a Google Drive folder and its contents to another location.
#[derive(Parser)]
#[command(name = "copy_drive")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Source folder URL or ID to copy.
    #[arg(long)]
    src: String,

    /// Destination parent folder URL or ID where the copy will be created.
    #[arg(long)]
    dst: String,

    /// Optional new name for the copied root folder.
    #[arg(long)]
    new_name: Option<String>,

    /// Path to service account JSON credentials file.
    #[arg(long, env = "GOOGLE_APPLICATION_CREDENTIALS")]
    credentials: PathBuf,

    /// Include items in Trash from the source folder.
    #[arg(long)]
    include_trashed: bool,

    /// Plan and print actions without creating anything.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let source_id =
        extract_id(&cli.src).with_context(|| format!("Invalid source URL or ID: {}", cli.src))?;
    let dest_parent_id = extract_id(&cli.dst)
        .with_context(|| format!("Invalid destination URL or ID: {}", cli.dst))?;

    let auth = Authenticator::from_file(&cli.credentials)
        .with_context(|| format!("Failed to load credentials from {:?}", cli.credentials))?;

    let replicator = Replicator::new(DriveClient::new(auth));

    let job = ReplicationJob {
        source_id,
        dest_parent_id,
        new_name: cli.new_name,
        include_trashed: cli.include_trashed,
        dry_run: cli.dry_run,
    };

    // Ctrl-C stops issuing new remote calls and returns a partial report.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let report = replicator
        .replicate(&job, &cancel)
        .await
        .context("Replication failed")?;

    match report.status {
        JobStatus::PlannedOnly => {
            println!("Dry run: nothing was created or copied.");
            return Ok(());
        }
        JobStatus::Cancelled => {
            println!("Cancelled; partial results follow.");
        }
        JobStatus::Completed => {}
    }

    println!(
        "Done: {} folder(s) created, {} file(s) copied, {} file(s) failed.",
        report.folders_created,
        report.files_copied,
        report.files_failed()
    );
    if let Some(root_id) = &report.root_id {
        println!("New root folder id: {}", root_id);
    }

    if !report.failures.is_empty() {
        eprintln!("Failed items:");
        for failure in &report.failures {
            let what = match failure.kind {
                FailureKind::File => "file",
                FailureKind::Subtree => "subtree",
            };
            eprintln!(
                "  [{}] '{}' ({}): {}",
                what, failure.name, failure.id, failure.reason
            );
        }
    }

    Ok(())
}
