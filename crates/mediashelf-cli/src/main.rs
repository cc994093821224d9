//! mediashelf CLI: upload, browse, download and delete media.
//!
//! Reads MEDIASHELF_API_URL (and friends) from the environment or `.env`;
//! `--api-url` overrides it.

use anyhow::Context;
use clap::{Parser, Subcommand};
use mediashelf_api_client::ApiClient;
use mediashelf_cli::{
    format_gallery_table, format_verdicts, gallery_rows, init_tracing, ConsoleNotifier,
};
use mediashelf_core::{CandidateFile, ClientConfig, FileId};
use mediashelf_services::{DiskDownloader, UploadOrchestrator};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "mediashelf", about = "Upload and browse media on a mediashelf server")]
struct Cli {
    /// Base URL of the file service (overrides MEDIASHELF_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List stored files
    List {
        /// Output format: table or json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Validate files without uploading
    Check {
        /// Files to validate
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Validate and upload files in one batch
    Upload {
        /// Files to upload (up to 10)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Delete a stored file by ID
    Delete {
        /// Stored file ID
        id: String,
    },
    /// Download a stored file under its original name
    Download {
        /// Stored file ID
        id: String,
        /// Target directory (overrides MEDIASHELF_DOWNLOAD_DIR)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn load_candidates(paths: &[PathBuf]) -> anyhow::Result<Vec<CandidateFile>> {
    paths
        .iter()
        .map(|p| {
            CandidateFile::from_path(p).with_context(|| format!("Cannot read {}", p.display()))
        })
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env().context("Invalid MEDIASHELF_* configuration")?;
    if let Some(url) = cli.api_url.as_deref() {
        config.api_base_url = url.trim_end_matches('/').to_string();
        config.validate().context("Invalid --api-url")?;
    }
    if let Commands::Download { dir: Some(dir), .. } = &cli.command {
        config.download_dir = dir.clone();
    }

    let client = ApiClient::new(&config).context("Failed to create API client")?;
    let downloader = DiskDownloader::new(client.clone(), config.download_dir.clone());
    let session = UploadOrchestrator::new(
        config,
        Arc::new(client),
        Arc::new(downloader),
        Arc::new(ConsoleNotifier),
    );

    match cli.command {
        Commands::List { format } => {
            session.mount().await.context("Failed to fetch files")?;
            let views = session.gallery_views().await;
            match format.as_str() {
                "json" => {
                    let out = serde_json::to_string_pretty(&gallery_rows(&views))
                        .context("Serialize gallery")?;
                    println!("{}", out);
                }
                "table" => print!("{}", format_gallery_table(&views)),
                other => anyhow::bail!("Unknown format '{}'. Use table or json", other),
            }
        }
        Commands::Check { files } => {
            let candidates = load_candidates(&files)?;
            let verdicts = session.validator().verdicts(&candidates);
            print!("{}", format_verdicts(&verdicts));
            if verdicts.iter().any(|v| !v.accepted) {
                anyhow::bail!("Selection would be rejected");
            }
        }
        Commands::Upload { files } => {
            let candidates = load_candidates(&files)?;
            session
                .select(candidates)
                .await
                .context("Selection rejected, nothing uploaded")?;
            let count = session.upload().await.context("Upload failed")?;
            tracing::info!(count, "Uploaded");
            print!("{}", format_gallery_table(&session.gallery_views().await));
        }
        Commands::Delete { id } => {
            session
                .delete_remote(&FileId::new(id))
                .await
                .context("Delete failed")?;
            print!("{}", format_gallery_table(&session.gallery_views().await));
        }
        Commands::Download { id, .. } => {
            session.mount().await.context("Failed to fetch files")?;
            let id = FileId::new(id);
            let file = session
                .find_stored(&id)
                .await
                .with_context(|| format!("No stored file with id {}", id))?;
            let path = session.download(&file).await.context("Download failed")?;
            println!("{}", path.display());
        }
    }

    Ok(())
}
