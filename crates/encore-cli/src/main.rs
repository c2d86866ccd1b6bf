//! Encore CLI, the attendee client for the karaoke media backend.
//!
//! Set CLOUDINARY_CLOUD_NAME, CLOUDINARY_UPLOAD_PRESET, and ENCORE_API_URL
//! (or API_URL). Sessions persist in ENCORE_SESSION_FILE
//! (default: ~/.encore/session.json).

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use encore_cli::{format_size, init_tracing};
use encore_client::identity::{FacebookIdentityProvider, GoogleIdentityProvider, IdentityProvider};
use encore_client::{
    CloudinaryClient, FileKeyValueStore, LogApiClient, Selection, SessionStore, UploadPipeline,
    UploadStatus,
};
use encore_core::models::SelectedFile;
use encore_core::ClientConfig;

#[derive(Parser)]
#[command(name = "encore", about = "Karaoke event media CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProviderArg {
    Google,
    Facebook,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with a social identity provider
    Login {
        /// Identity provider to use
        #[arg(long, value_enum)]
        provider: ProviderArg,
    },
    /// Sign out and clear the persisted session
    Logout,
    /// Show the signed-in identity
    Whoami,
    /// Upload photos/videos and log each successful upload
    Upload {
        /// Paths of the files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

/// MIME type from the file extension. The upload form gets this from the
/// browser; here the extension is all we have. Unknown extensions fall
/// through to a type the validator rejects.
fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        Some("mp4") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("avi") => "video/x-msvideo",
        Some("webm") => "video/webm",
        _ => "application/octet-stream",
    }
}

fn read_selected_file(path: &Path) -> Result<SelectedFile> {
    let data =
        std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    Ok(SelectedFile::new(name, content_type_for(path), data))
}

fn open_session(config: &ClientConfig) -> SessionStore {
    SessionStore::new(Box::new(FileKeyValueStore::new(&config.session_file)))
}

fn login(config: &ClientConfig, provider: ProviderArg) -> Result<()> {
    let adapter: Box<dyn IdentityProvider> = match provider {
        ProviderArg::Google => {
            let client_id = config
                .google_client_id
                .as_deref()
                .context("Set GOOGLE_CLIENT_ID to sign in with Google")?;
            Box::new(GoogleIdentityProvider::new(client_id))
        }
        ProviderArg::Facebook => {
            let app_id = config
                .facebook_app_id
                .as_deref()
                .context("Set FACEBOOK_APP_ID to sign in with Facebook")?;
            Box::new(FacebookIdentityProvider::new(app_id))
        }
    };

    println!("{}", adapter.initiate());
    print!("> ");
    std::io::stdout().flush().ok();

    let mut raw = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut raw)
        .context("Failed to read provider result")?;

    let identity = adapter.on_result(raw.trim())?;

    let mut session = open_session(config);
    session.login(identity.clone())?;

    println!(
        "Logged in as {} ({}) via {}",
        identity.name,
        identity.email,
        identity.provider.as_str()
    );
    Ok(())
}

async fn upload(config: &ClientConfig, files: &[PathBuf]) -> Result<()> {
    let session = open_session(config);
    if session.current().is_none() {
        println!("Not logged in; uploads will be recorded as Unknown User.");
    }

    let mut candidates = Vec::with_capacity(files.len());
    for path in files {
        let file = read_selected_file(path)?;
        println!("{} ({})", file.name, format_size(file.size()));
        candidates.push(file);
    }

    let mut selection = Selection::new();
    let rejections = selection.add_files(candidates, &config.limits);
    for rejection in &rejections {
        eprintln!("rejected {}: {}", rejection.file_name, rejection.reason);
    }

    let mut any_failed = !rejections.is_empty();

    if !selection.is_empty() {
        let host = Arc::new(CloudinaryClient::from_config(config)?);
        let sink = Arc::new(LogApiClient::from_config(config)?);
        let pipeline = UploadPipeline::new(host, sink);

        println!("Uploading {} file(s)...", selection.len());
        let report = pipeline.process(&mut selection, session.current()).await;

        for outcome in &report.outcomes {
            match &outcome.status {
                UploadStatus::Success { url } => {
                    println!("  ok   {} -> {}", outcome.file_name, url);
                }
                UploadStatus::Failed { error } => {
                    println!("  FAIL {}: {}", outcome.file_name, error);
                }
            }
        }

        let uploaded = report.outcomes.len() - report.failed_count();
        println!(
            "{}/{} uploaded ({} requested, {} rejected)",
            uploaded,
            report.outcomes.len(),
            files.len(),
            rejections.len()
        );
        any_failed = any_failed || !report.all_succeeded();
    }

    if any_failed {
        std::process::exit(1);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env().context(
        "Failed to load client configuration. Set CLOUDINARY_CLOUD_NAME and CLOUDINARY_UPLOAD_PRESET",
    )?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Login { provider } => login(&config, provider)?,
        Commands::Logout => {
            let mut session = open_session(&config);
            session.logout()?;
            println!("Logged out.");
        }
        Commands::Whoami => {
            let session = open_session(&config);
            match session.current() {
                Some(identity) => println!(
                    "{} ({}) via {}",
                    identity.name,
                    identity.email,
                    identity.provider.as_str()
                ),
                None => println!("Not logged in."),
            }
        }
        Commands::Upload { files } => {
            upload(&config, &files).await?;
        }
    }

    Ok(())
}
