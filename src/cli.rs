// Command definitions and dispatch. Token resolution checks the
// `--token` flag, then the `CGC_TOKEN` environment variable, then a
// token persisted by `cgc login` in the user's home directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::api::{ApiClient, ApiConfig};
use crate::{files, projects};

const TOKEN_FILE: &str = ".cgc_token";

#[derive(Parser)]
#[command(
    name = "cgc",
    version,
    about = "Command-line client for the Seven Bridges Cancer Genomics Cloud API"
)]
pub struct Cli {
    /// API token; falls back to CGC_TOKEN, then to ~/.cgc_token
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List all projects visible to the token
    Projects,
    /// List all files and metadata in a project, folders expanded
    Files {
        /// Project ID to crawl
        project_id: String,
    },
    /// Print details of a single file
    File {
        /// File ID to look up
        file_id: String,
    },
    /// Update file details from key=value, metadata.key=value and
    /// tag=value tokens
    Update {
        /// File ID to update
        file_id: String,
        /// Update tokens, e.g. `name=new.fastq metadata.sample=S1 tag=rna`
        #[arg(required = true)]
        args: Vec<String>,
    },
    /// Download a file to a local path, overwriting it if present
    Download {
        /// File ID to download
        file_id: String,
        /// Destination path
        dest: PathBuf,
    },
    /// Store an API token in ~/.cgc_token for future runs
    Login {
        /// Token to persist
        token: String,
    },
}

/// Dispatch a parsed command. Every failure propagates to `main`, which
/// prints the diagnostic and exits non-zero.
pub fn run(cli: Cli) -> Result<()> {
    if let Command::Login { token } = &cli.command {
        persist_token(token)?;
        println!("Token saved to {}", token_path().display());
        return Ok(());
    }

    let token = resolve_token(cli.token)?;
    let api = ApiClient::new(ApiConfig::from_env(token))?;
    match cli.command {
        Command::Projects => projects::print_projects(&api),
        Command::Files { project_id } => files::print_file_list(&api, &project_id),
        Command::File { file_id } => files::print_file_details(&api, &file_id),
        Command::Update { file_id, args } => files::update_file_details(&api, &file_id, &args),
        Command::Download { file_id, dest } => files::download_file(&api, &file_id, &dest),
        Command::Login { .. } => unreachable!("handled above"),
    }
}

fn resolve_token(flag: Option<String>) -> Result<String> {
    if let Some(token) = flag {
        return Ok(token);
    }
    if let Ok(token) = std::env::var("CGC_TOKEN") {
        if !token.is_empty() {
            return Ok(token);
        }
    }
    load_token().context(
        "no API token found: pass --token, set CGC_TOKEN, or run `cgc login <TOKEN>`",
    )
}

fn token_path() -> PathBuf {
    let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.join(TOKEN_FILE)
}

/// Persist the token into a file in the user's home directory.
fn persist_token(token: &str) -> Result<()> {
    std::fs::write(token_path(), token)?;
    Ok(())
}

/// Load a previously persisted token.
fn load_token() -> Result<String> {
    let data = std::fs::read_to_string(token_path())?;
    Ok(data.trim().to_string())
}
