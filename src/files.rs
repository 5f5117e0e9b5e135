// File-level operations: recursive project tree listing, detail lookup,
// metadata update and download.

use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

use crate::api::{ApiClient, ApiError};
use crate::output::print_json;
use crate::update::collect_update_data;

const FILES: &str = "files/";
const DOWNLOAD_INFO: &str = "/download_info";

/// Seam between the tree collector and HTTP: anything that can answer a
/// filtered `files/` listing. `ApiClient` implements it against the real
/// gateway; tests implement it over in-memory data.
pub trait FileSource {
    fn list(&self, params: &[(&str, &str)]) -> Result<Vec<Value>, ApiError>;
}

impl FileSource for ApiClient {
    fn list(&self, params: &[(&str, &str)]) -> Result<Vec<Value>, ApiError> {
        let body = self.get(FILES, params)?;
        match body.get("items") {
            Some(Value::Array(items)) => Ok(items.clone()),
            _ => Err(ApiError::MissingField("items")),
        }
    }
}

/// Fetch the root listing of a project and expand every folder into a
/// fully materialized tree: each folder entry gains a `files` key
/// holding its children, recursively, in server response order.
///
/// One listing request per folder, strictly sequential, pre-order. No
/// depth limit and no cycle detection; the gateway returns each entry
/// under exactly one parent, so any finite tree terminates.
pub fn collect_project_files<S: FileSource>(src: &S, project_id: &str) -> Result<Vec<Value>, ApiError> {
    let mut root = src.list(&[("project", project_id)])?;
    for entry in &mut root {
        expand_folder(src, entry)?;
    }
    Ok(root)
}

fn expand_folder<S: FileSource>(src: &S, entry: &mut Value) -> Result<(), ApiError> {
    if entry.get("type").and_then(Value::as_str) != Some("folder") {
        return Ok(());
    }
    let id = entry
        .get("id")
        .and_then(Value::as_str)
        .ok_or(ApiError::MissingField("id"))?
        .to_string();
    let mut children = src.list(&[("parent", &id)])?;
    for child in &mut children {
        expand_folder(src, child)?;
    }
    if let Value::Object(map) = entry {
        map.insert("files".to_string(), Value::Array(children));
    }
    Ok(())
}

/// List every file and folder in a project, folders expanded, as JSON.
pub fn print_file_list(api: &ApiClient, project_id: &str) -> Result<()> {
    let files = collect_project_files(api, project_id)?;
    println!("CGC Seven Bridges file list API");
    println!("List of all files and metadata in project {project_id}\n");
    print_json(&Value::Array(files));
    Ok(())
}

/// Print the details of a single file.
pub fn print_file_details(api: &ApiClient, file_id: &str) -> Result<()> {
    let details = api.get(&format!("{FILES}{file_id}"), &[])?;
    println!("CGC Seven Bridges file info for: {file_id}\n");
    print_json(&details);
    Ok(())
}

/// Encode the update tokens and PATCH them onto the file, printing the
/// modified resource afterwards.
pub fn update_file_details(api: &ApiClient, file_id: &str, args: &[String]) -> Result<()> {
    let data = collect_update_data(args).context("parsing update arguments")?;
    let response = api.patch(&format!("{FILES}{file_id}"), &data)?;
    println!("File with id {file_id} updated!\n");
    print_json(&response);
    Ok(())
}

/// Resolve the file's signed download URL and stream the body to `dest`,
/// overwriting any existing file without confirmation.
pub fn download_file(api: &ApiClient, file_id: &str, dest: &Path) -> Result<()> {
    println!("Starting downloading file: {file_id} from CGC...");
    let info = api.get(&format!("{FILES}{file_id}{DOWNLOAD_INFO}"), &[])?;
    let url = info
        .get("url")
        .and_then(Value::as_str)
        .ok_or(ApiError::MissingField("url"))?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message("Downloading...");
    let result = api.download_to(url, dest);
    spinner.finish_and_clear();
    let bytes = result?;

    println!(
        "File with ID: {file_id} downloaded at location: {} ({bytes} bytes)",
        dest.display()
    );
    Ok(())
}
