// UI layer: a simple interactive menu using `dialoguer`.
// Each action is one blocking call on the API client; a failed action is
// reported and the menu comes back.

use crate::api::UtApi;
use crate::file::LocalFile;
use crate::types::{ListedFile, RenameUpdate};
use anyhow::{Context, Result};
use dialoguer::{Confirm, Input, MultiSelect, Select};
use indicatif::{HumanBytes, ProgressBar, ProgressStyle};
use std::time::Duration;

/// Main interactive menu. Runs a select loop until the user picks "Exit".
pub fn main_menu(api: &UtApi) -> Result<()> {
    loop {
        let items = vec![
            "Upload files",
            "List files",
            "Delete files",
            "Rename file",
            "Usage info",
            "Exit",
        ];
        let selection = Select::new().items(&items).default(0).interact()?;
        let outcome = match selection {
            0 => handle_upload(api),
            1 => handle_list(api),
            2 => handle_delete(api),
            3 => handle_rename(api),
            4 => handle_usage(api),
            5 => break,
            _ => Ok(()),
        };
        if let Err(e) = outcome {
            println!("{} failed: {:#}", items[selection], e);
        }
    }
    Ok(())
}

/// Spinner shown while a request is in flight.
fn spinner(message: &'static str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

/// Ask for one or more comma separated paths and upload them as a batch.
fn handle_upload(api: &UtApi) -> Result<()> {
    let raw: String = Input::new()
        .with_prompt("File path(s), comma separated")
        .interact_text()?;

    let files = raw
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| LocalFile::new(p).with_context(|| format!("Cannot read {}", p)))
        .collect::<Result<Vec<_>>>()?;
    if files.is_empty() {
        println!("Nothing to upload.");
        return Ok(());
    }

    let spinner = spinner("Uploading...")?;
    let uploaded = api.upload_files(&files);
    spinner.finish_and_clear();

    for result in uploaded? {
        println!("{} ({}) -> {}", result.file_name, result.file_type, result.file_url);
    }
    Ok(())
}

/// Fetch the file listing behind a spinner.
fn fetch_files(api: &UtApi) -> Result<Vec<ListedFile>> {
    let spinner = spinner("Fetching files...")?;
    let files = api.list_files();
    spinner.finish_and_clear();
    Ok(files?)
}

fn describe(file: &ListedFile) -> String {
    format!("{}  {}  [{}]", file.key, file.name, file.status)
}

fn handle_list(api: &UtApi) -> Result<()> {
    let files = fetch_files(api)?;
    if files.is_empty() {
        println!("No files.");
    }
    for file in &files {
        println!("{}", describe(file));
    }
    Ok(())
}

/// Pick files from the listing and delete them after confirmation.
fn handle_delete(api: &UtApi) -> Result<()> {
    let files = fetch_files(api)?;
    if files.is_empty() {
        println!("No files to delete.");
        return Ok(());
    }

    let labels: Vec<String> = files.iter().map(describe).collect();
    let picked = MultiSelect::new()
        .with_prompt("Select files to delete (space to toggle)")
        .items(&labels)
        .interact()?;
    if picked.is_empty() {
        return Ok(());
    }
    if !Confirm::new()
        .with_prompt(format!("Delete {} file(s)?", picked.len()))
        .interact()?
    {
        return Ok(());
    }

    let keys: Vec<String> = picked.iter().map(|&i| files[i].key.clone()).collect();
    let spinner = spinner("Deleting...")?;
    let deleted = api.delete_files(keys);
    spinner.finish_and_clear();
    deleted?;
    println!("Deleted {} file(s).", picked.len());
    Ok(())
}

fn handle_rename(api: &UtApi) -> Result<()> {
    let files = fetch_files(api)?;
    if files.is_empty() {
        println!("No files to rename.");
        return Ok(());
    }

    let labels: Vec<String> = files.iter().map(describe).collect();
    let index = Select::new()
        .with_prompt("File to rename")
        .items(&labels)
        .default(0)
        .interact()?;
    let new_name: String = Input::new()
        .with_prompt("New name")
        .with_initial_text(files[index].name.clone())
        .interact_text()?;

    let spinner = spinner("Renaming...")?;
    let renamed = api.rename_files([RenameUpdate::new(files[index].key.clone(), new_name)]);
    spinner.finish_and_clear();
    renamed?;
    println!("Renamed.");
    Ok(())
}

fn handle_usage(api: &UtApi) -> Result<()> {
    let spinner = spinner("Fetching usage...")?;
    let usage = api.get_usage_info();
    spinner.finish_and_clear();
    let usage = usage?;

    println!("Files uploaded : {}", usage.files_uploaded);
    println!("App storage    : {}", HumanBytes(usage.app_total_bytes));
    println!("Total storage  : {}", HumanBytes(usage.total_bytes));
    println!("Limit          : {}", HumanBytes(usage.limit_bytes));
    Ok(())
}
