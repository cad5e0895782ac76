use crate::error::{Error, Result};
use crate::repo::RepoRef;
use crate::utils::files::{ensure_directory, require_file};
use crate::utils::http::{build_client, infer_extension};
use crate::utils::table::{column_index, read_rows, url_cells, write_rows};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest;
use reqwest::header::CONTENT_TYPE;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;

#[derive(Debug, Clone)]
pub struct DownloadConfig {
    pub input_csv: PathBuf,
    pub output_csv: PathBuf,
    pub column: String,
    /// Rows before this index are never scanned for URLs
    pub skip_rows: usize,
    pub deck_size: usize,
    pub images_dir: PathBuf,
    pub repo: RepoRef,
    /// Location of `images_dir` inside the repository
    pub repo_prefix: String,
    pub timeout: Duration,
    pub user_agent: String,
}

#[derive(Debug, Clone)]
pub struct DownloadSummary {
    /// Saved file names, in deck order
    pub files: Vec<String>,
    pub images_dir: PathBuf,
    pub output_csv: PathBuf,
}

impl DownloadSummary {
    fn print(&self) {
        println!();
        println!("Downloaded: {} images", self.files.len());
        println!("Images saved in: {}", self.images_dir.display());
        println!("CSV written: {}", self.output_csv.display());
    }
}

/// Fetch one image into `<images_dir>/<stem>.<ext>`, returning the final file name.
///
/// The body is streamed into a `.part` file that is renamed into place only
/// after the last byte has been written.
pub async fn download_image(
    client: &reqwest::Client,
    url: &str,
    images_dir: &Path,
    stem: &str,
) -> Result<String> {
    let mut response = client.get(url).send().await?.error_for_status()?;

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let extension = infer_extension(url, content_type.as_deref())?;

    let file_name = format!("{}.{}", stem, extension);
    let final_path = images_dir.join(&file_name);
    let temp_path = images_dir.join(format!("{}.part", file_name));

    let mut file = tokio::fs::File::create(&temp_path).await?;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    drop(file);

    tokio::fs::rename(&temp_path, &final_path).await?;
    Ok(file_name)
}

/// Download every deck image referenced by the CSV and write a copy of the
/// CSV whose URL cells point at the repository copies.
pub async fn download_deck(config: &DownloadConfig) -> Result<DownloadSummary> {
    require_file(&config.input_csv)?;

    let mut rows = read_rows(&config.input_csv)?;
    if rows.is_empty() {
        return Err(Error::EmptyCsv(config.input_csv.clone()));
    }

    let column = column_index(&rows, &config.column)?;
    let cells = url_cells(&rows, column, config.skip_rows, config.deck_size);
    if cells.is_empty() {
        return Err(Error::NoUrls(config.column.clone()));
    }

    ensure_directory(&config.images_dir)?;
    let client = build_client(config.timeout, &config.user_agent)?;

    println!("Downloading {} cards...", cells.len());

    let pb = ProgressBar::new(cells.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let mut files = Vec::with_capacity(cells.len());
    for (i, cell) in cells.iter().enumerate() {
        let stem = format!("{:03}", i + 1);
        pb.println(format!("[{:02}/{}] {}", i + 1, cells.len(), cell.url));

        let file_name = match download_image(&client, &cell.url, &config.images_dir, &stem).await
        {
            Ok(name) => name,
            Err(e) => {
                pb.abandon();
                return Err(e);
            }
        };
        files.push(file_name);
        pb.inc(1);
    }

    pb.finish_with_message("Download complete!");

    for (cell, file_name) in cells.iter().zip(&files) {
        rows[cell.row][column] = config.repo.raw_url(&config.repo_prefix, file_name);
    }
    write_rows(&config.output_csv, &rows)?;

    let summary = DownloadSummary {
        files,
        images_dir: config.images_dir.clone(),
        output_csv: config.output_csv.clone(),
    };
    summary.print();
    Ok(summary)
}
