use crate::error::Result;
use crate::repo::RepoRef;
use crate::utils::files::{file_name, list_images};
use crate::utils::table::{write_rows, Row};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct LinksConfig {
    pub input_dir: PathBuf,
    pub repo: RepoRef,
    /// Path of `input_dir` inside the repository
    pub prefix: String,
    pub output_csv: PathBuf,
}

/// Write a `file,url` CSV with one raw URL per image in the input directory
pub fn generate_links(config: &LinksConfig) -> Result<Vec<Row>> {
    let images = list_images(&config.input_dir)?;

    let mut rows: Vec<Row> = vec![vec!["file".to_string(), "url".to_string()]];
    rows.extend(images.iter().map(|path| {
        let name = file_name(path);
        let url = config.repo.raw_url(&config.prefix, &name);
        vec![name, url]
    }));

    write_rows(&config.output_csv, &rows)?;

    println!("CSV written: {}", config.output_csv.display());
    println!("Total images: {}", images.len());

    Ok(rows)
}
