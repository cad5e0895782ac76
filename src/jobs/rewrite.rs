use crate::error::{Error, Result};
use crate::repo::RepoRef;
use crate::utils::files::{file_name, list_images, require_dir, require_file};
use crate::utils::table::{column_index, is_url, read_rows, write_rows, Row};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct RewriteConfig {
    pub input_csv: PathBuf,
    pub output_csv: PathBuf,
    pub column: String,
    pub images_dir: PathBuf,
    pub repo: RepoRef,
    /// Path of `images_dir` inside the repository
    pub prefix: String,
}

/// Point each URL cell of `column` at the next file of `files`, in row order.
///
/// Data rows holding a URL and files must pair up one to one; any difference
/// in count is an error and `rows` is left untouched.
pub fn substitute_urls(
    rows: &mut [Row],
    column: usize,
    files: &[String],
    repo: &RepoRef,
    prefix: &str,
) -> Result<usize> {
    let eligible: Vec<usize> = rows
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, row)| row.get(column).map_or(false, |cell| is_url(cell)))
        .map(|(i, _)| i)
        .collect();

    if eligible.len() != files.len() {
        return Err(Error::Misaligned {
            rows: eligible.len(),
            files: files.len(),
        });
    }

    for (row, file) in eligible.iter().zip(files) {
        rows[*row][column] = repo.raw_url(prefix, file);
    }
    Ok(eligible.len())
}

/// Rewrite the CSV so its URL cells point at the processed images
pub fn rewrite_csv(config: &RewriteConfig) -> Result<usize> {
    require_file(&config.input_csv)?;
    require_dir(&config.images_dir)?;

    let mut rows = read_rows(&config.input_csv)?;
    let column = column_index(&rows, &config.column)?;

    let files: Vec<String> = list_images(&config.images_dir)?
        .iter()
        .map(|path| file_name(path))
        .collect();
    if files.is_empty() {
        return Err(Error::NoImages(config.images_dir.clone()));
    }

    let replaced = substitute_urls(&mut rows, column, &files, &config.repo, &config.prefix)?;
    write_rows(&config.output_csv, &rows)?;

    println!("CSV written: {}", config.output_csv.display());
    println!("Links replaced: {}", replaced);
    println!("Pointing at: {}/", config.prefix.trim_matches('/'));

    Ok(replaced)
}
