use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("File not found: {}", .0.display())]
    MissingFile(PathBuf),
    #[error("Directory not found: {}", .0.display())]
    MissingDir(PathBuf),
    #[error("Column '{column}' not found. Header found: {header:?}")]
    MissingColumn { column: String, header: Vec<String> },
    #[error("CSV is empty: {}", .0.display())]
    EmptyCsv(PathBuf),
    #[error("No URLs found in column '{0}'")]
    NoUrls(String),
    #[error("No images found in {}", .0.display())]
    NoImages(PathBuf),
    #[error("{rows} rows hold URLs but {files} images were found; refusing to pair them")]
    Misaligned { rows: usize, files: usize },
    #[error("{} and {} would both be written to {}", .first.display(), .second.display(), .output.display())]
    OutputCollision {
        first: PathBuf,
        second: PathBuf,
        output: PathBuf,
    },
    #[error("Invalid repository '{0}', expected owner/repo")]
    InvalidRepo(String),
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}
