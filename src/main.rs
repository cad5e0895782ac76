use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
mod error;
mod jobs;
mod repo;
mod utils;

use jobs::crop::CropConfig;
use jobs::download::DownloadConfig;
use jobs::links::LinksConfig;
use jobs::rewrite::RewriteConfig;
use jobs::sizes::SizesConfig;
use repo::{path_prefix, RepoRef};

/// Maintenance jobs for a card-image asset repository
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Crop images to the card aspect ratio and resize them to the card resolution
    Crop {
        /// Directory with the source images
        #[arg(short, long, default_value = "images/cigano")]
        input: PathBuf,

        /// Directory where the PNG results are written
        #[arg(short, long, default_value = "images/cigano_cropped")]
        output: PathBuf,

        /// Width of the output images
        #[arg(long, default_value_t = 683, value_parser = clap::value_parser!(u32).range(1..))]
        width: u32,

        /// Height of the output images
        #[arg(long, default_value_t = 1024, value_parser = clap::value_parser!(u32).range(1..))]
        height: u32,
    },
    /// Report width, height, mode and format of every image under a directory
    Sizes {
        /// Directory scanned recursively for images
        #[arg(long)]
        indir: PathBuf,

        /// Directory where the reports are written
        #[arg(long)]
        outdir: PathBuf,

        /// File stem of the reports
        #[arg(long, default_value = "cigano_image_sizes")]
        name: String,
    },
    /// Download the images referenced by a spreadsheet CSV and rewrite its links
    Download {
        /// Spreadsheet export to read
        #[arg(long, default_value = "cigano.csv")]
        input: PathBuf,

        /// CSV written with the new links
        #[arg(long, default_value = "cigano_raw.csv")]
        output: PathBuf,

        /// Column holding the image URLs
        #[arg(long, default_value = "Cigano")]
        column: String,

        /// Number of leading rows never scanned for URLs
        #[arg(long, default_value_t = 3)]
        skip_rows: usize,

        /// Maximum number of images to download
        #[arg(long, default_value_t = 36)]
        deck_size: usize,

        /// Directory the images are saved to
        #[arg(long, default_value = "imagens/cigano")]
        images_dir: PathBuf,

        /// Repository in owner/repo format
        #[arg(long, default_value = "skewoof/baralho-cigano-imagens")]
        repo: String,

        /// Repository branch
        #[arg(long, default_value = "main")]
        branch: String,

        /// Path of the images inside the repository (defaults to --images-dir)
        #[arg(long)]
        prefix: Option<String>,

        /// Request timeout in seconds
        #[arg(long, default_value_t = 30)]
        timeout: u64,
    },
    /// Generate a CSV of raw links for the images in a directory
    Links {
        /// Directory with the images
        #[arg(long)]
        indir: PathBuf,

        /// Repository in owner/repo format
        #[arg(long)]
        repo: String,

        /// Repository branch
        #[arg(long, default_value = "main")]
        branch: String,

        /// Path of the images inside the repository
        #[arg(long)]
        prefix: String,

        /// CSV to write
        #[arg(long)]
        outcsv: PathBuf,
    },
    /// Point the URL cells of a CSV at already processed images, in file name order
    Rewrite {
        /// CSV whose links point at the original images
        #[arg(long, default_value = "cigano_raw.csv")]
        input: PathBuf,

        /// CSV written with the new links
        #[arg(long, default_value = "cigano_cropped.csv")]
        output: PathBuf,

        /// Column holding the image URLs
        #[arg(long, default_value = "Cigano")]
        column: String,

        /// Directory with the processed images
        #[arg(long, default_value = "imagens/cigano_cropped")]
        images_dir: PathBuf,

        /// Repository in owner/repo format
        #[arg(long, default_value = "skewoof/baralho-cigano-imagens")]
        repo: String,

        /// Repository branch
        #[arg(long, default_value = "main")]
        branch: String,

        /// Path of the images inside the repository
        #[arg(long, default_value = "imagens/cigano_cropped")]
        prefix: String,
    },
}

async fn run(command: Commands) -> error::Result<()> {
    match command {
        Commands::Crop {
            input,
            output,
            width,
            height,
        } => {
            jobs::crop::crop_images(&CropConfig {
                input_dir: input,
                output_dir: output,
                width,
                height,
            })?;
        }
        Commands::Sizes {
            indir,
            outdir,
            name,
        } => {
            jobs::sizes::report_sizes(&SizesConfig {
                input_dir: indir,
                output_dir: outdir,
                report_name: name,
            })?;
        }
        Commands::Download {
            input,
            output,
            column,
            skip_rows,
            deck_size,
            images_dir,
            repo,
            branch,
            prefix,
            timeout,
        } => {
            let repo_prefix = prefix.unwrap_or_else(|| path_prefix(&images_dir));
            let config = DownloadConfig {
                input_csv: input,
                output_csv: output,
                column,
                skip_rows,
                deck_size,
                images_dir,
                repo: RepoRef::parse(&repo, &branch)?,
                repo_prefix,
                timeout: Duration::from_secs(timeout),
                user_agent: utils::http::get_user_agent().to_string(),
            };
            jobs::download::download_deck(&config).await?;
        }
        Commands::Links {
            indir,
            repo,
            branch,
            prefix,
            outcsv,
        } => {
            jobs::links::generate_links(&LinksConfig {
                input_dir: indir,
                repo: RepoRef::parse(&repo, &branch)?,
                prefix,
                output_csv: outcsv,
            })?;
        }
        Commands::Rewrite {
            input,
            output,
            column,
            images_dir,
            repo,
            branch,
            prefix,
        } => {
            jobs::rewrite::rewrite_csv(&RewriteConfig {
                input_csv: input,
                output_csv: output,
                column,
                images_dir,
                repo: RepoRef::parse(&repo, &branch)?,
                prefix,
            })?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args.command).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
