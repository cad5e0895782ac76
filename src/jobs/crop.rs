use crate::error::{Error, Result};
use crate::utils::files::{ensure_directory, file_name, list_images};
use crate::utils::images::{fit_to_card, save_png_optimized};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct CropConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CropSummary {
    pub total: usize,
    pub cropped: usize,
    pub kept: usize,
}

/// Pair each input with its `<stem>.png` output, refusing inputs that share a stem
fn plan_outputs(images: Vec<PathBuf>, output_dir: &Path) -> Result<Vec<(PathBuf, PathBuf)>> {
    let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();
    let mut plan = Vec::with_capacity(images.len());

    for path in images {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name(&path));
        let output = output_dir.join(format!("{}.png", stem));

        if let Some(first) = claimed.get(&output) {
            return Err(Error::OutputCollision {
                first: first.clone(),
                second: path,
                output,
            });
        }
        claimed.insert(output.clone(), path.clone());
        plan.push((path, output));
    }

    Ok(plan)
}

/// Crop every image in the input directory to the card aspect ratio and
/// resize it to the card resolution, writing PNGs to the output directory.
pub fn crop_images(config: &CropConfig) -> Result<CropSummary> {
    let plan = plan_outputs(list_images(&config.input_dir)?, &config.output_dir)?;
    ensure_directory(&config.output_dir)?;

    let mut summary = CropSummary::default();

    for (path, output) in plan {
        summary.total += 1;
        let name = file_name(&path);

        let img = image::open(&path)?;
        let (width, height) = (img.width(), img.height());
        let fitted = fit_to_card(img, config.width, config.height);

        match fitted.window {
            Some(window) => {
                summary.cropped += 1;
                println!(
                    "cropped {}: {}x{} -> {}x{}",
                    name,
                    width,
                    height,
                    window.width(),
                    window.height()
                );
            }
            None => {
                summary.kept += 1;
                println!("kept {}: {}x{}", name, width, height);
            }
        }

        save_png_optimized(&fitted.image, &output)?;
    }

    println!();
    println!("Total: {}", summary.total);
    println!("Cropped: {}", summary.cropped);
    println!("Kept: {}", summary.kept);
    println!("Output: {}", config.output_dir.display());

    Ok(summary)
}
