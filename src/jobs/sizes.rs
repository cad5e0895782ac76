use crate::error::Result;
use crate::repo::path_prefix;
use crate::utils::files::{ensure_directory, list_images_recursive};
use crate::utils::images::probe;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct SizesConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// File stem of the reports; `<stem>.csv` and `<stem>_summary.csv` are written
    pub report_name: String,
}

/// One measured image, as written to the detail report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRecord {
    pub file: String,
    pub width: u32,
    pub height: u32,
    pub mode: String,
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizeCount {
    pub width: u32,
    pub height: u32,
    pub count: usize,
}

#[derive(Debug, Clone)]
pub struct SizesReport {
    pub records: Vec<ImageRecord>,
    pub sizes: Vec<SizeCount>,
    /// Files or directories that could not be read
    pub errors: usize,
    pub detail_path: PathBuf,
    pub summary_path: PathBuf,
}

impl SizesReport {
    fn print(&self) {
        println!("Reports written:");
        println!("  - {}", self.detail_path.display());
        println!("  - {}", self.summary_path.display());
        println!(
            "Total images: {} in {} distinct sizes (errors excluded)",
            self.records.len(),
            self.sizes.len()
        );
        if self.errors > 0 {
            println!("Failed to open: {}", self.errors);
        }
    }
}

/// Frequency of each (width, height) pair, most common first; ties keep first-seen order
pub fn size_frequencies(records: &[ImageRecord]) -> Vec<SizeCount> {
    let mut sizes: Vec<SizeCount> = Vec::new();
    for record in records {
        match sizes
            .iter_mut()
            .find(|s| s.width == record.width && s.height == record.height)
        {
            Some(entry) => entry.count += 1,
            None => sizes.push(SizeCount {
                width: record.width,
                height: record.height,
                count: 1,
            }),
        }
    }
    sizes.sort_by(|a, b| b.count.cmp(&a.count));
    sizes
}

fn write_report<T: Serialize>(path: &Path, rows: &[T], header: &[&str]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Measure every image under the input directory and write the two reports.
///
/// Files that cannot be opened, and directory entries the walk cannot read,
/// are counted in `errors` and otherwise ignored.
pub fn report_sizes(config: &SizesConfig) -> Result<SizesReport> {
    let scan = list_images_recursive(&config.input_dir)?;
    ensure_directory(&config.output_dir)?;

    let mut records = Vec::new();
    let mut errors = scan.unreadable;

    for path in &scan.images {
        match probe(path) {
            Ok(info) => {
                let relative = path.strip_prefix(&config.input_dir).unwrap_or(path);
                records.push(ImageRecord {
                    file: path_prefix(relative),
                    width: info.width,
                    height: info.height,
                    mode: info.mode,
                    format: info.format,
                });
            }
            Err(e) => {
                eprintln!("Failed to read {}: {}", path.display(), e);
                errors += 1;
            }
        }
    }

    let sizes = size_frequencies(&records);

    let detail_path = config.output_dir.join(format!("{}.csv", config.report_name));
    let summary_path = config
        .output_dir
        .join(format!("{}_summary.csv", config.report_name));

    write_report(
        &detail_path,
        &records,
        &["file", "width", "height", "mode", "format"],
    )?;
    write_report(&summary_path, &sizes, &["width", "height", "count"])?;

    let report = SizesReport {
        records,
        sizes,
        errors,
        detail_path,
        summary_path,
    };
    report.print();
    Ok(report)
}
