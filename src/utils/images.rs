use crate::error::Result;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, ImageDecoder, ImageFormat, ImageReader, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Horizontal crop of a `width x height` source, always spanning the full height
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropWindow {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropWindow {
    /// Center a window of `round(height * aspect_ratio)` pixels on the source.
    ///
    /// Returns `None` when the source is already no wider than that, in which
    /// case nothing should be cropped.
    pub fn centered(width: u32, height: u32, aspect_ratio: f64) -> Option<Self> {
        let ideal = ideal_width(height, aspect_ratio);
        if width <= ideal {
            return None;
        }

        let left = (width - ideal) / 2;
        Some(Self {
            left,
            top: 0,
            right: left + ideal,
            bottom: height,
        })
    }

    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// Width matching `aspect_ratio` at the given height, never below one pixel
pub fn ideal_width(height: u32, aspect_ratio: f64) -> u32 {
    ((height as f64 * aspect_ratio).round() as u32).max(1)
}

/// Result of fitting one image to the target card shape
pub struct Fitted {
    pub image: RgbaImage,
    pub window: Option<CropWindow>,
}

/// Crop to the target aspect ratio (if too wide) and resize to exactly `width x height`
pub fn fit_to_card(img: DynamicImage, width: u32, height: u32) -> Fitted {
    let aspect_ratio = width as f64 / height as f64;
    let img = img.into_rgba8();
    let window = CropWindow::centered(img.width(), img.height(), aspect_ratio);

    let cropped = match window {
        Some(w) => image::imageops::crop_imm(&img, w.left, w.top, w.width(), w.height()).to_image(),
        None => img,
    };

    // Resize using Lanczos3 filter
    let image = image::imageops::resize(&cropped, width, height, FilterType::Lanczos3);

    Fitted { image, window }
}

/// Save as PNG with the strongest compression the encoder offers
pub fn save_png_optimized(img: &RgbaImage, target_path: &Path) -> Result<()> {
    let writer = BufWriter::new(File::create(target_path)?);
    let encoder = PngEncoder::new_with_quality(writer, CompressionType::Best, PngFilter::Adaptive);
    img.write_with_encoder(encoder)?;
    Ok(())
}

/// Header-level facts about an image file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub mode: String,
    pub format: String,
}

/// Read dimensions, color mode and format without decoding pixel data
pub fn probe(path: &Path) -> Result<ImageInfo> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let format = reader.format().map(format_tag).unwrap_or_default();
    let decoder = reader.into_decoder()?;
    let (width, height) = decoder.dimensions();

    Ok(ImageInfo {
        width,
        height,
        mode: color_mode(decoder.color_type()),
        format,
    })
}

/// Conventional short name of a pixel layout (`RGB`, `RGBA`, `L`, ...)
pub fn color_mode(color: ColorType) -> String {
    match color {
        ColorType::L8 => "L".to_string(),
        ColorType::La8 => "LA".to_string(),
        ColorType::Rgb8 => "RGB".to_string(),
        ColorType::Rgba8 => "RGBA".to_string(),
        ColorType::L16 => "I;16".to_string(),
        ColorType::La16 => "LA;16".to_string(),
        ColorType::Rgb16 => "RGB;16".to_string(),
        ColorType::Rgba16 => "RGBA;16".to_string(),
        ColorType::Rgb32F => "RGB;F".to_string(),
        ColorType::Rgba32F => "RGBA;F".to_string(),
        other => format!("{:?}", other),
    }
}

/// Upper-case format name (`PNG`, `JPEG`, `WEBP`, ...)
pub fn format_tag(format: ImageFormat) -> String {
    match format {
        ImageFormat::Png => "PNG".to_string(),
        ImageFormat::Jpeg => "JPEG".to_string(),
        ImageFormat::WebP => "WEBP".to_string(),
        ImageFormat::Gif => "GIF".to_string(),
        ImageFormat::Bmp => "BMP".to_string(),
        ImageFormat::Tiff => "TIFF".to_string(),
        other => format!("{:?}", other).to_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    const CARD_RATIO: f64 = 683.0 / 1024.0;

    #[test]
    fn ideal_width_rounds_height_times_ratio() {
        assert_eq!(ideal_width(1500, CARD_RATIO), 1000);
        assert_eq!(ideal_width(1024, CARD_RATIO), 683);
        assert_eq!(ideal_width(1, 0.01), 1);
    }

    #[test]
    fn wide_sources_get_a_centered_full_height_window() {
        for (width, height) in [(2000, 1500), (1001, 1500), (1366, 1024), (4000, 10)] {
            let window = CropWindow::centered(width, height, CARD_RATIO).expect("should crop");
            let left_margin = window.left;
            let right_margin = width - window.right;

            assert_eq!(window.width(), ideal_width(height, CARD_RATIO));
            assert_eq!((window.top, window.bottom), (0, height));
            assert!(left_margin.abs_diff(right_margin) <= 1);
        }
    }

    #[test]
    fn narrow_or_exact_sources_are_not_cropped() {
        assert_eq!(CropWindow::centered(1000, 1500, CARD_RATIO), None);
        assert_eq!(CropWindow::centered(683, 1024, CARD_RATIO), None);
        assert_eq!(CropWindow::centered(300, 1024, CARD_RATIO), None);
    }

    #[test]
    fn fit_to_card_always_hits_target_resolution() {
        for (width, height) in [(1000, 1500), (2048, 1024), (100, 900), (683, 1024)] {
            let img = DynamicImage::ImageRgb8(RgbImage::new(width, height));
            let fitted = fit_to_card(img, 683, 1024);
            assert_eq!(fitted.image.dimensions(), (683, 1024));
        }
    }

    #[test]
    fn fit_to_card_keeps_the_center_of_wide_images() {
        // Red margins around a green center that is exactly card-shaped
        let mut img = RgbImage::from_pixel(300, 150, Rgb([255, 0, 0]));
        for x in 100..200 {
            for y in 0..150 {
                img.put_pixel(x, y, Rgb([0, 255, 0]));
            }
        }

        let fitted = fit_to_card(DynamicImage::ImageRgb8(img), 2, 3);

        assert_eq!(
            fitted.window,
            Some(CropWindow { left: 100, top: 0, right: 200, bottom: 150 })
        );
        assert!(fitted.image.pixels().all(|p| p.0[1] > p.0[0]));
    }

    #[test]
    fn probe_reports_size_mode_and_format() {
        let dir = TempDir::new().expect("tempdir should be created");
        let path = dir.path().join("card.png");
        RgbImage::new(12, 34).save(&path).expect("image should save");

        let info = probe(&path).expect("probe should succeed");

        assert_eq!(
            info,
            ImageInfo {
                width: 12,
                height: 34,
                mode: "RGB".to_string(),
                format: "PNG".to_string(),
            }
        );
    }

    #[test]
    fn saved_png_round_trips_dimensions() {
        let dir = TempDir::new().expect("tempdir should be created");
        let path = dir.path().join("out.png");
        save_png_optimized(&RgbaImage::new(7, 9), &path).expect("png should save");

        let info = probe(&path).expect("probe should succeed");
        assert_eq!((info.width, info.height, info.mode.as_str()), (7, 9, "RGBA"));
    }
}
