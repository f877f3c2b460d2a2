//! Image loading, classification and report rendering.
//!
//! Drives the whole load-classify-render pass: decode the source image, hand
//! its pixels to the classifier, print the per-category summary and emit the
//! requested artifacts (JSON report, bar chart, preview thumbnail) into the
//! output directory.

use crate::classify::{classify_image, ClassificationResult, Dominance};
use crate::Args;
use anyhow::{Context, Result};
use image::{imageops, DynamicImage, ImageBuffer, Rgba, RgbaImage};
use serde::Serialize;
use std::{
    fs::{create_dir_all, File},
    path::Path,
    str::FromStr,
};

const CHART_WIDTH: u32 = 550;
const CHART_HEIGHT: u32 = 420;
const CHART_PADDING: u32 = 30;
const CHART_TOP: u32 = 24;
const CHART_BOTTOM: u32 = 36;

/// Share of a category slot occupied by its bar.
const BAR_FILL: f32 = 0.6;

const AXIS_COLOR: Rgba<u8> = Rgba([200, 200, 200, 255]);
const DEFAULT_BACKGROUND: Rgba<u8> = Rgba([18, 18, 18, 255]);

/// Label and swatch color for one dominance category.
pub struct CategoryStyle {
    pub label: &'static str,
    pub color: Rgba<u8>,
}

/// Presentation configuration for the rendered report.
///
/// Carried explicitly through the rendering functions so callers can restyle
/// the output without touching process-wide state.
pub struct ReportStyle {
    pub background: Rgba<u8>,
    pub categories: [CategoryStyle; 4],
}

impl ReportStyle {
    /// Default category palette over the given chart background.
    ///
    /// The background accepts any CSS color; unparseable values fall back to
    /// the default dark background.
    pub fn with_background(color: &str) -> Self {
        Self {
            background: parse_css_color(color, DEFAULT_BACKGROUND),
            categories: [
                CategoryStyle {
                    label: "Red-dominant",
                    color: Rgba([229, 57, 53, 255]),
                },
                CategoryStyle {
                    label: "Green-dominant",
                    color: Rgba([67, 160, 71, 255]),
                },
                CategoryStyle {
                    label: "Blue-dominant",
                    color: Rgba([30, 136, 229, 255]),
                },
                CategoryStyle {
                    label: "Neutral/Gray",
                    color: Rgba([158, 158, 158, 255]),
                },
            ],
        }
    }

    fn category(&self, dominance: Dominance) -> &CategoryStyle {
        &self.categories[dominance as usize]
    }
}

/// Summary of one analyzed image, serialized as report.json.
#[derive(Serialize, Debug, Clone)]
pub struct Report {
    pub input: String,
    pub width: u32,
    pub height: u32,
    pub total_pixels: u64,
    pub counts: ClassificationResult,
}

pub fn run(args: Args) -> Result<()> {
    // Load and normalize the source image (8-bit RGB, alpha discarded)
    let source = load_image(&args.input)?;
    let rgb = source.to_rgb8();

    let counts = classify_image(&rgb);

    let report = Report {
        input: args.input.display().to_string(),
        width: rgb.width(),
        height: rgb.height(),
        total_pixels: counts.total(),
        counts,
    };

    let style = ReportStyle::with_background(&args.chart_background);
    print_summary(&report, &style);

    // Check if any artifact selection flags are set
    let has_selection_flags = args.json || args.chart || args.thumbnail;

    // Ensure the output directory exists
    create_dir_all(&args.output).context("Can't create output directory")?;

    // Emit artifacts based on options; no selection flags means all of them
    if args.json || !has_selection_flags {
        write_report_json(&report, &args.output)?;
    }

    if args.chart || !has_selection_flags {
        write_chart(&report.counts, &style, &args.output)?;
    }

    if args.thumbnail || !has_selection_flags {
        write_thumbnail(&source, args.thumbnail_size, &args.output)?;
    }

    Ok(())
}

fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).with_context(|| format!("Failed to load image: {}", path.display()))
}

/// Print the per-category counts to stdout.
fn print_summary(report: &Report, style: &ReportStyle) {
    println!(
        "Analyzed {} ({}x{}, {} pixels)",
        report.input, report.width, report.height, report.total_pixels
    );
    println!();
    println!("Dominant pixel counts:");

    for dominance in Dominance::ALL {
        let category = style.category(dominance);
        println!(
            "  {:<15} {:>10}  ({:>5.1}%)",
            category.label,
            report.counts.count(dominance),
            report.counts.share(dominance) * 100.0
        );
    }
    println!();
}

fn write_report_json(report: &Report, out_dir: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;

    std::fs::write(out_dir.join("report.json"), json).context("Failed to write report.json")?;

    println!("✓ Generated report.json");
    Ok(())
}

fn write_chart(counts: &ClassificationResult, style: &ReportStyle, out_dir: &Path) -> Result<()> {
    let chart = render_chart(counts, style);

    let output_path = out_dir.join("chart.png");
    save_png(&DynamicImage::ImageRgba8(chart), &output_path)?;

    println!("✓ Generated chart.png");
    Ok(())
}

/// Render the four counts as a bar chart.
///
/// Bars are scaled against the largest count and composed as solid blocks
/// over the configured background, with a light baseline under the plot
/// area. The chart carries no text; counts live in the summary and the JSON
/// report.
fn render_chart(counts: &ClassificationResult, style: &ReportStyle) -> RgbaImage {
    let background = style.background;
    let mut chart = ImageBuffer::from_fn(CHART_WIDTH, CHART_HEIGHT, |_, _| background);

    let plot_width = CHART_WIDTH - 2 * CHART_PADDING;
    let plot_height = CHART_HEIGHT - CHART_TOP - CHART_BOTTOM;
    let baseline_y = CHART_HEIGHT - CHART_BOTTOM;
    let slot_width = plot_width / Dominance::ALL.len() as u32;
    let bar_width = (slot_width as f32 * BAR_FILL) as u32;

    // Scale against the largest count; an all-zero result draws no bars
    let max_count = Dominance::ALL
        .iter()
        .map(|&dominance| counts.count(dominance))
        .max()
        .unwrap_or(0)
        .max(1);

    for (i, &dominance) in Dominance::ALL.iter().enumerate() {
        let count = counts.count(dominance);
        let bar_height = ((count as f64 / max_count as f64) * plot_height as f64).round() as u32;
        if bar_height == 0 {
            continue;
        }

        let color = style.category(dominance).color;
        let bar = ImageBuffer::from_fn(bar_width, bar_height, |_, _| color);

        let x = CHART_PADDING + i as u32 * slot_width + (slot_width - bar_width) / 2;
        let y = baseline_y - bar_height;
        imageops::overlay(&mut chart, &bar, x.into(), y.into());
    }

    let baseline = ImageBuffer::from_fn(plot_width, 1, |_, _| AXIS_COLOR);
    imageops::overlay(&mut chart, &baseline, CHART_PADDING.into(), baseline_y.into());

    chart
}

fn write_thumbnail(source: &DynamicImage, size: u32, out_dir: &Path) -> Result<()> {
    if size == 0 {
        anyhow::bail!("Thumbnail size must be at least 1 pixel");
    }

    let preview = source.thumbnail(size, size);

    let output_path = out_dir.join("thumbnail.png");
    save_png(&preview, &output_path)?;

    println!(
        "✓ Generated thumbnail.png ({}x{})",
        preview.width(),
        preview.height()
    );
    Ok(())
}

fn save_png(image: &DynamicImage, path: &Path) -> Result<()> {
    let mut file = File::create(path).context("Failed to create PNG file")?;
    image
        .write_to(&mut file, image::ImageOutputFormat::Png)
        .context("Failed to write PNG")?;
    Ok(())
}

fn parse_css_color(value: &str, fallback: Rgba<u8>) -> Rgba<u8> {
    css_color::Srgb::from_str(value)
        .map(|color| {
            Rgba([
                (color.red * 255.) as u8,
                (color.green * 255.) as u8,
                (color.blue * 255.) as u8,
                255,
            ])
        })
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot_center_x(slot: u32) -> u32 {
        let plot_width = CHART_WIDTH - 2 * CHART_PADDING;
        let slot_width = plot_width / Dominance::ALL.len() as u32;
        CHART_PADDING + slot * slot_width + slot_width / 2
    }

    #[test]
    fn chart_has_fixed_canvas_size() {
        let counts = ClassificationResult::default();
        let style = ReportStyle::with_background("#121212");

        let chart = render_chart(&counts, &style);
        assert_eq!(chart.width(), CHART_WIDTH);
        assert_eq!(chart.height(), CHART_HEIGHT);
    }

    #[test]
    fn chart_corners_show_the_background() {
        let counts = ClassificationResult {
            red: 10,
            green: 20,
            blue: 30,
            neutral: 40,
        };
        let style = ReportStyle::with_background("#121212");

        let chart = render_chart(&counts, &style);
        assert_eq!(*chart.get_pixel(0, 0), style.background);
        assert_eq!(*chart.get_pixel(CHART_WIDTH - 1, 0), style.background);
        assert_eq!(*chart.get_pixel(0, CHART_HEIGHT - 1), style.background);
        assert_eq!(
            *chart.get_pixel(CHART_WIDTH - 1, CHART_HEIGHT - 1),
            style.background
        );
    }

    #[test]
    fn equal_counts_draw_full_height_bars_in_category_colors() {
        let counts = ClassificationResult {
            red: 2500,
            green: 2500,
            blue: 2500,
            neutral: 2500,
        };
        let style = ReportStyle::with_background("#121212");

        let chart = render_chart(&counts, &style);

        // Every bar reaches the full plot height, so the slot centers at
        // mid-canvas must show each category's color.
        for (i, dominance) in Dominance::ALL.into_iter().enumerate() {
            let pixel = chart.get_pixel(slot_center_x(i as u32), CHART_HEIGHT / 2);
            assert_eq!(
                *pixel,
                style.category(dominance).color,
                "slot {} should show the {} bar",
                i,
                style.category(dominance).label
            );
        }
    }

    #[test]
    fn zero_count_draws_no_bar() {
        let counts = ClassificationResult {
            red: 10,
            green: 0,
            blue: 0,
            neutral: 0,
        };
        let style = ReportStyle::with_background("#121212");

        let chart = render_chart(&counts, &style);
        let just_above_baseline = CHART_HEIGHT - CHART_BOTTOM - 2;

        // Red holds the maximum, so its bar is present...
        assert_eq!(
            *chart.get_pixel(slot_center_x(0), just_above_baseline),
            style.category(Dominance::Red).color
        );

        // ...while the empty categories leave their slots untouched.
        for slot in 1..4 {
            assert_eq!(
                *chart.get_pixel(slot_center_x(slot), just_above_baseline),
                style.background
            );
        }
    }

    #[test]
    fn all_zero_counts_still_draw_the_baseline() {
        let counts = ClassificationResult::default();
        let style = ReportStyle::with_background("#121212");

        let chart = render_chart(&counts, &style);
        let baseline_y = CHART_HEIGHT - CHART_BOTTOM;
        assert_eq!(*chart.get_pixel(slot_center_x(0), baseline_y), AXIS_COLOR);
    }

    #[test]
    fn css_background_colors_are_honored() {
        let white = parse_css_color("#ffffff", DEFAULT_BACKGROUND);
        assert_eq!(white, Rgba([255, 255, 255, 255]));

        let short = parse_css_color("#fff", DEFAULT_BACKGROUND);
        assert_eq!(short, Rgba([255, 255, 255, 255]));

        let functional = parse_css_color("rgb(102, 51, 153)", DEFAULT_BACKGROUND);
        assert_eq!(functional, Rgba([102, 51, 153, 255]));
    }

    #[test]
    fn invalid_css_color_falls_back_to_default() {
        let parsed = parse_css_color("definitely-not-a-color", DEFAULT_BACKGROUND);
        assert_eq!(parsed, DEFAULT_BACKGROUND);
    }
}
