use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod classify;
mod report;

#[derive(Debug, Parser)]
#[clap(
    name = "pixellator",
    about = "Classify image pixels by their dominant color channel"
)]
pub struct Args {
    /// Path to the source image (PNG, JPEG, GIF, BMP, ...).
    #[clap(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output directory for the generated report files.
    #[clap(short, long, value_name = "DIR", default_value = "./report")]
    pub output: PathBuf,

    /// Write the classification counts as report.json.
    #[clap(long)]
    pub json: bool,

    /// Render the counts as a bar chart (chart.png).
    #[clap(long)]
    pub chart: bool,

    /// Write a downscaled preview of the source image (thumbnail.png).
    #[clap(long)]
    pub thumbnail: bool,

    /// Background color for the rendered chart (CSS color format).
    #[clap(long, value_name = "COLOR", default_value = "#121212")]
    pub chart_background: String,

    /// Longest edge of the preview image, in pixels.
    #[clap(long, value_name = "PIXELS", default_value_t = 220)]
    pub thumbnail_size: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();

    report::run(args)
}
