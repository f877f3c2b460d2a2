use image::io::Reader as ImageReader;

fn main() {
    let mut argv = std::env::args().skip(1);
    let path = argv.next().unwrap_or_else(|| {
        eprintln!("Usage: inspect_pixel <IMAGE> [X] [Y]");
        std::process::exit(2);
    });

    let img = ImageReader::open(&path)
        .expect("Failed to open image")
        .decode()
        .expect("Failed to decode image");

    let rgba_img = img.to_rgba8();
    let width = img.width();
    let height = img.height();

    // Default to the center pixel when no coordinates are given
    let x: u32 = argv
        .next()
        .map(|v| v.parse().expect("X must be a non-negative integer"))
        .unwrap_or(width / 2);
    let y: u32 = argv
        .next()
        .map(|v| v.parse().expect("Y must be a non-negative integer"))
        .unwrap_or(height / 2);

    println!("Inspecting pixel in: {}", path);
    println!("Image dimensions: {}x{}", width, height);

    if x >= width || y >= height {
        eprintln!(
            "Pixel (x={}, y={}) is outside the {}x{} image",
            x, y, width, height
        );
        std::process::exit(1);
    }

    let pixel = rgba_img.get_pixel(x, y);

    println!("\nPixel at (x={}, y={}):", x, y);
    println!(
        "  RGBA: [{}, {}, {}, {}]",
        pixel[0], pixel[1], pixel[2], pixel[3]
    );

    let (r, g, b) = (pixel[0], pixel[1], pixel[2]);
    if r > g && r > b {
        println!("✓ Red channel dominates");
    } else if g > r && g > b {
        println!("✓ Green channel dominates");
    } else if b > r && b > g {
        println!("✓ Blue channel dominates");
    } else {
        println!("⚠ No dominant channel (neutral/gray)");
    }
}
