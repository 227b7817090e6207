/// Renders a synthetic test scene as ASCII art and runs each preview
/// filter over it, saving everything next to the working directory.
use asciiview::{BlurParams, ContourParams, SharpenParams};
use image::{Rgb, RgbImage};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("asciiview demo");
    println!("==============\n");

    // Build a test scene: gradient background, bright disc, dark ring.
    let width = 320;
    let height = 240;
    let mut img = RgbImage::new(width, height);

    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let radius = 70.0;

    for y in 0..height {
        for x in 0..width {
            let gray = (x * 255 / width) as u8;
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            let dist = (dx * dx + dy * dy).sqrt();

            let pixel = if dist < radius {
                Rgb([240, 200, 60])
            } else if (dist - radius).abs() < 6.0 {
                Rgb([20, 20, 20])
            } else {
                Rgb([gray, gray, gray])
            };
            img.put_pixel(x, y, pixel);
        }
    }

    let input = "demo_input.png";
    img.save(input)?;
    println!("wrote test scene to {input}");

    // ASCII render, both plain and colorized.
    let art = asciiview::render(input, 120, false)?;
    asciiview::io::save(&art, "demo_ascii.png")?;
    let color_art = asciiview::render(input, 120, true)?;
    asciiview::io::save(&color_art, "demo_ascii_color.png")?;

    // Text export of the same grid.
    let rows = asciiview::render_text(input, 80)?;
    asciiview::io::write_text(&rows, "demo_ascii.txt")?;
    println!("ascii grid: {} cols x {} rows", 80, rows.len());

    // One pass of each preview filter, always from the pristine source.
    let outputs = [
        ("demo_blur.png", asciiview::blur(input, &BlurParams { kernel: 9 })?),
        ("demo_sharpen.png", asciiview::sharpen(input, &SharpenParams { weight: 2.0 })?),
        ("demo_contour.png", asciiview::contour(input, &ContourParams::default())?),
        ("demo_invert.png", asciiview::invert(input)?),
        ("demo_gray.png", asciiview::grayscale(input)?),
    ];
    for (name, buffer) in &outputs {
        asciiview::io::save(buffer, name)?;
        println!("wrote {name}");
    }

    println!("\ndone");
    Ok(())
}
