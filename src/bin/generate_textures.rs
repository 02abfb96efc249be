//! Test Texture Generator
//!
//! Generates the deterministic RGBA test textures used to verify texture
//! mapping in the renderer. The pixel data is identical on every platform; the
//! PNG bytes may differ between zlib backends.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin generate_textures
//! ```
//!
//! # Generated Files
//!
//! All files are 256x256 8-bit RGBA and land in `../Assets/Textures` relative
//! to this crate:
//!
//! - `checkerboard.png` - white/gray 32px tiles
//! - `gradient.png` - red/green ramps with inverse blue
//! - `uv_test.png` - red = U, green = V
//! - `grid.png` - yellow lines every 32px on dark blue
//! - `alpha_test.png` - orange disc fading to transparent

use std::process::ExitCode;

use test_textures::{default_output_dir, generate_textures_with, TEXTURE_SIZE};

fn run() -> test_textures::Result<()> {
    let output_dir = default_output_dir();
    let written = generate_textures_with(&output_dir, TEXTURE_SIZE, |texture| {
        println!(
            "Created: {} ({}x{})",
            texture.path.display(),
            texture.width,
            texture.height
        );
    })?;

    println!("\nAll textures generated in: {}", output_dir.display());
    println!("\nAvailable textures:");
    for texture in &written {
        if let Some(name) = texture.path.file_name() {
            println!("  - {}", name.to_string_lossy());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Failed to generate textures: {e}");
            ExitCode::FAILURE
        }
    }
}
