// Copyright 2025 Dustin McAfee
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Procedural test textures for renderer verification.
//!
//! The crate has two layers:
//!
//! - [`pattern`]: pure generators producing row-major RGBA buffers
//!   (checkerboard, gradient, UV test, grid, alpha test).
//! - [`encoder`]: a minimal PNG writer (signature, IHDR, one zlib IDAT, IEND)
//!   with chunk framing in [`chunk`].
//!
//! [`generate_textures`] ties them together: every canonical pattern is
//! rendered, encoded and written to `<output_dir>/<name>.png`.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use test_textures::{generate_textures, TEXTURE_SIZE};
//!
//! let written = generate_textures(Path::new("Assets/Textures"), TEXTURE_SIZE)?;
//! assert_eq!(written.len(), 5);
//! # Ok::<(), test_textures::TextureError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod chunk;
pub mod encoder;
pub mod error;
pub mod pattern;

use std::path::{Path, PathBuf};

pub use encoder::{encode_png, write_png, write_png_file};
pub use error::{Result, TextureError};
pub use pattern::{get_pattern, Pattern, PatternKind};

/// Width and height of every generated texture
pub const TEXTURE_SIZE: u32 = 256;

/// Output directory, relative to the crate directory.
pub const OUTPUT_DIR: &str = "../Assets/Textures";

/// A texture written by [`generate_textures`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTexture {
    pub kind: PatternKind,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Resolves [`OUTPUT_DIR`] against the crate directory.
#[must_use]
pub fn default_output_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(OUTPUT_DIR)
}

/// Renders and encodes a single texture without touching the filesystem.
///
/// # Errors
///
/// Returns the pattern's error or an encoder error.
pub fn render_png(kind: PatternKind, size: u32) -> Result<Vec<u8>> {
    let pixels = get_pattern(kind).generate(size, size)?;
    encode_png(size, size, &pixels)
}

/// Writes every canonical texture as a `size`x`size` PNG into `output_dir`.
///
/// Same as [`generate_textures_with`] without a per-file callback.
///
/// # Errors
///
/// See [`generate_textures_with`].
pub fn generate_textures(output_dir: &Path, size: u32) -> Result<Vec<GeneratedTexture>> {
    generate_textures_with(output_dir, size, |_| {})
}

/// Writes every canonical texture as a `size`x`size` PNG into `output_dir`,
/// calling `on_written` right after each file lands on disk.
///
/// The directory is created with its parents if needed. Textures are written
/// in [`PatternKind::ALL`] order; the first failure aborts the run and files
/// already written are left in place (and have already been reported).
///
/// # Errors
///
/// Returns `TextureError::Io` if the directory or a file cannot be written, or
/// the generator/encoder error for the texture that failed.
pub fn generate_textures_with<F>(
    output_dir: &Path,
    size: u32,
    mut on_written: F,
) -> Result<Vec<GeneratedTexture>>
where
    F: FnMut(&GeneratedTexture),
{
    std::fs::create_dir_all(output_dir)?;

    #[cfg(feature = "debug-logging")]
    log::info!(
        "generate_textures: writing {} textures of {size}x{size} to {}",
        PatternKind::ALL.len(),
        output_dir.display()
    );

    let mut written = Vec::with_capacity(PatternKind::ALL.len());
    for kind in PatternKind::ALL {
        let pattern = get_pattern(kind);
        let pixels = pattern.generate(size, size)?;
        let path = output_dir.join(pattern.file_name());
        write_png_file(&path, size, size, &pixels)?;

        #[cfg(feature = "debug-logging")]
        log::info!("generate_textures: wrote {}", path.display());

        let texture = GeneratedTexture {
            kind,
            path,
            width: size,
            height: size,
        };
        on_written(&texture);
        written.push(texture);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "test-textures-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_generate_textures_writes_all_files() {
        let dir = scratch_dir("all").join("nested/Textures");
        let written = generate_textures(&dir, 16).unwrap();

        let names: Vec<String> = written
            .iter()
            .map(|t| t.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            [
                "checkerboard.png",
                "gradient.png",
                "uv_test.png",
                "grid.png",
                "alpha_test.png"
            ]
        );
        for texture in &written {
            let bytes = std::fs::read(&texture.path).unwrap();
            assert_eq!(bytes, render_png(texture.kind, 16).unwrap());
            assert_eq!((texture.width, texture.height), (16, 16));
        }

        let _ = std::fs::remove_dir_all(dir.parent().unwrap().parent().unwrap());
    }

    #[test]
    fn test_generate_textures_propagates_domain_error() {
        let dir = scratch_dir("degenerate");
        // uv_test is undefined at 1x1; checkerboard and gradient are written first
        let result = generate_textures(&dir, 1);
        assert!(matches!(result, Err(TextureError::Domain(_))));
        assert!(dir.join("gradient.png").exists());
        assert!(!dir.join("uv_test.png").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_reports_each_file_before_failure() {
        let dir = scratch_dir("reported");
        let mut reported = Vec::new();
        // uv_test fails at 1x1, after two files are already on disk
        let result = generate_textures_with(&dir, 1, |t| reported.push(t.kind));

        assert!(matches!(result, Err(TextureError::Domain(_))));
        assert_eq!(
            reported,
            [PatternKind::Checkerboard, PatternKind::Gradient]
        );

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_callback_sees_every_file_in_order() {
        let dir = scratch_dir("callback");
        let mut reported = Vec::new();
        let written = generate_textures_with(&dir, 8, |t| {
            assert!(t.path.exists(), "{} reported before it was written", t.kind);
            reported.push(t.clone());
        })
        .unwrap();

        assert_eq!(reported, written);
        let kinds: Vec<PatternKind> = reported.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, PatternKind::ALL);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_output_dir_blocked_by_file() {
        let dir = scratch_dir("blocked");
        std::fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("not-a-dir");
        std::fs::write(&blocker, b"x").unwrap();

        let result = generate_textures(&blocker.join("Textures"), 16);
        assert!(matches!(result, Err(TextureError::Io(_))));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_default_output_dir() {
        let dir = default_output_dir();
        assert!(dir.ends_with("../Assets/Textures"));
    }
}
