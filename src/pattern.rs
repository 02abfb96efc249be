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

//! Procedural RGBA test patterns.
//!
//! Every generator returns a row-major RGBA buffer of exactly
//! `width * height * 4` bytes. Generators are pure: the same arguments always
//! produce the same bytes, which the golden tests rely on.
//!
//! # Patterns
//!
//! - **Checkerboard:** white and gray tiles, for UV seams and filtering.
//! - **Gradient:** red grows left to right, green top to bottom, blue shrinks
//!   left to right.
//! - **UV test:** red = U, green = V, both spanning the full 0-255 range.
//! - **Grid:** one-pixel yellow lines over a dark blue background.
//! - **Alpha test:** orange disc with alpha fading towards its edge, fully
//!   transparent outside.

use std::fmt;
use std::str::FromStr;

use crate::encoder::BYTES_PER_PIXEL;
use crate::error::{Result, TextureError};

/// Default checkerboard tile size in pixels
pub const DEFAULT_TILE_SIZE: u32 = 32;
/// Default grid cell size in pixels
pub const DEFAULT_GRID_SIZE: u32 = 32;

const WHITE: [u8; 4] = [255, 255, 255, 255];
const GRAY: [u8; 4] = [128, 128, 128, 255];
const YELLOW: [u8; 4] = [255, 255, 0, 255];
const DARK_BLUE: [u8; 4] = [32, 32, 64, 255];
const ORANGE: [u8; 3] = [255, 165, 0];
const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// Allocates the buffer and calls `pixel(x, y)` for every pixel, row by row.
fn fill<F>(width: u32, height: u32, mut pixel: F) -> Result<Vec<u8>>
where
    F: FnMut(u32, u32) -> [u8; 4],
{
    if width == 0 || height == 0 {
        return Err(TextureError::Domain(format!(
            "pattern dimensions must be non-zero, got {width}x{height}"
        )));
    }
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
        .ok_or_else(|| {
            TextureError::Validation(format!("pattern {width}x{height} is too large to allocate"))
        })?;

    let mut pixels = Vec::with_capacity(len);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&pixel(x, y));
        }
    }
    Ok(pixels)
}

/// Truncates toward zero into a channel value.
///
/// Every caller passes a value in `0.0..=255.0`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel(value: f64) -> u8 {
    value as u8
}

/// Generates a white/gray checkerboard.
///
/// # Errors
///
/// Returns `TextureError::Domain` if a dimension or `tile_size` is zero.
pub fn checkerboard(width: u32, height: u32, tile_size: u32) -> Result<Vec<u8>> {
    if tile_size == 0 {
        return Err(TextureError::Domain(
            "checkerboard tile size must be non-zero".into(),
        ));
    }
    fill(width, height, |x, y| {
        if (x / tile_size + y / tile_size) % 2 == 0 {
            WHITE
        } else {
            GRAY
        }
    })
}

/// Generates the red/green/blue gradient.
///
/// Channels are computed in `f64` and truncated toward zero, so at the last
/// column red stops at 254 for a 256-wide image while blue already reads 0.
///
/// # Errors
///
/// Returns `TextureError::Domain` if a dimension is zero.
pub fn gradient(width: u32, height: u32) -> Result<Vec<u8>> {
    let w = f64::from(width);
    let h = f64::from(height);
    fill(width, height, |x, y| {
        let x = f64::from(x);
        let y = f64::from(y);
        [
            channel(255.0 * x / w),
            channel(255.0 * y / h),
            channel(255.0 * (1.0 - x / w)),
            255,
        ]
    })
}

/// Generates the UV test pattern: (U, V, 0, 255).
///
/// # Errors
///
/// Returns `TextureError::Domain` if `width` or `height` is below 2, since U
/// and V are normalized by `width - 1` and `height - 1`.
pub fn uv_test(width: u32, height: u32) -> Result<Vec<u8>> {
    if width < 2 || height < 2 {
        return Err(TextureError::Domain(format!(
            "uv_test requires width and height > 1, got {width}x{height}"
        )));
    }
    let max_u = f64::from(width - 1);
    let max_v = f64::from(height - 1);
    fill(width, height, |x, y| {
        [
            channel(255.0 * f64::from(x) / max_u),
            channel(255.0 * f64::from(y) / max_v),
            0,
            255,
        ]
    })
}

/// Generates yellow grid lines every `grid_size` pixels.
///
/// # Errors
///
/// Returns `TextureError::Domain` if a dimension or `grid_size` is zero.
pub fn grid(width: u32, height: u32, grid_size: u32) -> Result<Vec<u8>> {
    if grid_size == 0 {
        return Err(TextureError::Domain("grid size must be non-zero".into()));
    }
    fill(width, height, |x, y| {
        if x % grid_size == 0 || y % grid_size == 0 {
            YELLOW
        } else {
            DARK_BLUE
        }
    })
}

/// Generates an orange disc whose alpha falls off linearly from the center.
///
/// The disc radius is 80% of the smaller half-dimension.
///
/// # Errors
///
/// Returns `TextureError::Domain` if a dimension is zero.
pub fn alpha_test(width: u32, height: u32) -> Result<Vec<u8>> {
    let center_x = f64::from(width) / 2.0;
    let center_y = f64::from(height) / 2.0;
    let max_radius = center_x.min(center_y) * 0.8;

    fill(width, height, |x, y| {
        let dx = f64::from(x) - center_x;
        let dy = f64::from(y) - center_y;
        let distance = (dx * dx + dy * dy).sqrt();

        if distance < max_radius {
            let [r, g, b] = ORANGE;
            [r, g, b, channel(255.0 * (1.0 - distance / max_radius))]
        } else {
            TRANSPARENT
        }
    })
}

/// A texture pattern that can be rendered at any size.
pub trait Pattern {
    /// Which of the canonical textures this pattern is.
    fn kind(&self) -> PatternKind;

    /// Output file name, e.g. `checkerboard.png`.
    fn file_name(&self) -> String {
        format!("{}.png", self.kind())
    }

    /// Renders the pattern as a row-major RGBA buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is undefined for the given dimensions.
    fn generate(&self, width: u32, height: u32) -> Result<Vec<u8>>;
}

/// Checkerboard with a configurable tile size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkerboard {
    pub tile_size: u32,
}

impl Default for Checkerboard {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
        }
    }
}

impl Pattern for Checkerboard {
    fn kind(&self) -> PatternKind {
        PatternKind::Checkerboard
    }

    fn generate(&self, width: u32, height: u32) -> Result<Vec<u8>> {
        checkerboard(width, height, self.tile_size)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gradient;

impl Pattern for Gradient {
    fn kind(&self) -> PatternKind {
        PatternKind::Gradient
    }

    fn generate(&self, width: u32, height: u32) -> Result<Vec<u8>> {
        gradient(width, height)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UvTest;

impl Pattern for UvTest {
    fn kind(&self) -> PatternKind {
        PatternKind::UvTest
    }

    fn generate(&self, width: u32, height: u32) -> Result<Vec<u8>> {
        uv_test(width, height)
    }
}

/// Grid with a configurable cell size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub grid_size: u32,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
        }
    }
}

impl Pattern for Grid {
    fn kind(&self) -> PatternKind {
        PatternKind::Grid
    }

    fn generate(&self, width: u32, height: u32) -> Result<Vec<u8>> {
        grid(width, height, self.grid_size)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlphaTest;

impl Pattern for AlphaTest {
    fn kind(&self) -> PatternKind {
        PatternKind::AlphaTest
    }

    fn generate(&self, width: u32, height: u32) -> Result<Vec<u8>> {
        alpha_test(width, height)
    }
}

/// The canonical set of test textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Checkerboard,
    Gradient,
    UvTest,
    Grid,
    AlphaTest,
}

impl PatternKind {
    /// All textures in the order the generator writes them.
    pub const ALL: [PatternKind; 5] = [
        PatternKind::Checkerboard,
        PatternKind::Gradient,
        PatternKind::UvTest,
        PatternKind::Grid,
        PatternKind::AlphaTest,
    ];

    /// Short name, also used as the file stem.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            PatternKind::Checkerboard => "checkerboard",
            PatternKind::Gradient => "gradient",
            PatternKind::UvTest => "uv_test",
            PatternKind::Grid => "grid",
            PatternKind::AlphaTest => "alpha_test",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PatternKind {
    type Err = TextureError;

    fn from_str(s: &str) -> Result<Self> {
        PatternKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| TextureError::Validation(format!("unknown pattern: {s}")))
    }
}

/// Returns the pattern for `kind` with its default parameters.
#[must_use]
pub fn get_pattern(kind: PatternKind) -> Box<dyn Pattern> {
    match kind {
        PatternKind::Checkerboard => Box::new(Checkerboard::default()),
        PatternKind::Gradient => Box::new(Gradient),
        PatternKind::UvTest => Box::new(UvTest),
        PatternKind::Grid => Box::new(Grid::default()),
        PatternKind::AlphaTest => Box::new(AlphaTest),
    }
}
