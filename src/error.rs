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

//! Error type shared by the pattern generators, the PNG encoder and the driver.

/// Errors produced while generating or encoding a texture.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    /// Pixel buffer or image dimensions do not describe a valid PNG.
    #[error("validation error: {0}")]
    Validation(String),
    /// Pattern parameters for which the pattern is undefined.
    #[error("domain error: {0}")]
    Domain(String),
    /// Directory creation, file write or zlib stream failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TextureError>;
