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

//! PNG chunk framing.
//!
//! # Wire Format
//!
//! ```text
//! +----------------+----------------+-----------------+----------------+
//! | length (u32be) | type (4 ASCII) | payload         | CRC32 (u32be)  |
//! +----------------+----------------+-----------------+----------------+
//! ```
//!
//! `length` counts the payload only. The CRC covers type + payload and uses the
//! standard zlib polynomial, which is what `flate2::Crc` computes.

use bytes::{BufMut, BytesMut};
use flate2::Crc;

/// The fixed 8-byte PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Image header chunk type
pub const IHDR: [u8; 4] = *b"IHDR";
/// Image data chunk type
pub const IDAT: [u8; 4] = *b"IDAT";
/// Image trailer chunk type
pub const IEND: [u8; 4] = *b"IEND";

/// A typed, checksummed block of a PNG stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    chunk_type: [u8; 4],
    payload: Vec<u8>,
}

impl Chunk {
    /// Creates a chunk of the given type.
    #[must_use]
    pub fn new(chunk_type: [u8; 4], payload: Vec<u8>) -> Self {
        Self {
            chunk_type,
            payload,
        }
    }

    /// Chunk type bytes.
    #[must_use]
    pub fn chunk_type(&self) -> [u8; 4] {
        self.chunk_type
    }

    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// CRC32 over type + payload.
    #[must_use]
    pub fn crc(&self) -> u32 {
        let mut crc = Crc::new();
        crc.update(&self.chunk_type);
        crc.update(&self.payload);
        crc.sum()
    }

    /// Size of the framed chunk on the wire (12 bytes of framing + payload).
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        12 + self.payload.len()
    }

    /// Appends the framed chunk to `buf`.
    ///
    /// Payload length is checked by the encoder before a chunk is built, so
    /// the cast to `u32` cannot truncate for chunks produced by this crate.
    #[allow(clippy::cast_possible_truncation)]
    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.reserve(self.encoded_len());
        buf.put_u32(self.payload.len() as u32);
        buf.put_slice(&self.chunk_type);
        buf.put_slice(&self.payload);
        buf.put_u32(self.crc());
    }
}
