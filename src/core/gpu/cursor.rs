// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
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

//! VRAM transfer cursor
//!
//! Tracks the progress of a streaming CPU↔VRAM copy. Pixels are visited
//! left-to-right, top-to-bottom inside the transfer rectangle, and the
//! rectangle itself wraps around the VRAM edges.

use serde::{Deserialize, Serialize};

/// Progress of one CPU→VRAM or VRAM→CPU transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferCursor {
    /// Transfer start X coordinate
    pub x: u16,

    /// Transfer start Y coordinate
    pub y: u16,

    /// Transfer width in pixels
    pub width: u16,

    /// Transfer height in pixels
    pub height: u16,

    /// Current X position relative to `x`
    pub current_x: u16,

    /// Current Y position relative to `y`
    pub current_y: u16,

    /// Half-words (pixels) left to transfer
    pub remaining: u32,
}

impl TransferCursor {
    /// Start a transfer over a rectangle
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x: x & 0x3FF,
            y: y & 0x1FF,
            width,
            height,
            current_x: 0,
            current_y: 0,
            remaining: width as u32 * height as u32,
        }
    }

    /// Decode the position and size words of a transfer command
    ///
    /// Position: X in bits 0-9, Y in bits 16-24.
    /// Size: width in bits 0-15, height in bits 16-31, where 0 means the
    /// maximum (1024 or 512).
    pub fn from_command(position: u32, size: u32) -> Self {
        let (x, y) = decode_position(position);
        let (width, height) = decode_size(size);
        Self::new(x, y, width, height)
    }

    /// VRAM coordinate of the next pixel
    #[inline(always)]
    pub fn position(&self) -> (u16, u16) {
        (
            self.x.wrapping_add(self.current_x) & 0x3FF,
            self.y.wrapping_add(self.current_y) & 0x1FF,
        )
    }

    /// Move to the next pixel
    ///
    /// Returns `true` once the last pixel has been consumed.
    #[inline(always)]
    pub fn advance(&mut self) -> bool {
        self.current_x = self.current_x.wrapping_add(1);
        if self.current_x >= self.width {
            self.current_x = 0;
            self.current_y = self.current_y.wrapping_add(1);
        }
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }

    /// Whether every pixel has been transferred
    #[inline(always)]
    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }
}

/// Decode a VRAM position word (X bits 0-9, Y bits 16-24)
#[inline(always)]
pub(crate) fn decode_position(value: u32) -> (u16, u16) {
    ((value & 0x3FF) as u16, ((value >> 16) & 0x1FF) as u16)
}

/// Decode a transfer size word, mapping 0 to the maximum
#[inline(always)]
pub(crate) fn decode_size(value: u32) -> (u16, u16) {
    let width = (((value & 0xFFFF) as u16).wrapping_sub(1) & 0x3FF) + 1;
    let height = (((value >> 16) as u16).wrapping_sub(1) & 0x1FF) + 1;
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_walks_row_major() {
        let mut cursor = TransferCursor::new(10, 20, 2, 2);
        assert_eq!(cursor.remaining, 4);

        assert_eq!(cursor.position(), (10, 20));
        assert!(!cursor.advance());
        assert_eq!(cursor.position(), (11, 20));
        assert!(!cursor.advance());
        assert_eq!(cursor.position(), (10, 21));
        assert!(!cursor.advance());
        assert_eq!(cursor.position(), (11, 21));
        assert!(cursor.advance());
        assert!(cursor.is_complete());
    }

    #[test]
    fn test_cursor_wraps_at_vram_edge() {
        let mut cursor = TransferCursor::new(1023, 511, 2, 2);
        cursor.advance();
        assert_eq!(cursor.position(), (0, 511));
        cursor.advance();
        assert_eq!(cursor.position(), (1023, 0));
    }

    #[test]
    fn test_size_zero_means_maximum() {
        assert_eq!(decode_size(0), (1024, 512));
        assert_eq!(decode_size(0x0003_0005), (5, 3));
        assert_eq!(decode_size(0x0201_0401), (1, 1));
    }

    #[test]
    fn test_position_masks_high_bits() {
        assert_eq!(decode_position(0xFFFF_FFFF), (1023, 511));
    }
}
