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

//! GP0 fill command
//!
//! Implements the VRAM rectangle fill (quick fill) operation.

use super::super::types::Color;
use super::super::GPU;

impl GPU {
    /// GP0(0x02): Fill Rectangle in VRAM
    ///
    /// Fills a rectangular area in VRAM with a solid color.
    /// This is a fast operation that doesn't use the rendering pipeline.
    ///
    /// # Command Format
    ///
    /// ```text
    /// Word 0: 0x02BBGGRR - Command + Color (24-bit RGB)
    /// Word 1: 0xYYYYXXXX - Top-left corner
    /// Word 2: 0xHHHHWWWW - Width and height
    /// ```
    ///
    /// # Notes
    ///
    /// - Width and height are both rounded up to a multiple of 16
    /// - Coordinates wrap at the VRAM edges
    /// - Ignores the drawing area, drawing offset and mask settings
    /// - The written mask bit is always 0
    ///
    /// # Examples
    ///
    /// ```
    /// # use psrx_gpu::core::GPU;
    /// let mut gpu = GPU::new();
    ///
    /// // 5×3 request clears a full 16×16 block
    /// gpu.write_gp0(0x02FFFFFF);
    /// gpu.write_gp0(0x00000000);
    /// gpu.write_gp0(0x00030005);
    /// assert_eq!(gpu.read_vram(15, 15), 0x7FFF);
    /// assert_eq!(gpu.read_vram(16, 16), 0x0000);
    /// ```
    pub(in crate::core::gpu) fn gp0_fill_rectangle(&mut self, words: &[u32]) {
        let color = Color::from_u32(words[0]);

        let x = (words[1] & 0x3FF) as u16;
        let y = ((words[1] >> 16) & 0x1FF) as u16;

        let width = (((words[2] & 0x3FF) as u16) + 0x0F) & !0x0F;
        let height = ((((words[2] >> 16) & 0x1FF) as u16) + 0x0F) & !0x0F;

        log::trace!(
            "Fill rectangle: ({}, {}) size {}×{} color ({}, {}, {})",
            x,
            y,
            width,
            height,
            color.r,
            color.g,
            color.b
        );

        self.vram.fill_rect(x, y, width, height, color.to_rgb15());
    }
}
