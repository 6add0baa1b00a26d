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

//! GP0 Drawing Mode Commands
//!
//! This module implements GP0 commands that control drawing settings such as
//! texture page, drawing area, drawing offset, and masking behavior, plus the
//! two single-word misc commands that touch GPU state.
//!
//! # Commands
//!
//! - 0x01: Clear Texture Cache
//! - 0x1F: Interrupt Request
//! - 0xE1: Draw Mode Setting (texture page, transparency, dithering, etc.)
//! - 0xE2: Texture Window Setting
//! - 0xE3: Set Drawing Area Top-Left
//! - 0xE4: Set Drawing Area Bottom-Right
//! - 0xE5: Set Drawing Offset
//! - 0xE6: Mask Bit Setting
//!
//! # References
//!
//! - [PSX-SPX: GP0 Drawing Settings](http://problemkaputt.de/psx-spx.htm#gpurenderattributes)

use crate::core::gpu::registers::{
    DrawMode, DrawOffset, DrawingArea, MaskSettings, TextureWindow,
};
use crate::core::gpu::GPU;

impl GPU {
    /// GP0(01h) - Clear Cache
    ///
    /// Textures are sampled straight from VRAM, so there is no cache to drop.
    pub(in crate::core::gpu) fn gp0_clear_cache(&mut self) {
        log::trace!("Texture cache clear");
    }

    /// GP0(1Fh) - Interrupt Request
    ///
    /// Raises the GPU interrupt flag (status bit 24) until GP1(02h)
    /// acknowledges it.
    pub(in crate::core::gpu) fn gp0_interrupt_request(&mut self) {
        self.regs.interrupt_request = true;
        log::debug!("GPU interrupt requested");
    }

    /// GP0(E1h) - Draw Mode Setting (aka "Texpage")
    ///
    /// Sets texture page location, texture color depth, semi-transparency mode,
    /// dithering, drawing to display area, and texture disable flags.
    ///
    /// # Command Format
    ///
    /// ```text
    /// 0xE1000000 | params
    ///   Bit 0-3:   Texture page X Base   (N*64)
    ///   Bit 4:     Texture page Y Base   (N*256, 0=0, 1=256)
    ///   Bit 5-6:   Semi Transparency     (0=B/2+F/2, 1=B+F, 2=B-F, 3=B+F/4)
    ///   Bit 7-8:   Texture page colors   (0=4bit, 1=8bit, 2=15bit)
    ///   Bit 9:     Dithering enabled     (0=Off, 1=On)
    ///   Bit 10:    Drawing to display    (0=Prohibited, 1=Allowed)
    ///   Bit 11:    Texture disable       (0=Normal, 1=Disable)
    ///   Bit 12:    Textured rect X-flip (for Textured Rectangle command)
    ///   Bit 13:    Textured rect Y-flip (for Textured Rectangle command)
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// # use psrx_gpu::core::GPU;
    /// let mut gpu = GPU::new();
    ///
    /// // Set texture page to (128, 256) with 4-bit color
    /// gpu.write_gp0(0xE1000012);  // X=2 (2*64=128), Y=1 (1*256=256)
    /// assert_eq!(gpu.status() & 0x1F, 0x12);
    /// ```
    pub(in crate::core::gpu) fn gp0_draw_mode(&mut self, command: u32) {
        let mode = DrawMode::from_command(command, self.regs.texture_disable_allowed);
        self.regs.draw_mode = mode;

        log::debug!(
            "Draw mode: page=({}, {}) depth={} semi={} dither={} tex_disable={} flip=({}, {})",
            mode.texture_page_x_base as u16 * 64,
            mode.texture_page_y_base as u16 * 256,
            mode.texture_depth,
            mode.semi_transparency,
            mode.dithering,
            mode.texture_disable,
            mode.texture_x_flip,
            mode.texture_y_flip
        );
    }

    /// GP0(E2h) - Texture Window Setting
    ///
    /// Sets the texture window which controls texture coordinate wrapping.
    ///
    /// # Command Format
    ///
    /// ```text
    /// 0xE2000000 | params
    ///   Bit 0-4:   Texture window Mask X   (in 8 pixel steps)
    ///   Bit 5-9:   Texture window Mask Y   (in 8 pixel steps)
    ///   Bit 10-14: Texture window Offset X (in 8 pixel steps)
    ///   Bit 15-19: Texture window Offset Y (in 8 pixel steps)
    /// ```
    pub(in crate::core::gpu) fn gp0_texture_window(&mut self, command: u32) {
        let window = TextureWindow::from_command(command);
        self.regs.texture_window = window;

        log::debug!(
            "Texture window: mask=({}, {}) offset=({}, {})",
            window.mask_x,
            window.mask_y,
            window.offset_x,
            window.offset_y
        );
    }

    /// GP0(E3h) - Set Drawing Area Top-Left
    ///
    /// ```text
    /// 0xE3000000 | params
    ///   Bit 0-9:   X-coordinate (0-1023)
    ///   Bit 10-18: Y-coordinate (0-511)
    /// ```
    pub(in crate::core::gpu) fn gp0_draw_area_top_left(&mut self, command: u32) {
        let (x, y) = DrawingArea::decode_corner(command);
        self.regs.draw_area.left = x;
        self.regs.draw_area.top = y;

        log::debug!("Draw area top-left: ({}, {})", x, y);
    }

    /// GP0(E4h) - Set Drawing Area Bottom-Right
    ///
    /// Same layout as E3h; the corner is inclusive.
    pub(in crate::core::gpu) fn gp0_draw_area_bottom_right(&mut self, command: u32) {
        let (x, y) = DrawingArea::decode_corner(command);
        self.regs.draw_area.right = x;
        self.regs.draw_area.bottom = y;

        log::debug!("Draw area bottom-right: ({}, {})", x, y);
    }

    /// GP0(E5h) - Set Drawing Offset
    ///
    /// ```text
    /// 0xE5000000 | params
    ///   Bit 0-10:  X-offset (-1024..+1023, signed)
    ///   Bit 11-21: Y-offset (-1024..+1023, signed)
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// # use psrx_gpu::core::GPU;
    /// let mut gpu = GPU::new();
    /// gpu.write_gp0(0xE5000000 | (0x7FF << 11) | 0x010); // (16, -1)
    /// assert_eq!(gpu.registers().draw_offset.x, 16);
    /// assert_eq!(gpu.registers().draw_offset.y, -1);
    /// ```
    pub(in crate::core::gpu) fn gp0_draw_offset(&mut self, command: u32) {
        let offset = DrawOffset::from_command(command);
        self.regs.draw_offset = offset;

        log::debug!("Draw offset: ({}, {})", offset.x, offset.y);
    }

    /// GP0(E6h) - Mask Bit Setting
    ///
    /// ```text
    /// 0xE6000000 | params
    ///   Bit 0: Set mask while drawing (0=TextureBit15, 1=ForceBit15=1)
    ///   Bit 1: Check mask before draw (0=Draw Always, 1=Draw if Bit15=0)
    /// ```
    pub(in crate::core::gpu) fn gp0_mask_settings(&mut self, command: u32) {
        let mask = MaskSettings::from_command(command);
        self.regs.mask = mask;

        log::debug!(
            "Mask settings: set={} check={}",
            mask.set_mask_bit,
            mask.check_mask_bit
        );
    }
}
