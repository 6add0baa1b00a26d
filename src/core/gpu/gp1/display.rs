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

//! GP1 display configuration commands
//!
//! Implements display settings including resolution, area, and video mode.

use super::super::registers::{DisplayMode, DisplayRange};
use super::super::GPU;

impl GPU {
    /// GP1(0x03): Display Enable
    ///
    /// # Arguments
    ///
    /// * `value` - Bit 0: 0=Enable, 1=Disable (inverted logic)
    pub(in crate::core::gpu) fn gp1_display_enable(&mut self, value: u32) {
        self.regs.display_disabled = value & 1 != 0;

        log::debug!(
            "Display {}",
            if self.regs.display_disabled {
                "disabled"
            } else {
                "enabled"
            }
        );
    }

    /// GP1(0x05): Start of Display Area
    ///
    /// # Arguments
    ///
    /// * `value` - Bits 0-9: X coordinate, Bits 10-18: Y coordinate
    pub(in crate::core::gpu) fn gp1_display_area_start(&mut self, value: u32) {
        let start = &mut self.regs.display_start;
        start.x = (value & 0x3FF) as u16;
        start.y = ((value >> 10) & 0x1FF) as u16;

        log::debug!("Display area start: ({}, {})", start.x, start.y);
    }

    /// GP1(0x06): Horizontal Display Range
    ///
    /// # Arguments
    ///
    /// * `value` - Bits 0-11: X1 start, Bits 12-23: X2 end (GPU clock ticks)
    pub(in crate::core::gpu) fn gp1_horizontal_display_range(&mut self, value: u32) {
        let range = DisplayRange {
            start: (value & 0xFFF) as u16,
            end: ((value >> 12) & 0xFFF) as u16,
        };
        self.regs.horizontal_range = range;

        log::debug!("Horizontal display range: {} to {}", range.start, range.end);
    }

    /// GP1(0x07): Vertical Display Range
    ///
    /// # Arguments
    ///
    /// * `value` - Bits 0-9: Y1 start, Bits 10-19: Y2 end (scanlines)
    pub(in crate::core::gpu) fn gp1_vertical_display_range(&mut self, value: u32) {
        let range = DisplayRange {
            start: (value & 0x3FF) as u16,
            end: ((value >> 10) & 0x3FF) as u16,
        };
        self.regs.vertical_range = range;

        log::debug!("Vertical display range: {} to {}", range.start, range.end);
    }

    /// GP1(0x08): Display Mode
    ///
    /// Sets the display mode including resolution, video mode, and color depth.
    /// The video mode also selects the NTSC or PAL timing used by `tick`.
    ///
    /// # Arguments
    ///
    /// * `value` - Display mode configuration bits:
    ///   - Bits 0-1: Horizontal resolution 1 (256/320/512/640)
    ///   - Bit 2: Vertical resolution (0=240, 1=480)
    ///   - Bit 3: Video mode (0=NTSC, 1=PAL)
    ///   - Bit 4: Color depth (0=15bit, 1=24bit)
    ///   - Bit 5: Interlace (0=Off, 1=On)
    ///   - Bit 6: Horizontal resolution 2 (368)
    ///   - Bit 7: Reverse flag
    pub(in crate::core::gpu) fn gp1_display_mode(&mut self, value: u32) {
        let mode = DisplayMode::from_command(value);
        self.regs.display_mode = mode;

        log::debug!(
            "Display mode: {}×{} {:?} {:?} interlaced={}",
            mode.width(),
            mode.height(),
            mode.video_mode,
            mode.color_depth,
            mode.interlaced
        );
    }
}
