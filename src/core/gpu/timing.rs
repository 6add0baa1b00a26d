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

//! Scanline and frame timing
//!
//! The GPU only keeps counters here; it never stalls command processing.
//! The host calls [`GPU::tick`](super::GPU::tick) with elapsed cycles and
//! uses the returned flags to drive its own display loop.
//!
//! | Mode | Cycles per scanline | Scanlines per frame |
//! |------|---------------------|---------------------|
//! | NTSC | 3413                | 263                 |
//! | PAL  | 3406                | 314                 |

use serde::{Deserialize, Serialize};

use super::registers::{DisplayRange, VideoMode};

/// Horizontal/vertical timing counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timing {
    /// Cycles elapsed within the current scanline
    dots: u32,

    /// Current scanline
    scanline: u16,

    /// Inside the vertical blanking period
    in_vblank: bool,

    /// Current interlace field (false = even)
    odd_field: bool,

    /// Completed frames since reset
    frames: u64,
}

impl Timing {
    /// NTSC cycles per scanline
    pub const NTSC_CYCLES_PER_SCANLINE: u32 = 3413;

    /// NTSC scanlines per frame
    pub const NTSC_SCANLINES_PER_FRAME: u16 = 263;

    /// PAL cycles per scanline
    pub const PAL_CYCLES_PER_SCANLINE: u32 = 3406;

    /// PAL scanlines per frame
    pub const PAL_SCANLINES_PER_FRAME: u16 = 314;

    /// Cycles per scanline for a video mode
    pub fn cycles_per_scanline(mode: VideoMode) -> u32 {
        match mode {
            VideoMode::NTSC => Self::NTSC_CYCLES_PER_SCANLINE,
            VideoMode::PAL => Self::PAL_CYCLES_PER_SCANLINE,
        }
    }

    /// Scanlines per frame for a video mode
    pub fn scanlines_per_frame(mode: VideoMode) -> u16 {
        match mode {
            VideoMode::NTSC => Self::NTSC_SCANLINES_PER_FRAME,
            VideoMode::PAL => Self::PAL_SCANLINES_PER_FRAME,
        }
    }

    /// Advance by `cycles`
    ///
    /// Returns `(vblank_started, scanline_completed)`. Both flags are sticky
    /// across the whole call, so a long tick that crosses several scanlines
    /// still reports each kind of event once.
    pub fn tick(
        &mut self,
        cycles: u32,
        mode: VideoMode,
        interlaced: bool,
        vertical_range: DisplayRange,
    ) -> (bool, bool) {
        let cycles_per_line = Self::cycles_per_scanline(mode);
        let lines_per_frame = Self::scanlines_per_frame(mode);

        let mut vblank_started = false;
        let mut scanline_completed = false;

        let mut dots = self.dots as u64 + cycles as u64;
        while dots >= cycles_per_line as u64 {
            dots -= cycles_per_line as u64;
            scanline_completed = true;

            self.scanline = self.scanline.saturating_add(1);
            if self.scanline >= lines_per_frame {
                self.scanline = 0;
                self.frames += 1;
                if interlaced {
                    self.odd_field = !self.odd_field;
                }
            }

            let was_in_vblank = self.in_vblank;
            self.in_vblank =
                self.scanline < vertical_range.start || self.scanline >= vertical_range.end;
            if self.in_vblank && !was_in_vblank {
                vblank_started = true;
            }
        }

        self.dots = dots as u32;

        (vblank_started, scanline_completed)
    }

    /// Current scanline
    pub fn scanline(&self) -> u16 {
        self.scanline
    }

    /// Whether the vertical blanking period is active
    pub fn in_vblank(&self) -> bool {
        self.in_vblank
    }

    /// Completed frames since reset
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Current interlace field
    pub fn odd_field(&self) -> bool {
        self.odd_field
    }

    /// Status bit 31: the line being drawn is odd
    ///
    /// Interlaced output reports the field, progressive output the scanline
    /// parity. Always 0 during vblank.
    pub fn odd_line(&self, interlaced: bool) -> bool {
        if self.in_vblank {
            false
        } else if interlaced {
            self.odd_field
        } else {
            self.scanline & 1 != 0
        }
    }
}
