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

//! GPU register type definitions
//!
//! This module contains the GPU register file: drawing mode, texture window,
//! drawing area, drawing offset, mask policy and the display configuration
//! written through GP1. Each group decodes itself from the command word that
//! sets it, and the whole file is owned by one [`GPU`](super::GPU) instance.

use serde::{Deserialize, Serialize};

use super::types::{BlendMode, TextureDepth};

/// Drawing mode configuration (GP0 0xE1)
///
/// Specifies how primitives are rendered, including texture page selection,
/// transparency mode, and dithering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawMode {
    /// Texture page base X coordinate (in units of 64 pixels, 0-15)
    pub texture_page_x_base: u8,

    /// Texture page base Y coordinate (in units of 256 lines, 0-1)
    pub texture_page_y_base: u8,

    /// Semi-transparency mode (0-3)
    ///
    /// - 0: 0.5×Back + 0.5×Front (average)
    /// - 1: 1.0×Back + 1.0×Front (additive)
    /// - 2: 1.0×Back - 1.0×Front (subtractive)
    /// - 3: 1.0×Back + 0.25×Front (additive with quarter)
    pub semi_transparency: u8,

    /// Texture color depth (0=4bit, 1=8bit, 2=15bit)
    pub texture_depth: u8,

    /// Dithering enabled
    pub dithering: bool,

    /// Drawing to display area allowed
    pub draw_to_display: bool,

    /// Texture disable (only effective when allowed through GP1 0x09)
    pub texture_disable: bool,

    /// Textured rectangle X-flip
    pub texture_x_flip: bool,

    /// Textured rectangle Y-flip
    pub texture_y_flip: bool,
}

impl DrawMode {
    /// Decode the draw mode command
    ///
    /// ```text
    /// Bits 0-3:  Texture page X base (N×64)
    /// Bit  4:    Texture page Y base (N×256)
    /// Bits 5-6:  Semi-transparency mode
    /// Bits 7-8:  Texture depth
    /// Bit  9:    Dithering
    /// Bit  10:   Drawing to display area allowed
    /// Bit  11:   Texture disable
    /// Bit  12:   Textured rectangle X-flip
    /// Bit  13:   Textured rectangle Y-flip
    /// ```
    ///
    /// Texture disable is only latched when `texture_disable_allowed` is set.
    pub fn from_command(value: u32, texture_disable_allowed: bool) -> Self {
        let mut mode = Self::default();
        mode.apply_texpage((value & 0xFFFF) as u16, texture_disable_allowed);
        mode.dithering = (value >> 9) & 1 != 0;
        mode.draw_to_display = (value >> 10) & 1 != 0;
        mode.texture_x_flip = (value >> 12) & 1 != 0;
        mode.texture_y_flip = (value >> 13) & 1 != 0;
        mode
    }

    /// Overwrite the texture page fields from a texpage half-word
    ///
    /// Used by E1 and by textured polygons, whose second texcoord word
    /// carries a texpage that replaces the live drawing mode.
    pub fn apply_texpage(&mut self, texpage: u16, texture_disable_allowed: bool) {
        self.texture_page_x_base = (texpage & 0x0F) as u8;
        self.texture_page_y_base = ((texpage >> 4) & 1) as u8;
        self.semi_transparency = ((texpage >> 5) & 3) as u8;
        self.texture_depth = ((texpage >> 7) & 3) as u8;
        self.texture_disable = texture_disable_allowed && (texpage >> 11) & 1 != 0;
    }

    /// The texpage half-word for the current page, mode and depth
    pub fn texpage(&self) -> u16 {
        (self.texture_page_x_base as u16 & 0x0F)
            | ((self.texture_page_y_base as u16 & 1) << 4)
            | ((self.semi_transparency as u16 & 3) << 5)
            | ((self.texture_depth as u16 & 3) << 7)
    }

    /// Status register bits 0-10 and 15
    pub fn status_bits(&self) -> u32 {
        (self.texpage() as u32)
            | ((self.dithering as u32) << 9)
            | ((self.draw_to_display as u32) << 10)
            | ((self.texture_disable as u32) << 15)
    }

    /// Active blend mode
    pub fn blend_mode(&self) -> BlendMode {
        BlendMode::from_bits(self.semi_transparency)
    }

    /// Active texture depth
    pub fn depth(&self) -> TextureDepth {
        TextureDepth::from(self.texture_depth)
    }
}

/// Drawing area (clipping rectangle, GP0 0xE3/0xE4)
///
/// Defines the rectangular region in VRAM where drawing operations are allowed.
/// Both corners are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawingArea {
    /// Left edge X coordinate (inclusive)
    pub left: u16,

    /// Top edge Y coordinate (inclusive)
    pub top: u16,

    /// Right edge X coordinate (inclusive)
    pub right: u16,

    /// Bottom edge Y coordinate (inclusive)
    pub bottom: u16,
}

impl Default for DrawingArea {
    fn default() -> Self {
        Self {
            left: 0,
            top: 0,
            right: 1023,
            bottom: 511,
        }
    }
}

impl DrawingArea {
    /// Decode a corner word: X in bits 0-9, Y in bits 10-18
    pub fn decode_corner(value: u32) -> (u16, u16) {
        ((value & 0x3FF) as u16, ((value >> 10) & 0x1FF) as u16)
    }

    /// Pack the top-left corner for GP1 0x10 info queries
    pub fn top_left_bits(&self) -> u32 {
        (self.left as u32) | ((self.top as u32) << 10)
    }

    /// Pack the bottom-right corner for GP1 0x10 info queries
    pub fn bottom_right_bits(&self) -> u32 {
        (self.right as u32) | ((self.bottom as u32) << 10)
    }

    /// Whether a pixel lies inside the clip rectangle
    #[inline(always)]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left as i32
            && x <= self.right as i32
            && y >= self.top as i32
            && y <= self.bottom as i32
    }
}

/// Drawing offset (GP0 0xE5), added to every vertex
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawOffset {
    /// Signed 11-bit X offset
    pub x: i16,

    /// Signed 11-bit Y offset
    pub y: i16,
}

impl DrawOffset {
    /// Decode X from bits 0-10 and Y from bits 11-21, both sign-extended
    pub fn from_command(value: u32) -> Self {
        Self {
            x: super::types::sign_extend_11((value & 0x7FF) as u16),
            y: super::types::sign_extend_11(((value >> 11) & 0x7FF) as u16),
        }
    }

    /// Pack for GP1 0x10 info queries
    pub fn to_bits(&self) -> u32 {
        ((self.x as u16 as u32) & 0x7FF) | (((self.y as u16 as u32) & 0x7FF) << 11)
    }
}

/// Texture window settings (GP0 0xE2)
///
/// Texture coordinates are masked and offset in 8-texel steps:
///
/// ```text
/// texcoord = (texcoord AND NOT (mask × 8)) OR ((offset AND mask) × 8)
/// ```
///
/// The AND and OR terms are precomputed when the window is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureWindow {
    /// Texture window mask X (in 8-pixel steps)
    pub mask_x: u8,

    /// Texture window mask Y (in 8-pixel steps)
    pub mask_y: u8,

    /// Texture window offset X (in 8-pixel steps)
    pub offset_x: u8,

    /// Texture window offset Y (in 8-pixel steps)
    pub offset_y: u8,

    and_u: u8,
    and_v: u8,
    or_u: u8,
    or_v: u8,
}

impl Default for TextureWindow {
    fn default() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl TextureWindow {
    /// Build a window from 5-bit mask/offset values
    pub fn new(mask_x: u8, mask_y: u8, offset_x: u8, offset_y: u8) -> Self {
        let (mask_x, mask_y) = (mask_x & 0x1F, mask_y & 0x1F);
        let (offset_x, offset_y) = (offset_x & 0x1F, offset_y & 0x1F);

        Self {
            mask_x,
            mask_y,
            offset_x,
            offset_y,
            and_u: !(mask_x << 3),
            and_v: !(mask_y << 3),
            or_u: (offset_x & mask_x) << 3,
            or_v: (offset_y & mask_y) << 3,
        }
    }

    /// Decode the texture window command
    ///
    /// ```text
    /// Bits 0-4:   Mask X
    /// Bits 5-9:   Mask Y
    /// Bits 10-14: Offset X
    /// Bits 15-19: Offset Y
    /// ```
    pub fn from_command(value: u32) -> Self {
        Self::new(
            (value & 0x1F) as u8,
            ((value >> 5) & 0x1F) as u8,
            ((value >> 10) & 0x1F) as u8,
            ((value >> 15) & 0x1F) as u8,
        )
    }

    /// The 20-bit command value, as returned by GP1 0x10 info queries
    pub fn to_bits(&self) -> u32 {
        (self.mask_x as u32)
            | ((self.mask_y as u32) << 5)
            | ((self.offset_x as u32) << 10)
            | ((self.offset_y as u32) << 15)
    }

    /// Apply the window to a texture coordinate
    #[inline(always)]
    pub fn apply(&self, u: u8, v: u8) -> (u8, u8) {
        ((u & self.and_u) | self.or_u, (v & self.and_v) | self.or_v)
    }
}

/// Mask bit policy (GP0 0xE6)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskSettings {
    /// Force bit 15 on every pixel written
    pub set_mask_bit: bool,

    /// Don't overwrite pixels whose bit 15 is already set
    pub check_mask_bit: bool,
}

impl MaskSettings {
    /// Bit 0 sets the mask while drawing, bit 1 enables the check
    pub fn from_command(value: u32) -> Self {
        Self {
            set_mask_bit: value & 1 != 0,
            check_mask_bit: value & 2 != 0,
        }
    }

    /// The value OR'd into every written pixel
    #[inline(always)]
    pub fn or_bits(&self) -> u16 {
        if self.set_mask_bit {
            0x8000
        } else {
            0
        }
    }

    /// Whether a destination pixel may be overwritten
    #[inline(always)]
    pub fn can_write(&self, destination: u16) -> bool {
        !self.check_mask_bit || destination & 0x8000 == 0
    }
}

/// Start of the display area in VRAM (GP1 0x05)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayStart {
    /// X coordinate in VRAM (0-1023)
    pub x: u16,

    /// Y coordinate in VRAM (0-511)
    pub y: u16,
}

/// Horizontal or vertical display range (GP1 0x06/0x07)
///
/// Horizontal values are in GPU clock ticks, vertical values in scanlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRange {
    /// First tick/line of the visible range
    pub start: u16,

    /// Tick/line after the visible range
    pub end: u16,
}

impl DisplayRange {
    /// Power-on horizontal range
    pub const DEFAULT_HORIZONTAL: Self = Self {
        start: 0x200,
        end: 0xC00,
    };

    /// Power-on vertical range
    pub const DEFAULT_VERTICAL: Self = Self {
        start: 0x010,
        end: 0x100,
    };
}

/// Video mode (refresh rate)
///
/// Determines the video timing: NTSC (60Hz) or PAL (50Hz).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoMode {
    /// NTSC mode: 60Hz refresh rate
    #[default]
    NTSC,

    /// PAL mode: 50Hz refresh rate
    PAL,
}

/// Display color depth
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorDepth {
    /// 15-bit color (5-5-5 RGB)
    #[default]
    C15Bit,

    /// 24-bit color (8-8-8 RGB)
    C24Bit,
}

/// Display mode settings (GP1 0x08)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayMode {
    /// Horizontal resolution 1 (0=256, 1=320, 2=512, 3=640)
    pub horizontal_res: u8,

    /// Horizontal resolution 2 (368 pixel mode, overrides resolution 1)
    pub horizontal_368: bool,

    /// Vertical resolution (false=240, true=480 when interlaced)
    pub vertical_480: bool,

    /// Video mode (NTSC/PAL)
    pub video_mode: VideoMode,

    /// Display area color depth
    pub color_depth: ColorDepth,

    /// Vertical interlace enabled
    pub interlaced: bool,

    /// Reverse flag
    pub reverse: bool,
}

impl DisplayMode {
    /// Decode the display mode command
    ///
    /// ```text
    /// Bits 0-1: Horizontal resolution 1
    /// Bit  2:   Vertical resolution
    /// Bit  3:   Video mode (0=NTSC, 1=PAL)
    /// Bit  4:   Display area color depth (0=15bit, 1=24bit)
    /// Bit  5:   Vertical interlace
    /// Bit  6:   Horizontal resolution 2 (368 mode)
    /// Bit  7:   Reverse flag
    /// ```
    pub fn from_command(value: u32) -> Self {
        Self {
            horizontal_res: (value & 3) as u8,
            vertical_480: (value >> 2) & 1 != 0,
            video_mode: if (value >> 3) & 1 != 0 {
                VideoMode::PAL
            } else {
                VideoMode::NTSC
            },
            color_depth: if (value >> 4) & 1 != 0 {
                ColorDepth::C24Bit
            } else {
                ColorDepth::C15Bit
            },
            interlaced: (value >> 5) & 1 != 0,
            horizontal_368: (value >> 6) & 1 != 0,
            reverse: (value >> 7) & 1 != 0,
        }
    }

    /// Visible width in pixels
    pub fn width(&self) -> u16 {
        const WIDTHS: [u16; 4] = [256, 320, 512, 640];

        if self.horizontal_368 {
            368
        } else {
            WIDTHS[(self.horizontal_res & 3) as usize]
        }
    }

    /// Visible height in lines
    pub fn height(&self) -> u16 {
        let base = match self.video_mode {
            VideoMode::NTSC => 240,
            VideoMode::PAL => 256,
        };
        if self.vertical_480 && self.interlaced {
            base * 2
        } else {
            base
        }
    }

    /// Status register bits 14 and 16-22
    pub fn status_bits(&self) -> u32 {
        ((self.reverse as u32) << 14)
            | ((self.horizontal_368 as u32) << 16)
            | (((self.horizontal_res & 3) as u32) << 17)
            | ((self.vertical_480 as u32) << 19)
            | (((self.video_mode == VideoMode::PAL) as u32) << 20)
            | (((self.color_depth == ColorDepth::C24Bit) as u32) << 21)
            | ((self.interlaced as u32) << 22)
    }
}

/// DMA direction (GP1 0x04)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DmaDirection {
    /// DMA disabled
    #[default]
    Off,

    /// FIFO status
    Fifo,

    /// CPU → GP0
    CpuToGp0,

    /// GPUREAD → CPU
    GpuReadToCpu,
}

impl DmaDirection {
    /// Decode the low two bits of a GP1 0x04 word
    pub fn from_bits(bits: u32) -> Self {
        match bits & 3 {
            0 => DmaDirection::Off,
            1 => DmaDirection::Fifo,
            2 => DmaDirection::CpuToGp0,
            _ => DmaDirection::GpuReadToCpu,
        }
    }

    /// The 2-bit field value
    pub fn bits(&self) -> u32 {
        match self {
            DmaDirection::Off => 0,
            DmaDirection::Fifo => 1,
            DmaDirection::CpuToGp0 => 2,
            DmaDirection::GpuReadToCpu => 3,
        }
    }
}

/// The GPU register file
///
/// Persistent configuration mutated only by GP0 environment commands,
/// GP1 control commands and the texpage carried by textured polygons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registers {
    /// Drawing mode (E1)
    pub draw_mode: DrawMode,

    /// Texture window (E2)
    pub texture_window: TextureWindow,

    /// Clip rectangle (E3/E4)
    pub draw_area: DrawingArea,

    /// Drawing offset (E5)
    pub draw_offset: DrawOffset,

    /// Mask policy (E6)
    pub mask: MaskSettings,

    /// Whether E1 bit 11 may disable texturing (GP1 0x09)
    pub texture_disable_allowed: bool,

    /// Display area start in VRAM
    pub display_start: DisplayStart,

    /// Horizontal display range
    pub horizontal_range: DisplayRange,

    /// Vertical display range
    pub vertical_range: DisplayRange,

    /// Display mode
    pub display_mode: DisplayMode,

    /// Display output disabled (GP1 0x03)
    pub display_disabled: bool,

    /// DMA direction
    pub dma_direction: DmaDirection,

    /// Interrupt requested by GP0 0x1F
    pub interrupt_request: bool,
}

impl Default for Registers {
    fn default() -> Self {
        Self {
            draw_mode: DrawMode::default(),
            texture_window: TextureWindow::default(),
            draw_area: DrawingArea::default(),
            draw_offset: DrawOffset::default(),
            mask: MaskSettings::default(),
            texture_disable_allowed: false,
            display_start: DisplayStart::default(),
            horizontal_range: DisplayRange::DEFAULT_HORIZONTAL,
            vertical_range: DisplayRange::DEFAULT_VERTICAL,
            display_mode: DisplayMode::default(),
            display_disabled: true,
            dma_direction: DmaDirection::Off,
            interrupt_request: false,
        }
    }
}
