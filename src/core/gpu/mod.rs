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

//! GPU (Graphics Processing Unit) implementation
//!
//! This module implements the Sony CXD8561Q GPU used in the PlayStation
//! console. The GPU is responsible for:
//! - Managing 1MB of VRAM (1024×512 pixels, 16-bit per pixel)
//! - Processing GP0 (drawing) and GP1 (control) commands
//! - Rendering primitives (polygons, lines, rectangles)
//! - Streaming pixel transfers between the CPU and VRAM
//!
//! # VRAM Layout
//!
//! The GPU has 1MB of VRAM organized as a 1024×512 pixel framebuffer where each pixel
//! is 16-bit (5-5-5-bit RGB). The framebuffer can be used flexibly for display buffers,
//! textures, and color lookup tables (CLUTs). A second, 32-bit view of the same
//! pixels is kept in sync for blending and presentation (see [`Framebuffer`]).
//!
//! # Coordinate System
//!
//! The coordinate system origin (0, 0) is at the top-left corner of VRAM:
//! - X-axis: 0 to 1023 (left to right)
//! - Y-axis: 0 to 511 (top to bottom)
//!
//! # Color Format
//!
//! VRAM pixels use 16-bit color in 5-5-5 RGB format:
//! - Bits 0-4: Red (5 bits)
//! - Bits 5-9: Green (5 bits)
//! - Bits 10-14: Blue (5 bits)
//! - Bit 15: Mask bit (used for draw masking)
//!
//! # Threading
//!
//! The GPU is a single exclusively-owned value. Every port write runs to
//! completion before returning; callers on multiple threads must serialize
//! access themselves.
//!
//! # References
//!
//! - [PSX-SPX: GPU](http://problemkaputt.de/psx-spx.htm#gpu)
//! - [PSX-SPX: GPU Rendering](http://problemkaputt.de/psx-spx.htm#gpurenderstatecommands)

// Module declarations
mod cursor;
mod gp0;
mod gp1;
mod registers;
mod render;
mod snapshot;
#[cfg(test)]
mod tests;
mod timing;
mod types;
mod vram;

// Public re-exports
pub use cursor::TransferCursor;
pub use gp0::{command_length, is_polyline_terminator, Gp0Mode};
pub use registers::*;
pub use render::{Rasterizer, Rectangle, DITHER_TABLE};
pub use timing::Timing;
pub use types::*;
pub use vram::Framebuffer;

use gp0::CommandFifo;

/// GPU state representing the CXD8561 graphics processor
///
/// The GPU owns its VRAM, register file, command decoder and transfer
/// cursors. It processes drawing commands via the GP0 port and control
/// commands via the GP1 port.
///
/// # Examples
///
/// ```
/// use psrx_gpu::core::GPU;
///
/// let mut gpu = GPU::new();
/// gpu.reset();
///
/// // Write a white pixel to VRAM
/// gpu.write_vram(100, 100, 0x7FFF);
/// assert_eq!(gpu.read_vram(100, 100), 0x7FFF);
/// ```
pub struct GPU {
    /// Dual-view VRAM (1024×512)
    pub(in crate::core::gpu) vram: Framebuffer,

    /// Register file
    pub(in crate::core::gpu) regs: Registers,

    /// GP0 decoder state
    pub(in crate::core::gpu) gp0_mode: Gp0Mode,

    /// Words of the GP0 command being assembled by the direct write path
    pub(in crate::core::gpu) fifo: CommandFifo,

    /// Active VRAM→CPU transfer
    pub(in crate::core::gpu) readback: Option<TransferCursor>,

    /// Value returned by GPUREAD when no readback is active
    ///
    /// Set by GP1(0x10) info queries and by the last readback word.
    pub(in crate::core::gpu) gpuread: u32,

    /// Scanline/frame counters
    pub(in crate::core::gpu) timing: Timing,
}

impl GPU {
    /// VRAM width in pixels
    pub const VRAM_WIDTH: usize = Framebuffer::WIDTH;

    /// VRAM height in pixels
    pub const VRAM_HEIGHT: usize = Framebuffer::HEIGHT;

    /// Total VRAM size in pixels
    pub const VRAM_SIZE: usize = Framebuffer::SIZE;

    /// GPU version reported by GP1(0x10) info query 7
    pub const GPU_VERSION: u32 = 2;

    /// Create a new GPU instance with initialized VRAM
    ///
    /// Initializes the GPU with:
    /// - All VRAM pixels set to black (0x0000)
    /// - Default drawing area (full VRAM)
    /// - Default display settings (256×240, NTSC)
    /// - Display initially disabled
    ///
    /// # Examples
    ///
    /// ```
    /// use psrx_gpu::core::GPU;
    ///
    /// let gpu = GPU::new();
    /// assert_eq!(gpu.read_vram(0, 0), 0x0000); // Black
    /// ```
    pub fn new() -> Self {
        Self {
            vram: Framebuffer::new(),
            regs: Registers::default(),
            gp0_mode: Gp0Mode::Command,
            fifo: CommandFifo::new(),
            readback: None,
            gpuread: 0,
            timing: Timing::default(),
        }
    }

    /// Reset GPU to initial state
    ///
    /// Clears all VRAM to black and resets all GPU state to default values.
    /// This is equivalent to a hardware reset.
    ///
    /// # Examples
    ///
    /// ```
    /// use psrx_gpu::core::GPU;
    ///
    /// let mut gpu = GPU::new();
    /// gpu.write_vram(500, 250, 0xFFFF);
    /// gpu.reset();
    /// assert_eq!(gpu.read_vram(500, 250), 0x0000); // Back to black
    /// ```
    pub fn reset(&mut self) {
        self.reset_state_preserving_vram();
        self.timing = Timing::default();
        self.vram.fill(0x0000);
    }

    /// Reset registers, decoder and transfers without touching VRAM
    ///
    /// Used by GP1(0x00), which must not clear VRAM.
    pub(in crate::core::gpu) fn reset_state_preserving_vram(&mut self) {
        self.regs = Registers::default();
        self.gp0_mode = Gp0Mode::Command;
        self.fifo.clear();
        self.readback = None;
        self.gpuread = 0;
    }

    /// Read a 16-bit pixel from VRAM
    ///
    /// # Arguments
    ///
    /// * `x` - X coordinate (0-1023)
    /// * `y` - Y coordinate (0-511)
    ///
    /// # Note
    ///
    /// Coordinates are automatically wrapped to valid VRAM ranges
    /// (0-1023 for X, 0-511 for Y), matching PlayStation hardware behavior.
    #[inline(always)]
    pub fn read_vram(&self, x: u16, y: u16) -> u16 {
        self.vram.read(x, y)
    }

    /// Write a 16-bit pixel to VRAM
    ///
    /// Both VRAM views are updated. No mask test is applied; this is the
    /// host's backdoor, not a GPU command.
    ///
    /// # Arguments
    ///
    /// * `x` - X coordinate (0-1023)
    /// * `y` - Y coordinate (0-511)
    /// * `value` - 16-bit pixel value in 5-5-5 RGB format
    ///
    /// # Examples
    ///
    /// ```
    /// use psrx_gpu::core::GPU;
    ///
    /// let mut gpu = GPU::new();
    /// gpu.write_vram(100, 100, 0x7FFF); // White
    /// assert_eq!(gpu.read_vram(100, 100), 0x7FFF);
    /// assert_eq!(gpu.framebuffer()[100 * 1024 + 100], 0x00F8_F8F8);
    /// ```
    #[inline(always)]
    pub fn write_vram(&mut self, x: u16, y: u16, value: u16) {
        self.vram.write(x, y, value);
    }

    /// Read-only access to both VRAM views
    pub fn vram(&self) -> &Framebuffer {
        &self.vram
    }

    /// The 32-bit view of VRAM, row-major, 1024 pixels per row
    ///
    /// This is the presentation contract: each pixel is
    /// `R | G << 8 | B << 16 | mask << 24` with 8-bit channels.
    pub fn framebuffer(&self) -> &[u32] {
        self.vram.as_rgba()
    }

    /// The register file
    pub fn registers(&self) -> &Registers {
        &self.regs
    }

    /// Current GP0 decoder state
    pub fn gp0_mode(&self) -> Gp0Mode {
        self.gp0_mode
    }

    /// Active VRAM→CPU transfer, if any
    pub fn readback(&self) -> Option<TransferCursor> {
        self.readback
    }

    /// Get current GPU status register value
    ///
    /// The status word is assembled from live register, transfer and timing
    /// state on every call.
    ///
    /// ```text
    /// Bits 0-3:   Texture page X base
    /// Bit  4:     Texture page Y base
    /// Bits 5-6:   Semi-transparency mode
    /// Bits 7-8:   Texture depth
    /// Bit  9:     Dithering
    /// Bit  10:    Drawing to display area allowed
    /// Bit  11:    Set mask bit while drawing
    /// Bit  12:    Check mask bit before drawing
    /// Bit  13:    Interlace field
    /// Bit  14:    Reverse flag
    /// Bit  15:    Texture disable
    /// Bit  16:    Horizontal resolution 2
    /// Bits 17-18: Horizontal resolution 1
    /// Bit  19:    Vertical resolution
    /// Bit  20:    Video mode (PAL)
    /// Bit  21:    Display area color depth (24-bit)
    /// Bit  22:    Vertical interlace
    /// Bit  23:    Display disabled
    /// Bit  24:    Interrupt request
    /// Bit  25:    DMA request
    /// Bit  26:    Ready to receive command
    /// Bit  27:    Ready to send VRAM to CPU
    /// Bit  28:    Ready to receive DMA block
    /// Bits 29-30: DMA direction
    /// Bit  31:    Drawing odd line
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// use psrx_gpu::core::GPU;
    ///
    /// let gpu = GPU::new();
    /// let status = gpu.status();
    /// assert_ne!(status & (1 << 26), 0); // Always ready for commands
    /// assert_ne!(status & (1 << 23), 0); // Display starts disabled
    /// ```
    pub fn status(&self) -> u32 {
        let regs = &self.regs;
        let interlaced = regs.display_mode.interlaced;

        let ready_to_send = self.readback.is_some();
        let ready_for_dma = !ready_to_send;
        let dma_request = match regs.dma_direction {
            DmaDirection::Off => false,
            DmaDirection::Fifo => true,
            DmaDirection::CpuToGp0 => ready_for_dma,
            DmaDirection::GpuReadToCpu => ready_to_send,
        };

        let mut status = regs.draw_mode.status_bits();
        status |= (regs.mask.set_mask_bit as u32) << 11;
        status |= (regs.mask.check_mask_bit as u32) << 12;
        status |= ((!interlaced || self.timing.odd_field()) as u32) << 13;
        status |= regs.display_mode.status_bits();
        status |= (regs.display_disabled as u32) << 23;
        status |= (regs.interrupt_request as u32) << 24;
        status |= (dma_request as u32) << 25;
        status |= 1 << 26;
        status |= (ready_to_send as u32) << 27;
        status |= (ready_for_dma as u32) << 28;
        status |= regs.dma_direction.bits() << 29;
        status |= (self.timing.odd_line(interlaced) as u32) << 31;
        status
    }

    /// Read from GPUREAD register (0x1F801810)
    ///
    /// During a VRAM→CPU transfer each read returns the next two pixels
    /// packed into one word (first pixel in the low half). Otherwise the
    /// most recently latched value is returned.
    pub fn read_gpuread(&mut self) -> u32 {
        let Some(cursor) = self.readback.as_mut() else {
            return self.gpuread;
        };

        let (x, y) = cursor.position();
        let low = self.vram.read(x, y);
        let mut complete = cursor.advance();

        let high = if complete {
            0
        } else {
            let (x, y) = cursor.position();
            let pixel = self.vram.read(x, y);
            complete = cursor.advance();
            pixel
        };

        if complete {
            self.readback = None;
            log::debug!("VRAM→CPU transfer complete");
        }

        self.gpuread = (low as u32) | ((high as u32) << 16);
        self.gpuread
    }

    /// Tick GPU timing
    ///
    /// Advances the scanline counters by `cycles` GPU clock cycles using the
    /// current video mode (NTSC: 3413 cycles × 263 lines, PAL: 3406 × 314).
    ///
    /// # Returns
    ///
    /// A tuple `(vblank_started, scanline_completed)`:
    /// - `vblank_started`: the vertical blanking period began during this tick
    /// - `scanline_completed`: at least one scanline finished during this tick
    ///
    /// # Examples
    ///
    /// ```
    /// use psrx_gpu::core::GPU;
    ///
    /// let mut gpu = GPU::new();
    /// let (vblank, hblank) = gpu.tick(1);
    /// assert!(!vblank);
    /// assert!(!hblank);
    ///
    /// let (_, hblank) = gpu.tick(3413);
    /// assert!(hblank);
    /// assert_eq!(gpu.scanline(), 1);
    /// ```
    pub fn tick(&mut self, cycles: u32) -> (bool, bool) {
        let mode = &self.regs.display_mode;
        self.timing.tick(
            cycles,
            mode.video_mode,
            mode.interlaced,
            self.regs.vertical_range,
        )
    }

    /// Get current VBlank status
    pub fn is_in_vblank(&self) -> bool {
        self.timing.in_vblank()
    }

    /// Get current scanline number
    pub fn scanline(&self) -> u16 {
        self.timing.scanline()
    }

    /// Completed frames since reset
    pub fn frame_count(&self) -> u64 {
        self.timing.frames()
    }

    /// Visible display resolution `(width, height)`
    ///
    /// # Examples
    ///
    /// ```
    /// use psrx_gpu::core::GPU;
    ///
    /// let mut gpu = GPU::new();
    /// gpu.write_gp1(0x0800_0001); // 320×240 NTSC
    /// assert_eq!(gpu.display_resolution(), (320, 240));
    /// ```
    pub fn display_resolution(&self) -> (u16, u16) {
        let mode = &self.regs.display_mode;
        (mode.width(), mode.height())
    }

    /// Top-left corner of the displayed area in VRAM
    pub fn display_start(&self) -> (u16, u16) {
        (self.regs.display_start.x, self.regs.display_start.y)
    }

    /// Whether GP0(0x1F) raised an interrupt that GP1(0x02) hasn't acknowledged
    pub fn irq_pending(&self) -> bool {
        self.regs.interrupt_request
    }
}

impl Default for GPU {
    fn default() -> Self {
        Self::new()
    }
}
