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

//! Video memory
//!
//! VRAM is a 1024×512 grid of 16-bit pixels (5-5-5 RGB plus a mask bit).
//! [`Framebuffer`] keeps two views of it:
//!
//! - the native 16-bit view, which is what transfers and texture sampling
//!   read and what the hardware actually stores
//! - a 32-bit view with each channel expanded to 8 bits, used by the blend
//!   stage and handed to the presentation layer
//!
//! Every mutator writes both views, so they can never disagree.
//!
//! # 32-bit Pixel Layout
//!
//! ```text
//! Bits 0-7:   Red   (5-bit value << 3)
//! Bits 8-15:  Green (5-bit value << 3)
//! Bits 16-23: Blue  (5-bit value << 3)
//! Bits 24-31: 0xFF if the mask bit is set, 0x00 otherwise
//! ```

use super::types::Color;
use crate::core::error::GpuError;

/// Dual-view 1024×512 video memory
#[derive(Clone)]
pub struct Framebuffer {
    /// Native 15-bit color + mask bit, row-major
    native: Vec<u16>,

    /// Expanded 8-bit-per-channel view, row-major
    rgba: Vec<u32>,

    /// Native → 32-bit conversion for every possible 16-bit pixel
    lut: Box<[u32]>,
}

impl Framebuffer {
    /// VRAM width in pixels
    pub const WIDTH: usize = 1024;

    /// VRAM height in pixels
    pub const HEIGHT: usize = 512;

    /// Total VRAM size in pixels
    pub const SIZE: usize = Self::WIDTH * Self::HEIGHT;

    /// Create a framebuffer with every pixel black and unmasked
    pub fn new() -> Self {
        let lut: Box<[u32]> = (0..=u16::MAX).map(expand_pixel).collect();
        let black = lut[0];

        Self {
            native: vec![0x0000; Self::SIZE],
            rgba: vec![black; Self::SIZE],
            lut,
        }
    }

    /// Rebuild a framebuffer from a native 16-bit snapshot
    ///
    /// # Errors
    ///
    /// Returns [`GpuError::InvalidVramSize`] if `native` is not exactly
    /// 1024×512 pixels.
    pub fn from_native(native: &[u16]) -> Result<Self, GpuError> {
        if native.len() != Self::SIZE {
            return Err(GpuError::InvalidVramSize {
                expected: Self::SIZE,
                got: native.len(),
            });
        }

        let mut framebuffer = Self::new();
        framebuffer.native.copy_from_slice(native);
        for (dst, &pixel) in framebuffer.rgba.iter_mut().zip(native) {
            *dst = framebuffer.lut[pixel as usize];
        }
        Ok(framebuffer)
    }

    /// Linear index of a wrapped VRAM coordinate
    #[inline(always)]
    pub fn index(x: u16, y: u16) -> usize {
        ((y & 0x1FF) as usize) * Self::WIDTH + (x & 0x3FF) as usize
    }

    /// Read a native pixel (coordinates wrap)
    #[inline(always)]
    pub fn read(&self, x: u16, y: u16) -> u16 {
        self.native[Self::index(x, y)]
    }

    /// Read the 32-bit view of a pixel (coordinates wrap)
    #[inline(always)]
    pub fn read_rgba(&self, x: u16, y: u16) -> u32 {
        self.rgba[Self::index(x, y)]
    }

    /// Read a pixel as 8-bit channels from the 32-bit view
    #[inline(always)]
    pub fn read_color(&self, x: u16, y: u16) -> Color {
        let value = self.read_rgba(x, y);
        Color::new(value as u8, (value >> 8) as u8, (value >> 16) as u8)
    }

    /// Write a native pixel to both views (coordinates wrap)
    #[inline(always)]
    pub fn write(&mut self, x: u16, y: u16, value: u16) {
        let index = Self::index(x, y);
        self.native[index] = value;
        self.rgba[index] = self.lut[value as usize];
    }

    /// Fill a rectangle with one native value
    ///
    /// Rows are filled with slice operations when the rectangle lies inside
    /// VRAM; otherwise every pixel is written with wrapped coordinates.
    pub fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, value: u16) {
        let (x, y) = (x & 0x3FF, y & 0x1FF);
        let converted = self.lut[value as usize];

        if x as usize + width as usize <= Self::WIDTH && y as usize + height as usize <= Self::HEIGHT
        {
            for row in y as usize..(y + height) as usize {
                let start = row * Self::WIDTH + x as usize;
                let end = start + width as usize;
                self.native[start..end].fill(value);
                self.rgba[start..end].fill(converted);
            }
        } else {
            for dy in 0..height {
                for dx in 0..width {
                    let index = Self::index(x.wrapping_add(dx), y.wrapping_add(dy));
                    self.native[index] = value;
                    self.rgba[index] = converted;
                }
            }
        }
    }

    /// Set every pixel to one native value
    pub fn fill(&mut self, value: u16) {
        self.native.fill(value);
        self.rgba.fill(self.lut[value as usize]);
    }

    /// Convert a native pixel to its 32-bit form
    #[inline(always)]
    pub fn convert(&self, pixel: u16) -> u32 {
        self.lut[pixel as usize]
    }

    /// Read-only native view, row-major
    pub fn as_native(&self) -> &[u16] {
        &self.native
    }

    /// Read-only 32-bit view, row-major
    pub fn as_rgba(&self) -> &[u32] {
        &self.rgba
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("width", &Self::WIDTH)
            .field("height", &Self::HEIGHT)
            .finish_non_exhaustive()
    }
}

/// Expand a native pixel into the 32-bit layout
const fn expand_pixel(pixel: u16) -> u32 {
    let r = ((pixel & 0x1F) as u32) << 3;
    let g = (((pixel >> 5) & 0x1F) as u32) << 3;
    let b = (((pixel >> 10) & 0x1F) as u32) << 3;
    let mask = if pixel & 0x8000 != 0 { 0xFF } else { 0x00 };
    r | (g << 8) | (b << 16) | (mask << 24)
}
