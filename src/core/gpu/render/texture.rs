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

//! Texel addressing
//!
//! Textures live in VRAM alongside everything else. A texture page is
//! 256×256 texels starting at the page base; how many texels fit in one
//! 16-bit VRAM word depends on the depth:
//!
//! | Depth  | Texels per word | Lookup                        |
//! |--------|-----------------|-------------------------------|
//! | 4-bit  | 4               | nibble `u & 3` → 16-entry CLUT |
//! | 8-bit  | 2               | byte `u & 1` → 256-entry CLUT  |
//! | 15-bit | 1               | direct color                  |

use super::super::types::{TextureDepth, TextureInfo};
use super::super::vram::Framebuffer;

/// Fetch the native texel at (u, v) of a texture page
///
/// `u` and `v` must already have the texture window applied. A return
/// value of 0x0000 means transparent.
#[inline(always)]
pub(super) fn sample(vram: &Framebuffer, texture: &TextureInfo, u: u8, v: u8) -> u16 {
    let y = texture.page_y + v as u16;

    match texture.depth {
        TextureDepth::T4Bit => {
            let word = vram.read(texture.page_x + (u as u16 >> 2), y);
            let index = (word >> ((u as u16 & 3) * 4)) & 0x0F;
            vram.read(texture.clut_x + index, texture.clut_y)
        }
        TextureDepth::T8Bit => {
            let word = vram.read(texture.page_x + (u as u16 >> 1), y);
            let index = (word >> ((u as u16 & 1) * 8)) & 0xFF;
            vram.read(texture.clut_x + index, texture.clut_y)
        }
        TextureDepth::T15Bit => vram.read(texture.page_x + u as u16, y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texture(depth: TextureDepth) -> TextureInfo {
        TextureInfo {
            page_x: 64,
            page_y: 0,
            clut_x: 0,
            clut_y: 480,
            depth,
        }
    }

    #[test]
    fn test_4bit_nibble_selection() {
        let mut vram = Framebuffer::new();
        vram.write(64, 3, 0x4321);
        for index in 0..16 {
            vram.write(index, 480, 0x1000 + index);
        }

        let tex = texture(TextureDepth::T4Bit);
        assert_eq!(sample(&vram, &tex, 0, 3), 0x1001);
        assert_eq!(sample(&vram, &tex, 1, 3), 0x1002);
        assert_eq!(sample(&vram, &tex, 2, 3), 0x1003);
        assert_eq!(sample(&vram, &tex, 3, 3), 0x1004);
    }

    #[test]
    fn test_8bit_byte_selection() {
        let mut vram = Framebuffer::new();
        vram.write(65, 0, 0xAB12);
        vram.write(0x12, 480, 0x0123);
        vram.write(0xAB, 480, 0x0456);

        let tex = texture(TextureDepth::T8Bit);
        assert_eq!(sample(&vram, &tex, 2, 0), 0x0123);
        assert_eq!(sample(&vram, &tex, 3, 0), 0x0456);
    }

    #[test]
    fn test_15bit_direct() {
        let mut vram = Framebuffer::new();
        vram.write(64 + 200, 10, 0x801F);

        let tex = texture(TextureDepth::T15Bit);
        assert_eq!(sample(&vram, &tex, 200, 10), 0x801F);
    }
}
