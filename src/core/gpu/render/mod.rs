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

//! Software Rasterizer
//!
//! Converts decoded primitives into VRAM pixels. Triangles use edge
//! functions with a top-left fill rule, lines use an integer DDA and
//! rectangles step texture coordinates linearly. Every covered pixel goes
//! through the same pipeline:
//!
//! 1. Skip if check-mask is on and the destination mask bit is set
//! 2. Sample the texture through the texture window (texel 0 = transparent)
//! 3. Modulate the texel with the vertex color unless raw-textured
//! 4. Blend with the destination if semi-transparent
//! 5. Dither if enabled
//! 6. OR in the mask bits and write both VRAM views
//!
//! # References
//!
//! - [PSX-SPX: GPU Rendering](http://problemkaputt.de/psx-spx.htm#gpurenderstatecommands)
//! - [Pineda: A Parallel Algorithm for Polygon Rasterization](https://www.cs.drexel.edu/~david/Classes/Papers/comp175-06-pineda.pdf)

mod line;
mod rectangle;
mod texture;
mod triangle;

use super::registers::Registers;
use super::types::{BlendMode, Color, PrimitiveFlags, TexCoord, TextureInfo};
use super::vram::Framebuffer;

pub use rectangle::Rectangle;

/// 4×4 ordered dither offsets, indexed by `[y & 3][x & 3]`
pub const DITHER_TABLE: [[i8; 4]; 4] = [
    [-4, 0, -3, 1],
    [2, -2, 3, -1],
    [-3, 1, -4, 0],
    [3, -1, 2, -2],
];

/// Per-draw constants of the pixel pipeline
#[derive(Debug, Clone, Copy)]
pub(in crate::core::gpu) struct Shading {
    pub flags: PrimitiveFlags,
    pub blend: BlendMode,
    pub texture: TextureInfo,
}

/// Draws primitives into a framebuffer under one register file
///
/// A rasterizer borrows VRAM mutably and the registers immutably for the
/// duration of one draw command.
///
/// # Examples
///
/// ```
/// use psrx_gpu::core::gpu::{Color, Framebuffer, Primitive, Rasterizer, Registers, Vertex};
///
/// let mut vram = Framebuffer::new();
/// let regs = Registers::default();
///
/// let mut triangle = Primitive {
///     vertex_count: 3,
///     ..Default::default()
/// };
/// triangle.vertices[..3].copy_from_slice(&[
///     Vertex::new(0, 0),
///     Vertex::new(16, 0),
///     Vertex::new(0, 16),
/// ]);
/// triangle.colors[0] = Color::new(255, 0, 0);
///
/// Rasterizer::new(&mut vram, &regs).draw_polygon(&triangle);
/// assert_eq!(vram.read(2, 2), 0x001F);
/// assert_eq!(vram.read(15, 15), 0x0000);
/// ```
pub struct Rasterizer<'a> {
    vram: &'a mut Framebuffer,
    regs: &'a Registers,
}

impl<'a> Rasterizer<'a> {
    /// Borrow VRAM and registers for one draw
    pub fn new(vram: &'a mut Framebuffer, regs: &'a Registers) -> Self {
        Self { vram, regs }
    }

    /// Run one pixel through the pipeline
    ///
    /// `x` and `y` must already be clipped to the drawing area.
    #[inline(always)]
    fn plot(&mut self, x: i32, y: i32, color: Color, uv: Option<TexCoord>, shading: &Shading) {
        let (px, py) = (x as u16, y as u16);

        let destination = self.vram.read(px, py);
        if !self.regs.mask.can_write(destination) {
            return;
        }

        let mut color = color;
        let mut texel_mask = 0;
        let mut semi_transparent = shading.flags.contains(PrimitiveFlags::SEMI_TRANSPARENT);

        if let Some(uv) = uv {
            let (u, v) = self.regs.texture_window.apply(uv.u, uv.v);
            let texel = texture::sample(self.vram, &shading.texture, u, v);
            if texel == 0x0000 {
                return;
            }

            let texel_color = Color::from_rgb15(texel);
            color = if shading.flags.contains(PrimitiveFlags::RAW_TEXTURE) {
                texel_color
            } else {
                color.modulate(texel_color)
            };

            texel_mask = texel & 0x8000;
            semi_transparent &= texel_mask != 0;
        }

        if semi_transparent {
            color = shading.blend.blend(self.vram.read_color(px, py), color);
        }

        let pixel = if self.regs.draw_mode.dithering {
            dither(color, x, y)
        } else {
            color.to_rgb15()
        };

        self.vram
            .write(px, py, pixel | texel_mask | self.regs.mask.or_bits());
    }
}

/// Apply the ordered dither offset and reduce to 15-bit
#[inline(always)]
fn dither(color: Color, x: i32, y: i32) -> u16 {
    let offset = DITHER_TABLE[(y & 3) as usize][(x & 3) as usize] as i32;
    let channel = |c: u8| ((c as i32 + offset).clamp(0, 255) >> 3) as u16;

    channel(color.r) | (channel(color.g) << 5) | (channel(color.b) << 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dither_clamps_to_channel_range() {
        // Offset -4 at (0, 0), +3 at (2, 1)
        assert_eq!(dither(Color::new(2, 0, 0), 0, 0), 0x0000);
        assert_eq!(dither(Color::new(255, 255, 255), 2, 1), 0x7FFF);
        // 5 + 3 = 8 → 1 after the shift
        assert_eq!(dither(Color::new(5, 0, 0), 2, 1), 0x0001);
    }
}
