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

//! Rectangle (sprite) rasterization

use super::super::types::{BlendMode, Color, PrimitiveFlags, TexCoord, TextureInfo, Vertex};
use super::{Rasterizer, Shading};

/// A decoded GP0 rectangle
#[derive(Debug, Clone, Copy, Default)]
pub struct Rectangle {
    /// Top-left corner before the drawing offset
    pub origin: Vertex,

    /// Width in pixels
    pub width: u16,

    /// Height in pixels
    pub height: u16,

    /// Flat color (texture modulation color when textured)
    pub color: Color,

    /// Texture coordinate of the top-left corner
    pub texcoord: TexCoord,

    /// Rendering attributes (never shaded)
    pub flags: PrimitiveFlags,

    /// Texture page and CLUT
    pub texture: TextureInfo,

    /// Blend mode for semi-transparent pixels
    pub blend_mode: BlendMode,

    /// Step U downwards instead of upwards
    pub flip_x: bool,

    /// Step V downwards instead of upwards
    pub flip_y: bool,
}

impl Rasterizer<'_> {
    /// Draw a rectangle
    ///
    /// Texture coordinates advance by one texel per pixel and wrap at 256.
    pub fn draw_rectangle(&mut self, rect: &Rectangle) {
        let offset = self.regs.draw_offset;
        let x0 = rect.origin.x as i32 + offset.x as i32;
        let y0 = rect.origin.y as i32 + offset.y as i32;

        let area = self.regs.draw_area;
        let first_col = (area.left as i32 - x0).max(0);
        let last_col = (area.right as i32 - x0 + 1).min(rect.width as i32);
        let first_row = (area.top as i32 - y0).max(0);
        let last_row = (area.bottom as i32 - y0 + 1).min(rect.height as i32);

        if first_col >= last_col || first_row >= last_row {
            return;
        }

        log::trace!(
            "Rectangle ({}, {}) size {}×{} flags={:?}",
            x0,
            y0,
            rect.width,
            rect.height,
            rect.flags
        );

        let shading = Shading {
            flags: rect.flags,
            blend: rect.blend_mode,
            texture: rect.texture,
        };
        let textured = rect.flags.contains(PrimitiveFlags::TEXTURED);

        for row in first_row..last_row {
            let v = step_texcoord(rect.texcoord.v, row, rect.flip_y);

            for col in first_col..last_col {
                let uv = textured
                    .then(|| TexCoord::new(step_texcoord(rect.texcoord.u, col, rect.flip_x), v));
                self.plot(x0 + col, y0 + row, rect.color, uv, &shading);
            }
        }
    }
}

/// Texture coordinate `delta` texels away from `base`, wrapping at 256
#[inline(always)]
fn step_texcoord(base: u8, delta: i32, flip: bool) -> u8 {
    if flip {
        base.wrapping_sub(delta as u8)
    } else {
        base.wrapping_add(delta as u8)
    }
}
