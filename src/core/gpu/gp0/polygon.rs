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

//! GP0 polygon commands (0x20-0x3F)
//!
//! # Opcode Bits
//!
//! ```text
//! Bit 4: Gouraud shading    (0=flat, 1=per-vertex colors)
//! Bit 3: Vertex count       (0=triangle, 1=quad)
//! Bit 2: Textured
//! Bit 1: Semi-transparent
//! Bit 0: Raw texture        (0=modulated, 1=texel color as-is)
//! ```
//!
//! # Word Layout
//!
//! ```text
//! Color0+Command   CcBBGGRR
//! Vertex0          YYYYXXXX
//! UV0+CLUT         ClutUUVV   (textured)
//! Color1           00BBGGRR   (shaded)
//! Vertex1          YYYYXXXX
//! UV1+Texpage      PageUUVV   (textured)
//! ...              (same pattern for vertices 2 and 3)
//! ```

use super::super::render::Rasterizer;
use super::super::types::{Color, Primitive, PrimitiveFlags, TexCoord, TextureInfo, Vertex};
use super::super::GPU;

impl GPU {
    /// Decode and draw a polygon command
    ///
    /// The texpage carried by a textured polygon's second texcoord word
    /// replaces the live draw mode (page, semi-transparency mode, depth and
    /// texture disable), so later untextured primitives observe it too.
    pub(in crate::core::gpu) fn gp0_polygon(&mut self, words: &[u32]) {
        let opcode = (words[0] >> 24) as u8;
        let vertex_count = if opcode & 0x08 != 0 { 4 } else { 3 };

        let mut primitive = Primitive {
            vertex_count,
            flags: PrimitiveFlags::from_opcode(opcode),
            ..Default::default()
        };
        let shaded = primitive.is_shaded();
        let textured = primitive.is_textured();

        let mut clut = 0u16;
        let mut texpage = 0u16;
        let mut index = 0;

        for i in 0..vertex_count {
            primitive.colors[i] = if i == 0 || shaded {
                let color = Color::from_u32(words[index]);
                index += 1;
                color
            } else {
                primitive.colors[0]
            };

            primitive.vertices[i] = Vertex::from_u32(words[index]);
            index += 1;

            if textured {
                let word = words[index];
                index += 1;
                primitive.texcoords[i] = TexCoord::from_u32(word);
                match i {
                    0 => clut = (word >> 16) as u16,
                    1 => texpage = (word >> 16) as u16,
                    _ => {}
                }
            }
        }

        if textured {
            let allowed = self.regs.texture_disable_allowed;
            self.regs.draw_mode.apply_texpage(texpage, allowed);
            primitive.texture = TextureInfo::from_words(texpage, clut);

            if self.regs.draw_mode.texture_disable {
                primitive.flags.remove(PrimitiveFlags::TEXTURED);
            }
        }
        primitive.blend_mode = self.regs.draw_mode.blend_mode();

        log::trace!(
            "Polygon 0x{:02X}: {} vertices, flags={:?}",
            opcode,
            vertex_count,
            primitive.flags
        );

        Rasterizer::new(&mut self.vram, &self.regs).draw_polygon(&primitive);
    }
}
