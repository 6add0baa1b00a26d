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

//! GP0 rectangle commands (0x60-0x7F)
//!
//! # Opcode Bits
//!
//! ```text
//! Bits 3-4: Size (0=variable, 1=1×1, 2=8×8, 3=16×16)
//! Bit 2:    Textured
//! Bit 1:    Semi-transparent
//! Bit 0:    Raw texture
//! ```
//!
//! # Word Layout
//!
//! ```text
//! Color+Command   CcBBGGRR
//! Vertex          YYYYXXXX   (top-left corner)
//! UV+CLUT         ClutUUVV   (textured)
//! Size            HHHHWWWW   (variable size)
//! ```
//!
//! Rectangles carry no texpage: page, depth and semi-transparency mode come
//! from the current draw mode.

use super::super::render::{Rasterizer, Rectangle};
use super::super::types::{Color, PrimitiveFlags, TexCoord, TextureInfo, Vertex};
use super::super::GPU;

impl GPU {
    /// Decode and draw a rectangle command
    pub(in crate::core::gpu) fn gp0_rectangle(&mut self, words: &[u32]) {
        let opcode = (words[0] >> 24) as u8;
        let mut flags = PrimitiveFlags::from_opcode(opcode) - PrimitiveFlags::SHADED;

        let draw_mode = self.regs.draw_mode;
        if draw_mode.texture_disable {
            flags.remove(PrimitiveFlags::TEXTURED);
        }

        let mut index = 2;
        let mut texcoord = TexCoord::default();
        let mut clut = 0u16;
        if opcode & 0x04 != 0 {
            texcoord = TexCoord::from_u32(words[index]);
            clut = (words[index] >> 16) as u16;
            index += 1;
        }

        let (width, height) = match (opcode >> 3) & 3 {
            0 => (
                (words[index] & 0x3FF) as u16,
                ((words[index] >> 16) & 0x1FF) as u16,
            ),
            1 => (1, 1),
            2 => (8, 8),
            _ => (16, 16),
        };

        let rect = Rectangle {
            origin: Vertex::from_u32(words[1]),
            width,
            height,
            color: Color::from_u32(words[0]),
            texcoord,
            flags,
            texture: TextureInfo::from_words(draw_mode.texpage(), clut),
            blend_mode: draw_mode.blend_mode(),
            flip_x: draw_mode.texture_x_flip,
            flip_y: draw_mode.texture_y_flip,
        };

        log::trace!(
            "Rectangle 0x{:02X}: ({}, {}) {}×{}",
            opcode,
            rect.origin.x,
            rect.origin.y,
            width,
            height
        );

        Rasterizer::new(&mut self.vram, &self.regs).draw_rectangle(&rect);
    }
}
