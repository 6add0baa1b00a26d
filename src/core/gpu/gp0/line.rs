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

//! GP0 line commands (0x40-0x5F)
//!
//! # Opcode Bits
//!
//! ```text
//! Bit 4: Gouraud shading
//! Bit 3: Polyline (vertex list ends with 0x5xxx5xxx)
//! Bit 1: Semi-transparent
//! ```
//!
//! # Word Layout
//!
//! ```text
//! Flat:    Color+Command, Vertex0, Vertex1, [Vertex2, ...]
//! Shaded:  Color0+Command, Vertex0, Color1, Vertex1, [Color2, Vertex2, ...]
//! ```

use super::super::render::Rasterizer;
use super::super::types::{Color, PrimitiveFlags, Vertex};
use super::super::GPU;

impl GPU {
    /// Decode and draw a line or polyline
    ///
    /// `words` holds every word of the command up to the terminator, so a
    /// polyline of N vertices draws N-1 connected segments. A trailing
    /// color with no vertex is ignored.
    pub(in crate::core::gpu) fn gp0_line(&mut self, words: &[u32]) {
        let opcode = (words[0] >> 24) as u8;
        let flags = PrimitiveFlags::from_opcode(opcode);
        let shaded = flags.contains(PrimitiveFlags::SHADED);
        let semi_transparent = flags.contains(PrimitiveFlags::SEMI_TRANSPARENT);

        log::trace!(
            "Line 0x{:02X}: {} words, shaded={} semi={}",
            opcode,
            words.len(),
            shaded,
            semi_transparent
        );

        let mut rasterizer = Rasterizer::new(&mut self.vram, &self.regs);
        if shaded {
            let colors = std::iter::once(words[0]).chain(words[2..].iter().step_by(2).copied());
            let vertices = words[1..].iter().step_by(2).copied();
            let points = vertices
                .zip(colors)
                .map(|(vertex, color)| (Vertex::from_u32(vertex), Color::from_u32(color)));
            draw_strip(&mut rasterizer, points, semi_transparent);
        } else {
            let base = Color::from_u32(words[0]);
            let points = words[1..]
                .iter()
                .map(|&vertex| (Vertex::from_u32(vertex), base));
            draw_strip(&mut rasterizer, points, semi_transparent);
        }
    }
}

/// Draw connected segments through consecutive points
fn draw_strip(
    rasterizer: &mut Rasterizer<'_>,
    points: impl Iterator<Item = (Vertex, Color)>,
    semi_transparent: bool,
) {
    let mut previous: Option<(Vertex, Color)> = None;
    for (vertex, color) in points {
        if let Some((start, start_color)) = previous {
            rasterizer.draw_line(start, vertex, start_color, color, semi_transparent);
        }
        previous = Some((vertex, color));
    }
}
