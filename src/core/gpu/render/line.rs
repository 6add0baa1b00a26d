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

//! Line rasterization
//!
//! Integer DDA along the dominant axis. Both endpoints are drawn, colors
//! are interpolated linearly per step, and lines are never textured.

use super::super::types::{BlendMode, Color, PrimitiveFlags, TextureInfo, Vertex};
use super::{Rasterizer, Shading};

impl Rasterizer<'_> {
    /// Draw one line segment
    ///
    /// # Arguments
    ///
    /// * `start`, `end` - Endpoints before the drawing offset
    /// * `start_color`, `end_color` - Endpoint colors (equal for flat lines)
    /// * `semi_transparent` - Blend with the mode from the draw mode register
    ///
    /// Segments spanning 1024 or more pixels horizontally or 512 or more
    /// vertically are discarded.
    pub fn draw_line(
        &mut self,
        start: Vertex,
        end: Vertex,
        start_color: Color,
        end_color: Color,
        semi_transparent: bool,
    ) {
        let offset = self.regs.draw_offset;
        let (x0, y0) = (
            start.x as i32 + offset.x as i32,
            start.y as i32 + offset.y as i32,
        );
        let (x1, y1) = (end.x as i32 + offset.x as i32, end.y as i32 + offset.y as i32);

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        if dx >= 1024 || dy >= 512 {
            log::trace!("Line rejected: span {}×{} too large", dx, dy);
            return;
        }

        log::trace!("Line ({}, {}) → ({}, {})", x0, y0, x1, y1);

        let shading = Shading {
            flags: if semi_transparent {
                PrimitiveFlags::SEMI_TRANSPARENT
            } else {
                PrimitiveFlags::empty()
            },
            blend: BlendMode::from_bits(self.regs.draw_mode.semi_transparency),
            texture: TextureInfo::default(),
        };

        let sx = (x1 - x0).signum();
        let sy = (y1 - y0).signum();
        let steps = dx.max(dy);
        let x_major = dx >= dy;

        let (mut x, mut y) = (x0, y0);
        let mut remainder = steps / 2;

        for step in 0..=steps {
            if self.regs.draw_area.contains(x, y) {
                let color = lerp_color(start_color, end_color, step, steps);
                self.plot(x, y, color, None, &shading);
            }

            if x_major {
                x += sx;
                remainder -= dy;
                if remainder < 0 {
                    y += sy;
                    remainder += dx;
                }
            } else {
                y += sy;
                remainder -= dx;
                if remainder < 0 {
                    x += sx;
                    remainder += dy;
                }
            }
        }
    }
}

/// Linear color interpolation at `step` of `steps`
#[inline(always)]
fn lerp_color(start: Color, end: Color, step: i32, steps: i32) -> Color {
    if steps == 0 {
        return start;
    }

    let channel = |a: u8, b: u8| (a as i32 + (b as i32 - a as i32) * step / steps) as u8;
    Color::new(
        channel(start.r, end.r),
        channel(start.g, end.g),
        channel(start.b, end.b),
    )
}
