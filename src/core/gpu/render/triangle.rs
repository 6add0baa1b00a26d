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

//! Triangle rasterization
//!
//! # Algorithm
//!
//! 1. Apply the drawing offset and compute the signed area
//! 2. Discard zero area; swap vertices 1 and 2 when the area is negative
//! 3. Reject bounding boxes wider than 1023 or taller than 511 pixels
//! 4. Clip the bounding box to the drawing area
//! 5. Walk the box, stepping three edge functions incrementally
//!
//! A pixel is covered when every edge function plus its bias is
//! non-negative. Top and left edges have bias 0, all others -1, so two
//! triangles sharing an edge never both cover a pixel on it.
//!
//! The unbiased edge values are the barycentric weights used to
//! interpolate colors and texture coordinates (affine, no perspective).

use super::super::types::{Color, Primitive, TexCoord};
use super::{Rasterizer, Shading};

/// A triangle corner after the drawing offset is applied
#[derive(Debug, Clone, Copy)]
struct Corner {
    x: i32,
    y: i32,
    color: Color,
    uv: TexCoord,
}

/// Edge function of the directed edge a→b at point (x, y)
#[inline(always)]
fn edge(a: &Corner, b: &Corner, x: i32, y: i32) -> i64 {
    (b.x - a.x) as i64 * (y - a.y) as i64 - (b.y - a.y) as i64 * (x - a.x) as i64
}

/// Fill-rule bias of the directed edge a→b
#[inline(always)]
fn edge_bias(a: &Corner, b: &Corner) -> i64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let top_left = (dy == 0 && dx > 0) || dy < 0;
    if top_left {
        0
    } else {
        -1
    }
}

/// Weighted average of three values, weights summing to `area`
#[inline(always)]
fn interpolate(weights: [i64; 3], values: [u8; 3], area: i64) -> u8 {
    let sum = weights[0] * values[0] as i64
        + weights[1] * values[1] as i64
        + weights[2] * values[2] as i64;
    (sum / area) as u8
}

impl Rasterizer<'_> {
    /// Draw a polygon (one triangle or a quad as two triangles)
    ///
    /// Quads are drawn as (0, 1, 2) followed by (1, 2, 3).
    pub fn draw_polygon(&mut self, primitive: &Primitive) {
        let shading = Shading {
            flags: primitive.flags,
            blend: primitive.blend_mode,
            texture: primitive.texture,
        };

        for &indices in primitive.triangles() {
            self.draw_triangle(primitive, indices, &shading);
        }
    }

    fn draw_triangle(&mut self, primitive: &Primitive, indices: [usize; 3], shading: &Shading) {
        let offset = self.regs.draw_offset;
        let mut corners = indices.map(|i| Corner {
            x: primitive.vertices[i].x as i32 + offset.x as i32,
            y: primitive.vertices[i].y as i32 + offset.y as i32,
            color: primitive.colors[i],
            uv: primitive.texcoords[i],
        });

        let mut area = edge(&corners[0], &corners[1], corners[2].x, corners[2].y);
        if area == 0 {
            return;
        }
        if area < 0 {
            corners.swap(1, 2);
            area = -area;
        }

        let [v0, v1, v2] = corners;

        let min_x = v0.x.min(v1.x).min(v2.x);
        let max_x = v0.x.max(v1.x).max(v2.x);
        let min_y = v0.y.min(v1.y).min(v2.y);
        let max_y = v0.y.max(v1.y).max(v2.y);

        if max_x - min_x >= 1024 || max_y - min_y >= 512 {
            log::trace!(
                "Triangle rejected: bounding box {}×{} too large",
                max_x - min_x,
                max_y - min_y
            );
            return;
        }

        let area_rect = self.regs.draw_area;
        let min_x = min_x.max(area_rect.left as i32);
        let max_x = max_x.min(area_rect.right as i32);
        let min_y = min_y.max(area_rect.top as i32);
        let max_y = max_y.min(area_rect.bottom as i32);

        if min_x > max_x || min_y > max_y {
            return;
        }

        log::trace!(
            "Triangle ({}, {}) ({}, {}) ({}, {}) flags={:?}",
            v0.x,
            v0.y,
            v1.x,
            v1.y,
            v2.x,
            v2.y,
            shading.flags
        );

        // Weight of each vertex is the edge function of the opposite edge
        let biases = [edge_bias(&v1, &v2), edge_bias(&v2, &v0), edge_bias(&v0, &v1)];
        let step_x = [
            (v1.y - v2.y) as i64,
            (v2.y - v0.y) as i64,
            (v0.y - v1.y) as i64,
        ];
        let step_y = [
            (v2.x - v1.x) as i64,
            (v0.x - v2.x) as i64,
            (v1.x - v0.x) as i64,
        ];

        let mut row = [
            edge(&v1, &v2, min_x, min_y),
            edge(&v2, &v0, min_x, min_y),
            edge(&v0, &v1, min_x, min_y),
        ];

        let shaded = primitive.is_shaded();
        let textured = primitive.is_textured();

        for y in min_y..=max_y {
            let mut weights = row;

            for x in min_x..=max_x {
                if weights[0] + biases[0] >= 0
                    && weights[1] + biases[1] >= 0
                    && weights[2] + biases[2] >= 0
                {
                    let color = if shaded {
                        Color::new(
                            interpolate(weights, [v0.color.r, v1.color.r, v2.color.r], area),
                            interpolate(weights, [v0.color.g, v1.color.g, v2.color.g], area),
                            interpolate(weights, [v0.color.b, v1.color.b, v2.color.b], area),
                        )
                    } else {
                        primitive.colors[0]
                    };

                    let uv = textured.then(|| {
                        TexCoord::new(
                            interpolate(weights, [v0.uv.u, v1.uv.u, v2.uv.u], area),
                            interpolate(weights, [v0.uv.v, v1.uv.v, v2.uv.v], area),
                        )
                    });

                    self.plot(x, y, color, uv, shading);
                }

                for (weight, step) in weights.iter_mut().zip(step_x) {
                    *weight += step;
                }
            }

            for (weight, step) in row.iter_mut().zip(step_y) {
                *weight += step;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner(x: i32, y: i32) -> Corner {
        Corner {
            x,
            y,
            color: Color::default(),
            uv: TexCoord::default(),
        }
    }

    #[test]
    fn test_edge_function_sign() {
        let a = corner(0, 0);
        let b = corner(10, 0);
        // Clockwise on screen (y down) is positive
        assert!(edge(&a, &b, 0, 10) > 0);
        assert!(edge(&a, &b, 0, -10) < 0);
        assert_eq!(edge(&a, &b, 5, 0), 0);
    }

    #[test]
    fn test_top_left_bias() {
        // Top edge (left to right)
        assert_eq!(edge_bias(&corner(0, 0), &corner(10, 0)), 0);
        // Left edge (upwards)
        assert_eq!(edge_bias(&corner(0, 10), &corner(0, 0)), 0);
        // Bottom edge (right to left)
        assert_eq!(edge_bias(&corner(10, 10), &corner(0, 10)), -1);
        // Right edge (downwards)
        assert_eq!(edge_bias(&corner(10, 0), &corner(10, 10)), -1);
    }

    #[test]
    fn test_interpolate_at_vertex() {
        assert_eq!(interpolate([100, 0, 0], [10, 20, 30], 100), 10);
        assert_eq!(interpolate([0, 0, 100], [10, 20, 30], 100), 30);
        assert_eq!(interpolate([50, 50, 0], [0, 255, 0], 100), 127);
    }
}
