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


//! Property-based tests
//! Transfer round trips, winding invariance and the shared-edge fill rule

use super::super::*;
use proptest::prelude::*;

fn vertex(x: u32, y: u32) -> u32 {
    (y << 16) | x
}

prop_compose! {
    fn arb_point(max: u32)(x in 0..max, y in 0..max) -> (u32, u32) {
        (x, y)
    }
}

prop_compose! {
    fn arb_upload()(
        x in 0u32..1024,
        y in 0u32..512,
        width in 1u32..=16,
        height in 1u32..=16,
    )(
        pixels in prop::collection::vec(any::<u16>(), (width * height) as usize),
        x in Just(x),
        y in Just(y),
        width in Just(width),
        height in Just(height),
    ) -> (u32, u32, u32, u32, Vec<u16>) {
        (x, y, width, height, pixels)
    }
}

/// Pack pixels two per word, low half first
fn pack(pixels: &[u16]) -> Vec<u32> {
    pixels
        .chunks(2)
        .map(|pair| pair[0] as u32 | (pair.get(1).copied().unwrap_or(0) as u32) << 16)
        .collect()
}

fn unpack(words: &[u32], count: usize) -> Vec<u16> {
    words
        .iter()
        .flat_map(|&word| [word as u16, (word >> 16) as u16])
        .take(count)
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn upload_then_readback_returns_pixels(
        (x, y, width, height, pixels) in arb_upload(),
        set_mask in any::<bool>(),
    ) {
        let mut gpu = GPU::new();
        gpu.write_gp0(0xE600_0000 | set_mask as u32);

        let mut command = vec![0xA000_0000, vertex(x, y), (height << 16) | width];
        command.extend(pack(&pixels));
        gpu.write_gp0_buffer(&command);
        prop_assert_eq!(gpu.gp0_mode(), Gp0Mode::Command);

        gpu.write_gp0_buffer(&[0xC000_0000, vertex(x, y), (height << 16) | width]);
        let words: Vec<u32> = (0..pixels.len().div_ceil(2))
            .map(|_| gpu.read_gpuread())
            .collect();
        prop_assert!(gpu.readback().is_none());

        let mask = if set_mask { 0x8000 } else { 0 };
        let expected: Vec<u16> = pixels.iter().map(|&p| p | mask).collect();
        prop_assert_eq!(unpack(&words, pixels.len()), expected);
    }

    #[test]
    fn flat_triangle_ignores_vertex_rotation(
        a in arb_point(128),
        b in arb_point(128),
        c in arb_point(128),
        color in 0u32..0x0100_0000,
    ) {
        let mut first = GPU::new();
        let mut second = GPU::new();

        first.write_gp0_buffer(&[
            0x2000_0000 | color,
            vertex(a.0, a.1),
            vertex(b.0, b.1),
            vertex(c.0, c.1),
        ]);
        second.write_gp0_buffer(&[
            0x2000_0000 | color,
            vertex(b.0, b.1),
            vertex(c.0, c.1),
            vertex(a.0, a.1),
        ]);

        prop_assert!(first.vram().as_native() == second.vram().as_native());
    }

    #[test]
    fn shaded_triangle_ignores_vertex_rotation(
        a in arb_point(128),
        b in arb_point(128),
        c in arb_point(128),
        colors in prop::array::uniform3(0u32..0x0100_0000),
    ) {
        let mut first = GPU::new();
        let mut second = GPU::new();

        first.write_gp0_buffer(&[
            0x3000_0000 | colors[0],
            vertex(a.0, a.1),
            colors[1],
            vertex(b.0, b.1),
            colors[2],
            vertex(c.0, c.1),
        ]);
        second.write_gp0_buffer(&[
            0x3000_0000 | colors[1],
            vertex(b.0, b.1),
            colors[2],
            vertex(c.0, c.1),
            colors[0],
            vertex(a.0, a.1),
        ]);

        prop_assert!(first.vram().as_native() == second.vram().as_native());
    }

    #[test]
    fn shared_edge_pixels_drawn_once(
        a in arb_point(200),
        b in arb_point(200),
        c in arb_point(200),
        d in arb_point(200),
    ) {
        let side = |p: (u32, u32)| {
            let (ax, ay, bx, by) = (a.0 as i64, a.1 as i64, b.0 as i64, b.1 as i64);
            (bx - ax) * (p.1 as i64 - ay) - (by - ay) * (p.0 as i64 - ax)
        };
        // C and D strictly on opposite sides of AB
        prop_assume!(side(c).signum() * side(d).signum() < 0);

        let mut gpu = GPU::new();
        gpu.write_gp0(0xE100_0020); // Additive blending

        // Semi-transparent flat triangles adding 8 to red
        gpu.write_gp0_buffer(&[0x2200_0008, vertex(a.0, a.1), vertex(b.0, b.1), vertex(c.0, c.1)]);
        gpu.write_gp0_buffer(&[0x2200_0008, vertex(b.0, b.1), vertex(a.0, a.1), vertex(d.0, d.1)]);

        let overdrawn = (0..200u16)
            .flat_map(|y| (0..200u16).map(move |x| (x, y)))
            .filter(|&(x, y)| gpu.read_vram(x, y) > 0x0001)
            .count();
        prop_assert_eq!(overdrawn, 0);
    }

    #[test]
    fn split_rectangle_tiles_exactly(
        x0 in 0u32..100,
        y0 in 0u32..100,
        width in 1u32..100,
        height in 1u32..100,
        flip in any::<bool>(),
    ) {
        let (x1, y1) = (x0 + width, y0 + height);
        let mut gpu = GPU::new();
        gpu.write_gp0(0xE100_0020);

        // Split along either diagonal, second half wound the other way
        let (first, second) = if flip {
            ([(x0, y0), (x1, y0), (x0, y1)], [(x0, y1), (x1, y0), (x1, y1)])
        } else {
            ([(x0, y0), (x1, y1), (x0, y1)], [(x0, y0), (x1, y0), (x1, y1)])
        };
        for tri in [first, second] {
            gpu.write_gp0_buffer(&[
                0x2200_0008,
                vertex(tri[0].0, tri[0].1),
                vertex(tri[1].0, tri[1].1),
                vertex(tri[2].0, tri[2].1),
            ]);
        }

        let once = (0..200u16)
            .flat_map(|y| (0..200u16).map(move |x| (x, y)))
            .filter(|&(x, y)| gpu.read_vram(x, y) == 0x0001)
            .count();
        let twice = (0..200u16)
            .flat_map(|y| (0..200u16).map(move |x| (x, y)))
            .filter(|&(x, y)| gpu.read_vram(x, y) > 0x0001)
            .count();

        prop_assert_eq!(twice, 0);
        prop_assert_eq!(once, (width * height) as usize);
    }
}
