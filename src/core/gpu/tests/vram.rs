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

//! VRAM tests
//! Dual-view storage, addressing, wrapping and fast fills

use super::super::*;
use crate::core::error::GpuError;

#[test]
fn test_vram_read_write() {
    let mut gpu = GPU::new();

    gpu.write_vram(100, 100, 0x7FFF);
    assert_eq!(gpu.read_vram(100, 100), 0x7FFF);

    // Corners
    gpu.write_vram(0, 0, 0x1234);
    gpu.write_vram(1023, 511, 0x5678);
    assert_eq!(gpu.read_vram(0, 0), 0x1234);
    assert_eq!(gpu.read_vram(1023, 511), 0x5678);
}

#[test]
fn test_views_stay_in_sync() {
    let mut gpu = GPU::new();

    gpu.write_vram(10, 20, 0x801F); // Red with mask bit
    let rgba = gpu.framebuffer()[20 * 1024 + 10];
    assert_eq!(rgba, 0xFF00_00F8);

    gpu.write_vram(10, 20, 0x7C00); // Blue, no mask
    let rgba = gpu.framebuffer()[20 * 1024 + 10];
    assert_eq!(rgba, 0x00F8_0000);
    assert_eq!(gpu.vram().read_rgba(10, 20), rgba);
}

#[test]
fn test_vram_coordinates_wrap() {
    let mut gpu = GPU::new();

    gpu.write_vram(1024 + 5, 512 + 7, 0x4321);
    assert_eq!(gpu.read_vram(5, 7), 0x4321);
    assert_eq!(gpu.read_vram(2048 + 5, 7), 0x4321);
}

#[test]
fn test_read_color_expands_channels() {
    let mut gpu = GPU::new();
    gpu.write_vram(0, 0, 0x03E0);

    assert_eq!(gpu.vram().read_color(0, 0), Color::new(0, 248, 0));
}

#[test]
fn test_fill_rounds_size_up_to_16() {
    let mut gpu = GPU::new();

    // 5×3 fill at (32, 16)
    gpu.write_gp0(0x0200_00FF);
    gpu.write_gp0(0x0010_0020);
    gpu.write_gp0(0x0003_0005);

    assert_eq!(gpu.read_vram(32, 16), 0x001F);
    assert_eq!(gpu.read_vram(32 + 15, 16 + 15), 0x001F);
    assert_eq!(gpu.read_vram(32 + 16, 16), 0x0000);
    assert_eq!(gpu.read_vram(32, 16 + 16), 0x0000);
}

#[test]
fn test_fill_wraps_at_vram_edges() {
    let mut gpu = GPU::new();

    // 16×16 at (1016, 504)
    gpu.write_gp0_buffer(&[0x0200_FF00, (504 << 16) | 1016, 0x0010_0010]);

    assert_eq!(gpu.read_vram(1016, 504), 0x03E0);
    assert_eq!(gpu.read_vram(1023, 511), 0x03E0);
    assert_eq!(gpu.read_vram(7, 7), 0x03E0);
    assert_eq!(gpu.read_vram(8, 8), 0x0000);
}

#[test]
fn test_fill_ignores_clip_and_mask() {
    let mut gpu = GPU::new();
    gpu.write_gp0(0xE300_0000 | 100 | (100 << 10));
    gpu.write_gp0(0xE400_0000 | 200 | (200 << 10));
    gpu.write_gp0(0xE600_0003);
    gpu.write_vram(0, 0, 0x8000);

    gpu.write_gp0_buffer(&[0x02FF_0000, 0x0000_0000, 0x0010_0010]);

    // Outside the clip rectangle, over a masked pixel, no mask bit added
    assert_eq!(gpu.read_vram(0, 0), 0x7C00);
    assert_eq!(gpu.read_vram(1, 1), 0x7C00);
}

#[test]
fn test_framebuffer_from_native_size_check() {
    let result = Framebuffer::from_native(&[0u16; 10]);
    assert_eq!(
        result.err(),
        Some(GpuError::InvalidVramSize {
            expected: GPU::VRAM_SIZE,
            got: 10
        })
    );

    let mut native = vec![0u16; GPU::VRAM_SIZE];
    native[5] = 0x801F;
    let framebuffer = Framebuffer::from_native(&native).unwrap();
    assert_eq!(framebuffer.read(5, 0), 0x801F);
    assert_eq!(framebuffer.read_rgba(5, 0), 0xFF00_00F8);
}
