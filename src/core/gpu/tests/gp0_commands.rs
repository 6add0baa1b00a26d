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

//! GP0 command tests
//! Decoding, FIFO buffering, polylines, environment commands and the
//! buffer (DMA) path

use super::super::*;

#[test]
fn test_gp0_command_buffering() {
    let mut gpu = GPU::new();

    // Send partial command (should buffer)
    gpu.write_gp0(0xA000_0000);
    assert_eq!(gpu.fifo.as_slice().len(), 1);
    assert_eq!(gpu.gp0_mode(), Gp0Mode::Command);

    gpu.write_gp0(0x0000_0000);
    assert_eq!(gpu.fifo.as_slice().len(), 2);

    // Third word completes the command
    gpu.write_gp0(0x0001_0001);
    assert!(gpu.fifo.is_empty());
    assert!(matches!(gpu.gp0_mode(), Gp0Mode::PixelTransfer(_)));
}

#[test]
fn test_gp0_unknown_command() {
    let mut gpu = GPU::new();

    gpu.write_gp0(0xFF00_0000);
    assert!(gpu.fifo.is_empty());

    // Next word is decoded as a fresh command
    gpu.write_gp0(0xE100_0200);
    assert!(gpu.registers().draw_mode.dithering);
}

#[test]
fn test_environment_commands() {
    let mut gpu = GPU::new();

    gpu.write_gp0(0xE200_0000 | 0x1F | (0x01 << 5) | (0x03 << 10) | (0x02 << 15));
    gpu.write_gp0(0xE300_0000 | 10 | (20 << 10));
    gpu.write_gp0(0xE400_0000 | 300 | (200 << 10));
    gpu.write_gp0(0xE500_0000 | 0x7F6 | (8 << 11)); // (-10, 8)
    gpu.write_gp0(0xE600_0001);

    let regs = gpu.registers();
    assert_eq!(regs.texture_window.mask_x, 0x1F);
    assert_eq!(regs.texture_window.mask_y, 0x01);
    assert_eq!(regs.texture_window.offset_x, 0x03);
    assert_eq!(regs.texture_window.offset_y, 0x02);
    assert_eq!(
        regs.draw_area,
        DrawingArea {
            left: 10,
            top: 20,
            right: 300,
            bottom: 200
        }
    );
    assert_eq!(regs.draw_offset, DrawOffset { x: -10, y: 8 });
    assert!(regs.mask.set_mask_bit);
    assert!(!regs.mask.check_mask_bit);
}

#[test]
fn test_draw_mode_command() {
    let mut gpu = GPU::new();
    gpu.write_gp0(0xE100_3000 | 0x0200 | (2 << 7) | (1 << 5) | 3);

    let mode = gpu.registers().draw_mode;
    assert_eq!(mode.texture_page_x_base, 3);
    assert_eq!(mode.semi_transparency, 1);
    assert_eq!(mode.texture_depth, 2);
    assert!(mode.dithering);
    assert!(mode.texture_x_flip);
    assert!(mode.texture_y_flip);
    assert!(!mode.texture_disable);
}

#[test]
fn test_polyline_terminates_direct_path() {
    let mut gpu = GPU::new();

    gpu.write_gp0(0x48FF_FFFF); // White flat polyline
    gpu.write_gp0(0x0000_0000); // (0, 0)
    gpu.write_gp0(0x0000_0010); // (16, 0)
    gpu.write_gp0(0x0010_0010); // (16, 16)
    assert!(!gpu.fifo.is_empty());

    gpu.write_gp0(0x5555_5555);
    assert!(gpu.fifo.is_empty());

    assert_eq!(gpu.read_vram(8, 0), 0x7FFF);
    assert_eq!(gpu.read_vram(16, 8), 0x7FFF);
    assert_eq!(gpu.read_vram(8, 8), 0x0000);

    // Decoder is back to command mode
    gpu.write_gp0(0xE100_0200);
    assert!(gpu.registers().draw_mode.dithering);
}

#[test]
fn test_shaded_polyline_terminator_only_in_color_slot() {
    let mut gpu = GPU::new();

    gpu.write_gp0(0x5800_00FF); // Red
    gpu.write_gp0(0x0000_0000); // (0, 0)
    gpu.write_gp0(0x0000_00FF); // Red
    gpu.write_gp0(0x5000_5000); // Vertex slot: decodes as (0, 0)
    assert!(!gpu.fifo.is_empty());

    gpu.write_gp0(0x5000_5000); // Color slot: terminator
    assert!(gpu.fifo.is_empty());
    assert_eq!(gpu.read_vram(0, 0), 0x001F);
}

#[test]
fn test_terminator_needs_two_vertices() {
    let mut gpu = GPU::new();

    gpu.write_gp0(0x4800_00FF);
    gpu.write_gp0(0x0000_0000);
    gpu.write_gp0(0x5555_5555); // Second vertex, not a terminator
    assert_eq!(gpu.fifo.as_slice().len(), 3);
}

#[test]
fn test_long_polyline_continues_past_fifo() {
    let mut words = vec![0x4800_FF00];
    for i in 0..20u32 {
        // Staircase: alternate horizontal and vertical steps
        let x = (i + 1) / 2 * 4;
        let y = i / 2 * 4;
        words.push((y << 16) | x);
    }
    words.push(0x5555_5555);

    let mut direct = GPU::new();
    for &word in &words {
        direct.write_gp0(word);
    }
    assert!(direct.fifo.is_empty());

    let mut buffered = GPU::new();
    buffered.write_gp0_buffer(&words);

    assert_eq!(direct.vram().as_native(), buffered.vram().as_native());

    // Last segment ends at (40, 36)
    assert_eq!(direct.read_vram(40, 36), 0x03E0);
}

#[test]
fn test_buffer_command_split_across_calls() {
    let mut gpu = GPU::new();

    gpu.write_gp0_buffer(&[0x0200_00FF, 0x0000_0000]);
    assert_eq!(gpu.read_vram(0, 0), 0x0000);

    gpu.write_gp0_buffer(&[0x0010_0010, 0xE100_0200]);
    assert_eq!(gpu.read_vram(0, 0), 0x001F);
    assert!(gpu.registers().draw_mode.dithering);
}

#[test]
fn test_buffer_mixes_commands_and_upload_data() {
    let mut gpu = GPU::new();

    gpu.write_gp0_buffer(&[
        0xE600_0001, // Set mask bit
        0xA000_0000,
        0x0000_0000,
        0x0001_0003, // 3×1
        0x0002_0001,
        0x9999_0003, // High half discarded
        0xE600_0000,
        0x2800_00FF, // Flat quad after the upload
        0x0010_0000,
        0x0010_0010,
        0x0020_0000,
        0x0020_0010,
    ]);

    assert_eq!(gpu.read_vram(0, 0), 0x8001);
    assert_eq!(gpu.read_vram(1, 0), 0x8002);
    assert_eq!(gpu.read_vram(2, 0), 0x8003);
    assert_eq!(gpu.read_vram(3, 0), 0x0000);
    assert_eq!(gpu.registers().mask, MaskSettings::default());
    assert_eq!(gpu.read_vram(4, 20), 0x001F);
}

#[test]
fn test_textured_polygon_updates_draw_mode() {
    let mut gpu = GPU::new();
    assert_eq!(gpu.registers().draw_mode.semi_transparency, 0);

    // Textured flat triangle; texpage selects mode 2, page (4, 0), 15-bit
    let texpage = 4 | (2 << 5) | (2 << 7);
    gpu.write_gp0_buffer(&[
        0x2480_8080,
        0x0000_0000,
        0x0000_0000,
        0x0000_0010,
        texpage << 16,
        0x0010_0000,
        0x0000_0000,
    ]);

    let mode = gpu.registers().draw_mode;
    assert_eq!(mode.semi_transparency, 2);
    assert_eq!(mode.texture_page_x_base, 4);
    assert_eq!(mode.texture_depth, 2);
    assert_eq!((gpu.status() >> 5) & 3, 2);
}

#[test]
fn test_texture_disable_requires_gp1_permission() {
    let rect = [0x6500_00FF, 0x0000_0000, 0x0000_0000, 0x0004_0004];

    // Without permission the rectangle samples an empty (transparent) page
    let mut gpu = GPU::new();
    gpu.write_gp0(0xE100_0800);
    gpu.write_gp0_buffer(&rect);
    assert!(!gpu.registers().draw_mode.texture_disable);
    assert_eq!(gpu.read_vram(1, 1), 0x0000);

    // With permission texturing is off and the flat color is drawn
    let mut gpu = GPU::new();
    gpu.write_gp1(0x0900_0001);
    gpu.write_gp0(0xE100_0800);
    gpu.write_gp0_buffer(&rect);
    assert!(gpu.registers().draw_mode.texture_disable);
    assert_ne!(gpu.status() & (1 << 15), 0);
    assert_eq!(gpu.read_vram(1, 1), 0x001F);
}
