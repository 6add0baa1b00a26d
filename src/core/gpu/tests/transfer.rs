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


//! Transfer tests
//! CPU→VRAM uploads, VRAM→CPU readback and VRAM→VRAM copies

use super::super::*;

fn upload(gpu: &mut GPU, x: u32, y: u32, w: u32, h: u32, data: &[u32]) {
    gpu.write_gp0(0xA000_0000);
    gpu.write_gp0((y << 16) | x);
    gpu.write_gp0((h << 16) | w);
    for &word in data {
        gpu.write_gp0(word);
    }
}

fn start_readback(gpu: &mut GPU, x: u32, y: u32, w: u32, h: u32) {
    gpu.write_gp0(0xC000_0000);
    gpu.write_gp0((y << 16) | x);
    gpu.write_gp0((h << 16) | w);
}

#[test]
fn test_cpu_to_vram_upload() {
    let mut gpu = GPU::new();

    upload(&mut gpu, 10, 20, 2, 2, &[0x2222_1111, 0x4444_3333]);

    assert_eq!(gpu.read_vram(10, 20), 0x1111);
    assert_eq!(gpu.read_vram(11, 20), 0x2222);
    assert_eq!(gpu.read_vram(10, 21), 0x3333);
    assert_eq!(gpu.read_vram(11, 21), 0x4444);
    assert_eq!(gpu.gp0_mode(), Gp0Mode::Command);
}

#[test]
fn test_upload_enters_pixel_mode() {
    let mut gpu = GPU::new();

    upload(&mut gpu, 0, 0, 4, 1, &[0x0001_0001]);
    assert!(matches!(gpu.gp0_mode(), Gp0Mode::PixelTransfer(_)));

    gpu.write_gp0(0x0001_0001);
    assert_eq!(gpu.gp0_mode(), Gp0Mode::Command);
}

#[test]
fn test_odd_upload_ends_mid_word() {
    let mut gpu = GPU::new();

    // 3 pixels: the high half of the second word is dropped
    upload(&mut gpu, 0, 0, 3, 1, &[0x2222_1111, 0x7FFF_3333]);
    assert_eq!(gpu.read_vram(2, 0), 0x3333);
    assert_eq!(gpu.read_vram(3, 0), 0x0000);
    assert_eq!(gpu.gp0_mode(), Gp0Mode::Command);

    // The next word is a command again
    gpu.write_gp0(0x0200_00FF);
    gpu.write_gp0(0x0000_0010);
    gpu.write_gp0(0x0001_0001);
    assert_eq!(gpu.read_vram(16, 0), 0x001F);
}

#[test]
fn test_upload_sets_mask_bit() {
    let mut gpu = GPU::new();
    gpu.write_gp0(0xE600_0001);

    upload(&mut gpu, 0, 0, 2, 1, &[0x7FFF_001F]);

    assert_eq!(gpu.read_vram(0, 0), 0x801F);
    assert_eq!(gpu.read_vram(1, 0), 0xFFFF);
}

#[test]
fn test_upload_respects_check_mask() {
    let mut gpu = GPU::new();
    gpu.write_vram(0, 0, 0x8000);
    gpu.write_gp0(0xE600_0002);

    upload(&mut gpu, 0, 0, 2, 1, &[0x03E0_001F]);

    assert_eq!(gpu.read_vram(0, 0), 0x8000);
    assert_eq!(gpu.read_vram(1, 0), 0x03E0);
}

#[test]
fn test_upload_wraps_horizontally() {
    let mut gpu = GPU::new();

    upload(&mut gpu, 1023, 5, 2, 1, &[0x2222_1111]);

    assert_eq!(gpu.read_vram(1023, 5), 0x1111);
    assert_eq!(gpu.read_vram(0, 5), 0x2222);
}

#[test]
fn test_upload_size_zero_means_maximum() {
    let mut gpu = GPU::new();

    // Width 0 means 1024: 512 words fill exactly one row
    gpu.write_gp0(0xA000_0000);
    gpu.write_gp0(0x0000_0000);
    gpu.write_gp0(0x0002_0000);
    for _ in 0..512 {
        gpu.write_gp0(0x0001_0001);
    }
    assert!(matches!(gpu.gp0_mode(), Gp0Mode::PixelTransfer(_)));
    assert_eq!(gpu.read_vram(1023, 0), 0x0001);
    assert_eq!(gpu.read_vram(0, 1), 0x0000);

    gpu.write_gp0(0x0002_0002);
    assert_eq!(gpu.read_vram(0, 1), 0x0002);
}

#[test]
fn test_vram_to_cpu_readback() {
    let mut gpu = GPU::new();
    gpu.write_vram(100, 50, 0x1234);
    gpu.write_vram(101, 50, 0x5678);
    gpu.write_vram(100, 51, 0x9ABC);
    gpu.write_vram(101, 51, 0x7DEF);

    start_readback(&mut gpu, 100, 50, 2, 2);

    // Ready to send, not ready for DMA
    assert_ne!(gpu.status() & (1 << 27), 0);
    assert_eq!(gpu.status() & (1 << 28), 0);
    assert_eq!(gpu.gp0_mode(), Gp0Mode::Command);

    assert_eq!(gpu.read_gpuread(), 0x5678_1234);
    assert_eq!(gpu.read_gpuread(), 0x7DEF_9ABC);

    assert!(gpu.readback().is_none());
    assert_eq!(gpu.status() & (1 << 27), 0);
    assert_ne!(gpu.status() & (1 << 28), 0);
}

#[test]
fn test_odd_readback_pads_high_half() {
    let mut gpu = GPU::new();
    gpu.write_vram(0, 0, 0x1111);
    gpu.write_vram(1, 0, 0x2222);
    gpu.write_vram(2, 0, 0x3333);

    start_readback(&mut gpu, 0, 0, 3, 1);

    assert_eq!(gpu.read_gpuread(), 0x2222_1111);
    assert_eq!(gpu.read_gpuread(), 0x0000_3333);
    assert!(gpu.readback().is_none());
}

#[test]
fn test_gpuread_latches_after_readback() {
    let mut gpu = GPU::new();
    gpu.write_vram(0, 0, 0x1111);
    gpu.write_vram(1, 0, 0x2222);

    start_readback(&mut gpu, 0, 0, 2, 1);
    assert_eq!(gpu.read_gpuread(), 0x2222_1111);

    // VRAM changes do not affect the latched value
    gpu.write_vram(0, 0, 0x7FFF);
    assert_eq!(gpu.read_gpuread(), 0x2222_1111);
    assert_eq!(gpu.read_gpuread(), 0x2222_1111);
}

#[test]
fn test_commands_run_during_readback() {
    let mut gpu = GPU::new();
    gpu.write_vram(0, 0, 0x1111);

    start_readback(&mut gpu, 0, 0, 2, 1);

    // Rendering still works while GPUREAD is pending
    gpu.write_gp0(0xE300_0000);
    gpu.write_gp0(0xE400_0000 | (511 << 10) | 1023);
    gpu.write_gp0(0x6800_00FF);
    gpu.write_gp0(0x0000_0001);

    assert_eq!(gpu.read_gpuread(), 0x001F_1111);
}

#[test]
fn test_vram_to_vram_copy() {
    let mut gpu = GPU::new();
    gpu.write_vram(0, 0, 0x1111);
    gpu.write_vram(1, 0, 0x2222);
    gpu.write_vram(0, 1, 0x3333);
    gpu.write_vram(1, 1, 0x4444);

    gpu.write_gp0(0x8000_0000);
    gpu.write_gp0(0x0000_0000);
    gpu.write_gp0(0x0064_00C8); // (200, 100)
    gpu.write_gp0(0x0002_0002);

    assert_eq!(gpu.read_vram(200, 100), 0x1111);
    assert_eq!(gpu.read_vram(201, 100), 0x2222);
    assert_eq!(gpu.read_vram(200, 101), 0x3333);
    assert_eq!(gpu.read_vram(201, 101), 0x4444);

    // Source untouched
    assert_eq!(gpu.read_vram(0, 0), 0x1111);
}

#[test]
fn test_vram_copy_applies_mask_bits() {
    let mut gpu = GPU::new();
    gpu.write_vram(0, 0, 0x001F);
    gpu.write_vram(1, 0, 0x03E0);
    gpu.write_vram(11, 0, 0x8000);

    // Set and check mask
    gpu.write_gp0(0xE600_0003);
    gpu.write_gp0(0x8000_0000);
    gpu.write_gp0(0x0000_0000);
    gpu.write_gp0(0x0000_000A);
    gpu.write_gp0(0x0001_0002);

    assert_eq!(gpu.read_vram(10, 0), 0x801F);
    assert_eq!(gpu.read_vram(11, 0), 0x8000);
}

#[test]
fn test_vram_copy_wraps() {
    let mut gpu = GPU::new();
    gpu.write_vram(1023, 511, 0x1234);
    gpu.write_vram(0, 511, 0x5678);

    // Source (1023, 511), two pixels wide, into (0, 0)
    gpu.write_gp0(0x8000_0000);
    gpu.write_gp0(0x01FF_03FF);
    gpu.write_gp0(0x0000_0000);
    gpu.write_gp0(0x0001_0002);

    assert_eq!(gpu.read_vram(0, 0), 0x1234);
    assert_eq!(gpu.read_vram(1, 0), 0x5678);
}

#[test]
fn test_overlapping_copy_buffers_rows() {
    let mut gpu = GPU::new();
    for x in 0..4 {
        gpu.write_vram(x, 0, x + 1);
    }

    // Shift the row one pixel right
    gpu.write_gp0(0x8000_0000);
    gpu.write_gp0(0x0000_0000);
    gpu.write_gp0(0x0000_0001);
    gpu.write_gp0(0x0001_0004);

    assert_eq!(gpu.read_vram(1, 0), 1);
    assert_eq!(gpu.read_vram(2, 0), 2);
    assert_eq!(gpu.read_vram(3, 0), 3);
    assert_eq!(gpu.read_vram(4, 0), 4);
}
