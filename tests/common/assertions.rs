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


//! Custom assertions for GPU integration testing

use psrx_gpu::core::GPU;
use image::RgbImage;

/// Assert VRAM pixel has expected color
#[allow(dead_code)]
pub fn assert_vram_pixel(gpu: &GPU, x: u16, y: u16, expected: u16) {
    let actual = gpu.read_vram(x, y);
    assert_eq!(
        actual, expected,
        "VRAM at ({}, {}) mismatch: expected 0x{:04X}, got 0x{:04X}",
        x, y, expected, actual
    );
}

/// Assert every pixel of a VRAM rectangle has the expected color
#[allow(dead_code)]
pub fn assert_vram_rect(gpu: &GPU, x: u16, y: u16, width: u16, height: u16, expected: u16) {
    for row in y..y + height {
        for col in x..x + width {
            assert_vram_pixel(gpu, col, row, expected);
        }
    }
}

/// Assert a status register bit
#[allow(dead_code)]
pub fn assert_status_bit(gpu: &GPU, bit: u32, expected: bool) {
    let status = gpu.status();
    assert_eq!(
        status & (1 << bit) != 0,
        expected,
        "GPUSTAT bit {} mismatch: status 0x{:08X}",
        bit,
        status
    );
}

/// Assert an exported image pixel
#[allow(dead_code)]
pub fn assert_image_pixel(image: &RgbImage, x: u32, y: u32, expected: [u8; 3]) {
    let actual = image.get_pixel(x, y).0;
    assert_eq!(
        actual, expected,
        "Image at ({}, {}) mismatch: expected {:?}, got {:?}",
        x, y, expected, actual
    );
}
